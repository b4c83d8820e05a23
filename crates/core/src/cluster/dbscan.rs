//! Density clustering of landfall points.
//!
//! Classic DBSCAN over an ordered point sequence with the coastline metric.
//! The partition is a pure function of input order, metric, and parameters:
//! region queries scan points in input order and cluster ids are assigned in
//! discovery order, so identical inputs always yield identical membership.

use std::collections::VecDeque;

use itertools::Itertools;

use crate::model::{Cluster, Landfall};
use crate::params::ClusterParams;

use super::metric::coastline_distance;

/// Result of density clustering: a partition into clusters plus the points
/// too isolated to join any of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    pub clusters: Vec<Cluster>,
    pub noise: Vec<Landfall>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Label {
    Undefined,
    Noise,
    Cluster(usize),
}

/// Partitions `points` into density clusters.
///
/// A point with at least `min_points` neighbors within `eps` (itself
/// included, distance measured with the coastline metric) seeds or extends a
/// cluster; reachable non-core points join as border points. Everything else
/// lands in the noise bucket. With `min_points = 1` every point is a core
/// point of some cluster and the noise bucket is empty.
pub fn cluster_points(points: &[Landfall], params: &ClusterParams) -> Clustering {
    let n = points.len();
    let mut labels = vec![Label::Undefined; n];
    let mut next_cluster = 0usize;

    for i in 0..n {
        if labels[i] != Label::Undefined {
            continue;
        }

        let neighbors = region_query(points, i, params);
        if neighbors.len() < params.min_points {
            labels[i] = Label::Noise;
            continue;
        }

        let cid = next_cluster;
        next_cluster += 1;
        labels[i] = Label::Cluster(cid);

        // Breadth-first expansion in input order keeps the result
        // deterministic.
        let mut frontier: VecDeque<usize> = neighbors.into_iter().filter(|&j| j != i).collect();
        while let Some(j) = frontier.pop_front() {
            match labels[j] {
                Label::Noise => {
                    // Border point: reachable from a core point but not a
                    // core point itself.
                    labels[j] = Label::Cluster(cid);
                }
                Label::Undefined => {
                    labels[j] = Label::Cluster(cid);
                    let reachable = region_query(points, j, params);
                    if reachable.len() >= params.min_points {
                        // Points provisionally labeled noise are reachable
                        // again from here and become border points.
                        frontier.extend(
                            reachable
                                .into_iter()
                                .filter(|&k| !matches!(labels[k], Label::Cluster(_))),
                        );
                    }
                }
                Label::Cluster(_) => {}
            }
        }
    }

    let mut clusters: Vec<Cluster> = (0..next_cluster)
        .map(|cid| Cluster::new(cid, Vec::new()))
        .collect();
    let mut noise = Vec::new();

    for (point, label) in points.iter().zip(&labels) {
        match label {
            Label::Cluster(cid) => clusters[*cid].members.push(point.clone()),
            Label::Noise => noise.push(point.clone()),
            Label::Undefined => unreachable!("every point is labeled after the scan"),
        }
    }

    Clustering { clusters, noise }
}

/// Indices of all points within `eps` of point `i`, including `i` itself.
fn region_query(points: &[Landfall], i: usize, params: &ClusterParams) -> Vec<usize> {
    let origin = (points[i].longitude, points[i].latitude);
    points
        .iter()
        .positions(|p| {
            coastline_distance(origin, (p.longitude, p.latitude), params.angle_penalty)
                <= params.eps
        })
        .collect()
}
