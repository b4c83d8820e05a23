//! Hull and label box geometry construction.
//!
//! This module contains:
//! - Point hull construction (circle / capsule / buffered convex hull)
//! - Label box sizing and the region-keyed initial anchor
//! - `ClusterGeometry`, the per-cluster bundle handed to the solver

use geo::{Coord, Polygon};

use crate::error::{LayoutError, Result};
use crate::model::Cluster;
use crate::params::{AnchorRules, GeometryParams};

pub mod hull;
pub mod label;

pub use hull::{buffer_convex, circle, point_hull, raw_convex_hull};
pub use label::{box_dimensions, initial_anchor, label_box};

/// Geometry for one cluster, ready for placement.
///
/// The hull is final; only the label box anchor may still move. The stored
/// `label_box` sits at the initial anchor and is translated, never resized,
/// during the search.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterGeometry {
    pub cluster: Cluster,
    pub labels: Vec<String>,
    pub hull: Polygon<f64>,
    pub box_size: (f64, f64),
    pub anchor: Coord<f64>,
    pub label_box: Polygon<f64>,
}

/// Builds the placement geometry for a cluster.
///
/// A cluster with zero members violates the pipeline invariant and is
/// rejected rather than skipped.
pub fn build_cluster_geometry(
    cluster: Cluster,
    geometry: &GeometryParams,
    rules: &AnchorRules,
) -> Result<ClusterGeometry> {
    let centroid = cluster
        .centroid()
        .ok_or(LayoutError::EmptyCluster { id: cluster.id })?;

    let labels = cluster.labels();
    let hull = point_hull(&cluster.members, geometry);
    let (width, height) = box_dimensions(&labels, geometry);
    let anchor = initial_anchor(centroid, width, height, rules);
    let label_box = label_box(anchor, width, height, geometry);

    Ok(ClusterGeometry {
        cluster,
        labels,
        hull,
        box_size: (width, height),
        anchor,
        label_box,
    })
}
