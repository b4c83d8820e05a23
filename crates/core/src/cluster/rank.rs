//! Cluster ranking.
//!
//! Produces the placement schedule consumed by the solver. The order is a
//! deliberate greedy bias: clusters placed earlier get first claim on open
//! space, so the most significant clusters go first.

use crate::model::Cluster;

/// Total-orders clusters for placement.
///
/// Primary key: descending mean severity category (overlaps on severe
/// clusters are visually more costly). Secondary key: ascending distance of
/// the closest member to `anchor`. Remaining ties break on cluster id, which
/// keeps the schedule deterministic.
pub fn rank_clusters(mut clusters: Vec<Cluster>, anchor: (f64, f64)) -> Vec<Cluster> {
    clusters.sort_by(|a, b| {
        b.mean_category()
            .total_cmp(&a.mean_category())
            .then_with(|| {
                a.anchor_distance(anchor)
                    .total_cmp(&b.anchor_distance(anchor))
            })
            .then_with(|| a.id.cmp(&b.id))
    });
    clusters
}
