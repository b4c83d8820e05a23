//! End-to-end orchestration.
//!
//! Cluster, rank, build geometry, place. The pipeline owns the ordering
//! contract between stages; every stage is deterministic, so the whole run
//! is a pure function of the input sequence and the parameters.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cluster::{cluster_points, rank_clusters};
use crate::error::Result;
use crate::geometry::build_cluster_geometry;
use crate::model::{Landfall, PlacedCluster};
use crate::params::LayoutParams;
use crate::place::{ContentKey, PlacementCache, place_clusters};

/// Finished output of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Placed clusters, in placement (rank) order.
    pub placed: Vec<PlacedCluster>,
    /// Points that joined no cluster. Never placed, never labeled.
    pub noise: Vec<Landfall>,
    /// Id pairs whose point hulls overlap. Label placement cannot separate
    /// overlapping hulls; these pairs need attention upstream.
    pub hull_conflicts: Vec<(usize, usize)>,
}

/// Runs the full pipeline over `points` with no limit and no cache.
pub fn layout_labels(points: &[Landfall], params: &LayoutParams) -> Result<Layout> {
    layout_labels_with(points, params, None, None)
}

/// Runs the full pipeline.
///
/// `limit` keeps only the first `k` ranked clusters; the rest are dropped
/// before placement, matching a display that renders the top clusters only.
/// A `cache` hit bypasses geometry construction and the solver entirely.
pub fn layout_labels_with(
    points: &[Landfall],
    params: &LayoutParams,
    limit: Option<usize>,
    cache: Option<&mut dyn PlacementCache>,
) -> Result<Layout> {
    params.validate()?;

    let clustering = cluster_points(points, &params.cluster);
    let noise = clustering.noise;
    debug!(
        clusters = clustering.clusters.len(),
        noise = noise.len(),
        "clustering complete"
    );

    let mut ranked = rank_clusters(clustering.clusters, params.reference_anchor);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    let key = ContentKey::of(points, limit);
    if let Some(cache) = &cache {
        if let Some(placed) = cache.get(key) {
            debug!(clusters = placed.len(), "layout served from cache");
            let hull_conflicts = hull_conflicts(&placed);
            return Ok(Layout {
                placed,
                noise,
                hull_conflicts,
            });
        }
    }

    let geoms = ranked
        .into_iter()
        .map(|cluster| build_cluster_geometry(cluster, &params.geometry, &params.anchor_rules))
        .collect::<Result<Vec<_>>>()?;

    let placed = place_clusters(&geoms, params)?;
    if let Some(cache) = cache {
        cache.put(key, &placed);
    }

    let hull_conflicts = hull_conflicts(&placed);
    Ok(Layout {
        placed,
        noise,
        hull_conflicts,
    })
}

/// Id pairs of placed clusters whose point hulls intersect each other.
fn hull_conflicts(placed: &[PlacedCluster]) -> Vec<(usize, usize)> {
    use geo::Intersects;

    let conflicts: Vec<(usize, usize)> = placed
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.point_hull.intersects(&b.point_hull))
        .map(|(a, b)| (a.id, b.id))
        .collect();

    for &(a, b) in &conflicts {
        warn!(first = a, second = b, "point hulls overlap, labels cannot separate them");
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Resolution;

    fn spread_points() -> Vec<Landfall> {
        vec![
            Landfall::new(-80.0, 25.0, 5, "ANDREW", 1992),
            Landfall::new(-80.1, 25.1, 4, "KING", 1950),
            Landfall::new(-86.0, 30.3, 3, "OPAL", 1995),
            Landfall::new(-86.1, 30.4, 2, "ERIN", 1995),
        ]
    }

    #[test]
    fn distant_groups_place_at_their_anchors() {
        let layout = layout_labels(&spread_points(), &LayoutParams::default()).unwrap();
        assert_eq!(layout.placed.len(), 2);
        assert!(layout.noise.is_empty());
        assert!(layout.hull_conflicts.is_empty());
        for placed in &layout.placed {
            assert_eq!(placed.resolution, Resolution::Anchor);
        }
    }

    #[test]
    fn higher_category_cluster_is_placed_first() {
        let layout = layout_labels(&spread_points(), &LayoutParams::default()).unwrap();
        // Mean category 4.5 beats 2.5.
        assert_eq!(layout.placed[0].labels[0], "ANDREW (1992)");
    }

    #[test]
    fn limit_drops_lower_ranked_clusters() {
        let layout =
            layout_labels_with(&spread_points(), &LayoutParams::default(), Some(1), None).unwrap();
        assert_eq!(layout.placed.len(), 1);
        assert_eq!(layout.placed[0].labels[0], "ANDREW (1992)");
    }

    #[test]
    fn invalid_parameters_are_rejected_before_any_work() {
        let mut params = LayoutParams::default();
        params.cluster.eps = 0.0;
        assert!(layout_labels(&spread_points(), &params).is_err());
    }
}
