//! Spatial index over placement obstacles.
//!
//! An R-tree over axis-aligned bounding boxes that prunes the exact polygon
//! intersection tests in the solver. Entries carry the index of the obstacle
//! in the owning list; the polygons themselves stay outside the tree.

use geo::{BoundingRect, Polygon, Rect};
use rstar::{AABB, RTree, RTreeObject};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ObstacleRef {
    pub idx: usize,
    envelope: AABB<[f64; 2]>,
}

impl ObstacleRef {
    fn new(idx: usize, rect: Rect<f64>) -> Self {
        Self {
            idx,
            envelope: envelope_of(rect),
        }
    }
}

impl RTreeObject for ObstacleRef {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn envelope_of(rect: Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [rect.min().x, rect.min().y],
        [rect.max().x, rect.max().y],
    )
}

/// AABB index over a list of obstacle polygons.
#[derive(Debug, Default)]
pub(crate) struct ObstacleIndex {
    tree: RTree<ObstacleRef>,
}

impl ObstacleIndex {
    /// Bulk-loads an index over the bounding boxes of `polygons`, indexed by
    /// position. Degenerate (empty) polygons are skipped; they cannot
    /// intersect anything.
    pub fn bulk(polygons: impl IntoIterator<Item = Option<Rect<f64>>>) -> Self {
        let nodes: Vec<ObstacleRef> = polygons
            .into_iter()
            .enumerate()
            .filter_map(|(idx, rect)| rect.map(|r| ObstacleRef::new(idx, r)))
            .collect();
        Self {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// Adds one obstacle with the given list index.
    pub fn insert(&mut self, idx: usize, rect: Rect<f64>) {
        self.tree.insert(ObstacleRef::new(idx, rect));
    }

    /// Indices of obstacles whose bounding boxes intersect `rect`.
    ///
    /// Candidates only; callers follow up with an exact polygon test.
    pub fn probe(&self, rect: Rect<f64>) -> impl Iterator<Item = usize> + '_ {
        self.tree
            .locate_in_envelope_intersecting(&envelope_of(rect))
            .map(|node| node.idx)
    }
}

/// Bounding rectangle of a polygon, if it has one.
pub(crate) fn polygon_bounds(polygon: &Polygon<f64>) -> Option<Rect<f64>> {
    polygon.bounding_rect()
}
