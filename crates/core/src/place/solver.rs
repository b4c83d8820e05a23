//! The placement solver.
//!
//! Places each ranked cluster's label box in schedule order. A committed
//! cluster is frozen: its full polygon joins the obstacle set and is never
//! revisited, so later clusters can only be pushed farther away. Collisions
//! are expected outcomes of the search, not exceptional control flow.

use geo::{Area, BooleanOps, BoundingRect, Coord, Intersects, MultiPolygon, Polygon, Translate};
use tracing::{debug, warn};

use crate::error::{LayoutError, Result};
use crate::geometry::ClusterGeometry;
use crate::model::{PlacedCluster, Resolution};
use crate::params::LayoutParams;

use super::obstacles::{ObstacleIndex, polygon_bounds};
use super::search::SearchGrid;

/// Places every cluster in the given (already ranked) order.
///
/// For each cluster: propose the label box at its initial anchor; check the
/// box against every other cluster's point hull and the full polygon against
/// every committed cluster; on collision run the radial search, committing at
/// the first zero-overlap candidate or, failing that, at the minimum-overlap
/// candidate. Clusters whose placement stayed imperfect carry a flagged
/// [`Resolution`].
pub fn place_clusters(
    geoms: &[ClusterGeometry],
    params: &LayoutParams,
) -> Result<Vec<PlacedCluster>> {
    for geom in geoms {
        if geom.cluster.members.is_empty() {
            return Err(LayoutError::EmptyCluster {
                id: geom.cluster.id,
            });
        }
    }

    let mut solver = Solver {
        geoms,
        params,
        grid: SearchGrid::new(&params.search),
        hull_index: ObstacleIndex::bulk(geoms.iter().map(|g| polygon_bounds(&g.hull))),
        committed: Vec::with_capacity(geoms.len()),
        committed_index: ObstacleIndex::default(),
    };

    for (idx, geom) in geoms.iter().enumerate() {
        solver.place(idx, geom);
    }

    Ok(solver.committed)
}

struct Solver<'a> {
    geoms: &'a [ClusterGeometry],
    params: &'a LayoutParams,
    grid: SearchGrid,
    /// Point hulls of every cluster in the schedule, committed or not.
    hull_index: ObstacleIndex,
    /// Append-only; the obstacle set for all still-pending placements.
    committed: Vec<PlacedCluster>,
    committed_index: ObstacleIndex,
}

struct Candidate {
    anchor: Coord<f64>,
    label_box: Polygon<f64>,
    full: MultiPolygon<f64>,
    overlap: f64,
    distance: f64,
    angle: f64,
}

struct SearchOutcome {
    best: Option<Candidate>,
    /// Number of candidates whose overlap area was computed.
    evaluated: usize,
}

impl Solver<'_> {
    fn place(&mut self, idx: usize, geom: &ClusterGeometry) {
        let full = union(&geom.hull, &geom.label_box);
        if !self.box_hits_foreign_hull(idx, &geom.label_box)
            && !self.full_intersects_committed(&full)
        {
            self.commit(geom, geom.anchor, geom.label_box.clone(), full, Resolution::Anchor);
            return;
        }

        debug!(
            cluster = geom.cluster.id,
            "label collides at initial anchor, searching"
        );

        let outcome = self.search(idx, geom);
        match outcome.best {
            Some(found) if found.overlap == 0.0 => {
                debug!(
                    cluster = geom.cluster.id,
                    distance = found.distance,
                    "relocated to zero-overlap position"
                );
                self.commit(
                    geom,
                    found.anchor,
                    found.label_box,
                    found.full,
                    Resolution::Relocated {
                        distance: found.distance,
                        angle: found.angle,
                    },
                );
            }
            Some(found) => {
                warn!(
                    cluster = geom.cluster.id,
                    overlap = found.overlap,
                    evaluated = outcome.evaluated,
                    "search exhausted, committing minimum-overlap placement"
                );
                let overlap = found.overlap;
                self.commit(
                    geom,
                    found.anchor,
                    found.label_box,
                    found.full,
                    Resolution::Unresolved { overlap },
                );
            }
            None => {
                warn!(
                    cluster = geom.cluster.id,
                    "every candidate excluded by a point hull, applying fallback offset"
                );
                let (dx, dy) = self.params.search.fallback_offset;
                let anchor = geom.anchor + Coord { x: dx, y: dy };
                let label_box = geom.label_box.translate(dx, dy);
                let full = union(&geom.hull, &label_box);
                self.commit(geom, anchor, label_box, full, Resolution::Fallback);
            }
        }
    }

    /// Walks the radial grid ring by ring, tracking the minimum-overlap
    /// candidate. The first zero-overlap candidate ends the entire search; no
    /// farther ring is touched after that. `evaluated` counts the candidates
    /// that survived the hull exclusion and had their overlap measured.
    fn search(&self, idx: usize, geom: &ClusterGeometry) -> SearchOutcome {
        let mut best: Option<Candidate> = None;
        let mut evaluated = 0;
        'rings: for &distance in self.grid.distances() {
            for (angle, offset) in self.grid.offsets_at(distance) {
                let label_box = geom.label_box.translate(offset.x, offset.y);
                // Raw data points must never be obscured, even by clusters
                // that are not committed yet.
                if self.box_hits_foreign_hull(idx, &label_box) {
                    continue;
                }

                let full = union(&geom.hull, &label_box);
                let overlap = self.committed_overlap(&full);
                evaluated += 1;
                if best.as_ref().is_none_or(|b| overlap < b.overlap) {
                    best = Some(Candidate {
                        anchor: geom.anchor + offset,
                        label_box,
                        full,
                        overlap,
                        distance,
                        angle,
                    });
                }

                if overlap == 0.0 {
                    break 'rings;
                }
            }
        }
        SearchOutcome { best, evaluated }
    }

    /// True if the label box intersects any *other* cluster's point hull.
    fn box_hits_foreign_hull(&self, idx: usize, label_box: &Polygon<f64>) -> bool {
        let Some(bounds) = polygon_bounds(label_box) else {
            return false;
        };
        self.hull_index
            .probe(bounds)
            .any(|h| h != idx && label_box.intersects(&self.geoms[h].hull))
    }

    /// True if the full polygon intersects any committed full polygon.
    fn full_intersects_committed(&self, full: &MultiPolygon<f64>) -> bool {
        let Some(bounds) = full.bounding_rect() else {
            return false;
        };
        self.committed_index
            .probe(bounds)
            .any(|i| full.intersects(&self.committed[i].full_polygon))
    }

    /// Total intersection area of the full polygon against all committed
    /// full polygons.
    fn committed_overlap(&self, full: &MultiPolygon<f64>) -> f64 {
        let Some(bounds) = full.bounding_rect() else {
            return 0.0;
        };
        self.committed_index
            .probe(bounds)
            .map(|i| {
                full.intersection(&self.committed[i].full_polygon)
                    .unsigned_area()
            })
            .sum()
    }

    fn commit(
        &mut self,
        geom: &ClusterGeometry,
        anchor: Coord<f64>,
        label_box: Polygon<f64>,
        full: MultiPolygon<f64>,
        resolution: Resolution,
    ) {
        if let Some(bounds) = full.bounding_rect() {
            self.committed_index.insert(self.committed.len(), bounds);
        }
        self.committed.push(PlacedCluster {
            id: geom.cluster.id,
            members: geom.cluster.members.clone(),
            labels: geom.labels.clone(),
            point_hull: geom.hull.clone(),
            anchor,
            label_box,
            full_polygon: full,
            resolution,
        });
    }
}

fn union(hull: &Polygon<f64>, label_box: &Polygon<f64>) -> MultiPolygon<f64> {
    hull.union(label_box)
}
