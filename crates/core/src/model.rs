//! Data model for the label placement pipeline.
//!
//! `Landfall` records come from an external data-loading collaborator and are
//! never mutated here. `Cluster` is the ephemeral grouping produced by the
//! clusterer; it is superseded by `PlacedCluster` once the solver commits a
//! label position.

use geo::{Coord, MultiPolygon, Polygon};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A single landfall point record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landfall {
    pub longitude: f64,
    pub latitude: f64,
    /// Severity category, 1 (weakest) through 5 (strongest).
    pub category: u8,
    pub name: SmolStr,
    pub year: i32,
}

impl Landfall {
    pub fn new(
        longitude: f64,
        latitude: f64,
        category: u8,
        name: impl Into<SmolStr>,
        year: i32,
    ) -> Self {
        Self {
            longitude,
            latitude,
            category,
            name: name.into(),
            year,
        }
    }

    /// Map-plane coordinate of this point.
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// The label line rendered for this point: `"NAME (YEAR)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.year)
    }
}

/// A group of landfall points produced by the clusterer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: usize,
    pub members: Vec<Landfall>,
}

impl Cluster {
    pub fn new(id: usize, members: Vec<Landfall>) -> Self {
        Self { id, members }
    }

    /// Mean severity category of the members. Significance key for ranking.
    pub fn mean_category(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let total: f64 = self.members.iter().map(|m| f64::from(m.category)).sum();
        total / self.members.len() as f64
    }

    /// Mean coordinate of the members, or `None` for an empty cluster.
    pub fn centroid(&self) -> Option<Coord<f64>> {
        if self.members.is_empty() {
            return None;
        }
        let n = self.members.len() as f64;
        let (sx, sy) = self
            .members
            .iter()
            .fold((0.0, 0.0), |(sx, sy), m| (sx + m.longitude, sy + m.latitude));
        Some(Coord {
            x: sx / n,
            y: sy / n,
        })
    }

    /// Euclidean distance from the closest member to the reference anchor.
    pub fn anchor_distance(&self, anchor: (f64, f64)) -> f64 {
        self.members
            .iter()
            .map(|m| OrderedFloat((m.longitude - anchor.0).hypot(m.latitude - anchor.1)))
            .min()
            .map(f64::from)
            .unwrap_or(f64::INFINITY)
    }

    /// One label line per member, in member order.
    pub fn labels(&self) -> Vec<String> {
        self.members.iter().map(Landfall::label).collect()
    }
}

/// How the solver arrived at a cluster's final label position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    /// The initial anchor was collision-free.
    Anchor,
    /// The radial search found a zero-overlap position at the recorded
    /// offset (distance in map units, angle in radians).
    Relocated { distance: f64, angle: f64 },
    /// The search grid was exhausted without a zero-overlap position; the
    /// minimum-overlap candidate was committed. `overlap` is the residual
    /// intersection area against previously committed geometry.
    Unresolved { overlap: f64 },
    /// Every candidate was excluded by a raw point hull; the fixed fallback
    /// offset was applied unconditionally.
    Fallback,
}

impl Resolution {
    /// True for the placements downstream consumers should highlight:
    /// best-effort overlaps and the unconditional fallback.
    pub fn is_flagged(&self) -> bool {
        matches!(self, Resolution::Unresolved { .. } | Resolution::Fallback)
    }
}

/// A cluster whose geometry has been finalized.
///
/// Once committed, a placed cluster is frozen: it acts as an immovable
/// obstacle for every later placement and is never revisited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCluster {
    pub id: usize,
    pub members: Vec<Landfall>,
    /// Label lines, in member order.
    pub labels: Vec<String>,
    /// Buffered polygon enclosing every member point.
    pub point_hull: Polygon<f64>,
    /// Final bottom-left corner of the (unbuffered) label box.
    pub anchor: Coord<f64>,
    /// Buffered label box polygon at the final anchor.
    pub label_box: Polygon<f64>,
    /// Union of the point hull and the label box.
    pub full_polygon: MultiPolygon<f64>,
    pub resolution: Resolution,
}
