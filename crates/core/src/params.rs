//! Layout parameters.
//!
//! Every tunable constant of the pipeline lives here so deployments can
//! retune clustering, geometry, and search behavior without code changes.
//! Components take a reference to the relevant section rather than reading
//! hardwired values.

use crate::error::{LayoutError, Result};

/// Parameters for density clustering of landfall points.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterParams {
    /// Maximum linking distance between two points, measured with the
    /// coastline metric (not plain Euclidean).
    pub eps: f64,

    /// Minimum number of points (including the point itself) a neighborhood
    /// must contain for the point to seed a cluster. With `min_points = 1`
    /// every point ends up in some cluster and the noise bucket is empty.
    pub min_points: usize,

    /// Weight of the `|sin(angle)|` penalty added to the Euclidean distance.
    /// Discourages linking points across abrupt north-south jumps while still
    /// following a roughly coastline-aligned trajectory.
    pub angle_penalty: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            eps: 0.8,
            min_points: 2,
            angle_penalty: 0.3,
        }
    }
}

/// Parameters for hull and label box construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryParams {
    /// Radius of the circular hull around a single-point cluster.
    pub point_buffer: f64,

    /// Radius of the capsule hull around a two-point cluster.
    pub segment_buffer: f64,

    /// Outward buffer applied to the convex hull of a cluster with three or
    /// more points.
    pub hull_buffer: f64,

    /// Safety margin buffered around the label box for minimum visual
    /// clearance.
    pub label_margin: f64,

    /// Width contributed by one character of label text, in map units.
    pub char_width: f64,

    /// Height contributed by one label line, in map units.
    pub line_height: f64,

    /// Number of points used to discretize a full circle when buffering.
    pub buffer_segments: usize,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            point_buffer: 0.3,
            segment_buffer: 0.3,
            hull_buffer: 0.2,
            label_margin: 0.2,
            char_width: 0.3,
            line_height: 0.35,
            buffer_segments: 32,
        }
    }
}

/// Rule table seeding the initial label anchor from the cluster centroid.
///
/// The base offset is adjusted by where the centroid falls relative to the
/// named longitude/latitude thresholds, then the anchor is recentered by half
/// the box dimensions so the offset points at the box center.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorRules {
    /// Offset applied when no regional rule matches.
    pub base_offset: (f64, f64),

    /// Centroids east of this longitude use `east_offset_x`.
    pub east_of: f64,
    pub east_offset_x: f64,

    /// Centroids west of this longitude use `west_offset_x`.
    pub west_of: f64,
    pub west_offset_x: f64,

    /// Centroids south of this latitude use `south_offset_y`.
    pub south_of: f64,
    pub south_offset_y: f64,

    /// Centroids north of this latitude use `north_offset_y`.
    pub north_of: f64,
    pub north_offset_y: f64,
}

impl Default for AnchorRules {
    fn default() -> Self {
        Self {
            base_offset: (4.0, 0.0),
            east_of: -81.0,
            east_offset_x: 5.0,
            west_of: -85.0,
            west_offset_x: 3.5,
            south_of: 27.0,
            south_offset_y: 2.0,
            north_of: 30.0,
            north_offset_y: -2.0,
        }
    }
}

/// Parameters for the radial collision-resolution search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Number of angles evaluated per distance ring (evenly spaced over a
    /// full turn, starting at 0).
    pub angle_steps: usize,

    /// Number of distance rings.
    pub distance_steps: usize,

    /// Distance of the innermost ring, in map units.
    pub min_distance: f64,

    /// Distance of the outermost ring, in map units.
    pub max_distance: f64,

    /// Offset from the original anchor applied when every search candidate is
    /// excluded by a raw point hull. A degenerate last resort; placements
    /// that used it are flagged.
    pub fallback_offset: (f64, f64),
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            angle_steps: 36,
            distance_steps: 20,
            min_distance: 1.0,
            max_distance: 20.0,
            fallback_offset: (15.0, -8.0),
        }
    }
}

/// Aggregate parameters for the full layout pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub cluster: ClusterParams,
    pub geometry: GeometryParams,
    pub anchor_rules: AnchorRules,
    pub search: SearchParams,
    /// Fixed reference point used by the ranker; clusters closer to it are
    /// placed earlier within the same significance band.
    pub reference_anchor: (f64, f64),
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            cluster: ClusterParams::default(),
            geometry: GeometryParams::default(),
            anchor_rules: AnchorRules::default(),
            search: SearchParams::default(),
            // Miami; the historical center of interest for the source data.
            reference_anchor: (-80.2, 25.8),
        }
    }
}

impl LayoutParams {
    /// Checks the parameter set for values that would break the pipeline.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &'static str, v: f64) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(LayoutError::InvalidParameter {
                    name,
                    msg: format!("must be positive and finite, got {v}"),
                })
            }
        }

        positive("cluster.eps", self.cluster.eps)?;
        if self.cluster.min_points == 0 {
            return Err(LayoutError::InvalidParameter {
                name: "cluster.min_points",
                msg: "must be at least 1".into(),
            });
        }
        if !(self.cluster.angle_penalty.is_finite() && self.cluster.angle_penalty >= 0.0) {
            return Err(LayoutError::InvalidParameter {
                name: "cluster.angle_penalty",
                msg: format!(
                    "must be non-negative and finite, got {}",
                    self.cluster.angle_penalty
                ),
            });
        }

        positive("geometry.point_buffer", self.geometry.point_buffer)?;
        positive("geometry.segment_buffer", self.geometry.segment_buffer)?;
        positive("geometry.hull_buffer", self.geometry.hull_buffer)?;
        positive("geometry.label_margin", self.geometry.label_margin)?;
        positive("geometry.char_width", self.geometry.char_width)?;
        positive("geometry.line_height", self.geometry.line_height)?;
        if self.geometry.buffer_segments < 4 {
            return Err(LayoutError::InvalidParameter {
                name: "geometry.buffer_segments",
                msg: format!("must be at least 4, got {}", self.geometry.buffer_segments),
            });
        }

        if self.search.angle_steps == 0 {
            return Err(LayoutError::InvalidParameter {
                name: "search.angle_steps",
                msg: "must be at least 1".into(),
            });
        }
        if self.search.distance_steps == 0 {
            return Err(LayoutError::InvalidParameter {
                name: "search.distance_steps",
                msg: "must be at least 1".into(),
            });
        }
        positive("search.min_distance", self.search.min_distance)?;
        if !(self.search.max_distance.is_finite()
            && self.search.max_distance >= self.search.min_distance)
        {
            return Err(LayoutError::InvalidParameter {
                name: "search.max_distance",
                msg: format!(
                    "must be finite and >= min_distance ({}), got {}",
                    self.search.min_distance, self.search.max_distance
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(LayoutParams::default().validate().is_ok());
    }

    #[test]
    fn zero_min_points_rejected() {
        let mut params = LayoutParams::default();
        params.cluster.min_points = 0;
        assert!(matches!(
            params.validate(),
            Err(LayoutError::InvalidParameter {
                name: "cluster.min_points",
                ..
            })
        ));
    }

    #[test]
    fn negative_eps_rejected() {
        let mut params = LayoutParams::default();
        params.cluster.eps = -1.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn inverted_search_range_rejected() {
        let mut params = LayoutParams::default();
        params.search.max_distance = 0.5;
        assert!(matches!(
            params.validate(),
            Err(LayoutError::InvalidParameter {
                name: "search.max_distance",
                ..
            })
        ));
    }
}
