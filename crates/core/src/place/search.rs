//! The radial search grid.
//!
//! Candidate offsets for a colliding label box: evenly spaced angles crossed
//! with a linear range of distances, walked in increasing-distance order so
//! the solver can stop at the nearest ring containing a zero-overlap
//! candidate. Total work per collision is bounded by
//! `angle_steps * distance_steps` evaluations.

use std::f64::consts::TAU;

use geo::Coord;

use crate::params::SearchParams;

/// Precomputed search grid for one solver run.
#[derive(Debug, Clone)]
pub(crate) struct SearchGrid {
    angles: Vec<f64>,
    distances: Vec<f64>,
}

impl SearchGrid {
    pub fn new(params: &SearchParams) -> Self {
        let angles = (0..params.angle_steps)
            .map(|i| TAU * i as f64 / params.angle_steps as f64)
            .collect();

        let distances = if params.distance_steps == 1 {
            vec![params.min_distance]
        } else {
            let step = (params.max_distance - params.min_distance)
                / (params.distance_steps - 1) as f64;
            (0..params.distance_steps)
                .map(|i| params.min_distance + step * i as f64)
                .collect()
        };

        Self { angles, distances }
    }

    /// Ring distances in increasing order.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Candidate offsets on the ring at `distance`, one per angle.
    pub fn offsets_at(&self, distance: f64) -> impl Iterator<Item = (f64, Coord<f64>)> + '_ {
        self.angles.iter().map(move |&angle| {
            (
                angle,
                Coord {
                    x: distance * angle.cos(),
                    y: distance * angle.sin(),
                },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_grid_has_expected_shape() {
        let grid = SearchGrid::new(&SearchParams::default());
        assert_eq!(grid.distances().len(), 20);
        assert_eq!(grid.offsets_at(1.0).count(), 36);
        // 720 candidate evaluations per collision, at most.
        let total: usize = grid
            .distances()
            .iter()
            .map(|&d| grid.offsets_at(d).count())
            .sum();
        assert_eq!(total, 720);
    }

    #[test]
    fn distances_are_linear_and_increasing() {
        let grid = SearchGrid::new(&SearchParams::default());
        let d = grid.distances();
        assert_relative_eq!(d[0], 1.0);
        assert_relative_eq!(d[19], 20.0);
        assert!(d.windows(2).all(|w| w[1] > w[0]));
        assert_relative_eq!(d[1] - d[0], 1.0);
    }

    #[test]
    fn first_offset_points_due_east() {
        let grid = SearchGrid::new(&SearchParams::default());
        let (angle, offset) = grid.offsets_at(2.0).next().unwrap();
        assert_relative_eq!(angle, 0.0);
        assert_relative_eq!(offset.x, 2.0);
        assert_relative_eq!(offset.y, 0.0);
    }

    #[test]
    fn single_step_grid_uses_min_distance() {
        let params = SearchParams {
            distance_steps: 1,
            ..SearchParams::default()
        };
        let grid = SearchGrid::new(&params);
        assert_eq!(grid.distances(), &[1.0]);
    }
}
