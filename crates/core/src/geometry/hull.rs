//! Point hull construction.
//!
//! Every cluster gets a polygon guaranteed to contain all of its member
//! points, shaped by member count: a circle for one point, a capsule for two,
//! a buffered convex hull for three or more. The hull is built once and never
//! mutated afterwards.

use std::f64::consts::TAU;

use geo::{ConvexHull, Coord, LineString, MultiPoint, Point, Polygon};

use crate::model::Landfall;
use crate::params::GeometryParams;

/// Builds the hull polygon for a cluster's member points.
///
/// Degenerate member counts (fewer points than a convex hull needs) fall back
/// to the buffered point/segment shapes; they are ordinary outcomes, not
/// errors. An empty slice is rejected upstream and yields an empty polygon
/// here.
pub fn point_hull(members: &[Landfall], params: &GeometryParams) -> Polygon<f64> {
    let segments = params.buffer_segments;
    match members {
        [] => Polygon::new(LineString::new(Vec::new()), Vec::new()),
        [single] => circle(single.coord(), params.point_buffer, segments),
        [a, b] => capsule(a.coord(), b.coord(), params.segment_buffer, segments),
        _ => {
            let hull = MultiPoint::new(
                members
                    .iter()
                    .map(|m| Point::from(m.coord()))
                    .collect::<Vec<_>>(),
            )
            .convex_hull();
            buffer_convex(&hull, params.hull_buffer, segments)
        }
    }
}

/// Unbuffered convex hull of the member points. Degenerate for fewer than
/// three points; used by callers that need the raw outline.
pub fn raw_convex_hull(members: &[Landfall]) -> Polygon<f64> {
    MultiPoint::new(
        members
            .iter()
            .map(|m| Point::from(m.coord()))
            .collect::<Vec<_>>(),
    )
    .convex_hull()
}

/// Buffers a convex polygon outward by `radius`.
///
/// Implemented as a discretized Minkowski sum with a disc: every exterior
/// vertex is replaced by `segments` points on a circle of the given radius
/// and the convex hull of the point cloud is taken. Exact for convex input up
/// to the circle discretization, which is all the pipeline ever buffers.
pub fn buffer_convex(polygon: &Polygon<f64>, radius: f64, segments: usize) -> Polygon<f64> {
    let cloud: Vec<Point<f64>> = polygon
        .exterior()
        .coords()
        .flat_map(|&c| circle_points(c, radius, segments))
        .map(Point::from)
        .collect();
    MultiPoint::new(cloud).convex_hull()
}

/// Circular polygon of the given radius around a center point.
pub fn circle(center: Coord<f64>, radius: f64, segments: usize) -> Polygon<f64> {
    let mut ring: Vec<Coord<f64>> = circle_points(center, radius, segments).collect();
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    Polygon::new(LineString::new(ring), Vec::new())
}

/// Capsule polygon around the segment between two points.
fn capsule(a: Coord<f64>, b: Coord<f64>, radius: f64, segments: usize) -> Polygon<f64> {
    let cloud: Vec<Point<f64>> = circle_points(a, radius, segments)
        .chain(circle_points(b, radius, segments))
        .map(Point::from)
        .collect();
    MultiPoint::new(cloud).convex_hull()
}

fn circle_points(
    center: Coord<f64>,
    radius: f64,
    segments: usize,
) -> impl Iterator<Item = Coord<f64>> {
    (0..segments).map(move |i| {
        let theta = TAU * i as f64 / segments as f64;
        Coord {
            x: center.x + radius * theta.cos(),
            y: center.y + radius * theta.sin(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{Area, Contains};
    use std::f64::consts::PI;

    fn point(lon: f64, lat: f64) -> Landfall {
        Landfall::new(lon, lat, 3, "STORM", 1990)
    }

    fn params() -> GeometryParams {
        GeometryParams::default()
    }

    #[test]
    fn single_point_hull_is_a_circle() {
        let members = [point(-80.0, 25.0)];
        let hull = point_hull(&members, &params());

        assert!(hull.contains(&Point::new(-80.0, 25.0)));
        // Area converges to pi * r^2 from below as the discretization grows.
        let expected = PI * 0.3 * 0.3;
        let area = hull.unsigned_area();
        assert!(area < expected);
        assert_relative_eq!(area, expected, max_relative = 0.02);
    }

    #[test]
    fn two_point_hull_is_a_capsule() {
        let members = [point(-80.0, 25.0), point(-79.0, 25.0)];
        let hull = point_hull(&members, &params());

        assert!(hull.contains(&Point::new(-80.0, 25.0)));
        assert!(hull.contains(&Point::new(-79.0, 25.0)));
        assert!(hull.contains(&Point::new(-79.5, 25.0)));
        // Capsule area: rectangle between the end circles plus the disc.
        let expected = 1.0 * 0.6 + PI * 0.3 * 0.3;
        assert_relative_eq!(hull.unsigned_area(), expected, max_relative = 0.02);
    }

    #[test]
    fn multi_point_hull_contains_all_members() {
        let members = [
            point(-80.0, 25.0),
            point(-81.0, 25.5),
            point(-80.5, 26.0),
            point(-79.5, 25.7),
            point(-80.2, 25.3),
        ];
        let hull = point_hull(&members, &params());
        for m in &members {
            assert!(hull.contains(&Point::from(m.coord())));
        }
    }

    #[test]
    fn raw_hull_of_five_points_has_at_most_five_vertices() {
        let members = [
            point(-80.0, 25.0),
            point(-81.0, 25.5),
            point(-80.5, 26.0),
            point(-79.5, 25.7),
            point(-80.2, 25.4), // interior
        ];
        let raw = raw_convex_hull(&members);
        // Closed ring repeats the first coordinate.
        assert!(raw.exterior().coords().count() <= 6);
    }

    #[test]
    fn buffered_hull_strictly_contains_raw_hull() {
        let members = [point(-80.0, 25.0), point(-81.0, 25.5), point(-80.5, 26.0)];
        let raw = raw_convex_hull(&members);
        let hull = point_hull(&members, &params());
        assert!(hull.unsigned_area() > raw.unsigned_area());
    }
}
