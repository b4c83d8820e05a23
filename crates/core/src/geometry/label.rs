//! Label box sizing and initial anchor selection.

use geo::{Coord, Polygon, Rect};

use crate::params::{AnchorRules, GeometryParams};

use super::hull::buffer_convex;

/// Width and height of the label box for the given label lines.
///
/// Width follows the longest line, height the line count; both scale by the
/// configured per-character and per-line constants.
pub fn box_dimensions(lines: &[String], params: &GeometryParams) -> (f64, f64) {
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    (
        longest as f64 * params.char_width,
        lines.len() as f64 * params.line_height,
    )
}

/// Buffered label box polygon with its bottom-left corner at `anchor`.
pub fn label_box(
    anchor: Coord<f64>,
    width: f64,
    height: f64,
    params: &GeometryParams,
) -> Polygon<f64> {
    let rect = Rect::new(
        anchor,
        Coord {
            x: anchor.x + width,
            y: anchor.y + height,
        },
    );
    buffer_convex(&rect.to_polygon(), params.label_margin, params.buffer_segments)
}

/// Initial bottom-left anchor for a label box, before any collision
/// resolution.
///
/// The centroid is offset by a direction chosen from the regional rule table
/// (east/west picks the x offset, south/north the y offset), then recentered
/// by half the box dimensions so the offset points at the box center. This
/// seeds the solver with a geographically sensible default.
pub fn initial_anchor(
    centroid: Coord<f64>,
    width: f64,
    height: f64,
    rules: &AnchorRules,
) -> Coord<f64> {
    let mut offset_x = rules.base_offset.0;
    let mut offset_y = rules.base_offset.1;

    if centroid.x > rules.east_of {
        offset_x = rules.east_offset_x;
    } else if centroid.x < rules.west_of {
        offset_x = rules.west_offset_x;
    }

    if centroid.y < rules.south_of {
        offset_y = rules.south_offset_y;
    } else if centroid.y > rules.north_of {
        offset_y = rules.north_offset_y;
    }

    Coord {
        x: centroid.x + offset_x - width / 2.0,
        y: centroid.y + offset_y - height / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{Contains, Point};

    #[test]
    fn dimensions_follow_longest_line_and_line_count() {
        let lines = vec!["ANDREW (1992)".to_string(), "KING (1950)".to_string()];
        let params = GeometryParams::default();
        let (w, h) = box_dimensions(&lines, &params);

        // "ANDREW (1992)" is 13 characters.
        assert_relative_eq!(w, 13.0 * 0.3);
        assert_relative_eq!(h, 2.0 * 0.35);
    }

    #[test]
    fn empty_label_list_has_zero_size() {
        assert_eq!(box_dimensions(&[], &GeometryParams::default()), (0.0, 0.0));
    }

    #[test]
    fn label_box_covers_rect_plus_margin() {
        let params = GeometryParams::default();
        let anchor = Coord { x: 1.0, y: 2.0 };
        let poly = label_box(anchor, 3.0, 1.0, &params);

        assert!(poly.contains(&Point::new(1.0, 2.0)));
        assert!(poly.contains(&Point::new(4.0, 3.0)));
        // Margin extends past the corners along the axes.
        assert!(poly.contains(&Point::new(0.85, 2.5)));
        assert!(!poly.contains(&Point::new(4.5, 3.5)));
    }

    #[test]
    fn eastern_centroid_pushes_label_further_east() {
        let rules = AnchorRules::default();
        let anchor = initial_anchor(Coord { x: -80.0, y: 28.0 }, 2.0, 1.0, &rules);
        assert_relative_eq!(anchor.x, -80.0 + 5.0 - 1.0);
        assert_relative_eq!(anchor.y, 28.0 + 0.0 - 0.5);
    }

    #[test]
    fn western_southern_centroid_uses_west_and_south_offsets() {
        let rules = AnchorRules::default();
        let anchor = initial_anchor(Coord { x: -86.0, y: 26.0 }, 2.0, 1.0, &rules);
        assert_relative_eq!(anchor.x, -86.0 + 3.5 - 1.0);
        assert_relative_eq!(anchor.y, 26.0 + 2.0 - 0.5);
    }

    #[test]
    fn northern_centroid_shifts_label_south() {
        let rules = AnchorRules::default();
        let anchor = initial_anchor(Coord { x: -83.0, y: 31.0 }, 2.0, 1.0, &rules);
        assert_relative_eq!(anchor.x, -83.0 + 4.0 - 1.0);
        assert_relative_eq!(anchor.y, 31.0 - 2.0 - 0.5);
    }
}
