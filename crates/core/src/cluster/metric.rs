//! Direction-aware distance metric for landfall clustering.

/// Distance between two map points: Euclidean distance plus a penalty
/// proportional to `|sin(angle)|` of the connecting segment.
///
/// The penalty discourages linking points across abrupt north-south jumps
/// (natural breaks between landfall chains) while leaving east-west,
/// coastline-aligned links almost unaffected.
pub fn coastline_distance(a: (f64, f64), b: (f64, f64), angle_penalty: f64) -> f64 {
    let dlon = (a.0 - b.0).abs();
    let dlat = (a.1 - b.1).abs();

    let direct = dlon.hypot(dlat);

    // Angle of the segment relative to horizontal; dlon and dlat are both
    // non-negative so the angle lands in [0, pi/2].
    let angle = dlat.atan2(dlon);

    direct + angle.sin().abs() * angle_penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn horizontal_pairs_pay_no_penalty() {
        let d = coastline_distance((-80.0, 25.0), (-79.0, 25.0), 0.3);
        assert_relative_eq!(d, 1.0);
    }

    #[test]
    fn vertical_pairs_pay_full_penalty() {
        let d = coastline_distance((-80.0, 25.0), (-80.0, 26.0), 0.3);
        assert_relative_eq!(d, 1.3);
    }

    #[test]
    fn metric_is_symmetric() {
        let a = (-83.4, 27.1);
        let b = (-80.9, 29.6);
        assert_relative_eq!(
            coastline_distance(a, b, 0.3),
            coastline_distance(b, a, 0.3)
        );
    }

    #[test]
    fn zero_penalty_reduces_to_euclidean() {
        let d = coastline_distance((0.0, 0.0), (3.0, 4.0), 0.0);
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn coincident_points_have_zero_distance() {
        assert_relative_eq!(coastline_distance((1.0, 2.0), (1.0, 2.0), 0.3), 0.0);
    }
}
