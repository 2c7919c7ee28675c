//! Angle arithmetic on the 0/2π circle.
//!
//! Every wraparound-sensitive computation in the crate goes through this module.
//! Callers outside it may offset an angle by a constant, but never subtract two
//! angles from each other directly.

use glam::DVec2;
use std::f64::consts::{PI, TAU};

/// Maps any finite angle into `[0, 2π)`.
pub fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation that takes `anchor` onto `angle`, in `(-π, π]`.
///
/// The angle is first re-expressed in a frame where `anchor` sits at π, so the
/// 0/2π seam can never fall between the two values being compared. At exactly
/// ±π the result is `+π`.
pub fn relative_angle_diff(angle: f64, anchor: f64) -> f64 {
    PI - normalize(anchor - angle + PI)
}

/// Clamps `angle` to lie within `constraint` radians of `anchor`.
///
/// Angles already inside the range come back normalized but otherwise untouched;
/// anything beyond is pinned to the edge on the side it overshot.
pub fn constrain_angle(angle: f64, anchor: f64, constraint: f64) -> f64 {
    let diff = relative_angle_diff(angle, anchor);

    if diff.abs() <= constraint {
        normalize(angle)
    } else if diff > constraint {
        normalize(anchor + constraint)
    } else {
        normalize(anchor - constraint)
    }
}

/// Point on the ray from `anchor` through `pos` at exactly `distance` from `anchor`.
///
/// Returns `None` when `pos` and `anchor` coincide, since the ray has no direction.
pub fn constrain_distance(pos: DVec2, anchor: DVec2, distance: f64) -> Option<DVec2> {
    (pos - anchor)
        .try_normalize()
        .map(|direction| anchor + direction * distance)
}

/// Heading of `v` in `[0, 2π)`, or `None` for the zero vector.
pub fn heading(v: DVec2) -> Option<f64> {
    if v.length_squared() > 0.0 {
        Some(normalize(v.y.atan2(v.x)))
    } else {
        None
    }
}

/// Unit vector pointing along `angle`.
pub fn unit(angle: f64) -> DVec2 {
    DVec2::from_angle(angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8};

    #[test]
    fn normalize_stays_in_range() {
        assert_abs_diff_eq!(normalize(0.0), 0.0);
        assert_abs_diff_eq!(normalize(PI), PI);
        assert_abs_diff_eq!(normalize(TAU), 0.0);
        assert_abs_diff_eq!(normalize(3.0 * PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize(5.0 * PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize(10.0 * PI), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize_handles_negative_angles() {
        assert_abs_diff_eq!(normalize(-PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize(-TAU), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize(-FRAC_PI_2), 1.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn normalize_is_idempotent() {
        for i in -200..200 {
            let x = i as f64 * 0.37;
            let once = normalize(x);
            assert!((0.0..TAU).contains(&once), "{x} -> {once}");
            assert_eq!(normalize(once), once);
        }
        assert_eq!(normalize(-1e-18), 0.0);
        assert!(normalize(1e12) < TAU);
    }

    #[test]
    fn relative_diff_of_identical_angles_is_zero() {
        for a in [0.0, FRAC_PI_2, PI, 1.5 * PI, 6.0] {
            assert_abs_diff_eq!(relative_angle_diff(a, a), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn relative_diff_recovers_offset() {
        for anchor in [0.0, 1.0, PI, 5.9] {
            for d in [-3.0, -FRAC_PI_2, -0.1, 0.25, 1.0, 3.1] {
                assert_abs_diff_eq!(relative_angle_diff(anchor + d, anchor), d, epsilon = 1e-9);
            }
        }
        assert_abs_diff_eq!(relative_angle_diff(FRAC_PI_2, 0.0), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(relative_angle_diff(0.0, FRAC_PI_2), -FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn relative_diff_at_half_turn_is_positive_pi() {
        assert_eq!(relative_angle_diff(PI, 0.0), PI);
        assert_eq!(relative_angle_diff(0.0, PI), PI);
        assert_abs_diff_eq!(constrain_angle(PI, 0.0, FRAC_PI_8), FRAC_PI_8, epsilon = 1e-12);
    }

    #[test]
    fn relative_diff_crosses_the_seam() {
        assert_abs_diff_eq!(relative_angle_diff(0.1, TAU - 0.1), 0.2, epsilon = 1e-9);
        assert_abs_diff_eq!(relative_angle_diff(TAU - 0.1, 0.1), -0.2, epsilon = 1e-9);
    }

    #[test]
    fn relative_diff_is_antisymmetric() {
        let pairs = [(0.3, 2.0), (6.0, 0.2), (1.0, 4.0), (3.0, 3.5)];
        for (a, b) in pairs {
            assert_abs_diff_eq!(
                relative_angle_diff(a, b),
                -relative_angle_diff(b, a),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn constrain_angle_leaves_angles_in_range() {
        assert_abs_diff_eq!(constrain_angle(FRAC_PI_4, 0.0, FRAC_PI_2), FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(constrain_angle(-0.1, 0.0, FRAC_PI_8), TAU - 0.1, epsilon = 1e-12);
    }

    #[test]
    fn constrain_angle_clamps_overshoot() {
        assert_abs_diff_eq!(constrain_angle(FRAC_PI_2, 0.0, FRAC_PI_4), FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(
            constrain_angle(-FRAC_PI_2, 0.0, FRAC_PI_4),
            TAU - FRAC_PI_4,
            epsilon = 1e-12
        );
        // clamping across the seam
        assert_abs_diff_eq!(constrain_angle(1.0, TAU - 0.2, 0.5), 0.3, epsilon = 1e-9);
    }

    #[test]
    fn full_circle_constraint_never_clamps() {
        for i in 0..64 {
            let angle = i as f64 * 0.1;
            assert_abs_diff_eq!(constrain_angle(angle, 2.0, TAU), normalize(angle), epsilon = 1e-12);
        }
    }

    #[test]
    fn constrain_distance_is_exact() {
        let result = constrain_distance(DVec2::new(10.0, 0.0), DVec2::ZERO, 5.0).unwrap();
        assert_abs_diff_eq!(result.x, 5.0);
        assert_abs_diff_eq!(result.y, 0.0);

        let anchor = DVec2::new(10.0, 10.0);
        let result = constrain_distance(DVec2::new(20.0, 10.0), anchor, 5.0).unwrap();
        assert_relative_eq!(result.distance(anchor), 5.0, max_relative = 1e-12);
    }

    #[test]
    fn constrain_distance_preserves_direction() {
        let anchor = DVec2::new(-3.0, 7.0);
        let pos = DVec2::new(12.0, -4.0);
        let result = constrain_distance(pos, anchor, 2.5).unwrap();
        let expected = (pos - anchor).normalize();
        let actual = (result - anchor).normalize();
        assert!(actual.abs_diff_eq(expected, 1e-12));
    }

    #[test]
    fn constrain_distance_rejects_coincident_points() {
        let p = DVec2::new(4.0, 4.0);
        assert_eq!(constrain_distance(p, p, 10.0), None);
    }

    #[test]
    fn heading_of_axes() {
        assert_abs_diff_eq!(heading(DVec2::X).unwrap(), 0.0);
        assert_abs_diff_eq!(heading(DVec2::Y).unwrap(), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(heading(DVec2::NEG_Y).unwrap(), 1.5 * PI, epsilon = 1e-12);
        assert_eq!(heading(DVec2::ZERO), None);
    }
}
