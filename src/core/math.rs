// Math utilities and helper functions

use glam::Vec2;

/// Sign of a value as -1.0, 0.0 or 1.0
///
/// Unlike `f32::signum`, zero maps to zero.
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Wrap an angle in degrees into the range (-180, 180]
pub fn unwind_degrees(mut angle: f32) -> f32 {
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Normalize a vector, returning zero for (near) zero-length input
pub fn safe_normalize(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Signed elevation of `aim` relative to `forward`, in degrees
///
/// The magnitude is the angle between the two directions and the sign comes
/// from the vertical component of `aim`, so pointing above the horizon is
/// positive and below is negative.
pub fn aim_angle_degrees(forward: Vec2, aim: Vec2) -> f32 {
    let dot = forward.dot(aim).clamp(-1.0, 1.0);
    unwind_degrees(dot.acos().to_degrees()) * sign(aim.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sign() {
        assert_eq!(sign(3.0), 1.0);
        assert_eq!(sign(-0.5), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
    }

    #[test]
    fn test_unwind_degrees() {
        assert_eq!(unwind_degrees(90.0), 90.0);
        assert_eq!(unwind_degrees(270.0), -90.0);
        assert_eq!(unwind_degrees(-270.0), 90.0);
    }

    #[test]
    fn test_safe_normalize_zero() {
        assert_eq!(safe_normalize(Vec2::ZERO), Vec2::ZERO);
        assert_relative_eq!(safe_normalize(Vec2::new(3.0, 4.0)).length(), 1.0);
    }

    #[test]
    fn test_aim_angle_straight_ahead() {
        assert_relative_eq!(aim_angle_degrees(Vec2::X, Vec2::X), 0.0);
    }

    #[test]
    fn test_aim_angle_up_and_down() {
        let up = Vec2::new(1.0, 1.0).normalize();
        let down = Vec2::new(1.0, -1.0).normalize();
        assert_relative_eq!(aim_angle_degrees(Vec2::X, up), 45.0, epsilon = 1e-4);
        assert_relative_eq!(aim_angle_degrees(Vec2::X, down), -45.0, epsilon = 1e-4);
    }

    #[test]
    fn test_aim_angle_facing_left() {
        let up_left = Vec2::new(-1.0, 1.0).normalize();
        assert_relative_eq!(
            aim_angle_degrees(Vec2::NEG_X, up_left),
            45.0,
            epsilon = 1e-4
        );
    }
}
