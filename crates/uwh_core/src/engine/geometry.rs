//! Pool-plane vector helpers
//!
//! Positions and velocities are plain `(f32, f32)` tuples in arena units.

use std::f32::consts::PI;

/// Position or velocity on the pool plane
pub type Vec2 = (f32, f32);

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

#[inline]
pub fn length(v: Vec2) -> f32 {
    (v.0 * v.0 + v.1 * v.1).sqrt()
}

/// Heading from `from` toward `to` (radians)
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.1 - from.1).atan2(to.0 - from.0)
}

/// Unit vector for a heading
#[inline]
pub fn unit(angle: f32) -> Vec2 {
    (angle.cos(), angle.sin())
}

/// Wrap an angle into (-π, π]
pub fn normalize_angle(mut angle: f32) -> f32 {
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Heading of a vector, or `fallback` when the vector is (near) zero
#[inline]
pub fn heading_or(v: Vec2, fallback: f32) -> f32 {
    if v.0.abs() < 1e-6 && v.1.abs() < 1e-6 {
        fallback
    } else {
        v.1.atan2(v.0)
    }
}

/// Point at `forward` along the facing and `side` to its right, from `origin`
pub fn local_offset(origin: Vec2, facing: f32, forward: f32, side: f32) -> Vec2 {
    let (cos_a, sin_a) = (facing.cos(), facing.sin());
    (
        origin.0 + forward * cos_a - side * sin_a,
        origin.1 + forward * sin_a + side * cos_a,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-4);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-4);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_heading_or_zero_vector_keeps_fallback() {
        assert_eq!(heading_or((0.0, 0.0), 1.25), 1.25);
        assert!((heading_or((0.0, 2.0), 0.0) - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_local_offset_rotates_with_facing() {
        // Facing +y: forward moves along +y, "right" side is -x
        let p = local_offset((0.0, 0.0), PI / 2.0, 10.0, 2.0);
        assert!((p.0 + 2.0).abs() < 1e-4);
        assert!((p.1 - 10.0).abs() < 1e-4);
    }
}
