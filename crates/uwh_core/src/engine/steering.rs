//! Steering helpers
//!
//! Headings are blended as weighted unit vectors; the result is fed to
//! `apply_force` as heading + magnitude.

use super::geometry::{angle_to, heading_or, normalize_angle, unit, Vec2};

/// Heading of `w_a * unit(a) + w_b * unit(b)`; falls back to `a` when the sum vanishes
pub fn blend(a: f32, w_a: f32, b: f32, w_b: f32) -> f32 {
    let (ax, ay) = unit(a);
    let (bx, by) = unit(b);
    heading_or((ax * w_a + bx * w_b, ay * w_a + by * w_b), a)
}

/// Parameters for carrier evasion
#[derive(Debug, Clone, Copy)]
pub struct Evasion {
    /// Avoidance kicks in below this distance
    pub avoid_distance: f32,
    /// Lateral juke replaces avoidance below this distance
    pub juke_distance: f32,
    pub juke_angle: f32,
    pub juke_weight: f32,
    pub avoid_weight: f32,
}

/// How a carrier's heading was bent by the nearest opponent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evade {
    /// No opponent close enough
    Clear(f32),
    /// Fixed-angle lateral move to the side away from the opponent
    Juke(f32),
    /// Proportional blend away from the opponent
    Avoid(f32),
}

impl Evade {
    pub fn heading(self) -> f32 {
        match self {
            Evade::Clear(h) | Evade::Juke(h) | Evade::Avoid(h) => h,
        }
    }
}

/// Bend `target` heading around the nearest submerged opponent at `opponent`
pub fn evade(me: Vec2, target: f32, opponent: Option<(Vec2, f32)>, params: &Evasion) -> Evade {
    let Some((opp_pos, dist)) = opponent else {
        return Evade::Clear(target);
    };
    if dist >= params.avoid_distance {
        return Evade::Clear(target);
    }

    let away = angle_to(me, opp_pos) + std::f32::consts::PI;
    if dist < params.juke_distance {
        let diff = normalize_angle(away - target);
        let lateral = if diff > 0.0 { target + params.juke_angle } else { target - params.juke_angle };
        Evade::Juke(blend(target, 1.0 - params.juke_weight, lateral, params.juke_weight))
    } else {
        let weight = (1.0 - dist / params.avoid_distance) * params.avoid_weight;
        Evade::Avoid(blend(target, 1.0, away, weight))
    }
}

/// Force that scales velocity by `keep` on the next impulse (braking)
pub fn settle(velocity: Vec2, keep: f32) -> Vec2 {
    let k = keep - 1.0;
    (velocity.0 * k, velocity.1 * k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn params() -> Evasion {
        Evasion {
            avoid_distance: 90.0,
            juke_distance: 52.5,
            juke_angle: PI / 4.5,
            juke_weight: 0.6,
            avoid_weight: 0.35,
        }
    }

    #[test]
    fn test_blend_equal_weights_bisects() {
        let h = blend(0.0, 1.0, FRAC_PI_2, 1.0);
        assert!((h - PI / 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_blend_opposite_falls_back() {
        assert!(blend(0.3, 1.0, 0.3 + PI, 1.0).is_finite());
        assert_eq!(blend(0.3, 0.0, 1.0, 0.0), 0.3);
    }

    #[test]
    fn test_evade_clear_when_far() {
        let out = evade((100.0, 100.0), 0.0, Some(((300.0, 100.0), 200.0)), &params());
        assert_eq!(out, Evade::Clear(0.0));
        assert_eq!(evade((100.0, 100.0), 0.5, None, &params()), Evade::Clear(0.5));
    }

    #[test]
    fn test_evade_avoid_bends_away() {
        // opponent ahead and slightly below → heading bends upward (negative y)
        let me = (100.0, 100.0);
        let opp = (170.0, 110.0);
        let out = evade(me, 0.0, Some((opp, 70.7)), &params());
        match out {
            Evade::Avoid(h) => assert!(h < 0.0),
            other => panic!("expected avoid, got {other:?}"),
        }
    }

    #[test]
    fn test_evade_juke_steps_sideways() {
        let me = (100.0, 100.0);
        let opp = (130.0, 110.0);
        let out = evade(me, 0.0, Some((opp, 31.6)), &params());
        match out {
            Evade::Juke(h) => {
                assert!(h < 0.0);
                assert!(h.abs() < PI / 4.5);
            }
            other => panic!("expected juke, got {other:?}"),
        }
    }

    #[test]
    fn test_settle_scales_velocity() {
        let f = settle((1.0, -2.0), 0.8);
        assert!((f.0 + 0.2).abs() < 1e-6);
        assert!((f.1 - 0.4).abs() < 1e-6);
    }
}
