//! Kinematic point mass shared by players and the puck
//!
//! Forces are impulses: `apply_force` adds straight to velocity, and one
//! `integrate` call advances one tick.

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::geometry::{length, Vec2};
use crate::config::BodyConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing angle (radians); follows velocity once moving
    pub facing: f32,
    pub radius: f32,
}

impl KinematicBody {
    pub fn new(position: Vec2, radius: f32, facing: f32) -> Self {
        Self { position, velocity: (0.0, 0.0), facing, radius }
    }

    #[inline]
    pub fn apply_force(&mut self, fx: f32, fy: f32) {
        self.velocity.0 += fx;
        self.velocity.1 += fy;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        length(self.velocity)
    }

    /// Place the body at rest
    pub fn place(&mut self, position: Vec2, facing: f32) {
        self.position = position;
        self.velocity = (0.0, 0.0);
        self.facing = facing;
    }

    /// Advance one tick: move, apply friction, update facing, bounce off walls
    pub fn integrate(&mut self, friction: f32, arena: &Arena, params: &BodyConfig) {
        self.position.0 += self.velocity.0;
        self.position.1 += self.velocity.1;
        self.velocity.0 *= friction;
        self.velocity.1 *= friction;

        let speed_sq = self.velocity.0 * self.velocity.0 + self.velocity.1 * self.velocity.1;
        if speed_sq > params.facing_speed_sq {
            self.facing = self.velocity.1.atan2(self.velocity.0);
        }

        if self.velocity.0.abs() < params.velocity_epsilon {
            self.velocity.0 = 0.0;
        }
        if self.velocity.1.abs() < params.velocity_epsilon {
            self.velocity.1 = 0.0;
        }

        self.reflect(arena, params.wall_restitution);
    }

    fn reflect(&mut self, arena: &Arena, restitution: f32) {
        let r = self.radius;
        if self.position.0 - r < 0.0 {
            self.position.0 = r;
            self.velocity.0 *= -restitution;
        }
        if self.position.0 + r > arena.width {
            self.position.0 = arena.width - r;
            self.velocity.0 *= -restitution;
        }
        if self.position.1 - r < 0.0 {
            self.position.1 = r;
            self.velocity.1 *= -restitution;
        }
        if self.position.1 + r > arena.height {
            self.position.1 = arena.height - r;
            self.velocity.1 *= -restitution;
        }
    }

    /// Whether the body sits inside the legal range on both axes
    pub fn is_inside(&self, arena: &Arena) -> bool {
        let r = self.radius;
        self.position.0 >= r
            && self.position.0 <= arena.width - r
            && self.position.1 >= r
            && self.position.1 <= arena.height - r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params() -> BodyConfig {
        BodyConfig::default()
    }

    #[test]
    fn test_apply_force_is_impulse() {
        let mut body = KinematicBody::new((100.0, 100.0), 5.0, 0.0);
        body.apply_force(1.0, -2.0);
        body.apply_force(0.5, 0.0);
        assert_eq!(body.velocity, (1.5, -2.0));
        assert_eq!(body.position, (100.0, 100.0));
    }

    #[test]
    fn test_integrate_moves_then_applies_friction() {
        let mut body = KinematicBody::new((100.0, 100.0), 5.0, 0.0);
        body.apply_force(2.0, 0.0);
        body.integrate(0.5, &Arena::default(), &params());
        assert_eq!(body.position, (102.0, 100.0));
        assert_eq!(body.velocity, (1.0, 0.0));
    }

    #[test]
    fn test_facing_held_when_slow() {
        let mut body = KinematicBody::new((100.0, 100.0), 5.0, 1.0);
        body.apply_force(0.0, 0.05);
        body.integrate(0.9, &Arena::default(), &params());
        assert_eq!(body.facing, 1.0);
        // tiny component snapped to zero
        assert_eq!(body.velocity.1, 0.0);
    }

    #[test]
    fn test_facing_follows_velocity() {
        let mut body = KinematicBody::new((100.0, 100.0), 5.0, 0.0);
        body.apply_force(0.0, -3.0);
        body.integrate(0.9, &Arena::default(), &params());
        assert!((body.facing + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_wall_reflection_halves_and_reverses() {
        let arena = Arena::default();
        let mut body = KinematicBody::new((795.0, 250.0), 10.0, 0.0);
        body.apply_force(20.0, 0.0);
        body.integrate(1.0 - f32::EPSILON, &arena, &params());
        assert_eq!(body.position.0, 790.0);
        assert!(body.velocity.0 < 0.0);
        assert!((body.velocity.0 + 10.0).abs() < 0.01);
    }

    proptest! {
        #[test]
        fn prop_integrate_keeps_body_inside(
            x in 0.0f32..800.0,
            y in 0.0f32..500.0,
            vx in -5000.0f32..5000.0,
            vy in -5000.0f32..5000.0,
            friction in 0.01f32..0.99,
        ) {
            let arena = Arena::default();
            let mut body = KinematicBody::new((x, y), 15.0, 0.0);
            body.apply_force(vx, vy);
            body.integrate(friction, &arena, &params());
            prop_assert!(body.is_inside(&arena));
        }
    }
}
