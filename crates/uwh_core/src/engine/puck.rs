//! Puck state and motion
//!
//! The possessor is a roster handle, never a reference. A carried puck rides
//! the stick: a strong pull toward the carry point followed by heavy damping.

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::body::KinematicBody;
use super::geometry::Vec2;
use super::player::PlayerId;
use crate::config::{BodyConfig, PossessionConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puck {
    pub(crate) body: KinematicBody,
    pub(crate) possessor: Option<PlayerId>,
}

impl Puck {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { body: KinematicBody::new(position, radius, 0.0), possessor: None }
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn radius(&self) -> f32 {
        self.body.radius
    }

    pub fn possessor(&self) -> Option<PlayerId> {
        self.possessor
    }

    #[inline]
    pub fn is_loose(&self) -> bool {
        self.possessor.is_none()
    }

    #[inline]
    pub fn is_held_by(&self, id: PlayerId) -> bool {
        self.possessor == Some(id)
    }

    pub(crate) fn set_possessor(&mut self, id: PlayerId) {
        self.possessor = Some(id);
    }

    pub(crate) fn clear_possessor(&mut self) {
        self.possessor = None;
    }

    /// Drop possession and fire the puck with an impulse
    pub(crate) fn release(&mut self, heading: f32, force: f32) {
        self.possessor = None;
        self.body.apply_force(heading.cos() * force, heading.sin() * force);
    }

    /// Put the puck back on the centre spot at rest
    pub(crate) fn recenter(&mut self, arena: &Arena) {
        self.possessor = None;
        self.body.place(arena.center(), 0.0);
    }

    /// Carried step: pull toward the carry point, then integrate with heavy damping
    pub(crate) fn ride(
        &mut self,
        carry_point: Vec2,
        arena: &Arena,
        body: &BodyConfig,
        stick: &PossessionConfig,
    ) {
        let dx = carry_point.0 - self.body.position.0;
        let dy = carry_point.1 - self.body.position.1;
        self.body.apply_force(dx * stick.pull, dy * stick.pull);
        self.body.integrate(stick.damping, arena, body);
    }

    /// Loose step: ballistic glide with puck friction
    pub(crate) fn glide(&mut self, arena: &Arena, body: &BodyConfig) {
        self.body.integrate(body.puck_friction, arena, body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::distance;

    #[test]
    fn test_release_clears_and_launches() {
        let mut puck = Puck::new((400.0, 250.0), 6.0);
        puck.set_possessor(PlayerId(3));
        puck.release(0.0, 2.5);
        assert!(puck.is_loose());
        assert_eq!(puck.body.velocity, (2.5, 0.0));
    }

    #[test]
    fn test_ride_converges_on_carry_point() {
        let arena = Arena::default();
        let body = BodyConfig::default();
        let stick = PossessionConfig::default();
        let mut puck = Puck::new((400.0, 250.0), 6.0);
        let target = (420.0, 250.0);

        puck.ride(target, &arena, &body, &stick);
        let after_one = distance(puck.position(), target);
        assert!(after_one < 3.0, "puck should ride most of the gap, left {after_one}");
        // velocity damped heavily after the step
        assert!(puck.body.speed() < 1.0);

        for _ in 0..5 {
            puck.ride(target, &arena, &body, &stick);
        }
        assert!(distance(puck.position(), target) < 0.5);
    }

    #[test]
    fn test_glide_slows_down() {
        let arena = Arena::default();
        let body = BodyConfig::default();
        let mut puck = Puck::new((400.0, 250.0), 6.0);
        puck.body.apply_force(4.0, 0.0);
        puck.glide(&arena, &body);
        assert_eq!(puck.position(), (404.0, 250.0));
        assert!((puck.body.velocity.0 - 3.9).abs() < 1e-4);
    }

    #[test]
    fn test_recenter() {
        let arena = Arena::default();
        let mut puck = Puck::new((10.0, 10.0), 6.0);
        puck.set_possessor(PlayerId(0));
        puck.body.velocity = (1.0, 1.0);
        puck.recenter(&arena);
        assert!(puck.is_loose());
        assert_eq!(puck.position(), (400.0, 250.0));
        assert_eq!(puck.body.velocity, (0.0, 0.0));
    }
}
