//! Body & Possession Configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{body, stick};

/// Body geometry and integration parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub player_width: f32,
    pub player_height: f32,
    pub puck_radius: f32,
    /// Per-tick velocity multiplier for players (0~1)
    pub player_friction: f32,
    /// Per-tick velocity multiplier for a loose puck (0~1)
    pub puck_friction: f32,
    /// Wall bounce factor (기본: 0.5)
    pub wall_restitution: f32,
    pub velocity_epsilon: f32,
    pub facing_speed_sq: f32,
}

impl BodyConfig {
    /// Collision radius derived from the larger body dimension
    pub fn player_radius(&self) -> f32 {
        self.player_width.max(self.player_height) / 2.0
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            player_width: body::PLAYER_WIDTH,
            player_height: body::PLAYER_HEIGHT,
            puck_radius: body::PUCK_RADIUS,
            player_friction: body::PLAYER_FRICTION,
            puck_friction: body::PUCK_FRICTION,
            wall_restitution: body::WALL_RESTITUTION,
            velocity_epsilon: body::VELOCITY_EPSILON,
            facing_speed_sq: body::FACING_SPEED_SQ,
        }
    }
}

/// Stick reach, carry and contact parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PossessionConfig {
    pub stick_length: f32,
    pub pull: f32,
    pub damping: f32,
    pub collision_dampen: f32,
    pub carry_velocity_share: f32,
    pub dispossess_impulse: f32,
    pub repulsion: f32,
    pub repulsion_margin: f32,
}

impl Default for PossessionConfig {
    fn default() -> Self {
        Self {
            stick_length: stick::STICK_LENGTH,
            pull: stick::POSSESSION_PULL,
            damping: stick::POSSESSION_DAMPING,
            collision_dampen: stick::PUCK_COLLISION_DAMPEN,
            carry_velocity_share: stick::CARRY_VELOCITY_SHARE,
            dispossess_impulse: stick::DISPOSSESS_IMPULSE,
            repulsion: stick::PLAYER_REPULSION,
            repulsion_margin: stick::REPULSION_MARGIN,
        }
    }
}
