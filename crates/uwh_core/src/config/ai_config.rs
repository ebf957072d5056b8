//! AI Decision Configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{ai, release};

/// Thresholds, weights and force multipliers for the decision procedure.
///
/// Distance factors are relative to the live arena size so they keep their
/// meaning after a resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    // === Pace ===
    pub speed_factor: f32,

    // === Breath thresholds ===
    pub surface_breath: f32,
    pub low_breath_flick: f32,
    pub off_wing_surface_share: f32,

    // === Diving ===
    pub dive_distance_factor: f32,
    pub defensive_dive_carrier_factor: f32,
    pub defensive_dive_loose_factor: f32,

    // === Avoidance ===
    pub avoidance_radii: f32,
    pub lateral_maneuver_radii: f32,
    pub lateral_maneuver_angle: f32,
    pub lateral_weight: f32,
    pub avoidance_weight: f32,

    // === Formation ===
    pub formation_weight: f32,
    pub formation_falloff_factor: f32,
    pub back_formation_boost: f32,
    pub formation_jitter: f32,

    // === Zones ===
    pub goal_shot_range_depths: f32,
    pub defensive_zone_factor: f32,
    pub intercept_lead_lengths: f32,
    pub clear_upfield_bias: f32,
    pub wing_side_factor: f32,

    // === Opening race ===
    pub race_commitment_factor: f32,
    pub race_puck_moved_radii: f32,

    // === Releases ===
    pub base_flick_force: f32,
    pub goal_shot_force: f32,
    pub flick_recoil: f32,
    pub shot_recoil: f32,

    // === Force multipliers ===
    pub submerged_force: f32,
    pub race_force: f32,
    pub carry_force: f32,
    pub surface_force_scale: f32,
    pub surface_positioning_pace: f32,
    pub surface_recovery_pace: f32,
    pub follow_pace: f32,
    pub settle_damping: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            speed_factor: ai::SPEED_FACTOR,

            surface_breath: ai::SURFACE_BREATH,
            low_breath_flick: ai::LOW_BREATH_FLICK,
            off_wing_surface_share: ai::OFF_WING_SURFACE_SHARE,

            dive_distance_factor: ai::DIVE_DISTANCE_FACTOR,
            defensive_dive_carrier_factor: ai::DEFENSIVE_DIVE_CARRIER_FACTOR,
            defensive_dive_loose_factor: ai::DEFENSIVE_DIVE_LOOSE_FACTOR,

            avoidance_radii: ai::AVOIDANCE_RADII,
            lateral_maneuver_radii: ai::LATERAL_MANEUVER_RADII,
            lateral_maneuver_angle: ai::LATERAL_MANEUVER_ANGLE,
            lateral_weight: ai::LATERAL_WEIGHT,
            avoidance_weight: ai::AVOIDANCE_WEIGHT,

            formation_weight: ai::FORMATION_WEIGHT,
            formation_falloff_factor: ai::FORMATION_FALLOFF_FACTOR,
            back_formation_boost: ai::BACK_FORMATION_BOOST,
            formation_jitter: ai::FORMATION_JITTER,

            goal_shot_range_depths: ai::GOAL_SHOT_RANGE_DEPTHS,
            defensive_zone_factor: ai::DEFENSIVE_ZONE_FACTOR,
            intercept_lead_lengths: ai::INTERCEPT_LEAD_LENGTHS,
            clear_upfield_bias: ai::CLEAR_UPFIELD_BIAS,
            wing_side_factor: ai::WING_SIDE_FACTOR,

            race_commitment_factor: ai::RACE_COMMITMENT_FACTOR,
            race_puck_moved_radii: ai::RACE_PUCK_MOVED_RADII,

            base_flick_force: release::BASE_FLICK_FORCE,
            goal_shot_force: release::GOAL_SHOT_FORCE,
            flick_recoil: release::FLICK_RECOIL,
            shot_recoil: release::SHOT_RECOIL,

            submerged_force: ai::SUBMERGED_FORCE,
            race_force: ai::RACE_FORCE,
            carry_force: ai::CARRY_FORCE,
            surface_force_scale: ai::SURFACE_FORCE_SCALE,
            surface_positioning_pace: ai::SURFACE_POSITIONING_PACE,
            surface_recovery_pace: ai::SURFACE_RECOVERY_PACE,
            follow_pace: ai::FOLLOW_PACE,
            settle_damping: ai::SETTLE_DAMPING,
        }
    }
}
