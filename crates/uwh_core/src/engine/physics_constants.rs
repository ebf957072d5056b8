//! Physics constants for the pool simulation
//!
//! Distances are in arena units (one unit ≈ one pixel of the reference
//! 800×500 pool), velocities in units per tick. These are the defaults the
//! config layer starts from; runtime code reads them through `SimConfig`.

// ============================================================
// Arena
// ============================================================
pub mod arena {
    /// Reference pool width
    pub const WIDTH: f32 = 800.0;
    /// Reference pool height (800 / 500 aspect)
    pub const HEIGHT: f32 = 500.0;
    /// Goal mouth width (vertical extent of the tray)
    pub const GOAL_WIDTH: f32 = 100.0;
    /// Goal tray depth measured from each end wall
    pub const GOAL_DEPTH: f32 = 15.0;
}

// ============================================================
// Bodies
// ============================================================
pub mod body {
    /// Player body width (across the shoulders)
    pub const PLAYER_WIDTH: f32 = 15.0;
    /// Player body length (head to fins)
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Player collision radius = max(width, height) / 2
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PUCK_RADIUS: f32 = 6.0;

    pub const PLAYER_FRICTION: f32 = 0.90;
    pub const PUCK_FRICTION: f32 = 0.975;

    /// Fraction of speed kept (and reversed) after hitting a wall
    pub const WALL_RESTITUTION: f32 = 0.5;
    /// Velocity components below this snap to zero
    pub const VELOCITY_EPSILON: f32 = 0.01;
    /// speed² above which the facing angle follows velocity
    pub const FACING_SPEED_SQ: f32 = 0.01;
}

// ============================================================
// Breath
// ============================================================
pub mod breath {
    /// Internal breath units (not seconds)
    pub const MAX_BREATH: f32 = 100.0;
    /// Units lost per tick while submerged
    pub const CONSUMPTION_RATE: f32 = 0.6;
    /// Units regained per tick while surfaced and still
    pub const RECOVERY_RATE: f32 = 1.8;
    /// Recovery multiplier = max(0, 1 - PENALTY * speed / base_speed)
    pub const RECOVERY_SPEED_PENALTY: f32 = 1.5;

    /// Display-only breath hold range (seconds)
    pub const MIN_BREATH_SECONDS: f32 = 15.0;
    pub const MAX_BREATH_SECONDS: f32 = 30.0;
}

// ============================================================
// Skill draws
// ============================================================
pub mod skill {
    pub const PLAYER_BASE_SPEED: f32 = 1.6;
    /// base_speed = PLAYER_BASE_SPEED * U[MIN, MAX)
    pub const SPEED_MULTIPLIER_MIN: f32 = 0.85;
    pub const SPEED_MULTIPLIER_MAX: f32 = 1.15;
    /// flick_strength = U[MIN, MAX)
    pub const FLICK_STRENGTH_MIN: f32 = 0.5;
    pub const FLICK_STRENGTH_MAX: f32 = 1.5;
    pub const LEFT_HANDED_PROBABILITY: f64 = 0.1;
}

// ============================================================
// Stick and possession
// ============================================================
pub mod stick {
    /// Visual stick length; reach and ride targets derive from it
    pub const STICK_LENGTH: f32 = 15.0;
    /// Velocity gain toward the stick tip per tick while carried
    pub const POSSESSION_PULL: f32 = 0.9;
    /// Friction applied to a carried puck (heavy damping)
    pub const POSSESSION_DAMPING: f32 = 0.02;
    /// Speed retained when a loose puck bounces off a player
    pub const PUCK_COLLISION_DAMPEN: f32 = 0.2;
    /// Share of the player's velocity transferred on a loose-puck bounce
    pub const CARRY_VELOCITY_SHARE: f32 = 0.1;
    /// Impulse gain pushing a dispossessed holder off the tackler
    pub const DISPOSSESS_IMPULSE: f32 = 0.05;
    /// Impulse per unit of overlap between submerged players
    pub const PLAYER_REPULSION: f32 = 0.05;
    /// Extra spacing kept between submerged players
    pub const REPULSION_MARGIN: f32 = 3.0;
}

// ============================================================
// Release impulses
// ============================================================
pub mod release {
    /// Low-breath flick impulse before flick_strength scaling
    pub const BASE_FLICK_FORCE: f32 = 2.5;
    /// Goal shot impulse before flick_strength scaling
    pub const GOAL_SHOT_FORCE: f32 = 4.5;
    /// Fraction of a flick pushed back onto the player
    pub const FLICK_RECOIL: f32 = 0.1;
    /// Fraction of a shot pushed back onto the player
    pub const SHOT_RECOIL: f32 = 0.05;
}

// ============================================================
// AI thresholds
// ============================================================
pub mod ai {
    use std::f32::consts::PI;

    pub const SPEED_FACTOR: f32 = 0.9;
    /// Offensive dive radius as a fraction of pool width
    pub const DIVE_DISTANCE_FACTOR: f32 = 0.35;
    /// Defensive dive radius = dive distance * factor (opponent carrier)
    pub const DEFENSIVE_DIVE_CARRIER_FACTOR: f32 = 1.5;
    /// Defensive dive radius = dive distance * factor (loose puck at home)
    pub const DEFENSIVE_DIVE_LOOSE_FACTOR: f32 = 2.0;
    pub const SURFACE_BREATH: f32 = 25.0;
    /// Low-breath flick threshold = SURFACE_BREATH * 1.3
    pub const LOW_BREATH_FLICK: f32 = SURFACE_BREATH * 1.3;
    /// Off-wing players surface below this share of max breath
    pub const OFF_WING_SURFACE_SHARE: f32 = 0.6;

    /// Avoidance radius in player radii
    pub const AVOIDANCE_RADII: f32 = 6.0;
    /// Lateral juke radius in player radii
    pub const LATERAL_MANEUVER_RADII: f32 = 3.5;
    pub const LATERAL_MANEUVER_ANGLE: f32 = PI / 4.5;
    pub const LATERAL_WEIGHT: f32 = 0.6;
    pub const AVOIDANCE_WEIGHT: f32 = 0.35;

    pub const FORMATION_WEIGHT: f32 = 0.3;
    /// Distance (fraction of width) at which formation weight saturates
    pub const FORMATION_FALLOFF_FACTOR: f32 = 0.25;
    pub const BACK_FORMATION_BOOST: f32 = 1.8;
    /// Formation target jitter amplitude (full width of the box)
    pub const FORMATION_JITTER: f32 = 50.0;

    /// Shot range in goal depths
    pub const GOAL_SHOT_RANGE_DEPTHS: f32 = 6.0;
    pub const DEFENSIVE_ZONE_FACTOR: f32 = 0.3;
    /// Back interception lead in body lengths
    pub const INTERCEPT_LEAD_LENGTHS: f32 = 1.5;
    /// Clearing heading takes this share of the distance to the goal line
    pub const CLEAR_UPFIELD_BIAS: f32 = 0.1;

    /// Opening race ends within this fraction of width from centre
    pub const RACE_COMMITMENT_FACTOR: f32 = 0.20;
    /// Puck counts as "moved from centre" beyond this many puck radii
    pub const RACE_PUCK_MOVED_RADII: f32 = 5.0;
    /// Wing band half width as a fraction of pool height
    pub const WING_SIDE_FACTOR: f32 = 0.35;

    // Force multipliers (of pace = base_speed * SPEED_FACTOR)
    pub const SUBMERGED_FORCE: f32 = 0.15;
    pub const RACE_FORCE: f32 = 0.22;
    pub const CARRY_FORCE: f32 = 0.18;
    /// Surface steering uses pace * multiplier * SURFACE_FORCE_SCALE
    pub const SURFACE_FORCE_SCALE: f32 = 0.1;
    pub const SURFACE_POSITIONING_PACE: f32 = 0.5;
    pub const SURFACE_RECOVERY_PACE: f32 = 0.2;
    pub const FOLLOW_PACE: f32 = 0.6;
    /// Velocity kept per tick when settling on a surface target
    pub const SETTLE_DAMPING: f32 = 0.8;
}

// ============================================================
// Formation lines (fractions of pool size, White's perspective)
// ============================================================
pub mod formation {
    pub const DEFENSIVE_LINE: f32 = 0.2;
    pub const OWN_MIDFIELD: f32 = 0.4;
    pub const OPPONENT_MIDFIELD: f32 = 0.6;
    /// Forwards sit above the midline, backs below (fraction of height)
    pub const LINE_OFFSET: f32 = 0.15;
    /// Left/right lanes shift by this fraction of width
    pub const LANE_OFFSET: f32 = 0.15;
}

// ============================================================
// Match flow
// ============================================================
pub mod rules {
    pub const PLAYERS_PER_TEAM: usize = 6;
    pub const START_COUNTDOWN_SECONDS: u32 = 3;
    /// Display refresh cadence assumed by the headless runner
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Vertical spacing of the wall line-up in body lengths
    pub const START_SPREAD_LENGTHS: f32 = 1.2;
    /// Gap between the wall and a lined-up player
    pub const START_WALL_GAP: f32 = 5.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breath_thresholds_ordered() {
        assert!(ai::SURFACE_BREATH < ai::LOW_BREATH_FLICK);
        assert!(ai::LOW_BREATH_FLICK < breath::MAX_BREATH);
        assert!((ai::LOW_BREATH_FLICK - 32.5).abs() < 1e-4);
    }

    #[test]
    fn test_player_radius_matches_body() {
        assert_eq!(body::PLAYER_RADIUS, body::PLAYER_WIDTH.max(body::PLAYER_HEIGHT) / 2.0);
    }

    #[test]
    fn test_goal_fits_in_arena() {
        assert!(arena::GOAL_WIDTH < arena::HEIGHT);
        assert!(arena::GOAL_DEPTH * 2.0 < arena::WIDTH);
    }
}
