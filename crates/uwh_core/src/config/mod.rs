//! # Simulation Configuration
//!
//! Every tunable of the pool simulation lives here, grouped by concern.
//! Defaults come from `engine::physics_constants`; files only need to name the
//! fields they override.
//!
//! ## 사용법
//! ```rust
//! use uwh_core::config::SimConfig;
//!
//! let config = SimConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let small = SimConfig::from_yaml_str("rules:\n  players_per_team: 3\n").unwrap();
//! assert_eq!(small.rules.players_per_team, 3);
//! ```

mod ai_config;
mod arena_config;
mod body_config;
mod breath_config;
mod formation_config;
mod rules_config;

pub use ai_config::AiConfig;
pub use arena_config::ArenaConfig;
pub use body_config::{BodyConfig, PossessionConfig};
pub use breath_config::{BreathConfig, SkillConfig};
pub use formation_config::FormationConfig;
pub use rules_config::RulesConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Full simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimConfig {
    pub arena: ArenaConfig,
    pub body: BodyConfig,
    pub breath: BreathConfig,
    pub skill: SkillConfig,
    pub ai: AiConfig,
    pub formation: FormationConfig,
    pub possession: PossessionConfig,
    pub rules: RulesConfig,
}

impl SimConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: SimConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` is parsed as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path.extension().and_then(|ext| ext.to_str()) == Some("json");
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        positive("arena.goal_width", self.arena.goal_width)?;
        positive("arena.goal_depth", self.arena.goal_depth)?;
        if self.arena.goal_width >= self.arena.height {
            return Err(SimError::invalid_config(
                "arena.goal_width",
                "goal mouth must be narrower than the pool",
            ));
        }
        if self.arena.goal_depth * 2.0 >= self.arena.width {
            return Err(SimError::invalid_config("arena.goal_depth", "goal trays overlap"));
        }
        let radius = self.body.player_radius();
        if radius * 2.0 >= self.arena.width.min(self.arena.height) {
            return Err(SimError::invalid_config("body", "players do not fit in the pool"));
        }

        positive("body.player_width", self.body.player_width)?;
        positive("body.player_height", self.body.player_height)?;
        positive("body.puck_radius", self.body.puck_radius)?;
        unit_open("body.player_friction", self.body.player_friction)?;
        unit_open("body.puck_friction", self.body.puck_friction)?;
        unit_open("possession.damping", self.possession.damping)?;
        unit_closed("body.wall_restitution", self.body.wall_restitution)?;
        non_negative("body.velocity_epsilon", self.body.velocity_epsilon)?;
        non_negative("body.facing_speed_sq", self.body.facing_speed_sq)?;

        positive("possession.stick_length", self.possession.stick_length)?;
        unit_closed("possession.pull", self.possession.pull)?;
        positive("possession.pull", self.possession.pull)?;
        unit_closed("possession.collision_dampen", self.possession.collision_dampen)?;
        unit_closed("possession.carry_velocity_share", self.possession.carry_velocity_share)?;

        positive("breath.max_breath", self.breath.max_breath)?;
        positive("breath.consumption_rate", self.breath.consumption_rate)?;
        positive("breath.recovery_rate", self.breath.recovery_rate)?;
        ordered(
            "breath.max_breath_seconds",
            self.breath.min_breath_seconds,
            self.breath.max_breath_seconds,
        )?;
        if self.ai.surface_breath >= self.breath.max_breath {
            return Err(SimError::invalid_config(
                "ai.surface_breath",
                "players could never stay submerged",
            ));
        }

        self.validate_ai()?;

        positive("skill.base_speed", self.skill.base_speed)?;
        positive("skill.speed_multiplier_min", self.skill.speed_multiplier_min)?;
        ordered(
            "skill.speed_multiplier_max",
            self.skill.speed_multiplier_min,
            self.skill.speed_multiplier_max,
        )?;
        ordered(
            "skill.flick_strength_max",
            self.skill.flick_strength_min,
            self.skill.flick_strength_max,
        )?;
        let p = self.skill.left_handed_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(SimError::invalid_config(
                "skill.left_handed_probability",
                format!("{p} is not a probability"),
            ));
        }

        if self.rules.players_per_team == 0 {
            return Err(SimError::invalid_config("rules.players_per_team", "empty roster"));
        }
        if self.rules.ticks_per_second == 0 {
            return Err(SimError::invalid_config("rules.ticks_per_second", "must be positive"));
        }
        Ok(())
    }

    /// Weights, shares and pool fractions of the decision procedure
    fn validate_ai(&self) -> Result<()> {
        let ai = &self.ai;
        positive("ai.speed_factor", ai.speed_factor)?;
        for (field, value) in [
            ("ai.off_wing_surface_share", ai.off_wing_surface_share),
            ("ai.dive_distance_factor", ai.dive_distance_factor),
            ("ai.lateral_weight", ai.lateral_weight),
            ("ai.avoidance_weight", ai.avoidance_weight),
            ("ai.formation_weight", ai.formation_weight),
            ("ai.formation_falloff_factor", ai.formation_falloff_factor),
            ("ai.defensive_zone_factor", ai.defensive_zone_factor),
            ("ai.clear_upfield_bias", ai.clear_upfield_bias),
            ("ai.wing_side_factor", ai.wing_side_factor),
            ("ai.race_commitment_factor", ai.race_commitment_factor),
            ("ai.flick_recoil", ai.flick_recoil),
            ("ai.shot_recoil", ai.shot_recoil),
            ("ai.surface_positioning_pace", ai.surface_positioning_pace),
            ("ai.surface_recovery_pace", ai.surface_recovery_pace),
            ("ai.follow_pace", ai.follow_pace),
            ("ai.settle_damping", ai.settle_damping),
            ("formation.defensive_line", self.formation.defensive_line),
            ("formation.own_midfield", self.formation.own_midfield),
            ("formation.opponent_midfield", self.formation.opponent_midfield),
            ("formation.line_offset", self.formation.line_offset),
            ("formation.lane_offset", self.formation.lane_offset),
        ] {
            unit_closed(field, value)?;
        }
        // boosted back weight still has to leave room for the chase
        if ai.formation_weight * ai.back_formation_boost > 1.0 {
            return Err(SimError::invalid_config(
                "ai.back_formation_boost",
                "boosted formation weight exceeds 1",
            ));
        }
        non_negative("ai.formation_jitter", ai.formation_jitter)?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid_config(field, format!("{value} must not be negative")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid_config(field, format!("{value} must be positive")))
    }
}

fn unit_open(field: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(SimError::invalid_config(field, format!("{value} must lie in (0, 1)")))
    }
}

fn unit_closed(field: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::invalid_config(field, format!("{value} must lie in [0, 1]")))
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<()> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(SimError::invalid_config(field, format!("range [{min}, {max}) is empty")))
    }
}

// ========== Tests ==========
