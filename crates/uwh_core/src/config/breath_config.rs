//! Breath & Skill Configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{breath, skill};

/// Breath resource parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathConfig {
    /// 최대 숨 (내부 단위, 초 아님) (기본: 100)
    pub max_breath: f32,
    /// 잠수 중 틱당 소모량 (기본: 0.6)
    pub consumption_rate: f32,
    /// 수면 정지 상태 틱당 회복량 (기본: 1.8)
    pub recovery_rate: f32,
    /// 이동 속도가 회복을 깎는 정도 (기본: 1.5)
    pub recovery_speed_penalty: f32,
    /// Display-only breath hold range, seconds
    pub min_breath_seconds: f32,
    pub max_breath_seconds: f32,
}

impl Default for BreathConfig {
    fn default() -> Self {
        Self {
            max_breath: breath::MAX_BREATH,
            consumption_rate: breath::CONSUMPTION_RATE,
            recovery_rate: breath::RECOVERY_RATE,
            recovery_speed_penalty: breath::RECOVERY_SPEED_PENALTY,
            min_breath_seconds: breath::MIN_BREATH_SECONDS,
            max_breath_seconds: breath::MAX_BREATH_SECONDS,
        }
    }
}

/// Distributions for per-player skill draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    pub base_speed: f32,
    pub speed_multiplier_min: f32,
    pub speed_multiplier_max: f32,
    pub flick_strength_min: f32,
    pub flick_strength_max: f32,
    pub left_handed_probability: f64,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            base_speed: skill::PLAYER_BASE_SPEED,
            speed_multiplier_min: skill::SPEED_MULTIPLIER_MIN,
            speed_multiplier_max: skill::SPEED_MULTIPLIER_MAX,
            flick_strength_min: skill::FLICK_STRENGTH_MIN,
            flick_strength_max: skill::FLICK_STRENGTH_MAX,
            left_handed_probability: skill::LEFT_HANDED_PROBABILITY,
        }
    }
}
