//! Arena Configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::arena;

/// Pool dimensions and goal trays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// 풀 가로 길이 (기본: 800)
    pub width: f32,
    /// 풀 세로 길이 (기본: 500)
    pub height: f32,
    /// 골 입구 너비 (기본: 100)
    pub goal_width: f32,
    /// 골 트레이 깊이, 골라인 위치 (기본: 15)
    pub goal_depth: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: arena::WIDTH,
            height: arena::HEIGHT,
            goal_width: arena::GOAL_WIDTH,
            goal_depth: arena::GOAL_DEPTH,
        }
    }
}
