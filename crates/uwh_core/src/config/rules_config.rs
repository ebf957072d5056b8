//! Match Rules Configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::rules;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Roster size per team; roles cycle LF, CF, RF, LB, CB, RB
    pub players_per_team: usize,
    /// Countdown length in one-second firings
    pub countdown_seconds: u32,
    /// Frames per second of the host scheduler (headless runner clock)
    pub ticks_per_second: u32,
    pub start_spread_lengths: f32,
    pub start_wall_gap: f32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            players_per_team: rules::PLAYERS_PER_TEAM,
            countdown_seconds: rules::START_COUNTDOWN_SECONDS,
            ticks_per_second: rules::TICKS_PER_SECOND,
            start_spread_lengths: rules::START_SPREAD_LENGTHS,
            start_wall_gap: rules::START_WALL_GAP,
        }
    }
}
