//! Formation Configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::formation;

/// Formation anchor lines, as fractions of the pool from White's end.
///
/// Lines mirror for Black; the lane offset scales with pool width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    /// Backs while the puck is in their half
    pub defensive_line: f32,
    /// Backs pushed up, or forwards holding back
    pub own_midfield: f32,
    /// Forwards while the puck is in the opponent half
    pub opponent_midfield: f32,
    /// Forwards above the midline, backs below (fraction of height)
    pub line_offset: f32,
    /// Left/right lane shift (fraction of width)
    pub lane_offset: f32,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            defensive_line: formation::DEFENSIVE_LINE,
            own_midfield: formation::OWN_MIDFIELD,
            opponent_midfield: formation::OPPONENT_MIDFIELD,
            line_offset: formation::LINE_OFFSET,
            lane_offset: formation::LANE_OFFSET,
        }
    }
}
