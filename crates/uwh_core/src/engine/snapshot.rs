//! Status snapshot and render frame
//!
//! Published once per tick. The snapshot is everything the status board
//! shows; the frame adds body state so a renderer can draw without touching
//! match state.

use schemars::JsonSchema;
use serde::Serialize;

use super::events::Score;
use super::match_phase::MatchPhase;
use super::player::{Activity, Player, PlayerId, Strategy};
use super::team::{Handedness, Role, Team};

/// One status board row
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PlayerStatus {
    pub id: PlayerId,
    pub team: Team,
    pub role: Role,
    pub handedness: Handedness,
    pub submerged: bool,
    pub strategy: Strategy,
    pub activity: Activity,
    /// Remaining breath in seconds of this player's hold
    pub breath_seconds: f32,
    pub max_breath_seconds: f32,
    pub base_speed: f32,
    pub flick_strength: f32,
}

impl PlayerStatus {
    pub fn from_player(player: &Player, max_breath: f32) -> Self {
        Self {
            id: player.id,
            team: player.team,
            role: player.role,
            handedness: player.skill.handedness,
            submerged: player.is_underwater,
            strategy: player.strategy,
            activity: player.activity,
            breath_seconds: player.breath_seconds(max_breath),
            max_breath_seconds: player.skill.max_breath_seconds,
            base_speed: player.skill.base_speed,
            flick_strength: player.skill.flick_strength,
        }
    }

    /// Fixed-width board line, e.g. `White CF R Bottom ...`
    pub fn board_line(&self) -> String {
        format!(
            "{:<5} {:<2} {} {:<7} {:<24} {:<22} {:>5.1}s {:>5.1} {:>4.1} {:>4.1}",
            self.team.to_string(),
            self.role.code(),
            match self.handedness {
                Handedness::Left => "L",
                Handedness::Right => "R",
            },
            if self.submerged { "Bottom" } else { "Surface" },
            self.strategy.label(),
            self.activity.label(),
            self.breath_seconds,
            self.max_breath_seconds,
            self.base_speed,
            self.flick_strength,
        )
    }
}

/// Score, phase and status rows (White first, then role order)
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct StatusSnapshot {
    pub tick: u64,
    pub phase: MatchPhase,
    pub score: Score,
    /// Countdown display value while PRE_START
    pub countdown: Option<u32>,
    pub players: Vec<PlayerStatus>,
}

/// Render state of one player
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct BodyFrame {
    pub id: PlayerId,
    pub team: Team,
    pub role: Role,
    pub position: (f32, f32),
    pub facing: f32,
    pub radius: f32,
    /// +1 stick on the right of the facing, -1 on the left
    pub stick_side: f32,
    pub submerged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PuckFrame {
    pub position: (f32, f32),
    pub radius: f32,
    pub possessor: Option<PlayerId>,
}

/// Everything presented to a [`FrameSink`](super::live_match::FrameSink)
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Frame {
    pub status: StatusSnapshot,
    /// Surfaced players first so submerged ones draw on top
    pub bodies: Vec<BodyFrame>,
    pub puck: PuckFrame,
}

impl BodyFrame {
    pub fn from_player(player: &Player) -> Self {
        Self {
            id: player.id,
            team: player.team,
            role: player.role,
            position: player.body.position,
            facing: player.body.facing,
            radius: player.body.radius,
            stick_side: player.skill.handedness.stick_side(),
            submerged: player.is_underwater,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::player::tests::test_player;

    #[test]
    fn test_status_converts_breath() {
        let mut p = test_player(0, Team::White, Role::CenterForward, (100.0, 100.0));
        p.breath = 25.0;
        let status = PlayerStatus::from_player(&p, 100.0);
        assert!((status.breath_seconds - 5.0).abs() < 1e-5);
        assert_eq!(status.max_breath_seconds, 20.0);
        assert!(!status.submerged);
    }

    #[test]
    fn test_board_line_fields() {
        let p = test_player(0, Team::Black, Role::RightBack, (100.0, 100.0));
        let line = PlayerStatus::from_player(&p, 100.0).board_line();
        assert!(line.starts_with("Black RB R Surface"));
        assert!(line.contains("20.0s"));
    }

    #[test]
    fn test_snapshot_schema_has_players() {
        let schema = schemars::schema_for!(StatusSnapshot);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("breath_seconds"));
        assert!(json.contains("PRE_START"));
    }
}
