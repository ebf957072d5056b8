//! Outbound match events
//!
//! Collected during `tick()` / `countdown_elapsed()` / `continue_after_goal()`
//! and drained by the driver after each call.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::match_phase::MatchPhase;
use super::player::PlayerId;
use super::team::Team;

/// Goals per team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Score {
    pub white: u32,
    pub black: u32,
}

impl Score {
    pub(crate) fn credit(&mut self, team: Team) {
        match team {
            Team::White => self.white += 1,
            Team::Black => self.black += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ReleaseKind {
    /// Low-breath flick toward the opponent goal
    Flick,
    /// Shot from within range of the opponent goal
    Shot,
    /// Last-moment push before a critical surface
    Dump,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum MatchEvent {
    PhaseChanged { from: MatchPhase, to: MatchPhase },
    /// Countdown display value (3, 2, 1 …)
    Countdown { remaining: u32 },
    CountdownCleared,
    GoalScored { team: Team, score: Score, message: String },
    Release { player: PlayerId, kind: ReleaseKind },
    PossessionChanged { from: Option<PlayerId>, to: Option<PlayerId> },
}

impl MatchEvent {
    pub(crate) fn goal(team: Team, score: Score) -> Self {
        MatchEvent::GoalScored {
            team,
            score,
            message: format!("Goal for {} Team! ({}-{})", team, score.white, score.black),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_message_carries_score() {
        let mut score = Score::default();
        score.credit(Team::Black);
        match MatchEvent::goal(Team::Black, score) {
            MatchEvent::GoalScored { message, .. } => {
                assert_eq!(message, "Goal for Black Team! (0-1)");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_event_json_is_tagged() {
        let json = serde_json::to_value(MatchEvent::Countdown { remaining: 2 }).unwrap();
        assert_eq!(json["type"], "Countdown");
        assert_eq!(json["remaining"], 2);
    }
}
