//! Match phase flow
//!
//! ```text
//! INITIALIZING → PRE_START → RUNNING ⇄ PAUSED
//!                    ↑                    │ continue
//!                    └────────────────────┘
//! any → STOPPED → INITIALIZING (reset)
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchPhase {
    Initializing,
    PreStart,
    Running,
    Paused,
    Stopped,
}

impl MatchPhase {
    pub const fn label(self) -> &'static str {
        match self {
            MatchPhase::Initializing => "INITIALIZING",
            MatchPhase::PreStart => "PRE_START",
            MatchPhase::Running => "RUNNING",
            MatchPhase::Paused => "PAUSED",
            MatchPhase::Stopped => "STOPPED",
        }
    }

    /// Only RUNNING advances the simulation
    #[inline]
    pub const fn is_live(self) -> bool {
        matches!(self, MatchPhase::Running)
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs that move the phase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseSignal {
    /// Roster and puck built, players lined up
    Initialized,
    /// Countdown reached zero
    CountdownFinished,
    GoalScored,
    /// Continue after a goal
    Continue,
    /// Manual reset or a fatal driver error
    Stop,
    /// Rebuild after a stop
    Reinitialize,
}

/// Next phase for `signal`, or `None` when the signal is not accepted in `current`.
pub fn next_phase(current: MatchPhase, signal: PhaseSignal) -> Option<MatchPhase> {
    use MatchPhase::*;
    match (current, signal) {
        (_, PhaseSignal::Stop) => Some(Stopped),
        (Stopped, PhaseSignal::Reinitialize) => Some(Initializing),
        (Initializing, PhaseSignal::Initialized) => Some(PreStart),
        (PreStart, PhaseSignal::CountdownFinished) => Some(Running),
        (Running, PhaseSignal::GoalScored) => Some(Paused),
        (Paused, PhaseSignal::Continue) => Some(PreStart),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut phase = MatchPhase::Initializing;
        for signal in [
            PhaseSignal::Initialized,
            PhaseSignal::CountdownFinished,
            PhaseSignal::GoalScored,
            PhaseSignal::Continue,
            PhaseSignal::CountdownFinished,
        ] {
            phase = next_phase(phase, signal).unwrap();
        }
        assert_eq!(phase, MatchPhase::Running);
    }

    #[test]
    fn test_continue_only_from_paused() {
        for phase in [
            MatchPhase::Initializing,
            MatchPhase::PreStart,
            MatchPhase::Running,
            MatchPhase::Stopped,
        ] {
            assert_eq!(next_phase(phase, PhaseSignal::Continue), None);
        }
    }

    #[test]
    fn test_stop_from_anywhere() {
        for phase in [MatchPhase::PreStart, MatchPhase::Running, MatchPhase::Paused] {
            assert_eq!(next_phase(phase, PhaseSignal::Stop), Some(MatchPhase::Stopped));
        }
        assert_eq!(
            next_phase(MatchPhase::Stopped, PhaseSignal::Reinitialize),
            Some(MatchPhase::Initializing)
        );
    }

    #[test]
    fn test_goal_ignored_outside_running() {
        assert_eq!(next_phase(MatchPhase::PreStart, PhaseSignal::GoalScored), None);
        assert_eq!(next_phase(MatchPhase::Paused, PhaseSignal::GoalScored), None);
    }

    #[test]
    fn test_phase_serializes_screaming() {
        assert_eq!(serde_json::to_string(&MatchPhase::PreStart).unwrap(), "\"PRE_START\"");
    }
}
