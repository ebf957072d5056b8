//! # uwh_core - Underwater Hockey Match Simulation Engine
//!
//! Tick-driven 6-a-side underwater hockey on a 2D pool floor. Players hold
//! their breath, dive, race for the puck, carry it on the stick and flick
//! it at the opponent goal; the match owns score, phase, roster and puck.
//!
//! ## Features
//! - Deterministic: same config and seed give the same frame stream
//! - Pure per-player decision procedure over a read-only world view
//! - Host-driven timers with generation tokens (no internal scheduling)
//! - Serializable status snapshots and frames with JSON schemas
//!
//! ```
//! use uwh_core::{Match, MatchPhase, SimConfig};
//!
//! let mut config = SimConfig::default();
//! config.rules.countdown_seconds = 0;
//! let mut game = Match::new(config, 42).unwrap();
//! assert_eq!(game.phase(), MatchPhase::Running);
//! assert!(game.tick());
//! assert_eq!(game.status().players.len(), 12);
//! ```

// Physics steps index several players at once
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod engine;
pub mod error;

pub use config::SimConfig;
pub use engine::{
    run_headless, Frame, FrameSink, HeadlessRunner, Match, MatchDriver, MatchEvent, MatchPhase,
    MatchReport, RunnerOptions, Score, StatusSnapshot, Team,
};
pub use error::{Result, SimError};
