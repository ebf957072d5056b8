pub mod arena;
pub mod body;
pub mod collision;
pub mod decision;
pub mod deterministic; // seed/tick/player hashing for formation jitter
pub mod events;
pub mod formation;
pub mod geometry;
pub mod goal; // goal band test
pub mod live_match;
pub mod match_phase;
pub mod match_state;
pub mod physics_constants;
pub mod player;
pub mod puck;
pub mod roster;
pub mod snapshot;
pub mod steering;
pub mod team;


pub use arena::Arena;
pub use decision::{decide, Action, Decision, Release, WorldView};
pub use events::{MatchEvent, ReleaseKind, Score};
pub use live_match::{
    run_headless, CountdownToken, FrameSink, FrameToken, HeadlessRunner, JsonLinesSink,
    MatchDriver, MatchReport, NullSink, RunnerOptions, SinkError, StepResult,
};
pub use match_phase::MatchPhase;
pub use match_state::Match;
pub use player::{Activity, Player, PlayerId, SkillProfile, Strategy};
pub use puck::Puck;
pub use snapshot::{BodyFrame, Frame, PlayerStatus, PuckFrame, StatusSnapshot};
pub use team::{Handedness, Role, Team};
