//! Live match driving
//!
//! The match never schedules itself. A host owns two timers, a frame
//! scheduler and a one-second countdown timer, and forwards their firings to
//! [`MatchDriver`] together with the token it was handed when the timer was
//! armed. Every reset bumps the driver generation, so firings armed for a
//! previous match are recognised as stale and never touch the new one.
//!
//! [`HeadlessRunner`] is such a host with a virtual clock.

use serde::Serialize;
use std::io::Write;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::events::{MatchEvent, ReleaseKind, Score};
use super::match_phase::MatchPhase;
use super::match_state::Match;
use super::snapshot::{Frame, StatusSnapshot};
use super::team::Team;
use crate::error::{Result, SimError};

// ============================================
// Tokens
// ============================================

/// Permission to run one frame, valid for the generation it was issued in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken {
    generation: u64,
}

/// Permission to fire one countdown second, valid for the generation it was issued in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownToken {
    generation: u64,
}

// ============================================
// Frame sink
// ============================================

#[derive(Debug, Error)]
pub enum SinkError {
    /// The drawing surface is gone; the match cannot continue
    #[error("drawing surface lost: {0}")]
    SurfaceLost(String),
    /// One frame could not be presented; later frames may succeed
    #[error("frame dropped: {0}")]
    Dropped(String),
}

/// Outbound presentation of each frame (renderer, recorder, network bridge …)
pub trait FrameSink {
    fn present(&mut self, frame: &Frame) -> std::result::Result<(), SinkError>;
}

/// Discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &Frame) -> std::result::Result<(), SinkError> {
        Ok(())
    }
}

/// Writes one JSON document per frame; a failing writer counts as a lost surface
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    /// Present every n-th frame only
    every: u64,
    seen: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W, every: u64) -> Self {
        Self { writer, every: every.max(1), seen: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn present(&mut self, frame: &Frame) -> std::result::Result<(), SinkError> {
        self.seen += 1;
        if (self.seen - 1) % self.every != 0 {
            return Ok(());
        }
        let line =
            serde_json::to_string(frame).map_err(|e| SinkError::Dropped(e.to_string()))?;
        writeln!(self.writer, "{line}").map_err(|e| SinkError::SurfaceLost(e.to_string()))
    }
}

// ============================================
// StepResult
// ============================================

/// Outcome of forwarding one timer firing
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// Token from an earlier generation; nothing happened
    Stale,
    /// Simulation advanced one tick
    Advanced(Vec<MatchEvent>),
    /// Frame presented without simulating (PRE_START, PAUSED), or a
    /// countdown firing handled
    Frozen(Vec<MatchEvent>),
}

impl StepResult {
    pub fn events(&self) -> &[MatchEvent] {
        match self {
            StepResult::Stale => &[],
            StepResult::Advanced(events) | StepResult::Frozen(events) => events,
        }
    }

    /// Scoring team and updated score, if this step produced a goal
    pub fn goal(&self) -> Option<(Team, Score)> {
        self.events().iter().find_map(|e| match e {
            MatchEvent::GoalScored { team, score, .. } => Some((*team, *score)),
            _ => None,
        })
    }
}

// ============================================
// MatchDriver
// ============================================

pub struct MatchDriver<S: FrameSink> {
    game: Match,
    sink: S,
    generation: u64,
    halted: bool,
}

impl<S: FrameSink> MatchDriver<S> {
    pub fn new(game: Match, sink: S) -> Self {
        Self { game, sink, generation: 0, halted: false }
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (Match, S) {
        (self.game, self.sink)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a fatal sink error stopped the driver
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn frame_token(&self) -> FrameToken {
        FrameToken { generation: self.generation }
    }

    pub fn countdown_token(&self) -> CountdownToken {
        CountdownToken { generation: self.generation }
    }

    fn ensure_running(&self, action: &'static str) -> Result<()> {
        if self.halted {
            return Err(SimError::InvalidTransition { from: MatchPhase::Stopped.to_string(), action });
        }
        Ok(())
    }

    /// Frame scheduler firing: tick if RUNNING, then present the frame
    pub fn on_frame(&mut self, token: FrameToken) -> Result<StepResult> {
        self.ensure_running("run a frame")?;
        if token.generation != self.generation {
            debug!(stale = token.generation, current = self.generation, "stale frame ignored");
            return Ok(StepResult::Stale);
        }

        let advanced = self.game.tick();
        let frame = self.game.frame();
        match self.sink.present(&frame) {
            Ok(()) => {}
            Err(SinkError::SurfaceLost(reason)) => {
                warn!(%reason, "drawing surface lost, stopping match");
                self.game.stop();
                self.halted = true;
                return Err(SimError::SurfaceLost(reason));
            }
            Err(err @ SinkError::Dropped(_)) => warn!(%err, "frame not presented"),
        }

        let events = self.game.drain_events();
        Ok(if advanced { StepResult::Advanced(events) } else { StepResult::Frozen(events) })
    }

    /// Countdown timer firing
    pub fn on_countdown(&mut self, token: CountdownToken) -> Result<StepResult> {
        self.ensure_running("run the countdown")?;
        if token.generation != self.generation {
            debug!(stale = token.generation, current = self.generation, "stale countdown ignored");
            return Ok(StepResult::Stale);
        }
        self.game.countdown_elapsed();
        Ok(StepResult::Frozen(self.game.drain_events()))
    }

    /// Cancel everything pending and rebuild the match
    pub fn reset(&mut self) -> Result<Vec<MatchEvent>> {
        self.generation += 1;
        self.halted = false;
        self.game.reset()?;
        Ok(self.game.drain_events())
    }

    pub fn continue_after_goal(&mut self) -> Result<Vec<MatchEvent>> {
        self.ensure_running("continue")?;
        self.game.continue_after_goal()?;
        Ok(self.game.drain_events())
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.game.resize(width, height)
    }
}

// ============================================
// HeadlessRunner
// ============================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerOptions {
    /// Stop after this many seconds of RUNNING play
    pub running_seconds: u32,
    /// Stop once either team reaches this score
    pub goal_limit: Option<u32>,
    /// Continue automatically after each goal
    pub auto_continue: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self { running_seconds: 120, goal_limit: None, auto_continue: true }
    }
}

/// One goal in a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalRecord {
    /// Running tick the goal was scored on
    pub tick: u64,
    pub team: Team,
    pub score: Score,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseCounts {
    pub flicks: u32,
    pub shots: u32,
    pub dumps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub seed: u64,
    pub score: Score,
    /// Simulated RUNNING ticks
    pub running_ticks: u64,
    /// All frames, including frozen ones
    pub frames: u64,
    pub goals: Vec<GoalRecord>,
    pub releases: ReleaseCounts,
    pub possession_changes: u32,
    pub final_status: StatusSnapshot,
}

impl MatchReport {
    pub fn winner(&self) -> Option<Team> {
        use std::cmp::Ordering;
        match self.score.white.cmp(&self.score.black) {
            Ordering::Greater => Some(Team::White),
            Ordering::Less => Some(Team::Black),
            Ordering::Equal => None,
        }
    }
}

/// Drives a match with a virtual clock: `ticks_per_second` frames per
/// countdown firing, no wall-clock waiting.
pub struct HeadlessRunner<S: FrameSink = NullSink> {
    driver: MatchDriver<S>,
    options: RunnerOptions,
}

impl HeadlessRunner<NullSink> {
    pub fn new(game: Match, options: RunnerOptions) -> Self {
        Self::with_sink(game, NullSink, options)
    }
}

impl<S: FrameSink> HeadlessRunner<S> {
    pub fn with_sink(game: Match, sink: S, options: RunnerOptions) -> Self {
        Self { driver: MatchDriver::new(game, sink), options }
    }

    /// Run until the time or goal limit, returning the report and the sink
    pub fn run(mut self) -> Result<(MatchReport, S)> {
        let tps = u64::from(self.driver.game().config().rules.ticks_per_second);
        let target_ticks = u64::from(self.options.running_seconds) * tps;
        // countdowns and goal pauses add frozen frames; bound the loop anyway
        let frame_budget = target_ticks.saturating_mul(4) + 10 * 60 * tps;

        let mut running_ticks = 0u64;
        let mut frames = 0u64;
        let mut frozen_since_countdown = 0u64;
        let mut goals = Vec::new();
        let mut releases = ReleaseCounts::default();
        let mut possession_changes = 0u32;

        while running_ticks < target_ticks && frames < frame_budget {
            let step = self.driver.on_frame(self.driver.frame_token())?;
            frames += 1;

            let mut events = Vec::new();
            match step {
                StepResult::Advanced(ev) => {
                    running_ticks += 1;
                    events = ev;
                }
                StepResult::Frozen(ev) => {
                    events = ev;
                    if self.driver.game().phase() == MatchPhase::PreStart {
                        frozen_since_countdown += 1;
                        if frozen_since_countdown >= tps {
                            frozen_since_countdown = 0;
                            let fired = self.driver.on_countdown(self.driver.countdown_token())?;
                            events.extend(fired.events().iter().cloned());
                        }
                    }
                }
                StepResult::Stale => {}
            }

            for event in &events {
                match event {
                    MatchEvent::GoalScored { team, score, .. } => {
                        goals.push(GoalRecord { tick: running_ticks, team: *team, score: *score });
                    }
                    MatchEvent::Release { kind, .. } => match kind {
                        ReleaseKind::Flick => releases.flicks += 1,
                        ReleaseKind::Shot => releases.shots += 1,
                        ReleaseKind::Dump => releases.dumps += 1,
                    },
                    MatchEvent::PossessionChanged { to: Some(_), .. } => possession_changes += 1,
                    _ => {}
                }
            }

            if self.driver.game().phase() == MatchPhase::Paused {
                let score = self.driver.game().score();
                let limit_hit = self
                    .options
                    .goal_limit
                    .is_some_and(|limit| score.white >= limit || score.black >= limit);
                if limit_hit || !self.options.auto_continue {
                    break;
                }
                self.driver.continue_after_goal()?;
                frozen_since_countdown = 0;
            }
        }

        let game = self.driver.game();
        let report = MatchReport {
            seed: game.seed(),
            score: game.score(),
            running_ticks,
            frames,
            goals,
            releases,
            possession_changes,
            final_status: game.status(),
        };
        info!(
            seed = report.seed,
            white = report.score.white,
            black = report.score.black,
            ticks = report.running_ticks,
            "headless match finished"
        );
        let (_, sink) = self.driver.into_parts();
        Ok((report, sink))
    }
}

/// Convenience wrapper: headless run with no frame output
pub fn run_headless(game: Match, options: RunnerOptions) -> Result<MatchReport> {
    HeadlessRunner::new(game, options).run().map(|(report, _)| report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn driver() -> MatchDriver<NullSink> {
        MatchDriver::new(Match::new(SimConfig::default(), 21).unwrap(), NullSink)
    }

    struct LostAfter {
        remaining: u32,
    }

    impl FrameSink for LostAfter {
        fn present(&mut self, _frame: &Frame) -> std::result::Result<(), SinkError> {
            if self.remaining == 0 {
                return Err(SinkError::SurfaceLost("context gone".into()));
            }
            self.remaining -= 1;
            Ok(())
        }
    }

    struct Flaky;

    impl FrameSink for Flaky {
        fn present(&mut self, _frame: &Frame) -> std::result::Result<(), SinkError> {
            Err(SinkError::Dropped("busy".into()))
        }
    }

    #[test]
    fn test_frames_frozen_before_start() {
        let mut d = driver();
        let step = d.on_frame(d.frame_token()).unwrap();
        assert!(matches!(step, StepResult::Frozen(_)));
        assert_eq!(d.game().tick_count(), 0);
    }

    #[test]
    fn test_countdown_then_frames_advance() {
        let mut d = driver();
        for _ in 0..3 {
            d.on_countdown(d.countdown_token()).unwrap();
        }
        assert_eq!(d.game().phase(), MatchPhase::Running);
        let step = d.on_frame(d.frame_token()).unwrap();
        assert!(matches!(step, StepResult::Advanced(_)));
    }

    #[test]
    fn test_reset_invalidates_pending_tokens() {
        let mut d = driver();
        let old_countdown = d.countdown_token();
        let old_frame = d.frame_token();
        d.on_countdown(d.countdown_token()).unwrap();
        assert_eq!(d.game().countdown(), Some(2));

        d.reset().unwrap();
        assert_eq!(d.game().countdown(), Some(3));
        assert_eq!(d.on_countdown(old_countdown).unwrap(), StepResult::Stale);
        assert_eq!(d.on_frame(old_frame).unwrap(), StepResult::Stale);
        assert_eq!(d.game().countdown(), Some(3));

        // fresh tokens work
        d.on_countdown(d.countdown_token()).unwrap();
        assert_eq!(d.game().countdown(), Some(2));
    }

    #[test]
    fn test_surface_loss_is_terminal() {
        let game = Match::new(SimConfig::default(), 22).unwrap();
        let mut d = MatchDriver::new(game, LostAfter { remaining: 2 });
        assert!(d.on_frame(d.frame_token()).is_ok());
        assert!(d.on_frame(d.frame_token()).is_ok());
        let err = d.on_frame(d.frame_token()).unwrap_err();
        assert!(matches!(err, SimError::SurfaceLost(_)));
        assert!(!err.is_recoverable());
        assert!(d.is_halted());
        assert_eq!(d.game().phase(), MatchPhase::Stopped);

        // nothing runs afterwards until a reset
        assert!(d.on_frame(d.frame_token()).is_err());
        assert!(d.on_countdown(d.countdown_token()).is_err());
        let events = d.reset().unwrap();
        assert_eq!(d.game().phase(), MatchPhase::PreStart);
        assert!(!d.is_halted());
        // already stopped: the reset goes straight to rebuilding
        assert!(!events.contains(&MatchEvent::PhaseChanged {
            from: MatchPhase::Stopped,
            to: MatchPhase::Stopped
        }));
        assert!(events.contains(&MatchEvent::PhaseChanged {
            from: MatchPhase::Stopped,
            to: MatchPhase::Initializing
        }));
    }

    #[test]
    fn test_dropped_frames_do_not_stop_play() {
        let game = Match::new(SimConfig::default(), 23).unwrap();
        let mut d = MatchDriver::new(game, Flaky);
        for _ in 0..3 {
            d.on_countdown(d.countdown_token()).unwrap();
        }
        for _ in 0..5 {
            assert!(d.on_frame(d.frame_token()).is_ok());
        }
        assert_eq!(d.game().tick_count(), 5);
    }

    #[test]
    fn test_headless_runner_runs_requested_time() {
        let game = Match::new(SimConfig::default(), 24).unwrap();
        let options = RunnerOptions { running_seconds: 5, goal_limit: None, auto_continue: true };
        let report = run_headless(game, options).unwrap();
        assert_eq!(report.running_ticks, 300);
        // three countdown seconds of frozen frames precede play
        assert!(report.frames >= 300 + 3 * 60);
        assert_eq!(report.final_status.players.len(), 12);
        let goals = report.score.white + report.score.black;
        assert_eq!(goals as usize, report.goals.len());
    }

    #[test]
    fn test_json_lines_sink_writes_frames() {
        let game = Match::new(SimConfig::default(), 25).unwrap();
        let options = RunnerOptions { running_seconds: 1, goal_limit: None, auto_continue: true };
        let sink = JsonLinesSink::new(Vec::new(), 60);
        let (report, sink) = HeadlessRunner::with_sink(game, sink, options).run().unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len() as u64, report.frames.div_ceil(60));
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["status"]["phase"], "PRE_START");
    }
}
