//! Match aggregate
//!
//! `Match` owns the score, phase, roster and puck. Only four entry points
//! mutate it:
//!
//! - [`Match::tick`]: one simulation step, RUNNING only
//! - [`Match::countdown_elapsed`]: one countdown firing, PRE_START only
//! - [`Match::continue_after_goal`]: PAUSED → PRE_START
//! - [`Match::reset`]: any → STOPPED → rebuilt match in PRE_START
//!
//! Tick order: decide + apply per player, integrate players and breath,
//! step the puck, resolve possession and separation, check the goal.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use super::arena::Arena;
use super::collision::{resolve_possession, separate_players, step_puck};
use super::decision::{decide, Action, Decision, Release, WorldView};
use super::events::{MatchEvent, Score};
use super::geometry::unit;
use super::goal::check_goal;
use super::match_phase::{next_phase, MatchPhase, PhaseSignal};
use super::player::{Activity, Opening, Player, PlayerId, Strategy};
use super::puck::Puck;
use super::roster::{generate_roster, lineup_position, status_order};
use super::snapshot::{BodyFrame, Frame, PlayerStatus, PuckFrame, StatusSnapshot};
use crate::config::SimConfig;
use crate::error::{Result, SimError};

#[derive(Debug, Clone)]
pub struct Match {
    config: SimConfig,
    seed: u64,
    rng: ChaCha8Rng,
    arena: Arena,
    players: Vec<Player>,
    puck: Puck,
    score: Score,
    phase: MatchPhase,
    countdown: Option<u32>,
    tick: u64,
    status_order: Vec<PlayerId>,
    events: Vec<MatchEvent>,
}

impl Match {
    /// Validate the config, build the roster and enter PRE_START with the countdown armed
    pub fn new(config: SimConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let arena = Arena::new(&config.arena);
        let puck = Puck::new(arena.center(), config.body.puck_radius);
        let mut m = Self {
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            arena,
            players: Vec::new(),
            puck,
            score: Score::default(),
            phase: MatchPhase::Initializing,
            countdown: None,
            tick: 0,
            status_order: Vec::new(),
            events: Vec::new(),
        };
        m.initialize()?;
        Ok(m)
    }

    // ========================
    // Read access
    // ========================

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn countdown(&self) -> Option<u32> {
        self.countdown
    }

    /// Simulation steps taken since the last reset
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn puck(&self) -> &Puck {
        &self.puck
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn status(&self) -> StatusSnapshot {
        let max_breath = self.config.breath.max_breath;
        StatusSnapshot {
            tick: self.tick,
            phase: self.phase,
            score: self.score,
            countdown: self.countdown,
            players: self
                .status_order
                .iter()
                .map(|id| PlayerStatus::from_player(&self.players[id.0], max_breath))
                .collect(),
        }
    }

    pub fn frame(&self) -> Frame {
        let mut bodies: Vec<BodyFrame> = self.players.iter().map(BodyFrame::from_player).collect();
        bodies.sort_by_key(|b| b.submerged);
        Frame {
            status: self.status(),
            bodies,
            puck: PuckFrame {
                position: self.puck.position(),
                radius: self.puck.radius(),
                possessor: self.puck.possessor(),
            },
        }
    }

    // ========================
    // Inbound signals
    // ========================

    /// One countdown firing. Returns true when it was accepted.
    pub fn countdown_elapsed(&mut self) -> bool {
        let (MatchPhase::PreStart, Some(remaining)) = (self.phase, self.countdown) else {
            debug!(phase = %self.phase, "countdown firing ignored");
            return false;
        };
        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.countdown = Some(remaining);
            self.events.push(MatchEvent::Countdown { remaining });
        } else {
            self.finish_countdown();
        }
        true
    }

    /// Resume after a goal: players back to the walls, countdown re-armed
    pub fn continue_after_goal(&mut self) -> Result<()> {
        if self.phase != MatchPhase::Paused {
            warn!(phase = %self.phase, "continue rejected");
            return Err(SimError::InvalidTransition {
                from: self.phase.to_string(),
                action: "continue",
            });
        }
        self.transition(PhaseSignal::Continue);
        self.reset_positions();
        self.begin_countdown();
        Ok(())
    }

    /// Throw the current match away and build a fresh one (scores cleared,
    /// new roster drawn from the continuing seed stream)
    pub fn reset(&mut self) -> Result<()> {
        info!(score_white = self.score.white, score_black = self.score.black, "match reset");
        self.transition(PhaseSignal::Stop);
        self.countdown = None;
        self.transition(PhaseSignal::Reinitialize);
        self.initialize()
    }

    /// Halt after a fatal driver error
    pub(crate) fn stop(&mut self) {
        self.countdown = None;
        self.transition(PhaseSignal::Stop);
    }

    /// New pool bounds; scores and players are kept, bodies pulled inside
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        let radius = self.config.body.player_radius();
        let fits =
            width > radius * 2.0 && height > self.config.arena.goal_width && height > radius * 2.0;
        if !width.is_finite() || !height.is_finite() || !fits {
            return Err(SimError::invalid_config(
                "arena",
                format!("{width}x{height} cannot hold the goals and players"),
            ));
        }
        self.arena.resize(width, height);
        for p in &mut self.players {
            p.body.position = self.arena.clamp_inside(p.body.position, p.body.radius);
        }
        self.puck.body.position = self.arena.clamp_inside(self.puck.body.position, self.puck.radius());
        info!(width, height, "arena resized");
        Ok(())
    }

    // ========================
    // Simulation step
    // ========================

    /// Advance one tick. Returns false (and changes nothing) outside RUNNING.
    pub fn tick(&mut self) -> bool {
        if !self.phase.is_live() {
            return false;
        }

        for i in 0..self.players.len() {
            let decision = {
                let view = WorldView {
                    players: &self.players,
                    puck: &self.puck,
                    arena: &self.arena,
                    config: &self.config,
                    seed: self.seed,
                    tick: self.tick,
                };
                decide(&view, PlayerId(i))
            };
            self.apply(i, decision);
        }

        for i in 0..self.players.len() {
            let player = &mut self.players[i];
            player.body.integrate(self.config.body.player_friction, &self.arena, &self.config.body);
            let was_holding = self.puck.is_held_by(player.id);
            if player.manage_breath(&self.config.breath, &mut self.puck) && was_holding {
                self.events.push(MatchEvent::PossessionChanged { from: Some(player.id), to: None });
            }
        }

        step_puck(&mut self.puck, &self.players, &self.arena, &self.config.body, &self.config.possession);
        for change in
            resolve_possession(&mut self.players, &mut self.puck, &self.config.body, &self.config.possession)
        {
            self.events.push(MatchEvent::PossessionChanged { from: change.from, to: Some(change.to) });
        }
        separate_players(&mut self.players, &self.config.possession);

        self.tick += 1;
        self.check_goal();
        true
    }

    fn apply(&mut self, idx: usize, decision: Decision) {
        let max_breath = self.config.breath.max_breath;
        let player = &mut self.players[idx];
        player.strategy = decision.strategy;
        player.activity = decision.activity;
        player.opening = decision.opening;
        player.initial_dive_target_met = decision.initial_dive_target_met;

        match decision.action {
            Action::Surface { dump } => {
                if let Some(release) = dump {
                    self.release(idx, release);
                }
                let player = &mut self.players[idx];
                if player.surface(&mut self.puck) {
                    self.events.push(MatchEvent::PossessionChanged { from: Some(player.id), to: None });
                }
            }
            Action::Dive => {
                player.dive(max_breath);
            }
            Action::Release(release) => self.release(idx, release),
            Action::Steer { heading, force } => {
                let (ux, uy) = unit(heading);
                player.body.apply_force(ux * force, uy * force);
            }
            Action::Idle => {}
        }
    }

    fn release(&mut self, idx: usize, release: Release) {
        let player = &mut self.players[idx];
        if !self.puck.is_held_by(player.id) {
            warn!(player = %player.id, kind = ?release.kind, "release without possession ignored");
            return;
        }
        self.puck.release(release.heading, release.force);
        let (ux, uy) = unit(release.heading);
        let recoil = release.force * release.recoil;
        player.body.apply_force(-ux * recoil, -uy * recoil);
        debug!(player = %player.id, kind = ?release.kind, force = release.force, "puck released");
        self.events.push(MatchEvent::Release { player: player.id, kind: release.kind });
        self.events.push(MatchEvent::PossessionChanged { from: Some(player.id), to: None });
    }

    fn check_goal(&mut self) {
        if !self.phase.is_live() {
            return;
        }
        let Some(team) = check_goal(&self.arena, self.puck.position(), self.puck.radius()) else {
            return;
        };
        self.score.credit(team);
        info!(
            team = %team,
            white = self.score.white,
            black = self.score.black,
            tick = self.tick,
            "goal scored"
        );
        self.events.push(MatchEvent::goal(team, self.score));
        self.transition(PhaseSignal::GoalScored);
    }

    // ========================
    // Lifecycle
    // ========================

    fn initialize(&mut self) -> Result<()> {
        self.score = Score::default();
        self.tick = 0;
        self.players = generate_roster(&self.config, &mut self.rng)?;
        self.puck = Puck::new(self.arena.center(), self.config.body.puck_radius);
        self.status_order = status_order(&self.players);
        self.reset_positions();
        info!(players = self.players.len(), seed = self.seed, "match initialized");
        self.transition(PhaseSignal::Initialized);
        self.begin_countdown();
        Ok(())
    }

    /// Wall line-up at rest, full breath; identity and skills untouched
    fn reset_positions(&mut self) {
        self.puck.recenter(&self.arena);
        let radius = self.config.body.player_radius();
        let spread = self.config.body.player_height * self.config.rules.start_spread_lengths;
        let gap = self.config.rules.start_wall_gap;
        for p in &mut self.players {
            let pos = lineup_position(&self.arena, p.team, p.role, radius, spread, gap);
            p.body.place(pos, Player::home_facing(p.team));
            p.is_underwater = false;
            p.breath = self.config.breath.max_breath;
            p.strategy = Strategy::Positioning;
            p.activity = Activity::WaitingAtWall;
            p.opening = Opening::None;
            p.initial_dive_target_met = false;
        }
    }

    fn begin_countdown(&mut self) {
        let seconds = self.config.rules.countdown_seconds;
        if seconds == 0 {
            self.finish_countdown();
            return;
        }
        self.countdown = Some(seconds);
        self.events.push(MatchEvent::Countdown { remaining: seconds });
    }

    fn finish_countdown(&mut self) {
        self.countdown = None;
        self.events.push(MatchEvent::CountdownCleared);
        if self.transition(PhaseSignal::CountdownFinished) {
            self.start_play();
        }
    }

    /// Forwards dive and race for the puck; backs wait on the surface and shadow them
    fn start_play(&mut self) {
        let max_breath = self.config.breath.max_breath;
        for p in &mut self.players {
            if p.role.is_forward() {
                p.dive(max_breath);
                p.opening = Opening::Race;
                p.strategy = Strategy::RaceForPuck;
                p.activity = Activity::DivingForPuck;
                p.initial_dive_target_met = false;
            } else {
                p.opening = Opening::Follow;
                p.strategy = Strategy::FollowForward;
                p.activity = Activity::WaitingSurface;
                p.initial_dive_target_met = true;
            }
        }
    }

    fn transition(&mut self, signal: PhaseSignal) -> bool {
        match next_phase(self.phase, signal) {
            Some(to) if to == self.phase => {
                debug!(phase = %to, ?signal, "already in phase");
                true
            }
            Some(to) => {
                let from = self.phase;
                self.phase = to;
                info!(%from, %to, "phase changed");
                self.events.push(MatchEvent::PhaseChanged { from, to });
                true
            }
            None => {
                warn!(phase = %self.phase, ?signal, "phase signal rejected");
                false
            }
        }
    }
}
