//! Per-player decision procedure
//!
//! `decide` is a pure function of the match state: it reads a [`WorldView`]
//! and returns a [`Decision`] that the match applies. Rules are evaluated in
//! strict priority order and the first match wins:
//!
//! 1. critical breath → surface (dumping a carried puck first)
//! 2. low breath while carrying → flick toward the opponent goal
//! 3. surfaced → follow / dive / formation positioning
//! 4. submerged → opening race, then carry / defend / loose-puck play
//!
//! Formation jitter comes from [`deterministic`](super::deterministic), never
//! from a shared RNG.

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::deterministic::{self, subcase};
use super::events::ReleaseKind;
use super::formation::formation_target;
use super::geometry::{angle_to, distance, heading_or, length, unit, Vec2};
use super::player::{Activity, Opening, Player, PlayerId, Strategy};
use super::puck::Puck;
use super::steering::{blend, evade, settle, Evade, Evasion};
use super::team::Lane;
use crate::config::SimConfig;

/// Read-only view of the match handed to the decision procedure
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    pub players: &'a [Player],
    pub puck: &'a Puck,
    pub arena: &'a Arena,
    pub config: &'a SimConfig,
    pub seed: u64,
    pub tick: u64,
}

impl WorldView<'_> {
    fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.0]
    }

    /// Nearest submerged opponent and its distance
    fn nearest_submerged_opponent(&self, me: &Player) -> Option<(Vec2, f32)> {
        self.players
            .iter()
            .filter(|p| p.team != me.team && p.is_underwater)
            .map(|p| (p.body.position, distance(me.body.position, p.body.position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Jittered formation target for `me` this tick
    fn formation_target(&self, me: &Player) -> Vec2 {
        let amp = self.config.ai.formation_jitter;
        let jitter = (
            deterministic::jitter(self.seed, self.tick, me.id.0, subcase::FORMATION_X, amp),
            deterministic::jitter(self.seed, self.tick, me.id.0, subcase::FORMATION_Y, amp),
        );
        formation_target(
            self.arena,
            &self.config.formation,
            me.team,
            me.role,
            self.puck.position(),
            jitter,
            me.body.radius,
        )
    }
}

/// Puck impulse plus the releasing player's recoil share
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub heading: f32,
    pub force: f32,
    pub recoil: f32,
    pub kind: ReleaseKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Come up for air, optionally dumping the puck first
    Surface { dump: Option<Release> },
    Dive,
    Release(Release),
    /// Impulse of `force` along `heading`
    Steer { heading: f32, force: f32 },
    Idle,
}

/// Action plus the label and opening bookkeeping updates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub strategy: Strategy,
    pub activity: Activity,
    pub opening: Opening,
    pub initial_dive_target_met: bool,
}

impl Decision {
    fn carry(me: &Player) -> Self {
        Self {
            action: Action::Idle,
            strategy: me.strategy,
            activity: me.activity,
            opening: me.opening,
            initial_dive_target_met: me.initial_dive_target_met,
        }
    }

    fn with(mut self, action: Action, strategy: Strategy, activity: Activity) -> Self {
        self.action = action;
        self.strategy = strategy;
        self.activity = activity;
        self
    }
}

/// Per-tick facts shared by the branches
struct Situation<'a> {
    pace: f32,
    possessing: bool,
    /// Opponent holding the puck, if any
    carrier: Option<&'a Player>,
    puck: Vec2,
    dist_to_puck: f32,
    puck_in_defensive_zone: bool,
    puck_in_goal_zone: bool,
}

pub fn decide(view: &WorldView<'_>, id: PlayerId) -> Decision {
    let me = view.player(id);
    let ai = &view.config.ai;
    let puck = view.puck.position();
    let situation = Situation {
        pace: me.skill.base_speed * ai.speed_factor,
        possessing: view.puck.is_held_by(me.id),
        carrier: view.puck.possessor().map(|pid| view.player(pid)).filter(|p| p.team != me.team),
        puck,
        dist_to_puck: distance(me.body.position, puck),
        puck_in_defensive_zone: view.arena.in_defensive_zone(
            me.team,
            puck.0,
            ai.defensive_zone_factor,
        ),
        puck_in_goal_zone: view.arena.in_goal_zone(me.team, puck.0, view.puck.radius()),
    };
    let decision = Decision::carry(me);

    if me.is_underwater && me.breath < ai.surface_breath {
        let dump = situation.possessing.then(|| toward_goal(view, me, ReleaseKind::Dump));
        return decision.with(Action::Surface { dump }, Strategy::Surfacing, Activity::CriticalBreath);
    }

    if me.is_underwater && situation.possessing && me.breath < ai.low_breath_flick {
        return decision.with(
            Action::Release(toward_goal(view, me, ReleaseKind::Flick)),
            Strategy::FlickPuck,
            Activity::LowBreathFlick,
        );
    }

    if me.is_underwater {
        decide_submerged(view, me, &situation, decision)
    } else {
        decide_surfaced(view, me, &situation, decision)
    }
}

fn toward_goal(view: &WorldView<'_>, me: &Player, kind: ReleaseKind) -> Release {
    let ai = &view.config.ai;
    let (base, recoil) = match kind {
        ReleaseKind::Shot => (ai.goal_shot_force, ai.shot_recoil),
        ReleaseKind::Flick | ReleaseKind::Dump => (ai.base_flick_force, ai.flick_recoil),
    };
    Release {
        heading: angle_to(me.body.position, view.arena.attacking_goal(me.team)),
        force: base * me.skill.flick_strength,
        recoil,
        kind,
    }
}

/// Steer toward `target`, or brake once within two radii of it
fn steer_or_settle(view: &WorldView<'_>, me: &Player, target: Vec2, force: f32) -> Action {
    let pos = me.body.position;
    if distance(pos, target) > me.body.radius * 2.0 {
        return Action::Steer { heading: angle_to(pos, target), force };
    }
    let brake = settle(me.body.velocity, view.config.ai.settle_damping);
    let magnitude = length(brake);
    if magnitude > 0.0 {
        Action::Steer { heading: heading_or(brake, me.body.facing), force: magnitude }
    } else {
        Action::Idle
    }
}

// ========================
// Surfaced
// ========================

enum FollowStep {
    Follow(Vec2),
    Done,
}

/// Shadow the lane's forward until it has engaged
fn follow_step(view: &WorldView<'_>, me: &Player, s: &Situation<'_>) -> FollowStep {
    let Some(forward_role) = me.role.shadowed_forward() else {
        return FollowStep::Done;
    };
    let Some(forward) =
        view.players.iter().find(|p| p.team == me.team && p.role == forward_role)
    else {
        return FollowStep::Done;
    };

    let engaged = forward.opening != Opening::Race || !forward.is_underwater;
    let threatened = s.carrier.is_some() && s.puck_in_defensive_zone;
    if engaged || threatened {
        return FollowStep::Done;
    }

    let (bx, by) = unit(forward.body.facing);
    let length = view.config.body.player_height;
    FollowStep::Follow((forward.body.position.0 - bx * length, forward.body.position.1 - by * length))
}

fn decide_surfaced(
    view: &WorldView<'_>,
    me: &Player,
    s: &Situation<'_>,
    mut decision: Decision,
) -> Decision {
    let ai = &view.config.ai;

    if decision.opening == Opening::Follow {
        match follow_step(view, me, s) {
            FollowStep::Follow(target) => {
                let force = s.pace * ai.follow_pace * ai.surface_force_scale;
                return decision.with(
                    steer_or_settle(view, me, target, force),
                    Strategy::FollowForward,
                    Activity::FollowingForward,
                );
            }
            FollowStep::Done => decision.opening = Opening::None,
        }
    }

    let max_breath = view.config.breath.max_breath;
    let can_dive = me.breath >= max_breath;
    let dive_distance = view.arena.width * ai.dive_distance_factor;

    let offensive = s.dist_to_puck < dive_distance && s.carrier.is_none() && !s.puck_in_defensive_zone;
    let carrier_close = s.carrier.is_some_and(|c| {
        distance(me.body.position, c.body.position) < dive_distance * ai.defensive_dive_carrier_factor
    });
    let loose_at_home = view.puck.is_loose()
        && s.puck_in_defensive_zone
        && s.dist_to_puck < dive_distance * ai.defensive_dive_loose_factor;
    let defensive = carrier_close || loose_at_home;

    if can_dive && (offensive || defensive) {
        let activity = if defensive { Activity::DivingDefensive } else { Activity::DivingForPuck };
        return decision.with(Action::Dive, Strategy::RecoverReposition, activity);
    }

    let (activity, share) = if me.breath < max_breath {
        (Activity::RecoveringBreath, ai.surface_recovery_pace)
    } else {
        (Activity::PositioningSurface, ai.surface_positioning_pace)
    };
    let target = view.formation_target(me);
    let force = s.pace * share * ai.surface_force_scale;
    decision.with(steer_or_settle(view, me, target, force), Strategy::RecoverReposition, activity)
}

// ========================
// Submerged
// ========================

fn decide_submerged(
    view: &WorldView<'_>,
    me: &Player,
    s: &Situation<'_>,
    mut decision: Decision,
) -> Decision {
    let ai = &view.config.ai;
    let pos = me.body.position;

    if decision.opening == Opening::Race && !decision.initial_dive_target_met {
        let centre = view.arena.center();
        let puck_moved = distance(s.puck, centre) > view.puck.radius() * ai.race_puck_moved_radii;
        if distance(pos, centre) > view.arena.width * ai.race_commitment_factor && !puck_moved {
            return decision.with(
                Action::Steer { heading: angle_to(pos, centre), force: s.pace * ai.race_force },
                Strategy::RaceForPuck,
                Activity::RacingForPuck,
            );
        }
        decision.opening = Opening::None;
        decision.initial_dive_target_met = true;
        decision.strategy = Strategy::GetPuckPosition;
        decision.activity = Activity::ChasingPositioning;
    }

    if s.possessing {
        return carry(view, me, s, decision);
    }

    let force = s.pace * ai.submerged_force;
    if let Some(carrier) = s.carrier {
        let carrier_pos = carrier.body.position;
        if s.puck_in_defensive_zone || s.puck_in_goal_zone {
            return decision.with(
                Action::Steer { heading: angle_to(pos, carrier_pos), force },
                Strategy::DefendGoalAggressive,
                Activity::PressuringCarrier,
            );
        }
        if me.role.is_back() {
            let to_goal = angle_to(carrier_pos, view.arena.own_goal(me.team));
            let lead = view.config.body.player_height * ai.intercept_lead_lengths;
            let (ux, uy) = unit(to_goal);
            let target = (carrier_pos.0 + ux * lead, carrier_pos.1 + uy * lead);
            return decision.with(
                Action::Steer { heading: angle_to(pos, target), force },
                Strategy::DefendGoal,
                Activity::Intercepting,
            );
        }
        return decision.with(
            Action::Steer { heading: angle_to(pos, carrier_pos), force },
            Strategy::PressurePuck,
            Activity::PressuringCarrier,
        );
    }

    // loose puck
    if s.puck_in_defensive_zone || s.puck_in_goal_zone {
        return decision.with(
            Action::Steer { heading: angle_to(pos, s.puck), force },
            Strategy::DefendLoosePuck,
            Activity::ChasingDefensive,
        );
    }

    let mid = view.arena.height / 2.0;
    let band = view.arena.height * ai.wing_side_factor;
    let puck_left = s.puck.1 < mid - band;
    let puck_right = s.puck.1 > mid + band;
    let off_wing = match me.role.lane() {
        Lane::Left => puck_right,
        Lane::Right => puck_left,
        Lane::Center => false,
    };

    if off_wing {
        if me.breath < view.config.breath.max_breath * ai.off_wing_surface_share {
            return decision.with(
                Action::Surface { dump: None },
                Strategy::SurfacingOffWing,
                Activity::RepositioningCenter,
            );
        }
        let formation = view.formation_target(me);
        let target = ((pos.0 + formation.0) * 0.5, (pos.1 + mid) * 0.5);
        return decision.with(
            Action::Steer { heading: angle_to(pos, target), force },
            Strategy::RecoverOffWing,
            Activity::RepositioningCenter,
        );
    }

    let formation = view.formation_target(me);
    let mut formation_weight = ai.formation_weight
        * (s.dist_to_puck / (view.arena.width * ai.formation_falloff_factor)).min(1.0);
    if me.role.is_back() {
        formation_weight *= ai.back_formation_boost;
    }
    let heading = blend(
        angle_to(pos, s.puck),
        1.0 - formation_weight,
        angle_to(pos, formation),
        formation_weight,
    );
    decision.with(
        Action::Steer { heading, force },
        Strategy::GetPuckPosition,
        Activity::ChasingPositioning,
    )
}

/// Carrier play: shoot in range, clear from the own half, otherwise push on goal
fn carry(view: &WorldView<'_>, me: &Player, s: &Situation<'_>, decision: Decision) -> Decision {
    let ai = &view.config.ai;
    let arena = view.arena;
    let pos = me.body.position;
    let goal = arena.attacking_goal(me.team);
    let in_own_half = arena.in_own_half(me.team, pos.0);

    if !in_own_half && distance(pos, goal) < arena.goal_depth * ai.goal_shot_range_depths {
        return decision.with(
            Action::Release(toward_goal(view, me, ReleaseKind::Shot)),
            Strategy::ShootOnGoal,
            Activity::Shooting,
        );
    }

    let (target_heading, strategy, activity) = if in_own_half || s.puck_in_goal_zone {
        let r = me.body.radius;
        let sideline = if pos.1 < arena.height / 2.0 { r } else { arena.height - r };
        let clear_point = (pos.0 + (goal.0 - pos.0) * ai.clear_upfield_bias, sideline);
        (angle_to(pos, clear_point), Strategy::ClearPuck, Activity::ClearingPuck)
    } else {
        (angle_to(pos, goal), Strategy::AttackGoal, Activity::PushingToGoal)
    };

    let radius = me.body.radius;
    let evasion = Evasion {
        avoid_distance: radius * ai.avoidance_radii,
        juke_distance: radius * ai.lateral_maneuver_radii,
        juke_angle: ai.lateral_maneuver_angle,
        juke_weight: ai.lateral_weight,
        avoid_weight: ai.avoidance_weight,
    };
    let bent = evade(pos, target_heading, view.nearest_submerged_opponent(me), &evasion);
    let activity = match bent {
        Evade::Clear(_) => activity,
        Evade::Juke(_) => Activity::PushingManeuvering,
        Evade::Avoid(_) => Activity::PushingAvoiding,
    };
    decision.with(
        Action::Steer { heading: bent.heading(), force: s.pace * ai.carry_force },
        strategy,
        activity,
    )
}
