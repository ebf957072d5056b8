//! Player body, identity, skills and breath
//!
//! ## Breath rules
//! ```text
//! submerged: breath -= consumption        (0 → forced surface)
//! surfaced:  breath += recovery * max(0, 1 - penalty * speed / base_speed)
//! dive():    only at breath == max and surfaced
//! surface(): always legal, drops the puck if carried
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::body::KinematicBody;
use super::geometry::{local_offset, Vec2};
use super::puck::Puck;
use super::team::{Handedness, Role, Team};
use crate::config::{BodyConfig, BreathConfig, PossessionConfig};

/// Index of a player in the match roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Attributes drawn once at roster creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub base_speed: f32,
    pub flick_strength: f32,
    pub max_breath_seconds: f32,
    pub handedness: Handedness,
}

impl SkillProfile {
    /// Ranking key for the centre-role swap
    pub fn strength(&self) -> f32 {
        self.base_speed * self.flick_strength
    }
}

/// One-shot behaviour armed when play starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opening {
    /// No opening behaviour pending
    None,
    /// Forward racing to the centre puck
    Race,
    /// Back shadowing its lane's forward
    Follow,
}

/// High-level plan label shown on the status board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Strategy {
    Positioning,
    RecoverReposition,
    FollowForward,
    RaceForPuck,
    GetPuckPosition,
    Surfacing,
    FlickPuck,
    ShootOnGoal,
    ClearPuck,
    AttackGoal,
    DefendGoalAggressive,
    DefendGoal,
    PressurePuck,
    DefendLoosePuck,
    RecoverOffWing,
    SurfacingOffWing,
}

impl Strategy {
    pub const fn label(self) -> &'static str {
        match self {
            Strategy::Positioning => "Positioning",
            Strategy::RecoverReposition => "Recover/Reposition",
            Strategy::FollowForward => "Follow Forward",
            Strategy::RaceForPuck => "Race for Puck",
            Strategy::GetPuckPosition => "Get Puck/Position",
            Strategy::Surfacing => "Surfacing",
            Strategy::FlickPuck => "Flick Puck",
            Strategy::ShootOnGoal => "Shoot on Goal",
            Strategy::ClearPuck => "Clear Puck",
            Strategy::AttackGoal => "Attack Goal",
            Strategy::DefendGoalAggressive => "Defend Goal (Aggressive)",
            Strategy::DefendGoal => "Defend Goal",
            Strategy::PressurePuck => "Pressure Puck",
            Strategy::DefendLoosePuck => "Defend Loose Puck",
            Strategy::RecoverOffWing => "Recover Off-Wing",
            Strategy::SurfacingOffWing => "Surfacing (Off-Wing)",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the player is doing right now, shown on the status board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Activity {
    Initializing,
    WaitingAtWall,
    WaitingSurface,
    OutOfBreath,
    CriticalBreath,
    LowBreathFlick,
    FollowingForward,
    DivingForPuck,
    DivingDefensive,
    RecoveringBreath,
    PositioningSurface,
    RacingForPuck,
    ChasingPositioning,
    Shooting,
    ClearingPuck,
    PushingToGoal,
    PushingManeuvering,
    PushingAvoiding,
    PressuringCarrier,
    Intercepting,
    ChasingDefensive,
    RepositioningCenter,
}

impl Activity {
    pub const fn label(self) -> &'static str {
        match self {
            Activity::Initializing => "Initializing",
            Activity::WaitingAtWall => "Waiting at Wall",
            Activity::WaitingSurface => "Waiting (Surface)",
            Activity::OutOfBreath => "Out of Breath",
            Activity::CriticalBreath => "Critical Breath",
            Activity::LowBreathFlick => "Low Breath Flick",
            Activity::FollowingForward => "Following Forward",
            Activity::DivingForPuck => "Diving for Puck",
            Activity::DivingDefensive => "Diving (Defensive)",
            Activity::RecoveringBreath => "Recovering Breath",
            Activity::PositioningSurface => "Positioning (Surface)",
            Activity::RacingForPuck => "Racing for Puck",
            Activity::ChasingPositioning => "Chasing/Positioning",
            Activity::Shooting => "Shooting",
            Activity::ClearingPuck => "Clearing Puck",
            Activity::PushingToGoal => "Pushing to Goal",
            Activity::PushingManeuvering => "Pushing (Maneuvering)",
            Activity::PushingAvoiding => "Pushing (Avoiding)",
            Activity::PressuringCarrier => "Pressuring Carrier",
            Activity::Intercepting => "Intercepting",
            Activity::ChasingDefensive => "Chasing (Defensive)",
            Activity::RepositioningCenter => "Repositioning Center",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) team: Team,
    pub(crate) role: Role,
    pub(crate) body: KinematicBody,
    pub(crate) skill: SkillProfile,
    pub(crate) breath: f32,
    pub(crate) is_underwater: bool,
    pub(crate) strategy: Strategy,
    pub(crate) activity: Activity,
    pub(crate) opening: Opening,
    pub(crate) initial_dive_target_met: bool,
}

impl Player {
    pub fn new(
        id: PlayerId,
        team: Team,
        role: Role,
        skill: SkillProfile,
        radius: f32,
        max_breath: f32,
    ) -> Self {
        Self {
            id,
            team,
            role,
            body: KinematicBody::new((0.0, 0.0), radius, Self::home_facing(team)),
            skill,
            breath: max_breath,
            is_underwater: false,
            strategy: Strategy::Positioning,
            activity: Activity::Initializing,
            opening: Opening::None,
            initial_dive_target_met: false,
        }
    }

    /// Facing toward the opponent goal
    pub fn home_facing(team: Team) -> f32 {
        match team {
            Team::White => 0.0,
            Team::Black => std::f32::consts::PI,
        }
    }

    // ========================
    // Read access
    // ========================

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn skill(&self) -> &SkillProfile {
        &self.skill
    }

    pub fn breath(&self) -> f32 {
        self.breath
    }

    pub fn is_underwater(&self) -> bool {
        self.is_underwater
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn opening(&self) -> Opening {
        self.opening
    }

    pub fn initial_dive_target_met(&self) -> bool {
        self.initial_dive_target_met
    }

    /// Remaining breath converted to this player's hold duration
    pub fn breath_seconds(&self, max_breath: f32) -> f32 {
        self.breath / max_breath * self.skill.max_breath_seconds
    }

    // ========================
    // Breath
    // ========================

    /// Per-tick breath update. Returns true when an empty lung forced a surface.
    pub fn manage_breath(&mut self, config: &BreathConfig, puck: &mut Puck) -> bool {
        if self.is_underwater {
            self.breath -= config.consumption_rate;
            if self.breath <= 0.0 {
                self.breath = 0.0;
                self.surface(puck);
                self.activity = Activity::OutOfBreath;
                return true;
            }
        } else {
            let speed_factor = self.body.speed() / self.skill.base_speed;
            let multiplier = (1.0 - speed_factor * config.recovery_speed_penalty).max(0.0);
            self.breath = (self.breath + config.recovery_rate * multiplier).min(config.max_breath);
        }
        false
    }

    /// Submerge; only legal on full breath while surfaced
    pub fn dive(&mut self, max_breath: f32) -> bool {
        if self.breath >= max_breath && !self.is_underwater {
            self.is_underwater = true;
            self.initial_dive_target_met = false;
            true
        } else {
            false
        }
    }

    /// Come up for air, dropping the puck if carried. Returns true if it was.
    pub fn surface(&mut self, puck: &mut Puck) -> bool {
        self.is_underwater = false;
        if puck.is_held_by(self.id) {
            puck.clear_possessor();
            true
        } else {
            false
        }
    }

    // ========================
    // Stick geometry
    // ========================

    /// Centre of the stick's reach area, used for possession claims
    pub fn stick_reach_point(&self, body: &BodyConfig, stick: &PossessionConfig) -> Vec2 {
        let forward = body.player_height * 0.5 + stick.stick_length * 0.5;
        let side = body.player_width / 2.0 * self.skill.handedness.stick_side();
        local_offset(self.body.position, self.body.facing, forward, side)
    }

    /// Point just beyond the stick tip that a carried puck is pulled to
    pub fn stick_carry_point(
        &self,
        body: &BodyConfig,
        stick: &PossessionConfig,
        puck_radius: f32,
    ) -> Vec2 {
        let forward = body.player_height * 0.4 + stick.stick_length + puck_radius;
        let side = (body.player_width / 2.0 + 2.0) * self.skill.handedness.stick_side();
        local_offset(self.body.position, self.body.facing, forward, side)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_skill() -> SkillProfile {
        SkillProfile {
            base_speed: 1.6,
            flick_strength: 1.0,
            max_breath_seconds: 20.0,
            handedness: Handedness::Right,
        }
    }

    pub(crate) fn test_player(id: usize, team: Team, role: Role, pos: Vec2) -> Player {
        let mut p = Player::new(PlayerId(id), team, role, test_skill(), 15.0, 100.0);
        p.body.place(pos, Player::home_facing(team));
        p
    }

    #[test]
    fn test_dive_requires_full_breath() {
        let mut p = test_player(0, Team::White, Role::CenterForward, (100.0, 100.0));
        p.breath = 99.9;
        assert!(!p.dive(100.0));
        assert!(!p.is_underwater);

        p.breath = 100.0;
        assert!(p.dive(100.0));
        assert!(p.is_underwater);
        assert!(!p.initial_dive_target_met);

        // already submerged: no-op
        assert!(!p.dive(100.0));
    }

    #[test]
    fn test_breath_drains_and_forces_surface() {
        let cfg = BreathConfig::default();
        let mut puck = Puck::new((400.0, 250.0), 6.0);
        let mut p = test_player(0, Team::White, Role::CenterForward, (100.0, 100.0));
        p.dive(cfg.max_breath);
        puck.set_possessor(p.id);
        p.breath = 1.0;

        assert!(!p.manage_breath(&cfg, &mut puck));
        assert!((p.breath - 0.4).abs() < 1e-5);
        assert!(p.manage_breath(&cfg, &mut puck));
        assert_eq!(p.breath, 0.0);
        assert!(!p.is_underwater);
        assert!(puck.is_loose());
    }

    #[test]
    fn test_recovery_slows_with_speed() {
        let cfg = BreathConfig::default();
        let mut puck = Puck::new((400.0, 250.0), 6.0);

        let mut still = test_player(0, Team::White, Role::LeftBack, (100.0, 100.0));
        still.breath = 50.0;
        still.manage_breath(&cfg, &mut puck);
        assert!((still.breath - 51.8).abs() < 1e-4);

        let mut moving = test_player(1, Team::White, Role::LeftBack, (100.0, 100.0));
        moving.breath = 50.0;
        moving.body.velocity = (0.8, 0.0); // half base speed → multiplier 0.25
        moving.manage_breath(&cfg, &mut puck);
        assert!((moving.breath - 50.45).abs() < 1e-4);

        let mut sprinting = test_player(2, Team::White, Role::LeftBack, (100.0, 100.0));
        sprinting.breath = 50.0;
        sprinting.body.velocity = (1.6, 0.0);
        sprinting.manage_breath(&cfg, &mut puck);
        assert_eq!(sprinting.breath, 50.0);
    }

    #[test]
    fn test_recovery_capped_at_max() {
        let cfg = BreathConfig::default();
        let mut puck = Puck::new((400.0, 250.0), 6.0);
        let mut p = test_player(0, Team::Black, Role::RightBack, (100.0, 100.0));
        p.breath = 99.5;
        p.manage_breath(&cfg, &mut puck);
        assert_eq!(p.breath, cfg.max_breath);
    }

    #[test]
    fn test_surface_twice_is_noop() {
        let mut puck = Puck::new((400.0, 250.0), 6.0);
        let mut p = test_player(0, Team::White, Role::CenterBack, (120.0, 80.0));
        p.body.velocity = (0.3, -0.2);
        p.breath = 42.0;
        p.surface(&mut puck);
        let before = p.clone();
        assert!(!p.surface(&mut puck));
        assert_eq!(p, before);
    }

    #[test]
    fn test_surface_only_drops_own_possession() {
        let mut puck = Puck::new((400.0, 250.0), 6.0);
        let mut a = test_player(0, Team::White, Role::CenterForward, (100.0, 100.0));
        let b = test_player(1, Team::Black, Role::CenterForward, (300.0, 100.0));
        puck.set_possessor(b.id);
        a.dive(100.0);
        assert!(!a.surface(&mut puck));
        assert_eq!(puck.possessor(), Some(b.id));
    }

    #[test]
    fn test_stick_side_follows_handedness() {
        let body = BodyConfig::default();
        let stick = PossessionConfig::default();
        let right = test_player(0, Team::White, Role::CenterForward, (100.0, 100.0));
        let mut left = right.clone();
        left.skill.handedness = Handedness::Left;

        let r = right.stick_reach_point(&body, &stick);
        let l = left.stick_reach_point(&body, &stick);
        assert!((r.0 - 122.5).abs() < 1e-4);
        assert!((r.1 - 107.5).abs() < 1e-4);
        assert!((l.1 - 92.5).abs() < 1e-4);
    }

    #[test]
    fn test_breath_seconds_display() {
        let mut p = test_player(0, Team::White, Role::CenterForward, (100.0, 100.0));
        p.breath = 50.0;
        assert!((p.breath_seconds(100.0) - 10.0).abs() < 1e-5);
    }
}
