//! Roster generation and wall line-up
//!
//! Skills are drawn once from a seeded `ChaCha8Rng`, so the same seed always
//! produces the same teams. Roles cycle through the formation; the strongest
//! forward and back of each team are then swapped into the centre roles.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Bernoulli, Distribution};
use tracing::debug;

use super::arena::Arena;
use super::geometry::Vec2;
use super::player::{Player, PlayerId, SkillProfile};
use super::team::{Handedness, Role, Team};
use crate::config::SimConfig;
use crate::error::{Result, SimError};

/// Build both teams (White first), centre swap applied
pub fn generate_roster(config: &SimConfig, rng: &mut ChaCha8Rng) -> Result<Vec<Player>> {
    let skill = &config.skill;
    let left_handed = Bernoulli::new(skill.left_handed_probability).map_err(|e| {
        SimError::invalid_config("skill.left_handed_probability", e.to_string())
    })?;
    let radius = config.body.player_radius();

    let mut players = Vec::with_capacity(config.rules.players_per_team * 2);
    for team in Team::ALL {
        let first = players.len();
        for i in 0..config.rules.players_per_team {
            let role = Role::FORMATION[i % Role::FORMATION.len()];
            let profile = SkillProfile {
                base_speed: skill.base_speed
                    * rng.gen_range(skill.speed_multiplier_min..skill.speed_multiplier_max),
                flick_strength: rng.gen_range(skill.flick_strength_min..skill.flick_strength_max),
                max_breath_seconds: rng.gen_range(
                    config.breath.min_breath_seconds..config.breath.max_breath_seconds,
                ),
                handedness: if left_handed.sample(rng) {
                    Handedness::Left
                } else {
                    Handedness::Right
                },
            };
            let id = PlayerId(players.len());
            players.push(Player::new(id, team, role, profile, radius, config.breath.max_breath));
        }
        let team_slice = &mut players[first..];
        promote_strongest(team_slice, Role::CenterForward, Role::is_forward);
        promote_strongest(team_slice, Role::CenterBack, Role::is_back);
    }
    Ok(players)
}

/// Swap the strongest player of a line into `centre`, only with a full line of three
fn promote_strongest(team: &mut [Player], centre: Role, in_line: fn(Role) -> bool) {
    let line: Vec<usize> = (0..team.len()).filter(|&i| in_line(team[i].role)).collect();
    if line.len() < 3 {
        return;
    }
    let Some(current) = line.iter().copied().find(|&i| team[i].role == centre) else {
        return;
    };
    // first maximum wins ties, matching a stable descending sort
    let mut strongest = line[0];
    for &i in &line[1..] {
        if team[i].skill.strength() > team[strongest].skill.strength() {
            strongest = i;
        }
    }
    if strongest != current {
        let old_role = team[strongest].role;
        team[strongest].role = centre;
        team[current].role = old_role;
        debug!(
            team = %team[strongest].team,
            from = %old_role,
            to = %centre,
            "promoted strongest player to centre role"
        );
    }
}

/// Wall line-up spot for a role: centre forward on the midline, others spread out
pub fn lineup_position(
    arena: &Arena,
    team: Team,
    role: Role,
    radius: f32,
    spread: f32,
    wall_gap: f32,
) -> Vec2 {
    let x = match team {
        Team::White => radius + wall_gap,
        Team::Black => arena.width - radius - wall_gap,
    };
    let steps = match role {
        Role::CenterForward => 0.0,
        Role::LeftForward => -1.0,
        Role::RightForward => 1.0,
        Role::LeftBack => -2.0,
        Role::CenterBack => 2.0,
        Role::RightBack => 3.0,
    };
    let y = (arena.height / 2.0 + spread * steps)
        .max(radius + 2.0)
        .min(arena.height - radius - 2.0);
    (x, y)
}

/// Status board order: team (White first), then formation role order
pub fn status_order(players: &[Player]) -> Vec<PlayerId> {
    let mut ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    ids.sort_by_key(|id| {
        let p = &players[id.0];
        (p.team, p.role.order(), p.id)
    });
    ids
}
