//! Possession and contact resolution
//!
//! Only submerged players interact with the puck or with each other;
//! surfaced players float above play.

use tracing::debug;

use super::arena::Arena;
use super::geometry::{angle_to, distance, unit};
use super::player::{Player, PlayerId};
use super::puck::Puck;
use crate::config::{BodyConfig, PossessionConfig};

/// Possession handover observed during a resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PossessionChange {
    pub from: Option<PlayerId>,
    pub to: PlayerId,
}

/// Advance the puck one tick: ride the carrier's stick, or glide and bounce
/// off submerged players when loose.
pub fn step_puck(
    puck: &mut Puck,
    players: &[Player],
    arena: &Arena,
    body: &BodyConfig,
    stick: &PossessionConfig,
) {
    let carrier = puck.possessor.map(|id| &players[id.0]);
    match carrier {
        Some(p) if p.is_underwater => {
            let target = p.stick_carry_point(body, stick, puck.radius());
            puck.ride(target, arena, body, stick);
        }
        _ => {
            // a surfaced carrier never keeps the puck
            puck.clear_possessor();
            puck.glide(arena, body);
            deflect_loose_puck(puck, players, stick);
        }
    }
}

/// Loose puck touching a submerged player is redirected away from them
fn deflect_loose_puck(puck: &mut Puck, players: &[Player], stick: &PossessionConfig) {
    for player in players.iter().filter(|p| p.is_underwater) {
        let pos = player.body.position;
        let d = distance(puck.body.position, pos);
        if d < puck.radius() + player.body.radius {
            let impact = angle_to(pos, puck.body.position);
            let speed = puck.body.speed() * stick.collision_dampen;
            let (ux, uy) = unit(impact);
            puck.body.velocity = (
                ux * speed + player.body.velocity.0 * stick.carry_velocity_share,
                uy * speed + player.body.velocity.1 * stick.carry_velocity_share,
            );
        }
    }
}

/// Stick-reach claims. Players are checked in roster order; a claim succeeds
/// on a loose puck or one held by the other team, and the dispossessed holder
/// is pushed away from the claimer.
pub fn resolve_possession(
    players: &mut [Player],
    puck: &mut Puck,
    body: &BodyConfig,
    stick: &PossessionConfig,
) -> Vec<PossessionChange> {
    let mut changes = Vec::new();
    let reach = stick.stick_length * 0.5 + puck.radius();

    for i in 0..players.len() {
        if !players[i].is_underwater {
            continue;
        }
        let tip = players[i].stick_reach_point(body, stick);
        if distance(tip, puck.body.position) >= reach {
            continue;
        }
        let claimer = players[i].id;
        let team = players[i].team;
        let previous = puck.possessor;
        match previous {
            Some(holder) if players[holder.0].team == team => continue,
            Some(holder) => {
                let claimer_pos = players[i].body.position;
                let h = &mut players[holder.0];
                h.body.apply_force(
                    (h.body.position.0 - claimer_pos.0) * stick.dispossess_impulse,
                    (h.body.position.1 - claimer_pos.1) * stick.dispossess_impulse,
                );
            }
            None => {}
        }
        puck.set_possessor(claimer);
        debug!(player = %claimer, from = ?previous, "possession claimed");
        changes.push(PossessionChange { from: previous, to: claimer });
    }
    changes
}

/// Push apart submerged pairs closer than their radius sum plus a margin
pub fn separate_players(players: &mut [Player], stick: &PossessionConfig) {
    for i in 0..players.len() {
        for j in (i + 1)..players.len() {
            if !players[i].is_underwater || !players[j].is_underwater {
                continue;
            }
            let a = players[i].body.position;
            let b = players[j].body.position;
            let d = distance(a, b);
            let min_dist = players[i].body.radius + players[j].body.radius + stick.repulsion_margin;
            if d < min_dist && d > 0.1 {
                let (ux, uy) = unit(angle_to(a, b));
                let force = (min_dist - d) * stick.repulsion;
                players[i].body.apply_force(-ux * force, -uy * force);
                players[j].body.apply_force(ux * force, uy * force);
            }
        }
    }
}
