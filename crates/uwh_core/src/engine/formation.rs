//! Formation targets
//!
//! Anchor lines depend on which half the puck is in:
//!
//! | line     | puck in own half | puck in opponent half |
//! |----------|------------------|-----------------------|
//! | backs    | defensive line   | own midfield          |
//! | forwards | own midfield     | opponent midfield     |
//!
//! Forwards sit above the midline, backs below; left/right lanes shift
//! further. Lines are mirrored for Black.

use super::arena::Arena;
use super::geometry::Vec2;
use super::team::{Lane, Role, Team};
use crate::config::FormationConfig;

/// Line x for `team` given a White-perspective fraction of the width
fn line_x(arena: &Arena, team: Team, white_fraction: f32) -> f32 {
    match team {
        Team::White => arena.width * white_fraction,
        Team::Black => arena.width * (1.0 - white_fraction),
    }
}

/// Un-jittered formation anchor for `role`
pub fn formation_anchor(
    arena: &Arena,
    lines: &FormationConfig,
    team: Team,
    role: Role,
    puck: Vec2,
) -> Vec2 {
    let puck_home = arena.in_own_half(team, puck.0);
    let fraction = match (role.is_back(), puck_home) {
        (true, true) => lines.defensive_line,
        (true, false) => lines.own_midfield,
        (false, true) => lines.own_midfield,
        (false, false) => lines.opponent_midfield,
    };
    let x = line_x(arena, team, fraction);

    let mut y = arena.height / 2.0;
    if role.is_forward() {
        y -= arena.height * lines.line_offset;
    } else {
        y += arena.height * lines.line_offset;
    }
    match role.lane() {
        Lane::Left => y -= arena.width * lines.lane_offset,
        Lane::Right => y += arena.width * lines.lane_offset,
        Lane::Center => {}
    }
    (x, y)
}

/// Anchor plus jitter, clamped so a body of `radius` fits
pub fn formation_target(
    arena: &Arena,
    lines: &FormationConfig,
    team: Team,
    role: Role,
    puck: Vec2,
    jitter: Vec2,
    radius: f32,
) -> Vec2 {
    let (x, y) = formation_anchor(arena, lines, team, role, puck);
    arena.clamp_inside((x + jitter.0, y + jitter.1), radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backs_drop_when_puck_at_home() {
        let arena = Arena::default();
        let lines = FormationConfig::default();
        let (x, y) = formation_anchor(&arena, &lines, Team::White, Role::CenterBack, (100.0, 250.0));
        assert!((x - 160.0).abs() < 1e-4);
        assert!((y - 325.0).abs() < 1e-4);

        let (x, _) = formation_anchor(&arena, &lines, Team::White, Role::CenterBack, (700.0, 250.0));
        assert!((x - 320.0).abs() < 1e-4);
    }

    #[test]
    fn test_forwards_push_up() {
        let arena = Arena::default();
        let lines = FormationConfig::default();
        let (x, y) = formation_anchor(&arena, &lines, Team::White, Role::CenterForward, (700.0, 250.0));
        assert!((x - 480.0).abs() < 1e-4);
        assert!((y - 175.0).abs() < 1e-4);
    }

    #[test]
    fn test_black_mirrors_white() {
        let arena = Arena::default();
        let lines = FormationConfig::default();
        let white = formation_anchor(&arena, &lines, Team::White, Role::LeftBack, (100.0, 250.0));
        let black = formation_anchor(&arena, &lines, Team::Black, Role::LeftBack, (700.0, 250.0));
        assert!((white.0 - (arena.width - black.0)).abs() < 1e-3);
        assert_eq!(white.1, black.1);
    }

    #[test]
    fn test_lanes_shift_vertically() {
        let arena = Arena::default();
        let lines = FormationConfig::default();
        let left = formation_anchor(&arena, &lines, Team::White, Role::LeftForward, (400.0, 250.0));
        let right = formation_anchor(&arena, &lines, Team::White, Role::RightForward, (400.0, 250.0));
        // lane offset is a fraction of width: 120 each way
        assert!((right.1 - left.1 - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_configured_lines_move_anchor() {
        let arena = Arena::default();
        let lines = FormationConfig { defensive_line: 0.1, lane_offset: 0.0, ..Default::default() };
        let (x, y) = formation_anchor(&arena, &lines, Team::White, Role::LeftBack, (100.0, 250.0));
        assert!((x - 80.0).abs() < 1e-4);
        assert!((y - 325.0).abs() < 1e-4);
    }

    #[test]
    fn test_target_clamped_inside() {
        let arena = Arena::default();
        let lines = FormationConfig::default();
        // LF anchor y = 250 - 75 - 120 = 55; big negative jitter pushes it out
        let (_, y) = formation_target(
            &arena,
            &lines,
            Team::White,
            Role::LeftForward,
            (400.0, 250.0),
            (0.0, -60.0),
            15.0,
        );
        assert_eq!(y, 15.0);
    }
}
