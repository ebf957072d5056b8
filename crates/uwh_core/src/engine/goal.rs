//! Goal detection
//!
//! ## Rules
//! - Left goal (x = 0) is White's; a puck there scores for Black.
//! - Right goal (x = width) is Black's; a puck there scores for White.
//! - The puck's leading edge must be past the goal line, which sits
//!   `goal_depth` in from the wall.
//! - Vertical position must lie strictly inside the goal mouth band.

use super::arena::Arena;
use super::geometry::Vec2;
use super::team::Team;

/// Team credited with a goal for a puck at `pos`, if any
pub fn check_goal(arena: &Arena, pos: Vec2, puck_radius: f32) -> Option<Team> {
    let (band_min, band_max) = arena.goal_band();
    if !(pos.1 > band_min && pos.1 < band_max) {
        return None;
    }
    if pos.0 + puck_radius < arena.goal_depth {
        Some(Team::Black)
    } else if pos.0 - puck_radius > arena.width - arena.goal_depth {
        Some(Team::White)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_goal_scores_for_black() {
        let arena = Arena::default();
        assert_eq!(check_goal(&arena, (8.0, 250.0), 6.0), Some(Team::Black));
    }

    #[test]
    fn test_right_goal_scores_for_white() {
        let arena = Arena::default();
        assert_eq!(check_goal(&arena, (792.0, 250.0), 6.0), Some(Team::White));
    }

    #[test]
    fn test_edge_must_pass_line() {
        let arena = Arena::default();
        // x + r == goal_depth is not past the line
        assert_eq!(check_goal(&arena, (9.0, 250.0), 6.0), None);
        assert_eq!(check_goal(&arena, (791.0, 250.0), 6.0), None);
    }

    #[test]
    fn test_band_is_exclusive() {
        let arena = Arena::default();
        assert_eq!(check_goal(&arena, (8.0, 200.0), 6.0), None);
        assert_eq!(check_goal(&arena, (8.0, 300.0), 6.0), None);
        assert_eq!(check_goal(&arena, (8.0, 200.5), 6.0), Some(Team::Black));
    }

    #[test]
    fn test_midfield_never_scores() {
        let arena = Arena::default();
        assert_eq!(check_goal(&arena, (400.0, 250.0), 6.0), None);
    }
}
