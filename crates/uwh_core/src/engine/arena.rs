//! Pool geometry: bounds, halves, zones
//!
//! Origin is the top-left corner; x grows toward the right (White attacks
//! there), y grows downward.

use serde::{Deserialize, Serialize};

use super::geometry::Vec2;
use super::team::Team;
use crate::config::ArenaConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub goal_width: f32,
    pub goal_depth: f32,
}

impl Arena {
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            goal_width: config.goal_width,
            goal_depth: config.goal_depth,
        }
    }

    /// Update the bounding rectangle; goal geometry is unchanged
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Goal mouth vertical band (exclusive bounds)
    pub fn goal_band(&self) -> (f32, f32) {
        let mid = self.height / 2.0;
        let half = self.goal_width / 2.0;
        (mid - half, mid + half)
    }

    /// Centre of the goal `team` shoots at
    pub fn attacking_goal(&self, team: Team) -> Vec2 {
        match team {
            Team::White => (self.width, self.height / 2.0),
            Team::Black => (0.0, self.height / 2.0),
        }
    }

    /// Centre of the goal `team` defends
    pub fn own_goal(&self, team: Team) -> Vec2 {
        self.attacking_goal(team.opponent())
    }

    /// Whether `x` lies in the half `team` defends
    pub fn in_own_half(&self, team: Team, x: f32) -> bool {
        match team {
            Team::White => x < self.width / 2.0,
            Team::Black => x > self.width / 2.0,
        }
    }

    /// x of the line bounding `team`'s defensive zone (`factor` of the width)
    pub fn defensive_line(&self, team: Team, factor: f32) -> f32 {
        match team {
            Team::White => self.width * factor,
            Team::Black => self.width * (1.0 - factor),
        }
    }

    pub fn in_defensive_zone(&self, team: Team, x: f32, factor: f32) -> bool {
        let line = self.defensive_line(team, factor);
        match team {
            Team::White => x < line,
            Team::Black => x > line,
        }
    }

    /// Whether a puck centred at `x` sits in `team`'s own goal tray
    pub fn in_goal_zone(&self, team: Team, x: f32, puck_radius: f32) -> bool {
        match team {
            Team::White => x < self.goal_depth + puck_radius,
            Team::Black => x > self.width - self.goal_depth - puck_radius,
        }
    }

    /// Clamp a point so a body of `radius` fits inside the pool
    pub fn clamp_inside(&self, p: Vec2, radius: f32) -> Vec2 {
        (
            p.0.max(radius).min(self.width - radius),
            p.1.max(radius).min(self.height - radius),
        )
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(&ArenaConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_band_centred() {
        let arena = Arena::default();
        assert_eq!(arena.goal_band(), (200.0, 300.0));
    }

    #[test]
    fn test_goals_face_each_other() {
        let arena = Arena::default();
        assert_eq!(arena.attacking_goal(Team::White), (800.0, 250.0));
        assert_eq!(arena.own_goal(Team::White), (0.0, 250.0));
        assert_eq!(arena.attacking_goal(Team::Black), arena.own_goal(Team::White));
    }

    #[test]
    fn test_zones_mirror() {
        let arena = Arena::default();
        assert!(arena.in_own_half(Team::White, 100.0));
        assert!(!arena.in_own_half(Team::Black, 100.0));
        assert!(arena.in_defensive_zone(Team::White, 200.0, 0.3));
        assert!(arena.in_defensive_zone(Team::Black, 600.0, 0.3));
        assert!(!arena.in_defensive_zone(Team::Black, 500.0, 0.3));
        assert!(arena.in_goal_zone(Team::Black, 785.0, 6.0));
    }

    #[test]
    fn test_resize_keeps_goal_geometry() {
        let mut arena = Arena::default();
        arena.resize(1000.0, 625.0);
        assert_eq!(arena.center(), (500.0, 312.5));
        assert_eq!(arena.goal_width, 100.0);
    }
}
