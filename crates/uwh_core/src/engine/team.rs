//! Team, role and handedness identity
//!
//! White attacks the right-hand goal (x = width), Black the left (x = 0).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum Team {
    White,
    Black,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::White, Team::Black];

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// Score array slot (0 = White, 1 = Black)
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Team::White => 0,
            Team::Black => 1,
        }
    }

    /// +1 when attacking toward +x
    #[inline]
    pub const fn direction(self) -> f32 {
        match self {
            Team::White => 1.0,
            Team::Black => -1.0,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => write!(f, "White"),
            Team::Black => write!(f, "Black"),
        }
    }
}

/// Six-a-side formation roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Role {
    #[serde(rename = "LF")]
    LeftForward,
    #[serde(rename = "CF")]
    CenterForward,
    #[serde(rename = "RF")]
    RightForward,
    #[serde(rename = "LB")]
    LeftBack,
    #[serde(rename = "CB")]
    CenterBack,
    #[serde(rename = "RB")]
    RightBack,
}

/// Lateral lane of a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Role {
    /// Formation order; also the status board order
    pub const FORMATION: [Role; 6] = [
        Role::LeftForward,
        Role::CenterForward,
        Role::RightForward,
        Role::LeftBack,
        Role::CenterBack,
        Role::RightBack,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Role::LeftForward => "LF",
            Role::CenterForward => "CF",
            Role::RightForward => "RF",
            Role::LeftBack => "LB",
            Role::CenterBack => "CB",
            Role::RightBack => "RB",
        }
    }

    pub const fn is_forward(self) -> bool {
        matches!(self, Role::LeftForward | Role::CenterForward | Role::RightForward)
    }

    pub const fn is_back(self) -> bool {
        !self.is_forward()
    }

    pub const fn lane(self) -> Lane {
        match self {
            Role::LeftForward | Role::LeftBack => Lane::Left,
            Role::CenterForward | Role::CenterBack => Lane::Center,
            Role::RightForward | Role::RightBack => Lane::Right,
        }
    }

    /// Forward a back shadows during the opening (LB→LF, CB→CF, RB→RF)
    pub const fn shadowed_forward(self) -> Option<Role> {
        match self {
            Role::LeftBack => Some(Role::LeftForward),
            Role::CenterBack => Some(Role::CenterForward),
            Role::RightBack => Some(Role::RightForward),
            _ => None,
        }
    }

    /// Position in `FORMATION`
    pub fn order(self) -> usize {
        Role::FORMATION.iter().position(|r| *r == self).unwrap_or(Role::FORMATION.len())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Handedness {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl Handedness {
    /// Stick extends to +1 (right of facing) or -1 (left)
    pub const fn stick_side(self) -> f32 {
        match self {
            Handedness::Right => 1.0,
            Handedness::Left => -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_lines() {
        let forwards: Vec<_> = Role::FORMATION.iter().filter(|r| r.is_forward()).collect();
        assert_eq!(forwards.len(), 3);
        assert!(Role::CenterBack.is_back());
        assert_eq!(Role::CenterBack.lane(), Lane::Center);
        assert_eq!(Role::RightBack.lane(), Lane::Right);
    }

    #[test]
    fn test_shadowed_forward_pairs_lanes() {
        for role in Role::FORMATION.iter().filter(|r| r.is_back()) {
            let fwd = role.shadowed_forward().unwrap();
            assert!(fwd.is_forward());
            assert_eq!(fwd.lane(), role.lane());
        }
        assert_eq!(Role::CenterForward.shadowed_forward(), None);
    }

    #[test]
    fn test_role_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Role::CenterBack).unwrap(), "\"CB\"");
        assert_eq!(serde_json::to_string(&Handedness::Left).unwrap(), "\"L\"");
    }

    #[test]
    fn test_team_geometry() {
        assert_eq!(Team::White.opponent(), Team::Black);
        assert_eq!(Team::Black.direction(), -1.0);
        assert_eq!(Team::Black.index(), 1);
    }
}
