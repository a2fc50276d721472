//! Roster errors.
//!
//! Every error is local and recoverable: a rejected intent leaves the roster
//! as it was and the caller may retry with corrected input.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::id::PlayerId;
use crate::roster::team::{TeamName, TEAM_SIZE};

/// Reasons a roster operation can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Malformed or missing required input.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Player is not where the caller said it would be.
    #[error("player {player_id} not found in {scope}")]
    NotFound {
        /// Player that was looked up.
        player_id: PlayerId,
        /// Container that was searched ("waiting", "roster", ...).
        scope: String,
    },

    /// Slot index outside the team.
    #[error("slot index {index} out of range (expected 0..{})", TEAM_SIZE)]
    Range {
        /// Requested index (may be negative when parsed from text).
        index: i64,
    },

    /// Team name that is neither of the two teams.
    #[error("unknown team: {0}")]
    UnknownTeam(String),

    /// Add-to-team with every slot taken.
    #[error("team {team} has no empty slot")]
    NoCapacity {
        /// Full team.
        team: TeamName,
    },

    /// Edit redestination onto a slot held by someone else.
    #[error("slot {slot} of team {team} is occupied by player {occupant}")]
    Conflict {
        /// Target team.
        team: TeamName,
        /// Target slot.
        slot: usize,
        /// Current holder of the slot.
        occupant: PlayerId,
    },
}

impl RosterError {
    /// Stable code for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::Validation(_) => ErrorKind::Validation,
            RosterError::NotFound { .. } => ErrorKind::NotFound,
            RosterError::Range { .. } => ErrorKind::Range,
            RosterError::UnknownTeam(_) => ErrorKind::UnknownTeam,
            RosterError::NoCapacity { .. } => ErrorKind::NoCapacity,
            RosterError::Conflict { .. } => ErrorKind::Conflict,
        }
    }

    pub(crate) fn range(index: usize) -> Self {
        RosterError::Range { index: index as i64 }
    }
}

/// Error codes a presentation layer can map to user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad or missing attribute.
    Validation,
    /// Player absent from the expected container.
    NotFound,
    /// Slot index outside [0, 6).
    Range,
    /// Unrecognized team name.
    UnknownTeam,
    /// Team is full.
    NoCapacity,
    /// Target slot held by another player.
    Conflict,
}

/// A broken structural invariant, found while checking a restored roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Same identity in more than one place.
    #[error("player {0} appears in more than one location")]
    DuplicatePlayer(PlayerId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(RosterError::Validation("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(RosterError::range(9).kind(), ErrorKind::Range);
        assert_eq!(
            RosterError::NoCapacity { team: TeamName::Pupsiki }.kind(),
            ErrorKind::NoCapacity
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RosterError::Range { index: -1 }.to_string(),
            "slot index -1 out of range (expected 0..6)"
        );
        assert_eq!(
            RosterError::NoCapacity { team: TeamName::Gandony }.to_string(),
            "team gandony has no empty slot"
        );
    }

    #[test]
    fn test_error_kind_codes() {
        let json = serde_json::to_string(&ErrorKind::UnknownTeam).unwrap();
        assert_eq!(json, "\"unknown_team\"");
    }
}
