//! Locations and destination directives.
//!
//! A presentation layer speaks in short text directives (`team:gandony`,
//! `team:pupsiki:slot:3`, `queue`). They are parsed here into typed values
//! before any roster operation runs.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::roster::error::RosterError;
use crate::roster::queue::QueueName;
use crate::roster::team::{TeamName, TEAM_SIZE};

/// Where a player currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    /// A team slot.
    Team {
        /// Team
        team: TeamName,
        /// Slot index in [0, 6)
        slot: usize,
    },
    /// A queue position.
    Queue {
        /// Queue
        queue: QueueName,
        /// Zero-based position
        position: usize,
    },
}

impl Location {
    /// Queue name, if this is a queue location.
    pub fn queue(&self) -> Option<QueueName> {
        match self {
            Location::Queue { queue, .. } => Some(*queue),
            Location::Team { .. } => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Team { team, slot } => write!(f, "team:{team}:slot:{slot}"),
            Location::Queue { queue, position } => write!(f, "queue:{queue}#{position}"),
        }
    }
}

/// Parse a slot index from text, range-checked.
fn parse_slot(s: &str) -> Result<usize, RosterError> {
    let index: i64 = s
        .trim()
        .parse()
        .map_err(|_| RosterError::Validation(format!("slot index is not a number: {s}")))?;
    if (0..TEAM_SIZE as i64).contains(&index) {
        Ok(index as usize)
    } else {
        Err(RosterError::Range { index })
    }
}

// =============================================================================
// ADD DESTINATION
// =============================================================================

/// Where a newly added player goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddDestination {
    /// Tail of the waiting queue.
    Waiting,
    /// Lowest empty slot of a team.
    Team(TeamName),
}

impl FromStr for AddDestination {
    type Err = RosterError;

    /// Accepts `queue`, `queue:waiting`, or `team:<name>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            ["queue"] | ["queue", "waiting"] => Ok(AddDestination::Waiting),
            ["queue", other] => Err(RosterError::Validation(format!(
                "new players can only join the waiting queue, not {other}"
            ))),
            ["team", team] => Ok(AddDestination::Team(team.parse()?)),
            _ => Err(RosterError::Validation(format!("malformed add destination: {s}"))),
        }
    }
}

// =============================================================================
// EDIT DESTINATION
// =============================================================================

/// Redestination directive carried by an edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditDestination {
    /// Stay where the player is.
    #[default]
    Keep,
    /// Move to the waiting queue (no-op if already there).
    Queue,
    /// Move to a specific slot.
    TeamSlot {
        /// Target team
        team: TeamName,
        /// Target slot
        slot: usize,
    },
}

impl FromStr for EditDestination {
    type Err = RosterError;

    /// Accepts `keep`, `queue`, or `team:<name>:slot:<index>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [""] | ["keep"] => Ok(EditDestination::Keep),
            ["queue"] | ["queue", "waiting"] => Ok(EditDestination::Queue),
            ["team", team, "slot", slot] => {
                let team = team.parse()?;
                let slot = parse_slot(slot)?;
                Ok(EditDestination::TeamSlot { team, slot })
            }
            _ => Err(RosterError::Validation(format!("malformed edit destination: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_destination_parsing() {
        assert_eq!("queue:waiting".parse::<AddDestination>().unwrap(), AddDestination::Waiting);
        assert_eq!("queue".parse::<AddDestination>().unwrap(), AddDestination::Waiting);
        assert_eq!(
            "team:pupsiki".parse::<AddDestination>().unwrap(),
            AddDestination::Team(TeamName::Pupsiki)
        );
        assert!(matches!(
            "queue:played".parse::<AddDestination>(),
            Err(RosterError::Validation(_))
        ));
        assert!(matches!(
            "team:avengers".parse::<AddDestination>(),
            Err(RosterError::UnknownTeam(_))
        ));
    }

    #[test]
    fn test_edit_destination_parsing() {
        assert_eq!("keep".parse::<EditDestination>().unwrap(), EditDestination::Keep);
        assert_eq!("queue".parse::<EditDestination>().unwrap(), EditDestination::Queue);
        assert_eq!(
            "team:gandony:slot:1".parse::<EditDestination>().unwrap(),
            EditDestination::TeamSlot { team: TeamName::Gandony, slot: 1 }
        );
    }

    #[test]
    fn test_edit_destination_errors() {
        assert_eq!(
            "team:gandony:slot:6".parse::<EditDestination>(),
            Err(RosterError::Range { index: 6 })
        );
        assert_eq!(
            "team:gandony:slot:-1".parse::<EditDestination>(),
            Err(RosterError::Range { index: -1 })
        );
        assert_eq!(
            "team:xmen:slot:0".parse::<EditDestination>(),
            Err(RosterError::UnknownTeam("xmen".into()))
        );
        assert!(matches!(
            "team:gandony:slot:two".parse::<EditDestination>(),
            Err(RosterError::Validation(_))
        ));
        assert!(matches!("bench".parse::<EditDestination>(), Err(RosterError::Validation(_))));
    }

    #[test]
    fn test_location_display() {
        let loc = Location::Team { team: TeamName::Pupsiki, slot: 3 };
        assert_eq!(loc.to_string(), "team:pupsiki:slot:3");
        let loc = Location::Queue { queue: QueueName::Played, position: 0 };
        assert_eq!(loc.to_string(), "queue:played#0");
        assert_eq!(loc.queue(), Some(QueueName::Played));
    }
}
