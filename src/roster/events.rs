//! Roster Events
//!
//! What changed in an applied transition, so a presentation layer can react
//! without diffing the whole roster.

use serde::{Serialize, Deserialize};

use crate::core::id::PlayerId;
use crate::roster::location::Location;
use crate::roster::queue::QueueName;
use crate::roster::team::TeamName;

/// A change applied to the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RosterEvent {
    /// New player created
    PlayerAdded {
        /// Player concerned
        player_id: PlayerId,
        /// Where the player was placed
        location: Location,
    },

    /// Queued player took a team slot
    PlayerSeated {
        /// Player concerned
        player_id: PlayerId,
        /// Queue the player left
        from: QueueName,
        /// Team
        team: TeamName,
        /// Slot index
        slot: usize,
    },

    /// Previous slot holder pushed to the played queue
    PlayerEvicted {
        /// Player concerned
        player_id: PlayerId,
        /// Team
        team: TeamName,
        /// Slot index
        slot: usize,
    },

    /// Two slots exchanged contents
    SlotsSwapped {
        /// First team
        from_team: TeamName,
        /// First slot
        from_slot: usize,
        /// Second team
        to_team: TeamName,
        /// Second slot
        to_slot: usize,
    },

    /// Seated player sent to a queue
    PlayerBenched {
        /// Player concerned
        player_id: PlayerId,
        /// Team
        team: TeamName,
        /// Slot index
        slot: usize,
        /// Destination queue
        queue: QueueName,
    },

    /// Attributes replaced
    PlayerEdited {
        /// Player concerned
        player_id: PlayerId,
    },

    /// Player moved by an edit directive
    PlayerRelocated {
        /// Player concerned
        player_id: PlayerId,
        /// Previous location
        from: Location,
        /// New location
        to: Location,
    },

    /// Every seated player got one more game
    GamesIncremented {
        /// Seated players bumped
        players: usize,
    },

    /// Teams and queues emptied
    RosterCleared {
        /// Players removed
        dropped: usize,
    },

    /// Teams emptied, queues kept
    TeamsCleared {
        /// Players removed
        dropped: usize,
    },
}

impl RosterEvent {
    /// Player this event is about, if it concerns a single player.
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            RosterEvent::PlayerAdded { player_id, .. }
            | RosterEvent::PlayerSeated { player_id, .. }
            | RosterEvent::PlayerEvicted { player_id, .. }
            | RosterEvent::PlayerBenched { player_id, .. }
            | RosterEvent::PlayerEdited { player_id }
            | RosterEvent::PlayerRelocated { player_id, .. } => Some(*player_id),
            RosterEvent::SlotsSwapped { .. }
            | RosterEvent::GamesIncremented { .. }
            | RosterEvent::RosterCleared { .. }
            | RosterEvent::TeamsCleared { .. } => None,
        }
    }
}
