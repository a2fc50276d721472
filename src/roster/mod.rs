//! Roster Module
//!
//! The roster state machine: two six-slot teams, a waiting queue, a played
//! queue, and the transitions that move players between them.
//!
//! ## Module Structure
//!
//! - `player`: Player data, attributes, roles
//! - `team`: Team slots and slot role labels
//! - `queue`: Waiting/played queues
//! - `location`: Locations and destination directives
//! - `state`: The roster aggregate and its invariants
//! - `transition`: Operations that move players
//! - `events`: What changed, for the presentation layer
//! - `store`: Owner of state + persistence
//! - `error`: Rejection reasons

pub mod player;
pub mod team;
pub mod queue;
pub mod location;
pub mod state;
pub mod transition;
pub mod events;
pub mod store;
pub mod error;

// Re-export key types
pub use player::{Player, PlayerAttributes, Role, RoleSet};
pub use team::{Slot, Team, TeamName, SLOT_ROLES, TEAM_SIZE};
pub use queue::{Queue, QueueName};
pub use location::{AddDestination, EditDestination, Location};
pub use state::RosterState;
pub use transition::{EditOutcome, EditRequest, Relocation};
pub use events::RosterEvent;
pub use store::RosterStore;
pub use error::{ErrorKind, InvariantViolation, RosterError};
