//! # Team Roster
//!
//! Roster keeper for two six-slot teams plus a waiting queue and a played
//! queue, with snapshot persistence.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        TEAM ROSTER                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Primitives                              │
//! │  ├── id.rs         - Player identifiers (UUID)               │
//! │  └── hash.rs       - Roster state digests                    │
//! │                                                              │
//! │  roster/           - State machine (deterministic)           │
//! │  ├── player.rs     - Player data, roles                      │
//! │  ├── team.rs       - Six-slot teams                          │
//! │  ├── queue.rs      - Waiting / played queues                 │
//! │  ├── location.rs   - Locations, destination directives       │
//! │  ├── state.rs      - Aggregate + invariants                  │
//! │  ├── transition.rs - Player moves                            │
//! │  ├── events.rs     - Change notifications                    │
//! │  └── store.rs      - State owner, save after each change     │
//! │                                                              │
//! │  persist/          - Snapshots (I/O)                         │
//! │  ├── snapshot.rs   - Envelope, JSON/bincode, validation      │
//! │  ├── memory.rs     - In-memory gateway                       │
//! │  └── file.rs       - Snapshot file gateway                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - A player identity lives in at most one slot or queue position.
//! - Teams always have exactly six slots.
//! - Queues never hold empty placeholders.
//! - A rejected operation leaves the roster unchanged.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod roster;
pub mod persist;
pub mod config;

// Re-export commonly used types
pub use crate::core::id::PlayerId;
pub use roster::{
    AddDestination, EditDestination, EditRequest, ErrorKind, Location, Player, PlayerAttributes,
    QueueName, Role, RosterError, RosterEvent, RosterState, RosterStore, Slot, TeamName,
    SLOT_ROLES, TEAM_SIZE,
};
pub use persist::{FileGateway, MemoryGateway, PersistenceGateway, SnapshotCodec, SnapshotFormat};
pub use config::StoreConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
