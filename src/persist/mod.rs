//! Persistence Module
//!
//! Loading and saving the whole roster as an opaque snapshot.
//!
//! ## Module Structure
//!
//! - `snapshot`: Snapshot envelope, formats, validation
//! - `memory`: In-memory gateway (tests, embedding)
//! - `file`: Snapshot file on disk

pub mod snapshot;
pub mod memory;
pub mod file;

use thiserror::Error;

use crate::roster::state::RosterState;

pub use snapshot::{Snapshot, SnapshotCodec, SnapshotError, SnapshotFormat, SNAPSHOT_VERSION};
pub use memory::MemoryGateway;
pub use file::FileGateway;

/// Errors raised while saving a roster.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Storage I/O failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Where the roster is stored between sessions.
pub trait PersistenceGateway {
    /// Restore the last saved roster.
    ///
    /// Returns `None` when nothing was saved yet or the stored snapshot is
    /// malformed; a malformed snapshot is never fatal.
    fn load(&mut self) -> Option<RosterState>;

    /// Store the full roster, replacing any previous snapshot.
    fn save(&mut self, state: &RosterState) -> Result<(), PersistenceError>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for Box<G> {
    fn load(&mut self) -> Option<RosterState> {
        (**self).load()
    }

    fn save(&mut self, state: &RosterState) -> Result<(), PersistenceError> {
        (**self).save(state)
    }
}
