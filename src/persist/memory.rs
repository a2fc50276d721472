//! In-memory gateway.

use tracing::warn;

use crate::persist::snapshot::SnapshotCodec;
use crate::persist::{PersistenceError, PersistenceGateway};
use crate::roster::state::RosterState;

/// Keeps the encoded snapshot in memory.
///
/// Goes through the same codec as the file gateway, so a round trip here
/// exercises the real snapshot format.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    codec: SnapshotCodec,
    stored: Option<Vec<u8>>,
    saves: usize,
}

impl MemoryGateway {
    /// Create an empty gateway.
    pub fn new(codec: SnapshotCodec) -> Self {
        Self { codec, stored: None, saves: 0 }
    }

    /// Create a gateway preloaded with raw snapshot bytes.
    pub fn with_bytes(codec: SnapshotCodec, bytes: Vec<u8>) -> Self {
        Self { codec, stored: Some(bytes), saves: 0 }
    }

    /// Raw stored snapshot.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.stored.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&mut self) -> Option<RosterState> {
        let bytes = self.stored.as_deref()?;
        match self.codec.decode(bytes) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("Discarding malformed snapshot: {}", e);
                None
            }
        }
    }

    fn save(&mut self, state: &RosterState) -> Result<(), PersistenceError> {
        self.stored = Some(self.codec.encode(state)?);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::snapshot::SnapshotFormat;
    use crate::roster::location::AddDestination;
    use crate::roster::player::PlayerAttributes;

    #[test]
    fn test_load_without_save_is_none() {
        let mut gateway = MemoryGateway::default();
        assert!(gateway.load().is_none());
    }

    #[test]
    fn test_save_then_load() {
        for format in [SnapshotFormat::Json, SnapshotFormat::Binary] {
            let mut gateway = MemoryGateway::new(SnapshotCodec::new(format));
            let mut state = RosterState::new();
            state
                .add_player(PlayerAttributes::new("Bucky", "Gold"), AddDestination::Waiting)
                .unwrap();

            gateway.save(&state).unwrap();
            assert_eq!(gateway.save_count(), 1);
            assert_eq!(gateway.load(), Some(state));
        }
    }

    #[test]
    fn test_garbage_is_treated_as_absent() {
        let mut gateway = MemoryGateway::with_bytes(SnapshotCodec::default(), b"{not json".to_vec());
        assert!(gateway.load().is_none());
    }
}
