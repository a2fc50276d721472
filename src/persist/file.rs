//! Snapshot file on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::persist::snapshot::SnapshotCodec;
use crate::persist::{PersistenceError, PersistenceGateway};
use crate::roster::state::RosterState;

/// Stores the roster in a single snapshot file.
///
/// Saves write a sibling temp file and rename it over the target, so a crash
/// mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileGateway {
    path: PathBuf,
    codec: SnapshotCodec,
}

impl FileGateway {
    /// Create a gateway for a snapshot path.
    pub fn new(path: impl Into<PathBuf>, codec: SnapshotCodec) -> Self {
        Self { path: path.into(), codec }
    }

    /// Snapshot path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PersistenceGateway for FileGateway {
    fn load(&mut self) -> Option<RosterState> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {}", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Cannot read snapshot {}: {}", self.path.display(), e);
                return None;
            }
        };

        match self.codec.decode(&bytes) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("Discarding malformed snapshot {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, state: &RosterState) -> Result<(), PersistenceError> {
        let bytes = self.codec.encode(state)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, bytes)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::snapshot::SnapshotFormat;
    use crate::roster::location::AddDestination;
    use crate::roster::player::PlayerAttributes;
    use crate::roster::team::TeamName;

    fn roster() -> RosterState {
        let mut state = RosterState::new();
        state
            .add_player(PlayerAttributes::new("Wolverine", "Diamond"), AddDestination::Team(TeamName::Pupsiki))
            .unwrap();
        state
            .add_player(PlayerAttributes::new("Hulk", "Gold"), AddDestination::Waiting)
            .unwrap();
        state
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = FileGateway::new(dir.path().join("absent.json"), SnapshotCodec::default());
        assert!(gateway.load().is_none());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        for format in [SnapshotFormat::Json, SnapshotFormat::Binary] {
            let path = dir.path().join(format!("nested/roster.{format}"));
            let mut gateway = FileGateway::new(&path, SnapshotCodec::new(format));
            let state = roster();

            gateway.save(&state).unwrap();
            assert!(path.exists());
            assert!(!gateway.temp_path().exists());

            let mut reopened = FileGateway::new(&path, SnapshotCodec::new(format));
            assert_eq!(reopened.load(), Some(state));
        }
    }

    #[test]
    fn test_corrupt_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        fs::write(&path, b"{\"teams\": {}}").unwrap();

        let mut gateway = FileGateway::new(&path, SnapshotCodec::default());
        assert!(gateway.load().is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        let mut gateway = FileGateway::new(&path, SnapshotCodec::default());

        let mut state = roster();
        gateway.save(&state).unwrap();
        state.clear_all();
        gateway.save(&state).unwrap();

        assert_eq!(gateway.load(), Some(RosterState::new()));
    }
}
