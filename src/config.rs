//! Store configuration.

use std::path::PathBuf;

use crate::persist::snapshot::{SnapshotCodec, SnapshotFormat};

/// Default snapshot file name.
pub const DEFAULT_STATE_PATH: &str = "marvel_rivals_filliolina_state_v1.json";

/// Configuration for a roster store and its logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Snapshot file location.
    pub state_path: PathBuf,
    /// Snapshot encoding.
    pub format: SnapshotFormat,
    /// Reject snapshots whose digest does not match their contents.
    pub verify_digest: bool,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            format: SnapshotFormat::Json,
            verify_digest: true,
            log_filter: "info".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create config from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            state_path: lookup("ROSTER_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_path),
            format: lookup("ROSTER_SNAPSHOT_FORMAT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.format),
            verify_digest: lookup("ROSTER_VERIFY_DIGEST")
                .map(|v| !(v == "false" || v == "0"))
                .unwrap_or(defaults.verify_digest),
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Snapshot codec for this configuration.
    pub fn codec(&self) -> SnapshotCodec {
        SnapshotCodec {
            format: self.format,
            verify_digest: self.verify_digest,
        }
    }
}
