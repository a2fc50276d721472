//! Player identifiers.

use std::fmt;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// Unique player identifier (random UUID).
///
/// Assigned once when a player is created and never reused. Implements Ord
/// so identifiers can key BTree collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Allocate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Create from UUID string.
    pub fn from_uuid_str(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// First four bytes as hex, for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.as_bytes()[..4])
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: std::collections::BTreeSet<_> = (0..256).map(|_| PlayerId::generate()).collect();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn test_uuid_string_roundtrip() {
        let id = PlayerId::from_bytes([3; 16]);
        let parsed = PlayerId::from_uuid_str(&id.to_string());
        assert_eq!(parsed, Some(id));
        assert_eq!(PlayerId::from_uuid_str("p_12345"), None);
    }

    #[test]
    fn test_short_form() {
        let id = PlayerId::from_bytes([0xab, 0xcd, 0xef, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(id.short(), "abcdef01");
    }

    #[test]
    fn test_serializes_as_uuid_string() {
        let id = PlayerId::from_bytes([1; 16]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
