//! Core primitives.
//!
//! Identifiers and deterministic hashing shared by the roster and the
//! persistence layer.

pub mod id;
pub mod hash;

// Re-export core types
pub use id::PlayerId;
pub use hash::{compute_state_hash, StateHash, StateHasher};
