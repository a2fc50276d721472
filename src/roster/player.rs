//! Player Definitions
//!
//! A player is plain data: identity plus the attributes a presentation layer
//! collects from its add/edit forms.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::core::hash::StateHasher;
use crate::core::id::PlayerId;
use crate::roster::error::RosterError;

// =============================================================================
// ROLE
// =============================================================================

/// Role tag a player is willing to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Role {
    /// Frontline
    Tank = 0,
    /// Damage
    Dps = 1,
    /// Healer
    Support = 2,
}

impl Role {
    /// All roles in display order.
    pub const ALL: [Role; 3] = [Role::Tank, Role::Dps, Role::Support];

    /// Lowercase tag used in directives and snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Tank => "tank",
            Role::Dps => "dps",
            Role::Support => "support",
        }
    }

    /// Single-letter badge for compact rendering.
    pub fn badge(self) -> char {
        match self {
            Role::Tank => 'T',
            Role::Dps => 'D',
            Role::Support => 'S',
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tank" => Ok(Role::Tank),
            "dps" => Ok(Role::Dps),
            "support" => Ok(Role::Support),
            other => Err(RosterError::Validation(format!("unknown role: {other}"))),
        }
    }
}

/// Set of role tags. Duplicates collapse on insert.
pub type RoleSet = BTreeSet<Role>;

/// Render a role set as badges ("TD", "S", "").
pub fn role_badges(roles: &RoleSet) -> String {
    roles.iter().map(|r| r.badge()).collect()
}

// =============================================================================
// PLAYER ATTRIBUTES
// =============================================================================

/// Mutable player attributes, as submitted by an add or edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAttributes {
    /// In-game handle (required, non-empty)
    pub game_handle: String,
    /// Streaming handle (optional)
    pub stream_handle: Option<String>,
    /// Rank label (required, vocabulary not checked)
    pub rank: String,
    /// Games played so far
    pub games_played: u32,
    /// Roles the player can fill
    pub roles: RoleSet,
}

impl PlayerAttributes {
    /// Create attributes with the two required fields set.
    pub fn new(game_handle: impl Into<String>, rank: impl Into<String>) -> Self {
        Self {
            game_handle: game_handle.into(),
            rank: rank.into(),
            ..Self::default()
        }
    }

    /// Builder: set the stream handle.
    pub fn with_stream_handle(mut self, handle: impl Into<String>) -> Self {
        self.stream_handle = Some(handle.into());
        self
    }

    /// Builder: set the games-played counter.
    pub fn with_games(mut self, games: u32) -> Self {
        self.games_played = games;
        self
    }

    /// Builder: add roles (duplicates collapse).
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles.extend(roles);
        self
    }

    /// Trim handles and check required fields.
    ///
    /// A blank stream handle becomes `None`.
    pub fn normalized(mut self) -> Result<Self, RosterError> {
        self.game_handle = self.game_handle.trim().to_string();
        self.rank = self.rank.trim().to_string();
        self.stream_handle = self
            .stream_handle
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());

        if self.game_handle.is_empty() {
            return Err(RosterError::Validation("game handle is required".into()));
        }
        if self.rank.is_empty() {
            return Err(RosterError::Validation("rank is required".into()));
        }
        Ok(self)
    }
}

// =============================================================================
// PLAYER
// =============================================================================

/// A player on the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Identity, fixed at creation
    pub id: PlayerId,
    /// In-game handle
    pub game_handle: String,
    /// Streaming handle
    #[serde(default)]
    pub stream_handle: Option<String>,
    /// Rank label
    pub rank: String,
    /// Games played
    #[serde(default)]
    pub games_played: u32,
    /// Roles
    #[serde(default)]
    pub roles: RoleSet,
}

impl Player {
    /// Create a player from already-normalized attributes.
    pub fn new(id: PlayerId, attributes: PlayerAttributes) -> Self {
        Self {
            id,
            game_handle: attributes.game_handle,
            stream_handle: attributes.stream_handle,
            rank: attributes.rank,
            games_played: attributes.games_played,
            roles: attributes.roles,
        }
    }

    /// Current attributes as an editable value.
    pub fn attributes(&self) -> PlayerAttributes {
        PlayerAttributes {
            game_handle: self.game_handle.clone(),
            stream_handle: self.stream_handle.clone(),
            rank: self.rank.clone(),
            games_played: self.games_played,
            roles: self.roles.clone(),
        }
    }

    /// Replace every mutable attribute. Identity is untouched.
    ///
    /// Returns true if anything changed.
    pub fn apply(&mut self, attributes: PlayerAttributes) -> bool {
        let changed = self.attributes() != attributes;
        self.game_handle = attributes.game_handle;
        self.stream_handle = attributes.stream_handle;
        self.rank = attributes.rank;
        self.games_played = attributes.games_played;
        self.roles = attributes.roles;
        changed
    }

    /// Check whether the player lists a role.
    pub fn plays(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Hash this player's data for state digests.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_uuid(self.id.as_bytes());
        hasher.update_str(&self.game_handle);
        match &self.stream_handle {
            Some(handle) => {
                hasher.update_bool(true);
                hasher.update_str(handle);
            }
            None => hasher.update_bool(false),
        }
        hasher.update_str(&self.rank);
        hasher.update_u32(self.games_played);
        hasher.update_u8(self.roles.len() as u8);
        for role in &self.roles {
            hasher.update_u8(*role as u8);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("tank".parse::<Role>().unwrap(), Role::Tank);
        assert_eq!(" DPS ".parse::<Role>().unwrap(), Role::Dps);
        assert_eq!("support".parse::<Role>().unwrap(), Role::Support);
        assert!(matches!("healer".parse::<Role>(), Err(RosterError::Validation(_))));
    }

    #[test]
    fn test_roles_collapse_duplicates() {
        let attrs = PlayerAttributes::new("Luna", "Gold")
            .with_roles([Role::Support, Role::Tank, Role::Support]);
        assert_eq!(attrs.roles.len(), 2);
        assert_eq!(role_badges(&attrs.roles), "TS");
    }

    #[test]
    fn test_normalize_trims_and_validates() {
        let attrs = PlayerAttributes::new("  Magik ", " Diamond ")
            .with_stream_handle("   ")
            .normalized()
            .unwrap();
        assert_eq!(attrs.game_handle, "Magik");
        assert_eq!(attrs.rank, "Diamond");
        assert_eq!(attrs.stream_handle, None);

        let err = PlayerAttributes::new("   ", "Gold").normalized().unwrap_err();
        assert!(matches!(err, RosterError::Validation(_)));

        let err = PlayerAttributes::new("Magik", "").normalized().unwrap_err();
        assert!(matches!(err, RosterError::Validation(_)));
    }

    #[test]
    fn test_apply_keeps_identity() {
        let id = PlayerId::from_bytes([1; 16]);
        let mut player = Player::new(id, PlayerAttributes::new("Storm", "Silver"));

        let changed = player.apply(PlayerAttributes::new("Storm", "Gold").with_games(4));
        assert!(changed);
        assert_eq!(player.id, id);
        assert_eq!(player.rank, "Gold");
        assert_eq!(player.games_played, 4);

        assert!(!player.apply(player.attributes()));
    }

    #[test]
    fn test_player_json_shape() {
        let player = Player::new(
            PlayerId::from_bytes([2; 16]),
            PlayerAttributes::new("Groot", "Bronze").with_roles([Role::Tank]),
        );
        let json = serde_json::to_string(&player).unwrap();
        assert!(json.contains("\"game_handle\":\"Groot\""));
        assert!(json.contains("\"roles\":[\"tank\"]"));
    }
}
