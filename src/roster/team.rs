//! Team Definitions
//!
//! A team is a fixed array of six slots. The slot index carries a display
//! role label but does not restrict who may sit there.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::core::id::PlayerId;
use crate::roster::error::RosterError;
use crate::roster::player::{Player, Role};

/// Number of slots per team.
pub const TEAM_SIZE: usize = 6;

/// Display role for each slot index.
pub const SLOT_ROLES: [Role; TEAM_SIZE] = [
    Role::Tank,
    Role::Tank,
    Role::Dps,
    Role::Dps,
    Role::Support,
    Role::Support,
];

/// Reject slot indices outside the team.
#[inline]
pub fn check_slot(index: usize) -> Result<usize, RosterError> {
    if index < TEAM_SIZE {
        Ok(index)
    } else {
        Err(RosterError::range(index))
    }
}

// =============================================================================
// TEAM NAME
// =============================================================================

/// One of the two fixed teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamName {
    /// First team
    Gandony,
    /// Second team
    Pupsiki,
}

impl TeamName {
    /// Both teams in display order.
    pub const ALL: [TeamName; 2] = [TeamName::Gandony, TeamName::Pupsiki];

    /// Lowercase name used in directives and snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            TeamName::Gandony => "gandony",
            TeamName::Pupsiki => "pupsiki",
        }
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TeamName {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gandony" => Ok(TeamName::Gandony),
            "pupsiki" => Ok(TeamName::Pupsiki),
            _ => Err(RosterError::UnknownTeam(s.trim().to_string())),
        }
    }
}

// =============================================================================
// SLOT
// =============================================================================

/// A single team slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    /// Nobody here
    #[default]
    Empty,
    /// Seated player
    Occupied(Player),
}

impl Slot {
    /// Check if the slot is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Seated player, if any.
    pub fn player(&self) -> Option<&Player> {
        match self {
            Slot::Occupied(player) => Some(player),
            Slot::Empty => None,
        }
    }

    /// Seated player, mutably.
    pub fn player_mut(&mut self) -> Option<&mut Player> {
        match self {
            Slot::Occupied(player) => Some(player),
            Slot::Empty => None,
        }
    }

    /// Remove and return the seated player, leaving the slot empty.
    pub fn take(&mut self) -> Option<Player> {
        match std::mem::take(self) {
            Slot::Occupied(player) => Some(player),
            Slot::Empty => None,
        }
    }

    /// Convert to an option (snapshot form).
    pub fn into_option(self) -> Option<Player> {
        match self {
            Slot::Occupied(player) => Some(player),
            Slot::Empty => None,
        }
    }
}

impl From<Option<Player>> for Slot {
    fn from(player: Option<Player>) -> Self {
        match player {
            Some(player) => Slot::Occupied(player),
            None => Slot::Empty,
        }
    }
}

// =============================================================================
// TEAM
// =============================================================================

/// Six ordered slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    name: TeamName,
    slots: [Slot; TEAM_SIZE],
}

impl Team {
    /// Create an all-empty team.
    pub fn new(name: TeamName) -> Self {
        Self {
            name,
            slots: std::array::from_fn(|_| Slot::Empty),
        }
    }

    /// Build a team from exactly six slots.
    pub fn from_slots(name: TeamName, slots: [Slot; TEAM_SIZE]) -> Self {
        Self { name, slots }
    }

    /// Team name.
    pub fn name(&self) -> TeamName {
        self.name
    }

    /// All slots in index order.
    pub fn slots(&self) -> &[Slot; TEAM_SIZE] {
        &self.slots
    }

    /// Slot at index.
    pub fn slot(&self, index: usize) -> Result<&Slot, RosterError> {
        Ok(&self.slots[check_slot(index)?])
    }

    /// Display role for a slot index.
    pub fn slot_role(index: usize) -> Option<Role> {
        SLOT_ROLES.get(index).copied()
    }

    /// Player at index, if the index is valid and occupied.
    pub fn occupant(&self, index: usize) -> Option<&Player> {
        self.slots.get(index).and_then(Slot::player)
    }

    /// Player at index, mutably.
    pub(crate) fn occupant_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.slots.get_mut(index).and_then(Slot::player_mut)
    }

    /// Lowest-indexed empty slot.
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Slot::is_empty)
    }

    /// Slot index holding this player.
    pub fn position(&self, id: &PlayerId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.player().is_some_and(|p| p.id == *id))
    }

    /// Seated players with their slot indices.
    pub fn seated(&self) -> impl Iterator<Item = (usize, &Player)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.player().map(|p| (i, p)))
    }

    /// Number of occupied slots.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Empty a slot, returning whoever sat there.
    ///
    /// Callers check the index first.
    pub(crate) fn take(&mut self, index: usize) -> Option<Player> {
        self.slots[index].take()
    }

    /// Seat a player, returning the previous occupant.
    ///
    /// Callers check the index first.
    pub(crate) fn put(&mut self, index: usize, player: Player) -> Option<Player> {
        std::mem::replace(&mut self.slots[index], Slot::Occupied(player)).into_option()
    }

    /// Exchange two slots of this team.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Mutable access to every seated player.
    pub(crate) fn seated_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.slots.iter_mut().filter_map(Slot::player_mut)
    }

    /// Empty every slot, returning how many players were seated.
    pub(crate) fn clear(&mut self) -> usize {
        let seated = self.occupied_count();
        self.slots = std::array::from_fn(|_| Slot::Empty);
        seated
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::player::PlayerAttributes;

    fn player(n: u8) -> Player {
        Player::new(PlayerId::from_bytes([n; 16]), PlayerAttributes::new(format!("p{n}"), "Gold"))
    }

    #[test]
    fn test_team_name_parsing() {
        assert_eq!("gandony".parse::<TeamName>().unwrap(), TeamName::Gandony);
        assert_eq!(" Pupsiki".parse::<TeamName>().unwrap(), TeamName::Pupsiki);
        assert_eq!(
            "avengers".parse::<TeamName>(),
            Err(RosterError::UnknownTeam("avengers".into()))
        );
    }

    #[test]
    fn test_slot_roles() {
        assert_eq!(Team::slot_role(0), Some(Role::Tank));
        assert_eq!(Team::slot_role(3), Some(Role::Dps));
        assert_eq!(Team::slot_role(5), Some(Role::Support));
        assert_eq!(Team::slot_role(6), None);
    }

    #[test]
    fn test_first_empty_is_lowest_index() {
        let mut team = Team::new(TeamName::Gandony);
        assert_eq!(team.first_empty(), Some(0));

        team.put(0, player(1));
        team.put(2, player(2));
        assert_eq!(team.first_empty(), Some(1));

        for i in [1, 3, 4, 5] {
            team.put(i, player(10 + i as u8));
        }
        assert_eq!(team.occupied_count(), TEAM_SIZE);
        assert_eq!(team.first_empty(), None);
    }

    #[test]
    fn test_put_returns_previous_occupant() {
        let mut team = Team::new(TeamName::Pupsiki);
        assert_eq!(team.put(4, player(1)), None);
        let previous = team.put(4, player(2));
        assert_eq!(previous.map(|p| p.id), Some(PlayerId::from_bytes([1; 16])));
        assert_eq!(team.position(&PlayerId::from_bytes([2; 16])), Some(4));
    }

    #[test]
    fn test_slot_bounds() {
        let team = Team::new(TeamName::Gandony);
        assert!(team.slot(5).is_ok());
        assert_eq!(team.slot(6), Err(RosterError::Range { index: 6 }));
        assert!(team.occupant(42).is_none());
    }

    #[test]
    fn test_clear_keeps_six_slots() {
        let mut team = Team::new(TeamName::Gandony);
        team.put(1, player(1));
        team.put(5, player(2));
        assert_eq!(team.clear(), 2);
        assert_eq!(team.slots().len(), TEAM_SIZE);
        assert_eq!(team.occupied_count(), 0);
    }
}
