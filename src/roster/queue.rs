//! Player queues.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::core::id::PlayerId;
use crate::roster::error::RosterError;
use crate::roster::player::Player;

/// One of the two fixed queues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueName {
    /// Players waiting for a seat
    Waiting,
    /// Players who already played
    Played,
}

impl QueueName {
    /// Both queues in display order.
    pub const ALL: [QueueName; 2] = [QueueName::Waiting, QueueName::Played];

    /// Lowercase name used in directives and snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            QueueName::Waiting => "waiting",
            QueueName::Played => "played",
        }
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for QueueName {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "waiting" => Ok(QueueName::Waiting),
            "played" => Ok(QueueName::Played),
            other => Err(RosterError::Validation(format!("unknown queue: {other}"))),
        }
    }
}

/// Ordered, duplicate-free list of players.
///
/// Order is insertion order; it only matters for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Queue {
    name: QueueName,
    players: Vec<Player>,
}

impl Queue {
    /// Create an empty queue.
    pub fn new(name: QueueName) -> Self {
        Self { name, players: Vec::new() }
    }

    /// Build a queue from players in order.
    pub fn from_players(name: QueueName, players: Vec<Player>) -> Self {
        Self { name, players }
    }

    /// Queue name.
    pub fn name(&self) -> QueueName {
        self.name
    }

    /// Players in order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of queued players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Index of a player in the queue.
    pub fn position(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == *id)
    }

    /// Check if a player is queued here.
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.position(id).is_some()
    }

    /// Append to the tail.
    pub(crate) fn push(&mut self, player: Player) {
        debug_assert!(!self.contains(&player.id), "duplicate player in {}", self.name);
        self.players.push(player);
    }

    /// Remove a player, preserving the order of the rest.
    pub(crate) fn remove(&mut self, id: &PlayerId) -> Option<Player> {
        self.position(id).map(|i| self.players.remove(i))
    }

    /// Remove the player at a position.
    pub(crate) fn remove_at(&mut self, position: usize) -> Option<Player> {
        (position < self.players.len()).then(|| self.players.remove(position))
    }

    /// Mutable access by position.
    pub(crate) fn get_at_mut(&mut self, position: usize) -> Option<&mut Player> {
        self.players.get_mut(position)
    }

    /// Drop every player, returning how many there were.
    pub(crate) fn clear(&mut self) -> usize {
        let count = self.players.len();
        self.players.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::player::PlayerAttributes;

    fn player(n: u8) -> Player {
        Player::new(PlayerId::from_bytes([n; 16]), PlayerAttributes::new(format!("p{n}"), "Gold"))
    }

    #[test]
    fn test_queue_name_parsing() {
        assert_eq!("waiting".parse::<QueueName>().unwrap(), QueueName::Waiting);
        assert_eq!("PLAYED".parse::<QueueName>().unwrap(), QueueName::Played);
        assert!(matches!("bench".parse::<QueueName>(), Err(RosterError::Validation(_))));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut queue = Queue::new(QueueName::Waiting);
        for n in 1..=4 {
            queue.push(player(n));
        }

        let removed = queue.remove(&PlayerId::from_bytes([2; 16]));
        assert_eq!(removed.map(|p| p.game_handle), Some("p2".to_string()));

        let order: Vec<_> = queue.players().iter().map(|p| p.game_handle.as_str()).collect();
        assert_eq!(order, vec!["p1", "p3", "p4"]);
        assert!(queue.remove(&PlayerId::from_bytes([2; 16])).is_none());
    }

    #[test]
    fn test_clear_counts() {
        let mut queue = Queue::new(QueueName::Played);
        queue.push(player(1));
        queue.push(player(2));
        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
    }
}
