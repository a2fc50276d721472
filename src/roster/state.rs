//! Roster State
//!
//! The aggregate of both teams and both queues. Read accessors live here;
//! the transition operations are in `transition.rs`.
//!
//! Structural invariants:
//! - a player identity appears in at most one location
//! - each team has exactly six slots (enforced by the array type)
//! - queues hold only real players (enforced by `Vec<Player>`)

use std::collections::BTreeSet;

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::id::PlayerId;
use crate::roster::error::InvariantViolation;
use crate::roster::location::Location;
use crate::roster::player::Player;
use crate::roster::queue::{Queue, QueueName};
use crate::roster::team::{Slot, Team, TeamName, TEAM_SIZE};

/// Complete roster: two teams, two queues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterState {
    pub(crate) gandony: Team,
    pub(crate) pupsiki: Team,
    pub(crate) waiting: Queue,
    pub(crate) played: Queue,
}

impl Default for RosterState {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterState {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self {
            gandony: Team::new(TeamName::Gandony),
            pupsiki: Team::new(TeamName::Pupsiki),
            waiting: Queue::new(QueueName::Waiting),
            played: Queue::new(QueueName::Played),
        }
    }

    /// Assemble a roster from restored parts, checking identity uniqueness.
    pub fn from_parts(
        gandony: [Slot; TEAM_SIZE],
        pupsiki: [Slot; TEAM_SIZE],
        waiting: Vec<Player>,
        played: Vec<Player>,
    ) -> Result<Self, InvariantViolation> {
        let state = Self {
            gandony: Team::from_slots(TeamName::Gandony, gandony),
            pupsiki: Team::from_slots(TeamName::Pupsiki, pupsiki),
            waiting: Queue::from_players(QueueName::Waiting, waiting),
            played: Queue::from_players(QueueName::Played, played),
        };
        state.check_invariants()?;
        Ok(state)
    }

    /// Team by name.
    pub fn team(&self, name: TeamName) -> &Team {
        match name {
            TeamName::Gandony => &self.gandony,
            TeamName::Pupsiki => &self.pupsiki,
        }
    }

    pub(crate) fn team_mut(&mut self, name: TeamName) -> &mut Team {
        match name {
            TeamName::Gandony => &mut self.gandony,
            TeamName::Pupsiki => &mut self.pupsiki,
        }
    }

    /// Queue by name.
    pub fn queue(&self, name: QueueName) -> &Queue {
        match name {
            QueueName::Waiting => &self.waiting,
            QueueName::Played => &self.played,
        }
    }

    pub(crate) fn queue_mut(&mut self, name: QueueName) -> &mut Queue {
        match name {
            QueueName::Waiting => &mut self.waiting,
            QueueName::Played => &mut self.played,
        }
    }

    /// Both teams in display order.
    pub fn teams(&self) -> [&Team; 2] {
        [&self.gandony, &self.pupsiki]
    }

    /// Both queues in display order.
    pub fn queues(&self) -> [&Queue; 2] {
        [&self.waiting, &self.played]
    }

    /// Every player with its location: team slots first, then queues.
    pub fn players(&self) -> impl Iterator<Item = (Location, &Player)> {
        let seated = self.teams().into_iter().flat_map(|team| {
            team.seated()
                .map(move |(slot, p)| (Location::Team { team: team.name(), slot }, p))
        });
        let queued = self.queues().into_iter().flat_map(|queue| {
            queue.players().iter().enumerate().map(move |(position, p)| {
                (Location::Queue { queue: queue.name(), position }, p)
            })
        });
        seated.chain(queued)
    }

    /// Find where a player lives.
    pub fn locate(&self, id: &PlayerId) -> Option<Location> {
        for team in self.teams() {
            if let Some(slot) = team.position(id) {
                return Some(Location::Team { team: team.name(), slot });
            }
        }
        for queue in self.queues() {
            if let Some(position) = queue.position(id) {
                return Some(Location::Queue { queue: queue.name(), position });
            }
        }
        None
    }

    /// Look up a player anywhere on the roster.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players().find(|(_, p)| p.id == *id).map(|(_, p)| p)
    }

    /// Player at a known location.
    pub(crate) fn player_at_mut(&mut self, location: Location) -> Option<&mut Player> {
        match location {
            Location::Team { team, slot } => self.team_mut(team).occupant_mut(slot),
            Location::Queue { queue, position } => self.queue_mut(queue).get_at_mut(position),
        }
    }

    /// Remove a player from a known location.
    pub(crate) fn take_at(&mut self, location: Location) -> Option<Player> {
        match location {
            Location::Team { team, slot } => self.team_mut(team).take(slot),
            Location::Queue { queue, position } => self.queue_mut(queue).remove_at(position),
        }
    }

    /// Number of seated players across both teams.
    pub fn seated_count(&self) -> usize {
        self.gandony.occupied_count() + self.pupsiki.occupied_count()
    }

    /// Number of players in both queues.
    pub fn queued_count(&self) -> usize {
        self.waiting.len() + self.played.len()
    }

    /// Total number of players on the roster.
    pub fn player_count(&self) -> usize {
        self.seated_count() + self.queued_count()
    }

    /// Check if the roster holds no players at all.
    pub fn is_empty(&self) -> bool {
        self.player_count() == 0
    }

    /// Verify that no identity appears twice.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = BTreeSet::new();
        for (_, player) in self.players() {
            if !seen.insert(player.id) {
                return Err(InvariantViolation::DuplicatePlayer(player.id));
            }
        }
        Ok(())
    }

    /// Compute a digest of the whole roster: every slot, every queue
    /// position, every attribute.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(TEAM_SIZE, |hasher| {
            for team in self.teams() {
                hasher.update_u8(team.name() as u8);
                for slot in team.slots() {
                    match slot.player() {
                        Some(player) => {
                            hasher.update_bool(true);
                            player.hash_into(hasher);
                        }
                        None => hasher.update_bool(false),
                    }
                }
            }

            for queue in self.queues() {
                hasher.update_u8(queue.name() as u8);
                hasher.update_u32(queue.len() as u32);
                for player in queue.players() {
                    player.hash_into(hasher);
                }
            }
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
