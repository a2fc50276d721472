//! Roster Transitions
//!
//! Every operation that moves a player between slots and queues. Each one
//! checks all of its preconditions before touching the roster, so a rejected
//! call leaves the state exactly as it was. The single exception is an edit
//! whose redestination fails: the attribute change has already landed and is
//! kept, as reported through [`EditOutcome`].
//!
//! The only automatic displacement is seating a queued player on an occupied
//! slot: the previous occupant goes to the tail of `played`.

use serde::{Serialize, Deserialize};

use crate::core::id::PlayerId;
use crate::roster::error::RosterError;
use crate::roster::location::{AddDestination, EditDestination, Location};
use crate::roster::player::{Player, PlayerAttributes};
use crate::roster::queue::QueueName;
use crate::roster::state::RosterState;
use crate::roster::team::{check_slot, TeamName};

/// One-shot edit: identity, replacement attributes, and where to go.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    /// Player being edited
    pub player_id: PlayerId,
    /// Full replacement of the mutable attributes
    pub attributes: PlayerAttributes,
    /// Redestination directive
    #[serde(default)]
    pub destination: EditDestination,
}

impl EditRequest {
    /// Edit attributes without moving the player.
    pub fn keep(player_id: PlayerId, attributes: PlayerAttributes) -> Self {
        Self { player_id, attributes, destination: EditDestination::Keep }
    }
}

/// A completed relocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relocation {
    /// Where the player was
    pub from: Location,
    /// Where the player is now
    pub to: Location,
}

/// Result of an accepted edit.
///
/// The attributes are always applied once the request is accepted; the
/// redestination can still fail on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    /// Did any attribute value change?
    pub attributes_changed: bool,
    /// Relocation performed, `None` when the player stayed put.
    pub relocation: Result<Option<Relocation>, RosterError>,
}

/// Result of seating a queued player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seating {
    /// Previous slot holder, now at the tail of `played`.
    pub evicted: Option<PlayerId>,
}

impl RosterState {
    /// Create a player with a fresh identity and place it.
    ///
    /// A team destination takes the lowest-indexed empty slot. A full team
    /// rejects the add rather than queueing the player.
    pub fn add_player(
        &mut self,
        attributes: PlayerAttributes,
        destination: AddDestination,
    ) -> Result<(PlayerId, Location), RosterError> {
        let attributes = attributes.normalized()?;

        let location = match destination {
            AddDestination::Waiting => Location::Queue {
                queue: QueueName::Waiting,
                position: self.waiting.len(),
            },
            AddDestination::Team(team) => {
                let slot = self
                    .team(team)
                    .first_empty()
                    .ok_or(RosterError::NoCapacity { team })?;
                Location::Team { team, slot }
            }
        };

        let id = self.fresh_id();
        let player = Player::new(id, attributes);
        match location {
            Location::Queue { queue, .. } => self.queue_mut(queue).push(player),
            Location::Team { team, slot } => {
                self.team_mut(team).put(slot, player);
            }
        }

        Ok((id, location))
    }

    /// Seat a queued player, evicting any current occupant to `played`.
    pub fn move_from_queue_to_team_slot(
        &mut self,
        queue: QueueName,
        player_id: PlayerId,
        team: TeamName,
        slot: usize,
    ) -> Result<Seating, RosterError> {
        check_slot(slot)?;
        let player = self
            .queue_mut(queue)
            .remove(&player_id)
            .ok_or_else(|| RosterError::NotFound {
                player_id,
                scope: queue.to_string(),
            })?;

        let evicted = self.team_mut(team).put(slot, player);
        let evicted_id = evicted.as_ref().map(|p| p.id);
        if let Some(evicted) = evicted {
            self.played.push(evicted);
        }

        Ok(Seating { evicted: evicted_id })
    }

    /// Exchange the contents of two slots, either of which may be empty.
    ///
    /// Returns false when nothing moved (same slot, or both empty).
    pub fn swap_team_slots(
        &mut self,
        from_team: TeamName,
        from_slot: usize,
        to_team: TeamName,
        to_slot: usize,
    ) -> Result<bool, RosterError> {
        check_slot(from_slot)?;
        check_slot(to_slot)?;

        if from_team == to_team && from_slot == to_slot {
            return Ok(false);
        }
        if self.team(from_team).slots()[from_slot].is_empty()
            && self.team(to_team).slots()[to_slot].is_empty()
        {
            return Ok(false);
        }

        if from_team == to_team {
            self.team_mut(from_team).swap(from_slot, to_slot);
        } else {
            let source = self.team_mut(from_team).take(from_slot);
            let target = self.team_mut(to_team).take(to_slot);
            if let Some(player) = source {
                self.team_mut(to_team).put(to_slot, player);
            }
            if let Some(player) = target {
                self.team_mut(from_team).put(from_slot, player);
            }
        }

        Ok(true)
    }

    /// Send a seated player to the tail of a queue. Empty slot is a no-op.
    pub fn move_team_slot_to_queue(
        &mut self,
        team: TeamName,
        slot: usize,
        queue: QueueName,
    ) -> Result<Option<PlayerId>, RosterError> {
        check_slot(slot)?;
        let Some(player) = self.team_mut(team).take(slot) else {
            return Ok(None);
        };
        let id = player.id;
        self.queue_mut(queue).push(player);
        Ok(Some(id))
    }

    /// Replace a player's attributes and optionally move it.
    ///
    /// Rejected outright (nothing applied) when the new attributes are
    /// invalid or the player is not on the roster. Otherwise attributes are
    /// applied, then the directive is resolved.
    pub fn edit_player(&mut self, request: EditRequest) -> Result<EditOutcome, RosterError> {
        let EditRequest { player_id, attributes, destination } = request;
        let attributes = attributes.normalized()?;
        let from = self.locate(&player_id).ok_or_else(|| RosterError::NotFound {
            player_id,
            scope: "roster".into(),
        })?;

        let attributes_changed = self
            .player_at_mut(from)
            .map(|player| player.apply(attributes))
            .unwrap_or(false);

        let relocation = self.redestine(player_id, from, destination);

        Ok(EditOutcome { attributes_changed, relocation })
    }

    fn redestine(
        &mut self,
        player_id: PlayerId,
        from: Location,
        destination: EditDestination,
    ) -> Result<Option<Relocation>, RosterError> {
        match destination {
            EditDestination::Keep => Ok(None),
            EditDestination::Queue => {
                if from.queue() == Some(QueueName::Waiting) {
                    return Ok(None);
                }
                let Some(player) = self.take_at(from) else {
                    return Ok(None);
                };
                let to = Location::Queue {
                    queue: QueueName::Waiting,
                    position: self.waiting.len(),
                };
                self.waiting.push(player);
                Ok(Some(Relocation { from, to }))
            }
            EditDestination::TeamSlot { team, slot } => {
                check_slot(slot)?;
                if let Some(occupant) = self.team(team).occupant(slot) {
                    if occupant.id == player_id {
                        return Ok(None);
                    }
                    return Err(RosterError::Conflict {
                        team,
                        slot,
                        occupant: occupant.id,
                    });
                }
                let Some(player) = self.take_at(from) else {
                    return Ok(None);
                };
                self.team_mut(team).put(slot, player);
                Ok(Some(Relocation { from, to: Location::Team { team, slot } }))
            }
        }
    }

    /// Add one game to every seated player. Returns how many were bumped.
    pub fn increment_games(&mut self) -> usize {
        let mut bumped = 0;
        for team in TeamName::ALL {
            for player in self.team_mut(team).seated_mut() {
                player.games_played = player.games_played.saturating_add(1);
                bumped += 1;
            }
        }
        bumped
    }

    /// Empty both teams and both queues. Returns how many players were dropped.
    pub fn clear_all(&mut self) -> usize {
        self.gandony.clear() + self.pupsiki.clear() + self.waiting.clear() + self.played.clear()
    }

    /// Empty both teams, leaving the queues untouched. Seated players are
    /// dropped, not moved to `played`.
    pub fn clear_teams_only(&mut self) -> usize {
        self.gandony.clear() + self.pupsiki.clear()
    }

    fn fresh_id(&self) -> PlayerId {
        loop {
            let id = PlayerId::generate();
            if self.locate(&id).is_none() {
                return id;
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
