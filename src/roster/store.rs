//! Roster Store
//!
//! Owns the roster and its persistence gateway. Every intent a presentation
//! layer raises goes through here: the transition is applied to the state,
//! the new state is saved, and the resulting events are buffered for the
//! caller to drain.

use tracing::{debug, error, info};

use crate::core::hash::short_hex;
use crate::core::id::PlayerId;
use crate::persist::{PersistenceError, PersistenceGateway};
use crate::roster::error::RosterError;
use crate::roster::events::RosterEvent;
use crate::roster::location::{AddDestination, EditDestination, Location};
use crate::roster::player::PlayerAttributes;
use crate::roster::queue::QueueName;
use crate::roster::state::RosterState;
use crate::roster::team::TeamName;
use crate::roster::transition::{EditRequest, Seating};

/// Single owner of the roster state.
pub struct RosterStore<G: PersistenceGateway> {
    state: RosterState,
    gateway: G,
    pending_events: Vec<RosterEvent>,
}

impl<G: PersistenceGateway> RosterStore<G> {
    /// Open a store, restoring the last snapshot or starting empty.
    pub fn open(mut gateway: G) -> Self {
        let state = match gateway.load() {
            Some(state) => {
                info!(
                    "Restored roster: {} seated, {} queued (digest {})",
                    state.seated_count(),
                    state.queued_count(),
                    short_hex(&state.compute_hash())
                );
                state
            }
            None => {
                info!("Starting with an empty roster");
                RosterState::new()
            }
        };
        Self::with_state(state, gateway)
    }

    /// Create a store around an existing state. Nothing is saved until the
    /// first mutation.
    pub fn with_state(state: RosterState, gateway: G) -> Self {
        Self {
            state,
            gateway,
            pending_events: Vec::new(),
        }
    }

    /// Current roster, for rendering.
    pub fn state(&self) -> &RosterState {
        &self.state
    }

    /// Persistence gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Take buffered events (consumes them).
    pub fn take_events(&mut self) -> Vec<RosterEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Save the current roster now, reporting failure to the caller.
    pub fn flush(&mut self) -> Result<(), PersistenceError> {
        self.gateway.save(&self.state)
    }

    /// Tear down into state and gateway.
    pub fn into_parts(self) -> (RosterState, G) {
        (self.state, self.gateway)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Create a player in the waiting queue or a team's first free slot.
    pub fn add_player(
        &mut self,
        attributes: PlayerAttributes,
        destination: AddDestination,
    ) -> Result<PlayerId, RosterError> {
        let (player_id, location) = self
            .state
            .add_player(attributes, destination)
            .inspect_err(|e| debug!("Add rejected: {}", e))?;

        debug!("Added player {} at {}", player_id.short(), location);
        self.commit(vec![RosterEvent::PlayerAdded { player_id, location }]);
        Ok(player_id)
    }

    /// Seat a queued player; any occupant goes to the tail of `played`.
    pub fn move_from_queue_to_team_slot(
        &mut self,
        queue: QueueName,
        player_id: PlayerId,
        team: TeamName,
        slot: usize,
    ) -> Result<Option<PlayerId>, RosterError> {
        let Seating { evicted } = self
            .state
            .move_from_queue_to_team_slot(queue, player_id, team, slot)
            .inspect_err(|e| debug!("Seat rejected: {}", e))?;

        let mut events = Vec::with_capacity(2);
        if let Some(evicted_id) = evicted {
            info!("Player {} evicted from {}:{} to played", evicted_id.short(), team, slot);
            events.push(RosterEvent::PlayerEvicted { player_id: evicted_id, team, slot });
        }
        debug!("Player {} seated at {}:{} from {}", player_id.short(), team, slot, queue);
        events.push(RosterEvent::PlayerSeated { player_id, from: queue, team, slot });

        self.commit(events);
        Ok(evicted)
    }

    /// Exchange two team slots.
    pub fn swap_team_slots(
        &mut self,
        from_team: TeamName,
        from_slot: usize,
        to_team: TeamName,
        to_slot: usize,
    ) -> Result<(), RosterError> {
        let moved = self
            .state
            .swap_team_slots(from_team, from_slot, to_team, to_slot)
            .inspect_err(|e| debug!("Swap rejected: {}", e))?;

        if !moved {
            return Ok(());
        }
        debug!("Swapped {}:{} <-> {}:{}", from_team, from_slot, to_team, to_slot);
        self.commit(vec![RosterEvent::SlotsSwapped { from_team, from_slot, to_team, to_slot }]);
        Ok(())
    }

    /// Send a seated player to a queue. Empty slot is a no-op.
    pub fn move_team_slot_to_queue(
        &mut self,
        team: TeamName,
        slot: usize,
        queue: QueueName,
    ) -> Result<Option<PlayerId>, RosterError> {
        let moved = self
            .state
            .move_team_slot_to_queue(team, slot, queue)
            .inspect_err(|e| debug!("Bench rejected: {}", e))?;

        if let Some(player_id) = moved {
            debug!("Player {} benched from {}:{} to {}", player_id.short(), team, slot, queue);
            self.commit(vec![RosterEvent::PlayerBenched { player_id, team, slot, queue }]);
        }
        Ok(moved)
    }

    /// Send a seated player to the played queue.
    pub fn move_team_slot_to_played(
        &mut self,
        team: TeamName,
        slot: usize,
    ) -> Result<Option<PlayerId>, RosterError> {
        self.move_team_slot_to_queue(team, slot, QueueName::Played)
    }

    /// Apply an edit request.
    ///
    /// Once the request is accepted the new attributes stick and are saved,
    /// even when the redestination is then rejected. The returned location
    /// is where the player ends up.
    pub fn edit_player(&mut self, request: EditRequest) -> Result<Location, RosterError> {
        let player_id = request.player_id;
        let outcome = self
            .state
            .edit_player(request)
            .inspect_err(|e| debug!("Edit rejected: {}", e))?;

        let mut events = Vec::with_capacity(2);
        if outcome.attributes_changed {
            events.push(RosterEvent::PlayerEdited { player_id });
        }
        match &outcome.relocation {
            Ok(Some(relocation)) => {
                debug!("Player {} moved {} -> {}", player_id.short(), relocation.from, relocation.to);
                events.push(RosterEvent::PlayerRelocated {
                    player_id,
                    from: relocation.from,
                    to: relocation.to,
                });
            }
            Ok(None) => {}
            Err(e) => debug!("Edit of {} kept its location: {}", player_id.short(), e),
        }

        if !events.is_empty() {
            self.commit(events);
        }
        outcome.relocation?;

        self.state.locate(&player_id).ok_or_else(|| RosterError::NotFound {
            player_id,
            scope: "roster".into(),
        })
    }

    /// Apply an edit whose destination arrives as directive text.
    ///
    /// The attributes are applied and saved before the directive is looked
    /// at, so an unknown team or a bad slot in the text still keeps the
    /// edit. The directive error is returned afterwards.
    pub fn edit_player_directive(
        &mut self,
        player_id: PlayerId,
        attributes: PlayerAttributes,
        directive: &str,
    ) -> Result<Location, RosterError> {
        let destination = directive.parse::<EditDestination>();
        if let Err(e) = &destination {
            debug!("Edit of {} ignores directive {:?}: {}", player_id.short(), directive, e);
        }

        let location = self.edit_player(EditRequest {
            player_id,
            attributes,
            destination: destination.as_ref().copied().unwrap_or_default(),
        })?;
        destination?;
        Ok(location)
    }

    /// Add one game to every seated player.
    pub fn increment_games(&mut self) {
        let players = self.state.increment_games();
        debug!("Incremented games for {} seated players", players);
        self.commit(vec![RosterEvent::GamesIncremented { players }]);
    }

    /// Drop every player from teams and queues.
    pub fn clear_all(&mut self) {
        let dropped = self.state.clear_all();
        info!("Cleared roster ({} players dropped)", dropped);
        self.commit(vec![RosterEvent::RosterCleared { dropped }]);
    }

    /// Drop every seated player; queues stay as they are.
    pub fn clear_teams_only(&mut self) {
        let dropped = self.state.clear_teams_only();
        info!("Cleared teams ({} players dropped)", dropped);
        self.commit(vec![RosterEvent::TeamsCleared { dropped }]);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Record applied events and save.
    ///
    /// A failed save is logged and does not undo the transition: the
    /// in-memory roster stays authoritative and the next save retries.
    fn commit(&mut self, events: Vec<RosterEvent>) {
        debug_assert!(self.state.check_invariants().is_ok(), "roster invariant broken");

        if let Err(e) = self.gateway.save(&self.state) {
            error!("Failed to save roster: {}", e);
        }
        self.pending_events.extend(events);
    }
}

// =============================================================================
// TESTS
// =============================================================================
