//! Team Roster
//!
//! Opens the saved roster and logs it as a table. `team-roster demo` runs a
//! short scripted session against an in-memory store instead.

use tracing::info;
use tracing_subscriber::EnvFilter;

use team_roster::{
    roster::player::role_badges,
    AddDestination, FileGateway, MemoryGateway, PersistenceGateway, PlayerAttributes,
    QueueName, Role, RosterState, RosterStore, StoreConfig, TeamName, SLOT_ROLES, VERSION,
};

fn main() -> anyhow::Result<()> {
    let config = StoreConfig::from_env();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .init();

    info!("Team Roster v{}", VERSION);

    if std::env::args().nth(1).as_deref() == Some("demo") {
        return demo(&config);
    }

    info!("Snapshot: {} ({})", config.state_path.display(), config.format);
    let store = RosterStore::open(FileGateway::new(&config.state_path, config.codec()));
    render(store.state());
    Ok(())
}

/// Log the roster: both teams slot by slot, then both queues.
fn render(state: &RosterState) {
    for team in state.teams() {
        info!("=== Team {} ({}/6) ===", team.name(), team.occupied_count());
        for (index, slot) in team.slots().iter().enumerate() {
            let role = SLOT_ROLES[index];
            match slot.player() {
                Some(p) => info!(
                    "  {} {:<8} {:<16} {:<16} {:<12} {:>3} {}",
                    index + 1,
                    role,
                    p.game_handle,
                    p.stream_handle.as_deref().unwrap_or("-"),
                    p.rank,
                    p.games_played,
                    role_badges(&p.roles)
                ),
                None => info!("  {} {:<8} -", index + 1, role),
            }
        }
    }

    for queue in state.queues() {
        info!("=== Queue {} ({}) ===", queue.name(), queue.len());
        for p in queue.players() {
            info!(
                "  {:<16} {:<16} {:<12} {:>3} {}",
                p.game_handle,
                p.stream_handle.as_deref().unwrap_or("-"),
                p.rank,
                p.games_played,
                role_badges(&p.roles)
            );
        }
    }
}

/// Scripted session: fill a team, rotate a waiting player in, finish a game.
fn demo(config: &StoreConfig) -> anyhow::Result<()> {
    info!("=== Starting Demo Session ===");
    let mut store = RosterStore::open(MemoryGateway::new(config.codec()));

    let lineup = [
        ("Magneto", Role::Tank),
        ("Groot", Role::Tank),
        ("Hawkeye", Role::Dps),
        ("Psylocke", Role::Dps),
        ("Luna", Role::Support),
        ("Mantis", Role::Support),
    ];
    for (handle, role) in lineup {
        store.add_player(
            PlayerAttributes::new(handle, "Diamond").with_roles([role]),
            AddDestination::Team(TeamName::Gandony),
        )?;
    }

    let sub = store.add_player(
        PlayerAttributes::new("Black Panther", "Grandmaster")
            .with_stream_handle("bp_live")
            .with_roles([Role::Dps]),
        "queue:waiting".parse()?,
    )?;

    store.increment_games();
    if let Some(evicted) =
        store.move_from_queue_to_team_slot(QueueName::Waiting, sub, TeamName::Gandony, 2)?
    {
        info!("Rotated out {}", evicted.short());
    }
    store.swap_team_slots(TeamName::Gandony, 0, TeamName::Pupsiki, 0)?;
    store.edit_player_directive(
        sub,
        PlayerAttributes::new("Black Panther", "Celestial")
            .with_stream_handle("bp_live")
            .with_roles([Role::Dps]),
        "keep",
    )?;

    for event in store.take_events() {
        info!("{}", serde_json::to_string(&event)?);
    }
    render(store.state());

    // Round-trip through the configured snapshot format
    let (state, mut gateway) = store.into_parts();
    let restored = gateway.load();
    info!(
        "Snapshot round-trip: {}",
        if restored.as_ref() == Some(&state) { "OK" } else { "MISMATCH" }
    );
    Ok(())
}
