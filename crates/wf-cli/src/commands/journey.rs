//! `wf journey` — travel a route, resolving encounters along the way.

use colored::Colorize;

use wf_rand::RandomSource;
use wf_travel::{
    EventOutcome, NoticeKind, RouteOptions, SimConfig, Simulation, TravelEventKind, TravelPhase,
};

use super::{build_world, parse_seed, resolve_location, reveal_all};

/// Run the command.
pub fn run(
    seed: &str,
    from: &str,
    to: &str,
    tick_minutes: f64,
    level: u32,
) -> Result<(), String> {
    if tick_minutes <= 0.0 {
        return Err("tick-minutes must be positive".to_string());
    }
    let mut world = build_world(seed, None, None);
    reveal_all(&mut world.map);
    let from = resolve_location(&world.map, from)?;
    let to = resolve_location(&world.map, to)?;

    let rng = RandomSource::from_world_seed(&parse_seed(seed)).fork("session");
    let mut sim = Simulation::new(world.map, from, rng, SimConfig::default());
    let route = sim
        .find_route(to, &RouteOptions::default())
        .map_err(|e| e.to_string())?;
    println!(
        "{} legs, {:.0} minutes ahead",
        route.len(),
        route.total_minutes
    );
    sim.start_journey(to, &RouteOptions::default())
        .map_err(|e| e.to_string())?;

    let mut ticks = 0u32;
    while sim.phase() != TravelPhase::Completed {
        sim.tick(tick_minutes / sim.clock().minutes_per_second(), level);
        ticks += 1;
        if ticks > 100_000 {
            return Err("journey never completed".to_string());
        }

        if sim.phase() == TravelPhase::EventPending {
            let pending = sim.travel_state().and_then(|s| s.pending_event.clone());
            sim.resolve_event(auto_outcome(pending.as_ref().map(|e| &e.kind)));
        }

        for notice in sim.drain_notices() {
            let minute = format!("[{:>6.0}]", notice.minute);
            match notice.kind {
                NoticeKind::EncounterTriggered { .. } => {
                    println!("{} {}", minute.dimmed(), notice.message.yellow());
                }
                NoticeKind::TravelArrived { .. } => {
                    println!("{} {}", minute.dimmed(), notice.message.green().bold());
                }
                _ => println!("{} {}", minute.dimmed(), notice.message),
            }
        }
    }

    let name = sim
        .map()
        .location(sim.player_location())
        .map(|l| l.name.clone())
        .unwrap_or_default();
    println!("{}", format!("Journey complete: {name}").green());
    Ok(())
}

/// A sensible automatic resolution per encounter kind.
fn auto_outcome(kind: Option<&TravelEventKind>) -> EventOutcome {
    match kind {
        Some(TravelEventKind::Weather { delay_minutes, .. }) => EventOutcome::Delay {
            minutes: *delay_minutes,
        },
        Some(TravelEventKind::Caravan { .. }) => EventOutcome::Trade { completed: true },
        Some(TravelEventKind::Discovery {
            location: Some(location),
        }) => EventOutcome::Discovery {
            location: *location,
        },
        _ => EventOutcome::Continue,
    }
}
