//! End-to-end: generate a world, route across it, and travel the route.

use wf_core::{DiscoveryState, LocationId, Point};
use wf_rand::RandomSource;
use wf_travel::{
    EventOutcome, MachineConfig, RouteOptions, SimConfig, Simulation, TravelPhase,
};
use wf_worldgen::{StorySite, WorldGenConfig, WorldGenerator};

fn generated_world() -> wf_core::WorldMap {
    let config = WorldGenConfig::default()
        .with_seed(42u32)
        .with_story_site(StorySite::fixed(
            "Hollowmere",
            wf_core::LocationKind::Town,
            Point::new(300.0, 500.0),
        ))
        .with_story_site(StorySite::fixed(
            "Drift Shrine",
            wf_core::LocationKind::Shrine,
            Point::new(700.0, 480.0),
        ));
    let mut world = WorldGenerator::new(config).generate();
    assert!(world.report.connected);

    // The scouts have been busy: reveal the whole map so any pair of
    // locations is routable.
    let ids: Vec<LocationId> = world.map.locations().map(|l| l.id).collect();
    for id in ids {
        world.map.discover_location(id).unwrap();
    }
    world.map
}

#[test]
fn a_journey_across_a_generated_world_arrives() {
    let map = generated_world();
    let from = map.find_location("Hollowmere").unwrap().id;
    let to = map.find_location("Drift Shrine").unwrap().id;

    let mut sim = Simulation::new(
        map,
        from,
        RandomSource::new(42),
        SimConfig::default()
            .with_start_minute(0.0)
            .with_machine(MachineConfig::instant()),
    );
    let route = sim.find_route(to, &RouteOptions::default()).unwrap();
    assert!(!route.is_empty());
    assert!(route.total_minutes > 0.0);

    assert!(sim.start_journey(to, &RouteOptions::default()).unwrap());
    let mut guard = 0;
    while sim.phase() != TravelPhase::Completed {
        let report = sim.tick(5.0 * 60.0, 3);
        if report.phase == TravelPhase::EventPending {
            assert!(sim.resolve_event(EventOutcome::Continue));
        }
        guard += 1;
        assert!(guard < 10_000, "journey never completed");
    }
    assert_eq!(sim.player_location(), to);
    assert_eq!(
        sim.map().location(to).unwrap().discovery,
        DiscoveryState::Visited
    );
}

#[test]
fn identical_generated_journeys_replay_identically() {
    let run = || {
        let map = generated_world();
        let from = map.find_location("Hollowmere").unwrap().id;
        let to = map.find_location("Drift Shrine").unwrap().id;
        let mut sim = Simulation::new(
            map,
            from,
            RandomSource::new(7),
            SimConfig::default()
                .with_start_minute(0.0)
                .with_machine(MachineConfig::instant()),
        );
        sim.start_journey(to, &RouteOptions::default()).unwrap();
        let mut log = Vec::new();
        let mut guard = 0;
        while sim.phase() != TravelPhase::Completed && guard < 10_000 {
            sim.tick(5.0 * 60.0, 3);
            if sim.phase() == TravelPhase::EventPending {
                sim.resolve_event(EventOutcome::Continue);
            }
            log.extend(sim.drain_notices());
            guard += 1;
        }
        serde_json::to_string(&log).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn safety_bias_never_beats_time_bias_on_minutes() {
    let map = generated_world();
    let from = map.find_location("Hollowmere").unwrap().id;
    let to = map.find_location("Drift Shrine").unwrap().id;

    let sim = Simulation::new(
        map,
        from,
        RandomSource::new(42),
        SimConfig::default(),
    );
    let fast = sim.find_route(to, &RouteOptions::default()).unwrap();
    let safe = sim
        .find_route(to, &RouteOptions::default().safest(1.0))
        .unwrap();
    assert!(fast.total_minutes <= safe.total_minutes + 1e-9);
}
