use serde::{Deserialize, Serialize};

use wf_core::{LocationId, Point, WorldMap};
use wf_rand::RandomSource;

use crate::clock::GameClock;
use crate::error::TravelResult;
use crate::machine::{MachineConfig, TravelMachine, TravelPhase, TravelState};
use crate::outbox::{Notice, NoticeKind, Outbox};
use crate::roller::{EncounterRoller, EventOutcome, RollerConfig};
use crate::router::{RouteOptions, Router};
use crate::scheduler::{
    ConsequenceKind, EventScheduler, RewardKind, SchedulerConfig, SpawnContext, WorldEventId,
};
use crate::snapshot::Snapshot;

/// Tuning for a simulation instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Game minutes per elapsed real second.
    pub minutes_per_real_second: f64,
    /// Game minute the clock starts at.
    pub start_minute: f64,
    /// Outbox capacity (0 = unlimited).
    pub max_notices: usize,
    /// World-event scheduler tuning.
    pub scheduler: SchedulerConfig,
    /// Travel machine tuning.
    pub machine: MachineConfig,
    /// Encounter roller tuning.
    pub roller: RollerConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            minutes_per_real_second: 1.0,
            start_minute: 8.0 * 60.0,
            max_notices: 0,
            scheduler: SchedulerConfig::default(),
            machine: MachineConfig::default(),
            roller: RollerConfig::default(),
        }
    }
}

impl SimConfig {
    /// Set the real-time ratio.
    pub fn with_time_ratio(mut self, minutes_per_real_second: f64) -> Self {
        self.minutes_per_real_second = minutes_per_real_second;
        self
    }

    /// Set the starting game minute.
    pub fn with_start_minute(mut self, minute: f64) -> Self {
        self.start_minute = minute;
        self
    }

    /// Replace the scheduler tuning.
    pub fn with_scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Replace the machine tuning.
    pub fn with_machine(mut self, machine: MachineConfig) -> Self {
        self.machine = machine;
        self
    }

    /// Replace the roller tuning.
    pub fn with_roller(mut self, roller: RollerConfig) -> Self {
        self.roller = roller;
        self
    }
}

/// What one tick produced, beyond the drained notices.
#[derive(Debug, Clone)]
pub struct TickReport {
    /// The game minute at the end of the tick.
    pub minute: f64,
    /// The travel phase after the tick.
    pub phase: TravelPhase,
    /// The traveler's position, while a journey is underway.
    pub traveler_position: Option<Point>,
    /// Set on the tick a journey completes.
    pub arrived: Option<LocationId>,
}

/// One player's world: map, clock, events, and travel.
///
/// Single-threaded and cooperative: one [`tick`](Simulation::tick)
/// advances world events, travel progress, and encounter rolls in a
/// fixed order. Each instance owns its own random streams, so separate
/// sessions never disturb each other.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    map: WorldMap,
    clock: GameClock,
    rng: RandomSource,
    scheduler: EventScheduler,
    machine: TravelMachine,
    roller: Option<EncounterRoller>,
    outbox: Outbox,
    player_location: LocationId,
}

impl Simulation {
    /// Create a simulation over a generated map.
    ///
    /// `rng` is the session stream; the scheduler forks its own stream
    /// from it, and every journey forks a replayable roller stream.
    pub fn new(
        map: WorldMap,
        player_location: LocationId,
        rng: RandomSource,
        config: SimConfig,
    ) -> Self {
        let scheduler =
            EventScheduler::new(config.scheduler.clone(), rng.fork("world-events"));
        let clock = GameClock::new(config.start_minute, config.minutes_per_real_second);
        let machine = TravelMachine::new(config.machine.clone());
        let outbox = Outbox::new(config.max_notices);
        Self {
            config,
            map,
            clock,
            rng,
            scheduler,
            machine,
            roller: None,
            outbox,
            player_location,
        }
    }

    /// The world map.
    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    /// The world map, mutably.
    pub fn map_mut(&mut self) -> &mut WorldMap {
        &mut self.map
    }

    /// The game clock.
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// The event scheduler.
    pub fn scheduler(&self) -> &EventScheduler {
        &self.scheduler
    }

    /// The current travel phase.
    pub fn phase(&self) -> TravelPhase {
        self.machine.phase()
    }

    /// The active journey, if any.
    pub fn travel_state(&self) -> Option<&TravelState> {
        self.machine.state()
    }

    /// Where the player currently is.
    pub fn player_location(&self) -> LocationId {
        self.player_location
    }

    /// Route from the player's location to a destination.
    pub fn find_route(
        &self,
        to: LocationId,
        options: &RouteOptions,
    ) -> TravelResult<wf_core::Route> {
        Router::new(&self.map).find_route(self.player_location, to, options)
    }

    /// Plan and begin a journey to `to`.
    ///
    /// Routing failures propagate as values; `Ok(false)` means a journey
    /// was already underway and nothing changed. The journey's encounter
    /// stream is forked from the start minute and origin, so a reloaded
    /// session replays the same encounters.
    pub fn start_journey(
        &mut self,
        to: LocationId,
        options: &RouteOptions,
    ) -> TravelResult<bool> {
        let route = self.find_route(to, options)?;
        let minute = self.clock.minutes();
        let roller = EncounterRoller::for_journey(
            self.config.roller.clone(),
            &self.rng,
            minute,
            self.player_location,
        );
        let started = self.machine.start(&self.map, route, minute, &mut self.outbox);
        if started {
            self.roller = Some(roller);
        }
        Ok(started)
    }

    /// Advance the whole simulation by elapsed real seconds.
    pub fn tick(&mut self, real_seconds: f64, player_level: u32) -> TickReport {
        let dt = self.clock.advance(real_seconds);
        let minute = self.clock.minutes();
        let hour = self.clock.hour_of_day();

        let ctx = SpawnContext {
            minute,
            hour_of_day: hour,
            player_location: Some(self.player_location),
        };
        if self.scheduler.should_spawn(&ctx) {
            if let Some(id) = self.scheduler.spawn(&ctx, &self.map) {
                let kind = self.scheduler.event(id).map(|e| e.kind);
                if let Some(kind) = kind {
                    self.outbox.emit(
                        minute,
                        NoticeKind::WorldEventSpawned { id, kind },
                        format!("A {kind} begins"),
                    );
                }
            }
        }
        for id in self.scheduler.update(minute) {
            if let Some((event, consequences)) = self.scheduler.complete(id) {
                self.apply_consequences(&consequences);
                self.outbox.emit(
                    minute,
                    NoticeKind::WorldEventCompleted { id: event.id },
                    format!("The {} has run its course", event.kind),
                );
            }
        }

        self.machine.tick(
            &mut self.map,
            self.roller.as_mut(),
            minute,
            dt,
            hour,
            player_level,
            &mut self.outbox,
        );
        let arrived = self.machine.arrival();
        if let Some(at) = arrived {
            self.player_location = at;
            self.roller = None;
        }

        TickReport {
            minute,
            phase: self.machine.phase(),
            traveler_position: self.machine.state().map(|s| s.position),
            arrived,
        }
    }

    /// Resolve the pending travel event. No-op (`false`) when nothing is
    /// pending.
    pub fn resolve_event(&mut self, outcome: EventOutcome) -> bool {
        let minute = self.clock.minutes();
        self.machine
            .resume(&mut self.map, outcome, minute, &mut self.outbox)
    }

    /// Cancel any active journey.
    pub fn cancel_travel(&mut self) -> bool {
        let minute = self.clock.minutes();
        let cancelled = self.machine.cancel(minute, &mut self.outbox);
        if cancelled {
            self.roller = None;
        }
        cancelled
    }

    /// Intercept a live world event, claiming its rewards.
    pub fn intercept_event(&mut self, id: WorldEventId) -> Option<Vec<RewardKind>> {
        let minute = self.clock.minutes();
        let rewards = self.scheduler.intercept(id, minute)?;
        for reward in &rewards {
            if let RewardKind::MapRumor(location) = reward {
                if self.map.rumor_location(*location).unwrap_or(false) {
                    self.outbox.emit(
                        minute,
                        NoticeKind::LocationRevealed {
                            location: *location,
                        },
                        "A rumor marks the map",
                    );
                }
            }
        }
        Some(rewards)
    }

    /// Take every pending notice, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.outbox.drain()
    }

    /// Pending notices without draining them.
    pub fn notices(&self) -> &[Notice] {
        self.outbox.notices()
    }

    /// Capture the resumable state of this session.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            config: self.config.clone(),
            rng: self.rng.clone(),
            clock: self.clock.clone(),
            map: self.map.clone(),
            scheduler: self.scheduler.clone(),
            machine: self.machine.clone(),
            roller: self.roller.clone(),
            player_location: self.player_location,
        }
    }

    /// Rebuild a session from a snapshot, bit-for-bit.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let outbox = Outbox::new(snapshot.config.max_notices);
        Self {
            config: snapshot.config,
            map: snapshot.map,
            clock: snapshot.clock,
            rng: snapshot.rng,
            scheduler: snapshot.scheduler,
            machine: snapshot.machine,
            roller: snapshot.roller,
            outbox,
            player_location: snapshot.player_location,
        }
    }

    fn apply_consequences(&mut self, consequences: &[ConsequenceKind]) {
        for consequence in consequences {
            match consequence {
                ConsequenceKind::ZoneDangerRise { zone, amount } => {
                    if let Some(zone) = self.map.zone_mut(*zone) {
                        zone.danger += amount;
                    }
                }
                ConsequenceKind::LocationRaided(location) => {
                    if let Some(location) = self.map.location_mut(*location) {
                        location.detail = Some("Raided; the survivors are rebuilding".to_string());
                    }
                }
            }
        }
    }
}
