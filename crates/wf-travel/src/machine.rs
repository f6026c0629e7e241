use serde::{Deserialize, Serialize};

use wf_core::{LocationId, PathKind, Point, Route, WorldMap};

use crate::outbox::{NoticeKind, Outbox};
use crate::roller::{CombatResult, EncounterRoller, EventOutcome, RollContext, TravelEvent};

/// The phase of the travel state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelPhase {
    /// No journey underway.
    #[default]
    Idle,
    /// Packing up; a brief delay before moving.
    Departing,
    /// Moving along the route.
    Traveling,
    /// Frozen while an encounter awaits resolution.
    EventPending,
    /// A brief delay at the destination gates.
    Arriving,
    /// Arrived; resets to idle on the next tick.
    Completed,
}

impl std::fmt::Display for TravelPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Departing => write!(f, "departing"),
            Self::Traveling => write!(f, "traveling"),
            Self::EventPending => write!(f, "event_pending"),
            Self::Arriving => write!(f, "arriving"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// The mutable record of an active journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelState {
    /// The route being traveled.
    pub route: Route,
    /// Game minute the journey started.
    pub started_minute: f64,
    /// Index of the current segment.
    pub segment_index: usize,
    /// Minutes elapsed within the current segment.
    pub segment_elapsed: f64,
    /// Fractional progress within the current segment, `[0, 1]`.
    pub segment_progress: f64,
    /// Fractional progress across the whole route, `[0, 1]`.
    pub total_progress: f64,
    /// Estimated arrival minute (pushed back by delays).
    pub eta_minute: f64,
    /// The traveler's interpolated world position.
    pub position: Point,
    /// The unresolved encounter, if one is pending.
    pub pending_event: Option<TravelEvent>,
    /// Encounter rolls left for this journey.
    pub rolls_remaining: u32,
    /// Delay minutes still to pay down before progress resumes.
    pub delay_remaining: f64,
}

/// Tuning for the travel machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Delay between starting and actually moving.
    pub departure_delay_minutes: f64,
    /// Delay between reaching the destination and completing.
    pub arrival_delay_minutes: f64,
    /// Game minutes between encounter rolls.
    pub roll_interval_minutes: f64,
    /// Encounter-roll budget per journey.
    pub max_rolls_per_journey: u32,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            departure_delay_minutes: 2.0,
            arrival_delay_minutes: 2.0,
            roll_interval_minutes: 15.0,
            max_rolls_per_journey: 12,
        }
    }
}

impl MachineConfig {
    /// A config with no departure or arrival delay.
    pub fn instant() -> Self {
        Self {
            departure_delay_minutes: 0.0,
            arrival_delay_minutes: 0.0,
            ..Self::default()
        }
    }

    /// Set the encounter-roll interval.
    pub fn with_roll_interval(mut self, minutes: f64) -> Self {
        self.roll_interval_minutes = minutes;
        self
    }

    /// Set the encounter-roll budget per journey.
    pub fn with_max_rolls(mut self, rolls: u32) -> Self {
        self.max_rolls_per_journey = rolls;
        self
    }
}

/// Owns the lifecycle of an active journey.
///
/// Phases run idle → departing → traveling ⇄ event_pending → arriving →
/// completed → idle. Progress only advances in `traveling`; a pending
/// encounter freezes both progress and position until
/// [`TravelMachine::resume`]. Misuse — resuming with nothing pending,
/// ticking while idle — is a safe no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelMachine {
    config: MachineConfig,
    phase: TravelPhase,
    state: Option<TravelState>,
    phase_started_minute: f64,
    last_roll_minute: f64,
}

impl TravelMachine {
    /// Create an idle machine.
    pub fn new(config: MachineConfig) -> Self {
        Self {
            config,
            phase: TravelPhase::Idle,
            state: None,
            phase_started_minute: 0.0,
            last_roll_minute: 0.0,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> TravelPhase {
        self.phase
    }

    /// The active journey, if any.
    pub fn state(&self) -> Option<&TravelState> {
        self.state.as_ref()
    }

    /// Whether a journey is underway in any phase.
    pub fn is_active(&self) -> bool {
        self.phase != TravelPhase::Idle
    }

    /// The destination, if the machine has just completed a journey.
    pub fn arrival(&self) -> Option<LocationId> {
        if self.phase == TravelPhase::Completed {
            self.state.as_ref().map(|s| s.route.to)
        } else {
            None
        }
    }

    /// Begin a journey. Returns `false` (leaving any active journey
    /// untouched) unless the machine is idle.
    pub fn start(
        &mut self,
        map: &WorldMap,
        route: Route,
        minute: f64,
        outbox: &mut Outbox,
    ) -> bool {
        if self.phase != TravelPhase::Idle {
            return false;
        }
        let position = map
            .location(route.from)
            .map(|l| l.position)
            .unwrap_or_default();
        let destination = route.to;
        let eta = minute
            + self.config.departure_delay_minutes
            + route.total_minutes
            + self.config.arrival_delay_minutes;
        self.state = Some(TravelState {
            route,
            started_minute: minute,
            segment_index: 0,
            segment_elapsed: 0.0,
            segment_progress: 0.0,
            total_progress: 0.0,
            eta_minute: eta,
            position,
            pending_event: None,
            rolls_remaining: self.config.max_rolls_per_journey,
            delay_remaining: 0.0,
        });
        self.phase = TravelPhase::Departing;
        self.phase_started_minute = minute;
        self.last_roll_minute = minute;
        let name = map
            .location(destination)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| destination.to_string());
        outbox.emit(
            minute,
            NoticeKind::TravelStarted { to: destination },
            format!("Set out for {name}"),
        );
        true
    }

    /// Advance the journey by one tick. Safe to call in any phase.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        map: &mut WorldMap,
        roller: Option<&mut EncounterRoller>,
        minute: f64,
        dt_minutes: f64,
        hour_of_day: f64,
        player_level: u32,
        outbox: &mut Outbox,
    ) {
        match self.phase {
            TravelPhase::Idle | TravelPhase::EventPending | TravelPhase::Arriving => {}
            TravelPhase::Completed => {
                self.phase = TravelPhase::Idle;
                self.state = None;
            }
            TravelPhase::Departing => {
                let ready_at = self.phase_started_minute + self.config.departure_delay_minutes;
                if minute >= ready_at {
                    self.phase = TravelPhase::Traveling;
                    let travel_dt = (minute - ready_at).min(dt_minutes);
                    self.advance(map, roller, minute, travel_dt, hour_of_day, player_level, outbox);
                }
            }
            TravelPhase::Traveling => {
                self.advance(map, roller, minute, dt_minutes, hour_of_day, player_level, outbox);
            }
        }

        if self.phase == TravelPhase::Arriving
            && minute >= self.phase_started_minute + self.config.arrival_delay_minutes
        {
            self.complete(map, minute, outbox);
        }
    }

    /// Resolve the pending encounter and resume travel.
    ///
    /// A no-op returning `false` when nothing is pending.
    pub fn resume(
        &mut self,
        map: &mut WorldMap,
        outcome: EventOutcome,
        minute: f64,
        outbox: &mut Outbox,
    ) -> bool {
        if self.phase != TravelPhase::EventPending {
            return false;
        }
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        let Some(mut event) = state.pending_event.take() else {
            return false;
        };
        event.resolved = true;
        event.outcome = Some(outcome);

        match outcome {
            EventOutcome::Continue | EventOutcome::Trade { .. } => {}
            EventOutcome::Delay { minutes } => {
                state.delay_remaining += minutes.max(0.0);
                state.eta_minute += minutes.max(0.0);
            }
            EventOutcome::Combat { result } => {
                let delay = match result {
                    CombatResult::Victory => 0.0,
                    CombatResult::Fled => 10.0,
                    CombatResult::Defeat => 60.0,
                };
                state.delay_remaining += delay;
                state.eta_minute += delay;
            }
            EventOutcome::Discovery { location } => {
                if map.discover_location(location).unwrap_or(false) {
                    let name = map
                        .location(location)
                        .map(|l| l.name.clone())
                        .unwrap_or_else(|| location.to_string());
                    outbox.emit(
                        minute,
                        NoticeKind::LocationRevealed { location },
                        format!("Learned the way to {name}"),
                    );
                }
            }
        }

        self.phase = TravelPhase::Traveling;
        true
    }

    /// Discard the journey from any active phase. Returns `false` when
    /// already idle.
    pub fn cancel(&mut self, minute: f64, outbox: &mut Outbox) -> bool {
        if self.phase == TravelPhase::Idle {
            return false;
        }
        self.state = None;
        self.phase = TravelPhase::Idle;
        outbox.emit(minute, NoticeKind::TravelCancelled, "Turned back");
        true
    }

    #[allow(clippy::too_many_arguments)]
    fn advance(
        &mut self,
        map: &mut WorldMap,
        roller: Option<&mut EncounterRoller>,
        minute: f64,
        dt_minutes: f64,
        hour_of_day: f64,
        player_level: u32,
        outbox: &mut Outbox,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.route.is_empty() {
            state.total_progress = 1.0;
            self.phase = TravelPhase::Arriving;
            self.phase_started_minute = minute;
            return;
        }

        // Outstanding delay eats travel time first.
        let mut dt = dt_minutes;
        if state.delay_remaining > 0.0 {
            let paid = state.delay_remaining.min(dt);
            state.delay_remaining -= paid;
            dt -= paid;
            if dt <= 0.0 {
                return;
            }
        }

        state.segment_elapsed += dt;
        let mut arrived = false;
        while state.segment_elapsed >= state.route.segments[state.segment_index].minutes {
            let segment = state.route.segments[state.segment_index];
            // Leftover time rolls into the next segment; in progress terms
            // this is the leftover fraction rescaled by the ratio of the
            // adjacent segment durations.
            let leftover = state.segment_elapsed - segment.minutes;
            if state.segment_index + 1 < state.route.segments.len() {
                let _ = map.visit_location(segment.to);
                let name = map
                    .location(segment.to)
                    .map(|l| l.name.clone())
                    .unwrap_or_else(|| segment.to.to_string());
                outbox.emit(
                    minute,
                    NoticeKind::WaypointReached { at: segment.to },
                    format!("Passed through {name}"),
                );
                state.segment_index += 1;
                state.segment_elapsed = leftover;
            } else {
                state.segment_elapsed = segment.minutes;
                arrived = true;
                break;
            }
        }

        let segment = state.route.segments[state.segment_index];
        state.segment_progress = (state.segment_elapsed / segment.minutes).clamp(0.0, 1.0);
        let completed: f64 = state.route.segments[..state.segment_index]
            .iter()
            .map(|s| s.minutes)
            .sum();
        state.total_progress =
            ((completed + state.segment_elapsed) / state.route.total_minutes).clamp(0.0, 1.0);
        if let Some(path) = map.path(segment.path) {
            let t = if segment.from == path.a {
                state.segment_progress
            } else {
                1.0 - state.segment_progress
            };
            state.position = path.position_at(t);
        }

        if arrived {
            self.phase = TravelPhase::Arriving;
            self.phase_started_minute = minute;
            return;
        }

        if let Some(roller) = roller {
            if state.rolls_remaining > 0
                && minute - self.last_roll_minute >= self.config.roll_interval_minutes
            {
                self.last_roll_minute = minute;
                state.rolls_remaining -= 1;
                let zone_danger = map
                    .location(segment.from)
                    .and_then(|l| map.zone(l.zone))
                    .map(|z| z.danger)
                    .unwrap_or(1.0);
                let ctx = RollContext {
                    minute,
                    hour_of_day,
                    segment_progress: state.segment_progress,
                    path_kind: map
                        .path(segment.path)
                        .map(|p| p.kind)
                        .unwrap_or(PathKind::Trail),
                    danger: segment.danger * zone_danger,
                    position: state.position,
                    player_level,
                };
                if roller.should_trigger(&ctx) {
                    let event = roller.generate(&ctx, map);
                    outbox.emit(
                        minute,
                        NoticeKind::EncounterTriggered {
                            event: event.clone(),
                        },
                        format!("Encounter on the road: {}", event.kind.label()),
                    );
                    state.pending_event = Some(event);
                    self.phase = TravelPhase::EventPending;
                }
            }
        }
    }

    fn complete(&mut self, map: &mut WorldMap, minute: f64, outbox: &mut Outbox) {
        if let Some(state) = self.state.as_mut() {
            let destination = state.route.to;
            let _ = map.visit_location(destination);
            state.total_progress = 1.0;
            state.segment_progress = 1.0;
            if let Some(location) = map.location(destination) {
                state.position = location.position;
            }
            let name = map
                .location(destination)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| destination.to_string());
            outbox.emit(
                minute,
                NoticeKind::TravelArrived { at: destination },
                format!("Arrived at {name}"),
            );
        }
        self.phase = TravelPhase::Completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roller::RollerConfig;
    use crate::router::{RouteOptions, Router};
    use wf_core::{
        Biome, DiscoveryState, Location, LocationKind, Path, PathId, Rect, Zone, ZoneId,
    };
    use wf_rand::RandomSource;

    /// A straight west-east line of villages with 10-minute roads.
    fn line_map(count: u32) -> WorldMap {
        let mut map = WorldMap::new();
        map.insert_zone(Zone::new(
            ZoneId(0),
            Biome::Meadows,
            Rect::new(0.0, 0.0, 1000.0, 100.0),
        ))
        .unwrap();
        for i in 0..count {
            let mut l = Location::new(
                LocationId(i),
                ZoneId(0),
                format!("Stop {i}"),
                LocationKind::Village,
                Point::new(f64::from(i) * 10.0, 0.0),
            );
            l.discovery = DiscoveryState::Discovered;
            map.insert_location(l).unwrap();
        }
        for i in 0..count - 1 {
            map.insert_path(Path {
                id: PathId(i),
                kind: PathKind::Road,
                a: LocationId(i),
                b: LocationId(i + 1),
                points: vec![
                    Point::new(f64::from(i) * 10.0, 0.0),
                    Point::new(f64::from(i + 1) * 10.0, 0.0),
                ],
                minutes: 10.0,
                danger: 0.8,
                discovery: DiscoveryState::Discovered,
            })
            .unwrap();
        }
        map.rebuild_connections();
        map
    }

    fn route(map: &WorldMap, from: u32, to: u32) -> Route {
        Router::new(map)
            .find_route(LocationId(from), LocationId(to), &RouteOptions::default())
            .unwrap()
    }

    fn quiet_roller() -> EncounterRoller {
        EncounterRoller::new(RollerConfig::silent(), RandomSource::new(1))
    }

    fn hot_roller() -> EncounterRoller {
        // Rate clamps to the 0.8 ceiling, so encounters come quickly.
        EncounterRoller::new(
            RollerConfig::default().with_base_rate(10.0),
            RandomSource::new(1),
        )
    }

    #[test]
    fn journey_completes_on_schedule() {
        let mut map = line_map(4);
        let mut machine = TravelMachine::new(MachineConfig::instant());
        let mut outbox = Outbox::new(0);
        let mut roller = quiet_roller();
        let route = route(&map, 0, 3);
        assert!((route.total_minutes - 30.0).abs() < 1e-9);
        assert!(machine.start(&map, route, 0.0, &mut outbox));

        for minute in 1..=30 {
            machine.tick(
                &mut map,
                Some(&mut roller),
                f64::from(minute),
                1.0,
                12.0,
                1,
                &mut outbox,
            );
        }
        assert_eq!(machine.phase(), TravelPhase::Completed);
        assert_eq!(machine.arrival(), Some(LocationId(3)));
        assert_eq!(
            map.location(LocationId(3)).unwrap().discovery,
            DiscoveryState::Visited
        );

        // One more tick resets to idle.
        machine.tick(&mut map, None, 31.0, 1.0, 12.0, 1, &mut outbox);
        assert_eq!(machine.phase(), TravelPhase::Idle);
        assert!(machine.state().is_none());
    }

    #[test]
    fn departure_delay_holds_progress() {
        let mut map = line_map(2);
        let mut machine = TravelMachine::new(MachineConfig::default());
        let mut outbox = Outbox::new(0);
        let route = route(&map, 0, 1);
        machine.start(&map, route, 0.0, &mut outbox);
        assert_eq!(machine.phase(), TravelPhase::Departing);

        machine.tick(&mut map, None, 1.0, 1.0, 12.0, 1, &mut outbox);
        assert_eq!(machine.phase(), TravelPhase::Departing);
        assert_eq!(machine.state().unwrap().total_progress, 0.0);

        machine.tick(&mut map, None, 3.0, 2.0, 12.0, 1, &mut outbox);
        assert_eq!(machine.phase(), TravelPhase::Traveling);
        // Two minutes since start, departure took two: one travel minute.
        assert!((machine.state().unwrap().segment_elapsed - 1.0).abs() < 1e-9);
    }

    #[test]
    fn segment_rollover_carries_leftover_time() {
        let mut map = line_map(4);
        let mut machine = TravelMachine::new(MachineConfig::instant());
        let mut outbox = Outbox::new(0);
        let route = route(&map, 0, 3);
        machine.start(&map, route, 0.0, &mut outbox);

        // One 15-minute tick crosses the first boundary with 5 left over.
        machine.tick(&mut map, None, 15.0, 15.0, 12.0, 1, &mut outbox);
        let state = machine.state().unwrap();
        assert_eq!(state.segment_index, 1);
        assert!((state.segment_elapsed - 5.0).abs() < 1e-9);
        assert!((state.segment_progress - 0.5).abs() < 1e-9);
        assert!((state.total_progress - 0.5).abs() < 1e-9);
        // The waypoint was visited in passing.
        assert_eq!(
            map.location(LocationId(1)).unwrap().discovery,
            DiscoveryState::Visited
        );
    }

    #[test]
    fn one_big_tick_arrives_in_one_go() {
        let mut map = line_map(4);
        let mut machine = TravelMachine::new(MachineConfig::instant());
        let mut outbox = Outbox::new(0);
        machine.start(&map, route(&map, 0, 3), 0.0, &mut outbox);
        machine.tick(&mut map, None, 30.0, 30.0, 12.0, 1, &mut outbox);
        assert_eq!(machine.phase(), TravelPhase::Completed);
        let state = machine.state().unwrap();
        assert_eq!(state.total_progress, 1.0);
    }

    #[test]
    fn progress_stays_bounded_and_monotonic() {
        let mut map = line_map(5);
        let mut machine = TravelMachine::new(MachineConfig::instant());
        let mut outbox = Outbox::new(0);
        machine.start(&map, route(&map, 0, 4), 0.0, &mut outbox);

        let mut last_total: f64 = 0.0;
        let mut minute = 0.0;
        for step in [0.3, 1.7, 2.9, 0.1, 7.3, 4.9, 11.0, 3.3, 9.1, 2.2] {
            minute += step;
            machine.tick(&mut map, None, minute, step, 12.0, 1, &mut outbox);
            if let Some(state) = machine.state() {
                assert!((0.0..=1.0).contains(&state.segment_progress));
                assert!((0.0..=1.0).contains(&state.total_progress));
                assert!(state.total_progress >= last_total);
                last_total = state.total_progress;
            }
        }
    }

    #[test]
    fn pending_event_freezes_progress_and_position() {
        let mut map = line_map(3);
        let mut machine =
            TravelMachine::new(MachineConfig::instant().with_roll_interval(1.0).with_max_rolls(100));
        let mut outbox = Outbox::new(0);
        let mut roller = hot_roller();
        // A long pair of segments so the journey is still underway.
        for path_id in [PathId(0), PathId(1)] {
            map.path_mut(path_id).unwrap().minutes = 1000.0;
        }
        map.rebuild_connections();
        machine.start(&map, route(&map, 0, 2), 0.0, &mut outbox);

        let mut minute = 0.0;
        for _ in 0..500 {
            if machine.phase() == TravelPhase::EventPending {
                break;
            }
            minute += 2.0;
            machine.tick(&mut map, Some(&mut roller), minute, 2.0, 12.0, 1, &mut outbox);
        }
        assert_eq!(machine.phase(), TravelPhase::EventPending);
        let frozen = machine.state().unwrap().clone();
        assert!(frozen.pending_event.is_some());

        for _ in 0..10 {
            minute += 2.0;
            machine.tick(&mut map, Some(&mut roller), minute, 2.0, 12.0, 1, &mut outbox);
        }
        let still = machine.state().unwrap();
        assert_eq!(still.segment_elapsed, frozen.segment_elapsed);
        assert_eq!(still.total_progress, frozen.total_progress);
        assert_eq!(still.position, frozen.position);
        assert_eq!(machine.phase(), TravelPhase::EventPending);

        // Resolution resumes travel and clears the pending event.
        assert!(machine.resume(&mut map, EventOutcome::Continue, minute, &mut outbox));
        assert_eq!(machine.phase(), TravelPhase::Traveling);
        assert!(machine.state().unwrap().pending_event.is_none());
        minute += 2.0;
        machine.tick(&mut map, Some(&mut roller), minute, 2.0, 12.0, 1, &mut outbox);
        assert!(machine.state().unwrap().total_progress > frozen.total_progress);
    }

    #[test]
    fn resume_without_pending_is_a_no_op() {
        let mut map = line_map(2);
        let mut machine = TravelMachine::new(MachineConfig::instant());
        let mut outbox = Outbox::new(0);
        assert!(!machine.resume(&mut map, EventOutcome::Continue, 0.0, &mut outbox));

        machine.start(&map, route(&map, 0, 1), 0.0, &mut outbox);
        assert!(!machine.resume(&mut map, EventOutcome::Continue, 1.0, &mut outbox));
    }

    #[test]
    fn tick_while_idle_is_a_no_op() {
        let mut map = line_map(2);
        let mut machine = TravelMachine::new(MachineConfig::default());
        let mut outbox = Outbox::new(0);
        machine.tick(&mut map, None, 5.0, 5.0, 12.0, 1, &mut outbox);
        assert_eq!(machine.phase(), TravelPhase::Idle);
        assert!(outbox.is_empty());
    }

    #[test]
    fn start_while_active_is_refused() {
        let mut map = line_map(3);
        let mut machine = TravelMachine::new(MachineConfig::instant());
        let mut outbox = Outbox::new(0);
        assert!(machine.start(&map, route(&map, 0, 2), 0.0, &mut outbox));
        assert!(!machine.start(&map, route(&map, 0, 1), 1.0, &mut outbox));
        // The original journey is untouched.
        assert_eq!(machine.state().unwrap().route.to, LocationId(2));
    }

    #[test]
    fn cancel_discards_everything() {
        let mut map = line_map(3);
        let mut machine = TravelMachine::new(MachineConfig::instant());
        let mut outbox = Outbox::new(0);
        machine.start(&map, route(&map, 0, 2), 0.0, &mut outbox);
        machine.tick(&mut map, None, 5.0, 5.0, 12.0, 1, &mut outbox);

        assert!(machine.cancel(6.0, &mut outbox));
        assert_eq!(machine.phase(), TravelPhase::Idle);
        assert!(machine.state().is_none());
        assert!(!machine.cancel(7.0, &mut outbox));
    }

    #[test]
    fn delay_outcome_defers_progress() {
        let mut map = line_map(3);
        let mut machine =
            TravelMachine::new(MachineConfig::instant().with_roll_interval(1.0).with_max_rolls(100));
        let mut outbox = Outbox::new(0);
        let mut roller = hot_roller();
        for path_id in [PathId(0), PathId(1)] {
            map.path_mut(path_id).unwrap().minutes = 1000.0;
        }
        map.rebuild_connections();
        machine.start(&map, route(&map, 0, 2), 0.0, &mut outbox);

        let mut minute = 0.0;
        while machine.phase() != TravelPhase::EventPending {
            minute += 2.0;
            machine.tick(&mut map, Some(&mut roller), minute, 2.0, 12.0, 1, &mut outbox);
        }
        let eta_before = machine.state().unwrap().eta_minute;
        let elapsed_before = machine.state().unwrap().segment_elapsed;
        machine.resume(
            &mut map,
            EventOutcome::Delay { minutes: 5.0 },
            minute,
            &mut outbox,
        );
        assert!((machine.state().unwrap().eta_minute - eta_before - 5.0).abs() < 1e-9);

        // The next five minutes pay the delay; no distance is covered.
        minute += 5.0;
        machine.tick(&mut map, None, minute, 5.0, 12.0, 1, &mut outbox);
        assert!((machine.state().unwrap().segment_elapsed - elapsed_before).abs() < 1e-9);

        // After that, travel moves again.
        minute += 3.0;
        machine.tick(&mut map, None, minute, 3.0, 12.0, 1, &mut outbox);
        assert!((machine.state().unwrap().segment_elapsed - elapsed_before - 3.0).abs() < 1e-9);
    }

    #[test]
    fn discovery_outcome_reveals_the_location() {
        let mut map = line_map(4);
        map.location_mut(LocationId(3)).unwrap().discovery = DiscoveryState::Unknown;
        let mut machine =
            TravelMachine::new(MachineConfig::instant().with_roll_interval(1.0).with_max_rolls(100));
        let mut outbox = Outbox::new(0);
        let mut roller = hot_roller();
        for path_id in [PathId(0), PathId(1)] {
            map.path_mut(path_id).unwrap().minutes = 1000.0;
        }
        map.rebuild_connections();
        machine.start(&map, route(&map, 0, 2), 0.0, &mut outbox);

        let mut minute = 0.0;
        while machine.phase() != TravelPhase::EventPending {
            minute += 2.0;
            machine.tick(&mut map, Some(&mut roller), minute, 2.0, 12.0, 1, &mut outbox);
        }
        machine.resume(
            &mut map,
            EventOutcome::Discovery {
                location: LocationId(3),
            },
            minute,
            &mut outbox,
        );
        assert_eq!(
            map.location(LocationId(3)).unwrap().discovery,
            DiscoveryState::Discovered
        );
        assert!(
            outbox
                .notices()
                .iter()
                .any(|n| matches!(n.kind, NoticeKind::LocationRevealed { .. }))
        );
    }

    #[test]
    fn empty_route_still_walks_the_phases() {
        let mut map = line_map(2);
        let mut machine = TravelMachine::new(MachineConfig::instant());
        let mut outbox = Outbox::new(0);
        machine.start(&map, Route::empty(LocationId(0)), 0.0, &mut outbox);
        machine.tick(&mut map, None, 1.0, 1.0, 12.0, 1, &mut outbox);
        assert_eq!(machine.phase(), TravelPhase::Completed);
        assert_eq!(machine.arrival(), Some(LocationId(0)));
    }

    #[test]
    fn position_interpolates_along_the_path() {
        let mut map = line_map(2);
        let mut machine = TravelMachine::new(MachineConfig::instant());
        let mut outbox = Outbox::new(0);
        machine.start(&map, route(&map, 0, 1), 0.0, &mut outbox);
        machine.tick(&mut map, None, 5.0, 5.0, 12.0, 1, &mut outbox);
        let position = machine.state().unwrap().position;
        assert!((position.x - 5.0).abs() < 1e-9);

        // The reverse direction interpolates from the other end.
        let mut machine = TravelMachine::new(MachineConfig::instant());
        machine.start(&map, route(&map, 1, 0), 0.0, &mut outbox);
        machine.tick(&mut map, None, 5.0, 5.0, 12.0, 1, &mut outbox);
        let position = machine.state().unwrap().position;
        assert!((position.x - 5.0).abs() < 1e-9);
    }
}
