//! Journey simulation for Wayfarer.
//!
//! Routes a traveler across a [`wf_core::WorldMap`] and drives the
//! time-based events of the journey: ambient world events (caravans,
//! raids, festivals), random encounters on the road, and the travel
//! state machine itself. Everything is deterministic per seed: the same
//! world, the same journey, the same tick inputs reproduce the same
//! encounter sequence.

/// The in-world clock.
pub mod clock;
/// Error types for routing and simulation.
pub mod error;
/// The travel state machine.
pub mod machine;
/// Notices drained by the host each tick.
pub mod outbox;
/// Travel encounter rolling and payloads.
pub mod roller;
/// Weighted shortest-path routing.
pub mod router;
/// Ambient world-event scheduling.
pub mod scheduler;
/// The top-level per-session orchestrator.
pub mod simulation;
/// The resumable session state shape.
pub mod snapshot;

pub use clock::GameClock;
pub use error::{TravelError, TravelResult};
pub use machine::{MachineConfig, TravelMachine, TravelPhase, TravelState};
pub use outbox::{Notice, NoticeKind, Outbox};
pub use roller::{
    CombatResult, EncounterRoller, EventOutcome, RollContext, RollerConfig, TravelEvent,
    TravelEventKind,
};
pub use router::{RouteOptions, Router};
pub use scheduler::{
    EventScheduler, EventSite, EventStatus, RewardKind, SchedulerConfig, SpawnContext, WorldEvent,
    WorldEventId, WorldEventKind,
};
pub use simulation::{SimConfig, Simulation, TickReport};
pub use snapshot::Snapshot;
