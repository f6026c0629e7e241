use serde::{Deserialize, Serialize};

use wf_core::{LocationId, WorldMap};
use wf_rand::RandomSource;

use crate::clock::GameClock;
use crate::machine::TravelMachine;
use crate::roller::EncounterRoller;
use crate::scheduler::EventScheduler;
use crate::simulation::SimConfig;

/// The resumable state of a session.
///
/// This is a state *shape*, not a storage format: serialize it however
/// the host likes. It carries every random stream's state word, the map
/// with its discovery states, the live world events, and any in-flight
/// journey — enough to resume bit-for-bit, since re-forked streams
/// derive identically from the saved states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Simulation tuning, restored verbatim.
    pub config: SimConfig,
    /// The session's root random stream.
    pub rng: RandomSource,
    /// The game clock.
    pub clock: GameClock,
    /// The world arena, including discovery states.
    pub map: WorldMap,
    /// The scheduler with its live events and stream.
    pub scheduler: EventScheduler,
    /// The travel machine, including any in-flight journey.
    pub machine: TravelMachine,
    /// The journey's encounter stream, if one is underway.
    pub roller: Option<EncounterRoller>,
    /// Where the player is.
    pub player_location: LocationId,
}
