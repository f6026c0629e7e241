use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryState;
use crate::geom::Rect;
use crate::id::{LocationId, ZoneId};
use crate::location::LocationKind;

/// The biome of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    /// Open farmland and grass.
    Meadows,
    /// Dense woodland.
    Forest,
    /// Rolling uplands.
    Hills,
    /// High passes and scree.
    Mountains,
    /// Wet lowland.
    Marsh,
    /// Frozen northern waste.
    Tundra,
}

impl Biome {
    /// Baseline danger for zones of this biome, before any event
    /// consequences raise it.
    pub fn base_danger(&self) -> f64 {
        match self {
            Self::Meadows => 0.6,
            Self::Forest => 1.0,
            Self::Hills => 1.1,
            Self::Marsh => 1.4,
            Self::Mountains => 1.6,
            Self::Tundra => 1.8,
        }
    }

    /// Location kinds that generation may place in this biome.
    pub fn allowed_kinds(&self) -> &'static [LocationKind] {
        match self {
            Self::Meadows => &[
                LocationKind::Village,
                LocationKind::Town,
                LocationKind::Shrine,
                LocationKind::Camp,
                LocationKind::Landmark,
            ],
            Self::Forest => &[
                LocationKind::Village,
                LocationKind::Shrine,
                LocationKind::Ruin,
                LocationKind::Camp,
                LocationKind::Landmark,
            ],
            Self::Hills => &[
                LocationKind::Village,
                LocationKind::Ruin,
                LocationKind::Cave,
                LocationKind::Camp,
                LocationKind::Landmark,
            ],
            Self::Marsh => &[
                LocationKind::Ruin,
                LocationKind::Shrine,
                LocationKind::Camp,
                LocationKind::Landmark,
            ],
            Self::Mountains => &[
                LocationKind::Dungeon,
                LocationKind::Cave,
                LocationKind::Ruin,
                LocationKind::Landmark,
            ],
            Self::Tundra => &[
                LocationKind::Dungeon,
                LocationKind::Cave,
                LocationKind::Ruin,
                LocationKind::Camp,
            ],
        }
    }

    /// All biomes, from safest to most dangerous.
    pub fn all() -> [Biome; 6] {
        [
            Self::Meadows,
            Self::Forest,
            Self::Hills,
            Self::Marsh,
            Self::Mountains,
            Self::Tundra,
        ]
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Meadows => write!(f, "meadows"),
            Self::Forest => write!(f, "forest"),
            Self::Hills => write!(f, "hills"),
            Self::Mountains => write!(f, "mountains"),
            Self::Marsh => write!(f, "marsh"),
            Self::Tundra => write!(f, "tundra"),
        }
    }
}

/// A biome region of the world.
///
/// Immutable after generation except for its discovery state and its
/// danger level, which event consequences may raise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Unique identifier.
    pub id: ZoneId,
    /// The zone's biome.
    pub biome: Biome,
    /// Bounding rectangle, clamped to world bounds.
    pub bounds: Rect,
    /// Current danger level; starts at the biome baseline.
    pub danger: f64,
    /// Ids of contained locations, deduplicated.
    pub locations: Vec<LocationId>,
    /// Ids of adjacent zones.
    pub neighbors: Vec<ZoneId>,
    /// How much the player has revealed of this zone.
    pub discovery: DiscoveryState,
}

impl Zone {
    /// Create an empty zone with baseline danger for its biome.
    pub fn new(id: ZoneId, biome: Biome, bounds: Rect) -> Self {
        Self {
            id,
            biome,
            bounds,
            danger: biome.base_danger(),
            locations: Vec::new(),
            neighbors: Vec::new(),
            discovery: DiscoveryState::Unknown,
        }
    }

    /// Record a location as belonging to this zone, ignoring duplicates.
    pub fn add_location(&mut self, id: LocationId) {
        if !self.locations.contains(&id) {
            self.locations.push(id);
        }
    }
}
