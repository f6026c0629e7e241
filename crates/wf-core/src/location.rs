use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryState;
use crate::geom::Point;
use crate::id::{LocationId, ZoneId};
use crate::path::Connection;

/// The kind of a point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// A small settlement.
    Village,
    /// A larger settlement with markets.
    Town,
    /// A hostile delve.
    Dungeon,
    /// A place of worship or pilgrimage.
    Shrine,
    /// Collapsed remains of something older.
    Ruin,
    /// A temporary camp, friendly or otherwise.
    Camp,
    /// A natural cave.
    Cave,
    /// A notable natural feature.
    Landmark,
}

impl LocationKind {
    /// Whether people live here; settlements force roads and attract
    /// festivals, markets, and raids.
    pub fn is_settlement(&self) -> bool {
        matches!(self, Self::Village | Self::Town)
    }

    /// Whether this is an underground site, which biases its paths toward
    /// the hidden kind.
    pub fn is_underground(&self) -> bool {
        matches!(self, Self::Dungeon | Self::Cave)
    }
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Village => write!(f, "village"),
            Self::Town => write!(f, "town"),
            Self::Dungeon => write!(f, "dungeon"),
            Self::Shrine => write!(f, "shrine"),
            Self::Ruin => write!(f, "ruin"),
            Self::Camp => write!(f, "camp"),
            Self::Cave => write!(f, "cave"),
            Self::Landmark => write!(f, "landmark"),
        }
    }
}

/// A point of interest in the world.
///
/// Created once by generation; afterwards only the discovery state (and
/// the payload text tied to it) ever changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier.
    pub id: LocationId,
    /// The zone that contains this location.
    pub zone: ZoneId,
    /// Generated display name.
    pub name: String,
    /// What kind of site this is.
    pub kind: LocationKind,
    /// Position in world space.
    pub position: Point,
    /// How much the player has revealed of this location.
    pub discovery: DiscoveryState,
    /// Outgoing connections, rewritten from the path table.
    pub connections: Vec<Connection>,
    /// What rumors say about this place, if anything.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rumor: Option<String>,
    /// What a visit actually reveals, if anything.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Location {
    /// Create an undiscovered location with no connections.
    pub fn new(
        id: LocationId,
        zone: ZoneId,
        name: impl Into<String>,
        kind: LocationKind,
        position: Point,
    ) -> Self {
        Self {
            id,
            zone,
            name: name.into(),
            kind,
            position,
            discovery: DiscoveryState::Unknown,
            connections: Vec::new(),
            rumor: None,
            detail: None,
        }
    }

    /// The connection leading to `target`, if one exists.
    pub fn connection_to(&self, target: LocationId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.to == target)
    }
}
