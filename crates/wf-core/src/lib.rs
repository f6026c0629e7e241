//! Core world model for Wayfarer: zones, locations, paths, and routes.
//!
//! The model is an arena of id-keyed tables owned by [`WorldMap`].
//! Connections between locations store ids rather than references, so the
//! graph has no ownership cycles, and every table is ordered so that
//! iteration and serialization are deterministic for a given generation
//! seed.

/// Reveal levels for locations, zones, and paths.
pub mod discovery;
/// Error types for the core model.
pub mod error;
/// Points and rectangles in world space.
pub mod geom;
/// Identifier newtypes for the arena tables.
pub mod id;
/// Points of interest and their outgoing connections.
pub mod location;
/// The arena of zones, locations, and paths.
pub mod map;
/// Paths between locations and their directed connection views.
pub mod path;
/// Multi-segment travel routes produced by the router.
pub mod route;
/// Biome regions that partition the world.
pub mod zone;

pub use discovery::DiscoveryState;
pub use error::{CoreError, CoreResult};
pub use geom::{Point, Rect};
pub use id::{LocationId, PathId, ZoneId};
pub use location::{Location, LocationKind};
pub use map::WorldMap;
pub use path::{Connection, Path, PathKind};
pub use route::{Route, RouteSegment};
pub use zone::{Biome, Zone};
