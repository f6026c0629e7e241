use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryState;
use crate::error::{CoreError, CoreResult};
use crate::id::{LocationId, PathId, ZoneId};
use crate::location::Location;
use crate::path::{Connection, Path};
use crate::zone::Zone;

/// The world arena: id-keyed tables of zones, locations, and paths.
///
/// Tables are ordered maps so that iteration and serialization are
/// deterministic for a given generation seed. Connections store ids, not
/// references; [`WorldMap::rebuild_connections`] derives every location's
/// connection list from the path table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldMap {
    zones: BTreeMap<ZoneId, Zone>,
    locations: BTreeMap<LocationId, Location>,
    paths: BTreeMap<PathId, Path>,
}

impl WorldMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Table access
    // -----------------------------------------------------------------------

    /// Insert a zone. Fails on id reuse.
    pub fn insert_zone(&mut self, zone: Zone) -> CoreResult<ZoneId> {
        if self.zones.contains_key(&zone.id) {
            return Err(CoreError::DuplicateId(zone.id.to_string()));
        }
        let id = zone.id;
        self.zones.insert(id, zone);
        Ok(id)
    }

    /// Insert a location. Fails on id reuse.
    pub fn insert_location(&mut self, location: Location) -> CoreResult<LocationId> {
        if self.locations.contains_key(&location.id) {
            return Err(CoreError::DuplicateId(location.id.to_string()));
        }
        let id = location.id;
        self.locations.insert(id, location);
        Ok(id)
    }

    /// Insert a path. Fails on id reuse.
    pub fn insert_path(&mut self, path: Path) -> CoreResult<PathId> {
        if self.paths.contains_key(&path.id) {
            return Err(CoreError::DuplicateId(path.id.to_string()));
        }
        let id = path.id;
        self.paths.insert(id, path);
        Ok(id)
    }

    /// Get a zone by id.
    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(&id)
    }

    /// Get a zone mutably.
    pub fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.get_mut(&id)
    }

    /// Get a location by id.
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// Get a location mutably.
    pub fn location_mut(&mut self, id: LocationId) -> Option<&mut Location> {
        self.locations.get_mut(&id)
    }

    /// Get a path by id.
    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.get(&id)
    }

    /// Get a path mutably.
    pub fn path_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.paths.get_mut(&id)
    }

    /// All zones in id order.
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    /// All locations in id order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// All paths in id order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.values()
    }

    /// Number of zones.
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Number of locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of paths.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Find a location by name (case-insensitive).
    pub fn find_location(&self, name: &str) -> Option<&Location> {
        self.locations
            .values()
            .find(|l| l.name.eq_ignore_ascii_case(name))
    }

    // -----------------------------------------------------------------------
    // Graph queries
    // -----------------------------------------------------------------------

    /// Outgoing connections of a location; empty if the id is unknown.
    pub fn connections_of(&self, id: LocationId) -> &[Connection] {
        self.locations
            .get(&id)
            .map(|l| l.connections.as_slice())
            .unwrap_or(&[])
    }

    /// The derived discovery state of a connection: the lesser of its two
    /// endpoints' states.
    pub fn connection_discovery(&self, from: LocationId, conn: &Connection) -> DiscoveryState {
        let a = self
            .locations
            .get(&from)
            .map(|l| l.discovery)
            .unwrap_or_default();
        let b = self
            .locations
            .get(&conn.to)
            .map(|l| l.discovery)
            .unwrap_or_default();
        a.min(b)
    }

    /// Rewrite every location's connection list from the path table, one
    /// mirrored connection per direction.
    pub fn rebuild_connections(&mut self) {
        for location in self.locations.values_mut() {
            location.connections.clear();
        }
        let entries: Vec<(LocationId, Connection)> = self
            .paths
            .values()
            .flat_map(|p| {
                let forward = Connection {
                    to: p.b,
                    path: p.id,
                    minutes: p.minutes,
                    danger: p.danger,
                    kind: p.kind,
                };
                let backward = Connection {
                    to: p.a,
                    path: p.id,
                    minutes: p.minutes,
                    danger: p.danger,
                    kind: p.kind,
                };
                [(p.a, forward), (p.b, backward)]
            })
            .collect();
        for (from, conn) in entries {
            if let Some(location) = self.locations.get_mut(&from) {
                location.connections.push(conn);
            }
        }
    }

    /// Every location reachable from `start` over any connection,
    /// ignoring discovery gating. Includes `start` itself.
    pub fn reachable_from(&self, start: LocationId) -> BTreeSet<LocationId> {
        let mut seen = BTreeSet::new();
        if !self.locations.contains_key(&start) {
            return seen;
        }
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(current) = queue.pop_front() {
            for conn in self.connections_of(current) {
                if seen.insert(conn.to) {
                    queue.push_back(conn.to);
                }
            }
        }
        seen
    }

    /// Whether a single breadth-first scan reaches every location.
    /// An empty map counts as connected.
    pub fn is_fully_connected(&self) -> bool {
        match self.locations.keys().next() {
            Some(&first) => self.reachable_from(first).len() == self.locations.len(),
            None => true,
        }
    }

    // -----------------------------------------------------------------------
    // Discovery
    // -----------------------------------------------------------------------

    /// Advance a location (and its zone) to at least `rumored`.
    pub fn rumor_location(&mut self, id: LocationId) -> CoreResult<bool> {
        self.advance_location(id, DiscoveryState::Rumored)
    }

    /// Advance a location (and its zone) to at least `discovered`.
    pub fn discover_location(&mut self, id: LocationId) -> CoreResult<bool> {
        self.advance_location(id, DiscoveryState::Discovered)
    }

    /// Advance a location (and its zone) to `visited`.
    pub fn visit_location(&mut self, id: LocationId) -> CoreResult<bool> {
        self.advance_location(id, DiscoveryState::Visited)
    }

    /// Advance a path's own reveal state.
    pub fn discover_path(&mut self, id: PathId, to: DiscoveryState) -> CoreResult<bool> {
        let path = self
            .paths
            .get_mut(&id)
            .ok_or(CoreError::PathNotFound(id))?;
        Ok(path.discovery.advance(to))
    }

    fn advance_location(&mut self, id: LocationId, to: DiscoveryState) -> CoreResult<bool> {
        let location = self
            .locations
            .get_mut(&id)
            .ok_or(CoreError::LocationNotFound(id))?;
        let changed = location.discovery.advance(to);
        let zone = location.zone;
        if let Some(zone) = self.zones.get_mut(&zone) {
            zone.discovery.advance(to);
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, Rect};
    use crate::location::LocationKind;
    use crate::path::PathKind;
    use crate::zone::Biome;

    fn test_map() -> WorldMap {
        let mut map = WorldMap::new();
        map.insert_zone(Zone::new(
            ZoneId(0),
            Biome::Meadows,
            Rect::new(0.0, 0.0, 100.0, 100.0),
        ))
        .unwrap();
        for (i, name) in ["Ashford", "Bellmoor", "Caradon"].iter().enumerate() {
            map.insert_location(Location::new(
                LocationId(i as u32),
                ZoneId(0),
                *name,
                LocationKind::Village,
                Point::new(i as f64 * 10.0, 0.0),
            ))
            .unwrap();
        }
        map
    }

    fn link(map: &mut WorldMap, id: u32, a: u32, b: u32) {
        let pa = map.location(LocationId(a)).unwrap().position;
        let pb = map.location(LocationId(b)).unwrap().position;
        map.insert_path(Path {
            id: PathId(id),
            kind: PathKind::Road,
            a: LocationId(a),
            b: LocationId(b),
            points: vec![pa, pb],
            minutes: 10.0,
            danger: 0.8,
            discovery: DiscoveryState::Discovered,
        })
        .unwrap();
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut map = test_map();
        let result = map.insert_location(Location::new(
            LocationId(0),
            ZoneId(0),
            "Imposter",
            LocationKind::Camp,
            Point::default(),
        ));
        assert!(result.is_err());
    }

    #[test]
    fn rebuild_creates_mirrored_connections() {
        let mut map = test_map();
        link(&mut map, 0, 0, 1);
        map.rebuild_connections();

        let forward = map.location(LocationId(0)).unwrap().connection_to(LocationId(1));
        let backward = map.location(LocationId(1)).unwrap().connection_to(LocationId(0));
        let forward = forward.expect("forward connection");
        let backward = backward.expect("backward connection");
        assert_eq!(forward.path, backward.path);
        assert_eq!(forward.minutes, backward.minutes);
        assert_eq!(forward.danger, backward.danger);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut map = test_map();
        link(&mut map, 0, 0, 1);
        map.rebuild_connections();
        map.rebuild_connections();
        assert_eq!(map.connections_of(LocationId(0)).len(), 1);
    }

    #[test]
    fn reachability_sees_the_whole_chain() {
        let mut map = test_map();
        link(&mut map, 0, 0, 1);
        link(&mut map, 1, 1, 2);
        map.rebuild_connections();
        assert_eq!(map.reachable_from(LocationId(0)).len(), 3);
        assert!(map.is_fully_connected());
    }

    #[test]
    fn disconnected_map_is_detected() {
        let mut map = test_map();
        link(&mut map, 0, 0, 1);
        map.rebuild_connections();
        assert!(!map.is_fully_connected());
    }

    #[test]
    fn empty_map_counts_as_connected() {
        assert!(WorldMap::new().is_fully_connected());
    }

    #[test]
    fn connection_discovery_takes_the_lesser_endpoint() {
        let mut map = test_map();
        link(&mut map, 0, 0, 1);
        map.rebuild_connections();
        map.visit_location(LocationId(0)).unwrap();
        map.rumor_location(LocationId(1)).unwrap();

        let conn = *map
            .location(LocationId(0))
            .unwrap()
            .connection_to(LocationId(1))
            .unwrap();
        assert_eq!(
            map.connection_discovery(LocationId(0), &conn),
            DiscoveryState::Rumored
        );
    }

    #[test]
    fn visiting_advances_the_zone_too() {
        let mut map = test_map();
        map.visit_location(LocationId(0)).unwrap();
        assert_eq!(
            map.zone(ZoneId(0)).unwrap().discovery,
            DiscoveryState::Visited
        );
    }

    #[test]
    fn discovery_never_regresses_through_the_map_api() {
        let mut map = test_map();
        map.visit_location(LocationId(0)).unwrap();
        let changed = map.rumor_location(LocationId(0)).unwrap();
        assert!(!changed);
        assert_eq!(
            map.location(LocationId(0)).unwrap().discovery,
            DiscoveryState::Visited
        );
    }

    #[test]
    fn unknown_ids_error() {
        let mut map = test_map();
        assert!(map.visit_location(LocationId(99)).is_err());
        assert!(map.discover_path(PathId(99), DiscoveryState::Rumored).is_err());
    }

    #[test]
    fn find_location_is_case_insensitive() {
        let map = test_map();
        assert!(map.find_location("ashford").is_some());
        assert!(map.find_location("ASHFORD").is_some());
        assert!(map.find_location("nowhere").is_none());
    }

    #[test]
    fn serialization_is_stable() {
        let mut map = test_map();
        link(&mut map, 0, 0, 1);
        map.rebuild_connections();
        let a = serde_json::to_string(&map).unwrap();
        let b = serde_json::to_string(&map.clone()).unwrap();
        assert_eq!(a, b);
    }
}
