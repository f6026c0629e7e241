use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque};

use serde::{Deserialize, Serialize};

use wf_core::{Connection, DiscoveryState, LocationId, PathKind, Route, RouteSegment, WorldMap};

use crate::error::{TravelError, TravelResult};

/// Cost multiplier applied to connections that are only rumored; an
/// uncertain road is planned for as if it were half again as long.
pub const RUMORED_COST_PENALTY: f64 = 1.5;

/// Options controlling which connections the router may use and how it
/// weighs them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteOptions {
    /// Traverse connections that are only rumored (at a cost penalty).
    pub allow_rumored: bool,
    /// Weigh danger into edge costs, preferring safety over speed.
    pub prefer_safety: bool,
    /// How heavily danger counts when `prefer_safety` is set.
    pub danger_weight: f64,
    /// If set, only these path kinds may be traversed.
    pub allowed_kinds: Option<Vec<PathKind>>,
}

impl RouteOptions {
    /// Allow rumored connections.
    pub fn with_rumored(mut self) -> Self {
        self.allow_rumored = true;
        self
    }

    /// Prefer safety over speed with the given danger weight.
    pub fn safest(mut self, danger_weight: f64) -> Self {
        self.prefer_safety = true;
        self.danger_weight = danger_weight;
        self
    }

    /// Restrict traversal to the given path kinds.
    pub fn with_kinds(mut self, kinds: Vec<PathKind>) -> Self {
        self.allowed_kinds = Some(kinds);
        self
    }
}

/// Weighted shortest-path search over a world map.
///
/// A* keyed by location id, with the Euclidean distance scaled to
/// best-case (road) travel minutes as the heuristic; it never
/// overestimates, so found routes are optimal for the chosen cost mode.
/// Failure to find a route is a normal outcome, reported as a value.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    map: &'a WorldMap,
}

/// Open-set entry; the ordering is reversed so the binary heap pops the
/// lowest estimated total first, with ids breaking ties for determinism.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    estimate: f64,
    id: LocationId,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.estimate.total_cmp(&other.estimate) == Ordering::Equal && self.id == other.id
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> Router<'a> {
    /// Create a router over the given map.
    pub fn new(map: &'a WorldMap) -> Self {
        Self { map }
    }

    /// Find the cheapest traversable route between two locations.
    ///
    /// Returns an empty zero-cost route when `from == to`, and
    /// [`TravelError::NoRoute`] when discovery gating or the graph itself
    /// blocks every way through.
    pub fn find_route(
        &self,
        from: LocationId,
        to: LocationId,
        options: &RouteOptions,
    ) -> TravelResult<Route> {
        if self.map.location(from).is_none() {
            return Err(TravelError::LocationNotFound(from));
        }
        let goal = self
            .map
            .location(to)
            .ok_or(TravelError::LocationNotFound(to))?;
        if from == to {
            return Ok(Route::empty(from));
        }

        let mut open = BinaryHeap::new();
        let mut g_score: BTreeMap<LocationId, f64> = BTreeMap::new();
        let mut came_from: BTreeMap<LocationId, (LocationId, Connection)> = BTreeMap::new();
        let mut closed: BTreeSet<LocationId> = BTreeSet::new();

        let heuristic = |id: LocationId| -> f64 {
            self.map
                .location(id)
                .map(|l| l.position.distance(&goal.position) * PathKind::Road.minutes_per_unit())
                .unwrap_or(0.0)
        };

        g_score.insert(from, 0.0);
        open.push(OpenNode {
            estimate: heuristic(from),
            id: from,
        });

        while let Some(current) = open.pop() {
            if !closed.insert(current.id) {
                continue;
            }
            if current.id == to {
                return Ok(self.reconstruct(from, to, &came_from));
            }

            let current_g = g_score[&current.id];
            for conn in self.map.connections_of(current.id) {
                let Some(cost) = self.edge_cost(current.id, conn, options) else {
                    continue;
                };
                let tentative = current_g + cost;
                let better = g_score
                    .get(&conn.to)
                    .is_none_or(|&existing| tentative < existing);
                if better {
                    g_score.insert(conn.to, tentative);
                    came_from.insert(conn.to, (current.id, *conn));
                    open.push(OpenNode {
                        estimate: tentative + heuristic(conn.to),
                        id: conn.to,
                    });
                }
            }
        }

        Err(TravelError::NoRoute { from, to })
    }

    /// Whether a traversable route exists.
    pub fn is_reachable(&self, from: LocationId, to: LocationId, options: &RouteOptions) -> bool {
        if from == to {
            return self.map.location(from).is_some();
        }
        self.reachable_locations(from, options).contains(&to)
    }

    /// Every location reachable from `from` under the given options,
    /// excluding `from` itself. Breadth-first over accessible connections.
    pub fn reachable_locations(
        &self,
        from: LocationId,
        options: &RouteOptions,
    ) -> BTreeSet<LocationId> {
        let mut seen = BTreeSet::new();
        if self.map.location(from).is_none() {
            return seen;
        }
        let mut queue = VecDeque::from([from]);
        let mut visited = BTreeSet::from([from]);
        while let Some(current) = queue.pop_front() {
            for conn in self.map.connections_of(current) {
                if self.edge_cost(current, conn, options).is_none() {
                    continue;
                }
                if visited.insert(conn.to) {
                    seen.insert(conn.to);
                    queue.push_back(conn.to);
                }
            }
        }
        seen
    }

    /// Locations one traversable hop away.
    pub fn neighbors(&self, from: LocationId, options: &RouteOptions) -> Vec<LocationId> {
        self.map
            .connections_of(from)
            .iter()
            .filter(|conn| self.edge_cost(from, conn, options).is_some())
            .map(|conn| conn.to)
            .collect()
    }

    /// The planning cost of a connection, or `None` if it cannot be
    /// traversed under the options.
    fn edge_cost(
        &self,
        from: LocationId,
        conn: &Connection,
        options: &RouteOptions,
    ) -> Option<f64> {
        if let Some(kinds) = &options.allowed_kinds {
            if !kinds.contains(&conn.kind) {
                return None;
            }
        }
        let discovery = self.map.connection_discovery(from, conn);
        let rumored = match discovery {
            DiscoveryState::Discovered | DiscoveryState::Visited => false,
            DiscoveryState::Rumored if options.allow_rumored => true,
            _ => return None,
        };

        let mut cost = conn.minutes;
        if options.prefer_safety {
            cost += conn.danger * conn.minutes * options.danger_weight;
        }
        if rumored {
            cost *= RUMORED_COST_PENALTY;
        }
        Some(cost)
    }

    fn reconstruct(
        &self,
        from: LocationId,
        to: LocationId,
        came_from: &BTreeMap<LocationId, (LocationId, Connection)>,
    ) -> Route {
        let mut segments = Vec::new();
        let mut current = to;
        while current != from {
            let (prev, conn) = came_from[&current];
            segments.push(RouteSegment {
                path: conn.path,
                from: prev,
                to: current,
                minutes: conn.minutes,
                danger: conn.danger,
            });
            current = prev;
        }
        segments.reverse();
        Route::from_segments(from, to, segments)
    }
}
