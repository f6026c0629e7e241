use wf_core::{Location, LocationId, Path, PathId, PathKind, Point, WorldMap};
use wf_rand::RandomSource;

use crate::config::WorldGenConfig;

/// What the road pass produced.
#[derive(Debug, Clone, Default)]
pub struct RoadReport {
    /// Edges in the spanning-tree backbone.
    pub tree_edges: usize,
    /// Extra short edges added for cycles and route variety.
    pub extra_edges: usize,
    /// Edges forced in to reconnect components the distance cap split.
    pub forced_links: usize,
}

/// A candidate edge between two location indices.
#[derive(Debug, Clone, Copy)]
struct Edge {
    a: usize,
    b: usize,
    distance: f64,
}

/// Union–find over location indices, used by Kruskal's algorithm.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find(self.parent[x]);
            self.parent[x] = root;
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Connect every location into one road network.
///
/// Kruskal's algorithm over the distance-capped candidate set produces the
/// minimum-spanning-tree backbone; a configured fraction of the shortest
/// remaining edges is then added for cycles. If the distance cap split the
/// graph, the nearest cross-component pairs are linked directly — a
/// disconnected world is a defect, so generation repairs rather than
/// fails. Finally every location's connection list is rewritten from the
/// path table.
pub fn build_roads(
    rng: &mut RandomSource,
    config: &WorldGenConfig,
    map: &mut WorldMap,
) -> RoadReport {
    let locations: Vec<Location> = map.locations().cloned().collect();
    let mut report = RoadReport::default();
    if locations.len() < 2 {
        map.rebuild_connections();
        return report;
    }

    let mut candidates: Vec<Edge> = Vec::new();
    for i in 0..locations.len() {
        for j in (i + 1)..locations.len() {
            let distance = locations[i].position.distance(&locations[j].position);
            if distance <= config.max_edge_distance {
                candidates.push(Edge {
                    a: i,
                    b: j,
                    distance,
                });
            }
        }
    }
    candidates.sort_by(|x, y| {
        x.distance
            .total_cmp(&y.distance)
            .then(x.a.cmp(&y.a))
            .then(x.b.cmp(&y.b))
    });

    let mut union = UnionFind::new(locations.len());
    let mut tree: Vec<Edge> = Vec::new();
    let mut leftovers: Vec<Edge> = Vec::new();
    for edge in candidates {
        if union.union(edge.a, edge.b) {
            tree.push(edge);
        } else {
            leftovers.push(edge);
        }
    }

    // The cap can leave islands; stitch them to their nearest neighbors.
    let forced = reconnect(&mut union, &locations);
    report.tree_edges = tree.len();
    report.forced_links = forced.len();

    let pool: Vec<Edge> = leftovers
        .into_iter()
        .take(config.extra_road_pool)
        .collect();
    let wanted = ((tree.len() as f64) * config.extra_road_fraction).round() as usize;
    let extras: Vec<Edge> = if pool.is_empty() || wanted == 0 {
        Vec::new()
    } else {
        rng.pick_multiple(&pool, wanted.min(pool.len()))
    };
    report.extra_edges = extras.len();

    let mut next_id = 0u32;
    for edge in tree.iter().chain(extras.iter()).chain(forced.iter()) {
        let path = build_path(rng, PathId(next_id), &locations[edge.a], &locations[edge.b]);
        next_id += 1;
        map.insert_path(path).expect("path ids are sequential");
    }

    map.rebuild_connections();
    report
}

fn reconnect(union: &mut UnionFind, locations: &[Location]) -> Vec<Edge> {
    let mut forced = Vec::new();
    loop {
        let mut best: Option<Edge> = None;
        for i in 0..locations.len() {
            for j in (i + 1)..locations.len() {
                if union.find(i) == union.find(j) {
                    continue;
                }
                let distance = locations[i].position.distance(&locations[j].position);
                if best.is_none_or(|b| distance < b.distance) {
                    best = Some(Edge {
                        a: i,
                        b: j,
                        distance,
                    });
                }
            }
        }
        match best {
            Some(edge) => {
                union.union(edge.a, edge.b);
                forced.push(edge);
            }
            None => return forced,
        }
    }
}

fn build_path(rng: &mut RandomSource, id: PathId, a: &Location, b: &Location) -> Path {
    let kind = infer_kind(rng, a, b);
    let points = curve_points(rng, kind, a.position, b.position);
    let length: f64 = points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum();
    Path {
        id,
        kind,
        a: a.id,
        b: b.id,
        points,
        minutes: length * kind.minutes_per_unit(),
        danger: kind.danger(),
        discovery: a.discovery.min(b.discovery),
    }
}

/// Towns force roads; underground sites keep to hidden ways; the rest is
/// a weighted draw dominated by trails.
fn infer_kind(rng: &mut RandomSource, a: &Location, b: &Location) -> PathKind {
    if a.kind.is_settlement() && b.kind.is_settlement() {
        return PathKind::Road;
    }
    if a.kind.is_underground() || b.kind.is_underground() {
        return *rng.weighted_pick(
            &[PathKind::Hidden, PathKind::Trail, PathKind::Wilderness],
            &[0.55, 0.25, 0.20],
        );
    }
    *rng.weighted_pick(
        &[
            PathKind::Road,
            PathKind::Trail,
            PathKind::Wilderness,
            PathKind::Hidden,
        ],
        &[0.15, 0.45, 0.30, 0.10],
    )
}

/// Bend the path at its midpoint, perpendicular to the straight line,
/// scaled by the kind's variance. Roads stay nearly straight; hidden
/// paths meander.
fn curve_points(rng: &mut RandomSource, kind: PathKind, from: Point, to: Point) -> Vec<Point> {
    let length = from.distance(&to);
    if length <= f64::EPSILON {
        return vec![from, to];
    }
    let mid = from.lerp(&to, 0.5);
    let perp_x = -(to.y - from.y) / length;
    let perp_y = (to.x - from.x) / length;
    let offset = rng.gaussian(0.0, kind.curve_variance() * length);
    let bend = Point::new(mid.x + perp_x * offset, mid.y + perp_y * offset);
    vec![from, bend, to]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::{Biome, DiscoveryState, LocationKind, Rect, Zone, ZoneId};

    fn map_with(locations: &[(f64, f64, LocationKind)]) -> WorldMap {
        let mut map = WorldMap::new();
        map.insert_zone(Zone::new(
            ZoneId(0),
            Biome::Meadows,
            Rect::new(0.0, 0.0, 1000.0, 1000.0),
        ))
        .unwrap();
        for (i, (x, y, kind)) in locations.iter().enumerate() {
            map.insert_location(Location::new(
                LocationId(i as u32),
                ZoneId(0),
                format!("Site {i}"),
                *kind,
                Point::new(*x, *y),
            ))
            .unwrap();
        }
        map
    }

    fn grid_map(n: usize) -> WorldMap {
        let sites: Vec<(f64, f64, LocationKind)> = (0..n)
            .map(|i| (((i % 4) as f64) * 120.0, ((i / 4) as f64) * 120.0, LocationKind::Village))
            .collect();
        map_with(&sites)
    }

    #[test]
    fn network_connects_everything() {
        let mut rng = RandomSource::new(42);
        let mut map = grid_map(12);
        build_roads(&mut rng, &WorldGenConfig::default(), &mut map);
        assert!(map.is_fully_connected());
    }

    #[test]
    fn tree_has_n_minus_one_edges() {
        let mut rng = RandomSource::new(42);
        let mut map = grid_map(10);
        let report = build_roads(&mut rng, &WorldGenConfig::default(), &mut map);
        assert_eq!(report.tree_edges + report.forced_links, 9);
    }

    #[test]
    fn extras_add_cycles() {
        let mut rng = RandomSource::new(42);
        let mut map = grid_map(12);
        let report = build_roads(&mut rng, &WorldGenConfig::default(), &mut map);
        assert!(report.extra_edges > 0);
        assert_eq!(
            map.path_count(),
            report.tree_edges + report.extra_edges + report.forced_links
        );
    }

    #[test]
    fn distance_cap_is_repaired_not_fatal() {
        // Two clusters far beyond the edge cap.
        let mut map = map_with(&[
            (0.0, 0.0, LocationKind::Village),
            (50.0, 0.0, LocationKind::Village),
            (900.0, 900.0, LocationKind::Village),
            (950.0, 900.0, LocationKind::Village),
        ]);
        let mut rng = RandomSource::new(42);
        let config = WorldGenConfig {
            max_edge_distance: 100.0,
            ..WorldGenConfig::default()
        };
        let report = build_roads(&mut rng, &config, &mut map);
        assert!(report.forced_links >= 1);
        assert!(map.is_fully_connected());
    }

    #[test]
    fn settlement_pairs_get_roads() {
        let mut map = map_with(&[
            (0.0, 0.0, LocationKind::Town),
            (100.0, 0.0, LocationKind::Village),
        ]);
        let mut rng = RandomSource::new(42);
        build_roads(&mut rng, &WorldGenConfig::default(), &mut map);
        assert_eq!(map.paths().next().unwrap().kind, PathKind::Road);
    }

    #[test]
    fn underground_sites_lean_hidden() {
        let mut hidden = 0;
        for seed in 0..40u32 {
            let mut map = map_with(&[
                (0.0, 0.0, LocationKind::Village),
                (100.0, 0.0, LocationKind::Cave),
            ]);
            let mut rng = RandomSource::new(seed);
            build_roads(&mut rng, &WorldGenConfig::default(), &mut map);
            if map.paths().next().unwrap().kind == PathKind::Hidden {
                hidden += 1;
            }
        }
        assert!(hidden > 10, "hidden drawn {hidden}/40 times");
    }

    #[test]
    fn travel_time_scales_with_kind_and_length() {
        let mut map = map_with(&[
            (0.0, 0.0, LocationKind::Town),
            (100.0, 0.0, LocationKind::Town),
        ]);
        let mut rng = RandomSource::new(42);
        build_roads(&mut rng, &WorldGenConfig::default(), &mut map);
        let path = map.paths().next().unwrap();
        // A road's polyline is at least as long as the straight line.
        assert!(path.minutes >= 100.0 * PathKind::Road.minutes_per_unit() - 1e-6);
        assert!(path.minutes < 200.0);
    }

    #[test]
    fn connections_are_rewritten_in_both_directions() {
        let mut rng = RandomSource::new(42);
        let mut map = grid_map(6);
        build_roads(&mut rng, &WorldGenConfig::default(), &mut map);
        for path in map.paths().collect::<Vec<_>>() {
            let a = map.location(path.a).unwrap();
            let b = map.location(path.b).unwrap();
            assert!(a.connections.iter().any(|c| c.path == path.id));
            assert!(b.connections.iter().any(|c| c.path == path.id));
        }
    }

    #[test]
    fn path_discovery_follows_the_lesser_endpoint() {
        let mut map = map_with(&[
            (0.0, 0.0, LocationKind::Town),
            (100.0, 0.0, LocationKind::Town),
        ]);
        map.location_mut(LocationId(0)).unwrap().discovery = DiscoveryState::Discovered;
        let mut rng = RandomSource::new(42);
        build_roads(&mut rng, &WorldGenConfig::default(), &mut map);
        assert_eq!(map.paths().next().unwrap().discovery, DiscoveryState::Unknown);
    }

    #[test]
    fn single_location_world_is_trivially_fine() {
        let mut map = map_with(&[(0.0, 0.0, LocationKind::Village)]);
        let mut rng = RandomSource::new(42);
        let report = build_roads(&mut rng, &WorldGenConfig::default(), &mut map);
        assert_eq!(report.tree_edges, 0);
        assert!(map.is_fully_connected());
    }
}
