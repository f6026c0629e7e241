use serde::{Deserialize, Serialize};

use wf_core::WorldMap;
use wf_rand::RandomSource;

use crate::config::WorldGenConfig;
use crate::roads::build_roads;
use crate::sites::place_locations;
use crate::zones::scatter_zones;

/// Summary of a generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenReport {
    /// Zones created.
    pub zones: usize,
    /// Story sites placed.
    pub story_sites: usize,
    /// Minor locations placed.
    pub minor_placed: usize,
    /// Minor locations abandoned for lack of space.
    pub minor_skipped: usize,
    /// Spanning-tree edges in the road network.
    pub tree_edges: usize,
    /// Extra road edges beyond the tree.
    pub extra_edges: usize,
    /// Edges forced in to repair connectivity.
    pub forced_links: usize,
    /// Whether the final map passed the full-connectivity scan.
    pub connected: bool,
}

/// A generated map together with its report.
#[derive(Debug, Clone)]
pub struct GeneratedWorld {
    /// The world arena, ready for routing and simulation.
    pub map: WorldMap,
    /// Counts and repairs from the run.
    pub report: GenReport,
}

/// Deterministic world generator.
///
/// Each phase draws from its own forked stream ("zones", "sites",
/// "roads"), so retuning one phase never reshuffles the others.
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    config: WorldGenConfig,
}

impl WorldGenerator {
    /// Create a generator for the given config.
    pub fn new(config: WorldGenConfig) -> Self {
        Self { config }
    }

    /// The config this generator runs with.
    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    /// Generate the world. Reproducible for a fixed seed and config.
    pub fn generate(&self) -> GeneratedWorld {
        let root = RandomSource::from_world_seed(&self.config.seed);
        let mut report = GenReport::default();
        let mut map = WorldMap::new();

        let mut zone_rng = root.fork("zones");
        let mut zones = scatter_zones(&mut zone_rng, &self.config);
        report.zones = zones.len();

        let mut site_rng = root.fork("sites");
        let (locations, placement) = place_locations(&mut site_rng, &self.config, &mut zones);
        report.story_sites = self.config.story_sites.len();
        report.minor_placed = placement.placed;
        report.minor_skipped = placement.skipped;

        for zone in zones {
            map.insert_zone(zone).expect("zone ids are sequential");
        }
        for location in locations {
            map.insert_location(location)
                .expect("location ids are sequential");
        }

        let mut road_rng = root.fork("roads");
        let roads = build_roads(&mut road_rng, &self.config, &mut map);
        report.tree_edges = roads.tree_edges;
        report.extra_edges = roads.extra_edges;
        report.forced_links = roads.forced_links;
        report.connected = map.is_fully_connected();

        GeneratedWorld { map, report }
    }
}
