use serde::{Deserialize, Serialize};

use wf_core::{LocationKind, Point, Rect};
use wf_rand::Seed;

/// A fixed location the story requires, placed before any minor sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorySite {
    /// Display name, used verbatim.
    pub name: String,
    /// Location kind.
    pub kind: LocationKind,
    /// Intended world position.
    pub position: Point,
    /// Maximum random offset applied per axis when placing.
    pub jitter: f64,
}

impl StorySite {
    /// A story site placed exactly at `position` with no jitter.
    pub fn fixed(name: impl Into<String>, kind: LocationKind, position: Point) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            jitter: 0.0,
        }
    }

    /// Allow the site to drift up to `jitter` units per axis.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }
}

/// Tuning for world generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldGenConfig {
    /// Seed for every generation stream.
    pub seed: Seed,
    /// World bounds; everything is placed inside.
    pub bounds: Rect,
    /// How many zones to scatter.
    pub zone_count: usize,
    /// Minimum edge length of a zone's bounding rectangle.
    pub min_zone_size: f64,
    /// Center distance under which two zones count as adjacent.
    pub zone_adjacency_distance: f64,
    /// How many minor locations to attempt to place.
    pub minor_location_count: usize,
    /// Minimum distance between any two locations.
    pub min_location_spacing: f64,
    /// Placement attempts per minor location before giving up on it.
    pub max_placement_attempts: usize,
    /// Candidate road edges longer than this are ignored (the repair pass
    /// may still exceed it to restore connectivity).
    pub max_edge_distance: f64,
    /// Extra edges added beyond the spanning tree, as a fraction of the
    /// tree's edge count.
    pub extra_road_fraction: f64,
    /// How many of the shortest remaining non-tree edges form the pool the
    /// extras are drawn from.
    pub extra_road_pool: usize,
    /// Story sites to place before minor locations.
    pub story_sites: Vec<StorySite>,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: Seed::Number(0),
            bounds: Rect::new(0.0, 0.0, 1000.0, 1000.0),
            zone_count: 6,
            min_zone_size: 160.0,
            zone_adjacency_distance: 450.0,
            minor_location_count: 24,
            min_location_spacing: 45.0,
            max_placement_attempts: 30,
            max_edge_distance: 420.0,
            extra_road_fraction: 0.35,
            extra_road_pool: 10,
            story_sites: Vec::new(),
        }
    }
}

impl WorldGenConfig {
    /// Set the seed.
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Set the world bounds.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the zone count.
    pub fn with_zone_count(mut self, count: usize) -> Self {
        self.zone_count = count;
        self
    }

    /// Set how many minor locations to place.
    pub fn with_minor_locations(mut self, count: usize) -> Self {
        self.minor_location_count = count;
        self
    }

    /// Set the minimum spacing between locations.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.min_location_spacing = spacing;
        self
    }

    /// Add a story site.
    pub fn with_story_site(mut self, site: StorySite) -> Self {
        self.story_sites.push(site);
        self
    }
}
