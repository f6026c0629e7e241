//! Command implementations.

pub mod generate;
pub mod journey;
pub mod locations;
pub mod route;

use wf_core::{LocationId, WorldMap};
use wf_rand::Seed;
use wf_worldgen::{GeneratedWorld, WorldGenConfig, WorldGenerator};

/// Parse a seed argument: a number if it looks like one, a name otherwise.
pub fn parse_seed(raw: &str) -> Seed {
    raw.parse::<u32>()
        .map(Seed::Number)
        .unwrap_or_else(|_| Seed::Name(raw.to_string()))
}

/// Generate a world for the given seed and overrides.
pub fn build_world(
    seed: &str,
    zones: Option<usize>,
    locations: Option<usize>,
) -> GeneratedWorld {
    let mut config = WorldGenConfig {
        seed: parse_seed(seed),
        ..WorldGenConfig::default()
    };
    if let Some(zones) = zones {
        config.zone_count = zones;
    }
    if let Some(locations) = locations {
        config.minor_location_count = locations;
    }
    WorldGenerator::new(config).generate()
}

/// Resolve a location argument: an id like `L3`, or a name.
pub fn resolve_location(map: &WorldMap, raw: &str) -> Result<LocationId, String> {
    if let Some(rest) = raw.strip_prefix('L') {
        if let Ok(index) = rest.parse::<u32>() {
            let id = LocationId(index);
            return if map.location(id).is_some() {
                Ok(id)
            } else {
                Err(format!("no location with id {id}"))
            };
        }
    }
    map.find_location(raw)
        .map(|l| l.id)
        .ok_or_else(|| format!("no location named '{raw}'"))
}

/// Reveal every location, so any pair is routable from the command line.
pub fn reveal_all(map: &mut WorldMap) {
    let ids: Vec<LocationId> = map.locations().map(|l| l.id).collect();
    for id in ids {
        let _ = map.discover_location(id);
    }
}
