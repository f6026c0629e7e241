use wf_core::{DiscoveryState, Location, LocationId, Point, Zone};
use wf_rand::RandomSource;

use crate::config::WorldGenConfig;
use crate::names::location_name;
use crate::zones::nearest_zone;

/// What the placement pass produced.
#[derive(Debug, Clone, Default)]
pub struct PlacementReport {
    /// Minor locations successfully placed.
    pub placed: usize,
    /// Minor locations abandoned after exhausting their attempts.
    pub skipped: usize,
}

/// Place story sites, then rejection-sample minor locations.
///
/// Story sites keep their configured names and positions (within their
/// jitter tolerance) and start out discovered; the player knows where the
/// story begins. Minor locations must clear the spacing constraint
/// against everything already placed, with a bounded attempt count per
/// location; an overcrowded world loses sites rather than failing.
pub fn place_locations(
    rng: &mut RandomSource,
    config: &WorldGenConfig,
    zones: &mut [Zone],
) -> (Vec<Location>, PlacementReport) {
    let mut locations: Vec<Location> = Vec::new();
    let mut report = PlacementReport::default();
    let mut next_id = 0u32;

    for site in &config.story_sites {
        let mut position = site.position;
        if site.jitter > 0.0 {
            position.x += rng.next_float(-site.jitter, site.jitter);
            position.y += rng.next_float(-site.jitter, site.jitter);
        }
        let position = config.bounds.clamp(&position);
        let zone = nearest_zone(zones, &position);
        let mut location = Location::new(
            LocationId(next_id),
            zone,
            site.name.clone(),
            site.kind,
            position,
        );
        location.discovery = DiscoveryState::Discovered;
        next_id += 1;
        locations.push(location);
    }

    for _ in 0..config.minor_location_count {
        match sample_position(rng, config, &locations) {
            Some(position) => {
                let zone_id = nearest_zone(zones, &position);
                let zone = zones
                    .iter()
                    .find(|z| z.id == zone_id)
                    .expect("nearest_zone returns a real id");
                let kind = *rng.pick(zone.biome.allowed_kinds());
                let name = location_name(rng, zone.biome, kind);
                locations.push(Location::new(
                    LocationId(next_id),
                    zone_id,
                    name,
                    kind,
                    position,
                ));
                next_id += 1;
                report.placed += 1;
            }
            None => report.skipped += 1,
        }
    }

    for location in &locations {
        if let Some(zone) = zones.iter_mut().find(|z| z.id == location.zone) {
            zone.add_location(location.id);
        }
    }

    (locations, report)
}

fn sample_position(
    rng: &mut RandomSource,
    config: &WorldGenConfig,
    placed: &[Location],
) -> Option<Point> {
    for _ in 0..config.max_placement_attempts {
        let candidate = Point::new(
            rng.next_float(config.bounds.x, config.bounds.x + config.bounds.width),
            rng.next_float(config.bounds.y, config.bounds.y + config.bounds.height),
        );
        let clear = placed
            .iter()
            .all(|l| l.position.distance(&candidate) >= config.min_location_spacing);
        if clear {
            return Some(candidate);
        }
    }
    None
}
