use wf_core::{Point, Rect, Zone, ZoneId};
use wf_rand::RandomSource;

use crate::biome::pick_biome;
use crate::config::WorldGenConfig;

/// Scatter zones across the world on a jittered grid.
///
/// One center per grid cell, jittered within the cell; each center draws
/// a biome weighted by latitude, takes a rectangle sized by proximity to
/// its nearest neighbor (clamped to the minimum size and world bounds),
/// and links to every center within the adjacency distance.
pub fn scatter_zones(rng: &mut RandomSource, config: &WorldGenConfig) -> Vec<Zone> {
    let centers = scatter_centers(rng, config);

    let mut zones: Vec<Zone> = centers
        .iter()
        .enumerate()
        .map(|(i, center)| {
            let northness = 1.0 - (center.y - config.bounds.y) / config.bounds.height.max(1.0);
            let biome = pick_biome(rng, northness);
            let bounds = zone_bounds(*center, &centers, config);
            Zone::new(ZoneId(i as u32), biome, bounds)
        })
        .collect();

    for i in 0..zones.len() {
        for j in (i + 1)..zones.len() {
            if centers[i].distance(&centers[j]) <= config.zone_adjacency_distance {
                let (a, b) = (zones[i].id, zones[j].id);
                zones[i].neighbors.push(b);
                zones[j].neighbors.push(a);
            }
        }
    }

    // The threshold alone can strand a zone when jitter pushes its every
    // neighbor out of range; the guarantee is a connected adjacency graph,
    // so stitch remaining components together at their nearest centers.
    connect_adjacency(&mut zones, &centers);

    zones
}

fn connect_adjacency(zones: &mut [Zone], centers: &[Point]) {
    loop {
        let mut component = vec![usize::MAX; zones.len()];
        let mut count = 0;
        for start in 0..zones.len() {
            if component[start] != usize::MAX {
                continue;
            }
            let mut stack = vec![start];
            component[start] = count;
            while let Some(i) = stack.pop() {
                for n in &zones[i].neighbors {
                    let idx = n.0 as usize;
                    if component[idx] == usize::MAX {
                        component[idx] = count;
                        stack.push(idx);
                    }
                }
            }
            count += 1;
        }
        if count <= 1 {
            return;
        }

        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..zones.len() {
            for j in (i + 1)..zones.len() {
                if component[i] == component[j] {
                    continue;
                }
                let d = centers[i].distance(&centers[j]);
                if best.is_none_or(|(_, _, bd)| d < bd) {
                    best = Some((i, j, d));
                }
            }
        }
        let (i, j, _) = best.expect("multiple components imply a cross pair");
        let (a, b) = (zones[i].id, zones[j].id);
        zones[i].neighbors.push(b);
        zones[j].neighbors.push(a);
    }
}

/// The zone whose bounds center is nearest to `point`.
pub fn nearest_zone(zones: &[Zone], point: &Point) -> ZoneId {
    zones
        .iter()
        .min_by(|a, b| {
            let da = a.bounds.center().distance(point);
            let db = b.bounds.center().distance(point);
            da.total_cmp(&db)
        })
        .map(|z| z.id)
        .expect("nearest_zone on empty zone list")
}

fn scatter_centers(rng: &mut RandomSource, config: &WorldGenConfig) -> Vec<Point> {
    let count = config.zone_count.max(1);
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    let cell_w = config.bounds.width / cols as f64;
    let cell_h = config.bounds.height / rows as f64;

    (0..count)
        .map(|i| {
            let col = (i % cols) as f64;
            let row = (i / cols) as f64;
            let jitter_x = rng.next_float(-0.3, 0.3) * cell_w;
            let jitter_y = rng.next_float(-0.3, 0.3) * cell_h;
            config.bounds.clamp(&Point::new(
                config.bounds.x + (col + 0.5) * cell_w + jitter_x,
                config.bounds.y + (row + 0.5) * cell_h + jitter_y,
            ))
        })
        .collect()
}

fn zone_bounds(center: Point, centers: &[Point], config: &WorldGenConfig) -> Rect {
    let nearest = centers
        .iter()
        .filter(|c| **c != center)
        .map(|c| center.distance(c))
        .min_by(f64::total_cmp)
        .unwrap_or(config.bounds.width.max(config.bounds.height));
    let size = nearest.max(config.min_zone_size);

    let half = size / 2.0;
    let left = (center.x - half).max(config.bounds.x);
    let top = (center.y - half).max(config.bounds.y);
    let right = (center.x + half).min(config.bounds.x + config.bounds.width);
    let bottom = (center.y + half).min(config.bounds.y + config.bounds.height);
    Rect::new(left, top, right - left, bottom - top)
}
