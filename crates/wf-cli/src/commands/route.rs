//! `wf route` — plan a route between two locations.

use colored::Colorize;
use comfy_table::Table;

use wf_travel::{RouteOptions, Router};

use super::{build_world, resolve_location, reveal_all};

/// Run the command.
pub fn run(seed: &str, from: &str, to: &str, safest: bool) -> Result<(), String> {
    let mut world = build_world(seed, None, None);
    reveal_all(&mut world.map);
    let from = resolve_location(&world.map, from)?;
    let to = resolve_location(&world.map, to)?;

    let options = if safest {
        RouteOptions::default().safest(0.8)
    } else {
        RouteOptions::default()
    };
    let route = Router::new(&world.map)
        .find_route(from, to, &options)
        .map_err(|e| e.to_string())?;

    if route.is_empty() {
        println!("{}", "Already there.".green());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Leg", "From", "To", "Via", "Minutes", "Danger"]);
    for (i, segment) in route.segments.iter().enumerate() {
        let name = |id| {
            world
                .map
                .location(id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| id.to_string())
        };
        let via = world
            .map
            .path(segment.path)
            .map(|p| p.kind.to_string())
            .unwrap_or_default();
        table.add_row(vec![
            (i + 1).to_string(),
            name(segment.from),
            name(segment.to),
            via,
            format!("{:.0}", segment.minutes),
            format!("{:.1}", segment.danger),
        ]);
    }
    println!("{table}");
    println!(
        "total {} minutes, danger {:.2}",
        format!("{:.0}", route.total_minutes).bold(),
        route.danger
    );
    Ok(())
}
