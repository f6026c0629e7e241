//! `wf generate` — emit a generated world as JSON.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::build_world;

/// Run the command.
pub fn run(
    seed: &str,
    zones: Option<usize>,
    locations: Option<usize>,
    output: Option<&Path>,
) -> Result<(), String> {
    let world = build_world(seed, zones, locations);
    let payload = json!({
        "seed": seed,
        "report": world.report,
        "map": world.map,
    });
    let rendered =
        serde_json::to_string_pretty(&payload).map_err(|e| format!("serialize: {e}"))?;

    match output {
        Some(path) => {
            fs::write(path, rendered).map_err(|e| format!("write {}: {e}", path.display()))?;
            eprintln!(
                "wrote {} zones, {} locations, {} paths to {}",
                world.map.zone_count(),
                world.map.location_count(),
                world.map.path_count(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
