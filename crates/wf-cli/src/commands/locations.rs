//! `wf locations` — tabulate a generated world's locations.

use comfy_table::Table;

use super::build_world;

/// Run the command.
pub fn run(seed: &str) -> Result<(), String> {
    let world = build_world(seed, None, None);

    let mut table = Table::new();
    table.set_header(vec!["Id", "Name", "Kind", "Biome", "Connections"]);
    for location in world.map.locations() {
        let biome = world
            .map
            .zone(location.zone)
            .map(|z| z.biome.to_string())
            .unwrap_or_default();
        table.add_row(vec![
            location.id.to_string(),
            location.name.clone(),
            location.kind.to_string(),
            biome,
            location.connections.len().to_string(),
        ]);
    }
    println!("{table}");
    println!(
        "{} locations in {} zones, {} paths",
        world.map.location_count(),
        world.map.zone_count(),
        world.map.path_count()
    );
    Ok(())
}
