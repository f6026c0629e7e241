use wf_core::{Biome, LocationKind};
use wf_rand::RandomSource;

/// Name stems by biome.
fn prefixes(biome: Biome) -> &'static [&'static str] {
    match biome {
        Biome::Meadows => &["Ash", "Green", "Fair", "Elder", "Mill", "Haven"],
        Biome::Forest => &["Thorn", "Oak", "Briar", "Shade", "Fern", "Holly"],
        Biome::Hills => &["Stone", "High", "Crag", "Bram", "Tor", "Wind"],
        Biome::Marsh => &["Mire", "Fen", "Reed", "Gloom", "Sedge"],
        Biome::Mountains => &["Frost", "Iron", "Storm", "Gray", "Karst"],
        Biome::Tundra => &["Rime", "Pale", "Winter", "Bleak", "Hoar"],
    }
}

/// Name endings by location kind. Settlement endings join the stem
/// directly; site endings stand apart as a second word.
fn suffixes(kind: LocationKind) -> &'static [&'static str] {
    match kind {
        LocationKind::Village => &["stead", "wick", "ton", "ham", "field"],
        LocationKind::Town => &["ford", "bury", "gate", "market"],
        LocationKind::Dungeon => &[" Deep", " Halls", " Barrow"],
        LocationKind::Shrine => &[" Shrine", " Sanctum", " Altar"],
        LocationKind::Ruin => &[" Ruins", " Remnant", " Wreck"],
        LocationKind::Camp => &[" Camp", " Outpost", " Rest"],
        LocationKind::Cave => &[" Hollow", " Caverns", " Grotto"],
        LocationKind::Landmark => &[" Stone", " Watch", " Crown"],
    }
}

/// Synthesize a location name from its biome and kind.
pub fn location_name(rng: &mut RandomSource, biome: Biome, kind: LocationKind) -> String {
    let prefix = rng.pick(prefixes(biome));
    let suffix = rng.pick(suffixes(kind));
    format!("{prefix}{suffix}")
}
