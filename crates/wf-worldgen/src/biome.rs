use wf_core::Biome;
use wf_rand::RandomSource;

/// Position-weighted biome selection.
///
/// `northness` is 0.0 at the southern edge of the world and 1.0 at the
/// northern edge; northern zones lean toward harsher, more dangerous
/// biomes while the south stays settled.
pub fn pick_biome(rng: &mut RandomSource, northness: f64) -> Biome {
    let biomes = Biome::all();
    let weights: Vec<f64> = biomes
        .iter()
        .map(|b| weight_for(*b, northness))
        .collect();
    *rng.weighted_pick(&biomes, &weights)
}

/// The draw weight of a biome at a given latitude.
fn weight_for(biome: Biome, northness: f64) -> f64 {
    let northness = northness.clamp(0.0, 1.0);
    // Normalize base danger into 0..1 across the biome table.
    let harshness = (biome.base_danger() - 0.6) / 1.2;
    0.35 + harshness * northness + (1.0 - harshness) * (1.0 - northness)
}
