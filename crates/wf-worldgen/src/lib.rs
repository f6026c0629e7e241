//! Seeded world generation for Wayfarer.
//!
//! A [`WorldGenerator`] turns a seed and a [`WorldGenConfig`] into a
//! [`wf_core::WorldMap`]: biome zones scattered on a jittered grid, story
//! and minor locations placed with spacing constraints, and a road
//! network built from a minimum-spanning-tree backbone plus extra short
//! edges. Generation is reproducible: the same seed and config always
//! produce the same map, down to the serialized bytes.

/// Biome weighting by world position.
pub mod biome;
/// Generation tuning knobs.
pub mod config;
/// The top-level generator and its report.
pub mod generator;
/// Location name synthesis.
pub mod names;
/// Road network construction.
pub mod roads;
/// Story-site and minor-location placement.
pub mod sites;
/// Zone scattering and adjacency.
pub mod zones;

pub use config::{StorySite, WorldGenConfig};
pub use generator::{GenReport, GeneratedWorld, WorldGenerator};
