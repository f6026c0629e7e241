//! Seeded deterministic random streams for Wayfarer.
//!
//! Every piece of generation and simulation randomness flows through a
//! [`RandomSource`]: a Mulberry32 stream seeded from an integer or a name.
//! The same seed always produces the same sequence, across processes and
//! runs, which is the core correctness property of the whole engine.
//! Sources can [`fork`](RandomSource::fork) derived independent streams so
//! that, for example, road generation never disturbs the encounter stream.

/// Seed values accepted by a [`RandomSource`].
pub mod seed;
/// The deterministic generator itself.
pub mod source;

pub use seed::Seed;
pub use source::RandomSource;
