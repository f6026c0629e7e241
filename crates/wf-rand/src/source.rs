use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::seed::{Seed, hash_name};

/// A deterministic pseudo-random stream (Mulberry32).
///
/// The generator state is a single 32-bit word, so a stream can be saved
/// and restored exactly with [`state`](Self::state) /
/// [`set_state`](Self::set_state). All drawing methods consume a fixed
/// number of steps per call, which keeps replayed sequences aligned.
///
/// Empty-slice picks and over-sized `pick_multiple` requests are contract
/// violations and panic; everything else is total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomSource {
    state: u32,
}

impl RandomSource {
    /// Create a stream from a numeric seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Create a stream from any [`Seed`] (numeric or named).
    pub fn from_world_seed(seed: &Seed) -> Self {
        Self::new(seed.value())
    }

    /// Create a stream from a string seed (djb2-hashed).
    pub fn from_name(name: &str) -> Self {
        Self::new(hash_name(name))
    }

    /// The raw generator state, sufficient to resume the stream exactly.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Restore a previously captured generator state.
    pub fn set_state(&mut self, state: u32) {
        self.state = state;
    }

    /// Derive an independent stream from the current state and a label.
    ///
    /// The parent stream is not advanced; forking with the same label at
    /// the same state always yields the same child.
    pub fn fork(&self, label: &str) -> Self {
        Self::new(self.state ^ hash_name(label))
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    /// The next value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        f64::from(self.step()) / 4_294_967_296.0
    }

    /// A uniform integer in `[min, max]`, both ends inclusive.
    ///
    /// Panics if `min > max`.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "next_int range is empty: {min}..={max}");
        let span = (max - min + 1) as f64;
        min + (self.next() * span) as i64
    }

    /// A uniform float in `[min, max)`.
    pub fn next_float(&mut self, min: f64, max: f64) -> f64 {
        min + self.next() * (max - min)
    }

    /// `true` with probability `p` (clamped to `[0, 1]`).
    pub fn next_bool(&mut self, p: f64) -> bool {
        self.next() < p
    }

    /// A uniformly chosen element.
    ///
    /// Panics if `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "pick from empty slice");
        &items[self.next_int(0, items.len() as i64 - 1) as usize]
    }

    /// `count` distinct elements, in no particular order.
    ///
    /// Panics if `count > items.len()`.
    pub fn pick_multiple<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        assert!(
            count <= items.len(),
            "pick_multiple of {count} from {} items",
            items.len()
        );
        let mut indices: Vec<usize> = (0..items.len()).collect();
        for i in 0..count {
            let j = self.next_int(i as i64, items.len() as i64 - 1) as usize;
            indices.swap(i, j);
        }
        indices[..count].iter().map(|&i| items[i].clone()).collect()
    }

    /// Shuffle a slice in place (Fisher–Yates).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_int(0, i as i64) as usize;
            items.swap(i, j);
        }
    }

    /// An element chosen with probability proportional to its weight.
    ///
    /// Scans the cumulative weight linearly; rounding at the top of the
    /// range resolves to the last item. Panics if the slices are empty or
    /// of different lengths.
    pub fn weighted_pick<'a, T>(&mut self, items: &'a [T], weights: &[f64]) -> &'a T {
        assert!(!items.is_empty(), "weighted_pick from empty slice");
        assert_eq!(
            items.len(),
            weights.len(),
            "weighted_pick items/weights length mismatch"
        );
        let total: f64 = weights.iter().sum();
        assert!(total > 0.0, "weighted_pick total weight must be positive");
        let mut roll = self.next() * total;
        for (item, w) in items.iter().zip(weights) {
            if roll < *w {
                return item;
            }
            roll -= w;
        }
        &items[items.len() - 1]
    }

    /// A normally distributed value (Box–Muller).
    ///
    /// Always consumes exactly two draws; the second generated normal is
    /// discarded so that per-call stream consumption stays constant.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next().max(f64::MIN_POSITIVE);
        let u2 = self.next();
        let mag = (-2.0 * u1.ln()).sqrt();
        mean + std_dev * mag * (std::f64::consts::TAU * u2).cos()
    }

    /// Advance the Mulberry32 state and return the next 32-bit output.
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut z = self.state;
        z = (z ^ (z >> 15)).wrapping_mul(z | 1);
        z ^= z.wrapping_add((z ^ (z >> 7)).wrapping_mul(z | 61));
        z ^ (z >> 14)
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.step()) << 32) | u64::from(self.step())
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for RandomSource {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
