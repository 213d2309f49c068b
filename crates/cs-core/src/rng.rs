//! Deterministic per-cell and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! A cell's randomness for one tick comes from a fresh `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (cell_id * MIXING_CONSTANT) XOR (tick * TICK_CONSTANT)
//!
//! The seed is an explicit value derived from `(cell, tick)` and never
//! stored between ticks, so:
//!
//! - Cells never share RNG state (no contention, no ordering dependency).
//! - The proposal phase gives identical results sequentially or on Rayon.
//! - Replaying a single tick for a single cell reproduces its choices.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{CellId, Tick};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Second odd constant (from SplitMix64) so tick and cell do not cancel.
const TICK_CONSTANT: u64 = 0xbf58_476d_1ce4_e5b9;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-cell, per-tick deterministic RNG.
///
/// Built on demand by the tick loop and handed to the behavior model.  The
/// type is `!Sync` so it cannot be shared across Rayon workers by accident.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed, a cell and a tick.
    pub fn for_tick(global_seed: u64, cell: CellId, tick: Tick) -> Self {
        let seed = global_seed
            ^ (cell.0 as u64).wrapping_mul(MIXING_CONSTANT)
            ^ tick.0.wrapping_add(1).wrapping_mul(TICK_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (world generation, spawning).
///
/// Used only in single-threaded setup code, never inside the proposal phase.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
