//! RNG oracle for deterministic random number generation.
//!
//! Every random decision in a battle (dice, action selection, loot) draws from
//! an injected [`RngOracle`]. Battles never share a stream: the simulator gives
//! each battle its own [`PcgRng`] seeded through [`compute_seed`].
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same sequence of random numbers. This is what makes
//! batch simulation reproducible.

use std::collections::VecDeque;

/// Source of randomness for the combat core.
pub trait RngOracle {
    /// Generate the next random u32 value from the stream.
    fn next_u32(&mut self) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    ///
    /// `sides` must be non-zero; callers validate dice parameters first.
    fn roll_die(&mut self, sides: u32) -> u32 {
        (self.next_u32() % sides) + 1
    }

    /// Uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Fast, small and
/// statistically solid; two generators built from the same seed yield the
/// same sequence.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator positioned at `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Compute a deterministic seed for one battle stream.
///
/// # Arguments
///
/// * `base_seed` - Seed for the whole simulation run
/// * `battle` - Index of the battle inside the run
/// * `stream` - Distinguishes independent streams of the same battle
///   (`0`: dice, `1`: action selection, ...)
pub fn compute_seed(base_seed: u64, battle: u64, stream: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = base_seed;
    hash ^= battle.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(stream).wrapping_mul(0x517cc1b727220a95);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Replays a fixed script of raw values, then repeats the last one.
///
/// Used in tests to force exact die faces and selection draws.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
    last: u32,
}

impl ScriptedRng {
    /// Raw `next_u32` values, returned in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: 0,
        }
    }

    /// Values that make [`RngOracle::roll_die`] return exactly these faces.
    pub fn faces(faces: impl IntoIterator<Item = u32>) -> Self {
        Self::new(faces.into_iter().map(|face| face.saturating_sub(1)))
    }

    /// Values that make [`RngOracle::unit`] return (approximately) these fractions.
    pub fn fractions(fractions: impl IntoIterator<Item = f64>) -> Self {
        Self::new(
            fractions
                .into_iter()
                .map(|f| (f.clamp(0.0, 1.0) * f64::from(u32::MAX)) as u32),
        )
    }

    /// Appends more raw values to the script.
    pub fn push(&mut self, value: u32) {
        self.values.push_back(value);
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if let Some(value) = self.values.pop_front() {
            self.last = value;
        }
        self.last
    }
}
