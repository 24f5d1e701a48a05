//! Injected collaborators: randomness and read-only content.
//!
//! Oracles expose everything the rules need from the outside world without
//! hard coupling to concrete implementations.
mod content;
mod rng;

pub use content::{ContentOracle, EnemyTemplate};
pub use rng::{PcgRng, RngOracle, ScriptedRng, compute_seed};
