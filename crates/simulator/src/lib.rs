//! Batch combat simulation for balance tuning.
//!
//! Runs many independent battles of the combat core in parallel and
//! aggregates win rates:
//! - [`resolver`]: the standard combat resolution (combo rolls, damage, effects)
//! - [`battle`]: one seeded battle from setup to end
//! - [`batch`]: parallel batches over a [`pool::WorkerPool`]

pub mod batch;
pub mod battle;
pub mod pool;
pub mod resolver;

pub use batch::{BatchSummary, run_batch};
pub use battle::{BattleReport, BattleSetup, PLAYER_LOADOUT, Winner, build_player, run_battle};
pub use pool::WorkerPool;
pub use resolver::StandardResolver;
