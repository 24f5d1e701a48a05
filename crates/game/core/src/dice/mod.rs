//! Roll Engine: pure probability primitives.
//!
//! - **Dice**: `XdY` sums with validated parameters
//! - **Combo**: d20 band classification and the combo chain state machine
//! - **Modifications**: 1d24 quality rolls keyed by tier and rarity
//! - **Loot**: level-difference drop chance
//!
//! All randomness is drawn from the [`RngOracle`](crate::env::RngOracle)
//! the engine was built with.

pub mod combo;
pub mod modification;
pub mod roll;

pub use combo::{ComboChain, ComboOutcome, ComboState, ComboStep};
pub use modification::{DIVINE_REROLL_BONUS, DIVINE_ROLL, Rarity};
pub use roll::{ComboBand, DiceResult, RollEngine, RollError, loot_drop_chance};
