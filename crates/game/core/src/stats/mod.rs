//! Combatant statistics.
//!
//! ```text
//! [ Base Attributes + Level ]   persistent, grows on level-up
//!      ↓
//! [ Temporary / Equipment ]     layered at read time
//!      ↓
//! [ Effective Attributes ]      never stored
//!
//! [ Status Effects ]            weakened, stunned, roll penalty, poison
//! ```

pub mod attributes;
pub mod status;

pub use attributes::{Attribute, AttributeError, AttributeSet, Attributes, WeaponClass};
pub use status::{DamageOverTime, RollPenalty, StatusEffects, StatusError, StatusTick, Weakened};
