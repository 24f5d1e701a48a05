//! Item modification rolls (1d24 quality scale).

use tracing::trace;

use super::roll::RollEngine;
use crate::env::RngOracle;

/// Item rarity; decides how many modifications an item rolls.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

/// Modification scale: one d24, saturating at 24.
pub const MODIFICATION_DIE: u32 = 24;

/// A modification roll of exactly this value earns one bonus reroll.
pub const DIVINE_ROLL: i32 = 24;

/// Bonus applied to the reroll granted by a divine roll.
pub const DIVINE_REROLL_BONUS: i32 = 3;

impl<R: RngOracle> RollEngine<R> {
    /// Rolls one modification: `min(24, 1d24 + max(0, tier - 1) + bonus)`.
    ///
    /// The clamp is a saturation of the scale, not an error.
    pub fn roll_modification(&mut self, tier: i32, bonus: i32) -> i32 {
        let face = self.die(MODIFICATION_DIE);
        let total = (face + (tier - 1).max(0) + bonus).min(DIVINE_ROLL);
        trace!(face, tier, bonus, total, "modification roll");
        total
    }

    /// Number of modifications an item of this rarity carries.
    ///
    /// Common 1, Uncommon 1, Rare 2, Epic 1d2+1, Legendary 3, Mythic 1d4+2.
    pub fn modification_count(&mut self, rarity: Rarity) -> usize {
        let count = match rarity {
            Rarity::Common | Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Epic => self.die(2) + 1,
            Rarity::Legendary => 3,
            Rarity::Mythic => self.die(4) + 2,
        };
        count as usize
    }

    /// Rolls every modification for an item.
    ///
    /// Each divine roll (exactly 24) is followed by one bonus reroll at +3.
    /// Bonus rerolls never earn a reroll of their own.
    pub fn roll_multiple_modifications(&mut self, tier: i32, rarity: Rarity) -> Vec<i32> {
        let count = self.modification_count(rarity);
        let mut rolls = Vec::with_capacity(count + 1);
        for _ in 0..count {
            let roll = self.roll_modification(tier, 0);
            rolls.push(roll);
            if roll == DIVINE_ROLL {
                rolls.push(self.roll_modification(tier, DIVINE_REROLL_BONUS));
            }
        }
        rolls
    }
}
