//! Dice rolls, combo bands and loot chance.

use tracing::trace;

use crate::env::RngOracle;
use crate::error::{CombatError, ErrorSeverity};

/// Errors raised for malformed dice parameters.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RollError {
    #[error("dice count must be at least 1 (got {count})")]
    InvalidCount { count: u32 },

    #[error("a die needs at least 2 sides (got {sides})")]
    InvalidSides { sides: u32 },
}

impl CombatError for RollError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCount { .. } => "ROLL_INVALID_COUNT",
            Self::InvalidSides { .. } => "ROLL_INVALID_SIDES",
        }
    }
}

/// Outcome band of a combo-action roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComboBand {
    #[strum(to_string = "Fail")]
    Fail,
    #[strum(to_string = "Normal Attack")]
    Normal,
    #[strum(to_string = "Combo Attack")]
    Combo,
}

impl ComboBand {
    /// Highest total that still fails.
    pub const FAIL_MAX: i32 = 5;
    /// Lowest total that triggers a combo.
    pub const COMBO_MIN: i32 = 16;

    /// Classifies a d20 + bonus total.
    pub const fn classify(total: i32) -> Self {
        if total <= Self::FAIL_MAX {
            Self::Fail
        } else if total >= Self::COMBO_MIN {
            Self::Combo
        } else {
            Self::Normal
        }
    }
}

/// Immutable record of one roll.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceResult {
    roll: i32,
    success: bool,
    combo_triggered: bool,
    description: String,
}

impl DiceResult {
    pub fn new(
        roll: i32,
        success: bool,
        combo_triggered: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            roll,
            success,
            combo_triggered,
            description: description.into(),
        }
    }

    pub fn roll(&self) -> i32 {
        self.roll
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn combo_triggered(&self) -> bool {
        self.combo_triggered
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Probability primitives for combat, drawing from an injected [`RngOracle`].
#[derive(Clone, Debug)]
pub struct RollEngine<R> {
    rng: R,
}

impl<R: RngOracle> RollEngine<R> {
    /// Total needed on 1d20 + bonus to keep an active combo going.
    pub const COMBO_CONTINUE_THRESHOLD: i32 = 11;

    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Access the underlying stream (e.g., for action selection).
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Sum of `count` independent dice with `sides` faces each.
    ///
    /// The sum is accumulated in `u64`, so every valid `count`/`sides` pair
    /// fits.
    ///
    /// # Errors
    ///
    /// Returns [`RollError`] when `count < 1` or `sides < 2`.
    pub fn roll(&mut self, count: u32, sides: u32) -> Result<u64, RollError> {
        if count < 1 {
            return Err(RollError::InvalidCount { count });
        }
        if sides < 2 {
            return Err(RollError::InvalidSides { sides });
        }
        let total: u64 = (0..count)
            .map(|_| u64::from(self.rng.roll_die(sides)))
            .sum();
        trace!(count, sides, total, "roll");
        Ok(total)
    }

    /// Rolls 1d20 + bonus and classifies it into fail / normal / combo.
    pub fn roll_combo_action(&mut self, bonus: i32) -> DiceResult {
        let total = self.d20() + bonus;
        let band = ComboBand::classify(total);
        trace!(total, bonus, %band, "combo action roll");
        DiceResult::new(
            total,
            band != ComboBand::Fail,
            band == ComboBand::Combo,
            band.to_string(),
        )
    }

    /// Rolls 1d20 + bonus to continue an active combo.
    pub fn roll_combo_continue(&mut self, bonus: i32) -> DiceResult {
        let total = self.d20() + bonus;
        let success = total >= Self::COMBO_CONTINUE_THRESHOLD;
        trace!(total, bonus, success, "combo continue roll");
        let description = if success {
            "Combo Continues"
        } else {
            "Combo Broken"
        };
        DiceResult::new(total, success, success, description)
    }

    /// Draws once and reports whether a loot drop happens.
    ///
    /// See [`loot_drop_chance`] for the probability.
    pub fn roll_loot_drop(&mut self, enemy_level: u32, player_level: u32) -> bool {
        let chance = loot_drop_chance(enemy_level, player_level);
        let drop = self.rng.unit() < chance;
        trace!(enemy_level, player_level, chance, drop, "loot roll");
        drop
    }

    pub(crate) fn die(&mut self, sides: u32) -> i32 {
        self.rng.roll_die(sides) as i32
    }

    fn d20(&mut self) -> i32 {
        self.die(20)
    }
}

/// Loot drop probability: `clamp(0.6 + 0.05 × (enemy − player), 0.3, 0.9)`.
pub fn loot_drop_chance(enemy_level: u32, player_level: u32) -> f64 {
    const BASE: f64 = 0.6;
    const PER_LEVEL: f64 = 0.05;
    const MIN: f64 = 0.3;
    const MAX: f64 = 0.9;

    let diff = i64::from(enemy_level) - i64::from(player_level);
    (BASE + PER_LEVEL * diff as f64).clamp(MIN, MAX)
}
