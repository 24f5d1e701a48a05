//! Duration-tracked status effects.
//!
//! Four independent slots: weakened, stunned, roll penalty and
//! damage-over-time (poison). Durations are in turns; [`StatusEffects::tick`]
//! is called once per turn by the turn manager, while poison counts down as it
//! deals damage.

use crate::error::{CombatError, ErrorSeverity};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StatusError {
    #[error("weaken multiplier must be finite and non-negative (got {multiplier})")]
    InvalidMultiplier { multiplier: f64 },
}

impl CombatError for StatusError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Outgoing damage scaled by `multiplier` for `turns` turns.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weakened {
    pub multiplier: f64,
    pub turns: u32,
}

/// Flat subtraction from rolls made by or against the combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollPenalty {
    pub amount: i32,
    pub turns: u32,
}

/// Periodic damage applied by `process_damage_over_time`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOverTime {
    pub damage: i32,
    pub turns: u32,
}

/// Which timed effects ran out during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusTick {
    pub weakened_expired: bool,
    pub stun_expired: bool,
    pub roll_penalty_expired: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    weakened: Option<Weakened>,
    stunned_turns: u32,
    roll_penalty: Option<RollPenalty>,
    poison: Option<DamageOverTime>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any current weaken effect.
    pub fn weaken(&mut self, multiplier: f64, turns: u32) -> Result<(), StatusError> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(StatusError::InvalidMultiplier { multiplier });
        }
        self.weakened = (turns > 0).then_some(Weakened { multiplier, turns });
        Ok(())
    }

    /// Stuns for at least `turns` more turns; a shorter stun never cuts a
    /// longer one short.
    pub fn stun(&mut self, turns: u32) {
        self.stunned_turns = self.stunned_turns.max(turns);
    }

    /// Replaces any current roll penalty.
    pub fn apply_roll_penalty(&mut self, amount: i32, turns: u32) {
        self.roll_penalty = (turns > 0).then_some(RollPenalty { amount, turns });
    }

    /// Replaces any current damage-over-time effect.
    pub fn poison(&mut self, damage: i32, turns: u32) {
        self.poison = (turns > 0 && damage > 0).then_some(DamageOverTime { damage, turns });
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned_turns > 0
    }

    pub fn stunned_turns(&self) -> u32 {
        self.stunned_turns
    }

    pub fn weakened(&self) -> Option<Weakened> {
        self.weakened
    }

    /// Outgoing damage multiplier (1.0 when not weakened).
    pub fn damage_multiplier(&self) -> f64 {
        self.weakened.map_or(1.0, |w| w.multiplier)
    }

    /// Current roll penalty amount (0 when none).
    pub fn roll_penalty(&self) -> i32 {
        self.roll_penalty.map_or(0, |p| p.amount)
    }

    pub fn roll_penalty_effect(&self) -> Option<RollPenalty> {
        self.roll_penalty
    }

    pub fn damage_over_time(&self) -> Option<DamageOverTime> {
        self.poison
    }

    /// Takes this turn's periodic damage, counting the effect down.
    pub fn take_damage_over_time(&mut self) -> Option<i32> {
        let dot = self.poison.as_mut()?;
        let damage = dot.damage;
        dot.turns -= 1;
        if dot.turns == 0 {
            self.poison = None;
        }
        Some(damage)
    }

    /// Counts weaken, stun and roll penalty down by one turn.
    pub fn tick(&mut self) -> StatusTick {
        let mut report = StatusTick::default();

        if let Some(weakened) = self.weakened.as_mut() {
            weakened.turns -= 1;
            if weakened.turns == 0 {
                self.weakened = None;
                report.weakened_expired = true;
            }
        }

        if self.stunned_turns > 0 {
            self.stunned_turns -= 1;
            report.stun_expired = self.stunned_turns == 0;
        }

        if let Some(penalty) = self.roll_penalty.as_mut() {
            penalty.turns -= 1;
            if penalty.turns == 0 {
                self.roll_penalty = None;
                report.roll_penalty_expired = true;
            }
        }

        report
    }

    /// Drops every effect.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
