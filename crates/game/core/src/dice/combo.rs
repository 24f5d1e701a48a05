//! Combo chain state machine.
//!
//! ```text
//!            combo roll ≥ 16                continue roll ≥ 11
//!   Idle ───────────────────▶ Active{1} ───────────────────▶ Active{n+1}
//!    ▲                             │                              │
//!    └──────── continue roll < 11 ─┴──────────────────────────────┘
//! ```

use super::roll::{DiceResult, RollEngine};
use crate::env::RngOracle;

/// Current position in a combo chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComboState {
    #[default]
    Idle,
    Active {
        step: u32,
    },
}

/// What one chain attempt produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComboOutcome {
    /// Idle roll in the fail band; the action misses.
    Failed,
    /// Idle roll in the normal band; a plain hit.
    NormalAttack,
    /// Idle roll in the combo band; the chain starts at step 1.
    ComboStarted,
    /// Active chain extended by one step.
    ComboContinued,
    /// Active chain ended; the action misses and the chain resets.
    ComboBroken,
}

impl ComboOutcome {
    /// True when the action connects.
    pub const fn lands(self) -> bool {
        !matches!(self, Self::Failed | Self::ComboBroken)
    }
}

/// One chain attempt: the roll, its outcome and the step reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboStep {
    pub result: DiceResult,
    pub outcome: ComboOutcome,
    /// Chain length after this attempt; 0 when not in a combo.
    pub step: u32,
}

/// Per-combatant combo tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboChain {
    state: ComboState,
}

impl ComboChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ComboState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ComboState::Active { .. })
    }

    /// Drops any chain in progress.
    pub fn reset(&mut self) {
        self.state = ComboState::Idle;
    }

    /// Rolls the next link: a combo-action roll while idle, a continue roll
    /// while a chain is active.
    pub fn advance<R: RngOracle>(&mut self, engine: &mut RollEngine<R>, bonus: i32) -> ComboStep {
        match self.state {
            ComboState::Idle => {
                let result = engine.roll_combo_action(bonus);
                let (outcome, step) = if result.combo_triggered() {
                    self.state = ComboState::Active { step: 1 };
                    (ComboOutcome::ComboStarted, 1)
                } else if result.success() {
                    (ComboOutcome::NormalAttack, 0)
                } else {
                    (ComboOutcome::Failed, 0)
                };
                ComboStep {
                    result,
                    outcome,
                    step,
                }
            }
            ComboState::Active { step } => {
                let result = engine.roll_combo_continue(bonus);
                if result.success() {
                    let next = step + 1;
                    self.state = ComboState::Active { step: next };
                    ComboStep {
                        result,
                        outcome: ComboOutcome::ComboContinued,
                        step: next,
                    }
                } else {
                    self.state = ComboState::Idle;
                    ComboStep {
                        result,
                        outcome: ComboOutcome::ComboBroken,
                        step: 0,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;

    #[test]
    fn chain_starts_continues_and_breaks() {
        let mut engine = RollEngine::new(ScriptedRng::faces([17, 12, 15, 4, 9]));
        let mut chain = ComboChain::new();

        let first = chain.advance(&mut engine, 0);
        assert_eq!(first.outcome, ComboOutcome::ComboStarted);
        assert_eq!(chain.state(), ComboState::Active { step: 1 });

        assert_eq!(chain.advance(&mut engine, 0).step, 2);
        assert_eq!(chain.advance(&mut engine, 0).step, 3);

        let broken = chain.advance(&mut engine, 0);
        assert_eq!(broken.outcome, ComboOutcome::ComboBroken);
        assert!(!broken.outcome.lands());
        assert!(!chain.is_active());

        let plain = chain.advance(&mut engine, 0);
        assert_eq!(plain.outcome, ComboOutcome::NormalAttack);
        assert!(plain.outcome.lands());
    }

    #[test]
    fn low_idle_roll_fails_without_starting() {
        let mut engine = RollEngine::new(ScriptedRng::faces([3]));
        let mut chain = ComboChain::new();
        let step = chain.advance(&mut engine, 0);
        assert_eq!(step.outcome, ComboOutcome::Failed);
        assert_eq!(chain.state(), ComboState::Idle);
    }
}
