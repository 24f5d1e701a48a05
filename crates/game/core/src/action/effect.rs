//! Side effects an action can carry.

use crate::stats::Attribute;

/// One effect applied when an action lands.
///
/// Effects are data only; the action resolver decides when and to whom they
/// apply (the action's [`TargetKind`](super::TargetKind)).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionEffect {
    /// Scale the target's outgoing damage.
    Weaken { multiplier: f64, turns: u32 },
    /// Target skips its action selection.
    Stun { turns: u32 },
    /// Flat penalty on the target's rolls.
    RollPenalty { amount: i32, turns: u32 },
    /// Periodic damage.
    Poison { damage: i32, turns: u32 },
    /// Temporary attribute bonus (single slot, replaces any existing one).
    StatBonus {
        attribute: Attribute,
        amount: i32,
        duration: u32,
    },
    /// Flat healing.
    Heal { amount: i32 },
}

impl ActionEffect {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Weaken { .. } => "weaken",
            Self::Stun { .. } => "stun",
            Self::RollPenalty { .. } => "roll_penalty",
            Self::Poison { .. } => "poison",
            Self::StatBonus { .. } => "stat_bonus",
            Self::Heal { .. } => "heal",
        }
    }
}
