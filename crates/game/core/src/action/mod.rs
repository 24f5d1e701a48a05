//! Action definitions.
//!
//! Actions are opaque value objects produced by content loading. The core
//! reads only their name (for pools and "last action" tracking) and length
//! (for turn ordering); everything else is consumed by the action resolver.

mod effect;

pub use effect::ActionEffect;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    #[default]
    Attack,
    Spell,
    Heal,
    Buff,
    Debuff,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    SelfTarget,
    #[default]
    Enemy,
}

/// A named combat action.
///
/// When deserialized, omitted fields take the values of [`Action::new`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Action {
    pub name: String,
    pub kind: ActionKind,
    pub target: TargetKind,
    /// Duration relative to a standard action (1.0 = one reference length).
    pub length: f64,
    pub damage_multiplier: f64,
    /// Added to the combo roll.
    pub roll_bonus: i32,
    pub effects: Vec<ActionEffect>,
}

impl Action {
    pub fn new(name: impl Into<String>, kind: ActionKind, target: TargetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            target,
            length: 1.0,
            damage_multiplier: 1.0,
            roll_bonus: 0,
            effects: Vec::new(),
        }
    }

    /// A plain single-target attack.
    pub fn attack(name: impl Into<String>) -> Self {
        Self::new(name, ActionKind::Attack, TargetKind::Enemy)
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_damage_multiplier(mut self, multiplier: f64) -> Self {
        self.damage_multiplier = multiplier;
        self
    }

    pub fn with_roll_bonus(mut self, bonus: i32) -> Self {
        self.roll_bonus = bonus;
        self
    }

    pub fn with_effect(mut self, effect: ActionEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn targets_self(&self) -> bool {
        self.target == TargetKind::SelfTarget
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::new(String::new(), ActionKind::default(), TargetKind::default())
    }
}
