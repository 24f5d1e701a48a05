//! Content oracle: read-only lookup of actions and enemy templates.
//!
//! Content is produced by an external loader and handed to the core at battle
//! setup; the core never reaches for a global table.

use crate::action::Action;
use crate::balance::Archetype;
use crate::stats::AttributeSet;

/// Static description of an enemy kind, before level scaling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EnemyTemplate {
    pub name: String,
    pub archetype: Archetype,
    /// Agility, Technique and Intelligence are carried into the balanced
    /// stats as-is; Strength is replaced by the point allocation.
    pub base_attributes: AttributeSet,
    /// Non-living enemies (constructs, undead) ignore enemy-side
    /// damage-over-time effects.
    pub living: bool,
    /// `(action name, probability)` pairs resolved through [`ContentOracle::action`].
    pub actions: Vec<(String, f64)>,
}

impl EnemyTemplate {
    pub fn new(name: impl Into<String>, archetype: Archetype) -> Self {
        Self {
            name: name.into(),
            archetype,
            base_attributes: AttributeSet::splat(4),
            living: true,
            actions: Vec::new(),
        }
    }

    pub fn with_base_attributes(mut self, base: AttributeSet) -> Self {
        self.base_attributes = base;
        self
    }

    pub fn non_living(mut self) -> Self {
        self.living = false;
        self
    }

    pub fn with_action(mut self, name: impl Into<String>, probability: f64) -> Self {
        self.actions.push((name.into(), probability));
        self
    }
}

impl Default for EnemyTemplate {
    fn default() -> Self {
        Self::new(String::new(), Archetype::default())
    }
}

/// Content oracle for actions and enemy templates.
pub trait ContentOracle: Send + Sync {
    /// Look up an action definition by name.
    fn action(&self, name: &str) -> Option<&Action>;

    /// Look up an enemy template by name.
    fn enemy(&self, name: &str) -> Option<&EnemyTemplate>;

    /// Names of every enemy template, in a stable order.
    fn enemy_names(&self) -> Vec<&str>;
}
