//! Weighted action pool.

use crate::action::Action;
use crate::env::RngOracle;
use crate::error::{CombatError, ErrorSeverity};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionPoolError {
    #[error("probability for '{action}' must be within [0, 1] (got {probability})")]
    InvalidProbability { action: String, probability: f64 },
}

impl CombatError for ActionPoolError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "ACTION_POOL_INVALID_PROBABILITY"
    }
}

/// One `(action, probability)` pair.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolEntry {
    pub action: Action,
    pub probability: f64,
}

/// Actions a combatant can pick from, weighted proportionally.
///
/// Probabilities need not sum to 1; selection divides by the pool's total.
/// Action names are unique within a pool.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPool {
    entries: Vec<PoolEntry>,
}

impl ActionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action, replacing (in place) any entry with the same name.
    pub fn add_action(&mut self, action: Action, probability: f64) -> Result<(), ActionPoolError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ActionPoolError::InvalidProbability {
                action: action.name,
                probability,
            });
        }

        match self
            .entries
            .iter_mut()
            .find(|entry| entry.action.name == action.name)
        {
            Some(existing) => {
                existing.action = action;
                existing.probability = probability;
            }
            None => self.entries.push(PoolEntry {
                action,
                probability,
            }),
        }
        Ok(())
    }

    /// Removes an action by name. Returns true if it was present.
    pub fn remove_action(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.action.name != name);
        self.entries.len() != before
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.entries
            .iter()
            .find(|entry| entry.action.name == name)
            .map(|entry| &entry.action)
    }

    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|entry| entry.probability).sum()
    }

    /// Weighted draw. `None` only when the pool is empty.
    ///
    /// Draws `u ∈ [0, total)` and returns the first entry whose cumulative
    /// weight reaches `u`; floating-point drift falls back to the last entry.
    pub fn select(&self, rng: &mut impl RngOracle) -> Option<&Action> {
        let last = self.entries.last()?;
        let draw = rng.unit() * self.total_weight();

        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.probability;
            if cumulative >= draw {
                return Some(&entry.action);
            }
        }
        Some(&last.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};

    #[test]
    fn out_of_range_probability_is_rejected() {
        let mut pool = ActionPool::new();
        assert!(pool.add_action(Action::attack("Slash"), 1.5).is_err());
        assert!(pool.add_action(Action::attack("Slash"), -0.1).is_err());
        assert!(pool.add_action(Action::attack("Slash"), f64::NAN).is_err());
        assert!(pool.is_empty());
    }

    #[test]
    fn adding_same_name_replaces_entry() {
        let mut pool = ActionPool::new();
        pool.add_action(Action::attack("Slash"), 0.3).unwrap();
        pool.add_action(Action::attack("Bash"), 0.3).unwrap();
        pool.add_action(Action::attack("Slash").with_roll_bonus(2), 0.9).unwrap();

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.entries()[0].probability, 0.9);
        assert_eq!(pool.get("Slash").map(|a| a.roll_bonus), Some(2));
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let pool = ActionPool::new();
        assert!(pool.select(&mut PcgRng::new(1)).is_none());
    }

    #[test]
    fn single_certain_entry_is_always_selected() {
        let mut pool = ActionPool::new();
        pool.add_action(Action::attack("Slash"), 1.0).unwrap();
        let mut rng = PcgRng::new(5);
        for _ in 0..100 {
            assert_eq!(pool.select(&mut rng).map(|a| a.name.as_str()), Some("Slash"));
        }
    }

    #[test]
    fn selection_walks_cumulative_weights() {
        let mut pool = ActionPool::new();
        pool.add_action(Action::attack("Jab"), 0.2).unwrap();
        pool.add_action(Action::attack("Hook"), 0.2).unwrap();
        // total 0.4: draws 0.25 → 0.1 (Jab), 0.75 → 0.3 (Hook)
        let mut rng = ScriptedRng::fractions([0.25, 0.75]);
        assert_eq!(pool.select(&mut rng).map(|a| a.name.as_str()), Some("Jab"));
        assert_eq!(pool.select(&mut rng).map(|a| a.name.as_str()), Some("Hook"));
    }

    #[test]
    fn remove_action_by_name() {
        let mut pool = ActionPool::new();
        pool.add_action(Action::attack("Jab"), 0.5).unwrap();
        assert!(pool.remove_action("Jab"));
        assert!(!pool.remove_action("Jab"));
    }
}
