//! In-memory content oracle.

use std::collections::BTreeMap;

use combat_core::{Action, ContentOracle, EnemyTemplate};
use tracing::warn;

/// Actions and enemy templates keyed by name.
///
/// Names are unique; inserting an existing name replaces the old entry.
/// Iteration (and [`ContentOracle::enemy_names`]) is in name order, so
/// battle setup is reproducible regardless of load order.
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    actions: BTreeMap<String, Action>,
    enemies: BTreeMap<String, EnemyTemplate>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_action(&mut self, action: Action) {
        if let Some(previous) = self.actions.insert(action.name.clone(), action) {
            warn!(name = %previous.name, "action redefined");
        }
    }

    pub fn insert_enemy(&mut self, enemy: EnemyTemplate) {
        if let Some(previous) = self.enemies.insert(enemy.name.clone(), enemy) {
            warn!(name = %previous.name, "enemy template redefined");
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.insert_action(action);
        self
    }

    pub fn with_enemy(mut self, enemy: EnemyTemplate) -> Self {
        self.insert_enemy(enemy);
        self
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.enemies.values()
    }

    /// `(enemy, action)` pairs where an enemy references an action that is
    /// not registered.
    pub fn missing_actions(&self) -> Vec<(&str, &str)> {
        self.enemies
            .values()
            .flat_map(|enemy| {
                enemy
                    .actions
                    .iter()
                    .filter(|(name, _)| !self.actions.contains_key(name))
                    .map(move |(name, _)| (enemy.name.as_str(), name.as_str()))
            })
            .collect()
    }
}

impl ContentOracle for ContentRegistry {
    fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    fn enemy(&self, name: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(name)
    }

    fn enemy_names(&self) -> Vec<&str> {
        self.enemies.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::Archetype;

    #[test]
    fn lookups_and_stable_order() {
        let registry = ContentRegistry::new()
            .with_action(Action::attack("Claw"))
            .with_enemy(EnemyTemplate::new("Wolf", Archetype::Assassin).with_action("Claw", 1.0))
            .with_enemy(EnemyTemplate::new("Bear", Archetype::Juggernaut).with_action("Claw", 1.0));

        assert!(registry.action("Claw").is_some());
        assert!(registry.action("Bite").is_none());
        assert_eq!(registry.enemy_names(), vec!["Bear", "Wolf"]);
        assert!(registry.missing_actions().is_empty());
    }

    #[test]
    fn redefinition_replaces() {
        let registry = ContentRegistry::new()
            .with_action(Action::attack("Claw"))
            .with_action(Action::attack("Claw").with_roll_bonus(3));
        assert_eq!(registry.actions().count(), 1);
        assert_eq!(registry.action("Claw").map(|a| a.roll_bonus), Some(3));
    }

    #[test]
    fn dangling_action_references_are_listed() {
        let registry = ContentRegistry::new()
            .with_enemy(EnemyTemplate::new("Ghost", Archetype::Berserker).with_action("Wail", 1.0));
        assert_eq!(registry.missing_actions(), vec![("Ghost", "Wail")]);
    }
}
