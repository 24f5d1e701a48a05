//! Action and enemy catalogue loader.
//!
//! Loads actions and enemy templates from RON data files.

use std::path::Path;

use combat_core::{Action, EnemyTemplate};

use crate::loaders::{LoadResult, read_file};
use crate::registry::ContentRegistry;

const BUILTIN_ACTIONS: &str = include_str!("../../data/actions.ron");
const BUILTIN_ENEMIES: &str = include_str!("../../data/enemies.ron");

/// Loader for RON catalogues.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load an action catalogue.
    ///
    /// RON format: `Vec<Action>`
    pub fn load_actions(path: &Path) -> LoadResult<Vec<Action>> {
        let content = read_file(path)?;
        Self::parse_actions(&content)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Load enemy templates.
    ///
    /// RON format: `Vec<EnemyTemplate>`
    pub fn load_enemies(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        Self::parse_enemies(&content)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    pub fn parse_actions(content: &str) -> LoadResult<Vec<Action>> {
        let actions: Vec<Action> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse action catalogue RON: {}", e))?;
        for action in &actions {
            if action.name.is_empty() {
                anyhow::bail!("action without a name");
            }
            if !(action.length.is_finite() && action.length >= 0.0) {
                anyhow::bail!(
                    "action '{}' has invalid length {}",
                    action.name,
                    action.length
                );
            }
        }
        Ok(actions)
    }

    pub fn parse_enemies(content: &str) -> LoadResult<Vec<EnemyTemplate>> {
        let enemies: Vec<EnemyTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalogue RON: {}", e))?;
        for enemy in &enemies {
            if enemy.name.is_empty() {
                anyhow::bail!("enemy template without a name");
            }
            if let Some((action, probability)) = enemy
                .actions
                .iter()
                .find(|(_, p)| !(0.0..=1.0).contains(p))
            {
                anyhow::bail!(
                    "enemy '{}' gives action '{}' probability {} outside [0, 1]",
                    enemy.name,
                    action,
                    probability
                );
            }
        }
        Ok(enemies)
    }

    /// Builds a registry and checks that every enemy action reference
    /// resolves.
    pub fn registry(
        actions: Vec<Action>,
        enemies: Vec<EnemyTemplate>,
    ) -> LoadResult<ContentRegistry> {
        let mut registry = ContentRegistry::new();
        for action in actions {
            registry.insert_action(action);
        }
        for enemy in enemies {
            registry.insert_enemy(enemy);
        }

        if let Some((enemy, action)) = registry.missing_actions().first() {
            anyhow::bail!("enemy '{}' references unknown action '{}'", enemy, action);
        }
        Ok(registry)
    }
}

/// The catalogue compiled into this crate.
pub fn builtin_registry() -> LoadResult<ContentRegistry> {
    let actions = CatalogLoader::parse_actions(BUILTIN_ACTIONS)?;
    let enemies = CatalogLoader::parse_enemies(BUILTIN_ENEMIES)?;
    CatalogLoader::registry(actions, enemies)
}

#[cfg(test)]
mod tests {
    use combat_core::{ActionEffect, Archetype, ContentOracle, TargetKind};

    use super::*;

    #[test]
    fn builtin_catalogue_is_consistent() {
        let registry = builtin_registry().expect("Failed to load built-in content");

        assert!(registry.actions().count() >= 10);
        assert_eq!(registry.enemy_names().len(), 7);

        let golem = registry.enemy("Stone Golem").unwrap();
        assert_eq!(golem.archetype, Archetype::Guardian);
        assert!(!golem.living);

        let war_cry = registry.action("War Cry").unwrap();
        assert_eq!(war_cry.target, TargetKind::SelfTarget);
        assert!(matches!(war_cry.effects[0], ActionEffect::StatBonus { amount: 4, .. }));
    }

    #[test]
    fn omitted_action_fields_take_defaults() {
        let actions = CatalogLoader::parse_actions(r#"[(name: "Poke")]"#).unwrap();
        assert_eq!(actions, vec![Action::attack("Poke")]);
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let err = CatalogLoader::parse_enemies(
            r#"[(name: "Imp", archetype: Assassin, actions: [("Claw", 1.5)])]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Imp"));
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let enemies = CatalogLoader::parse_enemies(
            r#"[(name: "Imp", archetype: Assassin, actions: [("Hex", 1.0)])]"#,
        )
        .unwrap();
        let err = CatalogLoader::registry(Vec::new(), enemies).unwrap_err();
        assert!(err.to_string().contains("Hex"));
    }
}
