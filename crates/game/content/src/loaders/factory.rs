//! Content factory for building the registry and config from a data directory.

use std::path::{Path, PathBuf};

use combat_core::CombatConfig;

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};
use crate::registry::ContentRegistry;

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── actions.ron
/// └── enemies.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load `actions.ron` and `enemies.ron` into a validated registry.
    pub fn load_registry(&self) -> LoadResult<ContentRegistry> {
        let actions = CatalogLoader::load_actions(&self.data_dir.join("actions.ron"))?;
        let enemies = CatalogLoader::load_enemies(&self.data_dir.join("enemies.ron"))?;
        CatalogLoader::registry(actions, enemies)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use combat_core::ContentOracle;

    use super::*;

    fn bundled() -> ContentFactory {
        ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_config_matches_defaults() {
        assert_eq!(bundled().load_config().unwrap(), CombatConfig::default());
    }

    #[test]
    fn loads_registry_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("actions.ron"), r#"[(name: "Claw")]"#).unwrap();
        std::fs::write(
            dir.path().join("enemies.ron"),
            r#"[(name: "Rat", archetype: Assassin, actions: [("Claw", 1.0)])]"#,
        )
        .unwrap();

        let registry = ContentFactory::new(dir.path()).load_registry().unwrap();
        assert_eq!(registry.enemy_names(), vec!["Rat"]);
    }

    #[test]
    fn missing_catalogue_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ContentFactory::new(dir.path()).load_registry().is_err());
    }
}
