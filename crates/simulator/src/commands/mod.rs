//! Simulator subcommands.

mod simulate;
mod stats;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use combat_content::{ConfigLoader, ContentFactory, ContentRegistry, builtin_registry};
use combat_core::CombatConfig;

pub use simulate::Simulate;
pub use stats::Stats;

/// Output format shared by every subcommand.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON document
    Json,
}

/// Config from `--config`, or the built-in defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<CombatConfig> {
    match path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(CombatConfig::default()),
    }
}

/// Catalogue from `--data-dir`, or the one compiled into `combat-content`.
pub(crate) fn load_content(data_dir: Option<&PathBuf>) -> Result<ContentRegistry> {
    match data_dir {
        Some(dir) => ContentFactory::new(dir)
            .load_registry()
            .with_context(|| format!("loading content from {}", dir.display())),
        None => builtin_registry().context("loading built-in content"),
    }
}
