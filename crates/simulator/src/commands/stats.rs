//! Print the balance calculator's output per archetype and level.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use combat_core::{Archetype, AttributeSet, CalculatedEnemyStats, calculate_stats};
use serde::Serialize;
use strum::IntoEnumIterator;

use super::{OutputFormat, load_config};

/// Show derived enemy stats for every archetype over a level range
#[derive(Parser)]
pub struct Stats {
    /// Lowest level to show
    #[arg(long, default_value_t = 1)]
    from: u32,

    /// Highest level to show
    #[arg(long, default_value_t = 10)]
    to: u32,

    /// Restrict to one archetype (case-insensitive)
    #[arg(short, long, value_name = "NAME")]
    archetype: Option<String>,

    /// Combat config providing the balance shares
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct Row {
    archetype: Archetype,
    level: u32,
    stats: CalculatedEnemyStats,
}

impl Stats {
    pub fn execute(self) -> Result<()> {
        if self.from == 0 || self.from > self.to {
            bail!("invalid level range {}..={}", self.from, self.to);
        }
        let config = load_config(self.config.as_deref())?;
        let archetypes: Vec<Archetype> = match self.archetype.as_deref() {
            Some(name) => {
                let archetype = name
                    .parse::<Archetype>()
                    .map_err(|_| anyhow!("unknown archetype '{name}'"))?;
                vec![archetype]
            }
            None => Archetype::iter().collect(),
        };

        let mut rows = Vec::new();
        for archetype in archetypes {
            for level in self.from..=self.to {
                let stats = calculate_stats(level, archetype, &AttributeSet::ZERO, &config.balance)
                    .with_context(|| format!("{archetype} at level {level}"))?;
                rows.push(Row {
                    archetype,
                    level,
                    stats,
                });
            }
        }

        match self.format {
            OutputFormat::Table => {
                println!(
                    "{:<11} {:>5} {:>5} {:>7} {:>6} {:>6}",
                    "archetype", "level", "str", "health", "armor", "speed"
                );
                for row in &rows {
                    println!(
                        "{:<11} {:>5} {:>5} {:>7} {:>6} {:>6.2}",
                        row.archetype.to_string(),
                        row.level,
                        row.stats.strength,
                        row.stats.health,
                        row.stats.armor,
                        row.stats.attack_speed,
                    );
                }
            }
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(&rows).context("Failed to serialize stats")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}
