//! Run seeded battle batches and report win rates.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use combat_core::ContentOracle;
use combat_sim::{BatchSummary, BattleSetup, WorkerPool, run_batch};
use tracing::info;

use super::{OutputFormat, load_config, load_content};

/// Simulate batches of battles against one or more enemies
#[derive(Parser)]
pub struct Simulate {
    /// Enemy to fight (repeatable); every catalogued enemy when omitted
    #[arg(short, long, value_name = "NAME")]
    enemy: Vec<String>,

    /// Battles per enemy
    #[arg(short, long, default_value_t = 1000)]
    battles: usize,

    /// Base seed; each battle derives its own streams from it
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 1)]
    player_level: u32,

    #[arg(long, default_value_t = 1)]
    enemy_level: u32,

    /// Turn cap before a battle counts as a stalemate
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Worker threads (0 = all cores)
    #[arg(short, long, default_value_t = 0)]
    workers: usize,

    /// Directory holding actions.ron, enemies.ron and config.toml
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Combat config; overrides the one in --data-dir
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        if self.player_level == 0 || self.enemy_level == 0 {
            bail!("levels start at 1");
        }

        let content = load_content(self.data_dir.as_ref())?;
        let config = match (&self.config, &self.data_dir) {
            (Some(path), _) => load_config(Some(path.as_path()))?,
            (None, Some(dir)) => combat_content::ContentFactory::new(dir)
                .load_config()
                .with_context(|| format!("loading config from {}", dir.display()))?,
            (None, None) => load_config(None)?,
        };

        let enemies: Vec<String> = if self.enemy.is_empty() {
            content.enemy_names().into_iter().map(str::to_owned).collect()
        } else {
            self.enemy.clone()
        };
        if enemies.is_empty() {
            bail!("no enemies to simulate");
        }

        let pool = WorkerPool::with_workers(self.workers);
        info!(
            enemies = enemies.len(),
            battles = self.battles,
            seed = self.seed,
            "starting simulation"
        );

        let summaries = enemies
            .into_iter()
            .map(|enemy| {
                let setup = BattleSetup {
                    enemy,
                    player_level: self.player_level,
                    enemy_level: self.enemy_level,
                    max_turns: self.max_turns,
                    base_seed: self.seed,
                };
                run_batch(&setup, self.battles, &config, &content, &pool)
            })
            .collect::<Result<Vec<_>>>()?;

        match self.format {
            OutputFormat::Table => print_table(&summaries),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&summaries)
                    .context("Failed to serialize summaries")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}

fn print_table(summaries: &[BatchSummary]) {
    println!(
        "{:<16} {:>5} {:>5} {:>8} {:>8} {:>9} {:>10} {:>8}",
        "enemy", "p.lv", "e.lv", "battles", "win %", "stalemate", "avg turns", "hp left"
    );
    for s in summaries {
        println!(
            "{:<16} {:>5} {:>5} {:>8} {:>7.1}% {:>9} {:>10.1} {:>8.1}",
            s.enemy,
            s.player_level,
            s.enemy_level,
            s.battles,
            s.win_rate * 100.0,
            s.stalemates,
            s.average_turns,
            s.average_health_left,
        );
    }
}
