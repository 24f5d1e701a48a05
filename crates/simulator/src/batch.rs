//! Parallel batch of independent battles and its aggregate report.

use anyhow::Result;
use combat_core::{CombatConfig, ContentOracle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::battle::{BattleReport, BattleSetup, Winner, run_battle};
use crate::pool::WorkerPool;

/// Aggregate outcome of a batch against one enemy.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchSummary {
    pub enemy: String,
    pub player_level: u32,
    pub enemy_level: u32,
    pub battles: usize,
    pub player_wins: usize,
    pub enemy_wins: usize,
    pub stalemates: usize,
    /// Player wins over all battles.
    pub win_rate: f64,
    pub average_turns: f64,
    /// Mean remaining player health over the battles the player won.
    pub average_health_left: f64,
    pub notifications: usize,
}

impl BatchSummary {
    pub fn from_reports(setup: &BattleSetup, reports: &[BattleReport]) -> Self {
        let count = |winner: Winner| reports.iter().filter(|r| r.winner == winner).count();
        let player_wins = count(Winner::Player);
        let battles = reports.len();

        let ratio = |num: f64, den: usize| if den == 0 { 0.0 } else { num / den as f64 };
        let total_turns: f64 = reports.iter().map(|r| f64::from(r.turns)).sum();
        let health_left: f64 = reports
            .iter()
            .filter(|r| r.winner == Winner::Player)
            .map(|r| f64::from(r.player_health))
            .sum();

        Self {
            enemy: setup.enemy.clone(),
            player_level: setup.player_level,
            enemy_level: setup.enemy_level,
            battles,
            player_wins,
            enemy_wins: count(Winner::Enemy),
            stalemates: count(Winner::Stalemate),
            win_rate: ratio(player_wins as f64, battles),
            average_turns: ratio(total_turns, battles),
            average_health_left: ratio(health_left, player_wins),
            notifications: reports.iter().map(|r| r.notifications).sum(),
        }
    }
}

/// Runs `battles` independent battles on `pool`.
///
/// Each battle owns its combatants, turn manager and random streams; results
/// are collected in battle order, so the summary is identical for any worker
/// count.
pub fn run_batch(
    setup: &BattleSetup,
    battles: usize,
    config: &CombatConfig,
    content: &dyn ContentOracle,
    pool: &WorkerPool,
) -> Result<BatchSummary> {
    let reports = pool.install(|| {
        (0..battles as u64)
            .into_par_iter()
            .map(|index| run_battle(setup, index, config, content))
            .collect::<Result<Vec<_>>>()
    })??;

    let summary = BatchSummary::from_reports(setup, &reports);
    info!(
        enemy = %summary.enemy,
        battles = summary.battles,
        win_rate = summary.win_rate,
        average_turns = summary.average_turns,
        "batch complete"
    );
    Ok(summary)
}
