//! One complete battle between the player and a spawned enemy.

use anyhow::{Context, Result};
use combat_core::{
    Action, CombatConfig, Combatant, CombatantId, ContentOracle, PcgRng, TurnManager,
    compute_seed, spawn_enemy,
};
use serde::Serialize;
use tracing::debug;

use crate::resolver::StandardResolver;

/// Actions the simulated player picks from, with their weights.
pub const PLAYER_LOADOUT: &[(&str, f64)] = &[
    ("Strike", 0.5),
    ("Heavy Blow", 0.25),
    ("Quick Jab", 0.15),
    ("Mend", 0.1),
];

const SELECTION_STREAM: u32 = 0;
const RESOLUTION_STREAM: u32 = 1;

/// Who was left standing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Winner {
    Player,
    Enemy,
    /// Turn cap reached with both sides alive.
    Stalemate,
}

/// Parameters shared by every battle of a run.
#[derive(Clone, Debug)]
pub struct BattleSetup {
    pub enemy: String,
    pub player_level: u32,
    pub enemy_level: u32,
    pub max_turns: u32,
    pub base_seed: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BattleReport {
    pub index: u64,
    pub winner: Winner,
    pub turns: u32,
    pub player_health: i32,
    pub enemy_health: i32,
    pub notifications: usize,
}

/// Builds the simulated player with its loadout.
pub fn build_player(
    config: &CombatConfig,
    level: u32,
    content: &dyn ContentOracle,
) -> Result<Combatant> {
    let mut player = Combatant::player("Player", level, &config.attributes)?;
    for (name, probability) in PLAYER_LOADOUT {
        let action: &Action = content
            .action(name)
            .with_context(|| format!("player loadout action '{name}' is not in the catalogue"))?;
        player.add_action(action.clone(), *probability)?;
    }
    Ok(player)
}

/// Runs battle number `index` to completion or to the turn cap.
///
/// Action selection and combat resolution draw from two independent PCG
/// streams derived from `(base_seed, index)`, so each battle replays exactly
/// no matter which thread runs it.
pub fn run_battle(
    setup: &BattleSetup,
    index: u64,
    config: &CombatConfig,
    content: &dyn ContentOracle,
) -> Result<BattleReport> {
    let template = content
        .enemy(&setup.enemy)
        .with_context(|| format!("unknown enemy '{}'", setup.enemy))?;
    let mut player = build_player(config, setup.player_level, content)?;
    let mut enemy = spawn_enemy(CombatantId(1), template, setup.enemy_level, config, content)
        .with_context(|| format!("failed to spawn '{}'", setup.enemy))?;

    let mut selection = PcgRng::new(compute_seed(setup.base_seed, index, SELECTION_STREAM));
    let mut resolver = StandardResolver::new(
        PcgRng::new(compute_seed(setup.base_seed, index, RESOLUTION_STREAM)),
        config.turns.reference_action_length,
    );

    let mut manager = TurnManager::new(config.turns.clone());
    manager.initialize_battle(&mut player, &mut enemy)?;
    let mut notifications = 0;

    while manager.turn_count() < setup.max_turns {
        let Some(next) = manager.next_actor(&[&player, &enemy])? else {
            break;
        };
        let player_turn = next == player.id;
        let (actor, target) = if player_turn {
            (&mut player, &mut enemy)
        } else {
            (&mut enemy, &mut player)
        };

        match actor.select_action(&mut selection).cloned() {
            Some(action) => {
                let outcome = manager.execute_turn(actor, target, &action, &mut resolver)?;
                debug!(battle = index, "{}", outcome.resolution.summary);
                notifications += outcome.notifications.len();
            }
            None => {
                manager.pass_turn(actor)?;
            }
        }
        manager.tick_status_effects(actor)?;

        if player_turn {
            notifications += manager
                .process_damage_over_time(&mut player, &mut enemy)?
                .len();
            manager.process_regeneration(&mut player)?;
        }
        if !player.is_alive() || !enemy.is_alive() {
            break;
        }
    }

    let summary = manager.end_battle()?;
    let winner = match (player.is_alive(), enemy.is_alive()) {
        (true, false) => Winner::Player,
        (false, _) => Winner::Enemy,
        (true, true) => Winner::Stalemate,
    };
    debug!(battle = index, ?winner, turns = summary.turn_count, "battle finished");

    Ok(BattleReport {
        index,
        winner,
        turns: summary.turn_count,
        player_health: player.health(),
        enemy_health: enemy.health(),
        notifications,
    })
}
