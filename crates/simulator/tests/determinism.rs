use combat_content::builtin_registry;
use combat_core::{CombatConfig, ContentOracle};
use combat_sim::{BattleSetup, Winner, WorkerPool, run_batch, run_battle};

fn setup(enemy: &str, base_seed: u64) -> BattleSetup {
    BattleSetup {
        enemy: enemy.to_string(),
        player_level: 4,
        enemy_level: 4,
        max_turns: 200,
        base_seed,
    }
}

#[test]
fn every_catalogued_enemy_can_be_fought() {
    let content = builtin_registry().unwrap();
    let config = CombatConfig::default();
    for name in content.enemy_names() {
        let report = run_battle(&setup(name, 11), 0, &config, &content).unwrap();
        assert!(report.turns > 0, "{name} battle took no turns");
    }
}

#[test]
fn batches_replay_across_worker_counts() {
    let content = builtin_registry().unwrap();
    let config = CombatConfig::default();
    let setup = setup("Orc Berserker", 99);

    let serial = run_batch(&setup, 40, &config, &content, &WorkerPool::with_workers(1)).unwrap();
    let parallel = run_batch(&setup, 40, &config, &content, &WorkerPool::with_workers(3)).unwrap();
    let default = run_batch(&setup, 40, &config, &content, &WorkerPool::default()).unwrap();
    assert_eq!(serial, parallel);
    assert_eq!(serial, default);
}

#[test]
fn different_seeds_produce_different_battles() {
    let content = builtin_registry().unwrap();
    let config = CombatConfig::default();
    let reports: Vec<_> = (0..16)
        .map(|seed| run_battle(&setup("Goblin", seed), 0, &config, &content).unwrap())
        .collect();
    assert!(
        reports.windows(2).any(|pair| pair[0] != pair[1]),
        "all seeds produced identical battles"
    );
}

#[test]
fn overleveled_player_beats_a_goblin() {
    let content = builtin_registry().unwrap();
    let config = CombatConfig::default();
    let mut setup = setup("Goblin", 5);
    setup.player_level = 20;
    setup.enemy_level = 1;
    for index in 0..10 {
        let report = run_battle(&setup, index, &config, &content).unwrap();
        assert_eq!(report.winner, Winner::Player);
    }
}
