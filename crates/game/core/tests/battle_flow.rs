use combat_core::{
    Action, ActionResolution, ActionResolver, Archetype, AttributeSet, BattleNotification,
    BattlePhase, CalculatedEnemyStats, CombatConfig, CombatError, Combatant, CombatantId,
    ContentOracle, EnemyTemplate, ErrorSeverity, HealthThreshold, PcgRng, TurnError, TurnManager,
    calculate_stats, spawn_enemy,
};

/// Removes exactly the action's damage multiplier in health.
struct FixedDamage;

impl ActionResolver for FixedDamage {
    fn resolve(
        &mut self,
        _actor: &mut Combatant,
        target: &mut Combatant,
        action: &Action,
    ) -> ActionResolution {
        ActionResolution {
            damage_dealt: target.take_damage(action.damage_multiplier as i32),
            duration: action.length,
            summary: format!("{} hits", action.name),
            ..ActionResolution::default()
        }
    }
}

struct Content {
    actions: Vec<Action>,
    enemies: Vec<EnemyTemplate>,
}

impl ContentOracle for Content {
    fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    fn enemy(&self, name: &str) -> Option<&EnemyTemplate> {
        self.enemies.iter().find(|e| e.name == name)
    }

    fn enemy_names(&self) -> Vec<&str> {
        self.enemies.iter().map(|e| e.name.as_str()).collect()
    }
}

fn content() -> Content {
    Content {
        actions: vec![Action::attack("Claw"), Action::attack("Bite")],
        enemies: vec![
            EnemyTemplate::new("Goblin", Archetype::Warrior)
                .with_action("Claw", 0.7)
                .with_action("Bite", 0.3),
        ],
    }
}

fn battle() -> (TurnManager, Combatant, Combatant) {
    let config = CombatConfig::default();
    let content = content();
    let mut player = Combatant::player("Hero", 1, &config.attributes).unwrap();
    let template = content.enemy("Goblin").unwrap();
    let mut goblin = spawn_enemy(CombatantId(1), template, 1, &config, &content).unwrap();

    let mut manager = TurnManager::new(config.turns.clone());
    manager.initialize_battle(&mut player, &mut goblin).unwrap();
    (manager, player, goblin)
}

fn milestones(notes: &[BattleNotification]) -> Vec<HealthThreshold> {
    notes
        .iter()
        .filter_map(|n| match n {
            BattleNotification::Milestone { threshold, .. } => Some(*threshold),
            BattleNotification::LeadershipChange { .. } => None,
        })
        .collect()
}

#[test]
fn level_one_warrior_profile_is_reproducible() {
    let expected = CalculatedEnemyStats {
        strength: 6,
        agility: 4,
        technique: 4,
        intelligence: 4,
        health: 24,
        armor: 1,
        attack_speed: 1.1,
    };
    let config = CombatConfig::default();
    for _ in 0..3 {
        let stats = calculate_stats(
            1,
            Archetype::Warrior,
            &AttributeSet::splat(4),
            &config.balance,
        )
        .unwrap();
        assert_eq!(stats, expected);
    }
}

#[test]
fn leader_dropping_to_twenty_percent_hands_over_leadership() {
    let (mut manager, mut player, mut goblin) = battle();
    assert_eq!(player.health(), 50);
    assert_eq!(goblin.health(), 24);
    assert_eq!(manager.tracker().unwrap().leader(), Some(CombatantId::PLAYER));

    // 50 → 10 is exactly 20%
    let maul = Action::attack("Maul").with_damage_multiplier(40.0);
    let outcome = manager
        .execute_turn(&mut goblin, &mut player, &maul, &mut FixedDamage)
        .unwrap();

    assert!(outcome.target_alive);
    let crossed = milestones(&outcome.notifications);
    assert_eq!(
        crossed
            .iter()
            .filter(|t| **t == HealthThreshold::Critical)
            .count(),
        1
    );

    let changes: Vec<_> = outcome
        .notifications
        .iter()
        .filter(|n| n.is_leadership_change())
        .collect();
    assert_eq!(changes.len(), 1);
    match changes[0] {
        BattleNotification::LeadershipChange {
            previous,
            leader,
            leader_name,
            ..
        } => {
            assert_eq!(*previous, CombatantId::PLAYER);
            assert_eq!(*leader, CombatantId(1));
            assert_eq!(leader_name, "Goblin");
        }
        other => panic!("unexpected notification: {other}"),
    }

    let pending = manager.get_and_clear_pending_notifications().unwrap();
    assert_eq!(pending, outcome.notifications);
}

#[test]
fn milestones_do_not_refire_after_healing() {
    let (mut manager, mut player, mut goblin) = battle();
    let cut = Action::attack("Cut").with_damage_multiplier(30.0);

    let first = manager
        .execute_turn(&mut goblin, &mut player, &cut, &mut FixedDamage)
        .unwrap();
    assert_eq!(milestones(&first.notifications), vec![HealthThreshold::Half]);

    player.heal(30);
    manager.check_health_milestones(&player, 0).unwrap();

    let second = manager
        .execute_turn(&mut goblin, &mut player, &cut, &mut FixedDamage)
        .unwrap();
    assert!(milestones(&second.notifications).is_empty());

    let tracker = manager.tracker().unwrap();
    let state = tracker.milestones(CombatantId::PLAYER).unwrap();
    assert!(state.has_reached(HealthThreshold::Half));
    assert!(!state.has_reached(HealthThreshold::Critical));
}

#[test]
fn milestones_reset_at_next_battle() {
    let (mut manager, mut player, mut goblin) = battle();
    let cut = Action::attack("Cut").with_damage_multiplier(30.0);
    manager
        .execute_turn(&mut goblin, &mut player, &cut, &mut FixedDamage)
        .unwrap();
    manager.end_battle().unwrap();

    player.reset_for_battle();
    manager.initialize_battle(&mut player, &mut goblin).unwrap();
    let again = manager
        .execute_turn(&mut goblin, &mut player, &cut, &mut FixedDamage)
        .unwrap();
    assert_eq!(milestones(&again.notifications), vec![HealthThreshold::Half]);
}

#[test]
fn leadership_is_not_announced_when_leader_holds() {
    let (mut manager, mut player, mut goblin) = battle();
    let jab = Action::attack("Jab").with_damage_multiplier(5.0);
    let outcome = manager
        .execute_turn(&mut player, &mut goblin, &jab, &mut FixedDamage)
        .unwrap();
    assert!(outcome.notifications.iter().all(|n| !n.is_leadership_change()));
}

#[test]
fn spawned_enemy_draws_from_its_pool() {
    let (_manager, _player, goblin) = battle();
    let mut rng = PcgRng::new(99);
    for _ in 0..50 {
        let action = goblin.select_action(&mut rng).unwrap();
        assert!(action.name == "Claw" || action.name == "Bite");
    }
}

#[test]
fn driving_an_ended_battle_is_fatal() {
    let (mut manager, mut player, mut goblin) = battle();
    manager.end_battle().unwrap();
    assert_eq!(manager.phase(), BattlePhase::Ended);

    let err = manager
        .process_damage_over_time(&mut player, &mut goblin)
        .unwrap_err();
    assert!(matches!(err, TurnError::NotActive { .. }));
    assert_eq!(err.severity(), ErrorSeverity::Fatal);
    assert!(manager.get_and_clear_pending_notifications().is_err());
    assert!(manager.next_actor(&[&player, &goblin]).is_err());
}
