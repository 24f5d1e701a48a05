//! Turn Manager: battle lifecycle and per-turn bookkeeping.
//!
//! ```text
//!                initialize_battle              end_battle
//!  Uninitialized ─────────────────▶ Active ─────────────────▶ Ended
//!                                     ▲                         │
//!                                     └──── initialize_battle ──┘
//! ```
//!
//! Every per-turn operation is valid only while `Active`; calling one in any
//! other phase returns the fatal [`TurnError::NotActive`]. Combat resolution
//! itself is delegated to an [`ActionResolver`].

mod errors;
mod resolver;
mod turns;

pub use errors::TurnError;
pub use resolver::{ActionResolution, ActionResolver};
pub use turns::{Timeline, action_duration, duration_of};

use tracing::{debug, warn};

use crate::action::Action;
use crate::battle::{BattleHealthTracker, BattleNotification};
use crate::combatant::{Combatant, CombatantId};
use crate::config::TurnConfig;
use crate::stats::{AttributeError, StatusTick};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    #[default]
    Uninitialized,
    Active,
    Ended,
}

/// Result of [`TurnManager::execute_turn`].
#[derive(Clone, Debug, PartialEq)]
pub struct TurnOutcome {
    /// Whether the target still has health left.
    pub target_alive: bool,
    pub resolution: ActionResolution,
    /// Milestone and leadership notifications raised by this turn.
    pub notifications: Vec<BattleNotification>,
}

/// What remained of a battle when it ended.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BattleSummary {
    pub turn_count: u32,
    pub last_player_action: Option<String>,
    /// Notifications nobody drained before the battle ended.
    pub undelivered: Vec<BattleNotification>,
}

/// Transient state of the battle in progress.
#[derive(Clone, Debug)]
struct ActiveBattle {
    player: CombatantId,
    enemy: CombatantId,
    turn_count: u32,
    last_player_action: Option<String>,
    tracker: BattleHealthTracker,
    timeline: Timeline,
}

impl ActiveBattle {
    fn ensure_participant(&self, id: CombatantId) -> Result<(), TurnError> {
        if id == self.player || id == self.enemy {
            Ok(())
        } else {
            Err(TurnError::UnknownParticipant { id })
        }
    }
}

#[derive(Clone, Debug, Default)]
enum BattleState {
    #[default]
    Uninitialized,
    Active(Box<ActiveBattle>),
    Ended,
}

/// Drives one battle between the player and one enemy.
///
/// The manager never owns the combatants; callers pass them in on each
/// operation so their state persists beyond the battle.
#[derive(Clone, Debug, Default)]
pub struct TurnManager {
    config: TurnConfig,
    state: BattleState,
}

impl TurnManager {
    pub fn new(config: TurnConfig) -> Self {
        Self {
            config,
            state: BattleState::Uninitialized,
        }
    }

    pub fn config(&self) -> &TurnConfig {
        &self.config
    }

    pub fn phase(&self) -> BattlePhase {
        match self.state {
            BattleState::Uninitialized => BattlePhase::Uninitialized,
            BattleState::Active(_) => BattlePhase::Active,
            BattleState::Ended => BattlePhase::Ended,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, BattleState::Active(_))
    }

    /// Turns executed so far in the current battle (0 outside a battle).
    pub fn turn_count(&self) -> u32 {
        self.battle().map_or(0, |b| b.turn_count)
    }

    /// Name of the last action the player executed in the current battle.
    pub fn last_player_action(&self) -> Option<&str> {
        self.battle()?.last_player_action.as_deref()
    }

    pub fn tracker(&self) -> Option<&BattleHealthTracker> {
        self.battle().map(|b| &b.tracker)
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.battle().map(|b| &b.timeline)
    }

    /// Opens a battle. Valid from `Uninitialized` or `Ended`.
    ///
    /// Resets combo chains, health milestones and the timeline; the player is
    /// registered first and wins timing and leadership ties.
    pub fn initialize_battle(
        &mut self,
        player: &mut Combatant,
        enemy: &mut Combatant,
    ) -> Result<(), TurnError> {
        if self.is_active() {
            return Err(TurnError::BattleInProgress);
        }
        if !player.is_player() {
            return Err(TurnError::NotAPlayer { id: player.id });
        }
        let reference = self.config.reference_action_length;
        if !(reference.is_finite() && reference > 0.0) {
            return Err(AttributeError::InvalidReferenceLength { length: reference }.into());
        }

        player.combo.reset();
        enemy.combo.reset();

        let participants = [&*player, &*enemy];
        let mut tracker = BattleHealthTracker::new();
        tracker.initialize_battle(&participants);
        let timeline = Timeline::new(&participants, self.config.reference_action_length);

        debug!(player = %player.id, enemy = %enemy.id, "battle initialized");
        self.state = BattleState::Active(Box::new(ActiveBattle {
            player: player.id,
            enemy: enemy.id,
            turn_count: 0,
            last_player_action: None,
            tracker,
            timeline,
        }));
        Ok(())
    }

    /// Resolves one action and does the turn's bookkeeping.
    ///
    /// The resolver applies damage and effects; afterwards the turn count
    /// advances, the player's action is remembered, the actor's temporary
    /// bonus and timeline slot are advanced by the resolved duration and any
    /// damage is fed to the health tracker. A NaN, infinite or negative
    /// duration counts as zero, so nothing after the resolver can fail.
    pub fn execute_turn(
        &mut self,
        actor: &mut Combatant,
        target: &mut Combatant,
        action: &Action,
        resolver: &mut impl ActionResolver,
    ) -> Result<TurnOutcome, TurnError> {
        let reference = self.config.reference_action_length;
        let battle = self.active_mut("execute_turn")?;
        battle.ensure_participant(actor.id)?;
        battle.ensure_participant(target.id)?;
        if !actor.is_alive() {
            return Err(TurnError::ActorDefeated { id: actor.id });
        }

        let mut resolution = resolver.resolve(actor, target, action);
        if !(resolution.duration.is_finite() && resolution.duration >= 0.0) {
            warn!(
                action = %action.name,
                duration = resolution.duration,
                "resolver returned an unusable duration, counting it as zero"
            );
            resolution.duration = 0.0;
        }

        battle.turn_count += 1;
        if actor.is_player() {
            battle.last_player_action = Some(action.name.clone());
        }
        actor
            .attributes
            .update_temp_effects(resolution.duration, reference)?;
        battle.timeline.advance(actor.id, resolution.duration);

        battle.tracker.observe(actor);
        let notifications = if resolution.damage_dealt > 0 {
            battle
                .tracker
                .check_health_milestones(target, resolution.damage_dealt)
        } else {
            battle.tracker.observe(target);
            Vec::new()
        };

        debug!(
            turn = battle.turn_count,
            actor = %actor.id,
            target = %target.id,
            action = %action.name,
            damage = resolution.damage_dealt,
            duration = resolution.duration,
            "turn executed"
        );
        Ok(TurnOutcome {
            target_alive: target.is_alive(),
            resolution,
            notifications,
        })
    }

    /// Spends the actor's turn without acting (stunned, or nothing to do).
    ///
    /// Counts as a turn of one reference action at the actor's speed.
    /// Returns the elapsed duration.
    pub fn pass_turn(&mut self, actor: &mut Combatant) -> Result<f64, TurnError> {
        let reference = self.config.reference_action_length;
        let battle = self.active_mut("pass_turn")?;
        battle.ensure_participant(actor.id)?;

        let duration = action_duration(1.0, actor.attack_speed, reference);
        battle.turn_count += 1;
        actor.attributes.update_temp_effects(duration, reference)?;
        battle.timeline.advance(actor.id, duration);
        debug!(turn = battle.turn_count, actor = %actor.id, "turn passed");
        Ok(duration)
    }

    /// The living participant due to act next.
    pub fn next_actor(
        &self,
        participants: &[&Combatant],
    ) -> Result<Option<CombatantId>, TurnError> {
        let battle = self.active("next_actor")?;
        Ok(battle.timeline.next_actor(participants))
    }

    /// Applies pending periodic damage to both sides.
    ///
    /// Dead combatants are skipped, and so is the enemy side when the enemy
    /// is not a living creature.
    pub fn process_damage_over_time(
        &mut self,
        player: &mut Combatant,
        enemy: &mut Combatant,
    ) -> Result<Vec<BattleNotification>, TurnError> {
        let battle = self.active_mut("process_damage_over_time")?;
        battle.ensure_participant(player.id)?;
        battle.ensure_participant(enemy.id)?;

        let mut notifications = Vec::new();
        for (combatant, applies) in [(player, true), (enemy, false)] {
            let applies = applies || combatant.is_living();
            if !applies || !combatant.is_alive() {
                continue;
            }
            if let Some(damage) = combatant.status.take_damage_over_time() {
                let dealt = combatant.take_damage(damage);
                debug!(id = %combatant.id, dealt, "damage over time");
                if dealt > 0 {
                    notifications.extend(battle.tracker.check_health_milestones(combatant, dealt));
                }
            }
        }
        Ok(notifications)
    }

    /// Heals the player by the configured per-turn amount, capped at the gap
    /// to effective maximum health. Returns the health restored.
    pub fn process_regeneration(&mut self, player: &mut Combatant) -> Result<i32, TurnError> {
        let regen = self.config.regen_per_turn;
        let battle = self.active_mut("process_regeneration")?;
        battle.ensure_participant(player.id)?;

        if !player.is_alive() || regen <= 0 {
            return Ok(0);
        }
        let healed = player.heal(regen);
        battle.tracker.observe(player);
        Ok(healed)
    }

    /// Counts the combatant's weaken, stun and roll penalty down by one turn.
    pub fn tick_status_effects(
        &mut self,
        combatant: &mut Combatant,
    ) -> Result<StatusTick, TurnError> {
        let battle = self.active_mut("tick_status_effects")?;
        battle.ensure_participant(combatant.id)?;
        Ok(combatant.status.tick())
    }

    /// Reports a damage event to the health tracker.
    pub fn check_health_milestones(
        &mut self,
        entity: &Combatant,
        damage: i32,
    ) -> Result<Vec<BattleNotification>, TurnError> {
        let battle = self.active_mut("check_health_milestones")?;
        Ok(battle.tracker.check_health_milestones(entity, damage))
    }

    pub fn get_and_clear_pending_notifications(
        &mut self,
    ) -> Result<Vec<BattleNotification>, TurnError> {
        let battle = self.active_mut("get_and_clear_pending_notifications")?;
        Ok(battle.tracker.get_and_clear_pending_notifications())
    }

    /// Closes the battle and drops all transient battle state.
    pub fn end_battle(&mut self) -> Result<BattleSummary, TurnError> {
        let phase = self.phase();
        match std::mem::replace(&mut self.state, BattleState::Ended) {
            BattleState::Active(mut battle) => {
                debug!(turns = battle.turn_count, "battle ended");
                Ok(BattleSummary {
                    turn_count: battle.turn_count,
                    last_player_action: battle.last_player_action.take(),
                    undelivered: battle.tracker.get_and_clear_pending_notifications(),
                })
            }
            previous => {
                self.state = previous;
                Err(TurnError::not_active("end_battle", phase))
            }
        }
    }

    fn battle(&self) -> Option<&ActiveBattle> {
        match &self.state {
            BattleState::Active(battle) => Some(&**battle),
            _ => None,
        }
    }

    fn active(&self, operation: &'static str) -> Result<&ActiveBattle, TurnError> {
        self.battle()
            .ok_or_else(|| TurnError::not_active(operation, self.phase()))
    }

    fn active_mut(&mut self, operation: &'static str) -> Result<&mut ActiveBattle, TurnError> {
        let phase = self.phase();
        match &mut self.state {
            BattleState::Active(battle) => Ok(&mut **battle),
            _ => Err(TurnError::not_active(operation, phase)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::Archetype;
    use crate::battle::HealthThreshold;
    use crate::combatant::{CombatantKind, EnemyProfile};
    use crate::config::AttributeConfig;
    use crate::error::{CombatError, ErrorSeverity};
    use crate::stats::{Attribute, AttributeSet, Attributes};

    /// Deals the action's damage multiplier as flat damage.
    struct FlatResolver;

    impl ActionResolver for FlatResolver {
        fn resolve(
            &mut self,
            actor: &mut Combatant,
            target: &mut Combatant,
            action: &Action,
        ) -> ActionResolution {
            ActionResolution {
                damage_dealt: target.take_damage(action.damage_multiplier as i32),
                duration: duration_of(action, actor, 1.0),
                ..ActionResolution::default()
            }
        }
    }

    fn hero() -> Combatant {
        Combatant::player("Hero", 1, &AttributeConfig::default()).unwrap()
    }

    fn goblin(living: bool) -> Combatant {
        Combatant::new(
            CombatantId(1),
            "Goblin",
            CombatantKind::Enemy(EnemyProfile {
                archetype: Archetype::Warrior,
                living,
            }),
            40,
            Attributes::from_base(AttributeSet::splat(4), 1).unwrap(),
        )
    }

    fn started(config: TurnConfig) -> (TurnManager, Combatant, Combatant) {
        let mut manager = TurnManager::new(config);
        let mut player = hero();
        let mut enemy = goblin(true);
        manager.initialize_battle(&mut player, &mut enemy).unwrap();
        (manager, player, enemy)
    }

    #[test]
    fn operations_outside_a_battle_are_fatal() {
        let mut manager = TurnManager::default();
        let mut player = hero();
        let mut enemy = goblin(true);

        let err = manager
            .execute_turn(&mut player, &mut enemy, &Action::attack("Slash"), &mut FlatResolver)
            .unwrap_err();
        assert_eq!(
            err,
            TurnError::NotActive {
                operation: "execute_turn",
                phase: BattlePhase::Uninitialized
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert!(manager.process_regeneration(&mut player).is_err());
        assert!(manager.end_battle().is_err());
        assert_eq!(manager.phase(), BattlePhase::Uninitialized);
    }

    struct BrokenClockResolver(f64);

    impl ActionResolver for BrokenClockResolver {
        fn resolve(
            &mut self,
            _actor: &mut Combatant,
            target: &mut Combatant,
            _action: &Action,
        ) -> ActionResolution {
            ActionResolution {
                damage_dealt: target.take_damage(30),
                duration: self.0,
                ..ActionResolution::default()
            }
        }
    }

    #[test]
    fn unusable_duration_still_records_damage() {
        for duration in [f64::NAN, -1.0, f64::INFINITY] {
            let (mut manager, mut player, mut enemy) = started(TurnConfig::default());
            let outcome = manager
                .execute_turn(
                    &mut player,
                    &mut enemy,
                    &Action::attack("Slash"),
                    &mut BrokenClockResolver(duration),
                )
                .unwrap();

            assert_eq!(enemy.health(), 10);
            assert_eq!(outcome.resolution.duration, 0.0);
            assert_eq!(manager.turn_count(), 1);
            assert_eq!(outcome.notifications.len(), 1);
            let milestones = manager.tracker().unwrap().milestones(enemy.id).unwrap();
            assert!(milestones.has_reached(HealthThreshold::Half));
            assert_eq!(manager.get_and_clear_pending_notifications().unwrap().len(), 1);
        }
    }

    #[test]
    fn bad_reference_length_is_rejected_at_battle_start() {
        let config = TurnConfig {
            reference_action_length: 0.0,
            ..TurnConfig::default()
        };
        let mut manager = TurnManager::new(config);
        let err = manager
            .initialize_battle(&mut hero(), &mut goblin(true))
            .unwrap_err();
        assert!(matches!(
            err,
            TurnError::Attribute(AttributeError::InvalidReferenceLength { .. })
        ));
        assert_eq!(manager.phase(), BattlePhase::Uninitialized);
    }

    #[test]
    fn lifecycle_can_restart_after_end() {
        let (mut manager, mut player, mut enemy) = started(TurnConfig::default());
        assert!(matches!(
            manager.initialize_battle(&mut player, &mut enemy),
            Err(TurnError::BattleInProgress)
        ));

        manager.end_battle().unwrap();
        assert_eq!(manager.phase(), BattlePhase::Ended);
        let err = manager.tick_status_effects(&mut player).unwrap_err();
        assert!(matches!(
            err,
            TurnError::NotActive {
                phase: BattlePhase::Ended,
                ..
            }
        ));

        manager.initialize_battle(&mut player, &mut enemy).unwrap();
        assert_eq!(manager.phase(), BattlePhase::Active);
        assert_eq!(manager.turn_count(), 0);
    }

    #[test]
    fn enemy_cannot_take_the_player_slot() {
        let mut manager = TurnManager::default();
        let mut a = goblin(true);
        let mut b = goblin(true);
        assert!(matches!(
            manager.initialize_battle(&mut a, &mut b),
            Err(TurnError::NotAPlayer { .. })
        ));
    }

    #[test]
    fn only_player_actions_are_remembered() {
        let (mut manager, mut player, mut enemy) = started(TurnConfig::default());
        let slash = Action::attack("Slash").with_damage_multiplier(5.0);
        let bite = Action::attack("Bite").with_damage_multiplier(3.0);

        let outcome = manager
            .execute_turn(&mut player, &mut enemy, &slash, &mut FlatResolver)
            .unwrap();
        assert!(outcome.target_alive);
        assert_eq!(manager.last_player_action(), Some("Slash"));

        manager
            .execute_turn(&mut enemy, &mut player, &bite, &mut FlatResolver)
            .unwrap();
        assert_eq!(manager.last_player_action(), Some("Slash"));
        assert_eq!(manager.turn_count(), 2);

        let summary = manager.end_battle().unwrap();
        assert_eq!(summary.turn_count, 2);
        assert_eq!(summary.last_player_action.as_deref(), Some("Slash"));
        assert_eq!(manager.last_player_action(), None);
    }

    #[test]
    fn lethal_turn_reports_target_down() {
        let (mut manager, mut player, mut enemy) = started(TurnConfig::default());
        let smite = Action::attack("Smite").with_damage_multiplier(100.0);
        let outcome = manager
            .execute_turn(&mut player, &mut enemy, &smite, &mut FlatResolver)
            .unwrap();
        assert!(!outcome.target_alive);
        assert_eq!(outcome.resolution.damage_dealt, 40);

        let err = manager
            .execute_turn(&mut enemy, &mut player, &smite, &mut FlatResolver)
            .unwrap_err();
        assert_eq!(err, TurnError::ActorDefeated { id: CombatantId(1) });
    }

    #[test]
    fn turn_duration_counts_down_temporary_bonus() {
        let (mut manager, mut player, mut enemy) = started(TurnConfig::default());
        player.attributes.apply_stat_bonus(5, Attribute::Strength, 2);
        let heavy = Action::attack("Heavy").with_length(1.5);

        manager
            .execute_turn(&mut player, &mut enemy, &heavy, &mut FlatResolver)
            .unwrap();
        // ceil(1.5) = 2 turns consumed
        assert_eq!(player.attributes.temp_bonus(Attribute::Strength), 0);
        assert_eq!(manager.timeline().and_then(|t| t.ready_at(player.id)), Some(2.5));
    }

    #[test]
    fn damage_over_time_skips_non_living_enemies() {
        let mut manager = TurnManager::default();
        let mut player = hero();
        let mut golem = goblin(false);
        manager.initialize_battle(&mut player, &mut golem).unwrap();

        player.status.poison(3, 2);
        golem.status.poison(3, 2);
        manager
            .process_damage_over_time(&mut player, &mut golem)
            .unwrap();

        assert_eq!(player.health(), 47);
        assert_eq!(golem.health(), 40);
        assert!(golem.status.damage_over_time().is_some());
    }

    #[test]
    fn damage_over_time_hits_living_enemies() {
        let (mut manager, mut player, mut enemy) = started(TurnConfig::default());
        enemy.status.poison(25, 1);
        let notes = manager
            .process_damage_over_time(&mut player, &mut enemy)
            .unwrap();
        assert_eq!(enemy.health(), 15);
        // 15 / 40 is under 50%
        assert_eq!(notes.iter().filter(|n| n.is_milestone()).count(), 1);
    }

    #[test]
    fn regeneration_is_capped_and_skips_the_dead() {
        let config = TurnConfig {
            regen_per_turn: 4,
            ..TurnConfig::default()
        };
        let (mut manager, mut player, _enemy) = started(config);

        player.take_damage(2);
        assert_eq!(manager.process_regeneration(&mut player).unwrap(), 2);
        assert_eq!(player.health(), player.effective_max_health());

        player.take_damage(1_000);
        assert_eq!(manager.process_regeneration(&mut player).unwrap(), 0);
        assert_eq!(player.health(), 0);
    }

    #[test]
    fn pass_turn_moves_the_timeline() {
        let (mut manager, mut player, enemy) = started(TurnConfig::default());
        player.status.stun(1);
        assert_eq!(
            manager.next_actor(&[&player, &enemy]).unwrap(),
            Some(CombatantId::PLAYER)
        );
        manager.pass_turn(&mut player).unwrap();
        manager.tick_status_effects(&mut player).unwrap();

        assert!(!player.status.is_stunned());
        assert_eq!(manager.turn_count(), 1);
        assert_eq!(
            manager.next_actor(&[&player, &enemy]).unwrap(),
            Some(CombatantId(1))
        );
    }

    #[test]
    fn strangers_are_rejected() {
        let (mut manager, mut player, _enemy) = started(TurnConfig::default());
        let mut stranger = goblin(true);
        stranger.id = CombatantId(7);
        let err = manager
            .execute_turn(&mut player, &mut stranger, &Action::attack("Slash"), &mut FlatResolver)
            .unwrap_err();
        assert_eq!(err, TurnError::UnknownParticipant { id: CombatantId(7) });
    }
}
