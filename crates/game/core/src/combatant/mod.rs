//! Uniform combatant abstraction over players and enemies.
//!
//! The Turn Manager and Battle Health Tracker only ever see [`Combatant`];
//! the player/enemy distinction lives in [`CombatantKind`].

mod pool;
mod spawn;

pub use pool::{ActionPool, ActionPoolError, PoolEntry};
pub use spawn::{SpawnError, spawn_enemy};

use tracing::debug;

use crate::action::Action;
use crate::balance::Archetype;
use crate::config::AttributeConfig;
use crate::dice::ComboChain;
use crate::env::RngOracle;
use crate::stats::attributes::scaled_by_level;
use crate::stats::{AttributeError, Attributes, StatusEffects, WeaponClass};

/// Unique identifier of a combatant within a battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// Reserved identifier for the player character.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Player-only data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    /// Class of the equipped weapon; drives level-up growth.
    pub weapon: Option<WeaponClass>,
    /// Extra maximum health from equipment.
    pub max_health_bonus: i32,
}

/// Enemy-only data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyProfile {
    pub archetype: Archetype,
    /// `false` for constructs and undead; they ignore damage over time.
    pub living: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantKind {
    Player(PlayerProfile),
    Enemy(EnemyProfile),
}

/// A participant in a battle.
///
/// Current health is kept within `[0, effective_max_health]`; a combatant
/// at 0 is dead and drops out of turn order and leadership.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub kind: CombatantKind,
    health: i32,
    max_health: i32,
    pub armor: i32,
    /// Actions per reference length; 1.0 is standard.
    pub attack_speed: f64,
    pub attributes: Attributes,
    pub actions: ActionPool,
    pub status: StatusEffects,
    pub combo: ComboChain,
}

impl Combatant {
    /// Builds a combatant at full health.
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        kind: CombatantKind,
        max_health: i32,
        attributes: Attributes,
    ) -> Self {
        let max_health = max_health.max(1);
        Self {
            id,
            name: name.into(),
            kind,
            health: max_health,
            max_health,
            armor: 0,
            attack_speed: 1.0,
            attributes,
            actions: ActionPool::new(),
            status: StatusEffects::new(),
            combo: ComboChain::new(),
        }
    }

    /// A player seeded from the attribute config at `level`.
    pub fn player(
        name: impl Into<String>,
        level: u32,
        config: &AttributeConfig,
    ) -> Result<Self, AttributeError> {
        let attributes = Attributes::seeded(config, level)?;
        let max_health = scaled_by_level(
            config.player_base_health,
            config.player_health_per_level,
            level,
        )?;
        Ok(Self::new(
            CombatantId::PLAYER,
            name,
            CombatantKind::Player(PlayerProfile::default()),
            max_health,
            attributes,
        ))
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor.max(0);
        self
    }

    pub fn with_attack_speed(mut self, attack_speed: f64) -> Self {
        self.attack_speed = attack_speed;
        self
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, CombatantKind::Player(_))
    }

    pub fn player_profile(&self) -> Option<&PlayerProfile> {
        match &self.kind {
            CombatantKind::Player(profile) => Some(profile),
            CombatantKind::Enemy(_) => None,
        }
    }

    pub fn player_profile_mut(&mut self) -> Option<&mut PlayerProfile> {
        match &mut self.kind {
            CombatantKind::Player(profile) => Some(profile),
            CombatantKind::Enemy(_) => None,
        }
    }

    pub fn enemy_profile(&self) -> Option<&EnemyProfile> {
        match &self.kind {
            CombatantKind::Enemy(profile) => Some(profile),
            CombatantKind::Player(_) => None,
        }
    }

    /// Players are always living; enemies carry a flag.
    pub fn is_living(&self) -> bool {
        match &self.kind {
            CombatantKind::Player(_) => true,
            CombatantKind::Enemy(profile) => profile.living,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Maximum health including equipment bonuses.
    pub fn effective_max_health(&self) -> i32 {
        let bonus = self.player_profile().map_or(0, |p| p.max_health_bonus);
        self.max_health.saturating_add(bonus).max(1)
    }

    /// Missing health up to the effective maximum.
    pub fn health_gap(&self) -> i32 {
        (self.effective_max_health() - self.health).max(0)
    }

    /// Current health as a percentage of effective maximum health.
    pub fn health_percent(&self) -> f64 {
        f64::from(self.health) * 100.0 / f64::from(self.effective_max_health())
    }

    /// Removes up to `amount` health. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let taken = amount.clamp(0, self.health);
        self.health -= taken;
        taken
    }

    /// Restores up to `amount` health, never past the effective maximum.
    /// Dead combatants cannot be healed. Returns the health actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.is_alive() {
            return 0;
        }
        let healed = amount.clamp(0, self.health_gap());
        self.health += healed;
        healed
    }

    /// Restores full health and drops status effects and combos.
    pub fn reset_for_battle(&mut self) {
        self.health = self.effective_max_health();
        self.status.clear();
        self.combo.reset();
    }

    /// Picks this turn's action. `None` when stunned or out of actions.
    pub fn select_action(&self, rng: &mut impl RngOracle) -> Option<&Action> {
        if self.status.is_stunned() {
            return None;
        }
        self.actions.select(rng)
    }

    pub fn add_action(&mut self, action: Action, probability: f64) -> Result<(), ActionPoolError> {
        self.actions.add_action(action, probability)
    }

    /// Flat subtraction on future rolls made by or against this combatant.
    pub fn apply_roll_penalty(&mut self, amount: i32, turns: u32) {
        self.status.apply_roll_penalty(amount, turns);
    }

    /// Levels up using the equipped weapon class (enemies grow unarmed).
    ///
    /// Players also gain `player_health_per_level` maximum and current health.
    pub fn level_up(&mut self, config: &AttributeConfig) {
        let weapon = self.player_profile().and_then(|p| p.weapon);
        self.attributes.level_up(weapon, config);
        if self.is_player() {
            self.max_health = self.max_health.saturating_add(config.player_health_per_level);
            self.health = self
                .health
                .saturating_add(config.player_health_per_level)
                .min(self.effective_max_health());
        }
        debug!(id = %self.id, level = self.attributes.level(), "combatant levelled up");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;

    fn player() -> Combatant {
        Combatant::player("Hero", 1, &AttributeConfig::default()).unwrap()
    }

    #[test]
    fn player_is_seeded_from_config() {
        let hero = Combatant::player("Hero", 3, &AttributeConfig::default()).unwrap();
        assert!(hero.is_player());
        assert_eq!(hero.id, CombatantId::PLAYER);
        assert_eq!(hero.max_health(), 60);
        assert_eq!(hero.health(), 60);
        assert_eq!(hero.attributes.level(), 3);
    }

    #[test]
    fn player_health_out_of_range_is_rejected() {
        // attributes still fit at this level; 50 + (level - 1) × 5 does not
        let err = Combatant::player("Hero", 500_000_000, &AttributeConfig::default()).unwrap_err();
        assert_eq!(err, AttributeError::LevelTooHigh { level: 500_000_000 });
    }

    #[test]
    fn damage_and_healing_stay_within_bounds() {
        let mut hero = player();
        assert_eq!(hero.take_damage(20), 20);
        assert_eq!(hero.heal(100), 20);
        assert_eq!(hero.health(), 50);
        assert_eq!(hero.take_damage(500), 50);
        assert!(!hero.is_alive());
        assert_eq!(hero.heal(10), 0);
    }

    #[test]
    fn equipment_raises_effective_max_health() {
        let mut hero = player();
        if let Some(profile) = hero.player_profile_mut() {
            profile.max_health_bonus = 10;
        }
        assert_eq!(hero.effective_max_health(), 60);
        assert_eq!(hero.heal(15), 10);
    }

    #[test]
    fn stunned_combatant_selects_nothing() {
        let mut hero = player();
        hero.add_action(Action::attack("Slash"), 1.0).unwrap();
        let mut rng = ScriptedRng::fractions([0.1]);
        assert!(hero.select_action(&mut rng).is_some());

        hero.status.stun(1);
        assert!(hero.select_action(&mut rng).is_none());
    }

    #[test]
    fn level_up_grows_weapon_attribute_and_health() {
        let config = AttributeConfig::default();
        let mut hero = player();
        if let Some(profile) = hero.player_profile_mut() {
            profile.weapon = Some(WeaponClass::Dagger);
        }
        hero.take_damage(10);
        hero.level_up(&config);

        assert_eq!(hero.attributes.base().agility, 7);
        assert_eq!(hero.attributes.base().strength, 5);
        assert_eq!(hero.max_health(), 55);
        assert_eq!(hero.health(), 45);
    }

    #[test]
    fn roll_penalty_is_recorded_on_status() {
        let mut hero = player();
        hero.apply_roll_penalty(3, 2);
        assert_eq!(hero.status.roll_penalty(), 3);
    }
}
