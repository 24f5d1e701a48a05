//! Combat configuration constants and tunable parameters.
//!
//! Every numeric tunable used by the rules lives here and is injected into the
//! core; nothing below is read from a global. Percentages are stored as integer
//! percent (e.g., `130` = ×1.3) and attack speed as hundredths so the balance
//! math stays exact.

use crate::balance::Archetype;

/// Top-level configuration bundle handed to the core at setup.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CombatConfig {
    pub attributes: AttributeConfig,
    pub balance: BalanceConfig,
    pub turns: TurnConfig,
}

impl CombatConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Attribute seeding and growth rates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AttributeConfig {
    /// Value of every base attribute at level 1.
    pub starting_value: i32,
    /// Growth per level applied to every attribute when seeding at a level.
    pub per_level_growth: i32,
    /// Level-up growth of the attribute matching the equipped weapon class.
    pub weapon_primary_growth: i32,
    /// Level-up growth of the three other attributes when a weapon is equipped.
    pub weapon_secondary_growth: i32,
    /// Level-up growth of every attribute when no weapon is equipped.
    pub unarmed_growth: i32,
    /// Player maximum health at level 1.
    pub player_base_health: i32,
    /// Player maximum health gained per level.
    pub player_health_per_level: i32,
}

impl AttributeConfig {
    pub const DEFAULT_STARTING_VALUE: i32 = 4;
    pub const DEFAULT_PER_LEVEL_GROWTH: i32 = 2;
    pub const DEFAULT_WEAPON_PRIMARY_GROWTH: i32 = 3;
    pub const DEFAULT_WEAPON_SECONDARY_GROWTH: i32 = 1;
    pub const DEFAULT_UNARMED_GROWTH: i32 = 2;
    pub const DEFAULT_PLAYER_BASE_HEALTH: i32 = 50;
    pub const DEFAULT_PLAYER_HEALTH_PER_LEVEL: i32 = 5;
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            starting_value: Self::DEFAULT_STARTING_VALUE,
            per_level_growth: Self::DEFAULT_PER_LEVEL_GROWTH,
            weapon_primary_growth: Self::DEFAULT_WEAPON_PRIMARY_GROWTH,
            weapon_secondary_growth: Self::DEFAULT_WEAPON_SECONDARY_GROWTH,
            unarmed_growth: Self::DEFAULT_UNARMED_GROWTH,
            player_base_health: Self::DEFAULT_PLAYER_BASE_HEALTH,
            player_health_per_level: Self::DEFAULT_PLAYER_HEALTH_PER_LEVEL,
        }
    }
}

/// Per-turn timing and regeneration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TurnConfig {
    /// Health restored to the player by `process_regeneration`.
    pub regen_per_turn: i32,
    /// Action duration that counts as one turn for temporary effects.
    pub reference_action_length: f64,
}

impl TurnConfig {
    pub const DEFAULT_REGEN_PER_TURN: i32 = 0;
    pub const DEFAULT_REFERENCE_ACTION_LENGTH: f64 = 1.0;
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            regen_per_turn: Self::DEFAULT_REGEN_PER_TURN,
            reference_action_length: Self::DEFAULT_REFERENCE_ACTION_LENGTH,
        }
    }
}

/// Two-axis (DPS / SUSTAIN) point allocation model for enemies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BalanceConfig {
    pub base_points_at_level1: u32,
    pub points_per_level: u32,

    /// DPS share for offensive archetypes (Berserker, Assassin).
    pub max_dps_percent: u32,
    /// DPS share for defensive archetypes (Juggernaut, Guardian).
    pub min_dps_percent: u32,
    /// DPS share for Warrior, Brute and anything without a dedicated split.
    pub balanced_dps_percent: u32,

    /// Share of DPS points spent on damage; the rest goes to attack speed.
    pub attack_weight_percent: u32,
    /// Share of SUSTAIN points spent on health; the rest goes to armor.
    pub health_weight_percent: u32,

    /// Strength per damage point, in percent (150 = 1.5 Strength per point).
    pub strength_per_point_percent: u32,
    /// Attack speed before any speed points, in hundredths.
    pub base_attack_speed_hundredths: u32,
    /// Attack speed per speed point, in hundredths.
    pub attack_speed_per_point_hundredths: u32,
    pub health_per_point: u32,
    pub armor_per_point: u32,

    pub archetypes: ArchetypeModifierTable,
}

impl BalanceConfig {
    pub const DEFAULT_BASE_POINTS_AT_LEVEL1: u32 = 10;
    pub const DEFAULT_POINTS_PER_LEVEL: u32 = 3;
    pub const DEFAULT_MAX_DPS_PERCENT: u32 = 70;
    pub const DEFAULT_MIN_DPS_PERCENT: u32 = 30;
    pub const DEFAULT_BALANCED_DPS_PERCENT: u32 = 50;
    pub const DEFAULT_ATTACK_WEIGHT_PERCENT: u32 = 70;
    pub const DEFAULT_HEALTH_WEIGHT_PERCENT: u32 = 80;
    pub const DEFAULT_STRENGTH_PER_POINT_PERCENT: u32 = 150;
    pub const DEFAULT_BASE_ATTACK_SPEED_HUNDREDTHS: u32 = 100;
    pub const DEFAULT_ATTACK_SPEED_PER_POINT_HUNDREDTHS: u32 = 10;
    pub const DEFAULT_HEALTH_PER_POINT: u32 = 6;
    pub const DEFAULT_ARMOR_PER_POINT: u32 = 1;

    /// Checks that every split percentage is a real share of its pool.
    pub fn validate(&self) -> Result<(), crate::balance::BalanceError> {
        let shares = [
            ("max_dps_percent", self.max_dps_percent),
            ("min_dps_percent", self.min_dps_percent),
            ("balanced_dps_percent", self.balanced_dps_percent),
            ("attack_weight_percent", self.attack_weight_percent),
            ("health_weight_percent", self.health_weight_percent),
        ];
        for (field, value) in shares {
            if value > 100 {
                return Err(crate::balance::BalanceError::InvalidShare { field, value });
            }
        }
        Ok(())
    }
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            base_points_at_level1: Self::DEFAULT_BASE_POINTS_AT_LEVEL1,
            points_per_level: Self::DEFAULT_POINTS_PER_LEVEL,
            max_dps_percent: Self::DEFAULT_MAX_DPS_PERCENT,
            min_dps_percent: Self::DEFAULT_MIN_DPS_PERCENT,
            balanced_dps_percent: Self::DEFAULT_BALANCED_DPS_PERCENT,
            attack_weight_percent: Self::DEFAULT_ATTACK_WEIGHT_PERCENT,
            health_weight_percent: Self::DEFAULT_HEALTH_WEIGHT_PERCENT,
            strength_per_point_percent: Self::DEFAULT_STRENGTH_PER_POINT_PERCENT,
            base_attack_speed_hundredths: Self::DEFAULT_BASE_ATTACK_SPEED_HUNDREDTHS,
            attack_speed_per_point_hundredths: Self::DEFAULT_ATTACK_SPEED_PER_POINT_HUNDREDTHS,
            health_per_point: Self::DEFAULT_HEALTH_PER_POINT,
            armor_per_point: Self::DEFAULT_ARMOR_PER_POINT,
            archetypes: ArchetypeModifierTable::default(),
        }
    }
}

/// Multiplicative post-allocation modifiers for one archetype, in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ArchetypeModifiers {
    pub strength: u32,
    pub health: u32,
    pub armor: u32,
    pub attack_speed: u32,
    pub agility: u32,
}

impl ArchetypeModifiers {
    /// No change to any stat.
    pub const NEUTRAL: Self = Self {
        strength: 100,
        health: 100,
        armor: 100,
        attack_speed: 100,
        agility: 100,
    };
}

impl Default for ArchetypeModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// One modifier row per archetype. A struct (not a map) so every archetype
/// always has an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ArchetypeModifierTable {
    pub berserker: ArchetypeModifiers,
    pub assassin: ArchetypeModifiers,
    pub warrior: ArchetypeModifiers,
    pub brute: ArchetypeModifiers,
    pub juggernaut: ArchetypeModifiers,
    pub guardian: ArchetypeModifiers,
}

impl ArchetypeModifierTable {
    pub fn get(&self, archetype: Archetype) -> &ArchetypeModifiers {
        match archetype {
            Archetype::Berserker => &self.berserker,
            Archetype::Assassin => &self.assassin,
            Archetype::Warrior => &self.warrior,
            Archetype::Brute => &self.brute,
            Archetype::Juggernaut => &self.juggernaut,
            Archetype::Guardian => &self.guardian,
        }
    }
}

impl Default for ArchetypeModifierTable {
    fn default() -> Self {
        let neutral = ArchetypeModifiers::NEUTRAL;
        Self {
            berserker: ArchetypeModifiers {
                strength: 130,
                armor: 80,
                ..neutral
            },
            assassin: ArchetypeModifiers {
                agility: 130,
                attack_speed: 120,
                ..neutral
            },
            warrior: neutral,
            brute: ArchetypeModifiers {
                strength: 115,
                attack_speed: 90,
                ..neutral
            },
            juggernaut: ArchetypeModifiers {
                health: 130,
                attack_speed: 80,
                ..neutral
            },
            guardian: ArchetypeModifiers {
                health: 150,
                armor: 140,
                strength: 80,
                ..neutral
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_balance_config_is_valid() {
        assert!(BalanceConfig::default().validate().is_ok());
    }

    #[test]
    fn share_above_hundred_is_rejected() {
        let config = BalanceConfig {
            attack_weight_percent: 120,
            ..BalanceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn guardian_row_matches_documented_multipliers() {
        let table = ArchetypeModifierTable::default();
        let guardian = table.get(Archetype::Guardian);
        assert_eq!(guardian.health, 150);
        assert_eq!(guardian.armor, 140);
        assert_eq!(guardian.strength, 80);
        assert_eq!(*table.get(Archetype::Warrior), ArchetypeModifiers::NEUTRAL);
    }
}
