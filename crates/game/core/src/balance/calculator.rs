//! Two-axis point allocation.
//!
//! ```text
//! total = base + (level - 1) × per_level
//!   ├── DPS      = round(total × dps%)       ── damage = round(DPS × attack%)  → Strength
//!   │                                        └─ speed  = DPS − damage          → AttackSpeed
//!   └── SUSTAIN  = total − DPS               ── health = round(SUS × health%)  → Health
//!                                            └─ armor  = SUSTAIN − health      → Armor
//! ```
//!
//! Every split takes the remainder for its second half, so no point is lost
//! to rounding. Archetype multipliers are applied last and the floors are
//! enforced again afterwards.

use tracing::debug;

use super::rounding::{div_round_half_even, scale_percent};
use super::{Archetype, BalanceError, DpsBand};
use crate::config::BalanceConfig;
use crate::stats::AttributeSet;

pub const MIN_STRENGTH: i32 = 1;
pub const MIN_HEALTH: i32 = 10;
pub const MIN_ARMOR: i32 = 0;
pub const MIN_ATTACK_SPEED: f64 = 0.5;
/// [`MIN_ATTACK_SPEED`] in hundredths.
pub const MIN_ATTACK_SPEED_HUNDREDTHS: i64 = 50;

/// Where every allocatable point went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointAllocation {
    pub total: u32,
    pub dps: u32,
    pub sustain: u32,
    pub damage: u32,
    pub speed: u32,
    pub health: u32,
    pub armor: u32,
}

/// Final enemy profile; becomes the enemy's initial attribute state.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculatedEnemyStats {
    pub strength: i32,
    pub agility: i32,
    pub technique: i32,
    pub intelligence: i32,
    pub health: i32,
    pub armor: i32,
    pub attack_speed: f64,
}

impl CalculatedEnemyStats {
    pub fn attributes(&self) -> AttributeSet {
        AttributeSet::new(self.strength, self.agility, self.technique, self.intelligence)
    }
}

/// Splits a level's points across the four pools.
pub fn allocate_points(
    level: u32,
    archetype: Archetype,
    config: &BalanceConfig,
) -> Result<PointAllocation, BalanceError> {
    if level < 1 {
        return Err(BalanceError::InvalidLevel { level });
    }
    config.validate()?;

    let total = (level - 1)
        .checked_mul(config.points_per_level)
        .and_then(|growth| growth.checked_add(config.base_points_at_level1))
        .ok_or(BalanceError::LevelTooHigh { level })?;

    let dps_percent = match archetype.dps_band() {
        DpsBand::Max => config.max_dps_percent,
        DpsBand::Min => config.min_dps_percent,
        DpsBand::Balanced => config.balanced_dps_percent,
    };
    let dps = split(total, dps_percent);
    let sustain = total - dps;

    let damage = split(dps, config.attack_weight_percent);
    let speed = dps - damage;

    let health = split(sustain, config.health_weight_percent);
    let armor = sustain - health;

    Ok(PointAllocation {
        total,
        dps,
        sustain,
        damage,
        speed,
        health,
        armor,
    })
}

/// Derives an enemy's full stat profile from its level and archetype.
///
/// Agility, Technique and Intelligence come from `base`; Strength, Health,
/// Armor and AttackSpeed come from the point allocation.
pub fn calculate_stats(
    level: u32,
    archetype: Archetype,
    base: &AttributeSet,
    config: &BalanceConfig,
) -> Result<CalculatedEnemyStats, BalanceError> {
    let points = allocate_points(level, archetype, config)?;

    let strength = scale_percent(i64::from(points.damage), config.strength_per_point_percent)
        .max(i64::from(MIN_STRENGTH));
    let speed_hundredths = (i64::from(config.base_attack_speed_hundredths)
        + i64::from(points.speed) * i64::from(config.attack_speed_per_point_hundredths))
    .max(MIN_ATTACK_SPEED_HUNDREDTHS);
    let health = (i64::from(points.health) * i64::from(config.health_per_point))
        .max(i64::from(MIN_HEALTH));
    let armor =
        (i64::from(points.armor) * i64::from(config.armor_per_point)).max(i64::from(MIN_ARMOR));

    let modifiers = config.archetypes.get(archetype);
    let strength = scale_percent(strength, modifiers.strength).max(i64::from(MIN_STRENGTH));
    let health = scale_percent(health, modifiers.health).max(i64::from(MIN_HEALTH));
    let armor = scale_percent(armor, modifiers.armor).max(i64::from(MIN_ARMOR));
    let speed_hundredths =
        scale_percent(speed_hundredths, modifiers.attack_speed).max(MIN_ATTACK_SPEED_HUNDREDTHS);
    let agility = scale_percent(i64::from(base.agility), modifiers.agility);

    let stats = CalculatedEnemyStats {
        strength: saturate(strength),
        agility: saturate(agility),
        technique: base.technique,
        intelligence: base.intelligence,
        health: saturate(health),
        armor: saturate(armor),
        attack_speed: speed_hundredths as f64 / 100.0,
    };
    debug!(level, %archetype, ?points, ?stats, "calculated enemy stats");
    Ok(stats)
}

fn split(points: u32, percent: u32) -> u32 {
    div_round_half_even(i64::from(points) * i64::from(percent), 100) as u32
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
