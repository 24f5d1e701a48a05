//! Attribute Model.
//!
//! Base attributes (STR, AGI, TEC, INT) and level are the only persistent
//! values; everything else layers on top at read time:
//!
//! `Effective = Base + Temporary + Equipment (+ Godlike, Strength only)`

use tracing::debug;

use crate::config::AttributeConfig;
use crate::error::{CombatError, ErrorSeverity};

/// The four combat attributes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    Strength,
    Agility,
    Technique,
    Intelligence,
}

/// Weapon class; each class trains one attribute faster on level-up.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponClass {
    Mace,
    Dagger,
    Sword,
    Wand,
}

impl WeaponClass {
    pub const fn primary_attribute(self) -> Attribute {
        match self {
            Self::Mace => Attribute::Strength,
            Self::Dagger => Attribute::Agility,
            Self::Sword => Attribute::Technique,
            Self::Wand => Attribute::Intelligence,
        }
    }
}

/// One value per attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeSet {
    pub strength: i32,
    pub agility: i32,
    pub technique: i32,
    pub intelligence: i32,
}

impl AttributeSet {
    pub const ZERO: Self = Self::splat(0);

    pub const fn new(strength: i32, agility: i32, technique: i32, intelligence: i32) -> Self {
        Self {
            strength,
            agility,
            technique,
            intelligence,
        }
    }

    /// Same value for all four attributes.
    pub const fn splat(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Technique => self.technique,
            Attribute::Intelligence => self.intelligence,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut i32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Technique => &mut self.technique,
            Attribute::Intelligence => &mut self.intelligence,
        }
    }

    fn add(&mut self, other: &Self) {
        self.strength = self.strength.saturating_add(other.strength);
        self.agility = self.agility.saturating_add(other.agility);
        self.technique = self.technique.saturating_add(other.technique);
        self.intelligence = self.intelligence.saturating_add(other.intelligence);
    }
}

/// Errors raised by the attribute model.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AttributeError {
    #[error("level must be at least 1 (got {level})")]
    InvalidLevel { level: u32 },

    #[error("level {level} puts a level-scaled value out of range")]
    LevelTooHigh { level: u32 },

    #[error("action duration must be a finite, non-negative number (got {duration})")]
    InvalidDuration { duration: f64 },

    #[error("reference action length must be positive (got {length})")]
    InvalidReferenceLength { length: f64 },
}

impl CombatError for AttributeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLevel { .. } => "ATTRIBUTE_INVALID_LEVEL",
            Self::LevelTooHigh { .. } => "ATTRIBUTE_LEVEL_TOO_HIGH",
            Self::InvalidDuration { .. } => "ATTRIBUTE_INVALID_DURATION",
            Self::InvalidReferenceLength { .. } => "ATTRIBUTE_INVALID_REFERENCE_LENGTH",
        }
    }
}

/// `base + (level - 1) × per_level`, rejected when it leaves `i32`.
pub(crate) fn scaled_by_level(
    base: i32,
    per_level: i32,
    level: u32,
) -> Result<i32, AttributeError> {
    let value = i64::from(base) + (i64::from(level) - 1) * i64::from(per_level);
    i32::try_from(value).map_err(|_| AttributeError::LevelTooHigh { level })
}

/// A combatant's attributes and the bonuses layered on them.
///
/// Only one temporary bonus is live at a time: applying a new one replaces
/// the old one (attribute, amount and countdown) instead of stacking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    level: u32,
    base: AttributeSet,
    temporary: AttributeSet,
    temp_turns_remaining: u32,
    equipment: AttributeSet,
    godlike_strength: i32,
}

impl Attributes {
    /// Base attributes from explicit values at a given level.
    pub fn from_base(base: AttributeSet, level: u32) -> Result<Self, AttributeError> {
        if level < 1 {
            return Err(AttributeError::InvalidLevel { level });
        }
        Ok(Self {
            level,
            base,
            temporary: AttributeSet::ZERO,
            temp_turns_remaining: 0,
            equipment: AttributeSet::ZERO,
            godlike_strength: 0,
        })
    }

    /// Every attribute at `starting_value + (level - 1) × per_level_growth`.
    pub fn seeded(config: &AttributeConfig, level: u32) -> Result<Self, AttributeError> {
        if level < 1 {
            return Err(AttributeError::InvalidLevel { level });
        }
        let value = scaled_by_level(config.starting_value, config.per_level_growth, level)?;
        Self::from_base(AttributeSet::splat(value), level)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn base(&self) -> &AttributeSet {
        &self.base
    }

    /// Gains one level. The weapon's attribute grows by the primary rate and
    /// the others by the secondary rate; unarmed, all grow evenly.
    ///
    /// Returns the growth that was applied.
    pub fn level_up(
        &mut self,
        weapon: Option<WeaponClass>,
        config: &AttributeConfig,
    ) -> AttributeSet {
        let growth = match weapon {
            Some(class) => {
                let mut growth = AttributeSet::splat(config.weapon_secondary_growth);
                *growth.get_mut(class.primary_attribute()) = config.weapon_primary_growth;
                growth
            }
            None => AttributeSet::splat(config.unarmed_growth),
        };
        self.base.add(&growth);
        self.level += 1;
        debug!(level = self.level, ?weapon, ?growth, "level up");
        growth
    }

    /// Sets the single temporary bonus slot.
    pub fn apply_stat_bonus(&mut self, amount: i32, attribute: Attribute, duration: u32) {
        self.temporary = AttributeSet::ZERO;
        *self.temporary.get_mut(attribute) = amount;
        self.temp_turns_remaining = duration;
        if duration == 0 {
            self.temporary = AttributeSet::ZERO;
        }
    }

    /// Counts elapsed action time against the temporary bonus.
    ///
    /// The countdown drops by `ceil(action_duration / reference_action_length)`
    /// turns. Returns `true` when this call expired the bonus.
    pub fn update_temp_effects(
        &mut self,
        action_duration: f64,
        reference_action_length: f64,
    ) -> Result<bool, AttributeError> {
        if !action_duration.is_finite() || action_duration < 0.0 {
            return Err(AttributeError::InvalidDuration {
                duration: action_duration,
            });
        }
        if !(reference_action_length.is_finite() && reference_action_length > 0.0) {
            return Err(AttributeError::InvalidReferenceLength {
                length: reference_action_length,
            });
        }
        if self.temp_turns_remaining == 0 {
            return Ok(false);
        }

        let elapsed = (action_duration / reference_action_length).ceil();
        let elapsed = if elapsed >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            elapsed as u32
        };
        self.temp_turns_remaining = self.temp_turns_remaining.saturating_sub(elapsed);

        if self.temp_turns_remaining == 0 {
            self.temporary = AttributeSet::ZERO;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn temp_bonus(&self, attribute: Attribute) -> i32 {
        self.temporary.get(attribute)
    }

    pub fn temp_turns_remaining(&self) -> u32 {
        self.temp_turns_remaining
    }

    /// Replaces the equipment bonus (recomputed by the caller on equip changes).
    pub fn set_equipment_bonus(&mut self, bonus: AttributeSet) {
        self.equipment = bonus;
    }

    pub fn equipment_bonus(&self) -> &AttributeSet {
        &self.equipment
    }

    /// Extra Strength from godlike gear.
    pub fn set_godlike_strength(&mut self, bonus: i32) {
        self.godlike_strength = bonus;
    }

    pub fn effective(&self, attribute: Attribute) -> i32 {
        let godlike = match attribute {
            Attribute::Strength => self.godlike_strength,
            _ => 0,
        };
        self.base.get(attribute)
            + self.temporary.get(attribute)
            + self.equipment.get(attribute)
            + godlike
    }

    pub fn effective_set(&self) -> AttributeSet {
        AttributeSet::new(
            self.effective(Attribute::Strength),
            self.effective(Attribute::Agility),
            self.effective(Attribute::Technique),
            self.effective(Attribute::Intelligence),
        )
    }

    pub fn meets_stat_threshold(&self, attribute: Attribute, threshold: i32) -> bool {
        self.effective(attribute) >= threshold
    }
}
