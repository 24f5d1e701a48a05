//! Enemy Balance Calculator.
//!
//! Derives an enemy's Strength / Health / Armor / AttackSpeed from its level
//! and archetype, once, at spawn time. See [`calculator`] for the allocation
//! model.

pub mod calculator;
pub mod rounding;

pub use calculator::{
    CalculatedEnemyStats, MIN_ARMOR, MIN_ATTACK_SPEED, MIN_HEALTH, MIN_STRENGTH, PointAllocation,
    allocate_points, calculate_stats,
};

use crate::error::{CombatError, ErrorSeverity};

/// Closed set of enemy combat styles.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Archetype {
    Berserker,
    Assassin,
    #[default]
    Warrior,
    Brute,
    Juggernaut,
    Guardian,
}

/// Which DPS share an archetype draws from the config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DpsBand {
    Max,
    Min,
    Balanced,
}

impl Archetype {
    pub const fn dps_band(self) -> DpsBand {
        match self {
            Self::Berserker | Self::Assassin => DpsBand::Max,
            Self::Juggernaut | Self::Guardian => DpsBand::Min,
            Self::Warrior | Self::Brute => DpsBand::Balanced,
        }
    }

    /// Parses an archetype name, falling back to the balanced default
    /// (`Warrior`) for names outside the closed set.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(name, "unknown archetype, using default");
            Self::default()
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BalanceError {
    #[error("enemy level must be at least 1 (got {level})")]
    InvalidLevel { level: u32 },

    #[error("enemy level {level} overflows the point budget")]
    LevelTooHigh { level: u32 },

    #[error("{field} must be a percentage between 0 and 100 (got {value})")]
    InvalidShare { field: &'static str, value: u32 },
}

impl CombatError for BalanceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLevel { .. } => "BALANCE_INVALID_LEVEL",
            Self::LevelTooHigh { .. } => "BALANCE_LEVEL_TOO_HIGH",
            Self::InvalidShare { .. } => "BALANCE_INVALID_SHARE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_case_insensitively_with_default_fallback() {
        assert_eq!(Archetype::from_name_or_default("guardian"), Archetype::Guardian);
        assert_eq!(Archetype::from_name_or_default("Assassin"), Archetype::Assassin);
        assert_eq!(Archetype::from_name_or_default("Necromancer"), Archetype::Warrior);
    }

    #[test]
    fn every_archetype_has_a_band() {
        assert_eq!(Archetype::Berserker.dps_band(), DpsBand::Max);
        assert_eq!(Archetype::Guardian.dps_band(), DpsBand::Min);
        assert_eq!(Archetype::Brute.dps_band(), DpsBand::Balanced);
    }
}
