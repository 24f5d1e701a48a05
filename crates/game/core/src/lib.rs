//! Deterministic turn-based combat rules.
//!
//! `combat-core` decides which action each combatant takes, how long it
//! takes, which stats apply and how close each side is to defeat. Nothing
//! here performs I/O: randomness, configuration and content are injected, so
//! a fixed seed replays a battle exactly. Battles are driven through
//! [`engine::TurnManager`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod balance;
pub mod battle;
pub mod combatant;
pub mod config;
pub mod dice;
pub mod engine;
pub mod env;
pub mod error;
pub mod stats;

pub use action::{Action, ActionEffect, ActionKind, TargetKind};
pub use balance::{Archetype, BalanceError, CalculatedEnemyStats, calculate_stats};
pub use battle::{BattleHealthTracker, BattleNotification, HealthThreshold, MilestoneState};
pub use combatant::{
    ActionPool, ActionPoolError, Combatant, CombatantId, CombatantKind, EnemyProfile,
    PlayerProfile, SpawnError, spawn_enemy,
};
pub use config::{
    ArchetypeModifierTable, ArchetypeModifiers, AttributeConfig, BalanceConfig, CombatConfig,
    TurnConfig,
};
pub use dice::{
    ComboBand, ComboChain, ComboOutcome, ComboState, ComboStep, DiceResult, Rarity, RollEngine,
    RollError,
};
pub use engine::{
    ActionResolution, ActionResolver, BattlePhase, BattleSummary, Timeline, TurnError,
    TurnManager, TurnOutcome, action_duration,
};
pub use env::{ContentOracle, EnemyTemplate, PcgRng, RngOracle, ScriptedRng, compute_seed};
pub use error::{CombatError, ErrorSeverity};
pub use stats::{
    Attribute, AttributeError, AttributeSet, Attributes, StatusEffects, StatusError, WeaponClass,
};
