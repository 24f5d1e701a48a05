//! Enemy instantiation from content templates.

use tracing::debug;

use super::{ActionPoolError, Combatant, CombatantId, CombatantKind, EnemyProfile};
use crate::balance::{BalanceError, calculate_stats};
use crate::config::CombatConfig;
use crate::env::{ContentOracle, EnemyTemplate};
use crate::error::{CombatError, ErrorSeverity};
use crate::stats::{AttributeError, Attributes};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SpawnError {
    #[error("enemy '{enemy}' references unknown action '{action}'")]
    UnknownAction { enemy: String, action: String },

    #[error(transparent)]
    Balance(#[from] BalanceError),

    #[error(transparent)]
    Pool(#[from] ActionPoolError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

impl CombatError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownAction { .. } => ErrorSeverity::Validation,
            Self::Balance(err) => err.severity(),
            Self::Pool(err) => err.severity(),
            Self::Attribute(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAction { .. } => "SPAWN_UNKNOWN_ACTION",
            Self::Balance(err) => err.error_code(),
            Self::Pool(err) => err.error_code(),
            Self::Attribute(err) => err.error_code(),
        }
    }
}

/// Instantiates an enemy at `level`.
///
/// Stats are derived once through the balance calculator and become the
/// enemy's initial attribute state; the action pool is resolved by name
/// through the content oracle.
pub fn spawn_enemy(
    id: CombatantId,
    template: &EnemyTemplate,
    level: u32,
    config: &CombatConfig,
    content: &dyn ContentOracle,
) -> Result<Combatant, SpawnError> {
    let stats = calculate_stats(
        level,
        template.archetype,
        &template.base_attributes,
        &config.balance,
    )?;
    let attributes = Attributes::from_base(stats.attributes(), level)?;

    let mut enemy = Combatant::new(
        id,
        template.name.clone(),
        CombatantKind::Enemy(EnemyProfile {
            archetype: template.archetype,
            living: template.living,
        }),
        stats.health,
        attributes,
    )
    .with_armor(stats.armor)
    .with_attack_speed(stats.attack_speed);

    for (name, probability) in &template.actions {
        let action = content
            .action(name)
            .ok_or_else(|| SpawnError::UnknownAction {
                enemy: template.name.clone(),
                action: name.clone(),
            })?;
        enemy.add_action(action.clone(), *probability)?;
    }

    debug!(%id, name = %enemy.name, level, archetype = %template.archetype, "spawned enemy");
    Ok(enemy)
}
