//! Error types for the turn manager.

use crate::combatant::CombatantId;
use crate::error::{CombatError, ErrorSeverity};
use crate::stats::AttributeError;

use super::BattlePhase;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TurnError {
    /// Active-only operation called while no battle is running.
    #[error("{operation} requires an active battle (phase: {phase})")]
    NotActive {
        operation: &'static str,
        phase: BattlePhase,
    },

    #[error("a battle is already in progress")]
    BattleInProgress,

    #[error("combatant {id} cannot open a battle as the player")]
    NotAPlayer { id: CombatantId },

    #[error("combatant {id} is not part of the current battle")]
    UnknownParticipant { id: CombatantId },

    #[error("combatant {id} is defeated and cannot act")]
    ActorDefeated { id: CombatantId },

    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

impl TurnError {
    pub(crate) fn not_active(operation: &'static str, phase: BattlePhase) -> Self {
        Self::NotActive { operation, phase }
    }
}

impl CombatError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotActive { .. } | Self::BattleInProgress => ErrorSeverity::Fatal,
            Self::NotAPlayer { .. }
            | Self::UnknownParticipant { .. }
            | Self::ActorDefeated { .. } => ErrorSeverity::Validation,
            Self::Attribute(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotActive { .. } => "TURN_NOT_ACTIVE",
            Self::BattleInProgress => "TURN_BATTLE_IN_PROGRESS",
            Self::NotAPlayer { .. } => "TURN_NOT_A_PLAYER",
            Self::UnknownParticipant { .. } => "TURN_UNKNOWN_PARTICIPANT",
            Self::ActorDefeated { .. } => "TURN_ACTOR_DEFEATED",
            Self::Attribute(err) => err.error_code(),
        }
    }
}
