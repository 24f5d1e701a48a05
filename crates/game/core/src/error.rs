//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (e.g., `RollError`, `TurnError`) are defined in their
//! respective modules alongside the operations they validate. This module
//! provides the shared severity classification they all report through.
//!
//! # Taxonomy
//!
//! - **Invalid argument**: out-of-range probability, bad dice parameters, level 0.
//!   Rejected at the call boundary and never silently clamped.
//! - **Precondition violation**: driving the turn manager outside an active
//!   battle. Fatal; the operation aborts.
//! - **Missing data**: empty action pool, no living leader. Not an error at all;
//!   surfaced as `None` or an empty collection.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Temporary conditions that may succeed with alternative input
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Lifecycle violations; the caller is driving the core incorrectly
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with alternative input.
    ///
    /// Examples: content lookup for an unknown action
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: probability outside [0, 1], die with fewer than two sides
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - operation invoked in the wrong lifecycle phase.
    ///
    /// Examples: executing a turn before `initialize_battle`
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug in the caller or the core.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_is_internal_but_not_recoverable() {
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Fatal.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
