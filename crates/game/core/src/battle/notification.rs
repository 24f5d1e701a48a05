//! Structured battle notifications.
//!
//! Rendering to display text belongs to the caller; `Display` here is a plain
//! default.

use crate::combatant::CombatantId;

/// Health ratio checkpoints, in the order they are evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthThreshold {
    #[strum(to_string = "50%")]
    Half,
    #[strum(to_string = "20%")]
    Critical,
    #[strum(to_string = "5%")]
    Dire,
}

impl HealthThreshold {
    /// Descending order of evaluation.
    pub const ALL: [Self; 3] = [Self::Half, Self::Critical, Self::Dire];

    pub const fn percent(self) -> i64 {
        match self {
            Self::Half => 50,
            Self::Critical => 20,
            Self::Dire => 5,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Half => 0,
            Self::Critical => 1,
            Self::Dire => 2,
        }
    }
}

/// One-shot flags for each threshold.
///
/// Flags only ever go from unset to set; they are cleared by building a new
/// state at battle start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MilestoneState {
    reached: [bool; 3],
}

impl MilestoneState {
    pub fn has_reached(&self, threshold: HealthThreshold) -> bool {
        self.reached[threshold.index()]
    }

    /// Marks a threshold. Returns `true` only the first time.
    pub(crate) fn mark(&mut self, threshold: HealthThreshold) -> bool {
        let slot = &mut self.reached[threshold.index()];
        !std::mem::replace(slot, true)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleNotification {
    /// A combatant's health fell to or below a threshold for the first time
    /// this battle.
    Milestone {
        combatant: CombatantId,
        name: String,
        threshold: HealthThreshold,
        /// Damage of the event that crossed the threshold.
        damage: i32,
    },
    /// Battle leadership moved from one living combatant to another.
    LeadershipChange {
        previous: CombatantId,
        previous_name: String,
        leader: CombatantId,
        leader_name: String,
    },
}

impl BattleNotification {
    pub fn is_milestone(&self) -> bool {
        matches!(self, Self::Milestone { .. })
    }

    pub fn is_leadership_change(&self) -> bool {
        matches!(self, Self::LeadershipChange { .. })
    }
}

impl std::fmt::Display for BattleNotification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Milestone {
                name,
                threshold,
                damage,
                ..
            } => write!(f, "{name} drops to {threshold} health after taking {damage} damage"),
            Self::LeadershipChange {
                previous_name,
                leader_name,
                ..
            } => write!(f, "{leader_name} takes the lead from {previous_name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestones_mark_once() {
        let mut state = MilestoneState::default();
        assert!(state.mark(HealthThreshold::Critical));
        assert!(!state.mark(HealthThreshold::Critical));
        assert!(state.has_reached(HealthThreshold::Critical));
        assert!(!state.has_reached(HealthThreshold::Half));
    }

    #[test]
    fn notifications_render_plainly() {
        let milestone = BattleNotification::Milestone {
            combatant: CombatantId(1),
            name: "Goblin".into(),
            threshold: HealthThreshold::Half,
            damage: 7,
        };
        assert_eq!(
            milestone.to_string(),
            "Goblin drops to 50% health after taking 7 damage"
        );

        let change = BattleNotification::LeadershipChange {
            previous: CombatantId(0),
            previous_name: "Hero".into(),
            leader: CombatantId(1),
            leader_name: "Goblin".into(),
        };
        assert_eq!(change.to_string(), "Goblin takes the lead from Hero");
    }
}
