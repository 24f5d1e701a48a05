//! Seam between turn bookkeeping and combat resolution.

use crate::action::Action;
use crate::combatant::Combatant;
use crate::dice::ComboOutcome;

/// What an action did once resolved.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResolution {
    /// Health actually removed from the target.
    pub damage_dealt: i32,
    /// Health actually restored (to the actor or target, per the action).
    pub healing: i32,
    /// Elapsed action time, in the same unit as the reference action length.
    pub duration: f64,
    /// Combo roll outcome, when the resolver rolled one.
    pub combo: Option<ComboOutcome>,
    /// Short structured description for the caller's formatter.
    pub summary: String,
}

/// Applies an action's damage and effects.
///
/// The turn manager owns bookkeeping (turn count, last action, timeline,
/// temporary effect countdown, milestones); everything that decides *how
/// much* happens lives behind this trait.
pub trait ActionResolver {
    fn resolve(
        &mut self,
        actor: &mut Combatant,
        target: &mut Combatant,
        action: &Action,
    ) -> ActionResolution;
}

impl<T: ActionResolver + ?Sized> ActionResolver for &mut T {
    fn resolve(
        &mut self,
        actor: &mut Combatant,
        target: &mut Combatant,
        action: &Action,
    ) -> ActionResolution {
        (**self).resolve(actor, target, action)
    }
}
