//! Standard combat resolution used by the simulator.
//!
//! Hit or miss comes from the attacker's combo chain; damage scales with the
//! attacker's offensive attribute, its weaken multiplier and the combo step,
//! minus the target's armor.

use combat_core::engine::duration_of;
use combat_core::{
    Action, ActionEffect, ActionKind, ActionResolution, ActionResolver, Attribute, Combatant,
    ComboOutcome, RngOracle, RollEngine,
};
use tracing::{trace, warn};

/// Extra damage per combo step, in percent.
pub const COMBO_STEP_BONUS_PERCENT: f64 = 25.0;

pub struct StandardResolver<R> {
    engine: RollEngine<R>,
    reference_action_length: f64,
}

impl<R: RngOracle> StandardResolver<R> {
    pub fn new(rng: R, reference_action_length: f64) -> Self {
        Self {
            engine: RollEngine::new(rng),
            reference_action_length,
        }
    }

    /// Raw damage before armor.
    fn base_damage(actor: &Combatant, action: &Action, combo_step: u32) -> f64 {
        let attribute = match action.kind {
            ActionKind::Spell => Attribute::Intelligence,
            _ => Attribute::Strength,
        };
        let power = f64::from(actor.attributes.effective(attribute).max(0));
        let combo = 1.0 + f64::from(combo_step) * COMBO_STEP_BONUS_PERCENT / 100.0;
        power * action.damage_multiplier * actor.status.damage_multiplier() * combo
    }

    /// Applies every effect of a landed action. Returns health restored.
    fn apply_effects(actor: &mut Combatant, target: &mut Combatant, action: &Action) -> i32 {
        let mut healed = 0;
        for effect in &action.effects {
            match *effect {
                ActionEffect::Weaken { multiplier, turns } => {
                    if let Err(err) = target.status.weaken(multiplier, turns) {
                        warn!(action = %action.name, %err, "ignoring weaken effect");
                    }
                }
                ActionEffect::Stun { turns } => target.status.stun(turns),
                ActionEffect::RollPenalty { amount, turns } => {
                    target.apply_roll_penalty(amount, turns)
                }
                ActionEffect::Poison { damage, turns } => target.status.poison(damage, turns),
                ActionEffect::StatBonus {
                    attribute,
                    amount,
                    duration,
                } => actor.attributes.apply_stat_bonus(amount, attribute, duration),
                ActionEffect::Heal { amount } => healed += actor.heal(amount),
            }
        }
        healed
    }
}

impl<R: RngOracle> ActionResolver for StandardResolver<R> {
    fn resolve(
        &mut self,
        actor: &mut Combatant,
        target: &mut Combatant,
        action: &Action,
    ) -> ActionResolution {
        let duration = duration_of(action, actor, self.reference_action_length);

        // Self-targeted actions always land and never roll.
        if action.targets_self() {
            let healing = Self::apply_effects(actor, target, action);
            return ActionResolution {
                healing,
                duration,
                summary: format!("{} uses {}", actor.name, action.name),
                ..ActionResolution::default()
            };
        }

        let bonus = action.roll_bonus - actor.status.roll_penalty();
        let step = actor.combo.advance(&mut self.engine, bonus);
        trace!(actor = %actor.id, roll = step.result.roll(), outcome = ?step.outcome, "combo roll");

        if !step.outcome.lands() {
            return ActionResolution {
                duration,
                combo: Some(step.outcome),
                summary: format!("{}'s {} misses", actor.name, action.name),
                ..ActionResolution::default()
            };
        }

        let raw = Self::base_damage(actor, action, step.step);
        let damage = if raw > 0.0 {
            ((raw - f64::from(target.armor)).round() as i32).max(1)
        } else {
            0
        };
        let damage_dealt = target.take_damage(damage);
        let healing = Self::apply_effects(actor, target, action);

        let summary = match step.outcome {
            ComboOutcome::ComboStarted | ComboOutcome::ComboContinued => format!(
                "{}'s {} hits {} for {} (combo x{})",
                actor.name, action.name, target.name, damage_dealt, step.step
            ),
            _ => format!(
                "{}'s {} hits {} for {}",
                actor.name, action.name, target.name, damage_dealt
            ),
        };
        ActionResolution {
            damage_dealt,
            healing,
            duration,
            combo: Some(step.outcome),
            summary,
        }
    }
}
