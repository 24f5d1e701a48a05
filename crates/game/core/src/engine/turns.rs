use crate::action::Action;
use crate::balance::MIN_ATTACK_SPEED;
use crate::combatant::{Combatant, CombatantId};

/// Time one action takes for a combatant: `length × reference / attack_speed`.
///
/// Attack speed below the balance floor counts as the floor.
pub fn action_duration(length: f64, attack_speed: f64, reference_action_length: f64) -> f64 {
    let speed = if attack_speed.is_finite() {
        attack_speed.max(MIN_ATTACK_SPEED)
    } else {
        MIN_ATTACK_SPEED
    };
    length.max(0.0) * reference_action_length / speed
}

/// Duration of `action` when performed by `actor`.
pub fn duration_of(action: &Action, actor: &Combatant, reference_action_length: f64) -> f64 {
    action_duration(action.length, actor.attack_speed, reference_action_length)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Slot {
    entity: CombatantId,
    ready_at: f64,
}

/// Time-based turn order.
///
/// Each participant is ready at some point on a shared clock; the next actor
/// is the living participant with the smallest `ready_at`, ties going to the
/// earlier-registered participant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    clock: f64,
    slots: Vec<Slot>,
}

impl Timeline {
    /// Schedules every participant one reference action from the start.
    pub fn new(participants: &[&Combatant], reference_action_length: f64) -> Self {
        let slots = participants
            .iter()
            .map(|c| Slot {
                entity: c.id,
                ready_at: action_duration(1.0, c.attack_speed, reference_action_length),
            })
            .collect();
        Self { clock: 0.0, slots }
    }

    /// Returns the current timeline clock value.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn ready_at(&self, entity: CombatantId) -> Option<f64> {
        self.slots
            .iter()
            .find(|slot| slot.entity == entity)
            .map(|slot| slot.ready_at)
    }

    /// Selects the living participant due soonest. `None` when nobody
    /// scheduled is alive.
    pub fn next_actor(&self, participants: &[&Combatant]) -> Option<CombatantId> {
        let mut best: Option<Slot> = None;
        for slot in &self.slots {
            let alive = participants
                .iter()
                .any(|c| c.id == slot.entity && c.is_alive());
            if alive && best.is_none_or(|b| slot.ready_at < b.ready_at) {
                best = Some(*slot);
            }
        }
        best.map(|slot| slot.entity)
    }

    /// Moves the clock to the actor's turn and schedules its next one
    /// `duration` later.
    pub fn advance(&mut self, entity: CombatantId, duration: f64) {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.entity == entity) {
            self.clock = self.clock.max(slot.ready_at);
            slot.ready_at = self.clock + duration.max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttributeConfig;

    fn hero() -> Combatant {
        Combatant::player("Hero", 1, &AttributeConfig::default()).unwrap()
    }

    fn rival(speed: f64) -> Combatant {
        let mut rival = hero().with_attack_speed(speed);
        rival.id = CombatantId(1);
        rival
    }

    #[test]
    fn duration_scales_with_speed() {
        assert_eq!(action_duration(1.0, 1.0, 1.0), 1.0);
        assert_eq!(action_duration(1.0, 2.0, 1.0), 0.5);
        assert_eq!(action_duration(2.0, 1.0, 1.5), 3.0);
        assert_eq!(action_duration(1.0, 0.0, 1.0), 2.0);
    }

    #[test]
    fn ties_go_to_first_participant() {
        let a = hero();
        let b = rival(1.0);
        let timeline = Timeline::new(&[&a, &b], 1.0);
        assert_eq!(timeline.next_actor(&[&a, &b]), Some(CombatantId::PLAYER));
    }

    #[test]
    fn faster_participant_acts_more_often() {
        let a = hero();
        let b = rival(2.0);
        let mut timeline = Timeline::new(&[&a, &b], 1.0);

        let mut order = Vec::new();
        for _ in 0..6 {
            let next = timeline.next_actor(&[&a, &b]).unwrap();
            let speed = if next == a.id { a.attack_speed } else { b.attack_speed };
            timeline.advance(next, action_duration(1.0, speed, 1.0));
            order.push(next.0);
        }
        // b ready at 0.5, 1.0, 1.5, ...; a at 1.0, 2.0
        assert_eq!(order, vec![1, 0, 1, 1, 0, 1]);
    }

    #[test]
    fn dead_participants_are_skipped() {
        let a = hero();
        let mut b = rival(5.0);
        b.take_damage(1_000);
        let timeline = Timeline::new(&[&a, &b], 1.0);
        assert_eq!(timeline.next_actor(&[&a, &b]), Some(CombatantId::PLAYER));
    }
}
