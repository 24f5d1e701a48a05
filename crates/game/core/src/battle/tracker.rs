use tracing::{debug, warn};

use super::notification::{BattleNotification, HealthThreshold, MilestoneState};
use crate::combatant::{Combatant, CombatantId};

/// What the tracker remembers about one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantSnapshot {
    pub id: CombatantId,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub milestones: MilestoneState,
}

impl ParticipantSnapshot {
    fn capture(combatant: &Combatant) -> Self {
        Self {
            id: combatant.id,
            name: combatant.name.clone(),
            health: combatant.health(),
            max_health: combatant.max_health(),
            milestones: MilestoneState::default(),
        }
    }

    fn refresh(&mut self, combatant: &Combatant) {
        self.health = combatant.health();
        self.max_health = combatant.max_health();
    }

    fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// `health / max × 100 ≤ percent`, evaluated without division.
    ///
    /// `max` is the base maximum; equipment bonuses do not move thresholds.
    fn at_or_below(&self, percent: i64) -> bool {
        i64::from(self.health) * 100 <= percent * i64::from(self.max_health)
    }
}

/// Per-battle health milestones and leadership.
///
/// Participants keep their registration order; leadership ties go to the
/// earliest-registered participant.
#[derive(Clone, Debug, Default)]
pub struct BattleHealthTracker {
    participants: Vec<ParticipantSnapshot>,
    leader: Option<CombatantId>,
    pending: Vec<BattleNotification>,
}

impl BattleHealthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets milestone state for every participant and picks the initial
    /// leader without emitting a notification.
    pub fn initialize_battle(&mut self, participants: &[&Combatant]) {
        self.participants = participants
            .iter()
            .map(|c| ParticipantSnapshot::capture(c))
            .collect();
        self.pending.clear();
        self.leader = self.compute_leader();
        debug!(
            participants = self.participants.len(),
            leader = ?self.leader,
            "health tracker initialized"
        );
    }

    /// Records a damage event against `entity`.
    ///
    /// Emits one milestone notification per newly crossed threshold and, when
    /// the leader moved between two participants, one leadership change. The
    /// returned notifications are also queued for
    /// [`get_and_clear_pending_notifications`](Self::get_and_clear_pending_notifications).
    pub fn check_health_milestones(
        &mut self,
        entity: &Combatant,
        damage: i32,
    ) -> Vec<BattleNotification> {
        let Some(snapshot) = self.participants.iter_mut().find(|p| p.id == entity.id) else {
            warn!(id = %entity.id, "health check for a combatant outside this battle");
            return Vec::new();
        };
        snapshot.refresh(entity);

        let mut notifications = Vec::new();
        for threshold in HealthThreshold::ALL {
            if snapshot.milestones.has_reached(threshold)
                || !snapshot.at_or_below(threshold.percent())
            {
                continue;
            }
            snapshot.milestones.mark(threshold);
            notifications.push(BattleNotification::Milestone {
                combatant: snapshot.id,
                name: snapshot.name.clone(),
                threshold,
                damage,
            });
        }

        let previous = self.leader;
        let current = self.compute_leader();
        self.leader = current;
        if let (Some(previous), Some(current)) = (previous, current)
            && previous != current
        {
            notifications.push(BattleNotification::LeadershipChange {
                previous,
                previous_name: self.name_of(previous).unwrap_or_default(),
                leader: current,
                leader_name: self.name_of(current).unwrap_or_default(),
            });
        }

        if !notifications.is_empty() {
            debug!(id = %entity.id, count = notifications.len(), "battle notifications");
        }
        self.pending.extend(notifications.iter().cloned());
        notifications
    }

    /// Refreshes a participant's health after a non-damage change (healing,
    /// regeneration). Never emits and leaves leadership for the next damage
    /// event to settle.
    pub fn observe(&mut self, entity: &Combatant) {
        if let Some(snapshot) = self.participants.iter_mut().find(|p| p.id == entity.id) {
            snapshot.refresh(entity);
        }
    }

    pub fn leader(&self) -> Option<CombatantId> {
        self.leader
    }

    pub fn milestones(&self, id: CombatantId) -> Option<MilestoneState> {
        self.snapshot(id).map(|p| p.milestones)
    }

    pub fn snapshot(&self, id: CombatantId) -> Option<&ParticipantSnapshot> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn participants(&self) -> &[ParticipantSnapshot] {
        &self.participants
    }

    pub fn pending_notifications(&self) -> &[BattleNotification] {
        &self.pending
    }

    pub fn get_and_clear_pending_notifications(&mut self) -> Vec<BattleNotification> {
        std::mem::take(&mut self.pending)
    }

    /// First living participant with the highest current health.
    fn compute_leader(&self) -> Option<CombatantId> {
        let mut best: Option<&ParticipantSnapshot> = None;
        for participant in self.participants.iter().filter(|p| p.is_alive()) {
            if best.is_none_or(|b| participant.health > b.health) {
                best = Some(participant);
            }
        }
        best.map(|p| p.id)
    }

    fn name_of(&self, id: CombatantId) -> Option<String> {
        self.snapshot(id).map(|p| p.name.clone())
    }
}
