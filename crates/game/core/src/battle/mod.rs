//! Battle Health Tracker: one-shot health milestones and battle leadership.
//!
//! State lives for a single battle. [`BattleHealthTracker::initialize_battle`]
//! starts it fresh; nothing carries over between battles.

mod notification;
mod tracker;

pub use notification::{BattleNotification, HealthThreshold, MilestoneState};
pub use tracker::{BattleHealthTracker, ParticipantSnapshot};
