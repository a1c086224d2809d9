//! Progress events — what the engine tells the outside world.
//!
//! RULE: The engine never reaches into presentation. Every mutating
//! operation returns the ordered events describing what changed; the
//! collaborator decides how to render, animate, or persist them.

use crate::progression::GoalFrequency;
use crate::types::{Money, Points, Rank};
use serde::{Deserialize, Serialize};

/// Every event the engine can emit. Variants are added, never reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Onboarding completed: the personal goal is captured and the session
    /// enters rank 1.
    GoalSet {
        amount: Money,
        frequency: GoalFrequency,
        next_rank_threshold: Money,
    },

    /// A valid deposit was credited.
    DepositAccepted {
        amount: Money,
        base_points: Points,
        total_saved: Money,
    },

    /// A mission on the active slate was satisfied. Emitted at most once
    /// per mission per slate.
    MissionCompleted {
        mission_id: String,
        title: String,
        points: u32,
    },

    /// The daily slate was (re)loaded, resetting completion state.
    MissionsReloaded {
        rank: Rank,
        active: usize,
    },

    /// One step of a promotion. A large deposit may emit several in a row.
    RankAdvanced {
        from: Rank,
        to: Rank,
        name: String,
        points_bonus: u32,
    },

    /// The new tier carries a cashback reward. Surfaced exactly once per
    /// promotion; the ledger credit itself is the collaborator's job.
    CashbackAwarded {
        rank: Rank,
        amount: Money,
    },
}

impl ProgressEvent {
    /// Stable string name, used as the event_type column in the
    /// collaborator's journal.
    pub fn type_name(&self) -> &'static str {
        match self {
            ProgressEvent::GoalSet { .. }          => "goal_set",
            ProgressEvent::DepositAccepted { .. }  => "deposit_accepted",
            ProgressEvent::MissionCompleted { .. } => "mission_completed",
            ProgressEvent::MissionsReloaded { .. } => "missions_reloaded",
            ProgressEvent::RankAdvanced { .. }     => "rank_advanced",
            ProgressEvent::CashbackAwarded { .. }  => "cashback_awarded",
        }
    }
}
