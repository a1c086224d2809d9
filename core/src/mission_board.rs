//! Mission board — the session's active daily missions and their
//! completion state.
//!
//! Daily missions are a deterministic slice of the catalog, never a
//! randomized draw: rank 0 gets only the onboarding SetGoal mission, every
//! other rank gets the first DAILY_MISSION_CAP non-SetGoal entries in
//! catalog order.

use crate::config::{Mission, MissionKind};
use crate::types::{MissionId, Money, Rank};
use std::collections::HashSet;

/// How many daily missions a ranked session carries. Fixed.
pub const DAILY_MISSION_CAP: usize = 3;

/// A user action the board can score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissionAction {
    Deposit { amount: Money },
    GoalSet,
}

#[derive(Debug, Clone, Default)]
pub struct MissionBoard {
    active: Vec<Mission>,
    completed: HashSet<MissionId>,
}

impl MissionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)load the slate for a rank. Resets all completion state.
    pub fn load_for_rank(&mut self, catalog: &[Mission], rank: Rank) {
        self.completed.clear();
        if rank == 0 {
            self.active = catalog
                .iter()
                .find(|m| m.kind == MissionKind::SetGoal)
                .cloned()
                .into_iter()
                .collect();
        } else {
            self.active = catalog
                .iter()
                .filter(|m| m.kind != MissionKind::SetGoal)
                .take(DAILY_MISSION_CAP)
                .cloned()
                .collect();
        }
        log::debug!(
            "missions: loaded {} for rank {rank}",
            self.active.len()
        );
    }

    /// Score an action against the active slate. Returns the missions this
    /// action newly completed, in catalog order; a single action may
    /// complete several. Already-completed missions never match again.
    pub fn check_progress(&mut self, action: MissionAction) -> Vec<Mission> {
        let satisfied: Vec<Mission> = self
            .active
            .iter()
            .filter(|m| !self.completed.contains(&m.id))
            .filter(|m| Self::satisfied(m, action))
            .cloned()
            .collect();

        for mission in &satisfied {
            self.completed.insert(mission.id.clone());
        }
        satisfied
    }

    fn satisfied(mission: &Mission, action: MissionAction) -> bool {
        match (mission.kind, action) {
            (MissionKind::DepositOnce, MissionAction::Deposit { amount }) => {
                amount >= mission.params.min_amount.unwrap_or(0.0)
            }
            (MissionKind::SetGoal, MissionAction::GoalSet) => true,
            // ReadTip has no completing action; the slate shows it as
            // always open.
            _ => false,
        }
    }

    /// Mark a mission complete by id. Idempotent: returns false when the id
    /// was already completed or is not on the active slate, so points can
    /// never be double-awarded through this path.
    pub fn complete(&mut self, id: &str) -> bool {
        if !self.active.iter().any(|m| m.id == id) {
            return false;
        }
        self.completed.insert(id.to_string())
    }

    pub fn active(&self) -> &[Mission] {
        &self.active
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// Completed ids in slate order, for external persistence.
    pub fn completed_ids(&self) -> Vec<MissionId> {
        self.active
            .iter()
            .filter(|m| self.completed.contains(&m.id))
            .map(|m| m.id.clone())
            .collect()
    }
}
