//! Account progression state and the rank-advancement algorithm.
//!
//! Invariants:
//!   - current_rank never decreases.
//!   - total_saved and total_points never decrease.
//!   - next_rank_threshold is recomputed on every rank change.
//!   - The 1→2 edge requires BOTH the fixed tier threshold and the user's
//!     personal goal; every later edge uses the threshold alone, and the
//!     special rule never recurses.

use crate::error::EngineResult;
use crate::event::ProgressEvent;
use crate::rank_table::RankTable;
use crate::types::{Money, Points, Rank};
use serde::{Deserialize, Serialize};

/// Base point accrual per peso deposited.
pub const POINTS_PER_PESO: f64 = 0.1;

/// Smallest personal goal accepted at onboarding.
pub const MIN_GOAL_AMOUNT: Money = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalFrequency {
    Weekly,
    Biweekly,
    Monthly,
}

/// The mutable account state for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub current_rank:        Rank,
    pub total_saved:         Money,
    pub total_points:        Points,
    pub personal_goal:       Money,
    pub goal_frequency:      Option<GoalFrequency>,
    /// The displayed target for the current rank. Meaningful from rank 1 on;
    /// set at onboarding and on every promotion.
    pub next_rank_threshold: Money,
}

impl ProgressionState {
    pub fn new() -> Self {
        Self {
            current_rank:        0,
            total_saved:         0.0,
            total_points:        0.0,
            personal_goal:       0.0,
            goal_frequency:      None,
            next_rank_threshold: 0.0,
        }
    }

    /// The cascading promotion loop. Evaluated after every deposit; a single
    /// large deposit can climb several tiers in one call. Terminates when
    /// the next tier's condition fails or the ladder tops out, so it runs at
    /// most max_rank iterations.
    ///
    /// Per promotion: the tier's points bonus lands (only if > 0), a
    /// cashback-bearing tier surfaces CashbackAwarded exactly once, and
    /// next_rank_threshold moves to the following tier (or pins to the final
    /// threshold at the top).
    ///
    /// Returns the number of ranks gained.
    pub(crate) fn advance(
        &mut self,
        ranks: &RankTable,
        events: &mut Vec<ProgressEvent>,
    ) -> EngineResult<u32> {
        let mut gained = 0u32;

        while self.current_rank < ranks.max_rank() {
            let next = ranks.tier_at(self.current_rank + 1)?;

            let condition_met = if self.current_rank == 1 {
                // The user's self-declared goal can raise the bar above the
                // fixed tier threshold.
                self.total_saved >= next.threshold && self.total_saved >= self.personal_goal
            } else {
                self.total_saved >= next.threshold
            };
            if !condition_met {
                break;
            }

            let from = self.current_rank;
            self.current_rank = next.rank;
            gained += 1;

            if next.points_reward > 0 {
                self.total_points += f64::from(next.points_reward);
            }
            log::info!(
                "rank advanced {from} -> {} ({}), bonus +{} pts",
                next.rank,
                next.name,
                next.points_reward
            );
            events.push(ProgressEvent::RankAdvanced {
                from,
                to: next.rank,
                name: next.name.clone(),
                points_bonus: next.points_reward,
            });

            if let Some(amount) = next.cashback_reward {
                log::info!("rank {}: cashback ${amount:.2} awarded", next.rank);
                events.push(ProgressEvent::CashbackAwarded {
                    rank: next.rank,
                    amount,
                });
            }

            self.next_rank_threshold = if self.current_rank < ranks.max_rank() {
                ranks.tier_at(self.current_rank + 1)?.threshold
            } else {
                next.threshold
            };
        }

        Ok(gained)
    }
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::new()
    }
}
