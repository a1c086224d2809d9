//! Derived display state — pure projection of ProgressionState.
//!
//! RULE: nothing in this module mutates. The presentation layer reads these
//! values and owns all formatting (currency strings, bar widths, assets).

use crate::config::GameConfig;
use crate::error::EngineResult;
use crate::mission_board::MissionBoard;
use crate::progression::ProgressionState;
use crate::rank_table::RankTable;
use crate::types::{Money, Rank};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DisplayState {
    pub saved_amount:     Money,
    pub displayed_goal:   Money,
    pub remaining_amount: Money,
    pub progress_percent: f64,
    /// Floored for display; accrual stays fractional.
    pub points:           i64,
    pub rank:             Rank,
    pub rank_name:        String,
    pub rank_asset_index: usize,
    pub at_max_rank:      bool,
    pub missions:         Vec<MissionView>,
}

/// One row of the mission list as the UI shows it.
#[derive(Debug, Clone, Serialize)]
pub struct MissionView {
    pub id: String,
    pub title: String,
    pub points: u32,
    pub water: Option<u32>,
    pub sun: Option<u32>,
    pub icon_color: Option<String>,
    pub completed: bool,
}

pub fn project(
    config: &GameConfig,
    state: &ProgressionState,
    board: &MissionBoard,
) -> EngineResult<DisplayState> {
    let ranks = &config.ranks;
    let goal = displayed_goal(ranks, state)?;
    let tier = ranks.tier_at(state.current_rank)?;

    Ok(DisplayState {
        saved_amount:     state.total_saved,
        displayed_goal:   goal,
        remaining_amount: (goal - state.total_saved).max(0.0),
        progress_percent: progress_percent(ranks, state, goal)?,
        points:           state.total_points.floor() as i64,
        rank:             state.current_rank,
        rank_name:        tier.name.clone(),
        rank_asset_index: rank_asset_index(state.current_rank),
        at_max_rank:      state.current_rank == ranks.max_rank(),
        missions:         mission_views(board),
    })
}

/// The goal shown for the current rank. Rank 1 recomputes
/// max(fixed tier-2 bar, personal goal) live, mirroring the onboarding
/// computation; the max rank pins to the final threshold.
pub fn displayed_goal(ranks: &RankTable, state: &ProgressionState) -> EngineResult<Money> {
    if state.current_rank == 1 {
        Ok(ranks.tier_at(2)?.threshold.max(state.personal_goal))
    } else {
        Ok(state.next_rank_threshold)
    }
}

/// Progress through the current tier span, clamped to 0..=100. The max rank
/// always reads 100; a span of zero or less reads 0 rather than dividing
/// by it.
pub fn progress_percent(
    ranks: &RankTable,
    state: &ProgressionState,
    displayed_goal: Money,
) -> EngineResult<f64> {
    if state.current_rank == ranks.max_rank() {
        return Ok(100.0);
    }
    let floor = ranks.tier_at(state.current_rank)?.threshold;
    let span = displayed_goal - floor;
    if span <= 0.0 {
        return Ok(0.0);
    }
    Ok(((state.total_saved - floor) / span * 100.0).clamp(0.0, 100.0))
}

/// Rank → plant asset index. Ranks 4 and 5 share the final asset.
pub fn rank_asset_index(rank: Rank) -> usize {
    match rank {
        0 => 0,
        1 => 1,
        2 => 2,
        3 => 3,
        4 | 5 => 4,
        _ => 0,
    }
}

pub fn mission_views(board: &MissionBoard) -> Vec<MissionView> {
    board
        .active()
        .iter()
        .map(|m| MissionView {
            id: m.id.clone(),
            title: m.title.clone(),
            points: m.rewards.points,
            water: m.rewards.water,
            sun: m.rewards.sun,
            icon_color: m.icon_color.clone(),
            completed: board.is_completed(&m.id),
        })
        .collect()
}
