//! The savings engine — the public entry points for a presentation layer.
//!
//! RULES:
//!   - One engine per session; all mutation is strictly sequential, one
//!     action at a time, run to completion.
//!   - Validation failures leave every field untouched.
//!   - The engine never calls presentation. Each accepted action returns an
//!     ActionOutcome; the collaborator renders and persists.

use crate::{
    config::GameConfig,
    display::{self, DisplayState, MissionView},
    error::{EngineError, EngineResult},
    event::ProgressEvent,
    mission_board::{MissionAction, MissionBoard},
    progression::{GoalFrequency, ProgressionState, MIN_GOAL_AMOUNT, POINTS_PER_PESO},
    types::{MissionId, Money, Points, SessionId},
};

/// What a single accepted action changed.
#[derive(Debug, Clone, Default)]
pub struct ActionOutcome {
    pub points_awarded:     Points,
    pub ranks_gained:       u32,
    pub completed_missions: Vec<MissionId>,
    pub events:             Vec<ProgressEvent>,
}

pub struct SavingsEngine {
    session_id: SessionId,
    config:     GameConfig,
    state:      ProgressionState,
    board:      MissionBoard,
}

impl SavingsEngine {
    /// A fresh session at rank 0 with the onboarding slate loaded.
    pub fn new(session_id: SessionId, config: GameConfig) -> Self {
        let mut board = MissionBoard::new();
        board.load_for_rank(&config.missions, 0);
        Self {
            session_id,
            config,
            state: ProgressionState::new(),
            board,
        }
    }

    /// Fresh engine over the reference catalog. Test constructor.
    pub fn build_test(session_id: &str) -> Self {
        Self::new(session_id.into(), GameConfig::default_test())
    }

    /// Rebuild an engine from externally persisted state. The collaborator
    /// owns storage; the slate is re-derived from the catalog for the stored
    /// rank and completed ids are re-marked on it.
    pub fn restore(
        session_id: SessionId,
        config: GameConfig,
        state: ProgressionState,
        completed: &[MissionId],
    ) -> Self {
        let mut board = MissionBoard::new();
        board.load_for_rank(&config.missions, state.current_rank);
        for id in completed {
            board.complete(id);
        }
        Self {
            session_id,
            config,
            state,
            board,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Completed mission ids in slate order, for external persistence.
    pub fn completed_mission_ids(&self) -> Vec<MissionId> {
        self.board.completed_ids()
    }

    /// Onboarding: capture the personal goal and enter rank 1.
    ///
    /// The visible rank-1 goal becomes the larger of the fixed tier-2 bar
    /// and the user's own ambition. The SetGoal mission is scored against
    /// the onboarding slate before the daily slate replaces it, so its
    /// points land and survive the reload.
    pub fn set_goal(
        &mut self,
        amount: Money,
        frequency: GoalFrequency,
    ) -> EngineResult<ActionOutcome> {
        if self.state.current_rank != 0 {
            return Err(EngineError::GoalAlreadySet);
        }
        if !amount.is_finite() || amount < MIN_GOAL_AMOUNT {
            log::warn!(
                "session={} goal rejected: {amount} below ${MIN_GOAL_AMOUNT:.0} minimum",
                self.session_id
            );
            return Err(EngineError::InvalidGoal { min: MIN_GOAL_AMOUNT });
        }

        let points_before = self.state.total_points;
        let mut outcome = ActionOutcome::default();

        self.state.personal_goal = amount;
        self.state.goal_frequency = Some(frequency);
        self.state.current_rank = 1;
        self.state.next_rank_threshold =
            self.config.ranks.tier_at(2)?.threshold.max(amount);

        log::info!(
            "session={} goal set: ${amount:.2} ({frequency:?}), rank 0 -> 1, target ${:.2}",
            self.session_id,
            self.state.next_rank_threshold
        );
        outcome.events.push(ProgressEvent::GoalSet {
            amount,
            frequency,
            next_rank_threshold: self.state.next_rank_threshold,
        });

        self.apply_missions(MissionAction::GoalSet, &mut outcome);
        self.reload_missions(&mut outcome);

        outcome.ranks_gained = 1;
        outcome.points_awarded = self.state.total_points - points_before;
        Ok(outcome)
    }

    /// A deposit: credit savings and base points, score the mission slate,
    /// then run the advancement loop.
    pub fn deposit(&mut self, amount: Money) -> EngineResult<ActionOutcome> {
        if self.state.current_rank == 0 {
            return Err(EngineError::GoalNotSet);
        }
        if !amount.is_finite() || amount <= 0.0 {
            log::warn!("session={} deposit rejected: {amount}", self.session_id);
            return Err(EngineError::InvalidAmount);
        }

        let points_before = self.state.total_points;
        let mut outcome = ActionOutcome::default();

        self.state.total_saved += amount;
        let base_points = amount * POINTS_PER_PESO;
        self.state.total_points += base_points;
        outcome.events.push(ProgressEvent::DepositAccepted {
            amount,
            base_points,
            total_saved: self.state.total_saved,
        });

        self.apply_missions(MissionAction::Deposit { amount }, &mut outcome);

        outcome.ranks_gained = self
            .state
            .advance(&self.config.ranks, &mut outcome.events)?;

        outcome.points_awarded = self.state.total_points - points_before;
        log::info!(
            "session={} deposit ${amount:.2}: saved ${:.2}, +{:.1} pts, +{} ranks",
            self.session_id,
            self.state.total_saved,
            outcome.points_awarded,
            outcome.ranks_gained
        );
        Ok(outcome)
    }

    /// Derived display values. Pure read.
    pub fn display_state(&self) -> EngineResult<DisplayState> {
        display::project(&self.config, &self.state, &self.board)
    }

    /// The active mission list with completion flags, in slate order.
    pub fn active_missions(&self) -> Vec<MissionView> {
        display::mission_views(&self.board)
    }

    fn apply_missions(&mut self, action: MissionAction, outcome: &mut ActionOutcome) {
        for mission in self.board.check_progress(action) {
            self.state.total_points += f64::from(mission.rewards.points);
            log::info!(
                "session={} mission completed: {} (+{} pts)",
                self.session_id,
                mission.title,
                mission.rewards.points
            );
            outcome.completed_missions.push(mission.id.clone());
            outcome.events.push(ProgressEvent::MissionCompleted {
                mission_id: mission.id,
                title: mission.title,
                points: mission.rewards.points,
            });
        }
    }

    fn reload_missions(&mut self, outcome: &mut ActionOutcome) {
        self.board
            .load_for_rank(&self.config.missions, self.state.current_rank);
        outcome.events.push(ProgressEvent::MissionsReloaded {
            rank: self.state.current_rank,
            active: self.board.active().len(),
        });
    }
}
