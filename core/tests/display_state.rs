use arbolito_core::config::{GameConfig, RankTier};
use arbolito_core::display;
use arbolito_core::engine::SavingsEngine;
use arbolito_core::mission_board::MissionBoard;
use arbolito_core::progression::{GoalFrequency, ProgressionState};
use arbolito_core::rank_table::RankTable;

// ── Test helpers ────────────────────────────────────────────────────────────

fn state_at(rank: usize, saved: f64, threshold: f64) -> ProgressionState {
    ProgressionState {
        current_rank: rank,
        total_saved: saved,
        total_points: 0.0,
        personal_goal: 100.0,
        goal_frequency: Some(GoalFrequency::Weekly),
        next_rank_threshold: threshold,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The remaining amount never reads negative, even if savings overshoot
/// the displayed goal.
#[test]
fn remaining_amount_floors_at_zero() {
    let config = GameConfig::default_test();
    let state = state_at(2, 6000.0, 5000.0);

    let display = display::project(&config, &state, &MissionBoard::new()).unwrap();

    assert_eq!(display.remaining_amount, 0.0);
    assert_eq!(display.progress_percent, 100.0, "Overshoot clamps to 100");
}

/// A degenerate tier span (displayed goal at or below the tier floor)
/// reads as 0% instead of dividing by zero.
#[test]
fn zero_span_reads_zero_percent() {
    let tiers = vec![
        RankTier {
            rank: 0,
            name: "Base".into(),
            threshold: 0.0,
            points_reward: 0,
            cashback_reward: None,
        },
        RankTier {
            rank: 1,
            name: "Primera".into(),
            threshold: 500.0,
            points_reward: 0,
            cashback_reward: None,
        },
        RankTier {
            rank: 2,
            name: "Segunda".into(),
            threshold: 500.0,
            points_reward: 0,
            cashback_reward: None,
        },
    ];
    let ranks = RankTable::new(tiers).unwrap();
    let state = state_at(1, 500.0, 500.0);

    let goal = display::displayed_goal(&ranks, &state).unwrap();
    assert_eq!(goal, 500.0);
    assert_eq!(
        display::progress_percent(&ranks, &state, goal).unwrap(),
        0.0,
        "Span of zero must read 0, not NaN or a division error"
    );
}

/// Progress measures distance through the current tier span, not from
/// zero: rank 2 spans $1,000..$5,000, so $3,000 saved is 50%.
#[test]
fn progress_measures_current_tier_span() {
    let config = GameConfig::default_test();
    let state = state_at(2, 3000.0, 5000.0);

    let display = display::project(&config, &state, &MissionBoard::new()).unwrap();
    assert!(
        (display.progress_percent - 50.0).abs() < 1e-9,
        "Expected 50%, got {}",
        display.progress_percent
    );
}

/// At rank 1 the displayed goal recomputes live as
/// max(tier-2 bar, personal goal).
#[test]
fn rank_one_goal_recomputes_live() {
    let config = GameConfig::default_test();

    let mut state = state_at(1, 0.0, 1000.0);
    state.personal_goal = 8000.0;

    let display = display::project(&config, &state, &MissionBoard::new()).unwrap();
    assert_eq!(
        display.displayed_goal, 8000.0,
        "Personal goal above the tier bar must win"
    );
}

/// The max rank always reads 100% with nothing remaining.
#[test]
fn max_rank_reads_complete() {
    let config = GameConfig::default_test();
    let state = state_at(5, 50000.0, 50000.0);

    let display = display::project(&config, &state, &MissionBoard::new()).unwrap();
    assert!(display.at_max_rank);
    assert_eq!(display.progress_percent, 100.0);
    assert_eq!(display.remaining_amount, 0.0);
    assert_eq!(display.rank_name, "Árbol Frutal");
}

/// Ranks 4 and 5 share the final plant asset; lower ranks map one-to-one.
#[test]
fn top_ranks_share_asset_index() {
    for rank in 0..=3 {
        assert_eq!(display::rank_asset_index(rank), rank);
    }
    assert_eq!(display::rank_asset_index(4), 4);
    assert_eq!(display::rank_asset_index(5), 4);
}

/// Mission rows carry completion flags and the catalog's presentation
/// metadata through to the UI.
#[test]
fn mission_views_reflect_completion() {
    let mut engine = SavingsEngine::build_test("display-missions");
    engine.set_goal(100.0, GoalFrequency::Weekly).unwrap();
    engine.deposit(10.0).unwrap();

    let display = engine.display_state().unwrap();
    let flags: Vec<(&str, bool)> = display
        .missions
        .iter()
        .map(|m| (m.id.as_str(), m.completed))
        .collect();
    assert_eq!(
        flags,
        vec![
            ("deposit_10", true),
            ("deposit_50", false),
            ("read_tip_1", false)
        ]
    );
    assert_eq!(
        display.missions[0].icon_color.as_deref(),
        Some("bg-green-200")
    );
}
