use arbolito_core::config::{
    GameConfig, Mission, MissionKind, MissionParams, MissionRewards,
};
use arbolito_core::engine::SavingsEngine;
use arbolito_core::mission_board::{MissionAction, MissionBoard, DAILY_MISSION_CAP};
use arbolito_core::progression::GoalFrequency;

// ── Test helpers ────────────────────────────────────────────────────────────

fn make_onboarded(session_id: &str, goal: f64) -> SavingsEngine {
    let mut engine = SavingsEngine::build_test(session_id);
    engine.set_goal(goal, GoalFrequency::Weekly).unwrap();
    engine
}

fn deposit_mission(id: &str, min_amount: f64) -> Mission {
    Mission {
        id: id.into(),
        title: format!("Deposita ${min_amount}"),
        kind: MissionKind::DepositOnce,
        params: MissionParams {
            min_amount: Some(min_amount),
        },
        rewards: MissionRewards {
            points: 1,
            water: None,
            sun: None,
        },
        icon_color: None,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Rank 0 carries only the onboarding SetGoal mission.
#[test]
fn onboarding_slate_is_single_setgoal_mission() {
    let engine = SavingsEngine::build_test("missions-rank0");

    let missions = engine.active_missions();
    assert_eq!(missions.len(), 1);
    assert_eq!(missions[0].id, "set_goal_1");
    assert!(!missions[0].completed);
}

/// From rank 1 on, the slate is the first three non-SetGoal catalog
/// entries in catalog order — a deterministic slice, not a draw.
#[test]
fn ranked_slate_is_first_three_non_setgoal() {
    let engine = make_onboarded("missions-rank1", 100.0);

    let missions = engine.active_missions();
    let ids: Vec<&str> = missions
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(ids, vec!["deposit_10", "deposit_50", "read_tip_1"]);
}

/// One action can satisfy several missions at once, reported in catalog
/// order.
#[test]
fn one_deposit_completes_multiple_missions() {
    let mut engine = make_onboarded("missions-multi", 100.0);

    let outcome = engine.deposit(50.0).unwrap();

    assert_eq!(
        outcome.completed_missions,
        vec!["deposit_10".to_string(), "deposit_50".to_string()]
    );
}

/// min_amount gates completion, and a completed mission never fires again.
#[test]
fn min_amount_gates_completion() {
    let mut engine = make_onboarded("missions-gate", 100.0);

    let outcome = engine.deposit(10.0).unwrap();
    assert_eq!(outcome.completed_missions, vec!["deposit_10".to_string()]);

    let outcome = engine.deposit(49.0).unwrap();
    assert!(
        outcome.completed_missions.is_empty(),
        "deposit_10 already done and $49 is below deposit_50's bar"
    );

    let outcome = engine.deposit(50.0).unwrap();
    assert_eq!(outcome.completed_missions, vec!["deposit_50".to_string()]);
}

/// ReadTip sits on the slate but no engine action satisfies it.
#[test]
fn read_tip_has_no_completion_trigger() {
    let mut engine = make_onboarded("missions-readtip", 100.0);

    engine.deposit(500.0).unwrap();

    let read_tip = engine
        .active_missions()
        .into_iter()
        .find(|m| m.id == "read_tip_1")
        .expect("read_tip_1 on the slate");
    assert!(!read_tip.completed);
}

/// Completing a mission is idempotent, and ids outside the active slate
/// are refused — the completed set stays a subset of the slate.
#[test]
fn completion_is_idempotent() {
    let config = GameConfig::default_test();
    let mut board = MissionBoard::new();
    board.load_for_rank(&config.missions, 1);

    assert!(board.complete("deposit_10"), "First completion counts");
    assert!(!board.complete("deposit_10"), "Second completion is a no-op");
    assert!(
        !board.complete("set_goal_1"),
        "SetGoal is not on the ranked slate"
    );

    let done = board.check_progress(MissionAction::Deposit { amount: 100.0 });
    let ids: Vec<&str> = done.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["deposit_50"],
        "check_progress must skip already-completed missions"
    );
    assert!(
        board
            .check_progress(MissionAction::Deposit { amount: 100.0 })
            .is_empty(),
        "Re-checking the same action completes nothing new"
    );
}

/// Reloading the slate resets completion state.
#[test]
fn reload_resets_completion() {
    let config = GameConfig::default_test();
    let mut board = MissionBoard::new();
    board.load_for_rank(&config.missions, 1);
    board.complete("deposit_10");

    board.load_for_rank(&config.missions, 1);

    assert!(!board.is_completed("deposit_10"));
    assert!(board.completed_ids().is_empty());
}

/// The slate cap holds no matter how many missions the catalog carries.
#[test]
fn slate_cap_holds_with_larger_catalog() {
    let catalog: Vec<Mission> = (1..=5)
        .map(|i| deposit_mission(&format!("deposit_{i}"), f64::from(i)))
        .collect();

    let mut board = MissionBoard::new();
    board.load_for_rank(&catalog, 1);

    assert_eq!(board.active().len(), DAILY_MISSION_CAP);
    let ids: Vec<&str> = board.active().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["deposit_1", "deposit_2", "deposit_3"]);
}
