//! arbolito-runner: headless driver for the Arbolito progression engine.
//!
//! Runs the engine the way the browser shell would, over JSON lines:
//!   arbolito-runner --data-dir ./data --db sessions.db --ipc-mode
//!   arbolito-runner --db sessions.db --session <id> --ipc-mode
//!   arbolito-runner --script actions.jsonl

mod store;

use anyhow::Result;
use arbolito_core::{
    config::GameConfig,
    display::DisplayState,
    engine::{ActionOutcome, SavingsEngine},
    event::ProgressEvent,
    progression::GoalFrequency,
};
use std::env;
use std::io::{self, BufRead, Write};
use store::SessionStore;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RunnerCommand {
    GetState,
    GetMissions,
    SetGoal { amount: f64, frequency: GoalFrequency },
    Deposit { amount: f64 },
    Quit,
}

#[derive(serde::Serialize)]
struct RunnerReply {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    state: DisplayState,
    events: Vec<ProgressEvent>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = str_arg(&args, "--db").unwrap_or(":memory:");
    let data_dir = str_arg(&args, "--data-dir").unwrap_or("./data");
    let session_arg = str_arg(&args, "--session");
    let script = str_arg(&args, "--script");
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let config = GameConfig::load(data_dir)?;

    let store = if db == ":memory:" {
        SessionStore::in_memory()?
    } else {
        SessionStore::open(db)?
    };
    store.migrate()?;

    let mut engine = match session_arg {
        Some(id) => {
            let (state, completed) = store
                .load_state(id)?
                .ok_or_else(|| anyhow::anyhow!("Unknown session: {id}"))?;
            log::info!("resuming session {id} at rank {}", state.current_rank);
            SavingsEngine::restore(id.to_string(), config, state, &completed)
        }
        None => {
            let id = uuid::Uuid::new_v4().to_string();
            store.insert_session(&id, env!("CARGO_PKG_VERSION"))?;
            log::info!("new session {id}");
            SavingsEngine::new(id, config)
        }
    };

    if ipc_mode {
        run_ipc_loop(&mut engine, &store)?;
    } else if let Some(path) = script {
        run_script(&mut engine, &store, path)?;
    }

    print_summary(&engine, &store)?;
    Ok(())
}

/// JSON-lines command loop on stdin/stdout. One reply per line; malformed
/// input gets an error object instead of killing the session.
fn run_ipc_loop(engine: &mut SavingsEngine, store: &SessionStore) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: RunnerCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "ok": false, "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            RunnerCommand::Quit => break,
            RunnerCommand::GetMissions => {
                let reply = serde_json::json!({
                    "ok": true,
                    "missions": engine.active_missions(),
                });
                writeln!(stdout, "{reply}")?;
            }
            cmd => {
                let reply = apply_command(engine, store, cmd)?;
                writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
            }
        }
        stdout.flush()?;
    }

    Ok(())
}

/// Replay a recorded action file, one JSON command per line.
fn run_script(engine: &mut SavingsEngine, store: &SessionStore, path: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;

    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cmd: RunnerCommand = serde_json::from_str(line)
            .map_err(|e| anyhow::anyhow!("{path}:{}: {e}", lineno + 1))?;
        match cmd {
            RunnerCommand::Quit => break,
            RunnerCommand::GetState | RunnerCommand::GetMissions => {}
            cmd => {
                let reply = apply_command(engine, store, cmd)?;
                if !reply.ok {
                    log::warn!(
                        "{path}:{}: action rejected: {}",
                        lineno + 1,
                        reply.error.as_deref().unwrap_or("unknown")
                    );
                }
            }
        }
    }

    Ok(())
}

fn apply_command(
    engine: &mut SavingsEngine,
    store: &SessionStore,
    cmd: RunnerCommand,
) -> Result<RunnerReply> {
    let outcome = match cmd {
        RunnerCommand::SetGoal { amount, frequency } => engine.set_goal(amount, frequency),
        RunnerCommand::Deposit { amount } => engine.deposit(amount),
        RunnerCommand::GetState => Ok(ActionOutcome::default()),
        RunnerCommand::GetMissions | RunnerCommand::Quit => unreachable!(),
    };

    match outcome {
        Ok(outcome) => {
            if !outcome.events.is_empty() {
                persist_outcome(engine, store, &outcome.events)?;
            }
            Ok(RunnerReply {
                ok: true,
                error: None,
                state: engine.display_state()?,
                events: outcome.events,
            })
        }
        // Validation errors are recoverable: state is untouched and the
        // caller may resubmit.
        Err(e) => Ok(RunnerReply {
            ok: false,
            error: Some(e.to_string()),
            state: engine.display_state()?,
            events: Vec::new(),
        }),
    }
}

fn persist_outcome(
    engine: &SavingsEngine,
    store: &SessionStore,
    events: &[ProgressEvent],
) -> Result<()> {
    for event in events {
        store.append_event(engine.session_id(), event)?;
    }
    store.save_state(
        engine.session_id(),
        engine.state(),
        &engine.completed_mission_ids(),
    )?;
    Ok(())
}

fn print_summary(engine: &SavingsEngine, store: &SessionStore) -> Result<()> {
    let state = engine.display_state()?;
    let completed = state.missions.iter().filter(|m| m.completed).count();

    println!("Arbolito — session summary");
    println!("  session:   {}", engine.session_id());
    println!("  rank:      {} ({})", state.rank, state.rank_name);
    println!("  saved:     ${:.2}", state.saved_amount);
    println!("  goal:      ${:.2}", state.displayed_goal);
    println!("  remaining: ${:.2}", state.remaining_amount);
    println!("  progress:  {:.1}%", state.progress_percent);
    println!("  points:    {}", state.points);
    println!("  missions:  {completed}/{} completed", state.missions.len());
    println!("  journal:   {} events", store.event_count(engine.session_id())?);

    Ok(())
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
