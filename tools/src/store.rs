//! SQLite session store.
//!
//! RULE: Only store.rs talks to the database. The engine stays
//! storage-free; the runner persists the ProgressionState fields and
//! journals every engine event here.

use anyhow::Result;
use arbolito_core::{event::ProgressEvent, progression::ProgressionState, types::MissionId};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_sessions.sql"))?;
        Ok(())
    }

    // ── Session ────────────────────────────────────────────────

    pub fn insert_session(&self, session_id: &str, catalog_version: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO session (session_id, created_at, catalog_version)
             VALUES (?1, ?2, ?3)",
            params![session_id, Utc::now().to_rfc3339(), catalog_version],
        )?;
        Ok(())
    }

    pub fn save_state(
        &self,
        session_id: &str,
        state: &ProgressionState,
        completed: &[MissionId],
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO session_state
                 (session_id, current_rank, total_saved, total_points,
                  personal_goal, goal_frequency, next_rank_threshold,
                  completed_missions, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(session_id) DO UPDATE SET
                 current_rank        = excluded.current_rank,
                 total_saved         = excluded.total_saved,
                 total_points        = excluded.total_points,
                 personal_goal       = excluded.personal_goal,
                 goal_frequency      = excluded.goal_frequency,
                 next_rank_threshold = excluded.next_rank_threshold,
                 completed_missions  = excluded.completed_missions,
                 updated_at          = excluded.updated_at",
            params![
                session_id,
                state.current_rank as i64,
                state.total_saved,
                state.total_points,
                state.personal_goal,
                serde_json::to_string(&state.goal_frequency)?,
                state.next_rank_threshold,
                serde_json::to_string(completed)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Load a persisted session, or None if the id is unknown.
    pub fn load_state(
        &self,
        session_id: &str,
    ) -> Result<Option<(ProgressionState, Vec<MissionId>)>> {
        let row = self
            .conn
            .query_row(
                "SELECT current_rank, total_saved, total_points, personal_goal,
                        goal_frequency, next_rank_threshold, completed_missions
                 FROM session_state WHERE session_id = ?1",
                params![session_id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, f64>(1)?,
                        row.get::<_, f64>(2)?,
                        row.get::<_, f64>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, f64>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                },
            )
            .optional()?;

        let Some((rank, saved, points, goal, frequency, threshold, completed)) = row else {
            return Ok(None);
        };

        let state = ProgressionState {
            current_rank:        rank as usize,
            total_saved:         saved,
            total_points:        points,
            personal_goal:       goal,
            goal_frequency:      serde_json::from_str(&frequency)?,
            next_rank_threshold: threshold,
        };
        let completed: Vec<MissionId> = serde_json::from_str(&completed)?;
        Ok(Some((state, completed)))
    }

    // ── Event journal ──────────────────────────────────────────

    pub fn append_event(&self, session_id: &str, event: &ProgressEvent) -> Result<()> {
        self.conn.execute(
            "INSERT INTO event_log (session_id, event_type, payload, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                session_id,
                event.type_name(),
                serde_json::to_string(event)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn event_count(&self, session_id: &str) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE session_id = ?1",
            params![session_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
