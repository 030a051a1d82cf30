//! SQLite database connection and schema management for progress tracking
//!
//! Manages the `~/.brainbattle/academy.db` database with automatic schema
//! migration. Reward grants are protected by a uniqueness constraint on
//! (user_id, reason, week_start) so a concurrent duplicate grant attempt
//! becomes a no-op instead of a double reward.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::config::Config;

/// Database wrapper shared by the recorder and query interfaces
#[derive(Clone)]
pub struct ProgressDb {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl ProgressDb {
    /// Open or create the database at the default location (~/.brainbattle/academy.db)
    pub fn open_default() -> Result<Self> {
        let db_path = Config::global_config_dir().join("academy.db");
        Self::open(&db_path)
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open progress db: {}", path.display()))?;

        // WAL so session submissions from several devices can interleave
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get a reference to the connection
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Progress DB lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()?;
        Ok(())
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn();

        let version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |r| r.get(0),
            )
            .unwrap_or(0);

        // Migration 2: composite index for per-user day lookups
        if version < 2 {
            conn.execute_batch(
                r#"
                CREATE INDEX IF NOT EXISTS idx_session_user_day ON sessions(user_id, day_bucket);
                "#,
            )?;
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
        }

        Ok(())
    }

    /// Delete all progress data (sessions, rewards, streaks)
    pub fn reset_all(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(
            r#"
            DELETE FROM sessions;
            DELETE FROM rewards;
            DELETE FROM streaks;
            "#,
        )?;
        Ok(())
    }
}

/// SQL schema for the progress database
const SCHEMA_SQL: &str = r#"
-- Completed game sessions (one row per session)
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    subject TEXT NOT NULL,
    game_type TEXT NOT NULL,
    total_questions INTEGER NOT NULL DEFAULT 0,
    correct_answers INTEGER NOT NULL DEFAULT 0,
    started_at INTEGER NOT NULL,
    ended_at INTEGER NOT NULL,
    day_bucket TEXT NOT NULL,
    week_start TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_session_user ON sessions(user_id);
CREATE INDEX IF NOT EXISTS idx_session_day ON sessions(day_bucket);
CREATE INDEX IF NOT EXISTS idx_session_week ON sessions(user_id, week_start);

-- Granted rewards. The UNIQUE constraint is what makes reward creation
-- replay-safe: INSERT OR IGNORE turns a duplicate grant into a no-op.
CREATE TABLE IF NOT EXISTS rewards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    reason TEXT NOT NULL,
    week_start TEXT NOT NULL,
    amount_minor INTEGER NOT NULL,
    granted_at INTEGER NOT NULL,
    UNIQUE(user_id, reason, week_start)
);
CREATE INDEX IF NOT EXISTS idx_reward_user ON rewards(user_id);

-- Streak state, one row per user per ISO week. Historical weeks are never
-- deleted.
CREATE TABLE IF NOT EXISTS streaks (
    user_id TEXT NOT NULL,
    week_start TEXT NOT NULL,
    current_streak INTEGER NOT NULL DEFAULT 0,
    longest_streak INTEGER NOT NULL DEFAULT 0,
    last_played_day TEXT,
    updated_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, week_start)
);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);
"#;
