//! Progress store for Brain Battle Academy
//!
//! Persists sessions, rewards, and streaks in a SQLite database
//! (`~/.brainbattle/academy.db`) and runs the submission flow around the
//! pure reward evaluator.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐
//! │  ProgressQuery  │     │ SessionRecorder │
//! │  (load context) │     │  (atomic write) │
//! └────────┬────────┘     └────────┬────────┘
//!          │      rewards::evaluate │
//!          └───────────┬───────────┘
//!                      ▼
//!          ~/.brainbattle/academy.db
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let store = ProgressStore::new()?;
//!
//! // Record a completed session and apply any rewards it earns
//! let outcome = store.submit_session(input, &config.rewards)?;
//!
//! // Query for a dashboard
//! let summary = store.query().progress_summary("child-1")?;
//! ```

mod db;
mod models;
mod queries;
mod recorder;

pub use db::ProgressDb;
pub use models::{ProgressSummary, SessionOutcome, SubjectStats};
pub use queries::ProgressQuery;
pub use recorder::SessionRecorder;

use anyhow::Result;
use tracing::debug;

use crate::config::RewardConfig;
use crate::domain::{SessionInput, SessionRecord};
use crate::rewards::{evaluate, week_start, EvaluationInput};

/// Central manager for progress tracking
///
/// Coordinates loading evaluator context, evaluation, and the atomic write.
/// Thread-safe through an internal mutex on the database connection; the
/// uniqueness constraint on rewards serializes grants across processes.
#[derive(Clone)]
pub struct ProgressStore {
    db: ProgressDb,
}

impl ProgressStore {
    /// Create a ProgressStore on the default database location
    pub fn new() -> Result<Self> {
        let db = ProgressDb::open_default()?;
        Ok(Self { db })
    }

    /// Create a ProgressStore with a custom database path
    pub fn with_path(path: &std::path::Path) -> Result<Self> {
        let db = ProgressDb::open(path)?;
        Ok(Self { db })
    }

    /// Get a recorder for writing sessions and decisions
    pub fn recorder(&self) -> SessionRecorder {
        SessionRecorder::new(self.db.clone())
    }

    /// Get a query interface for reading progress
    pub fn query(&self) -> ProgressQuery {
        ProgressQuery::new(self.db.clone())
    }

    /// Record a completed session: load context, evaluate, persist.
    ///
    /// This is the full submission flow. The evaluator sees the rewards
    /// already granted for the session's week and the latest streak record;
    /// its decision is applied in one transaction. Malformed sessions fail
    /// here with no state change.
    pub fn submit_session(
        &self,
        input: SessionInput,
        config: &RewardConfig,
    ) -> Result<SessionOutcome> {
        let week = week_start(input.played_on());
        let existing = self.query().rewards_for_week(&input.user_id, week)?;
        let streak = self.query().latest_streak(&input.user_id)?;

        debug!(
            user = %input.user_id,
            subject = %input.subject,
            existing_rewards = existing.len(),
            "evaluating session"
        );

        let decision = evaluate(
            &EvaluationInput {
                session: &input,
                existing_rewards: &existing,
                streak: streak.as_ref(),
            },
            config,
        )?;

        let record = SessionRecord::from_input(input);
        let granted = self.recorder().apply(&record, &decision)?;
        let summary = self.query().progress_summary(&record.user_id)?;

        Ok(SessionOutcome {
            session: record,
            granted,
            streak: decision.streak,
            summary,
        })
    }

    /// Reset all progress (delete all data)
    pub fn reset_all(&self) -> Result<()> {
        self.db.reset_all()
    }
}
