//! Write path for the progress store
//!
//! Applies a session plus its reward decision in a single transaction so a
//! crash or concurrent submission can never leave a session without its
//! streak update, or a reward without its session.

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

use crate::domain::{RewardRecord, SessionRecord};
use crate::rewards::{day_key, week_start, RewardDecision};

use super::db::ProgressDb;

/// Records sessions and their evaluated decisions
#[derive(Clone)]
pub struct SessionRecorder {
    db: ProgressDb,
}

impl SessionRecorder {
    pub fn new(db: ProgressDb) -> Self {
        Self { db }
    }

    /// Persist a session and apply its reward decision atomically.
    ///
    /// Returns the rewards actually written. A grant the uniqueness
    /// constraint rejects (already granted for that user/reason/week, e.g.
    /// by a concurrent submission) is silently dropped from the result.
    pub fn apply(
        &self,
        record: &SessionRecord,
        decision: &RewardDecision,
    ) -> Result<Vec<RewardRecord>> {
        let played = record.played_on();
        let day = day_key(played);
        let week = day_key(week_start(played));
        let now = Utc::now();

        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        tx.execute(
            r#"INSERT OR REPLACE INTO sessions
               (id, user_id, subject, game_type, total_questions, correct_answers,
                started_at, ended_at, day_bucket, week_start)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
            rusqlite::params![
                record.id,
                record.user_id,
                record.subject.as_str(),
                record.game_type,
                record.total_questions,
                record.correct_answers,
                record.started_at.timestamp_millis(),
                record.ended_at.timestamp_millis(),
                day,
                week,
            ],
        )?;

        let mut granted = Vec::new();
        for grant in &decision.new_rewards {
            let inserted = tx.execute(
                r#"INSERT OR IGNORE INTO rewards (user_id, reason, week_start, amount_minor, granted_at)
                   VALUES (?1, ?2, ?3, ?4, ?5)"#,
                rusqlite::params![
                    record.user_id,
                    grant.reason.as_str(),
                    day_key(grant.week_start),
                    grant.amount_minor,
                    now.timestamp_millis(),
                ],
            )?;

            if inserted == 1 {
                info!(
                    user = %record.user_id,
                    reason = %grant.reason,
                    amount_minor = grant.amount_minor,
                    "reward granted"
                );
                granted.push(RewardRecord {
                    user_id: record.user_id.clone(),
                    reason: grant.reason,
                    week_start: grant.week_start,
                    amount_minor: grant.amount_minor,
                    granted_at: now,
                });
            } else {
                debug!(
                    user = %record.user_id,
                    reason = %grant.reason,
                    "duplicate grant ignored"
                );
            }
        }

        let streak = &decision.streak;
        tx.execute(
            r#"INSERT INTO streaks (user_id, week_start, current_streak, longest_streak, last_played_day, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)
               ON CONFLICT(user_id, week_start) DO UPDATE SET
                   current_streak = ?3, longest_streak = ?4, last_played_day = ?5, updated_at = ?6"#,
            rusqlite::params![
                streak.user_id,
                day_key(streak.week_start),
                streak.current_streak,
                streak.longest_streak,
                streak.last_played_date.map(day_key),
                now.timestamp_millis(),
            ],
        )?;

        tx.commit()?;
        Ok(granted)
    }
}
