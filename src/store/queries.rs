//! Query functions for reading progress data
//!
//! Read-only interface used by the submission flow (loading evaluator
//! context) and by the progress/rewards CLI views.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{RewardReason, RewardRecord, SessionRecord, StreakState, Subject};
use crate::rewards::{day_key, parse_day_key, total_earnings};

use super::db::ProgressDb;
use super::models::{ProgressSummary, SubjectStats};

/// Query interface for progress data
pub struct ProgressQuery {
    db: ProgressDb,
}

impl ProgressQuery {
    pub fn new(db: ProgressDb) -> Self {
        Self { db }
    }

    /// Rewards granted to a user for one week
    pub fn rewards_for_week(&self, user: &str, week: NaiveDate) -> Result<Vec<RewardRecord>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT reason, week_start, amount_minor, granted_at FROM rewards
             WHERE user_id = ?1 AND week_start = ?2",
        )?;
        let rows: Vec<(String, String, u64, i64)> = stmt
            .query_map(rusqlite::params![user, day_key(week)], |r| {
                Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(build_rewards(user, rows))
    }

    /// All rewards ever granted to a user, newest week first
    pub fn rewards_for_user(&self, user: &str) -> Result<Vec<RewardRecord>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT reason, week_start, amount_minor, granted_at FROM rewards
             WHERE user_id = ?1 ORDER BY week_start DESC, reason",
        )?;
        let rows: Vec<(String, String, u64, i64)> = stmt
            .query_map([user], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(build_rewards(user, rows))
    }

    /// The most recent streak record for a user, if any
    pub fn latest_streak(&self, user: &str) -> Result<Option<StreakState>> {
        let conn = self.db.conn();
        // week_start keys sort lexically in date order
        let row = conn.query_row(
            "SELECT week_start, current_streak, longest_streak, last_played_day FROM streaks
             WHERE user_id = ?1 ORDER BY week_start DESC LIMIT 1",
            [user],
            |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, u32>(1)?,
                    r.get::<_, u32>(2)?,
                    r.get::<_, Option<String>>(3)?,
                ))
            },
        );

        let Ok((week, current, longest, last)) = row else {
            return Ok(None);
        };
        Ok(parse_day_key(&week).map(|week_start| StreakState {
            user_id: user.to_string(),
            week_start,
            current_streak: current,
            longest_streak: longest,
            last_played_date: last.as_deref().and_then(parse_day_key),
        }))
    }

    /// A user's most recent sessions, newest first
    pub fn recent_sessions(&self, user: &str, limit: u32) -> Result<Vec<SessionRecord>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, subject, game_type, total_questions, correct_answers, started_at, ended_at
             FROM sessions WHERE user_id = ?1 ORDER BY ended_at DESC LIMIT ?2",
        )?;
        let rows: Vec<(String, String, String, u32, u32, i64, i64)> = stmt
            .query_map(rusqlite::params![user, limit], |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                ))
            })?
            .filter_map(|r| r.ok())
            .collect();

        let sessions = rows
            .into_iter()
            .filter_map(|(id, subject, game_type, total, correct, started, ended)| {
                Some(SessionRecord {
                    id,
                    user_id: user.to_string(),
                    subject: Subject::from_str(&subject)?,
                    game_type,
                    total_questions: total,
                    correct_answers: correct,
                    started_at: from_ms(started),
                    ended_at: from_ms(ended),
                })
            })
            .collect();
        Ok(sessions)
    }

    /// Get a complete progress summary for a user
    pub fn progress_summary(&self, user: &str) -> Result<ProgressSummary> {
        let rewards = self.rewards_for_user(user)?;
        let streak = self.latest_streak(user)?;

        let conn = self.db.conn();
        let (total_sessions, total_questions, correct_answers) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(total_questions), 0), COALESCE(SUM(correct_answers), 0)
             FROM sessions WHERE user_id = ?1",
            [user],
            |r| Ok((r.get::<_, u64>(0)?, r.get::<_, u64>(1)?, r.get::<_, u64>(2)?)),
        )?;

        let mut stmt = conn.prepare(
            "SELECT subject, COUNT(*), COALESCE(SUM(total_questions), 0), COALESCE(SUM(correct_answers), 0)
             FROM sessions WHERE user_id = ?1 GROUP BY subject ORDER BY COUNT(*) DESC",
        )?;
        let subjects: Vec<SubjectStats> = stmt
            .query_map([user], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, u64>(1)?,
                    r.get::<_, u64>(2)?,
                    r.get::<_, u64>(3)?,
                ))
            })?
            .filter_map(|r| r.ok())
            .filter_map(|(subject, sessions, questions, correct)| {
                Some(SubjectStats {
                    subject: Subject::from_str(&subject)?,
                    sessions,
                    total_questions: questions,
                    correct_answers: correct,
                })
            })
            .collect();

        Ok(ProgressSummary {
            total_sessions,
            total_questions,
            correct_answers,
            subjects,
            total_earnings_minor: total_earnings(&rewards),
            current_streak: streak.as_ref().map(|s| s.current_streak).unwrap_or(0),
            longest_streak: streak.as_ref().map(|s| s.longest_streak).unwrap_or(0),
        })
    }
}

fn build_rewards(user: &str, rows: Vec<(String, String, u64, i64)>) -> Vec<RewardRecord> {
    rows.into_iter()
        .filter_map(|(reason, week, amount, granted)| {
            Some(RewardRecord {
                user_id: user.to_string(),
                reason: RewardReason::from_str(&reason)?,
                week_start: parse_day_key(&week)?,
                amount_minor: amount,
                granted_at: from_ms(granted),
            })
        })
        .collect()
}

fn from_ms(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_else(Utc::now)
}
