use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::subject::Subject;

/// A completed game session as submitted by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInput {
    pub user_id: String,
    pub subject: Subject,
    /// Which game produced this session (e.g. "quick-fire", "times-tables")
    pub game_type: String,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl SessionInput {
    /// Fraction of questions answered correctly, in [0, 1].
    ///
    /// A session with no questions has accuracy 0.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.correct_answers as f64 / self.total_questions as f64
        }
    }

    /// The calendar date (UTC) this session counts towards
    pub fn played_on(&self) -> NaiveDate {
        self.ended_at.date_naive()
    }
}

/// A persisted session with its generated identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub user_id: String,
    pub subject: Subject,
    pub game_type: String,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Assign a fresh id to an incoming session
    pub fn from_input(input: SessionInput) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: input.user_id,
            subject: input.subject,
            game_type: input.game_type,
            total_questions: input.total_questions,
            correct_answers: input.correct_answers,
            started_at: input.started_at,
            ended_at: input.ended_at,
        }
    }

    pub fn played_on(&self) -> NaiveDate {
        self.ended_at.date_naive()
    }
}
