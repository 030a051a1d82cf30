//! View models produced by the progress store
//!
//! These structures summarize the data stored in and queried from the
//! progress database.

use serde::{Deserialize, Serialize};

use crate::domain::{RewardRecord, SessionRecord, StreakState, Subject};

/// Per-subject aggregate for the progress summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectStats {
    pub subject: Subject,
    pub sessions: u64,
    pub total_questions: u64,
    pub correct_answers: u64,
}

impl SubjectStats {
    /// Accuracy across all of this subject's sessions, as a percentage
    pub fn accuracy_pct(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            (self.correct_answers as f64 / self.total_questions as f64) * 100.0
        }
    }
}

/// Overall progress for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_sessions: u64,
    pub total_questions: u64,
    pub correct_answers: u64,

    // Per subject breakdown (subjects the user has played)
    pub subjects: Vec<SubjectStats>,

    // Earnings across all weeks, in pence
    pub total_earnings_minor: u64,

    pub current_streak: u32,
    pub longest_streak: u32,
}

impl ProgressSummary {
    /// Overall accuracy as a percentage
    pub fn accuracy_pct(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            (self.correct_answers as f64 / self.total_questions as f64) * 100.0
        }
    }
}

/// Everything a caller gets back from submitting a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub session: SessionRecord,
    /// Rewards actually written - duplicates removed by the storage
    /// uniqueness constraint are absent here
    pub granted: Vec<RewardRecord>,
    pub streak: StreakState,
    pub summary: ProgressSummary,
}
