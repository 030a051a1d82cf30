//! Shared test utilities for progress store integration tests

use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

use brainbattle::store::ProgressStore;
use brainbattle::{SessionInput, Subject};

/// Creates a progress store backed by a temporary database
pub fn create_test_store() -> (TempDir, ProgressStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = ProgressStore::with_path(&temp_dir.path().join("academy.db"))
        .expect("Failed to open progress store");
    (temp_dir, store)
}

/// A completed session for `user` ending on the given date
pub fn session_on(user: &str, date: NaiveDate, total: u32, correct: u32) -> SessionInput {
    let ended = Utc.from_utc_datetime(&date.and_hms_opt(16, 0, 0).expect("valid time"));
    SessionInput {
        user_id: user.to_string(),
        subject: Subject::Maths,
        game_type: "quick-fire".to_string(),
        total_questions: total,
        correct_answers: correct,
        started_at: ended - chrono::Duration::minutes(10),
        ended_at: ended,
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
