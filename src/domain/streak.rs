use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily play streak state for one user
///
/// One logical record exists per user per ISO week (Monday start). Historical
/// weeks are kept as an append-only record; `longest_streak` never decreases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakState {
    pub user_id: String,
    /// Monday of the ISO week this record belongs to
    pub week_start: NaiveDate,
    /// Consecutive calendar days with at least one completed session
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_played_date: Option<NaiveDate>,
}

impl StreakState {
    /// Whether the streak already counts the given day
    pub fn played_on(&self, day: NaiveDate) -> bool {
        self.last_played_date == Some(day)
    }

    /// Whether the streak survives to the given day (last play today or yesterday)
    pub fn active_on(&self, today: NaiveDate) -> bool {
        let Some(last) = self.last_played_date else {
            return false;
        };
        (today - last).num_days() <= 1
    }

    /// Whether a session on `today` extends the streak rather than resetting it
    pub fn extends_on(&self, today: NaiveDate) -> bool {
        let Some(last) = self.last_played_date else {
            return false;
        };
        (today - last).num_days() == 1
    }
}
