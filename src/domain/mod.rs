//! Core domain types for Brain Battle Academy
//!
//! Plain data records that cross the evaluator, storage, and CLI boundaries.

mod reward;
mod session;
mod streak;
mod subject;

pub use reward::{RewardReason, RewardRecord};
pub use session::{SessionInput, SessionRecord};
pub use streak::StreakState;
pub use subject::Subject;
