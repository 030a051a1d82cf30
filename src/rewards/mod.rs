//! Reward engine: accuracy bonuses, daily streaks, and milestone bonuses
//!
//! This module is the decision layer of the academy. It is deliberately
//! pure - callers load the historical context, hand it over, and persist
//! the returned decision themselves (see `store`).

mod evaluator;
mod week;

pub use evaluator::{
    evaluate, total_earnings, EvaluationInput, InvalidInput, RewardDecision, RewardGrant,
};
pub use week::{day_key, parse_day_key, week_start};
