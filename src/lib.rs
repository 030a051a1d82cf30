//! Brain Battle Academy - reward and streak engine
//!
//! The academy rewards children for completed quiz sessions: a weekly
//! accuracy bonus for high-scoring sessions, a daily play streak, and a
//! milestone bonus when the streak reaches a full week. This crate is the
//! decision and bookkeeping engine behind those rules.
//!
//! ## Layers
//!
//! 1. **Evaluator** (`rewards`): pure functions that take one session plus
//!    its historical context and return the rewards earned and the updated
//!    streak. No I/O.
//!
//! 2. **Store** (`store`): SQLite persistence that loads the evaluator's
//!    context, applies its decision in one transaction, and answers
//!    progress queries. A uniqueness constraint on (user, reason, week)
//!    makes reward grants replay-safe.

pub mod config;
pub mod domain;
pub mod rewards;
pub mod store;

pub use domain::*;
