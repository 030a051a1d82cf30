//! Reward evaluation - the decision procedure run after every completed session
//!
//! Pure functions over loaded state: the caller supplies the session, the
//! rewards already granted for the relevant week, and the prior streak
//! record, then persists whatever comes back. No I/O happens here, so the
//! evaluator is safe to call repeatedly and concurrently; only the commit
//! step needs mutual exclusion.

use chrono::NaiveDate;

use crate::config::RewardConfig;
use crate::domain::{RewardReason, RewardRecord, SessionInput, StreakState};

use super::week::week_start;

/// Malformed session data. Reported to the caller; nothing is granted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("correct answers ({correct}) exceed total questions ({total})")]
    AnswersExceedQuestions { correct: u32, total: u32 },

    #[error("session ended before it started")]
    EndsBeforeStart,

    #[error("unknown subject: {0}")]
    UnknownSubject(String),
}

/// Everything the evaluator needs to decide on one session
#[derive(Debug)]
pub struct EvaluationInput<'a> {
    pub session: &'a SessionInput,
    /// Rewards already granted to this user for the session's week
    pub existing_rewards: &'a [RewardRecord],
    /// The user's most recent streak record, if any
    pub streak: Option<&'a StreakState>,
}

/// A reward the evaluator wants granted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardGrant {
    pub reason: RewardReason,
    pub amount_minor: u64,
    /// Monday of the week the grant belongs to
    pub week_start: NaiveDate,
}

/// Outcome of evaluating one session
#[derive(Debug, Clone)]
pub struct RewardDecision {
    /// New grants, possibly empty. The storage layer has the final word on
    /// duplicates via its uniqueness constraint.
    pub new_rewards: Vec<RewardGrant>,
    /// Streak state after this session, keyed to the session's week
    pub streak: StreakState,
}

/// Decide which rewards a session earns and how the streak moves.
///
/// Returns an error for malformed input without touching any state; all
/// other conditions (no prior streak, reward already granted) are normal
/// branches.
pub fn evaluate(
    input: &EvaluationInput,
    config: &RewardConfig,
) -> Result<RewardDecision, InvalidInput> {
    let session = input.session;
    validate(session)?;

    let today = session.played_on();
    let week = week_start(today);
    let streak = next_streak(input.streak, &session.user_id, today, week);

    let mut new_rewards = Vec::new();

    if meets_accuracy_bar(session, config)
        && !has_reward(input.existing_rewards, RewardReason::AccuracyBonus, week)
    {
        new_rewards.push(RewardGrant {
            reason: RewardReason::AccuracyBonus,
            amount_minor: config.accuracy_bonus_minor,
            week_start: week,
        });
    }

    if streak.current_streak == config.streak_milestone
        && !has_reward(input.existing_rewards, RewardReason::StreakMilestone, week)
    {
        new_rewards.push(RewardGrant {
            reason: RewardReason::StreakMilestone,
            amount_minor: config.streak_bonus_minor,
            week_start: week,
        });
    }

    Ok(RewardDecision {
        new_rewards,
        streak,
    })
}

/// Sum already-persisted rewards. No dedupe needed - rewards are unique per
/// (user, reason, week) by construction.
pub fn total_earnings(rewards: &[RewardRecord]) -> u64 {
    rewards.iter().map(|r| r.amount_minor).sum()
}

fn validate(session: &SessionInput) -> Result<(), InvalidInput> {
    if session.correct_answers > session.total_questions {
        return Err(InvalidInput::AnswersExceedQuestions {
            correct: session.correct_answers,
            total: session.total_questions,
        });
    }
    if session.ended_at < session.started_at {
        return Err(InvalidInput::EndsBeforeStart);
    }
    Ok(())
}

/// Accuracy gate for the weekly bonus.
///
/// Integer arithmetic: `correct / total >= pct / 100` rearranged so no
/// floating point enters the decision. The minimum question count guards
/// against trivial one-question sessions.
fn meets_accuracy_bar(session: &SessionInput, config: &RewardConfig) -> bool {
    if session.total_questions == 0 || session.total_questions < config.min_questions {
        return false;
    }
    u64::from(session.correct_answers) * 100
        >= u64::from(session.total_questions) * u64::from(config.accuracy_threshold_pct)
}

fn has_reward(rewards: &[RewardRecord], reason: RewardReason, week: NaiveDate) -> bool {
    rewards
        .iter()
        .any(|r| r.reason == reason && r.week_start == week)
}

/// Move the streak state machine one session forward.
///
/// Keyed by calendar date, not by session: a second session the same day
/// leaves the count untouched, yesterday extends it, any larger gap resets
/// to 1. `longest_streak` only ever ratchets up.
fn next_streak(
    prior: Option<&StreakState>,
    user_id: &str,
    today: NaiveDate,
    week: NaiveDate,
) -> StreakState {
    let (current, longest) = match prior {
        Some(s) if s.played_on(today) => (s.current_streak, s.longest_streak),
        Some(s) if s.extends_on(today) => {
            let current = s.current_streak + 1;
            (current, current.max(s.longest_streak))
        }
        Some(s) => (1, s.longest_streak.max(1)),
        None => (1, 1),
    };

    StreakState {
        user_id: user_id.to_string(),
        week_start: week,
        current_streak: current,
        longest_streak: longest,
        last_played_date: Some(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Subject;
    use chrono::{TimeZone, Utc};

    fn session_on(day: NaiveDate, total: u32, correct: u32) -> SessionInput {
        let ended = Utc
            .from_utc_datetime(&day.and_hms_opt(16, 30, 0).unwrap());
        SessionInput {
            user_id: "child-1".to_string(),
            subject: Subject::Maths,
            game_type: "quick-fire".to_string(),
            total_questions: total,
            correct_answers: correct,
            started_at: ended - chrono::Duration::minutes(10),
            ended_at: ended,
        }
    }

    fn streak_on(day: NaiveDate, current: u32, longest: u32) -> StreakState {
        StreakState {
            user_id: "child-1".to_string(),
            week_start: week_start(day),
            current_streak: current,
            longest_streak: longest,
            last_played_date: Some(day),
        }
    }

    fn reward_for(reason: RewardReason, week: NaiveDate) -> RewardRecord {
        RewardRecord {
            user_id: "child-1".to_string(),
            reason,
            week_start: week,
            amount_minor: 50,
            granted_at: Utc::now(),
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn eval(
        session: &SessionInput,
        rewards: &[RewardRecord],
        streak: Option<&StreakState>,
    ) -> RewardDecision {
        evaluate(
            &EvaluationInput {
                session,
                existing_rewards: rewards,
                streak,
            },
            &RewardConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_accuracy_bonus_granted_at_threshold() {
        // 9/10 is exactly 90%
        let session = session_on(d(2024, 1, 3), 10, 9);
        let decision = eval(&session, &[], None);

        let config = RewardConfig::default();
        let grant = decision
            .new_rewards
            .iter()
            .find(|g| g.reason == RewardReason::AccuracyBonus)
            .expect("accuracy bonus expected");
        assert_eq!(grant.amount_minor, config.accuracy_bonus_minor);
        assert_eq!(grant.week_start, d(2024, 1, 1));
    }

    #[test]
    fn test_no_accuracy_bonus_below_threshold() {
        let session = session_on(d(2024, 1, 3), 10, 8);
        let decision = eval(&session, &[], None);
        assert!(decision.new_rewards.is_empty());
    }

    #[test]
    fn test_no_accuracy_bonus_for_short_sessions() {
        // Perfect score, but under the minimum question count
        let session = session_on(d(2024, 1, 3), 2, 2);
        let decision = eval(&session, &[], None);
        assert!(decision.new_rewards.is_empty());
    }

    #[test]
    fn test_no_accuracy_bonus_for_empty_sessions() {
        let session = session_on(d(2024, 1, 3), 0, 0);
        let decision = eval(&session, &[], None);
        assert!(decision.new_rewards.is_empty());
    }

    #[test]
    fn test_accuracy_bonus_once_per_week() {
        let session = session_on(d(2024, 1, 4), 10, 10);
        let existing = [reward_for(RewardReason::AccuracyBonus, d(2024, 1, 1))];
        let decision = eval(&session, &existing, None);
        assert!(decision.new_rewards.is_empty());
    }

    #[test]
    fn test_accuracy_bonus_again_in_a_new_week() {
        // Reward granted last week does not block this week
        let session = session_on(d(2024, 1, 8), 10, 10);
        let existing = [reward_for(RewardReason::AccuracyBonus, d(2024, 1, 1))];
        let decision = eval(&session, &existing, None);
        assert_eq!(decision.new_rewards.len(), 1);
        assert_eq!(decision.new_rewards[0].week_start, d(2024, 1, 8));
    }

    #[test]
    fn test_first_session_starts_streak_at_one() {
        let session = session_on(d(2024, 1, 3), 10, 5);
        let decision = eval(&session, &[], None);
        assert_eq!(decision.streak.current_streak, 1);
        assert_eq!(decision.streak.longest_streak, 1);
        assert_eq!(decision.streak.last_played_date, Some(d(2024, 1, 3)));
    }

    #[test]
    fn test_consecutive_day_extends_streak() {
        let prior = streak_on(d(2024, 1, 3), 3, 5);
        let session = session_on(d(2024, 1, 4), 10, 5);
        let decision = eval(&session, &[], Some(&prior));
        assert_eq!(decision.streak.current_streak, 4);
        assert_eq!(decision.streak.longest_streak, 5);
    }

    #[test]
    fn test_same_day_session_does_not_double_count() {
        let prior = streak_on(d(2024, 1, 3), 3, 5);
        let session = session_on(d(2024, 1, 3), 10, 5);
        let decision = eval(&session, &[], Some(&prior));
        assert_eq!(decision.streak.current_streak, 3);
    }

    #[test]
    fn test_gap_resets_streak_to_one() {
        let prior = streak_on(d(2024, 1, 2), 6, 6);
        let session = session_on(d(2024, 1, 5), 10, 5);
        let decision = eval(&session, &[], Some(&prior));
        assert_eq!(decision.streak.current_streak, 1);
        // Longest survives the reset
        assert_eq!(decision.streak.longest_streak, 6);
    }

    #[test]
    fn test_longest_streak_ratchets_up() {
        let prior = streak_on(d(2024, 1, 3), 5, 5);
        let session = session_on(d(2024, 1, 4), 10, 5);
        let decision = eval(&session, &[], Some(&prior));
        assert_eq!(decision.streak.current_streak, 6);
        assert_eq!(decision.streak.longest_streak, 6);
    }

    #[test]
    fn test_streak_milestone_granted_on_seventh_day() {
        let prior = streak_on(d(2024, 1, 6), 6, 6);
        let session = session_on(d(2024, 1, 7), 10, 5);
        let decision = eval(&session, &[], Some(&prior));

        assert_eq!(decision.streak.current_streak, 7);
        let grant = decision
            .new_rewards
            .iter()
            .find(|g| g.reason == RewardReason::StreakMilestone)
            .expect("milestone expected");
        assert_eq!(grant.week_start, d(2024, 1, 1));
    }

    #[test]
    fn test_streak_milestone_not_regranted_past_seven() {
        let prior = streak_on(d(2024, 1, 7), 7, 7);
        let session = session_on(d(2024, 1, 8), 10, 5);
        let decision = eval(&session, &[], Some(&prior));
        assert_eq!(decision.streak.current_streak, 8);
        assert!(decision
            .new_rewards
            .iter()
            .all(|g| g.reason != RewardReason::StreakMilestone));
    }

    #[test]
    fn test_streak_milestone_blocked_by_existing_weekly_reward() {
        let prior = streak_on(d(2024, 1, 3), 6, 6);
        let session = session_on(d(2024, 1, 4), 10, 5);
        let existing = [reward_for(RewardReason::StreakMilestone, d(2024, 1, 1))];
        let decision = eval(&session, &existing, Some(&prior));
        assert_eq!(decision.streak.current_streak, 7);
        assert!(decision.new_rewards.is_empty());
    }

    #[test]
    fn test_both_rewards_in_one_session() {
        // Seventh consecutive day with a 100% score
        let prior = streak_on(d(2024, 1, 5), 6, 6);
        let session = session_on(d(2024, 1, 6), 10, 10);
        let decision = eval(&session, &[], Some(&prior));
        assert_eq!(decision.new_rewards.len(), 2);
    }

    #[test]
    fn test_rejects_correct_above_total() {
        let session = session_on(d(2024, 1, 3), 5, 6);
        let err = evaluate(
            &EvaluationInput {
                session: &session,
                existing_rewards: &[],
                streak: None,
            },
            &RewardConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            InvalidInput::AnswersExceedQuestions {
                correct: 6,
                total: 5
            }
        );
    }

    #[test]
    fn test_rejects_inverted_timestamps() {
        let mut session = session_on(d(2024, 1, 3), 10, 9);
        session.ended_at = session.started_at - chrono::Duration::seconds(1);
        let err = evaluate(
            &EvaluationInput {
                session: &session,
                existing_rewards: &[],
                streak: None,
            },
            &RewardConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, InvalidInput::EndsBeforeStart);
    }

    #[test]
    fn test_zero_length_session_is_valid() {
        let mut session = session_on(d(2024, 1, 3), 10, 9);
        session.started_at = session.ended_at;
        assert!(evaluate(
            &EvaluationInput {
                session: &session,
                existing_rewards: &[],
                streak: None,
            },
            &RewardConfig::default(),
        )
        .is_ok());
    }

    #[test]
    fn test_total_earnings() {
        let rewards = [
            reward_for(RewardReason::AccuracyBonus, d(2024, 1, 1)),
            reward_for(RewardReason::StreakMilestone, d(2024, 1, 1)),
            reward_for(RewardReason::AccuracyBonus, d(2024, 1, 8)),
        ];
        assert_eq!(total_earnings(&rewards), 150);
        assert_eq!(total_earnings(&[]), 0);
    }

    #[test]
    fn test_sunday_session_lands_in_preceding_week() {
        // 2024-01-07 is a Sunday
        let session = session_on(d(2024, 1, 7), 10, 10);
        let decision = eval(&session, &[], None);
        assert_eq!(decision.new_rewards[0].week_start, d(2024, 1, 1));
        assert_eq!(decision.streak.week_start, d(2024, 1, 1));
    }
}
