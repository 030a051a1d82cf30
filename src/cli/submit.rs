//! Submit command implementation

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};

use brainbattle::config::Config;
use brainbattle::rewards::InvalidInput;
use brainbattle::store::ProgressStore;
use brainbattle::{SessionInput, Subject};

use super::format_pence;

/// Arguments for one completed session
pub struct SubmitArgs {
    pub user: String,
    pub subject: String,
    pub game: String,
    pub total: u32,
    pub correct: u32,
    /// RFC 3339 end time; defaults to now
    pub ended: Option<String>,
    pub duration_secs: u64,
    /// Print the full outcome as JSON instead of text
    pub json: bool,
}

/// Record a completed session and print what it earned
pub fn submit_command(config: &Config, args: SubmitArgs) -> Result<()> {
    let Some(subject) = Subject::from_str(&args.subject) else {
        bail!(InvalidInput::UnknownSubject(args.subject));
    };

    let ended_at = match &args.ended {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid end time: {raw}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    let started_at = ended_at - Duration::seconds(args.duration_secs as i64);

    let input = SessionInput {
        user_id: args.user,
        subject,
        game_type: args.game,
        total_questions: args.total,
        correct_answers: args.correct,
        started_at,
        ended_at,
    };
    let accuracy = input.accuracy();

    let store = ProgressStore::with_path(&config.db_path())?;
    let outcome = store.submit_session(input, &config.rewards)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "Session recorded for {} ({}, {}/{} correct, {:.0}%)",
        outcome.session.user_id,
        outcome.session.subject,
        outcome.session.correct_answers,
        outcome.session.total_questions,
        accuracy * 100.0,
    );

    if outcome.granted.is_empty() {
        println!("No new rewards this session.");
    } else {
        println!("\nRewards earned:");
        for reward in &outcome.granted {
            println!(
                "  + {} {} (week of {})",
                format_pence(reward.amount_minor),
                reward.reason.label(),
                reward.week_start,
            );
        }
    }

    println!(
        "\nStreak: {} day(s) (best {})",
        outcome.streak.current_streak, outcome.streak.longest_streak
    );
    println!(
        "Total earned: {}",
        format_pence(outcome.summary.total_earnings_minor)
    );

    Ok(())
}
