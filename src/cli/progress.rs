//! Progress command implementation

use anyhow::Result;

use brainbattle::config::Config;
use brainbattle::store::ProgressStore;

use super::format_pence;

/// Show a user's progress summary
pub fn progress_command(config: &Config, user: &str) -> Result<()> {
    let store = ProgressStore::with_path(&config.db_path())?;
    let summary = store.query().progress_summary(user)?;

    if summary.total_sessions == 0 {
        println!("No sessions recorded for {user} yet.");
        return Ok(());
    }

    println!("Progress for {user}:\n");
    println!(
        "  Sessions:  {} ({} questions, {:.0}% accuracy)",
        summary.total_sessions,
        summary.total_questions,
        summary.accuracy_pct(),
    );

    for stats in &summary.subjects {
        println!(
            "    {:22} {} session(s), {:.0}% accuracy",
            stats.subject.label(),
            stats.sessions,
            stats.accuracy_pct(),
        );
    }

    println!(
        "  Streak:    {} day(s) (best {})",
        summary.current_streak, summary.longest_streak
    );
    println!("  Earned:    {}", format_pence(summary.total_earnings_minor));

    Ok(())
}
