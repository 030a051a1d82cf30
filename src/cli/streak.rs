//! Streak command implementation

use anyhow::Result;
use chrono::Utc;

use brainbattle::config::Config;
use brainbattle::store::ProgressStore;

/// Show a user's daily play streak
pub fn streak_command(config: &Config, user: &str) -> Result<()> {
    let store = ProgressStore::with_path(&config.db_path())?;

    let Some(streak) = store.query().latest_streak(user)? else {
        println!("No streak yet for {user} - play a game to start one!");
        return Ok(());
    };

    let today = Utc::now().date_naive();
    if streak.active_on(today) {
        println!("{user} is on a {} day streak (best {}).", streak.current_streak, streak.longest_streak);
        if !streak.played_on(today) {
            println!("Play today to keep it going.");
        }
    } else {
        println!(
            "{user}'s streak of {} ended (best {}). Play today to start a new one.",
            streak.current_streak, streak.longest_streak
        );
    }

    if let Some(last) = streak.last_played_date {
        println!("Last played: {last}");
    }

    Ok(())
}
