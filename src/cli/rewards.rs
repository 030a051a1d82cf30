//! Rewards command implementation

use anyhow::{bail, Result};

use brainbattle::config::Config;
use brainbattle::rewards::{parse_day_key, total_earnings, week_start};
use brainbattle::store::ProgressStore;

use super::format_pence;

/// List a user's rewards, optionally restricted to one week
pub fn rewards_command(config: &Config, user: &str, week: Option<String>) -> Result<()> {
    let store = ProgressStore::with_path(&config.db_path())?;

    let rewards = match week {
        Some(raw) => {
            let Some(day) = parse_day_key(&raw) else {
                bail!("Invalid week date: {raw} (expected YYYY-MM-DD)");
            };
            store.query().rewards_for_week(user, week_start(day))?
        }
        None => store.query().rewards_for_user(user)?,
    };

    if rewards.is_empty() {
        println!("No rewards for {user}.");
        return Ok(());
    }

    println!("Rewards for {user} ({}):\n", rewards.len());
    for reward in &rewards {
        println!(
            "  {} {:18} week of {}",
            format_pence(reward.amount_minor),
            reward.reason.label(),
            reward.week_start,
        );
    }
    println!("\nTotal: {}", format_pence(total_earnings(&rewards)));

    Ok(())
}
