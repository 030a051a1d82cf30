//! Init command implementation

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use brainbattle::config::Config;

/// Default configuration content for brainbattle init
pub const DEFAULT_CONFIG: &str = r#"# Brain Battle Academy configuration
# ==================================
#
# Where the progress database lives. Defaults to ~/.brainbattle
# data_dir = "/home/family/brainbattle"

# ============================================================================
# REWARDS - Tunables for the reward evaluator
# ============================================================================
#
# Amounts are minor currency units (pence). A session earns the accuracy
# bonus when it hits the threshold over at least `min_questions` questions;
# each bonus is granted at most once per child per week.

[rewards]
# Accuracy required for the weekly bonus (whole percent)
accuracy_threshold_pct = 90
# Sessions with fewer questions than this never earn the accuracy bonus
min_questions = 5
# Consecutive days of play that earn the milestone bonus
streak_milestone = 7
# Accuracy bonus: 50p
accuracy_bonus_minor = 50
# Streak milestone bonus: £1
streak_bonus_minor = 100
"#;

/// Write the default config file
pub fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path: PathBuf = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
    }

    std::fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    info!(path = %path.display(), "wrote default config");
    println!("Created: {}", path.display());

    Ok(())
}
