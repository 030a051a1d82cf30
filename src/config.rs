//! Configuration for the academy engine
//!
//! Loaded from `~/.brainbattle/config.toml` or a path given on the command
//! line. A missing file means defaults; a present file only needs the keys
//! it wants to override.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tunable constants consumed by the reward evaluator.
///
/// Amounts are minor currency units (pence) so no floating-point money ever
/// enters the decision path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Accuracy required for the weekly bonus, as a whole percentage
    pub accuracy_threshold_pct: u32,
    /// Sessions shorter than this can never earn the accuracy bonus
    pub min_questions: u32,
    /// Consecutive days of play that earn the milestone bonus
    pub streak_milestone: u32,
    /// Accuracy bonus amount in pence
    pub accuracy_bonus_minor: u64,
    /// Streak milestone bonus amount in pence
    pub streak_bonus_minor: u64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            accuracy_threshold_pct: 90,
            min_questions: 5,
            streak_milestone: 7,
            accuracy_bonus_minor: 50,
            streak_bonus_minor: 100,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the database lives; defaults to `~/.brainbattle`
    pub data_dir: Option<PathBuf>,
    pub rewards: RewardConfig,
}

impl Config {
    /// Get the global config directory path (~/.brainbattle/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".brainbattle")
    }

    /// Get the global config file path (~/.brainbattle/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults.
    ///
    /// An explicitly given path must exist; the global path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let global = Self::global_config_path();
                if global.exists() {
                    Self::from_file(&global)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Directory holding the database
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(Self::global_config_dir)
    }

    /// Path of the progress database
    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("academy.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reward_constants() {
        let cfg = RewardConfig::default();
        assert_eq!(cfg.accuracy_threshold_pct, 90);
        assert_eq!(cfg.min_questions, 5);
        assert_eq!(cfg.streak_milestone, 7);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [rewards]
            accuracy_bonus_minor = 75
            "#,
        )
        .unwrap();
        assert_eq!(cfg.rewards.accuracy_bonus_minor, 75);
        assert_eq!(cfg.rewards.accuracy_threshold_pct, 90);
        assert!(cfg.data_dir.is_none());
    }

    #[test]
    fn test_db_path_honors_data_dir() {
        let cfg: Config = toml::from_str(r#"data_dir = "/tmp/bb-test""#).unwrap();
        assert_eq!(cfg.db_path(), PathBuf::from("/tmp/bb-test/academy.db"));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/bb.toml"))).is_err());
    }
}
