use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Why a reward was granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewardReason {
    /// Session accuracy at or above the configured threshold
    AccuracyBonus,
    /// Daily play streak reached the configured milestone
    StreakMilestone,
}

impl RewardReason {
    /// Get the identifier string used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccuracyBonus => "accuracy-bonus",
            Self::StreakMilestone => "streak-milestone",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "accuracy-bonus" => Some(Self::AccuracyBonus),
            "streak-milestone" => Some(Self::StreakMilestone),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AccuracyBonus => "Accuracy Bonus",
            Self::StreakMilestone => "Streak Milestone",
        }
    }
}

impl std::fmt::Display for RewardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reward that has been granted and persisted. Immutable once created.
///
/// At most one reward exists per (user, reason, week) - enforced by the
/// storage layer's uniqueness constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardRecord {
    pub user_id: String,
    pub reason: RewardReason,
    /// Monday of the ISO week the reward belongs to
    pub week_start: NaiveDate,
    /// Amount in minor currency units (pence)
    pub amount_minor: u64,
    pub granted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_roundtrip() {
        for reason in [RewardReason::AccuracyBonus, RewardReason::StreakMilestone] {
            assert_eq!(RewardReason::from_str(reason.as_str()), Some(reason));
        }
    }

    #[test]
    fn test_reason_rejects_unknown() {
        assert_eq!(RewardReason::from_str("participation"), None);
    }
}
