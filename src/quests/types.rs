use crate::character::stats::StatType;
use crate::core::constants::{DAILY_CHECK_IN_DIVISOR, LIFESTYLE_CHECK_IN_DIVISOR};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuestType {
    #[serde(rename = "DAILY")]
    Daily,
    #[serde(rename = "LIFESTYLE")]
    Lifestyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    #[serde(rename = "type")]
    pub quest_type: QuestType,
    pub title: String,
    pub description: String,
    pub unit: String,
    pub target: f64,
    pub current: f64,
    pub completed: bool,
    pub xp_reward: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_reward: Option<StatType>,
}

/// Result of applying progress to a quest, before any completion runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressOutcome {
    /// Unknown id or already completed quest; nothing changed.
    Ignored,
    Advanced { current: f64, reached_target: bool },
}

impl ProgressOutcome {
    pub fn reached_target(&self) -> bool {
        matches!(
            self,
            ProgressOutcome::Advanced {
                reached_target: true,
                ..
            }
        )
    }
}

/// Rewards granted by a single quest completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestCompletion {
    pub quest_id: String,
    pub xp_granted: u64,
    pub stat_raised: Option<StatType>,
    pub levels_gained: u32,
}

impl Quest {
    /// Adds progress clamped to the target. Completed quests never move,
    /// and negative or non-finite amounts count as zero.
    pub fn advance(&mut self, amount: f64) -> ProgressOutcome {
        if self.completed {
            return ProgressOutcome::Ignored;
        }
        let step = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        let next = (self.current + step).min(self.target);
        self.current = next;
        ProgressOutcome::Advanced {
            current: next,
            reached_target: next >= self.target,
        }
    }

    /// Default size of one "log activity" step.
    pub fn check_in_amount(&self) -> f64 {
        match self.quest_type {
            QuestType::Daily => self.target / DAILY_CHECK_IN_DIVISOR,
            QuestType::Lifestyle => self.target / LIFESTYLE_CHECK_IN_DIVISOR,
        }
    }

    /// Progress as a percentage, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        if self.target <= 0.0 {
            return 100.0;
        }
        (self.current / self.target * 100.0).min(100.0)
    }
}
