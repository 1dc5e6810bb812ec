use super::rank::Rank;
use super::stats::Stats;
use crate::core::constants::{
    DEFAULT_PLAYER_NAME, STARTING_LEVEL, STARTING_MAX_XP, STARTING_STREAK,
};
use serde::{Deserialize, Serialize};

/// The single player's progress record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub max_xp: u64,
    pub stats: Stats,
    pub rank: Rank,
    pub streak: u32,
    pub completed_quests: Vec<String>,
}

impl Default for UserRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRecord {
    /// Creates a first-run record with default values
    pub fn new() -> Self {
        Self {
            name: DEFAULT_PLAYER_NAME.to_string(),
            level: STARTING_LEVEL,
            xp: 0,
            max_xp: STARTING_MAX_XP,
            stats: Stats::new(),
            rank: Rank::for_level(STARTING_LEVEL),
            streak: STARTING_STREAK,
            completed_quests: Vec::new(),
        }
    }

    /// True while the name is still the first-run sentinel.
    pub fn has_default_name(&self) -> bool {
        self.name == DEFAULT_PLAYER_NAME
    }

    pub fn has_completed(&self, quest_id: &str) -> bool {
        self.completed_quests.iter().any(|id| id == quest_id)
    }

    /// Appends a completed quest id. Returns false if it was already recorded.
    pub fn record_completion(&mut self, quest_id: &str) -> bool {
        if self.has_completed(quest_id) {
            return false;
        }
        self.completed_quests.push(quest_id.to_string());
        true
    }

    /// A record with a zero level or zero maxXp cannot be normalized and is
    /// treated as corrupt.
    pub fn is_well_formed(&self) -> bool {
        self.level >= STARTING_LEVEL && self.max_xp > 0
    }
}
