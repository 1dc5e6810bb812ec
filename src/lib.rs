//! Shadow System - gamified habit and fitness tracker.
//!
//! Quests feed XP into a leveling and rank state machine owned by
//! [`ProgressionEngine`]. State is persisted through a best-effort JSON
//! store, and an AI coach offers form critique and diet plans.

pub mod character;
pub mod coach;
pub mod config;
pub mod core;
pub mod quests;
pub mod utils;

pub use crate::character::{Rank, StatType, Stats, UserRecord};
pub use crate::config::AppConfig;
pub use crate::core::engine::{ProgressionEngine, SharedEngine};
pub use crate::quests::{ProgressOutcome, Quest, QuestCompletion, QuestType};
pub use crate::utils::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
