//! Quest definitions and the seed catalog.

pub mod catalog;
pub mod types;

pub use catalog::initial_quests;
pub use types::*;
