//! Core progression rules and the engine that owns player state.

pub mod constants;
pub mod engine;
pub mod game_logic;

pub use constants::*;
pub use engine::*;
pub use game_logic::*;
