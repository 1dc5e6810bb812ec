//! Rank tiers derived from character level.

use crate::core::constants::{
    RANK_A_ABOVE_LEVEL, RANK_B_ABOVE_LEVEL, RANK_C_ABOVE_LEVEL, RANK_D_ABOVE_LEVEL,
    RANK_S_ABOVE_LEVEL,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hunter rank, ordered from lowest (E) to highest (S).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl Rank {
    /// Returns the rank for a level. Each bound is exclusive: level 10 is
    /// still E, level 11 is D.
    pub fn for_level(level: u32) -> Self {
        match level {
            l if l > RANK_S_ABOVE_LEVEL => Rank::S,
            l if l > RANK_A_ABOVE_LEVEL => Rank::A,
            l if l > RANK_B_ABOVE_LEVEL => Rank::B,
            l if l > RANK_C_ABOVE_LEVEL => Rank::C,
            l if l > RANK_D_ABOVE_LEVEL => Rank::D,
            _ => Rank::E,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Rank::E => "E",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
        };
        write!(f, "{}-Rank", letter)
    }
}
