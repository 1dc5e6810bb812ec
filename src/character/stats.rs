use crate::core::constants::{BASE_STAT_VALUE, NUM_STATS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StatType {
    #[serde(rename = "STR")]
    Strength,
    #[serde(rename = "AGI")]
    Agility,
    #[serde(rename = "VIT")]
    Vitality,
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "PER")]
    Perception,
}

impl StatType {
    pub fn all() -> [StatType; NUM_STATS] {
        [
            StatType::Strength,
            StatType::Agility,
            StatType::Vitality,
            StatType::Intelligence,
            StatType::Perception,
        ]
    }

    pub fn abbrev(&self) -> &str {
        match self {
            StatType::Strength => "STR",
            StatType::Agility => "AGI",
            StatType::Vitality => "VIT",
            StatType::Intelligence => "INT",
            StatType::Perception => "PER",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StatType::Strength => "Strength",
            StatType::Agility => "Agility",
            StatType::Vitality => "Vitality",
            StatType::Intelligence => "Intelligence",
            StatType::Perception => "Perception",
        }
    }
}

/// Per-user stat values, serialized as `{"STR": 10, "AGI": 10, ...}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    #[serde(rename = "STR")]
    strength: u32,
    #[serde(rename = "AGI")]
    agility: u32,
    #[serde(rename = "VIT")]
    vitality: u32,
    #[serde(rename = "INT")]
    intelligence: u32,
    #[serde(rename = "PER")]
    perception: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            strength: BASE_STAT_VALUE,
            agility: BASE_STAT_VALUE,
            vitality: BASE_STAT_VALUE,
            intelligence: BASE_STAT_VALUE,
            perception: BASE_STAT_VALUE,
        }
    }

    fn slot_mut(&mut self, stat: StatType) -> &mut u32 {
        match stat {
            StatType::Strength => &mut self.strength,
            StatType::Agility => &mut self.agility,
            StatType::Vitality => &mut self.vitality,
            StatType::Intelligence => &mut self.intelligence,
            StatType::Perception => &mut self.perception,
        }
    }

    pub fn get(&self, stat: StatType) -> u32 {
        match stat {
            StatType::Strength => self.strength,
            StatType::Agility => self.agility,
            StatType::Vitality => self.vitality,
            StatType::Intelligence => self.intelligence,
            StatType::Perception => self.perception,
        }
    }

    pub fn set(&mut self, stat: StatType, value: u32) {
        *self.slot_mut(stat) = value;
    }

    /// Raises a stat by `amount`, saturating at `u32::MAX`.
    pub fn add(&mut self, stat: StatType, amount: u32) {
        let slot = self.slot_mut(stat);
        *slot = slot.saturating_add(amount);
    }

    pub fn total(&self) -> u32 {
        StatType::all().iter().map(|s| self.get(*s)).sum()
    }
}
