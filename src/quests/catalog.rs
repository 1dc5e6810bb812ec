//! Seed quest list used when no saved quests exist.

use super::types::{Quest, QuestType};
use crate::character::stats::StatType;

struct QuestSeed {
    id: &'static str,
    quest_type: QuestType,
    title: &'static str,
    description: &'static str,
    unit: &'static str,
    target: f64,
    xp_reward: u64,
    stat_reward: Option<StatType>,
}

const QUEST_SEEDS: &[QuestSeed] = &[
    QuestSeed {
        id: "daily-pushups",
        quest_type: QuestType::Daily,
        title: "Push-ups",
        description: "Complete 100 push-ups. Break them into sets if needed.",
        unit: "reps",
        target: 100.0,
        xp_reward: 40,
        stat_reward: Some(StatType::Strength),
    },
    QuestSeed {
        id: "daily-situps",
        quest_type: QuestType::Daily,
        title: "Sit-ups",
        description: "Complete 100 sit-ups.",
        unit: "reps",
        target: 100.0,
        xp_reward: 40,
        stat_reward: Some(StatType::Vitality),
    },
    QuestSeed {
        id: "daily-squats",
        quest_type: QuestType::Daily,
        title: "Squats",
        description: "Complete 100 bodyweight squats.",
        unit: "reps",
        target: 100.0,
        xp_reward: 40,
        stat_reward: Some(StatType::Strength),
    },
    QuestSeed {
        id: "daily-run",
        quest_type: QuestType::Daily,
        title: "Running",
        description: "Run 10 kilometers at any pace.",
        unit: "km",
        target: 10.0,
        xp_reward: 60,
        stat_reward: Some(StatType::Agility),
    },
    QuestSeed {
        id: "habit-water",
        quest_type: QuestType::Lifestyle,
        title: "Hydration",
        description: "Drink 8 glasses of water.",
        unit: "glasses",
        target: 8.0,
        xp_reward: 15,
        stat_reward: Some(StatType::Vitality),
    },
    QuestSeed {
        id: "habit-sleep",
        quest_type: QuestType::Lifestyle,
        title: "Deep Sleep",
        description: "Sleep at least 8 hours.",
        unit: "hours",
        target: 8.0,
        xp_reward: 15,
        stat_reward: None,
    },
    QuestSeed {
        id: "habit-reading",
        quest_type: QuestType::Lifestyle,
        title: "Reading",
        description: "Read for 30 minutes.",
        unit: "min",
        target: 30.0,
        xp_reward: 20,
        stat_reward: Some(StatType::Intelligence),
    },
    QuestSeed {
        id: "habit-meditation",
        quest_type: QuestType::Lifestyle,
        title: "Meditation",
        description: "Meditate for 10 minutes.",
        unit: "min",
        target: 10.0,
        xp_reward: 20,
        stat_reward: Some(StatType::Perception),
    },
];

/// Returns a fresh copy of the seed quest list, all at zero progress.
pub fn initial_quests() -> Vec<Quest> {
    QUEST_SEEDS
        .iter()
        .map(|seed| Quest {
            id: seed.id.to_string(),
            quest_type: seed.quest_type,
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            unit: seed.unit.to_string(),
            target: seed.target,
            current: 0.0,
            completed: false,
            xp_reward: seed.xp_reward,
            stat_reward: seed.stat_reward,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_unique() {
        let quests = initial_quests();
        let ids: HashSet<&str> = quests.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), quests.len());
    }

    #[test]
    fn test_catalog_starts_fresh() {
        for quest in initial_quests() {
            assert!(quest.target > 0.0, "{} has no target", quest.id);
            assert_eq!(quest.current, 0.0);
            assert!(!quest.completed);
        }
    }

    #[test]
    fn test_catalog_has_both_groups() {
        let quests = initial_quests();
        assert!(quests.iter().any(|q| q.quest_type == QuestType::Daily));
        assert!(quests.iter().any(|q| q.quest_type == QuestType::Lifestyle));
    }
}
