//! The progression engine: owns the player record and quest list, applies
//! the XP, level and rank rules, and writes snapshots through the
//! persistence gateway.
//!
//! Every mutating operation finishes with explicit post-conditions in a
//! fixed order: level normalization first, then persistence of whatever
//! changed. Snapshots are only written while a session is logged in; the
//! login flag itself is always written when it changes.

use super::constants::{FALLBACK_LOGIN_NAME, QUEST_STAT_REWARD, TRAINING_SESSION_XP};
use super::game_logic::{apply_xp, normalize_level};
use crate::character::rank::Rank;
use crate::character::stats::StatType;
use crate::character::user::UserRecord;
use crate::quests::{initial_quests, ProgressOutcome, Quest, QuestCompletion, QuestType};
use crate::utils::persistence::{KeyValueStore, PersistenceGateway, StorageKey};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Engine behind a single lock, for callers that share it across threads.
pub type SharedEngine<S> = Arc<Mutex<ProgressionEngine<S>>>;

pub struct ProgressionEngine<S: KeyValueStore> {
    user: UserRecord,
    quests: Vec<Quest>,
    authenticated: bool,
    persistence: PersistenceGateway<S>,
}

impl<S: KeyValueStore> ProgressionEngine<S> {
    /// Rehydrates the engine from `store`, falling back to defaults for any
    /// record that is missing or malformed.
    pub fn load(store: S) -> Self {
        let persistence = PersistenceGateway::new(store);
        let authenticated = persistence.get_flag(StorageKey::Auth);

        let user = persistence
            .load::<UserRecord>(StorageKey::User)
            .and_then(rehydrate_user)
            .unwrap_or_default();
        let quests = persistence
            .load::<Vec<Quest>>(StorageKey::Quests)
            .and_then(rehydrate_quests)
            .unwrap_or_else(initial_quests);

        let mut engine = Self {
            user,
            quests,
            authenticated,
            persistence,
        };
        engine.settle_pending_completions();

        debug!(
            level = engine.user.level,
            authenticated = engine.authenticated,
            "progression state loaded"
        );
        engine
    }

    pub fn into_shared(self) -> SharedEngine<S> {
        Arc::new(Mutex::new(self))
    }

    // === Read access ===

    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn quest(&self, quest_id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == quest_id)
    }

    pub fn daily_quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests
            .iter()
            .filter(|q| q.quest_type == QuestType::Daily)
    }

    pub fn lifestyle_quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests
            .iter()
            .filter(|q| q.quest_type == QuestType::Lifestyle)
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Progress through the current level as a percentage (0-100).
    pub fn xp_progress_percent(&self) -> f64 {
        if self.user.max_xp == 0 {
            return 0.0;
        }
        (self.user.xp as f64 / self.user.max_xp as f64 * 100.0).min(100.0)
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    // === Identity ===

    /// Logs in. The name is only taken on first login, while the record
    /// still carries the default name.
    pub fn login(&mut self, candidate_name: &str) {
        let renamed = self.user.has_default_name() && !candidate_name.is_empty();
        if renamed {
            self.user.name = candidate_name.to_string();
        }

        let newly_authenticated = !self.authenticated;
        self.set_authenticated(true);

        info!(name = %self.user.name, renamed, "player logged in");

        // Logging in makes the whole pre-login state durable.
        if newly_authenticated {
            self.commit_user();
            self.commit_quests();
        } else if renamed {
            self.commit_user();
        }
    }

    /// Locks the session. Saved progress is kept.
    pub fn logout(&mut self) {
        self.set_authenticated(false);
        info!("player logged out");
    }

    /// Name a login form should submit for `input`: the trimmed input, else
    /// the existing custom name, else a fallback.
    pub fn resolve_login_name(&self, input: &str) -> String {
        let input = input.trim();
        if !input.is_empty() {
            input.to_string()
        } else if !self.user.has_default_name() {
            self.user.name.clone()
        } else {
            FALLBACK_LOGIN_NAME.to_string()
        }
    }

    /// Erases all saved state and resets to a logged-out first run.
    pub fn wipe(&mut self) {
        self.persistence.clear();
        self.user = UserRecord::new();
        self.quests = initial_quests();
        self.authenticated = false;
        info!("all progress wiped");
    }

    // === XP and stats ===

    /// Adds XP and processes level-ups. Returns the number of levels gained.
    pub fn add_xp(&mut self, amount: u64) -> u32 {
        let levelups = self.grant_xp(amount);
        self.commit_user();
        levelups
    }

    pub fn update_stat(&mut self, stat: StatType, amount: u32) {
        self.user.stats.add(stat, amount);
        self.commit_user();
    }

    /// Rewards a finished training session. Returns levels gained.
    pub fn complete_training_session(&mut self) -> u32 {
        let levelups = self.grant_xp(TRAINING_SESSION_XP);
        self.user.stats.add(StatType::Strength, 1);
        info!(xp = TRAINING_SESSION_XP, "training session cleared");
        self.commit_user();
        levelups
    }

    // === Quests ===

    /// First phase of logging progress: moves `current` toward the target
    /// and commits it. Never completes the quest.
    pub fn apply_progress(&mut self, quest_id: &str, amount: f64) -> ProgressOutcome {
        let outcome = match self.quests.iter_mut().find(|q| q.id == quest_id) {
            Some(quest) => quest.advance(amount),
            None => ProgressOutcome::Ignored,
        };

        if let ProgressOutcome::Advanced {
            current,
            reached_target,
        } = outcome
        {
            debug!(quest_id, current, reached_target, "quest progress logged");
            self.commit_quests();
        }
        outcome
    }

    /// Logs progress and, once the target is reached, completes the quest
    /// right after the progress commit.
    pub fn toggle_quest_progress(
        &mut self,
        quest_id: &str,
        amount: f64,
    ) -> Option<QuestCompletion> {
        if self.apply_progress(quest_id, amount).reached_target() {
            self.complete_quest(quest_id)
        } else {
            None
        }
    }

    /// Completes a quest and grants its rewards. Returns `None` for unknown
    /// or already completed quests, so rewards are granted at most once.
    pub fn complete_quest(&mut self, quest_id: &str) -> Option<QuestCompletion> {
        let quest = self
            .quests
            .iter_mut()
            .find(|q| q.id == quest_id && !q.completed)?;
        quest.completed = true;
        let xp_reward = quest.xp_reward;
        let stat_reward = quest.stat_reward;

        let levels_gained = self.grant_xp(xp_reward);
        if let Some(stat) = stat_reward {
            self.user.stats.add(stat, QUEST_STAT_REWARD);
        }
        self.user.record_completion(quest_id);

        info!(quest_id, xp = xp_reward, levels_gained, "quest completed");

        self.commit_quests();
        self.commit_user();

        Some(QuestCompletion {
            quest_id: quest_id.to_string(),
            xp_granted: xp_reward,
            stat_raised: stat_reward,
            levels_gained,
        })
    }

    // === Post-conditions ===

    fn grant_xp(&mut self, amount: u64) -> u32 {
        let rank_before = self.user.rank;
        let levelups = apply_xp(&mut self.user, amount);
        if levelups > 0 {
            info!(
                level = self.user.level,
                levels_gained = levelups,
                rank = %self.user.rank,
                "level up"
            );
            if self.user.rank != rank_before {
                info!(from = %rank_before, to = %self.user.rank, "rank up");
            }
        }
        levelups
    }

    /// Completes quests that were saved at their target without having
    /// been completed.
    fn settle_pending_completions(&mut self) {
        let pending: Vec<String> = self
            .quests
            .iter()
            .filter(|q| !q.completed && q.current >= q.target)
            .map(|q| q.id.clone())
            .collect();
        for quest_id in pending {
            warn!(quest_id = %quest_id, "completing quest saved at its target");
            self.complete_quest(&quest_id);
        }
    }

    fn set_authenticated(&mut self, authenticated: bool) {
        if self.authenticated != authenticated {
            self.authenticated = authenticated;
            self.persistence.set_flag(StorageKey::Auth, authenticated);
        }
    }

    fn commit_user(&mut self) {
        if self.authenticated {
            self.persistence.save(StorageKey::User, &self.user);
        }
    }

    fn commit_quests(&mut self) {
        if self.authenticated {
            self.persistence.save(StorageKey::Quests, &self.quests);
        }
    }
}

/// Validates a loaded record and re-derives everything computed from level.
fn rehydrate_user(mut user: UserRecord) -> Option<UserRecord> {
    if !user.is_well_formed() {
        warn!("discarding saved player record with zero level or XP requirement");
        return None;
    }
    normalize_level(&mut user);
    user.rank = Rank::for_level(user.level);
    Some(user)
}

/// Validates a loaded quest list and clamps progress into `0..=target`.
/// Lists with repeated ids or unusable targets are discarded whole.
fn rehydrate_quests(mut quests: Vec<Quest>) -> Option<Vec<Quest>> {
    let mut seen = HashSet::new();
    for quest in &quests {
        if !seen.insert(quest.id.as_str()) {
            warn!(quest_id = %quest.id, "discarding saved quest list with repeated id");
            return None;
        }
        if !(quest.target.is_finite() && quest.target > 0.0) {
            warn!(quest_id = %quest.id, "discarding saved quest list with invalid target");
            return None;
        }
    }
    for quest in &mut quests {
        quest.current = if quest.current.is_finite() {
            quest.current.clamp(0.0, quest.target)
        } else {
            0.0
        };
    }
    Some(quests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::persistence::MemoryStore;

    fn fresh_engine() -> ProgressionEngine<MemoryStore> {
        ProgressionEngine::load(MemoryStore::new())
    }

    fn quest_with_target(engine: &mut ProgressionEngine<MemoryStore>, target: f64) -> String {
        let quest = &mut engine.quests[0];
        quest.target = target;
        quest.current = 0.0;
        quest.id.clone()
    }

    #[test]
    fn test_fresh_engine_defaults() {
        let engine = fresh_engine();
        assert!(!engine.is_authenticated());
        assert_eq!(engine.user(), &UserRecord::new());
        assert_eq!(engine.quests(), initial_quests().as_slice());
    }

    #[test]
    fn test_login_names_first_time_user() {
        let mut engine = fresh_engine();
        engine.login("Jinwoo");
        assert!(engine.is_authenticated());
        assert_eq!(engine.user().name, "Jinwoo");
    }

    #[test]
    fn test_login_keeps_existing_name() {
        let mut engine = fresh_engine();
        engine.login("Jinwoo");
        engine.logout();
        engine.login("Someone Else");
        assert!(engine.is_authenticated());
        assert_eq!(engine.user().name, "Jinwoo");
    }

    #[test]
    fn test_login_with_empty_name_keeps_default() {
        let mut engine = fresh_engine();
        engine.login("");
        assert!(engine.is_authenticated());
        assert_eq!(engine.user().name, "Player");
    }

    #[test]
    fn test_resolve_login_name() {
        let mut engine = fresh_engine();
        assert_eq!(engine.resolve_login_name("   "), "Shadow Monarch");
        assert_eq!(engine.resolve_login_name(" Cha "), "Cha");

        engine.login("Jinwoo");
        assert_eq!(engine.resolve_login_name(""), "Jinwoo");
    }

    #[test]
    fn test_nothing_persisted_while_logged_out() {
        let mut engine = fresh_engine();
        engine.add_xp(40);
        engine.update_stat(StatType::Agility, 2);
        assert!(engine.store().is_empty());
    }

    #[test]
    fn test_login_persists_pre_login_progress() {
        let mut engine = fresh_engine();
        engine.add_xp(40);
        engine.login("Jinwoo");

        let reloaded = ProgressionEngine::load(engine.store().clone());
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.user().xp, 40);
        assert_eq!(reloaded.user().name, "Jinwoo");
    }

    #[test]
    fn test_logout_persists_flag_but_keeps_data() {
        let mut engine = fresh_engine();
        engine.login("Jinwoo");
        engine.add_xp(30);
        engine.logout();

        let reloaded = ProgressionEngine::load(engine.store().clone());
        assert!(!reloaded.is_authenticated());
        assert_eq!(reloaded.user().xp, 30);
    }

    #[test]
    fn test_add_xp_levels_up() {
        let mut engine = fresh_engine();
        let levelups = engine.add_xp(250);
        assert_eq!(levelups, 2);
        assert_eq!(engine.user().level, 3);
        assert_eq!(engine.user().xp, 0);
        assert_eq!(engine.user().max_xp, 225);
    }

    #[test]
    fn test_update_stat() {
        let mut engine = fresh_engine();
        engine.update_stat(StatType::Intelligence, 3);
        assert_eq!(engine.user().stats.get(StatType::Intelligence), 13);
    }

    #[test]
    fn test_training_session_rewards() {
        let mut engine = fresh_engine();
        engine.complete_training_session();
        assert_eq!(engine.user().xp, 50);
        assert_eq!(engine.user().stats.get(StatType::Strength), 11);
    }

    #[test]
    fn test_apply_progress_does_not_complete() {
        let mut engine = fresh_engine();
        let id = quest_with_target(&mut engine, 10.0);

        let outcome = engine.apply_progress(&id, 12.0);
        assert!(outcome.reached_target());
        let quest = engine.quest(&id).unwrap();
        assert_eq!(quest.current, 10.0);
        assert!(!quest.completed);
        assert_eq!(engine.user().xp, 0);
    }

    #[test]
    fn test_toggle_progress_scenario() {
        let mut engine = fresh_engine();
        let id = quest_with_target(&mut engine, 10.0);
        let reward = engine.quest(&id).unwrap().xp_reward;
        let stat = engine.quest(&id).unwrap().stat_reward.unwrap();

        assert!(engine.toggle_quest_progress(&id, 4.0).is_none());
        let quest = engine.quest(&id).unwrap();
        assert_eq!(quest.current, 4.0);
        assert!(!quest.completed);

        let completion = engine.toggle_quest_progress(&id, 8.0).unwrap();
        assert_eq!(completion.xp_granted, reward);
        assert_eq!(completion.stat_raised, Some(stat));

        let quest = engine.quest(&id).unwrap();
        assert_eq!(quest.current, 10.0);
        assert!(quest.completed);
        assert_eq!(engine.user().xp, reward);
        assert_eq!(engine.user().stats.get(stat), 11);
        assert_eq!(engine.user().completed_quests, vec![id]);
    }

    #[test]
    fn test_complete_quest_is_idempotent() {
        let mut engine = fresh_engine();
        let id = engine.quests()[0].id.clone();

        assert!(engine.complete_quest(&id).is_some());
        let after_first = engine.user().clone();

        assert!(engine.complete_quest(&id).is_none());
        assert!(engine.toggle_quest_progress(&id, 5.0).is_none());
        assert_eq!(engine.user(), &after_first);
        assert_eq!(engine.user().completed_quests.len(), 1);
    }

    #[test]
    fn test_unknown_quest_is_noop() {
        let mut engine = fresh_engine();
        engine.login("Jinwoo");
        let before = engine.quests().to_vec();

        assert_eq!(
            engine.apply_progress("no-such-quest", 3.0),
            ProgressOutcome::Ignored
        );
        assert!(engine.complete_quest("no-such-quest").is_none());
        assert_eq!(engine.quests(), before.as_slice());
    }

    #[test]
    fn test_quest_groups_partition_catalog() {
        let engine = fresh_engine();
        let daily = engine.daily_quests().count();
        let lifestyle = engine.lifestyle_quests().count();
        assert_eq!(daily + lifestyle, engine.quests().len());
    }

    #[test]
    fn test_xp_progress_percent() {
        let mut engine = fresh_engine();
        engine.add_xp(25);
        assert_eq!(engine.xp_progress_percent(), 25.0);
    }

    #[test]
    fn test_wipe_resets_everything() {
        let mut engine = fresh_engine();
        engine.login("Jinwoo");
        engine.add_xp(500);
        engine.wipe();

        assert!(!engine.is_authenticated());
        assert_eq!(engine.user(), &UserRecord::new());
        assert!(engine.store().is_empty());
    }

    #[test]
    fn test_rehydrate_rederives_rank() {
        let mut user = UserRecord::new();
        user.level = 45;
        user.max_xp = 1000;
        user.rank = Rank::E;
        let user = rehydrate_user(user).unwrap();
        assert_eq!(user.rank, Rank::A);
    }

    #[test]
    fn test_rehydrate_rejects_zero_max_xp() {
        let mut user = UserRecord::new();
        user.max_xp = 0;
        assert!(rehydrate_user(user).is_none());
    }

    #[test]
    fn test_shared_engine_serializes_mutations() {
        let shared = fresh_engine().into_shared();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&shared);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        engine.lock().unwrap().add_xp(10);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 1000 XP from level 1: 100 + 150 + 225 + 337 = 812, 188 left over
        let engine = shared.lock().unwrap();
        assert_eq!(engine.user().level, 5);
        assert_eq!(engine.user().xp, 188);
    }

    #[test]
    fn test_rehydrate_quests_rejects_repeated_ids() {
        let mut quests = initial_quests();
        let copy = quests[0].clone();
        quests.push(copy);
        assert!(rehydrate_quests(quests).is_none());
    }

    #[test]
    fn test_rehydrate_quests_rejects_unusable_target() {
        let mut quests = initial_quests();
        quests[1].target = 0.0;
        assert!(rehydrate_quests(quests).is_none());

        let mut quests = initial_quests();
        quests[1].target = f64::NAN;
        assert!(rehydrate_quests(quests).is_none());
    }

    #[test]
    fn test_rehydrate_quests_clamps_progress() {
        let mut quests = initial_quests();
        quests[0].current = quests[0].target * 5.0;
        quests[1].current = -3.0;
        let target = quests[0].target;

        let quests = rehydrate_quests(quests).unwrap();
        assert_eq!(quests[0].current, target);
        assert_eq!(quests[1].current, 0.0);
    }
}
