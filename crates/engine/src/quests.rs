//! Quest log - the owning collection of quests with delegated operations
//!
//! The log resolves quest and objective ids, forwards state transitions,
//! and ticks deadlines. Objective updates report completion boundaries so
//! the caller can fire rewards exactly once.

use chrono::{DateTime, Utc};
use necroshell_data::{DataError, DataFile};
use necroshell_domain::{
    DomainError, NpcId, ObjectiveId, Quest, QuestId, QuestRewards, QuestState,
};
use std::path::Path;

/// Owning collection of quests
#[derive(Debug, Default)]
pub struct QuestLog {
    quests: Vec<Quest>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self {
            quests: Vec::with_capacity(16),
        }
    }

    pub fn add(&mut self, quest: Quest) {
        if self.get(&quest.id).is_some() {
            tracing::warn!(quest = %quest.id, "duplicate quest id ignored");
            return;
        }
        tracing::debug!(quest = %quest.id, "quest added");
        self.quests.push(quest);
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn get(&self, quest_id: &QuestId) -> Option<&Quest> {
        self.quests.iter().find(|q| &q.id == quest_id)
    }

    pub fn get_mut(&mut self, quest_id: &QuestId) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|q| &q.id == quest_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }

    pub fn active(&self) -> Vec<&Quest> {
        self.by_state(QuestState::Active)
    }

    pub fn completed(&self) -> Vec<&Quest> {
        self.by_state(QuestState::Completed)
    }

    pub fn failed(&self) -> Vec<&Quest> {
        self.by_state(QuestState::Failed)
    }

    fn by_state(&self, state: QuestState) -> Vec<&Quest> {
        self.quests.iter().filter(|q| q.state() == state).collect()
    }

    pub fn by_quest_giver(&self, npc_id: &NpcId) -> Vec<&Quest> {
        self.quests
            .iter()
            .filter(|q| q.quest_giver.as_ref() == Some(npc_id))
            .collect()
    }

    /// Start a quest by id.
    pub fn start(&mut self, quest_id: &QuestId, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.get_mut(quest_id)
            .ok_or_else(|| DomainError::not_found("Quest", quest_id.as_str()))?
            .start(now)
    }

    /// Complete a quest by id.
    pub fn complete(&mut self, quest_id: &QuestId, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.get_mut(quest_id)
            .ok_or_else(|| DomainError::not_found("Quest", quest_id.as_str()))?
            .complete(now)
    }

    /// Fail a quest by id.
    pub fn fail(&mut self, quest_id: &QuestId, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.get_mut(quest_id)
            .ok_or_else(|| DomainError::not_found("Quest", quest_id.as_str()))?
            .fail(now)
    }

    /// Advance one objective and re-evaluate the quest.
    ///
    /// Returns `true` when either the objective or the whole quest
    /// crossed its completion boundary on this call. Unknown ids warn and
    /// return `false`.
    pub fn update_objective(
        &mut self,
        quest_id: &QuestId,
        objective_id: &ObjectiveId,
        delta: u32,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(quest) = self.get_mut(quest_id) else {
            tracing::warn!(quest = %quest_id, "cannot update objective for unknown quest");
            return false;
        };

        let Some(objective) = quest.objective_mut(objective_id) else {
            tracing::warn!(
                quest = %quest_id,
                objective = %objective_id,
                "cannot update unknown objective"
            );
            return false;
        };

        let objective_completed = objective.increment(delta);
        let quest_completed = quest.update_state(now);

        objective_completed || quest_completed
    }

    /// Tick every active quest for deadline failure or completion.
    pub fn update_all(&mut self, now: DateTime<Utc>) {
        for quest in self.quests.iter_mut().filter(|q| q.is_active()) {
            quest.update_state(now);
        }
    }

    /// Load `[QUEST:*]` sections from a data file on disk.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, DataError> {
        let file = DataFile::load(path)?;
        Ok(self.load(&file))
    }

    /// Populate the log from parsed data. Returns how many quests were
    /// added.
    pub fn load(&mut self, file: &DataFile) -> usize {
        let mut loaded = 0;

        for section in file.sections_of("QUEST") {
            let mut quest = Quest::new(section.id(), section.str_or("title", "Untitled Quest"));
            quest.description = section.str_or("description", "").to_owned();

            let giver = section.str_or("quest_giver", "");
            if !giver.is_empty() {
                quest.quest_giver = Some(NpcId::new(giver));
            }

            quest.rewards = QuestRewards {
                soul_energy: section.int_or("soul_energy_reward", 0),
                mana: section.int_or("mana_reward", 0),
                trust: section.int_or("trust_reward", 0) as i32,
                respect: section.int_or("respect_reward", 0) as i32,
            };

            let memory = section.str_or("unlocks_memory", "");
            if !memory.is_empty() {
                quest.unlocks.memory = Some(memory.into());
            }
            let next = section.str_or("unlocks_quest", "");
            if !next.is_empty() {
                quest.unlocks.next_quest = Some(next.into());
            }
            let location = section.str_or("unlocks_location", "");
            if !location.is_empty() {
                quest.unlocks.location = Some(location.into());
            }

            quest.can_fail = section.bool_or("can_fail", false);
            quest.time_limited = section.bool_or("time_limited", false);

            self.add(quest);
            loaded += 1;
        }

        tracing::info!(count = loaded, "quests loaded");
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use necroshell_domain::{ObjectiveKind, QuestObjective};

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    fn log_with_quest() -> QuestLog {
        let mut quest = Quest::new("first_harvest", "The First Harvest")
            .with_quest_giver("morwen");
        quest.add_objective(
            QuestObjective::new("soil", "Gather grave soil", ObjectiveKind::Collect)
                .with_target("grave_soil", 3),
        );
        quest.add_objective(
            QuestObjective::new("blessing", "Earn Morwen's blessing", ObjectiveKind::Relationship)
                .optional(),
        );

        let mut log = QuestLog::new();
        log.add(quest);
        log
    }

    #[test]
    fn test_update_objective_boundary_reporting() {
        let mut log = log_with_quest();
        let quest_id = QuestId::new("first_harvest");
        let objective_id = ObjectiveId::new("soil");
        log.start(&quest_id, t(1)).expect("start");

        assert!(!log.update_objective(&quest_id, &objective_id, 2, t(2)));
        // Third unit crosses both the objective and the quest boundary
        assert!(log.update_objective(&quest_id, &objective_id, 1, t(3)));

        let quest = log.get(&quest_id).expect("exists");
        assert_eq!(quest.state(), QuestState::Completed);
    }

    #[test]
    fn test_update_objective_unknown_ids() {
        let mut log = log_with_quest();
        assert!(!log.update_objective(
            &QuestId::new("missing"),
            &ObjectiveId::new("soil"),
            1,
            t(1)
        ));
        assert!(!log.update_objective(
            &QuestId::new("first_harvest"),
            &ObjectiveId::new("missing"),
            1,
            t(1)
        ));
    }

    #[test]
    fn test_update_all_applies_deadlines() {
        let mut log = log_with_quest();
        let mut timed = Quest::new("race", "Race the Dawn").with_deadline(t(100));
        timed.add_objective(
            QuestObjective::new("run", "Reach the gate", ObjectiveKind::Visit),
        );
        log.add(timed);

        log.start(&QuestId::new("race"), t(1)).expect("start");
        log.update_all(t(200));

        assert_eq!(
            log.get(&QuestId::new("race")).expect("exists").state(),
            QuestState::Failed
        );
    }

    #[test]
    fn test_views_and_giver_lookup() {
        let mut log = log_with_quest();
        log.start(&QuestId::new("first_harvest"), t(1)).expect("start");

        assert_eq!(log.active().len(), 1);
        assert_eq!(log.completed().len(), 0);
        assert_eq!(log.by_quest_giver(&NpcId::new("morwen")).len(), 1);
    }

    #[test]
    fn test_load_from_data() {
        let file = DataFile::parse(
            "[QUEST:first_harvest]\n\
             title = The First Harvest\n\
             description = Morwen needs grave soil.\n\
             quest_giver = morwen\n\
             soul_energy_reward = 250\n\
             trust_reward = 10\n\
             unlocks_memory = memory_first_grave\n\
             can_fail = false\n",
        );

        let mut log = QuestLog::new();
        assert_eq!(log.load(&file), 1);

        let quest = log.get(&QuestId::new("first_harvest")).expect("exists");
        assert_eq!(quest.quest_giver, Some(NpcId::new("morwen")));
        assert_eq!(quest.rewards.soul_energy, 250);
        assert_eq!(quest.rewards.trust, 10);
        assert_eq!(
            quest.unlocks.memory.as_ref().map(|m| m.as_str()),
            Some("memory_first_grave")
        );
        assert_eq!(quest.state(), QuestState::NotStarted);
    }
}
