//! Quest entity - ordered objectives with a small state machine
//!
//! Transitions form a DAG: `NotStarted -> Active -> {Completed, Failed}`.
//! Terminal states absorb further transition requests. A quest completes
//! exactly when every non-optional objective is complete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, MemoryId, NpcId, ObjectiveId, QuestId};
use crate::objective::QuestObjective;
use crate::DomainError;

/// Maximum objectives per quest
pub const MAX_QUEST_OBJECTIVES: usize = 8;

/// Lifecycle state of a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestState {
    #[default]
    NotStarted,
    Active,
    Completed,
    Failed,
}

impl QuestState {
    pub fn display_name(&self) -> &'static str {
        match self {
            QuestState::NotStarted => "Not Started",
            QuestState::Active => "Active",
            QuestState::Completed => "Completed",
            QuestState::Failed => "Failed",
        }
    }

    /// Completed and Failed absorb all further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, QuestState::Completed | QuestState::Failed)
    }
}

/// Resource and relationship payout granted on completion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestRewards {
    pub soul_energy: i64,
    pub mana: i64,
    pub trust: i32,
    pub respect: i32,
}

/// Content gated behind completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestUnlocks {
    pub memory: Option<MemoryId>,
    pub next_quest: Option<QuestId>,
    pub location: Option<LocationId>,
}

/// A quest handed out by an NPC
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    /// NPC this quest came from
    pub quest_giver: Option<NpcId>,

    state: QuestState,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,

    objectives: Vec<QuestObjective>,

    pub rewards: QuestRewards,
    pub unlocks: QuestUnlocks,

    pub can_fail: bool,
    pub time_limited: bool,
    pub deadline: Option<DateTime<Utc>>,
}

impl Quest {
    pub fn new(id: impl Into<QuestId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            quest_giver: None,
            state: QuestState::NotStarted,
            started_at: None,
            completed_at: None,
            objectives: Vec::new(),
            rewards: QuestRewards::default(),
            unlocks: QuestUnlocks::default(),
            can_fail: false,
            time_limited: false,
            deadline: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_quest_giver(mut self, npc_id: impl Into<NpcId>) -> Self {
        self.quest_giver = Some(npc_id.into());
        self
    }

    pub fn with_rewards(mut self, rewards: QuestRewards) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.time_limited = true;
        self.deadline = Some(deadline);
        self
    }

    pub fn state(&self) -> QuestState {
        self.state
    }

    pub fn objectives(&self) -> &[QuestObjective] {
        &self.objectives
    }

    /// Attach an objective. The list is capped at
    /// [`MAX_QUEST_OBJECTIVES`]; extra objectives are dropped with a
    /// warning.
    pub fn add_objective(&mut self, objective: QuestObjective) {
        if self.objectives.len() >= MAX_QUEST_OBJECTIVES {
            tracing::warn!(quest = %self.id, "max objectives reached");
            return;
        }
        tracing::debug!(quest = %self.id, objective = %objective.id, "objective added");
        self.objectives.push(objective);
    }

    pub fn objective(&self, objective_id: &ObjectiveId) -> Option<&QuestObjective> {
        self.objectives.iter().find(|o| &o.id == objective_id)
    }

    pub fn objective_mut(&mut self, objective_id: &ObjectiveId) -> Option<&mut QuestObjective> {
        self.objectives.iter_mut().find(|o| &o.id == objective_id)
    }

    /// Begin the quest. Permitted only from `NotStarted`.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.state != QuestState::NotStarted {
            return Err(DomainError::invalid_transition(format!(
                "quest {} cannot start from {:?}",
                self.id, self.state
            )));
        }

        self.state = QuestState::Active;
        self.started_at = Some(now);
        tracing::info!(quest = %self.id, "quest started");
        Ok(())
    }

    /// Finish the quest successfully. Permitted only from `Active`.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.state != QuestState::Active {
            return Err(DomainError::invalid_transition(format!(
                "quest {} cannot complete from {:?}",
                self.id, self.state
            )));
        }

        self.state = QuestState::Completed;
        self.completed_at = Some(now);
        tracing::info!(quest = %self.id, "quest completed");
        Ok(())
    }

    /// Fail the quest. Permitted only from `Active`, and only when the
    /// quest is flagged `can_fail`.
    pub fn fail(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.can_fail {
            return Err(DomainError::invalid_transition(format!(
                "quest {} is not allowed to fail",
                self.id
            )));
        }
        if self.state != QuestState::Active {
            return Err(DomainError::invalid_transition(format!(
                "quest {} cannot fail from {:?}",
                self.id, self.state
            )));
        }

        self.state = QuestState::Failed;
        self.completed_at = Some(now);
        tracing::info!(quest = %self.id, "quest failed");
        Ok(())
    }

    /// Whether every non-optional objective is complete.
    pub fn all_required_complete(&self) -> bool {
        self.objectives
            .iter()
            .filter(|o| !o.optional)
            .all(|o| o.is_completed())
    }

    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        match (self.time_limited, self.deadline) {
            (true, Some(deadline)) => now > deadline,
            _ => false,
        }
    }

    /// Tick the quest: fail a time-limited quest past its deadline,
    /// otherwise complete it once every required objective is done.
    ///
    /// Returns `true` exactly when this call completed the quest.
    pub fn update_state(&mut self, now: DateTime<Utc>) -> bool {
        if self.state != QuestState::Active {
            return false;
        }

        if self.is_past_deadline(now) {
            // Deadline failure is inherent to time-limited quests and
            // bypasses the can_fail gate on explicit failure.
            self.state = QuestState::Failed;
            self.completed_at = Some(now);
            tracing::info!(quest = %self.id, "quest failed (deadline)");
            return false;
        }

        if self.all_required_complete() {
            self.state = QuestState::Completed;
            self.completed_at = Some(now);
            tracing::info!(quest = %self.id, "quest completed");
            return true;
        }

        false
    }

    /// Integer mean of required-objective progress. Zero when the quest
    /// has no required objectives.
    pub fn progress_percent(&self) -> u32 {
        let mut total = 0;
        let mut required = 0;

        for objective in self.objectives.iter().filter(|o| !o.optional) {
            required += 1;
            total += objective.progress_percent();
        }

        if required == 0 {
            return 0;
        }
        total / required
    }

    pub fn is_active(&self) -> bool {
        self.state == QuestState::Active
    }

    pub fn is_completed(&self) -> bool {
        self.state == QuestState::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.state == QuestState::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::ObjectiveKind;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    fn quest_with_objectives() -> Quest {
        let mut quest = Quest::new("first_harvest", "The First Harvest");
        quest.add_objective(
            QuestObjective::new("collect", "Gather grave soil", ObjectiveKind::Collect)
                .with_target("grave_soil", 2),
        );
        quest.add_objective(
            QuestObjective::new("talk", "Speak with Morwen", ObjectiveKind::Talk).optional(),
        );
        quest
    }

    #[test]
    fn test_start_only_from_not_started() {
        let mut quest = quest_with_objectives();
        quest.start(t(1)).expect("fresh quest starts");
        assert!(quest.start(t(2)).is_err());
        assert_eq!(quest.state(), QuestState::Active);
    }

    #[test]
    fn test_completes_when_required_objectives_done() {
        let mut quest = quest_with_objectives();
        quest.start(t(1)).expect("start");

        quest
            .objective_mut(&ObjectiveId::new("collect"))
            .expect("objective exists")
            .increment(2);

        // Optional objective untouched; quest still completes
        assert!(quest.update_state(t(5)));
        assert_eq!(quest.state(), QuestState::Completed);
        assert_eq!(quest.completed_at, Some(t(5)));
    }

    #[test]
    fn test_terminal_states_absorb() {
        let mut quest = quest_with_objectives();
        quest.can_fail = true;
        quest.start(t(1)).expect("start");
        quest.fail(t(2)).expect("fail");

        assert!(quest.complete(t(3)).is_err());
        assert!(quest.fail(t(3)).is_err());
        assert_eq!(quest.state(), QuestState::Failed);
    }

    #[test]
    fn test_fail_requires_can_fail() {
        let mut quest = quest_with_objectives();
        quest.start(t(1)).expect("start");
        assert!(quest.fail(t(2)).is_err());
        assert_eq!(quest.state(), QuestState::Active);
    }

    #[test]
    fn test_deadline_fails_on_tick() {
        let mut quest = quest_with_objectives().with_deadline(t(100));
        quest.start(t(1)).expect("start");

        assert!(!quest.update_state(t(99)));
        assert_eq!(quest.state(), QuestState::Active);

        assert!(!quest.update_state(t(101)));
        assert_eq!(quest.state(), QuestState::Failed);
    }

    #[test]
    fn test_progress_percent_mean_over_required() {
        let mut quest = Quest::new("rites", "Rites of Passage");
        quest.add_objective(
            QuestObjective::new("a", "a", ObjectiveKind::Kill).with_target("x", 2),
        );
        quest.add_objective(
            QuestObjective::new("b", "b", ObjectiveKind::Collect).with_target("y", 4),
        );

        quest
            .objective_mut(&ObjectiveId::new("a"))
            .expect("objective exists")
            .increment(1); // 50%
        quest
            .objective_mut(&ObjectiveId::new("b"))
            .expect("objective exists")
            .increment(1); // 25%

        assert_eq!(quest.progress_percent(), 37); // (50 + 25) / 2, truncated
    }

    #[test]
    fn test_progress_percent_zero_without_required() {
        let mut quest = Quest::new("idle", "Idle Hands");
        quest.add_objective(
            QuestObjective::new("opt", "opt", ObjectiveKind::Custom).optional(),
        );
        assert_eq!(quest.progress_percent(), 0);
    }
}
