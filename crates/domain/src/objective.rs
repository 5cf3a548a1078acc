//! Quest objective - one countable step of a quest
//!
//! Progress is clamped to `[0, target_count]` on every write, and a
//! completed objective rejects further progress writes.

use serde::{Deserialize, Serialize};

use crate::ids::ObjectiveId;

/// What kind of action advances the objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    Talk,
    Kill,
    Collect,
    Visit,
    Raise,
    Discover,
    Research,
    Relationship,
    #[default]
    Custom,
}

impl ObjectiveKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ObjectiveKind::Talk => "Talk",
            ObjectiveKind::Kill => "Kill",
            ObjectiveKind::Collect => "Collect",
            ObjectiveKind::Visit => "Visit",
            ObjectiveKind::Raise => "Raise",
            ObjectiveKind::Discover => "Discover",
            ObjectiveKind::Research => "Research",
            ObjectiveKind::Relationship => "Relationship",
            ObjectiveKind::Custom => "Custom",
        }
    }

    /// Parse the lowercase data-file token. Unknown tokens yield `Custom`.
    pub fn parse(token: &str) -> Self {
        match token {
            "talk" => ObjectiveKind::Talk,
            "kill" => ObjectiveKind::Kill,
            "collect" => ObjectiveKind::Collect,
            "visit" => ObjectiveKind::Visit,
            "raise" => ObjectiveKind::Raise,
            "discover" => ObjectiveKind::Discover,
            "research" => ObjectiveKind::Research,
            "relationship" => ObjectiveKind::Relationship,
            "custom" => ObjectiveKind::Custom,
            other => {
                tracing::warn!("Unknown objective kind token '{other}', defaulting to custom");
                ObjectiveKind::Custom
            }
        }
    }
}

/// One component of a quest with a target count and current progress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestObjective {
    pub id: ObjectiveId,
    pub description: String,
    pub kind: ObjectiveKind,
    /// What the objective counts (an NPC, location, item, ... id)
    pub target_id: String,
    target_count: u32,
    current_count: u32,
    completed: bool,
    pub optional: bool,
    pub hidden: bool,
    /// Objective that must complete before this one is shown
    pub prerequisite_objective_id: Option<ObjectiveId>,
}

impl QuestObjective {
    pub fn new(
        id: impl Into<ObjectiveId>,
        description: impl Into<String>,
        kind: ObjectiveKind,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind,
            target_id: String::new(),
            target_count: 1,
            current_count: 0,
            completed: false,
            optional: false,
            hidden: false,
            prerequisite_objective_id: None,
        }
    }

    pub fn with_target(mut self, target_id: impl Into<String>, target_count: u32) -> Self {
        self.target_id = target_id.into();
        if target_count > 0 {
            self.target_count = target_count;
        }
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn target_count(&self) -> u32 {
        self.target_count
    }

    pub fn current_count(&self) -> u32 {
        self.current_count
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Advance progress by `delta`, clamping at the target count.
    ///
    /// Returns `true` exactly when this call crossed the completion
    /// boundary. Writes against an already-completed objective are
    /// rejected.
    pub fn increment(&mut self, delta: u32) -> bool {
        if self.completed {
            return false;
        }

        self.current_count = self.current_count.saturating_add(delta);

        if self.current_count >= self.target_count {
            self.current_count = self.target_count;
            self.completed = true;
            tracing::info!(objective = %self.id, "objective completed");
            return true;
        }

        tracing::debug!(
            objective = %self.id,
            current = self.current_count,
            target = self.target_count,
            "objective progress"
        );
        false
    }

    /// Overwrite progress, clamped to `[0, target_count]`.
    ///
    /// Returns `true` exactly when this call crossed the completion
    /// boundary.
    pub fn set_progress(&mut self, count: u32) -> bool {
        if self.completed {
            return false;
        }

        self.current_count = count.min(self.target_count);

        if self.current_count >= self.target_count {
            self.completed = true;
            tracing::info!(objective = %self.id, "objective completed");
            return true;
        }

        false
    }

    /// Unconditionally mark the objective done.
    pub fn complete(&mut self) {
        self.completed = true;
        self.current_count = self.target_count;
    }

    /// Integer percentage of progress toward the target.
    pub fn progress_percent(&self) -> u32 {
        if self.target_count == 0 {
            return 0;
        }
        self.current_count * 100 / self.target_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_clamps_and_completes() {
        let mut obj = QuestObjective::new("bones", "Collect femurs", ObjectiveKind::Collect)
            .with_target("femur", 3);

        assert!(!obj.increment(2));
        assert_eq!(obj.current_count(), 2);

        // Overshoot clamps at the target and reports the boundary
        assert!(obj.increment(5));
        assert_eq!(obj.current_count(), 3);
        assert!(obj.is_completed());
    }

    #[test]
    fn test_completed_objective_rejects_writes() {
        let mut obj = QuestObjective::new("visit", "Visit the crypt", ObjectiveKind::Visit);
        assert!(obj.increment(1));
        assert!(!obj.increment(1));
        assert!(!obj.set_progress(0));
        assert_eq!(obj.current_count(), 1);
    }

    #[test]
    fn test_set_progress_clamps() {
        let mut obj = QuestObjective::new("kill", "Destroy revenants", ObjectiveKind::Kill)
            .with_target("revenant", 10);
        obj.set_progress(99);
        assert_eq!(obj.current_count(), 10);
        assert!(obj.is_completed());
    }

    #[test]
    fn test_progress_percent() {
        let mut obj = QuestObjective::new("kill", "Destroy revenants", ObjectiveKind::Kill)
            .with_target("revenant", 4);
        obj.increment(1);
        assert_eq!(obj.progress_percent(), 25);
        obj.increment(1);
        assert_eq!(obj.progress_percent(), 50);
    }

    #[test]
    fn test_zero_target_is_guarded() {
        // A zero target is promoted to 1 by the builder
        let obj = QuestObjective::new("x", "x", ObjectiveKind::Custom).with_target("x", 0);
        assert_eq!(obj.target_count(), 1);
    }
}
