//! Archon trial descriptors loaded from `[TRIAL:*]` sections

use necroshell_domain::{ArchonTrial, TrialKind, DEFAULT_MAX_ATTEMPTS};
use serde::{Deserialize, Serialize};

use crate::file::{DataFile, Section};

/// Data-driven description of one Archon trial
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialDefinition {
    pub id: u32,
    pub number: u32,
    pub name: String,
    pub description: String,
    pub kind: TrialKind,
    pub completion_text: String,
    pub unlock_corruption_min: u8,
    pub unlock_corruption_max: u8,
    pub unlock_consciousness_min: u8,
    pub prerequisite_trial_id: Option<u32>,
    pub max_attempts: u8,
    pub score_matters: bool,
}

impl TrialDefinition {
    /// Build from a `[TRIAL:*]` section. `position` (0-based) supplies
    /// the fallback id/number for sections that omit them.
    pub fn from_section(section: &Section, position: usize) -> Self {
        let fallback = (position + 1) as i64;
        let prerequisite = section.int_or("prerequisite_trial_id", 0);

        Self {
            id: section.int_or("id", fallback) as u32,
            number: section.int_or("number", fallback) as u32,
            name: section.str_or("name", "Unknown Trial").to_owned(),
            description: section.str_or("description", "").to_owned(),
            kind: TrialKind::parse(section.str_or("type", "combat")),
            completion_text: section.str_or("completion_text", "Trial completed.").to_owned(),
            unlock_corruption_min: section.int_or("unlock_corruption_min", 30) as u8,
            unlock_corruption_max: section.int_or("unlock_corruption_max", 60) as u8,
            unlock_consciousness_min: section.int_or("unlock_consciousness_min", 50) as u8,
            prerequisite_trial_id: (prerequisite > 0).then_some(prerequisite as u32),
            max_attempts: section.int_or("max_attempts", i64::from(DEFAULT_MAX_ATTEMPTS)) as u8,
            score_matters: section.bool_or("score_matters", false),
        }
    }

    /// Load every `[TRIAL:*]` section in file order.
    pub fn load_all(file: &DataFile) -> Vec<TrialDefinition> {
        file.sections_of("TRIAL")
            .enumerate()
            .map(|(i, s)| Self::from_section(s, i))
            .collect()
    }

    /// Materialize the runtime trial slot (status starts locked).
    pub fn into_trial(self) -> ArchonTrial {
        let mut trial = ArchonTrial::new(self.id, self.number, self.name, self.kind);
        trial.description = self.description;
        trial.completion_text = self.completion_text;
        trial.unlock_corruption_min = self.unlock_corruption_min;
        trial.unlock_corruption_max = self.unlock_corruption_max;
        trial.unlock_consciousness_min = self.unlock_consciousness_min;
        trial.prerequisite_trial_id = self.prerequisite_trial_id;
        trial.max_attempts = self.max_attempts;
        trial.score_matters = self.score_matters;
        trial
    }
}
