//! Skill tree definitions loaded from `[SKILL:*]` sections

use serde::{Deserialize, Serialize};

use crate::file::{DataFile, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    /// Combat effectiveness
    #[default]
    Combat,
    /// Minion bonuses
    Necromancy,
    /// Resource management
    Utility,
    /// Late-game powerful bonuses
    Mastery,
}

impl SkillCategory {
    pub fn parse(token: &str) -> Self {
        match token {
            "combat" => SkillCategory::Combat,
            "necromancy" => SkillCategory::Necromancy,
            "utility" => SkillCategory::Utility,
            "mastery" => SkillCategory::Mastery,
            other => {
                tracing::warn!("Unknown skill category token '{other}', defaulting to combat");
                SkillCategory::Combat
            }
        }
    }
}

/// One node of the progression tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Maximum investment level
    pub max_rank: u8,
    /// Player level required for rank 1
    pub unlock_level: u8,
    pub category: SkillCategory,
    /// Required skill id, `None` for roots
    pub prerequisite: Option<String>,
    pub effect_per_rank: u32,
    pub effect_kind: String,
}

impl SkillDefinition {
    pub fn from_section(section: &Section) -> Self {
        let prerequisite = match section.str_or("prerequisite", "none") {
            "none" | "" => None,
            other => Some(other.to_owned()),
        };

        Self {
            id: section.id().to_owned(),
            name: section.str_or("name", "Unnamed Skill").to_owned(),
            description: section.str_or("description", "").to_owned(),
            max_rank: section.int_or("max_rank", 1) as u8,
            unlock_level: section.int_or("unlock_level", 1) as u8,
            category: SkillCategory::parse(section.str_or("category", "combat")),
            prerequisite,
            effect_per_rank: section.int_or("effect_per_rank", 0) as u32,
            effect_kind: section.str_or("effect_type", "").to_owned(),
        }
    }

    /// Load every `[SKILL:*]` section in file order.
    pub fn load_all(file: &DataFile) -> Vec<SkillDefinition> {
        file.sections_of("SKILL").map(Self::from_section).collect()
    }
}
