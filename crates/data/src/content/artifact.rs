//! Artifact definitions loaded from `[ARTIFACT:*]` sections

use serde::{Deserialize, Serialize};

use crate::file::{DataFile, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactRarity {
    /// Minor artifacts
    #[default]
    Uncommon,
    /// Significant artifacts
    Rare,
    /// Major artifacts
    Epic,
    /// Unique legendary artifacts
    Legendary,
}

impl ArtifactRarity {
    pub fn display_name(&self) -> &'static str {
        match self {
            ArtifactRarity::Uncommon => "Uncommon",
            ArtifactRarity::Rare => "Rare",
            ArtifactRarity::Epic => "Epic",
            ArtifactRarity::Legendary => "Legendary",
        }
    }

    pub fn parse(token: &str) -> Self {
        match token {
            "uncommon" => ArtifactRarity::Uncommon,
            "rare" => ArtifactRarity::Rare,
            "epic" => ArtifactRarity::Epic,
            "legendary" => ArtifactRarity::Legendary,
            other => {
                tracing::warn!("Unknown rarity token '{other}', defaulting to uncommon");
                ArtifactRarity::Uncommon
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactEffectKind {
    /// Permanent stat increase
    #[default]
    StatBonus,
    /// Unlock a new ability
    Ability,
    /// Ongoing passive effect
    Passive,
    /// Special unique effect
    Unique,
}

impl ArtifactEffectKind {
    pub fn parse(token: &str) -> Self {
        match token {
            "stat_bonus" => ArtifactEffectKind::StatBonus,
            "ability" => ArtifactEffectKind::Ability,
            "passive" => ArtifactEffectKind::Passive,
            "unique" => ArtifactEffectKind::Unique,
            other => {
                tracing::warn!("Unknown artifact effect token '{other}', defaulting to stat_bonus");
                ArtifactEffectKind::StatBonus
            }
        }
    }
}

/// One discoverable artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub lore: String,
    pub rarity: ArtifactRarity,
    pub effect_kind: ArtifactEffectKind,
    /// Stat name for stat_bonus effects
    pub effect_stat: String,
    pub effect_value: f64,
    /// Ability name for ability effects
    pub effect_ability: String,
    /// How the artifact is found (explore, research, quest)
    pub discovery_method: String,
}

impl ArtifactDefinition {
    pub fn from_section(section: &Section) -> Self {
        Self {
            id: section.id().to_owned(),
            name: section.str_or("name", "Unnamed Artifact").to_owned(),
            description: section.str_or("description", "").to_owned(),
            lore: section.str_or("lore", "").to_owned(),
            rarity: ArtifactRarity::parse(section.str_or("rarity", "uncommon")),
            effect_kind: ArtifactEffectKind::parse(section.str_or("effect_type", "stat_bonus")),
            effect_stat: section.str_or("effect_stat", "").to_owned(),
            effect_value: section.float_or("effect_value", 0.0),
            effect_ability: section.str_or("effect_ability", "").to_owned(),
            discovery_method: section.str_or("discovery_method", "explore").to_owned(),
        }
    }

    /// Load every `[ARTIFACT:*]` section in file order.
    pub fn load_all(file: &DataFile) -> Vec<ArtifactDefinition> {
        file.sections_of("ARTIFACT").map(Self::from_section).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_artifact() {
        let file = DataFile::parse(
            "[ARTIFACT:crown_of_whispers]\n\
             name = Crown of Whispers\n\
             rarity = legendary\n\
             effect_type = passive\n\
             effect_value = 0.15\n\
             discovery_method = research\n",
        );

        let artifacts = ArtifactDefinition::load_all(&file);
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].rarity, ArtifactRarity::Legendary);
        assert_eq!(artifacts[0].effect_kind, ArtifactEffectKind::Passive);
        assert_eq!(artifacts[0].effect_value, 0.15);
    }
}
