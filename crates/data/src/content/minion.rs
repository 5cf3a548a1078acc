//! Minion type definitions loaded from `[MINION:*]` sections

use serde::{Deserialize, Serialize};

use crate::file::{DataFile, Section};

/// The undead servant roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MinionKind {
    /// Tanky, slow
    #[default]
    Zombie,
    /// Fast, fragile
    Skeleton,
    /// Aggressive melee
    Ghoul,
    /// Ethereal magic
    Wraith,
    /// Elite warrior
    Wight,
    /// Powerful, intelligent
    Revenant,
}

impl MinionKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            MinionKind::Zombie => "Zombie",
            MinionKind::Skeleton => "Skeleton",
            MinionKind::Ghoul => "Ghoul",
            MinionKind::Wraith => "Wraith",
            MinionKind::Wight => "Wight",
            MinionKind::Revenant => "Revenant",
        }
    }

    pub fn parse(token: &str) -> Self {
        match token {
            "zombie" => MinionKind::Zombie,
            "skeleton" => MinionKind::Skeleton,
            "ghoul" => MinionKind::Ghoul,
            "wraith" => MinionKind::Wraith,
            "wight" => MinionKind::Wight,
            "revenant" => MinionKind::Revenant,
            other => {
                tracing::warn!("Unknown minion kind token '{other}', defaulting to zombie");
                MinionKind::Zombie
            }
        }
    }
}

/// Base stats for one minion type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinionDefinition {
    pub kind: MinionKind,
    pub name: String,
    pub description: String,
    pub base_health: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_speed: u32,
    /// Starting loyalty (0-100)
    pub base_loyalty: u8,
    /// Soul energy cost to raise
    pub raise_cost: u32,
    pub unlock_level: u8,
    /// Battlefield role (tank, scout, striker, ...)
    pub role: String,
    pub specialization: String,
}

impl MinionDefinition {
    /// Build from a `[MINION:*]` section; every field has a default so a
    /// partially-specified section still loads.
    pub fn from_section(section: &Section) -> Self {
        Self {
            kind: MinionKind::parse(section.id()),
            name: section.str_or("name", "Unnamed Minion").to_owned(),
            description: section.str_or("description", "").to_owned(),
            base_health: section.int_or("base_health", 50) as u32,
            base_attack: section.int_or("base_attack", 10) as u32,
            base_defense: section.int_or("base_defense", 10) as u32,
            base_speed: section.int_or("base_speed", 10) as u32,
            base_loyalty: section.int_or("base_loyalty", 50).clamp(0, 100) as u8,
            raise_cost: section.int_or("raise_cost", 100) as u32,
            unlock_level: section.int_or("unlock_level", 1) as u8,
            role: section.str_or("role", "tank").to_owned(),
            specialization: section.str_or("specialization", "").to_owned(),
        }
    }

    /// Load every `[MINION:*]` section in file order.
    pub fn load_all(file: &DataFile) -> Vec<MinionDefinition> {
        file.sections_of("MINION").map(Self::from_section).collect()
    }
}
