//! Spell definitions loaded from `[SPELL:*]` sections

use serde::{Deserialize, Serialize};

use crate::file::{DataFile, Section};

/// How a spell selects its targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpellTarget {
    /// Targets the caster
    #[default]
    SelfTarget,
    /// Targets a single enemy or ally
    Single,
    /// Targets an area / multiple targets
    Area,
    /// Targets a location
    Location,
}

impl SpellTarget {
    pub fn parse(token: &str) -> Self {
        match token {
            "self" => SpellTarget::SelfTarget,
            "single" => SpellTarget::Single,
            "area" => SpellTarget::Area,
            "location" => SpellTarget::Location,
            other => {
                tracing::warn!("Unknown spell target token '{other}', defaulting to self");
                SpellTarget::SelfTarget
            }
        }
    }
}

/// School of magic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpellSchool {
    /// Raising undead, soul manipulation
    #[default]
    Necromancy,
    /// Dark energy, curses
    Shadow,
    /// Death magic, decay
    Death,
    /// Life force, vampiric
    Blood,
    /// Bone magic, conjuration
    Bone,
}

impl SpellSchool {
    pub fn parse(token: &str) -> Self {
        match token {
            "necromancy" => SpellSchool::Necromancy,
            "shadow" => SpellSchool::Shadow,
            "death" => SpellSchool::Death,
            "blood" => SpellSchool::Blood,
            "bone" => SpellSchool::Bone,
            other => {
                tracing::warn!("Unknown spell school token '{other}', defaulting to necromancy");
                SpellSchool::Necromancy
            }
        }
    }
}

/// One castable spell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub mana_cost: u32,
    pub soul_cost: u32,
    /// Turns before the spell can be cast again
    pub cooldown: u8,
    pub target: SpellTarget,
    pub unlock_level: u8,
    pub school: SpellSchool,
    /// Effect family (damage, summon, drain, ...)
    pub effect_kind: String,
    pub effect_value: u32,
}

impl SpellDefinition {
    pub fn from_section(section: &Section) -> Self {
        Self {
            id: section.id().to_owned(),
            name: section.str_or("name", "Unnamed Spell").to_owned(),
            description: section.str_or("description", "").to_owned(),
            mana_cost: section.int_or("mana_cost", 0) as u32,
            soul_cost: section.int_or("soul_cost", 0) as u32,
            cooldown: section.int_or("cooldown", 0) as u8,
            target: SpellTarget::parse(section.str_or("target", "self")),
            unlock_level: section.int_or("unlock_level", 1) as u8,
            school: SpellSchool::parse(section.str_or("school", "necromancy")),
            effect_kind: section.str_or("effect_type", "damage").to_owned(),
            effect_value: section.int_or("effect_value", 0) as u32,
        }
    }

    /// Load every `[SPELL:*]` section in file order.
    pub fn load_all(file: &DataFile) -> Vec<SpellDefinition> {
        file.sections_of("SPELL").map(Self::from_section).collect()
    }
}
