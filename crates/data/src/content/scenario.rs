//! Moral-choice scenarios loaded from `[SCENARIO:*]` sections
//!
//! Two trials are driven by scenario data: the village dilemma (save,
//! harvest, or walk away) and the child-versus-mentor sacrifice.

use serde::{Deserialize, Serialize};

use crate::file::{DataFile, Section};
use crate::value::Value;

/// A resource cost that may be a fixed amount or everything the player has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SaveCost {
    /// The token `all`: whatever the player currently holds
    #[default]
    All,
    Amount(i64),
}

impl SaveCost {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => SaveCost::All,
            Some(v) => {
                if v.as_str_or("") == "all" {
                    SaveCost::All
                } else {
                    match v {
                        Value::Int(amount) => SaveCost::Amount(*amount),
                        _ => SaveCost::All,
                    }
                }
            }
        }
    }
}

/// The village dilemma presented by the Divine Architects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VillageScenario {
    pub village_name: String,
    pub population: u32,
    pub children_count: u32,
    pub save_cost_energy: SaveCost,
    pub save_cost_mana: SaveCost,
    /// Signed corruption change for saving (negative = cleansing)
    pub save_corruption_change: i32,
    pub harvest_reward_energy: i64,
    pub harvest_corruption_change: i32,
    pub anara_reaction_save: String,
    pub anara_reaction_harvest: String,
    pub thalor_reaction_save: String,
    pub thalor_reaction_harvest: String,
}

impl Default for VillageScenario {
    fn default() -> Self {
        Self {
            village_name: "Ashford".to_owned(),
            population: 100,
            children_count: 23,
            save_cost_energy: SaveCost::All,
            save_cost_mana: SaveCost::All,
            save_corruption_change: -5,
            harvest_reward_energy: 50_000,
            harvest_corruption_change: 25,
            anara_reaction_save: String::new(),
            anara_reaction_harvest: String::new(),
            thalor_reaction_save: String::new(),
            thalor_reaction_harvest: String::new(),
        }
    }
}

impl VillageScenario {
    pub fn from_section(section: &Section) -> Self {
        let defaults = Self::default();
        Self {
            village_name: section.str_or("village_name", &defaults.village_name).to_owned(),
            population: section.int_or("population", i64::from(defaults.population)) as u32,
            children_count: section.int_or("children_count", i64::from(defaults.children_count))
                as u32,
            save_cost_energy: SaveCost::from_value(section.get("save_cost_energy")),
            save_cost_mana: SaveCost::from_value(section.get("save_cost_mana")),
            save_corruption_change: section
                .int_or("save_corruption_change", i64::from(defaults.save_corruption_change))
                as i32,
            harvest_reward_energy: section
                .int_or("harvest_reward", defaults.harvest_reward_energy),
            harvest_corruption_change: section.int_or(
                "harvest_corruption_change",
                i64::from(defaults.harvest_corruption_change),
            ) as i32,
            anara_reaction_save: section.str_or("anara_reaction_save", "").to_owned(),
            anara_reaction_harvest: section.str_or("anara_reaction_harvest", "").to_owned(),
            thalor_reaction_save: section.str_or("thalor_reaction_save", "").to_owned(),
            thalor_reaction_harvest: section.str_or("thalor_reaction_harvest", "").to_owned(),
        }
    }

    /// First `[SCENARIO:*]` section, or defaults when the file has none.
    pub fn load_first(file: &DataFile) -> Self {
        file.sections_of("SCENARIO")
            .next()
            .map_or_else(Self::default, Self::from_section)
    }
}

/// The child whose life is weighed against the mentor bond
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildScenario {
    pub child_name: String,
    pub child_age: u8,
    pub child_location: String,
    pub time_limit_hours: u32,
    pub thessara_encouragement: String,
    pub thessara_final_message: String,
    pub thessara_sadness_message: String,
    pub child_fate_saved: String,
    pub child_fate_died: String,
    /// Whether the choice, once made, can never be revisited
    pub sacrifice_permanent: bool,
}

impl Default for ChildScenario {
    fn default() -> Self {
        Self {
            child_name: "Maya".to_owned(),
            child_age: 7,
            child_location: "Millbrook".to_owned(),
            time_limit_hours: 24,
            thessara_encouragement:
                "She's just a child. Seven years old. I've had centuries. Save her.".to_owned(),
            thessara_final_message:
                "I'm proud of you. Fix the system. You were never alone.".to_owned(),
            thessara_sadness_message: "I understand. But Maya deserved better.".to_owned(),
            child_fate_saved:
                "Maya lives. She grows up to become a healer, saving hundreds.".to_owned(),
            child_fate_died: "Maya dies alone. The village mourns.".to_owned(),
            sacrifice_permanent: true,
        }
    }
}

impl ChildScenario {
    pub fn from_section(section: &Section) -> Self {
        let defaults = Self::default();
        Self {
            child_name: section.str_or("child_name", &defaults.child_name).to_owned(),
            child_age: section.int_or("child_age", i64::from(defaults.child_age)) as u8,
            child_location: section
                .str_or("child_location", &defaults.child_location)
                .to_owned(),
            time_limit_hours: section
                .int_or("time_limit_hours", i64::from(defaults.time_limit_hours))
                as u32,
            thessara_encouragement: section
                .str_or("thessara_encouragement", &defaults.thessara_encouragement)
                .to_owned(),
            thessara_final_message: section
                .str_or("thessara_final_message", &defaults.thessara_final_message)
                .to_owned(),
            thessara_sadness_message: section
                .str_or("thessara_sadness_message", &defaults.thessara_sadness_message)
                .to_owned(),
            child_fate_saved: section
                .str_or("maya_fate_saved", &defaults.child_fate_saved)
                .to_owned(),
            child_fate_died: section
                .str_or("maya_fate_died", &defaults.child_fate_died)
                .to_owned(),
            sacrifice_permanent: section
                .bool_or("sacrifice_permanent", defaults.sacrifice_permanent),
        }
    }

    /// First `[SCENARIO:*]` section, or defaults when the file has none.
    pub fn load_first(file: &DataFile) -> Self {
        file.sections_of("SCENARIO")
            .next()
            .map_or_else(Self::default, Self::from_section)
    }
}
