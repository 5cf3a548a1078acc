//! Endurance challenge tuning loaded from `[CHALLENGE:*]` sections
//!
//! Parameters for the thirty-day vigil: daily corruption drift, the hard
//! cap, temptation pricing, and the mentor's one-time intervention window.

use serde::{Deserialize, Serialize};

use crate::file::{DataFile, Section};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeDefinition {
    pub duration_days: u32,
    pub chamber_location: String,
    pub corruption_daily_increase: f64,
    pub corruption_max_allowed: u8,
    /// Corruption cost of accepting a temptation
    pub temptation_corruption: u8,
    /// Soul energy granted for accepting a temptation
    pub temptation_reward: i64,
    pub thessara_help_day: u32,
    pub thessara_help_threshold: u8,
    /// Signed corruption change from the intervention
    pub thessara_help_amount: i32,
}

impl Default for ChallengeDefinition {
    fn default() -> Self {
        Self {
            duration_days: 30,
            chamber_location: "Chamber of Corrupted Souls".to_owned(),
            corruption_daily_increase: 0.4,
            corruption_max_allowed: 60,
            temptation_corruption: 10,
            temptation_reward: 5000,
            thessara_help_day: 20,
            thessara_help_threshold: 55,
            thessara_help_amount: -5,
        }
    }
}

impl ChallengeDefinition {
    pub fn from_section(section: &Section) -> Self {
        let defaults = Self::default();
        Self {
            duration_days: section.int_or("duration_days", i64::from(defaults.duration_days))
                as u32,
            chamber_location: section
                .str_or("chamber_location", &defaults.chamber_location)
                .to_owned(),
            corruption_daily_increase: section
                .float_or("corruption_daily_increase", defaults.corruption_daily_increase),
            corruption_max_allowed: section
                .int_or("corruption_max_allowed", i64::from(defaults.corruption_max_allowed))
                as u8,
            temptation_corruption: section
                .int_or("temptation_corruption", i64::from(defaults.temptation_corruption))
                as u8,
            temptation_reward: section.int_or("temptation_reward", defaults.temptation_reward),
            thessara_help_day: section
                .int_or("thessara_help_day", i64::from(defaults.thessara_help_day))
                as u32,
            thessara_help_threshold: section
                .int_or("thessara_help_threshold", i64::from(defaults.thessara_help_threshold))
                as u8,
            thessara_help_amount: section
                .int_or("thessara_help_amount", i64::from(defaults.thessara_help_amount))
                as i32,
        }
    }

    /// First `[CHALLENGE:*]` section, or defaults when the file has none.
    pub fn load_first(file: &DataFile) -> Self {
        file.sections_of("CHALLENGE")
            .next()
            .map_or_else(Self::default, Self::from_section)
    }
}
