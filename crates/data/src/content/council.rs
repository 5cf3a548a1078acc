//! Council member definitions loaded from `[MEMBER:*]` sections
//!
//! These seed the leadership trial: six regional council members with
//! corruption levels to reform and attitudes to win over.

use serde::{Deserialize, Serialize};

use crate::file::{DataFile, Section};

/// How strongly a member resists reform pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Resistance {
    Low,
    #[default]
    Medium,
    High,
}

impl Resistance {
    pub fn display_name(&self) -> &'static str {
        match self {
            Resistance::Low => "Low",
            Resistance::Medium => "Medium",
            Resistance::High => "High",
        }
    }

    pub fn parse(token: &str) -> Self {
        match token {
            "low" => Resistance::Low,
            "medium" => Resistance::Medium,
            "high" => Resistance::High,
            other => {
                tracing::warn!("Unknown resistance token '{other}', defaulting to medium");
                Resistance::Medium
            }
        }
    }
}

/// A member's disposition toward the reform program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Attitude {
    Hostile,
    #[default]
    Neutral,
    Supportive,
}

impl Attitude {
    pub fn display_name(&self) -> &'static str {
        match self {
            Attitude::Hostile => "Hostile",
            Attitude::Neutral => "Neutral",
            Attitude::Supportive => "Supportive",
        }
    }

    pub fn parse(token: &str) -> Self {
        match token {
            "hostile" => Attitude::Hostile,
            "neutral" => Attitude::Neutral,
            "supportive" => Attitude::Supportive,
            other => {
                tracing::warn!("Unknown attitude token '{other}', defaulting to neutral");
                Attitude::Neutral
            }
        }
    }

    /// Seed score for a starting attitude.
    pub fn starting_score(&self) -> i32 {
        match self {
            Attitude::Hostile => -50,
            Attitude::Neutral => 0,
            Attitude::Supportive => 50,
        }
    }

    /// Re-derive the attitude tier from a score in `[-100, 100]`.
    pub fn from_score(score: i32) -> Self {
        if score <= -25 {
            Attitude::Hostile
        } else if score >= 25 {
            Attitude::Supportive
        } else {
            Attitude::Neutral
        }
    }
}

/// One regional council member as authored in data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilMemberDefinition {
    /// NPC id, taken from the section identifier
    pub npc_id: String,
    pub name: String,
    pub corruption_start: f64,
    /// Individual reform goal; defaults to 90% of the starting value
    pub corruption_target: f64,
    pub resistance: Resistance,
    pub attitude_start: Attitude,
    pub specialty: String,
}

impl CouncilMemberDefinition {
    pub fn from_section(section: &Section) -> Self {
        let corruption_start = section.float_or("corruption_start", 50.0);
        let default_target = corruption_start * 0.9;

        Self {
            npc_id: section.id().to_owned(),
            name: section.str_or("name", "Unknown").to_owned(),
            corruption_start,
            corruption_target: section.float_or("corruption_target", default_target),
            resistance: Resistance::parse(section.str_or("resistance", "medium")),
            attitude_start: Attitude::parse(section.str_or("attitude_start", "neutral")),
            specialty: section.str_or("specialty", "general").to_owned(),
        }
    }

    /// Load every `[MEMBER:*]` section in file order.
    pub fn load_all(file: &DataFile) -> Vec<CouncilMemberDefinition> {
        file.sections_of("MEMBER").map(Self::from_section).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_member() {
        let file = DataFile::parse(
            "[MEMBER:mordak]\n\
             name = Councilor Mordak\n\
             corruption_start = 80\n\
             resistance = high\n\
             attitude_start = hostile\n\
             specialty = soul_taxation\n",
        );

        let members = CouncilMemberDefinition::load_all(&file);
        assert_eq!(members.len(), 1);
        let m = &members[0];
        assert_eq!(m.npc_id, "mordak");
        assert_eq!(m.resistance, Resistance::High);
        assert_eq!(m.attitude_start, Attitude::Hostile);
        // Target defaults to 90% of start
        assert!((m.corruption_target - 72.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attitude_score_mapping() {
        assert_eq!(Attitude::from_score(-25), Attitude::Hostile);
        assert_eq!(Attitude::from_score(-24), Attitude::Neutral);
        assert_eq!(Attitude::from_score(24), Attitude::Neutral);
        assert_eq!(Attitude::from_score(25), Attitude::Supportive);
    }
}
