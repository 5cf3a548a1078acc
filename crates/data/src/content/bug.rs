//! Soul-routing system defect records loaded from `[BUG:*]` sections
//!
//! The technical trial's audit table: each record pins a defect to a line
//! of the reviewed listing with a classification and a hint.

use serde::{Deserialize, Serialize};

use crate::file::{DataFile, Section};

/// How a defect is classified by the auditor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BugKind {
    /// Incorrect behavior
    #[default]
    LogicError,
    /// Wasteful but correct
    Inefficiency,
    /// Correct code, unjust policy
    Injustice,
}

impl BugKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            BugKind::LogicError => "Logic Error",
            BugKind::Inefficiency => "Inefficiency",
            BugKind::Injustice => "Injustice",
        }
    }

    pub fn parse(token: &str) -> Self {
        match token {
            "logic_error" => BugKind::LogicError,
            "inefficiency" => BugKind::Inefficiency,
            "injustice" => BugKind::Injustice,
            other => {
                tracing::warn!("Unknown bug kind token '{other}', defaulting to logic_error");
                BugKind::LogicError
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BugSeverity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl BugSeverity {
    pub fn display_name(&self) -> &'static str {
        match self {
            BugSeverity::Low => "Low",
            BugSeverity::Medium => "Medium",
            BugSeverity::High => "High",
            BugSeverity::Critical => "Critical",
        }
    }

    pub fn parse(token: &str) -> Self {
        match token {
            "low" => BugSeverity::Low,
            "medium" => BugSeverity::Medium,
            "high" => BugSeverity::High,
            "critical" => BugSeverity::Critical,
            other => {
                tracing::warn!("Unknown severity token '{other}', defaulting to medium");
                BugSeverity::Medium
            }
        }
    }
}

/// One defect in the audited listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugDefinition {
    /// 1-based line in the reviewed source
    pub line: u32,
    pub kind: BugKind,
    pub severity: BugSeverity,
    pub description: String,
    pub hint: String,
}

impl BugDefinition {
    pub fn from_section(section: &Section) -> Self {
        Self {
            line: section.int_or("line", 0) as u32,
            kind: BugKind::parse(section.str_or("type", "logic_error")),
            severity: BugSeverity::parse(section.str_or("severity", "medium")),
            description: section.str_or("description", "").to_owned(),
            hint: section.str_or("hint", "").to_owned(),
        }
    }

    /// Load every `[BUG:*]` section in file order.
    pub fn load_all(file: &DataFile) -> Vec<BugDefinition> {
        file.sections_of("BUG").map(Self::from_section).collect()
    }
}
