//! Archon trial descriptor - one of the seven stages of the Archon path
//!
//! The descriptor carries the data-driven unlock conditions and the
//! runtime status/attempt/score slots. The prerequisite chain and path
//! bookkeeping live in the trial sequence controller.

use serde::{Deserialize, Serialize};

/// Number of trials on the Archon path
pub const ARCHON_TRIAL_COUNT: usize = 7;

/// Default retry budget per trial (0 would mean unlimited)
pub const DEFAULT_MAX_ATTEMPTS: u8 = 3;

/// Where a trial sits in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrialStatus {
    /// Not yet unlocked
    #[default]
    Locked,
    /// Unlocked but not started
    Available,
    /// Currently active
    InProgress,
    /// Successfully completed
    Passed,
    /// Failed (exhausted attempts or disqualified)
    Failed,
}

impl TrialStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            TrialStatus::Locked => "Locked",
            TrialStatus::Available => "Available",
            TrialStatus::InProgress => "In Progress",
            TrialStatus::Passed => "Passed",
            TrialStatus::Failed => "Failed",
        }
    }
}

/// What discipline a trial tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrialKind {
    /// Combat/power trial
    #[default]
    Combat,
    /// Logic/wisdom trial
    Puzzle,
    /// Ethical choice trial
    Moral,
    /// Skill/technique trial
    Technical,
    /// Give up something valuable
    Sacrifice,
    /// Command/influence trial
    Leadership,
    /// Endurance/determination trial
    Resolve,
}

impl TrialKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            TrialKind::Combat => "Combat",
            TrialKind::Puzzle => "Puzzle",
            TrialKind::Moral => "Moral",
            TrialKind::Technical => "Technical",
            TrialKind::Sacrifice => "Sacrifice",
            TrialKind::Leadership => "Leadership",
            TrialKind::Resolve => "Resolve",
        }
    }

    /// Parse the lowercase data-file token. Unknown tokens yield `Combat`.
    pub fn parse(token: &str) -> Self {
        match token {
            "combat" => TrialKind::Combat,
            "puzzle" => TrialKind::Puzzle,
            "moral" => TrialKind::Moral,
            "technical" => TrialKind::Technical,
            "sacrifice" => TrialKind::Sacrifice,
            "leadership" => TrialKind::Leadership,
            "resolve" => TrialKind::Resolve,
            other => {
                tracing::warn!("Unknown trial kind token '{other}', defaulting to combat");
                TrialKind::Combat
            }
        }
    }
}

/// One Archon trial slot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchonTrial {
    pub id: u32,
    /// Position in the gauntlet (1-7)
    pub number: u32,
    pub name: String,
    pub description: String,
    pub kind: TrialKind,
    pub status: TrialStatus,
    pub attempts_made: u8,
    /// Maximum attempts allowed (0 = unlimited)
    pub max_attempts: u8,
    /// Best performance score so far (0-100)
    pub best_score: f32,
    /// Whether score affects the outcome record
    pub score_matters: bool,
    pub completion_text: String,

    // Unlock conditions
    pub unlock_corruption_min: u8,
    pub unlock_corruption_max: u8,
    pub unlock_consciousness_min: u8,
    /// Trial that must be passed first
    pub prerequisite_trial_id: Option<u32>,
}

impl ArchonTrial {
    pub fn new(id: u32, number: u32, name: impl Into<String>, kind: TrialKind) -> Self {
        Self {
            id,
            number,
            name: name.into(),
            description: String::new(),
            kind,
            status: TrialStatus::Locked,
            attempts_made: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            best_score: 0.0,
            score_matters: false,
            completion_text: String::new(),
            unlock_corruption_min: 30,
            unlock_corruption_max: 60,
            unlock_consciousness_min: 50,
            prerequisite_trial_id: None,
        }
    }

    /// Whether the retry budget is spent (a zero budget never exhausts).
    pub fn attempts_exhausted(&self) -> bool {
        self.max_attempts > 0 && self.attempts_made >= self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trial_is_locked() {
        let trial = ArchonTrial::new(1, 1, "Trial of Power", TrialKind::Combat);
        assert_eq!(trial.status, TrialStatus::Locked);
        assert_eq!(trial.attempts_made, 0);
        assert!(!trial.attempts_exhausted());
    }

    #[test]
    fn test_attempts_exhausted() {
        let mut trial = ArchonTrial::new(2, 2, "Trial of Wisdom", TrialKind::Puzzle);
        trial.attempts_made = 3;
        assert!(trial.attempts_exhausted());

        // Unlimited budget never exhausts
        trial.max_attempts = 0;
        assert!(!trial.attempts_exhausted());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(TrialKind::parse("leadership"), TrialKind::Leadership);
        assert_eq!(TrialKind::parse("???"), TrialKind::Combat);
    }
}
