//! Trial sequence controller - the seven-stage Archon gauntlet
//!
//! Seven trial slots in a prerequisite chain. Each slot runs
//! `Locked -> Available -> InProgress -> {Passed, back to Available,
//! Failed}`. The path itself activates only in the mid-corruption band
//! and dies permanently the moment any trial exhausts its attempts.

use std::path::Path;

use necroshell_data::content::TrialDefinition;
use necroshell_data::{DataError, DataFile};
use necroshell_domain::{ArchonTrial, TrialStatus, ARCHON_TRIAL_COUNT};

/// Corruption band (inclusive) the Archon path requires
pub const PATH_CORRUPTION_MIN: u8 = 30;
pub const PATH_CORRUPTION_MAX: u8 = 60;
/// Minimum consciousness to walk the path
pub const PATH_CONSCIOUSNESS_MIN: f32 = 50.0;

/// The seven-trial prerequisite chain and its path-level bookkeeping
#[derive(Debug, Default)]
pub struct TrialSequence {
    trials: Vec<ArchonTrial>,
    current_trial_id: Option<u32>,
    path_active: bool,
    path_completed: bool,
    path_failed: bool,
}

impl TrialSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `[TRIAL:*]` sections from a data file on disk.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, DataError> {
        let file = DataFile::load(path)?;
        Ok(self.load(&file))
    }

    /// Populate the trial slots from parsed data, capped at seven. Every
    /// slot starts locked.
    pub fn load(&mut self, file: &DataFile) -> usize {
        let definitions = TrialDefinition::load_all(file);
        if definitions.len() > ARCHON_TRIAL_COUNT {
            tracing::warn!(
                count = definitions.len(),
                "more than {ARCHON_TRIAL_COUNT} trial sections, extras ignored"
            );
        }

        self.trials = definitions
            .into_iter()
            .take(ARCHON_TRIAL_COUNT)
            .map(TrialDefinition::into_trial)
            .collect();

        tracing::info!(count = self.trials.len(), "trials loaded");
        self.trials.len()
    }

    pub fn trials(&self) -> &[ArchonTrial] {
        &self.trials
    }

    pub fn get(&self, trial_id: u32) -> Option<&ArchonTrial> {
        self.trials.iter().find(|t| t.id == trial_id)
    }

    fn get_mut(&mut self, trial_id: u32) -> Option<&mut ArchonTrial> {
        self.trials.iter_mut().find(|t| t.id == trial_id)
    }

    pub fn by_number(&self, number: u32) -> Option<&ArchonTrial> {
        self.trials.iter().find(|t| t.number == number)
    }

    /// The trial currently in progress, if any.
    pub fn current(&self) -> Option<&ArchonTrial> {
        self.current_trial_id.and_then(|id| self.get(id))
    }

    pub fn is_path_active(&self) -> bool {
        self.path_active
    }

    pub fn is_path_completed(&self) -> bool {
        self.path_completed
    }

    pub fn is_path_failed(&self) -> bool {
        self.path_failed
    }

    pub fn passed_count(&self) -> usize {
        self.trials
            .iter()
            .filter(|t| t.status == TrialStatus::Passed)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.trials
            .iter()
            .filter(|t| t.status == TrialStatus::Failed)
            .count()
    }

    /// Whether every one of the seven slots is passed.
    pub fn all_passed(&self) -> bool {
        self.trials.len() == ARCHON_TRIAL_COUNT && self.passed_count() == self.trials.len()
    }

    /// Unlock predicate: locked slot, corruption inside the trial's band,
    /// consciousness at or above its floor, prerequisite passed.
    pub fn can_unlock(&self, trial_id: u32, corruption: u8, consciousness: f32) -> bool {
        if self.path_failed {
            return false;
        }

        let Some(trial) = self.get(trial_id) else {
            return false;
        };

        if trial.status != TrialStatus::Locked {
            return false;
        }
        if corruption < trial.unlock_corruption_min || corruption > trial.unlock_corruption_max {
            return false;
        }
        if consciousness < f32::from(trial.unlock_consciousness_min) {
            return false;
        }

        match trial.prerequisite_trial_id {
            None => true,
            Some(prereq_id) => self
                .get(prereq_id)
                .is_some_and(|p| p.status == TrialStatus::Passed),
        }
    }

    /// Move a locked trial to available when the unlock predicate holds.
    pub fn unlock(&mut self, trial_id: u32, corruption: u8, consciousness: f32) -> bool {
        if !self.can_unlock(trial_id, corruption, consciousness) {
            return false;
        }

        if let Some(trial) = self.get_mut(trial_id) {
            trial.status = TrialStatus::Available;
            tracing::info!(trial = trial_id, "trial unlocked");
            return true;
        }
        false
    }

    /// Begin an available trial. A trial whose retry budget is already
    /// spent flips straight to failed instead.
    pub fn start(&mut self, trial_id: u32) -> bool {
        if self.path_failed {
            return false;
        }

        let Some(trial) = self.get_mut(trial_id) else {
            return false;
        };

        if trial.status != TrialStatus::Available {
            return false;
        }

        if trial.attempts_exhausted() {
            trial.status = TrialStatus::Failed;
            tracing::warn!(trial = trial_id, "trial start refused, attempts exhausted");
            return false;
        }

        trial.status = TrialStatus::InProgress;
        self.current_trial_id = Some(trial_id);
        tracing::info!(trial = trial_id, "trial started");
        true
    }

    /// Pass an in-progress trial, recording the score when it matters.
    /// Completing the seventh slot completes the path.
    pub fn complete(&mut self, trial_id: u32, score: f32) -> bool {
        let Some(trial) = self.get_mut(trial_id) else {
            return false;
        };

        if trial.status != TrialStatus::InProgress {
            return false;
        }

        if trial.score_matters && score > trial.best_score {
            trial.best_score = score;
        }
        trial.status = TrialStatus::Passed;
        self.current_trial_id = None;

        tracing::info!(trial = trial_id, score, "trial passed");

        if self.all_passed() {
            self.path_completed = true;
            tracing::info!("Archon path completed");
        }
        true
    }

    /// Fail an in-progress trial. Returns `true` when a retry remains;
    /// exhausting the budget permanently fails both the trial and the
    /// path.
    pub fn fail(&mut self, trial_id: u32) -> bool {
        let Some(trial) = self.get_mut(trial_id) else {
            return false;
        };

        if trial.status != TrialStatus::InProgress {
            return false;
        }

        trial.attempts_made += 1;

        if trial.attempts_exhausted() {
            trial.status = TrialStatus::Failed;
            self.path_failed = true;
            self.current_trial_id = None;
            tracing::warn!(trial = trial_id, "trial permanently failed");
            return false;
        }

        trial.status = TrialStatus::Available;
        tracing::info!(
            trial = trial_id,
            attempts = trial.attempts_made,
            "trial failed, retry available"
        );
        self.current_trial_id = None;
        true
    }

    /// Whether the path can still be completed at the given corruption.
    /// Stepping outside the band while active makes the path unavailable;
    /// a permanent trial failure already did.
    pub fn path_available(&self, corruption: u8) -> bool {
        if self.path_failed {
            return false;
        }
        if self.path_active
            && !(PATH_CORRUPTION_MIN..=PATH_CORRUPTION_MAX).contains(&corruption)
        {
            return false;
        }
        true
    }

    /// Activate the Archon path and auto-unlock the first trial.
    pub fn activate_path(&mut self, corruption: u8, consciousness: f32) -> bool {
        if !(PATH_CORRUPTION_MIN..=PATH_CORRUPTION_MAX).contains(&corruption) {
            return false;
        }
        if consciousness < PATH_CONSCIOUSNESS_MIN {
            return false;
        }

        self.path_active = true;
        tracing::info!(corruption, consciousness, "Archon path activated");

        if let Some(first_id) = self.trials.first().map(|t| t.id) {
            self.unlock(first_id, corruption, consciousness);
        }
        true
    }
}
