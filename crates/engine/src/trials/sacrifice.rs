//! Trial of Sacrifice - the child or the mentor
//!
//! A dying child can be saved only by permanently severing the bond with
//! Thessara. Saving the child passes; keeping the mentor fails. The
//! trial never touches the NPC registry itself: severance is published as
//! an outbound signal the integration routes by id.

use necroshell_data::content::ChildScenario;
use necroshell_domain::NpcId;
use serde::{Deserialize, Serialize};

use super::TrialSignal;

/// The two ways to answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SacrificeChoice {
    #[default]
    Undecided,
    /// Sever the mentor bond and save the child - the only pass
    SaveChild,
    /// Keep the bond and let the child die
    KeepThessara,
}

impl SacrificeChoice {
    pub fn display_name(&self) -> &'static str {
        match self {
            SacrificeChoice::Undecided => "No Choice",
            SacrificeChoice::SaveChild => "Save Child (Sacrifice Thessara)",
            SacrificeChoice::KeepThessara => "Keep Thessara (Let Child Die)",
        }
    }
}

/// Choice state for the sixth trial
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SacrificeTrial {
    active: bool,
    scenario: ChildScenario,
    /// The mentor whose bond is on the line
    mentor_npc_id: NpcId,
    choice: SacrificeChoice,
    thessara_severed: bool,
    child_saved: bool,
    pending_signal: Option<TrialSignal>,
}

impl Default for SacrificeTrial {
    fn default() -> Self {
        Self::new()
    }
}

impl SacrificeTrial {
    pub fn new() -> Self {
        Self {
            active: false,
            scenario: ChildScenario::default(),
            mentor_npc_id: NpcId::new("thessara"),
            choice: SacrificeChoice::Undecided,
            thessara_severed: false,
            child_saved: false,
            pending_signal: None,
        }
    }

    /// Reset and present the choice.
    pub fn start(&mut self, scenario: ChildScenario) {
        self.scenario = scenario;
        self.active = true;
        self.choice = SacrificeChoice::Undecided;
        self.thessara_severed = false;
        self.child_saved = false;
        self.pending_signal = None;
    }

    pub fn with_mentor(mut self, npc_id: impl Into<NpcId>) -> Self {
        self.mentor_npc_id = npc_id.into();
        self
    }

    pub fn scenario(&self) -> &ChildScenario {
        &self.scenario
    }

    pub fn choice(&self) -> SacrificeChoice {
        self.choice
    }

    pub fn is_thessara_severed(&self) -> bool {
        self.thessara_severed
    }

    pub fn is_child_saved(&self) -> bool {
        self.child_saved
    }

    /// Sever the bond, save the child. Passes the trial and queues the
    /// severance signal for the surrounding integration.
    pub fn choose_save_child(&mut self) -> bool {
        if !self.active || !self.can_choose() {
            return false;
        }

        self.choice = SacrificeChoice::SaveChild;
        self.thessara_severed = true;
        self.child_saved = true;
        self.active = false;
        self.pending_signal = Some(TrialSignal::MentorBondSevered {
            npc_id: self.mentor_npc_id.clone(),
        });

        tracing::info!(child = %self.scenario.child_name, "child saved, mentor bond severed");
        true
    }

    /// Keep the bond; the child dies. Fails the trial.
    pub fn choose_keep_thessara(&mut self) -> bool {
        if !self.active || !self.can_choose() {
            return false;
        }

        self.choice = SacrificeChoice::KeepThessara;
        self.thessara_severed = false;
        self.child_saved = false;
        self.active = false;

        tracing::info!(child = %self.scenario.child_name, "mentor bond kept");
        false
    }

    /// Drain the queued outbound notification, if any. The integration
    /// routes it to the NPC registry; this engine holds no references.
    pub fn take_signal(&mut self) -> Option<TrialSignal> {
        self.pending_signal.take()
    }

    fn can_choose(&self) -> bool {
        self.choice == SacrificeChoice::Undecided || !self.scenario.sacrifice_permanent
    }

    pub fn is_complete(&self) -> bool {
        self.choice != SacrificeChoice::Undecided
    }

    pub fn is_passed(&self) -> bool {
        self.choice == SacrificeChoice::SaveChild
    }

    /// Perfect selflessness or nothing.
    pub fn score(&self) -> f32 {
        if self.choice == SacrificeChoice::SaveChild {
            100.0
        } else {
            0.0
        }
    }

    /// What Thessara says while the choice is open.
    pub fn thessara_encouragement(&self) -> &str {
        &self.scenario.thessara_encouragement
    }

    /// Her last words if the bond is severed.
    pub fn thessara_final_message(&self) -> &str {
        &self.scenario.thessara_final_message
    }

    /// Her reaction if the child is abandoned.
    pub fn thessara_sadness_message(&self) -> &str {
        &self.scenario.thessara_sadness_message
    }

    /// The child's fate under the recorded choice.
    pub fn child_fate(&self) -> &str {
        if self.child_saved {
            &self.scenario.child_fate_saved
        } else {
            &self.scenario.child_fate_died
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> SacrificeTrial {
        let mut trial = SacrificeTrial::new();
        trial.start(ChildScenario::default());
        trial
    }

    #[test]
    fn test_save_child_passes_and_severs() {
        let mut trial = started();
        assert!(trial.choose_save_child());
        assert!(trial.is_passed());
        assert!(trial.is_complete());
        assert!(trial.is_thessara_severed());
        assert!(trial.is_child_saved());
        assert_eq!(trial.score(), 100.0);
    }

    #[test]
    fn test_save_child_emits_severance_signal() {
        let mut trial = started();
        trial.choose_save_child();

        match trial.take_signal() {
            Some(TrialSignal::MentorBondSevered { npc_id }) => {
                assert_eq!(npc_id, NpcId::new("thessara"));
            }
            other => panic!("expected severance signal, got {other:?}"),
        }
        // Drained exactly once
        assert!(trial.take_signal().is_none());
    }

    #[test]
    fn test_keep_thessara_fails_without_signal() {
        let mut trial = started();
        assert!(!trial.choose_keep_thessara());
        assert!(!trial.is_passed());
        assert!(trial.is_complete());
        assert!(!trial.is_thessara_severed());
        assert_eq!(trial.score(), 0.0);
        assert!(trial.take_signal().is_none());
    }

    #[test]
    fn test_choice_is_permanent() {
        let mut trial = started();
        trial.choose_keep_thessara();
        assert!(!trial.choose_save_child());
        assert_eq!(trial.choice(), SacrificeChoice::KeepThessara);
    }

    #[test]
    fn test_custom_mentor_id_travels_in_signal() {
        let mut trial = SacrificeTrial::new().with_mentor("mentor_veyra");
        trial.start(ChildScenario::default());
        trial.choose_save_child();

        match trial.take_signal() {
            Some(TrialSignal::MentorBondSevered { npc_id }) => {
                assert_eq!(npc_id, NpcId::new("mentor_veyra"));
            }
            other => panic!("expected severance signal, got {other:?}"),
        }
    }

    #[test]
    fn test_child_fate_tracks_choice() {
        let mut trial = started();
        trial.choose_save_child();
        assert!(trial.child_fate().contains("lives"));

        let mut trial = started();
        trial.choose_keep_thessara();
        assert!(trial.child_fate().contains("dies"));
    }
}
