//! The Archon trials: the sequence controller and the seven sub-engines
//!
//! The controller owns the prerequisite chain and path bookkeeping; each
//! trial is a self-contained state machine the UI drives directly.
//! Engines touch player state only through `&mut` scalars passed at the
//! call site, and anything that must reach another subsystem (the mentor
//! bond) leaves as a [`TrialSignal`] carrying ids, never references.

pub mod leadership;
pub mod morality;
pub mod power;
pub mod resolve;
pub mod sacrifice;
pub mod sequence;
pub mod technical;
pub mod wisdom;

use necroshell_domain::NpcId;
use serde::{Deserialize, Serialize};

pub use leadership::{
    CouncilMember, GuidanceApproach, LeadershipTrial, ReformKind, COUNCIL_MEETING_COOLDOWN,
    LEADERSHIP_TRIAL_DURATION, MAX_COUNCIL_MEMBERS,
};
pub use morality::{MoralityChoice, MoralityTrial};
pub use power::{PowerOutcome, PowerTrial, SERAPHIM_MAX_HP, VICTORY_HP_PERCENT};
pub use resolve::{ResolveTrial, Temptation};
pub use sacrifice::{SacrificeChoice, SacrificeTrial};
pub use sequence::{
    TrialSequence, PATH_CONSCIOUSNESS_MIN, PATH_CORRUPTION_MAX, PATH_CORRUPTION_MIN,
};
pub use technical::{
    BugRecord, TechnicalTrial, CONTEXT_LINES, FREE_INSPECTIONS, MAX_BUGS, MIN_BUGS_TO_PASS,
};
pub use wisdom::{
    WisdomSolution, WisdomTrial, CORRECT_HEAVEN_PERCENT, CORRECT_HELL_PERCENT,
    CORRECT_REUNIFICATION_YEARS, MAX_WISDOM_ATTEMPTS,
};

/// Outbound notification from a trial engine to the wider game.
///
/// Trials never hold references into other subsystems; effects that
/// cross the boundary travel as ids and the integration routes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TrialSignal {
    /// The mentor bond was permanently severed (Trial of Sacrifice)
    MentorBondSevered { npc_id: NpcId },
}
