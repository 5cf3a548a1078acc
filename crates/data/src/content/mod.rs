//! Typed content records mapped from data-file sections
//!
//! Each content subsystem claims a section type and translates its
//! properties through the default-fallback getters, so partially-specified
//! files always load. Unrecognized enum tokens warn and fall back to a
//! documented default.

pub mod artifact;
pub mod bug;
pub mod challenge;
pub mod council;
pub mod minion;
pub mod puzzle;
pub mod scenario;
pub mod skill;
pub mod spell;
pub mod trial;

pub use artifact::{ArtifactDefinition, ArtifactEffectKind, ArtifactRarity};
pub use bug::{BugDefinition, BugKind, BugSeverity};
pub use challenge::ChallengeDefinition;
pub use council::{Attitude, CouncilMemberDefinition, Resistance};
pub use minion::{MinionDefinition, MinionKind};
pub use puzzle::PuzzleDefinition;
pub use scenario::{ChildScenario, SaveCost, VillageScenario};
pub use skill::{SkillCategory, SkillDefinition};
pub use spell::{SpellDefinition, SpellSchool, SpellTarget};
pub use trial::TrialDefinition;
