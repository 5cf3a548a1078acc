//! The Necroshell narrative engine: NPC registry, quest log,
//! relationship ledger, and the seven-trial Archon path.
//!
//! Everything here is single-threaded cooperative. The game loop drives
//! day ticks and per-action calls; operations run to completion on the
//! caller's thread and the caller serializes writes. Subsystems own
//! their records and cross-reference by string id only.

pub mod npcs;
pub mod quests;
pub mod relationships;
pub mod trials;

pub use npcs::NpcRegistry;
pub use quests::QuestLog;
pub use relationships::RelationshipLedger;
pub use trials::{TrialSequence, TrialSignal};
