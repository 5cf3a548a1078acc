//! Core narrative types for the Necroshell game: NPCs, quests,
//! relationships, and the Archon trial descriptors.
//!
//! Entities own their records outright and refer to one another only by
//! stable string ids, never by reference, keeping the narrative graph
//! acyclic and serializable. Wall-clock instants are always passed in by
//! the caller; nothing in this crate reads a clock.

pub mod error;
pub mod ids;
pub mod npc;
pub mod objective;
pub mod quest;
pub mod relationship;
pub mod trial;

pub use error::DomainError;
pub use ids::{DialogueStateId, LocationId, MemoryId, NpcId, ObjectiveId, QuestId};
pub use npc::{Archetype, LocationKind, Npc, MAX_DIALOGUE_STATES, MAX_NPC_MEMORIES, MAX_NPC_QUESTS};
pub use objective::{ObjectiveKind, QuestObjective};
pub use quest::{Quest, QuestRewards, QuestState, QuestUnlocks, MAX_QUEST_OBJECTIVES};
pub use relationship::{
    Relationship, RelationshipEvent, RelationshipEventKind, RelationshipTier,
    HIGH_FEAR_THRESHOLD, HIGH_TRUST_THRESHOLD, MAX_RELATIONSHIP_EVENTS,
};
pub use trial::{ArchonTrial, TrialKind, TrialStatus, ARCHON_TRIAL_COUNT, DEFAULT_MAX_ATTEMPTS};
