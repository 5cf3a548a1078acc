//! NPC entity - named characters with dialogue state, quest lists, and
//! discovery tracking
//!
//! NPCs never hold references to quests or relationships; they carry the
//! string ids and the owning collections resolve them. Discovery is
//! monotonic: once a character has been met, it stays met.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{DialogueStateId, LocationId, MemoryId, NpcId, QuestId};
use crate::DomainError;

/// Maximum dialogue states an NPC can expose
pub const MAX_DIALOGUE_STATES: usize = 16;
/// Maximum quests an NPC can track in each of the active/completed lists
pub const MAX_NPC_QUESTS: usize = 8;
/// Maximum memory fragments an NPC can reveal
pub const MAX_NPC_MEMORIES: usize = 8;

/// Narrative role the character plays toward the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Wise guide, teaches the player
    Mentor,
    /// Competitive, challenges the player
    Rival,
    /// Friendly, supports the player
    Ally,
    /// Opposes the player's goals
    Antagonist,
    /// Indifferent, transactional
    #[default]
    Neutral,
    /// Cryptic, reveals information slowly
    Mysterious,
}

impl Archetype {
    /// All archetypes, for filtered views and UI dropdowns
    pub fn all() -> &'static [Archetype] {
        &[
            Archetype::Mentor,
            Archetype::Rival,
            Archetype::Ally,
            Archetype::Antagonist,
            Archetype::Neutral,
            Archetype::Mysterious,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Archetype::Mentor => "Mentor",
            Archetype::Rival => "Rival",
            Archetype::Ally => "Ally",
            Archetype::Antagonist => "Antagonist",
            Archetype::Neutral => "Neutral",
            Archetype::Mysterious => "Mysterious",
        }
    }

    /// Parse the lowercase data-file token. Unknown tokens yield `Neutral`.
    pub fn parse(token: &str) -> Self {
        match token {
            "mentor" => Archetype::Mentor,
            "rival" => Archetype::Rival,
            "ally" => Archetype::Ally,
            "antagonist" => Archetype::Antagonist,
            "neutral" => Archetype::Neutral,
            "mysterious" => Archetype::Mysterious,
            other => {
                tracing::warn!("Unknown archetype token '{other}', defaulting to neutral");
                Archetype::Neutral
            }
        }
    }
}

/// How an NPC's position in the world behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// Location not yet discovered
    #[default]
    Unknown,
    /// Stays at one location
    Fixed,
    /// Moves between locations
    Mobile,
    /// Location changes based on quest state
    QuestBased,
}

impl LocationKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            LocationKind::Unknown => "Unknown",
            LocationKind::Fixed => "Fixed",
            LocationKind::Mobile => "Mobile",
            LocationKind::QuestBased => "Quest-based",
        }
    }

    /// Parse the lowercase data-file token. Unknown tokens yield `Unknown`.
    pub fn parse(token: &str) -> Self {
        match token {
            "fixed" => LocationKind::Fixed,
            "mobile" => LocationKind::Mobile,
            "quest_based" => LocationKind::QuestBased,
            "unknown" => LocationKind::Unknown,
            other => {
                tracing::warn!("Unknown location_type token '{other}', defaulting to unknown");
                LocationKind::Unknown
            }
        }
    }
}

/// A non-player character
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    pub title: String,
    pub description: String,

    pub archetype: Archetype,
    pub faction: String,

    // Location
    pub location_kind: LocationKind,
    pub current_location: Option<LocationId>,
    pub home_location: Option<LocationId>,

    // Availability
    pub available: bool,
    pub discovered: bool,
    pub first_met_time: Option<DateTime<Utc>>,

    // Dialogue state
    pub current_dialogue_state: DialogueStateId,
    pub dialogue_states: Vec<DialogueStateId>,

    // Quest tracking
    pub active_quests: Vec<QuestId>,
    pub completed_quests: Vec<QuestId>,

    // Memory fragments this NPC can reveal
    pub unlockable_memories: Vec<MemoryId>,

    // Interaction tracking
    pub interaction_count: u32,
    pub last_interaction_time: Option<DateTime<Utc>>,

    // Special states
    pub hostile: bool,
    pub dead: bool,
    pub hidden: bool,
}

impl Npc {
    pub fn new(id: impl Into<NpcId>, name: impl Into<String>, archetype: Archetype) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: String::new(),
            description: String::new(),
            archetype,
            faction: String::new(),
            location_kind: LocationKind::Unknown,
            current_location: None,
            home_location: None,
            available: true,
            discovered: false,
            first_met_time: None,
            current_dialogue_state: DialogueStateId::new("initial"),
            dialogue_states: Vec::new(),
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
            unlockable_memories: Vec::new(),
            interaction_count: 0,
            last_interaction_time: None,
            hostile: false,
            dead: false,
            hidden: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_faction(mut self, faction: impl Into<String>) -> Self {
        self.faction = faction.into();
        self
    }

    /// Home location also seeds the current location when nothing has
    /// placed the NPC yet.
    pub fn with_home_location(mut self, location: impl Into<LocationId>) -> Self {
        let location = location.into();
        if self.current_location.is_none() {
            self.current_location = Some(location.clone());
        }
        self.home_location = Some(location);
        self
    }

    /// Mark the NPC as met by the player.
    ///
    /// Only the first call records the meeting time and fills in the home
    /// location; discovery never reverts.
    pub fn discover(&mut self, location: impl Into<LocationId>, now: DateTime<Utc>) {
        if self.discovered {
            return;
        }

        self.discovered = true;
        self.first_met_time = Some(now);

        let location = location.into();
        if self.home_location.is_none() {
            self.home_location = Some(location.clone());
        }
        self.current_location = Some(location.clone());

        tracing::info!(npc = %self.id, location = %location, "NPC discovered");
    }

    /// Record one interaction with the player.
    pub fn interact(&mut self, now: DateTime<Utc>) {
        self.interaction_count += 1;
        self.last_interaction_time = Some(now);

        tracing::debug!(npc = %self.id, total = self.interaction_count, "NPC interaction");
    }

    /// Replace the active dialogue state tag.
    pub fn set_dialogue_state(&mut self, state: impl Into<DialogueStateId>) {
        self.current_dialogue_state = state.into();
    }

    /// Append a dialogue state tag to the known set.
    ///
    /// Duplicates are silently ignored; the set is capped at
    /// [`MAX_DIALOGUE_STATES`].
    pub fn add_dialogue_state(&mut self, state: impl Into<DialogueStateId>) {
        let state = state.into();
        if self.dialogue_states.contains(&state) {
            return;
        }
        if self.dialogue_states.len() >= MAX_DIALOGUE_STATES {
            tracing::warn!(npc = %self.id, "max dialogue states reached");
            return;
        }
        self.dialogue_states.push(state);
    }

    pub fn has_dialogue_state(&self, state: &DialogueStateId) -> bool {
        self.dialogue_states.contains(state)
    }

    /// Track a quest this NPC has handed out. Duplicates are ignored; the
    /// list is capped at [`MAX_NPC_QUESTS`].
    pub fn add_active_quest(&mut self, quest_id: impl Into<QuestId>) {
        let quest_id = quest_id.into();
        if self.active_quests.contains(&quest_id) {
            return;
        }
        if self.active_quests.len() >= MAX_NPC_QUESTS {
            tracing::warn!(npc = %self.id, "max active quests reached");
            return;
        }
        tracing::info!(npc = %self.id, quest = %quest_id, "quest added");
        self.active_quests.push(quest_id);
    }

    /// Move a quest from the active list to the completed list, keeping
    /// the order of the remaining entries stable.
    pub fn complete_quest(&mut self, quest_id: &QuestId) -> Result<(), DomainError> {
        let index = self
            .active_quests
            .iter()
            .position(|q| q == quest_id)
            .ok_or_else(|| DomainError::not_found("active quest", quest_id.as_str()))?;

        let quest_id = self.active_quests.remove(index);
        if self.completed_quests.len() < MAX_NPC_QUESTS {
            self.completed_quests.push(quest_id.clone());
        }

        tracing::info!(npc = %self.id, quest = %quest_id, "quest completed");
        Ok(())
    }

    pub fn has_active_quest(&self, quest_id: &QuestId) -> bool {
        self.active_quests.contains(quest_id)
    }

    pub fn has_completed_quest(&self, quest_id: &QuestId) -> bool {
        self.completed_quests.contains(quest_id)
    }

    /// Register a memory fragment this NPC can unlock. Capped at
    /// [`MAX_NPC_MEMORIES`].
    pub fn add_unlockable_memory(&mut self, memory_id: impl Into<MemoryId>) {
        let memory_id = memory_id.into();
        if self.unlockable_memories.contains(&memory_id) {
            return;
        }
        if self.unlockable_memories.len() >= MAX_NPC_MEMORIES {
            tracing::warn!(npc = %self.id, "max unlockable memories reached");
            return;
        }
        self.unlockable_memories.push(memory_id);
    }

    pub fn move_to_location(&mut self, location: impl Into<LocationId>) {
        let location = location.into();
        tracing::debug!(npc = %self.id, location = %location, "NPC moved");
        self.current_location = Some(location);
    }

    /// Availability invariant: `available && !dead && !hidden`.
    pub fn is_available(&self) -> bool {
        self.available && !self.dead && !self.hidden
    }
}
