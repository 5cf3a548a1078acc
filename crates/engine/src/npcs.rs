//! NPC registry - the owning collection of every character in the world
//!
//! Lookups are linear scans; the world holds well under two hundred NPCs.
//! Filtered views hand out borrowed references, the registry keeps
//! ownership.

use chrono::{DateTime, Utc};
use necroshell_data::{DataError, DataFile};
use necroshell_domain::{Archetype, LocationId, LocationKind, Npc, NpcId};
use std::path::Path;

/// Owning collection of NPCs
#[derive(Debug, Default)]
pub struct NpcRegistry {
    npcs: Vec<Npc>,
}

impl NpcRegistry {
    pub fn new() -> Self {
        Self {
            npcs: Vec::with_capacity(16),
        }
    }

    /// Add an NPC. A duplicate id replaces nothing; the newcomer is
    /// rejected with a warning so loaded data cannot silently fork a
    /// character.
    pub fn add(&mut self, npc: Npc) {
        if self.get(&npc.id).is_some() {
            tracing::warn!(npc = %npc.id, "duplicate NPC id ignored");
            return;
        }
        tracing::debug!(npc = %npc.id, "NPC added");
        self.npcs.push(npc);
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    pub fn get(&self, npc_id: &NpcId) -> Option<&Npc> {
        self.npcs.iter().find(|n| &n.id == npc_id)
    }

    pub fn get_mut(&mut self, npc_id: &NpcId) -> Option<&mut Npc> {
        self.npcs.iter_mut().find(|n| &n.id == npc_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.iter()
    }

    // Filtered views. Each allocates a fresh Vec of borrows; the NPCs
    // themselves stay owned by the registry.

    pub fn discovered(&self) -> Vec<&Npc> {
        self.npcs.iter().filter(|n| n.discovered).collect()
    }

    pub fn at_location(&self, location: &LocationId) -> Vec<&Npc> {
        self.npcs
            .iter()
            .filter(|n| n.current_location.as_ref() == Some(location))
            .collect()
    }

    pub fn available(&self) -> Vec<&Npc> {
        self.npcs.iter().filter(|n| n.is_available()).collect()
    }

    pub fn by_archetype(&self, archetype: Archetype) -> Vec<&Npc> {
        self.npcs
            .iter()
            .filter(|n| n.archetype == archetype)
            .collect()
    }

    pub fn by_faction(&self, faction: &str) -> Vec<&Npc> {
        self.npcs.iter().filter(|n| n.faction == faction).collect()
    }

    pub fn with_active_quests(&self) -> Vec<&Npc> {
        self.npcs
            .iter()
            .filter(|n| !n.active_quests.is_empty())
            .collect()
    }

    /// Discover an NPC by id. Unknown ids warn and do nothing.
    pub fn discover(&mut self, npc_id: &NpcId, location: impl Into<LocationId>, now: DateTime<Utc>) {
        match self.get_mut(npc_id) {
            Some(npc) => npc.discover(location, now),
            None => tracing::warn!(npc = %npc_id, "cannot discover unknown NPC"),
        }
    }

    /// Load `[NPC:*]` sections from a data file on disk.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, DataError> {
        let file = DataFile::load(path)?;
        Ok(self.load(&file))
    }

    /// Populate the registry from parsed data. Returns how many NPCs were
    /// added.
    pub fn load(&mut self, file: &DataFile) -> usize {
        let mut loaded = 0;

        for section in file.sections_of("NPC") {
            let archetype = Archetype::parse(section.str_or("archetype", "neutral"));
            let mut npc = Npc::new(section.id(), section.str_or("name", "Unnamed"), archetype);

            npc.title = section.str_or("title", "").to_owned();
            npc.description = section.str_or("description", "").to_owned();
            npc.faction = section.str_or("faction", "").to_owned();
            npc.location_kind = LocationKind::parse(section.str_or("location_type", "unknown"));

            let home = section.str_or("home_location", "");
            if !home.is_empty() {
                npc = npc.with_home_location(home);
            }

            npc.available = section.bool_or("available", true);
            npc.hostile = section.bool_or("hostile", false);
            npc.hidden = section.bool_or("hidden", false);

            // World population: anyone not hidden starts discovered, but
            // the meeting time stays unset until the player actually
            // finds them.
            if !npc.hidden {
                npc.discovered = true;
            }

            for state in section.array("dialogue_state") {
                npc.add_dialogue_state(state.as_str());
            }
            for memory in section.array("unlockable_memory") {
                npc.add_unlockable_memory(memory.as_str());
            }

            self.add(npc);
            loaded += 1;
        }

        tracing::info!(count = loaded, "NPCs loaded");
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    fn seeded_registry() -> NpcRegistry {
        let file = DataFile::parse(
            "[NPC:seraphine]\n\
             name = Seraphine\n\
             archetype = mentor\n\
             home_location = tower\n\
             hidden = false\n\
             dialogue_state = initial, after_ritual\n\
             unlockable_memory = memory_childhood\n\
             \n\
             [NPC:vex]\n\
             name = Vex\n\
             archetype = rival\n\
             faction = ebon_court\n\
             hidden = true\n\
             \n\
             [NPC:oren]\n\
             name = Oren\n\
             archetype = ally\n\
             faction = ebon_court\n\
             home_location = tower\n",
        );

        let mut registry = NpcRegistry::new();
        assert_eq!(registry.load(&file), 3);
        registry
    }

    #[test]
    fn test_load_auto_discovers_unhidden() {
        let registry = seeded_registry();

        let seraphine = registry.get(&NpcId::new("seraphine")).expect("exists");
        assert!(seraphine.discovered);
        // Auto-discovery does not stamp a meeting time
        assert_eq!(seraphine.first_met_time, None);
        assert_eq!(seraphine.current_location, Some(LocationId::new("tower")));
        assert_eq!(seraphine.home_location, Some(LocationId::new("tower")));

        let vex = registry.get(&NpcId::new("vex")).expect("exists");
        assert!(!vex.discovered);
    }

    #[test]
    fn test_load_parses_arrays() {
        let registry = seeded_registry();
        let seraphine = registry.get(&NpcId::new("seraphine")).expect("exists");
        assert_eq!(seraphine.dialogue_states.len(), 2);
        assert_eq!(seraphine.unlockable_memories.len(), 1);
    }

    #[test]
    fn test_filtered_views() {
        let registry = seeded_registry();

        assert_eq!(registry.discovered().len(), 2);
        assert_eq!(registry.at_location(&LocationId::new("tower")).len(), 2);
        assert_eq!(registry.by_archetype(Archetype::Rival).len(), 1);
        assert_eq!(registry.by_faction("ebon_court").len(), 2);
        // Hidden NPCs are not available
        assert_eq!(registry.available().len(), 2);
    }

    #[test]
    fn test_with_active_quests_view() {
        let mut registry = seeded_registry();
        registry
            .get_mut(&NpcId::new("oren"))
            .expect("exists")
            .add_active_quest("first_harvest");

        let with_quests = registry.with_active_quests();
        assert_eq!(with_quests.len(), 1);
        assert_eq!(with_quests[0].id, NpcId::new("oren"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = seeded_registry();
        registry.add(Npc::new("vex", "Impostor", Archetype::Neutral));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(&NpcId::new("vex")).expect("exists").name, "Vex");
    }

    #[test]
    fn test_registry_discover_stamps_time() {
        let mut registry = seeded_registry();
        registry.discover(&NpcId::new("vex"), "shadow_market", t(77));

        let vex = registry.get(&NpcId::new("vex")).expect("exists");
        assert!(vex.discovered);
        assert_eq!(vex.first_met_time, Some(t(77)));
    }
}
