//! Relationship ledger - every NPC the player has standing with
//!
//! Relationships materialize lazily: the first reference to an NPC
//! creates a neutral entry. Views borrow; the ledger owns.

use chrono::{DateTime, Utc};
use necroshell_domain::{
    NpcId, Relationship, RelationshipTier, HIGH_FEAR_THRESHOLD, HIGH_TRUST_THRESHOLD,
};

/// Owning collection of relationships, keyed by NPC id
#[derive(Debug, Default)]
pub struct RelationshipLedger {
    relationships: Vec<Relationship>,
}

impl RelationshipLedger {
    pub fn new() -> Self {
        Self {
            relationships: Vec::with_capacity(16),
        }
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    pub fn get(&self, npc_id: &NpcId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| &r.npc_id == npc_id)
    }

    pub fn get_mut(&mut self, npc_id: &NpcId) -> Option<&mut Relationship> {
        self.relationships.iter_mut().find(|r| &r.npc_id == npc_id)
    }

    /// Fetch the relationship with an NPC, creating a neutral one on
    /// first reference.
    pub fn get_or_create(&mut self, npc_id: &NpcId, now: DateTime<Utc>) -> &mut Relationship {
        if let Some(index) = self.relationships.iter().position(|r| &r.npc_id == npc_id) {
            return &mut self.relationships[index];
        }

        tracing::debug!(npc = %npc_id, "relationship created");
        self.relationships.push(Relationship::new(npc_id.clone(), now));
        let last = self.relationships.len() - 1;
        &mut self.relationships[last]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    // Filtered views; borrowed references, ledger keeps ownership.

    pub fn by_tier(&self, tier: RelationshipTier) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.tier() == tier)
            .collect()
    }

    pub fn meeting_tier(&self, tier: RelationshipTier) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.meets_tier(tier))
            .collect()
    }

    pub fn high_trust(&self) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.trust() >= HIGH_TRUST_THRESHOLD)
            .collect()
    }

    pub fn high_fear(&self) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.fear() >= HIGH_FEAR_THRESHOLD)
            .collect()
    }

    pub fn romances(&self) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.romance_active)
            .collect()
    }

    pub fn rivals(&self) -> Vec<&Relationship> {
        self.relationships.iter().filter(|r| r.rival).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use necroshell_domain::RelationshipEventKind;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    #[test]
    fn test_get_or_create_is_lazy_and_stable() {
        let mut ledger = RelationshipLedger::new();
        assert!(ledger.get(&NpcId::new("thessara")).is_none());

        ledger.get_or_create(&NpcId::new("thessara"), t(5));
        assert_eq!(ledger.len(), 1);

        // Second reference returns the same entry
        ledger
            .get_or_create(&NpcId::new("thessara"), t(9))
            .modify_trust(10);
        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.get(&NpcId::new("thessara")).expect("exists").trust(),
            60
        );
        assert_eq!(
            ledger.get(&NpcId::new("thessara")).expect("exists").first_met,
            t(5)
        );
    }

    #[test]
    fn test_tier_views() {
        let mut ledger = RelationshipLedger::new();
        ledger
            .get_or_create(&NpcId::new("friend"), t(0))
            .modify_trust(40);
        ledger
            .get_or_create(&NpcId::new("enemy"), t(0))
            .modify_fear(100);
        ledger.get_or_create(&NpcId::new("stranger"), t(0));

        assert_eq!(ledger.by_tier(RelationshipTier::Hostile).len(), 1);
        assert_eq!(ledger.by_tier(RelationshipTier::Neutral).len(), 1);
        // friend: trust 90 -> score (45+15-40)*2.5 = 50 -> Friendly
        assert_eq!(ledger.meeting_tier(RelationshipTier::Friendly).len(), 1);
        assert_eq!(ledger.meeting_tier(RelationshipTier::Neutral).len(), 2);
    }

    #[test]
    fn test_threshold_views() {
        let mut ledger = RelationshipLedger::new();
        ledger
            .get_or_create(&NpcId::new("confidant"), t(0))
            .modify_trust(25); // 75
        ledger
            .get_or_create(&NpcId::new("terrified"), t(0))
            .modify_fear(80);

        assert_eq!(ledger.high_trust().len(), 1);
        assert_eq!(ledger.high_fear().len(), 1);
    }

    #[test]
    fn test_romance_and_rival_views() {
        let mut ledger = RelationshipLedger::new();
        {
            let rel = ledger.get_or_create(&NpcId::new("lyra"), t(0));
            rel.romanceable = true;
            rel.romance_active = true;
        }
        ledger.get_or_create(&NpcId::new("vex"), t(0)).rival = true;

        assert_eq!(ledger.romances().len(), 1);
        assert_eq!(ledger.rivals().len(), 1);
    }

    #[test]
    fn test_events_flow_through_ledger() {
        let mut ledger = RelationshipLedger::new();
        ledger.get_or_create(&NpcId::new("oren"), t(0)).add_event(
            RelationshipEventKind::HelpProvided,
            5,
            5,
            0,
            "carried the coffin",
            t(10),
        );

        let rel = ledger.get(&NpcId::new("oren")).expect("exists");
        assert_eq!(rel.trust(), 55);
        assert_eq!(rel.total_interactions, 1);
    }
}
