//! Relationship - the player's standing with one NPC
//!
//! Trust, respect, and fear each live in `[0, 100]` and collapse into a
//! single weighted score in `[-100, 100]`, which maps onto a discrete
//! tier. Every delta re-derives score and tier, so the three values can
//! never drift apart. The event log is a bounded ring: the seventeenth
//! event evicts the oldest.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::NpcId;

/// Maximum events retained per relationship
pub const MAX_RELATIONSHIP_EVENTS: usize = 16;

/// Trust threshold for the high-trust filtered view
pub const HIGH_TRUST_THRESHOLD: i32 = 75;
/// Fear threshold for the high-fear filtered view
pub const HIGH_FEAR_THRESHOLD: i32 = 75;

/// Discrete label derived from the scalar score
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipTier {
    /// Score in `[-100, -50]`
    Hostile,
    /// Score in `(-50, -20]`
    Unfriendly,
    /// Score in `(-20, 20]`
    #[default]
    Neutral,
    /// Score in `(20, 50]`
    Friendly,
    /// Score in `(50, 100]`
    Allied,
}

impl RelationshipTier {
    pub fn display_name(&self) -> &'static str {
        match self {
            RelationshipTier::Hostile => "Hostile",
            RelationshipTier::Unfriendly => "Unfriendly",
            RelationshipTier::Neutral => "Neutral",
            RelationshipTier::Friendly => "Friendly",
            RelationshipTier::Allied => "Allied",
        }
    }

    /// Map a score in `[-100, 100]` onto its tier.
    pub fn from_score(score: i32) -> Self {
        if score <= -50 {
            RelationshipTier::Hostile
        } else if score <= -20 {
            RelationshipTier::Unfriendly
        } else if score <= 20 {
            RelationshipTier::Neutral
        } else if score <= 50 {
            RelationshipTier::Friendly
        } else {
            RelationshipTier::Allied
        }
    }
}

/// What happened between the player and the NPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipEventKind {
    QuestCompleted,
    QuestFailed,
    GiftGiven,
    DialogueChoice,
    Betrayal,
    HelpProvided,
    HarmCaused,
    SecretRevealed,
    PromiseKept,
    PromiseBroken,
}

impl RelationshipEventKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            RelationshipEventKind::QuestCompleted => "Quest Completed",
            RelationshipEventKind::QuestFailed => "Quest Failed",
            RelationshipEventKind::GiftGiven => "Gift Given",
            RelationshipEventKind::DialogueChoice => "Dialogue Choice",
            RelationshipEventKind::Betrayal => "Betrayal",
            RelationshipEventKind::HelpProvided => "Help Provided",
            RelationshipEventKind::HarmCaused => "Harm Caused",
            RelationshipEventKind::SecretRevealed => "Secret Revealed",
            RelationshipEventKind::PromiseKept => "Promise Kept",
            RelationshipEventKind::PromiseBroken => "Promise Broken",
        }
    }
}

/// One recorded event and the deltas it carried
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEvent {
    pub kind: RelationshipEventKind,
    pub timestamp: DateTime<Utc>,
    pub trust_delta: i32,
    pub respect_delta: i32,
    pub fear_delta: i32,
    pub description: String,
}

/// The player's standing with a single NPC
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub npc_id: NpcId,

    trust: i32,
    respect: i32,
    fear: i32,

    score: i32,
    tier: RelationshipTier,

    pub total_interactions: u32,
    pub first_met: DateTime<Utc>,
    pub last_interaction: Option<DateTime<Utc>>,

    events: VecDeque<RelationshipEvent>,

    pub romanceable: bool,
    pub romance_active: bool,
    pub rival: bool,
    locked: bool,
}

impl Relationship {
    /// A fresh relationship starts neutral: trust 50, respect 50, fear 0.
    pub fn new(npc_id: impl Into<NpcId>, now: DateTime<Utc>) -> Self {
        let mut relationship = Self {
            npc_id: npc_id.into(),
            trust: 50,
            respect: 50,
            fear: 0,
            score: 0,
            tier: RelationshipTier::Neutral,
            total_interactions: 0,
            first_met: now,
            last_interaction: None,
            events: VecDeque::with_capacity(MAX_RELATIONSHIP_EVENTS),
            romanceable: false,
            romance_active: false,
            rival: false,
            locked: false,
        };
        relationship.update_score();
        relationship
    }

    pub fn trust(&self) -> i32 {
        self.trust
    }

    pub fn respect(&self) -> i32 {
        self.respect
    }

    pub fn fear(&self) -> i32 {
        self.fear
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn tier(&self) -> RelationshipTier {
        self.tier
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn events(&self) -> impl Iterator<Item = &RelationshipEvent> {
        self.events.iter()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn latest_event(&self) -> Option<&RelationshipEvent> {
        self.events.back()
    }

    /// Adjust trust by `delta`, clamped to `[0, 100]`. No-op while locked.
    pub fn modify_trust(&mut self, delta: i32) {
        if self.locked {
            return;
        }
        self.trust = (self.trust + delta).clamp(0, 100);
        self.update_score();
        tracing::debug!(npc = %self.npc_id, delta, trust = self.trust, "trust modified");
    }

    /// Adjust respect by `delta`, clamped to `[0, 100]`. No-op while locked.
    pub fn modify_respect(&mut self, delta: i32) {
        if self.locked {
            return;
        }
        self.respect = (self.respect + delta).clamp(0, 100);
        self.update_score();
        tracing::debug!(npc = %self.npc_id, delta, respect = self.respect, "respect modified");
    }

    /// Adjust fear by `delta`, clamped to `[0, 100]`. No-op while locked.
    pub fn modify_fear(&mut self, delta: i32) {
        if self.locked {
            return;
        }
        self.fear = (self.fear + delta).clamp(0, 100);
        self.update_score();
        tracing::debug!(npc = %self.npc_id, delta, fear = self.fear, "fear modified");
    }

    /// Apply an event: run the three deltas through the modify operations
    /// (so a locked relationship keeps its numbers), then record the event
    /// in the bounded log and stamp the interaction.
    pub fn add_event(
        &mut self,
        kind: RelationshipEventKind,
        trust_delta: i32,
        respect_delta: i32,
        fear_delta: i32,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.modify_trust(trust_delta);
        self.modify_respect(respect_delta);
        self.modify_fear(fear_delta);

        if self.events.len() >= MAX_RELATIONSHIP_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(RelationshipEvent {
            kind,
            timestamp: now,
            trust_delta,
            respect_delta,
            fear_delta,
            description: description.into(),
        });

        self.last_interaction = Some(now);
        self.total_interactions += 1;

        tracing::info!(npc = %self.npc_id, kind = kind.display_name(), "relationship event");
    }

    /// Freeze the numeric state against further deltas.
    pub fn lock(&mut self) {
        self.locked = true;
        tracing::debug!(npc = %self.npc_id, "relationship locked");
    }

    pub fn unlock(&mut self) {
        self.locked = false;
        tracing::debug!(npc = %self.npc_id, "relationship unlocked");
    }

    pub fn meets_tier(&self, required: RelationshipTier) -> bool {
        self.tier >= required
    }

    /// Weighted score: trust 50%, respect 30%, fear -20%, re-centered so
    /// the neutral default (50, 50, 0) lands on 0, then stretched onto
    /// `[-100, 100]`.
    fn update_score(&mut self) {
        let weighted = f64::from(self.trust) * 0.5 + f64::from(self.respect) * 0.3
            - f64::from(self.fear) * 0.2;
        let stretched = (weighted - 40.0) * 2.5;
        self.score = (stretched as i32).clamp(-100, 100);
        self.tier = RelationshipTier::from_score(self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    fn neutral() -> Relationship {
        Relationship::new("thessara", t(0))
    }

    #[test]
    fn test_defaults_are_neutral() {
        let rel = neutral();
        assert_eq!(rel.trust(), 50);
        assert_eq!(rel.respect(), 50);
        assert_eq!(rel.fear(), 0);
        assert_eq!(rel.score(), 0);
        assert_eq!(rel.tier(), RelationshipTier::Neutral);
    }

    #[test]
    fn test_trust_boost_reaches_friendly() {
        let mut rel = neutral();
        rel.modify_trust(30);
        assert_eq!(rel.trust(), 80);
        // (80*0.5 + 50*0.3 - 0 - 40) * 2.5 = 37.5, truncated
        assert_eq!(rel.score(), 37);
        assert_eq!(rel.tier(), RelationshipTier::Friendly);
    }

    #[test]
    fn test_modify_saturates_without_touching_others() {
        let mut rel = neutral();
        rel.modify_trust(10_000);
        assert_eq!(rel.trust(), 100);
        assert_eq!(rel.respect(), 50);
        assert_eq!(rel.fear(), 0);
    }

    #[test]
    fn test_fear_drags_score_down() {
        let mut rel = neutral();
        rel.modify_fear(100);
        // (25 + 15 - 20 - 40) * 2.5 = -50
        assert_eq!(rel.score(), -50);
        assert_eq!(rel.tier(), RelationshipTier::Hostile);
    }

    #[test]
    fn test_locked_rejects_deltas() {
        let mut rel = neutral();
        rel.lock();
        rel.modify_trust(50);
        assert_eq!(rel.trust(), 50);

        rel.unlock();
        rel.modify_trust(50);
        assert_eq!(rel.trust(), 100);
    }

    #[test]
    fn test_event_log_is_bounded_ring() {
        let mut rel = neutral();
        for i in 0..17 {
            rel.add_event(
                RelationshipEventKind::DialogueChoice,
                0,
                0,
                0,
                format!("event {i}"),
                t(i),
            );
        }

        assert_eq!(rel.event_count(), MAX_RELATIONSHIP_EVENTS);
        // Oldest (index 0) was evicted; survivors keep relative order
        let descriptions: Vec<_> = rel.events().map(|e| e.description.clone()).collect();
        assert_eq!(descriptions.first().map(String::as_str), Some("event 1"));
        assert_eq!(descriptions.last().map(String::as_str), Some("event 16"));
    }

    #[test]
    fn test_add_event_applies_deltas_and_stamps() {
        let mut rel = neutral();
        rel.add_event(
            RelationshipEventKind::QuestCompleted,
            10,
            5,
            -3,
            "finished the harvest",
            t(42),
        );

        assert_eq!(rel.trust(), 60);
        assert_eq!(rel.respect(), 55);
        assert_eq!(rel.fear(), 0);
        assert_eq!(rel.total_interactions, 1);
        assert_eq!(rel.last_interaction, Some(t(42)));
        assert_eq!(
            rel.latest_event().map(|e| e.kind),
            Some(RelationshipEventKind::QuestCompleted)
        );
    }

    #[test]
    fn test_locked_event_still_recorded() {
        let mut rel = neutral();
        rel.lock();
        rel.add_event(RelationshipEventKind::Betrayal, -30, -30, 20, "", t(1));

        // Numbers frozen, history still written
        assert_eq!(rel.trust(), 50);
        assert_eq!(rel.event_count(), 1);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RelationshipTier::from_score(-100), RelationshipTier::Hostile);
        assert_eq!(RelationshipTier::from_score(-50), RelationshipTier::Hostile);
        assert_eq!(RelationshipTier::from_score(-49), RelationshipTier::Unfriendly);
        assert_eq!(RelationshipTier::from_score(-20), RelationshipTier::Unfriendly);
        assert_eq!(RelationshipTier::from_score(0), RelationshipTier::Neutral);
        assert_eq!(RelationshipTier::from_score(20), RelationshipTier::Neutral);
        assert_eq!(RelationshipTier::from_score(21), RelationshipTier::Friendly);
        assert_eq!(RelationshipTier::from_score(50), RelationshipTier::Friendly);
        assert_eq!(RelationshipTier::from_score(51), RelationshipTier::Allied);
        assert_eq!(RelationshipTier::from_score(100), RelationshipTier::Allied);
    }

    #[test]
    fn test_lock_window_arithmetic() {
        let mut rel = neutral();
        rel.lock();
        rel.modify_trust(50);
        rel.unlock();
        rel.modify_trust(50);
        // Exactly one of the two writes landed
        assert_eq!(rel.trust(), 100);
    }
}
