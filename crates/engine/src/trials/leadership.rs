//! Trial of Leadership - thirty days to reform the Regional Council
//!
//! Six councilors, each with their own corruption, resistance, and
//! attitude. The player mixes one-on-one guidance, full council
//! meetings, and policy reforms to drag the collective corruption down
//! ten percent before the month runs out.

use necroshell_data::content::{Attitude, CouncilMemberDefinition, Resistance};
use serde::{Deserialize, Serialize};

/// Trial length in days
pub const LEADERSHIP_TRIAL_DURATION: u32 = 30;
/// Council size cap
pub const MAX_COUNCIL_MEMBERS: usize = 6;
/// Days between full council meetings
pub const COUNCIL_MEETING_COOLDOWN: u32 = 3;

/// How the player leans on a councilor in a one-on-one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceApproach {
    /// Pressure and threats - lands on the hardened, alienates everyone
    Harsh,
    /// Reasoned persuasion - steady, modest gains
    Diplomatic,
    /// Vision and example - big attitude swings on the willing
    Inspirational,
}

impl GuidanceApproach {
    pub fn display_name(&self) -> &'static str {
        match self {
            GuidanceApproach::Harsh => "Harsh",
            GuidanceApproach::Diplomatic => "Diplomatic",
            GuidanceApproach::Inspirational => "Inspirational",
        }
    }
}

/// Council-wide policy actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReformKind {
    CodeOfConduct,
    SoulEthics,
    CorruptionLimits,
    PeerAccountability,
}

impl ReformKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ReformKind::CodeOfConduct => "Code of Conduct",
            ReformKind::SoulEthics => "Soul Ethics",
            ReformKind::CorruptionLimits => "Corruption Limits",
            ReformKind::PeerAccountability => "Peer Accountability",
        }
    }
}

/// One councilor's reform progress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilMember {
    pub npc_id: String,
    pub name: String,
    pub corruption_start: f64,
    pub corruption_current: f64,
    pub corruption_target: f64,
    pub resistance: Resistance,
    pub attitude_score: i32,
    pub attitude: Attitude,
    pub reforms_applied: u32,
    pub meetings_held: u32,
    pub last_interaction_day: u32,
    pub specialty: String,
}

impl CouncilMember {
    fn from_definition(def: CouncilMemberDefinition) -> Self {
        Self {
            npc_id: def.npc_id,
            name: def.name,
            corruption_start: def.corruption_start,
            corruption_current: def.corruption_start,
            corruption_target: def.corruption_target,
            resistance: def.resistance,
            attitude_score: def.attitude_start.starting_score(),
            attitude: def.attitude_start,
            reforms_applied: 0,
            meetings_held: 0,
            last_interaction_day: 0,
            specialty: def.specialty,
        }
    }

    pub fn is_at_target(&self) -> bool {
        self.corruption_current <= self.corruption_target
    }

    fn apply_corruption(&mut self, change: f64) {
        self.corruption_current = (self.corruption_current + change).clamp(0.0, 100.0);
    }

    fn apply_attitude(&mut self, change: i32) {
        self.attitude_score = (self.attitude_score + change).clamp(-100, 100);
        self.attitude = Attitude::from_score(self.attitude_score);
    }
}

/// Reform state for the seventh trial
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LeadershipTrial {
    active: bool,
    current_day: u32,
    days_remaining: u32,
    members: Vec<CouncilMember>,
    collective_corruption_start: f64,
    collective_corruption_current: f64,
    collective_corruption_target: f64,
    reforms_successful: u32,
    council_meetings_held: u32,
    last_council_meeting_day: u32,
    target_met: bool,
}

impl LeadershipTrial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat the council, capped at [`MAX_COUNCIL_MEMBERS`].
    pub fn load_members(&mut self, definitions: Vec<CouncilMemberDefinition>) -> usize {
        if definitions.len() > MAX_COUNCIL_MEMBERS {
            tracing::warn!(
                count = definitions.len(),
                "council capped at {MAX_COUNCIL_MEMBERS} members"
            );
        }

        self.members = definitions
            .into_iter()
            .take(MAX_COUNCIL_MEMBERS)
            .map(CouncilMember::from_definition)
            .collect();
        self.members.len()
    }

    /// Begin the thirty days. Requires a seated council.
    pub fn start(&mut self) -> bool {
        if self.members.is_empty() {
            tracing::warn!("cannot start leadership trial without members");
            return false;
        }

        self.active = true;
        self.current_day = 1;
        self.days_remaining = LEADERSHIP_TRIAL_DURATION;
        self.reforms_successful = 0;
        self.council_meetings_held = 0;
        self.last_council_meeting_day = 0;
        self.target_met = false;

        for member in &mut self.members {
            member.corruption_current = member.corruption_start;
            member.reforms_applied = 0;
            member.meetings_held = 0;
            member.last_interaction_day = 0;
        }

        self.collective_corruption_start = self.collective_corruption();
        self.collective_corruption_current = self.collective_corruption_start;
        self.collective_corruption_target = self.collective_corruption_start * 0.9;

        tracing::info!(
            members = self.members.len(),
            start = self.collective_corruption_start,
            target = self.collective_corruption_target,
            "leadership trial started"
        );
        true
    }

    pub fn members(&self) -> &[CouncilMember] {
        &self.members
    }

    pub fn member(&self, index: usize) -> Option<&CouncilMember> {
        self.members.get(index)
    }

    pub fn member_by_id(&self, npc_id: &str) -> Option<&CouncilMember> {
        self.members.iter().find(|m| m.npc_id == npc_id)
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn days_remaining(&self) -> u32 {
        self.days_remaining
    }

    pub fn collective_start(&self) -> f64 {
        self.collective_corruption_start
    }

    pub fn collective_current(&self) -> f64 {
        self.collective_corruption_current
    }

    pub fn collective_target(&self) -> f64 {
        self.collective_corruption_target
    }

    pub fn reforms_successful(&self) -> u32 {
        self.reforms_successful
    }

    pub fn council_meetings_held(&self) -> u32 {
        self.council_meetings_held
    }

    /// Mean corruption across the seated council.
    pub fn collective_corruption(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let total: f64 = self.members.iter().map(|m| m.corruption_current).sum();
        total / self.members.len() as f64
    }

    pub fn is_target_met(&self) -> bool {
        self.collective_corruption() <= self.collective_corruption_target
    }

    /// Advance one day; day thirty closes the trial and freezes the
    /// verdict.
    pub fn advance_day(&mut self) -> bool {
        if !self.active {
            return false;
        }

        self.current_day += 1;
        self.days_remaining = LEADERSHIP_TRIAL_DURATION - self.current_day + 1;

        if self.current_day >= LEADERSHIP_TRIAL_DURATION {
            self.active = false;
        }

        self.collective_corruption_current = self.collective_corruption();
        self.target_met = self.is_target_met();
        true
    }

    /// One-on-one guidance. The corruption effect is scaled down when the
    /// approach does not match the member's resistance.
    pub fn meet_with_member(&mut self, member_index: usize, approach: GuidanceApproach) -> bool {
        if !self.active {
            return false;
        }
        let day = self.current_day;
        let Some(member) = self.members.get_mut(member_index) else {
            return false;
        };

        let (mut corruption_change, attitude_change) = match approach {
            GuidanceApproach::Harsh => (-3.0, -10),
            GuidanceApproach::Diplomatic => (-2.0, 5),
            GuidanceApproach::Inspirational => (-1.0, 15),
        };

        match approach {
            GuidanceApproach::Harsh if member.resistance != Resistance::High => {
                corruption_change *= 0.5;
            }
            GuidanceApproach::Diplomatic if member.resistance != Resistance::Medium => {
                corruption_change *= 0.75;
            }
            GuidanceApproach::Inspirational if member.resistance == Resistance::High => {
                corruption_change *= 0.3;
            }
            _ => {}
        }

        member.apply_corruption(corruption_change);
        member.apply_attitude(attitude_change);
        member.meetings_held += 1;
        member.last_interaction_day = day;

        self.collective_corruption_current = self.collective_corruption();

        tracing::debug!(
            member = member_index,
            approach = approach.display_name(),
            "guidance meeting held"
        );
        true
    }

    /// Full council meeting: every supportive member shaves half a point
    /// of corruption off everyone. Limited by the three-day cooldown.
    pub fn council_meeting(&mut self) -> bool {
        if !self.active {
            return false;
        }

        if self.last_council_meeting_day != 0
            && self.current_day - self.last_council_meeting_day < COUNCIL_MEETING_COOLDOWN
        {
            tracing::debug!("council meeting refused, cooldown active");
            return false;
        }

        let supportive = self.supportive_count();
        let peer_bonus = supportive as f64 * 0.5;
        for member in &mut self.members {
            member.apply_corruption(-peer_bonus);
        }

        self.council_meetings_held += 1;
        self.last_council_meeting_day = self.current_day;
        self.collective_corruption_current = self.collective_corruption();

        tracing::info!(supportive, "council meeting held");
        true
    }

    /// Enact a council-wide reform.
    pub fn implement_reform(&mut self, reform: ReformKind) -> bool {
        if !self.active {
            return false;
        }

        match reform {
            ReformKind::CodeOfConduct => {
                // The two old guard names shrug this one off
                for member in &mut self.members {
                    let resistant =
                        member.name.contains("Mordak") || member.name.contains("Vorgath");
                    if !resistant {
                        member.apply_corruption(-1.0);
                    }
                    member.reforms_applied += 1;
                }
            }
            ReformKind::SoulEthics => {
                for member in &mut self.members {
                    let change = if member.corruption_current < 70.0 { -2.0 } else { -0.5 };
                    member.apply_corruption(change);
                    member.apply_attitude(5);
                    member.reforms_applied += 1;
                }
            }
            ReformKind::CorruptionLimits => {
                for member in &mut self.members {
                    member.apply_corruption(-1.5);
                    member.apply_attitude(-5);
                    member.reforms_applied += 1;
                }
            }
            ReformKind::PeerAccountability => {
                for member in &mut self.members {
                    if member.attitude == Attitude::Supportive {
                        member.apply_corruption(-1.0);
                    }
                    member.reforms_applied += 1;
                }
                let influence = self.supportive_count() as f64 * 0.5;
                for member in &mut self.members {
                    if member.attitude != Attitude::Supportive {
                        member.apply_corruption(-influence);
                    }
                }
            }
        }

        self.reforms_successful += 1;
        self.collective_corruption_current = self.collective_corruption();

        tracing::info!(reform = reform.display_name(), "reform implemented");
        true
    }

    fn supportive_count(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.attitude == Attitude::Supportive)
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.current_day >= LEADERSHIP_TRIAL_DURATION
    }

    pub fn is_passed(&self) -> bool {
        self.is_complete() && self.target_met
    }

    /// Score: 40 for finishing the month, 30 for the collective target,
    /// 5 per member at their own target (at most 30), plus up to 10 for
    /// the supportive share; clamped to `[0, 100]`.
    pub fn score(&self) -> f32 {
        if !self.is_complete() || self.members.is_empty() {
            return 0.0;
        }

        let mut score = 40.0_f32;

        if self.target_met {
            score += 30.0;
        }

        for member in &self.members {
            if member.is_at_target() {
                score += 5.0;
            }
        }

        score += self.supportive_count() as f32 / self.members.len() as f32 * 10.0;

        score.clamp(0.0, 100.0)
    }

    /// Progress summary for the UI.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Day {}/{} ({} days remaining)\n\
             Collective Corruption: {:.1}% (Start: {:.1}%, Target: {:.1}%)\n\
             Target Met: {}\nReforms: {}, Council Meetings: {}\n\nMembers:\n",
            self.current_day,
            LEADERSHIP_TRIAL_DURATION,
            self.days_remaining,
            self.collective_corruption_current,
            self.collective_corruption_start,
            self.collective_corruption_target,
            if self.target_met { "YES" } else { "NO" },
            self.reforms_successful,
            self.council_meetings_held,
        );

        for member in &self.members {
            out.push_str(&format!(
                "  {}: {:.1}% (Target: {:.1}%, {})\n",
                member.name,
                member.corruption_current,
                member.corruption_target,
                if member.is_at_target() { "MET" } else { "NOT MET" },
            ));
        }
        out
    }
}
