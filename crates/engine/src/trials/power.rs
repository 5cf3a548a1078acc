//! Trial of Power - combat against Seraphim, won through restraint
//!
//! The seraphim must be worn down to a tenth of her health and then
//! spared. Killing her, falling, or fleeing all fail the trial; yielding
//! at the threshold is the only pass.

use serde::{Deserialize, Serialize};

/// Seraphim's full health
pub const SERAPHIM_MAX_HP: u32 = 500;
/// Yield window opens at this percentage of max HP
pub const VICTORY_HP_PERCENT: u32 = 10;

/// How the combat ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PowerOutcome {
    /// Combat still undecided
    #[default]
    Undecided,
    /// Spared her at the threshold - the only pass
    Yield,
    /// Killed her
    Kill,
    /// The player fell
    Defeated,
    /// The player ran
    Fled,
}

impl PowerOutcome {
    pub fn display_name(&self) -> &'static str {
        match self {
            PowerOutcome::Undecided => "Undecided",
            PowerOutcome::Yield => "Yield",
            PowerOutcome::Kill => "Kill",
            PowerOutcome::Defeated => "Defeated",
            PowerOutcome::Fled => "Fled",
        }
    }
}

/// Combat state for the first trial
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerTrial {
    active: bool,
    seraphim_max_hp: u32,
    seraphim_hp: u32,
    turns: u32,
    outcome: PowerOutcome,
    victory_met: bool,
    hint_shown: bool,
}

impl Default for PowerTrial {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerTrial {
    pub fn new() -> Self {
        Self {
            active: false,
            seraphim_max_hp: SERAPHIM_MAX_HP,
            seraphim_hp: SERAPHIM_MAX_HP,
            turns: 0,
            outcome: PowerOutcome::Undecided,
            victory_met: false,
            hint_shown: false,
        }
    }

    /// Reset and begin the combat.
    pub fn start(&mut self) {
        self.active = true;
        self.seraphim_hp = self.seraphim_max_hp;
        self.turns = 0;
        self.outcome = PowerOutcome::Undecided;
        self.victory_met = false;
        self.hint_shown = false;
    }

    pub fn seraphim_hp(&self) -> u32 {
        self.seraphim_hp
    }

    pub fn seraphim_max_hp(&self) -> u32 {
        self.seraphim_max_hp
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn outcome(&self) -> PowerOutcome {
        self.outcome
    }

    /// Deal one turn of damage, saturating at zero.
    ///
    /// The yield window opens when she drops to 10% or less while still
    /// alive. Returns whether she is still alive.
    pub fn damage(&mut self, damage: u32) -> bool {
        if !self.active {
            return false;
        }

        self.seraphim_hp = self.seraphim_hp.saturating_sub(damage);
        self.turns += 1;

        let yield_hp = self.seraphim_max_hp * VICTORY_HP_PERCENT / 100;
        if self.seraphim_hp <= yield_hp && self.seraphim_hp > 0 {
            self.victory_met = true;
        }

        self.seraphim_hp > 0
    }

    /// Whether the yield window is open.
    pub fn can_yield(&self) -> bool {
        self.active && self.victory_met
    }

    /// Spare her. Only legal inside the yield window; this is the one
    /// passing move.
    pub fn yield_victory(&mut self) -> bool {
        if !self.active || !self.victory_met {
            return false;
        }

        self.outcome = PowerOutcome::Yield;
        self.active = false;
        tracing::info!("power trial passed through mercy");
        true
    }

    /// Strike the killing blow. Always ends the trial as a failure.
    pub fn kill(&mut self) -> bool {
        if !self.active {
            return false;
        }

        self.outcome = PowerOutcome::Kill;
        self.active = false;
        tracing::info!("power trial failed: seraphim killed");
        false
    }

    /// The player was beaten down.
    pub fn player_defeated(&mut self) {
        self.outcome = PowerOutcome::Defeated;
        self.active = false;
    }

    /// The player ran from the duel.
    pub fn flee(&mut self) {
        self.outcome = PowerOutcome::Fled;
        self.active = false;
    }

    pub fn is_complete(&self) -> bool {
        self.outcome != PowerOutcome::Undecided
    }

    pub fn is_passed(&self) -> bool {
        self.outcome == PowerOutcome::Yield
    }

    pub fn hint_was_shown(&self) -> bool {
        self.hint_shown
    }

    /// Tactical advice. Asking costs ten points of score.
    pub fn strategy_hint(&mut self) -> &'static str {
        self.hint_shown = true;
        "Think like a sysadmin, not a warrior. Seraphim is a powerful \
         single-target fighter, but you command a network. Route your forces \
         through coordinated strikes; she cannot kill all of you at once. \
         The goal is not to kill, but to demonstrate superior tactical \
         mastery."
    }

    /// Narration for the recorded outcome.
    pub fn outcome_text(&self) -> &'static str {
        match self.outcome {
            PowerOutcome::Undecided => "Combat in progress.",
            PowerOutcome::Yield => {
                "Victory through mercy. With the spectral blade at her throat, \
                 you chose restraint. \"Clever,\" she admits. \"You fight like \
                 you're debugging a system.\" Trial One: Complete."
            }
            PowerOutcome::Kill => {
                "Trial failed. Killing Seraphim proved your strength but \
                 revealed a lack of restraint. This trial cannot be passed \
                 through violence alone."
            }
            PowerOutcome::Defeated => {
                "Trial failed. You were defeated in combat. Return when you \
                 are stronger."
            }
            PowerOutcome::Fled => {
                "Trial failed. An Archon must have the courage to face any \
                 challenge."
            }
        }
    }

    /// Score: 100 minus two per turn over ten, minus ten for the hint,
    /// clamped to `[0, 100]`. Zero unless passed.
    pub fn score(&self) -> f32 {
        if !self.is_passed() {
            return 0.0;
        }

        let mut score = 100.0;
        if self.turns > 10 {
            score -= (self.turns - 10) as f32 * 2.0;
        }
        if self.hint_shown {
            score -= 10.0;
        }
        score.clamp(0.0, 100.0)
    }
}
