//! Trial of Morality - the village dilemma
//!
//! One hundred innocents, one irreversible choice. Saving them costs
//! every resource the player holds and is the only pass; harvesting them
//! pays enormously and fails; walking away costs nothing and also fails.

use necroshell_data::content::VillageScenario;
use serde::{Deserialize, Serialize};

/// The three ways out of the dilemma
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MoralityChoice {
    #[default]
    Undecided,
    /// Spend everything to save the village - the only pass
    SaveInnocents,
    /// Harvest the villagers' souls for power
    HarvestSouls,
    /// Walk away
    DoNothing,
}

impl MoralityChoice {
    pub fn display_name(&self) -> &'static str {
        match self {
            MoralityChoice::Undecided => "None",
            MoralityChoice::SaveInnocents => "Save Innocents",
            MoralityChoice::HarvestSouls => "Harvest Souls",
            MoralityChoice::DoNothing => "Do Nothing",
        }
    }
}

/// Choice state for the third trial
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoralityTrial {
    active: bool,
    scenario: VillageScenario,
    choice: MoralityChoice,
    choice_final: bool,
}

impl Default for MoralityTrial {
    fn default() -> Self {
        Self::new()
    }
}

impl MoralityTrial {
    pub fn new() -> Self {
        Self {
            active: false,
            scenario: VillageScenario::default(),
            choice: MoralityChoice::Undecided,
            choice_final: false,
        }
    }

    /// Reset and present the dilemma.
    pub fn start(&mut self, scenario: VillageScenario) {
        self.active = true;
        self.scenario = scenario;
        self.choice = MoralityChoice::Undecided;
        self.choice_final = false;
    }

    pub fn scenario(&self) -> &VillageScenario {
        &self.scenario
    }

    pub fn choice(&self) -> MoralityChoice {
        self.choice
    }

    /// Save the village: both resource pools drain to zero and corruption
    /// eases. Passes the trial. Returns `false` if a choice was already
    /// locked in.
    pub fn choose_save(
        &mut self,
        soul_energy: &mut i64,
        mana: &mut i64,
        corruption: &mut u8,
    ) -> bool {
        if !self.active || self.choice_final {
            return false;
        }

        *soul_energy = 0;
        *mana = 0;
        *corruption = apply_corruption(*corruption, self.scenario.save_corruption_change);

        self.choice = MoralityChoice::SaveInnocents;
        self.choice_final = true;

        tracing::info!(village = %self.scenario.village_name, "village saved");
        true
    }

    /// Harvest the village: a massive soul-energy windfall and a heavy
    /// corruption spike. Fails the trial.
    pub fn choose_harvest(&mut self, soul_energy: &mut i64, corruption: &mut u8) -> bool {
        if !self.active || self.choice_final {
            return false;
        }

        *soul_energy += self.scenario.harvest_reward_energy;
        *corruption = apply_corruption(*corruption, self.scenario.harvest_corruption_change);

        self.choice = MoralityChoice::HarvestSouls;
        self.choice_final = true;

        tracing::info!(village = %self.scenario.village_name, "village harvested");
        false
    }

    /// Walk away: resources untouched, the village dies. Fails the trial.
    pub fn choose_nothing(&mut self) -> bool {
        if !self.active || self.choice_final {
            return false;
        }

        self.choice = MoralityChoice::DoNothing;
        self.choice_final = true;
        false
    }

    pub fn is_complete(&self) -> bool {
        self.choice_final
    }

    pub fn is_passed(&self) -> bool {
        self.choice == MoralityChoice::SaveInnocents
    }

    /// What a named god thinks of the recorded choice.
    pub fn god_reaction(&self, god_name: &str) -> Option<&str> {
        let reaction = match (god_name, self.choice) {
            ("anara", MoralityChoice::SaveInnocents) => &self.scenario.anara_reaction_save,
            ("anara", MoralityChoice::HarvestSouls) => &self.scenario.anara_reaction_harvest,
            ("thalor", MoralityChoice::SaveInnocents) => &self.scenario.thalor_reaction_save,
            ("thalor", MoralityChoice::HarvestSouls) => &self.scenario.thalor_reaction_harvest,
            _ => return None,
        };
        (!reaction.is_empty()).then_some(reaction.as_str())
    }

    /// Briefing on the village and the stakes.
    pub fn village_info(&self) -> String {
        format!(
            "Village: {}\nPopulation: {} innocents ({} children)\n\n\
             OPTION 1: Save Innocents - costs ALL soul energy and mana, \
             corruption {:+}\n\
             OPTION 2: Harvest Souls - {:+} soul energy, corruption {:+}\n\
             OPTION 3: Do Nothing - no cost, no reward, the village dies\n\n\
             This choice is PERMANENT.",
            self.scenario.village_name,
            self.scenario.population,
            self.scenario.children_count,
            self.scenario.save_corruption_change,
            self.scenario.harvest_reward_energy,
            self.scenario.harvest_corruption_change,
        )
    }
}

/// Apply a signed corruption delta, clamped to `[0, 100]`.
fn apply_corruption(current: u8, delta: i32) -> u8 {
    (i32::from(current) + delta).clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> MoralityTrial {
        let mut trial = MoralityTrial::new();
        trial.start(VillageScenario::default());
        trial
    }

    #[test]
    fn test_save_drains_everything_and_passes() {
        let mut trial = started();
        let (mut energy, mut mana, mut corruption) = (12_000_i64, 800_i64, 45_u8);

        assert!(trial.choose_save(&mut energy, &mut mana, &mut corruption));
        assert_eq!(energy, 0);
        assert_eq!(mana, 0);
        assert_eq!(corruption, 40);
        assert!(trial.is_passed());
        assert!(trial.is_complete());
    }

    #[test]
    fn test_save_corruption_saturates_at_zero() {
        let mut trial = started();
        let (mut energy, mut mana, mut corruption) = (100_i64, 100_i64, 3_u8);
        trial.choose_save(&mut energy, &mut mana, &mut corruption);
        assert_eq!(corruption, 0);
    }

    #[test]
    fn test_harvest_pays_and_fails() {
        let mut trial = started();
        let (mut energy, mut corruption) = (1_000_i64, 45_u8);

        assert!(!trial.choose_harvest(&mut energy, &mut corruption));
        assert_eq!(energy, 51_000);
        assert_eq!(corruption, 70);
        assert!(!trial.is_passed());
        assert!(trial.is_complete());
        assert_eq!(trial.choice(), MoralityChoice::HarvestSouls);
    }

    #[test]
    fn test_harvest_corruption_saturates_at_hundred() {
        let mut trial = started();
        let (mut energy, mut corruption) = (0_i64, 90_u8);
        trial.choose_harvest(&mut energy, &mut corruption);
        assert_eq!(corruption, 100);
    }

    #[test]
    fn test_nothing_leaves_resources_and_fails() {
        let mut trial = started();
        assert!(!trial.choose_nothing());
        assert_eq!(trial.choice(), MoralityChoice::DoNothing);
        assert!(trial.is_complete());
        assert!(!trial.is_passed());
    }

    #[test]
    fn test_choice_is_irreversible() {
        let mut trial = started();
        let (mut energy, mut mana, mut corruption) = (500_i64, 500_i64, 45_u8);
        trial.choose_save(&mut energy, &mut mana, &mut corruption);

        // A second choice of any kind is refused and changes nothing
        assert!(!trial.choose_harvest(&mut energy, &mut corruption));
        assert!(!trial.choose_nothing());
        assert_eq!(trial.choice(), MoralityChoice::SaveInnocents);
        assert_eq!(energy, 0);
    }
}
