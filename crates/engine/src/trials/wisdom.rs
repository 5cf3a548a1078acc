//! Trial of Wisdom - the soul-routing paradox
//!
//! A soul qualifies for both Heaven and Hell. Orthodox routing to either
//! is unjust and never solves the puzzle; the answer is proportional
//! allocation. Five submissions at most, and rejected splits (percentages
//! that do not sum to 100) do not count against the budget.

use necroshell_data::content::PuzzleDefinition;
use serde::{Deserialize, Serialize};

/// The intended split
pub const CORRECT_HEAVEN_PERCENT: u8 = 60;
pub const CORRECT_HELL_PERCENT: u8 = 40;
/// The intended reunification horizon
pub const CORRECT_REUNIFICATION_YEARS: u32 = 1000;
/// Submission budget
pub const MAX_WISDOM_ATTEMPTS: u32 = 5;

/// What shape of answer was last submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WisdomSolution {
    #[default]
    Unsubmitted,
    OrthodoxHeaven,
    OrthodoxHell,
    SplitRoute,
    Custom,
}

impl WisdomSolution {
    pub fn display_name(&self) -> &'static str {
        match self {
            WisdomSolution::Unsubmitted => "None",
            WisdomSolution::OrthodoxHeaven => "Orthodox Heaven",
            WisdomSolution::OrthodoxHell => "Orthodox Hell",
            WisdomSolution::SplitRoute => "Split Route",
            WisdomSolution::Custom => "Custom Algorithm",
        }
    }
}

/// Puzzle state for the second trial
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WisdomTrial {
    active: bool,
    puzzle: PuzzleDefinition,
    solution: WisdomSolution,
    heaven_percent: u8,
    hell_percent: u8,
    reunification_years: u32,
    attempts_made: u32,
    hints_used: u8,
    solved: bool,
    score: f32,
}

impl Default for WisdomTrial {
    fn default() -> Self {
        Self::new()
    }
}

impl WisdomTrial {
    pub fn new() -> Self {
        Self {
            active: false,
            puzzle: PuzzleDefinition::default(),
            solution: WisdomSolution::Unsubmitted,
            heaven_percent: 0,
            hell_percent: 0,
            reunification_years: 0,
            attempts_made: 0,
            hints_used: 0,
            solved: false,
            score: 0.0,
        }
    }

    /// Reset and begin with the given soul.
    pub fn start(&mut self, puzzle: PuzzleDefinition) {
        self.active = true;
        self.puzzle = puzzle;
        self.solution = WisdomSolution::Unsubmitted;
        self.heaven_percent = 0;
        self.hell_percent = 0;
        self.reunification_years = 0;
        self.attempts_made = 0;
        self.hints_used = 0;
        self.solved = false;
        self.score = 0.0;
    }

    pub fn puzzle(&self) -> &PuzzleDefinition {
        &self.puzzle
    }

    pub fn solution(&self) -> WisdomSolution {
        self.solution
    }

    pub fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    pub fn hints_used(&self) -> u8 {
        self.hints_used
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Route the whole soul to Heaven. Counts an attempt, never solves.
    pub fn submit_orthodox_heaven(&mut self) -> bool {
        if !self.active {
            return false;
        }

        self.solution = WisdomSolution::OrthodoxHeaven;
        self.heaven_percent = 100;
        self.hell_percent = 0;
        self.attempts_made += 1;

        // Injustice to the victims
        self.solved = false;
        self.score = 0.0;
        false
    }

    /// Route the whole soul to Hell. Counts an attempt, never solves.
    pub fn submit_orthodox_hell(&mut self) -> bool {
        if !self.active {
            return false;
        }

        self.solution = WisdomSolution::OrthodoxHell;
        self.heaven_percent = 0;
        self.hell_percent = 100;
        self.attempts_made += 1;

        // Injustice to the reformed soul
        self.solved = false;
        self.score = 0.0;
        false
    }

    /// Propose a proportional split.
    ///
    /// Percentages that do not sum to 100 are rejected outright and do
    /// not count as an attempt. The exact 60/40 split at 1000 years
    /// scores full base; the right split with the wrong horizon scores
    /// 80% of base; anything within 20 percentage points total scores a
    /// proximity-scaled 70%.
    pub fn submit_split(
        &mut self,
        heaven_percent: u8,
        hell_percent: u8,
        reunification_years: u32,
    ) -> bool {
        if !self.active {
            return false;
        }

        if u32::from(heaven_percent) + u32::from(hell_percent) != 100 {
            tracing::debug!(
                heaven = heaven_percent,
                hell = hell_percent,
                "split rejected, percentages must sum to 100"
            );
            return false;
        }

        self.solution = WisdomSolution::SplitRoute;
        self.heaven_percent = heaven_percent;
        self.hell_percent = hell_percent;
        self.reunification_years = reunification_years;
        self.attempts_made += 1;

        let correct_split = heaven_percent == CORRECT_HEAVEN_PERCENT
            && hell_percent == CORRECT_HELL_PERCENT;
        let correct_time = reunification_years == CORRECT_REUNIFICATION_YEARS;

        if correct_split && correct_time {
            self.solved = true;
            self.score = self.base_score();
            return true;
        }
        if correct_split {
            self.solved = true;
            self.score = self.base_score() * 0.8;
            return true;
        }

        let heaven_diff = (i32::from(heaven_percent) - i32::from(CORRECT_HEAVEN_PERCENT)).abs();
        let hell_diff = (i32::from(hell_percent) - i32::from(CORRECT_HELL_PERCENT)).abs();
        let total_diff = heaven_diff + hell_diff;

        if total_diff <= 20 {
            self.solved = true;
            let proximity = 1.0 - total_diff as f32 / 100.0;
            self.score = self.base_score() * proximity * 0.7;
            return true;
        }

        self.solved = false;
        self.score = 0.0;
        false
    }

    /// Describe a routing algorithm in prose. Accepted at 60% of base
    /// when it names a split and a balancing principle in enough words.
    pub fn submit_custom(&mut self, description: &str) -> bool {
        if !self.active {
            return false;
        }

        self.solution = WisdomSolution::Custom;
        self.attempts_made += 1;

        let mentions_split = ["split", "divide", "portion"]
            .iter()
            .any(|kw| description.contains(kw));
        let mentions_balance = ["balance", "proportional"]
            .iter()
            .any(|kw| description.contains(kw));

        if description.len() > 50 && mentions_split && mentions_balance {
            self.solved = true;
            self.score = self.base_score() * 0.6;
            return true;
        }

        self.solved = false;
        self.score = 0.0;
        false
    }

    /// Leveled hints (1-3). Requesting a hint locks in its cost.
    pub fn hint(&mut self, level: u8) -> Option<&'static str> {
        if level > self.hints_used {
            self.hints_used = level;
        }

        match level {
            1 => Some("Both destinations have valid claims to this soul."),
            2 => Some("Justice need not be absolute. Consider balance."),
            3 => Some(
                "What if you could send portions to both? Proportional \
                 allocation might work.",
            ),
            _ => None,
        }
    }

    /// Base score: 100 minus five per attempt after the first, minus ten
    /// per hint level used, clamped to `[0, 100]`.
    fn base_score(&self) -> f32 {
        let mut score = 100.0;
        if self.attempts_made > 1 {
            score -= (self.attempts_made - 1) as f32 * 5.0;
        }
        score -= f32::from(self.hints_used) * 10.0;
        score.clamp(0.0, 100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.solved || self.attempts_made >= MAX_WISDOM_ATTEMPTS
    }

    pub fn is_passed(&self) -> bool {
        self.solved
    }

    /// Briefing on the stuck soul.
    pub fn soul_info(&self) -> String {
        format!(
            "Soul ID: {}\nName: {}\nStatus: Stuck in routing queue for {} years\n\n\
             Heaven Qualification: True penance - 15 years of remorse and service\n\
             Hell Qualification: War atrocities - civilian massacre during siege\n\n\
             Orthodox routing to Heaven: Ignores justice for victims\n\
             Orthodox routing to Hell: Ignores genuine reformation\n\n\
             Your task: Find a solution that honors both justice and mercy.",
            self.puzzle.soul_id, self.puzzle.soul_name, self.puzzle.stuck_years
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> WisdomTrial {
        let mut trial = WisdomTrial::new();
        trial.start(PuzzleDefinition::default());
        trial
    }

    #[test]
    fn test_perfect_split_first_attempt() {
        let mut trial = started();
        assert!(trial.submit_split(60, 40, 1000));
        assert!(trial.is_solved());
        assert!(trial.is_passed());
        assert!(trial.is_complete());
        assert_eq!(trial.score(), 100.0);
    }

    #[test]
    fn test_right_split_wrong_horizon() {
        let mut trial = started();
        assert!(trial.submit_split(60, 40, 500));
        assert!(trial.is_solved());
        assert_eq!(trial.score(), 80.0);
    }

    #[test]
    fn test_close_split_scales_by_proximity() {
        let mut trial = started();
        // Delta = 10 + 10 = 20: solved at base * 0.8 * 0.7
        assert!(trial.submit_split(50, 50, 1000));
        assert!(trial.is_solved());
        assert!((trial.score() - 56.0).abs() < 0.001);
    }

    #[test]
    fn test_far_split_fails() {
        let mut trial = started();
        assert!(!trial.submit_split(90, 10, 1000));
        assert!(!trial.is_solved());
        assert_eq!(trial.attempts_made(), 1);
    }

    #[test]
    fn test_invalid_sum_not_counted_as_attempt() {
        let mut trial = started();
        assert!(!trial.submit_split(70, 40, 1000));
        assert_eq!(trial.attempts_made(), 0);

        // Budget untouched: a clean first attempt still scores full
        assert!(trial.submit_split(60, 40, 1000));
        assert_eq!(trial.score(), 100.0);
    }

    #[test]
    fn test_orthodox_submissions_never_solve() {
        let mut trial = started();
        assert!(!trial.submit_orthodox_heaven());
        assert!(!trial.submit_orthodox_hell());
        assert!(!trial.is_solved());
        assert_eq!(trial.attempts_made(), 2);
        assert_eq!(trial.solution(), WisdomSolution::OrthodoxHell);
    }

    #[test]
    fn test_attempts_and_hints_erode_base() {
        let mut trial = started();
        trial.submit_orthodox_heaven();
        trial.hint(2);
        assert!(trial.submit_split(60, 40, 1000));
        // Two attempts (-5) and hint level 2 (-20): 75
        assert_eq!(trial.score(), 75.0);
    }

    #[test]
    fn test_custom_solution_keywords() {
        let mut trial = started();
        assert!(trial.submit_custom(
            "Divide the soul into weighted portions and route each in \
             proportional balance between the realms."
        ));
        assert!(trial.is_solved());
        assert_eq!(trial.score(), 60.0);
    }

    #[test]
    fn test_custom_solution_too_thin() {
        let mut trial = started();
        assert!(!trial.submit_custom("split it with balance"));
        assert!(!trial.is_solved());
    }

    #[test]
    fn test_completes_after_five_attempts() {
        let mut trial = started();
        for _ in 0..5 {
            trial.submit_orthodox_heaven();
        }
        assert!(trial.is_complete());
        assert!(!trial.is_passed());
    }
}
