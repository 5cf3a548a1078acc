//! Routing puzzle subject loaded from `[PUZZLE:*]` sections

use serde::{Deserialize, Serialize};

use crate::file::{DataFile, Section};

/// The soul stuck in the routing queue that the wisdom trial is about
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDefinition {
    pub soul_id: String,
    pub soul_name: String,
    /// Years the soul has been stuck unrouted
    pub stuck_years: u32,
}

impl Default for PuzzleDefinition {
    fn default() -> Self {
        Self {
            soul_id: "soldier_penance_001".to_owned(),
            soul_name: "Marcus Valerius".to_owned(),
            stuck_years: 200,
        }
    }
}

impl PuzzleDefinition {
    pub fn from_section(section: &Section) -> Self {
        let defaults = Self::default();
        Self {
            soul_id: section.str_or("soul_id", &defaults.soul_id).to_owned(),
            soul_name: section.str_or("soul_name", &defaults.soul_name).to_owned(),
            stuck_years: section.int_or("stuck_years", i64::from(defaults.stuck_years)) as u32,
        }
    }

    /// First `[PUZZLE:*]` section, or defaults when the file has none.
    pub fn load_first(file: &DataFile) -> Self {
        file.sections_of("PUZZLE")
            .next()
            .map_or_else(Self::default, Self::from_section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_puzzle() {
        let file = DataFile::parse(
            "[PUZZLE:routing]\n\
             soul_id = soldier_penance_001\n\
             soul_name = Marcus Valerius\n\
             stuck_years = 200\n",
        );
        let puzzle = PuzzleDefinition::load_first(&file);
        assert_eq!(puzzle.soul_name, "Marcus Valerius");
        assert_eq!(puzzle.stuck_years, 200);
    }
}
