//! Data files for the Necroshell game: a lenient sectioned key/value
//! format plus the typed content records every subsystem loads from it.
//!
//! One parser feeds everything: NPCs, quests, trials, minions, spells,
//! skills, artifacts, council members, and the bug tables. Files are
//! hand-authored alongside the narrative, so the parser warns and
//! defaults instead of failing.

pub mod content;
pub mod error;
pub mod file;
pub mod value;

pub use error::{DataError, ParseWarning};
pub use file::{DataFile, Section, MAX_LINE_LEN, MAX_NAME_LEN, MAX_VALUE_LEN};
pub use value::{Value, MAX_STRING_LEN};
