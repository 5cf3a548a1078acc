use std::fmt;

use serde::{Deserialize, Serialize};

/// Cross-references between subsystems (NPC registry, quest log,
/// relationship ledger, trial sequence) travel as stable string ids so the
/// entity graph stays acyclic and serializable. Each id type is a distinct
/// newtype to keep quest ids out of NPC slots at compile time.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Core entity ids
define_id!(NpcId);
define_id!(QuestId);
define_id!(ObjectiveId);

// World references tracked by the core as opaque tags
define_id!(LocationId);
define_id!(MemoryId);
define_id!(DialogueStateId);
