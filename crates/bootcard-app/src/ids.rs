// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

macro_rules! ui_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
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

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

ui_id!(CardId);
ui_id!(ControlId);

/// Id of the root card every deck must carry.
pub const ROOT_CARD: &str = "main";

impl CardId {
    pub fn root() -> Self {
        Self::new(ROOT_CARD)
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_CARD
    }
}

impl ControlId {
    /// Target card for a forward-navigation control: drop the leading `B`,
    /// prepend `C`. The mapping is total; whether the card exists is the
    /// deck's business.
    pub fn target_card(&self) -> CardId {
        let suffix = self.0.get(1..).unwrap_or("");
        CardId::new(format!("C{suffix}"))
    }

    /// Forward-navigation controls carry a `B<suffix>` id with a non-empty
    /// suffix.
    pub fn is_forward_control(&self) -> bool {
        self.0.starts_with('B') && self.0.len() > 1
    }
}
