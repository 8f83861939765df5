//! Strongly-typed ID wrappers for the three record kinds
//!
//! The record store generates ids; everything else treats them as opaque.
//! Newtypes keep a card id from being passed where a transaction id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short form used in listings, e.g. `txn-1a2b3c4d`
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Check whether a user-typed identifier names this id
            ///
            /// Accepts the full UUID, the prefixed short form, or a bare
            /// prefix of the UUID's hex digits (at least 4 characters).
            pub fn matches(&self, identifier: &str) -> bool {
                let identifier = identifier.trim();
                if let Ok(full) = Self::from_str(identifier) {
                    return full == *self;
                }
                let digits = identifier.strip_prefix($display_prefix).unwrap_or(identifier);
                digits.len() >= 4 && self.0.simple().to_string().starts_with(&digits.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(PayableId, "pay-");
define_id!(CreditCardId, "card-");
