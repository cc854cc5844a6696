//! Account identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, pre-authenticated account identity.
///
/// The protocol never inspects the contents beyond normalization; signature
/// verification happens in the authentication layer before an `AccountId`
/// reaches the core. Identifiers are case-insensitive and stored lowercase
/// so the same principal always maps to the same ledger entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account id from a raw string, normalizing to lowercase.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().to_lowercase())
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
