//! Claim lifecycle phases.

use serde::{Deserialize, Serialize};

/// The lifecycle phase of a claim.
///
/// `Active → Expired → Resolved`, strictly one-way. A claim can linger in
/// `Expired` indefinitely: resolution is triggered externally by the
/// resolver, never automatically by the passage of time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimPhase {
    /// Accepting votes (before expiry, not resolved).
    Active,
    /// Past the voting deadline; votes rejected, resolution pending.
    Expired,
    /// Outcome fixed, reward pool frozen. Terminal.
    Resolved,
}

impl ClaimPhase {
    /// Whether votes are accepted in this phase.
    pub fn accepts_votes(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether the resolver may act in this phase.
    pub fn is_resolvable(&self) -> bool {
        matches!(self, Self::Expired)
    }
}
