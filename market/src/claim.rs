//! Claim and vote records.

use rumor_types::{AccountId, Category, ClaimId, ClaimPhase, GuiAmount, Timestamp};
use serde::{Deserialize, Serialize};

/// One staked vote on a claim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vote {
    pub voter: AccountId,
    /// The side backed: `true` = the claim is true.
    pub side: bool,
    pub stake: GuiAmount,
    pub cast_at: Timestamp,
    /// Whether reward settlement has occurred for this vote.
    pub claimed: bool,
    /// Payout received at settlement; zero until then (and forever, for losers).
    pub winnings: GuiAmount,
}

/// Advisory AI annotation attached to a claim after creation.
///
/// Display-only: the score never feeds reward math, and a missing
/// annotation is a perfectly valid state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfidenceAnnotation {
    /// Confidence that the claim is true, 0–100.
    pub score: u8,
    /// Free-text reasoning from the scoring service.
    pub analysis: String,
    pub annotated_at: Timestamp,
}

/// One rumor under community verification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub submitter: AccountId,
    pub content: String,
    pub tags: Vec<String>,
    pub category: Category,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    /// Vote count on the True side.
    pub true_votes: u64,
    /// Vote count on the False side.
    pub false_votes: u64,
    /// Stake total on the True side.
    pub true_stake: GuiAmount,
    /// Stake total on the False side.
    pub false_stake: GuiAmount,
    pub resolved: bool,
    /// `None` until resolution fixes it, then permanent.
    pub outcome: Option<bool>,
    /// The losing side's total stake, fixed at resolution.
    pub reward_pool: GuiAmount,
    /// All votes in the order they were cast.
    pub votes: Vec<Vote>,
    pub confidence: Option<ConfidenceAnnotation>,
}

impl Claim {
    /// Current lifecycle phase, derived from the resolved flag and expiry.
    pub fn phase(&self, now: Timestamp) -> ClaimPhase {
        if self.resolved {
            ClaimPhase::Resolved
        } else if now >= self.expires_at {
            ClaimPhase::Expired
        } else {
            ClaimPhase::Active
        }
    }

    /// The vote cast by `voter`, if any.
    pub fn vote_of(&self, voter: &AccountId) -> Option<&Vote> {
        self.votes.iter().find(|v| v.voter == *voter)
    }

    pub(crate) fn vote_of_mut(&mut self, voter: &AccountId) -> Option<&mut Vote> {
        self.votes.iter_mut().find(|v| v.voter == *voter)
    }

    /// Stake total on the side matching `side`.
    pub fn stake_on(&self, side: bool) -> GuiAmount {
        if side {
            self.true_stake
        } else {
            self.false_stake
        }
    }

    /// Share of True votes in basis points; 5 000 when nobody has voted.
    pub fn true_vote_percentage_bps(&self) -> u32 {
        let total = self.true_votes + self.false_votes;
        if total == 0 {
            return 5_000;
        }
        ((self.true_votes * 10_000) / total) as u32
    }
}
