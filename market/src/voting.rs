//! Voting engine — one staked vote per (claim, voter).

use crate::claim::Vote;
use crate::error::MarketError;
use crate::registry::ClaimRegistry;
use rumor_ledger::StakeLedger;
use rumor_reputation::ReputationTracker;
use rumor_types::{AccountId, ClaimId, ClaimPhase, GuiAmount, MarketParams, Timestamp};

/// Validates and records votes, maintaining per-claim tallies.
///
/// The engine is the only code path that appends to a claim's vote list or
/// touches its per-side counters, so the tallies always equal the vote list
/// by construction.
pub struct VotingEngine;

impl VotingEngine {
    /// Cast a vote on a claim.
    ///
    /// Preconditions are checked in a fixed order and the first violation
    /// is reported: claim exists, voting window open, voter is not the
    /// submitter, no prior vote, stake within bounds, balance sufficient.
    /// Only after every check passes does any state change: the stake moves
    /// to escrow, the vote record is appended, the side's tally grows, and
    /// the voter's lifetime stake is recorded.
    #[allow(clippy::too_many_arguments)]
    pub fn vote(
        &self,
        registry: &mut ClaimRegistry,
        ledger: &mut StakeLedger,
        reputation: &mut ReputationTracker,
        params: &MarketParams,
        claim_id: ClaimId,
        voter: &AccountId,
        side: bool,
        stake: GuiAmount,
        now: Timestamp,
    ) -> Result<(), MarketError> {
        let claim = registry.get_claim_mut(claim_id)?;

        if claim.phase(now) != ClaimPhase::Active {
            return Err(MarketError::VotingClosed(claim_id));
        }
        if claim.submitter == *voter {
            return Err(MarketError::SubmitterCannotVote);
        }
        if claim.vote_of(voter).is_some() {
            return Err(MarketError::AlreadyVoted(voter.to_string(), claim_id));
        }
        if stake < params.min_stake || stake > params.max_stake {
            return Err(MarketError::InvalidStake {
                stake: stake.raw(),
                min: params.min_stake.raw(),
                max: params.max_stake.raw(),
            });
        }
        let available = ledger.available(voter);
        if available < stake {
            return Err(MarketError::InsufficientBalance {
                needed: stake.raw(),
                available: available.raw(),
            });
        }

        // Compute the new tally before committing anything, so an overflow
        // cannot leave the claim and the ledger disagreeing.
        let new_side_stake = claim
            .stake_on(side)
            .checked_add(stake)
            .ok_or(MarketError::Overflow)?;

        ledger.transfer_to_escrow(voter, stake)?;

        claim.votes.push(Vote {
            voter: voter.clone(),
            side,
            stake,
            cast_at: now,
            claimed: false,
            winnings: GuiAmount::ZERO,
        });
        if side {
            claim.true_votes += 1;
            claim.true_stake = new_side_stake;
        } else {
            claim.false_votes += 1;
            claim.false_stake = new_side_stake;
        }

        reputation.record_stake(voter, stake)?;
        tracing::debug!(claim_id, %voter, side, %stake, "vote recorded");
        Ok(())
    }
}
