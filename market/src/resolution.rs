//! Resolution and reward engine.
//!
//! Resolution fixes a claim's outcome and reward pool exactly once; the
//! pool is the losing side's total stake. Winners later claim back their
//! own stake plus a floored pro-rata share of the pool. The rounding
//! remainder left by flooring moves to the treasury at resolution time, so
//! a fully settled claim drains its escrow to zero and no value ever
//! leaks.

use crate::error::MarketError;
use crate::registry::ClaimRegistry;
use rumor_ledger::StakeLedger;
use rumor_reputation::ReputationTracker;
use rumor_types::{AccountId, ClaimId, GuiAmount, Timestamp};

/// Outcome of one entry in a batch reward claim.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchClaimEntry {
    pub claim_id: ClaimId,
    /// Payout for this claim; zero when the entry was skipped.
    pub amount: GuiAmount,
    /// Why the entry was skipped, if it was.
    pub error: Option<MarketError>,
}

/// Resolves claims and settles rewards.
///
/// Construction pins the resolver identity; every `resolve` call is
/// checked against it. The authentication of that identity happens
/// upstream — by the time an [`AccountId`] reaches this engine it is
/// already trusted.
pub struct ResolutionEngine {
    resolver: AccountId,
}

impl ResolutionEngine {
    pub fn new(resolver: AccountId) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &AccountId {
        &self.resolver
    }

    /// Resolve a claim to `outcome`.
    ///
    /// Only the configured resolver may call this, only after expiry, and
    /// only once per claim. On success the claim's outcome and reward pool
    /// are fixed permanently, every losing stake is forfeited into pool
    /// custody, and the undistributable remainder (the whole pool when the
    /// winning side is empty) moves to the treasury.
    pub fn resolve(
        &self,
        registry: &mut ClaimRegistry,
        ledger: &mut StakeLedger,
        caller: &AccountId,
        claim_id: ClaimId,
        outcome: bool,
        now: Timestamp,
    ) -> Result<(), MarketError> {
        if *caller != self.resolver {
            return Err(MarketError::Unauthorized(caller.to_string()));
        }
        let claim = registry.get_claim_mut(claim_id)?;
        if claim.resolved {
            return Err(MarketError::AlreadyResolved(claim_id));
        }
        if now < claim.expires_at {
            return Err(MarketError::VotingStillActive(claim_id));
        }

        let winning_total = claim.stake_on(outcome);
        let pool = claim.stake_on(!outcome);

        // Fallible arithmetic first: the sum of floored winner shares tells
        // us the remainder before any ledger movement happens.
        let mut distributable = GuiAmount::ZERO;
        if !winning_total.is_zero() {
            for vote in claim.votes.iter().filter(|v| v.side == outcome) {
                let share = vote
                    .stake
                    .mul_div(pool, winning_total)
                    .ok_or(MarketError::Overflow)?;
                distributable = distributable
                    .checked_add(share)
                    .ok_or(MarketError::Overflow)?;
            }
        }
        let remainder = pool
            .checked_sub(distributable)
            .ok_or(MarketError::Overflow)?;

        let losers: Vec<(AccountId, GuiAmount)> = claim
            .votes
            .iter()
            .filter(|v| v.side != outcome)
            .map(|v| (v.voter.clone(), v.stake))
            .collect();
        for (loser, stake) in &losers {
            ledger.forfeit_to_pool(loser, *stake)?;
        }
        ledger.pool_to_treasury(remainder)?;

        claim.resolved = true;
        claim.outcome = Some(outcome);
        claim.reward_pool = pool;
        tracing::info!(claim_id, outcome, pool = %pool, %remainder, "claim resolved");
        Ok(())
    }

    /// Settle one voter's reward for a resolved claim. Returns the payout.
    ///
    /// Exactly-once: the vote's `claimed` flag flips atomically with the
    /// payment, so a second call always fails with `AlreadyClaimed`.
    /// Winners receive `stake + floor(stake * pool / winning_total)`;
    /// losers receive zero (their stake already funded the pool).
    pub fn claim_rewards(
        &self,
        registry: &mut ClaimRegistry,
        ledger: &mut StakeLedger,
        reputation: &mut ReputationTracker,
        claim_id: ClaimId,
        voter: &AccountId,
    ) -> Result<GuiAmount, MarketError> {
        let claim = registry.get_claim_mut(claim_id)?;
        if !claim.resolved {
            return Err(MarketError::NotResolved(claim_id));
        }
        let outcome = claim.outcome.unwrap_or_default();
        let winning_total = claim.stake_on(outcome);
        let pool = claim.reward_pool;

        let vote = claim
            .vote_of(voter)
            .ok_or_else(|| MarketError::NotVoted(voter.to_string(), claim_id))?;
        if vote.claimed {
            return Err(MarketError::AlreadyClaimed(claim_id));
        }
        let won = vote.side == outcome;
        let stake = vote.stake;

        let payout = if won {
            let share = stake
                .mul_div(pool, winning_total)
                .ok_or(MarketError::Overflow)?;
            stake.checked_add(share).ok_or(MarketError::Overflow)?
        } else {
            GuiAmount::ZERO
        };

        if won {
            // own stake back from escrow, pool share from custody
            ledger.transfer_from_escrow(voter, stake)?;
            let share = payout.saturating_sub(stake);
            if !share.is_zero() {
                ledger.pay_from_pool(voter, share)?;
            }
        }

        let vote = claim
            .vote_of_mut(voter)
            .ok_or_else(|| MarketError::NotVoted(voter.to_string(), claim_id))?;
        vote.claimed = true;
        vote.winnings = payout;

        reputation.record_settlement(voter, won)?;
        reputation.record_earnings(voter, payout)?;
        tracing::debug!(claim_id, %voter, won, %payout, "rewards settled");
        Ok(payout)
    }

    /// Whether `voter` currently has an unclaimed reward on `claim_id`.
    ///
    /// Pure predicate; agrees exactly with [`ResolutionEngine::claim_rewards`]:
    /// it returns true iff that call would succeed.
    pub fn can_claim_reward(
        &self,
        registry: &ClaimRegistry,
        claim_id: ClaimId,
        voter: &AccountId,
    ) -> bool {
        match registry.get_claim(claim_id) {
            Ok(claim) => {
                claim.resolved
                    && claim
                        .vote_of(voter)
                        .map(|v| !v.claimed)
                        .unwrap_or(false)
            }
            Err(_) => false,
        }
    }

    /// Settle rewards for several claims in order.
    ///
    /// Per-item failures become per-entry statuses instead of aborting the
    /// batch, so one bad id never costs the voter their valid payouts.
    pub fn batch_claim_rewards(
        &self,
        registry: &mut ClaimRegistry,
        ledger: &mut StakeLedger,
        reputation: &mut ReputationTracker,
        claim_ids: &[ClaimId],
        voter: &AccountId,
    ) -> Vec<BatchClaimEntry> {
        claim_ids
            .iter()
            .map(|&claim_id| {
                match self.claim_rewards(registry, ledger, reputation, claim_id, voter) {
                    Ok(amount) => BatchClaimEntry {
                        claim_id,
                        amount,
                        error: None,
                    },
                    Err(err) => BatchClaimEntry {
                        claim_id,
                        amount: GuiAmount::ZERO,
                        error: Some(err),
                    },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voting::VotingEngine;
    use rumor_types::{Category, MarketParams};

    const DAY: u64 = 24 * 60 * 60;

    struct Fixture {
        registry: ClaimRegistry,
        ledger: StakeLedger,
        reputation: ReputationTracker,
        params: MarketParams,
        resolution: ResolutionEngine,
    }

    fn gui(n: u64) -> GuiAmount {
        GuiAmount::from_gui(n)
    }

    fn acct(name: &str) -> AccountId {
        AccountId::new(name)
    }

    fn fixture() -> Fixture {
        let mut ledger = StakeLedger::new();
        for who in ["submitter", "alice", "bob", "carol", "dave"] {
            ledger.deposit(&acct(who), gui(50)).unwrap();
        }
        Fixture {
            registry: ClaimRegistry::new(),
            ledger,
            reputation: ReputationTracker::new(),
            params: MarketParams::default(),
            resolution: ResolutionEngine::new(acct("resolver")),
        }
    }

    fn submit(f: &mut Fixture, now: u64) -> ClaimId {
        f.registry
            .submit_claim(
                &mut f.ledger,
                &f.params,
                &acct("submitter"),
                "a plausible rumor".into(),
                vec![],
                Category::Other,
                None,
                Timestamp::new(now),
            )
            .unwrap()
    }

    fn cast(f: &mut Fixture, id: ClaimId, voter: &str, side: bool, stake: GuiAmount, now: u64) {
        VotingEngine
            .vote(
                &mut f.registry,
                &mut f.ledger,
                &mut f.reputation,
                &f.params,
                id,
                &acct(voter),
                side,
                stake,
                Timestamp::new(now),
            )
            .unwrap()
    }

    fn resolve(f: &mut Fixture, id: ClaimId, outcome: bool, now: u64) -> Result<(), MarketError> {
        f.resolution.resolve(
            &mut f.registry,
            &mut f.ledger,
            &acct("resolver"),
            id,
            outcome,
            Timestamp::new(now),
        )
    }

    fn settle(f: &mut Fixture, id: ClaimId, voter: &str) -> Result<GuiAmount, MarketError> {
        f.resolution.claim_rewards(
            &mut f.registry,
            &mut f.ledger,
            &mut f.reputation,
            id,
            &acct(voter),
        )
    }

    #[test]
    fn worked_example_from_the_whitepaper() {
        // A stakes 2 True, B stakes 3 False, outcome true:
        // pool = 3, A's payout = 2 + floor(2/2 * 3) = 5, B gets nothing.
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        cast(&mut f, id, "alice", true, gui(2), 1_001);
        cast(&mut f, id, "bob", false, gui(3), 1_002);

        resolve(&mut f, id, true, 1_000 + DAY).unwrap();
        let claim = f.registry.get_claim(id).unwrap();
        assert!(claim.resolved);
        assert_eq!(claim.outcome, Some(true));
        assert_eq!(claim.reward_pool, gui(3));

        let payout = settle(&mut f, id, "alice").unwrap();
        assert_eq!(payout, gui(5));
        assert_eq!(f.ledger.available(&acct("alice")), gui(53));

        let payout = settle(&mut f, id, "bob").unwrap();
        assert_eq!(payout, GuiAmount::ZERO);
        assert_eq!(f.ledger.available(&acct("bob")), gui(47));

        let alice = f.reputation.stats(&acct("alice")).unwrap();
        assert_eq!(alice.total_votes, 1);
        assert_eq!(alice.correct_votes, 1);
        assert_eq!(alice.reputation, 1);

        let bob = f.reputation.stats(&acct("bob")).unwrap();
        assert_eq!(bob.total_votes, 1);
        assert_eq!(bob.correct_votes, 0);
        assert_eq!(bob.reputation, 0);
    }

    #[test]
    fn resolve_requires_the_resolver() {
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        let err = f
            .resolution
            .resolve(
                &mut f.registry,
                &mut f.ledger,
                &acct("alice"),
                id,
                true,
                Timestamp::new(1_000 + DAY),
            )
            .unwrap_err();
        assert!(matches!(err, MarketError::Unauthorized(_)));
    }

    #[test]
    fn resolve_before_expiry_fails() {
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        let err = resolve(&mut f, id, true, 1_000 + DAY - 1).unwrap_err();
        assert_eq!(err, MarketError::VotingStillActive(id));
        assert!(!f.registry.get_claim(id).unwrap().resolved);
    }

    #[test]
    fn resolve_is_one_way_and_once() {
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        resolve(&mut f, id, true, 1_000 + DAY).unwrap();

        let err = resolve(&mut f, id, false, 1_000 + DAY + 1).unwrap_err();
        assert_eq!(err, MarketError::AlreadyResolved(id));

        // the first outcome stands
        assert_eq!(f.registry.get_claim(id).unwrap().outcome, Some(true));
    }

    #[test]
    fn empty_losing_side_means_zero_pool() {
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        cast(&mut f, id, "alice", true, gui(2), 1_001);

        resolve(&mut f, id, true, 1_000 + DAY).unwrap();
        assert_eq!(f.registry.get_claim(id).unwrap().reward_pool, GuiAmount::ZERO);

        // winner reclaims exactly their stake
        let payout = settle(&mut f, id, "alice").unwrap();
        assert_eq!(payout, gui(2));
        assert_eq!(f.ledger.available(&acct("alice")), gui(50));
    }

    #[test]
    fn empty_winning_side_sends_pool_to_treasury() {
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        cast(&mut f, id, "alice", false, gui(2), 1_001);

        let treasury_before = f.ledger.treasury();
        resolve(&mut f, id, true, 1_000 + DAY).unwrap();

        assert_eq!(
            f.ledger.treasury(),
            treasury_before.checked_add(gui(2)).unwrap()
        );
        let payout = settle(&mut f, id, "alice").unwrap();
        assert_eq!(payout, GuiAmount::ZERO);
    }

    #[test]
    fn double_claim_yields_exactly_one_payout() {
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        cast(&mut f, id, "alice", true, gui(2), 1_001);
        cast(&mut f, id, "bob", false, gui(3), 1_002);
        resolve(&mut f, id, true, 1_000 + DAY).unwrap();

        assert_eq!(settle(&mut f, id, "alice").unwrap(), gui(5));
        let err = settle(&mut f, id, "alice").unwrap_err();
        assert_eq!(err, MarketError::AlreadyClaimed(id));
        assert_eq!(f.ledger.available(&acct("alice")), gui(53));

        let alice = f.reputation.stats(&acct("alice")).unwrap();
        assert_eq!(alice.total_votes, 1);
    }

    #[test]
    fn claim_before_resolution_fails() {
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        cast(&mut f, id, "alice", true, gui(2), 1_001);
        let err = settle(&mut f, id, "alice").unwrap_err();
        assert_eq!(err, MarketError::NotResolved(id));
    }

    #[test]
    fn non_voter_cannot_claim() {
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        cast(&mut f, id, "alice", true, gui(2), 1_001);
        resolve(&mut f, id, true, 1_000 + DAY).unwrap();
        let err = settle(&mut f, id, "carol").unwrap_err();
        assert!(matches!(err, MarketError::NotVoted(_, _)));
    }

    #[test]
    fn can_claim_agrees_with_claim_rewards() {
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        cast(&mut f, id, "alice", true, gui(2), 1_001);

        // before resolution
        assert!(!f.resolution.can_claim_reward(&f.registry, id, &acct("alice")));

        resolve(&mut f, id, true, 1_000 + DAY).unwrap();
        assert!(f.resolution.can_claim_reward(&f.registry, id, &acct("alice")));
        assert!(!f.resolution.can_claim_reward(&f.registry, id, &acct("carol")));
        assert!(!f.resolution.can_claim_reward(&f.registry, 99, &acct("alice")));

        settle(&mut f, id, "alice").unwrap();
        assert!(!f.resolution.can_claim_reward(&f.registry, id, &acct("alice")));
    }

    #[test]
    fn rounding_remainder_accrues_to_treasury() {
        // pool of 1 raw unit split between three equal winners: each share
        // floors to zero and the full unit lands in the treasury.
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        cast(&mut f, id, "alice", true, gui(1), 1_001);
        cast(&mut f, id, "bob", true, gui(1), 1_002);
        cast(&mut f, id, "carol", true, gui(1), 1_003);
        cast(&mut f, id, "dave", false, gui(1), 1_004);

        let treasury_before = f.ledger.treasury();
        resolve(&mut f, id, true, 1_000 + DAY).unwrap();

        // pool = 1 GUI = 10^18 raw; each winner gets floor(10^18 / 3), the
        // remainder of 1 raw unit goes to the treasury at resolution.
        let share = GuiAmount::new(GuiAmount::from_gui(1).raw() / 3);
        let remainder = GuiAmount::new(1);
        assert_eq!(
            f.ledger.treasury(),
            treasury_before.checked_add(remainder).unwrap()
        );

        for who in ["alice", "bob", "carol"] {
            let payout = settle(&mut f, id, who).unwrap();
            assert_eq!(payout, gui(1).checked_add(share).unwrap());
        }
        settle(&mut f, id, "dave").unwrap();

        // escrow and pool fully drained
        assert_eq!(f.ledger.pool(), GuiAmount::ZERO);
        for who in ["alice", "bob", "carol", "dave"] {
            assert_eq!(f.ledger.escrowed(&acct(who)), GuiAmount::ZERO);
        }
    }

    #[test]
    fn conservation_across_full_lifecycle() {
        let mut f = fixture();
        let total = f.ledger.total_in_system();

        let id = submit(&mut f, 1_000);
        cast(&mut f, id, "alice", true, gui(2), 1_001);
        cast(&mut f, id, "bob", false, gui(3), 1_002);
        cast(&mut f, id, "carol", true, gui(4), 1_003);
        resolve(&mut f, id, true, 1_000 + DAY).unwrap();
        for who in ["alice", "bob", "carol"] {
            settle(&mut f, id, who).unwrap();
        }

        assert_eq!(f.ledger.total_in_system(), total);
    }

    #[test]
    fn batch_claim_reports_per_item_status() {
        let mut f = fixture();
        let first = submit(&mut f, 1_000);
        let second = submit(&mut f, 1_000);
        cast(&mut f, first, "carol", true, gui(1), 1_001);
        cast(&mut f, second, "carol", false, gui(1), 1_001);
        resolve(&mut f, first, true, 1_000 + DAY).unwrap();
        resolve(&mut f, second, false, 1_000 + DAY).unwrap();

        let entries = f.resolution.batch_claim_rewards(
            &mut f.registry,
            &mut f.ledger,
            &mut f.reputation,
            &[first, second, 99],
            &acct("carol"),
        );

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].amount, gui(1));
        assert!(entries[0].error.is_none());
        assert_eq!(entries[1].amount, gui(1));
        assert!(entries[1].error.is_none());
        assert_eq!(entries[2].amount, GuiAmount::ZERO);
        assert_eq!(entries[2].error, Some(MarketError::NotFound(99)));

        // both valid settlements took effect
        let carol = f.reputation.stats(&acct("carol")).unwrap();
        assert_eq!(carol.total_votes, 2);
        assert_eq!(carol.correct_votes, 2);
        assert_eq!(carol.accuracy_bps(), 10_000);
    }

    #[test]
    fn winnings_recorded_on_the_vote() {
        let mut f = fixture();
        let id = submit(&mut f, 1_000);
        cast(&mut f, id, "alice", true, gui(2), 1_001);
        cast(&mut f, id, "bob", false, gui(3), 1_002);
        resolve(&mut f, id, true, 1_000 + DAY).unwrap();
        settle(&mut f, id, "alice").unwrap();

        let claim = f.registry.get_claim(id).unwrap();
        let vote = claim.vote_of(&acct("alice")).unwrap();
        assert!(vote.claimed);
        assert_eq!(vote.winnings, gui(5));
    }
}
