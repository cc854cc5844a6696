//! The reputation tracker — sole writer of user statistics.

use crate::error::ReputationError;
use crate::stats::UserStats;
use rumor_types::{AccountId, GuiAmount};
use std::collections::HashMap;

/// Which statistic a leaderboard is ranked by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaderboardMetric {
    Reputation,
    TotalEarned,
    TotalVotes,
    CorrectVotes,
}

/// Tracks statistics for every account that has interacted with the market.
///
/// Entries are created lazily on first interaction. Idempotency of
/// settlement recording is enforced by the caller through the vote's
/// `claimed` flag; each (claim, voter) pair reaches
/// [`ReputationTracker::record_settlement`] at most once.
#[derive(Clone, Debug, Default)]
pub struct ReputationTracker {
    stats: HashMap<AccountId, UserStats>,
}

impl ReputationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for an account, if it has ever interacted.
    pub fn stats(&self, account: &AccountId) -> Option<&UserStats> {
        self.stats.get(account)
    }

    /// Record a stake being placed (called by the voting engine).
    pub fn record_stake(
        &mut self,
        voter: &AccountId,
        stake: GuiAmount,
    ) -> Result<(), ReputationError> {
        let entry = self.stats.entry(voter.clone()).or_default();
        entry.total_staked = entry
            .total_staked
            .checked_add(stake)
            .ok_or(ReputationError::Overflow)?;
        Ok(())
    }

    /// Record the settlement of one vote (called by the resolution engine).
    pub fn record_settlement(
        &mut self,
        voter: &AccountId,
        was_correct: bool,
    ) -> Result<(), ReputationError> {
        let entry = self.stats.entry(voter.clone()).or_default();
        entry.total_votes = entry
            .total_votes
            .checked_add(1)
            .ok_or(ReputationError::Overflow)?;
        if was_correct {
            entry.correct_votes = entry
                .correct_votes
                .checked_add(1)
                .ok_or(ReputationError::Overflow)?;
            entry.reputation = entry
                .reputation
                .checked_add(1)
                .ok_or(ReputationError::Overflow)?;
        }
        Ok(())
    }

    /// Record winnings paid out (called by the resolution engine).
    pub fn record_earnings(
        &mut self,
        voter: &AccountId,
        amount: GuiAmount,
    ) -> Result<(), ReputationError> {
        let entry = self.stats.entry(voter.clone()).or_default();
        entry.total_earned = entry
            .total_earned
            .checked_add(amount)
            .ok_or(ReputationError::Overflow)?;
        Ok(())
    }

    /// Top accounts ranked descending by `metric`, ties broken by account id
    /// for a deterministic order.
    pub fn leaderboard(
        &self,
        metric: LeaderboardMetric,
        limit: usize,
    ) -> Vec<(AccountId, UserStats)> {
        let mut entries: Vec<_> = self
            .stats
            .iter()
            .map(|(id, stats)| (id.clone(), *stats))
            .collect();
        entries.sort_by(|(a_id, a), (b_id, b)| {
            let key = |s: &UserStats| match metric {
                LeaderboardMetric::Reputation => s.reputation as u128,
                LeaderboardMetric::TotalEarned => s.total_earned.raw(),
                LeaderboardMetric::TotalVotes => s.total_votes as u128,
                LeaderboardMetric::CorrectVotes => s.correct_votes as u128,
            };
            key(b).cmp(&key(a)).then_with(|| a_id.cmp(b_id))
        });
        entries.truncate(limit);
        entries
    }
}
