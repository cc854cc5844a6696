//! Per-user statistics.

use rumor_types::GuiAmount;
use serde::{Deserialize, Serialize};

/// Lifetime voting statistics for one account.
///
/// `total_votes` and `correct_votes` count settled votes only — a vote
/// enters the statistics when its reward is claimed, not when it is cast.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct UserStats {
    /// Monotonic counter: +1 per correctly settled vote.
    pub reputation: u64,
    /// Settled votes.
    pub total_votes: u64,
    /// Settled votes on the side matching the outcome.
    pub correct_votes: u64,
    /// Lifetime sum of stakes placed.
    pub total_staked: GuiAmount,
    /// Lifetime sum of winnings received.
    pub total_earned: GuiAmount,
}

impl UserStats {
    /// Accuracy in basis points: `correct_votes * 10_000 / total_votes`,
    /// zero when no votes have settled. Derived on demand; never stored.
    pub fn accuracy_bps(&self) -> u32 {
        if self.total_votes == 0 {
            return 0;
        }
        ((self.correct_votes * 10_000) / self.total_votes) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_zero_without_votes() {
        assert_eq!(UserStats::default().accuracy_bps(), 0);
    }

    #[test]
    fn accuracy_basis_points() {
        let stats = UserStats {
            total_votes: 3,
            correct_votes: 3,
            ..Default::default()
        };
        assert_eq!(stats.accuracy_bps(), 10_000);

        let stats = UserStats {
            total_votes: 3,
            correct_votes: 1,
            ..Default::default()
        };
        assert_eq!(stats.accuracy_bps(), 3_333);
    }
}
