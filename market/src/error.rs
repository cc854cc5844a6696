use rumor_types::ClaimId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    #[error("claim {0} not found")]
    NotFound(ClaimId),

    #[error("invalid content length {len}: must be within {min}..={max}")]
    InvalidContent { len: usize, min: usize, max: usize },

    #[error("too many tags: {count} given, at most {max} allowed")]
    TooManyTags { count: usize, max: usize },

    #[error("tag too long: {len} characters, at most {max} allowed")]
    TagTooLong { len: usize, max: usize },

    #[error("voting duration {secs}s outside allowed window {min}s..={max}s")]
    InvalidDuration { secs: u64, min: u64, max: u64 },

    #[error("stake {stake} raw outside allowed bounds {min} raw..={max} raw")]
    InvalidStake { stake: u128, min: u128, max: u128 },

    #[error("insufficient balance: need {needed} raw, have {available} raw")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("the submitter cannot vote on their own claim")]
    SubmitterCannotVote,

    #[error("account {0} has already voted on claim {1}")]
    AlreadyVoted(String, ClaimId),

    #[error("voting on claim {0} is closed")]
    VotingClosed(ClaimId),

    #[error("voting on claim {0} is still active")]
    VotingStillActive(ClaimId),

    #[error("claim {0} is already resolved")]
    AlreadyResolved(ClaimId),

    #[error("claim {0} is not resolved yet")]
    NotResolved(ClaimId),

    #[error("rewards for claim {0} already claimed")]
    AlreadyClaimed(ClaimId),

    #[error("account {0} did not vote on claim {1}")]
    NotVoted(String, ClaimId),

    #[error("account {0} is not authorized to resolve claims")]
    Unauthorized(String),

    #[error("monetary arithmetic overflow")]
    Overflow,

    #[error("ledger error: {0}")]
    Ledger(#[from] rumor_ledger::LedgerError),

    #[error("reputation error: {0}")]
    Reputation(#[from] rumor_reputation::ReputationError),
}
