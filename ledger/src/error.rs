use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed} raw, have {available} raw")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient escrow: need {needed} raw, have {escrowed} raw")]
    InsufficientEscrow { needed: u128, escrowed: u128 },

    #[error("insufficient reward pool custody: need {needed} raw, have {available} raw")]
    InsufficientPool { needed: u128, available: u128 },

    #[error("monetary arithmetic overflow")]
    Overflow,
}
