//! Stake ledger — account balances, escrow, and treasury.
//!
//! The ledger is the single owner of all monetary state. Every other engine
//! moves value exclusively through the operations defined here, each of
//! which is a single checked delta: either the whole transfer applies or a
//! typed error is returned and nothing changes.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::{AccountBalance, StakeLedger};
