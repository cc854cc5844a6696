//! The rumor market — claim registry, voting, resolution, and rewards.
//!
//! This crate holds the economic state machine at the heart of the
//! protocol:
//! - [`ClaimRegistry`] stores claims and enforces content constraints
//! - [`VotingEngine`] validates and records one staked vote per (claim, voter)
//! - [`ResolutionEngine`] fixes outcomes and pays winners pro-rata from the
//!   losing side's stake, exactly once per voter
//!
//! All monetary movement goes through the [`rumor_ledger::StakeLedger`];
//! all statistics go through the [`rumor_reputation::ReputationTracker`].
//! Callers provide the current time explicitly, which keeps expiry logic
//! deterministic under test.

pub mod annotator;
pub mod claim;
pub mod error;
pub mod events;
pub mod registry;
pub mod resolution;
pub mod voting;

pub use annotator::{AdvisoryScore, ConfidenceAnnotator};
pub use claim::{Claim, ConfidenceAnnotation, Vote};
pub use error::MarketError;
pub use events::{EventLog, MarketEvent};
pub use registry::ClaimRegistry;
pub use resolution::{BatchClaimEntry, ResolutionEngine};
pub use voting::VotingEngine;
