//! Fundamental types for the Rumor Protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account identifiers, token amounts, timestamps, claim
//! identifiers, categories, and market parameters.

pub mod account;
pub mod amount;
pub mod category;
pub mod params;
pub mod phase;
pub mod time;

pub use account::AccountId;
pub use amount::{GuiAmount, GUI_UNIT};
pub use category::Category;
pub use params::MarketParams;
pub use phase::ClaimPhase;
pub use time::{Clock, SystemClock, Timestamp};

/// Unique sequential identifier of a claim. Assigned at creation starting
/// at 0, monotonically increasing, never reused.
pub type ClaimId = u64;
