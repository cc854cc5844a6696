//! Rumor Protocol node — orchestrates the market engines.
//!
//! The node is the central coordinator that:
//! - Accepts claims and collects submission fees
//! - Records staked votes and maintains tallies
//! - Resolves claims and settles rewards exactly once per voter
//! - Tracks per-user reputation statistics
//! - Emits domain events and Prometheus metrics
//! - Attaches advisory AI confidence scores, best-effort
//!
//! Every public operation runs under one mutex, so operations against the
//! same claim (and everything else) are linearizable: concurrent duplicate
//! votes or reward claims commit exactly once.

pub mod config;
pub mod confidence;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod node;

pub use config::NodeConfig;
pub use confidence::HttpAnnotator;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use metrics::NodeMetrics;
pub use node::RumorNode;
