//! Market parameters — every tunable value of the staking market.

use crate::amount::GuiAmount;
use serde::{Deserialize, Serialize};

/// All market parameters, with defaults matching the deployed contract.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketParams {
    /// Fee debited from the submitter into the treasury per claim. Default: 10 GUI.
    pub submission_fee: GuiAmount,

    /// Minimum stake per vote. Default: 1 GUI.
    pub min_stake: GuiAmount,

    /// Maximum stake per vote. Default: 5 GUI.
    pub max_stake: GuiAmount,

    /// Minimum claim content length in characters. Default: 10.
    pub min_content_len: usize,

    /// Maximum claim content length in characters. Default: 500.
    pub max_content_len: usize,

    /// Maximum number of tags per claim. Default: 5.
    pub max_tags: usize,

    /// Maximum length of a single tag in characters. Default: 20.
    pub max_tag_len: usize,

    /// Voting window applied when the submitter does not choose one.
    /// Default: 24 hours.
    pub default_voting_duration_secs: u64,

    /// Shortest voting window a submitter may choose. Default: 1 hour.
    pub min_voting_duration_secs: u64,

    /// Longest voting window a submitter may choose. Default: 7 days.
    pub max_voting_duration_secs: u64,
}

impl Default for MarketParams {
    fn default() -> Self {
        Self {
            submission_fee: GuiAmount::from_gui(10),
            min_stake: GuiAmount::from_gui(1),
            max_stake: GuiAmount::from_gui(5),
            min_content_len: 10,
            max_content_len: 500,
            max_tags: 5,
            max_tag_len: 20,
            default_voting_duration_secs: 24 * 60 * 60,
            min_voting_duration_secs: 60 * 60,
            max_voting_duration_secs: 7 * 24 * 60 * 60,
        }
    }
}
