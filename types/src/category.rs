//! Claim categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The topic category of a claim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Exchange-traded fund news and filings.
    Etf,
    /// Price movements and market predictions.
    Price,
    /// Protocol upgrades, launches, and technical developments.
    Tech,
    /// Regulatory and legal developments.
    Regulation,
    /// Partnerships and integrations.
    Partnership,
    /// Anything else.
    #[default]
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Etf => "ETF",
            Category::Price => "Price",
            Category::Tech => "Tech",
            Category::Regulation => "Regulation",
            Category::Partnership => "Partnership",
            Category::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ETF" => Ok(Category::Etf),
            "Price" => Ok(Category::Price),
            "Tech" => Ok(Category::Tech),
            "Regulation" => Ok(Category::Regulation),
            "Partnership" => Ok(Category::Partnership),
            "Other" => Ok(Category::Other),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_from_str_roundtrip() {
        for cat in [
            Category::Etf,
            Category::Price,
            Category::Tech,
            Category::Regulation,
            Category::Partnership,
            Category::Other,
        ] {
            assert_eq!(cat.to_string().parse::<Category>().unwrap(), cat);
        }
    }

    #[test]
    fn default_is_other() {
        assert_eq!(Category::default(), Category::Other);
    }
}
