pub mod account;
pub mod insight;
pub mod screenshot;
pub mod trade;

pub use account::TradingAccount;
pub use insight::{TradingInsight, NO_INSIGHTS_MESSAGE};
pub use screenshot::{ScreenshotPayload, TradeScreenshot};
pub use trade::{Trade, TradeWithScreenshots};

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BUY" | "LONG" => Some(Direction::Buy),
            "SELL" | "SHORT" => Some(Direction::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => write!(f, "BUY"),
            Direction::Sell => write!(f, "SELL"),
        }
    }
}

/// Outcome of a trade. Stored as an open-ended string so new categories
/// don't require a migration; these are the values the frontend sends today.
pub const OUTCOME_OPEN: &str = "OPEN";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_aliases() {
        assert_eq!(Direction::from_api_str("buy"), Some(Direction::Buy));
        assert_eq!(Direction::from_api_str("LONG"), Some(Direction::Buy));
        assert_eq!(Direction::from_api_str("short"), Some(Direction::Sell));
        assert_eq!(Direction::from_api_str("hold"), None);
    }
}
