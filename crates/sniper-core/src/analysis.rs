//! Market-analysis aggregate returned by one scan.

use serde::{Deserialize, Serialize};

use crate::listing::{GroundingSource, Listing};

/// Direction of the model's price development as classified by the analysis
/// service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Rising,
    Falling,
    Stable,
}

impl MarketTrend {
    /// Parses the service's trend string; anything unrecognized is `Stable`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "rising" => Self::Rising,
            "falling" => Self::Falling,
            _ => Self::Stable,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::Stable => "stable",
        }
    }
}

/// The result of one end-to-end scan for one phone model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    /// Unweighted mean of `price_num` over `listings`, rounded to the nearest
    /// integer; 0 when `listings` is empty.
    pub average_price: i64,
    /// Lowest refurbished retail price found on the benchmark site; 0 when
    /// the benchmark lookup failed.
    pub back_market_price: i64,
    /// `back_market_price - average_price`; negative when local asking prices
    /// exceed refurbished retail.
    pub arbitrage_spread: i64,
    pub listings: Vec<Listing>,
    /// Benchmark-lookup sources first, extraction sources second, duplicates
    /// preserved.
    pub sources: Vec<GroundingSource>,
    pub summary: String,
    pub agent_recommendation: String,
    pub market_trend: MarketTrend,
}

/// Mean of `price_num` over `listings`, rounded to the nearest integer.
/// Returns 0 for an empty slice.
#[must_use]
pub fn average_price(listings: &[Listing]) -> i64 {
    if listings.is_empty() {
        return 0;
    }
    let sum: f64 = listings.iter().map(|l| l.price_num).sum();
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let avg = (sum / listings.len() as f64).round() as i64;
    avg
}
