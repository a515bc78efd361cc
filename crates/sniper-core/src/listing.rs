//! Domain types for a single classified-ad observation.
//!
//! `Listing` mirrors the JSON shape the analysis service returns (camelCase
//! field names on the wire), extended with the locally assigned `id`. The
//! persistence layer converts to snake_case columns at write time.

use serde::{Deserialize, Serialize};

/// Categorical deal quality assigned by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealScore {
    Great,
    Good,
    Fair,
    Poor,
}

impl DealScore {
    /// Parses the service's free-form string. Unknown values map to `None`
    /// rather than failing the whole listing.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Great" => Some(Self::Great),
            "Good" => Some(Self::Good),
            "Fair" => Some(Self::Fair),
            "Poor" => Some(Self::Poor),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Great => "Great",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

/// A citation attached to an analysis-service response.
///
/// Order is meaningful (benchmark sources precede extraction sources in a
/// merged analysis) and duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// One used-phone ad as observed in a single scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// `listing-{batch_index}-{unix_millis}` — unique within a batch and the
    /// archive, but regenerated on every scan. The same real-world ad seen in
    /// two scans gets two ids.
    pub id: String,
    pub title: String,
    /// Display price exactly as the ad shows it, e.g. `"850 € VB"`.
    pub price: String,
    pub price_num: f64,
    #[serde(default)]
    pub location: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_posted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_gb: Option<String>,
    /// Free-text battery-health note, e.g. `"Akku 91%"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_health: Option<String>,
    /// `true` when the ad is marked negotiable ("VB") rather than fixed price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_vb: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_score: Option<DealScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arbitrage_potential: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_insights: Option<String>,
    /// 0–100, 100 is highest risk. Clamped at ingestion.
    pub risk_score: u8,
    /// Estimated profit in euros; may be negative.
    pub profit_potential: f64,
}
