//! Wire types for the generative-language `generateContent` endpoint and the
//! structured extraction payload the scan prompt asks for.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestPart {
    pub text: String,
}

/// Tool declaration enabling search grounding for a request.
#[derive(Debug, Serialize)]
pub(crate) struct Tool {
    pub google_search: serde_json::Map<String, serde_json::Value>,
}

impl Tool {
    pub(crate) fn search() -> Self {
        Self {
            google_search: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Search-grounding citations attached to a candidate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WebChunk {
    #[serde(default)]
    pub title: Option<String>,
    pub uri: String,
}

// ---------------------------------------------------------------------------
// Extraction payload
// ---------------------------------------------------------------------------

/// The structured JSON body the extraction prompt asks the model to emit:
/// `{ listings, marketTrend, summary }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionPayload {
    #[serde(default)]
    pub listings: Vec<RawListing>,
    #[serde(default)]
    pub market_trend: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// One listing object as the model returns it, before validation, id
/// assignment, and clamping. Required fields match the response schema the
/// prompt declares; everything else is best-effort.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    pub title: String,
    pub price: String,
    pub price_num: f64,
    #[serde(default)]
    pub location: String,
    pub url: String,
    #[serde(default)]
    pub time_posted: Option<String>,
    #[serde(default)]
    pub storage_gb: Option<String>,
    #[serde(default)]
    pub battery_health: Option<String>,
    #[serde(default)]
    pub is_vb: Option<bool>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub deal_score: Option<String>,
    #[serde(default)]
    pub agent_comment: Option<String>,
    #[serde(default)]
    pub arbitrage_potential: Option<String>,
    #[serde(default)]
    pub seller_insights: Option<String>,
    pub risk_score: f64,
    pub profit_potential: f64,
}
