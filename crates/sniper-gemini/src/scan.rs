//! Scan orchestration: benchmark lookup, listing extraction, validation,
//! and assembly of the final [`MarketAnalysis`].

use chrono::Utc;

use sniper_core::{
    adurl::is_valid_ad_url, average_price, DealScore, GroundingSource, Listing, MarketAnalysis,
    MarketTrend, PhoneModel,
};

use crate::backend::{GenerateRequest, GenerativeBackend, ModelTier};
use crate::error::ScanError;
use crate::prompts;
use crate::types::{ExtractionPayload, RawListing};

/// Fixed opener used when negotiation-text generation fails or comes back
/// empty.
pub const NEGOTIATION_FALLBACK: &str = "Hallo, was ist Ihr letzter Preis bei Abholung heute?";

/// Drives one scan cycle against an injected generative backend.
pub struct ScanOrchestrator<B> {
    backend: B,
}

impl<B: GenerativeBackend> ScanOrchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Run one end-to-end scan for `model`.
    ///
    /// The benchmark lookup degrades to a benchmark of 0 with no sources on
    /// any failure; an extraction failure aborts the scan and nothing is
    /// persisted for the attempt (persistence is the caller's job).
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when the listing-extraction request fails or
    /// its payload cannot be parsed.
    pub async fn scan(&self, model: PhoneModel) -> Result<MarketAnalysis, ScanError> {
        let (benchmark, benchmark_sources) = self.fetch_benchmark(model).await;

        let reply = self
            .backend
            .generate(GenerateRequest {
                tier: ModelTier::Pro,
                prompt: prompts::extraction_prompt(model, benchmark),
                json_response: true,
                grounded: true,
            })
            .await?;

        let payload: ExtractionPayload = serde_json::from_str(strip_code_fences(&reply.text))
            .map_err(|source| ScanError::Payload { source })?;

        let now_millis = Utc::now().timestamp_millis();
        let listings: Vec<Listing> = payload
            .listings
            .into_iter()
            .filter(|raw| {
                let valid = is_valid_ad_url(&raw.url);
                if !valid {
                    tracing::debug!(url = %raw.url, "dropping listing without canonical ad URL");
                }
                valid
            })
            .enumerate()
            .map(|(index, raw)| accept_listing(raw, index, now_millis))
            .collect();

        let avg = average_price(&listings);
        let trend = payload
            .market_trend
            .as_deref()
            .map_or(MarketTrend::Stable, MarketTrend::parse);

        let mut sources = benchmark_sources;
        sources.extend(reply.sources);

        Ok(MarketAnalysis {
            average_price: avg,
            back_market_price: benchmark,
            arbitrage_spread: benchmark - avg,
            listings,
            sources,
            summary: payload
                .summary
                .unwrap_or_else(|| "Scan complete.".to_string()),
            agent_recommendation: format!(
                "STRATEGY: Focus on {model} listings with risk < 30 and profit > 100€. \
                 Current trend: {}.",
                trend.as_str()
            ),
            market_trend: trend,
        })
    }

    /// Benchmark-price lookup. Never fails the scan: any error or a reply
    /// without a number degrades to `(0, [])`.
    async fn fetch_benchmark(&self, model: PhoneModel) -> (i64, Vec<GroundingSource>) {
        let request = GenerateRequest {
            tier: ModelTier::Flash,
            prompt: prompts::benchmark_prompt(model),
            json_response: false,
            grounded: true,
        };
        match self.backend.generate(request).await {
            Ok(reply) => {
                let price = first_integer(&reply.text).unwrap_or(0);
                (price, reply.sources)
            }
            Err(err) => {
                tracing::warn!(%model, error = %err, "benchmark lookup failed, using 0");
                (0, Vec::new())
            }
        }
    }

    /// Generate a negotiation opener for `listing`. Failures and empty
    /// replies fall back to a fixed German message.
    pub async fn negotiate(&self, listing: &Listing) -> String {
        let request = GenerateRequest {
            tier: ModelTier::Flash,
            prompt: prompts::negotiation_prompt(listing),
            json_response: false,
            grounded: false,
        };
        match self.backend.generate(request).await {
            Ok(reply) => {
                let text = reply.text.trim();
                if text.is_empty() {
                    NEGOTIATION_FALLBACK.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(err) => {
                tracing::warn!(listing_id = %listing.id, error = %err, "negotiation generation failed");
                NEGOTIATION_FALLBACK.to_string()
            }
        }
    }
}

/// Converts a validated raw listing into the domain type: assigns the batch
/// id and clamps score and price into their invariant ranges.
fn accept_listing(raw: RawListing, index: usize, now_millis: i64) -> Listing {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let risk_score = raw.risk_score.clamp(0.0, 100.0).round() as u8;
    Listing {
        id: format!("listing-{index}-{now_millis}"),
        title: raw.title,
        price: raw.price,
        price_num: raw.price_num.max(0.0),
        location: raw.location,
        url: raw.url,
        time_posted: raw.time_posted,
        storage_gb: raw.storage_gb,
        battery_health: raw.battery_health,
        is_vb: raw.is_vb,
        condition: raw.condition,
        image_url: raw.image_url,
        deal_score: raw.deal_score.as_deref().and_then(DealScore::parse),
        agent_comment: raw.agent_comment,
        arbitrage_potential: raw.arbitrage_potential,
        seller_insights: raw.seller_insights,
        risk_score,
        profit_potential: raw.profit_potential,
    }
}

/// First contiguous digit run in `text`, if any.
fn first_integer(text: &str) -> Option<i64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Strips a surrounding markdown code fence, which the service sometimes
/// wraps around JSON output despite the requested mime type.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line, then the closing fence.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
