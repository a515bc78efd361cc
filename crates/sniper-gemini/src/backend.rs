//! The seam between the orchestrator and the generative analysis service.
//!
//! Risk and profit scoring has no deterministic specification in this
//! system; it is delegated wholesale to the model behind this trait. Keeping
//! the boundary a trait lets orchestrator tests inject canned replies
//! instead of a network client.

use sniper_core::GroundingSource;

use crate::error::GeminiError;

/// Which model tier to use for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Fast, cheap tier for single-value lookups and short text generation.
    Flash,
    /// Reasoning tier for structured extraction.
    Pro,
}

impl ModelTier {
    #[must_use]
    pub fn model_id(self) -> &'static str {
        match self {
            Self::Flash => "gemini-3-flash-preview",
            Self::Pro => "gemini-3-pro-preview",
        }
    }
}

/// One generation request: a prompt plus response-shaping options.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub tier: ModelTier,
    pub prompt: String,
    /// Ask for `application/json` output instead of free text.
    pub json_response: bool,
    /// Enable search grounding so the reply carries citation sources.
    pub grounded: bool,
}

/// The parts of a generation response the orchestrator depends on: the text
/// (or JSON-as-text) body and the citation sources, in response order.
#[derive(Debug, Clone)]
pub struct GenerateReply {
    pub text: String,
    pub sources: Vec<GroundingSource>,
}

/// An opaque request/response boundary to the generative analysis service.
pub trait GenerativeBackend {
    /// Issue one generation request.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError`] on network failure, service-level errors, or
    /// an unusable response envelope.
    fn generate(
        &self,
        request: GenerateRequest,
    ) -> impl std::future::Future<Output = Result<GenerateReply, GeminiError>> + Send;
}
