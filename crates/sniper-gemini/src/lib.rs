//! Client and orchestration for the generative analysis service: benchmark
//! price lookup, grounded listing extraction, and negotiation-text
//! generation.

mod backend;
mod client;
mod error;
mod prompts;
mod retry;
mod scan;
pub mod types;

pub use backend::{GenerateReply, GenerateRequest, GenerativeBackend, ModelTier};
pub use client::GeminiClient;
pub use error::{GeminiError, ScanError};
pub use scan::{ScanOrchestrator, NEGOTIATION_FALLBACK};
