use thiserror::Error;

/// Errors returned by the generative analysis-service client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API key was configured; scan and negotiate need one.
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered but the response carries no usable candidate
    /// (blocked prompt, empty candidate list, error envelope).
    #[error("analysis service error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by a scan. Benchmark-lookup failures are absorbed inside
/// the orchestrator; only the listing-extraction step can fail a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The extraction request itself failed (network, API error).
    #[error(transparent)]
    Backend(#[from] GeminiError),

    /// The extraction reply was received but is not a valid listings payload.
    #[error("malformed extraction payload: {source}")]
    Payload {
        #[source]
        source: serde_json::Error,
    },
}
