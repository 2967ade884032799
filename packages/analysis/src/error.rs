//! Typed errors for the analysis pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning a document reference into text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Remote document returned HTTP 404
    #[error("document not found at {url} - the file may have been moved or deleted")]
    NotFound { url: String },

    /// DNS lookup for the document host failed
    #[error("cannot reach host for {url} - check that the URL is correct and the server is online")]
    HostUnreachable { url: String },

    /// TCP connection was refused by the document host
    #[error("connection refused by {url} - the server is not accepting requests")]
    ConnectionRefused { url: String },

    /// Fetch exceeded the configured timeout
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    /// Any other HTTP failure while fetching the document
    #[error("HTTP {status} fetching {url}")]
    Http { url: String, status: u16 },

    /// Transport-level fetch failure not covered by a more specific variant
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Local file does not exist at the resolved path
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Decoder could not produce text from the document bytes
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// Filesystem error while reading or staging the document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while calling the remote inference provider.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// API key is unset; checked before any network call
    #[error("inference API key is not configured")]
    MissingApiKey,

    /// Transport failure talking to the provider
    #[error("inference request failed: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider returned a non-success status
    #[error("inference provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Response envelope contained no completion text
    #[error("inference response contained no completion")]
    EmptyCompletion,
}

/// Errors spanning the whole extraction/comparison pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Text extraction failed
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// Inference call failed
    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),

    /// No parseable JSON object could be located in the completion
    #[error("no JSON object found in model response")]
    MalformedResponse,
}

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for inference operations.
pub type InferenceResult<T> = std::result::Result<T, InferenceError>;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
