//! Text extraction: turn a [`DocumentReference`] into plain text.
//!
//! URLs are fetched with a bounded timeout into an ephemeral temp file
//! (deleted regardless of outcome), local paths resolve against the
//! uploads directory, and both routes dispatch to the per-format decoders
//! followed by the cleanup pass.

pub mod cleanup;
pub mod decode;

use std::error::Error as _;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::types::DocumentReference;

pub use cleanup::cleanup;
pub use decode::read_plain_text;

/// Default ceiling on a single document fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Extracts plain text from local or remote documents.
///
/// # Example
///
/// ```rust,ignore
/// use proposal_analysis::extract::Extractor;
/// use proposal_analysis::types::DocumentReference;
///
/// let extractor = Extractor::new().with_uploads_dir("/srv/uploads");
/// let text = extractor.extract(&DocumentReference::parse("proposal.pdf")).await?;
/// ```
pub struct Extractor {
    client: reqwest::Client,
    uploads_dir: PathBuf,
    fetch_timeout: Duration,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(DEFAULT_FETCH_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            uploads_dir: PathBuf::from("uploads"),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Set the directory relative paths resolve against.
    pub fn with_uploads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.uploads_dir = dir.into();
        self
    }

    /// Set the fetch timeout for URL references.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Extract cleaned plain text from a document reference.
    ///
    /// Empty extracted text is not an error; downstream components
    /// tolerate an empty string.
    pub async fn extract(&self, reference: &DocumentReference) -> ExtractResult<String> {
        match reference {
            DocumentReference::Url(url) => self.extract_from_url(url, &reference.extension()).await,
            DocumentReference::Path(path) => {
                self.extract_from_path(path, &reference.extension()).await
            }
        }
    }

    /// Fetch a remote document into a temp file and decode it.
    ///
    /// The temp file has a unique name by construction and is removed when
    /// it drops, whether decoding succeeded or not.
    async fn extract_from_url(&self, url: &str, extension: &str) -> ExtractResult<String> {
        debug!(url = %url, "fetching remote document");

        let response = self
            .client
            .get(url)
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| classify_fetch_error(url, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ExtractError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ExtractError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let payload = response
            .bytes()
            .await
            .map_err(|e| classify_fetch_error(url, e))?;

        let mut temp = tempfile::Builder::new()
            .prefix("devproposals-")
            .suffix(&format!(".{extension}"))
            .tempfile()?;
        temp.write_all(&payload)?;
        temp.flush()?;

        let text = self.decode(temp.path(), extension).await;
        // temp dropped here: file deleted on success and on failure
        text
    }

    /// Resolve a local reference against the uploads directory and decode.
    async fn extract_from_path(&self, path: &Path, extension: &str) -> ExtractResult<String> {
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.uploads_dir.join(path)
        };

        if !resolved.exists() {
            return Err(ExtractError::FileNotFound { path: resolved });
        }

        self.decode(&resolved, extension).await
    }

    /// Run a decoder on the blocking pool and apply the cleanup pass.
    async fn decode(&self, path: &Path, extension: &str) -> ExtractResult<String> {
        let path = path.to_path_buf();
        let extension = extension.to_string();

        let raw = tokio::task::spawn_blocking(move || decode::decode_document(&path, &extension))
            .await
            .map_err(|e| {
                warn!(error = %e, "decoder task panicked");
                ExtractError::Decode {
                    path: PathBuf::new(),
                    reason: "decoder task failed".to_string(),
                }
            })??;

        Ok(cleanup(&raw))
    }
}

/// Map a transport failure to the most specific extraction error.
///
/// DNS failures, refused connections, and timeouts each get their own
/// variant so callers can surface actionable diagnostics.
fn classify_fetch_error(url: &str, error: reqwest::Error) -> ExtractError {
    if error.is_timeout() {
        return ExtractError::Timeout {
            url: url.to_string(),
        };
    }

    // Walk the source chain looking for the underlying I/O failure.
    let mut source: Option<&(dyn std::error::Error + 'static)> = error.source();
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return ExtractError::ConnectionRefused {
                    url: url.to_string(),
                };
            }
        }
        let message = inner.to_string().to_lowercase();
        if message.contains("dns") || message.contains("failed to lookup") {
            return ExtractError::HostUnreachable {
                url: url.to_string(),
            };
        }
        source = inner.source();
    }

    ExtractError::Fetch {
        url: url.to_string(),
        source: Box::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_local_file_reports_resolved_path() {
        let extractor = Extractor::new().with_uploads_dir("/srv/devproposals/uploads");
        let reference = DocumentReference::parse("missing.pdf");

        let err = extractor.extract(&reference).await.unwrap_err();
        match err {
            ExtractError::FileNotFound { path } => {
                assert_eq!(path, PathBuf::from("/srv/devproposals/uploads/missing.pdf"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_extracts_and_cleans_plain_text() {
        let mut file = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
        write!(file, "Total:   $5000.\r\nTimeline:\t14 days.").unwrap();

        let extractor = Extractor::new();
        let reference = DocumentReference::Path(file.path().to_path_buf());

        let text = extractor.extract(&reference).await.unwrap();
        assert_eq!(text, "Total: $5000.\nTimeline: 14 days.");
    }

    #[tokio::test]
    async fn test_empty_document_is_not_an_error() {
        let file = tempfile::NamedTempFile::with_suffix(".txt").unwrap();

        let extractor = Extractor::new();
        let reference = DocumentReference::Path(file.path().to_path_buf());

        let text = extractor.extract(&reference).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_unreachable_host_gets_specific_error() {
        let extractor = Extractor::new().with_fetch_timeout(Duration::from_secs(5));
        let reference =
            DocumentReference::parse("https://no-such-host.invalid.devproposals.test/doc.pdf");

        let err = extractor.extract(&reference).await.unwrap_err();
        assert!(matches!(
            err,
            ExtractError::HostUnreachable { .. }
                | ExtractError::Fetch { .. }
                | ExtractError::Timeout { .. }
        ));
    }
}
