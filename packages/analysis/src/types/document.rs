//! Document references: an opaque pointer to a source document.

use std::path::{Path, PathBuf};

/// A pointer to a document to be text-extracted: either an `http(s)` URL
/// or a local file path (absolute, or relative to the uploads directory).
///
/// The content type is never assumed from the string itself; it is derived
/// from the extension, defaulting to `pdf` for extension-less URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentReference {
    /// Remote document fetched over HTTP(S)
    Url(String),

    /// Local document on disk
    Path(PathBuf),
}

impl DocumentReference {
    /// Classify a raw string as a URL or a local path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }

    /// Lower-cased file extension used for decoder dispatch.
    ///
    /// URLs with no extension in their path default to `pdf`.
    pub fn extension(&self) -> String {
        match self {
            Self::Url(raw) => url_extension(raw).unwrap_or_else(|| "pdf".to_string()),
            Self::Path(path) => path_extension(path).unwrap_or_default(),
        }
    }

    /// Display form for logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

impl From<&str> for DocumentReference {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

fn path_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn url_extension(raw: &str) -> Option<String> {
    // Extension comes from the URL path, not the query string.
    let path = match url::Url::parse(raw) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => raw.split(['?', '#']).next().unwrap_or(raw).to_string(),
    };

    let last_segment = path.rsplit('/').next().unwrap_or("");
    let (stem, ext) = last_segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        let reference = DocumentReference::parse("https://example.com/doc.pdf");
        assert_eq!(
            reference,
            DocumentReference::Url("https://example.com/doc.pdf".to_string())
        );
    }

    #[test]
    fn test_parse_path() {
        let reference = DocumentReference::parse("uploads/proposal.docx");
        assert_eq!(
            reference,
            DocumentReference::Path(PathBuf::from("uploads/proposal.docx"))
        );
    }

    #[test]
    fn test_url_extension_from_path() {
        let reference = DocumentReference::parse("https://example.com/files/doc.DOCX?v=2");
        assert_eq!(reference.extension(), "docx");
    }

    #[test]
    fn test_extensionless_url_defaults_to_pdf() {
        let reference = DocumentReference::parse("https://example.com/download/12345");
        assert_eq!(reference.extension(), "pdf");
    }

    #[test]
    fn test_path_extension() {
        let reference = DocumentReference::parse("/srv/uploads/sheet.XLSX");
        assert_eq!(reference.extension(), "xlsx");
    }

    #[test]
    fn test_path_without_extension() {
        let reference = DocumentReference::parse("/srv/uploads/README");
        assert_eq!(reference.extension(), "");
    }
}
