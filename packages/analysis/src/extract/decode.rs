//! Per-format document decoders.
//!
//! Dispatch is by lower-cased file extension: PDFs go to a dedicated
//! decoder, everything else to the generic multi-format path. Decoders are
//! synchronous; the extractor runs them on the blocking pool.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{ExtractError, ExtractResult};

/// Decode a document on disk into raw text, dispatching by extension.
pub fn decode_document(path: &Path, extension: &str) -> ExtractResult<String> {
    match extension {
        "pdf" => decode_pdf(path),
        "txt" | "md" | "csv" => read_plain_text(path),
        "docx" => decode_zip_xml(path, &["word/document.xml"]),
        "pptx" => decode_pptx(path),
        "odt" | "odp" => decode_zip_xml(path, &["content.xml"]),
        "xls" | "xlsx" | "ods" => decode_spreadsheet(path),
        "rtf" => decode_rtf(path),
        "html" | "htm" => decode_html(path),
        "xml" => decode_markup(path),
        // Legacy binary formats (.doc, .ppt) and anything unrecognized get
        // a best-effort scrape of printable runs.
        _ => decode_binary(path),
    }
}

/// Read a file as plain UTF-8 text, no decoding.
///
/// Used directly by callers that know the content is definitely plain text.
pub fn read_plain_text(path: &Path) -> ExtractResult<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn decode_pdf(path: &Path) -> ExtractResult<String> {
    pdf_extract::extract_text(path).map_err(|e| ExtractError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Decode an OOXML/ODF container by reading the named XML entries and
/// stripping markup.
fn decode_zip_xml(path: &Path, entries: &[&str]) -> ExtractResult<String> {
    let file = fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| ExtractError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut parts = Vec::new();
    for entry in entries {
        let mut xml = String::new();
        match archive.by_name(entry) {
            Ok(mut zipped) => {
                zipped
                    .read_to_string(&mut xml)
                    .map_err(ExtractError::Io)?;
                parts.push(strip_markup(&xml));
            }
            Err(_) => continue,
        }
    }

    if parts.is_empty() {
        return Err(ExtractError::Decode {
            path: path.to_path_buf(),
            reason: "no readable XML entries in container".to_string(),
        });
    }

    Ok(parts.join("\n\n"))
}

/// PPTX slides live in numbered entries under ppt/slides/.
fn decode_pptx(path: &Path) -> ExtractResult<String> {
    let file = fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| ExtractError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut slide_names: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .map(|name| name.to_string())
        .collect();
    slide_names.sort();

    let mut slides = Vec::new();
    for name in &slide_names {
        let mut xml = String::new();
        if let Ok(mut zipped) = archive.by_name(name) {
            zipped
                .read_to_string(&mut xml)
                .map_err(ExtractError::Io)?;
            slides.push(strip_markup(&xml));
        }
    }

    if slides.is_empty() {
        return Err(ExtractError::Decode {
            path: path.to_path_buf(),
            reason: "no slides found in presentation".to_string(),
        });
    }

    Ok(slides.join("\n\n"))
}

/// Extract cell text from a spreadsheet, one row per line.
fn decode_spreadsheet(path: &Path) -> ExtractResult<String> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook = open_workbook_auto(path).map_err(|e| ExtractError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut all_text = String::new();
    for sheet_name in workbook.sheet_names().to_vec() {
        if let Ok(range) = workbook.worksheet_range(&sheet_name) {
            all_text.push_str(&format!("{sheet_name}\n"));
            for row in range.rows() {
                let row_text: Vec<String> = row
                    .iter()
                    .map(|cell| match cell {
                        Data::Empty => String::new(),
                        Data::String(s) => s.clone(),
                        Data::Float(f) => f.to_string(),
                        Data::Int(i) => i.to_string(),
                        Data::Bool(b) => b.to_string(),
                        Data::Error(e) => format!("#ERR:{e:?}"),
                        Data::DateTime(dt) => dt.to_string(),
                        Data::DateTimeIso(s) => s.clone(),
                        Data::DurationIso(s) => s.clone(),
                    })
                    .collect();

                if row_text.iter().all(|s| s.is_empty()) {
                    continue;
                }
                all_text.push_str(&row_text.join("\t"));
                all_text.push('\n');
            }
            all_text.push('\n');
        }
    }

    Ok(all_text)
}

fn decode_rtf(path: &Path) -> ExtractResult<String> {
    let content = read_plain_text(path)?;
    let document =
        rtf_parser::RtfDocument::try_from(content.as_str()).map_err(|e| ExtractError::Decode {
            path: path.to_path_buf(),
            reason: format!("{e:?}"),
        })?;

    Ok(document
        .body
        .iter()
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join(""))
}

/// Decode an HTML document with a real HTML parser.
///
/// Text inside script and style elements is presentation machinery, not
/// document content, and is dropped.
fn decode_html(path: &Path) -> ExtractResult<String> {
    use scraper::{Html, Node};

    let content = read_plain_text(path)?;
    let document = Html::parse_document(&content);

    let mut parts = Vec::new();
    for node in document.root_element().descendants() {
        if let Node::Text(text) = node.value() {
            let skipped = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|element| matches!(element.name(), "script" | "style"));
            if skipped {
                continue;
            }
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        }
    }

    Ok(parts.join(" "))
}

fn decode_markup(path: &Path) -> ExtractResult<String> {
    let content = read_plain_text(path)?;
    Ok(strip_markup(&content))
}

/// Strip tags and decode the common entities from XML text.
///
/// Used for the XML entries inside OOXML/ODF containers and for bare
/// `.xml` uploads, where an HTML parser is the wrong tool.
fn strip_markup(markup: &str) -> String {
    let script_pattern = regex::Regex::new(r"(?s)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = regex::Regex::new(r"(?s)<style[^>]*>.*?</style>").unwrap();
    let mut text = script_pattern.replace_all(markup, " ").to_string();
    text = style_pattern.replace_all(&text, " ").to_string();

    let tag_pattern = regex::Regex::new(r"<[^>]+>").unwrap();
    text = tag_pattern.replace_all(&text, " ").to_string();

    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
}

/// Best-effort scrape of printable runs from a binary document.
///
/// Legacy .doc/.ppt files carry their text inline between binary records;
/// runs of printable bytes shorter than this are treated as noise.
const MIN_PRINTABLE_RUN: usize = 4;

fn decode_binary(path: &Path) -> ExtractResult<String> {
    let bytes = fs::read(path)?;

    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();
    for &byte in &bytes {
        if byte == b'\n' || byte == b'\t' || (0x20..0x7F).contains(&byte) {
            current.push(byte as char);
        } else if !current.is_empty() {
            if current.trim().len() >= MIN_PRINTABLE_RUN {
                runs.push(current.trim().to_string());
            }
            current.clear();
        }
    }
    if current.trim().len() >= MIN_PRINTABLE_RUN {
        runs.push(current.trim().to_string());
    }

    Ok(runs.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_text_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Total: $5000. Timeline: 14 days.").unwrap();

        let text = read_plain_text(file.path()).unwrap();
        assert_eq!(text, "Total: $5000. Timeline: 14 days.");
    }

    #[test]
    fn test_plain_text_tolerates_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok \xFF\xFE bytes").unwrap();

        let text = read_plain_text(file.path()).unwrap();
        assert!(text.contains("ok"));
        assert!(text.contains("bytes"));
    }

    #[test]
    fn test_html_decoding_keeps_content_drops_machinery() {
        let html = "<html><head><style>p { color: red }</style>\
                    <script>var tracking = 1;</script></head>\
                    <body><h1>Acme proposal</h1><p>Budget &amp; timeline</p></body></html>";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(html.as_bytes()).unwrap();

        let text = decode_document(file.path(), "html").unwrap();
        assert!(text.contains("Acme proposal"));
        assert!(text.contains("Budget & timeline"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("tracking"));
    }

    #[test]
    fn test_html_decoding_tolerates_malformed_markup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<p>unclosed paragraph <b>cost 5000").unwrap();

        let text = decode_document(file.path(), "htm").unwrap();
        assert!(text.contains("unclosed paragraph"));
        assert!(text.contains("cost 5000"));
    }

    #[test]
    fn test_strip_markup() {
        let html = "<html><head><style>p{color:red}</style></head>\
                    <body><p>Budget &amp; timeline</p></body></html>";
        let text = strip_markup(html);
        assert!(text.contains("Budget & timeline"));
        assert!(!text.contains("<p>"));
        assert!(!text.contains("color:red"));
    }

    #[test]
    fn test_binary_scrape_keeps_printable_runs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x00\x01Proposal from Acme Corp\x02\x03\xFFab\x00Total cost 5000\x00")
            .unwrap();

        let text = decode_binary(file.path()).unwrap();
        assert!(text.contains("Proposal from Acme Corp"));
        assert!(text.contains("Total cost 5000"));
        // Two-byte run is below the noise threshold
        assert!(!text.contains("ab"));
    }

    #[test]
    fn test_dispatch_unknown_extension_uses_binary_scrape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"legacy word document text here\x00\x01")
            .unwrap();

        let text = decode_document(file.path(), "doc").unwrap();
        assert!(text.contains("legacy word document text here"));
    }
}
