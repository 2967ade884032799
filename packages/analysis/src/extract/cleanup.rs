//! Best-effort cleanup of decoded document text.
//!
//! The pass is pure and idempotent: `cleanup(cleanup(s)) == cleanup(s)`
//! for any input, and it never fails.

use std::sync::LazyLock;

use regex::Regex;

/// Control characters in the non-printable ranges (keeps \n and \t).
static CONTROL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap());

// Common PDF structural tokens that leak through text extraction.
static PDF_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%PDF-[0-9.]*").unwrap());
static OBJ_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d*\s*\d*\s*obj\s*<<").unwrap());
static OBJ_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">>\s*endobj").unwrap());

/// Runs of horizontal whitespace.
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Spaces hugging a newline, which would hide blank lines from collapsing.
static AROUND_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?\n ?").unwrap());

/// Three or more consecutive newlines.
static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Runs of three or more periods.
static PERIODS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{3,}").unwrap());

/// Strip binary artifacts and normalize whitespace in extracted text.
///
/// Safe to run on already-clean text.
pub fn cleanup(text: &str) -> String {
    // Normalize line-ending variants first so later rules only see \n.
    let mut text = text.replace("\r\n", "\n").replace('\r', "\n");

    text = CONTROL.replace_all(&text, "").to_string();

    text = PDF_HEADER.replace_all(&text, "").to_string();
    text = OBJ_OPEN.replace_all(&text, "").to_string();
    text = OBJ_CLOSE.replace_all(&text, "").to_string();

    text = SPACES.replace_all(&text, " ").to_string();
    text = AROUND_NEWLINE.replace_all(&text, "\n").to_string();

    // At most one blank line in a row.
    text = NEWLINES.replace_all(&text, "\n\n").to_string();

    // Runs of periods become a plain ellipsis.
    text = PERIODS.replace_all(&text, "...").to_string();

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idempotent_on_messy_input() {
        let messy = "%PDF-1.7\n\n\n\nTotal:\t\t$5,000 ..... done\r\nnext\x00\x01 line";
        let once = cleanup(messy);
        let twice = cleanup(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let clean = "Total cost: $5,000\n\nTimeline: 14 days";
        assert_eq!(cleanup(clean), clean);
        assert_eq!(cleanup(&cleanup(clean)), clean);
    }

    #[test]
    fn test_strips_control_characters() {
        assert_eq!(cleanup("a\x00b\x08c\x1Fd"), "abcd");
    }

    #[test]
    fn test_strips_pdf_tokens() {
        let text = "%PDF-1.4 intro 12 0 obj<< body >>endobj tail";
        let cleaned = cleanup(text);
        assert!(!cleaned.contains("%PDF"));
        assert!(!cleaned.contains("obj<<"));
        assert!(!cleaned.contains("endobj"));
        assert!(cleaned.contains("body"));
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(cleanup("a   b\t\tc"), "a b c");
    }

    #[test]
    fn test_normalizes_line_endings() {
        assert_eq!(cleanup("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_collapses_blank_lines() {
        assert_eq!(cleanup("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_collapses_period_runs() {
        assert_eq!(cleanup("wait......."), "wait...");
        assert_eq!(cleanup("wait..."), "wait...");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(cleanup(""), "");
        assert_eq!(cleanup("   \n\n  "), "");
    }
}
