// file: src/utils/text.rs
// description: text normalization helpers for titles, abstracts, and excerpts
// reference: internal text handling

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse runs of whitespace (including newlines) into single spaces and
/// trim the result. Feed abstracts arrive with hard line wraps.
pub fn normalize_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").to_string()
}

/// First `max_chars` characters of `text` followed by an ellipsis marker.
/// Counts characters, not bytes, so multibyte abstracts never split a
/// codepoint. The marker is appended unconditionally.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace_collapses_newlines() {
        let raw = "We propose a\nnovel method\n  for graphs.";
        assert_eq!(normalize_whitespace(raw), "We propose a novel method for graphs.");
    }

    #[test]
    fn test_normalize_whitespace_trims() {
        assert_eq!(normalize_whitespace("  padded  "), "padded");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_excerpt_short_text_keeps_everything() {
        assert_eq!(excerpt("short", 200), "short...");
    }

    #[test]
    fn test_excerpt_truncates_by_chars() {
        let text = "a".repeat(300);
        let cut = excerpt(&text, 200);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_excerpt_multibyte_safe() {
        let text = "é".repeat(250);
        let cut = excerpt(&text, 200);
        assert_eq!(cut.chars().count(), 203);
    }
}
