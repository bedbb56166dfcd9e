//! Compiled regex patterns shared by the rewrite transforms.
//!
//! All patterns are compiled once on first use via `LazyLock` and are never
//! mutated afterwards, so every transform (on any thread) reads them without
//! synchronization.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// URL Patterns
// =============================================================================

/// Matches a YouTube watch URL and captures the video identifier.
pub static YOUTUBE_VIDEO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com/watch\?v=(.*)").expect("YOUTUBE_VIDEO regex")
});

/// Matches bare `http`/`https` URLs inside plain text.
///
/// The final character class excludes trailing punctuation such as `.`, `,`
/// or `)` so that "see http://a.b/c." does not swallow the full stop.
pub static TEXT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)(\bhttps?://[-A-Z0-9+&@#/%?=~_|!:,.;]*[-A-Z0-9+&@#/%=~_|])")
        .expect("TEXT_LINK regex")
});

// =============================================================================
// Markup Patterns
// =============================================================================

/// Matches a single inline `<img ...>` tag in raw (unparsed) markup.
///
/// Used on the text content of `<noscript>` elements, which the HTML parser
/// keeps as raw text rather than building a subtree.
pub static INLINE_IMG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<img [^>]+>").expect("INLINE_IMG regex"));

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

// =============================================================================
// Image Source Candidates
// =============================================================================

/// Attributes that may carry a deferred image source, most preferred first.
///
/// The order is fixed: per element, the first attribute in this list that is
/// present wins.
pub const CANDIDATE_ATTRS: &[&str] = &[
    "data-src",
    "data-original",
    "data-orig",
    "data-url",
    "data-orig-file",
    "data-large-file",
    "data-medium-file",
    "data-2000src",
    "data-1000src",
    "data-800src",
    "data-655src",
    "data-500src",
    "data-380src",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_video_captures_identifier() {
        let caps = YOUTUBE_VIDEO.captures("https://www.youtube.com/watch?v=abc123");
        assert_eq!(caps.and_then(|c| c.get(1)).map(|m| m.as_str()), Some("abc123"));
        assert!(!YOUTUBE_VIDEO.is_match("https://vimeo.com/12345"));
    }

    #[test]
    fn text_link_stops_before_trailing_punctuation() {
        let m = TEXT_LINK.find("visit https://example.org/a?b=1. Thanks");
        assert_eq!(m.map(|m| m.as_str()), Some("https://example.org/a?b=1"));
    }

    #[test]
    fn text_link_is_case_insensitive() {
        assert!(TEXT_LINK.is_match("HTTP://EXAMPLE.COM/X"));
    }

    #[test]
    fn inline_img_requires_attributes() {
        assert!(INLINE_IMG.is_match(r#"<img src="a.jpg">"#));
        assert!(!INLINE_IMG.is_match("<img>"));
    }

    #[test]
    fn candidate_attrs_prefer_data_src() {
        assert_eq!(CANDIDATE_ATTRS.first(), Some(&"data-src"));
        assert_eq!(CANDIDATE_ATTRS.last(), Some(&"data-380src"));
    }
}
