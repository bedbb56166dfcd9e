//! # entry-rewrite
//!
//! Content rewrite pipeline for syndicated feed entries.
//!
//! Publishers ship article bodies full of quirks: lazy-loaded images whose
//! real source hides in `data-*` attributes, video pages with only a text
//! description, scanned PDFs, and "related articles" boilerplate. This crate
//! keeps a registry of named transforms, picks the ones bound to an entry's
//! domain, and applies them in order to the entry's HTML.
//!
//! ## Quick Start
//!
//! ```rust
//! use entry_rewrite::rewrite;
//!
//! let html = r#"<img data-src="https://example.org/cat.jpg" alt="cat">"#;
//! let output = rewrite("https://example.org/post", html, &["add_dynamic_image"]);
//! assert!(output.contains(r#"src="https://example.org/cat.jpg""#));
//! ```
//!
//! ## Guarantees
//!
//! - Every transform is total: when it cannot parse the content, has nothing
//!   to do, or fails internally, the content passes through unchanged.
//! - Transforms run in the order given and each sees the previous output.
//! - Unknown transform identifiers are skipped with a `log` warning.
//! - Patterns and the built-in registry are immutable after first use and
//!   safe to share across threads.

mod error;
mod options;
mod patterns;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Built-in transforms (images, media, text, site cleanup).
pub mod transforms;

/// Transform trait and identifier → transform registry.
pub mod registry;

/// Domain → transform list bindings.
pub mod rules;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use patterns::CANDIDATE_ATTRS;
pub use registry::{builtin_registry, Registry, Transform};
pub use rules::{parse_rules, RuleBinding, RuleSet};

/// Apply `transform_ids`, in order, to `content` using the built-in registry.
///
/// # Example
///
/// ```rust
/// use entry_rewrite::rewrite;
///
/// let output = rewrite("http://example.com/report.pdf", "<p>body</p>", &["add_pdf_download_link"]);
/// assert_eq!(output, r#"<a href="http://example.com/report.pdf">PDF</a><p>body</p>"#);
/// ```
#[must_use]
pub fn rewrite<S: AsRef<str>>(entry_url: &str, content: &str, transform_ids: &[S]) -> String {
    builtin_registry().apply(entry_url, content, transform_ids)
}

/// Rewrite an entry with the transforms `options` selects for its URL.
///
/// # Example
///
/// ```rust
/// use entry_rewrite::{rewrite_entry, Options};
///
/// let output = rewrite_entry(
///     "https://www.youtube.com/watch?v=abc123",
///     "Video description",
///     &Options::default(),
/// );
/// assert!(output.contains("youtube-nocookie.com/embed/abc123"));
/// ```
#[must_use]
pub fn rewrite_entry(entry_url: &str, content: &str, options: &Options) -> String {
    let transforms = options.transforms_for(entry_url);
    rewrite(entry_url, content, &transforms)
}
