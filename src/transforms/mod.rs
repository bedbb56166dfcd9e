//! Built-in content transforms.
//!
//! Every transform has the shape `(entry_url, content) -> content` and is
//! total: parse failures, serialization failures and "nothing to do" all
//! yield the original content unchanged.
//!
//! # Module Structure
//!
//! - `images`: lazy-image resolution, `noscript` fallback, image titles
//! - `media`: video embeds and PDF download links (URL-driven)
//! - `text`: plain-text linkification and line-feed conversion
//! - `cleanup`: declarative per-publisher boilerplate removal

use log::debug;

use crate::dom::{self, Document};
use crate::error::Result;

pub mod cleanup;
pub mod images;
pub mod media;
pub mod text;

pub use cleanup::{CleanupRule, Predicate, RemovalTarget, SiteCleanup};
pub use images::{add_dynamic_image, add_image_title, hide_first_image};
pub use media::{add_pdf_download_link, add_youtube_video};
pub use text::{convert_text_link, nl2br};

/// Stable identifiers of the built-in transforms.
pub mod ids {
    pub const ADD_IMAGE_TITLE: &str = "add_image_title";
    pub const ADD_DYNAMIC_IMAGE: &str = "add_dynamic_image";
    pub const ADD_YOUTUBE_VIDEO: &str = "add_youtube_video";
    pub const ADD_PDF_DOWNLOAD_LINK: &str = "add_pdf_download_link";
    pub const CONVERT_TEXT_LINK: &str = "convert_text_link";
    pub const NL2BR: &str = "nl2br";
    pub const HIDE_FIRST_IMAGE: &str = "hide_first_image";
    pub const CLEANUP_BALIPOST: &str = "cleanup_balipost";
    pub const CLEANUP_METROBALI: &str = "cleanup_metrobali";
    pub const CLEANUP_BALIPUSPANEWS: &str = "cleanup_balipuspanews";
}

/// Run a mutation against a freshly parsed copy of `content`.
///
/// `mutate` reports whether it changed the tree. The body is re-serialized
/// only when it did, so untouched documents keep their original formatting.
/// Any parse or serialization error yields `content` unchanged, as does a
/// mutation that would leave non-empty content empty. The document is
/// dropped before this function returns on every path.
pub(crate) fn rewrite_document<F>(name: &str, content: &str, mutate: F) -> String
where
    F: FnOnce(&Document) -> Result<bool>,
{
    match try_rewrite_document(content, mutate) {
        Ok(Some(output)) if output.trim().is_empty() => {
            debug!("{name}: rewrite emptied the document, keeping original content");
            content.to_string()
        }
        Ok(Some(output)) => output,
        Ok(None) => content.to_string(),
        Err(err) => {
            debug!("{name}: keeping original content ({err})");
            content.to_string()
        }
    }
}

fn try_rewrite_document<F>(content: &str, mutate: F) -> Result<Option<String>>
where
    F: FnOnce(&Document) -> Result<bool>,
{
    let doc = dom::parse(content)?;
    if !mutate(&doc)? {
        return Ok(None);
    }
    dom::serialize_body(&doc).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn unchanged_document_is_not_reserialized() {
        let content = "<P>Upper-case markup stays as written";
        assert_eq!(rewrite_document("noop", content, |_| Ok(false)), content);
    }

    #[test]
    fn changed_document_is_serialized() {
        let output = rewrite_document("strip", "<p>keep</p><b>drop</b>", |doc| {
            dom::remove(&doc.select("b"));
            Ok(true)
        });
        assert_eq!(output, "<p>keep</p>");
    }

    #[test]
    fn mutation_error_keeps_original() {
        let content = "<p>body</p>";
        let output = rewrite_document("failing", content, |_| {
            Err(Error::SerializationFailure("boom".to_string()))
        });
        assert_eq!(output, content);
    }

    #[test]
    fn emptied_document_keeps_original() {
        let content = "<b>only</b>";
        let output = rewrite_document("strip", content, |doc| {
            dom::remove(&doc.select("b"));
            Ok(true)
        });
        assert_eq!(output, content);
    }

    #[test]
    fn empty_content_is_returned_as_is() {
        assert_eq!(rewrite_document("any", "", |_| Ok(true)), "");
    }
}
