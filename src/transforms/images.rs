//! Image transforms
//!
//! - `add_dynamic_image`: resolve lazy-loaded images to a single `src`,
//!   falling back to `<noscript>` markup when no candidate attribute exists
//! - `add_image_title`: turn `img[title]` into a captioned `<figure>`
//! - `hide_first_image`: swap the lead image for an enclosure placeholder

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::dom::{self, Document, Selection};
use crate::error::{Error, Result};
use crate::patterns::{CANDIDATE_ATTRS, INLINE_IMG};
use crate::transforms::{ids, rewrite_document};

/// Rewrite lazy-loaded images so that each carries its real source in `src`.
///
/// Every `img` and `div` is checked, in document order, against
/// [`CANDIDATE_ATTRS`]; the first attribute present on the element wins.
/// An `img` gets its `src` overwritten; a `div` is replaced by a new `img`
/// built from the value and the div's `alt`. Only when no element was
/// touched are `<noscript>` fallbacks consulted.
#[must_use]
pub fn add_dynamic_image(_entry_url: &str, content: &str) -> String {
    rewrite_document(ids::ADD_DYNAMIC_IMAGE, content, |doc| {
        if resolve_candidate_sources(doc) > 0 {
            return Ok(true);
        }
        Ok(recover_noscript_images(doc) > 0)
    })
}

/// First candidate attribute present on the element, in priority order.
fn candidate_source(sel: &Selection) -> Option<String> {
    CANDIDATE_ATTRS
        .iter()
        .find_map(|attr| dom::get_attribute(sel, attr))
}

/// Apply candidate attributes to `img`/`div` elements. Returns how many
/// elements were rewritten.
fn resolve_candidate_sources(doc: &Document) -> usize {
    let mut rewritten = 0;

    for element in dom::query_all(doc, "img, div") {
        let Some(src) = candidate_source(&element) else {
            continue;
        };
        rewritten += 1;

        if dom::tag_name(&element).as_deref() == Some("img") {
            dom::set_attribute(&element, "src", &src);
        } else {
            let alt = dom::get_attribute(&element, "alt").unwrap_or_default();
            dom::replace_with_html(&element, &image_markup(&src, &alt));
        }
    }

    rewritten
}

fn image_markup(src: &str, alt: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}"/>"#,
        encode_double_quoted_attribute(src),
        encode_double_quoted_attribute(alt)
    )
}

/// Replace each `<noscript>` that holds exactly one inline `<img>` with that
/// markup. Returns how many were replaced.
fn recover_noscript_images(doc: &Document) -> usize {
    let mut recovered = 0;

    for noscript in dom::query_all(doc, "noscript") {
        let markup = dom::inner_html(&noscript);
        if let Ok(img) = single_inline_image(&markup) {
            dom::replace_with_html(&noscript, img);
            recovered += 1;
        }
    }

    recovered
}

/// The one inline `<img>` tag in `markup`.
///
/// # Errors
///
/// [`Error::AmbiguousRecovery`] when there are none, or more than one.
fn single_inline_image(markup: &str) -> Result<&str> {
    let matches: Vec<&str> = INLINE_IMG.find_iter(markup).take(2).map(|m| m.as_str()).collect();
    match matches.as_slice() {
        [img] => Ok(*img),
        other => Err(Error::AmbiguousRecovery(other.len())),
    }
}

/// Wrap every `img` carrying both `src` and `title` in a `<figure>` whose
/// caption is the title text.
#[must_use]
pub fn add_image_title(_entry_url: &str, content: &str) -> String {
    rewrite_document(ids::ADD_IMAGE_TITLE, content, |doc| {
        let images = dom::query_all(doc, "img[src][title]");
        for img in &images {
            let src = dom::get_attribute(img, "src").unwrap_or_default();
            let alt = dom::get_attribute(img, "alt").unwrap_or_default();
            let title = dom::get_attribute(img, "title").unwrap_or_default();

            let figure = format!(
                "<figure>{}<figcaption><p>{}</p></figcaption></figure>",
                image_markup(&src, &alt),
                encode_text(&title)
            );
            dom::replace_with_html(img, &figure);
        }
        Ok(!images.is_empty())
    })
}

/// Replace the first image with `<span data-miniflux-enclosure="SRC">`, so
/// the reader can present it as the entry's enclosure instead of inline.
#[must_use]
pub fn hide_first_image(_entry_url: &str, content: &str) -> String {
    rewrite_document(ids::HIDE_FIRST_IMAGE, content, |doc| {
        let Some(img) = dom::query_all(doc, "img").into_iter().next() else {
            return Ok(false);
        };
        let src = dom::get_attribute(&img, "src").unwrap_or_default();
        dom::replace_with_html(
            &img,
            &format!(
                r#"<span data-miniflux-enclosure="{}"></span>"#,
                encode_double_quoted_attribute(&src)
            ),
        );
        Ok(true)
    })
}
