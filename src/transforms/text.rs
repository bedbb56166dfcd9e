//! Text transforms.
//!
//! [`replace_text_links`] and [`replace_line_feeds`] work on raw strings and
//! suit plain-text segments such as a video description. The
//! [`convert_text_link`] transform parses the entry and only linkifies text
//! nodes, so anchors, attribute values and scripts are never rewritten.

use std::borrow::Cow;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::dom::{self, Document};
use crate::patterns::TEXT_LINK;
use crate::transforms::{ids, rewrite_document};

/// Text under these elements is never linkified.
const UNLINKABLE_TAGS: &[&str] = &["a", "script", "style", "textarea", "title"];

/// Wrap every bare `http(s)` URL in an anchor pointing at itself.
#[must_use]
pub fn replace_text_links(input: &str) -> Cow<'_, str> {
    TEXT_LINK.replace_all(input, r#"<a href="${1}">${1}</a>"#)
}

/// Replace every line feed with `<br>`.
#[must_use]
pub fn replace_line_feeds(input: &str) -> String {
    input.replace('\n', "<br>")
}

/// Linkify bare URLs found in the entry's text.
///
/// Only text nodes outside anchors (and outside script, style and similar
/// raw-text elements) are touched; URLs in attributes stay as they are.
#[must_use]
pub fn convert_text_link(_entry_url: &str, content: &str) -> String {
    rewrite_document(ids::CONVERT_TEXT_LINK, content, |doc| {
        Ok(linkify_text_nodes(doc) > 0)
    })
}

/// Replace each text node holding a URL with escaped, linkified markup.
/// Returns how many text nodes were replaced.
fn linkify_text_nodes(doc: &Document) -> usize {
    let mut targets = Vec::new();
    for element in dom::query_all(doc, "body, body *") {
        if dom::within_any(&element, UNLINKABLE_TAGS) {
            continue;
        }
        targets.extend(
            dom::text_children(&element)
                .into_iter()
                .filter(|node| TEXT_LINK.is_match(&node.text())),
        );
    }

    for node in &targets {
        let text = node.text();
        dom::replace_node_with_html(node, &linkified_markup(&text));
    }

    targets.len()
}

/// Escaped markup for `text` with every URL wrapped in an anchor.
fn linkified_markup(text: &str) -> String {
    let mut markup = String::with_capacity(text.len() * 2);
    let mut last = 0;

    for link in TEXT_LINK.find_iter(text) {
        markup.push_str(&encode_text(&text[last..link.start()]));
        markup.push_str(&format!(
            r#"<a href="{}">{}</a>"#,
            encode_double_quoted_attribute(link.as_str()),
            encode_text(link.as_str())
        ));
        last = link.end();
    }
    markup.push_str(&encode_text(&text[last..]));

    markup
}

/// Transform form of [`replace_line_feeds`].
#[must_use]
pub fn nl2br(_entry_url: &str, content: &str) -> String {
    replace_line_feeds(content)
}
