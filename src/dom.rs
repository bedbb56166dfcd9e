//! DOM Operations Adapter
//!
//! Thin layer over the `dom_query` crate giving transforms a small, uniform
//! vocabulary: parse, query, read/write attributes, replace/remove, and
//! serialize the body back to an HTML fragment.
//!
//! `dom_query` keeps every node in an arena owned by the `Document` and links
//! parents and children by index, so a tree is torn down by dropping its
//! `Document`. Each transform parses its own `Document` and drops it before
//! returning.

use std::panic::{self, AssertUnwindSafe};

use crate::error::{Error, Result};

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

/// Elements whose removal would take the whole document body with them.
const STRUCTURAL_TAGS: &[&str] = &["html", "head", "body"];

// === Parsing / Serialization ===

/// Parse an HTML fragment into a document.
///
/// The fragment is parsed in body context, so leading elements that the
/// HTML parser would otherwise hoist into `<head>` (such as `<noscript>`)
/// stay in the body where the transforms look for them.
///
/// # Errors
///
/// Returns [`Error::ParseFailure`] for blank input or if the parser aborts.
pub fn parse(html: &str) -> Result<Document> {
    if html.trim().is_empty() {
        return Err(Error::ParseFailure("empty document".to_string()));
    }

    let wrapped = format!("<html><head></head><body>{html}</body></html>");
    panic::catch_unwind(AssertUnwindSafe(|| Document::from(wrapped.as_str())))
        .map_err(|_| Error::ParseFailure("parser aborted".to_string()))
}

/// Serialize the children of `<body>` back to an HTML string.
///
/// # Errors
///
/// Returns [`Error::SerializationFailure`] when the document has no body.
pub fn serialize_body(doc: &Document) -> Result<String> {
    let body = doc.select("body").first();
    if body.is_empty() {
        return Err(Error::SerializationFailure("document has no <body>".to_string()));
    }
    Ok(body.inner_html().to_string())
}

// === Querying ===

/// Query all elements matching a CSS selector, one selection per element,
/// in document order.
///
/// An invalid selector yields an empty list rather than an error; use
/// [`validate_selector`] to reject bad selectors up front.
#[must_use]
pub fn query_all<'a>(doc: &'a Document, selector: &str) -> Vec<Selection<'a>> {
    doc.try_select(selector)
        .map(|sel| sel.nodes().iter().map(|node| Selection::from(*node)).collect())
        .unwrap_or_default()
}

/// Check that a CSS selector compiles.
///
/// # Errors
///
/// Returns [`Error::InvalidSelector`] when it does not.
pub fn validate_selector(selector: &str) -> Result<()> {
    dom_query::Matcher::new(selector)
        .map(|_| ())
        .map_err(|_| Error::InvalidSelector(selector.to_string()))
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Set an attribute value
#[inline]
pub fn set_attribute(sel: &Selection, name: &str, value: &str) {
    sel.set_attr(name, value);
}

/// Check if the element carries a class (exact token match)
#[inline]
#[must_use]
pub fn has_class(sel: &Selection, class: &str) -> bool {
    sel.has_class(class)
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

/// Whether the element is `html`, `head` or `body`.
#[must_use]
pub fn is_structural(sel: &Selection) -> bool {
    tag_name(sel).is_some_and(|t| STRUCTURAL_TAGS.contains(&t.as_str()))
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Serialized markup of the element's children.
///
/// `noscript` content is parsed as markup, so its fallback `<img>` is only
/// visible here and not through [`text_content`].
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

/// Direct text-node children of the element, in document order.
#[must_use]
pub fn text_children<'a>(sel: &Selection<'a>) -> Vec<NodeRef<'a>> {
    let mut texts = Vec::new();
    if let Some(node) = sel.nodes().first() {
        let mut child = node.first_child();
        while let Some(c) = child {
            if c.is_text() {
                texts.push(c);
            }
            child = c.next_sibling();
        }
    }
    texts
}

// === Tree Navigation ===

/// Get parent element
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}

/// Whether the element or any of its ancestors is one of `tags`.
#[must_use]
pub fn within_any(sel: &Selection, tags: &[&str]) -> bool {
    let mut current = sel.nodes().first().copied();
    while let Some(node) = current {
        if node
            .node_name()
            .is_some_and(|name| tags.contains(&&*name))
        {
            return true;
        }
        current = node.parent();
    }
    false
}

/// Get every following element sibling (skipping text nodes), in document order.
#[must_use]
pub fn following_element_siblings<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    let mut siblings = Vec::new();
    if let Some(node) = sel.nodes().first() {
        let mut sibling = node.next_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                siblings.push(Selection::from(s));
            }
            sibling = s.next_sibling();
        }
    }
    siblings
}

// === Tree Manipulation ===

/// Remove elements from tree
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Replace element with HTML
#[inline]
pub fn replace_with_html(sel: &Selection, html: &str) {
    sel.replace_with_html(html);
}

/// Replace a single node (element or text) with HTML.
#[inline]
pub fn replace_node_with_html(node: &NodeRef, html: &str) {
    Selection::from(*node).replace_with_html(html);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_blank_input() {
        assert!(matches!(parse(""), Err(Error::ParseFailure(_))));
        assert!(matches!(parse("  \n\t"), Err(Error::ParseFailure(_))));
    }

    #[test]
    fn test_parse_and_serialize_fragment() {
        let doc = parse(r#"<p class="a">one</p><p>two</p>"#).unwrap();
        assert_eq!(serialize_body(&doc).unwrap(), r#"<p class="a">one</p><p>two</p>"#);
    }

    #[test]
    fn test_leading_noscript_stays_in_body() {
        let doc = parse(r#"<noscript><img src="a.jpg"></noscript>"#).unwrap();
        let noscripts = query_all(&doc, "body noscript");
        assert_eq!(noscripts.len(), 1);
        assert_eq!(&*inner_html(&noscripts[0]), r#"<img src="a.jpg">"#);
    }

    #[test]
    fn test_text_children_skip_elements() {
        let doc = parse("<p>one <b>bold</b> two</p>").unwrap();
        let p = doc.select("p");
        let texts: Vec<String> = text_children(&p).iter().map(|t| t.text().to_string()).collect();
        assert_eq!(texts, vec!["one ", " two"]);
    }

    #[test]
    fn test_within_any_checks_ancestors() {
        let doc = parse(r#"<a href="/x"><span>in</span></a><span id="out">out</span>"#).unwrap();
        assert!(within_any(&doc.select("a span"), &["a"]));
        assert!(!within_any(&doc.select("#out"), &["a"]));
    }

    #[test]
    fn test_query_all_in_document_order() {
        let doc = parse(r#"<div id="a"><img id="b"></div><img id="c">"#).unwrap();
        let ids: Vec<_> = query_all(&doc, "img, div")
            .iter()
            .filter_map(|s| get_attribute(s, "id"))
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_query_all_invalid_selector_is_empty() {
        let doc = parse("<p>text</p>").unwrap();
        assert!(query_all(&doc, "p[").is_empty());
        assert!(validate_selector("p[").is_err());
        assert!(validate_selector(".td-all-devices").is_ok());
    }

    #[test]
    fn test_attribute_modification() {
        let doc = parse(r#"<img data-src="/x.jpg">"#).unwrap();
        let img = doc.select("img");

        assert_eq!(get_attribute(&img, "src"), None);
        set_attribute(&img, "src", "/x.jpg");
        assert_eq!(get_attribute(&img, "src"), Some("/x.jpg".to_string()));
    }

    #[test]
    fn test_following_element_siblings_skip_text() {
        let doc = parse("<h3>Marker</h3> text <p>1</p><p>2</p>").unwrap();
        let h3 = doc.select("h3");
        let siblings = following_element_siblings(&h3);
        assert_eq!(siblings.len(), 2);
        assert_eq!(tag_name(&siblings[0]), Some("p".to_string()));
    }

    #[test]
    fn test_structural_tags() {
        let doc = parse("<span>x</span>").unwrap();
        let span = doc.select("span");
        assert!(!is_structural(&span));
        assert!(is_structural(&parent(&span)));
    }

    #[test]
    fn test_replace_text_node() {
        let doc = parse("<p>plain</p>").unwrap();
        let texts = text_children(&doc.select("p"));
        replace_node_with_html(&texts[0], "<em>marked</em>");
        assert_eq!(serialize_body(&doc).unwrap(), "<p><em>marked</em></p>");
    }

    #[test]
    fn test_replace_and_remove() {
        let doc = parse(r#"<div><span id="old">old</span><b>gone</b></div>"#).unwrap();
        replace_with_html(&doc.select("#old"), r#"<strong id="new">new</strong>"#);
        remove(&doc.select("b"));

        assert_eq!(
            serialize_body(&doc).unwrap(),
            r#"<div><strong id="new">new</strong></div>"#
        );
        assert_eq!(&*text_content(&doc.select("#new")), "new");
    }
}
