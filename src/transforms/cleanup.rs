//! Site Cleanup Rules
//!
//! Publisher boilerplate ("baca juga" cross-link promos, related-post lists,
//! ad containers) is described as data rather than code: a [`CleanupRule`]
//! pairs a CSS selector with a [`Predicate`] and says what to remove when
//! the predicate holds. A [`SiteCleanup`] is an ordered list of rules run by
//! one generic engine.

use crate::dom::{self, Document, Selection};
use crate::error::Result;
use crate::patterns::WHITESPACE_NORMALIZE;
use crate::transforms::{ids, rewrite_document};

/// Test applied to every element matched by a rule's selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Every matched element.
    Always,
    /// Element carries this class.
    HasClass(String),
    /// Lowercased, whitespace-collapsed text contains this phrase.
    /// The phrase is expected in lowercase.
    TextContains(String),
    /// Text content equals this marker exactly.
    TextEquals(String),
}

impl Predicate {
    /// Whether `sel` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, sel: &Selection) -> bool {
        match self {
            Self::Always => true,
            Self::HasClass(class) => dom::has_class(sel, class),
            Self::TextContains(phrase) => normalized_text(sel).contains(phrase.as_str()),
            Self::TextEquals(marker) => &*dom::text_content(sel) == marker.as_str(),
        }
    }
}

/// What to remove once a predicate matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalTarget {
    /// The matched element.
    Itself,
    /// The matched element's parent. Falls back to the element itself when
    /// the parent is `body` (or missing), so a rule never empties the document.
    Parent,
    /// The matched element and every element sibling after it. Only the
    /// first match in a document triggers.
    WithFollowingSiblings,
}

/// One declarative removal rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupRule {
    selector: String,
    predicate: Predicate,
    target: RemovalTarget,
}

impl CleanupRule {
    /// Build a rule, checking that `selector` compiles.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidSelector`] for a bad selector.
    pub fn new(selector: &str, predicate: Predicate, target: RemovalTarget) -> Result<Self> {
        dom::validate_selector(selector)?;
        Ok(Self::unchecked(selector, predicate, target))
    }

    fn unchecked(selector: &str, predicate: Predicate, target: RemovalTarget) -> Self {
        Self {
            selector: selector.to_string(),
            predicate,
            target,
        }
    }

    /// Rule that removes every element matching `selector`.
    #[must_use]
    fn remove_all(selector: &str) -> Self {
        Self::unchecked(selector, Predicate::Always, RemovalTarget::Itself)
    }

    /// The promotional-block pair: elements carrying `class` are removed
    /// themselves; elements whose text mentions `phrase` take their parent
    /// wrapper (which holds the promo links) with them.
    fn promotional(selector: &str, class: &str, phrase: &str) -> [Self; 2] {
        [
            Self::unchecked(selector, Predicate::HasClass(class.to_string()), RemovalTarget::Itself),
            Self::unchecked(
                selector,
                Predicate::TextContains(phrase.to_lowercase()),
                RemovalTarget::Parent,
            ),
        ]
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Apply the rule to a document. Returns how many matches led to a removal.
    pub fn apply(&self, doc: &Document) -> usize {
        let mut removed = 0;

        for element in dom::query_all(doc, &self.selector) {
            if !self.predicate.matches(&element) {
                continue;
            }
            removed += 1;

            match self.target {
                RemovalTarget::Itself => dom::remove(&element),
                RemovalTarget::Parent => {
                    let parent = dom::parent(&element);
                    if parent.is_empty() || dom::is_structural(&parent) {
                        dom::remove(&element);
                    } else {
                        dom::remove(&parent);
                    }
                }
                RemovalTarget::WithFollowingSiblings => {
                    for sibling in dom::following_element_siblings(&element) {
                        dom::remove(&sibling);
                    }
                    dom::remove(&element);
                    break;
                }
            }
        }

        removed
    }
}

/// Lowercase text with whitespace runs collapsed to single spaces.
fn normalized_text(sel: &Selection) -> String {
    let text = dom::text_content(sel).to_lowercase();
    WHITESPACE_NORMALIZE.replace_all(text.trim(), " ").into_owned()
}

/// A named, ordered set of cleanup rules for one publisher.
#[derive(Debug, Clone)]
pub struct SiteCleanup {
    name: String,
    rules: Vec<CleanupRule>,
}

impl SiteCleanup {
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<CleanupRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rules(&self) -> &[CleanupRule] {
        &self.rules
    }

    /// Run every rule in order; re-serialize only if something was removed.
    #[must_use]
    pub fn apply(&self, content: &str) -> String {
        rewrite_document(&self.name, content, |doc| {
            let removed: usize = self.rules.iter().map(|rule| rule.apply(doc)).sum();
            Ok(removed > 0)
        })
    }

    /// Bali Post: "Baca Juga" cross-link spans.
    #[must_use]
    pub fn balipost() -> Self {
        Self::new(
            ids::CLEANUP_BALIPOST,
            CleanupRule::promotional("span", "IRRP_kangoo", "baca juga").to_vec(),
        )
    }

    /// Metro Bali: "Baca Juga" anchors, the trailing "Related Posts" section,
    /// and inline ad links.
    #[must_use]
    pub fn metrobali() -> Self {
        let mut rules = CleanupRule::promotional("a", "IRRP_kangoo", "baca juga").to_vec();
        rules.push(CleanupRule::unchecked(
            "h3",
            Predicate::TextEquals("Related Posts".to_string()),
            RemovalTarget::WithFollowingSiblings,
        ));
        rules.push(CleanupRule::remove_all(".advertising_content_single"));
        Self::new(ids::CLEANUP_METROBALI, rules)
    }

    /// Bali Puspa News: all-device ad slots.
    #[must_use]
    pub fn balipuspanews() -> Self {
        Self::new(
            ids::CLEANUP_BALIPUSPANEWS,
            vec![CleanupRule::remove_all(".td-all-devices")],
        )
    }

    /// All built-in publisher cleanups.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![Self::balipost(), Self::metrobali(), Self::balipuspanews()]
    }
}
