//! Configuration options for entry rewriting.
//!
//! The `Options` struct decides where an entry's transform list comes from:
//! a feed-level custom rule string, or the predefined per-domain bindings.

use crate::rules::{parse_rules, RuleSet};

/// Configuration options for [`crate::rewrite_entry`].
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use entry_rewrite::Options;
///
/// // Predefined per-domain rules only
/// let options = Options::default();
///
/// // Feed-level override
/// let options = Options {
///     custom_rules: Some("add_dynamic_image,nl2br".to_string()),
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Comma-separated transform identifiers configured for the feed.
    ///
    /// When set and non-empty, replaces the domain-based lookup entirely.
    ///
    /// Default: `None`
    pub custom_rules: Option<String>,

    /// Fall back to `rule_set` when no custom rules are configured.
    ///
    /// Default: `true`
    pub use_predefined_rules: bool,

    /// Domain → transform bindings consulted for predefined rules.
    ///
    /// Default: [`RuleSet::predefined`]
    pub rule_set: RuleSet,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            custom_rules: None,
            use_predefined_rules: true,
            rule_set: RuleSet::predefined(),
        }
    }
}

impl Options {
    /// The transform identifiers to apply to an entry at `entry_url`.
    #[must_use]
    pub fn transforms_for(&self, entry_url: &str) -> Vec<String> {
        if let Some(custom) = self.custom_rules.as_deref() {
            let rules = parse_rules(custom);
            if !rules.is_empty() {
                return rules;
            }
        }

        if self.use_predefined_rules {
            self.rule_set.resolve_transforms(entry_url)
        } else {
            Vec::new()
        }
    }
}
