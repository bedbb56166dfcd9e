//! Rule Bindings
//!
//! Decides which transforms apply to an entry: each [`RuleBinding`] ties a
//! domain to an ordered list of transform identifiers, and [`RuleSet`]
//! resolves an entry URL to the list of the first binding whose domain
//! matches the URL's host.
//!
//! Rule lists are written the way feed owners configure them: a
//! comma-separated string such as `"add_dynamic_image,cleanup_balipost"`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::transforms::ids;

/// One domain → transform list binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBinding {
    /// Registrable domain, e.g. `youtube.com`. Subdomains match too.
    pub domain: String,
    /// Transform identifiers in application order.
    pub rules: Vec<String>,
}

impl RuleBinding {
    /// Build a binding from a comma-separated rule string.
    #[must_use]
    pub fn new(domain: impl Into<String>, rules: &str) -> Self {
        Self {
            domain: domain.into(),
            rules: parse_rules(rules),
        }
    }

    /// Whether `host` is the bound domain or one of its subdomains.
    #[must_use]
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        let domain = self.domain.to_ascii_lowercase();
        host == domain
            || host
                .strip_suffix(domain.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    }
}

/// Ordered collection of rule bindings; the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    bindings: Vec<RuleBinding>,
}

impl RuleSet {
    #[must_use]
    pub fn new(bindings: Vec<RuleBinding>) -> Self {
        Self { bindings }
    }

    /// Load bindings from a JSON array of `{"domain": ..., "rules": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRules`] when the JSON does not match.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the bindings back to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRules`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append a binding. Earlier bindings keep precedence.
    pub fn push(&mut self, binding: RuleBinding) {
        self.bindings.push(binding);
    }

    #[must_use]
    pub fn bindings(&self) -> &[RuleBinding] {
        &self.bindings
    }

    /// The transform identifiers bound to the host of `entry_url`.
    ///
    /// Returns an empty list when the URL does not parse, has no host, or no
    /// binding matches.
    #[must_use]
    pub fn resolve_transforms(&self, entry_url: &str) -> Vec<String> {
        let Ok(url) = Url::parse(entry_url) else {
            return Vec::new();
        };
        let Some(host) = url.host_str() else {
            return Vec::new();
        };

        self.bindings
            .iter()
            .find(|binding| binding.matches_host(host))
            .map(|binding| binding.rules.clone())
            .unwrap_or_default()
    }

    /// Bindings shipped with the crate.
    #[must_use]
    pub fn predefined() -> Self {
        const IMAGE_TITLE_SITES: &[&str] = &[
            "abstrusegoose.com",
            "amazingsuperpowers.com",
            "cowbirdsinlove.com",
            "drawingboardcomic.com",
            "exocomics.com",
            "happletea.com",
            "imogenquest.net",
            "lukesurl.com",
            "mercworks.net",
            "mrlovenstein.com",
            "nedroid.com",
            "oglaf.com",
            "optipess.com",
            "peebleslab.com",
            "sentfromthemoon.com",
            "thedoghousediaries.com",
            "treelobsters.com",
            "xkcd.com",
        ];

        let mut bindings: Vec<RuleBinding> = IMAGE_TITLE_SITES
            .iter()
            .map(|domain| RuleBinding::new(*domain, ids::ADD_IMAGE_TITLE))
            .collect();

        bindings.push(RuleBinding::new("youtube.com", ids::ADD_YOUTUBE_VIDEO));
        bindings.push(RuleBinding {
            domain: "balipost.com".to_string(),
            rules: to_rules(&[ids::ADD_DYNAMIC_IMAGE, ids::HIDE_FIRST_IMAGE, ids::CLEANUP_BALIPOST]),
        });
        bindings.push(RuleBinding {
            domain: "metrobali.com".to_string(),
            rules: to_rules(&[ids::ADD_DYNAMIC_IMAGE, ids::HIDE_FIRST_IMAGE, ids::CLEANUP_METROBALI]),
        });
        bindings.push(RuleBinding {
            domain: "balipuspanews.com".to_string(),
            rules: to_rules(&[
                ids::ADD_DYNAMIC_IMAGE,
                ids::HIDE_FIRST_IMAGE,
                ids::CLEANUP_BALIPUSPANEWS,
            ]),
        });

        Self::new(bindings)
    }
}

fn to_rules(rules: &[&str]) -> Vec<String> {
    rules.iter().map(ToString::to_string).collect()
}

/// Split a comma-separated rule string into identifiers.
///
/// Whitespace around items is trimmed and empty items are dropped; order and
/// duplicates are preserved.
#[must_use]
pub fn parse_rules(rules: &str) -> Vec<String> {
    rules
        .split(',')
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .map(ToString::to_string)
        .collect()
}
