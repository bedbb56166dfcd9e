//! Transform Registry
//!
//! Maps transform identifiers to implementations and applies an ordered
//! identifier list to one entry. The table is filled once at startup and only
//! read afterwards, so a single registry can serve any number of threads.

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::transforms::{self, ids, SiteCleanup};

/// A content transform: `(entry_url, content) -> content`.
///
/// Implementations must be total (return the input unchanged when they have
/// nothing to do or cannot parse it) and must not keep state between calls.
pub trait Transform: Send + Sync {
    fn apply(&self, entry_url: &str, content: &str) -> String;
}

impl<F> Transform for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn apply(&self, entry_url: &str, content: &str) -> String {
        self(entry_url, content)
    }
}

impl Transform for SiteCleanup {
    fn apply(&self, _entry_url: &str, content: &str) -> String {
        SiteCleanup::apply(self, content)
    }
}

/// Identifier → transform table plus the per-entry application loop.
#[derive(Default)]
pub struct Registry {
    transforms: HashMap<String, Box<dyn Transform>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("transforms", &self.ids()).finish()
    }
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in transform.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ids::ADD_IMAGE_TITLE, transforms::add_image_title);
        registry.register(ids::ADD_DYNAMIC_IMAGE, transforms::add_dynamic_image);
        registry.register(ids::ADD_YOUTUBE_VIDEO, transforms::add_youtube_video);
        registry.register(ids::ADD_PDF_DOWNLOAD_LINK, transforms::add_pdf_download_link);
        registry.register(ids::CONVERT_TEXT_LINK, transforms::convert_text_link);
        registry.register(ids::NL2BR, transforms::nl2br);
        registry.register(ids::HIDE_FIRST_IMAGE, transforms::hide_first_image);
        for site in SiteCleanup::builtin() {
            let name = site.name().to_string();
            registry.register(name, site);
        }
        registry
    }

    /// Register `transform` under `id`, replacing any previous entry.
    pub fn register<T>(&mut self, id: impl Into<String>, transform: T)
    where
        T: Transform + 'static,
    {
        self.transforms.insert(id.into(), Box::new(transform));
    }

    /// Whether `id` names a registered transform.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.transforms.contains_key(id)
    }

    /// Look up a transform by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Transform> {
        self.transforms.get(id).map(|t| t.as_ref())
    }

    /// Look up a transform, failing for an unregistered identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTransform`] when `id` is not registered.
    pub fn try_get(&self, id: &str) -> Result<&dyn Transform> {
        self.get(id).ok_or_else(|| Error::UnknownTransform(id.to_string()))
    }

    /// Registered identifiers, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.transforms.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Apply `transform_ids` to `content` in order.
    ///
    /// Each transform receives the previous transform's output and the
    /// original `entry_url`. Unknown identifiers are skipped with a warning.
    /// A transform that panics is treated as a no-op for that step. The list
    /// is used as given: no deduplication or reordering.
    #[must_use]
    pub fn apply<S: AsRef<str>>(&self, entry_url: &str, content: &str, transform_ids: &[S]) -> String {
        let mut current = content.to_string();

        for id in transform_ids {
            let id = id.as_ref();
            let transform = match self.try_get(id) {
                Ok(transform) => transform,
                Err(err) => {
                    warn!("rewrite: {err} for {entry_url}, skipping");
                    continue;
                }
            };

            trace!("rewrite: applying {id} to {entry_url}");
            match panic::catch_unwind(AssertUnwindSafe(|| transform.apply(entry_url, &current))) {
                Ok(output) => current = output,
                Err(_) => debug!("rewrite: transform {id} panicked on {entry_url}, keeping content"),
            }
        }

        current
    }
}

static BUILTIN_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::builtin);

/// Process-wide registry of the built-in transforms.
#[must_use]
pub fn builtin_registry() -> &'static Registry {
    &BUILTIN_REGISTRY
}
