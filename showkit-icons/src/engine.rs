//! The icon cache & injection engine.

use std::sync::Arc;

use futures::future::join_all;
use showkit_core::page::vocab;
use showkit_core::{NodeId, Page, SharedPage};

use crate::cache::IconCache;
use crate::catalog::IconCatalog;
use crate::normalize::normalize_colors;
use crate::transport::AssetTransport;

/// Fetches every catalog asset once, caches the markup, and injects it into
/// all matching page targets.
///
/// Asset failures never abort startup: each identifier falls back to the
/// fallback asset and ultimately to an empty cached value. The worst case is
/// an empty rendered icon.
pub struct IconEngine {
    catalog: IconCatalog,
    cache: IconCache,
    transport: Arc<dyn AssetTransport>,
}

impl IconEngine {
    /// Create an engine over a catalog and transport.
    pub fn new(catalog: IconCatalog, transport: Arc<dyn AssetTransport>) -> Self {
        Self {
            catalog,
            cache: IconCache::new(),
            transport,
        }
    }

    /// The engine's catalog.
    pub fn catalog(&self) -> &IconCatalog {
        &self.catalog
    }

    /// The engine's cache.
    pub fn cache(&self) -> &IconCache {
        &self.cache
    }

    /// Fetch every catalog asset concurrently and populate the cache.
    ///
    /// Completes only once every attempt has settled; individual failures
    /// are recovered via the fallback chain and never delay or fail the
    /// others.
    pub async fn preload_all(&self) {
        let fetches = self
            .catalog
            .identifiers()
            .map(|identifier| self.fetch_with_fallback(identifier.to_string()));

        for (identifier, markup) in join_all(fetches).await {
            self.cache.put(identifier, markup);
        }
        log::debug!("preloaded {} icon assets", self.cache.len());
    }

    async fn fetch_with_fallback(&self, identifier: String) -> (String, String) {
        let path = self.catalog.resolve(&identifier);
        match self.transport.fetch(&path).await {
            Ok(markup) => (identifier, markup),
            Err(error) => {
                log::warn!("failed to load icon '{}': {}", identifier, error);
                let fallback_path = self.catalog.fallback_path();
                if fallback_path == path {
                    return (identifier, String::new());
                }
                match self.transport.fetch(&fallback_path).await {
                    Ok(markup) => (identifier, markup),
                    Err(fallback_error) => {
                        log::warn!(
                            "fallback asset also failed for icon '{}': {}",
                            identifier,
                            fallback_error
                        );
                        (identifier, String::new())
                    },
                }
            },
        }
    }

    /// Inject cached markup into every matching page target.
    ///
    /// The catalog's excluded identifier is handled entirely by static
    /// styling and skipped, as is any target sitting in a toggle button's
    /// unpressed-icon slot while the button is visually pressed.
    pub fn inject_all(&self, page: &mut dyn Page) {
        for entry in self.catalog.entries() {
            if self.catalog.excluded() == Some(entry.identifier.as_str()) {
                continue;
            }

            let targets = page.query_selector_all(&entry.target);
            if targets.is_empty() {
                log::info!("no page targets for icon '{}'", entry.identifier);
                continue;
            }

            let markup = self.cache.get(&entry.identifier).unwrap_or_default();
            let normalized = normalize_colors(&markup);
            for node in targets {
                if in_pressed_toggle_unpressed_slot(page, node) {
                    continue;
                }
                page.set_inner_markup(node, &normalized);
            }
        }
    }

    /// Preload every asset, then inject. The orchestrator's sole entry
    /// point into this engine.
    pub async fn load_and_inject(&self, page: &SharedPage) {
        self.preload_all().await;
        let mut page = page.lock().unwrap();
        self.inject_all(&mut *page);
    }
}

/// Whether `node` is the unpressed-icon slot of a toggle button that is
/// currently in its pressed visual state. Styling owns that slot's content
/// while pressed, so injection must not overwrite it.
///
/// Keyed on the toggle class, which the markup carries from the start;
/// injection runs before any toggle attributes are written.
fn in_pressed_toggle_unpressed_slot(page: &dyn Page, node: NodeId) -> bool {
    let Some(button) = page.closest_with_class(node, vocab::BUTTON) else {
        return false;
    };
    let is_pressed_toggle =
        page.has_class(button, vocab::TOGGLE) && page.has_class(button, vocab::PRESSED);
    is_pressed_toggle && page.closest_with_class(node, vocab::PRESSED_ICON).is_none()
}
