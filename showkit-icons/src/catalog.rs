//! Static icon catalog: identifier → asset filename, plus the fallback
//! identifier and path-prefix convention.

use indexmap::IndexMap;
use serde::Deserialize;
use showkit_core::Selector;
use std::path::Path;

use crate::error::IconError;

/// One catalog entry resolved into the form the engine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconEntry {
    /// Stable identifier naming the asset.
    pub identifier: String,
    /// Resolved asset path (prefix + filename).
    pub asset_path: String,
    /// Query selecting the page nodes this icon is injected into.
    pub target: Selector,
}

/// Static mapping from icon identifier to asset filename.
///
/// Built once; immutable for the process lifetime.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IconCatalog {
    /// Identifier whose asset substitutes for any failed fetch.
    fallback: String,
    /// Identifier rendered entirely by static styling; never injected.
    #[serde(default)]
    excluded: Option<String>,
    /// Prefix prepended to every filename when resolving a path.
    #[serde(default = "default_path_prefix")]
    path_prefix: String,
    /// Identifier → asset filename.
    icons: IndexMap<String, String>,
}

fn default_path_prefix() -> String {
    "icons/".to_string()
}

impl IconCatalog {
    /// Create a catalog from parts.
    pub fn new(
        icons: IndexMap<String, String>,
        fallback: impl Into<String>,
        excluded: Option<String>,
    ) -> Self {
        Self {
            fallback: fallback.into(),
            excluded,
            path_prefix: default_path_prefix(),
            icons,
        }
    }

    /// Parse a catalog from TOML manifest text.
    pub fn from_toml(manifest: &str) -> Result<Self, IconError> {
        Ok(toml::from_str(manifest)?)
    }

    /// Load a catalog manifest from a file.
    pub async fn from_manifest_file(path: impl AsRef<Path>) -> Result<Self, IconError> {
        let manifest = tokio::fs::read_to_string(path).await?;
        Self::from_toml(&manifest)
    }

    /// Override the path prefix.
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    /// The fallback identifier.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// The identifier handled entirely by static styling, if any.
    pub fn excluded(&self) -> Option<&str> {
        self.excluded.as_deref()
    }

    /// All catalog identifiers, in manifest order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.icons.keys().map(String::as_str)
    }

    /// Resolve an identifier to its asset path.
    ///
    /// An unknown identifier resolves to the fallback path with a warning;
    /// resolution is never a fatal error.
    pub fn resolve(&self, identifier: &str) -> String {
        match self.icons.get(identifier) {
            Some(filename) => format!("{}{}", self.path_prefix, filename),
            None => {
                log::warn!(
                    "icon '{}' is not in the catalog, using fallback '{}'",
                    identifier,
                    self.fallback
                );
                self.fallback_path()
            },
        }
    }

    /// The resolved path of the fallback asset.
    pub fn fallback_path(&self) -> String {
        let filename = self
            .icons
            .get(&self.fallback)
            .cloned()
            .unwrap_or_else(|| format!("{}.svg", self.fallback));
        format!("{}{}", self.path_prefix, filename)
    }

    /// Materialize the entries the engine iterates, in catalog order.
    pub fn entries(&self) -> Vec<IconEntry> {
        self.icons
            .iter()
            .map(|(identifier, filename)| IconEntry {
                identifier: identifier.clone(),
                asset_path: format!("{}{}", self.path_prefix, filename),
                target: Selector::data_icon(identifier),
            })
            .collect()
    }
}

impl Default for IconCatalog {
    /// The built-in media-transport catalog.
    fn default() -> Self {
        let mut icons = IndexMap::new();
        for (identifier, filename) in [
            ("play", "play.svg"),
            ("pause", "pause.svg"),
            ("stop", "stop.svg"),
            ("record", "record.svg"),
            ("previous", "previous.svg"),
            ("next", "next.svg"),
            ("shuffle", "shuffle.svg"),
            ("repeat", "repeat.svg"),
            ("heart", "heart.svg"),
            ("fallback", "fallback.svg"),
        ] {
            icons.insert(identifier.to_string(), filename.to_string());
        }
        Self::new(icons, "fallback", Some("heart".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown() {
        let catalog = IconCatalog::default();
        assert_eq!(catalog.resolve("play"), "icons/play.svg");
        // Unknown identifiers fall back, never fail.
        assert_eq!(catalog.resolve("nonexistent"), "icons/fallback.svg");
    }

    #[test]
    fn test_entries_in_catalog_order() {
        let catalog = IconCatalog::default();
        let entries = catalog.entries();
        assert_eq!(entries[0].identifier, "play");
        assert_eq!(entries[0].target, Selector::data_icon("play"));
        assert!(entries.iter().any(|e| e.identifier == "fallback"));
    }

    #[test]
    fn test_from_toml() {
        let catalog = IconCatalog::from_toml(
            r#"
            fallback = "missing"
            excluded = "star"
            path-prefix = "assets/"

            [icons]
            star = "star.svg"
            missing = "missing.svg"
            "#,
        )
        .unwrap();
        assert_eq!(catalog.fallback(), "missing");
        assert_eq!(catalog.excluded(), Some("star"));
        assert_eq!(catalog.resolve("star"), "assets/star.svg");
        assert_eq!(catalog.fallback_path(), "assets/missing.svg");
    }
}
