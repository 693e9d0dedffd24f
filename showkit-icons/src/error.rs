//! Error types for the icon system.

/// Errors that can occur in the icon system.
///
/// Fetch-level failures are recovered locally by the engine's fallback
/// chain; they never abort a load cycle.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// The asset does not exist at the resolved path.
    #[error("icon asset '{0}' not found")]
    AssetNotFound(String),

    /// The transport failed before a success/failure answer was available.
    #[error("transport failure fetching '{path}': {reason}")]
    TransportFailure {
        /// The requested asset path.
        path: String,
        /// Human-readable failure cause.
        reason: String,
    },

    /// The catalog manifest could not be parsed.
    #[error("failed to parse icon manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    /// I/O error while reading a catalog manifest.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
