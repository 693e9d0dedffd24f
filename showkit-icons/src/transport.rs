//! Asset transport: resolving an asset path to raw vector-markup text.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::IconError;

/// Request/response seam the engine fetches assets through.
///
/// Implementations distinguish a definite miss ([`IconError::AssetNotFound`])
/// from a transport-level failure ([`IconError::TransportFailure`]); the
/// engine treats both as recoverable.
#[async_trait]
pub trait AssetTransport: Send + Sync {
    /// Fetch the raw markup text at `path`.
    async fn fetch(&self, path: &str) -> Result<String, IconError>;
}

/// Transport reading assets from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsTransport {
    base: PathBuf,
}

impl FsTransport {
    /// Create a transport resolving paths relative to `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

#[async_trait]
impl AssetTransport for FsTransport {
    async fn fetch(&self, path: &str) -> Result<String, IconError> {
        let full = self.base.join(path);
        match tokio::fs::read_to_string(&full).await {
            Ok(markup) => Ok(markup),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(IconError::AssetNotFound(path.to_string()))
            },
            Err(error) => Err(IconError::TransportFailure {
                path: path.to_string(),
                reason: error.to_string(),
            }),
        }
    }
}

/// Scriptable in-memory transport for tests.
///
/// Unlisted paths report [`IconError::AssetNotFound`]; paths listed as
/// broken report [`IconError::TransportFailure`]. Optional per-path delays
/// simulate slow assets.
#[derive(Debug, Default)]
pub struct StaticTransport {
    assets: HashMap<String, String>,
    broken: Vec<String>,
    delays: HashMap<String, Duration>,
}

impl StaticTransport {
    /// Create an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `markup` at `path`.
    pub fn with_asset(mut self, path: impl Into<String>, markup: impl Into<String>) -> Self {
        self.assets.insert(path.into(), markup.into());
        self
    }

    /// Make `path` fail with a transport error.
    pub fn with_broken(mut self, path: impl Into<String>) -> Self {
        self.broken.push(path.into());
        self
    }

    /// Delay responses for `path`.
    pub fn with_delay(mut self, path: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(path.into(), delay);
        self
    }
}

#[async_trait]
impl AssetTransport for StaticTransport {
    async fn fetch(&self, path: &str) -> Result<String, IconError> {
        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
        if self.broken.iter().any(|p| p == path) {
            return Err(IconError::TransportFailure {
                path: path.to_string(),
                reason: "simulated transport failure".to_string(),
            });
        }
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| IconError::AssetNotFound(path.to_string()))
    }
}
