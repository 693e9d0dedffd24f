//! Icon catalog, cache and injection engine for showkit.
//!
//! Vector icon assets live outside the page; this crate fetches every
//! catalog asset once (concurrently, with a per-identifier fallback chain),
//! normalizes their color directives so injected markup inherits the
//! surrounding text color, and injects the normalized markup into all
//! matching page targets.

mod cache;
mod catalog;
mod engine;
mod error;
mod normalize;
mod transport;

pub use cache::IconCache;
pub use catalog::{IconCatalog, IconEntry};
pub use engine::IconEngine;
pub use error::IconError;
pub use normalize::normalize_colors;
pub use transport::{AssetTransport, FsTransport, StaticTransport};
