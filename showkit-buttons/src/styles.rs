//! Geometry-driven dynamic styling.

use std::collections::HashMap;

use showkit_core::page::vocab;
use showkit_core::{NodeId, Scheduler, SharedPage};

use crate::scan::scan_buttons;

/// Per-button cache of the last written min-side value.
///
/// Keyed by the opaque node handle with no ownership: entries of removed
/// buttons simply go stale and unreachable.
#[derive(Debug, Default)]
pub struct GeometryCache {
    min_sides: HashMap<NodeId, f64>,
}

impl GeometryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached min-side for `node`.
    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.min_sides.get(&node).copied()
    }

    /// Record a written min-side for `node`.
    pub fn put(&mut self, node: NodeId, min_side: f64) {
        self.min_sides.insert(node, min_side);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.min_sides.len()
    }
}

/// Measure every button and publish its smaller rendered dimension as the
/// `--min-side` style variable, writing only on change.
///
/// Measurement happens only after a render-settle wait; stale layout is
/// never trusted.
pub async fn apply_dynamic_styles(
    page: &SharedPage,
    scheduler: &dyn Scheduler,
    cache: &mut GeometryCache,
) {
    scheduler.settle().await;

    let mut page = page.lock().unwrap();
    for button in scan_buttons(&*page) {
        let (width, height) = page.measured_size(button.node);
        let min_side = width.min(height);
        if cache.get(button.node) == Some(min_side) {
            continue;
        }
        page.set_style_var(button.node, vocab::MIN_SIDE, &format!("{}px", min_side));
        cache.put(button.node, min_side);
    }
}
