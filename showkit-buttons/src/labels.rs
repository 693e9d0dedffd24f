//! Contrast-ratio label updates.

use std::sync::Arc;

use showkit_color::contrast_between;
use showkit_core::{Deferred, Page, Scheduler, SharedPage};

use crate::scan::scan_buttons;

/// The primary segment of a label: everything before the first line break.
pub fn primary_text(text: &str) -> &str {
    text.split('\n').next().unwrap_or(text)
}

/// Recompute and redisplay the contrast ratio of every labelled button.
///
/// The label becomes `<primary text>\n<ratio to 2 decimals>`; the primary
/// segment is preserved and everything after it replaced. A color that
/// fails to parse skips that button for this cycle and never aborts the
/// pass.
pub fn update_button_labels(page: &mut dyn Page) {
    for button in scan_buttons(page) {
        let Some(label) = button.label else {
            continue;
        };
        let Some(background) = page.effective_background(button.node) else {
            continue;
        };
        let Some(foreground) = page.effective_text_color(label) else {
            continue;
        };

        match contrast_between(&foreground, &background) {
            Ok(ratio) => {
                let text = page.text(label).unwrap_or_default();
                let updated = format!("{}\n{:.2}", primary_text(&text), ratio);
                page.set_text(label, &updated);
            },
            Err(error) => {
                log::debug!(
                    "skipping contrast label for button {:?}: {}",
                    button.node,
                    error
                );
            },
        }
    }
}

/// Settle, then update every label.
///
/// Each call independently waits and updates; overlapping calls perform
/// redundant but never incorrect work, so no coalescing is attempted.
pub fn schedule_update(page: SharedPage, scheduler: Arc<dyn Scheduler>) -> Deferred {
    Deferred::spawn(async move {
        scheduler.settle().await;
        let mut page = page.lock().unwrap();
        update_button_labels(&mut *page);
    })
}
