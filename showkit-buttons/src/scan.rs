//! Button discovery and toggle structure preparation.

use showkit_core::page::vocab;
use showkit_core::{NodeId, Page, Selector};

/// Whether a button latches its pressed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Pressed only while held.
    Momentary,
    /// Pressed state persists until the next activation.
    Toggle,
}

/// One button as discovered on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonRef {
    /// The button element.
    pub node: NodeId,
    /// Momentary or toggle.
    pub kind: ButtonKind,
    /// Whether interaction is disabled.
    pub disabled: bool,
    /// The nested label element, if present.
    pub label: Option<NodeId>,
    /// The showcase grouping ancestor, if any.
    pub showcase: Option<NodeId>,
}

/// First descendant of `root` (excluding `root`) carrying `class`, in
/// document order.
pub fn descendant_with_class(page: &dyn Page, root: NodeId, class: &str) -> Option<NodeId> {
    let mut stack: Vec<NodeId> = page.children(root).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        if page.has_class(node, class) {
            return Some(node);
        }
        for child in page.children(node).into_iter().rev() {
            stack.push(child);
        }
    }
    None
}

/// Whether `node` is currently disabled.
pub fn is_disabled(page: &dyn Page, node: NodeId) -> bool {
    page.has_class(node, vocab::DISABLED)
        || page
            .attr(node, vocab::ARIA_DISABLED)
            .is_some_and(|v| v == "true")
}

/// Discover every button on the page, in document order.
pub fn scan_buttons(page: &dyn Page) -> Vec<ButtonRef> {
    page.query_selector_all(&Selector::Class(vocab::BUTTON.to_string()))
        .into_iter()
        .map(|node| ButtonRef {
            node,
            kind: if page.has_class(node, vocab::TOGGLE) {
                ButtonKind::Toggle
            } else {
                ButtonKind::Momentary
            },
            disabled: is_disabled(page, node),
            label: descendant_with_class(page, node, vocab::LABEL),
            showcase: page
                .parent(node)
                .and_then(|parent| page.closest_with_class(parent, vocab::SHOWCASE)),
        })
        .collect()
}

/// Prepare the toggle structure of every toggle button.
///
/// Ensures a pressed-icon slot exists immediately before the default icon
/// slot (creating one when absent — both slots coexist; styling controls
/// which is visible), marks the button with `data-is-toggle-button`, and
/// seeds `aria-pressed` from the current pressed class.
pub fn setup_icon_slots(page: &mut dyn Page) {
    let toggles: Vec<NodeId> = scan_buttons(page)
        .into_iter()
        .filter(|b| b.kind == ButtonKind::Toggle)
        .map(|b| b.node)
        .collect();

    for button in toggles {
        if descendant_with_class(page, button, vocab::PRESSED_ICON).is_none() {
            if let Some(icon) = descendant_with_class(page, button, vocab::ICON) {
                let parent = page.parent(icon).unwrap_or(button);
                let slot = page.create_element("span", &[vocab::PRESSED_ICON]);
                page.insert_before(parent, slot, icon);
            } else {
                log::warn!("toggle button {:?} has no icon slot", button);
            }
        }

        page.set_attr(button, vocab::DATA_IS_TOGGLE, "true");
        let pressed = page.has_class(button, vocab::PRESSED);
        page.set_attr(button, vocab::ARIA_PRESSED, if pressed { "true" } else { "false" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showkit_core::MemoryPage;

    fn fixture() -> (MemoryPage, NodeId, NodeId) {
        let mut page = MemoryPage::new();
        let root = page.root();
        let showcase = page.add_element(root, "section", &[vocab::SHOWCASE]);

        let momentary = page.add_element(showcase, "button", &[vocab::BUTTON]);
        page.add_element(momentary, "span", &[vocab::LABEL]);
        page.add_element(momentary, "span", &[vocab::ICON]);

        let toggle = page.add_element(
            showcase,
            "button",
            &[vocab::BUTTON, vocab::TOGGLE, vocab::PRESSED],
        );
        page.add_element(toggle, "span", &[vocab::LABEL]);
        page.add_element(toggle, "span", &[vocab::ICON]);

        (page, momentary, toggle)
    }

    #[test]
    fn test_scan_classifies_buttons() {
        let (page, momentary, toggle) = fixture();
        let buttons = scan_buttons(&page);
        assert_eq!(buttons.len(), 2);

        let m = buttons.iter().find(|b| b.node == momentary).unwrap();
        assert_eq!(m.kind, ButtonKind::Momentary);
        assert!(!m.disabled);
        assert!(m.label.is_some());
        assert!(m.showcase.is_some());

        let t = buttons.iter().find(|b| b.node == toggle).unwrap();
        assert_eq!(t.kind, ButtonKind::Toggle);
    }

    #[test]
    fn test_disabled_via_class_or_attr() {
        let (mut page, momentary, _) = fixture();
        assert!(!is_disabled(&page, momentary));
        page.set_attr(momentary, vocab::ARIA_DISABLED, "true");
        assert!(is_disabled(&page, momentary));
    }

    #[test]
    fn test_setup_icon_slots_creates_pressed_slot() {
        let (mut page, momentary, toggle) = fixture();
        setup_icon_slots(&mut page);

        // Slot sits immediately before the default icon slot.
        let slot = descendant_with_class(&page, toggle, vocab::PRESSED_ICON).unwrap();
        let icon = descendant_with_class(&page, toggle, vocab::ICON).unwrap();
        let children = page.children(toggle);
        let slot_at = children.iter().position(|c| *c == slot).unwrap();
        let icon_at = children.iter().position(|c| *c == icon).unwrap();
        assert_eq!(slot_at + 1, icon_at);

        assert_eq!(page.attr(toggle, vocab::DATA_IS_TOGGLE).unwrap(), "true");
        assert_eq!(page.attr(toggle, vocab::ARIA_PRESSED).unwrap(), "true");

        // Momentary buttons are untouched.
        assert!(page.attr(momentary, vocab::DATA_IS_TOGGLE).is_none());
        assert!(page.attr(momentary, vocab::ARIA_PRESSED).is_none());

        // Running again must not duplicate the slot.
        setup_icon_slots(&mut page);
        assert_eq!(
            page.children(toggle)
                .iter()
                .filter(|c| page.has_class(**c, vocab::PRESSED_ICON))
                .count(),
            1
        );
    }
}
