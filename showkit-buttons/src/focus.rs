//! Grid-aware focus navigation across showcases.

use showkit_core::page::vocab;
use showkit_core::{Key, NodeId, Page, Selector};

/// Tracks which button holds focus and moves it in response to navigation
/// keys.
///
/// Navigation operates over the ordered list of currently visible buttons.
/// Vertical navigation is biased toward crossing showcase boundaries: it
/// lands on the nearest button belonging to a different showcase than the
/// focused one.
#[derive(Debug, Default)]
pub struct FocusNavigator {
    focused: Option<NodeId>,
}

impl FocusNavigator {
    /// Create a navigator with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently focused button, if any.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move or clear focus directly (pointer focus, host focus changes).
    pub fn set_focused(&mut self, node: Option<NodeId>) {
        self.focused = node;
    }

    /// Ordered list of currently visible buttons.
    pub fn visible_buttons(page: &dyn Page) -> Vec<NodeId> {
        page.query_selector_all(&Selector::Class(vocab::BUTTON.to_string()))
            .into_iter()
            .filter(|node| page.is_visible(*node))
            .collect()
    }

    /// Apply a navigation key; returns the newly focused button, if focus
    /// moved.
    pub fn navigate(&mut self, page: &dyn Page, key: Key) -> Option<NodeId> {
        let buttons = Self::visible_buttons(page);
        if buttons.is_empty() {
            return None;
        }

        let current = self
            .focused
            .and_then(|node| buttons.iter().position(|b| *b == node));

        // Without a current focus, navigation seeds focus directly: Home
        // and End at their absolute targets, arrows at the first visible
        // button.
        let Some(index) = current else {
            let seed = match key {
                Key::End => Some(buttons[buttons.len() - 1]),
                Key::Space | Key::Enter => None,
                _ => Some(buttons[0]),
            };
            if seed.is_some() {
                self.focused = seed;
            }
            return seed;
        };

        let target = match key {
            Key::ArrowRight => Some(buttons[(index + 1) % buttons.len()]),
            Key::ArrowLeft => Some(buttons[(index + buttons.len() - 1) % buttons.len()]),
            Key::Home => Some(buttons[0]),
            Key::End => Some(buttons[buttons.len() - 1]),
            Key::ArrowDown => Self::cross_showcase(page, &buttons, index, Direction::Forward),
            Key::ArrowUp => Self::cross_showcase(page, &buttons, index, Direction::Backward),
            Key::Space | Key::Enter => None,
        };

        if let Some(node) = target {
            self.focused = Some(node);
        }
        target
    }

    fn cross_showcase(
        page: &dyn Page,
        buttons: &[NodeId],
        index: usize,
        direction: Direction,
    ) -> Option<NodeId> {
        let own = showcase_of(page, buttons[index]);
        let len = buttons.len();

        for step in 1..len {
            let candidate = match direction {
                Direction::Forward => (index + step) % len,
                Direction::Backward => (index + len - step) % len,
            };
            let other = showcase_of(page, buttons[candidate]);
            if other != own {
                return match direction {
                    Direction::Forward => Some(buttons[candidate]),
                    // Tie-break upward: land on the first button of the
                    // found showcase in list order.
                    Direction::Backward => buttons
                        .iter()
                        .copied()
                        .find(|b| showcase_of(page, *b) == other),
                };
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

fn showcase_of(page: &dyn Page, button: NodeId) -> Option<NodeId> {
    page.parent(button)
        .and_then(|parent| page.closest_with_class(parent, vocab::SHOWCASE))
}
