//! Input event model and the bind-once dispatcher registry.

use crate::node::NodeId;

/// Keyboard keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Home.
    Home,
    /// End.
    End,
}

/// One input event delivered to the engine by its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary pointer button went down over `node`.
    PointerDown {
        /// The element under the pointer.
        node: NodeId,
    },
    /// Primary pointer button released over `node`.
    PointerUp {
        /// The element under the pointer.
        node: NodeId,
    },
    /// Pointer left `node` while a press was in progress.
    PointerLeave {
        /// The element the pointer left.
        node: NodeId,
    },
    /// Touch began on `node`.
    TouchStart {
        /// The touched element.
        node: NodeId,
    },
    /// Touch ended on `node`.
    TouchEnd {
        /// The touched element.
        node: NodeId,
    },
    /// Touch was cancelled on `node`.
    TouchCancel {
        /// The touched element.
        node: NodeId,
    },
    /// A click was delivered to `node`.
    Click {
        /// The clicked element.
        node: NodeId,
        /// Whether the click was synthesized by the engine itself.
        synthetic: bool,
    },
    /// A key went down.
    Key {
        /// The pressed key.
        key: Key,
    },
    /// The viewport was resized.
    Resize,
}

/// The kind of an [`InputEvent`], used as the dispatcher binding key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer press.
    PointerDown,
    /// Pointer release.
    PointerUp,
    /// Pointer leaving an element.
    PointerLeave,
    /// Touch press.
    TouchStart,
    /// Touch release.
    TouchEnd,
    /// Touch cancellation.
    TouchCancel,
    /// Click.
    Click,
    /// Key press.
    Key,
    /// Viewport resize.
    Resize,
}

impl InputEvent {
    /// The binding key for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown { .. } => EventKind::PointerDown,
            Self::PointerUp { .. } => EventKind::PointerUp,
            Self::PointerLeave { .. } => EventKind::PointerLeave,
            Self::TouchStart { .. } => EventKind::TouchStart,
            Self::TouchEnd { .. } => EventKind::TouchEnd,
            Self::TouchCancel { .. } => EventKind::TouchCancel,
            Self::Click { .. } => EventKind::Click,
            Self::Key { .. } => EventKind::Key,
            Self::Resize => EventKind::Resize,
        }
    }

    /// The element the event targets, when it has one.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Self::PointerDown { node }
            | Self::PointerUp { node }
            | Self::PointerLeave { node }
            | Self::TouchStart { node }
            | Self::TouchEnd { node }
            | Self::TouchCancel { node }
            | Self::Click { node, .. } => Some(*node),
            Self::Key { .. } | Self::Resize => None,
        }
    }
}

/// When a binding runs relative to the rest of the bindings for its kind.
///
/// Capture bindings run first and may consume the event before any bubble
/// binding observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Earliest stage; runs before all bubble bindings.
    Capture,
    /// Normal stage.
    Bubble,
}

/// A registry of (event kind → action) bindings, bound once at startup.
///
/// Actions are plain data owned by the consumer; the dispatcher only decides
/// which actions see an event and in what order.
#[derive(Debug)]
pub struct Dispatcher<A> {
    bindings: Vec<(Stage, EventKind, A)>,
}

impl<A: Copy> Dispatcher<A> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Register an action for an event kind.
    pub fn bind(&mut self, stage: Stage, kind: EventKind, action: A) {
        self.bindings.push((stage, kind, action));
    }

    /// Actions bound to `kind`, capture stage first, binding order otherwise.
    pub fn matching(&self, kind: EventKind) -> Vec<(Stage, A)> {
        let mut actions: Vec<(Stage, A)> = self
            .bindings
            .iter()
            .filter(|(_, bound, _)| *bound == kind)
            .map(|(stage, _, action)| (*stage, *action))
            .collect();
        actions.sort_by_key(|(stage, _)| *stage);
        actions
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<A: Copy> Default for Dispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}
