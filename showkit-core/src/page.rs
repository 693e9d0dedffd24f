//! The element-tree seam the engine runs against.
//!
//! `Page` abstracts the rendering surface behind an explicit query/mutate
//! interface so every consumer is testable without a live surface. The
//! bundled [`MemoryPage`] is a complete in-memory implementation used by
//! tests and by hosts without a real document.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::node::NodeId;

/// Class and attribute vocabulary shared between the page and its consumers.
pub mod vocab {
    /// Class marking an interactive button element.
    pub const BUTTON: &str = "button";
    /// Class marking a button as currently pressed.
    pub const PRESSED: &str = "pressed";
    /// Class marking a toggle (as opposed to momentary) button.
    pub const TOGGLE: &str = "toggle";
    /// Class marking a button as disabled.
    pub const DISABLED: &str = "disabled";
    /// Class of the text label nested inside a button.
    pub const LABEL: &str = "label";
    /// Class of the default (unpressed) icon slot.
    pub const ICON: &str = "icon";
    /// Class of the pressed-state icon slot of a toggle button.
    pub const PRESSED_ICON: &str = "pressed-icon";
    /// Class of a showcase grouping element.
    pub const SHOWCASE: &str = "showcase";
    /// Attribute naming the icon an icon slot displays.
    pub const DATA_ICON: &str = "data-icon";
    /// Attribute distinguishing toggle buttons from momentary buttons.
    pub const DATA_IS_TOGGLE: &str = "data-is-toggle-button";
    /// Tri-state pressed attribute for assistive technology.
    pub const ARIA_PRESSED: &str = "aria-pressed";
    /// Disabled attribute for assistive technology.
    pub const ARIA_DISABLED: &str = "aria-disabled";
    /// Style variable carrying a button's smaller rendered dimension.
    pub const MIN_SIDE: &str = "--min-side";
}

/// A node query, restricted to the forms the engine needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Elements carrying the given class.
    Class(String),
    /// Elements carrying the given attribute, optionally with an exact value.
    Attr {
        /// Attribute name.
        name: String,
        /// Exact value to match, or `None` for mere presence.
        value: Option<String>,
    },
}

impl Selector {
    /// Selector for the default icon target of one icon identifier.
    pub fn data_icon(identifier: &str) -> Self {
        Self::Attr {
            name: vocab::DATA_ICON.to_string(),
            value: Some(identifier.to_string()),
        }
    }
}

/// What changed in a single observed page mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    /// A class was added or removed.
    Class,
    /// An attribute changed value (or appeared / disappeared).
    Attr(String),
    /// A style variable changed value.
    StyleVar(String),
}

/// One observed page mutation, delivered to registered watchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// The mutated element.
    pub node: NodeId,
    /// What changed.
    pub kind: MutationKind,
}

/// A page shared between the engine, its observers, and scheduled tasks.
pub type SharedPage = Arc<Mutex<dyn Page + Send>>;

/// The element/query interface the engine is written against.
pub trait Page {
    /// The document root.
    fn root(&self) -> NodeId;

    /// All elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId>;

    /// Whether `node` carries `class`.
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Add `class` to `node`.
    fn add_class(&mut self, node: NodeId, class: &str);

    /// Remove `class` from `node`.
    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Read an attribute.
    fn attr(&self, node: NodeId, name: &str) -> Option<String>;

    /// Write an attribute.
    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);

    /// Replace the inner markup of `node`.
    fn set_inner_markup(&mut self, node: NodeId, markup: &str);

    /// Read the inner markup of `node`.
    fn inner_markup(&self, node: NodeId) -> Option<String>;

    /// Read the text content of `node`.
    fn text(&self, node: NodeId) -> Option<String>;

    /// Replace the text content of `node`.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Create a detached element.
    fn create_element(&mut self, tag: &str, classes: &[&str]) -> NodeId;

    /// Insert `node` into `parent` immediately before `reference`.
    fn insert_before(&mut self, parent: NodeId, node: NodeId, reference: NodeId);

    /// Parent of `node`, if any.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Children of `node`, in order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Nearest ancestor (including `node` itself) carrying `class`.
    fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId>;

    /// Rendered width and height of `node`.
    fn measured_size(&self, node: NodeId) -> (f64, f64);

    /// Effective background color at `node` (own value or nearest ancestor's).
    fn effective_background(&self, node: NodeId) -> Option<String>;

    /// Effective text color at `node` (own value or nearest ancestor's).
    fn effective_text_color(&self, node: NodeId) -> Option<String>;

    /// Whether `node` and all of its ancestors are unhidden.
    fn is_visible(&self, node: NodeId) -> bool;

    /// Read a style variable on `node`.
    fn style_var(&self, node: NodeId, name: &str) -> Option<String>;

    /// Write a style variable on `node`.
    fn set_style_var(&mut self, node: NodeId, name: &str, value: &str);

    /// Register a mutation watcher; every subsequent class, attribute, and
    /// style-variable change is delivered to the returned receiver.
    fn watch_mutations(&mut self) -> mpsc::UnboundedReceiver<Mutation>;
}

#[derive(Debug, Default)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: HashMap<String, String>,
    style_vars: HashMap<String, String>,
    text: Option<String>,
    inner_markup: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    size: (f64, f64),
    background: Option<String>,
    text_color: Option<String>,
    hidden: bool,
}

/// In-memory [`Page`] implementation.
pub struct MemoryPage {
    root: NodeId,
    elements: HashMap<NodeId, Element>,
    watchers: Vec<mpsc::UnboundedSender<Mutation>>,
}

impl MemoryPage {
    /// Create a page holding only a root element with white background and
    /// black text.
    pub fn new() -> Self {
        let root = NodeId::new();
        let mut elements = HashMap::new();
        elements.insert(
            root,
            Element {
                tag: "root".to_string(),
                background: Some("#ffffff".to_string()),
                text_color: Some("#000000".to_string()),
                ..Element::default()
            },
        );
        Self {
            root,
            elements,
            watchers: Vec::new(),
        }
    }

    /// Append a fresh element under `parent`.
    pub fn add_element(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let node = self.create_element(tag, classes);
        if let Some(element) = self.elements.get_mut(&node) {
            element.parent = Some(parent);
        }
        if let Some(parent_element) = self.elements.get_mut(&parent) {
            parent_element.children.push(node);
        }
        node
    }

    /// Override the rendered size reported for `node`.
    pub fn set_measured_size(&mut self, node: NodeId, width: f64, height: f64) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.size = (width, height);
        }
    }

    /// Set the own background color of `node`.
    pub fn set_background(&mut self, node: NodeId, color: &str) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.background = Some(color.to_string());
        }
    }

    /// Set the own text color of `node`.
    pub fn set_text_color(&mut self, node: NodeId, color: &str) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.text_color = Some(color.to_string());
        }
    }

    /// Hide or unhide `node` (hides its subtree).
    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.hidden = hidden;
        }
    }

    /// Tag name of `node`, for assertions in tests.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.elements.get(&node).map(|e| e.tag.as_str())
    }

    fn emit(&mut self, mutation: Mutation) {
        self.watchers
            .retain(|watcher| watcher.send(mutation.clone()).is_ok());
    }

    fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.elements.len());
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            order.push(node);
            if let Some(element) = self.elements.get(&node) {
                for child in element.children.iter().rev() {
                    stack.push(*child);
                }
            }
        }
        order
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let Some(element) = self.elements.get(&node) else {
            return false;
        };
        match selector {
            Selector::Class(class) => element.classes.iter().any(|c| c == class),
            Selector::Attr { name, value } => match element.attrs.get(name) {
                Some(present) => value.as_ref().map_or(true, |wanted| wanted == present),
                None => false,
            },
        }
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for MemoryPage {
    fn root(&self) -> NodeId {
        self.root
    }

    fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|node| self.matches(*node, selector))
            .collect()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.elements
            .get(&node)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        let Some(element) = self.elements.get_mut(&node) else {
            return;
        };
        if element.classes.iter().any(|c| c == class) {
            return;
        }
        element.classes.push(class.to_string());
        self.emit(Mutation {
            node,
            kind: MutationKind::Class,
        });
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        let Some(element) = self.elements.get_mut(&node) else {
            return;
        };
        let before = element.classes.len();
        element.classes.retain(|c| c != class);
        if element.classes.len() != before {
            self.emit(Mutation {
                node,
                kind: MutationKind::Class,
            });
        }
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.elements
            .get(&node)
            .and_then(|e| e.attrs.get(name).cloned())
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(element) = self.elements.get_mut(&node) else {
            return;
        };
        let previous = element.attrs.insert(name.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.emit(Mutation {
                node,
                kind: MutationKind::Attr(name.to_string()),
            });
        }
    }

    fn set_inner_markup(&mut self, node: NodeId, markup: &str) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.inner_markup = Some(markup.to_string());
        }
    }

    fn inner_markup(&self, node: NodeId) -> Option<String> {
        self.elements.get(&node).and_then(|e| e.inner_markup.clone())
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.elements.get(&node).and_then(|e| e.text.clone())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.text = Some(text.to_string());
        }
    }

    fn create_element(&mut self, tag: &str, classes: &[&str]) -> NodeId {
        let node = NodeId::new();
        self.elements.insert(
            node,
            Element {
                tag: tag.to_string(),
                classes: classes.iter().map(|c| c.to_string()).collect(),
                ..Element::default()
            },
        );
        node
    }

    fn insert_before(&mut self, parent: NodeId, node: NodeId, reference: NodeId) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.parent = Some(parent);
        }
        if let Some(parent_element) = self.elements.get_mut(&parent) {
            let at = parent_element
                .children
                .iter()
                .position(|c| *c == reference)
                .unwrap_or(parent_element.children.len());
            parent_element.children.insert(at, node);
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.elements.get(&node).and_then(|e| e.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.elements
            .get(&node)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.has_class(candidate, class) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    fn measured_size(&self, node: NodeId) -> (f64, f64) {
        self.elements.get(&node).map(|e| e.size).unwrap_or((0.0, 0.0))
    }

    fn effective_background(&self, node: NodeId) -> Option<String> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if let Some(color) = self.elements.get(&candidate).and_then(|e| e.background.clone()) {
                return Some(color);
            }
            current = self.parent(candidate);
        }
        None
    }

    fn effective_text_color(&self, node: NodeId) -> Option<String> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if let Some(color) = self.elements.get(&candidate).and_then(|e| e.text_color.clone()) {
                return Some(color);
            }
            current = self.parent(candidate);
        }
        None
    }

    fn is_visible(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            match self.elements.get(&candidate) {
                Some(element) if element.hidden => return false,
                Some(element) => current = element.parent,
                None => return false,
            }
        }
        true
    }

    fn style_var(&self, node: NodeId, name: &str) -> Option<String> {
        self.elements
            .get(&node)
            .and_then(|e| e.style_vars.get(name).cloned())
    }

    fn set_style_var(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(element) = self.elements.get_mut(&node) else {
            return;
        };
        let previous = element
            .style_vars
            .insert(name.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.emit(Mutation {
                node,
                kind: MutationKind::StyleVar(name.to_string()),
            });
        }
    }

    fn watch_mutations(&mut self) -> mpsc::UnboundedReceiver<Mutation> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.watchers.push(tx);
        log::debug!("mutation watcher registered ({} active)", self.watchers.len());
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_button() -> (MemoryPage, NodeId) {
        let mut page = MemoryPage::new();
        let root = page.root();
        let button = page.add_element(root, "button", &[vocab::BUTTON]);
        (page, button)
    }

    #[test]
    fn test_query_by_class_and_attr() {
        let (mut page, button) = page_with_button();
        let icon = page.add_element(button, "span", &[vocab::ICON]);
        page.set_attr(icon, vocab::DATA_ICON, "play");

        let buttons = page.query_selector_all(&Selector::Class(vocab::BUTTON.to_string()));
        assert_eq!(buttons, vec![button]);

        let targets = page.query_selector_all(&Selector::data_icon("play"));
        assert_eq!(targets, vec![icon]);
        assert!(page.query_selector_all(&Selector::data_icon("pause")).is_empty());
    }

    #[test]
    fn test_insert_before_orders_children() {
        let (mut page, button) = page_with_button();
        let icon = page.add_element(button, "span", &[vocab::ICON]);
        let pressed = page.create_element("span", &[vocab::PRESSED_ICON]);
        page.insert_before(button, pressed, icon);
        assert_eq!(page.children(button), vec![pressed, icon]);
    }

    #[test]
    fn test_effective_colors_walk_ancestry() {
        let (mut page, button) = page_with_button();
        let label = page.add_element(button, "span", &[vocab::LABEL]);
        assert_eq!(page.effective_background(label).unwrap(), "#ffffff");
        page.set_background(button, "#123456");
        assert_eq!(page.effective_background(label).unwrap(), "#123456");
        assert_eq!(page.effective_text_color(label).unwrap(), "#000000");
    }

    #[test]
    fn test_visibility_inherits_from_ancestors() {
        let (mut page, button) = page_with_button();
        assert!(page.is_visible(button));
        let root = page.root();
        page.set_hidden(root, true);
        assert!(!page.is_visible(button));
    }

    #[tokio::test]
    async fn test_mutation_watcher_sees_class_changes() {
        let (mut page, button) = page_with_button();
        let mut watcher = page.watch_mutations();

        page.add_class(button, vocab::PRESSED);
        // Re-adding an existing class is not a mutation.
        page.add_class(button, vocab::PRESSED);
        page.remove_class(button, vocab::PRESSED);

        let first = watcher.recv().await.unwrap();
        assert_eq!(first.node, button);
        assert_eq!(first.kind, MutationKind::Class);
        let second = watcher.recv().await.unwrap();
        assert_eq!(second.kind, MutationKind::Class);
        assert!(watcher.try_recv().is_err());
    }
}
