//! Button state management for showkit.
//!
//! Holds the explicit button state machine with its pure transition
//! function, the contrast-driven label updater, the geometry cache behind
//! dynamic styling, grouped focus navigation, the interaction bindings, and
//! the orchestrator that sequences engine initialization.

pub mod app;
pub mod focus;
pub mod interaction;
pub mod labels;
pub mod scan;
pub mod state;
pub mod styles;

pub use app::ShowcaseApp;
pub use focus::FocusNavigator;
pub use interaction::{Action, Session};
pub use labels::{schedule_update, update_button_labels};
pub use scan::{scan_buttons, setup_icon_slots, ButtonKind, ButtonRef};
pub use state::{transition, ButtonEvent, ButtonState, Effect};
pub use styles::{apply_dynamic_styles, GeometryCache};
