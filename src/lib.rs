#![warn(missing_docs)]

//! Render a catalog of interactive buttons with injected vector icons,
//! live WCAG contrast labels, and grid-aware keyboard/pointer interaction.

pub use showkit_buttons as buttons;
pub use showkit_color as color;
pub use showkit_core as core;
pub use showkit_icons as icons;

/// A "prelude" for users of the showkit engine.
///
/// Importing this module brings into scope the most common types needed to
/// drive a basic showcase page.
///
/// ```rust
/// use showkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buttons::{
        ButtonEvent, ButtonKind, ButtonRef, ButtonState, FocusNavigator, Session, ShowcaseApp,
    };
    pub use crate::color::{contrast_between, contrast_ratio, luminance, Rgb};
    pub use crate::core::{
        InputEvent, Key, MemoryPage, NodeId, NullScheduler, Page, Scheduler, Selector,
        SharedPage, TokioScheduler,
    };
    pub use crate::icons::{
        AssetTransport, FsTransport, IconCache, IconCatalog, IconEngine, StaticTransport,
    };
}
