//! Core functionality for showkit.
//!
//! Provides the element-tree seam the engine runs against (`Page` and its
//! in-memory implementation), opaque node handles, the input event model
//! with a bind-once dispatcher registry, and the scheduling primitives used
//! for render-settle waits and frame throttling.

pub mod events;
pub mod node;
pub mod page;
pub mod sched;

pub use events::{Dispatcher, EventKind, InputEvent, Key, Stage};
pub use node::NodeId;
pub use page::{MemoryPage, Mutation, MutationKind, Page, Selector, SharedPage};
pub use sched::{Deferred, FrameGate, NullScheduler, Scheduler, TokioScheduler};
