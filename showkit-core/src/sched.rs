//! Scheduling primitives: render-settle waits, cancellable deferred tasks,
//! and per-frame throttling.
//!
//! Layout measurements are only trustworthy after the surface has had a
//! chance to render, so consumers wait for [`Scheduler::settle`] before
//! reading geometry. Tests substitute [`NullScheduler`] to make every wait
//! resolve immediately.

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;

/// Nominal duration of one rendering frame.
pub const FRAME: Duration = Duration::from_millis(16);

/// Fixed margin added to the render-settle wait after the frame ticks.
pub const SETTLE_MARGIN: Duration = Duration::from_millis(20);

/// How long a keyboard-activated momentary button stays visually pressed.
pub const KEY_PRESS_VISUAL: Duration = Duration::from_millis(150);

/// Cooperative waiting seam used before trusting measured layout.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Render-settle wait: at least two frame ticks plus a fixed margin.
    async fn settle(&self);

    /// Plain delay.
    async fn delay(&self, duration: Duration);
}

/// Production scheduler backed by `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn settle(&self) {
        // Two frame ticks stand in for two animation-frame callbacks.
        tokio::time::sleep(FRAME).await;
        tokio::time::sleep(FRAME).await;
        tokio::time::sleep(SETTLE_MARGIN).await;
    }

    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Scheduler stub whose waits resolve immediately; for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScheduler;

#[async_trait]
impl Scheduler for NullScheduler {
    async fn settle(&self) {}

    async fn delay(&self, _duration: Duration) {}
}

/// A cancellable deferred task.
///
/// Dropping the handle detaches the task; [`Deferred::cancel`] aborts it.
#[derive(Debug)]
pub struct Deferred {
    handle: tokio::task::JoinHandle<()>,
}

impl Deferred {
    /// Spawn `future` as a deferred task.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    /// Abort the task if it has not completed yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the task has completed (or been aborted).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to finish; a cancelled task resolves silently.
    pub async fn wait(self) {
        let _ = self.handle.await;
    }
}

/// At-most-once-per-frame gate for resize handling.
#[derive(Debug)]
pub struct FrameGate {
    last_pass: Option<Instant>,
    frame: Duration,
}

impl FrameGate {
    /// Create a gate with the nominal frame duration.
    pub fn new() -> Self {
        Self::with_frame(FRAME)
    }

    /// Create a gate with a custom frame duration.
    pub fn with_frame(frame: Duration) -> Self {
        Self {
            last_pass: None,
            frame,
        }
    }

    /// Returns `true` at most once per frame; callers skip the work
    /// otherwise.
    pub fn try_pass(&mut self) -> bool {
        let now = Instant::now();
        match self.last_pass {
            Some(last) if now.duration_since(last) < self.frame => false,
            _ => {
                self.last_pass = Some(now);
                true
            },
        }
    }
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new()
    }
}
