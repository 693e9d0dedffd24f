//! Engine orchestration: startup sequencing and the reactive update
//! manager.

use std::sync::Arc;

use anyhow::{ensure, Context};
use showkit_core::page::vocab;
use showkit_core::{Deferred, InputEvent, Mutation, MutationKind, NodeId, Scheduler, SharedPage};
use showkit_icons::IconEngine;

use crate::interaction::Session;
use crate::labels::{schedule_update, update_button_labels};
use crate::scan::{scan_buttons, setup_icon_slots};

/// The showcase engine.
///
/// Sequences initialization strictly — load icons, prepare toggle
/// structure, apply initial styles, start observers, bind interaction
/// handlers — then routes host input events for the page's lifetime.
pub struct ShowcaseApp {
    page: SharedPage,
    scheduler: Arc<dyn Scheduler>,
    icons: IconEngine,
    session: Session,
    update_watcher: Option<Deferred>,
}

impl ShowcaseApp {
    /// Create an app over a page, scheduler, and icon engine.
    pub fn new(page: SharedPage, scheduler: Arc<dyn Scheduler>, icons: IconEngine) -> Self {
        let session = Session::new(page.clone(), scheduler.clone());
        Self {
            page,
            scheduler,
            icons,
            session,
            update_watcher: None,
        }
    }

    /// Run the full initialization sequence.
    ///
    /// Asset failures inside the icon engine are absorbed there; an error
    /// escaping this sequence is fatal and surfaced to the caller.
    pub async fn initialize(&mut self) -> anyhow::Result<()> {
        self.check_preconditions()
            .context("showcase environment precondition failed")?;

        self.icons.load_and_inject(&self.page).await;

        {
            let mut page = self.page.lock().unwrap();
            setup_icon_slots(&mut *page);
        }

        self.session.apply_styles().await;
        {
            let mut page = self.page.lock().unwrap();
            update_button_labels(&mut *page);
        }

        self.start_update_manager();
        self.session.bind();
        log::info!("showcase engine initialized");
        Ok(())
    }

    fn check_preconditions(&self) -> anyhow::Result<()> {
        let page = self.page.lock().unwrap();
        ensure!(
            !scan_buttons(&*page).is_empty(),
            "page contains no button elements"
        );
        Ok(())
    }

    /// Install the mutation observers: class changes on any button and
    /// style/theme changes on the document root each trigger an
    /// independent settle-then-update pass.
    fn start_update_manager(&mut self) {
        let mut mutations = {
            let mut page = self.page.lock().unwrap();
            page.watch_mutations()
        };

        let page = self.page.clone();
        let scheduler = self.scheduler.clone();
        self.update_watcher = Some(Deferred::spawn(async move {
            while let Some(mutation) = mutations.recv().await {
                let relevant = {
                    let locked = page.lock().unwrap();
                    mutation_triggers_update(&*locked, locked.root(), &mutation)
                };
                if relevant {
                    let _ = schedule_update(page.clone(), scheduler.clone());
                }
            }
        }));
    }

    /// Route one host input event through the interaction session.
    pub async fn handle_event(&mut self, event: InputEvent) {
        self.session.dispatch(event).await;
    }

    /// The interaction session, for hosts that manage focus directly.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The interaction session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The icon engine.
    pub fn icons(&self) -> &IconEngine {
        &self.icons
    }
}

fn mutation_triggers_update(
    page: &dyn showkit_core::Page,
    root: NodeId,
    mutation: &Mutation,
) -> bool {
    match &mutation.kind {
        MutationKind::Class => page.has_class(mutation.node, vocab::BUTTON),
        MutationKind::Attr(name) => {
            mutation.node == root && (name == "style" || name == "data-theme")
        },
        MutationKind::StyleVar(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showkit_core::{MemoryPage, NullScheduler};
    use showkit_icons::{IconCatalog, StaticTransport};
    use std::sync::Mutex;

    fn empty_app() -> ShowcaseApp {
        let page: SharedPage = Arc::new(Mutex::new(MemoryPage::new()));
        let icons = IconEngine::new(IconCatalog::default(), Arc::new(StaticTransport::new()));
        ShowcaseApp::new(page, Arc::new(NullScheduler), icons)
    }

    #[tokio::test]
    async fn test_initialize_fails_on_empty_page() {
        let mut app = empty_app();
        let error = app.initialize().await.unwrap_err();
        assert!(error.to_string().contains("precondition"));
    }
}
