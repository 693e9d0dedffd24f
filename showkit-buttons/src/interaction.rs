//! Process-wide interaction bindings: pointer, touch, and keyboard input
//! translated into button state transitions and focus navigation.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use showkit_core::page::vocab;
use showkit_core::sched::KEY_PRESS_VISUAL;
use showkit_core::{
    Dispatcher, EventKind, FrameGate, InputEvent, Key, NodeId, Scheduler, SharedPage, Stage,
};

use crate::focus::FocusNavigator;
use crate::labels::schedule_update;
use crate::scan::{is_disabled, scan_buttons, ButtonKind};
use crate::state::{transition, ButtonEvent, ButtonState, Effect};
use crate::styles::{apply_dynamic_styles, GeometryCache};

/// Actions the dispatcher can route an event to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Capture-stage suppression of clicks on disabled buttons.
    SuppressDisabledClick,
    /// Begin a momentary press.
    PressStart,
    /// End or cancel a momentary press.
    PressEnd,
    /// Flip a toggle button on click.
    ToggleActivate,
    /// Keyboard activation and focus navigation.
    KeyInput,
    /// Re-measure geometry after a resize, throttled per frame.
    RestyleOnResize,
}

/// Whether an event keeps propagating after an action ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Consumed,
}

/// The engine's live interaction state: per-button machine states, focus,
/// geometry cache, and the bound dispatcher.
///
/// Runs for the page's lifetime; the host feeds it every input event via
/// [`Session::dispatch`].
pub struct Session {
    page: SharedPage,
    scheduler: Arc<dyn Scheduler>,
    dispatcher: Dispatcher<Action>,
    states: HashMap<NodeId, ButtonState>,
    kinds: HashMap<NodeId, ButtonKind>,
    focus: FocusNavigator,
    geometry: GeometryCache,
    resize_gate: FrameGate,
}

impl Session {
    /// Create an unbound session.
    pub fn new(page: SharedPage, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            page,
            scheduler,
            dispatcher: Dispatcher::new(),
            states: HashMap::new(),
            kinds: HashMap::new(),
            focus: FocusNavigator::new(),
            geometry: GeometryCache::new(),
            resize_gate: FrameGate::new(),
        }
    }

    /// Scan the page, seed every button's state, and register the default
    /// bindings. Called once at startup.
    pub fn bind(&mut self) {
        {
            let page = self.page.lock().unwrap();
            for button in scan_buttons(&*page) {
                let pressed = page.has_class(button.node, vocab::PRESSED);
                self.states
                    .insert(button.node, ButtonState::initial(button.kind, pressed));
                self.kinds.insert(button.node, button.kind);
            }
        }

        let d = &mut self.dispatcher;
        d.bind(Stage::Capture, EventKind::Click, Action::SuppressDisabledClick);
        d.bind(Stage::Bubble, EventKind::PointerDown, Action::PressStart);
        d.bind(Stage::Bubble, EventKind::TouchStart, Action::PressStart);
        d.bind(Stage::Bubble, EventKind::PointerUp, Action::PressEnd);
        d.bind(Stage::Bubble, EventKind::PointerLeave, Action::PressEnd);
        d.bind(Stage::Bubble, EventKind::TouchEnd, Action::PressEnd);
        d.bind(Stage::Bubble, EventKind::TouchCancel, Action::PressEnd);
        d.bind(Stage::Bubble, EventKind::Click, Action::ToggleActivate);
        d.bind(Stage::Bubble, EventKind::Key, Action::KeyInput);
        d.bind(Stage::Bubble, EventKind::Resize, Action::RestyleOnResize);
        log::debug!(
            "interaction session bound: {} buttons, {} bindings",
            self.states.len(),
            self.dispatcher.len()
        );
    }

    /// Settle, measure, and publish `--min-side` for every button, using
    /// the session's geometry cache.
    pub async fn apply_styles(&mut self) {
        apply_dynamic_styles(&self.page, &*self.scheduler, &mut self.geometry).await;
    }

    /// The machine state of `button`.
    pub fn state_of(&self, button: NodeId) -> Option<ButtonState> {
        self.states.get(&button).copied()
    }

    /// The currently focused button.
    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    /// Move or clear focus directly.
    pub fn set_focused(&mut self, node: Option<NodeId>) {
        self.focus.set_focused(node);
    }

    /// Route one input event through the bound actions, capture stage
    /// first. A consuming action stops propagation.
    pub fn dispatch<'a>(&'a mut self, event: InputEvent) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            for (_, action) in self.dispatcher.matching(event.kind()) {
                if self.run(action, &event).await == Flow::Consumed {
                    log::debug!("event {:?} consumed by {:?}", event.kind(), action);
                    break;
                }
            }
        })
    }

    async fn run(&mut self, action: Action, event: &InputEvent) -> Flow {
        match action {
            Action::SuppressDisabledClick => {
                if let Some(button) = self.target_button(event) {
                    let disabled = {
                        let page = self.page.lock().unwrap();
                        is_disabled(&*page, button)
                    };
                    if disabled {
                        return Flow::Consumed;
                    }
                }
                Flow::Continue
            },
            Action::PressStart => {
                if let Some(button) = self.target_button(event) {
                    let disabled = {
                        let page = self.page.lock().unwrap();
                        is_disabled(&*page, button)
                    };
                    if !disabled && self.kinds.get(&button) == Some(&ButtonKind::Momentary) {
                        self.step(button, ButtonEvent::PressStart).await;
                    }
                }
                Flow::Continue
            },
            Action::PressEnd => {
                if let Some(button) = self.target_button(event) {
                    if self.kinds.get(&button) == Some(&ButtonKind::Momentary) {
                        self.step(button, ButtonEvent::PressEnd).await;
                    }
                }
                Flow::Continue
            },
            Action::ToggleActivate => {
                if let Some(button) = self.target_button(event) {
                    if self.kinds.get(&button) == Some(&ButtonKind::Toggle) {
                        self.step(button, ButtonEvent::Activate).await;
                    }
                }
                Flow::Continue
            },
            Action::KeyInput => {
                if let InputEvent::Key { key } = event {
                    self.handle_key(*key).await;
                }
                Flow::Continue
            },
            Action::RestyleOnResize => {
                if self.resize_gate.try_pass() {
                    apply_dynamic_styles(&self.page, &*self.scheduler, &mut self.geometry)
                        .await;
                }
                Flow::Continue
            },
        }
    }

    async fn handle_key(&mut self, key: Key) {
        match key {
            Key::Space | Key::Enter => {
                let Some(button) = self.focus.focused() else {
                    return;
                };
                let disabled = {
                    let page = self.page.lock().unwrap();
                    is_disabled(&*page, button)
                };
                if !disabled {
                    self.step(button, ButtonEvent::KeyActivate).await;
                }
            },
            Key::ArrowLeft
            | Key::ArrowRight
            | Key::ArrowUp
            | Key::ArrowDown
            | Key::Home
            | Key::End => {
                let page = self.page.lock().unwrap();
                self.focus.navigate(&*page, key);
            },
        }
    }

    /// Run the pure transition for `button` and apply its effects.
    async fn step(&mut self, button: NodeId, event: ButtonEvent) {
        let Some(kind) = self.kinds.get(&button).copied() else {
            return;
        };
        let Some(state) = self.states.get(&button).copied() else {
            return;
        };

        let (next, effects) = transition(kind, state, event);
        self.states.insert(button, next);
        for effect in effects {
            self.apply_effect(button, effect).await;
        }
    }

    async fn apply_effect(&mut self, button: NodeId, effect: Effect) {
        match effect {
            Effect::AddPressedClass
            | Effect::RemovePressedClass
            | Effect::SetAriaPressed(_)
            | Effect::ScheduleUpdate => self.apply_page_effect(button, effect),
            Effect::SynthesizeClick => {
                self.dispatch(InputEvent::Click {
                    node: button,
                    synthetic: true,
                })
                .await;
            },
            Effect::PressAndRelease => {
                // Visible press-and-release for keyboard activation.
                self.scheduler.delay(KEY_PRESS_VISUAL).await;
                if let (Some(kind), Some(state)) = (
                    self.kinds.get(&button).copied(),
                    self.states.get(&button).copied(),
                ) {
                    let (next, effects) = transition(kind, state, ButtonEvent::PressEnd);
                    self.states.insert(button, next);
                    for effect in effects {
                        self.apply_page_effect(button, effect);
                    }
                }
                self.dispatch(InputEvent::Click {
                    node: button,
                    synthetic: true,
                })
                .await;
            },
        }
    }

    /// Effects that only write to the page, never recurse into dispatch.
    fn apply_page_effect(&mut self, button: NodeId, effect: Effect) {
        match effect {
            Effect::AddPressedClass => {
                let mut page = self.page.lock().unwrap();
                page.add_class(button, vocab::PRESSED);
            },
            Effect::RemovePressedClass => {
                let mut page = self.page.lock().unwrap();
                page.remove_class(button, vocab::PRESSED);
            },
            Effect::SetAriaPressed(pressed) => {
                let mut page = self.page.lock().unwrap();
                page.set_attr(
                    button,
                    vocab::ARIA_PRESSED,
                    if pressed { "true" } else { "false" },
                );
            },
            Effect::ScheduleUpdate => {
                // Fire-and-forget; each trigger settles and updates
                // independently.
                let _ = schedule_update(self.page.clone(), self.scheduler.clone());
            },
            Effect::SynthesizeClick | Effect::PressAndRelease => {
                unreachable!("dispatch-recursing effects are handled by apply_effect")
            },
        }
    }

    fn target_button(&self, event: &InputEvent) -> Option<NodeId> {
        let node = event.target()?;
        let page = self.page.lock().unwrap();
        page.closest_with_class(node, vocab::BUTTON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showkit_core::{MemoryPage, NullScheduler, Page};
    use std::sync::Mutex;

    struct Fixture {
        session: Session,
        momentary: NodeId,
        toggle: NodeId,
        disabled: NodeId,
    }

    fn fixture() -> Fixture {
        let mut page = MemoryPage::new();
        let root = page.root();
        let showcase = page.add_element(root, "section", &[vocab::SHOWCASE]);

        let momentary = page.add_element(showcase, "button", &[vocab::BUTTON]);
        let toggle = page.add_element(showcase, "button", &[vocab::BUTTON, vocab::TOGGLE]);
        let disabled = page.add_element(
            showcase,
            "button",
            &[vocab::BUTTON, vocab::TOGGLE, vocab::DISABLED],
        );

        let shared: SharedPage = Arc::new(Mutex::new(page));
        let mut session = Session::new(shared, Arc::new(NullScheduler));
        session.bind();
        Fixture {
            session,
            momentary,
            toggle,
            disabled,
        }
    }

    fn has_pressed(session: &Session, button: NodeId) -> bool {
        let page = session.page.lock().unwrap();
        page.has_class(button, vocab::PRESSED)
    }

    fn aria_pressed(session: &Session, button: NodeId) -> Option<String> {
        let page = session.page.lock().unwrap();
        page.attr(button, vocab::ARIA_PRESSED)
    }

    #[tokio::test]
    async fn test_pointer_press_and_release() {
        let mut f = fixture();
        f.session
            .dispatch(InputEvent::PointerDown { node: f.momentary })
            .await;
        assert_eq!(f.session.state_of(f.momentary), Some(ButtonState::Pressed));
        assert!(has_pressed(&f.session, f.momentary));

        f.session
            .dispatch(InputEvent::PointerUp { node: f.momentary })
            .await;
        assert_eq!(f.session.state_of(f.momentary), Some(ButtonState::Idle));
        assert!(!has_pressed(&f.session, f.momentary));
    }

    #[tokio::test]
    async fn test_pointer_leave_cancels_press() {
        let mut f = fixture();
        f.session
            .dispatch(InputEvent::TouchStart { node: f.momentary })
            .await;
        f.session
            .dispatch(InputEvent::PointerLeave { node: f.momentary })
            .await;
        assert_eq!(f.session.state_of(f.momentary), Some(ButtonState::Idle));
    }

    #[tokio::test]
    async fn test_click_toggles_and_enter_toggles_back() {
        let mut f = fixture();
        assert_eq!(f.session.state_of(f.toggle), Some(ButtonState::ToggledOff));

        f.session
            .dispatch(InputEvent::Click {
                node: f.toggle,
                synthetic: false,
            })
            .await;
        assert_eq!(f.session.state_of(f.toggle), Some(ButtonState::ToggledOn));
        assert!(has_pressed(&f.session, f.toggle));
        assert_eq!(aria_pressed(&f.session, f.toggle).unwrap(), "true");

        // Keyboard Enter on the focused toggle synthesizes a click; the
        // click/Enter pair is idempotent.
        f.session.set_focused(Some(f.toggle));
        f.session.dispatch(InputEvent::Key { key: Key::Enter }).await;
        assert_eq!(f.session.state_of(f.toggle), Some(ButtonState::ToggledOff));
        assert!(!has_pressed(&f.session, f.toggle));
        assert_eq!(aria_pressed(&f.session, f.toggle).unwrap(), "false");
    }

    #[tokio::test]
    async fn test_disabled_momentary_ignores_press() {
        let mut f = fixture();
        {
            let mut page = f.session.page.lock().unwrap();
            page.add_class(f.momentary, vocab::DISABLED);
        }
        f.session
            .dispatch(InputEvent::PointerDown { node: f.momentary })
            .await;
        assert_eq!(f.session.state_of(f.momentary), Some(ButtonState::Idle));
        assert!(!has_pressed(&f.session, f.momentary));
    }

    #[tokio::test]
    async fn test_disabled_click_is_fully_suppressed() {
        let mut f = fixture();
        f.session
            .dispatch(InputEvent::Click {
                node: f.disabled,
                synthetic: false,
            })
            .await;
        assert_eq!(f.session.state_of(f.disabled), Some(ButtonState::ToggledOff));
        assert!(!has_pressed(&f.session, f.disabled));
        assert_eq!(aria_pressed(&f.session, f.disabled), None);
    }

    #[tokio::test]
    async fn test_keyboard_activates_momentary_with_press_and_release() {
        let mut f = fixture();
        f.session.set_focused(Some(f.momentary));
        f.session.dispatch(InputEvent::Key { key: Key::Space }).await;
        // After the press visual elapses the button is released again.
        assert_eq!(f.session.state_of(f.momentary), Some(ButtonState::Idle));
        assert!(!has_pressed(&f.session, f.momentary));
    }

    #[tokio::test]
    async fn test_arrow_keys_move_focus() {
        let mut f = fixture();
        f.session
            .dispatch(InputEvent::Key {
                key: Key::ArrowRight,
            })
            .await;
        assert_eq!(f.session.focused(), Some(f.momentary));
        f.session
            .dispatch(InputEvent::Key {
                key: Key::ArrowRight,
            })
            .await;
        assert_eq!(f.session.focused(), Some(f.toggle));
    }

    #[tokio::test]
    async fn test_resize_restyles_behind_frame_gate() {
        let mut f = fixture();
        f.session.dispatch(InputEvent::Resize).await;
        let first = {
            let page = f.session.page.lock().unwrap();
            page.style_var(f.momentary, vocab::MIN_SIDE)
        };
        assert!(first.is_some());
    }
}
