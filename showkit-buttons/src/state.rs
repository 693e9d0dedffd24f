//! The explicit per-button state machine.
//!
//! Page classes and attributes are projections of this state, never the
//! state itself: a pure transition function maps (state, event) to the next
//! state plus the side effects a thin adapter applies to the page.

use crate::scan::ButtonKind;

/// The interaction state of one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Inactive.
    Idle,
    /// Momentary button held down.
    Pressed,
    /// Toggle button latched on.
    ToggledOn,
    /// Toggle button latched off.
    ToggledOff,
}

impl ButtonState {
    /// Initial state for a button of `kind`, seeded from its pressed class.
    pub fn initial(kind: ButtonKind, pressed: bool) -> Self {
        match (kind, pressed) {
            (ButtonKind::Toggle, true) => Self::ToggledOn,
            (ButtonKind::Toggle, false) => Self::ToggledOff,
            (ButtonKind::Momentary, _) => Self::Idle,
        }
    }
}

/// State-affecting events, already filtered down from raw input.
///
/// Disabled buttons never reach the transition function; their clicks are
/// suppressed at the capture stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Pointer or touch went down on the button.
    PressStart,
    /// Pointer or touch released, left, or was cancelled.
    PressEnd,
    /// The button was clicked (real or synthesized).
    Activate,
    /// Space/Enter was pressed while the button held focus.
    KeyActivate,
}

/// Side effects the adapter applies after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Add the pressed class.
    AddPressedClass,
    /// Remove the pressed class.
    RemovePressedClass,
    /// Write `aria-pressed`.
    SetAriaPressed(bool),
    /// Dispatch a synthetic click back at the button.
    SynthesizeClick,
    /// Hold the pressed visual briefly, then release and synthesize a
    /// click (keyboard activation of a momentary button).
    PressAndRelease,
    /// Trigger a contrast-label update pass.
    ScheduleUpdate,
}

/// Pure transition function of the button state machine.
pub fn transition(
    kind: ButtonKind,
    state: ButtonState,
    event: ButtonEvent,
) -> (ButtonState, Vec<Effect>) {
    match kind {
        ButtonKind::Momentary => match (state, event) {
            (ButtonState::Idle, ButtonEvent::PressStart) => {
                (ButtonState::Pressed, vec![Effect::AddPressedClass])
            },
            (ButtonState::Pressed, ButtonEvent::PressEnd) => (
                ButtonState::Idle,
                vec![Effect::RemovePressedClass, Effect::ScheduleUpdate],
            ),
            (_, ButtonEvent::KeyActivate) => (
                ButtonState::Pressed,
                vec![Effect::AddPressedClass, Effect::PressAndRelease],
            ),
            // A momentary click carries no latched state.
            (state, _) => (state, vec![]),
        },
        ButtonKind::Toggle => match (state, event) {
            (ButtonState::ToggledOff, ButtonEvent::Activate) => (
                ButtonState::ToggledOn,
                vec![
                    Effect::AddPressedClass,
                    Effect::SetAriaPressed(true),
                    Effect::ScheduleUpdate,
                ],
            ),
            (ButtonState::ToggledOn, ButtonEvent::Activate) => (
                ButtonState::ToggledOff,
                vec![
                    Effect::RemovePressedClass,
                    Effect::SetAriaPressed(false),
                    Effect::ScheduleUpdate,
                ],
            ),
            // Keyboard activation of a toggle is just a click.
            (state, ButtonEvent::KeyActivate) => (state, vec![Effect::SynthesizeClick]),
            // Toggles have no transient pressed visual.
            (state, _) => (state, vec![]),
        },
    }
}
