use std::sync::{Arc, Mutex};

use showkit_buttons::{ButtonState, ShowcaseApp};
use showkit_core::page::vocab;
use showkit_core::{InputEvent, Key, MemoryPage, NodeId, NullScheduler, Page, SharedPage};
use showkit_icons::{IconCatalog, IconEngine, StaticTransport};

struct Showcase {
    app: ShowcaseApp,
    page: SharedPage,
    typed: Arc<Mutex<MemoryPage>>,
    buttons: Vec<NodeId>,
    labels: Vec<NodeId>,
    icons: Vec<NodeId>,
}

/// Two showcases of five buttons each. The first button of showcase A is a
/// toggle, the last button of showcase B is disabled; every button carries
/// a label and a play icon target.
fn build_showcase() -> Showcase {
    let mut page = MemoryPage::new();
    let root = page.root();
    let mut buttons = Vec::new();
    let mut labels = Vec::new();
    let mut icons = Vec::new();

    for group in 0..2 {
        let showcase = page.add_element(root, "section", &[vocab::SHOWCASE]);
        for slot in 0..5 {
            let classes: &[&str] = match (group, slot) {
                (0, 0) => &[vocab::BUTTON, vocab::TOGGLE],
                (1, 4) => &[vocab::BUTTON, vocab::DISABLED],
                _ => &[vocab::BUTTON],
            };
            let button = page.add_element(showcase, "button", classes);
            page.set_measured_size(button, 120.0, 48.0);
            page.set_background(button, "#000000");

            let label = page.add_element(button, "span", &[vocab::LABEL]);
            page.set_text(label, "Play");
            page.set_text_color(label, "#ffffff");

            let icon = page.add_element(button, "span", &[vocab::ICON]);
            page.set_attr(icon, vocab::DATA_ICON, "play");

            buttons.push(button);
            labels.push(label);
            icons.push(icon);
        }
    }

    let typed = Arc::new(Mutex::new(page));
    let shared: SharedPage = typed.clone();
    let transport = StaticTransport::new()
        .with_asset("icons/play.svg", r##"<svg fill="#ff0000"/>"##)
        .with_asset("icons/fallback.svg", "<svg/>");
    let icons_engine = IconEngine::new(IconCatalog::default(), Arc::new(transport));
    let app = ShowcaseApp::new(shared.clone(), Arc::new(NullScheduler), icons_engine);

    Showcase {
        app,
        page: shared,
        typed,
        buttons,
        labels,
        icons,
    }
}

#[tokio::test]
async fn test_initialize_injects_normalized_icons() {
    let mut s = build_showcase();
    s.app.initialize().await.unwrap();

    let page = s.page.lock().unwrap();
    for icon in &s.icons {
        assert_eq!(
            page.inner_markup(*icon).unwrap(),
            r##"<svg fill="currentColor"/>"##
        );
    }
}

#[tokio::test]
async fn test_initialize_prepares_toggle_and_styles_and_labels() {
    let mut s = build_showcase();
    s.app.initialize().await.unwrap();

    let page = s.page.lock().unwrap();
    let toggle = s.buttons[0];
    assert_eq!(page.attr(toggle, vocab::DATA_IS_TOGGLE).unwrap(), "true");
    assert_eq!(page.attr(toggle, vocab::ARIA_PRESSED).unwrap(), "false");

    for button in &s.buttons {
        assert_eq!(page.style_var(*button, vocab::MIN_SIDE).unwrap(), "48px");
    }
    // White on black: maximum contrast.
    for label in &s.labels {
        assert_eq!(page.text(*label).unwrap(), "Play\n21.00");
    }
}

#[tokio::test]
async fn test_toggle_click_then_enter_is_idempotent() {
    let mut s = build_showcase();
    s.app.initialize().await.unwrap();
    let toggle = s.buttons[0];

    s.app
        .handle_event(InputEvent::Click {
            node: toggle,
            synthetic: false,
        })
        .await;
    assert_eq!(
        s.app.session().state_of(toggle),
        Some(ButtonState::ToggledOn)
    );

    s.app.session_mut().set_focused(Some(toggle));
    s.app.handle_event(InputEvent::Key { key: Key::Enter }).await;
    assert_eq!(
        s.app.session().state_of(toggle),
        Some(ButtonState::ToggledOff)
    );

    let page = s.page.lock().unwrap();
    assert!(!page.has_class(toggle, vocab::PRESSED));
    assert_eq!(page.attr(toggle, vocab::ARIA_PRESSED).unwrap(), "false");
}

#[tokio::test]
async fn test_arrow_down_crosses_into_other_showcase() {
    let mut s = build_showcase();
    s.app.initialize().await.unwrap();

    // Focus the 3rd button of showcase A, then navigate down.
    s.app.session_mut().set_focused(Some(s.buttons[2]));
    s.app
        .handle_event(InputEvent::Key {
            key: Key::ArrowDown,
        })
        .await;

    let landed = s.app.session().focused().unwrap();
    assert!(s.buttons[5..].contains(&landed));
}

#[tokio::test]
async fn test_disabled_button_click_changes_nothing() {
    let mut s = build_showcase();
    s.app.initialize().await.unwrap();
    let disabled = s.buttons[9];

    s.app
        .handle_event(InputEvent::Click {
            node: disabled,
            synthetic: false,
        })
        .await;

    let page = s.page.lock().unwrap();
    assert!(!page.has_class(disabled, vocab::PRESSED));
    assert_eq!(page.attr(disabled, vocab::ARIA_PRESSED), None);
}

#[tokio::test]
async fn test_startup_injection_leaves_pressed_toggle_unpressed_slot_alone() {
    let mut page = MemoryPage::new();
    let root = page.root();
    let showcase = page.add_element(root, "section", &[vocab::SHOWCASE]);

    // A toggle that starts out pressed, with both icon slots already in
    // the markup; styling owns the unpressed slot while pressed.
    let toggle = page.add_element(
        showcase,
        "button",
        &[vocab::BUTTON, vocab::TOGGLE, vocab::PRESSED],
    );
    page.set_measured_size(toggle, 120.0, 48.0);
    let pressed_slot = page.add_element(toggle, "span", &[vocab::PRESSED_ICON]);
    page.set_attr(pressed_slot, vocab::DATA_ICON, "pause");
    let icon = page.add_element(toggle, "span", &[vocab::ICON]);
    page.set_attr(icon, vocab::DATA_ICON, "play");

    let shared: SharedPage = Arc::new(Mutex::new(page));
    let transport = StaticTransport::new()
        .with_asset("icons/play.svg", "<svg>play</svg>")
        .with_asset("icons/pause.svg", "<svg>pause</svg>")
        .with_asset("icons/fallback.svg", "<svg/>");
    let engine = IconEngine::new(IconCatalog::default(), Arc::new(transport));
    let mut app = ShowcaseApp::new(shared.clone(), Arc::new(NullScheduler), engine);
    app.initialize().await.unwrap();

    let page = shared.lock().unwrap();
    assert_eq!(page.inner_markup(icon), None);
    assert_eq!(page.inner_markup(pressed_slot).unwrap(), "<svg>pause</svg>");
}

#[tokio::test]
async fn test_root_theme_change_refreshes_labels() {
    let mut s = build_showcase();
    s.app.initialize().await.unwrap();
    let button = s.buttons[3];
    let label = s.labels[3];

    // Theme swap: colors change silently, then the root theme attribute
    // flips, which is what the update manager watches.
    {
        let mut page = s.typed.lock().unwrap();
        page.set_background(button, "#ffffff");
        let root = page.root();
        page.set_attr(root, "data-theme", "light");
    }

    for _ in 0..50 {
        tokio::task::yield_now().await;
        let page = s.page.lock().unwrap();
        if page.text(label).as_deref() == Some("Play\n1.00") {
            return;
        }
    }
    let page = s.page.lock().unwrap();
    assert_eq!(page.text(label).unwrap(), "Play\n1.00");
}

#[tokio::test]
async fn test_mutation_observer_refreshes_labels() {
    let mut s = build_showcase();
    s.app.initialize().await.unwrap();
    let button = s.buttons[1];
    let label = s.labels[1];

    // Change the theme under the button, then poke its class list the way
    // a styling pass would; the observer schedules a fresh label pass.
    {
        let mut page = s.typed.lock().unwrap();
        page.set_background(button, "#ffffff");
        page.add_class(button, "accent");
    }

    // The watcher and update tasks run on the same runtime; yield until
    // the label settles.
    for _ in 0..50 {
        tokio::task::yield_now().await;
        let page = s.page.lock().unwrap();
        if page.text(label).as_deref() == Some("Play\n1.00") {
            return;
        }
    }
    let page = s.page.lock().unwrap();
    assert_eq!(page.text(label).unwrap(), "Play\n1.00");
}
