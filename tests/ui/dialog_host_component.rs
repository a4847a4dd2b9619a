use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::{char_key, key};
use crossterm::event::KeyCode;
use kronos_dashboard::dialog::{DetailBody, DialogBus, DialogRequest, Subscription};
use kronos_dashboard::model::form_field::names;
use kronos_dashboard::ui::components::{DialogHostComponent, ScheduleForm};
use kronos_dashboard::ui::core::Component;
use ratatui::{backend::TestBackend, Terminal};

struct Counters {
    confirms: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    _subscriptions: Vec<Subscription>,
}

fn count(bus: &DialogBus) -> Counters {
    let confirms = Arc::new(AtomicUsize::new(0));
    let closes = Arc::new(AtomicUsize::new(0));
    let (c, d) = (confirms.clone(), closes.clone());
    Counters {
        _subscriptions: vec![
            bus.confirm.subscribe(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            }),
            bus.close.subscribe(move |_| {
                d.fetch_add(1, Ordering::SeqCst);
            }),
        ],
        confirms,
        closes,
    }
}

fn mounted() -> (DialogBus, DialogHostComponent, Counters) {
    let bus = DialogBus::new();
    let counters = count(&bus);
    let component = DialogHostComponent::new(bus.clone(), Duration::from_millis(1000));
    (bus, component, counters)
}

fn screen(component: &mut DialogHostComponent) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|f| component.render(f, f.area())).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_keys_ignored_while_hidden() {
    let (_bus, mut component, counters) = mounted();

    component.handle_key_events(key(KeyCode::Enter));
    component.handle_key_events(key(KeyCode::Esc));

    assert_eq!(counters.confirms.load(Ordering::SeqCst), 0);
    assert_eq!(counters.closes.load(Ordering::SeqCst), 0);
}

#[test]
fn test_enter_confirms_once() {
    let (bus, mut component, counters) = mounted();
    bus.open.publish(&DialogRequest::text("Delete schedule", "Sure?"));

    component.handle_key_events(key(KeyCode::Enter));
    assert_eq!(counters.confirms.load(Ordering::SeqCst), 1);
    assert!(component.host().session().unwrap().is_confirmed());

    // Swallowed while the action runs
    component.handle_key_events(key(KeyCode::Enter));
    component.handle_key_events(key(KeyCode::Esc));
    assert_eq!(counters.confirms.load(Ordering::SeqCst), 1);
    assert_eq!(counters.closes.load(Ordering::SeqCst), 0);
    assert!(component.is_visible());
}

#[test]
fn test_footer_shortcuts() {
    let (bus, mut component, counters) = mounted();

    bus.open.publish(&DialogRequest::text("Delete schedule", "Sure?"));
    component.handle_key_events(char_key('n'));
    assert_eq!(counters.closes.load(Ordering::SeqCst), 1);
    assert!(!component.is_visible());

    bus.open.publish(&DialogRequest::text("Delete schedule", "Sure?"));
    component.handle_key_events(char_key('y'));
    assert_eq!(counters.confirms.load(Ordering::SeqCst), 1);
}

#[test]
fn test_without_footer_only_closes() {
    let (bus, mut component, counters) = mounted();
    let request = DialogRequest::new("Backup", DetailBody::new().row("ID", "42")).without_footer();
    bus.open.publish(&request);

    component.handle_key_events(key(KeyCode::Enter));
    component.handle_key_events(char_key('y'));
    assert_eq!(counters.confirms.load(Ordering::SeqCst), 0);
    assert!(component.is_visible());

    component.handle_key_events(key(KeyCode::Esc));
    assert_eq!(counters.closes.load(Ordering::SeqCst), 1);
    assert!(!component.is_visible());
}

#[test]
fn test_invalid_form_stays_open() {
    let (bus, mut component, counters) = mounted();
    let form = Arc::new(ScheduleForm::new());
    bus.open.publish(&DialogRequest::with_content("Add new schedule", form.clone()));

    component.handle_key_events(key(KeyCode::Enter));

    assert_eq!(counters.confirms.load(Ordering::SeqCst), 0);
    assert!(component.is_visible());
    assert!(form.error().is_some());
    assert!(screen(&mut component).contains("Title is required"));
}

#[test]
fn test_form_receives_typed_keys() {
    let (bus, mut component, counters) = mounted();
    let form = Arc::new(ScheduleForm::new());
    bus.open.publish(&DialogRequest::with_content("Add new schedule", form.clone()));

    // 'y' and 'n' are text here, not footer shortcuts
    for c in "yn".chars() {
        component.handle_key_events(char_key(c));
    }

    assert_eq!(form.value(names::TITLE), "yn");
    assert_eq!(counters.confirms.load(Ordering::SeqCst), 0);
    assert_eq!(counters.closes.load(Ordering::SeqCst), 0);
}

#[test]
fn test_render() {
    let (bus, mut component, _counters) = mounted();
    assert!(!screen(&mut component).contains("Delete schedule"));

    bus.open.publish(&DialogRequest::text("Delete schedule", "Do you really want to delete this schedule?"));
    let text = screen(&mut component);
    assert!(text.contains("Delete schedule"));
    assert!(text.contains("Confirm"));

    component.handle_key_events(key(KeyCode::Enter));
    assert!(screen(&mut component).contains("Working"));
}
