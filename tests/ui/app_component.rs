use std::sync::Arc;

use crate::common::{schedule, MockScheduleApi};
use crate::{char_key, key, settle};
use crossterm::event::KeyCode;
use kronos_dashboard::config::Config;
use kronos_dashboard::constants::{ERROR_NO_SELECTION, SUCCESS_SCHEDULE_CREATED, SUCCESS_SCHEDULE_DELETED};
use kronos_dashboard::logger::Logger;
use kronos_dashboard::model::form_field::names;
use kronos_dashboard::ui::app_component::{AppComponent, AppState};
use kronos_dashboard::ui::components::StatusBar;
use kronos_dashboard::ui::core::{Component, EventType};
use ratatui::{backend::TestBackend, style::Color, Terminal};

async fn loaded_app(mock: Arc<MockScheduleApi>) -> AppComponent {
    let mut app = AppComponent::new(mock, Config::default(), Logger::new());
    app.handle_app_action(kronos_dashboard::ui::core::Action::RefreshSchedules);
    assert!(app.state().loading);
    settle().await;
    assert!(app.process_background_actions());
    app
}

async fn press(app: &mut AppComponent, code: KeyCode) {
    app.handle_event(EventType::Key(key(code)));
    settle().await;
    app.process_background_actions();
}

fn two_schedules() -> Arc<MockScheduleApi> {
    Arc::new(MockScheduleApi::with_schedules(vec![schedule("a", "Alpha"), schedule("b", "Beta")]))
}

#[test]
fn test_app_state_default() {
    let state = AppState::default();
    assert!(!state.loading, "Default AppState should not be loading");
    assert!(state.error_message.is_none(), "Default AppState should have no error message");
    assert!(state.last_refresh.is_none());
}

#[test]
fn test_status_bar_priority() {
    let mut state = AppState {
        info_message: Some("done".to_string()),
        ..Default::default()
    };
    assert_eq!(StatusBar::content(&state), ("done".to_string(), Color::Green));

    state.loading = true;
    assert_eq!(StatusBar::content(&state).1, Color::Yellow);

    state.error_message = Some("boom".to_string());
    assert_eq!(StatusBar::content(&state), ("boom".to_string(), Color::Red));

    state.clear_messages();
    state.loading = false;
    assert_eq!(StatusBar::content(&state).1, Color::Gray);
}

#[tokio::test]
async fn test_initial_load() {
    let mock = two_schedules();
    let app = loaded_app(mock.clone()).await;

    assert!(!app.state().loading);
    assert!(app.state().last_refresh.is_some());
    assert_eq!(app.schedules().len(), 2);
    assert_eq!(mock.calls(), vec!["list"]);
}

#[tokio::test]
async fn test_delete_confirmed() {
    let mock = two_schedules();
    let mut app = loaded_app(mock.clone()).await;

    press(&mut app, KeyCode::Char('d')).await;
    let session = app.dialog_host().session().unwrap();
    assert!(app.dialog_host().is_visible());
    assert_eq!(session.title(), "Delete schedule");

    press(&mut app, KeyCode::Enter).await;
    assert!(!app.dialog_host().is_visible());
    assert_eq!(app.state().info_message.as_deref(), Some(SUCCESS_SCHEDULE_DELETED));

    // The flow asked for a refresh; let it land
    settle().await;
    app.process_background_actions();
    assert_eq!(mock.calls(), vec!["list", "delete a", "list"]);
    assert_eq!(app.schedules().len(), 1);
    assert_eq!(app.schedules()[0].id, "b");
}

#[tokio::test]
async fn test_keys_buffered_behind_delete_go_to_dialog() {
    let mock = two_schedules();
    let mut app = loaded_app(mock.clone()).await;

    // Delivered in one burst, before any background task gets to run
    app.handle_event(EventType::Key(char_key('d')));
    app.handle_event(EventType::Key(char_key('j')));
    app.handle_event(EventType::Key(char_key('d')));
    settle().await;
    app.process_background_actions();

    let session = app.dialog_host().session().unwrap();
    assert!(session.content().lines()[0].to_string().contains("this schedule"));
    assert_eq!(app.schedule_list().selected_index, 0);

    press(&mut app, KeyCode::Enter).await;
    settle().await;
    app.process_background_actions();

    assert_eq!(mock.calls(), vec!["list", "delete a", "list"]);
    assert_eq!(app.schedules().len(), 1);
    assert_eq!(app.schedules()[0].id, "b");
}

#[tokio::test]
async fn test_delete_canceled() {
    let mock = two_schedules();
    let mut app = loaded_app(mock.clone()).await;

    press(&mut app, KeyCode::Char('d')).await;
    press(&mut app, KeyCode::Esc).await;

    assert!(!app.dialog_host().is_visible());
    assert!(app.state().info_message.is_none());
    assert!(app.state().error_message.is_none());
    assert_eq!(mock.calls(), vec!["list"]);
    assert_eq!(app.schedules().len(), 2);
}

#[tokio::test]
async fn test_delete_selection_stops_at_failure() {
    let mock = two_schedules();
    mock.fail_on("a");
    let mut app = loaded_app(mock.clone()).await;

    press(&mut app, KeyCode::Char('*')).await;
    press(&mut app, KeyCode::Char('d')).await;
    assert!(app.dialog_host().session().unwrap().content().lines()[0]
        .to_string()
        .contains("these schedules"));

    press(&mut app, KeyCode::Enter).await;
    settle().await;
    app.process_background_actions();

    let error = app.state().error_message.clone().unwrap();
    assert!(error.contains("deleting schedule a"), "{}", error);
    assert!(!mock.calls().contains(&"delete b".to_string()));
    // Selection survives a failed delete
    assert_eq!(app.schedule_list().selected_ids.len(), 2);
}

#[tokio::test]
async fn test_delete_without_schedules() {
    let mock = Arc::new(MockScheduleApi::default());
    let mut app = loaded_app(mock).await;

    press(&mut app, KeyCode::Char('d')).await;

    assert!(!app.dialog_host().is_visible());
    assert_eq!(app.state().info_message.as_deref(), Some(ERROR_NO_SELECTION));
}

#[tokio::test]
async fn test_create_flow() {
    let mock = two_schedules();
    let mut app = loaded_app(mock.clone()).await;

    press(&mut app, KeyCode::Char('n')).await;
    assert_eq!(app.dialog_host().session().unwrap().title(), "Add new schedule");

    // Empty form: the dialog stays open
    press(&mut app, KeyCode::Enter).await;
    assert!(app.dialog_host().is_visible());
    assert!(app.create_form().error().is_some());

    for c in "Report".chars() {
        press(&mut app, KeyCode::Char(c)).await;
    }
    let form = app.create_form().clone();
    form.set_value(names::URL, "https://hooks.example.com/report");
    form.set_value(names::EMAIL, "ops@example.com");
    form.set_value(names::RUN_AT, "2030-06-01T08:00");

    press(&mut app, KeyCode::Enter).await;
    settle().await;
    app.process_background_actions();

    assert!(!app.dialog_host().is_visible());
    assert_eq!(app.state().info_message.as_deref(), Some(SUCCESS_SCHEDULE_CREATED));
    assert!(mock.calls().contains(&"create Report".to_string()));
    assert_eq!(app.schedules().len(), 3);
}

#[tokio::test]
async fn test_detail_is_read_only() {
    let mock = two_schedules();
    let mut app = loaded_app(mock.clone()).await;

    press(&mut app, KeyCode::Char('j')).await;
    press(&mut app, KeyCode::Enter).await;

    let session = app.dialog_host().session().unwrap();
    assert_eq!(session.title(), "Beta");
    assert!(session.hide_footer_buttons());

    press(&mut app, KeyCode::Char('y')).await;
    assert!(app.dialog_host().is_visible());

    press(&mut app, KeyCode::Esc).await;
    assert!(!app.dialog_host().is_visible());
    assert_eq!(mock.calls(), vec!["list"]);
}

#[tokio::test]
async fn test_operation_reports_and_refreshes() {
    let mock = two_schedules();
    let mut app = loaded_app(mock.clone()).await;

    press(&mut app, KeyCode::Char('p')).await;

    assert_eq!(
        app.state().info_message.as_deref(),
        Some("✅ Pause applied to 1 schedule(s)")
    );
    settle().await;
    app.process_background_actions();
    assert_eq!(mock.calls(), vec!["list", "pause a", "list"]);
}

#[tokio::test]
async fn test_logs_overlay_takes_keys() {
    let mock = two_schedules();
    let mut app = loaded_app(mock).await;

    press(&mut app, KeyCode::Char('G')).await;
    assert!(app.logs_visible());

    // 'q' closes the overlay instead of quitting
    press(&mut app, KeyCode::Char('q')).await;
    assert!(!app.logs_visible());
    assert!(!app.should_quit());

    press(&mut app, KeyCode::Char('q')).await;
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_quit_ignored_while_dialog_open() {
    let mock = two_schedules();
    let mut app = loaded_app(mock).await;

    press(&mut app, KeyCode::Char('d')).await;
    // 'q' dismisses the dialog
    press(&mut app, KeyCode::Char('q')).await;

    assert!(!app.should_quit());
    assert!(!app.dialog_host().is_visible());
}

#[tokio::test]
async fn test_render_smoke() {
    let mock = two_schedules();
    let mut app = loaded_app(mock).await;
    press(&mut app, KeyCode::Char('d')).await;

    let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
    terminal.draw(|f| app.render(f, f.area())).unwrap();
    let text: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect();

    assert!(text.contains("Schedules (2)"));
    assert!(text.contains("Beta"));
    assert!(text.contains("Delete schedule"));
}

#[test]
fn test_char_key_helper() {
    assert_eq!(char_key('x').code, KeyCode::Char('x'));
}
