use crate::common::schedule;
use crate::{char_key, key};
use crossterm::event::KeyCode;
use kronos_dashboard::api::ScheduleOperation;
use kronos_dashboard::ui::components::ScheduleListComponent;
use kronos_dashboard::ui::core::{Action, Component};

fn list_with(ids: &[&str]) -> ScheduleListComponent {
    let mut list = ScheduleListComponent::default();
    list.update_data(ids.iter().map(|id| schedule(id, &id.to_uppercase())).collect());
    list
}

fn press(list: &mut ScheduleListComponent, c: char) -> Action {
    let action = list.handle_key_events(char_key(c));
    list.update(action)
}

#[test]
fn test_navigation_wraps() {
    let mut list = list_with(&["a", "b", "c"]);
    assert_eq!(list.current().unwrap().id, "a");

    press(&mut list, 'k');
    assert_eq!(list.current().unwrap().id, "c");

    press(&mut list, 'j');
    press(&mut list, 'j');
    assert_eq!(list.selected_index, 1);
}

#[test]
fn test_target_ids_prefer_selection() {
    let mut list = list_with(&["a", "b", "c"]);
    assert_eq!(list.target_ids(), vec!["a"]);

    press(&mut list, 'j');
    press(&mut list, ' ');
    press(&mut list, 'j');
    press(&mut list, ' ');
    assert_eq!(list.target_ids(), vec!["b", "c"]);

    // Unchecking the last selected row falls back to the cursor row
    press(&mut list, ' ');
    press(&mut list, 'k');
    press(&mut list, ' ');
    assert!(list.selected_ids.is_empty());
    assert_eq!(list.target_ids(), vec!["b"]);
}

#[test]
fn test_toggle_all() {
    let mut list = list_with(&["a", "b"]);

    press(&mut list, '*');
    assert_eq!(list.selected_ids.len(), 2);

    press(&mut list, '*');
    assert!(list.selected_ids.is_empty());
}

#[test]
fn test_update_data_prunes_selection_and_cursor() {
    let mut list = list_with(&["a", "b", "c"]);
    press(&mut list, '*');
    press(&mut list, 'k');
    assert_eq!(list.selected_index, 2);

    list.update_data(vec![schedule("a", "A")]);

    assert_eq!(list.selected_index, 0);
    assert_eq!(list.selected_ids.iter().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn test_dialog_actions() {
    let mut list = list_with(&["a", "b"]);

    assert!(matches!(list.handle_key_events(key(KeyCode::Enter)), Action::OpenDetail(id) if id == "a"));
    assert!(matches!(list.handle_key_events(char_key('i')), Action::OpenDetail(id) if id == "a"));
    assert!(matches!(list.handle_key_events(char_key('d')), Action::OpenDelete(ids) if ids == vec!["a"]));
    assert!(matches!(
        list.handle_key_events(key(KeyCode::Delete)),
        Action::OpenDelete(ids) if ids == vec!["a"]
    ));
}

#[test]
fn test_operation_keys() {
    let mut list = list_with(&["a", "b"]);
    press(&mut list, '*');

    match list.handle_key_events(char_key('p')) {
        Action::Operate { operation, ids } => {
            assert_eq!(operation, ScheduleOperation::Pause);
            assert_eq!(ids, vec!["a", "b"]);
        }
        other => panic!("unexpected action {:?}", other),
    }
    assert!(matches!(
        list.handle_key_events(char_key('u')),
        Action::Operate {
            operation: ScheduleOperation::Resume,
            ..
        }
    ));
    assert!(matches!(
        list.handle_key_events(char_key('t')),
        Action::Operate {
            operation: ScheduleOperation::Trigger,
            ..
        }
    ));
}

#[test]
fn test_empty_list() {
    let mut list = ScheduleListComponent::default();

    assert!(list.current().is_none());
    assert!(list.target_ids().is_empty());
    assert!(matches!(list.handle_key_events(key(KeyCode::Enter)), Action::None));
    assert!(matches!(list.handle_key_events(char_key('p')), Action::None));
    // Delete still asks, so the app can report the empty selection
    assert!(matches!(list.handle_key_events(char_key('d')), Action::OpenDelete(ids) if ids.is_empty()));
    press(&mut list, 'j');
    assert_eq!(list.selected_index, 0);
}
