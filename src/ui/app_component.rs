use std::sync::Arc;

use crate::api::ScheduleApi;
use crate::config::Config;
use crate::constants::{
    DELETE_MANY_TEXT, DELETE_ONE_TEXT, DIALOG_TITLE_CREATE, DIALOG_TITLE_DELETE, ERROR_CREATE_FAILED,
    ERROR_DELETE_FAILED, ERROR_LOAD_FAILED, ERROR_NO_SELECTION, SUCCESS_SCHEDULES_DELETED, SUCCESS_SCHEDULE_CREATED,
    SUCCESS_SCHEDULE_DELETED,
};
use crate::dialog::{DialogBus, DialogContent, DialogHost, DialogRequest, FlowOutcome, Subscription, TriggerCoordinator};
use crate::logger::Logger;
use crate::model::Schedule;
use crate::ui::components::{
    schedule_detail_body, DialogHostComponent, LogsDialog, ScheduleForm, ScheduleListComponent, StatusBar,
};
use crate::ui::core::{
    actions::{Action, FlowKind},
    event_handler::EventType,
    task_manager::TaskManager,
    Component,
};
use crate::ui::layout::LayoutManager;
use anyhow::Context;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use tokio::sync::mpsc;

/// Application state separate from UI concerns
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub loading: bool,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
    pub last_refresh: Option<DateTime<Local>>,
}

impl AppState {
    /// Clear any transient messages
    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.info_message = None;
    }
}

/// The dashboard: schedule table, shared dialog, logs overlay and status bar.
///
/// Owns the dialog bus and the single dialog host. Every confirm-then-act
/// flow goes through the coordinator and runs on the task manager.
pub struct AppComponent {
    // Component composition
    schedule_list: ScheduleListComponent,
    dialog: DialogHostComponent,
    logs: LogsDialog,

    // Application state
    state: AppState,

    // Services
    api: Arc<dyn ScheduleApi>,
    coordinator: TriggerCoordinator,
    create_form: Arc<ScheduleForm>,
    _form_reset: Subscription,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    config: Config,

    should_quit: bool,
}

impl AppComponent {
    pub fn new(api: Arc<dyn ScheduleApi>, config: Config, logger: Logger) -> Self {
        let bus = DialogBus::new();
        let dialog = DialogHostComponent::new(bus.clone(), config.dialog.clear_delay());
        let create_form = Arc::new(ScheduleForm::new());
        let form_reset = create_form.watch_reset(&bus, config.dialog.form_reset_delay());
        let (task_manager, background_action_rx) = TaskManager::new();

        Self {
            schedule_list: ScheduleListComponent::new(config.display.list_date_format.clone()),
            dialog,
            logs: LogsDialog::new(logger),
            state: AppState::default(),
            api,
            coordinator: TriggerCoordinator::new(bus),
            create_form,
            _form_reset: form_reset,
            task_manager,
            background_action_rx,
            config,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedule_list.schedules
    }

    pub fn schedule_list(&self) -> &ScheduleListComponent {
        &self.schedule_list
    }

    pub fn dialog_host(&self) -> &DialogHost {
        self.dialog.host()
    }

    pub fn create_form(&self) -> &Arc<ScheduleForm> {
        &self.create_form
    }

    pub fn logs_visible(&self) -> bool {
        self.logs.visible
    }

    /// Get the number of tracked background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Handle global keyboard shortcuts that aren't component-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('r') => Action::RefreshSchedules,
            KeyCode::Char('n') => Action::OpenCreate,
            KeyCode::Char('G') => Action::ShowLogs(true),
            _ => Action::None,
        }
    }

    /// Apply an action that reached the app level.
    pub fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                log::info!("quit requested");
                self.should_quit = true;
                Action::Quit
            }
            Action::RefreshSchedules => {
                self.refresh();
                Action::None
            }
            Action::SchedulesLoaded(schedules) => {
                log::debug!("loaded {} schedules", schedules.len());
                self.state.loading = false;
                self.state.last_refresh = Some(Local::now());
                self.schedule_list.update_data(schedules);
                Action::None
            }
            Action::LoadFailed(message) => {
                self.state.loading = false;
                self.state.error_message = Some(format!("{}: {}", ERROR_LOAD_FAILED, message));
                Action::None
            }
            Action::OpenCreate => {
                self.open_create();
                Action::None
            }
            Action::OpenDelete(ids) => {
                self.open_delete(ids);
                Action::None
            }
            Action::OpenDetail(id) => {
                self.open_detail(&id);
                Action::None
            }
            Action::Operate { operation, ids } => {
                log::info!("{} {} schedule(s)", operation.label(), ids.len());
                self.task_manager.spawn_operation(self.api.clone(), operation, ids);
                Action::None
            }
            Action::FlowFinished { kind, outcome } => {
                self.flow_finished(kind, outcome);
                Action::None
            }
            Action::OperationFinished {
                operation,
                succeeded,
                failed,
            } => {
                if let Some((id, error)) = failed.first() {
                    self.state.error_message = Some(format!(
                        "❌ {} failed for {} of {} schedule(s) ({}: {})",
                        operation.label(),
                        failed.len(),
                        succeeded + failed.len(),
                        id,
                        error
                    ));
                } else {
                    self.state.info_message =
                        Some(format!("✅ {} applied to {} schedule(s)", operation.label(), succeeded));
                }
                self.refresh();
                Action::None
            }
            other => other,
        }
    }

    fn refresh(&mut self) {
        if self.task_manager.is_loading() {
            log::debug!("refresh skipped, a load is already running");
            return;
        }
        self.state.loading = true;
        self.task_manager.spawn_load(self.api.clone());
    }

    fn open_create(&mut self) {
        let content: DialogContent = self.create_form.clone();
        let request = DialogRequest::with_content(DIALOG_TITLE_CREATE, content);
        let api = self.api.clone();
        let form = self.create_form.clone();

        self.task_manager.spawn_flow(
            self.coordinator.clone(),
            request,
            FlowKind::Create,
            move || async move {
                let schedule = form.to_new_schedule()?;
                let created = api.create_schedule(&schedule).await?;
                log::info!("created schedule {} ({})", created.id, created.title);
                anyhow::Ok(())
            },
            true,
        );
    }

    fn open_delete(&mut self, ids: Vec<String>) {
        if ids.is_empty() {
            self.state.info_message = Some(ERROR_NO_SELECTION.to_string());
            return;
        }

        let text = if ids.len() > 1 { DELETE_MANY_TEXT } else { DELETE_ONE_TEXT };
        let request = DialogRequest::text(DIALOG_TITLE_DELETE, text);
        let kind = FlowKind::Delete { count: ids.len() };
        let api = self.api.clone();

        self.task_manager.spawn_flow(
            self.coordinator.clone(),
            request,
            kind,
            move || async move {
                // One at a time; the first failure stops the rest
                for id in &ids {
                    api.delete_schedule(id)
                        .await
                        .with_context(|| format!("deleting schedule {}", id))?;
                    log::info!("deleted schedule {}", id);
                }
                anyhow::Ok(())
            },
            true,
        );
    }

    fn open_detail(&mut self, id: &str) {
        let Some(schedule) = self.schedule_list.schedules.iter().find(|s| s.id == id) else {
            log::warn!("detail requested for unknown schedule {}", id);
            return;
        };

        let body = schedule_detail_body(schedule, &self.config.display.date_format);
        let request = DialogRequest::new(schedule.title.clone(), body).without_footer();

        self.task_manager.spawn_flow(
            self.coordinator.clone(),
            request,
            FlowKind::Detail,
            || async { anyhow::Ok(()) },
            false,
        );
    }

    fn flow_finished(&mut self, kind: FlowKind, outcome: FlowOutcome) {
        match (kind, outcome) {
            (_, FlowOutcome::Canceled) => log::debug!("{:?} dialog canceled", kind),
            (FlowKind::Create, FlowOutcome::Completed) => {
                self.state.info_message = Some(SUCCESS_SCHEDULE_CREATED.to_string());
            }
            (FlowKind::Create, FlowOutcome::Failed(message)) => {
                self.state.error_message = Some(format!("{}: {}", ERROR_CREATE_FAILED, message));
            }
            (FlowKind::Delete { count }, FlowOutcome::Completed) => {
                let message = if count > 1 {
                    SUCCESS_SCHEDULES_DELETED
                } else {
                    SUCCESS_SCHEDULE_DELETED
                };
                self.state.info_message = Some(message.to_string());
                self.schedule_list.clear_selection();
            }
            (FlowKind::Delete { .. }, FlowOutcome::Failed(message)) => {
                self.state.error_message = Some(format!("{}: {}", ERROR_DELETE_FAILED, message));
                // Earlier ids may already be gone
                self.refresh();
            }
            (FlowKind::Detail, _) => {}
        }
    }

    /// Process background actions from the task manager. Returns whether any arrived.
    pub fn process_background_actions(&mut self) -> bool {
        let mut received = false;

        while let Ok(action) = self.background_action_rx.try_recv() {
            received = true;
            let action = self.update(action);
            self.handle_app_action(action);
        }

        let cleaned = self.task_manager.cleanup_finished_tasks();
        if cleaned > 0 {
            log::trace!("cleaned up {} finished tasks", cleaned);
        }

        received
    }

    /// Process an event through the component hierarchy
    pub fn handle_event(&mut self, event_type: EventType) {
        let action = match event_type {
            EventType::Key(key) => self.handle_key_events(key),
            EventType::Resize(_, _) | EventType::Tick | EventType::Other => Action::None,
        };

        let action = self.update(action);
        self.handle_app_action(action);
    }
}

impl Component for AppComponent {
    /// Route a key: logs overlay first, then the visible dialog, then the
    /// table and global shortcuts.
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.logs.visible {
            return self.logs.handle_key_events(key);
        }
        if self.dialog.is_visible() {
            return self.dialog.handle_key_events(key);
        }

        self.state.clear_messages();
        let action = self.schedule_list.handle_key_events(key);
        if !matches!(action, Action::None) {
            action
        } else {
            self.handle_global_key(key)
        }
    }

    fn update(&mut self, action: Action) -> Action {
        let action = self.logs.update(action);
        self.schedule_list.update(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = LayoutManager::main_layout(rect);

        self.schedule_list.render(f, chunks[0]);
        StatusBar::render(f, chunks[1], &self.state);

        self.dialog.render(f, rect);
        self.logs.render(f, rect);
    }
}
