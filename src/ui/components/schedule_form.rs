//! The "new schedule" form, shown as the body of the shared dialog.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::dialog::{lock_unpoisoned, DialogBody, DialogBus, Subscription};
use crate::model::form_field::{names, new_schedule_fields, visible_fields};
use crate::model::{FormError, FormField, FormFieldType, NewSchedule};
use crate::utils::datetime::local_input_to_rfc3339;

#[derive(Debug, Default)]
struct FormState {
    values: HashMap<String, String>,
    is_recurring: bool,
    focus: usize,
    error: Option<String>,
}

/// Editable create-schedule form.
///
/// The form outlives the dialog session that shows it: the caller keeps an
/// `Arc` to read the values when the user confirms, and [`watch_reset`]
/// clears it a little after the dialog hides so the closing dialog does not
/// flash an empty form.
///
/// [`watch_reset`]: ScheduleForm::watch_reset
pub struct ScheduleForm {
    fields: Vec<FormField>,
    state: Mutex<FormState>,
    pending_reset: Mutex<Option<JoinHandle<()>>>,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleForm {
    pub fn new() -> Self {
        Self {
            fields: new_schedule_fields(),
            state: Mutex::new(FormState::default()),
            pending_reset: Mutex::new(None),
        }
    }

    /// Fields currently shown, in display order.
    pub fn visible_fields(&self) -> Vec<FormField> {
        visible_fields(&self.fields, self.is_recurring())
    }

    pub fn value(&self, name: &str) -> String {
        lock_unpoisoned(&self.state).values.get(name).cloned().unwrap_or_default()
    }

    pub fn set_value(&self, name: &str, value: impl Into<String>) {
        let mut state = lock_unpoisoned(&self.state);
        state.values.insert(name.to_string(), value.into());
        state.error = None;
    }

    pub fn is_recurring(&self) -> bool {
        lock_unpoisoned(&self.state).is_recurring
    }

    pub fn set_recurring(&self, is_recurring: bool) {
        let mut state = lock_unpoisoned(&self.state);
        state.is_recurring = is_recurring;
        state.error = None;
    }

    pub fn error(&self) -> Option<String> {
        lock_unpoisoned(&self.state).error.clone()
    }

    /// The field that receives typed characters.
    pub fn focused_field(&self) -> Option<FormField> {
        let focus = lock_unpoisoned(&self.state).focus;
        self.visible_fields().into_iter().nth(focus)
    }

    pub fn focus_next(&self) {
        let count = self.visible_fields().len();
        let mut state = lock_unpoisoned(&self.state);
        state.focus = (state.focus + 1) % count.max(1);
    }

    pub fn focus_previous(&self) {
        let count = self.visible_fields().len().max(1);
        let mut state = lock_unpoisoned(&self.state);
        state.focus = (state.focus + count - 1) % count;
    }

    /// True when nothing has been entered since the last reset.
    pub fn is_pristine(&self) -> bool {
        let state = lock_unpoisoned(&self.state);
        !state.is_recurring && state.focus == 0 && state.error.is_none() && state.values.values().all(String::is_empty)
    }

    pub fn reset(&self) {
        log::debug!("resetting new schedule form");
        *lock_unpoisoned(&self.state) = FormState::default();
    }

    /// Build the create request from the current values.
    pub fn to_new_schedule(&self) -> Result<NewSchedule, FormError> {
        let visible = self.visible_fields();
        for field in visible.iter().filter(|f| f.is_required && f.field_type != FormFieldType::Checkbox) {
            if self.value(&field.name).trim().is_empty() {
                return Err(FormError::Required(field.label.clone()));
            }
        }

        let text = |name: &str| self.value(name).trim().to_string();
        let mut schedule = if self.is_recurring() {
            NewSchedule::recurring(
                text(names::TITLE),
                text(names::URL),
                text(names::EMAIL),
                text(names::CRON_EXPR),
                self.datetime(names::START_AT)?,
                self.datetime(names::END_AT)?,
            )
        } else {
            NewSchedule::one_shot(
                text(names::TITLE),
                text(names::URL),
                text(names::EMAIL),
                self.datetime(names::RUN_AT)?,
            )
        };
        schedule.description = text(names::DESCRIPTION);
        Ok(schedule)
    }

    fn datetime(&self, name: &str) -> Result<String, FormError> {
        let value = self.value(name);
        local_input_to_rfc3339(&value).ok_or_else(|| FormError::InvalidDateTime {
            label: self.label_of(name),
            value,
        })
    }

    fn label_of(&self, name: &str) -> String {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.label.clone())
            .unwrap_or_else(|| name.to_string())
    }

    /// Reset the form `delay` after the dialog hides. Reopening the dialog
    /// before the delay elapses cancels the pending reset.
    ///
    /// Outside a Tokio runtime the reset happens immediately.
    pub fn watch_reset(self: &Arc<Self>, bus: &DialogBus, delay: Duration) -> Subscription {
        let form = Arc::downgrade(self);
        bus.is_open.subscribe(move |is_open| {
            let Some(form) = form.upgrade() else {
                return;
            };
            form.cancel_pending_reset();
            if *is_open {
                return;
            }

            match Handle::try_current() {
                Ok(handle) => {
                    let weak = Arc::downgrade(&form);
                    let task = handle.spawn(async move {
                        tokio::time::sleep(delay).await;
                        if let Some(form) = weak.upgrade() {
                            form.reset();
                        }
                    });
                    *lock_unpoisoned(&form.pending_reset) = Some(task);
                }
                Err(_) => form.reset(),
            }
        })
    }

    pub fn has_pending_reset(&self) -> bool {
        lock_unpoisoned(&self.pending_reset)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    fn cancel_pending_reset(&self) {
        if let Some(task) = lock_unpoisoned(&self.pending_reset).take() {
            task.abort();
        }
    }

    fn field_line(&self, field: &FormField, focused: bool, state: &FormState) -> Line<'static> {
        let marker = if focused { "▸ " } else { "  " };
        let required = if field.is_required { "*" } else { "" };
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let value = if field.field_type == FormFieldType::Checkbox {
            if state.is_recurring { "[x]" } else { "[ ]" }.to_string()
        } else {
            let value = state.values.get(&field.name).cloned().unwrap_or_default();
            if focused {
                format!("{}█", value)
            } else if value.is_empty() {
                placeholder(field.field_type).to_string()
            } else {
                value
            }
        };
        let value_style = if focused || state.values.contains_key(&field.name) {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{}{}: ", field.label, required), label_style),
            Span::styled(value, value_style),
        ])
    }
}

fn placeholder(field_type: FormFieldType) -> &'static str {
    match field_type {
        FormFieldType::InputDatetimeLocal => "YYYY-MM-DDTHH:MM",
        FormFieldType::InputCron => "* * * * *",
        FormFieldType::InputUrl => "https://",
        _ => "",
    }
}

impl DialogBody for ScheduleForm {
    fn lines(&self) -> Vec<Line<'static>> {
        let visible = self.visible_fields();
        let state = lock_unpoisoned(&self.state);

        let mut lines: Vec<Line<'static>> = visible
            .iter()
            .enumerate()
            .map(|(index, field)| self.field_line(field, index == state.focus, &state))
            .collect();

        if let Some(error) = &state.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("⚠ {}", error),
                Style::default().fg(Color::Red),
            )));
        }
        lines
    }

    fn handle_key(&self, key: KeyEvent) -> bool {
        let Some(field) = self.focused_field() else {
            return false;
        };

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::Char(' ') if field.field_type == FormFieldType::Checkbox => {
                let is_recurring = !self.is_recurring();
                self.set_recurring(is_recurring);
            }
            KeyCode::Char(_) if field.field_type == FormFieldType::Checkbox => {}
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut value = self.value(&field.name);
                value.push(c);
                self.set_value(&field.name, value);
            }
            KeyCode::Backspace => {
                let mut value = self.value(&field.name);
                value.pop();
                self.set_value(&field.name, value);
            }
            _ => return false,
        }
        true
    }

    fn validate(&self) -> Result<(), String> {
        let result = self.to_new_schedule().map(|_| ()).map_err(|e| e.to_string());
        lock_unpoisoned(&self.state).error = result.as_ref().err().cloned();
        result
    }
}
