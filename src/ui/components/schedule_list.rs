use crate::api::ScheduleOperation;
use crate::constants::DEFAULT_LIST_DATE_FORMAT;
use crate::model::Schedule;
use crate::ui::components::badge::{create_recurring_badge, create_selection_marker, create_status_badge};
use crate::ui::core::{actions::Action, Component};
use crate::utils::datetime::format_timestamp;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use std::collections::BTreeSet;

const COLUMNS: [&str; 8] = ["", "Title", "Description", "Status", "Created at", "Run at", "Start at", "End at"];

/// The schedule table with cursor and multi-selection.
pub struct ScheduleListComponent {
    pub schedules: Vec<Schedule>,
    pub selected_index: usize,
    pub selected_ids: BTreeSet<String>,
    table_state: TableState,
    date_format: String,
}

impl Default for ScheduleListComponent {
    fn default() -> Self {
        Self::new(DEFAULT_LIST_DATE_FORMAT)
    }
}

impl ScheduleListComponent {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            schedules: Vec::new(),
            selected_index: 0,
            selected_ids: BTreeSet::new(),
            table_state: TableState::default(),
            date_format: date_format.into(),
        }
    }

    /// Replace the rows, keeping the cursor in range and dropping selections
    /// for schedules that no longer exist.
    pub fn update_data(&mut self, schedules: Vec<Schedule>) {
        self.schedules = schedules;
        let known: BTreeSet<&str> = self.schedules.iter().map(|s| s.id.as_str()).collect();
        self.selected_ids.retain(|id| known.contains(id.as_str()));
        self.update_table_state();
    }

    fn update_table_state(&mut self) {
        if self.schedules.is_empty() {
            self.selected_index = 0;
            self.table_state.select(None);
        } else {
            if self.selected_index >= self.schedules.len() {
                self.selected_index = self.schedules.len() - 1;
            }
            self.table_state.select(Some(self.selected_index));
        }
    }

    pub fn current(&self) -> Option<&Schedule> {
        self.schedules.get(self.selected_index)
    }

    /// Ids an action applies to: the checked rows, or the row under the cursor.
    pub fn target_ids(&self) -> Vec<String> {
        if !self.selected_ids.is_empty() {
            return self
                .schedules
                .iter()
                .filter(|s| self.selected_ids.contains(&s.id))
                .map(|s| s.id.clone())
                .collect();
        }
        self.current().map(|s| vec![s.id.clone()]).unwrap_or_default()
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    fn next(&mut self) {
        if !self.schedules.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.schedules.len();
            self.update_table_state();
        }
    }

    fn previous(&mut self) {
        if !self.schedules.is_empty() {
            self.selected_index = if self.selected_index == 0 {
                self.schedules.len() - 1
            } else {
                self.selected_index - 1
            };
            self.update_table_state();
        }
    }

    fn toggle_current(&mut self) {
        if let Some(id) = self.current().map(|s| s.id.clone()) {
            if !self.selected_ids.remove(&id) {
                self.selected_ids.insert(id);
            }
        }
    }

    fn toggle_all(&mut self) {
        if self.selected_ids.len() == self.schedules.len() {
            self.selected_ids.clear();
        } else {
            self.selected_ids = self.schedules.iter().map(|s| s.id.clone()).collect();
        }
    }

    fn operate(&self, operation: ScheduleOperation) -> Action {
        let ids = self.target_ids();
        if ids.is_empty() {
            Action::None
        } else {
            Action::Operate { operation, ids }
        }
    }

    fn create_row(&self, schedule: &Schedule) -> Row<'static> {
        let mut title = vec![Span::raw(schedule.title.clone())];
        title.extend(create_recurring_badge(schedule.is_recurring));

        Row::new(vec![
            Cell::from(create_selection_marker(self.selected_ids.contains(&schedule.id))),
            Cell::from(Line::from(title)),
            Cell::from(schedule.description.clone()),
            Cell::from(create_status_badge(&schedule.status)),
            Cell::from(format_timestamp(&schedule.created_at, &self.date_format)),
            Cell::from(format_timestamp(&schedule.run_at, &self.date_format)),
            Cell::from(format_timestamp(&schedule.start_at, &self.date_format)),
            Cell::from(format_timestamp(&schedule.end_at, &self.date_format)),
        ])
    }
}

impl Component for ScheduleListComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Action::PreviousSchedule,
            KeyCode::Down | KeyCode::Char('j') => Action::NextSchedule,
            KeyCode::Char(' ') => Action::ToggleSelect,
            KeyCode::Char('*') => Action::ToggleSelectAll,
            KeyCode::Enter | KeyCode::Char('i') => match self.current() {
                Some(schedule) => Action::OpenDetail(schedule.id.clone()),
                None => Action::None,
            },
            KeyCode::Char('d') | KeyCode::Delete => Action::OpenDelete(self.target_ids()),
            KeyCode::Char('p') => self.operate(ScheduleOperation::Pause),
            KeyCode::Char('u') => self.operate(ScheduleOperation::Resume),
            KeyCode::Char('t') => self.operate(ScheduleOperation::Trigger),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::NextSchedule => {
                self.next();
                Action::None
            }
            Action::PreviousSchedule => {
                self.previous();
                Action::None
            }
            Action::ToggleSelect => {
                self.toggle_current();
                Action::None
            }
            Action::ToggleSelectAll => {
                self.toggle_all();
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let title = if self.selected_ids.is_empty() {
            format!(" Schedules ({}) ", self.schedules.len())
        } else {
            format!(" Schedules ({}, {} selected) ", self.schedules.len(), self.selected_ids.len())
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.schedules.is_empty() {
            let empty = Paragraph::new("No schedules yet. Press 'n' to create one or 'r' to refresh.")
                .style(Style::default().fg(Color::Gray))
                .block(block);
            f.render_widget(empty, rect);
            return;
        }

        let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c)))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self.schedules.iter().map(|s| self.create_row(s)).collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Percentage(20),
                Constraint::Percentage(22),
                Constraint::Length(12),
                Constraint::Length(19),
                Constraint::Length(19),
                Constraint::Length(19),
                Constraint::Length(19),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

        let mut table_state = self.table_state.clone();
        f.render_stateful_widget(table, rect, &mut table_state);
        self.table_state = table_state;
    }
}
