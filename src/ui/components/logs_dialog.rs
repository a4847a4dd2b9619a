//! Logs dialog component for browsing the in-memory log buffer

use crate::constants::DIALOG_TITLE_DEBUG_LOGS;
use crate::logger::Logger;
use crate::ui::components::common::{create_instructions_paragraph, shortcuts};
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Full-screen overlay listing recent log lines, newest first.
pub struct LogsDialog {
    logger: Logger,
    pub visible: bool,
    pub scroll_offset: usize,
}

impl LogsDialog {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            visible: false,
            scroll_offset: 0,
        }
    }

    pub fn show(&mut self, visible: bool) {
        self.visible = visible;
        self.scroll_offset = 0;
    }

    fn level_style(line: &str) -> Style {
        if line.contains("ERROR") {
            Style::default().fg(Color::Red)
        } else if line.contains("WARN") {
            Style::default().fg(Color::Yellow)
        } else if line.contains("INFO") {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        }
    }
}

impl Component for LogsDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('G') => Action::ShowLogs(false),
            KeyCode::Down | KeyCode::Char('j') => Action::LogsScrollDown,
            KeyCode::Up | KeyCode::Char('k') => Action::LogsScrollUp,
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ShowLogs(visible) => {
                self.show(visible);
                Action::None
            }
            Action::LogsScrollDown => {
                let max = self.logger.get_logs().len().saturating_sub(1);
                self.scroll_offset = (self.scroll_offset + 1).min(max);
                Action::None
            }
            Action::LogsScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let modal_area = crate::ui::layout::LayoutManager::centered_rect(80, 80, area);
        f.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(DIALOG_TITLE_DEBUG_LOGS)
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black))
            .border_style(Style::default().fg(Color::Cyan));
        f.render_widget(block, modal_area);

        let inner_area = modal_area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner_area);

        f.render_widget(
            create_instructions_paragraph(&[shortcuts::ESC_CLOSE, shortcuts::SEPARATOR, shortcuts::SCROLL]),
            chunks[0],
        );

        let logs = self.logger.get_logs();
        if logs.is_empty() {
            let no_logs = Paragraph::new("No logs yet")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(no_logs, chunks[1]);
            return;
        }

        let visible_height = chunks[1].height as usize;
        let start_index = self.scroll_offset.min(logs.len().saturating_sub(1));
        let items: Vec<ListItem> = logs
            .iter()
            .skip(start_index)
            .take(visible_height)
            .map(|line| ListItem::new(Line::from(Span::styled(line.clone(), Self::level_style(line)))))
            .collect();

        f.render_widget(List::new(items), chunks[1]);
    }
}
