//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::constants::{STATUS_LOADING, STATUS_SHORTCUTS};
use crate::ui::app_component::AppState;

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Text and color shown for the given state. Errors win over progress, which wins over info.
    pub fn content(state: &AppState) -> (String, Color) {
        if let Some(error) = &state.error_message {
            (error.clone(), Color::Red)
        } else if state.loading {
            (STATUS_LOADING.to_string(), Color::Yellow)
        } else if let Some(info) = &state.info_message {
            (info.clone(), Color::Green)
        } else {
            (STATUS_SHORTCUTS.to_string(), Color::Gray)
        }
    }

    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let (status_text, status_color) = Self::content(state);

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }
}
