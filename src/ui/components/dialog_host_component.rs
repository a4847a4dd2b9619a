use std::time::Duration;

use crate::constants::DIALOG_WORKING;
use crate::dialog::{DialogBus, DialogHost};
use crate::ui::components::common::{create_dialog_block, create_instructions_line, shortcuts};
use crate::ui::core::{actions::Action, Component};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

/// Mounts the application's single [`DialogHost`] and draws it.
///
/// Keys reach the host only while it is visible. The footer keys (`Enter`,
/// `y`, `n`, `Esc`) map to confirm and dismiss; everything else goes to the
/// dialog body first.
pub struct DialogHostComponent {
    host: DialogHost,
}

impl DialogHostComponent {
    pub fn new(bus: DialogBus, clear_delay: Duration) -> Self {
        Self {
            host: DialogHost::with_clear_delay(bus, clear_delay),
        }
    }

    pub fn host(&self) -> &DialogHost {
        &self.host
    }

    pub fn is_visible(&self) -> bool {
        self.host.is_visible()
    }

    fn confirm(&self) {
        let Some(session) = self.host.session() else {
            return;
        };
        if let Err(message) = session.content().validate() {
            log::debug!("dialog '{}' not confirmed: {}", session.title(), message);
            return;
        }
        if let Err(e) = self.host.confirm() {
            log::warn!("dialog confirm ignored: {}", e);
        }
    }
}

impl Component for DialogHostComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if !self.host.is_visible() {
            return Action::None;
        }
        let Some(session) = self.host.session() else {
            return Action::None;
        };
        // Keys are swallowed while the confirmed action runs
        if session.is_confirmed() {
            return Action::None;
        }

        let has_footer = !session.hide_footer_buttons();
        match key.code {
            KeyCode::Esc => {
                self.host.dismiss();
            }
            KeyCode::Enter if has_footer => self.confirm(),
            _ if session.content().handle_key(key) => {}
            KeyCode::Char('y') if has_footer => self.confirm(),
            KeyCode::Char('n') | KeyCode::Char('q') => {
                self.host.dismiss();
            }
            _ => {}
        }
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if !self.host.is_visible() {
            return;
        }
        let Some(session) = self.host.session() else {
            return;
        };

        let mut lines = session.content().lines();
        lines.push(Line::from(""));
        let footer = if session.is_confirmed() {
            Line::from(DIALOG_WORKING).style(Style::default().fg(Color::Yellow))
        } else if session.hide_footer_buttons() {
            create_instructions_line(&[shortcuts::ESC_CLOSE])
        } else {
            create_instructions_line(&[
                shortcuts::ENTER_CONFIRM,
                shortcuts::SEPARATOR,
                shortcuts::ESC_CANCEL,
            ])
        };
        lines.push(footer);

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
        let area = LayoutManager::centered_rect_lines(LayoutManager::dialog_width_percent(rect.width), height, rect);
        f.render_widget(Clear, area);

        let paragraph = Paragraph::new(lines)
            .block(create_dialog_block(session.title(), Color::Cyan))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}
