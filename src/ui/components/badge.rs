use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::model::ScheduleStatus;

/// Color used for a schedule status.
#[must_use]
pub fn status_color(status: &ScheduleStatus) -> Color {
    match status {
        ScheduleStatus::NotStarted => Color::Gray,
        ScheduleStatus::Active => Color::Green,
        ScheduleStatus::Paused => Color::Yellow,
        ScheduleStatus::Expired => Color::Red,
        ScheduleStatus::Unknown(_) => Color::Magenta,
    }
}

/// Create a status badge ("Active", "Paused", ...) in the status color
#[must_use]
pub fn create_status_badge(status: &ScheduleStatus) -> Span<'static> {
    Span::styled(
        status.label(),
        Style::default()
            .fg(status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}

/// Checkbox marker for multi-selection
#[must_use]
pub fn create_selection_marker(selected: bool) -> Span<'static> {
    if selected {
        Span::styled("[x]", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("[ ]", Style::default().fg(Color::DarkGray))
    }
}

/// Recurring marker shown next to the title
#[must_use]
pub fn create_recurring_badge(is_recurring: bool) -> Option<Span<'static>> {
    is_recurring.then(|| Span::styled(" 🔄", Style::default()))
}
