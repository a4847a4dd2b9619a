//! Screen areas for the dashboard and its overlays

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Computes where the table, status bar and overlays go
pub struct LayoutManager;

impl LayoutManager {
    /// Schedule table on top, one-line status bar below
    #[must_use]
    pub fn main_layout(area: Rect) -> [Rect; 2] {
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area)
    }

    /// A rectangle of `percent_x` by `percent_y` of `area`, centered
    #[must_use]
    pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
            .flex(Flex::Center)
            .areas(area);
        Self::center_horizontally(percent_x, row)
    }

    /// A centered rectangle `height_lines` tall, clamped to the available height
    #[must_use]
    pub fn centered_rect_lines(percent_x: u16, height_lines: u16, area: Rect) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(height_lines.min(area.height))])
            .flex(Flex::Center)
            .areas(area);
        Self::center_horizontally(percent_x, row)
    }

    fn center_horizontally(percent_x: u16, row: Rect) -> Rect {
        let [column] = Layout::horizontal([Constraint::Percentage(percent_x)])
            .flex(Flex::Center)
            .areas(row);
        column
    }

    /// Dialog width in percent; narrow terminals get most of the screen
    #[must_use]
    pub fn dialog_width_percent(screen_width: u16) -> u16 {
        if screen_width < 100 {
            90
        } else {
            60
        }
    }
}
