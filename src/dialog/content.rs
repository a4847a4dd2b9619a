//! Renderable dialog bodies.
//!
//! The host never looks inside a body: it asks for lines to draw and forwards
//! keys the footer does not handle. Bodies that keep editable state (forms) use
//! interior mutability and remain owned by the caller that created them.

use crossterm::event::KeyEvent;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::constants::EMPTY_VALUE;

/// Content shown inside the confirmation dialog.
pub trait DialogBody: Send + Sync {
    /// Lines to render in the dialog body.
    fn lines(&self) -> Vec<Line<'static>>;

    /// Handle a key the dialog footer did not consume. Returns `true` if the key was used.
    fn handle_key(&self, _key: KeyEvent) -> bool {
        false
    }

    /// Checked before the user's confirmation is published. An error keeps the
    /// dialog open and is shown to the user.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Plain text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBody {
    text: String,
}

impl TextBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl DialogBody for TextBody {
    fn lines(&self) -> Vec<Line<'static>> {
        self.text.lines().map(|line| Line::from(line.to_string())).collect()
    }
}

/// A label/value row of a [`DetailBody`].
#[derive(Debug, Clone)]
pub struct DetailRow {
    pub label: String,
    pub value: Span<'static>,
}

/// Read-only list of label/value rows, used for "details" dialogs.
#[derive(Debug, Clone, Default)]
pub struct DetailBody {
    rows: Vec<DetailRow>,
}

impl DetailBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain text row. Empty values render as a dash.
    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        let value: String = value.into();
        let value = if value.trim().is_empty() {
            EMPTY_VALUE.to_string()
        } else {
            value
        };
        self.rows.push(DetailRow {
            label: label.into(),
            value: Span::raw(value),
        });
        self
    }

    /// Add a row with a pre-styled value, e.g. a status badge.
    pub fn styled_row(mut self, label: impl Into<String>, value: Span<'static>) -> Self {
        self.rows.push(DetailRow {
            label: label.into(),
            value,
        });
        self
    }

    pub fn rows(&self) -> &[DetailRow] {
        &self.rows
    }

    /// Value of the first row with the given label.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.content.as_ref())
    }
}

impl DialogBody for DetailBody {
    fn lines(&self) -> Vec<Line<'static>> {
        let label_width = self.rows.iter().map(|row| row.label.chars().count()).max().unwrap_or(0);

        self.rows
            .iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$}  ", row.label, width = label_width),
                        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
                    ),
                    row.value.clone(),
                ])
            })
            .collect()
    }
}
