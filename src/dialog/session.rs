//! Data describing one confirmation request.

use std::fmt;
use std::sync::Arc;

use super::content::{DialogBody, TextBody};

/// Shared, caller-owned dialog content.
pub type DialogContent = Arc<dyn DialogBody>;

/// What a trigger publishes on the `open` channel: a session without its
/// confirmation flag, which the host initialises itself.
#[derive(Clone)]
pub struct DialogRequest {
    pub title: String,
    pub content: DialogContent,
    pub hide_footer_buttons: bool,
}

impl DialogRequest {
    pub fn new(title: impl Into<String>, content: impl DialogBody + 'static) -> Self {
        Self::with_content(title, Arc::new(content))
    }

    /// Build a request around content the caller keeps a handle to.
    pub fn with_content(title: impl Into<String>, content: DialogContent) -> Self {
        Self {
            title: title.into(),
            content,
            hide_footer_buttons: false,
        }
    }

    /// Convenience for a plain text body.
    pub fn text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(title, TextBody::new(text))
    }

    /// Hide the confirm/cancel controls (read-only dialogs).
    #[must_use]
    pub fn without_footer(mut self) -> Self {
        self.hide_footer_buttons = true;
        self
    }
}

impl fmt::Debug for DialogRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogRequest")
            .field("title", &self.title)
            .field("hide_footer_buttons", &self.hide_footer_buttons)
            .finish_non_exhaustive()
    }
}

/// The session the host is displaying.
///
/// Everything except the confirmation flag is fixed at creation; the flag
/// only ever moves from `false` to `true`.
#[derive(Clone)]
pub struct DialogSession {
    title: String,
    content: DialogContent,
    hide_footer_buttons: bool,
    is_confirmed: bool,
}

impl DialogSession {
    pub fn from_request(request: DialogRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            hide_footer_buttons: request.hide_footer_buttons,
            is_confirmed: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &DialogContent {
        &self.content
    }

    pub fn hide_footer_buttons(&self) -> bool {
        self.hide_footer_buttons
    }

    pub fn is_confirmed(&self) -> bool {
        self.is_confirmed
    }

    /// Whether this session displays exactly `content` (same allocation).
    pub fn shows(&self, content: &DialogContent) -> bool {
        Arc::ptr_eq(&self.content, content)
    }

    /// Mark the session confirmed. Returns `false` if it already was.
    pub(crate) fn mark_confirmed(&mut self) -> bool {
        !std::mem::replace(&mut self.is_confirmed, true)
    }
}

impl fmt::Debug for DialogSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogSession")
            .field("title", &self.title)
            .field("hide_footer_buttons", &self.hide_footer_buttons)
            .field("is_confirmed", &self.is_confirmed)
            .finish_non_exhaustive()
    }
}
