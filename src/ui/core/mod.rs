//! Core UI building blocks.
//!
//! - [`actions`] - Action definitions passed between components
//! - [`component`] - Base component trait
//! - [`event_handler`] - Terminal event polling
//! - [`task_manager`] - Background jobs (API calls and dialog flows)
//!
//! Components turn keys into [`Action`]s, the app component applies them, and
//! long-running work goes through the [`TaskManager`], which reports back by
//! sending more actions.

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, FlowKind};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager};
