//! Reusable UI components

pub mod badge;
pub mod common;

// Component architecture
pub mod dialog_host_component;
pub mod logs_dialog;
pub mod schedule_detail;
pub mod schedule_form;
pub mod schedule_list;
pub mod status_bar;

// Component exports
pub use dialog_host_component::DialogHostComponent;
pub use logs_dialog::LogsDialog;
pub use schedule_detail::schedule_detail_body;
pub use schedule_form::ScheduleForm;
pub use schedule_list::ScheduleListComponent;
pub use status_bar::StatusBar;
