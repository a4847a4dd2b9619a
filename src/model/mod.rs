//! Data types shared by the API client and the UI.

pub mod form_field;
pub mod schedule;

pub use form_field::{FormError, FormField, FormFieldType, ShowCondition};
pub use schedule::{NewSchedule, Schedule, ScheduleStatus};
