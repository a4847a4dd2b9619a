//! Utility modules for kronos-dashboard.
//!
//! - [`datetime`] - Timestamp parsing and formatting for API values and form inputs

pub mod datetime;
