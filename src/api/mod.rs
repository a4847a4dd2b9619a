//! Kronos REST API access.
//!
//! The UI talks to the server only through the [`ScheduleApi`] trait, which
//! keeps the HTTP client swappable for tests.

use async_trait::async_trait;

use crate::model::{NewSchedule, Schedule};

pub mod http;

pub use http::HttpScheduleApi;

/// Errors returned by API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Schedule not found: {0}")]
    NotFound(String),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Operations the dashboard performs against the schedule server.
#[async_trait]
pub trait ScheduleApi: Send + Sync {
    /// Base URL requests are sent to, for display and logging.
    fn base_url(&self) -> &str;

    async fn list_schedules(&self) -> Result<Vec<Schedule>, ApiError>;
    async fn get_schedule(&self, id: &str) -> Result<Schedule, ApiError>;
    async fn create_schedule(&self, schedule: &NewSchedule) -> Result<Schedule, ApiError>;
    async fn delete_schedule(&self, id: &str) -> Result<(), ApiError>;

    // Lifecycle operations, each returning the updated schedule
    async fn pause_schedule(&self, id: &str) -> Result<Schedule, ApiError>;
    async fn resume_schedule(&self, id: &str) -> Result<Schedule, ApiError>;
    async fn trigger_schedule(&self, id: &str) -> Result<Schedule, ApiError>;
}

/// Lifecycle operations that can be applied to several schedules at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOperation {
    Pause,
    Resume,
    Trigger,
}

impl ScheduleOperation {
    pub fn label(self) -> &'static str {
        match self {
            ScheduleOperation::Pause => "Pause",
            ScheduleOperation::Resume => "Resume",
            ScheduleOperation::Trigger => "Trigger",
        }
    }

    pub async fn apply(self, api: &dyn ScheduleApi, id: &str) -> Result<Schedule, ApiError> {
        match self {
            ScheduleOperation::Pause => api.pause_schedule(id).await,
            ScheduleOperation::Resume => api.resume_schedule(id).await,
            ScheduleOperation::Trigger => api.trigger_schedule(id).await,
        }
    }
}

/// Result of applying an operation to each of several schedules.
#[derive(Debug, Default)]
pub struct BulkReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, ApiError)>,
}

impl BulkReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Apply `operation` to every id. A failure on one schedule does not stop the others.
pub async fn apply_to_all(api: &dyn ScheduleApi, operation: ScheduleOperation, ids: &[String]) -> BulkReport {
    let mut report = BulkReport::default();

    for id in ids {
        match operation.apply(api, id).await {
            Ok(_) => report.succeeded.push(id.clone()),
            Err(e) => {
                log::warn!("{} failed for schedule {}: {}", operation.label(), id, e);
                report.failed.push((id.clone(), e));
            }
        }
    }

    report
}
