//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// API
/// Default base URL of the Kronos REST API
pub const DEFAULT_API_URL: &str = "http://localhost:9175/api/v1";
/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "KRONOS_API_URL";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// Dialog timing
/// Delay before a closed dialog drops its content, matched to the hide transition
pub const DEFAULT_DIALOG_CLEAR_DELAY_MS: u64 = 1000;
/// Delay before the create-schedule form is reset after the dialog closes
pub const DEFAULT_FORM_RESET_DELAY_MS: u64 = 500;
pub const MAX_DIALOG_DELAY_MS: u64 = 10_000;

// Refresh
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 3600;

// Date formats
/// Date format for detail views
pub const DEFAULT_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
/// Date format for the schedule table
pub const DEFAULT_LIST_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
/// Format of datetime form inputs
pub const FORM_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Placeholder for missing values
pub const EMPTY_VALUE: &str = "–";

// Dialog titles and text
pub const DIALOG_TITLE_DELETE: &str = "Delete schedule";
pub const DIALOG_TITLE_CREATE: &str = "Add new schedule";
pub const DIALOG_TITLE_DEBUG_LOGS: &str = "🔍 Logs - Press 'Esc', 'G' or 'q' to close";
pub const DELETE_ONE_TEXT: &str = "Do you really want to delete this schedule?";
pub const DELETE_MANY_TEXT: &str = "Do you really want to delete these schedules?";
pub const DIALOG_WORKING: &str = "⏳ Working...";

// Success Messages
pub const SUCCESS_SCHEDULE_CREATED: &str = "✅ Schedule created";
pub const SUCCESS_SCHEDULES_DELETED: &str = "✅ Schedules deleted";
pub const SUCCESS_SCHEDULE_DELETED: &str = "✅ Schedule deleted";

// Error Messages
pub const ERROR_LOAD_FAILED: &str = "❌ Failed to load schedules";
pub const ERROR_CREATE_FAILED: &str = "❌ Failed to create schedule";
pub const ERROR_DELETE_FAILED: &str = "❌ Failed to delete schedule";
pub const ERROR_NO_SELECTION: &str = "No schedule selected";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const STATUS_SHORTCUTS: &str =
    "n: new • d: delete • Enter: details • p/u/t: pause/resume/trigger • Space: select • r: refresh • G: logs • q: quit";
pub const STATUS_LOADING: &str = "🔄 Loading schedules...";

// Logging
/// Maximum number of log lines kept in memory for the logs dialog
pub const MAX_LOG_ENTRIES: usize = 500;
pub const LOG_FILE_NAME: &str = "kronos-dashboard.log";
pub const APP_DIR_NAME: &str = "kronos-dashboard";
pub const LOCAL_CONFIG_FILE: &str = "kronos-dashboard.toml";
