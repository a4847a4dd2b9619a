use crate::api::ScheduleOperation;
use crate::dialog::FlowOutcome;
use crate::model::Schedule;

/// Which confirmation flow finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Create,
    Delete { count: usize },
    Detail,
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NextSchedule,
    PreviousSchedule,
    ToggleSelect,
    ToggleSelectAll,

    // Schedule operations (confirmed through the dialog)
    OpenCreate,
    OpenDelete(Vec<String>),
    OpenDetail(String),

    // Schedule operations (immediate)
    Operate {
        operation: ScheduleOperation,
        ids: Vec<String>,
    },

    // Background results
    RefreshSchedules,
    SchedulesLoaded(Vec<Schedule>),
    LoadFailed(String),
    FlowFinished {
        kind: FlowKind,
        outcome: FlowOutcome,
    },
    OperationFinished {
        operation: ScheduleOperation,
        succeeded: usize,
        failed: Vec<(String, String)>,
    },

    // UI operations
    ShowLogs(bool),
    LogsScrollUp,
    LogsScrollDown,

    // App control
    Quit,
    None,
}
