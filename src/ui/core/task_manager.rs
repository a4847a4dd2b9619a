use super::actions::{Action, FlowKind};
use crate::api::{apply_to_all, ScheduleApi, ScheduleOperation};
use crate::dialog::{DialogRequest, OnSuccess, TriggerCoordinator};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

const LOAD_DESCRIPTION: &str = "Loading schedules";

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Owns every spawned background job and reports results back as actions.
///
/// Dropping the manager aborts whatever is still running. An aborted dialog
/// flow drops its pending confirm/close race, which releases its subscriptions.
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    fn spawn<F>(&mut self, description: String, future: F) -> TaskId
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        log::debug!("spawning task {}: {}", task_id, description);
        let task = BackgroundTask {
            id: task_id,
            handle: tokio::spawn(future),
            description,
            started_at: std::time::Instant::now(),
        };

        self.tasks.insert(task_id, task);
        task_id
    }

    /// Fetch the schedule list.
    pub fn spawn_load(&mut self, api: Arc<dyn ScheduleApi>) -> TaskId {
        let action_sender = self.action_sender.clone();

        self.spawn(LOAD_DESCRIPTION.to_string(), async move {
            let action = match api.list_schedules().await {
                Ok(schedules) => Action::SchedulesLoaded(schedules),
                Err(e) => {
                    log::error!("failed to load schedules: {}", e);
                    Action::LoadFailed(e.to_string())
                }
            };
            let _ = action_sender.send(action);
        })
    }

    /// Open a confirmation flow now and finish it in the background.
    ///
    /// When `refresh_on_success` is set a completed flow asks for a schedule
    /// refresh. The outcome is always reported as [`Action::FlowFinished`].
    pub fn spawn_flow<A, Fut>(
        &mut self,
        coordinator: TriggerCoordinator,
        request: DialogRequest,
        kind: FlowKind,
        action: A,
        refresh_on_success: bool,
    ) -> TaskId
    where
        A: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let action_sender = self.action_sender.clone();
        let description = format!("Dialog: {}", request.title);

        let on_success: Option<OnSuccess> = if refresh_on_success {
            let refresh_sender = self.action_sender.clone();
            Some(Box::new(move || {
                let _ = refresh_sender.send(Action::RefreshSchedules);
            }))
        } else {
            None
        };

        // Opened before the task exists so the dialog captures the next key
        let pending = coordinator.open(request);
        self.spawn(description, async move {
            let outcome = pending.run(action, on_success).await;
            let _ = action_sender.send(Action::FlowFinished { kind, outcome });
        })
    }

    /// Apply a lifecycle operation to every id, then report the tally.
    pub fn spawn_operation(
        &mut self,
        api: Arc<dyn ScheduleApi>,
        operation: ScheduleOperation,
        ids: Vec<String>,
    ) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("{} {} schedule(s)", operation.label(), ids.len());

        self.spawn(description, async move {
            let report = apply_to_all(api.as_ref(), operation, &ids).await;
            let failed = report
                .failed
                .into_iter()
                .map(|(id, e)| (id, e.to_string()))
                .collect();
            let _ = action_sender.send(Action::OperationFinished {
                operation,
                succeeded: report.succeeded.len(),
                failed,
            });
        })
    }

    /// Drop finished tasks. Their results were already sent through the action channel.
    pub fn cleanup_finished_tasks(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| !task.handle.is_finished());
        before - self.tasks.len()
    }

    /// Check if a schedule load is currently running
    pub fn is_loading(&self) -> bool {
        self.tasks
            .values()
            .any(|task| task.description == LOAD_DESCRIPTION && !task.handle.is_finished())
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            if !task.handle.is_finished() {
                log::debug!(
                    "aborting task {} ({}) after {:?}",
                    task.id,
                    task.description,
                    task.started_at.elapsed()
                );
            }
            task.handle.abort();
        }
    }

    /// Get the number of tracked tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all_tasks();
    }
}
