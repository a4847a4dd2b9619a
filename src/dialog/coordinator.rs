//! Confirm-then-act flows driven through the shared dialog.

use std::future::Future;
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::oneshot;

use super::bus::{DialogBus, Subscription};
use super::lock_unpoisoned;
use super::session::DialogRequest;

/// Called after a confirmed action succeeded, once the session has been reset.
pub type OnSuccess = Box<dyn FnOnce() + Send>;

/// How a confirmation flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The user closed the dialog before confirming. Not an error.
    Canceled,
    /// Confirmed and the action succeeded.
    Completed,
    /// Confirmed but the action failed; the message has already been logged.
    Failed(String),
}

impl FlowOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, FlowOutcome::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Confirmed,
    Canceled,
}

struct RaceSlot {
    sender: Option<oneshot::Sender<Decision>>,
    subscriptions: Vec<Subscription>,
}

/// One-shot race between the first `confirm` and the first `close`.
///
/// Whichever fires first settles the race and disposes both subscriptions.
/// Dropping the race (an abandoned flow) disposes them as well.
struct DecisionRace {
    slot: Arc<Mutex<RaceSlot>>,
    receiver: oneshot::Receiver<Decision>,
}

impl DecisionRace {
    fn arm(bus: &DialogBus) -> Self {
        let (sender, receiver) = oneshot::channel();
        let slot = Arc::new(Mutex::new(RaceSlot {
            sender: Some(sender),
            subscriptions: Vec::with_capacity(2),
        }));

        let on_confirm = {
            let slot = Arc::downgrade(&slot);
            bus.confirm.subscribe(move |_| Self::settle(&slot, Decision::Confirmed))
        };
        let on_close = {
            let slot = Arc::downgrade(&slot);
            bus.close.subscribe(move |_| Self::settle(&slot, Decision::Canceled))
        };
        lock_unpoisoned(&slot).subscriptions.extend([on_confirm, on_close]);

        Self { slot, receiver }
    }

    fn settle(slot: &Weak<Mutex<RaceSlot>>, decision: Decision) {
        let Some(slot) = slot.upgrade() else {
            return;
        };
        let released = {
            let mut slot = lock_unpoisoned(&slot);
            if let Some(sender) = slot.sender.take() {
                let _ = sender.send(decision);
            }
            std::mem::take(&mut slot.subscriptions)
        };
        drop(released);
    }

    async fn wait(mut self) -> Decision {
        let decision = (&mut self.receiver).await.unwrap_or(Decision::Canceled);
        lock_unpoisoned(&self.slot).subscriptions.clear();
        decision
    }
}

/// Entry point for every call site that needs a confirm-then-act flow.
///
/// Flows are not serialised against each other: a second flow opened while
/// the first is still showing replaces the visible session (last open wins),
/// and both flows observe the next `confirm` or `close`.
#[derive(Clone, Debug)]
pub struct TriggerCoordinator {
    bus: DialogBus,
}

impl TriggerCoordinator {
    pub fn new(bus: DialogBus) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &DialogBus {
        &self.bus
    }

    /// Publish `open` and start listening for the user's decision, without
    /// waiting for it.
    ///
    /// The dialog is visible as soon as this returns, so a caller that runs
    /// the returned flow on a background task cannot race a second trigger
    /// past it. Dropping the [`PendingFlow`] abandons the flow.
    pub fn open(&self, request: DialogRequest) -> PendingFlow {
        log::debug!("dialog flow '{}': opening", request.title);
        self.bus.open.publish(&request);

        PendingFlow {
            bus: self.bus.clone(),
            title: request.title,
            race: DecisionRace::arm(&self.bus),
        }
    }

    /// Open `request`, wait for the user's decision, and run `action` only if
    /// they confirm.
    ///
    /// On success `reset` is published and `on_success` runs. A failed action
    /// is logged and reported as [`FlowOutcome::Failed`]. In every branch the
    /// flow publishes `close` exactly once as its last step.
    pub async fn run_confirmation_flow<A, Fut>(
        &self,
        request: DialogRequest,
        action: A,
        on_success: Option<OnSuccess>,
    ) -> FlowOutcome
    where
        A: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        self.open(request).run(action, on_success).await
    }
}

/// A flow whose dialog is open and whose confirm/close race is armed.
#[must_use = "dropping a PendingFlow abandons it"]
pub struct PendingFlow {
    bus: DialogBus,
    title: String,
    race: DecisionRace,
}

impl PendingFlow {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Wait for the decision, then finish the flow as
    /// [`TriggerCoordinator::run_confirmation_flow`] describes.
    pub async fn run<A, Fut>(self, action: A, on_success: Option<OnSuccess>) -> FlowOutcome
    where
        A: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let PendingFlow { bus, title, race } = self;

        let outcome = match race.wait().await {
            Decision::Canceled => {
                log::debug!("dialog flow '{}': canceled", title);
                FlowOutcome::Canceled
            }
            Decision::Confirmed => match action().await {
                Ok(()) => {
                    log::info!("dialog flow '{}': completed", title);
                    bus.reset.publish(&());
                    if let Some(on_success) = on_success {
                        on_success();
                    }
                    FlowOutcome::Completed
                }
                Err(e) => {
                    log::error!("dialog flow '{}': action failed: {:#}", title, e);
                    FlowOutcome::Failed(format!("{:#}", e))
                }
            },
        };

        bus.close.publish(&());
        outcome
    }
}

impl std::fmt::Debug for PendingFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingFlow").field("title", &self.title).finish_non_exhaustive()
    }
}
