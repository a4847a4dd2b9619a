//! The single confirmation surface.
//!
//! [`DialogHost`] turns bus events into visibility and content, and owns the
//! deferred-clear timer that keeps the last session mounted while the dialog
//! is hiding. Only the host mutates its state; triggers talk to it through
//! the [`DialogBus`] exclusively.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::bus::{Channel, DialogBus, Subscription};
use super::session::{DialogRequest, DialogSession};
use super::{lock_unpoisoned, DialogError};
use crate::constants::DEFAULT_DIALOG_CLEAR_DELAY_MS;

/// Observable lifecycle of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    Open,
    /// Hidden, with the previous session still mounted until the clear timer fires.
    Closing,
}

struct PendingClear {
    generation: u64,
    handle: JoinHandle<()>,
}

struct HostState {
    visible: bool,
    session: Option<DialogSession>,
    pending_clear: Option<PendingClear>,
    clear_delay: Duration,
    next_generation: u64,
}

impl HostState {
    fn cancel_pending_clear(&mut self) -> bool {
        match self.pending_clear.take() {
            Some(pending) => {
                pending.handle.abort();
                true
            }
            None => false,
        }
    }
}

/// The dialog host. Construct exactly one per application.
pub struct DialogHost {
    bus: DialogBus,
    state: Arc<Mutex<HostState>>,
    _subscriptions: Vec<Subscription>,
}

impl DialogHost {
    pub fn new(bus: DialogBus) -> Self {
        Self::with_clear_delay(bus, Duration::from_millis(DEFAULT_DIALOG_CLEAR_DELAY_MS))
    }

    pub fn with_clear_delay(bus: DialogBus, clear_delay: Duration) -> Self {
        let state = Arc::new(Mutex::new(HostState {
            visible: false,
            session: None,
            pending_clear: None,
            clear_delay,
            next_generation: 1,
        }));

        let subscriptions = vec![
            {
                let weak = Arc::downgrade(&state);
                let is_open = bus.is_open.clone();
                bus.open.subscribe(move |request: &DialogRequest| {
                    if let Some(state) = weak.upgrade() {
                        Self::on_open(&state, &is_open, request.clone());
                    }
                })
            },
            {
                let weak = Arc::downgrade(&state);
                let is_open = bus.is_open.clone();
                bus.close.subscribe(move |_| {
                    if let Some(state) = weak.upgrade() {
                        Self::on_close(&state, &is_open);
                    }
                })
            },
            {
                let weak = Arc::downgrade(&state);
                bus.reset.subscribe(move |_| {
                    if let Some(state) = weak.upgrade() {
                        Self::on_reset(&state);
                    }
                })
            },
        ];

        log::debug!("dialog host: mounted with {}ms clear delay", clear_delay.as_millis());

        Self {
            bus,
            state,
            _subscriptions: subscriptions,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        lock_unpoisoned(&self.state)
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    /// A copy of the mounted session, if any.
    pub fn session(&self) -> Option<DialogSession> {
        self.lock().session.clone()
    }

    pub fn visibility(&self) -> Visibility {
        let state = self.lock();
        match (state.visible, state.session.is_some()) {
            (true, _) => Visibility::Open,
            (false, true) => Visibility::Closing,
            (false, false) => Visibility::Closed,
        }
    }

    pub fn has_pending_clear(&self) -> bool {
        self.lock().pending_clear.is_some()
    }

    pub fn clear_delay(&self) -> Duration {
        self.lock().clear_delay
    }

    /// The confirm control: mark the session confirmed and publish `confirm`.
    /// Only the first confirmation of a session is published.
    ///
    /// Confirming while nothing is displayed is a caller bug; it is logged and
    /// reported as [`DialogError::NoActiveSession`] without touching state.
    pub fn confirm(&self) -> Result<(), DialogError> {
        {
            let mut state = self.lock();
            let visible = state.visible;
            match state.session.as_mut() {
                Some(session) if visible => {
                    if !session.mark_confirmed() {
                        log::debug!("dialog host: '{}' already confirmed", session.title());
                        return Ok(());
                    }
                }
                _ => {
                    log::error!("dialog host: confirm requested with no active session");
                    return Err(DialogError::NoActiveSession);
                }
            }
        }

        self.bus.confirm.publish(&());
        Ok(())
    }

    /// The cancel control and backdrop dismissal.
    ///
    /// Ignored while hidden and once the session has been confirmed, so an
    /// in-flight action is never interrupted. Returns whether `close` was published.
    pub fn dismiss(&self) -> bool {
        {
            let state = self.lock();
            if !state.visible {
                return false;
            }
            if state.session.as_ref().is_some_and(DialogSession::is_confirmed) {
                log::debug!("dialog host: dismissal ignored, action in flight");
                return false;
            }
        }

        self.bus.close.publish(&());
        true
    }

    fn on_open(state: &Arc<Mutex<HostState>>, is_open: &Channel<bool>, request: DialogRequest) {
        let became_visible = {
            let mut state = lock_unpoisoned(state);
            if state.cancel_pending_clear() {
                log::debug!("dialog host: pending clear superseded by '{}'", request.title);
            }
            if let Some(previous) = state.session.as_ref().filter(|_| state.visible) {
                log::warn!(
                    "dialog host: '{}' replaces '{}' while still open",
                    request.title,
                    previous.title()
                );
            }
            state.session = Some(DialogSession::from_request(request));
            !std::mem::replace(&mut state.visible, true)
        };

        if became_visible {
            is_open.publish(&true);
        }
    }

    fn on_close(state: &Arc<Mutex<HostState>>, is_open: &Channel<bool>) {
        let became_hidden = {
            let mut guard = lock_unpoisoned(state);
            let was_visible = std::mem::replace(&mut guard.visible, false);
            guard.cancel_pending_clear();
            if guard.session.is_some() {
                Self::schedule_clear(state, &mut guard);
            }
            was_visible
        };

        if became_hidden {
            is_open.publish(&false);
        }
    }

    fn on_reset(state: &Arc<Mutex<HostState>>) {
        let mut state = lock_unpoisoned(state);
        state.cancel_pending_clear();
        state.session = None;
    }

    fn schedule_clear(state: &Arc<Mutex<HostState>>, guard: &mut HostState) {
        let generation = guard.next_generation;
        guard.next_generation += 1;

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::debug!("dialog host: no runtime for clear timer, clearing immediately");
            guard.session = None;
            return;
        };

        let weak: Weak<Mutex<HostState>> = Arc::downgrade(state);
        let delay = guard.clear_delay;
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(state) = weak.upgrade() {
                let mut state = lock_unpoisoned(&state);
                if state.pending_clear.as_ref().is_some_and(|p| p.generation == generation) {
                    state.pending_clear = None;
                    state.session = None;
                    log::trace!("dialog host: session cleared after close");
                }
            }
        });

        guard.pending_clear = Some(PendingClear { generation, handle });
    }
}

impl Drop for DialogHost {
    fn drop(&mut self) {
        self.lock().cancel_pending_clear();
    }
}
