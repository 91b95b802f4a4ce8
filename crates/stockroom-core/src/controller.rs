// ── Item manager controller ──
//
// Owns the `AppState` and is the only thing that mutates it. Messages from
// the UI go through `dispatch`; command outcomes and toast expiries arrive
// on the inbox channel and are applied by `drain` / `next`, always on the
// caller's task. Network calls run as spawned tasks.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::api::ItemsApi;
use crate::dispatcher::Dispatcher;
use crate::state::{AppState, Effect, Msg};
use crate::toast::ToastTimer;

/// Drives the item manager: applies messages, runs their effects, and
/// feeds results back in.
pub struct Controller<A> {
    state: AppState,
    dispatcher: Arc<Dispatcher<A>>,
    inbox_tx: mpsc::UnboundedSender<Msg>,
    inbox_rx: mpsc::UnboundedReceiver<Msg>,
    toast_timer: ToastTimer,
    /// Cancelled on shutdown; in-flight requests are abandoned.
    cancel: CancellationToken,
}

impl<A: ItemsApi> Controller<A> {
    pub fn new(api: A) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(),
            dispatcher: Arc::new(Dispatcher::new(api)),
            toast_timer: ToastTimer::new(inbox_tx.clone()),
            inbox_tx,
            inbox_rx,
            cancel: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api(&self) -> &A {
        self.dispatcher.api()
    }

    /// Issue the initial fetch.
    pub fn start(&mut self) {
        self.dispatch(Msg::Refresh);
    }

    /// Apply a message and run whatever effects it produces.
    pub fn dispatch(&mut self, msg: Msg) {
        let kind: &'static str = (&msg).into();
        trace!(msg = kind, "dispatch");

        let effects = self.state.update(msg, Instant::now());
        for effect in effects {
            self.run(effect);
        }
    }

    /// Apply every message already waiting in the inbox. Returns how many
    /// were applied; the UI uses this to decide whether to redraw.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.inbox_rx.try_recv() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    /// Wait for the next inbox message and apply it.
    pub async fn next(&mut self) {
        if let Some(msg) = self.inbox_rx.recv().await {
            self.dispatch(msg);
        }
    }

    /// Abandon in-flight requests and pending toast expiry.
    pub fn shutdown(&mut self) {
        self.cancel.cancel();
        self.toast_timer.cancel();
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Execute(command) => {
                let dispatcher = Arc::clone(&self.dispatcher);
                let tx = self.inbox_tx.clone();
                let cancel = self.cancel.clone();
                let name = command.name();

                tokio::spawn(async move {
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => {
                            debug!(command = name, "abandoned on shutdown");
                        }
                        msg = dispatcher.execute(command) => {
                            let _ = tx.send(msg);
                        }
                    }
                });
            }
            Effect::ScheduleToastExpiry { id, after } => {
                self.toast_timer.schedule(id, after);
            }
        }
    }
}

impl<A> Drop for Controller<A> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
