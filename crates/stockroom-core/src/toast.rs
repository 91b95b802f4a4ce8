// ── Toast notifications ──
//
// At most one toast is visible. Each toast gets a fresh `ToastId`; the
// expiry message carries that id, so an expiry for a replaced toast is a
// no-op even if its timer was not cancelled in time.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::state::Msg;

/// How long a toast stays up unless replaced sooner.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// Identity of one displayed toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

impl Toast {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// ── Expiry timer ─────────────────────────────────────────────────────

/// Owns the single pending auto-clear task.
///
/// Scheduling a new expiry cancels the previous one, so a replaced toast
/// never clears its successor.
#[derive(Debug)]
pub struct ToastTimer {
    tx: mpsc::UnboundedSender<Msg>,
    pending: Option<CancellationToken>,
}

impl ToastTimer {
    pub fn new(tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self { tx, pending: None }
    }

    /// Send `Msg::ToastExpired(id)` after `after`, unless rescheduled or
    /// cancelled first.
    pub fn schedule(&mut self, id: ToastId, after: Duration) {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                () = child.cancelled() => {
                    trace!(toast = id.0, "toast expiry cancelled");
                }
                () = tokio::time::sleep(after) => {
                    let _ = tx.send(Msg::ToastExpired(id));
                }
            }
        });

        self.pending = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for ToastTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
