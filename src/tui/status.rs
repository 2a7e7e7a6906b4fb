//! Transient status notifications shown in the status bar.
//!
//! At most one notification is active. Each one owns the task that will
//! expire it; showing a new notification aborts that task before starting
//! the next, and an expiry carrying a stale token is ignored.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::tui::event::{AppEvent, EventSender};

pub const STATUS_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotification {
    pub text: String,
    pub kind: StatusKind,
}

struct PendingExpiry {
    token: u64,
    task: JoinHandle<()>,
}

#[derive(Default)]
pub struct StatusLine {
    current: Option<StatusNotification>,
    expiry: Option<PendingExpiry>,
    last_token: u64,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&StatusNotification> {
        self.current.as_ref()
    }

    /// Replaces any active notification and restarts the expiry window.
    /// Returns the token identifying this notification.
    pub fn show(&mut self, text: impl Into<String>, kind: StatusKind, tx: &EventSender) -> u64 {
        self.cancel_expiry();

        self.last_token += 1;
        let token = self.last_token;
        let tx = tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(STATUS_DURATION).await;
            let _ = tx.send(AppEvent::StatusExpired { token });
        });

        self.current = Some(StatusNotification {
            text: text.into(),
            kind,
        });
        self.expiry = Some(PendingExpiry { token, task });
        token
    }

    /// Whether `token` belongs to the notification on screen.
    pub fn is_current(&self, token: u64) -> bool {
        self.current.is_some() && self.expiry.as_ref().map(|p| p.token) == Some(token)
    }

    /// Clears the notification if `token` belongs to the pending expiry.
    /// Returns whether anything was cleared.
    pub fn expire(&mut self, token: u64) -> bool {
        match &self.expiry {
            Some(pending) if pending.token == token => {
                self.expiry = None;
                self.current = None;
                true
            }
            _ => {
                debug!("Ignoring stale status expiry {}", token);
                false
            }
        }
    }

    fn cancel_expiry(&mut self) {
        if let Some(pending) = self.expiry.take() {
            debug!("Cancelling status expiry {}", pending.token);
            pending.task.abort();
        }
    }
}

impl Drop for StatusLine {
    fn drop(&mut self) {
        self.cancel_expiry();
    }
}
