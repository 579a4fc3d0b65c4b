//! # Notifications
//!
//! One transient success/error banner at a time. Raising a new one replaces
//! the old one and restarts the dwell; nothing is queued.
//!
//! Dismissal runs as a scheduled tokio task. Two guards keep a stale timer
//! from hiding a newer message:
//!
//! 1. `raise()` aborts the pending dismissal task.
//! 2. Every notification gets a generation number and `expire()` ignores any
//!    generation but the current one (a timer that already fired and queued
//!    its action can no longer be aborted).

use std::time::Duration;

use log::debug;
use tokio::task::AbortHandle;

pub const DEFAULT_DWELL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NoticeKind,
    pub message: String,
    /// False once dismissed; the message is kept for inspection.
    pub visible: bool,
}

#[derive(Debug)]
pub struct NotificationTimer {
    dwell: Duration,
    current: Option<Notification>,
    generation: u64,
    pending: Option<AbortHandle>,
}

impl NotificationTimer {
    pub fn new(dwell: Duration) -> Self {
        Self {
            dwell,
            current: None,
            generation: 0,
            pending: None,
        }
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// The notification, if it should be rendered.
    pub fn visible(&self) -> Option<&Notification> {
        self.current.as_ref().filter(|n| n.visible)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shows a new notification. The caller schedules the dismissal for the
    /// returned generation and hands its task to [`arm`](Self::arm).
    pub fn raise(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.cancel_pending();
        self.generation += 1;
        let message = message.into();
        debug!(
            "Notification #{} ({:?}): {}",
            self.generation, kind, message
        );
        self.current = Some(Notification {
            kind,
            message,
            visible: true,
        });
        self.generation
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.raise(NoticeKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.raise(NoticeKind::Error, message)
    }

    /// Takes ownership of the dismissal task for the current notification.
    pub fn arm(&mut self, handle: AbortHandle) {
        self.cancel_pending();
        self.pending = Some(handle);
    }

    /// Hides the notification if `generation` is still the current one.
    /// Returns true if something was hidden.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                "Ignoring dismissal #{} (current is #{})",
                generation, self.generation
            );
            return false;
        }
        self.pending = None;
        match self.current.as_mut() {
            Some(notification) if notification.visible => {
                notification.visible = false;
                true
            }
            _ => false,
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Default for NotificationTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DWELL)
    }
}

impl Drop for NotificationTimer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
