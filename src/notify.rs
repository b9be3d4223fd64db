//! Ephemeral user notifications
//!
//! Toasts queue up in arrival order and each one expires on its own clock
//! about three seconds after it appeared. Nothing here dismisses the whole
//! stack at once; an old toast leaving never shortens a newer one's life.

use std::time::{Duration, Instant};

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    created: Instant,
}

impl Toast {
    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.created) >= TOAST_TTL
    }
}

/// Append-only queue of live toasts, oldest first.
#[derive(Debug, Default)]
pub struct ToastStack {
    toasts: Vec<Toast>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into(), Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into(), Instant::now());
    }

    /// Drop every toast whose time is up as of `now`.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.expired(now));
    }

    /// Live toasts, oldest first.
    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    fn push(&mut self, kind: ToastKind, message: String, created: Instant) {
        self.toasts.push(Toast {
            kind,
            message,
            created,
        });
    }
}
