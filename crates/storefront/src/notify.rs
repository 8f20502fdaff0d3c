//! User-facing transient notifications ("toasts").
//!
//! Stores report the outcome of user actions through a
//! [`NotificationSink`]. The sink decides how to surface them: the CLI
//! prints them after each command, tests record and inspect them. The text
//! is presentation only; callers that need to branch on an outcome use the
//! operation's return value instead.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Visual class of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Neutral information, e.g. "Already in wishlist".
    Info,
    /// An action completed.
    Success,
    /// An action was refused.
    Error,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a notification stamped with a fresh ID and the current time.
    #[must_use]
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }
}

/// Destination for notifications.
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification. Must not fail or block for long.
    fn notify(&self, notification: Notification);
}

/// Sink that writes notifications to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => tracing::warn!(
                id = %notification.id,
                kind = ?notification.kind,
                "{}",
                notification.message
            ),
            NotificationKind::Info | NotificationKind::Success => tracing::info!(
                id = %notification.id,
                kind = ?notification.kind,
                "{}",
                notification.message
            ),
        }
    }
}

/// Sink that keeps notifications in memory until they are drained.
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notification received so far, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    /// Copy of every notification received so far, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Messages received so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|n| n.message.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.lock().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(Notification::info("a").kind, NotificationKind::Info);
        assert_eq!(Notification::success("b").kind, NotificationKind::Success);
        assert_eq!(Notification::error("c").kind, NotificationKind::Error);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Notification::success("Added to wishlist");
        let b = Notification::success("Added to wishlist");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_recording_sink_drain_empties() {
        let sink = RecordingSink::new();
        sink.notify(Notification::success("Wishlist cleared"));
        sink.notify(Notification::info("Already in wishlist"));

        assert_eq!(
            sink.messages(),
            vec!["Wishlist cleared", "Already in wishlist"]
        );

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].kind, NotificationKind::Success);
        assert!(sink.snapshot().is_empty());
    }

    #[test]
    fn test_tracing_sink_accepts_every_kind() {
        let sink = TracingSink;
        sink.notify(Notification::info("info"));
        sink.notify(Notification::success("success"));
        sink.notify(Notification::error("error"));
    }
}
