//! In-memory notification center (success/error banners).

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use learnhub_auth::{NotificationKind, Notifier};

/// How long a banner stays up unless a duration is given.
pub const DEFAULT_DURATION_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub duration_ms: u64,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn expires_at(&self) -> DateTime<Utc> {
        let ms = i64::try_from(self.duration_ms).unwrap_or(i64::MAX);
        self.created_at + Duration::milliseconds(ms)
    }
}

/// Ordered list of live notifications with monotonically increasing ids.
#[derive(Debug)]
pub struct NotificationCenter {
    next_id: AtomicU64,
    items: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            items: Mutex::new(Vec::new()),
        }
    }

    pub fn add(&self, kind: NotificationKind, message: impl Into<String>, duration_ms: Option<u64>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let notification = Notification {
            id,
            kind,
            message: message.into(),
            duration_ms: duration_ms.unwrap_or(DEFAULT_DURATION_MS),
            created_at: Utc::now(),
        };

        tracing::debug!(id, ?kind, message = %notification.message, "notification added");
        match self.items.lock() {
            Ok(mut items) => items.push(notification),
            Err(_) => tracing::warn!(id, "notification center lock poisoned; dropping notification"),
        }
        id
    }

    /// Remove a notification; returns whether it was present.
    pub fn remove(&self, id: u64) -> bool {
        let Ok(mut items) = self.items.lock() else {
            return false;
        };
        let before = items.len();
        items.retain(|n| n.id != id);
        items.len() != before
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.add(NotificationKind::Success, message, None)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.add(NotificationKind::Error, message, None)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.add(NotificationKind::Warning, message, None)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.add(NotificationKind::Info, message, None)
    }

    pub fn list(&self) -> Vec<Notification> {
        self.items.lock().map(|items| items.clone()).unwrap_or_default()
    }

    /// Take every live notification, leaving the center empty.
    pub fn drain(&self) -> Vec<Notification> {
        self.items
            .lock()
            .map(|mut items| std::mem::take(&mut *items))
            .unwrap_or_default()
    }

    /// Drop notifications whose duration has elapsed at `now`.
    pub fn expire(&self, now: DateTime<Utc>) -> usize {
        let Ok(mut items) = self.items.lock() else {
            return 0;
        };
        let before = items.len();
        items.retain(|n| n.expires_at() > now);
        before - items.len()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.add(kind, message, None);
    }
}
