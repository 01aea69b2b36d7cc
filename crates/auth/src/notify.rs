//! User-visible notification sink.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// Receives the success/failure banners raised by session operations.
pub trait Notifier {
    fn notify(&self, kind: NotificationKind, message: &str);
}

impl<N> Notifier for Arc<N>
where
    N: Notifier + ?Sized,
{
    fn notify(&self, kind: NotificationKind, message: &str) {
        (**self).notify(kind, message)
    }
}

impl<N> Notifier for &N
where
    N: Notifier + ?Sized,
{
    fn notify(&self, kind: NotificationKind, message: &str) {
        (**self).notify(kind, message)
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _kind: NotificationKind, _message: &str) {}
}
