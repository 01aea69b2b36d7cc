//! Infrastructure layer: durable session slot and notification sink.

pub mod notifications;
pub mod slot;

pub use notifications::{Notification, NotificationCenter};
pub use slot::FileSlot;
