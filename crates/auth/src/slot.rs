//! Durable key-value slot holding the serialized session.

use std::sync::{Arc, Mutex};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlotError {
    #[error("session slot io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session slot unavailable: {0}")]
    Unavailable(String),
}

/// A single durable slot for the serialized session.
///
/// The slot stores raw text; interpreting it is the session store's job, so a
/// slot never fails because of malformed content.
pub trait SessionSlot {
    fn load(&self) -> Result<Option<String>, SlotError>;
    fn store(&self, value: &str) -> Result<(), SlotError>;
    /// Remove the value. Clearing an empty slot succeeds.
    fn clear(&self) -> Result<(), SlotError>;
}

impl<S> SessionSlot for Arc<S>
where
    S: SessionSlot + ?Sized,
{
    fn load(&self) -> Result<Option<String>, SlotError> {
        (**self).load()
    }

    fn store(&self, value: &str) -> Result<(), SlotError> {
        (**self).store(value)
    }

    fn clear(&self) -> Result<(), SlotError> {
        (**self).clear()
    }
}

/// In-memory slot for tests/dev. Share it behind an `Arc` to simulate a
/// restart with a second store.
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl SessionSlot for MemorySlot {
    fn load(&self) -> Result<Option<String>, SlotError> {
        let guard = self
            .value
            .lock()
            .map_err(|_| SlotError::Unavailable("lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn store(&self, value: &str) -> Result<(), SlotError> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| SlotError::Unavailable("lock poisoned".into()))?;
        *guard = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SlotError> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| SlotError::Unavailable("lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}
