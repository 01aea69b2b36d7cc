//! File-backed session slot (the durable replacement for browser storage).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use learnhub_auth::{SessionSlot, SlotError};

/// File name used inside the data directory.
pub const SESSION_FILE_NAME: &str = "lms_session.json";

/// Stores the serialized session in a single file.
///
/// Writes go to a sibling temp file that is then renamed over the slot, so a
/// crash mid-write leaves either the old value or the new one.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<platform data dir>/learnhub/lms_session.json`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("learnhub").join(SESSION_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| SESSION_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionSlot for FileSlot {
    fn load(&self) -> Result<Option<String>, SlotError> {
        match fs::read(&self.path) {
            // Non UTF-8 content is passed through lossily; the session store
            // rejects it as malformed and clears the slot.
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, value: &str) -> Result<(), SlotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "session slot written");
        Ok(())
    }

    fn clear(&self) -> Result<(), SlotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "session slot cleared");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
