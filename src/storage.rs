//! Cart Storage
//!
//! The durable per-session key-value slot the cart's item list is flushed
//! to and rehydrated from. Two implementations ship with the crate: an
//! in-memory slot for tests and short-lived sessions, and a JSON-file slot
//! for local durable storage.

use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use mockall::automock;
use thiserror::Error;

/// Default key for the session cart slot.
pub const DEFAULT_SLOT_KEY: &str = "tuckshop.cart";

/// Errors from reading or writing a durable slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Underlying I/O failure.
    #[error("slot io failure")]
    Io(#[from] io::Error),

    /// Payload could not be encoded or decoded.
    #[error("slot payload is not valid json")]
    Codec(#[from] serde_json::Error),
}

/// Durable per-session key-value slot.
///
/// Writes are last-write-wins; a `read` of a never-written key yields `None`.
#[automock]
pub trait CartSlot {
    /// Replace the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotError`] if the write fails.
    fn write(&self, key: &str, payload: &str) -> Result<(), SlotError>;

    /// Read the payload stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotError`] if the read fails.
    fn read(&self, key: &str) -> Result<Option<String>, SlotError>;
}

/// In-memory slot. Contents die with the process.
#[derive(Debug, Default)]
pub struct MemoryCartSlot {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCartSlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartSlot for MemoryCartSlot {
    fn write(&self, key: &str, payload: &str) -> Result<(), SlotError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        entries.insert(key.to_owned(), payload.to_owned());

        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        Ok(entries.get(key).cloned())
    }
}

/// Slot backed by one JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileCartSlot {
    dir: PathBuf,
}

impl JsonFileCartSlot {
    /// Create a slot rooted at the given directory.
    ///
    /// The directory is created on first write, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartSlot for JsonFileCartSlot {
    fn write(&self, key: &str, payload: &str) -> Result<(), SlotError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), payload)?;

        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(SlotError::Io(error)),
        }
    }
}
