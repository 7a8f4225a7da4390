//! Save/load persistence
//!
//! Features:
//! - One named slot holding the whole run
//! - Versioned JSON envelope with validation
//! - Pluggable key/value backend (LocalStorage on web, memory elsewhere)
//! - Corrupt saves fail closed, exactly like a missing save

pub mod envelope;

use std::collections::HashMap;

use thiserror::Error;

use crate::sim::RunState;

/// Storage key of the run slot
pub const SAVE_SLOT: &str = "dog_hunter_save";

/// Errors surfaced by save/load
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaveError {
    #[error("no saved game")]
    MissingSave,

    #[error("corrupt save: {0}")]
    CorruptSave(String),

    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl SaveError {
    /// Both mean "nothing to continue from"
    pub fn is_no_save(&self) -> bool {
        matches!(self, SaveError::MissingSave | SaveError::CorruptSave(_))
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        SaveError::CorruptSave(err.to_string())
    }
}

/// Minimal key/value backend for the save slot
pub trait SaveStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError>;
    fn remove(&mut self, key: &str);
}

/// In-memory backend (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Write the run to the slot (last writer wins)
pub fn save(store: &mut impl SaveStore, state: &RunState) -> Result<(), SaveError> {
    let json = envelope::encode(state)?;
    store.write(SAVE_SLOT, &json)?;
    log::info!("Game saved (level {}, score {})", state.level, state.score);
    Ok(())
}

/// Read the run from the slot
pub fn load(store: &impl SaveStore) -> Result<RunState, SaveError> {
    let json = store.read(SAVE_SLOT).ok_or(SaveError::MissingSave)?;
    envelope::decode(&json).inspect_err(|err| log::warn!("Ignoring saved game: {err}"))
}

/// Whether Continue should be offered
pub fn has_save(store: &impl SaveStore) -> bool {
    load(store).is_ok()
}

/// Clear the slot
pub fn clear(store: &mut impl SaveStore) {
    store.remove(SAVE_SLOT);
    log::info!("Saved game cleared");
}
