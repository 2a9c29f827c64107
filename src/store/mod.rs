//! Durable key/value settings store.
//!
//! The store is the process-restart-safe home for everything the dashboard
//! persists: the settings blob, the switches blob, the log list, and the
//! UI-lock flag. It mirrors one flat namespace of named values to a single
//! JSON state file (`~/.opsdeck/state.json` by default), each value held as
//! its serialized JSON text.
//!
//! Error policy: a missing or malformed stored value is treated as absent —
//! `get` returns the caller's fallback and never raises. Writes are
//! synchronous and best-effort; a failed write never takes down an
//! operation that already succeeded in memory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Well-known store keys. Consumers must tolerate any of these being
/// missing or malformed by substituting their documented defaults.
pub mod keys {
    pub const SETTINGS: &str = "settings";
    pub const SWITCHES: &str = "switches";
    pub const LOGS: &str = "logs";
    pub const UI_LOCK: &str = "ui_lock";
}

/// Name of the state file inside the storage directory.
const STATE_FILE: &str = "state.json";

// ---------------------------------------------------------------------------
// try_parse
// ---------------------------------------------------------------------------

/// Parse JSON text into `T`, surfacing the parse error to the caller.
///
/// This is the single deserialization point for every persistence and
/// network boundary in the crate. Callers either propagate the error
/// (validation paths) or substitute a fallback (tolerant paths).
pub fn try_parse<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(text)
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// A flat mapping of named values, each serialized as JSON text, mirrored
/// synchronously to one state file.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Store {
    /// Open the store rooted at the given directory, loading any existing
    /// state file. A missing or malformed file yields an empty store.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STATE_FILE);
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|text| try_parse::<BTreeMap<String, String>>(&text).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    /// Open the store at the default location (`~/.opsdeck/`).
    ///
    /// Falls back to the current directory when no home directory can be
    /// determined.
    pub fn open_default() -> Self {
        Self::open(&default_dir())
    }

    /// Read a value, deserialized from its stored text, or `fallback` when
    /// the key is absent or its text is malformed.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.values.get(key) {
            Some(text) => try_parse(text).unwrap_or(fallback),
            None => fallback,
        }
    }

    /// Serialize a value and write it under `key`, flushing the state file.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        if let Ok(text) = serde_json::to_string(value) {
            self.values.insert(key.to_string(), text);
            self.flush();
        }
    }

    /// Remove a key and flush the state file.
    pub fn delete(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.flush();
        }
    }

    /// The raw stored text for a key, if any. Used by tests to assert that
    /// a guarded action performed no persisted write.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Path of the backing state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(text) = serde_json::to_string_pretty(&self.values) {
            let _ = fs::write(&self.path, text);
        }
    }
}

/// Default storage directory: `~/.opsdeck/`.
pub fn default_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".opsdeck"))
        .unwrap_or_else(|| PathBuf::from(".opsdeck"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
