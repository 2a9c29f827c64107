//! Logbook — the capped, newest-first list of immutable log entries.
//!
//! Every state-changing or networked action appends an entry; the list is
//! persisted to the store after each append and capped at the most recent
//! entries. Export writes the full list as formatted JSON named with a
//! timestamp.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Store, keys};

/// Default cap on retained entries (most recent kept).
pub const DEFAULT_CAP: usize = 600;

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Info,
    Warn,
    Bad,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Bad => write!(f, "bad"),
        }
    }
}

/// One immutable log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    /// RFC 3339 timestamp (UTC).
    pub at: String,
    /// Local display time.
    pub time: String,
    pub scope: String,
    pub level: Level,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extra: Option<serde_json::Value>,
}

impl LogEntry {
    /// One-line rendering: `[time] [LEVEL] [scope] message`.
    pub fn to_line(&self) -> String {
        format!(
            "[{}] [{}] [{}] {}",
            self.time,
            self.level.to_string().to_uppercase(),
            self.scope,
            self.message
        )
    }
}

/// Local display time for "last check" style labels.
pub fn display_time() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

// ---------------------------------------------------------------------------
// Logbook
// ---------------------------------------------------------------------------

/// The in-memory log list plus its persistence discipline.
#[derive(Debug)]
pub struct Logbook {
    entries: Vec<LogEntry>,
    cap: usize,
    seq: u64,
}

impl Logbook {
    /// Load persisted entries, newest first, enforcing the cap.
    pub fn load(store: &Store, cap: usize) -> Self {
        let mut entries: Vec<LogEntry> = store.get(keys::LOGS, Vec::new());
        entries.truncate(cap);
        Self {
            entries,
            cap,
            seq: 0,
        }
    }

    /// Append an entry at the front, trim to the cap, and persist.
    pub fn append(
        &mut self,
        store: &mut Store,
        scope: &str,
        level: Level,
        message: String,
        extra: Option<serde_json::Value>,
    ) {
        let now = Utc::now();
        self.seq += 1;
        let entry = LogEntry {
            id: format!("{}-{}", now.timestamp_millis(), self.seq),
            at: now.to_rfc3339(),
            time: display_time(),
            scope: scope.to_string(),
            level,
            message,
            extra,
        };
        self.entries.insert(0, entry);
        self.entries.truncate(self.cap);
        store.set(keys::LOGS, &self.entries);
    }

    /// Drop all entries and persist the empty list.
    pub fn clear(&mut self, store: &mut Store) {
        self.entries.clear();
        store.set(keys::LOGS, &self.entries);
    }

    /// Write the full list as pretty JSON. Default filename carries a
    /// timestamp; returns the path written.
    pub fn export(&self, out: Option<PathBuf>) -> Result<PathBuf> {
        let path = out.unwrap_or_else(|| {
            PathBuf::from(format!(
                "opsdeck-logs-{}.json",
                Local::now().format("%Y%m%d-%H%M%S")
            ))
        });
        let json =
            serde_json::to_string_pretty(&self.entries).context("failed to serialize logs")?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Display time of the most recent entry, if any.
    pub fn last_activity(&self) -> Option<&str> {
        self.entries.first().map(|e| e.time.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
