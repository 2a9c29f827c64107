//! Application state — the single owner of every entity the dashboard
//! holds: durable store, settings, switches, logbook, lock flag, status
//! cache, and the ephemeral row caches.
//!
//! There is exactly one `AppState` per process, created by the controller
//! and passed by reference to renderers and action handlers. No ambient
//! singletons.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::client::HttpClient;
use crate::config::AppConfig;
use crate::logbook::{Level, Logbook};
use crate::rows::Row;
use crate::settings::Settings;
use crate::status::StatusBoard;
use crate::store::{Store, keys};
use crate::switches::Switches;
use crate::views::Panel;

/// The transient user-visible result of a dispatched action — the toast
/// analog. Every action yields one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warn,
            message: message.into(),
        }
    }

    pub fn bad(message: impl Into<String>) -> Self {
        Self {
            level: Level::Bad,
            message: message.into(),
        }
    }
}

/// Process-wide mutable state. Mutated only between suspension points by
/// the single logical thread; the store is the lone durable resource.
#[derive(Debug)]
pub struct AppState {
    pub store: Store,
    pub settings: Settings,
    pub switches: Switches,
    pub logbook: Logbook,
    pub locked: bool,
    pub board: StatusBoard,
    /// Video-queue rows from the last refresh. Never persisted.
    pub rows: Vec<Row>,
    /// Hero products from the last refresh. Never persisted.
    pub products: Vec<Row>,
    pub route: Panel,
    pub client: HttpClient,
}

impl AppState {
    /// Load all persisted entities from the configured store location.
    pub fn load(config: &AppConfig) -> Self {
        let dir = if config.storage.dir.trim().is_empty() {
            crate::store::default_dir()
        } else {
            PathBuf::from(config.storage.dir.trim())
        };
        Self::with_store(Store::open(&dir), config)
    }

    /// Build state on top of an already-opened store. Used by `load` and
    /// by tests that point at a temporary directory.
    pub fn with_store(store: Store, config: &AppConfig) -> Self {
        let settings = Settings::load(&store);
        let switches = Switches::load(&store);
        let logbook = Logbook::load(&store, config.logbook.cap);
        let locked = store.get(keys::UI_LOCK, false);
        Self {
            store,
            settings,
            switches,
            logbook,
            locked,
            board: StatusBoard::default(),
            rows: Vec::new(),
            products: Vec::new(),
            route: Panel::Overview,
            client: HttpClient::new(Duration::from_millis(config.http.timeout_ms)),
        }
    }

    /// Append a log entry, honoring the `feature_logs` switch.
    pub fn log(&mut self, scope: &str, level: Level, message: impl Into<String>, extra: Option<Value>) {
        if !self.switches.global.feature_logs {
            return;
        }
        self.logbook
            .append(&mut self.store, scope, level, message.into(), extra);
    }

    /// Persist the lock flag immediately.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        self.store.set(keys::UI_LOCK, &locked);
    }
}
