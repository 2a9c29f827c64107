//! Status cache and refresh orchestration.
//!
//! Each monitored target owns one slot in the [`StatusBoard`]; a refresh
//! replaces that slot wholesale with the outcome of a single bounded-time
//! call. The state machine per call is exactly four states: `unknown`
//! (initial), `good`, `warn` (configuration absent — no call attempted),
//! and `bad` (transport failure or remote rejection). No retries.
//!
//! `refresh_all` runs the per-target refresh sequentially with a fixed
//! pause between calls so results land in a deterministic order; nothing
//! requires the serialization beyond that.

use std::thread;
use std::time::Duration;

use serde::Serialize;
use serde_json::json;

use crate::app::{AppState, Notice};
use crate::client::join_url;
use crate::logbook::{Level, display_time};
use crate::rows;

/// Pause between targets in a refresh-all or backup-all sweep.
const SWEEP_PAUSE_MS: u64 = 250;

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// One externally monitored project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Orchestrator,
    Videos,
    Hero,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Orchestrator, Target::Videos, Target::Hero];

    pub fn key(self) -> &'static str {
        match self {
            Self::Orchestrator => "orchestrator",
            Self::Videos => "videos",
            Self::Hero => "hero",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Orchestrator => "Orchestrator",
            Self::Videos => "Video Queue",
            Self::Hero => "Hero Feed",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "orchestrator" => Some(Self::Orchestrator),
            "videos" => Some(Self::Videos),
            "hero" => Some(Self::Hero),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Status results
// ---------------------------------------------------------------------------

/// Last-known health of a target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    #[default]
    Unknown,
    Good,
    Warn,
    Bad,
}

impl StatusKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Good => "good",
            Self::Warn => "warn",
            Self::Bad => "bad",
        }
    }
}

/// One target's cached result. Replaced wholesale on every check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetStatus {
    pub status: StatusKind,
    pub note: String,
    /// Display time of the last check; `None` until first checked.
    pub at: Option<String>,
}

impl Default for TargetStatus {
    fn default() -> Self {
        Self {
            status: StatusKind::Unknown,
            note: "—".to_string(),
            at: None,
        }
    }
}

impl TargetStatus {
    fn good(note: impl Into<String>, at: &str) -> Self {
        Self {
            status: StatusKind::Good,
            note: note.into(),
            at: Some(at.to_string()),
        }
    }

    fn warn(note: impl Into<String>, at: &str) -> Self {
        Self {
            status: StatusKind::Warn,
            note: note.into(),
            at: Some(at.to_string()),
        }
    }

    fn bad(note: impl Into<String>, at: &str) -> Self {
        Self {
            status: StatusKind::Bad,
            note: note.into(),
            at: Some(at.to_string()),
        }
    }
}

/// The in-memory record of the most recent result per target.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusBoard {
    pub orchestrator: TargetStatus,
    pub videos: TargetStatus,
    pub hero: TargetStatus,
}

impl StatusBoard {
    pub fn get(&self, target: Target) -> &TargetStatus {
        match target {
            Target::Orchestrator => &self.orchestrator,
            Target::Videos => &self.videos,
            Target::Hero => &self.hero,
        }
    }

    fn set(&mut self, target: Target, status: TargetStatus) {
        match target {
            Target::Orchestrator => self.orchestrator = status,
            Target::Videos => self.videos = status,
            Target::Hero => self.hero = status,
        }
    }
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

/// Run one health check for a target and replace its slot with the
/// outcome. Unconfigured targets never attempt a network call.
pub fn refresh(state: &mut AppState, target: Target) -> TargetStatus {
    let result = match target {
        Target::Orchestrator => check_orchestrator(state),
        Target::Videos => check_table(state, target),
        Target::Hero => check_table(state, target),
    };
    state.board.set(target, result.clone());
    result
}

/// Refresh every target in a fixed order, pausing briefly between calls.
pub fn refresh_all(state: &mut AppState) {
    state.log("system", Level::Info, "Global health check started.", None);
    for (i, target) in Target::ALL.into_iter().enumerate() {
        if i > 0 {
            thread::sleep(Duration::from_millis(SWEEP_PAUSE_MS));
        }
        refresh(state, target);
    }
    state.log("system", Level::Info, "Global health check finished.", None);
}

/// Reset every target to the unknown state wholesale.
pub fn clear(state: &mut AppState) {
    state.board = StatusBoard::default();
    state.rows.clear();
    state.products.clear();
    state.log("system", Level::Warn, "Health results cleared.", None);
}

fn check_orchestrator(state: &mut AppState) -> TargetStatus {
    let at = display_time();
    let base = state.settings.orchestrator.base_url.trim().to_string();

    if base.is_empty() {
        state.log(
            Target::Orchestrator.key(),
            Level::Warn,
            "Health check skipped (API not set).",
            None,
        );
        return TargetStatus::warn("API not set", &at);
    }

    let url = join_url(&base, "health");
    match state.client.get_json(&url, &[]) {
        Ok(r) if r.ok => {
            let note = r
                .data
                .get("status")
                .and_then(|v| v.as_str())
                .unwrap_or("OK")
                .to_string();
            state.log(
                Target::Orchestrator.key(),
                Level::Info,
                format!("Health OK ({note})."),
                Some(r.data),
            );
            TargetStatus::good(note, &at)
        }
        Ok(r) => {
            state.log(
                Target::Orchestrator.key(),
                Level::Bad,
                format!("Health FAILED (HTTP {}).", r.status),
                Some(r.data),
            );
            TargetStatus::bad(format!("HTTP {}", r.status), &at)
        }
        Err(err) => {
            state.log(
                Target::Orchestrator.key(),
                Level::Bad,
                "Health FAILED (network error).",
                Some(json!({ "error": err.to_string() })),
            );
            TargetStatus::bad("network error", &at)
        }
    }
}

/// Table-read health check for the videos and hero targets. On success the
/// matching row cache is replaced wholesale with the returned array.
fn check_table(state: &mut AppState, target: Target) -> TargetStatus {
    let at = display_time();

    if state.settings.table_store.url.trim().is_empty() {
        state.log(
            target.key(),
            Level::Warn,
            "Table read skipped (store not set).",
            None,
        );
        return TargetStatus::warn("store not set", &at);
    }

    let url = match target {
        Target::Videos => rows::videos_read_url(&state.settings),
        _ => rows::products_read_url(&state.settings),
    };
    let api_key = state.settings.table_store.api_key.clone();
    let bearer = format!("Bearer {api_key}");
    let headers: [(&str, &str); 2] = [("apikey", &api_key), ("Authorization", &bearer)];

    match state.client.get_json(&url, &headers) {
        Ok(r) if r.ok => {
            let parsed = rows::rows_from_json(&r.data);
            let count = parsed.len();
            match target {
                Target::Videos => state.rows = parsed,
                _ => state.products = parsed,
            }
            state.log(
                target.key(),
                Level::Info,
                format!("Table read OK ({count} rows)."),
                None,
            );
            TargetStatus::good(format!("{count} rows"), &at)
        }
        Ok(r) => {
            state.log(
                target.key(),
                Level::Bad,
                format!("Table read FAILED (HTTP {}).", r.status),
                Some(r.data),
            );
            TargetStatus::bad(format!("HTTP {}", r.status), &at)
        }
        Err(err) => {
            state.log(
                target.key(),
                Level::Bad,
                "Table read FAILED (network error).",
                Some(json!({ "error": err.to_string() })),
            );
            TargetStatus::bad("network error", &at)
        }
    }
}

// ---------------------------------------------------------------------------
// Backups
// ---------------------------------------------------------------------------

/// Trigger a backup for one target scope against the orchestrator API.
///
/// Gated on the global backups switch; unconfigured bases produce a
/// simulated outcome rather than a call. Tri-state outcome handling
/// mirrors the health checks.
pub fn backup(state: &mut AppState, target: Target) -> Notice {
    if !state.switches.global.feature_backups {
        state.log(
            "system",
            Level::Warn,
            "Backup blocked: global backups disabled.",
            None,
        );
        return Notice::warn("Backups are disabled by switch.");
    }

    let at = display_time();
    let base = state.settings.orchestrator.base_url.trim().to_string();

    if base.is_empty() {
        state.log(
            target.key(),
            Level::Warn,
            "Backup simulated (API not set).",
            Some(json!({ "at": at })),
        );
        return Notice::warn(format!("{}: API not set (simulated backup).", target.name()));
    }

    let url = join_url(&base, "backup");
    let body = json!({ "scope": target.key(), "at": at });
    match state.client.post_json(&url, &body, &[]) {
        Ok(r) if r.ok => {
            state.log(target.key(), Level::Info, "Backup OK.", Some(r.data));
            Notice::info(format!("{}: Backup OK", target.name()))
        }
        Ok(r) => {
            state.log(
                target.key(),
                Level::Bad,
                format!("Backup FAILED (HTTP {}).", r.status),
                Some(r.data),
            );
            Notice::bad(format!("{}: Backup failed (HTTP {})", target.name(), r.status))
        }
        Err(err) => {
            state.log(
                target.key(),
                Level::Bad,
                "Backup FAILED (network error).",
                Some(json!({ "error": err.to_string() })),
            );
            Notice::bad(format!("{}: Backup network error", target.name()))
        }
    }
}

/// Trigger backups for every target sequentially.
pub fn backup_all(state: &mut AppState) -> Notice {
    state.log("system", Level::Info, "Backup all started.", None);
    for (i, target) in Target::ALL.into_iter().enumerate() {
        if i > 0 {
            thread::sleep(Duration::from_millis(SWEEP_PAUSE_MS));
        }
        backup(state, target);
    }
    state.log("system", Level::Info, "Backup all finished.", None);
    Notice::info("Backup all complete.")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
