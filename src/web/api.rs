//! JSON API handlers for the web dashboard.
//!
//! Every mutation goes through [`actions::dispatch`] so the UI-lock guard
//! and logging discipline are identical to the CLI surface. Handlers
//! return a `Response<Cursor<Vec<u8>>>` with JSON content.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tiny_http::{Header, Response, StatusCode};

use crate::actions::{self, Action};
use crate::app::AppState;
use crate::settings::Settings;
use crate::status::Target;
use crate::store::try_parse;
use crate::switches::{self, Switches};
use crate::views::Panel;

use super::content_type_json;

// ---------------------------------------------------------------------------
// Request/response shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TargetRequest {
    #[serde(default)]
    target: Option<String>,
}

#[derive(Deserialize)]
struct RouteRequest {
    route: String,
}

#[derive(Deserialize)]
struct ToggleRequest {
    scope: String,
    key: String,
}

#[derive(Deserialize)]
struct LockRequest {
    locked: bool,
}

/// Full state snapshot for the frontend.
#[derive(Serialize)]
struct StateResponse<'a> {
    route: Panel,
    locked: bool,
    status: &'a crate::status::StatusBoard,
    settings: &'a Settings,
    switches: &'a Switches,
    switch_meta: serde_json::Value,
    last_activity: Option<&'a str>,
    log_count: usize,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

fn bad_request(message: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = json!({ "error": message }).to_string();
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(400)))
}

/// Parse the `?limit=N` query parameter from a URL.
fn parse_limit_param(url: &str) -> Option<usize> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == "limit" { v.parse().ok() } else { None }
    })
}

fn parse_target(key: &str) -> Option<Target> {
    Target::from_key(key)
}

fn switch_meta_json() -> serde_json::Value {
    let mut meta = serde_json::Map::new();
    for scope in switches::SCOPES {
        meta.insert(
            scope.to_string(),
            serde_json::to_value(switches::meta_for(scope)).unwrap_or_default(),
        );
    }
    serde_json::Value::Object(meta)
}

fn dispatch_response(state: &mut AppState, action: Action) -> Result<Response<Cursor<Vec<u8>>>> {
    let notice = actions::dispatch(state, action);
    let body = json!({
        "notice": notice,
        "status": &state.board,
        "locked": state.locked,
        "switches": &state.switches,
        "settings": &state.settings,
    });
    json_response(&body)
}

// ---------------------------------------------------------------------------
// API handlers
// ---------------------------------------------------------------------------

/// `GET /api/state` — the full snapshot the frontend renders from.
pub fn get_state(state: &mut AppState) -> Result<Response<Cursor<Vec<u8>>>> {
    let resp = StateResponse {
        route: state.route,
        locked: state.locked,
        status: &state.board,
        settings: &state.settings,
        switches: &state.switches,
        switch_meta: switch_meta_json(),
        last_activity: state.logbook.last_activity(),
        log_count: state.logbook.entries().len(),
    };
    json_response(&resp)
}

/// `GET /api/rows` — the cached video rows and hero products.
pub fn get_rows(state: &mut AppState) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = json!({
        "rows": &state.rows,
        "products": &state.products,
        "categories": state.settings.categories_list(),
    });
    json_response(&body)
}

/// `GET /api/logs?limit=N` — recent log entries, newest first.
pub fn get_logs(state: &mut AppState, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let limit = parse_limit_param(url).unwrap_or(80);
    let entries: Vec<_> = state.logbook.entries().iter().take(limit).collect();
    let body = json!({
        "entries": entries,
        "total": state.logbook.entries().len(),
    });
    json_response(&body)
}

/// `POST /api/navigate` — set the active panel, triggering its refresh.
pub fn post_navigate(state: &mut AppState, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let req: RouteRequest = match try_parse(body) {
        Ok(req) => req,
        Err(_) => return bad_request("expected {\"route\": \"...\"}"),
    };
    dispatch_response(state, Action::Navigate(Panel::from_route(&req.route)))
}

/// `POST /api/health/run` — one target if given, otherwise all.
pub fn post_health_run(state: &mut AppState, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let req: TargetRequest = try_parse(body).unwrap_or(TargetRequest { target: None });
    let action = match req.target.as_deref() {
        Some(key) => match parse_target(key) {
            Some(target) => Action::RunHealth(target),
            None => return bad_request("unknown target"),
        },
        None => Action::RunHealthAll,
    };
    dispatch_response(state, action)
}

/// `POST /api/health/clear`.
pub fn post_health_clear(state: &mut AppState) -> Result<Response<Cursor<Vec<u8>>>> {
    dispatch_response(state, Action::ClearHealth)
}

/// `POST /api/switches/toggle` — flip one switch in memory.
pub fn post_switch_toggle(state: &mut AppState, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let req: ToggleRequest = match try_parse(body) {
        Ok(req) => req,
        Err(_) => return bad_request("expected {\"scope\": \"...\", \"key\": \"...\"}"),
    };
    dispatch_response(
        state,
        Action::ToggleSwitch {
            scope: req.scope,
            key: req.key,
        },
    )
}

/// `PUT /api/switches` — replace and save the whole switches blob.
pub fn put_switches(state: &mut AppState, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let switches: Switches = match try_parse(body) {
        Ok(s) => s,
        Err(e) => return bad_request(&format!("invalid switches blob: {e}")),
    };
    dispatch_response(state, Action::ReplaceSwitches(switches))
}

/// `POST /api/switches/reset`.
pub fn post_switches_reset(state: &mut AppState) -> Result<Response<Cursor<Vec<u8>>>> {
    dispatch_response(state, Action::ResetSwitches)
}

/// `PUT /api/settings` — replace and save the whole settings blob.
pub fn put_settings(state: &mut AppState, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let settings: Settings = match try_parse(body) {
        Ok(s) => s,
        Err(e) => return bad_request(&format!("invalid settings blob: {e}")),
    };
    dispatch_response(state, Action::ReplaceSettings(settings))
}

/// `POST /api/settings/reset`.
pub fn post_settings_reset(state: &mut AppState) -> Result<Response<Cursor<Vec<u8>>>> {
    dispatch_response(state, Action::ResetSettings)
}

/// `POST /api/logs/clear`.
pub fn post_logs_clear(state: &mut AppState) -> Result<Response<Cursor<Vec<u8>>>> {
    dispatch_response(state, Action::ClearLogs)
}

/// `GET /api/logs/export` — the full log list as a JSON download.
pub fn get_logs_export(state: &mut AppState) -> Result<Response<Cursor<Vec<u8>>>> {
    if state.locked {
        return bad_request("UI is locked.");
    }
    let body = serde_json::to_string_pretty(state.logbook.entries())
        .context("failed to serialize logs")?;
    let filename = format!(
        "opsdeck-logs-{}.json",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    );
    let disposition = Header::from_bytes(
        "Content-Disposition",
        format!("attachment; filename=\"{filename}\""),
    )
    .map_err(|_| anyhow::anyhow!("invalid disposition header"))?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_header(disposition)
        .with_status_code(StatusCode(200)))
}

/// `POST /api/backup` — one target if given, otherwise all.
pub fn post_backup(state: &mut AppState, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let req: TargetRequest = try_parse(body).unwrap_or(TargetRequest { target: None });
    let action = match req.target.as_deref() {
        Some(key) => match parse_target(key) {
            Some(target) => Action::Backup(target),
            None => return bad_request("unknown target"),
        },
        None => Action::BackupAll,
    };
    dispatch_response(state, action)
}

/// `PUT /api/lock`.
pub fn put_lock(state: &mut AppState, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let req: LockRequest = match try_parse(body) {
        Ok(req) => req,
        Err(_) => return bad_request("expected {\"locked\": true|false}"),
    };
    dispatch_response(state, Action::SetLock(req.locked))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
