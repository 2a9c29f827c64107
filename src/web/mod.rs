//! Embedded web dashboard for opsdeck.
//!
//! A lightweight HTTP server (sync, via `tiny_http`) that serves the
//! single-page dashboard frontend plus JSON endpoints mirroring the
//! action dispatcher. Requests are handled sequentially on one thread —
//! the server owns the one `AppState`, so there is never more than one
//! mutator active at a time.
//!
//! Launched via `opsdeck web` (default: `http://127.0.0.1:9760`).

mod api;
mod frontend;

use std::io::{Cursor, Read};

use anyhow::Result;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::app::AppState;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server on the given address. Blocks the current
/// thread; per-request errors are answered as JSON without crashing the
/// server.
pub fn serve(addr: &str, mut state: AppState) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("opsdeck dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let result = dispatch(&mut state, &method, &url, body.as_deref());

        match result {
            Ok(resp) => {
                let _ = request.respond(resp);
            }
            Err(e) => {
                let body = serde_json::json!({ "error": e.to_string() }).to_string();
                let resp = Response::from_data(body.into_bytes())
                    .with_header(content_type_json())
                    .with_status_code(StatusCode(500));
                let _ = request.respond(resp);
            }
        }

        println!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(
    state: &mut AppState,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let path = url.split('?').next().unwrap_or(url);
    let body = body.unwrap_or("{}");

    match (method, path) {
        // Frontend
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),

        // State snapshot
        (&Method::Get, "/api/state") => api::get_state(state),
        (&Method::Get, "/api/rows") => api::get_rows(state),
        (&Method::Get, "/api/logs") => api::get_logs(state, url),

        // Navigation + health
        (&Method::Post, "/api/navigate") => api::post_navigate(state, body),
        (&Method::Post, "/api/health/run") => api::post_health_run(state, body),
        (&Method::Post, "/api/health/clear") => api::post_health_clear(state),

        // Switches
        (&Method::Post, "/api/switches/toggle") => api::post_switch_toggle(state, body),
        (&Method::Put, "/api/switches") => api::put_switches(state, body),
        (&Method::Post, "/api/switches/reset") => api::post_switches_reset(state),

        // Settings
        (&Method::Put, "/api/settings") => api::put_settings(state, body),
        (&Method::Post, "/api/settings/reset") => api::post_settings_reset(state),

        // Logs
        (&Method::Post, "/api/logs/clear") => api::post_logs_clear(state),
        (&Method::Get, "/api/logs/export") => api::get_logs_export(state),

        // Backup + lock
        (&Method::Post, "/api/backup") => api::post_backup(state, body),
        (&Method::Put, "/api/lock") => api::put_lock(state, body),

        // 404
        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = r#"{"error": "not found"}"#;
    Response::from_data(body.as_bytes().to_vec())
        .with_header(content_type_json())
        .with_status_code(StatusCode(404))
}

pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}
