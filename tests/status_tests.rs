//! Refresh orchestration tests against stub HTTP servers.
//!
//! Each stub is a real `tiny_http` listener on an ephemeral port, so the
//! health-check and table-read paths exercise the full fetch adapter:
//! timeouts, status handling, JSON parsing, and header propagation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};
use std::thread;

use opsdeck::app::AppState;
use opsdeck::config::AppConfig;
use opsdeck::rows::rows_from_json;
use opsdeck::status::{self, StatusKind, Target};
use opsdeck::store::Store;
use tiny_http::{Response, Server, StatusCode};

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

fn test_state() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path());
    (dir, AppState::with_store(store, &AppConfig::default()))
}

struct Stub {
    base: String,
    hits: Arc<AtomicUsize>,
    headers: Arc<Mutex<Vec<(String, String)>>>,
}

/// Spawn a stub server answering every request with the given status and
/// body. The server thread lives for the rest of the test process.
fn spawn_stub(status: u16, body: &'static str) -> Stub {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let headers: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));

    let thread_hits = Arc::clone(&hits);
    let thread_headers = Arc::clone(&headers);
    thread::spawn(move || {
        for request in server.incoming_requests() {
            thread_hits.fetch_add(1, Ordering::SeqCst);
            {
                let mut seen = thread_headers.lock().unwrap();
                for header in request.headers() {
                    seen.push((header.field.to_string(), header.value.to_string()));
                }
            }
            let resp = Response::from_string(body).with_status_code(StatusCode(status));
            let _ = request.respond(resp);
        }
    });

    Stub {
        base: format!("http://{addr}"),
        hits,
        headers,
    }
}

/// An address that is guaranteed closed: bind an ephemeral port, then drop
/// the listener.
fn closed_port_base() -> String {
    static BASE: OnceLock<String> = OnceLock::new();
    BASE.get_or_init(|| {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    })
    .clone()
}

// ---------------------------------------------------------------------------
// Health checks
// ---------------------------------------------------------------------------

#[test]
fn unset_base_yields_warn_without_a_call() {
    let (_dir, mut state) = test_state();
    let result = status::refresh(&mut state, Target::Orchestrator);
    assert_eq!(result.status, StatusKind::Warn);
    assert_eq!(result.note, "API not set");
    assert!(result.at.is_some());
}

#[test]
fn healthy_endpoint_yields_good_with_body_status() {
    let stub = spawn_stub(200, r#"{"status":"ok"}"#);
    let (_dir, mut state) = test_state();
    state.settings.orchestrator.base_url = stub.base.clone();

    let result = status::refresh(&mut state, Target::Orchestrator);
    assert_eq!(result.status, StatusKind::Good);
    assert_eq!(result.note, "ok");
    assert_eq!(stub.hits.load(Ordering::SeqCst), 1);
}

#[test]
fn http_500_yields_bad_with_the_code() {
    let stub = spawn_stub(500, r#"{"error":"down"}"#);
    let (_dir, mut state) = test_state();
    state.settings.orchestrator.base_url = stub.base.clone();

    let result = status::refresh(&mut state, Target::Orchestrator);
    assert_eq!(result.status, StatusKind::Bad);
    assert_eq!(result.note, "HTTP 500");
}

#[test]
fn transport_failure_yields_bad_network_error() {
    let (_dir, mut state) = test_state();
    state.settings.orchestrator.base_url = closed_port_base();

    let result = status::refresh(&mut state, Target::Orchestrator);
    assert_eq!(result.status, StatusKind::Bad);
    assert_eq!(result.note, "network error");
    // Never left in the initial state after a failed call.
    assert_ne!(
        state.board.get(Target::Orchestrator).status,
        StatusKind::Unknown
    );
}

#[test]
fn non_json_health_body_is_tolerated() {
    let stub = spawn_stub(200, "alive");
    let (_dir, mut state) = test_state();
    state.settings.orchestrator.base_url = stub.base.clone();

    let result = status::refresh(&mut state, Target::Orchestrator);
    // The raw-text wrapper has no status field, so the note falls back.
    assert_eq!(result.status, StatusKind::Good);
    assert_eq!(result.note, "OK");
}

// ---------------------------------------------------------------------------
// Table reads
// ---------------------------------------------------------------------------

const QUEUE_BODY: &str = r#"[
  {"title":"intro","status":"queued","video_url":"http://v/1","lang":"en"},
  {"title":"howto","status":"rendering","video_url":"http://v/2","lang":"de"},
  {"title":"promo","status":"done","video_url":"http://v/3","lang":"fr"}
]"#;

#[test]
fn table_read_caches_rows_verbatim() {
    let stub = spawn_stub(200, QUEUE_BODY);
    let (_dir, mut state) = test_state();
    state.settings.table_store.url = stub.base.clone();
    state.settings.table_store.api_key = "secret-key".to_string();

    let result = status::refresh(&mut state, Target::Videos);
    assert_eq!(result.status, StatusKind::Good);
    assert_eq!(result.note, "3 rows");
    assert_eq!(state.rows.len(), 3);

    let expected = rows_from_json(&serde_json::from_str(QUEUE_BODY).unwrap());
    assert_eq!(state.rows, expected);

    let headers = stub.headers.lock().unwrap();
    assert!(
        headers
            .iter()
            .any(|(k, v)| k.eq_ignore_ascii_case("apikey") && v == "secret-key")
    );
    assert!(
        headers
            .iter()
            .any(|(k, v)| k.eq_ignore_ascii_case("authorization") && v == "Bearer secret-key")
    );
}

#[test]
fn unset_store_yields_warn_without_a_call() {
    let (_dir, mut state) = test_state();
    let result = status::refresh(&mut state, Target::Videos);
    assert_eq!(result.status, StatusKind::Warn);
    assert_eq!(result.note, "store not set");
    assert!(state.rows.is_empty());
}

#[test]
fn non_array_table_body_is_an_empty_result() {
    let stub = spawn_stub(200, r#"{"message":"unexpected"}"#);
    let (_dir, mut state) = test_state();
    state.settings.table_store.url = stub.base.clone();

    let result = status::refresh(&mut state, Target::Videos);
    assert_eq!(result.status, StatusKind::Good);
    assert_eq!(result.note, "0 rows");
    assert!(state.rows.is_empty());
}

#[test]
fn table_read_http_error_keeps_old_cache() {
    let good = spawn_stub(200, QUEUE_BODY);
    let (_dir, mut state) = test_state();
    state.settings.table_store.url = good.base.clone();
    status::refresh(&mut state, Target::Videos);
    assert_eq!(state.rows.len(), 3);

    let bad = spawn_stub(503, "overloaded");
    state.settings.table_store.url = bad.base.clone();
    let result = status::refresh(&mut state, Target::Videos);
    assert_eq!(result.status, StatusKind::Bad);
    assert_eq!(result.note, "HTTP 503");
    // A failed refresh does not clobber the previous rows.
    assert_eq!(state.rows.len(), 3);
}

#[test]
fn hero_refresh_fills_products() {
    let stub = spawn_stub(200, r#"[{"name":"lamp"},{"name":"desk"}]"#);
    let (_dir, mut state) = test_state();
    state.settings.table_store.url = stub.base.clone();

    let result = status::refresh(&mut state, Target::Hero);
    assert_eq!(result.status, StatusKind::Good);
    assert_eq!(state.products.len(), 2);
    assert!(state.rows.is_empty());
}

// ---------------------------------------------------------------------------
// Refresh all
// ---------------------------------------------------------------------------

#[test]
fn refresh_all_touches_every_target() {
    let orch = spawn_stub(200, r#"{"status":"ok"}"#);
    let (_dir, mut state) = test_state();
    state.settings.orchestrator.base_url = orch.base.clone();
    // Table store left unset: videos and hero go warn, not bad.

    status::refresh_all(&mut state);

    assert_eq!(
        state.board.get(Target::Orchestrator).status,
        StatusKind::Good
    );
    assert_eq!(state.board.get(Target::Videos).status, StatusKind::Warn);
    assert_eq!(state.board.get(Target::Hero).status, StatusKind::Warn);
}

#[test]
fn clear_resets_every_target_wholesale() {
    let (_dir, mut state) = test_state();
    status::refresh(&mut state, Target::Orchestrator);
    status::clear(&mut state);
    for target in Target::ALL {
        assert_eq!(state.board.get(target).status, StatusKind::Unknown);
        assert!(state.board.get(target).at.is_none());
    }
}
