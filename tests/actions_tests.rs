//! Action dispatcher tests: lock guard, save/reset semantics, log
//! retention, export round-trip, and categories validation.

use opsdeck::actions::{self, Action};
use opsdeck::app::AppState;
use opsdeck::config::AppConfig;
use opsdeck::logbook::{Level, LogEntry};
use opsdeck::settings::Settings;
use opsdeck::status::Target;
use opsdeck::store::{Store, keys};
use opsdeck::switches::Switches;
use opsdeck::views::Panel;

fn test_state() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path());
    (dir, AppState::with_store(store, &AppConfig::default()))
}

// ---------------------------------------------------------------------------
// Lock guard
// ---------------------------------------------------------------------------

#[test]
fn locked_toggle_mutates_nothing_and_writes_nothing() {
    let (_dir, mut state) = test_state();
    actions::dispatch(&mut state, Action::SetLock(true));
    let switches_before = state.switches.clone();
    let raw_before = state.store.raw(keys::SWITCHES).map(str::to_string);
    let log_len_before = state.logbook.entries().len();

    let notice = actions::dispatch(
        &mut state,
        Action::ToggleSwitch {
            scope: "global".into(),
            key: "feature_backups".into(),
        },
    );

    assert_eq!(notice.level, Level::Warn);
    assert_eq!(notice.message, "UI is locked.");
    assert_eq!(state.switches, switches_before);
    assert_eq!(
        state.store.raw(keys::SWITCHES).map(str::to_string),
        raw_before
    );
    assert_eq!(state.logbook.entries().len(), log_len_before);
}

#[test]
fn locked_blocks_every_mutating_action() {
    let (dir, mut state) = test_state();
    actions::dispatch(&mut state, Action::SetLock(true));

    let mutating = [
        Action::ClearHealth,
        Action::SaveSwitches,
        Action::ResetSwitches,
        Action::SetSetting {
            key: "videos.table".into(),
            value: "other".into(),
        },
        Action::ResetSettings,
        Action::ClearLogs,
        Action::ExportLogs {
            out: Some(dir.path().join("blocked.json")),
        },
        Action::Backup(Target::Orchestrator),
        Action::BackupAll,
    ];
    for action in mutating {
        let notice = actions::dispatch(&mut state, action.clone());
        assert_eq!(notice.message, "UI is locked.", "action {action:?}");
    }
    assert!(!dir.path().join("blocked.json").exists());
}

#[test]
fn health_runs_stay_available_while_locked() {
    let (_dir, mut state) = test_state();
    actions::dispatch(&mut state, Action::SetLock(true));
    let notice = actions::dispatch(&mut state, Action::RunHealth(Target::Orchestrator));
    assert_ne!(notice.message, "UI is locked.");
}

#[test]
fn lock_flag_is_persisted_immediately() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = Store::open(dir.path());
        let mut state = AppState::with_store(store, &AppConfig::default());
        actions::dispatch(&mut state, Action::SetLock(true));
    }
    let store = Store::open(dir.path());
    let state = AppState::with_store(store, &AppConfig::default());
    assert!(state.locked);
}

// ---------------------------------------------------------------------------
// Save / reset
// ---------------------------------------------------------------------------

#[test]
fn reset_switches_is_deep_equal_to_defaults() {
    let (_dir, mut state) = test_state();
    for (scope, key) in [
        ("global", "maintenance_mode"),
        ("videos", "enable_publish"),
        ("hero", "enable_feed"),
    ] {
        actions::dispatch(
            &mut state,
            Action::ToggleSwitch {
                scope: scope.into(),
                key: key.into(),
            },
        );
    }
    actions::dispatch(&mut state, Action::SaveSwitches);
    actions::dispatch(&mut state, Action::ResetSwitches);

    assert_eq!(state.switches, Switches::default());
    // The persisted blob matches the defaults too.
    let persisted: Switches = state.store.get(keys::SWITCHES, Switches::default());
    assert_eq!(persisted, Switches::default());
}

#[test]
fn reset_settings_is_deep_equal_to_defaults() {
    let (_dir, mut state) = test_state();
    actions::dispatch(
        &mut state,
        Action::SetSetting {
            key: "orchestrator.base_url".into(),
            value: "http://somewhere".into(),
        },
    );
    actions::dispatch(&mut state, Action::ResetSettings);
    assert_eq!(state.settings, Settings::default());
}

#[test]
fn settings_persist_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = Store::open(dir.path());
        let mut state = AppState::with_store(store, &AppConfig::default());
        actions::dispatch(
            &mut state,
            Action::SetSetting {
                key: "videos.columns".into(),
                value: "name,state,url,language".into(),
            },
        );
    }
    let store = Store::open(dir.path());
    let state = AppState::with_store(store, &AppConfig::default());
    assert_eq!(state.settings.videos.columns, "name,state,url,language");
}

// ---------------------------------------------------------------------------
// Categories validation
// ---------------------------------------------------------------------------

#[test]
fn saving_non_array_categories_reports_error_and_keeps_old_value() {
    let (_dir, mut state) = test_state();
    actions::dispatch(
        &mut state,
        Action::SetSetting {
            key: "hero.categories".into(),
            value: r#"[{"name":"gadgets"}]"#.into(),
        },
    );

    let notice = actions::dispatch(
        &mut state,
        Action::SetSetting {
            key: "hero.categories".into(),
            value: "\"not an array\"".into(),
        },
    );

    assert_eq!(notice.level, Level::Bad);
    assert_eq!(state.settings.hero.categories, r#"[{"name":"gadgets"}]"#);
    let persisted = Settings::load(&state.store);
    assert_eq!(persisted.hero.categories, r#"[{"name":"gadgets"}]"#);
}

#[test]
fn replace_settings_validates_categories_too() {
    let (_dir, mut state) = test_state();
    let mut bad = Settings::default();
    bad.hero.categories = "\"not an array\"".to_string();
    let notice = actions::dispatch(&mut state, Action::ReplaceSettings(bad));
    assert_eq!(notice.level, Level::Bad);
    assert_eq!(state.settings, Settings::default());
}

// ---------------------------------------------------------------------------
// Logbook retention and export
// ---------------------------------------------------------------------------

#[test]
fn log_list_never_exceeds_cap_and_is_newest_first() {
    let (_dir, mut state) = test_state();
    for i in 0..650 {
        state.log("system", Level::Info, format!("entry {i}"), None);
    }
    assert_eq!(state.logbook.entries().len(), 600);
    assert_eq!(state.logbook.entries()[0].message, "entry 649");
    assert_eq!(state.logbook.entries()[599].message, "entry 50");
}

#[test]
fn export_round_trips_to_the_in_memory_list() {
    let (dir, mut state) = test_state();
    actions::dispatch(&mut state, Action::Navigate(Panel::Overview));
    state.log(
        "videos",
        Level::Warn,
        "store not set",
        Some(serde_json::json!({"hint": "configure table_store.url"})),
    );

    let out = dir.path().join("logs.json");
    let notice = actions::dispatch(
        &mut state,
        Action::ExportLogs {
            out: Some(out.clone()),
        },
    );
    assert_eq!(notice.level, Level::Info);

    let text = std::fs::read_to_string(&out).unwrap();
    let parsed: Vec<LogEntry> = serde_json::from_str(&text).unwrap();
    // The export itself logged one more entry after the file was written,
    // so compare against everything but that newest record.
    assert_eq!(parsed.as_slice(), &state.logbook.entries()[1..]);
}

#[test]
fn clear_logs_empties_the_persisted_list() {
    let (_dir, mut state) = test_state();
    state.log("system", Level::Info, "one", None);
    actions::dispatch(&mut state, Action::ClearLogs);
    assert!(state.logbook.entries().is_empty());
    let persisted: Vec<LogEntry> = state.store.get(keys::LOGS, Vec::new());
    assert!(persisted.is_empty());
}

#[test]
fn feature_logs_switch_gates_recording() {
    let (_dir, mut state) = test_state();
    state.switches.global.feature_logs = false;
    state.log("system", Level::Info, "dropped", None);
    assert!(state.logbook.entries().is_empty());
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[test]
fn navigation_validates_routes_and_is_idempotent() {
    let (_dir, mut state) = test_state();
    actions::dispatch(&mut state, Action::Navigate(Panel::from_route("bogus")));
    assert_eq!(state.route, Panel::Overview);

    actions::dispatch(&mut state, Action::Navigate(Panel::Switches));
    assert_eq!(state.route, Panel::Switches);
    actions::dispatch(&mut state, Action::Navigate(Panel::Switches));
    assert_eq!(state.route, Panel::Switches);
}

// ---------------------------------------------------------------------------
// Backups
// ---------------------------------------------------------------------------

#[test]
fn backup_disabled_by_switch_logs_blocked_action() {
    let (_dir, mut state) = test_state();
    state.switches.global.feature_backups = false;
    let notice = actions::dispatch(&mut state, Action::Backup(Target::Hero));
    assert_eq!(notice.level, Level::Warn);
    assert!(notice.message.contains("disabled"));
    assert!(state.logbook.entries()[0].message.contains("blocked"));
}

#[test]
fn backup_without_base_is_simulated_and_logged() {
    let (_dir, mut state) = test_state();
    let notice = actions::dispatch(&mut state, Action::Backup(Target::Videos));
    assert!(notice.message.contains("simulated"));
    let entry = &state.logbook.entries()[0];
    assert_eq!(entry.scope, "videos");
    assert_eq!(entry.level, Level::Warn);
}
