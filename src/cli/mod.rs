//! CLI command implementations for the opsdeck panels and actions.
//!
//! Each handler loads the resolved app config and state, dispatches one
//! action (or renders one panel), prints the result, and exits. Because a
//! CLI invocation is a fresh process, switch toggles save in the same
//! invocation; the in-memory toggle-then-save split still drives the web
//! dashboard and the action tests.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use crate::actions::{self, Action};
use crate::app::{AppState, Notice};
use crate::config;
use crate::logbook::Level;
use crate::status::Target;
use crate::views::{Panel, panels};
use crate::web;

fn load_state() -> AppState {
    AppState::load(&config::load())
}

fn print_notice(notice: &Notice) {
    let line = match notice.level {
        Level::Info => notice.message.normal(),
        Level::Warn => notice.message.yellow(),
        Level::Bad => notice.message.red(),
    };
    println!("{line}");
}

fn parse_target(key: &str) -> Result<Target> {
    Target::from_key(key).ok_or_else(|| {
        anyhow::anyhow!("unknown target '{key}' (expected orchestrator, videos, or hero)")
    })
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

/// `opsdeck show [route]` — navigate to a panel (refreshing its target if
/// it has one) and render it.
pub fn run_show(route: Option<&str>) -> Result<()> {
    let mut state = load_state();
    let panel = Panel::from_route(route.unwrap_or("overview"));
    actions::dispatch(&mut state, Action::Navigate(panel));
    print!("{}", panels::render(&state));
    Ok(())
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// `opsdeck health [--target T]` — run one or all health checks and show
/// the resulting grid.
pub fn run_health(target: Option<&str>) -> Result<()> {
    let mut state = load_state();
    let notice = match target {
        Some(key) => actions::dispatch(&mut state, Action::RunHealth(parse_target(key)?)),
        None => actions::dispatch(&mut state, Action::RunHealthAll),
    };
    print!("{}", panels::render_overview(&state));
    print_notice(&notice);
    Ok(())
}

/// `opsdeck clear-health` — reset every target to unknown.
pub fn run_clear_health() -> Result<()> {
    let mut state = load_state();
    let notice = actions::dispatch(&mut state, Action::ClearHealth);
    print_notice(&notice);
    Ok(())
}

/// `opsdeck rows` — refresh the video queue and render its rows.
pub fn run_rows() -> Result<()> {
    let mut state = load_state();
    actions::dispatch(&mut state, Action::Navigate(Panel::Videos));
    print!("{}", panels::render(&state));
    Ok(())
}

/// `opsdeck products` — refresh the hero feed and render it.
pub fn run_products() -> Result<()> {
    let mut state = load_state();
    actions::dispatch(&mut state, Action::Navigate(Panel::Hero));
    print!("{}", panels::render(&state));
    Ok(())
}

// ---------------------------------------------------------------------------
// Switches
// ---------------------------------------------------------------------------

/// `opsdeck switches [--scope S]` — list every scope, or just one.
pub fn run_switches_list(scope: Option<&str>) -> Result<()> {
    let mut state = load_state();
    state.route = Panel::Switches;
    match scope {
        Some(s) if !crate::switches::SCOPES.contains(&s) => {
            anyhow::bail!("unknown scope '{s}' (expected one of: global, orchestrator, videos, hero)")
        }
        Some(s) => print!("{}", panels::render_switch_scope(&state, s)),
        None => print!("{}", panels::render(&state)),
    }
    Ok(())
}

/// `opsdeck switches toggle <scope.key>` — flip a switch and save.
pub fn run_switches_toggle(dotted: &str) -> Result<()> {
    let Some((scope, key)) = dotted.split_once('.') else {
        anyhow::bail!("expected <scope>.<key>, e.g. global.maintenance_mode");
    };
    let mut state = load_state();
    let notice = actions::dispatch(
        &mut state,
        Action::ToggleSwitch {
            scope: scope.to_string(),
            key: key.to_string(),
        },
    );
    print_notice(&notice);
    if notice.level == Level::Info {
        print_notice(&actions::dispatch(&mut state, Action::SaveSwitches));
    }
    Ok(())
}

pub fn run_switches_save() -> Result<()> {
    let mut state = load_state();
    print_notice(&actions::dispatch(&mut state, Action::SaveSwitches));
    Ok(())
}

pub fn run_switches_reset() -> Result<()> {
    let mut state = load_state();
    print_notice(&actions::dispatch(&mut state, Action::ResetSwitches));
    Ok(())
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

pub fn run_settings_show() -> Result<()> {
    let mut state = load_state();
    state.route = Panel::Settings;
    print!("{}", panels::render(&state));
    Ok(())
}

pub fn run_settings_set(key: &str, value: &str) -> Result<()> {
    let mut state = load_state();
    let notice = actions::dispatch(
        &mut state,
        Action::SetSetting {
            key: key.to_string(),
            value: value.to_string(),
        },
    );
    print_notice(&notice);
    Ok(())
}

pub fn run_settings_reset() -> Result<()> {
    let mut state = load_state();
    print_notice(&actions::dispatch(&mut state, Action::ResetSettings));
    Ok(())
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

pub fn run_logs(limit: usize) -> Result<()> {
    let state = load_state();
    print!("{}", panels::render_logs(&state, limit));
    Ok(())
}

pub fn run_logs_clear() -> Result<()> {
    let mut state = load_state();
    print_notice(&actions::dispatch(&mut state, Action::ClearLogs));
    Ok(())
}

pub fn run_logs_export(out: Option<PathBuf>) -> Result<()> {
    let mut state = load_state();
    print_notice(&actions::dispatch(&mut state, Action::ExportLogs { out }));
    Ok(())
}

// ---------------------------------------------------------------------------
// Backup / lock
// ---------------------------------------------------------------------------

pub fn run_backup(target: Option<&str>) -> Result<()> {
    let mut state = load_state();
    let notice = match target {
        Some(key) => actions::dispatch(&mut state, Action::Backup(parse_target(key)?)),
        None => actions::dispatch(&mut state, Action::BackupAll),
    };
    print_notice(&notice);
    Ok(())
}

pub fn run_lock(mode: &str) -> Result<()> {
    let mut state = load_state();
    match mode {
        "on" => print_notice(&actions::dispatch(&mut state, Action::SetLock(true))),
        "off" => print_notice(&actions::dispatch(&mut state, Action::SetLock(false))),
        _ => {
            let label = if state.locked { "Locked".yellow() } else { "Admin".green() };
            println!("Mode: {label}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config management
// ---------------------------------------------------------------------------

pub fn run_config_show() -> Result<()> {
    println!("{}", config::show_effective_config()?);
    Ok(())
}

pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{key} = {value}");
    Ok(())
}

pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!("Reset config at {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Web dashboard
// ---------------------------------------------------------------------------

pub fn run_web(addr: Option<&str>) -> Result<()> {
    let config = config::load();
    let addr = addr.unwrap_or(&config.web.addr).to_string();
    let state = AppState::load(&config);
    web::serve(&addr, state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
