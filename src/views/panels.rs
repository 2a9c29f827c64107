//! Panel renderers — pure functions from current state to terminal
//! markup. Rendering never mutates state and never performs I/O beyond
//! the returned string.

use colored::Colorize;

use crate::app::AppState;
use crate::rows::{self, ColumnMap, Row};
use crate::status::{StatusKind, Target, TargetStatus};
use crate::switches;
use crate::views::Panel;

/// Render the currently active panel.
pub fn render(state: &AppState) -> String {
    match state.route {
        Panel::Overview => render_overview(state),
        Panel::Orchestrator => render_target(state, Target::Orchestrator),
        Panel::Videos => render_videos(state),
        Panel::Hero => render_hero(state),
        Panel::Switches => render_switches(state),
        Panel::Logs => render_logs(state, 40),
        Panel::Settings => render_settings(state),
    }
}

fn header(title: &str) -> String {
    format!("{}\n{}\n", title.bold().cyan(), "=".repeat(60))
}

fn pill(status: StatusKind) -> String {
    let label = status.as_str().to_uppercase();
    match status {
        StatusKind::Good => label.green().bold().to_string(),
        StatusKind::Warn => label.yellow().bold().to_string(),
        StatusKind::Bad => label.red().bold().to_string(),
        StatusKind::Unknown => label.dimmed().to_string(),
    }
}

fn status_line(name: &str, s: &TargetStatus) -> String {
    format!(
        "  {:<14} {}  {}  (last check: {})",
        name,
        pill(s.status),
        s.note,
        s.at.as_deref().unwrap_or("—")
    )
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

pub fn render_overview(state: &AppState) -> String {
    let mut out = header("Overview");
    for target in Target::ALL {
        out.push_str(&status_line(target.name(), state.board.get(target)));
        out.push('\n');
    }
    out.push('\n');

    let g = &state.switches.global;
    out.push_str(&format!(
        "  Maintenance: {}   Backups: {}   Orchestrator: {}\n",
        if g.maintenance_mode { "ON".yellow().to_string() } else { "OFF".normal().to_string() },
        if g.feature_backups { "Enabled" } else { "Disabled" },
        if state.settings.orchestrator.base_url.trim().is_empty() {
            "Not connected".to_string()
        } else {
            "Configured".green().to_string()
        },
    ));
    out.push_str(&format!(
        "  Last activity: {}\n",
        state.logbook.last_activity().unwrap_or("—")
    ));
    if state.locked {
        out.push_str(&format!("  Mode: {}\n", "Locked".yellow()));
    }
    out
}

pub fn render_target(state: &AppState, target: Target) -> String {
    let mut out = header(target.name());
    out.push_str(&status_line(target.name(), state.board.get(target)));
    out.push('\n');
    let base = state.settings.orchestrator.base_url.trim();
    out.push_str(&format!(
        "  API base: {}\n\n",
        if base.is_empty() { "Not set" } else { base }
    ));

    let recent: Vec<String> = state
        .logbook
        .entries()
        .iter()
        .filter(|e| e.scope == target.key())
        .take(10)
        .map(|e| format!("  {}", e.to_line()))
        .collect();
    if !recent.is_empty() {
        out.push_str(&format!("{}\n", "Recent activity".bold()));
        out.push_str(&recent.join("\n"));
        out.push('\n');
    }
    out
}

pub fn render_videos(state: &AppState) -> String {
    let mut out = header("Video Queue");
    out.push_str(&status_line(
        Target::Videos.name(),
        state.board.get(Target::Videos),
    ));
    out.push_str("\n\n");

    if state.rows.is_empty() {
        out.push_str("  No rows. Configure the table store and refresh.\n");
        return out;
    }

    let cols = ColumnMap::from_select(&state.settings.videos.columns);
    out.push_str(&format!(
        "  {:<32} {:<12} {:<8} URL\n  {}\n",
        "Title".bold(),
        "Status".bold(),
        "Lang".bold(),
        "-".repeat(72)
    ));
    for row in &state.rows {
        out.push_str(&format!(
            "  {:<32} {:<12} {:<8} {}\n",
            truncate(&cell(row, &cols.title, "title"), 32),
            cell(row, &cols.status, "status"),
            cell(row, &cols.lang, "lang"),
            cell(row, &cols.video_url, "video_url"),
        ));
    }
    out.push_str(&format!("\n  {} rows\n", state.rows.len()));
    out
}

pub fn render_hero(state: &AppState) -> String {
    let mut out = header("Hero Preview");
    out.push_str(&status_line(
        Target::Hero.name(),
        state.board.get(Target::Hero),
    ));
    out.push_str("\n\n");

    let categories = state.settings.categories_list();
    out.push_str(&format!("  Categories ({}):\n", categories.len()));
    for cat in categories.iter().take(12) {
        let label = cat
            .get("name")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| cat.to_string());
        out.push_str(&format!("    - {label}\n"));
    }

    out.push_str(&format!("\n  Products ({}):\n", state.products.len()));
    for row in state.products.iter().take(12) {
        out.push_str(&format!(
            "    - {}\n",
            truncate(&cell(row, "name", "title"), 48)
        ));
    }
    out
}

pub fn render_switches(state: &AppState) -> String {
    let mut out = header("Switch Control");
    for scope in switches::SCOPES {
        out.push_str(&switch_scope_block(state, scope));
    }
    if state.locked {
        out.push_str(&format!("\n  {}\n", "UI is locked.".yellow()));
    }
    out
}

/// One scope's switches, used for the full panel and the `--scope` filter.
pub fn render_switch_scope(state: &AppState, scope: &str) -> String {
    let mut out = header("Switch Control");
    out.push_str(&switch_scope_block(state, scope));
    out
}

fn switch_scope_block(state: &AppState, scope: &str) -> String {
    let mut out = format!("  {}\n", scope.bold());
    for meta in switches::meta_for(scope) {
        let on = state.switches.get(scope, meta.key).unwrap_or(false);
        let toggle = if on {
            "[on ]".green().to_string()
        } else {
            "[off]".dimmed().to_string()
        };
        out.push_str(&format!(
            "    {toggle} {:<18} {}\n",
            meta.name,
            meta.desc.dimmed()
        ));
    }
    out
}

pub fn render_logs(state: &AppState, limit: usize) -> String {
    let mut out = header("Logs");
    let entries = state.logbook.entries();
    if entries.is_empty() {
        out.push_str("  No log entries.\n");
        return out;
    }
    for entry in entries.iter().take(limit) {
        let line = entry.to_line();
        let line = match entry.level {
            crate::logbook::Level::Bad => line.red().to_string(),
            crate::logbook::Level::Warn => line.yellow().to_string(),
            crate::logbook::Level::Info => line,
        };
        out.push_str(&format!("  {line}\n"));
    }
    out.push_str(&format!(
        "\n  showing {} of {} entries\n",
        entries.len().min(limit),
        entries.len()
    ));
    out
}

pub fn render_settings(state: &AppState) -> String {
    let s = &state.settings;
    let mut out = header("Connections");
    let show = |v: &str| {
        if v.trim().is_empty() { "Not set".to_string() } else { v.to_string() }
    };
    out.push_str(&format!(
        "  orchestrator.base_url   {}\n",
        show(&s.orchestrator.base_url)
    ));
    out.push_str(&format!("  table_store.url         {}\n", show(&s.table_store.url)));
    out.push_str(&format!(
        "  table_store.api_key     {}\n",
        mask(&s.table_store.api_key)
    ));
    out.push_str(&format!("  videos.table            {}\n", s.videos.table));
    out.push_str(&format!("  videos.columns          {}\n", s.videos.columns));
    out.push_str(&format!("  videos.order            {}\n", s.videos.order));
    out.push_str(&format!("  videos.limit            {}\n", s.videos.limit));
    out.push_str(&format!("  hero.products_table     {}\n", s.hero.products_table));
    out.push_str(&format!(
        "  hero.categories         {} entries\n",
        s.categories_list().len()
    ));
    out
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn cell(row: &Row, alias: &str, default_key: &str) -> String {
    rows::lookup(row, alias, default_key)
        .map(|v| v.to_display())
        .unwrap_or_else(|| "—".to_string())
}

fn mask(key: &str) -> String {
    let key = key.trim();
    if key.is_empty() {
        return "Not set".to_string();
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "••••".to_string()
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
