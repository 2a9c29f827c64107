//! Action dispatch — every state mutation and trigger expressed as one
//! enum, routed through a single handler.
//!
//! The dispatcher is the only place the UI-lock guard lives: when the lock
//! flag is set, mutating actions are no-ops that surface a "locked" notice
//! and mutate nothing, persist nothing, and log nothing. Health runs and
//! navigation stay available while locked.

use std::path::PathBuf;

use serde_json::json;

use crate::app::{AppState, Notice};
use crate::logbook::Level;
use crate::settings::{self, Settings};
use crate::status::{self, Target};
use crate::switches::Switches;
use crate::views::Panel;

/// Every mutation and trigger the dashboard supports.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Panel),
    RunHealth(Target),
    RunHealthAll,
    ClearHealth,
    ToggleSwitch { scope: String, key: String },
    SaveSwitches,
    ReplaceSwitches(Switches),
    ResetSwitches,
    SetSetting { key: String, value: String },
    ReplaceSettings(Settings),
    ResetSettings,
    ClearLogs,
    ExportLogs { out: Option<PathBuf> },
    Backup(Target),
    BackupAll,
    SetLock(bool),
}

impl Action {
    /// Whether the lock flag blocks this action.
    fn requires_unlock(&self) -> bool {
        !matches!(
            self,
            Self::Navigate(_) | Self::RunHealth(_) | Self::RunHealthAll | Self::SetLock(_)
        )
    }
}

/// Apply one action to the state and return its notice.
pub fn dispatch(state: &mut AppState, action: Action) -> Notice {
    if action.requires_unlock() && state.locked {
        return Notice::warn("UI is locked.");
    }

    match action {
        Action::Navigate(panel) => {
            state.route = panel;
            if let Some(target) = panel.refresh_target() {
                status::refresh(state, target);
            }
            Notice::info(panel.title())
        }

        Action::RunHealth(target) => {
            let result = status::refresh(state, target);
            Notice::info(format!("{}: {}", target.name(), result.note))
        }

        Action::RunHealthAll => {
            status::refresh_all(state);
            Notice::info("Health check complete.")
        }

        Action::ClearHealth => {
            status::clear(state);
            Notice::info("Health cleared.")
        }

        Action::ToggleSwitch { scope, key } => match state.switches.toggle(&scope, &key) {
            Ok(on) => Notice::info(format!(
                "{scope}.{key} {}",
                if on { "on" } else { "off" }
            )),
            Err(e) => Notice::bad(e),
        },

        Action::SaveSwitches => save_switches(state),

        Action::ReplaceSwitches(switches) => {
            state.switches = switches;
            save_switches(state)
        }

        Action::ResetSwitches => {
            state.switches = Switches::default();
            state.switches.save(&mut state.store);
            state.log("system", Level::Warn, "Switches reset to defaults.", None);
            Notice::info("Switches reset.")
        }

        Action::SetSetting { key, value } => match state.settings.apply(&key, &value) {
            Ok(()) => {
                state.settings.save(&mut state.store);
                state.log("system", Level::Info, format!("Setting saved: {key}."), None);
                Notice::info("Settings saved.")
            }
            Err(e) => Notice::bad(e),
        },

        Action::ReplaceSettings(new_settings) => {
            if let Err(e) = settings::validate_categories(&new_settings.hero.categories) {
                return Notice::bad(e);
            }
            state.settings = new_settings;
            state.settings.save(&mut state.store);
            let bases = json!({
                "orchestrator": &state.settings.orchestrator.base_url,
                "table_store": &state.settings.table_store.url,
            });
            state.log("system", Level::Info, "Settings saved.", Some(bases));
            Notice::info("Settings saved.")
        }

        Action::ResetSettings => {
            state.settings = Settings::default();
            state.settings.save(&mut state.store);
            state.log("system", Level::Warn, "Settings reset to defaults.", None);
            Notice::info("Settings reset.")
        }

        Action::ClearLogs => {
            state.logbook.clear(&mut state.store);
            Notice::info("Logs cleared.")
        }

        Action::ExportLogs { out } => match state.logbook.export(out) {
            Ok(path) => {
                state.log("system", Level::Info, "Exported logs as JSON.", None);
                Notice::info(format!("Exported to {}", path.display()))
            }
            Err(e) => Notice::bad(format!("Export failed: {e}")),
        },

        Action::Backup(target) => status::backup(state, target),

        Action::BackupAll => status::backup_all(state),

        Action::SetLock(locked) => {
            state.set_locked(locked);
            let message = if locked { "UI locked." } else { "UI unlocked." };
            state.log("system", Level::Info, message, None);
            Notice::info(message)
        }
    }
}

fn save_switches(state: &mut AppState) -> Notice {
    state.switches.save(&mut state.store);
    let snapshot = json!({ "switches": &state.switches });
    state.log("system", Level::Info, "Switches saved.", Some(snapshot));
    Notice::info("Switches saved.")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::store::{Store, keys};

    fn state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        (dir, AppState::with_store(store, &AppConfig::default()))
    }

    #[test]
    fn locked_blocks_mutations() {
        let (_dir, mut state) = state();
        state.set_locked(true);
        let before = state.switches.clone();
        let notice = dispatch(
            &mut state,
            Action::ToggleSwitch {
                scope: "global".into(),
                key: "maintenance_mode".into(),
            },
        );
        assert_eq!(notice, Notice::warn("UI is locked."));
        assert_eq!(state.switches, before);
    }

    #[test]
    fn unlock_works_while_locked() {
        let (_dir, mut state) = state();
        state.set_locked(true);
        dispatch(&mut state, Action::SetLock(false));
        assert!(!state.locked);
    }

    #[test]
    fn toggle_does_not_persist_until_save() {
        let (_dir, mut state) = state();
        dispatch(
            &mut state,
            Action::ToggleSwitch {
                scope: "global".into(),
                key: "maintenance_mode".into(),
            },
        );
        assert!(state.switches.global.maintenance_mode);
        assert!(state.store.raw(keys::SWITCHES).is_none());

        dispatch(&mut state, Action::SaveSwitches);
        assert!(state.store.raw(keys::SWITCHES).is_some());
    }

    #[test]
    fn reset_switches_restores_defaults() {
        let (_dir, mut state) = state();
        dispatch(
            &mut state,
            Action::ToggleSwitch {
                scope: "videos".into(),
                key: "enable_publish".into(),
            },
        );
        dispatch(&mut state, Action::ResetSwitches);
        assert_eq!(state.switches, Switches::default());
    }

    #[test]
    fn invalid_categories_are_rejected_inline() {
        let (_dir, mut state) = state();
        dispatch(
            &mut state,
            Action::SetSetting {
                key: "hero.categories".into(),
                value: r#"[{"name":"tools"}]"#.into(),
            },
        );
        let notice = dispatch(
            &mut state,
            Action::SetSetting {
                key: "hero.categories".into(),
                value: "\"not an array\"".into(),
            },
        );
        assert_eq!(notice.level, Level::Bad);
        assert_eq!(state.settings.hero.categories, r#"[{"name":"tools"}]"#);
    }

    #[test]
    fn navigation_is_idempotent() {
        let (_dir, mut state) = state();
        dispatch(&mut state, Action::Navigate(Panel::Logs));
        let first = state.route;
        dispatch(&mut state, Action::Navigate(Panel::Logs));
        assert_eq!(state.route, first);
    }

    #[test]
    fn backup_blocked_by_switch_logs_and_skips() {
        let (_dir, mut state) = state();
        state.switches.global.feature_backups = false;
        let notice = dispatch(&mut state, Action::Backup(Target::Videos));
        assert_eq!(notice.level, Level::Warn);
        assert!(
            state.logbook.entries()[0]
                .message
                .contains("Backup blocked")
        );
    }

    #[test]
    fn backup_without_base_is_simulated() {
        let (_dir, mut state) = state();
        let notice = dispatch(&mut state, Action::Backup(Target::Orchestrator));
        assert!(notice.message.contains("simulated"));
        assert!(state.logbook.entries()[0].message.contains("simulated"));
    }
}
