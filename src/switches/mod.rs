//! Feature switches — scoped boolean toggles with a fixed metadata table.
//!
//! Switch keys are drawn from the metadata table per scope; the typed
//! schema makes it impossible for the UI to introduce unknown keys.
//! Toggles mutate in memory only; an explicit save persists the whole
//! blob, and reset restores a deep copy of the defaults.

use serde::{Deserialize, Serialize};

use crate::store::{Store, keys};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// All switch scopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Switches {
    pub global: GlobalSwitches,
    pub orchestrator: OrchestratorSwitches,
    pub videos: VideoSwitches,
    pub hero: HeroSwitches,
}

impl Default for Switches {
    fn default() -> Self {
        Self {
            global: GlobalSwitches {
                maintenance_mode: false,
                feature_autofix: true,
                feature_backups: true,
                feature_logs: true,
            },
            orchestrator: OrchestratorSwitches {
                enable_scheduler: true,
                enable_webhooks: true,
                enable_autoscale: false,
            },
            videos: VideoSwitches {
                enable_queue: true,
                enable_multilang: true,
                enable_publish: false,
            },
            hero: HeroSwitches {
                enable_feed: true,
                enable_preview: true,
                enable_autorotate: false,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSwitches {
    pub maintenance_mode: bool,
    pub feature_autofix: bool,
    pub feature_backups: bool,
    pub feature_logs: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorSwitches {
    pub enable_scheduler: bool,
    pub enable_webhooks: bool,
    pub enable_autoscale: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSwitches {
    pub enable_queue: bool,
    pub enable_multilang: bool,
    pub enable_publish: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSwitches {
    pub enable_feed: bool,
    pub enable_preview: bool,
    pub enable_autorotate: bool,
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Display metadata for one switch.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SwitchMeta {
    pub key: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
}

pub const SCOPES: [&str; 4] = ["global", "orchestrator", "videos", "hero"];

/// The fixed metadata table for a scope. Unknown scopes yield an empty
/// slice.
pub fn meta_for(scope: &str) -> &'static [SwitchMeta] {
    match scope {
        "global" => &[
            SwitchMeta {
                key: "maintenance_mode",
                name: "Maintenance Mode",
                desc: "Freeze writes and show maintenance state across systems.",
            },
            SwitchMeta {
                key: "feature_autofix",
                name: "Auto-Fix",
                desc: "Allow the orchestrator to auto-fix recoverable errors.",
            },
            SwitchMeta {
                key: "feature_backups",
                name: "Backups",
                desc: "Enable backup triggers and backup calls.",
            },
            SwitchMeta {
                key: "feature_logs",
                name: "Logs",
                desc: "Enable log recording and export.",
            },
        ],
        "orchestrator" => &[
            SwitchMeta {
                key: "enable_scheduler",
                name: "Scheduler",
                desc: "Enable scheduled job dispatch.",
            },
            SwitchMeta {
                key: "enable_webhooks",
                name: "Webhooks",
                desc: "Enable outbound webhook notifications.",
            },
            SwitchMeta {
                key: "enable_autoscale",
                name: "Autoscale",
                desc: "Allow worker pool scaling (off by default).",
            },
        ],
        "videos" => &[
            SwitchMeta {
                key: "enable_queue",
                name: "Queue Engine",
                desc: "Enable queue processing.",
            },
            SwitchMeta {
                key: "enable_multilang",
                name: "Multi-language",
                desc: "Enable title/description translations.",
            },
            SwitchMeta {
                key: "enable_publish",
                name: "Auto Publish",
                desc: "Allow publishing workflows (off by default).",
            },
        ],
        "hero" => &[
            SwitchMeta {
                key: "enable_feed",
                name: "Feed",
                desc: "Enable the categories/products feed.",
            },
            SwitchMeta {
                key: "enable_preview",
                name: "Preview",
                desc: "Enable the hero preview panel.",
            },
            SwitchMeta {
                key: "enable_autorotate",
                name: "Auto Rotate",
                desc: "Rotate hero content automatically (off by default).",
            },
        ],
        _ => &[],
    }
}

// ---------------------------------------------------------------------------
// Persistence and access
// ---------------------------------------------------------------------------

impl Switches {
    pub fn load(store: &Store) -> Self {
        store.get(keys::SWITCHES, Self::default())
    }

    pub fn save(&self, store: &mut Store) {
        store.set(keys::SWITCHES, self);
    }

    /// Current value of a switch, or `None` for an unknown scope/key pair.
    pub fn get(&self, scope: &str, key: &str) -> Option<bool> {
        self.slot(scope, key).copied()
    }

    /// Flip a switch in memory and return its new value. Unknown pairs are
    /// rejected — the metadata table is the only source of valid keys.
    pub fn toggle(&mut self, scope: &str, key: &str) -> Result<bool, String> {
        match self.slot_mut(scope, key) {
            Some(slot) => {
                *slot = !*slot;
                Ok(*slot)
            }
            None => Err(format!("unknown switch: {scope}.{key}")),
        }
    }

    fn slot(&self, scope: &str, key: &str) -> Option<&bool> {
        match (scope, key) {
            ("global", "maintenance_mode") => Some(&self.global.maintenance_mode),
            ("global", "feature_autofix") => Some(&self.global.feature_autofix),
            ("global", "feature_backups") => Some(&self.global.feature_backups),
            ("global", "feature_logs") => Some(&self.global.feature_logs),
            ("orchestrator", "enable_scheduler") => Some(&self.orchestrator.enable_scheduler),
            ("orchestrator", "enable_webhooks") => Some(&self.orchestrator.enable_webhooks),
            ("orchestrator", "enable_autoscale") => Some(&self.orchestrator.enable_autoscale),
            ("videos", "enable_queue") => Some(&self.videos.enable_queue),
            ("videos", "enable_multilang") => Some(&self.videos.enable_multilang),
            ("videos", "enable_publish") => Some(&self.videos.enable_publish),
            ("hero", "enable_feed") => Some(&self.hero.enable_feed),
            ("hero", "enable_preview") => Some(&self.hero.enable_preview),
            ("hero", "enable_autorotate") => Some(&self.hero.enable_autorotate),
            _ => None,
        }
    }

    fn slot_mut(&mut self, scope: &str, key: &str) -> Option<&mut bool> {
        match (scope, key) {
            ("global", "maintenance_mode") => Some(&mut self.global.maintenance_mode),
            ("global", "feature_autofix") => Some(&mut self.global.feature_autofix),
            ("global", "feature_backups") => Some(&mut self.global.feature_backups),
            ("global", "feature_logs") => Some(&mut self.global.feature_logs),
            ("orchestrator", "enable_scheduler") => Some(&mut self.orchestrator.enable_scheduler),
            ("orchestrator", "enable_webhooks") => Some(&mut self.orchestrator.enable_webhooks),
            ("orchestrator", "enable_autoscale") => Some(&mut self.orchestrator.enable_autoscale),
            ("videos", "enable_queue") => Some(&mut self.videos.enable_queue),
            ("videos", "enable_multilang") => Some(&mut self.videos.enable_multilang),
            ("videos", "enable_publish") => Some(&mut self.videos.enable_publish),
            ("hero", "enable_feed") => Some(&mut self.hero.enable_feed),
            ("hero", "enable_preview") => Some(&mut self.hero.enable_preview),
            ("hero", "enable_autorotate") => Some(&mut self.hero.enable_autorotate),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
