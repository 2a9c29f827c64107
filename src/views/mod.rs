//! View routing — the fixed allow-list of panels and their refresh
//! actions.
//!
//! A route string resolves to exactly one panel; invalid input falls back
//! to the overview. Navigating to a panel triggers that panel's refresh
//! action as a side effect — never a timer. Navigation is idempotent.

pub mod panels;

use serde::Serialize;

use crate::status::Target;

/// One dashboard panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    #[default]
    Overview,
    Orchestrator,
    Videos,
    Hero,
    Switches,
    Logs,
    Settings,
}

impl Panel {
    pub const ALL: [Panel; 7] = [
        Panel::Overview,
        Panel::Orchestrator,
        Panel::Videos,
        Panel::Hero,
        Panel::Switches,
        Panel::Logs,
        Panel::Settings,
    ];

    /// Resolve a route identifier, falling back to the overview for
    /// anything outside the allow-list.
    pub fn from_route(route: &str) -> Self {
        match route.trim().to_ascii_lowercase().as_str() {
            "orchestrator" => Self::Orchestrator,
            "videos" => Self::Videos,
            "hero" => Self::Hero,
            "switches" => Self::Switches,
            "logs" => Self::Logs,
            "settings" => Self::Settings,
            _ => Self::Overview,
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Orchestrator => "orchestrator",
            Self::Videos => "videos",
            Self::Hero => "hero",
            Self::Switches => "switches",
            Self::Logs => "logs",
            Self::Settings => "settings",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Orchestrator => "Orchestrator",
            Self::Videos => "Video Queue",
            Self::Hero => "Hero Preview",
            Self::Switches => "Switch Control",
            Self::Logs => "Logs",
            Self::Settings => "Connections",
        }
    }

    /// The target this panel refreshes on entry, if any.
    pub fn refresh_target(self) -> Option<Target> {
        match self {
            Self::Orchestrator => Some(Target::Orchestrator),
            Self::Videos => Some(Target::Videos),
            Self::Hero => Some(Target::Hero),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
