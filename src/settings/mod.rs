//! Dashboard settings — the typed configuration entity persisted in the
//! store under the `settings` key.
//!
//! Every field defaults to an empty string or a documented default, so a
//! missing or malformed stored blob always resolves to a usable value.
//! Settings are loaded once at startup and mutated only by explicit save
//! actions, which persist immediately.

use serde::{Deserialize, Serialize};

use crate::store::{self, Store, keys};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// The complete dashboard settings blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub orchestrator: OrchestratorSettings,
    pub table_store: TableStoreSettings,
    pub videos: VideoSettings,
    pub hero: HeroSettings,
}

/// Orchestrator service — the one configured API base. Health checks and
/// backup triggers are built from this URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorSettings {
    /// Root URL of the orchestrator API. Empty means not configured.
    pub base_url: String,
}

/// REST table store shared by the videos queue and the hero feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStoreSettings {
    /// Root URL of the table store. Empty means not configured.
    pub url: String,
    /// Access key, sent as both the `apikey` header and a bearer token.
    pub api_key: String,
}

/// Video-queue integration: table and column-name overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    pub table: String,
    /// Comma-separated select list; positions map onto the title, status,
    /// video URL, and language roles in that order.
    pub columns: String,
    pub order: String,
    pub limit: u32,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            table: "video_queue".to_string(),
            columns: "title,status,video_url,lang".to_string(),
            order: "created_at.desc".to_string(),
            limit: 12,
        }
    }
}

/// Hero page feed: products table plus the free-form categories blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSettings {
    pub products_table: String,
    /// Categories as serialized JSON text. Parsed on read; parse failure
    /// falls back to an empty list. Saving malformed text is rejected.
    pub categories: String,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            products_table: "products".to_string(),
            categories: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Persistence and access
// ---------------------------------------------------------------------------

impl Settings {
    /// Load from the store, falling back to defaults on absence or
    /// malformed text.
    pub fn load(store: &Store) -> Self {
        store.get(keys::SETTINGS, Self::default())
    }

    /// Persist the current settings immediately.
    pub fn save(&self, store: &mut Store) {
        store.set(keys::SETTINGS, self);
    }

    /// The parsed categories list. Malformed or empty stored text yields
    /// an empty list, never an error.
    pub fn categories_list(&self) -> Vec<serde_json::Value> {
        if self.hero.categories.trim().is_empty() {
            return Vec::new();
        }
        store::try_parse(&self.hero.categories).unwrap_or_default()
    }

    /// Apply one dotted-key update, trimming the value. Returns an error
    /// message for unknown keys, unparseable numbers, or invalid
    /// categories text — in which case nothing is mutated.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        match key {
            "orchestrator.base_url" => self.orchestrator.base_url = value.to_string(),
            "table_store.url" => self.table_store.url = value.to_string(),
            "table_store.api_key" => self.table_store.api_key = value.to_string(),
            "videos.table" => self.videos.table = value.to_string(),
            "videos.columns" => self.videos.columns = value.to_string(),
            "videos.order" => self.videos.order = value.to_string(),
            "videos.limit" => {
                self.videos.limit = value
                    .parse()
                    .map_err(|_| format!("videos.limit expects a number, got '{value}'"))?;
            }
            "hero.products_table" => self.hero.products_table = value.to_string(),
            "hero.categories" => {
                validate_categories(value)?;
                self.hero.categories = value.to_string();
            }
            other => return Err(format!("unknown settings key: {other}")),
        }
        Ok(())
    }
}

/// Validate categories text: empty is allowed, anything else must parse as
/// a JSON array.
pub fn validate_categories(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Ok(());
    }
    store::try_parse::<Vec<serde_json::Value>>(text)
        .map(|_| ())
        .map_err(|e| format!("categories must be a JSON array: {e}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
