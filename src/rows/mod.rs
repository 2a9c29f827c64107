//! Row data — ephemeral records from the REST table store.
//!
//! Remote rows are arbitrary-shaped JSON objects keyed by
//! user-configurable column names. Cells are modeled as a small tagged
//! value union rather than untyped property access, and lookups go through
//! the configured alias with a fallback to the default column name.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::settings::{Settings, TableStoreSettings};

// ---------------------------------------------------------------------------
// Cell model
// ---------------------------------------------------------------------------

/// One cell of a remote row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
}

impl serde::Serialize for CellValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(v) => serializer.serialize_str(v),
            Self::Num(n) => serializer.serialize_f64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Null => serializer.serialize_unit(),
        }
    }
}

impl CellValue {
    /// Map a JSON value into the union. Nested arrays/objects are kept as
    /// their serialized text — the dashboard only ever displays them.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Str(s.clone()),
            Value::Number(n) => Self::Num(n.as_f64().unwrap_or(0.0)),
            Value::Bool(b) => Self::Bool(*b),
            Value::Null => Self::Null,
            other => Self::Str(other.to_string()),
        }
    }

    /// Human-readable rendering for panels.
    pub fn to_display(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Num(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::Bool(b) => b.to_string(),
            Self::Null => "—".to_string(),
        }
    }
}

/// One remote record: column name → cell.
pub type Row = BTreeMap<String, CellValue>;

/// Convert a table-read response body into rows. Non-array bodies are
/// treated as an empty result set; non-object elements are skipped.
pub fn rows_from_json(data: &Value) -> Vec<Row> {
    let Some(items) = data.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| item.as_object())
        .map(|obj| {
            obj.iter()
                .map(|(k, v)| (k.clone(), CellValue::from_json(v)))
                .collect()
        })
        .collect()
}

/// Look up a cell by the configured alias, falling back to the default
/// column name.
pub fn lookup<'a>(row: &'a Row, alias: &str, default_key: &str) -> Option<&'a CellValue> {
    row.get(alias).or_else(|| row.get(default_key))
}

// ---------------------------------------------------------------------------
// Column aliases
// ---------------------------------------------------------------------------

/// Default column names for the video-queue roles.
pub const DEFAULT_COLUMNS: [&str; 4] = ["title", "status", "video_url", "lang"];

/// Resolved column aliases for the video queue. Positions in the
/// configured comma-separated select list map onto the four roles; missing
/// positions fall back to the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub title: String,
    pub status: String,
    pub video_url: String,
    pub lang: String,
}

impl ColumnMap {
    pub fn from_select(select: &str) -> Self {
        let mut parts = select
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty());
        let mut next = |default: &str| {
            parts
                .next()
                .map(str::to_string)
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            title: next(DEFAULT_COLUMNS[0]),
            status: next(DEFAULT_COLUMNS[1]),
            video_url: next(DEFAULT_COLUMNS[2]),
            lang: next(DEFAULT_COLUMNS[3]),
        }
    }
}

// ---------------------------------------------------------------------------
// Table reads
// ---------------------------------------------------------------------------

/// Build the REST read URL:
/// `{store}/rest/v1/{table}?select={columns}&limit={n}&order={column.desc}`.
pub fn table_read_url(
    store: &TableStoreSettings,
    table: &str,
    columns: &str,
    limit: u32,
    order: &str,
) -> String {
    format!(
        "{}/rest/v1/{}?select={}&limit={}&order={}",
        store.url.trim_end_matches('/'),
        table,
        columns,
        limit,
        order
    )
}

/// The URL for the configured video-queue read.
pub fn videos_read_url(settings: &Settings) -> String {
    table_read_url(
        &settings.table_store,
        &settings.videos.table,
        &settings.videos.columns,
        settings.videos.limit,
        &settings.videos.order,
    )
}

/// The URL for the hero products read (all columns).
pub fn products_read_url(settings: &Settings) -> String {
    table_read_url(
        &settings.table_store,
        &settings.hero.products_table,
        "*",
        settings.videos.limit,
        "id.desc",
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_from_array_of_objects() {
        let data = json!([
            {"title": "a", "views": 10, "live": true, "note": null},
            {"title": "b", "views": 2.5}
        ]);
        let rows = rows_from_json(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["title"], CellValue::Str("a".into()));
        assert_eq!(rows[0]["views"], CellValue::Num(10.0));
        assert_eq!(rows[0]["live"], CellValue::Bool(true));
        assert_eq!(rows[0]["note"], CellValue::Null);
    }

    #[test]
    fn non_array_body_is_empty_result() {
        assert!(rows_from_json(&json!({"message": "oops"})).is_empty());
        assert!(rows_from_json(&json!("text")).is_empty());
    }

    #[test]
    fn non_object_elements_are_skipped() {
        let data = json!([{"a": 1}, 7, "x"]);
        assert_eq!(rows_from_json(&data).len(), 1);
    }

    #[test]
    fn lookup_prefers_alias_then_default() {
        let data = json!([{"name": "aliased", "title": "plain"}]);
        let rows = rows_from_json(&data);
        assert_eq!(
            lookup(&rows[0], "name", "title"),
            Some(&CellValue::Str("aliased".into()))
        );
        assert_eq!(
            lookup(&rows[0], "missing", "title"),
            Some(&CellValue::Str("plain".into()))
        );
        assert_eq!(lookup(&rows[0], "missing", "also_missing"), None);
    }

    #[test]
    fn column_map_positions_and_defaults() {
        let map = ColumnMap::from_select("name,state");
        assert_eq!(map.title, "name");
        assert_eq!(map.status, "state");
        assert_eq!(map.video_url, "video_url");
        assert_eq!(map.lang, "lang");

        let full = ColumnMap::from_select("title,status,video_url,lang");
        assert_eq!(full, ColumnMap::from_select(""));
    }

    #[test]
    fn table_read_url_shape() {
        let store = TableStoreSettings {
            url: "http://store.local/".into(),
            api_key: "k".into(),
        };
        assert_eq!(
            table_read_url(&store, "video_queue", "title,status", 12, "created_at.desc"),
            "http://store.local/rest/v1/video_queue?select=title,status&limit=12&order=created_at.desc"
        );
    }

    #[test]
    fn display_formats() {
        assert_eq!(CellValue::Num(3.0).to_display(), "3");
        assert_eq!(CellValue::Num(2.5).to_display(), "2.5");
        assert_eq!(CellValue::Null.to_display(), "—");
    }
}
