//! Durable store behavior across process "restarts" (store reopen), plus
//! the tolerant-parse policy at the persistence boundary.

use opsdeck::logbook::{DEFAULT_CAP, Level, Logbook};
use opsdeck::settings::Settings;
use opsdeck::store::{Store, keys, try_parse};
use opsdeck::switches::Switches;

#[test]
fn every_entity_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = Store::open(dir.path());

        let mut settings = Settings::default();
        settings.table_store.url = "http://store.local".to_string();
        settings.save(&mut store);

        let mut switches = Switches::default();
        switches.global.maintenance_mode = true;
        switches.save(&mut store);

        let mut book = Logbook::load(&store, DEFAULT_CAP);
        book.append(&mut store, "system", Level::Info, "booted".into(), None);

        store.set(keys::UI_LOCK, &true);
    }

    let store = Store::open(dir.path());
    assert_eq!(
        Settings::load(&store).table_store.url,
        "http://store.local"
    );
    assert!(Switches::load(&store).global.maintenance_mode);
    assert_eq!(Logbook::load(&store, DEFAULT_CAP).entries().len(), 1);
    assert!(store.get(keys::UI_LOCK, false));
}

#[test]
fn malformed_blobs_resolve_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open(dir.path());
    store.set(keys::SETTINGS, &42);
    store.set(keys::SWITCHES, &"oops");
    store.set(keys::LOGS, &serde_json::json!({"not": "a list"}));
    store.set(keys::UI_LOCK, &"yes");

    assert_eq!(Settings::load(&store), Settings::default());
    assert_eq!(Switches::load(&store), Switches::default());
    assert!(Logbook::load(&store, DEFAULT_CAP).entries().is_empty());
    assert!(!store.get(keys::UI_LOCK, false));
}

#[test]
fn deleted_keys_read_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open(dir.path());
    store.set(keys::UI_LOCK, &true);
    store.delete(keys::UI_LOCK);
    assert!(!store.get(keys::UI_LOCK, false));

    let store = Store::open(dir.path());
    assert!(store.raw(keys::UI_LOCK).is_none());
}

#[test]
fn try_parse_is_the_uniform_boundary() {
    assert_eq!(try_parse::<Vec<String>>(r#"["a","b"]"#).unwrap(), ["a", "b"]);
    assert!(try_parse::<Vec<String>>("\"not an array\"").is_err());
    assert!(try_parse::<bool>("true").unwrap());
}
