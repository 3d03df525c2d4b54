//! Integration tests: JSON file store on disk.
//!
//! Uses a temporary directory per test and checks the on-disk layout, the
//! legacy array format and error reporting through the library.

use pb_core::model::Scene;
use pb_core::record::BoardRecord;
use pb_store::{
    AuthProvider, BoardLibrary, BoardStore, Credentials, JsonFileStore, Owner, StaticAuth,
    StoreError,
};
use pretty_assertions::assert_eq;
use std::fs;

const LEGACY: &str = include_str!("../../pb-core/tests/fixtures/local_boards.json");

fn record(name: &str) -> BoardRecord {
    BoardRecord::capture(name, &Scene::default())
}

#[test]
fn missing_file_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    assert!(store.list(&Owner::Local).unwrap().is_empty());
}

#[test]
fn save_writes_one_array_per_owner() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::open(dir.path()).unwrap();
    store.save(&Owner::Local, record("Kick-off")).unwrap();
    store
        .save(&Owner::User("uid-7".into()), record("Set piece"))
        .unwrap();

    let local = fs::read_to_string(dir.path().join("local.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&local).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(1));
    assert_eq!(value[0]["name"], "Kick-off");
    assert!(dir.path().join("user-uid-7.json").exists());
}

#[test]
fn reads_legacy_local_storage_dump() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("local.json"), LEGACY).unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();

    let boards = store.list(&Owner::Local).unwrap();
    let names: Vec<_> = boards.iter().map(|b| b.name.as_str()).collect();
    // Newest first by the legacy `date` stamp.
    assert_eq!(names, vec!["Empty vertical", "Kick-off 4-4-2"]);
    assert!(boards[0].vertical_orientation);
    assert_eq!(boards[1].players.len(), 2);
}

#[test]
fn corrupt_file_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("local.json"), "{ not json").unwrap();
    let mut store = JsonFileStore::open(dir.path()).unwrap();
    assert!(matches!(
        store.list(&Owner::Local),
        Err(StoreError::Serialization(_))
    ));
    // The broken file is left alone.
    assert!(store.save(&Owner::Local, record("x")).is_err());
    assert_eq!(
        fs::read_to_string(dir.path().join("local.json")).unwrap(),
        "{ not json"
    );
}

#[test]
fn library_partitions_by_identity() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    let mut lib = BoardLibrary::new(StaticAuth::new(), store);

    lib.save(record("Offline")).unwrap();
    lib.auth_mut()
        .sign_up(&Credentials::new("coach@club.com", "touchline"))
        .unwrap();
    assert_eq!(lib.owner(), Owner::User("uid-1".into()));
    assert!(lib.list().unwrap().is_empty());

    lib.save(record("  Online ")).unwrap();
    assert_eq!(lib.load("Online").unwrap().name, "Online");
    assert!(matches!(lib.load("Offline"), Err(StoreError::NotFound(_))));

    lib.auth_mut().sign_out().unwrap();
    assert_eq!(lib.list().unwrap().len(), 1);
    lib.delete("Offline").unwrap();
    assert!(matches!(lib.delete("Offline"), Err(StoreError::NotFound(_))));
}

#[test]
fn saved_board_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::open(dir.path()).unwrap();
    let original = pb_core::record::records_from_json(LEGACY).unwrap().remove(0);
    store.save(&Owner::Local, original.clone()).unwrap();
    let loaded = store.list(&Owner::Local).unwrap().remove(0);
    assert_eq!(loaded.scene(), original.scene());
    assert_eq!(loaded.home_team_color, original.home_team_color);
    assert_eq!(loaded.updated_at, original.updated_at);
}
