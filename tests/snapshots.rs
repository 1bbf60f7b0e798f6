use homeboard::board::layout::{Point, WorkingLayout};
use homeboard::board::snapshots::{
    get_snapshot, list_snapshots, load_snapshots, remove_snapshot, save_snapshots,
    upsert_snapshot, LayoutSnapshot, SnapshotStore,
};

#[test]
fn double_save_keeps_one_snapshot_holding_the_second_layout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("layouts.json");

    let mut layout = WorkingLayout::with_defaults();
    let mut store = load_snapshots(&path).expect("load empty");
    upsert_snapshot(&mut store, LayoutSnapshot::capture("A", &layout));
    save_snapshots(&path, &store).expect("save");

    layout.update_position("weather", Point::new(321.0, 42.0));
    let mut store = load_snapshots(&path).expect("reload");
    upsert_snapshot(&mut store, LayoutSnapshot::capture("A", &layout));
    save_snapshots(&path, &store).expect("save again");

    let reloaded = load_snapshots(&path).expect("final load");
    assert_eq!(reloaded.snapshots.len(), 1);
    let snapshot = get_snapshot(&reloaded, "A").expect("snapshot A");
    assert_eq!(snapshot.widgets["weather"].position, Point::new(321.0, 42.0));
}

#[test]
fn round_trip_preserves_names_and_timestamps() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("layouts.json");
    let layout = WorkingLayout::with_defaults();

    let mut store = SnapshotStore::default();
    upsert_snapshot(&mut store, LayoutSnapshot::capture("desk", &layout));
    upsert_snapshot(&mut store, LayoutSnapshot::capture("couch", &layout));
    save_snapshots(&path, &store).expect("save");

    let reloaded = load_snapshots(&path).expect("load");
    assert_eq!(reloaded, store);
    assert_eq!(list_snapshots(&reloaded), vec!["desk", "couch"]);
    assert!(get_snapshot(&reloaded, "desk")
        .expect("desk snapshot")
        .created_at
        .is_some());
}

#[test]
fn missing_or_corrupt_files_degrade_to_an_empty_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("layouts.json");
    let store = load_snapshots(&missing).expect("missing file is empty state");
    assert!(store.snapshots.is_empty());

    // Corruption is reported to the caller, who degrades to the default
    // store instead of failing startup.
    std::fs::write(&missing, "{definitely not json").expect("write garbage");
    let degraded = load_snapshots(&missing).unwrap_or_default();
    assert!(degraded.snapshots.is_empty());
}

#[test]
fn deleting_persists_across_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("layouts.json");
    let layout = WorkingLayout::with_defaults();

    let mut store = SnapshotStore::default();
    upsert_snapshot(&mut store, LayoutSnapshot::capture("gone", &layout));
    upsert_snapshot(&mut store, LayoutSnapshot::capture("kept", &layout));
    save_snapshots(&path, &store).expect("save");

    assert!(remove_snapshot(&mut store, "gone"));
    save_snapshots(&path, &store).expect("save after delete");

    let reloaded = load_snapshots(&path).expect("load");
    assert_eq!(list_snapshots(&reloaded), vec!["kept"]);
}
