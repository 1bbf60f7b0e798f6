use crate::board::layout::{WidgetLayoutEntry, WorkingLayout};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const SNAPSHOTS_FILE: &str = "layouts.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SnapshotStore {
    pub version: u32,
    #[serde(default)]
    pub snapshots: Vec<LayoutSnapshot>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self {
            version: 1,
            snapshots: Vec::new(),
        }
    }
}

/// A named, complete capture of the working layout at save time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LayoutSnapshot {
    pub name: String,
    #[serde(default)]
    pub widgets: BTreeMap<String, WidgetLayoutEntry>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl LayoutSnapshot {
    pub fn capture(name: &str, layout: &WorkingLayout) -> Self {
        Self {
            name: name.to_string(),
            widgets: layout.widgets().clone(),
            created_at: Some(chrono::Local::now().to_rfc3339()),
        }
    }
}

pub fn load_snapshots(path: impl AsRef<Path>) -> anyhow::Result<SnapshotStore> {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    if content.trim().is_empty() {
        return Ok(SnapshotStore::default());
    }
    let mut store: SnapshotStore = serde_json::from_str(&content)?;
    if store.version == 0 {
        store.version = 1;
    }
    Ok(store)
}

pub fn save_snapshots(path: impl AsRef<Path>, store: &SnapshotStore) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(store)?;
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    Ok(())
}

pub fn get_snapshot<'a>(store: &'a SnapshotStore, name: &str) -> Option<&'a LayoutSnapshot> {
    store.snapshots.iter().find(|snapshot| snapshot.name == name)
}

/// Insert or fully replace the snapshot with the same name. Last write wins;
/// there is no versioning or merging.
pub fn upsert_snapshot(store: &mut SnapshotStore, snapshot: LayoutSnapshot) {
    if let Some(existing) = store
        .snapshots
        .iter_mut()
        .find(|existing| existing.name == snapshot.name)
    {
        *existing = snapshot;
    } else {
        store.snapshots.push(snapshot);
    }
}

pub fn remove_snapshot(store: &mut SnapshotStore, name: &str) -> bool {
    let before = store.snapshots.len();
    store.snapshots.retain(|snapshot| snapshot.name != name);
    before != store.snapshots.len()
}

pub fn list_snapshots(store: &SnapshotStore) -> Vec<String> {
    store
        .snapshots
        .iter()
        .map(|snapshot| snapshot.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::layout::Point;

    #[test]
    fn saving_the_same_name_replaces() {
        let mut store = SnapshotStore::default();
        let mut layout = WorkingLayout::with_defaults();
        upsert_snapshot(&mut store, LayoutSnapshot::capture("desk", &layout));

        layout.update_position("weather", Point::new(500.0, 500.0));
        upsert_snapshot(&mut store, LayoutSnapshot::capture("desk", &layout));

        assert_eq!(store.snapshots.len(), 1);
        let saved = get_snapshot(&store, "desk").expect("snapshot");
        assert_eq!(
            saved.widgets["weather"].position,
            Point::new(500.0, 500.0)
        );
    }

    #[test]
    fn remove_reports_whether_anything_was_deleted() {
        let mut store = SnapshotStore::default();
        let layout = WorkingLayout::with_defaults();
        upsert_snapshot(&mut store, LayoutSnapshot::capture("desk", &layout));
        assert!(remove_snapshot(&mut store, "desk"));
        assert!(!remove_snapshot(&mut store, "desk"));
        assert!(list_snapshots(&store).is_empty());
    }
}
