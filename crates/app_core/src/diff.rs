//! Unsaved-change detection
//!
//! Positional comparison against the state at the last save or load:
//! asset identity and group per entry, and group names. Display names and
//! view state do not count. A pure reorder is a change.

use crate::BookmarkStore;
use app_fs::AssetIdentity;

/// Immutable positional copy of the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    entries: Vec<(AssetIdentity, String)>,
    groups: Vec<String>,
}

/// Capture the current store
pub fn snapshot(store: &BookmarkStore) -> StoreSnapshot {
    StoreSnapshot {
        entries: store
            .entries()
            .iter()
            .map(|e| (e.asset.identity(), e.group.clone()))
            .collect(),
        groups: store.groups().to_vec(),
    }
}

/// Does the store differ from the snapshot?
pub fn has_unsaved_changes(store: &BookmarkStore, snapshot: &StoreSnapshot) -> bool {
    if store.len() != snapshot.entries.len() || store.groups().len() != snapshot.groups.len() {
        return true;
    }

    let entries_differ = store
        .entries()
        .iter()
        .zip(&snapshot.entries)
        .any(|(entry, (identity, group))| &entry.asset.identity() != identity || &entry.group != group);

    entries_differ || store.groups() != snapshot.groups.as_slice()
}

/// Holds the baseline of the last save or load
#[derive(Debug, Clone, Default)]
pub struct DiffTracker {
    baseline: StoreSnapshot,
}

impl DiffTracker {
    pub fn new(store: &BookmarkStore) -> Self {
        Self {
            baseline: snapshot(store),
        }
    }

    /// Reset the baseline after a successful save or load
    pub fn rebase(&mut self, store: &BookmarkStore) {
        self.baseline = snapshot(store);
    }

    pub fn is_dirty(&self, store: &BookmarkStore) -> bool {
        has_unsaved_changes(store, &self.baseline)
    }

    pub fn baseline(&self) -> &StoreSnapshot {
        &self.baseline
    }
}
