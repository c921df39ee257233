//! Bookmark store: ordered entries and custom groups
//!
//! All mutations that cannot apply are silent no-ops. They return `false`
//! (or `None`) so callers can tell, but they never fail: the host UI may
//! race with its own state, e.g. removing an entry mid-drag.

use crate::GroupFilter;
use app_fs::{AssetIdentity, AssetRef, AssetResolver};

/// Group value meaning "no group"
pub const UNGROUPED: &str = "";

/// One bookmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkEntry {
    /// Label, defaults to the asset's name when bookmarked
    pub display_name: String,
    pub asset: AssetRef,
    /// Owning group name, `UNGROUPED` for none
    pub group: String,
}

impl BookmarkEntry {
    pub fn new(display_name: impl Into<String>, asset: AssetRef, group: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            asset,
            group: group.into(),
        }
    }

    pub fn is_ungrouped(&self) -> bool {
        self.group.is_empty()
    }
}

/// Ordered bookmarks plus ordered custom groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkStore {
    entries: Vec<BookmarkEntry>,
    groups: Vec<String>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded data
    ///
    /// Entries are kept verbatim. Blank and repeated group names are
    /// dropped since they can never be created through `add_group`.
    pub fn from_parts(entries: Vec<BookmarkEntry>, groups: Vec<String>) -> Self {
        let mut store = Self {
            entries,
            groups: Vec::with_capacity(groups.len()),
        };
        for name in groups {
            if name.trim().is_empty() || store.has_group(&name) {
                tracing::warn!("Dropping invalid group {:?} from loaded data", name);
                continue;
            }
            store.groups.push(name);
        }
        store
    }

    // ===== Queries =====

    pub fn entries(&self) -> &[BookmarkEntry] {
        &self.entries
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BookmarkEntry> {
        self.entries.get(index)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g == name)
    }

    /// Index of the entry referring to the same asset
    pub fn position_of(&self, asset: &AssetRef) -> Option<usize> {
        match asset.handle() {
            Some(handle) => self.entries.iter().position(|e| e.asset.refers_to(handle)),
            None => {
                let identity = asset.identity();
                self.entries.iter().position(|e| e.asset.identity() == identity)
            }
        }
    }

    pub fn contains(&self, asset: &AssetRef) -> bool {
        self.position_of(asset).is_some()
    }

    /// Number of entries whose group is exactly `name`
    pub fn group_member_count(&self, name: &str) -> usize {
        self.entries.iter().filter(|e| e.group == name).count()
    }

    /// Entries whose asset no longer resolves, with their indices
    pub fn missing_entries(&self) -> impl Iterator<Item = (usize, &BookmarkEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.asset.is_missing())
    }

    // ===== Entry Operations =====

    /// Bookmark a live asset; no-op for a missing asset or a duplicate
    pub fn add(&mut self, asset: AssetRef, group: &str) -> bool {
        let Some(handle) = asset.handle() else {
            tracing::debug!("Ignoring add of unresolved asset {:?}", asset.path());
            return false;
        };
        if self.contains(&asset) {
            tracing::debug!("Asset {:?} is already bookmarked", asset.path());
            return false;
        }

        let name = handle.name().to_string();
        self.entries.push(BookmarkEntry::new(name, asset, group));
        true
    }

    /// Bookmark every asset of a selection; returns how many were added
    pub fn add_many<I>(&mut self, assets: I, group: &str) -> usize
    where
        I: IntoIterator<Item = AssetRef>,
    {
        assets
            .into_iter()
            .filter(|asset| self.add(asset.clone(), group))
            .count()
    }

    pub fn remove_at(&mut self, index: usize) -> Option<BookmarkEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            tracing::debug!("Remove of index {} ignored, {} entries", index, self.entries.len());
            None
        }
    }

    /// Remove the entry for an asset, if any
    pub fn remove(&mut self, asset: &AssetIdentity) -> Option<BookmarkEntry> {
        let index = self.entries.iter().position(|e| &e.asset.identity() == asset)?;
        Some(self.entries.remove(index))
    }

    /// Assign an asset to a group, bookmarking it first if needed
    ///
    /// This is what dropping an asset onto a group section does.
    pub fn assign_group(&mut self, asset: AssetRef, group: &str) -> bool {
        match self.position_of(&asset) {
            Some(index) => {
                let entry = &mut self.entries[index];
                if entry.group == group {
                    return false;
                }
                entry.group = group.to_string();
                true
            }
            None => self.add(asset, group),
        }
    }

    /// Move the entry at `from` so it ends up at `to`
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.entries, from, to)
    }

    /// Update stored paths from live handles; returns how many changed
    pub fn refresh_paths(&mut self, resolver: &dyn AssetResolver) -> usize {
        let mut changed = 0;
        for entry in &mut self.entries {
            let Some(current) = entry.asset.handle().and_then(|h| resolver.path_of(h)) else {
                continue;
            };
            if current != entry.asset.path() {
                tracing::debug!("Asset moved: {:?} -> {:?}", entry.asset.path(), current);
                entry.asset.set_path(current);
                changed += 1;
            }
        }
        changed
    }

    /// Try to resolve missing entries again; returns how many were relinked
    pub fn relink_missing(&mut self, resolver: &dyn AssetResolver) -> usize {
        let mut relinked = 0;
        for entry in self.entries.iter_mut().filter(|e| e.asset.is_missing()) {
            if let Some(handle) = resolver.resolve(entry.asset.path()) {
                entry.asset.relink(handle);
                relinked += 1;
            }
        }
        relinked
    }

    // ===== Group Operations =====

    /// Create a custom group; no-op for blank, reserved or existing names
    ///
    /// The name is stored exactly as given so entries already carrying it
    /// become members.
    pub fn add_group(&mut self, name: &str) -> bool {
        if name.trim().is_empty() || GroupFilter::is_reserved_token(name) || self.has_group(name) {
            tracing::debug!("Group {:?} not added", name);
            return false;
        }
        self.groups.push(name.to_string());
        true
    }

    /// Rename a group and every entry in it
    ///
    /// No-op if `old` is not a custom group, or `new` is blank, reserved or
    /// already taken.
    pub fn rename_group(&mut self, old: &str, new: &str) -> bool {
        let new = new.trim();
        if new.is_empty() || GroupFilter::is_reserved_token(new) || self.has_group(new) {
            tracing::debug!("Rename of group {:?} to {:?} rejected", old, new);
            return false;
        }
        let Some(index) = self.groups.iter().position(|g| g == old) else {
            tracing::debug!("Rename of unknown group {:?} ignored", old);
            return false;
        };

        self.groups[index] = new.to_string();
        for entry in self.entries.iter_mut().filter(|e| e.group == old) {
            entry.group = new.to_string();
        }
        true
    }

    /// Delete a group; its entries become ungrouped
    ///
    /// Unconditional: asking the user first is up to the host.
    pub fn delete_group(&mut self, name: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g != name);
        let mut changed = self.groups.len() != before;

        if !name.is_empty() {
            for entry in self.entries.iter_mut().filter(|e| e.group == name) {
                entry.group = UNGROUPED.to_string();
                changed = true;
            }
        }
        changed
    }

    pub fn reorder_group(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.groups, from, to)
    }
}

/// Remove the item at `from` and reinsert it at `to`
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_fs::{MemoryAssets, TypeTag};

    fn live(assets: &mut MemoryAssets, path: &str) -> AssetRef {
        let handle = assets.insert(path, "Prefab");
        AssetRef::resolved(path, handle)
    }

    fn groups_of(store: &BookmarkStore) -> Vec<&str> {
        store.entries().iter().map(|e| e.group.as_str()).collect()
    }

    fn names_of(store: &BookmarkStore) -> Vec<&str> {
        store.entries().iter().map(|e| e.display_name.as_str()).collect()
    }

    /// Entries [(A,"x"), (B,""), (C,"x")], groups ["x"]
    fn sample() -> BookmarkStore {
        let mut assets = MemoryAssets::new();
        let mut store = BookmarkStore::new();
        store.add_group("x");
        store.add(live(&mut assets, "Assets/A.prefab"), "x");
        store.add(live(&mut assets, "Assets/B.prefab"), "");
        store.add(live(&mut assets, "Assets/C.prefab"), "x");
        store
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut assets = MemoryAssets::new();
        let mut store = BookmarkStore::new();
        let a = live(&mut assets, "Assets/Hero.prefab");

        assert!(store.add(a.clone(), ""));
        assert!(!store.add(a, "other"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].display_name, "Hero");
        assert!(store.entries()[0].is_ungrouped());
    }

    #[test]
    fn test_add_ignores_missing_asset() {
        let mut store = BookmarkStore::new();
        assert!(!store.add(AssetRef::missing("Assets/Gone.prefab"), ""));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_many_skips_duplicates() {
        let mut assets = MemoryAssets::new();
        let mut store = BookmarkStore::new();
        let a = live(&mut assets, "Assets/A.prefab");
        let b = live(&mut assets, "Assets/B.prefab");

        let added = store.add_many(vec![a.clone(), b, a], "x");
        assert_eq!(added, 2);
        assert_eq!(groups_of(&store), vec!["x", "x"]);
    }

    #[test]
    fn test_remove() {
        let mut store = sample();
        let b = store.entries()[1].asset.identity();

        assert_eq!(store.remove(&b).map(|e| e.display_name), Some("B".to_string()));
        assert!(store.remove(&b).is_none());
        assert!(store.remove_at(10).is_none());
        assert_eq!(store.remove_at(0).map(|e| e.display_name), Some("A".to_string()));
        assert_eq!(names_of(&store), vec!["C"]);
    }

    #[test]
    fn test_assign_group_updates_or_inserts() {
        let mut assets = MemoryAssets::new();
        let mut store = BookmarkStore::new();
        let a = live(&mut assets, "Assets/A.prefab");
        store.add(a.clone(), "");

        assert!(store.assign_group(a.clone(), "x"));
        assert_eq!(store.len(), 1);
        assert_eq!(groups_of(&store), vec!["x"]);
        assert!(!store.assign_group(a.clone(), "x"));
        assert!(store.assign_group(a, UNGROUPED));
        assert_eq!(groups_of(&store), vec![""]);

        let b = live(&mut assets, "Assets/B.prefab");
        assert!(store.assign_group(b, "y"));
        assert_eq!(store.len(), 2);
        assert_eq!(groups_of(&store), vec!["", "y"]);
    }

    #[test]
    fn test_reorder_moves_only_target() {
        let mut store = sample();

        assert!(store.reorder(0, 2));
        assert_eq!(names_of(&store), vec!["B", "C", "A"]);
        assert!(store.reorder(2, 0));
        assert_eq!(names_of(&store), vec!["A", "B", "C"]);
        assert!(store.reorder(1, 2));
        assert_eq!(names_of(&store), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_reorder_noops() {
        let mut store = sample();
        let before = store.clone();

        assert!(!store.reorder(1, 1));
        assert!(!store.reorder(3, 0));
        assert!(!store.reorder(0, 3));
        assert_eq!(store, before);
    }

    #[test]
    fn test_add_group_rules() {
        let mut store = BookmarkStore::new();
        assert!(store.add_group("Characters"));
        assert!(!store.add_group("Characters"));
        assert!(store.add_group("characters"));
        assert!(!store.add_group(""));
        assert!(!store.add_group("   "));
        assert!(store.add_group(" UI "));
        assert!(!store.add_group(" UI "));
        assert!(store.add_group("UI"));
        assert_eq!(store.groups(), &["Characters", "characters", " UI ", "UI"]);
    }

    #[test]
    fn test_add_group_adopts_existing_members() {
        let mut assets = MemoryAssets::new();
        let mut store = BookmarkStore::new();
        store.assign_group(live(&mut assets, "Assets/A.prefab"), " UI ");

        assert!(store.add_group(" UI "));
        assert_eq!(store.groups(), &[" UI "]);
        assert_eq!(store.group_member_count(" UI "), 1);
    }

    #[test]
    fn test_filter_tokens_are_not_group_names() {
        let mut store = BookmarkStore::new();
        for name in ["*", "すべて", "未分類"] {
            assert!(!store.add_group(name));
        }
        store.add_group("x");
        assert!(!store.rename_group("x", "*"));
        assert!(!store.rename_group("x", " 未分類 "));
        assert_eq!(store.groups(), &["x"]);
    }

    #[test]
    fn test_rename_group_cascades() {
        let mut store = sample();

        assert!(store.rename_group("x", "y"));
        assert_eq!(store.groups(), &["y"]);
        assert_eq!(groups_of(&store), vec!["y", "", "y"]);
    }

    #[test]
    fn test_rename_group_rejections() {
        let mut store = sample();
        store.add_group("z");
        let before = store.clone();

        assert!(!store.rename_group("x", "z"));
        assert!(!store.rename_group("x", "x"));
        assert!(!store.rename_group("x", " "));
        assert!(!store.rename_group("nope", "w"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_delete_group_ungroups_members() {
        let mut store = sample();
        assert_eq!(store.group_member_count("x"), 2);

        assert!(store.delete_group("x"));
        assert!(store.groups().is_empty());
        assert_eq!(groups_of(&store), vec!["", "", ""]);
        assert_eq!(store.group_member_count("x"), 0);
        assert!(!store.delete_group("x"));
    }

    #[test]
    fn test_delete_group_clears_orphan_members() {
        let mut assets = MemoryAssets::new();
        let mut store = BookmarkStore::new();
        store.add(live(&mut assets, "Assets/A.prefab"), "orphan");

        assert!(store.delete_group("orphan"));
        assert_eq!(groups_of(&store), vec![""]);
    }

    #[test]
    fn test_reorder_group() {
        let mut store = BookmarkStore::new();
        for name in ["a", "b", "c"] {
            store.add_group(name);
        }

        assert!(store.reorder_group(2, 0));
        assert_eq!(store.groups(), &["c", "a", "b"]);
        assert!(!store.reorder_group(0, 5));
    }

    #[test]
    fn test_from_parts_drops_invalid_groups() {
        let store = BookmarkStore::from_parts(
            Vec::new(),
            vec!["a".into(), "".into(), "a".into(), " ".into(), "b".into()],
        );
        assert_eq!(store.groups(), &["a", "b"]);
    }

    #[test]
    fn test_refresh_paths_follows_moves() {
        let mut assets = MemoryAssets::new();
        let mut store = BookmarkStore::new();
        let a = live(&mut assets, "Assets/A.prefab");
        let id = a.handle().unwrap().id();
        store.add(a, "");

        assert_eq!(store.refresh_paths(&assets), 0);
        assets.move_asset(id, "Assets/Moved/A.prefab");
        assert_eq!(store.refresh_paths(&assets), 1);
        assert_eq!(store.entries()[0].asset.path(), "Assets/Moved/A.prefab");
    }

    #[test]
    fn test_missing_and_relink() {
        let mut assets = MemoryAssets::new();
        let store_entries = vec![
            BookmarkEntry::new("Gone", AssetRef::missing("Assets/Later.mat"), ""),
            BookmarkEntry::new("Here", live(&mut assets, "Assets/Here.prefab"), ""),
        ];
        let mut store = BookmarkStore::from_parts(store_entries, Vec::new());

        let missing: Vec<usize> = store.missing_entries().map(|(i, _)| i).collect();
        assert_eq!(missing, vec![0]);
        assert_eq!(store.relink_missing(&assets), 0);

        assets.insert("Assets/Later.mat", "Material");
        assert_eq!(store.relink_missing(&assets), 1);
        assert_eq!(store.missing_entries().count(), 0);
        assert_eq!(store.entries()[0].asset.kind(), Some(&TypeTag::new("Material")));
    }
}
