//! Visible bookmarks for the current view
//!
//! Pure functions over the store. Newest bookmarks come first in both
//! display modes, i.e. entries are listed in reverse store order.

use crate::{BookmarkEntry, BookmarkStore, DisplayMode, GroupFilter, GroupKey, ViewState};
use app_fs::{KindTable, TypeTag};

/// An entry with its index in the store, for reorder and remove intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleEntry<'a> {
    pub index: usize,
    pub entry: &'a BookmarkEntry,
}

/// One section of the grouped display; may be empty, it is still a drop target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSection<'a> {
    pub key: GroupKey,
    pub entries: Vec<VisibleEntry<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterView<'a> {
    Flat(Vec<VisibleEntry<'a>>),
    Grouped(Vec<GroupSection<'a>>),
}

impl<'a> FilterView<'a> {
    /// Every visible entry in display order
    pub fn entries(&self) -> Vec<VisibleEntry<'a>> {
        match self {
            FilterView::Flat(entries) => entries.clone(),
            FilterView::Grouped(sections) => sections
                .iter()
                .flat_map(|s| s.entries.iter().copied())
                .collect(),
        }
    }
}

/// Compute what the host should render
pub fn visible_entries<'a>(
    store: &'a BookmarkStore,
    view: &ViewState,
    kinds: &KindTable,
) -> FilterView<'a> {
    let type_ok = |entry: &BookmarkEntry| passes_type(entry, view.type_filter.as_ref(), kinds);

    match view.display_mode {
        DisplayMode::Flat => FilterView::Flat(
            newest_first(store)
                .filter(|v| view.group_filter.accepts_group(&v.entry.group) && type_ok(v.entry))
                .collect(),
        ),
        DisplayMode::Grouped => FilterView::Grouped(
            candidate_groups(store)
                .into_iter()
                .filter(|key| view.group_filter.accepts_section(key))
                .map(|key| {
                    let entries = newest_first(store)
                        .filter(|v| v.entry.group == key.as_group() && type_ok(v.entry))
                        .collect();
                    GroupSection { key, entries }
                })
                .collect(),
        ),
    }
}

/// Sections of the grouped display, in order
///
/// Ungrouped first, then custom groups, then group names found only on
/// entries (set before the group existed, or left over from a removed
/// group record), in order of first appearance.
pub fn candidate_groups(store: &BookmarkStore) -> Vec<GroupKey> {
    let mut keys = vec![GroupKey::Ungrouped];

    let custom = store.groups().iter().map(String::as_str);
    let on_entries = store.entries().iter().map(|e| e.group.as_str());

    for name in custom.chain(on_entries) {
        let key = GroupKey::of(name);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Choices for the group filter menu
pub fn group_filter_options(store: &BookmarkStore) -> Vec<GroupFilter> {
    let mut options = vec![GroupFilter::All, GroupFilter::Ungrouped];
    options.extend(store.groups().iter().map(|g| GroupFilter::Named(g.clone())));
    options
}

/// Groups a new bookmark can be put in
pub fn assignable_groups(store: &BookmarkStore) -> Vec<GroupKey> {
    let mut groups = vec![GroupKey::Ungrouped];
    groups.extend(store.groups().iter().map(|g| GroupKey::Named(g.clone())));
    groups
}

fn newest_first(store: &BookmarkStore) -> impl Iterator<Item = VisibleEntry<'_>> {
    store
        .entries()
        .iter()
        .enumerate()
        .rev()
        .map(|(index, entry)| VisibleEntry { index, entry })
}

/// Missing assets have no kind and never pass a type filter
fn passes_type(entry: &BookmarkEntry, filter: Option<&TypeTag>, kinds: &KindTable) -> bool {
    match filter {
        None => true,
        Some(filter) => entry
            .asset
            .kind()
            .is_some_and(|kind| kinds.is_a(kind, filter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_fs::{AssetRef, MemoryAssets};

    fn add(store: &mut BookmarkStore, assets: &mut MemoryAssets, path: &str, kind: &str, group: &str) {
        let handle = assets.insert(path, kind);
        store.add(AssetRef::resolved(path, handle), group);
    }

    /// Entries [(A,"x"), (B,""), (C,"x")], groups ["x"]
    fn sample() -> BookmarkStore {
        let mut assets = MemoryAssets::new();
        let mut store = BookmarkStore::new();
        store.add_group("x");
        add(&mut store, &mut assets, "Assets/A.png", "Texture2D", "x");
        add(&mut store, &mut assets, "Assets/B.mat", "Material", "");
        add(&mut store, &mut assets, "Assets/C.cubemap", "Cubemap", "x");
        store
    }

    fn flat(group_filter: GroupFilter, type_filter: Option<&str>) -> ViewState {
        ViewState {
            display_mode: DisplayMode::Flat,
            group_filter,
            type_filter: type_filter.map(TypeTag::new),
        }
    }

    fn names(entries: &[VisibleEntry<'_>]) -> Vec<String> {
        entries.iter().map(|v| v.entry.display_name.clone()).collect()
    }

    #[test]
    fn test_flat_group_filter() {
        let store = sample();
        let kinds = KindTable::default();

        let view = visible_entries(&store, &flat(GroupFilter::Named("x".into()), None), &kinds);
        assert_eq!(names(&view.entries()), vec!["C", "A"]);

        let view = visible_entries(&store, &flat(GroupFilter::Ungrouped, None), &kinds);
        assert_eq!(names(&view.entries()), vec!["B"]);

        let view = visible_entries(&store, &flat(GroupFilter::All, None), &kinds);
        assert_eq!(names(&view.entries()), vec!["C", "B", "A"]);
        let indices: Vec<usize> = view.entries().iter().map(|v| v.index).collect();
        assert_eq!(indices, vec![2, 1, 0]);
    }

    #[test]
    fn test_type_filter_uses_subtypes() {
        let store = sample();
        let kinds = KindTable::default();

        let view = visible_entries(&store, &flat(GroupFilter::All, Some("Texture")), &kinds);
        assert_eq!(names(&view.entries()), vec!["C", "A"]);

        let view = visible_entries(&store, &flat(GroupFilter::All, Some("Texture2D")), &kinds);
        assert_eq!(names(&view.entries()), vec!["A"]);

        let view = visible_entries(&store, &flat(GroupFilter::Ungrouped, Some("Texture")), &kinds);
        assert!(view.entries().is_empty());
    }

    #[test]
    fn test_missing_assets_excluded_by_type_filter() {
        let store = sample();
        let mut entries = store.entries().to_vec();
        entries.push(BookmarkEntry::new("Gone", AssetRef::missing("Assets/Gone.png"), ""));
        let store = BookmarkStore::from_parts(entries, store.groups().to_vec());
        let kinds = KindTable::default();

        let view = visible_entries(&store, &flat(GroupFilter::Ungrouped, None), &kinds);
        assert_eq!(names(&view.entries()), vec!["Gone", "B"]);

        let view = visible_entries(&store, &flat(GroupFilter::Ungrouped, Some("Object")), &kinds);
        assert_eq!(names(&view.entries()), vec!["B"]);
    }

    #[test]
    fn test_grouped_sections() {
        let mut assets = MemoryAssets::new();
        let mut store = sample();
        store.add_group("empty");
        add(&mut store, &mut assets, "Assets/D.prefab", "Prefab", "orphan");

        let view = ViewState {
            display_mode: DisplayMode::Grouped,
            ..ViewState::default()
        };
        let FilterView::Grouped(sections) = visible_entries(&store, &view, &KindTable::default()) else {
            panic!("expected grouped view");
        };

        let keys: Vec<String> = sections.iter().map(|s| s.key.to_string()).collect();
        assert_eq!(keys, vec!["Ungrouped", "x", "empty", "orphan"]);
        assert_eq!(names(&sections[0].entries), vec!["B"]);
        assert_eq!(names(&sections[1].entries), vec!["C", "A"]);
        assert!(sections[2].entries.is_empty());
        assert_eq!(names(&sections[3].entries), vec!["D"]);
    }

    #[test]
    fn test_grouped_filter_selects_section() {
        let store = sample();
        let view = ViewState {
            display_mode: DisplayMode::Grouped,
            group_filter: GroupFilter::Ungrouped,
            type_filter: None,
        };

        let FilterView::Grouped(sections) = visible_entries(&store, &view, &KindTable::default()) else {
            panic!("expected grouped view");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].key, GroupKey::Ungrouped);
        assert_eq!(names(&sections[0].entries), vec!["B"]);
    }

    #[test]
    fn test_menu_options() {
        let store = sample();
        assert_eq!(
            group_filter_options(&store),
            vec![GroupFilter::All, GroupFilter::Ungrouped, GroupFilter::Named("x".into())]
        );
        assert_eq!(
            assignable_groups(&store),
            vec![GroupKey::Ungrouped, GroupKey::Named("x".into())]
        );
    }
}
