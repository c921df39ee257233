//! Command system for user intents
//!
//! The host turns input events (drops, button presses, menu actions) into
//! commands; the session applies each one atomically and the host renders
//! the resulting state.

use crate::{BookmarkStore, ViewState};
use app_fs::{AssetIdentity, AssetRef};

/// A user intent against the bookmark store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkCommand {
    Add { asset: AssetRef, group: String },
    /// Add a whole selection, e.g. from a context menu
    AddMany { assets: Vec<AssetRef>, group: String },
    RemoveAt { index: usize },
    Remove { asset: AssetIdentity },
    /// Drop an asset onto a group section
    AssignGroup { asset: AssetRef, group: String },
    /// Drag reorder; `None` when nothing is selected
    Reorder { from: Option<usize>, to: Option<usize> },
    AddGroup { name: String },
    RenameGroup { old: String, new: String },
    DeleteGroup { name: String },
    ReorderGroup { from: Option<usize>, to: Option<usize> },
    SetView(ViewState),
}

impl BookmarkCommand {
    // Bookmark commands
    pub const BOOKMARK_ADD: &'static str = "bookmark.add";
    pub const BOOKMARK_ADD_MANY: &'static str = "bookmark.add_many";
    pub const BOOKMARK_REMOVE: &'static str = "bookmark.remove";
    pub const BOOKMARK_ASSIGN_GROUP: &'static str = "bookmark.assign_group";
    pub const BOOKMARK_REORDER: &'static str = "bookmark.reorder";

    // Group commands
    pub const GROUP_ADD: &'static str = "group.add";
    pub const GROUP_RENAME: &'static str = "group.rename";
    pub const GROUP_DELETE: &'static str = "group.delete";
    pub const GROUP_REORDER: &'static str = "group.reorder";

    // View commands
    pub const VIEW_SET: &'static str = "view.set";

    /// Command identifier for logging
    pub fn id(&self) -> &'static str {
        match self {
            BookmarkCommand::Add { .. } => Self::BOOKMARK_ADD,
            BookmarkCommand::AddMany { .. } => Self::BOOKMARK_ADD_MANY,
            BookmarkCommand::RemoveAt { .. } | BookmarkCommand::Remove { .. } => Self::BOOKMARK_REMOVE,
            BookmarkCommand::AssignGroup { .. } => Self::BOOKMARK_ASSIGN_GROUP,
            BookmarkCommand::Reorder { .. } => Self::BOOKMARK_REORDER,
            BookmarkCommand::AddGroup { .. } => Self::GROUP_ADD,
            BookmarkCommand::RenameGroup { .. } => Self::GROUP_RENAME,
            BookmarkCommand::DeleteGroup { .. } => Self::GROUP_DELETE,
            BookmarkCommand::ReorderGroup { .. } => Self::GROUP_REORDER,
            BookmarkCommand::SetView(_) => Self::VIEW_SET,
        }
    }

    /// Apply to the store and view; returns whether anything changed
    pub fn apply(self, store: &mut BookmarkStore, view: &mut ViewState) -> bool {
        let id = self.id();
        let changed = match self {
            BookmarkCommand::Add { asset, group } => store.add(asset, &group),
            BookmarkCommand::AddMany { assets, group } => store.add_many(assets, &group) > 0,
            BookmarkCommand::RemoveAt { index } => store.remove_at(index).is_some(),
            BookmarkCommand::Remove { asset } => store.remove(&asset).is_some(),
            BookmarkCommand::AssignGroup { asset, group } => store.assign_group(asset, &group),
            BookmarkCommand::Reorder { from, to } => match (from, to) {
                (Some(from), Some(to)) => store.reorder(from, to),
                _ => false,
            },
            BookmarkCommand::AddGroup { name } => store.add_group(&name),
            BookmarkCommand::RenameGroup { old, new } => store.rename_group(&old, &new),
            BookmarkCommand::DeleteGroup { name } => store.delete_group(&name),
            BookmarkCommand::ReorderGroup { from, to } => match (from, to) {
                (Some(from), Some(to)) => store.reorder_group(from, to),
                _ => false,
            },
            BookmarkCommand::SetView(new_view) => {
                let changed = *view != new_view;
                *view = new_view;
                changed
            }
        };

        if changed {
            tracing::debug!("Command {} applied", id);
        } else {
            tracing::debug!("Command {} had no effect", id);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DisplayMode;
    use app_fs::MemoryAssets;

    #[test]
    fn test_reorder_without_selection_is_noop() {
        let mut assets = MemoryAssets::new();
        let mut store = BookmarkStore::new();
        let mut view = ViewState::default();
        for path in ["Assets/A.prefab", "Assets/B.prefab"] {
            let handle = assets.insert(path, "Prefab");
            store.add(AssetRef::resolved(path, handle), "");
        }
        let before = store.clone();

        let cmd = BookmarkCommand::Reorder { from: None, to: Some(0) };
        assert!(!cmd.apply(&mut store, &mut view));
        let cmd = BookmarkCommand::Reorder { from: Some(1), to: None };
        assert!(!cmd.apply(&mut store, &mut view));
        assert_eq!(store, before);

        let cmd = BookmarkCommand::Reorder { from: Some(1), to: Some(0) };
        assert!(cmd.apply(&mut store, &mut view));
        assert_eq!(store.entries()[0].display_name, "B");
    }

    #[test]
    fn test_group_commands() {
        let mut store = BookmarkStore::new();
        let mut view = ViewState::default();

        for cmd in [
            BookmarkCommand::AddGroup { name: "a".into() },
            BookmarkCommand::AddGroup { name: "b".into() },
            BookmarkCommand::RenameGroup { old: "a".into(), new: "c".into() },
            BookmarkCommand::ReorderGroup { from: Some(1), to: Some(0) },
        ] {
            assert!(cmd.apply(&mut store, &mut view));
        }
        assert_eq!(store.groups(), &["b", "c"]);

        let cmd = BookmarkCommand::DeleteGroup { name: "b".into() };
        assert_eq!(cmd.id(), "group.delete");
        assert!(cmd.apply(&mut store, &mut view));
        assert_eq!(store.groups(), &["c"]);
    }

    #[test]
    fn test_set_view() {
        let mut store = BookmarkStore::new();
        let mut view = ViewState::default();
        let grouped = ViewState {
            display_mode: DisplayMode::Grouped,
            ..ViewState::default()
        };

        assert!(BookmarkCommand::SetView(grouped.clone()).apply(&mut store, &mut view));
        assert_eq!(view, grouped);
        assert!(!BookmarkCommand::SetView(grouped).apply(&mut store, &mut view));
    }
}
