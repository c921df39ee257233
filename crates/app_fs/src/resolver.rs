//! Asset resolution collaborator

use crate::{AssetHandle, AssetId, KindTable, TypeTag};
use std::collections::HashMap;

/// Maps stored paths to live handles and back
///
/// This is the only host dependency the bookmark core needs. Kinds are
/// attached to handles at resolution time; the subtype table used to match
/// them against a type filter is owned by the resolver too.
pub trait AssetResolver {
    /// Resolve a stored path to a live handle, `None` if not found
    fn resolve(&self, path: &str) -> Option<AssetHandle>;

    /// Current location of a live asset, `None` if it no longer exists
    fn path_of(&self, handle: &AssetHandle) -> Option<String>;

    /// Subtype/alias table for this host's asset kinds
    fn kinds(&self) -> &KindTable;
}

/// In-memory asset registry
///
/// Ids stay stable across moves, like GUID-addressed asset databases. Used
/// by hosts that keep their own asset index and by tests.
#[derive(Debug, Default)]
pub struct MemoryAssets {
    assets: HashMap<AssetId, (String, AssetHandle)>,
    by_path: HashMap<String, AssetId>,
    kinds: KindTable,
    next_id: u64,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kinds(kinds: KindTable) -> Self {
        Self {
            kinds,
            ..Self::default()
        }
    }

    /// Register an asset at `path`; the name is the file stem
    pub fn insert(&mut self, path: &str, kind: &str) -> AssetHandle {
        if let Some(existing) = self.by_path.get(path).and_then(|id| self.assets.get(id)) {
            return existing.1.clone();
        }

        self.next_id += 1;
        let id = AssetId(self.next_id);
        let handle = AssetHandle::new(id, file_stem(path), TypeTag::new(kind));

        self.assets.insert(id, (path.to_string(), handle.clone()));
        self.by_path.insert(path.to_string(), id);
        handle
    }

    /// Move an asset, keeping its id; returns false if unknown
    pub fn move_asset(&mut self, id: AssetId, new_path: &str) -> bool {
        let Some((path, _)) = self.assets.get_mut(&id) else {
            return false;
        };
        self.by_path.remove(path.as_str());
        *path = new_path.to_string();
        self.by_path.insert(new_path.to_string(), id);
        true
    }

    pub fn remove(&mut self, id: AssetId) -> bool {
        match self.assets.remove(&id) {
            Some((path, _)) => {
                self.by_path.remove(&path);
                true
            }
            None => false,
        }
    }
}

impl AssetResolver for MemoryAssets {
    fn resolve(&self, path: &str) -> Option<AssetHandle> {
        let id = self.by_path.get(path)?;
        self.assets.get(id).map(|(_, handle)| handle.clone())
    }

    fn path_of(&self, handle: &AssetHandle) -> Option<String> {
        self.assets.get(&handle.id()).map(|(path, _)| path.clone())
    }

    fn kinds(&self) -> &KindTable {
        &self.kinds
    }
}

/// Last path component without its extension
pub(crate) fn file_stem(path: &str) -> String {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) if dot > 0 => name[..dot].to_string(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_resolve() {
        let mut assets = MemoryAssets::new();
        let handle = assets.insert("Assets/Materials/Stone.mat", "Material");

        assert_eq!(handle.name(), "Stone");
        assert_eq!(assets.resolve("Assets/Materials/Stone.mat"), Some(handle.clone()));
        assert_eq!(assets.resolve("Assets/Other.mat"), None);

        // Inserting the same path twice returns the same asset
        let again = assets.insert("Assets/Materials/Stone.mat", "Material");
        assert_eq!(again.id(), handle.id());
    }

    #[test]
    fn test_move_keeps_identity() {
        let mut assets = MemoryAssets::new();
        let handle = assets.insert("Assets/a.png", "Texture2D");

        assert!(assets.move_asset(handle.id(), "Assets/Moved/a.png"));
        assert_eq!(assets.resolve("Assets/a.png"), None);
        assert_eq!(assets.path_of(&handle).as_deref(), Some("Assets/Moved/a.png"));
        assert_eq!(assets.resolve("Assets/Moved/a.png").map(|h| h.id()), Some(handle.id()));
    }

    #[test]
    fn test_remove() {
        let mut assets = MemoryAssets::new();
        let handle = assets.insert("Assets/a.png", "Texture2D");

        assert!(assets.remove(handle.id()));
        assert!(!assets.remove(handle.id()));
        assert_eq!(assets.path_of(&handle), None);
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Assets/Scenes/Main.unity"), "Main");
        assert_eq!(file_stem("Assets\\Win\\x.tar.gz"), "x.tar");
        assert_eq!(file_stem("Assets/Folder"), "Folder");
        assert_eq!(file_stem(".hidden"), ".hidden");
    }
}
