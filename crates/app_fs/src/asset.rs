//! Asset identity and bookmark references

use crate::TypeTag;
use xxhash_rust::xxh3::xxh3_64;

/// Stable identity of a live asset, assigned by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u64);

impl AssetId {
    /// Derive an id from a normalized project-relative path
    pub fn from_path(path: &str) -> Self {
        Self(xxh3_64(path.as_bytes()))
    }
}

/// A live, resolved asset
///
/// The name and kind are captured when the resolver hands the handle out;
/// the current location is always asked from the resolver again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHandle {
    id: AssetId,
    name: String,
    kind: TypeTag,
}

impl AssetHandle {
    pub fn new(id: AssetId, name: impl Into<String>, kind: TypeTag) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Display name of the asset (file stem for file-backed assets)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TypeTag {
        &self.kind
    }
}

/// Identity used for duplicate detection and dirty-state comparison
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetIdentity {
    /// Resolved asset
    Live(AssetId),
    /// Unresolved asset, identified by its stored path
    Missing(String),
}

/// Reference held by a bookmark entry
///
/// `path` is the last known location. `handle` is `None` when the path no
/// longer resolves (moved or deleted asset); the path is kept verbatim so
/// the entry can be relinked later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    path: String,
    handle: Option<AssetHandle>,
}

impl AssetRef {
    /// Reference to a live asset at `path`
    pub fn resolved(path: impl Into<String>, handle: AssetHandle) -> Self {
        Self {
            path: path.into(),
            handle: Some(handle),
        }
    }

    /// Reference whose path did not resolve
    pub fn missing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            handle: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handle(&self) -> Option<&AssetHandle> {
        self.handle.as_ref()
    }

    pub fn is_missing(&self) -> bool {
        self.handle.is_none()
    }

    pub fn identity(&self) -> AssetIdentity {
        match &self.handle {
            Some(handle) => AssetIdentity::Live(handle.id()),
            None => AssetIdentity::Missing(self.path.clone()),
        }
    }

    /// Does this reference point at the given live asset?
    ///
    /// A missing reference never matches a live handle.
    pub fn refers_to(&self, handle: &AssetHandle) -> bool {
        self.handle.as_ref().is_some_and(|h| h.id() == handle.id())
    }

    /// Kind of the live asset, `None` when missing
    pub fn kind(&self) -> Option<&TypeTag> {
        self.handle.as_ref().map(AssetHandle::kind)
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn relink(&mut self, handle: AssetHandle) {
        self.handle = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(id: u64) -> AssetHandle {
        AssetHandle::new(AssetId(id), "tex", TypeTag::new("Texture2D"))
    }

    #[test]
    fn test_id_from_path_is_stable() {
        assert_eq!(
            AssetId::from_path("Assets/Textures/stone.png"),
            AssetId::from_path("Assets/Textures/stone.png")
        );
        assert_ne!(
            AssetId::from_path("Assets/a.png"),
            AssetId::from_path("Assets/b.png")
        );
    }

    #[test]
    fn test_missing_never_refers_to_live() {
        let missing = AssetRef::missing("Assets/gone.png");
        assert!(missing.is_missing());
        assert!(!missing.refers_to(&texture(1)));
        assert_eq!(
            missing.identity(),
            AssetIdentity::Missing("Assets/gone.png".into())
        );
    }

    #[test]
    fn test_identity_ignores_path_for_live_assets() {
        let a = AssetRef::resolved("Assets/old.png", texture(7));
        let b = AssetRef::resolved("Assets/new.png", texture(7));
        assert_eq!(a.identity(), b.identity());
        assert!(a.refers_to(&texture(7)));
    }
}
