//! Portable asset kind tags and the subtype/alias table

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Portable asset kind tag, e.g. `Texture2D`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(String);

impl TypeTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reduce a fully-qualified host type name to its short tag
    ///
    /// `UnityEngine.Texture2D, UnityEngine.CoreModule, Version=0.0.0.0` -> `Texture2D`
    pub fn from_qualified_name(name: &str) -> Option<Self> {
        let type_part = name.split(',').next()?.trim();
        let short = type_part.rsplit(['.', '+']).next()?.trim();
        if short.is_empty() {
            None
        } else {
            Some(Self::new(short))
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Subtype and alias table for asset kinds
///
/// Every kind has at most one parent. The root kind matches any asset, so
/// filtering by the root is "any resolved asset".
#[derive(Debug, Clone)]
pub struct KindTable {
    root: TypeTag,
    parents: BTreeMap<TypeTag, TypeTag>,
    aliases: HashMap<String, TypeTag>,
}

impl KindTable {
    /// Empty table with only a root kind
    pub fn with_root(root: impl Into<TypeTag>) -> Self {
        Self {
            root: root.into(),
            parents: BTreeMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Declare `kind` as a subtype of `parent`
    pub fn declare(&mut self, kind: impl Into<TypeTag>, parent: impl Into<TypeTag>) -> &mut Self {
        self.parents.insert(kind.into(), parent.into());
        self
    }

    /// Register an alternate spelling for a kind
    pub fn alias(&mut self, alias: &str, kind: impl Into<TypeTag>) -> &mut Self {
        self.aliases.insert(alias.to_string(), kind.into());
        self
    }

    pub fn root(&self) -> &TypeTag {
        &self.root
    }

    /// Resolve aliases; unknown tags are returned unchanged
    pub fn canonical(&self, tag: &str) -> TypeTag {
        self.aliases
            .get(tag)
            .cloned()
            .unwrap_or_else(|| TypeTag::new(tag))
    }

    /// Is an asset of kind `actual` accepted by a filter on `filter`?
    pub fn is_a(&self, actual: &TypeTag, filter: &TypeTag) -> bool {
        let filter = self.canonical(filter.as_str());
        if filter == self.root {
            return true;
        }

        let mut current = self.canonical(actual.as_str());
        // Bounded walk, a malformed table may contain a cycle
        for _ in 0..=self.parents.len() {
            if current == filter {
                return true;
            }
            match self.parents.get(&current) {
                Some(parent) => current = parent.clone(),
                None => return false,
            }
        }
        false
    }

    /// Declared kinds in sorted order, for a type filter menu
    pub fn kinds(&self) -> impl Iterator<Item = &TypeTag> {
        self.parents.keys()
    }

    /// Map a persisted type filter (short tag or qualified host name) to a kind
    pub fn parse_filter(&self, stored: &str) -> Option<TypeTag> {
        let stored = stored.trim();
        if stored.is_empty() {
            return None;
        }
        let short = TypeTag::from_qualified_name(stored)?;
        Some(self.canonical(short.as_str()))
    }
}

impl Default for KindTable {
    /// Asset kinds of a typical game-engine project
    fn default() -> Self {
        let mut table = Self::with_root("Object");

        for kind in [
            "AnimationClip",
            "AnimatorController",
            "AudioClip",
            "Avatar",
            "DefaultAsset",
            "Font",
            "Material",
            "Mesh",
            "MeshFilter",
            "MeshRenderer",
            "NavMeshData",
            "PhysicMaterial",
            "PhysicsMaterial2D",
            "Prefab",
            "Scene",
            "Script",
            "ScriptableObject",
            "Shader",
            "SkinnedMeshRenderer",
            "Sprite",
            "Terrain",
            "TerrainData",
            "Texture",
        ] {
            table.declare(kind, "Object");
        }
        for texture in ["Texture2D", "Texture3D", "Cubemap", "RenderTexture"] {
            table.declare(texture, "Texture");
        }

        table
            .alias("GameObject", "Prefab")
            .alias("SceneAsset", "Scene")
            .alias("MonoScript", "Script")
            .alias("PhysicsMaterial", "PhysicMaterial");

        table
    }
}
