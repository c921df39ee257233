//! ProjectResolver - asset resolution against a project directory

use crate::resolver::file_stem;
use crate::{AssetHandle, AssetId, AssetResolver, FsError, KindTable, Result, TypeTag};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Resolves project-relative paths (`Assets/Textures/stone.png`) on disk
///
/// Stored paths always use `/` separators so documents stay portable
/// between platforms. The id of a file is the hash of its relative path.
pub struct ProjectResolver {
    root: PathBuf,
    kinds: KindTable,
    /// Paths handed out by `resolve`, for `path_of`
    seen: RefCell<HashMap<AssetId, String>>,
}

impl ProjectResolver {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_kinds(root, KindTable::default())
    }

    pub fn with_kinds<P: AsRef<Path>>(root: P, kinds: KindTable) -> Self {
        let root = root.as_ref();
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        Self {
            root,
            kinds,
            seen: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Convert a user-supplied path (absolute or relative to the project)
    /// into the normalized project-relative form
    pub fn relative<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        let stripped = if path.is_absolute() {
            let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
            absolute
                .strip_prefix(&self.root)
                .map(Path::to_path_buf)
                .map_err(|_| FsError::OutsideProject(path.display().to_string()))?
        } else {
            path.to_path_buf()
        };

        normalize(&stripped)
    }

    /// Resolve a user-supplied path, failing if it does not exist
    pub fn resolve_user_path<P: AsRef<Path>>(&self, path: P) -> Result<(String, AssetHandle)> {
        let relative = self.relative(path)?;
        let handle = self
            .resolve(&relative)
            .ok_or_else(|| FsError::NotFound(relative.clone()))?;
        Ok((relative, handle))
    }

    fn absolute(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

impl AssetResolver for ProjectResolver {
    fn resolve(&self, path: &str) -> Option<AssetHandle> {
        let relative = normalize(Path::new(path)).ok()?;
        let absolute = self.absolute(&relative);
        let metadata = std::fs::metadata(&absolute).ok()?;

        let kind = if metadata.is_dir() {
            "DefaultAsset"
        } else {
            absolute
                .extension()
                .and_then(|ext| ext.to_str())
                .map(kind_for_extension)
                .unwrap_or("DefaultAsset")
        };

        let id = AssetId::from_path(&relative);
        let handle = AssetHandle::new(id, file_stem(&relative), self.kinds.canonical(kind));
        self.seen.borrow_mut().insert(id, relative);
        Some(handle)
    }

    fn path_of(&self, handle: &AssetHandle) -> Option<String> {
        let path = self.seen.borrow().get(&handle.id()).cloned()?;
        if self.absolute(&path).exists() {
            Some(path)
        } else {
            None
        }
    }

    fn kinds(&self) -> &KindTable {
        &self.kinds
    }
}

/// Normalize a relative path: resolve `.`/`..`, use `/` separators
fn normalize(path: &Path) -> Result<String> {
    let mut parts: Vec<String> = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| FsError::InvalidPath(path.to_string_lossy().to_string()))?;
                // Windows separators inside a stored path
                parts.extend(part.split('\\').filter(|p| !p.is_empty()).map(str::to_string));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(FsError::OutsideProject(path.display().to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(FsError::InvalidPath(path.display().to_string()));
            }
        }
    }

    if parts.is_empty() {
        return Err(FsError::InvalidPath(path.display().to_string()));
    }
    Ok(parts.join("/"))
}

/// Asset kind for a file extension
pub fn kind_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "anim" => "AnimationClip",
        "controller" | "overridecontroller" => "AnimatorController",
        "wav" | "mp3" | "ogg" | "aif" | "aiff" | "flac" => "AudioClip",
        "cubemap" => "Cubemap",
        "ttf" | "otf" | "fontsettings" => "Font",
        "mat" => "Material",
        "fbx" | "obj" | "dae" | "blend" | "mesh" => "Mesh",
        "physicmaterial" => "PhysicMaterial",
        "physicsmaterial2d" => "PhysicsMaterial2D",
        "prefab" => "Prefab",
        "rendertexture" => "RenderTexture",
        "unity" => "Scene",
        "cs" => "Script",
        "asset" => "ScriptableObject",
        "shader" | "shadergraph" | "compute" => "Shader",
        "terrainlayer" => "TerrainData",
        "png" | "jpg" | "jpeg" | "tga" | "psd" | "bmp" | "gif" | "exr" | "hdr" | "tif" | "tiff" => {
            "Texture2D"
        }
        _ => "DefaultAsset",
    }
}
