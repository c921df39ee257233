//! BookmarkTool Asset Layer
//!
//! Provides the asset side of a bookmark, independent of any host editor:
//! - AssetRef: stored path plus a possibly-missing live handle
//! - KindTable: portable asset kind tags with a subtype/alias table
//! - AssetResolver: path <-> live handle resolution
//! - ProjectResolver: resolution against a project directory on disk

mod asset;
mod kind;
mod resolver;
mod project;

pub use asset::{AssetHandle, AssetId, AssetIdentity, AssetRef};
pub use kind::{KindTable, TypeTag};
pub use resolver::{AssetResolver, MemoryAssets};
pub use project::{kind_for_extension, ProjectResolver};

use thiserror::Error;

/// Asset layer errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Path is outside the project: {0}")]
    OutsideProject(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
