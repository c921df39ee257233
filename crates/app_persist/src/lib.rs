//! BookmarkTool Persistence Layer
//!
//! Provides:
//! - PersistedDocument: the explicit on-disk schema
//! - gzip-compressed JSON codec
//! - DocumentFile: the fixed-path backing file

mod codec;
mod document;
mod file;

pub use codec::{decode_document, encode_document};
pub use document::{PersistedDocument, PersistedEntry};
pub use file::DocumentFile;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the bookmark document inside the data directory
pub const DATA_FILE_NAME: &str = "BookmarkToolData.json.gz";

/// Persistence errors
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt bookmark data: {0}")]
    CorruptData(String),

    #[error("Encode error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;

/// Directory of the bookmark document, relative to the project root
pub const DATA_FILE_DIR: &str = "Packages/BookmarkTool/Editor";

/// Bookmark document of a project
///
/// Stored asset paths are project-relative, so each project keeps its own file.
pub fn project_data_file(project_root: &Path) -> PathBuf {
    project_root.join(DATA_FILE_DIR).join(DATA_FILE_NAME)
}
