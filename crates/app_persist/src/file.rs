//! Fixed-path backing file for the bookmark document

use crate::{decode_document, encode_document, PersistedDocument, Result};
use std::path::{Path, PathBuf};

/// The durable storage file
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the document; `None` on first run when the file does not exist
    pub fn load(&self) -> Result<Option<PersistedDocument>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No bookmark file at {:?}", self.path);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let doc = decode_document(&bytes)?;
        tracing::debug!("Read {} bytes from {:?}", bytes.len(), self.path);
        Ok(Some(doc))
    }

    /// Write the document, replacing the previous file atomically
    pub fn save(&self, doc: &PersistedDocument) -> Result<()> {
        let bytes = encode_document(doc)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.tmp_path();
        std::fs::write(&tmp, &bytes)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!("Wrote {} bytes to {:?}", bytes.len(), self.path);
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
