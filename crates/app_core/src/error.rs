//! Application error types

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Recoverable Errors (notify user, continue) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt bookmark data: {0}")]
    CorruptData(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Invalid asset path: {0}")]
    InvalidPath(String),

    // ===== Fatal Errors (application termination) =====
    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::CorruptData(_)
                | AppError::AssetNotFound(_)
                | AppError::InvalidPath(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::CorruptData(_) => {
                "The bookmark file could not be read. Bookmarks in memory were kept.".to_string()
            }
            AppError::AssetNotFound(path) => format!("Asset not found: {}", path),
            AppError::InvalidPath(path) => format!("Not a project asset path: {}", path),
            _ => self.to_string(),
        }
    }
}

impl From<app_persist::PersistError> for AppError {
    fn from(e: app_persist::PersistError) -> Self {
        match e {
            app_persist::PersistError::Io(e) => AppError::Io(e),
            app_persist::PersistError::CorruptData(msg) => AppError::CorruptData(msg),
            app_persist::PersistError::Encode(msg) => AppError::Encode(msg),
        }
    }
}

impl From<app_fs::FsError> for AppError {
    fn from(e: app_fs::FsError) -> Self {
        match e {
            app_fs::FsError::Io(e) => AppError::Io(e),
            app_fs::FsError::NotFound(p) => AppError::AssetNotFound(p),
            app_fs::FsError::InvalidPath(p) | app_fs::FsError::OutsideProject(p) => {
                AppError::InvalidPath(p)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_data_from_persist() {
        let err: AppError = app_persist::PersistError::CorruptData("bad gzip".into()).into();
        assert!(matches!(err, AppError::CorruptData(_)));
        assert!(err.is_recoverable());
        assert!(err.user_message().contains("kept"));
    }

    #[test]
    fn test_fs_errors() {
        let err: AppError = app_fs::FsError::OutsideProject("/etc/passwd".into()).into();
        assert!(matches!(err, AppError::InvalidPath(_)));

        let err: AppError = app_fs::FsError::NotFound("Assets/x.png".into()).into();
        assert_eq!(err.user_message(), "Asset not found: Assets/x.png");
    }

    #[test]
    fn test_fatal() {
        assert!(AppError::Config("bad".into()).is_fatal());
    }
}
