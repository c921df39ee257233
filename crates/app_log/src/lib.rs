//! BookmarkTool Logging Module
//!
//! Provides structured logging, log retention and crash reports.

mod panic_hook;
mod logging;

pub use panic_hook::init_panic_hook;
pub use logging::{init_logging, cleanup_old_logs, LogOptions};

use std::path::PathBuf;
use directories::ProjectDirs;

/// Get the default log directory
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "BookmarkTool", "BookmarkTool")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialize logging and the panic hook
pub fn init(options: &LogOptions) -> anyhow::Result<()> {
    init_logging(options)?;
    init_panic_hook();
    Ok(())
}
