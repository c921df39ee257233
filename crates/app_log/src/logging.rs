//! Structured logging setup with tracing

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "bookmark_tool.log";

/// Flushes the file writer when the process exits
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Logging settings
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Directory for the daily JSON log files
    pub dir: PathBuf,
    /// Default filter, overridden by `RUST_LOG`
    pub level: String,
    /// Also log human-readable output to stderr
    pub console: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            dir: super::log_dir(),
            level: "info".to_string(),
            console: cfg!(debug_assertions),
        }
    }
}

/// Initialize the logging system
pub fn init_logging(options: &LogOptions) -> anyhow::Result<()> {
    std::fs::create_dir_all(&options.dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &options.dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // A second init keeps the first guard, the subscriber init below fails anyway
    let _ = FILE_GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console = options
        .console
        .then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(fmt::layer().json().with_writer(non_blocking))
        .try_init()?;

    tracing::info!("Logging initialized in {:?}", options.dir);
    Ok(())
}

/// Clean up log files in `dir` older than specified days
pub fn cleanup_old_logs(dir: &Path, days: u32) -> anyhow::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let retention = Duration::from_secs(u64::from(days).saturating_mul(24 * 60 * 60));
    let Some(threshold) = SystemTime::now().checked_sub(retention) else {
        tracing::debug!("Log retention of {} days is out of range, nothing to clean", days);
        return Ok(0);
    };
    let mut deleted = 0;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !is_log_file(&path) {
            continue;
        }
        let modified = entry.metadata().and_then(|m| m.modified());
        if matches!(modified, Ok(time) if time < threshold) && std::fs::remove_file(&path).is_ok() {
            deleted += 1;
            tracing::debug!("Deleted old log: {:?}", path);
        }
    }

    tracing::info!("Cleaned up {} old log files", deleted);
    Ok(deleted)
}

/// Daily files are named `bookmark_tool.log.YYYY-MM-DD`
fn is_log_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX))
}
