//! BookmarkTool - asset bookmarks for game-engine projects
//!
//! Command-line host for the bookmark store.

mod cli;
mod commands;

use anyhow::Result;
use app_core::{AppError, BookmarkSession, ToolConfig};
use app_fs::ProjectResolver;
use app_persist::DocumentFile;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(ToolConfig::config_path);
    let mut config = ToolConfig::load_from(&config_path)
        .map_err(|e| AppError::Config(format!("{:?}: {}", config_path, e)))?;
    if let Some(data_file) = cli.data_file.clone() {
        config.storage.data_file = Some(data_file);
    }
    if let Some(project) = cli.project.clone() {
        config.storage.project_root = Some(project);
    }

    // Initialize logging and panic hook
    let log_options = app_log::LogOptions {
        dir: app_log::log_dir(),
        level: config.log.level.clone(),
        console: config.log.console,
    };
    app_log::init(&log_options)?;

    if let Err(e) = app_log::cleanup_old_logs(&log_options.dir, config.log.retention_days) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("BookmarkTool starting...");

    let resolver = ProjectResolver::new(config.project_root());
    let file = DocumentFile::new(config.data_file());
    let mut session = BookmarkSession::open(file, resolver, config.initial_view()).map_err(report)?;

    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &mut session, &mut stdout)?;

    if session.has_unsaved_changes() {
        session.save().map_err(report)?;
    }

    tracing::info!("BookmarkTool finished");
    Ok(())
}

/// Log a session error and turn it into the message shown to the user
fn report(e: AppError) -> anyhow::Error {
    if e.is_fatal() {
        tracing::error!("{}", e);
    } else {
        tracing::warn!("{}", e);
    }
    anyhow::anyhow!(e.user_message())
}
