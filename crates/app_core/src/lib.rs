//! BookmarkTool Core Domain Logic
//!
//! This crate contains:
//! - Bookmark store (entries and custom groups)
//! - Filtering for display
//! - Unsaved-change tracking
//! - Store <-> document mapping
//! - Command (intent) dispatch and the editing session
//! - Configuration
//! - Error types

pub mod store;
pub mod view;
pub mod filter;
pub mod diff;
pub mod persistence;
pub mod command;
pub mod session;
pub mod config;
pub mod error;

pub use store::{BookmarkEntry, BookmarkStore, UNGROUPED};
pub use view::{DisplayMode, GroupFilter, GroupKey, ViewState};
pub use filter::{
    assignable_groups, candidate_groups, group_filter_options, visible_entries,
    FilterView, GroupSection, VisibleEntry,
};
pub use diff::{has_unsaved_changes, snapshot, DiffTracker, StoreSnapshot};
pub use persistence::{decode, encode, from_document, to_document};
pub use command::BookmarkCommand;
pub use session::BookmarkSession;
pub use config::{LogConfig, StorageConfig, ToolConfig, ViewConfig};
pub use error::AppError;
