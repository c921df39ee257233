//! View state: display mode and filters

use app_fs::TypeTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How bookmarks are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// One section per group
    #[serde(rename = "grouped")]
    Grouped,
    /// Single list
    #[default]
    #[serde(rename = "flat")]
    Flat,
}

impl DisplayMode {
    /// Name written to the bookmark document
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Grouped => "Grouped",
            DisplayMode::Flat => "Flat",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Grouped" => Some(DisplayMode::Grouped),
            "Flat" => Some(DisplayMode::Flat),
            _ => None,
        }
    }
}

/// A section heading in grouped display
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Ungrouped,
    Named(String),
}

impl GroupKey {
    /// Key for an entry's group string
    pub fn of(group: &str) -> Self {
        if group.is_empty() {
            GroupKey::Ungrouped
        } else {
            GroupKey::Named(group.to_string())
        }
    }

    /// Value stored in `BookmarkEntry::group`
    pub fn as_group(&self) -> &str {
        match self {
            GroupKey::Ungrouped => crate::UNGROUPED,
            GroupKey::Named(name) => name,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Ungrouped => f.write_str("Ungrouped"),
            GroupKey::Named(name) => f.write_str(name),
        }
    }
}

/// Which groups are shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupFilter {
    #[default]
    All,
    Ungrouped,
    Named(String),
}

/// Persisted token for `GroupFilter::All`
const ALL_TOKEN: &str = "*";
/// Tokens written by earlier versions of the tool
const LEGACY_ALL_TOKEN: &str = "すべて";
const LEGACY_UNGROUPED_TOKEN: &str = "未分類";

impl GroupFilter {
    /// Token written to the bookmark document
    pub fn to_token(&self) -> String {
        match self {
            GroupFilter::All => ALL_TOKEN.to_string(),
            GroupFilter::Ungrouped => String::new(),
            GroupFilter::Named(name) => name.clone(),
        }
    }

    /// Inverse of `to_token`; an absent token means all groups
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            None | Some(ALL_TOKEN) | Some(LEGACY_ALL_TOKEN) => GroupFilter::All,
            Some("") | Some(LEGACY_UNGROUPED_TOKEN) => GroupFilter::Ungrouped,
            Some(name) => GroupFilter::Named(name.to_string()),
        }
    }

    /// Group names that would read back as `All` or `Ungrouped`
    pub fn is_reserved_token(name: &str) -> bool {
        matches!(name, ALL_TOKEN | LEGACY_ALL_TOKEN | LEGACY_UNGROUPED_TOKEN)
    }

    /// Does an entry with this group string pass?
    pub fn accepts_group(&self, group: &str) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Ungrouped => group.is_empty(),
            GroupFilter::Named(name) => group == name,
        }
    }

    /// Is this section shown in grouped display?
    pub fn accepts_section(&self, key: &GroupKey) -> bool {
        match (self, key) {
            (GroupFilter::All, _) => true,
            (GroupFilter::Ungrouped, GroupKey::Ungrouped) => true,
            (GroupFilter::Named(name), GroupKey::Named(section)) => name == section,
            _ => false,
        }
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupFilter::All => f.write_str("All"),
            GroupFilter::Ungrouped => f.write_str("Ungrouped"),
            GroupFilter::Named(name) => f.write_str(name),
        }
    }
}

/// Display mode plus filters; persisted next to the bookmarks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub display_mode: DisplayMode,
    pub group_filter: GroupFilter,
    /// `None` passes every entry
    pub type_filter: Option<TypeTag>,
}
