//! On-disk document schema
//!
//! Field names match the documents written by earlier versions of the tool,
//! so those still load. Unknown fields (e.g. a serialized live object
//! reference inside entries) are ignored and missing fields take defaults.

use serde::{Deserialize, Serialize};

/// One bookmark as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedEntry {
    pub name: String,
    pub asset_path: String,
    pub group: String,
}

/// The whole bookmark collection plus view state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedDocument {
    /// Entries in display order
    pub list: Vec<PersistedEntry>,

    /// Custom group names in display order
    pub custom_groups: Vec<String>,

    /// `Grouped` or `Flat`; empty when never written
    pub display_mode: String,

    /// Group filter token; `None` when the field is absent
    pub filter_group: Option<String>,

    /// Type filter tag, empty for no filter
    pub filter_type_name: String,
}
