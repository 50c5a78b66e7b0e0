use serde::{Deserialize, Serialize};

use super::settings::{Priority, ScanSettings};
use super::tab::Tab;

/// Title shown for tabs whose host snapshot carries no title.
pub const UNTITLED_TAB: &str = "(untitled tab)";

/// Group-entry record materialized for each tab eligible for grouping.
///
/// Derived, ephemeral: exists only within one scan's lifetime. Absent
/// titles render as [`UNTITLED_TAB`] and absent access times score as 0,
/// so two never-accessed tabs tie and resolve by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateTab {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub window_id: i64,
    pub last_accessed: i64,
}

impl DuplicateTab {
    pub fn from_tab(tab: &Tab) -> Self {
        Self {
            id: tab.id,
            url: tab.url.clone().unwrap_or_default(),
            title: tab
                .title
                .clone()
                .unwrap_or_else(|| UNTITLED_TAB.to_string()),
            window_id: tab.window_id,
            last_accessed: tab.last_accessed.unwrap_or(0),
        }
    }
}

/// One group of duplicate tabs, ordered with the survivor first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    /// Normalized comparison key shared by every tab in the group.
    pub key: String,
    /// URL of the surviving tab, for display.
    pub url: String,
    pub total: usize,
    pub survivor_id: i64,
    pub priority: Priority,
    pub tabs: Vec<DuplicateTab>,
}

/// Outcome of one duplicate scan.
///
/// `tab_ids_to_close` is the union of every group's non-survivor ids, in
/// first-seen group order. Groups with fewer than two tabs never appear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub group_count: usize,
    pub tabs_to_close_count: usize,
    pub tab_ids_to_close: Vec<i64>,
    pub groups: Vec<DuplicateGroup>,
    pub settings_snapshot: ScanSettings,
}
