//! Scan orchestration.
//!
//! One scan is a pure transformation of its inputs: scope-filter the tab
//! snapshot, group by normalized key, order each group of two or more
//! under the priority policy, and assemble the result. The engine never
//! closes tabs itself.

use crate::services::duplicate_detector::{group_by_key, order_by_priority};
use crate::types::scan::{DuplicateGroup, ScanResult};
use crate::types::settings::{ScanSettings, Scope};
use crate::types::tab::Tab;

/// Runs one duplicate scan over a tab snapshot.
///
/// `active_window_ids` is supplied by the host (focused windows, or the
/// first known window when none are focused, or empty when no windows
/// exist); it is only consulted when the scope restricts to the active
/// window. Calling this twice with unchanged inputs yields an identical
/// result.
pub fn scan(all_tabs: &[Tab], settings: &ScanSettings, active_window_ids: &[i64]) -> ScanResult {
    let eligible: Vec<Tab> = match settings.scope {
        Scope::All => all_tabs.to_vec(),
        Scope::ActiveWindow => all_tabs
            .iter()
            .filter(|tab| active_window_ids.contains(&tab.window_id))
            .cloned()
            .collect(),
    };

    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut tab_ids_to_close: Vec<i64> = Vec::new();

    for (key, bucket) in group_by_key(&eligible, &settings.matching) {
        if bucket.len() <= 1 {
            continue;
        }

        let ordered = order_by_priority(&bucket, settings.priority);
        let survivor_id = ordered[0].id;
        let survivor_url = ordered[0].url.clone();
        tab_ids_to_close.extend(ordered[1..].iter().map(|tab| tab.id));

        groups.push(DuplicateGroup {
            key,
            url: survivor_url,
            total: ordered.len(),
            survivor_id,
            priority: settings.priority,
            tabs: ordered,
        });
    }

    ScanResult {
        group_count: groups.len(),
        tabs_to_close_count: tab_ids_to_close.len(),
        tab_ids_to_close,
        groups,
        settings_snapshot: settings.clone(),
    }
}
