//! Duplicate grouping and survivor selection.

use std::collections::HashMap;

use crate::services::url_normalizer::{UrlNormalizer, UrlNormalizerTrait};
use crate::types::scan::DuplicateTab;
use crate::types::settings::{MatchingConfig, Priority};
use crate::types::tab::Tab;

/// Buckets tabs by their normalized comparison key.
///
/// Keys keep first-seen order and tabs keep insertion order within a
/// bucket, so the first tab seen for a key stays first before sorting.
/// Tabs without a key (absent or empty URL) are skipped: they are never
/// grouped and never closed.
pub fn group_by_key(tabs: &[Tab], config: &MatchingConfig) -> Vec<(String, Vec<DuplicateTab>)> {
    let normalizer = UrlNormalizer::new(*config);
    let mut key_order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<DuplicateTab>> = HashMap::new();

    for tab in tabs {
        let key = match normalizer.normalize(tab.url.as_deref(), tab.title.as_deref()) {
            Some(key) => key,
            None => continue,
        };

        match buckets.get_mut(&key) {
            Some(bucket) => bucket.push(DuplicateTab::from_tab(tab)),
            None => {
                key_order.push(key.clone());
                buckets.insert(key, vec![DuplicateTab::from_tab(tab)]);
            }
        }
    }

    key_order
        .into_iter()
        .map(|key| {
            let bucket = buckets.remove(&key).unwrap_or_default();
            (key, bucket)
        })
        .collect()
}

/// Orders a duplicate group under the priority policy, survivor first.
///
/// Score is the tab's last-accessed time (0 when the host never reported
/// one): ascending keeps the older tab, descending keeps the newer one.
/// Equal scores always fall back to id ascending, so re-running the same
/// input yields the same survivor regardless of priority mode.
pub fn order_by_priority(group: &[DuplicateTab], priority: Priority) -> Vec<DuplicateTab> {
    let mut ordered = group.to_vec();
    ordered.sort_by(|a, b| {
        let primary = match priority {
            Priority::KeepOlder => a.last_accessed.cmp(&b.last_accessed),
            Priority::KeepNewer => b.last_accessed.cmp(&a.last_accessed),
        };
        primary.then(a.id.cmp(&b.id))
    });
    ordered
}
