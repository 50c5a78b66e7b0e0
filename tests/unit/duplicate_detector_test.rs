use dupcloser::services::duplicate_detector::{group_by_key, order_by_priority};
use dupcloser::types::scan::DuplicateTab;
use dupcloser::types::settings::{MatchingConfig, Priority};
use dupcloser::types::tab::Tab;

fn tab(id: i64, url: &str) -> Tab {
    Tab {
        id,
        url: Some(url.to_string()),
        title: Some(format!("tab {}", id)),
        window_id: 1,
        last_accessed: Some(id * 100),
    }
}

fn dup(id: i64, last_accessed: i64) -> DuplicateTab {
    DuplicateTab {
        id,
        url: "https://x.com/".to_string(),
        title: format!("tab {}", id),
        window_id: 1,
        last_accessed,
    }
}

// ─── Grouping ───

#[test]
fn groups_exact_key_matches_only() {
    let tabs = vec![
        tab(1, "http://a.com"),
        tab(2, "https://a.com"),
        tab(3, "http://a.com"),
    ];
    let grouped = group_by_key(&tabs, &MatchingConfig::default());
    // http and https are distinct keys.
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].1.len(), 2);
    assert_eq!(grouped[1].1.len(), 1);
}

#[test]
fn keys_keep_first_seen_order() {
    let tabs = vec![
        tab(1, "http://b.com"),
        tab(2, "http://a.com"),
        tab(3, "http://b.com"),
    ];
    let grouped = group_by_key(&tabs, &MatchingConfig::default());
    assert_eq!(grouped[0].0, "http://b.com/");
    assert_eq!(grouped[1].0, "http://a.com/");
}

#[test]
fn bucket_keeps_insertion_order() {
    let tabs = vec![
        tab(7, "http://a.com"),
        tab(3, "http://a.com"),
        tab(9, "http://a.com"),
    ];
    let grouped = group_by_key(&tabs, &MatchingConfig::default());
    let ids: Vec<i64> = grouped[0].1.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![7, 3, 9]);
}

#[test]
fn skips_tabs_without_url() {
    let tabs = vec![
        tab(1, "http://a.com"),
        Tab {
            id: 2,
            url: None,
            title: None,
            window_id: 1,
            last_accessed: None,
        },
        Tab {
            id: 3,
            url: Some(String::new()),
            title: None,
            window_id: 1,
            last_accessed: None,
        },
    ];
    let grouped = group_by_key(&tabs, &MatchingConfig::default());
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].1.len(), 1);
    assert_eq!(grouped[0].1[0].id, 1);
}

#[test]
fn materialization_coerces_absent_fields() {
    let tabs = vec![Tab {
        id: 5,
        url: Some("http://a.com".to_string()),
        title: None,
        window_id: 2,
        last_accessed: None,
    }];
    let grouped = group_by_key(&tabs, &MatchingConfig::default());
    let entry = &grouped[0].1[0];
    assert_eq!(entry.title, "(untitled tab)");
    assert_eq!(entry.last_accessed, 0);
    assert_eq!(entry.window_id, 2);
}

#[test]
fn matching_config_merges_buckets() {
    let tabs = vec![tab(1, "https://www.a.com"), tab(2, "https://a.com")];
    let exact = group_by_key(&tabs, &MatchingConfig::default());
    assert_eq!(exact.len(), 2);

    let ignore_www = MatchingConfig {
        ignore_www: true,
        ..MatchingConfig::default()
    };
    let merged = group_by_key(&tabs, &ignore_www);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].1.len(), 2);
}

// ─── Survivor ordering ───

#[test]
fn keep_older_orders_by_ascending_access_time() {
    let group = vec![dup(1, 300), dup(2, 100), dup(3, 200)];
    let ordered = order_by_priority(&group, Priority::KeepOlder);
    let ids: Vec<i64> = ordered.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn keep_newer_orders_by_descending_access_time() {
    let group = vec![dup(1, 300), dup(2, 100), dup(3, 200)];
    let ordered = order_by_priority(&group, Priority::KeepNewer);
    let ids: Vec<i64> = ordered.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
}

#[test]
fn equal_scores_break_ties_by_id_ascending_in_both_modes() {
    let group = vec![dup(9, 100), dup(4, 100), dup(7, 100)];

    let older = order_by_priority(&group, Priority::KeepOlder);
    let older_ids: Vec<i64> = older.iter().map(|t| t.id).collect();
    assert_eq!(older_ids, vec![4, 7, 9]);

    let newer = order_by_priority(&group, Priority::KeepNewer);
    let newer_ids: Vec<i64> = newer.iter().map(|t| t.id).collect();
    assert_eq!(newer_ids, vec![4, 7, 9]);
}

#[test]
fn never_accessed_tabs_tie_at_zero() {
    // Absent access times were coerced to 0 at materialization, so the
    // lowest id survives regardless of priority.
    let group = vec![dup(8, 0), dup(2, 0)];
    assert_eq!(order_by_priority(&group, Priority::KeepOlder)[0].id, 2);
    assert_eq!(order_by_priority(&group, Priority::KeepNewer)[0].id, 2);
}

#[test]
fn ordering_does_not_mutate_input() {
    let group = vec![dup(2, 200), dup(1, 100)];
    let _ = order_by_priority(&group, Priority::KeepOlder);
    assert_eq!(group[0].id, 2);
}
