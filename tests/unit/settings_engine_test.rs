use std::fs;

use serde_json::{json, Value};
use tempfile::TempDir;

use dupcloser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use dupcloser::types::settings::{Priority, ScanSettings, Scope, STORAGE_KEY};

fn setup() -> (SettingsEngine, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = tmp.path().join("settings.json").to_string_lossy().to_string();
    (SettingsEngine::new(Some(path)), tmp)
}

// ─── Defaults ───

#[test]
fn defaults_match_the_persisted_schema() {
    let defaults = ScanSettings::default();
    assert!(!defaults.matching.ignore_case);
    assert!(!defaults.matching.ignore_www);
    assert!(!defaults.matching.ignore_hash);
    assert!(!defaults.matching.ignore_search);
    assert!(!defaults.matching.ignore_path);
    assert!(!defaults.matching.compare_title);
    assert_eq!(defaults.priority, Priority::KeepOlder);
    assert_eq!(defaults.scope, Scope::All);
    assert!(defaults.auto_scan);
}

#[test]
fn wire_format_uses_camel_case_and_legacy_values() {
    let settings = ScanSettings {
        scope: Scope::ActiveWindow,
        priority: Priority::KeepNewer,
        ..ScanSettings::default()
    };
    let value = serde_json::to_value(&settings).unwrap();
    assert_eq!(value["scope"], "active");
    assert_eq!(value["priority"], "keepNewer");
    assert_eq!(value["autoScan"], true);
    assert_eq!(value["matching"]["ignoreWWW"], false);
    assert_eq!(value["matching"]["compareTitle"], false);
}

#[test]
fn load_without_file_yields_defaults() {
    let (mut engine, _tmp) = setup();
    assert_eq!(engine.load().unwrap(), ScanSettings::default());
}

// ─── Storage-key record ───

#[test]
fn save_nests_the_record_under_the_storage_key() {
    let (mut engine, _tmp) = setup();
    engine.load().unwrap();
    engine.save().unwrap();

    let content = fs::read_to_string(engine.get_config_path()).unwrap();
    let document: Value = serde_json::from_str(&content).unwrap();
    assert!(document.get(STORAGE_KEY).is_some());
    assert_eq!(document[STORAGE_KEY]["priority"], "keepOlder");
}

#[test]
fn load_merges_a_partial_record_with_defaults() {
    let (mut engine, _tmp) = setup();
    fs::write(
        engine.get_config_path(),
        json!({
            "dupTabCloserSettings": {
                "matching": {"ignoreHash": true},
                "priority": "keepNewer"
            }
        })
        .to_string(),
    )
    .unwrap();

    let loaded = engine.load().unwrap();
    assert!(loaded.matching.ignore_hash);
    assert!(!loaded.matching.ignore_case);
    assert_eq!(loaded.priority, Priority::KeepNewer);
    assert_eq!(loaded.scope, Scope::All);
    assert!(loaded.auto_scan);
}

#[test]
fn load_ignores_unknown_fields() {
    let (mut engine, _tmp) = setup();
    fs::write(
        engine.get_config_path(),
        json!({
            "dupTabCloserSettings": {
                "scope": "active",
                "someFutureField": 42
            }
        })
        .to_string(),
    )
    .unwrap();

    let loaded = engine.load().unwrap();
    assert_eq!(loaded.scope, Scope::ActiveWindow);
}

#[test]
fn load_without_the_storage_key_yields_defaults() {
    let (mut engine, _tmp) = setup();
    fs::write(engine.get_config_path(), "{}").unwrap();
    assert_eq!(engine.load().unwrap(), ScanSettings::default());
}

#[test]
fn load_surfaces_malformed_files() {
    let (mut engine, _tmp) = setup();
    fs::write(engine.get_config_path(), "{ not json").unwrap();
    assert!(engine.load().is_err());
}

// ─── Dot-notation updates ───

#[test]
fn set_value_updates_nested_matching_toggles() {
    let (mut engine, _tmp) = setup();
    engine.load().unwrap();

    engine
        .set_value("matching.ignoreWWW", Value::Bool(true))
        .unwrap();
    engine
        .set_value("matching.compareTitle", Value::Bool(true))
        .unwrap();

    assert!(engine.get_settings().matching.ignore_www);
    assert!(engine.get_settings().matching.compare_title);
}

#[test]
fn set_value_updates_top_level_fields() {
    let (mut engine, _tmp) = setup();
    engine.load().unwrap();

    engine
        .set_value("priority", Value::String("keepNewer".to_string()))
        .unwrap();
    engine
        .set_value("scope", Value::String("active".to_string()))
        .unwrap();
    engine.set_value("autoScan", Value::Bool(false)).unwrap();

    let settings = engine.get_settings();
    assert_eq!(settings.priority, Priority::KeepNewer);
    assert_eq!(settings.scope, Scope::ActiveWindow);
    assert!(!settings.auto_scan);
}

#[test]
fn set_value_persists_immediately() {
    let (mut engine, _tmp) = setup();
    engine.load().unwrap();
    engine
        .set_value("matching.ignoreCase", Value::Bool(true))
        .unwrap();

    let mut reread = SettingsEngine::new(Some(engine.get_config_path().to_string()));
    assert!(reread.load().unwrap().matching.ignore_case);
}

#[test]
fn set_value_rejects_unknown_keys() {
    let (mut engine, _tmp) = setup();
    engine.load().unwrap();
    assert!(engine.set_value("bogus", Value::Bool(true)).is_err());
    assert!(engine
        .set_value("matching.ignoreEverything", Value::Bool(true))
        .is_err());
    assert!(engine
        .set_value("priority.nested", Value::Bool(true))
        .is_err());
}

#[test]
fn set_value_rejects_wrong_types() {
    let (mut engine, _tmp) = setup();
    engine.load().unwrap();
    assert!(engine
        .set_value("priority", Value::String("keepLoudest".to_string()))
        .is_err());
    assert!(engine.set_value("autoScan", json!(7)).is_err());
    // Nothing was stored.
    assert_eq!(*engine.get_settings(), ScanSettings::default());
}

// ─── Reset ───

#[test]
fn reset_restores_and_persists_defaults() {
    let (mut engine, _tmp) = setup();
    engine.load().unwrap();
    engine.set_value("autoScan", Value::Bool(false)).unwrap();

    engine.reset().unwrap();
    assert_eq!(*engine.get_settings(), ScanSettings::default());

    let mut reread = SettingsEngine::new(Some(engine.get_config_path().to_string()));
    assert_eq!(reread.load().unwrap(), ScanSettings::default());
}

// ─── Summary text ───

#[test]
fn describe_defaults() {
    assert_eq!(
        ScanSettings::default().describe(),
        "Matching rules: exact URL matches. Priority: keep older tab. Scope: all windows."
    );
}

#[test]
fn describe_lists_active_rules() {
    let settings = ScanSettings {
        matching: dupcloser::types::settings::MatchingConfig {
            ignore_www: true,
            ignore_hash: true,
            ..Default::default()
        },
        priority: Priority::KeepNewer,
        scope: Scope::ActiveWindow,
        auto_scan: true,
    };
    assert_eq!(
        settings.describe(),
        "Matching rules: ignore www, ignore hash. Priority: keep newer tab. Scope: active window."
    );
}
