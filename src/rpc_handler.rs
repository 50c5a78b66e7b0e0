//! RPC method handler for the dupcloser JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! scan engine, the scan session, and the settings engine via the `App`
//! struct. Timer plumbing stays in the server: this dispatcher is fully
//! synchronous.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::services::scan_engine;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::tab::Tab;

fn parse_tabs(params: &Value) -> Result<Vec<Tab>, String> {
    let tabs = params.get("tabs").cloned().ok_or("missing tabs")?;
    serde_json::from_value(tabs).map_err(|e| format!("invalid tabs: {}", e))
}

fn parse_window_ids(params: &Value) -> Vec<i64> {
    params
        .get("activeWindowIds")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect())
        .unwrap_or_default()
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Scanning ───
        "scan.analyze" => {
            let tabs = parse_tabs(params)?;
            let window_ids = parse_window_ids(params);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let settings = a.settings_engine.get_settings().clone();
            let result = scan_engine::scan(&tabs, &settings, &window_ids);
            a.scan_session.store(result.clone());
            serde_json::to_value(&result).map_err(|e| e.to_string())
        }
        "scan.close" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let needs_fresh = a
                .scan_session
                .cached()
                .map_or(true, |scan| scan.tabs_to_close_count == 0);
            if needs_fresh {
                let tabs = parse_tabs(params)?;
                let window_ids = parse_window_ids(params);
                let settings = a.settings_engine.get_settings().clone();
                let result = scan_engine::scan(&tabs, &settings, &window_ids);
                a.scan_session.store(result);
            }
            let ids = a.scan_session.take_close_plan();
            Ok(json!({"requested": ids.len(), "tabIds": ids}))
        }

        // ─── Host state mirror ───
        "tabs.sync" => {
            let tabs = parse_tabs(params)?;
            let window_ids = parse_window_ids(params);
            let a = app.lock().map_err(|e| e.to_string())?;
            a.host.set_tabs(tabs);
            a.host.set_focused_windows(window_ids);
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            let settings = a.settings_engine.get_settings().clone();
            a.host.set_settings(settings);
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.reset().map_err(|e| e.to_string())?;
            let settings = a.settings_engine.get_settings().clone();
            a.host.set_settings(settings.clone());
            serde_json::to_value(&settings).map_err(|e| e.to_string())
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
