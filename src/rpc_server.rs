//! dupcloser RPC server — JSON-RPC over stdin/stdout for browser-host integration.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"scan.analyze", "params":{"tabs":[...]}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Events:   {"event":"duplicates-detected", ...} pushed without an id
//!           when the auto-scan debounce fires.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::{json, Value};

use dupcloser::app::App;
use dupcloser::managers::auto_scan::{self, AutoScanScheduler};
use dupcloser::rpc_handler::handle_method;
use dupcloser::services::host_bridge::UserSignalTrait;

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self {
            window_start: Instant::now(),
            request_count: 0,
            max_per_second,
        }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

/// Signal sink that pushes badge/notification events onto stdout, in the
/// same NDJSON stream as the RPC responses.
struct StdoutSignal;

impl UserSignalTrait for StdoutSignal {
    fn emit(&self, to_close_count: usize, group_count: usize) {
        let event = json!({
            "event": "duplicates-detected",
            "toCloseCount": to_close_count,
            "groupCount": group_count,
            "message": auto_scan::detection_message(group_count, to_close_count),
        });
        println!("{}", event);
        let _ = io::stdout().flush();
    }

    fn clear(&self) {
        println!("{}", json!({"event": "signal-cleared"}));
        let _ = io::stdout().flush();
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let mut app = App::new(None);
    app.startup();
    let auto_scan_enabled = app.settings().auto_scan;
    let host = Arc::clone(&app.host);
    let app = Mutex::new(app);

    let mut scheduler = AutoScanScheduler::new(host, Arc::new(StdoutSignal));
    // Arms the initial debounce when auto-scan is on, clears stale
    // signal state otherwise.
    scheduler.set_enabled(auto_scan_enabled);

    // Signal ready
    let ready = json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")});
    println!("{}", ready);
    let _ = io::stdout().flush();

    // Rate limiting — cap RPC requests per second
    let mut rate_limiter = RateLimiter::new(200);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                println!("{}", json!({"id": null, "error": format!("parse error: {}", e)}));
                let _ = io::stdout().flush();
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            println!("{}", json!({"id": id, "error": "rate limited"}));
            let _ = io::stdout().flush();
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or_else(|| json!({}));

        let outcome = handle_method(&app, method, &params);
        let response = match &outcome {
            Ok(result) => json!({"id": id, "result": result}),
            Err(err) => json!({"id": id, "error": err}),
        };
        println!("{}", response);
        let _ = io::stdout().flush();

        if outcome.is_err() {
            continue;
        }

        // Timer plumbing the synchronous dispatcher cannot do itself.
        match method {
            // Any tab event from the frontend resets the debounce.
            "tabs.sync" => scheduler.notify_topology_changed(),
            // A completed close notifies the count requested and forgets
            // the shown signal.
            "scan.close" => {
                let requested = outcome
                    .as_ref()
                    .ok()
                    .and_then(|result| result.get("requested"))
                    .and_then(|v| v.as_u64())
                    .unwrap_or(0) as usize;
                if requested > 0 {
                    let event = json!({
                        "event": "duplicates-closed",
                        "requested": requested,
                        "message": auto_scan::closed_message(requested),
                    });
                    println!("{}", event);
                    let _ = io::stdout().flush();
                }
                if scheduler.is_enabled() {
                    scheduler.acknowledge_close();
                }
            }
            // A settings change re-resolves the auto-scan toggle; staying
            // enabled also re-arms the debounce, like any other event.
            "settings.set" | "settings.reset" => {
                let enabled = app
                    .lock()
                    .map(|a| a.settings().auto_scan)
                    .unwrap_or(auto_scan_enabled);
                scheduler.set_enabled(enabled);
            }
            _ => {}
        }
    }
}
