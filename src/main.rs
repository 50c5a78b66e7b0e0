//! dupcloser — duplicate tab detection and cleanup engine.
//!
//! Entry point: console demo walking every component with a sample tab
//! snapshot. The real host integration lives in the `dupcloser-rpc`
//! binary.

use std::sync::Arc;
use std::time::Duration;

use dupcloser::managers::auto_scan::AutoScanScheduler;
use dupcloser::managers::scan_session::ScanSession;
use dupcloser::services::host_bridge::{
    InMemoryHost, RecordingSignal, TabHostTrait, UserSignalTrait,
};
use dupcloser::services::scan_engine;
use dupcloser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use dupcloser::services::url_normalizer::{UrlNormalizer, UrlNormalizerTrait};
use dupcloser::types::settings::{MatchingConfig, Priority, ScanSettings};
use dupcloser::types::tab::Tab;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn sample_tabs() -> Vec<Tab> {
    vec![
        Tab {
            id: 1,
            url: Some("https://www.rust-lang.org/learn".to_string()),
            title: Some("Learn Rust".to_string()),
            window_id: 10,
            last_accessed: Some(100),
        },
        Tab {
            id: 2,
            url: Some("https://rust-lang.org/learn".to_string()),
            title: Some("Learn Rust".to_string()),
            window_id: 10,
            last_accessed: Some(200),
        },
        Tab {
            id: 3,
            url: Some("https://docs.rs/tokio".to_string()),
            title: Some("tokio - Rust".to_string()),
            window_id: 20,
            last_accessed: Some(300),
        },
        Tab {
            id: 4,
            url: Some("https://docs.rs/tokio".to_string()),
            title: Some("tokio - Rust".to_string()),
            window_id: 20,
            last_accessed: None,
        },
        Tab {
            id: 5,
            url: None,
            title: Some("New Tab".to_string()),
            window_id: 20,
            last_accessed: None,
        },
    ]
}

fn demo_settings() {
    section("Settings Engine");
    let mut engine = SettingsEngine::new(Some("/tmp/dupcloser-demo/settings.json".to_string()));
    let settings = engine.load().unwrap_or_default();
    println!("  {}", settings.describe());
    println!("  auto-scan: {}", settings.auto_scan);
}

fn demo_normalizer() {
    section("URL Normalizer");
    let config = MatchingConfig {
        ignore_www: true,
        ignore_hash: true,
        ..MatchingConfig::default()
    };
    let normalizer = UrlNormalizer::new(config);
    for raw in ["https://www.rust-lang.org/learn#start", "https://rust-lang.org/learn"] {
        let key = normalizer.normalize(Some(raw), None);
        println!("  {} -> {:?}", raw, key);
    }
}

fn demo_scan() {
    section("Scan Engine");
    let settings = ScanSettings {
        matching: MatchingConfig {
            ignore_www: true,
            ..MatchingConfig::default()
        },
        priority: Priority::KeepOlder,
        ..ScanSettings::default()
    };
    let result = scan_engine::scan(&sample_tabs(), &settings, &[10]);
    println!(
        "  {} duplicate group(s), {} tab(s) to close",
        result.group_count, result.tabs_to_close_count
    );
    for group in &result.groups {
        println!(
            "  group {} — {} tabs, survivor #{}",
            group.url, group.total, group.survivor_id
        );
    }
}

fn demo_close() {
    section("Scan Session / Close Action");
    let host = InMemoryHost::new();
    host.set_settings(ScanSettings {
        matching: MatchingConfig {
            ignore_www: true,
            ..MatchingConfig::default()
        },
        ..ScanSettings::default()
    });
    host.set_tabs(sample_tabs());

    let mut session = ScanSession::new();
    match session.analyze(&host) {
        Ok(scan) => println!("  analyze: {} tab(s) pending close", scan.tabs_to_close_count),
        Err(err) => println!("  analyze failed: {}", err),
    }
    match session.close_duplicates(&host) {
        Ok(count) => println!("  requested {} closure(s)", count),
        Err(err) => println!("  close failed: {}", err),
    }
    println!(
        "  {} tab(s) left in the host snapshot",
        host.query_all_tabs().map(|tabs| tabs.len()).unwrap_or(0)
    );
}

async fn demo_auto_scan() {
    section("Auto-scan Scheduler");
    let host = Arc::new(InMemoryHost::new());
    host.set_tabs(sample_tabs());
    let signal = Arc::new(RecordingSignal::new());

    let signal_sink: Arc<dyn UserSignalTrait> = signal.clone();
    let mut scheduler =
        AutoScanScheduler::with_debounce(host, signal_sink, Duration::from_millis(50));
    scheduler.notify_topology_changed();
    tokio::time::sleep(Duration::from_millis(120)).await;

    for event in signal.events() {
        println!("  signal: {:?}", event);
    }
}

#[tokio::main]
async fn main() {
    println!();
    println!("dupcloser v{} — demo mode", env!("CARGO_PKG_VERSION"));
    println!();

    demo_settings();
    demo_normalizer();
    demo_scan();
    demo_close();
    demo_auto_scan().await;

    println!();
    println!("Done.");
}
