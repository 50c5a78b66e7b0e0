//! App core for dupcloser.
//!
//! Central struct wiring the settings engine, the scan session, and the
//! in-memory host mirror the RPC server keeps synchronized with the
//! browser frontend.

use std::sync::Arc;

use tracing::warn;

use crate::managers::scan_session::ScanSession;
use crate::services::host_bridge::InMemoryHost;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::settings::ScanSettings;

pub struct App {
    pub settings_engine: SettingsEngine,
    pub scan_session: ScanSession,
    pub host: Arc<InMemoryHost>,
}

impl App {
    /// Creates a new App. `config_path` overrides the platform settings
    /// location (used by tests).
    pub fn new(config_path: Option<String>) -> Self {
        Self {
            settings_engine: SettingsEngine::new(config_path),
            scan_session: ScanSession::new(),
            host: Arc::new(InMemoryHost::new()),
        }
    }

    /// Startup sequence: load persisted settings and push them into the
    /// host mirror. An unreadable settings file falls back to defaults.
    pub fn startup(&mut self) {
        let settings = match self.settings_engine.load() {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "Failed to load settings; using defaults");
                ScanSettings::default()
            }
        };
        self.host.set_settings(settings);
    }

    /// Current resolved settings.
    pub fn settings(&self) -> ScanSettings {
        self.settings_engine.get_settings().clone()
    }
}
