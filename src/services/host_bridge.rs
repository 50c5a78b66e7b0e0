//! Host collaborator seams.
//!
//! The engine never talks to a browser directly: tab snapshots, window
//! focus, closure requests, and badge/notification side effects all go
//! through these traits. `InMemoryHost` is the concrete host the demo
//! binary and the RPC server use as a mirror of browser state, and the
//! double the test suite drives.

use std::sync::Mutex;

use crate::types::errors::HostError;
use crate::types::settings::ScanSettings;
use crate::types::tab::Tab;

/// Host-side collaborator supplying tab state and executing closures.
pub trait TabHostTrait: Send + Sync {
    /// Resolved settings for the next scan.
    fn get_settings(&self) -> Result<ScanSettings, HostError>;

    /// Snapshot of every open tab.
    fn query_all_tabs(&self) -> Result<Vec<Tab>, HostError>;

    /// Focused window ids. Falls back to the first known window when no
    /// window is focused, and to an empty set when no windows exist.
    fn get_active_window_ids(&self) -> Result<Vec<i64>, HostError>;

    /// Best-effort closure request. Some ids may no longer exist; the
    /// host closes what it can without aborting the batch. The returned
    /// count is the number of closures requested, not verified-closed.
    fn request_close_tabs(&self, ids: &[i64]) -> Result<usize, HostError>;
}

/// Badge/notification sink. Fire-and-forget side effects.
pub trait UserSignalTrait: Send + Sync {
    fn emit(&self, to_close_count: usize, group_count: usize);
    fn clear(&self);
}

/// In-memory host: a settable tab snapshot plus focus state.
pub struct InMemoryHost {
    settings: Mutex<ScanSettings>,
    tabs: Mutex<Vec<Tab>>,
    focused_windows: Mutex<Vec<i64>>,
    closed: Mutex<Vec<i64>>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(ScanSettings::default()),
            tabs: Mutex::new(Vec::new()),
            focused_windows: Mutex::new(Vec::new()),
            closed: Mutex::new(Vec::new()),
        }
    }

    pub fn set_settings(&self, settings: ScanSettings) {
        if let Ok(mut guard) = self.settings.lock() {
            *guard = settings;
        }
    }

    pub fn set_tabs(&self, tabs: Vec<Tab>) {
        if let Ok(mut guard) = self.tabs.lock() {
            *guard = tabs;
        }
    }

    pub fn set_focused_windows(&self, window_ids: Vec<i64>) {
        if let Ok(mut guard) = self.focused_windows.lock() {
            *guard = window_ids;
        }
    }

    /// Ids every closure request has asked for so far, in request order.
    pub fn closed_ids(&self) -> Vec<i64> {
        self.closed.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TabHostTrait for InMemoryHost {
    fn get_settings(&self) -> Result<ScanSettings, HostError> {
        self.settings
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| HostError::SettingsUnavailable("settings lock poisoned".to_string()))
    }

    fn query_all_tabs(&self) -> Result<Vec<Tab>, HostError> {
        self.tabs
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| HostError::TabQueryFailed("tab snapshot lock poisoned".to_string()))
    }

    fn get_active_window_ids(&self) -> Result<Vec<i64>, HostError> {
        let focused = self
            .focused_windows
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| HostError::TabQueryFailed("focus lock poisoned".to_string()))?;
        if !focused.is_empty() {
            return Ok(focused);
        }

        // No focused window: fall back to the first known window.
        let tabs = self.query_all_tabs()?;
        Ok(tabs.first().map(|tab| vec![tab.window_id]).unwrap_or_default())
    }

    fn request_close_tabs(&self, ids: &[i64]) -> Result<usize, HostError> {
        let mut tabs = self
            .tabs
            .lock()
            .map_err(|_| HostError::CloseRejected("tab snapshot lock poisoned".to_string()))?;
        tabs.retain(|tab| !ids.contains(&tab.id));

        if let Ok(mut closed) = self.closed.lock() {
            closed.extend_from_slice(ids);
        }
        Ok(ids.len())
    }
}

/// What a [`RecordingSignal`] saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalEvent {
    Emitted {
        to_close_count: usize,
        group_count: usize,
    },
    Cleared,
}

/// Signal sink that records every emission, for the demo and tests.
#[derive(Default)]
pub struct RecordingSignal {
    events: Mutex<Vec<SignalEvent>>,
}

impl RecordingSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SignalEvent> {
        self.events.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl UserSignalTrait for RecordingSignal {
    fn emit(&self, to_close_count: usize, group_count: usize) {
        if let Ok(mut events) = self.events.lock() {
            events.push(SignalEvent::Emitted {
                to_close_count,
                group_count,
            });
        }
    }

    fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.push(SignalEvent::Cleared);
        }
    }
}
