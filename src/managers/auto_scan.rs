//! Auto-detect scheduling.
//!
//! Every tab-change event the host observes collapses into one "topology
//! changed" signal that arms a debounce timer; the timer firing runs a
//! background scan and drives the user-facing signal. Repeated scans with
//! an unchanged pending-close count stay silent, so the badge does not
//! flicker on every event.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::services::host_bridge::{TabHostTrait, UserSignalTrait};
use crate::services::scan_engine;
use crate::types::errors::ScanError;

/// Debounce window between the last tab-change event and the scan.
pub const DEBOUNCE: Duration = Duration::from_millis(1200);

/// What the scheduler should do with the user signal after a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalAction {
    /// Nothing to show and nothing was shown: stay silent.
    None,
    /// Count dropped to zero after a shown signal: clear it.
    Clear,
    /// New or changed count: emit a signal.
    Emit {
        to_close_count: usize,
        group_count: usize,
    },
}

/// Suppression state for the user-facing signal.
///
/// Kept separate from the timer so the anti-spam rules can be exercised
/// without a runtime: feed it scan outcomes, get back the action to take.
#[derive(Debug, Default)]
pub struct SignalState {
    last_notified_count: usize,
}

impl SignalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one scan outcome and returns the action to take.
    pub fn apply(&mut self, to_close_count: usize, group_count: usize) -> SignalAction {
        if to_close_count == 0 {
            if self.last_notified_count > 0 {
                self.last_notified_count = 0;
                return SignalAction::Clear;
            }
            return SignalAction::None;
        }
        if to_close_count == self.last_notified_count {
            return SignalAction::None;
        }
        self.last_notified_count = to_close_count;
        SignalAction::Emit {
            to_close_count,
            group_count,
        }
    }

    /// Forgets any shown signal, so the next detection re-emits.
    pub fn reset(&mut self) {
        self.last_notified_count = 0;
    }

    pub fn last_notified_count(&self) -> usize {
        self.last_notified_count
    }
}

/// Formats the detection notification body.
pub fn detection_message(group_count: usize, to_close_count: usize) -> String {
    let group_text = if group_count == 1 {
        "1 duplicate group".to_string()
    } else {
        format!("{} duplicate groups", group_count)
    };
    format!(
        "{} ({} tab{}) found. Open the popup to clean up.",
        group_text,
        to_close_count,
        if to_close_count == 1 { "" } else { "s" }
    )
}

/// Formats the post-close notification body.
pub fn closed_message(closed_count: usize) -> String {
    format!(
        "Closed {} duplicate tab{}.",
        closed_count,
        if closed_count == 1 { "" } else { "s" }
    )
}

/// Debouncing auto-scan scheduler.
///
/// Owns at most one pending timer; every topology-change signal replaces
/// it (debounce, not throttle). Scans run against the host bridge and
/// never propagate failures: errors are logged and the scheduler goes
/// back to idle until the next event.
pub struct AutoScanScheduler {
    host: Arc<dyn TabHostTrait>,
    signal: Arc<dyn UserSignalTrait>,
    state: Arc<Mutex<SignalState>>,
    enabled: Arc<AtomicBool>,
    pending: Option<JoinHandle<()>>,
    debounce: Duration,
}

impl AutoScanScheduler {
    pub fn new(host: Arc<dyn TabHostTrait>, signal: Arc<dyn UserSignalTrait>) -> Self {
        Self::with_debounce(host, signal, DEBOUNCE)
    }

    pub fn with_debounce(
        host: Arc<dyn TabHostTrait>,
        signal: Arc<dyn UserSignalTrait>,
        debounce: Duration,
    ) -> Self {
        Self {
            host,
            signal,
            state: Arc::new(Mutex::new(SignalState::new())),
            enabled: Arc::new(AtomicBool::new(true)),
            pending: None,
            debounce,
        }
    }

    /// Any host tab event (create, update, remove, attach, detach, window
    /// focus change) maps to this one signal. Resets the debounce timer.
    pub fn notify_topology_changed(&mut self) {
        self.cancel_pending();
        if !self.enabled.load(Ordering::SeqCst) {
            return;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                debug!("No async runtime available; auto-scan timer not armed");
                return;
            }
        };

        let host = Arc::clone(&self.host);
        let signal = Arc::clone(&self.signal);
        let state = Arc::clone(&self.state);
        let enabled = Arc::clone(&self.enabled);
        let debounce = self.debounce;

        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(debounce).await;
            if !enabled.load(Ordering::SeqCst) {
                return;
            }
            run_auto_scan(host.as_ref(), signal.as_ref(), &state);
        }));
    }

    /// Cancels any pending timer without touching signal state.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Enables or disables auto-scan.
    ///
    /// Enabling arms a fresh debounce (settings changes count as a
    /// topology event). Disabling cancels the pending timer and clears
    /// both the suppression state and the shown signal immediately.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        if enabled {
            self.notify_topology_changed();
        } else {
            self.cancel_pending();
            if let Ok(mut state) = self.state.lock() {
                state.reset();
            }
            self.signal.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Clears suppression state and the shown signal after duplicates
    /// were closed, so the next detection re-notifies from scratch.
    pub fn acknowledge_close(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.reset();
        }
        self.signal.clear();
    }
}

impl Drop for AutoScanScheduler {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// One auto-scan pass: scan through the host, apply the suppression
/// rules, drive the signal sink. All failures are logged and swallowed —
/// nothing in this path may take the scheduler down.
pub fn run_auto_scan(
    host: &dyn TabHostTrait,
    signal: &dyn UserSignalTrait,
    state: &Mutex<SignalState>,
) {
    let outcome = (|| -> Result<(usize, usize), ScanError> {
        let settings = host.get_settings()?;
        let tabs = host.query_all_tabs()?;
        let windows = host.get_active_window_ids()?;
        let result = scan_engine::scan(&tabs, &settings, &windows);
        Ok((result.tabs_to_close_count, result.group_count))
    })();

    let (to_close_count, group_count) = match outcome {
        Ok(counts) => counts,
        Err(err) => {
            error!(error = %err, "Auto duplicate scan failed");
            return;
        }
    };

    let action = match state.lock() {
        Ok(mut state) => state.apply(to_close_count, group_count),
        Err(_) => {
            error!("Auto-scan signal state lock poisoned");
            return;
        }
    };

    match action {
        SignalAction::None => {
            debug!(to_close_count, "Auto scan: no signal change");
        }
        SignalAction::Clear => signal.clear(),
        SignalAction::Emit {
            to_close_count,
            group_count,
        } => signal.emit(to_close_count, group_count),
    }
}
