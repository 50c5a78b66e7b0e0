//! Scan session: the single owner of cross-call scan state.
//!
//! Holds the cached last scan used to avoid re-scanning immediately
//! before a close action. The cache is cleared synchronously at every
//! consumption point, so the same close-plan can never be executed twice.

use tracing::warn;

use crate::services::host_bridge::TabHostTrait;
use crate::services::scan_engine;
use crate::types::errors::ScanError;
use crate::types::scan::ScanResult;

pub struct ScanSession {
    last_scan: Option<ScanResult>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self { last_scan: None }
    }

    /// Runs a scan through the host and caches the result for a
    /// subsequent close action.
    pub fn analyze(&mut self, host: &dyn TabHostTrait) -> Result<ScanResult, ScanError> {
        let settings = host.get_settings()?;
        let tabs = host.query_all_tabs()?;
        let active_windows = host.get_active_window_ids()?;
        let result = scan_engine::scan(&tabs, &settings, &active_windows);
        self.last_scan = Some(result.clone());
        Ok(result)
    }

    /// Caches an externally computed scan result (the RPC path, where the
    /// tab snapshot arrives with the request).
    pub fn store(&mut self, result: ScanResult) {
        self.last_scan = Some(result);
    }

    pub fn cached(&self) -> Option<&ScanResult> {
        self.last_scan.as_ref()
    }

    /// Drops the cached scan without consuming it.
    pub fn invalidate(&mut self) {
        self.last_scan = None;
    }

    /// Consumes the cached plan: returns its close ids and clears the
    /// cache in the same step.
    pub fn take_close_plan(&mut self) -> Vec<i64> {
        self.last_scan
            .take()
            .map(|scan| scan.tab_ids_to_close)
            .unwrap_or_default()
    }

    /// Closes the duplicates from the cached scan, or from a fresh scan
    /// when no usable plan is cached.
    ///
    /// The cache is cleared before the closure request goes out. Partial
    /// failure at the host is tolerated and logged; the count returned is
    /// the number of closures requested, not verified-closed.
    pub fn close_duplicates(&mut self, host: &dyn TabHostTrait) -> Result<usize, ScanError> {
        let needs_fresh = match &self.last_scan {
            Some(scan) => scan.tabs_to_close_count == 0,
            None => true,
        };
        if needs_fresh {
            self.analyze(host)?;
        }

        let ids = self.take_close_plan();
        if ids.is_empty() {
            return Ok(0);
        }

        if let Err(err) = host.request_close_tabs(&ids) {
            warn!(error = %err, "Failed to close some tabs");
        }

        Ok(ids.len())
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}
