// dupcloser state managers
// Managers own the cross-call state: the cached last scan and the
// auto-detect debounce/suppression machinery.

pub mod auto_scan;
pub mod scan_session;
