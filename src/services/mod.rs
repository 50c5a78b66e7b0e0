// dupcloser services
// Services provide the core scan pipeline: URL normalization, duplicate
// detection, scan orchestration, settings persistence, and the host seams.

pub mod duplicate_detector;
pub mod host_bridge;
pub mod scan_engine;
pub mod settings_engine;
pub mod url_normalizer;
