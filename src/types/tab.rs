use serde::{Deserialize, Serialize};

/// Read-only snapshot of a browser tab, supplied by the host.
///
/// The engine never mutates a snapshot; it is read for the duration of
/// one scan and discarded. `last_accessed` is milliseconds since the
/// epoch when the host reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: i64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub window_id: i64,
    #[serde(default)]
    pub last_accessed: Option<i64>,
}
