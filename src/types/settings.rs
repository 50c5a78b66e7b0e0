use serde::{Deserialize, Serialize};

/// Fixed storage key under which the settings record is persisted.
pub const STORAGE_KEY: &str = "dupTabCloserSettings";

/// Matching rules applied when computing a tab's comparison key.
///
/// Each toggle is independent; all default to off (exact URL matches).
/// Field names serialize in the persisted camelCase schema.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchingConfig {
    pub ignore_case: bool,
    #[serde(rename = "ignoreWWW")]
    pub ignore_www: bool,
    pub ignore_hash: bool,
    pub ignore_search: bool,
    pub ignore_path: bool,
    pub compare_title: bool,
}

/// Which tab in a duplicate group survives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    #[serde(rename = "keepOlder")]
    KeepOlder,
    #[serde(rename = "keepNewer")]
    KeepNewer,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::KeepOlder
    }
}

/// Which windows a scan considers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Scope {
    #[serde(rename = "all")]
    All,
    /// Persisted as `"active"`, the wire value the settings record uses.
    #[serde(rename = "active")]
    ActiveWindow,
}

impl Default for Scope {
    fn default() -> Self {
        Scope::All
    }
}

/// Fully-resolved scan settings.
///
/// Supplied fresh per scan. Every field carries a serde default so a
/// partial stored record merges with defaults at load time; downstream
/// code never sees optional fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanSettings {
    pub matching: MatchingConfig,
    pub priority: Priority,
    pub scope: Scope,
    pub auto_scan: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            priority: Priority::KeepOlder,
            scope: Scope::All,
            auto_scan: true,
        }
    }
}

impl ScanSettings {
    /// One-line human-readable summary of the active rules, as shown in
    /// the popup's options panel.
    pub fn describe(&self) -> String {
        let mut rules: Vec<&str> = Vec::new();
        if self.matching.ignore_case {
            rules.push("ignore case");
        }
        if self.matching.ignore_www {
            rules.push("ignore www");
        }
        if self.matching.ignore_hash {
            rules.push("ignore hash");
        }
        if self.matching.ignore_search {
            rules.push("ignore search");
        }
        if self.matching.ignore_path {
            rules.push("ignore path");
        }
        if self.matching.compare_title {
            rules.push("compare title");
        }
        let matching_text = if rules.is_empty() {
            "exact URL matches".to_string()
        } else {
            rules.join(", ")
        };

        let priority_text = match self.priority {
            Priority::KeepOlder => "keep older tab",
            Priority::KeepNewer => "keep newer tab",
        };
        let scope_text = match self.scope {
            Scope::All => "all windows",
            Scope::ActiveWindow => "active window",
        };

        format!(
            "Matching rules: {}. Priority: {}. Scope: {}.",
            matching_text, priority_text, scope_text
        )
    }
}
