//! URL normalization for duplicate matching.
//!
//! Turns a raw URL plus title into the canonical comparison key used to
//! decide whether two tabs are duplicates. Two tabs are duplicates iff
//! their keys are exactly equal.

use url::Url;

use crate::types::settings::MatchingConfig;

/// Trait defining the normalizer interface.
pub trait UrlNormalizerTrait {
    fn normalize(&self, url: Option<&str>, title: Option<&str>) -> Option<String>;
}

/// Normalizer configured with one scan's matching rules.
pub struct UrlNormalizer {
    config: MatchingConfig,
}

impl UrlNormalizer {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// Parses and reserializes the URL, dropping the components the
    /// matching rules ignore. An unparseable URL is compared as the raw
    /// string instead.
    ///
    /// Transformation order is fixed: fragment, query, path, then the
    /// `www.` prefix. Each step operates on already-truncated components,
    /// so the steps stay independent.
    fn canonicalize(&self, raw: &str) -> String {
        let mut parsed = match Url::parse(raw) {
            Ok(url) => url,
            Err(_) => return raw.to_string(),
        };

        if self.config.ignore_hash {
            parsed.set_fragment(None);
        }
        if self.config.ignore_search {
            parsed.set_query(None);
        }
        if self.config.ignore_path {
            parsed.set_path("");
        }
        if self.config.ignore_www {
            if let Some(host) = parsed.host_str() {
                // Strip exactly the 4-character prefix; a host that is
                // nothing but "www." stays as-is, matching the silent
                // rejection of an empty host by the DOM URL setter.
                let has_prefix = host
                    .get(..4)
                    .map(|prefix| prefix.eq_ignore_ascii_case("www."))
                    .unwrap_or(false);
                if has_prefix && host.len() > 4 {
                    let stripped = host[4..].to_string();
                    let _ = parsed.set_host(Some(&stripped));
                }
            }
        }

        parsed.to_string()
    }
}

impl UrlNormalizerTrait for UrlNormalizer {
    /// Computes the comparison key for a tab.
    ///
    /// Returns `None` for absent or empty URLs — such tabs can never be
    /// duplicates and are excluded from grouping entirely. Pure and
    /// deterministic; never fails.
    fn normalize(&self, url: Option<&str>, title: Option<&str>) -> Option<String> {
        let raw = match url {
            Some(u) if !u.is_empty() => u,
            _ => return None,
        };

        let mut key = self.canonicalize(raw);

        if self.config.compare_title {
            key.push('|');
            key.push_str(title.unwrap_or(""));
        }

        // Applied last, after title concatenation, so title casing folds too.
        if self.config.ignore_case {
            key = key.to_lowercase();
        }

        Some(key)
    }
}
