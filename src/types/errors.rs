use std::fmt;

// === SettingsError ===

/// Errors related to settings persistence.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing the settings file.
    IoError(String),
    /// Failed to serialize or deserialize the settings record.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === HostError ===

/// Errors raised by host collaborators (tab queries, window enumeration,
/// closure requests).
#[derive(Debug)]
pub enum HostError {
    /// The host failed to produce a tab snapshot.
    TabQueryFailed(String),
    /// The host could not supply settings.
    SettingsUnavailable(String),
    /// The host rejected a closure request outright.
    CloseRejected(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::TabQueryFailed(msg) => write!(f, "Tab query failed: {}", msg),
            HostError::SettingsUnavailable(msg) => {
                write!(f, "Settings unavailable: {}", msg)
            }
            HostError::CloseRejected(msg) => write!(f, "Close request rejected: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

// === ScanError ===

/// Errors a scan or close operation reports to its caller.
///
/// A malformed URL is not an error anywhere in the engine: the normalizer
/// recovers locally by falling back to raw-string comparison.
#[derive(Debug)]
pub enum ScanError {
    /// A host collaborator call failed.
    Host(HostError),
    /// Settings could not be resolved.
    Settings(SettingsError),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Host(err) => write!(f, "Scan host error: {}", err),
            ScanError::Settings(err) => write!(f, "Scan settings error: {}", err),
        }
    }
}

impl std::error::Error for ScanError {}

impl From<HostError> for ScanError {
    fn from(err: HostError) -> Self {
        ScanError::Host(err)
    }
}

impl From<SettingsError> for ScanError {
    fn from(err: SettingsError) -> Self {
        ScanError::Settings(err)
    }
}
