//! Configuration and local-settings error types.

/// Kinds of configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A configuration source could not be read or merged
    #[display("Failed to build configuration: {}", _0)]
    Source(String),
    /// The merged configuration does not match the expected shape
    #[display("Failed to parse configuration: {}", _0)]
    Invalid(String),
    /// The record store base URL is unusable
    #[display("Invalid store base URL '{}': {}", url, reason)]
    InvalidBaseUrl {
        /// URL as configured
        url: String,
        /// Why it was rejected
        reason: String,
    },
    /// The HTTP client could not be constructed from the settings
    #[display("Failed to build HTTP client: {}", _0)]
    HttpClient(String),
    /// The platform has no per-user config directory
    #[display("No config directory for {}", _0)]
    NoConfigDir(String),
    /// Reading or writing the credential file failed
    #[display("Credential file {}: {}", path, reason)]
    Credential {
        /// Credential file path
        path: String,
        /// I/O failure
        reason: String,
    },
}

/// Configuration error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Invalid("missing field `base_url`".into()));
/// assert!(err.to_string().contains("base_url"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
