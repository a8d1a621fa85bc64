//! Record store error types.

/// Kinds of record store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// Request never reached the server or the connection dropped
    #[display("Request failed: {}", _0)]
    Request(String),
    /// Server answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// Missing or rejected bearer credential
    #[display("Not authorized: {}", _0)]
    Unauthorized(String),
    /// Record or field does not exist
    #[display("Not found: {}", _0)]
    NotFound(String),
    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    Parse(String),
}

impl StoreErrorKind {
    /// Classify a non-success HTTP status.
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => StoreErrorKind::Unauthorized(message),
            404 => StoreErrorKind::NotFound(message),
            _ => StoreErrorKind::Status {
                status_code,
                message,
            },
        }
    }
}

/// Record store error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::from_status(404, "book 7"));
/// assert_eq!(err.kind, StoreErrorKind::NotFound("book 7".to_string()));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
