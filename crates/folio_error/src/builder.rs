//! Errors raised while assembling outbound requests.

/// Why a request could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required request field was never set
    #[display("Missing required field: {}", _0)]
    MissingField(String),

    /// A field was set to a value the request cannot carry
    #[display("Validation failed: {}", _0)]
    ValidationFailed(String),
}

/// Request builder error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::new(BuilderErrorKind::MissingField("model".into()));
/// assert_eq!(err.kind(), &BuilderErrorKind::MissingField("model".into()));
/// assert!(err.to_string().contains("Missing required field: model"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}
