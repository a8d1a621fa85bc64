//! Field and document-model error types.

/// Kinds of field errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum FieldErrorKind {
    /// Lazy fetch of a large field failed
    #[display("Failed to load field '{}': {}", field, message)]
    LoadFailed {
        /// Wire name of the field
        field: String,
        /// Collaborator error message
        message: String,
    },
    /// A text operation was attempted before the field was loaded
    #[display("Field '{}' is not loaded", _0)]
    NotLoaded(String),
    /// The field is being fetched right now
    #[display("Field '{}' is still loading", _0)]
    Loading(String),
    /// Manual edits are locked while a generation writes to the field
    #[display("Field '{}' is locked while generation is running", _0)]
    Locked(String),
}

/// Field error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{FieldError, FieldErrorKind};
///
/// let err = FieldError::new(FieldErrorKind::NotLoaded("mdBody".to_string()));
/// assert!(format!("{}", err).contains("not loaded"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Field Error: {} at line {} in {}", kind, line, file)]
pub struct FieldError {
    /// The kind of error that occurred
    pub kind: FieldErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FieldError {
    /// Create a new field error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FieldErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
