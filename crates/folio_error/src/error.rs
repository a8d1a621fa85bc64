//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, FieldError, GenerationError, StoreError, ValidationError};

/// Every failure a Folio component can report.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioError, StoreError, StoreErrorKind};
///
/// let store_err = StoreError::new(StoreErrorKind::Request("Connection failed".into()));
/// let err: FolioError = store_err.into();
/// assert!(format!("{}", err).contains("Connection failed"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FolioErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Generation channel error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Field load or edit error
    #[from(FieldError)]
    Field(FieldError),
    /// Record store error
    #[from(StoreError)]
    Store(StoreError),
    /// Validation error
    #[from(ValidationError)]
    Validation(ValidationError),
}

/// Folio error with kind discrimination.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioError, FolioErrorKind, FolioResult, ValidationError};
///
/// fn might_fail() -> FolioResult<()> {
///     Err(ValidationError::new("title is required"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), FolioErrorKind::Validation(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Folio Error: {}", _0)]
pub struct FolioError(Box<FolioErrorKind>);

impl FolioError {
    /// Create a new error from a kind.
    pub fn new(kind: FolioErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FolioErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FolioErrorKind
impl<T> From<T> for FolioError
where
    T: Into<FolioErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Folio operations.
pub type FolioResult<T> = std::result::Result<T, FolioError>;
