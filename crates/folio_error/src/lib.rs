//! Error types for the Folio client.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Field-load, generation and store failures are separate types because the
//! editor reacts to each differently: a failed load keeps the pane closed, a
//! broken generation raises an alert but keeps partial text, and a failed save
//! leaves the baseline untouched.
//!
//! # Examples
//!
//! ```
//! use folio_error::{FolioResult, StoreError, StoreErrorKind};
//!
//! fn fetch_title() -> FolioResult<String> {
//!     Err(StoreError::new(StoreErrorKind::Request("connection refused".into())))?
//! }
//!
//! assert!(fetch_title().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod field;
mod generation;
mod store;
mod validation;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{FolioError, FolioErrorKind, FolioResult};
pub use field::{FieldError, FieldErrorKind};
pub use generation::{GenerationError, GenerationErrorKind};
pub use store::{StoreError, StoreErrorKind};
pub use validation::ValidationError;
