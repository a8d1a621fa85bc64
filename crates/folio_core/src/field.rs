//! Editable textual slots of a book record.

use folio_error::{FieldError, FieldErrorKind};
use serde::{Deserialize, Serialize};

/// Recognised textual slots of a book record.
///
/// Wire names match the backend's JSON keys (`toc`, `mdBody`, `summary`, `usage`).
///
/// # Examples
///
/// ```
/// use folio_core::FieldName;
/// use std::str::FromStr;
///
/// assert_eq!(FieldName::MdBody.to_string(), "mdBody");
/// assert_eq!(FieldName::from_str("toc").unwrap(), FieldName::Toc);
/// assert!(FieldName::MdBody.is_lazy());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FieldName {
    /// Table of contents
    Toc,
    /// Markdown body of the book
    MdBody,
    /// Short summary
    Summary,
    /// Usage notes
    Usage,
}

impl FieldName {
    /// Large fields are not sent with the parent record and must be fetched
    /// separately the first time an editor opens them.
    pub fn is_lazy(self) -> bool {
        matches!(self, FieldName::MdBody | FieldName::Usage)
    }
}

/// Load state of a field.
///
/// Keeps "not fetched yet" apart from "fetched and empty".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldContent {
    /// Never fetched
    #[default]
    NotLoaded,
    /// Fetch in flight
    Loading,
    /// Text available
    Loaded {
        /// Text as currently edited
        current: String,
        /// Last value the server confirmed
        baseline: String,
    },
}

/// One named textual slot of a record.
///
/// # Examples
///
/// ```
/// use folio_core::{Field, FieldName};
///
/// let mut field = Field::loaded(FieldName::Summary, "draft");
/// assert!(!field.is_dirty());
///
/// field.append(" v2").unwrap();
/// assert_eq!(field.current_text(), Some("draft v2"));
/// assert!(field.is_dirty());
///
/// field.commit("draft v2");
/// assert!(!field.is_dirty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: FieldName,
    content: FieldContent,
}

impl Field {
    /// A field whose text has not been fetched.
    pub fn new(name: FieldName) -> Self {
        Self {
            name,
            content: FieldContent::NotLoaded,
        }
    }

    /// A field loaded from the server; current and baseline start equal.
    pub fn loaded(name: FieldName, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            name,
            content: FieldContent::Loaded {
                current: text.clone(),
                baseline: text,
            },
        }
    }

    /// Slot name.
    pub fn name(&self) -> FieldName {
        self.name
    }

    /// Load state.
    pub fn content(&self) -> &FieldContent {
        &self.content
    }

    /// Whether text is available.
    pub fn is_loaded(&self) -> bool {
        matches!(self.content, FieldContent::Loaded { .. })
    }

    /// Text as currently edited, if loaded.
    pub fn current_text(&self) -> Option<&str> {
        match &self.content {
            FieldContent::Loaded { current, .. } => Some(current),
            _ => None,
        }
    }

    /// Last server-confirmed text, if loaded.
    pub fn baseline_text(&self) -> Option<&str> {
        match &self.content {
            FieldContent::Loaded { baseline, .. } => Some(baseline),
            _ => None,
        }
    }

    /// Whether the current text differs from the baseline.
    pub fn is_dirty(&self) -> bool {
        match &self.content {
            FieldContent::Loaded { current, baseline } => current != baseline,
            _ => false,
        }
    }

    /// Replace the current text (manual edit or one-shot generation).
    ///
    /// # Errors
    ///
    /// Fails when the field is not loaded.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), FieldError> {
        *self.current_mut()? = text.into();
        Ok(())
    }

    /// Append to the current text (streamed generation delta).
    ///
    /// # Errors
    ///
    /// Fails when the field is not loaded.
    pub fn append(&mut self, delta: &str) -> Result<(), FieldError> {
        self.current_mut()?.push_str(delta);
        Ok(())
    }

    /// Record `saved` as the server-confirmed value.
    ///
    /// The current text is left alone, so edits made while the save was in
    /// flight still show up as dirty.
    pub fn commit(&mut self, saved: impl Into<String>) {
        let saved = saved.into();
        match &mut self.content {
            FieldContent::Loaded { baseline, .. } => *baseline = saved,
            _ => {
                self.content = FieldContent::Loaded {
                    current: saved.clone(),
                    baseline: saved,
                }
            }
        }
    }

    /// Mark the field as being fetched.
    ///
    /// Returns `Ok(false)` when the field is already loaded and no fetch is
    /// needed.
    ///
    /// # Errors
    ///
    /// Fails when a fetch is already in flight.
    pub fn begin_loading(&mut self) -> Result<bool, FieldError> {
        match self.content {
            FieldContent::NotLoaded => {
                self.content = FieldContent::Loading;
                Ok(true)
            }
            FieldContent::Loading => Err(FieldError::new(FieldErrorKind::Loading(
                self.name.to_string(),
            ))),
            FieldContent::Loaded { .. } => Ok(false),
        }
    }

    /// Store fetched text as both current and baseline.
    pub fn finish_loading(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.content = FieldContent::Loaded {
            current: text.clone(),
            baseline: text,
        };
    }

    /// Return an unfinished fetch to `NotLoaded` so it can be retried.
    pub fn abort_loading(&mut self) {
        if self.content == FieldContent::Loading {
            self.content = FieldContent::NotLoaded;
        }
    }

    fn current_mut(&mut self) -> Result<&mut String, FieldError> {
        match &mut self.content {
            FieldContent::Loaded { current, .. } => Ok(current),
            FieldContent::Loading => Err(FieldError::new(FieldErrorKind::Loading(
                self.name.to_string(),
            ))),
            FieldContent::NotLoaded => Err(FieldError::new(FieldErrorKind::NotLoaded(
                self.name.to_string(),
            ))),
        }
    }
}
