//! The record under edit: one [`Field`] per [`FieldName`].

use crate::{Field, FieldName, Record, RecordPatch};
use folio_error::{FieldError, FieldErrorKind};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::future::Future;
use strum::IntoEnumIterator;
use tracing::{debug, instrument, warn};

/// In-memory model of one record opened in an editor.
///
/// Tracks the current and baseline text of each field so that saves only send
/// what changed.
///
/// # Examples
///
/// ```
/// use folio_core::{Document, FieldName, Record};
///
/// let record = Record {
///     id: "b1".into(),
///     title: "Rust Field Notes".into(),
///     toc: Some("1. Intro".into()),
///     ..Default::default()
/// };
/// let mut doc = Document::from_record(&record);
/// assert!(doc.diff_from_baseline().is_empty());
///
/// doc.field_mut(FieldName::Toc).append("\n2. Ownership").unwrap();
/// assert!(doc.diff_from_baseline().contains(&FieldName::Toc));
///
/// let patch = doc.to_patch();
/// doc.commit(&patch);
/// assert!(doc.diff_from_baseline().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    record_id: String,
    title: String,
    fields: BTreeMap<FieldName, Field>,
}

impl Document {
    /// Empty document with every field unloaded.
    pub fn new(record_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            title: title.into(),
            fields: FieldName::iter()
                .map(|name| (name, Field::new(name)))
                .collect(),
        }
    }

    /// Build a document from a fetched record.
    ///
    /// Fields the record carries start loaded. Absent eager fields load as
    /// empty text; absent lazy fields stay unloaded until first opened.
    pub fn from_record(record: &Record) -> Self {
        let fields = FieldName::iter()
            .map(|name| {
                let field = match record.field(name) {
                    Some(text) => Field::loaded(name, text),
                    None if name.is_lazy() => Field::new(name),
                    None => Field::loaded(name, ""),
                };
                (name, field)
            })
            .collect();
        Self {
            record_id: record.id.clone(),
            title: record.title.clone(),
            fields,
        }
    }

    /// Record identifier.
    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    /// Book title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Field by name.
    pub fn field(&self, name: FieldName) -> Option<&Field> {
        self.fields.get(&name)
    }

    /// Mutable field by name.
    pub fn field_mut(&mut self, name: FieldName) -> &mut Field {
        self.fields.entry(name).or_insert_with(|| Field::new(name))
    }

    /// Current text of a field, if loaded.
    pub fn text(&self, name: FieldName) -> Option<&str> {
        self.field(name).and_then(Field::current_text)
    }

    /// Names of fields whose current text differs from the baseline.
    pub fn diff_from_baseline(&self) -> BTreeSet<FieldName> {
        self.fields
            .values()
            .filter(|field| field.is_dirty())
            .map(Field::name)
            .collect()
    }

    /// Minimal partial-update payload for the changed fields.
    pub fn to_patch(&self) -> RecordPatch {
        let mut patch = RecordPatch::default();
        for field in self.fields.values().filter(|field| field.is_dirty()) {
            if let Some(text) = field.current_text() {
                patch.insert(field.name(), text);
            }
        }
        patch
    }

    /// Adopt the values a successful save confirmed as the new baselines.
    pub fn commit(&mut self, saved: &RecordPatch) {
        for (name, text) in saved.iter() {
            self.field_mut(name).commit(text);
        }
        debug!(fields = saved.len(), "Committed saved fields to baseline");
    }

    /// Fetch a large field the first time it is needed.
    ///
    /// Invokes `fetcher` only when the field is unloaded; a loaded field is
    /// never fetched again. Returns whether a fetch happened.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrorKind::LoadFailed`] when the fetcher fails (the field
    /// goes back to unloaded), or [`FieldErrorKind::Loading`] if another fetch
    /// for the same field is still in flight.
    #[instrument(skip(self, fetcher), fields(record_id = %self.record_id))]
    pub async fn load_lazy<F, Fut, E>(&mut self, name: FieldName, fetcher: F) -> Result<bool, FieldError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
        E: Display,
    {
        let field = self.field_mut(name);
        if !field.begin_loading()? {
            debug!(field = %name, "Field already loaded, skipping fetch");
            return Ok(false);
        }
        let guard = LoadingGuard { field };

        debug!(field = %name, "Fetching field");
        match fetcher().await {
            Ok(text) => {
                debug!(field = %name, len = text.len(), "Field loaded");
                guard.field.finish_loading(text);
                Ok(true)
            }
            Err(e) => {
                warn!(field = %name, error = %e, "Field fetch failed");
                Err(FieldError::new(FieldErrorKind::LoadFailed {
                    field: name.to_string(),
                    message: e.to_string(),
                }))
            }
        }
    }
}

/// Returns a field to `NotLoaded` unless the fetch stored its text, including
/// when the loading future is dropped mid-fetch.
struct LoadingGuard<'a> {
    field: &'a mut Field,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.field.abort_loading();
    }
}
