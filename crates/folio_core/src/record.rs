//! REST shapes exchanged with the record store.

use crate::FieldName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A book record as returned by the record store.
///
/// Large fields (`mdBody`, `usage`) are usually absent and fetched one by one.
///
/// # Examples
///
/// ```
/// use folio_core::{FieldName, Record};
///
/// let record: Record = serde_json::from_str(
///     r#"{"id":"b1","title":"Rust Field Notes","toc":"1. Intro","generating":false}"#,
/// ).unwrap();
///
/// assert_eq!(record.field(FieldName::Toc), Some("1. Intro"));
/// assert_eq!(record.field(FieldName::MdBody), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Record identifier
    #[serde(alias = "_id")]
    pub id: String,
    /// Book title
    #[serde(default)]
    pub title: String,
    /// Table of contents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toc: Option<String>,
    /// Short summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Markdown body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md_body: Option<String>,
    /// Usage notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// Whether the backend is generating content for this record right now
    #[serde(default)]
    pub generating: bool,
}

impl Record {
    /// Text of a field if the record carried it.
    pub fn field(&self, name: FieldName) -> Option<&str> {
        match name {
            FieldName::Toc => self.toc.as_deref(),
            FieldName::MdBody => self.md_body.as_deref(),
            FieldName::Summary => self.summary.as_deref(),
            FieldName::Usage => self.usage.as_deref(),
        }
    }
}

/// Payload for creating a record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    /// Book title
    pub title: String,
    /// Optional initial table of contents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toc: Option<String>,
}

/// Partial update carrying only changed fields.
///
/// Serializes as a flat JSON object keyed by wire field name.
///
/// # Examples
///
/// ```
/// use folio_core::{FieldName, RecordPatch};
///
/// let mut patch = RecordPatch::default();
/// patch.insert(FieldName::MdBody, "# Chapter 1");
///
/// let json = serde_json::to_string(&patch).unwrap();
/// assert_eq!(json, r##"{"mdBody":"# Chapter 1"}"##);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordPatch {
    fields: BTreeMap<FieldName, String>,
}

impl RecordPatch {
    /// Add or replace a field value.
    pub fn insert(&mut self, name: FieldName, text: impl Into<String>) {
        self.fields.insert(name, text.into());
    }

    /// Value carried for a field.
    pub fn get(&self, name: FieldName) -> Option<&str> {
        self.fields.get(&name).map(String::as_str)
    }

    /// Whether nothing would be sent.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields carried.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Field names carried, in wire order.
    pub fn names(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.fields.keys().copied()
    }

    /// Field values carried, in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.fields.iter().map(|(name, text)| (*name, text.as_str()))
    }
}
