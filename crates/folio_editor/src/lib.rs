//! Editor core for Folio.
//!
//! - [`Editor`] - one open record, lazy field loads, streamed and one-shot
//!   generation, minimal saves
//! - [`Reconciler`] - folds generation events into a field in arrival order
//! - [`StatusContext`] - explicit, watchable status line
//! - [`render_html`] / [`export`] - markdown preview and export

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod editor;
mod preview;
mod reconciler;
mod status;

pub use editor::{DEFAULT_MODEL, Editor, EditorCommand, PreviewFrame, SaveOutcome};
pub use preview::{ExportFormat, export, render_html, to_markdown};
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use status::{Notice, StatusContext};
