//! Folio - streaming book-content generation client.
//!
//! Folio opens a book record from a REST backend, streams generated text into
//! one of its fields over a WebSocket, lets the user stop or edit while text
//! arrives, and saves only the fields that changed.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use folio::{Editor, FieldName, FolioConfig, HttpRecordStore, StatusContext, WsConnector};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FolioConfig::load()?;
//!     let store = HttpRecordStore::from_config(&config.store, Some("token".into()))?;
//!     let connector = WsConnector::from_config(&config.generation);
//!
//!     let mut editor = Editor::open(&store, "b1", StatusContext::new()).await?;
//!     editor.open_field(&store, FieldName::MdBody).await?;
//!
//!     let (_stop, mut commands) = tokio::sync::mpsc::unbounded_channel();
//!     editor.generate(&connector, FieldName::MdBody, &mut commands).await?;
//!     editor.save(&store).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `folio_error` - Error types
//! - `folio_core` - Document model, wire messages, generation session
//! - `folio_interface` - Record store and generation transport traits
//! - `folio_client` - WebSocket channel, HTTP record store, configuration
//! - `folio_editor` - Editor session, reconciler, status context, preview
//!
//! This crate re-exports everything for convenience.

pub use folio_client::*;
pub use folio_core::*;
pub use folio_editor::*;
pub use folio_error::*;
pub use folio_interface::*;

mod telemetry;

pub use telemetry::init_console_telemetry;
