//! Network clients and configuration for Folio.
//!
//! - [`GenerationChannel`] - single-use duplex stream for one generation
//! - [`WsConnector`] / [`WsTransport`] - WebSocket transport for the channel
//! - [`HttpRecordStore`] - REST client for book records
//! - [`FolioConfig`] - layered TOML/environment configuration
//! - [`CredentialStore`] - persisted bearer token

mod channel;
mod config;
mod credentials;
mod store;
mod ws;

pub use channel::GenerationChannel;
pub use config::{CredentialsConfig, EditorConfig, FolioConfig, GenerationConfig, StoreConfig};
pub use credentials::CredentialStore;
pub use store::HttpRecordStore;
pub use ws::{WsConnector, WsTransport};
