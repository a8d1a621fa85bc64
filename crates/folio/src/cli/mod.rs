//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the folio binary.

mod auth;
mod book;
mod commands;
mod generate;

pub use auth::{login, logout};
pub use book::{create, delete, export, show};
pub use commands::{Cli, Commands};
pub use generate::{generate, generate_once};

use folio::{CredentialStore, FolioConfig, FolioResult, HttpRecordStore, ValidationError};

/// Record store client carrying the stored credential.
///
/// Fails before any network call when nobody is logged in.
fn authenticated_store(config: &FolioConfig) -> FolioResult<HttpRecordStore> {
    let token = CredentialStore::from_config(&config.credentials)?
        .load()?
        .ok_or_else(|| ValidationError::new("Not logged in; run `folio login --token <token>`"))?;
    HttpRecordStore::from_config(&config.store, Some(token))
}
