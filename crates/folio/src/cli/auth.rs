//! Credential command handlers.

use folio::{CredentialStore, FolioConfig, FolioResult, ValidationError};
use tracing::info;

/// Store the bearer token.
pub fn login(config: &FolioConfig, token: &str) -> FolioResult<()> {
    if token.trim().is_empty() {
        return Err(ValidationError::new("Token must not be empty").into());
    }
    let credentials = CredentialStore::from_config(&config.credentials)?;
    credentials.save(token)?;
    info!(path = %credentials.path().display(), "Logged in");
    println!("Logged in.");
    Ok(())
}

/// Forget the bearer token.
pub fn logout(config: &FolioConfig) -> FolioResult<()> {
    CredentialStore::from_config(&config.credentials)?.clear()?;
    println!("Logged out.");
    Ok(())
}
