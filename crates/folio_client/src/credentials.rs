//! Persistent bearer credential.

use crate::config::CredentialsConfig;
use folio_error::{ConfigError, ConfigErrorKind, FolioResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// File-backed store for the opaque bearer token.
///
/// Presence of a token is what gates authenticated commands; the token itself
/// is never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by an explicit file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured path, or `~/.config/folio/token`.
    ///
    /// # Errors
    ///
    /// Fails when no path is configured and the platform has no config
    /// directory.
    pub fn from_config(config: &CredentialsConfig) -> FolioResult<Self> {
        if let Some(path) = &config.path {
            return Ok(Self::new(path.clone()));
        }
        let dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::new(ConfigErrorKind::NoConfigDir("the credential file".into())))?;
        Ok(Self::new(dir.join("folio").join("token")))
    }

    /// Token file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. Missing or blank file means "logged out".
    ///
    /// # Errors
    ///
    /// Fails on any I/O error other than the file not existing.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> FolioResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    debug!("Loaded credential");
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(format!("read failed: {}", e)).into()),
        }
    }

    /// Persist a token, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be written.
    #[instrument(skip(self, token), fields(path = %self.path.display()))]
    pub fn save(&self, token: &str) -> FolioResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                self.io_error(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(&self.path, token.trim())
            .map_err(|e| self.io_error(format!("write failed: {}", e)))?;
        debug!("Saved credential");
        Ok(())
    }

    /// Forget the stored token. Clearing an absent token is fine.
    ///
    /// # Errors
    ///
    /// Fails when an existing file cannot be removed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn clear(&self) -> FolioResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Cleared credential");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(format!("remove failed: {}", e)).into()),
        }
    }

    #[track_caller]
    fn io_error(&self, reason: String) -> ConfigError {
        ConfigError::new(ConfigErrorKind::Credential {
            path: self.path.display().to_string(),
            reason,
        })
    }
}
