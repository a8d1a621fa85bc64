//! Configuration for the Folio client.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (`folio.toml` shipped with the library)
//! 2. `~/.config/folio/folio.toml`
//! 3. `./folio.toml`
//! 4. `FOLIO_*` environment variables, `__` separating nested keys
//!    (e.g. `FOLIO_STORE__BASE_URL`)

use config::{Config, Environment, File, FileFormat};
use folio_core::EditPolicy;
use folio_error::{ConfigError, ConfigErrorKind, FolioError, FolioResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../folio.toml");

/// Record store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Base URL of the REST API, e.g. `https://books.example.com/api`
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Generation service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// WebSocket endpoint of the streaming generation service
    pub ws_url: String,

    /// Model selector sent with every request
    pub default_model: String,
}

/// Editor behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct EditorConfig {
    /// How manual edits interact with a running generation
    #[serde(default)]
    pub edit_policy: EditPolicy,
}

/// Where the bearer credential lives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// Token file; defaults to `~/.config/folio/token`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Top-level Folio configuration.
///
/// # Example
///
/// ```no_run
/// use folio_client::FolioConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FolioConfig::load()?;
/// println!("Record store: {}", config.store.base_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FolioConfig {
    /// Record store settings
    pub store: StoreConfig,

    /// Generation service settings
    pub generation: GenerationConfig,

    /// Editor settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Credential settings
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl FolioConfig {
    /// Load configuration from a specific file path, on top of the bundled
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FolioResult<Self> {
        debug!("Loading configuration from file");

        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    /// Parse configuration from TOML text, on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml_str(toml: &str) -> FolioResult<Self> {
        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    /// Load configuration with precedence: environment > current dir > home
    /// dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed.
    #[instrument]
    pub fn load() -> FolioResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("folio/folio.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("folio").required(false))
            .add_source(
                Environment::with_prefix("FOLIO")
                    .prefix_separator("_")
                    .separator("__"),
            );

        Self::build(builder)
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> FolioResult<Self> {
        builder
            .build()
            .map_err(|e| {
                FolioError::from(ConfigError::new(ConfigErrorKind::Source(e.to_string())))
            })?
            .try_deserialize()
            .map_err(|e| {
                FolioError::from(ConfigError::new(ConfigErrorKind::Invalid(e.to_string())))
            })
    }
}
