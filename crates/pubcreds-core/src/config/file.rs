//! YAML settings file
//!
//! Lives at `~/.config/pubcreds/config.yaml` by default and is only ever
//! read; credential managers never write configuration back.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::section::ConfigSection;
use super::traits::{ConfigError, ConfigResult};

/// Manager used when neither the settings file nor the environment names one
pub const DEFAULT_MANAGER_NAME: &str = "default";

/// Environment variable that overrides the configured manager name
pub const MANAGER_ENV_VAR: &str = "PUBCREDS_CREDENTIAL_MANAGER";

/// Settings file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// Name of the credential manager to load
    #[serde(default)]
    pub credential_manager: Option<String>,

    /// Whether prompting is allowed when nothing else resolves a field
    #[serde(default)]
    pub interactive: Option<bool>,

    /// Per-system sections, keyed by system identifier (repository URL)
    #[serde(default)]
    pub repositories: BTreeMap<String, ConfigSection>,
}

impl ConfigFile {
    /// The configured manager name, or `"default"`
    pub fn manager_name(&self) -> &str {
        self.credential_manager
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_MANAGER_NAME)
    }

    /// Whether prompting is allowed (defaults to true)
    pub fn interactive(&self) -> bool {
        self.interactive.unwrap_or(true)
    }

    /// The section for `system`; empty when the system is not configured
    pub fn section(&self, system: &str) -> ConfigSection {
        self.repositories.get(system).cloned().unwrap_or_default()
    }
}

/// Pick the manager name: a non-empty environment override wins over the file
fn select_manager_name(env_value: Option<String>, config: &ConfigFile) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| config.manager_name().to_string())
}

/// Read-only settings file provider
///
/// The parsed file is cached after the first read; call `reload` to pick up
/// changes on disk.
///
/// # Example
///
/// ```no_run
/// use pubcreds_core::config::FileConfigProvider;
///
/// let provider = FileConfigProvider::user();
/// let section = provider.section("https://upload.example.org/")?;
/// let manager = provider.manager_name()?;
/// # Ok::<(), pubcreds_core::config::ConfigError>(())
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
    cache: RwLock<Option<ConfigFile>>,
}

impl FileConfigProvider {
    /// Create a provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Create a user-level provider (~/.config/pubcreds/config.yaml)
    pub fn user() -> Self {
        // XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir().unwrap_or_else(|| {
            dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config")
        });
        Self::new(config_dir.join("pubcreds").join("config.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load config from file; a missing file yields the defaults
    fn load(&self) -> ConfigResult<ConfigFile> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "settings file not found, using defaults");
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: ConfigFile =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        debug!(
            path = %self.path.display(),
            repositories = config.repositories.len(),
            "loaded settings file"
        );
        Ok(config)
    }

    /// Get cached or load config
    pub fn get_config(&self) -> ConfigResult<ConfigFile> {
        if let Some(config) = self.cache.read().as_ref() {
            return Ok(config.clone());
        }

        let config = self.load()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }

    /// Reload config from disk (invalidate cache)
    pub fn reload(&self) -> ConfigResult<ConfigFile> {
        let config = self.load()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }

    /// The config snapshot for `system`
    pub fn section(&self, system: &str) -> ConfigResult<ConfigSection> {
        Ok(self.get_config()?.section(system))
    }

    /// Manager name, honoring `PUBCREDS_CREDENTIAL_MANAGER`
    pub fn manager_name(&self) -> ConfigResult<String> {
        let config = self.get_config()?;
        Ok(select_manager_name(std::env::var(MANAGER_ENV_VAR).ok(), &config))
    }

    pub fn interactive(&self) -> ConfigResult<bool> {
        Ok(self.get_config()?.interactive())
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .finish()
    }
}
