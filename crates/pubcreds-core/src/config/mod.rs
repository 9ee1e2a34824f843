//! Configuration for credential resolution
//!
//! - `ConfigSection`: the per-system snapshot credential managers read
//! - `FileConfigProvider`: read-only YAML settings file

mod traits;
mod section;
mod file;

pub use traits::{ConfigError, ConfigResult};
pub use section::{ConfigSection, CONFIG_CREDENTIAL_KEY};
pub use file::{FileConfigProvider, ConfigFile, DEFAULT_MANAGER_NAME, MANAGER_ENV_VAR};
