//! pubcreds Core
//!
//! Pluggable credential resolution for package publishing clients.
//! Callers ask "which value should I use for this field on this system?" and
//! get a single value back, or nothing.
//!
//! ## Resolution
//!
//! A `CredentialManager` is loaded by name from a `ManagerRegistry` and asked
//! for each field it needs:
//! - `default`: secret store, then command line, config and prompt
//! - `keyring`: passwords from the secret store only
//! - `user`: command line, then config, then prompt
//!
//! ```rust,ignore
//! use pubcreds_core::{ManagerRegistry, CredentialPorts, FileConfigProvider};
//!
//! let settings = FileConfigProvider::user();
//! let registry = ManagerRegistry::builtin(CredentialPorts::system())?;
//! let manager = registry.load(&settings.manager_name()?)?;
//!
//! let system = "https://upload.example.org/";
//! let config = settings.section(system)?;
//! let username = manager.get_username(system, None, &config, true);
//! let password = manager.get_password(system, username.as_deref(), None, &config, true);
//! ```

pub mod secrets;
pub mod prompt;
pub mod config;
pub mod credentials;

pub use secrets::{SecretLookup, KeychainSecretLookup, MemorySecretLookup, ChainSecretLookup};

pub use prompt::{Prompt, PromptError, PromptResult, TerminalPrompt, ScriptedPrompt};

pub use config::{ConfigSection, ConfigError, ConfigResult, FileConfigProvider, ConfigFile};

pub use credentials::{
    CredentialManager, CredentialError, CredentialResult,
    UserInputCredentialManager, KeyringCredentialManager, DefaultCredentialManager,
    ManagerRegistry, ManagerRegistration, ManagerFactory, CredentialPorts, RegistrationSource,
    RegistrationTable, register_credential_manager, load_credential_manager,
    list_credential_managers, global_registry,
    resolve_credentials, CliCredentials, ResolvedCredentials,
};
