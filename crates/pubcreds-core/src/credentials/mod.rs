//! Credential managers
//!
//! Credential managers provide hooks to obtain credential values. Every
//! method accepts guidance from the command line and the system's config
//! section, but no manager is obliged to use either.
//!
//! - `CredentialManager` trait implemented by every strategy
//! - Built-in strategies: `UserInputCredentialManager` ("user"),
//!   `KeyringCredentialManager` ("keyring"), `DefaultCredentialManager` ("default")
//! - `ManagerRegistry` for discovering and loading managers by name

mod traits;
mod user_input;
mod keyring;
mod default;
mod registry;
mod resolve;

pub use traits::{CredentialManager, CredentialError, CredentialResult};
pub use user_input::{UserInputCredentialManager, PASSWORD_PROMPT, USERNAME_PROMPT};
pub use keyring::KeyringCredentialManager;
pub use default::DefaultCredentialManager;
pub use registry::{
    ManagerRegistry, ManagerRegistration, ManagerFactory, CredentialPorts,
    RegistrationSource, RegistrationTable, BuiltinManagers, BUILTIN_SOURCE,
    builtin_registrations, register_credential_manager, unregister_credential_manager,
    list_credential_managers, load_credential_manager, global_registry,
};
pub use resolve::{resolve_credentials, CliCredentials, ResolvedCredentials};
