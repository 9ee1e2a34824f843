//! Core traits and types for credential managers

use thiserror::Error;

use crate::config::ConfigSection;

/// Errors raised while discovering or loading credential managers
///
/// Resolving a field never fails; a field nobody can answer is `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error(
        "Multiple credential managers located for the name \"{name}\": \"{existing}\" and \"{new}\""
    )]
    DuplicateRegistration {
        name: String,
        existing: String,
        new: String,
    },

    #[error("Credential manager not found: {0}")]
    NotFound(String),
}

pub type CredentialResult<T> = Result<T, CredentialError>;

/// Hooks for obtaining credential values
///
/// Every method receives guidance from the command line (`cli_value`) and from
/// the system's configuration section (`config`), but no manager is obliged to
/// use either. `interactive` says whether the operator may be asked.
///
/// Implementations:
/// - `UserInputCredentialManager`: command line, then config, then prompt
/// - `KeyringCredentialManager`: passwords from the secret store only
/// - `DefaultCredentialManager`: secret store, then user input
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pubcreds_core::config::ConfigSection;
/// use pubcreds_core::credentials::{CredentialManager, UserInputCredentialManager};
/// use pubcreds_core::prompt::ScriptedPrompt;
///
/// let manager = UserInputCredentialManager::new(Arc::new(ScriptedPrompt::new()));
/// let config = ConfigSection::new().with("password", "from-config");
///
/// let password = manager.get_password("pypi", Some("alice"), None, &config, false);
/// assert_eq!(password.as_deref(), Some("from-config"));
/// ```
pub trait CredentialManager: Send + Sync {
    /// Name this manager is registered under
    fn name(&self) -> &str;

    /// Get the password for `username` on `system`
    fn get_password(
        &self,
        system: &str,
        username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String>;

    /// Get the username for `system`
    fn get_username(
        &self,
        system: &str,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String>;

    /// Get the CA certificate for `username` on `system`
    fn get_cacert(
        &self,
        system: &str,
        username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String>;

    /// Get the client certificate for `username` on `system`
    fn get_clientcert(
        &self,
        system: &str,
        username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String>;
}

impl std::fmt::Debug for dyn CredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialManager")
            .field("name", &self.name())
            .finish()
    }
}
