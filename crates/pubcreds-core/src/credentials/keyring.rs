//! Passwords from the secret store, everything else from user input

use std::sync::Arc;

use tracing::debug;

use super::traits::CredentialManager;
use super::user_input::UserInputCredentialManager;
use crate::config::ConfigSection;
use crate::secrets::SecretLookup;

/// Credential manager that reads passwords from a secret store
///
/// `get_password` answers from the secret store alone. The command line,
/// the config section and the prompt are not consulted for passwords, so a
/// password missing from the store stays `None`. Usernames and certificates
/// are handed to the wrapped `UserInputCredentialManager`.
pub struct KeyringCredentialManager {
    secrets: Arc<dyn SecretLookup>,
    user_input: UserInputCredentialManager,
}

impl KeyringCredentialManager {
    pub fn new(secrets: Arc<dyn SecretLookup>, user_input: UserInputCredentialManager) -> Self {
        Self { secrets, user_input }
    }
}

impl CredentialManager for KeyringCredentialManager {
    fn name(&self) -> &str {
        "keyring"
    }

    fn get_password(
        &self,
        system: &str,
        username: Option<&str>,
        _cli_value: Option<&str>,
        _config: &ConfigSection,
        _interactive: bool,
    ) -> Option<String> {
        let password = self.secrets.get_password(system, username);
        debug!(
            system,
            lookup = self.secrets.name(),
            found = password.is_some(),
            "secret store password lookup"
        );
        password
    }

    fn get_username(
        &self,
        system: &str,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        self.user_input.get_username(system, cli_value, config, interactive)
    }

    fn get_cacert(
        &self,
        system: &str,
        username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        self.user_input.get_cacert(system, username, cli_value, config, interactive)
    }

    fn get_clientcert(
        &self,
        system: &str,
        username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        self.user_input.get_clientcert(system, username, cli_value, config, interactive)
    }
}

impl std::fmt::Debug for KeyringCredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyringCredentialManager")
            .field("secrets", &self.secrets.name())
            .finish_non_exhaustive()
    }
}
