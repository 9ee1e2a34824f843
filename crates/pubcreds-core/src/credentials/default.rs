//! Default credential manager: secret store first, then user input

use tracing::debug;

use super::keyring::KeyringCredentialManager;
use super::traits::CredentialManager;
use super::user_input::UserInputCredentialManager;
use crate::config::ConfigSection;

/// Default credential manager
///
/// Behaves like `KeyringCredentialManager` but falls back to user input when
/// the secret store has no password. Password precedence:
///
/// secret store → command line → config section → prompt → `None`
///
/// The fallback goes straight to `UserInputCredentialManager::get_password`;
/// the keyring strategy's own password rule is only used for the first step.
pub struct DefaultCredentialManager {
    keyring: KeyringCredentialManager,
    user_input: UserInputCredentialManager,
}

impl DefaultCredentialManager {
    pub fn new(keyring: KeyringCredentialManager, user_input: UserInputCredentialManager) -> Self {
        Self { keyring, user_input }
    }
}

impl CredentialManager for DefaultCredentialManager {
    fn name(&self) -> &str {
        "default"
    }

    fn get_password(
        &self,
        system: &str,
        username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        let stored = self.keyring.get_password(system, username, cli_value, config, interactive);
        if stored.is_some() {
            return stored;
        }

        debug!(system, "no stored password, falling back to user input");
        self.user_input.get_password(system, username, cli_value, config, interactive)
    }

    fn get_username(
        &self,
        system: &str,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        self.keyring.get_username(system, cli_value, config, interactive)
    }

    fn get_cacert(
        &self,
        system: &str,
        username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        self.keyring.get_cacert(system, username, cli_value, config, interactive)
    }

    fn get_clientcert(
        &self,
        system: &str,
        username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        self.keyring.get_clientcert(system, username, cli_value, config, interactive)
    }
}

impl std::fmt::Debug for DefaultCredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultCredentialManager")
            .field("keyring", &self.keyring)
            .finish_non_exhaustive()
    }
}
