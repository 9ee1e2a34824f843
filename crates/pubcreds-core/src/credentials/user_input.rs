//! Credentials from the command line, the config section, or the operator

use std::sync::Arc;

use tracing::{debug, warn};

use super::traits::CredentialManager;
use crate::config::ConfigSection;
use crate::prompt::{Prompt, PromptResult};

pub const PASSWORD_PROMPT: &str = "Enter your password: ";
pub const USERNAME_PROMPT: &str = "Enter your username: ";

/// Precedence shared by every user-input field
///
/// 1. `cli_value`, verbatim, whenever it is `Some`
/// 2. the config section's credential entry, if non-empty
/// 3. `prompter`, if one was supplied
pub(crate) fn resolve_value<F>(
    cli_value: Option<&str>,
    config: &ConfigSection,
    prompter: Option<F>,
) -> Option<String>
where
    F: FnOnce() -> PromptResult<String>,
{
    if let Some(value) = cli_value {
        return Some(value.to_string());
    }

    if let Some(value) = config.credential() {
        return Some(value.to_string());
    }

    let prompter = prompter?;
    match prompter() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "prompt failed, leaving value unresolved");
            None
        }
    }
}

/// Credential manager that asks the user for unknown values
///
/// Values come from the command line first, then the system's config
/// section, then (for passwords and usernames, when interactive) a prompt.
/// Certificates are never prompted for.
pub struct UserInputCredentialManager {
    prompt: Arc<dyn Prompt>,
}

impl UserInputCredentialManager {
    pub fn new(prompt: Arc<dyn Prompt>) -> Self {
        Self { prompt }
    }
}

impl CredentialManager for UserInputCredentialManager {
    fn name(&self) -> &str {
        "user"
    }

    fn get_password(
        &self,
        system: &str,
        _username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        debug!(system, interactive, "resolving password from user input");
        let prompter = interactive.then_some(|| self.prompt.prompt_hidden(PASSWORD_PROMPT));
        resolve_value(cli_value, config, prompter)
    }

    fn get_username(
        &self,
        system: &str,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        debug!(system, interactive, "resolving username from user input");
        let prompter = interactive.then_some(|| self.prompt.prompt(USERNAME_PROMPT));
        resolve_value(cli_value, config, prompter)
    }

    fn get_cacert(
        &self,
        _system: &str,
        _username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        _interactive: bool,
    ) -> Option<String> {
        resolve_value(cli_value, config, None::<fn() -> PromptResult<String>>)
    }

    fn get_clientcert(
        &self,
        _system: &str,
        _username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        _interactive: bool,
    ) -> Option<String> {
        resolve_value(cli_value, config, None::<fn() -> PromptResult<String>>)
    }
}

impl std::fmt::Debug for UserInputCredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInputCredentialManager").finish_non_exhaustive()
    }
}
