//! Resolve every credential field for one system in one pass

use tracing::info;

use super::traits::CredentialManager;
use crate::config::ConfigSection;

/// Values the caller already has from its command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub cacert: Option<String>,
    pub clientcert: Option<String>,
}

/// The outcome of resolving all four fields
///
/// Any field may be `None`; callers decide whether to continue without it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResolvedCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub cacert: Option<String>,
    pub clientcert: Option<String>,
}

impl std::fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("cacert", &self.cacert)
            .field("clientcert", &self.clientcert)
            .finish()
    }
}

/// Resolve username, then password and certificates for that username
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pubcreds_core::config::ConfigSection;
/// use pubcreds_core::credentials::{
///     resolve_credentials, CliCredentials, UserInputCredentialManager,
/// };
/// use pubcreds_core::prompt::ScriptedPrompt;
///
/// let manager = UserInputCredentialManager::new(Arc::new(ScriptedPrompt::new()));
/// let cli = CliCredentials {
///     username: Some("alice".to_string()),
///     password: Some("s3cret".to_string()),
///     ..CliCredentials::default()
/// };
///
/// let resolved = resolve_credentials(&manager, "pypi", &cli, &ConfigSection::new(), false);
/// assert_eq!(resolved.username.as_deref(), Some("alice"));
/// assert_eq!(resolved.password.as_deref(), Some("s3cret"));
/// assert_eq!(resolved.cacert, None);
/// ```
pub fn resolve_credentials(
    manager: &dyn CredentialManager,
    system: &str,
    cli: &CliCredentials,
    config: &ConfigSection,
    interactive: bool,
) -> ResolvedCredentials {
    let username = manager.get_username(system, cli.username.as_deref(), config, interactive);
    let known_user = username.as_deref();

    let password =
        manager.get_password(system, known_user, cli.password.as_deref(), config, interactive);
    let cacert = manager.get_cacert(system, known_user, cli.cacert.as_deref(), config, interactive);
    let clientcert =
        manager.get_clientcert(system, known_user, cli.clientcert.as_deref(), config, interactive);

    info!(
        manager = manager.name(),
        system,
        username = known_user.unwrap_or("<none>"),
        has_password = password.is_some(),
        has_cacert = cacert.is_some(),
        has_clientcert = clientcert.is_some(),
        "resolved credentials"
    );

    ResolvedCredentials {
        username,
        password,
        cacert,
        clientcert,
    }
}
