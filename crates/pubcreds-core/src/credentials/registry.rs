//! Credential manager registry for discovering and loading managers by name
//!
//! Registrations come from a `RegistrationSource`: an explicit list, the
//! built-in managers, or a `RegistrationTable` that plugin crates append to
//! at startup. Discovery happens once per registry and rejects duplicate
//! names before anything is loaded.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use tracing::{debug, error, warn};

use super::default::DefaultCredentialManager;
use super::keyring::KeyringCredentialManager;
use super::traits::{CredentialError, CredentialManager, CredentialResult};
use super::user_input::UserInputCredentialManager;
use crate::config::ConfigSection;
use crate::prompt::{Prompt, TerminalPrompt};
use crate::secrets::{KeychainSecretLookup, SecretLookup};

/// Source name used for the managers shipped with this crate
pub const BUILTIN_SOURCE: &str = env!("CARGO_PKG_NAME");

/// Ports handed to manager factories
#[derive(Clone)]
pub struct CredentialPorts {
    pub secrets: Arc<dyn SecretLookup>,
    pub prompt: Arc<dyn Prompt>,
}

impl CredentialPorts {
    pub fn new(secrets: Arc<dyn SecretLookup>, prompt: Arc<dyn Prompt>) -> Self {
        Self { secrets, prompt }
    }

    /// System keychain plus terminal prompt
    pub fn system() -> Self {
        Self::new(Arc::new(KeychainSecretLookup::new()), Arc::new(TerminalPrompt::new()))
    }
}

impl std::fmt::Debug for CredentialPorts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPorts")
            .field("secrets", &self.secrets.name())
            .finish_non_exhaustive()
    }
}

/// Factory function type for creating credential managers
pub type ManagerFactory =
    Arc<dyn Fn(&CredentialPorts) -> Box<dyn CredentialManager> + Send + Sync>;

/// A named credential manager contributed by some distribution
#[derive(Clone)]
pub struct ManagerRegistration {
    /// Name callers load the manager by
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Package that contributed the registration (e.g., "acme-vault-creds")
    pub source: String,
    /// Factory function to create instances
    pub factory: ManagerFactory,
}

impl ManagerRegistration {
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
        factory: F,
    ) -> Self
    where
        F: Fn(&CredentialPorts) -> Box<dyn CredentialManager> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            source: source.into(),
            factory: Arc::new(factory),
        }
    }
}

impl std::fmt::Debug for ManagerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerRegistration")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("source", &self.source)
            .finish()
    }
}

/// Enumerates registrations in declaration order
pub trait RegistrationSource {
    fn enumerate(&self) -> Vec<ManagerRegistration>;
}

impl RegistrationSource for Vec<ManagerRegistration> {
    fn enumerate(&self) -> Vec<ManagerRegistration> {
        self.clone()
    }
}

/// The `default`, `keyring` and `user` managers
pub fn builtin_registrations() -> Vec<ManagerRegistration> {
    vec![
        ManagerRegistration::new(
            "default",
            "Secret store first, then command line, config and prompt",
            BUILTIN_SOURCE,
            |ports: &CredentialPorts| {
                let keyring = KeyringCredentialManager::new(
                    ports.secrets.clone(),
                    UserInputCredentialManager::new(ports.prompt.clone()),
                );
                Box::new(DefaultCredentialManager::new(
                    keyring,
                    UserInputCredentialManager::new(ports.prompt.clone()),
                )) as Box<dyn CredentialManager>
            },
        ),
        ManagerRegistration::new(
            "keyring",
            "Passwords from the secret store only",
            BUILTIN_SOURCE,
            |ports: &CredentialPorts| {
                Box::new(KeyringCredentialManager::new(
                    ports.secrets.clone(),
                    UserInputCredentialManager::new(ports.prompt.clone()),
                )) as Box<dyn CredentialManager>
            },
        ),
        ManagerRegistration::new(
            "user",
            "Command line, then config, then prompt",
            BUILTIN_SOURCE,
            |ports: &CredentialPorts| {
                Box::new(UserInputCredentialManager::new(ports.prompt.clone()))
                    as Box<dyn CredentialManager>
            },
        ),
    ]
}

/// Registration source for the built-in managers only
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinManagers;

impl RegistrationSource for BuiltinManagers {
    fn enumerate(&self) -> Vec<ManagerRegistration> {
        builtin_registrations()
    }
}

/// Pending registrations plus whether discovery has already consumed them
#[derive(Default)]
struct TableState {
    registrations: Vec<ManagerRegistration>,
    sealed: bool,
}

/// A registration table that is discovered exactly once
///
/// Plugins call `register` while the process starts up. The first call to
/// `registry` (or `load`) seals the table and discovers it; that outcome,
/// success or `DuplicateRegistration`, is kept for the table's lifetime.
/// Registrations arriving after the seal are rejected.
pub struct RegistrationTable {
    state: RwLock<TableState>,
    ports: CredentialPorts,
    discovered: OnceCell<CredentialResult<ManagerRegistry>>,
}

impl RegistrationTable {
    pub fn new(registrations: Vec<ManagerRegistration>, ports: CredentialPorts) -> Self {
        Self {
            state: RwLock::new(TableState {
                registrations,
                sealed: false,
            }),
            ports,
            discovered: OnceCell::new(),
        }
    }

    /// Add a registration; returns false once the table has been discovered
    ///
    /// Name clashes are not checked here; they surface as
    /// `CredentialError::DuplicateRegistration` at discovery.
    pub fn register(&self, registration: ManagerRegistration) -> bool {
        let mut state = self.state.write();
        if state.sealed {
            warn!(
                name = %registration.name,
                source = %registration.source,
                "credential managers already discovered, ignoring late registration"
            );
            return false;
        }
        debug!(
            name = %registration.name,
            source = %registration.source,
            "registering credential manager"
        );
        state.registrations.push(registration);
        true
    }

    /// Remove every pending registration under `name`
    ///
    /// Has no effect once the table has been discovered.
    pub fn unregister(&self, name: &str) -> bool {
        let mut state = self.state.write();
        if state.sealed {
            warn!(name, "credential managers already discovered, ignoring unregister");
            return false;
        }
        let before = state.registrations.len();
        state.registrations.retain(|r| r.name != name);
        state.registrations.len() != before
    }

    /// (name, description, source) for every registration, in order
    pub fn list(&self) -> Vec<(String, String, String)> {
        self.state
            .read()
            .registrations
            .iter()
            .map(|r| (r.name.clone(), r.description.clone(), r.source.clone()))
            .collect()
    }

    pub fn is_sealed(&self) -> bool {
        self.state.read().sealed
    }

    /// The registry discovered from this table, discovering on first use
    pub fn registry(&self) -> CredentialResult<&ManagerRegistry> {
        self.discovered
            .get_or_init(|| {
                let mut state = self.state.write();
                state.sealed = true;
                ManagerRegistry::discover(&state.registrations, self.ports.clone())
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn load(&self, name: &str) -> CredentialResult<Box<dyn CredentialManager>> {
        self.registry()?.load(name)
    }
}

impl std::fmt::Debug for RegistrationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationTable")
            .field("registrations", &self.list())
            .field("sealed", &self.is_sealed())
            .finish()
    }
}

/// Process-wide table, seeded with the built-in managers and wired to the system ports
static GLOBAL_TABLE: Lazy<RegistrationTable> =
    Lazy::new(|| RegistrationTable::new(builtin_registrations(), CredentialPorts::system()));

/// Add a manager to the process-wide table
///
/// Returns false when the table has already been discovered.
///
/// # Example
///
/// ```
/// use pubcreds_core::credentials::{
///     register_credential_manager, CredentialManager, ManagerRegistration,
///     UserInputCredentialManager,
/// };
///
/// let accepted = register_credential_manager(ManagerRegistration::new(
///     "doc_example_user",
///     "User input under another name",
///     "doc-example",
///     |ports| {
///         Box::new(UserInputCredentialManager::new(ports.prompt.clone()))
///             as Box<dyn CredentialManager>
///     },
/// ));
/// assert!(accepted);
/// ```
pub fn register_credential_manager(registration: ManagerRegistration) -> bool {
    GLOBAL_TABLE.register(registration)
}

/// Remove every registration under `name` from the process-wide table
pub fn unregister_credential_manager(name: &str) -> bool {
    GLOBAL_TABLE.unregister(name)
}

/// List the process-wide table as (name, description, source) tuples
pub fn list_credential_managers() -> Vec<(String, String, String)> {
    GLOBAL_TABLE.list()
}

/// The registry discovered from the process-wide table
pub fn global_registry() -> CredentialResult<&'static ManagerRegistry> {
    GLOBAL_TABLE.registry()
}

/// Load a manager from the process-wide table, wired to the system ports
///
/// # Example
///
/// ```
/// use pubcreds_core::credentials::load_credential_manager;
///
/// let manager = load_credential_manager("default").expect("built-in manager");
/// assert_eq!(manager.name(), "default");
/// ```
pub fn load_credential_manager(name: &str) -> CredentialResult<Box<dyn CredentialManager>> {
    GLOBAL_TABLE.load(name)
}

/// A loaded manager that reports the name it was registered under
struct RegisteredManager {
    name: String,
    inner: Box<dyn CredentialManager>,
}

impl CredentialManager for RegisteredManager {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_password(
        &self,
        system: &str,
        username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        self.inner.get_password(system, username, cli_value, config, interactive)
    }

    fn get_username(
        &self,
        system: &str,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        self.inner.get_username(system, cli_value, config, interactive)
    }

    fn get_cacert(
        &self,
        system: &str,
        username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        self.inner.get_cacert(system, username, cli_value, config, interactive)
    }

    fn get_clientcert(
        &self,
        system: &str,
        username: Option<&str>,
        cli_value: Option<&str>,
        config: &ConfigSection,
        interactive: bool,
    ) -> Option<String> {
        self.inner.get_clientcert(system, username, cli_value, config, interactive)
    }
}

/// Registered credential managers, keyed by name
pub struct ManagerRegistry {
    managers: HashMap<String, ManagerRegistration>,
    ports: CredentialPorts,
}

impl ManagerRegistry {
    /// Enumerate `source` once and index it by name
    ///
    /// Fails with `DuplicateRegistration` as soon as a second registration
    /// claims a name already seen.
    pub fn discover(
        source: &dyn RegistrationSource,
        ports: CredentialPorts,
    ) -> CredentialResult<Self> {
        let mut managers: HashMap<String, ManagerRegistration> = HashMap::new();

        for registration in source.enumerate() {
            if let Some(existing) = managers.get(&registration.name) {
                error!(
                    name = %registration.name,
                    existing = %existing.source,
                    new = %registration.source,
                    "duplicate credential manager registration"
                );
                return Err(CredentialError::DuplicateRegistration {
                    name: registration.name.clone(),
                    existing: existing.source.clone(),
                    new: registration.source.clone(),
                });
            }
            debug!(
                name = %registration.name,
                source = %registration.source,
                "discovered credential manager"
            );
            managers.insert(registration.name.clone(), registration);
        }

        Ok(Self { managers, ports })
    }

    /// Registry of the built-in managers
    pub fn builtin(ports: CredentialPorts) -> CredentialResult<Self> {
        Self::discover(&BuiltinManagers, ports)
    }

    /// Factory registered under `name`
    pub fn resolve(&self, name: &str) -> CredentialResult<&ManagerFactory> {
        self.managers
            .get(name)
            .map(|r| &r.factory)
            .ok_or_else(|| CredentialError::NotFound(name.to_string()))
    }

    /// A fresh manager instance; instances are never shared between calls
    ///
    /// The returned manager's `name()` is the name it was loaded under.
    pub fn load(&self, name: &str) -> CredentialResult<Box<dyn CredentialManager>> {
        let factory = self.resolve(name)?;
        debug!(name, "loading credential manager");
        Ok(Box::new(RegisteredManager {
            name: name.to_string(),
            inner: factory(&self.ports),
        }))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.managers.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.managers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn registrations(&self) -> impl Iterator<Item = &ManagerRegistration> {
        self.managers.values()
    }

    pub fn ports(&self) -> &CredentialPorts {
        &self.ports
    }
}

impl std::fmt::Debug for ManagerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerRegistry")
            .field("managers", &self.names())
            .field("ports", &self.ports)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::prompt::ScriptedPrompt;
    use crate::secrets::MemorySecretLookup;

    fn test_ports() -> CredentialPorts {
        CredentialPorts::new(
            Arc::new(MemorySecretLookup::new().with_password("pypi", "alice", "S")),
            Arc::new(ScriptedPrompt::new()),
        )
    }

    fn user_registration(name: &str, source: &str) -> ManagerRegistration {
        ManagerRegistration::new(name, "test manager", source, |ports: &CredentialPorts| {
            Box::new(UserInputCredentialManager::new(ports.prompt.clone()))
                as Box<dyn CredentialManager>
        })
    }

    fn test_table() -> RegistrationTable {
        RegistrationTable::new(builtin_registrations(), test_ports())
    }

    #[test]
    fn test_builtin_managers_registered() {
        let registry = ManagerRegistry::builtin(test_ports()).unwrap();
        assert_eq!(registry.names(), vec!["default", "keyring", "user"]);
        assert!(registry.registrations().all(|r| r.source == BUILTIN_SOURCE));
    }

    #[test]
    fn test_load_builtin_managers() {
        let registry = ManagerRegistry::builtin(test_ports()).unwrap();

        for name in ["default", "keyring", "user"] {
            assert_eq!(registry.load(name).unwrap().name(), name);
        }
    }

    #[test]
    fn test_loaded_managers_use_registry_ports() {
        let registry = ManagerRegistry::builtin(test_ports()).unwrap();
        let manager = registry.load("keyring").unwrap();

        let password =
            manager.get_password("pypi", Some("alice"), None, &ConfigSection::new(), false);
        assert_eq!(password.as_deref(), Some("S"));
    }

    #[test]
    fn test_loaded_manager_reports_registered_name() {
        let source = vec![user_registration("corp_prompt", "corp-plugin")];
        let registry = ManagerRegistry::discover(&source, test_ports()).unwrap();

        let manager = registry.load("corp_prompt").unwrap();
        assert_eq!(manager.name(), "corp_prompt");

        let config = ConfigSection::new().with("password", "V");
        assert_eq!(manager.get_username("pypi", None, &config, false).as_deref(), Some("V"));
    }

    #[test]
    fn test_duplicate_registration_fails_at_discovery() {
        let source = vec![
            user_registration("n", "first-dist"),
            user_registration("n", "second-dist"),
        ];

        let err = ManagerRegistry::discover(&source, test_ports()).unwrap_err();
        assert_eq!(
            err,
            CredentialError::DuplicateRegistration {
                name: "n".to_string(),
                existing: "first-dist".to_string(),
                new: "second-dist".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_of_builtin_name_fails() {
        let mut source = builtin_registrations();
        source.push(user_registration("default", "rogue-plugin"));

        let err = ManagerRegistry::discover(&source, test_ports()).unwrap_err();
        assert!(matches!(
            err,
            CredentialError::DuplicateRegistration { ref name, .. } if name == "default"
        ));
    }

    #[test]
    fn test_load_missing() {
        let registry = ManagerRegistry::builtin(test_ports()).unwrap();

        assert!(!registry.contains("missing"));
        assert_eq!(
            registry.load("missing").unwrap_err(),
            CredentialError::NotFound("missing".to_string())
        );
        assert!(registry.resolve("missing").is_err());
    }

    #[test]
    fn test_load_returns_independent_instances() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let source = vec![ManagerRegistration::new(
            "n",
            "counting",
            "test",
            move |ports: &CredentialPorts| {
                counter.fetch_add(1, Ordering::SeqCst);
                Box::new(UserInputCredentialManager::new(ports.prompt.clone()))
                    as Box<dyn CredentialManager>
            },
        )];
        let registry = ManagerRegistry::discover(&source, test_ports()).unwrap();

        let first = registry.load("n").unwrap();
        let second = registry.load("n").unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let first_ptr = first.as_ref() as *const dyn CredentialManager as *const u8;
        let second_ptr = second.as_ref() as *const dyn CredentialManager as *const u8;
        assert_ne!(first_ptr, second_ptr);
    }

    #[test]
    fn test_empty_source() {
        let registry =
            ManagerRegistry::discover(&Vec::<ManagerRegistration>::new(), test_ports()).unwrap();
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_table_register_before_discovery() {
        let table = test_table();
        assert!(table.register(user_registration("corp_prompt", "corp-plugin")));

        let listed = table.list();
        assert!(listed
            .iter()
            .any(|(name, _, source)| name == "corp_prompt" && source == "corp-plugin"));
        assert!(listed.iter().any(|(name, _, _)| name == "default"));

        assert_eq!(table.load("corp_prompt").unwrap().name(), "corp_prompt");
        assert!(table.is_sealed());
    }

    #[test]
    fn test_table_unregister_before_discovery() {
        let table = test_table();
        table.register(user_registration("corp_prompt", "corp-plugin"));

        assert!(table.unregister("corp_prompt"));
        assert!(!table.unregister("corp_prompt"));
        assert!(matches!(table.load("corp_prompt"), Err(CredentialError::NotFound(_))));
    }

    #[test]
    fn test_table_discovers_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let table = RegistrationTable::new(Vec::new(), test_ports());
        table.register(ManagerRegistration::new(
            "n",
            "counting",
            "test",
            move |ports: &CredentialPorts| {
                counter.fetch_add(1, Ordering::SeqCst);
                Box::new(UserInputCredentialManager::new(ports.prompt.clone()))
                    as Box<dyn CredentialManager>
            },
        ));

        let first = table.registry().unwrap() as *const ManagerRegistry;
        let second = table.registry().unwrap() as *const ManagerRegistry;
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_table_duplicate_is_fatal_for_every_name() {
        let table = test_table();
        table.register(user_registration("default", "late-plugin"));

        let expected = CredentialError::DuplicateRegistration {
            name: "default".to_string(),
            existing: BUILTIN_SOURCE.to_string(),
            new: "late-plugin".to_string(),
        };
        assert_eq!(table.registry().unwrap_err(), expected);
        assert_eq!(table.load("user").unwrap_err(), expected);
        assert_eq!(table.load("default").unwrap_err(), expected);
    }

    #[test]
    fn test_table_rejects_late_registration() {
        let table = test_table();
        assert_eq!(table.load("default").unwrap().name(), "default");

        assert!(!table.register(user_registration("default", "late-plugin")));
        assert!(!table.unregister("user"));

        assert_eq!(table.load("default").unwrap().name(), "default");
        assert_eq!(table.load("user").unwrap().name(), "user");
        assert!(!table.list().iter().any(|(_, _, source)| source == "late-plugin"));
    }

    #[test]
    fn test_load_global_default() {
        let manager = load_credential_manager("default").unwrap();
        assert_eq!(manager.name(), "default");
        assert!(matches!(load_credential_manager("missing"), Err(CredentialError::NotFound(_))));

        let registry = global_registry().unwrap();
        assert!(registry.contains("keyring"));
        assert!(list_credential_managers().iter().any(|(name, _, _)| name == "user"));
    }
}
