//! Chained secret lookup with fallback behavior

use std::sync::Arc;

use tracing::debug;

use super::traits::SecretLookup;

/// A secret lookup that tries several lookups in order
///
/// Unavailable lookups are skipped. The first lookup that yields a password
/// wins.
///
/// # Example
///
/// ```
/// use pubcreds_core::secrets::{SecretLookup, ChainSecretLookup, MemorySecretLookup};
/// use std::sync::Arc;
///
/// let primary = Arc::new(MemorySecretLookup::new());
/// let fallback = Arc::new(MemorySecretLookup::new().with_password("pypi", "alice", "old"));
///
/// let chain = ChainSecretLookup::new(vec![primary, fallback]);
/// assert_eq!(chain.get_password("pypi", Some("alice")), Some("old".to_string()));
/// ```
pub struct ChainSecretLookup {
    lookups: Vec<Arc<dyn SecretLookup>>,
}

impl ChainSecretLookup {
    /// Create a chain; lookups are tried in order
    ///
    /// An empty chain is valid and never finds anything.
    pub fn new(lookups: Vec<Arc<dyn SecretLookup>>) -> Self {
        Self { lookups }
    }

    /// Get the lookups in this chain
    pub fn lookups(&self) -> &[Arc<dyn SecretLookup>] {
        &self.lookups
    }

    /// Find which lookup can answer for `(system, username)`
    pub fn find_lookup(
        &self,
        system: &str,
        username: Option<&str>,
    ) -> Option<&Arc<dyn SecretLookup>> {
        self.lookups
            .iter()
            .find(|l| l.is_available() && l.get_password(system, username).is_some())
    }
}

impl SecretLookup for ChainSecretLookup {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_available(&self) -> bool {
        self.lookups.iter().any(|l| l.is_available())
    }

    fn get_password(&self, system: &str, username: Option<&str>) -> Option<String> {
        for lookup in &self.lookups {
            if !lookup.is_available() {
                debug!(lookup = lookup.name(), "skipping unavailable secret lookup");
                continue;
            }
            if let Some(password) = lookup.get_password(system, username) {
                debug!(lookup = lookup.name(), system, "password resolved from chain");
                return Some(password);
            }
        }
        None
    }
}

// Implement Debug manually since Arc<dyn SecretLookup> doesn't implement Debug
impl std::fmt::Debug for ChainSecretLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.lookups.iter().map(|l| l.name()).collect();
        f.debug_struct("ChainSecretLookup")
            .field("lookups", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::MemorySecretLookup;

    struct Offline;

    impl SecretLookup for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn is_available(&self) -> bool {
            false
        }

        fn get_password(&self, _system: &str, _username: Option<&str>) -> Option<String> {
            panic!("unavailable lookups must not be queried");
        }
    }

    #[test]
    fn test_chain_lookup_name() {
        let chain = ChainSecretLookup::new(vec![]);
        assert_eq!(chain.name(), "chain");
    }

    #[test]
    fn test_chain_lookup_fallback() {
        let first = Arc::new(MemorySecretLookup::new());
        let second =
            Arc::new(MemorySecretLookup::new().with_password("pypi", "alice", "from_second"));

        let chain = ChainSecretLookup::new(vec![first, second]);
        assert_eq!(chain.get_password("pypi", Some("alice")), Some("from_second".to_string()));
    }

    #[test]
    fn test_chain_lookup_priority() {
        let first =
            Arc::new(MemorySecretLookup::new().with_password("pypi", "alice", "from_first"));
        let second =
            Arc::new(MemorySecretLookup::new().with_password("pypi", "alice", "from_second"));

        let chain = ChainSecretLookup::new(vec![first, second]);
        assert_eq!(chain.get_password("pypi", Some("alice")), Some("from_first".to_string()));
    }

    #[test]
    fn test_chain_lookup_skips_unavailable() {
        let memory = Arc::new(MemorySecretLookup::new().with_password("pypi", "alice", "value"));
        let offline: Arc<dyn SecretLookup> = Arc::new(Offline);
        let chain = ChainSecretLookup::new(vec![offline, memory]);

        assert!(chain.is_available());
        assert_eq!(chain.get_password("pypi", Some("alice")), Some("value".to_string()));
        assert_eq!(chain.find_lookup("pypi", Some("alice")).map(|l| l.name()), Some("memory"));
    }

    #[test]
    fn test_empty_chain() {
        let chain = ChainSecretLookup::new(vec![]);
        assert!(!chain.is_available());
        assert_eq!(chain.get_password("pypi", Some("alice")), None);
        assert!(chain.find_lookup("pypi", Some("alice")).is_none());
    }
}
