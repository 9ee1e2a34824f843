//! In-memory secret lookup

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::SecretLookup;

/// In-memory secret lookup for testing and embedding
///
/// Passwords are keyed by `(system, username)`. The map is behind a lock so a
/// lookup shared through `Arc` can still be seeded after construction.
///
/// # Example
///
/// ```
/// use pubcreds_core::secrets::{SecretLookup, MemorySecretLookup};
///
/// let lookup = MemorySecretLookup::new();
/// lookup.insert("pypi", "alice", "s3cret");
/// assert_eq!(lookup.get_password("pypi", Some("alice")), Some("s3cret".to_string()));
/// assert_eq!(lookup.get_password("pypi", Some("bob")), None);
/// ```
#[derive(Debug, Default)]
pub struct MemorySecretLookup {
    secrets: RwLock<HashMap<(String, String), String>>,
}

impl MemorySecretLookup {
    /// Create a new empty lookup
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, useful in tests
    pub fn with_password(self, system: &str, username: &str, password: &str) -> Self {
        self.insert(system, username, password);
        self
    }

    /// Store a password for `username` on `system`
    pub fn insert(&self, system: &str, username: &str, password: &str) {
        self.secrets
            .write()
            .insert((system.to_string(), username.to_string()), password.to_string());
    }

    /// Remove all stored passwords
    pub fn clear(&self) {
        self.secrets.write().clear();
    }

    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecretLookup for MemorySecretLookup {
    fn name(&self) -> &str {
        "memory"
    }

    fn get_password(&self, system: &str, username: Option<&str>) -> Option<String> {
        let username = username?;
        self.secrets
            .read()
            .get(&(system.to_string(), username.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_lookup_name() {
        assert_eq!(MemorySecretLookup::new().name(), "memory");
    }

    #[test]
    fn test_memory_lookup_keyed_by_system_and_user() {
        let lookup = MemorySecretLookup::new()
            .with_password("pypi", "alice", "a-pass")
            .with_password("testpypi", "alice", "t-pass");

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get_password("pypi", Some("alice")), Some("a-pass".to_string()));
        assert_eq!(lookup.get_password("testpypi", Some("alice")), Some("t-pass".to_string()));
        assert_eq!(lookup.get_password("pypi", Some("bob")), None);
    }

    #[test]
    fn test_memory_lookup_requires_username() {
        let lookup = MemorySecretLookup::new().with_password("pypi", "alice", "a-pass");
        assert_eq!(lookup.get_password("pypi", None), None);
    }

    #[test]
    fn test_memory_lookup_clear() {
        let lookup = MemorySecretLookup::new().with_password("pypi", "alice", "a-pass");
        lookup.clear();

        assert!(lookup.is_empty());
        assert_eq!(lookup.get_password("pypi", Some("alice")), None);
    }

    #[test]
    fn test_memory_lookup_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let lookup = Arc::new(MemorySecretLookup::new());
        let mut handles = vec![];

        for i in 0..10 {
            let lookup = Arc::clone(&lookup);
            handles.push(thread::spawn(move || {
                let user = format!("user_{}", i);
                lookup.insert("pypi", &user, "value");
                assert_eq!(lookup.get_password("pypi", Some(&user)), Some("value".to_string()));
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(lookup.len(), 10);
    }
}
