//! Secret lookup port

/// Read-only access to a secret store
///
/// The credential managers only ever read passwords; writing, rotating and
/// deleting secrets belongs to whatever tool manages the store itself.
///
/// Implementations:
/// - System keychain (`KeychainSecretLookup`)
/// - In-memory for testing (`MemorySecretLookup`)
/// - Chained for fallback behavior (`ChainSecretLookup`)
///
/// # Example
///
/// ```
/// use pubcreds_core::secrets::{SecretLookup, MemorySecretLookup};
///
/// let lookup = MemorySecretLookup::new();
/// lookup.insert("https://upload.example.org/", "alice", "s3cret");
///
/// assert_eq!(
///     lookup.get_password("https://upload.example.org/", Some("alice")),
///     Some("s3cret".to_string()),
/// );
/// assert_eq!(lookup.get_password("https://upload.example.org/", None), None);
/// ```
pub trait SecretLookup: Send + Sync {
    /// Human-readable name of this lookup
    fn name(&self) -> &str;

    /// Check if the backing store can be reached at all
    ///
    /// For example, a keychain might not be available on a headless server.
    fn is_available(&self) -> bool {
        true
    }

    /// Look up the password stored for `username` on `system`
    ///
    /// Returns `None` when nothing is stored, when `username` is unknown, or
    /// when the store could not be read. Lookups never fail loudly.
    fn get_password(&self, system: &str, username: Option<&str>) -> Option<String>;
}
