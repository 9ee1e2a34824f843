//! System keychain secret lookup
//!
//! Uses the OS keychain:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)

use keyring::Entry;
use tracing::{debug, warn};

use super::traits::SecretLookup;

/// Secret lookup backed by the system keychain
///
/// Entries are addressed the same way command-line keyring tools address
/// them: the system identifier (usually the repository URL) is the keychain
/// *service* and the username is the keychain *user*.
///
/// # Example
///
/// ```no_run
/// use pubcreds_core::secrets::{KeychainSecretLookup, SecretLookup};
///
/// let lookup = KeychainSecretLookup::new();
/// let password = lookup.get_password("https://upload.example.org/", Some("alice"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct KeychainSecretLookup;

/// Entry read by `is_available`; it is never written
const AVAILABILITY_SERVICE: &str = "pubcreds";
const AVAILABILITY_USER: &str = "__pubcreds_availability_check__";

impl KeychainSecretLookup {
    /// Create a new keychain lookup
    pub fn new() -> Self {
        Self
    }
}

impl SecretLookup for KeychainSecretLookup {
    fn name(&self) -> &str {
        "keychain"
    }

    fn is_available(&self) -> bool {
        let result =
            Entry::new(AVAILABILITY_SERVICE, AVAILABILITY_USER).and_then(|e| e.get_password());
        backend_responded(&result)
    }

    fn get_password(&self, system: &str, username: Option<&str>) -> Option<String> {
        let Some(username) = username else {
            debug!(system, "no username known, skipping keychain lookup");
            return None;
        };

        let entry = match Entry::new(system, username) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(system, username, error = %e, "failed to open keychain entry");
                return None;
            }
        };

        match entry.get_password() {
            Ok(password) => {
                debug!(system, username, "password found in keychain");
                Some(password)
            }
            Err(keyring::Error::NoEntry) => {
                debug!(system, username, "no keychain entry");
                None
            }
            Err(e) => {
                warn!(system, username, error = %e, "keychain lookup failed");
                None
            }
        }
    }
}

/// Whether a read reached a working keychain backend
///
/// A missing entry still counts: the backend answered. Storage or platform
/// failures (locked keychain, no Secret Service on the session bus) do not.
fn backend_responded(result: &keyring::Result<String>) -> bool {
    match result {
        Ok(_) | Err(keyring::Error::NoEntry) => true,
        Err(e @ (keyring::Error::NoStorageAccess(_) | keyring::Error::PlatformFailure(_))) => {
            warn!(error = %e, "system keychain is not available");
            false
        }
        Err(e) => {
            debug!(error = %e, "keychain answered availability check with an error");
            true
        }
    }
}
