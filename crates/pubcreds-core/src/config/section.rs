//! Per-system configuration snapshot

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key under which a configured credential is read
///
/// Every field (password, username, CA certificate, client certificate) is
/// looked up under this one key.
pub const CONFIG_CREDENTIAL_KEY: &str = "password";

/// One system's section of the persisted configuration
///
/// Immutable once built; credential managers only read from it. Missing
/// entries mean "not configured".
///
/// # Example
///
/// ```
/// use pubcreds_core::config::ConfigSection;
///
/// let section = ConfigSection::new().with("password", "hunter2");
/// assert_eq!(section.get("password"), Some("hunter2"));
/// assert_eq!(section.get("username"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigSection(BTreeMap<String, String>);

impl ConfigSection {
    /// An empty section
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The configured credential, ignoring empty entries
    pub fn credential(&self) -> Option<&str> {
        self.get(CONFIG_CREDENTIAL_KEY).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ConfigSection
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<BTreeMap<String, String>> for ConfigSection {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_skips_empty_value() {
        let section = ConfigSection::new().with("password", "");
        assert_eq!(section.get("password"), Some(""));
        assert_eq!(section.credential(), None);
    }

    #[test]
    fn test_credential_reads_password_key_only() {
        let section: ConfigSection = [("username", "alice"), ("ca_cert", "/etc/ca.pem")]
            .into_iter()
            .collect();
        assert_eq!(section.len(), 2);
        assert_eq!(section.credential(), None);

        let section = section.with("password", "hunter2");
        assert_eq!(section.credential(), Some("hunter2"));
    }

    #[test]
    fn test_deserialize_transparent() {
        let section: ConfigSection =
            serde_json::from_str(r#"{"password": "p", "username": "u"}"#).unwrap();
        assert_eq!(section.get("password"), Some("p"));
        assert_eq!(section.get("username"), Some("u"));
    }
}
