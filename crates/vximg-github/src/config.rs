//! Persisted image host configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Configuration for a GitHub-backed image host.
///
/// Field names match the keys the owning application persists:
/// `personal_access_token`, `user_name`, `repository_name`.
///
/// A config is only usable once all three fields are non-empty; see
/// [`is_complete`](Self::is_complete).
#[derive(Serialize, Deserialize)]
pub struct HostConfig {
    /// Personal access token with `repo` scope.
    #[serde(default = "empty_token", serialize_with = "expose_token")]
    pub personal_access_token: SecretString,

    /// Repository owner (user or organization).
    #[serde(default)]
    pub user_name: String,

    /// Repository the images are committed to.
    #[serde(default)]
    pub repository_name: String,
}

impl HostConfig {
    /// Build a config from its three parts.
    pub fn new(
        token: impl Into<String>,
        user_name: impl Into<String>,
        repository_name: impl Into<String>,
    ) -> Self {
        Self {
            personal_access_token: SecretString::from(token.into()),
            user_name: user_name.into(),
            repository_name: repository_name.into(),
        }
    }

    /// Whether the token, user name and repository name are all set.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.personal_access_token.expose_secret().is_empty()
            && !self.user_name.is_empty()
            && !self.repository_name.is_empty()
    }

    /// The configured token, exposed for request headers.
    #[must_use]
    pub(crate) fn token(&self) -> &str {
        self.personal_access_token.expose_secret()
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConfig")
            .field("personal_access_token", &"[redacted]")
            .field("user_name", &self.user_name)
            .field("repository_name", &self.repository_name)
            .finish()
    }
}

// SecretString deliberately does not implement Serialize; the persisted
// config has to carry the token, so expose it here and only here.
fn expose_token<S: Serializer>(token: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(token.expose_secret())
}

fn empty_token() -> SecretString {
    SecretString::from(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete_all_set() {
        assert!(HostConfig::new("tok", "alice", "notes").is_complete());
    }

    #[test]
    fn test_is_complete_rejects_any_empty_field() {
        assert!(!HostConfig::new("", "alice", "notes").is_complete());
        assert!(!HostConfig::new("tok", "", "notes").is_complete());
        assert!(!HostConfig::new("tok", "alice", "").is_complete());
        assert!(!HostConfig::default().is_complete());
    }

    #[test]
    fn test_serde_round_trip_uses_persisted_keys() {
        let json = r#"{
            "personal_access_token": "tok",
            "user_name": "alice",
            "repository_name": "notes"
        }"#;
        let config: HostConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.token(), "tok");
        assert_eq!(config.user_name, "alice");
        assert_eq!(config.repository_name, "notes");

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["personal_access_token"], "tok");
        assert_eq!(value["user_name"], "alice");
        assert_eq!(value["repository_name"], "notes");
    }

    #[test]
    fn test_missing_keys_deserialize_as_empty() {
        let config: HostConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.is_complete());
        assert!(config.token().is_empty());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = HostConfig::new("hunter2", "alice", "notes");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[redacted]"));
    }
}
