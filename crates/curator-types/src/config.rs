use serde::{Deserialize, Serialize};

/// Operator configuration, conventionally a `config.json` next to the
/// console. Every field defaults so a partial or missing document still
/// yields a usable (read-only, no users) configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub users: Vec<StaticUser>,
    #[serde(default)]
    pub allowed_emails: Vec<String>,
    #[serde(default)]
    pub google_client_id: Option<String>,
    /// Optional embedded sync key. A key stored by the operator takes
    /// precedence over this one.
    #[serde(default)]
    pub github_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticUser {
    pub username: String,
    /// Argon2 PHC string, or a legacy unsalted hex SHA-256 digest.
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: AdminConfig =
            serde_json::from_str(r#"{"allowed_emails":["op@example.com"]}"#).unwrap();
        assert!(config.users.is_empty());
        assert_eq!(config.allowed_emails, vec!["op@example.com"]);
        assert!(config.google_client_id.is_none());
        assert!(config.github_token.is_none());
    }

    #[test]
    fn full_config_parses() {
        let config: AdminConfig = serde_json::from_str(
            r#"{
                "users": [{"username": "admin", "password_hash": "$argon2id$stub"}],
                "allowed_emails": ["op@example.com"],
                "google_client_id": "client-id.apps.example",
                "github_token": "ghp_embedded"
            }"#,
        )
        .unwrap();
        assert_eq!(config.users.len(), 1);
        assert_eq!(config.users[0].username, "admin");
        assert_eq!(config.github_token.as_deref(), Some("ghp_embedded"));
    }
}
