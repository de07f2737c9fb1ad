use curator_types::AdminConfig;

use crate::session::SessionStore;

/// What the core needs to know about the operator: an identity for display
/// and a write credential, either of which may be absent. Keeps the identity
/// backends (static users, GitHub, Google) out of the core crates entirely.
pub trait CredentialProvider {
    fn credentials(&self) -> Credentials;
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub identity: Option<String>,
    pub token: Option<String>,
}

/// Session-file-backed provider: identity from the stored session, sync key
/// from the stored key, falling back to a config-embedded token. A key the
/// operator stored explicitly always wins over the embedded one.
pub struct StoredCredentials<'a> {
    pub sessions: &'a SessionStore,
    pub config: &'a AdminConfig,
}

impl CredentialProvider for StoredCredentials<'_> {
    fn credentials(&self) -> Credentials {
        Credentials {
            identity: self.sessions.load_session().map(|s| s.username),
            token: self
                .sessions
                .load_sync_key()
                .or_else(|| self.config.github_token.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{AuthMethod, Session};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn scratch_store() -> SessionStore {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let dir = std::env::temp_dir().join(format!(
            "curator-provider-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        SessionStore::new(dir)
    }

    #[test]
    fn stored_key_wins_over_the_embedded_token() {
        let sessions = scratch_store();
        sessions.save_sync_key("ghp_stored").unwrap();
        let config = AdminConfig {
            github_token: Some("ghp_embedded".into()),
            ..AdminConfig::default()
        };
        let credentials = StoredCredentials { sessions: &sessions, config: &config }.credentials();
        assert_eq!(credentials.token.as_deref(), Some("ghp_stored"));
    }

    #[test]
    fn embedded_token_fills_in_when_nothing_is_stored() {
        let sessions = scratch_store();
        sessions
            .save_session(&Session {
                username: "op".into(),
                method: AuthMethod::Google,
            })
            .unwrap();
        let config = AdminConfig {
            github_token: Some("ghp_embedded".into()),
            ..AdminConfig::default()
        };
        let credentials = StoredCredentials { sessions: &sessions, config: &config }.credentials();
        assert_eq!(credentials.identity.as_deref(), Some("op"));
        assert_eq!(credentials.token.as_deref(), Some("ghp_embedded"));
    }

    #[test]
    fn everything_absent_is_a_read_only_anonymous_operator() {
        let sessions = scratch_store();
        let config = AdminConfig::default();
        let credentials = StoredCredentials { sessions: &sessions, config: &config }.credentials();
        assert!(credentials.identity.is_none());
        assert!(credentials.token.is_none());
    }
}
