use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AuthError;

const SESSION_FILE: &str = "session.json";
const SYNC_KEY_FILE: &str = "sync-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMethod {
    Password,
    GitHub,
    Google,
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthMethod::Password => "Password",
            AuthMethod::GitHub => "GitHub",
            AuthMethod::Google => "Google",
        })
    }
}

/// A logged-in operator. The sync key is deliberately not part of the
/// session: it is stored on its own and survives logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub method: AuthMethod,
}

/// On-disk persistence for the session and the sync key, rooted at the user
/// state directory.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Default location: `<config dir>/curator`, overridable via
    /// `CURATOR_STATE_DIR`.
    pub fn default_dir() -> PathBuf {
        std::env::var_os("CURATOR_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("curator")
            })
    }

    pub fn load_session(&self) -> Option<Session> {
        let raw = fs::read_to_string(self.dir.join(SESSION_FILE)).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(%err, "stored session is corrupt, ignoring it");
                None
            }
        }
    }

    pub fn save_session(&self, session: &Session) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(self.dir.join(SESSION_FILE), json)?;
        Ok(())
    }

    /// Logout removes the session but keeps the sync key.
    pub fn clear_session(&self) -> Result<(), AuthError> {
        remove_if_present(self.dir.join(SESSION_FILE))
    }

    pub fn load_sync_key(&self) -> Option<String> {
        let raw = fs::read_to_string(self.dir.join(SYNC_KEY_FILE)).ok()?;
        let key = raw.trim().to_string();
        (!key.is_empty()).then_some(key)
    }

    pub fn save_sync_key(&self, key: &str) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(SYNC_KEY_FILE), key)?;
        Ok(())
    }

    pub fn clear_sync_key(&self) -> Result<(), AuthError> {
        remove_if_present(self.dir.join(SYNC_KEY_FILE))
    }
}

fn remove_if_present(path: PathBuf) -> Result<(), AuthError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
