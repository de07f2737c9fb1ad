use std::path::Path;

use curator_types::AdminConfig;
use tracing::{info, warn};

/// Load the operator config, degrading to defaults when the file is missing
/// or unreadable — the console still works read-only with no users
/// provisioned, which is how a fresh deployment starts out.
pub fn load_config(path: &Path) -> AdminConfig {
    match std::fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str::<AdminConfig>(&raw) {
            Ok(config) => {
                info!(path = %path.display(), users = config.users.len(), "operator config loaded");
                config
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "operator config is invalid JSON, using defaults");
                AdminConfig::default()
            }
        },
        Err(err) => {
            warn!(path = %path.display(), %err, "operator config missing, using defaults");
            AdminConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_degrades_to_defaults() {
        let config = load_config(&PathBuf::from("/nonexistent/config.json"));
        assert_eq!(config, AdminConfig::default());
    }
}
