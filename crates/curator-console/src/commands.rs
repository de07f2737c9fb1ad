use std::path::PathBuf;

use anyhow::Context;
use curator_auth::{AuthMethod, CredentialProvider, Session, SessionStore, StoredCredentials};
use curator_moderation::Moderation;
use curator_store::{DocumentStore, GithubContentStore, StoreConfig};
use curator_types::{Bucket, Message};

use crate::cli::{Cli, Commands, LoginMethod, SyncKeyAction};
use crate::render;

/// Deployment knobs, environment-driven (a `.env` next to the binary works
/// too). Owner and repo stay optional here: login and provisioning commands
/// never need them.
struct Env {
    api_base: String,
    owner: Option<String>,
    repo: Option<String>,
    data_dir: String,
    raw_base: Option<String>,
    config_path: PathBuf,
}

impl Env {
    fn load() -> Self {
        Self {
            api_base: var_or("CURATOR_API_BASE", "https://api.github.com"),
            owner: std::env::var("CURATOR_OWNER").ok(),
            repo: std::env::var("CURATOR_REPO").ok(),
            data_dir: var_or("CURATOR_DATA_DIR", "data"),
            raw_base: std::env::var("CURATOR_RAW_BASE").ok(),
            config_path: PathBuf::from(var_or("CURATOR_CONFIG", "config.json")),
        }
    }

    fn store_config(&self, token: Option<String>) -> anyhow::Result<StoreConfig> {
        let owner = self.owner.clone().context("CURATOR_OWNER is not set")?;
        let repo = self.repo.clone().context("CURATOR_REPO is not set")?;
        let raw_base = self
            .raw_base
            .clone()
            .unwrap_or_else(|| format!("https://raw.githubusercontent.com/{owner}/{repo}/main"));
        Ok(StoreConfig {
            api_base: self.api_base.clone(),
            owner,
            repo,
            data_dir: self.data_dir.clone(),
            raw_base,
            token,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let env = Env::load();
    let sessions = SessionStore::new(SessionStore::default_dir());

    match cli.command {
        Commands::Login { method } => login(&env, &sessions, method, cli.json).await,
        Commands::Logout => {
            sessions.clear_session()?;
            if cli.json {
                println!("{}", serde_json::json!({ "logged_out": true }));
            } else {
                println!("Logged out");
            }
            Ok(())
        }
        Commands::SyncKey { action } => sync_key(&sessions, action, cli.json),
        Commands::HashPassword { password } => {
            let hash = curator_auth::password::hash(&password)?;
            if cli.json {
                println!("{}", serde_json::json!({ "password_hash": hash }));
            } else {
                println!("{hash}");
            }
            Ok(())
        }
        Commands::List { bucket } => {
            let moderation = open(&env, &sessions).await?;
            let messages: Vec<Message> = match moderation.repository().bucket(bucket) {
                Some(list) => list.to_vec(),
                // The rejected log is not mirrored; read it straight off the
                // store when asked for.
                None => moderation.store().read(Bucket::Rejected).await.0.messages,
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&messages)?);
            } else {
                print!("{}", render::bucket_listing(bucket, &messages));
            }
            Ok(())
        }
        Commands::Show { id } => {
            let moderation = open(&env, &sessions).await?;
            let (bucket, message) = moderation
                .repository()
                .find_anywhere(&id)
                .with_context(|| format!("no message with id {id}"))?;
            if cli.json {
                let detail = serde_json::json!({ "bucket": bucket.as_str(), "message": message });
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print!("{}", render::message_detail(bucket, message));
            }
            Ok(())
        }
        Commands::Approve { id, tags } => {
            let mut moderation = open(&env, &sessions).await?;
            let message = moderation.approve(&id, &tags).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "approved": message }))?);
            } else {
                println!("Message approved and saved!");
            }
            Ok(())
        }
        Commands::Reject { id } => {
            let mut moderation = open(&env, &sessions).await?;
            let message = moderation.reject(&id).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "rejected": message }))?);
            } else {
                println!("Message rejected");
            }
            Ok(())
        }
        Commands::Stats => {
            let moderation = open(&env, &sessions).await?;
            let repository = moderation.repository();
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "pending": repository.pending.len(),
                        "approved": repository.approved.len(),
                        "published": repository.published.len(),
                    })
                );
            } else {
                println!("Pending:    {}", repository.pending.len());
                println!("Approved:   {}", repository.approved.len());
                println!("Published:  {}", repository.published.len());
            }
            Ok(())
        }
    }
}

/// Everything a data command needs: a session, the operator config, a store
/// wired with whatever sync key is available, and a loaded snapshot.
async fn open(env: &Env, sessions: &SessionStore) -> anyhow::Result<Moderation<GithubContentStore>> {
    sessions
        .load_session()
        .context("not logged in (run `curator login`)")?;
    let config = curator_auth::config::load_config(&env.config_path);
    let credentials = StoredCredentials { sessions, config: &config }.credentials();
    let store = GithubContentStore::new(env.store_config(credentials.token)?)?;
    let mut moderation = Moderation::new(store);
    moderation.reload().await;
    Ok(moderation)
}

async fn login(
    env: &Env,
    sessions: &SessionStore,
    method: LoginMethod,
    json: bool,
) -> anyhow::Result<()> {
    let config = curator_auth::config::load_config(&env.config_path);
    let (username, auth_method) = match method {
        LoginMethod::Password { username, password } => (
            curator_auth::password::login_with_password(&config, &username, &password)?,
            AuthMethod::Password,
        ),
        LoginMethod::Github { token } => {
            let login = curator_auth::github::verify_token(&env.api_base, &token).await?;
            // The verified token is exactly the credential writes need.
            sessions.save_sync_key(&token)?;
            (login, AuthMethod::GitHub)
        }
        LoginMethod::Google { id_token } => (
            curator_auth::google::login_with_id_token(&config, &id_token)?,
            AuthMethod::Google,
        ),
    };
    sessions.save_session(&Session {
        username: username.clone(),
        method: auth_method,
    })?;

    let credentials = StoredCredentials { sessions, config: &config }.credentials();
    let sync = credentials.token.is_some();
    if json {
        println!(
            "{}",
            serde_json::json!({
                "username": username,
                "method": auth_method.to_string(),
                "sync": sync,
            })
        );
    } else {
        println!("Welcome, {username} (via {auth_method})");
        if sync {
            println!("Sync active: changes will be saved.");
        } else {
            println!("Read-only: add a sync key with `curator sync-key set` to save changes.");
        }
    }
    Ok(())
}

fn sync_key(sessions: &SessionStore, action: SyncKeyAction, json: bool) -> anyhow::Result<()> {
    match action {
        SyncKeyAction::Set { token } => {
            sessions.save_sync_key(&token)?;
            if json {
                println!("{}", serde_json::json!({ "sync": true }));
            } else {
                println!("Sync key saved");
            }
        }
        SyncKeyAction::Show => {
            let present = sessions.load_sync_key().is_some();
            if json {
                println!("{}", serde_json::json!({ "sync": present }));
            } else if present {
                println!("Sync active");
            } else {
                println!("Sync disabled (read-only)");
            }
        }
        SyncKeyAction::Clear => {
            sessions.clear_sync_key()?;
            if json {
                println!("{}", serde_json::json!({ "sync": false }));
            } else {
                println!("Sync key removed");
            }
        }
    }
    Ok(())
}
