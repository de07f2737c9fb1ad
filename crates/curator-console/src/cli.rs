use clap::{Parser, Subcommand};
use curator_types::Bucket;

#[derive(Parser, Debug)]
#[command(
    name = "curator",
    version,
    about = "Moderation console for GitHub-hosted message collections"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store a session
    Login {
        #[command(subcommand)]
        method: LoginMethod,
    },
    /// Drop the stored session (the sync key is kept)
    Logout,
    /// Manage the sync key that authorizes writes
    SyncKey {
        #[command(subcommand)]
        action: SyncKeyAction,
    },
    /// List a bucket
    List {
        #[arg(default_value_t = Bucket::Pending)]
        bucket: Bucket,
    },
    /// Show one message in full
    Show { id: String },
    /// Approve a pending message
    Approve {
        id: String,
        #[arg(long, value_delimiter = ',', help = "Tags to stamp on the message")]
        tags: Vec<String>,
    },
    /// Reject a pending message
    Reject { id: String },
    /// Per-bucket message counts
    Stats,
    /// Hash a password for a config.json user entry
    HashPassword { password: String },
}

#[derive(Subcommand, Debug)]
pub enum LoginMethod {
    /// Static user list with hashed passwords
    Password {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CURATOR_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Personal access token, verified against the identity endpoint
    Github {
        #[arg(long)]
        token: String,
    },
    /// Google ID token, gated by the email allow-list
    Google {
        #[arg(long)]
        id_token: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SyncKeyAction {
    /// Store a sync key
    Set { token: String },
    /// Report whether a sync key is configured
    Show,
    /// Remove the stored sync key
    Clear,
}
