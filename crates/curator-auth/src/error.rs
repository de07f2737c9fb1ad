use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong password. Deliberately one message for both.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("email not authorized: {0}")]
    EmailNotAllowed(String),

    #[error("the identity endpoint rejected the token")]
    TokenRejected,

    #[error("identity token could not be decoded")]
    BadIdToken,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("session state could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
