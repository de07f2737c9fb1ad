use serde::Deserialize;
use tracing::info;

use crate::error::AuthError;

const USER_AGENT: &str = concat!("curator/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct IdentityResponse {
    login: String,
}

/// Verify a pasted personal access token against the identity endpoint and
/// return the account login. On success the token doubles as the sync key.
pub async fn verify_token(api_base: &str, token: &str) -> Result<String, AuthError> {
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let response = client
        .get(format!("{api_base}/user"))
        .header("Authorization", format!("token {token}"))
        .header("Accept", "application/vnd.github.v3+json")
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(AuthError::TokenRejected);
    }
    let identity: IdentityResponse = response.json().await?;
    info!(login = %identity.login, "token verified");
    Ok(identity.login)
}
