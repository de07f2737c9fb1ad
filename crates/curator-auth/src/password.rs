use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use curator_types::AdminConfig;
use sha2::{Digest, Sha256};

use crate::error::AuthError;

/// Verify a password against a stored hash: an Argon2 PHC string, or the
/// legacy unsalted hex SHA-256 digest older configs carry. A malformed hash
/// verifies as false rather than erroring — a broken user entry must not be
/// distinguishable from a wrong password.
pub fn verify(password: &str, stored: &str) -> bool {
    if stored.starts_with('$') {
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    } else {
        let digest = hex::encode(Sha256::digest(password.as_bytes()));
        digest.eq_ignore_ascii_case(stored)
    }
}

/// Hash a password with Argon2id for a `config.json` user entry.
pub fn hash(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Static-user login: username lookup plus password verification against
/// the configured user list.
pub fn login_with_password(
    config: &AdminConfig,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let user = config
        .users
        .iter()
        .find(|u| u.username == username)
        .ok_or(AuthError::InvalidCredentials)?;
    if verify(password, &user.password_hash) {
        Ok(user.username.clone())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_types::StaticUser;

    #[test]
    fn argon2_round_trip() {
        let stored = hash("hunter2!").unwrap();
        assert!(stored.starts_with("$argon2"));
        assert!(verify("hunter2!", &stored));
        assert!(!verify("hunter3!", &stored));
    }

    #[test]
    fn legacy_sha256_digest_verifies() {
        // sha256("password")
        let stored = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";
        assert!(verify("password", stored));
        assert!(verify("password", &stored.to_uppercase()));
        assert!(!verify("Password", stored));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify("anything", "$argon2id$not-a-real-hash"));
        assert!(!verify("anything", "zz-not-hex"));
    }

    #[test]
    fn login_checks_username_and_password() {
        let config = AdminConfig {
            users: vec![StaticUser {
                username: "admin".into(),
                password_hash: hash("s3cret").unwrap(),
            }],
            ..AdminConfig::default()
        };
        assert_eq!(login_with_password(&config, "admin", "s3cret").unwrap(), "admin");
        assert!(matches!(
            login_with_password(&config, "admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            login_with_password(&config, "nobody", "s3cret"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
