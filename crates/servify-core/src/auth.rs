use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    /// Either a lowercase hex SHA-256 digest or an Argon2 PHC string.
    pub password_hash: String,
}

/// Unsalted hex SHA-256 of the password, the format the `users.password`
/// column has always held.
///
/// Known weakness: no per-user salt, so equal passwords share a digest.
/// New credentials should be provisioned with [`hash_password`].
pub fn legacy_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Hash a password with Argon2id for out-of-band provisioning.
///
/// `m_cost` is the memory cost in KiB.
pub fn hash_password(password: &str, m_cost: u32) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let params =
        Params::new(m_cost, 3, 1, Some(32)).map_err(|e| anyhow!("argon2 params: {}", e))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash_password: {}", e))?;
    Ok(hash.to_string())
}

/// Check `password` against a stored value in either supported format.
pub fn verify_password(password: &str, stored: &str) -> bool {
    if stored.starts_with("$argon2") {
        let parsed = match PasswordHash::new(stored) {
            Ok(h) => h,
            Err(_) => return false,
        };
        return Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
    }
    legacy_digest(password) == stored.trim().to_ascii_lowercase()
}

impl Credential {
    pub fn matches(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }
}
