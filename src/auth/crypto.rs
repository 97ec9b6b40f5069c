//! # Credential Hashing
//!
//! Argon2id password hashes and random signing secrets.
//! Plaintext passwords never leave this module's callers.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::Engine;
use rand::RngCore;

use super::errors::{AuthError, AuthResult};

/// Minimum password requirements for admin accounts
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_number: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_number: false,
        }
    }
}

impl PasswordPolicy {
    pub fn validate(&self, password: &str) -> AuthResult<()> {
        if password.chars().count() < self.min_length {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }

        if self.require_number && !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AuthError::WeakPassword(
                "Password must contain at least one number".to_string(),
            ));
        }

        Ok(())
    }
}

/// Hash a password with a fresh salt
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

/// Check a password against a stored PHC string.
///
/// The comparison inside `argon2` is constant time.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// 256 random bits, URL-safe base64.
///
/// Used as the token signing secret when none is configured.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
