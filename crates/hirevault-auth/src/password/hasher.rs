//! Argon2id password hashing and verification.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use hirevault_core::error::AppError;

/// Hash of a random secret nobody knows, verified against when the account is absent.
static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Hashes and verifies passwords with Argon2id and a random salt.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        Self
    }

    /// Hash `password` into a PHC string.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Compare `password` with a stored PHC hash.
    ///
    /// A mismatch is `Ok(false)`. A stored hash that cannot be parsed is an
    /// internal error; login turns it into a uniform credential failure.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| AppError::internal(format!("Stored password hash is malformed: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Spend one Argon2 verification on a hash no password matches.
    ///
    /// Login calls this for unknown accounts so they cost as much as a wrong
    /// password.
    pub fn verify_decoy(&self, password: &str) {
        let decoy = DECOY_HASH.get_or_init(|| {
            let secret = SaltString::generate(&mut OsRng);
            self.hash_password(secret.as_str()).ok()
        });
        if let Some(hash) = decoy {
            let _ = self.verify_password(password, hash);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("correct horse", &hash).unwrap());
        assert!(!hasher.verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::new();
        assert_ne!(
            hasher.hash_password("same").unwrap(),
            hasher.hash_password("same").unwrap()
        );
    }

    #[test]
    fn test_decoy_hash_is_built_once() {
        let hasher = PasswordHasher::new();
        hasher.verify_decoy("guess");
        let first = DECOY_HASH.get().cloned().flatten().unwrap();
        assert!(first.starts_with("$argon2id$"));
        assert!(!hasher.verify_password("guess", &first).unwrap());

        hasher.verify_decoy("another guess");
        assert_eq!(DECOY_HASH.get().cloned().flatten().unwrap(), first);
    }

    #[test]
    fn test_malformed_hash_is_error() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify_password("anything", "plaintext").is_err());
    }
}
