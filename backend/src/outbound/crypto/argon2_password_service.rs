//! Argon2-backed implementation of the password service port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::domain::ports::{PasswordHashError, PasswordService};

/// Argon2id hashing with the crate's default parameters, serialized as PHC
/// strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordService;

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, password_hash: &str) -> bool {
        // An unparsable stored hash denies the login instead of erroring.
        PasswordHash::new(password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}
