//! Driven port for password hashing and verification.

use super::define_port_error;

define_port_error! {
    /// Errors raised while deriving a password verifier.
    pub enum PasswordHashError {
        /// Hashing failed, e.g. parameter or salt generation problems.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Port abstraction over the password hashing scheme.
pub trait PasswordService: Send + Sync {
    /// Derive a serialized verifier from a plaintext password.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a plaintext password against a stored verifier.
    ///
    /// An unparsable verifier verifies as `false` rather than erroring; a
    /// corrupt stored hash must deny login, not crash it.
    fn verify(&self, password: &str, password_hash: &str) -> bool;
}
