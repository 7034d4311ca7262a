//! Driven port for account persistence adapters.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, Email};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// Insert collided with an existing account's unique email.
        DuplicateEmail { email: String } => "an account already exists for {email}",
    }
}

/// An account together with its password verifier, for credential checks.
///
/// The verifier is a PHC-format string and must never travel past the auth
/// service.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// The stored account.
    pub account: Account,
    /// Serialized password verifier (PHC string).
    pub password_hash: String,
}

/// Port abstraction over the account store.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account with the given verifier.
    ///
    /// A unique-email collision surfaces as
    /// [`AccountPersistenceError::DuplicateEmail`].
    async fn insert(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<Account, AccountPersistenceError>;

    /// Fetch an account and its verifier by email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<CredentialRecord>, AccountPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &AccountId)
        -> Result<Option<Account>, AccountPersistenceError>;
}
