//! Driven port for bearer credential issuing and validation.

use crate::domain::AccountId;

use super::define_port_error;

define_port_error! {
    /// Errors raised while minting a credential.
    pub enum TokenIssueError {
        /// The signing operation itself failed.
        Signing { message: String } => "credential signing failed: {message}",
    }
}

/// Port abstraction over the credential issuer/validator.
///
/// Credentials are stateless: validity is determined purely by signature and
/// expiry, with no revocation list. A leaked token therefore remains valid
/// until it expires naturally.
pub trait TokenService: Send + Sync {
    /// Mint a signed credential bound to the given account.
    fn issue(&self, account: &AccountId) -> Result<String, TokenIssueError>;

    /// Validate a presented credential and recover the account it is bound
    /// to.
    ///
    /// Returns `None` uniformly for a malformed token, a signature mismatch,
    /// or a past expiry — callers are given no sub-reason.
    fn validate(&self, token: &str) -> Option<AccountId>;
}
