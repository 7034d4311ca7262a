//! Driving port for registration, login, and profile use-cases.
//!
//! Inbound adapters call this to authenticate without knowing the backing
//! infrastructure, which keeps HTTP handler tests deterministic: they can
//! substitute a test double instead of wiring persistence and crypto.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, AuthCredentials, Error, SessionToken};

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    /// Signed bearer credential for subsequent requests.
    pub token: String,
    /// The authenticated account.
    pub account: Account,
}

/// Domain use-case port for authentication.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a new account, migrate any session-owned ideas, and issue a
    /// credential.
    async fn register(
        &self,
        credentials: &AuthCredentials,
        session: Option<&SessionToken>,
    ) -> Result<AuthGrant, Error>;

    /// Authenticate existing credentials, migrate any session-owned ideas,
    /// and issue a credential.
    async fn login(
        &self,
        credentials: &AuthCredentials,
        session: Option<&SessionToken>,
    ) -> Result<AuthGrant, Error>;

    /// Fetch the profile of an authenticated account.
    async fn profile(&self, account: &AccountId) -> Result<Account, Error>;
}
