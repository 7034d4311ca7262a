//! Driven-facing port for session-to-account ownership migration.
//!
//! Defined as a trait so the auth service can be exercised with a test
//! double; the production implementation is
//! [`MigrationService`](crate::domain::MigrationService).

use async_trait::async_trait;

use crate::domain::{AccountId, Error, SessionToken};

/// Reassigns anonymous ideas to a freshly authenticated account.
#[async_trait]
pub trait OwnershipMigration: Send + Sync {
    /// Move every idea owned by `session` to `account`.
    ///
    /// Returns the number of ideas moved; zero is a valid, non-error result.
    async fn migrate(&self, session: &SessionToken, account: &AccountId) -> Result<u64, Error>;
}
