//! Session-to-account ownership migration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{IdeaPersistenceError, IdeaRepository, OwnershipMigration};
use crate::domain::{AccountId, Error, SessionToken};

/// Reassigns anonymous ideas to an account at authentication time.
///
/// The reassignment is one conditional update against the store, executed
/// without a transaction or any cross-request locking. Two devices sharing a
/// session token can therefore race concurrent logins against different
/// accounts, each moving whatever subset of the ideas it reaches first, with
/// no detectable conflict. The session token is a client-local convenience,
/// not a security boundary, so the split is accepted rather than serialising
/// authentication. Callers must not add isolation here without changing the
/// documented contract.
#[derive(Clone)]
pub struct MigrationService {
    ideas: Arc<dyn IdeaRepository>,
}

impl MigrationService {
    /// Create a new service backed by an idea repository.
    pub fn new(ideas: Arc<dyn IdeaRepository>) -> Self {
        Self { ideas }
    }
}

fn map_persistence_error(error: IdeaPersistenceError) -> Error {
    match error {
        IdeaPersistenceError::Connection { message } => Error::service_unavailable(message),
        IdeaPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl OwnershipMigration for MigrationService {
    async fn migrate(&self, session: &SessionToken, account: &AccountId) -> Result<u64, Error> {
        let moved = self
            .ideas
            .reassign_session(session, account)
            .await
            .map_err(map_persistence_error)?;
        debug!(%account, moved, "migrated session ideas to account");
        Ok(moved)
    }
}
