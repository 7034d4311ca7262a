//! Driven port for idea persistence adapters.

use async_trait::async_trait;

use crate::domain::{AccountId, Idea, IdeaContent, IdeaId, Owner, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by idea repository adapters.
    pub enum IdeaPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "idea repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "idea repository query failed: {message}",
    }
}

/// Port abstraction over the idea store.
///
/// Every operation is scoped by an [`Owner`]; the adapter lowers the tagged
/// union to its nullable column pair and re-raises it when reading rows back.
#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// Persist a new idea for the given owner and return the stored record.
    async fn insert(
        &self,
        content: &IdeaContent,
        owner: &Owner,
    ) -> Result<Idea, IdeaPersistenceError>;

    /// List all ideas belonging exactly to the given owner, newest first.
    async fn list_by_owner(&self, owner: &Owner) -> Result<Vec<Idea>, IdeaPersistenceError>;

    /// Delete the idea only when both id and owner match.
    ///
    /// Returns `false` when nothing matched — the caller cannot tell a
    /// missing id from a foreign owner, which keeps existence unprobeable.
    async fn delete(&self, id: &IdeaId, owner: &Owner) -> Result<bool, IdeaPersistenceError>;

    /// Reassign every idea owned by `session` (and no account) to `account`.
    ///
    /// A single conditional update; returns the number of rows moved, with
    /// zero a valid outcome.
    async fn reassign_session(
        &self,
        session: &SessionToken,
        account: &AccountId,
    ) -> Result<u64, IdeaPersistenceError>;
}
