//! Driving ports for idea capture use-cases.
//!
//! Split into command and query halves so handlers depend only on the
//! operations they perform.

use async_trait::async_trait;

use crate::domain::{Error, Idea, IdeaContent, IdeaId, Owner};

/// Mutating idea operations, always scoped to a resolved owner.
#[async_trait]
pub trait IdeaCommand: Send + Sync {
    /// Capture a new idea for the given owner.
    async fn create(&self, content: IdeaContent, owner: &Owner) -> Result<Idea, Error>;

    /// Delete an idea the owner holds.
    ///
    /// A missing id and a foreign owner both surface as the same not-found
    /// error.
    async fn delete(&self, id: &IdeaId, owner: &Owner) -> Result<(), Error>;
}

/// Read-only idea operations, always scoped to a resolved owner.
#[async_trait]
pub trait IdeaQuery: Send + Sync {
    /// List the owner's ideas, newest first.
    async fn list(&self, owner: &Owner) -> Result<Vec<Idea>, Error>;
}
