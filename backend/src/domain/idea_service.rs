//! Idea capture use-cases over the idea repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{IdeaCommand, IdeaPersistenceError, IdeaQuery, IdeaRepository};
use crate::domain::{Error, Idea, IdeaContent, IdeaId, Owner};

/// Repository-backed implementation of [`IdeaCommand`] and [`IdeaQuery`].
///
/// Callers must resolve an owner before reaching this service; an
/// unidentified request is rejected at the HTTP boundary and never gets
/// here.
#[derive(Clone)]
pub struct IdeaService {
    ideas: Arc<dyn IdeaRepository>,
}

impl IdeaService {
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
impl IdeaCommand for IdeaService {
    async fn create(&self, content: IdeaContent, owner: &Owner) -> Result<Idea, Error> {
        self.ideas
            .insert(&content, owner)
            .await
            .map_err(map_persistence_error)
    }

    async fn delete(&self, id: &IdeaId, owner: &Owner) -> Result<(), Error> {
        let removed = self
            .ideas
            .delete(id, owner)
            .await
            .map_err(map_persistence_error)?;
        if removed {
            Ok(())
        } else {
            // A foreign owner and a missing id look identical to the caller;
            // the distinction only exists in this log line.
            debug!(%id, %owner, "delete matched no idea for this owner");
            Err(Error::not_found("idea not found"))
        }
    }
}

#[async_trait]
impl IdeaQuery for IdeaService {
    async fn list(&self, owner: &Owner) -> Result<Vec<Idea>, Error> {
        self.ideas
            .list_by_owner(owner)
            .await
            .map_err(map_persistence_error)
    }
}
