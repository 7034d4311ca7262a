//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthService, IdeaCommand, IdeaQuery, TokenService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, login, and profile use-cases.
    pub auth: Arc<dyn AuthService>,
    /// Idea mutations.
    pub ideas: Arc<dyn IdeaCommand>,
    /// Idea reads.
    pub idea_query: Arc<dyn IdeaQuery>,
    /// Credential validation for the identity extractors.
    pub tokens: Arc<dyn TokenService>,
}

impl HttpState {
    /// Construct state from its port implementations.
    pub fn new(
        auth: Arc<dyn AuthService>,
        ideas: Arc<dyn IdeaCommand>,
        idea_query: Arc<dyn IdeaQuery>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            auth,
            ideas,
            idea_query,
            tokens,
        }
    }
}
