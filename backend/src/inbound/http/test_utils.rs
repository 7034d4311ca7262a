//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_web::web;

use crate::domain::test_support::{InMemoryAccountRepository, InMemoryIdeaRepository};
use crate::domain::{AccountAuthService, IdeaService, MigrationService};
use crate::inbound::http::state::HttpState;
use crate::outbound::crypto::Argon2PasswordService;
use crate::outbound::token::JwtTokenService;

/// Signing secret shared by every handler test.
pub(crate) const TEST_SECRET: &[u8] = b"handler-test-secret";

/// Build a fully wired [`HttpState`] over in-memory stores.
///
/// Returns the idea repository alongside so tests can assert on stored
/// state directly.
pub(crate) fn test_state() -> (web::Data<HttpState>, Arc<InMemoryIdeaRepository>) {
    let ideas = Arc::new(InMemoryIdeaRepository::default());
    let accounts = Arc::new(InMemoryAccountRepository::default());
    let tokens = Arc::new(JwtTokenService::new(TEST_SECRET));
    let auth = Arc::new(AccountAuthService::new(
        accounts,
        Arc::new(Argon2PasswordService),
        tokens.clone(),
        Arc::new(MigrationService::new(ideas.clone())),
    ));
    let idea_service = Arc::new(IdeaService::new(ideas.clone()));
    let state = HttpState::new(auth, idea_service.clone(), idea_service, tokens);
    (web::Data::new(state), ideas)
}
