//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod auth_service;
mod idea_ports;
mod idea_repository;
mod ownership_migration;
mod password_service;
mod token_service;

pub use account_repository::{AccountPersistenceError, AccountRepository, CredentialRecord};
pub use auth_service::{AuthGrant, AuthService};
pub use idea_ports::{IdeaCommand, IdeaQuery};
pub use idea_repository::{IdeaPersistenceError, IdeaRepository};
pub use ownership_migration::OwnershipMigration;
pub use password_service::{PasswordHashError, PasswordService};
pub use token_service::{TokenIssueError, TokenService};
