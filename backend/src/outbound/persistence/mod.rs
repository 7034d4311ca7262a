//! Diesel/PostgreSQL persistence adapters.

mod diesel_account_repository;
mod diesel_idea_repository;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_idea_repository::DieselIdeaRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
