//! PostgreSQL-backed `IdeaRepository` implementation using Diesel.
//!
//! Lowers the owner tagged union to the nullable `(account_id, session_id)`
//! column pair on the way in and re-raises it on the way out. A row with
//! both or neither column set violates the ownership exclusivity and is
//! reported as corruption rather than mapped to a domain value.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{IdeaPersistenceError, IdeaRepository};
use crate::domain::{AccountId, Idea, IdeaContent, IdeaId, Owner, SessionToken};

use super::models::{IdeaRow, NewIdeaRow};
use super::pool::{DbPool, PoolError};
use super::schema::ideas;

/// Diesel-backed implementation of the `IdeaRepository` port.
#[derive(Clone)]
pub struct DieselIdeaRepository {
    pool: DbPool,
}

impl DieselIdeaRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to idea persistence errors.
fn map_pool_error(error: PoolError) -> IdeaPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            IdeaPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to idea persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> IdeaPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            IdeaPersistenceError::connection("database connection error")
        }
        _ => IdeaPersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain idea, re-raising the owner union.
fn row_to_idea(row: IdeaRow) -> Result<Idea, IdeaPersistenceError> {
    let owner = match (row.account_id, row.session_id) {
        (Some(account), None) => Owner::Account(AccountId::from_uuid(account)),
        (None, Some(session)) => {
            let token = SessionToken::new(&session).map_err(|err| {
                IdeaPersistenceError::query(format!("corrupted session token in database: {err}"))
            })?;
            Owner::Session(token)
        }
        (Some(_), Some(_)) | (None, None) => {
            return Err(IdeaPersistenceError::query(
                "idea row violates owner exclusivity",
            ));
        }
    };
    let content = IdeaContent::new(&row.content).map_err(|err| {
        IdeaPersistenceError::query(format!("corrupted idea content in database: {err}"))
    })?;
    Ok(Idea::new(
        IdeaId::from_uuid(row.id),
        content,
        owner,
        row.created_at,
    ))
}

/// Lower the owner union to the nullable column pair.
fn owner_columns(owner: &Owner) -> (Option<Uuid>, Option<&str>) {
    match owner {
        Owner::Account(id) => (Some(id.as_uuid()), None),
        Owner::Session(token) => (None, Some(token.as_ref())),
    }
}

#[async_trait]
impl IdeaRepository for DieselIdeaRepository {
    async fn insert(
        &self,
        content: &IdeaContent,
        owner: &Owner,
    ) -> Result<Idea, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (account_id, session_id) = owner_columns(owner);
        let row = NewIdeaRow {
            id: Uuid::new_v4(),
            content: content.as_ref(),
            account_id,
            session_id,
        };

        let stored: IdeaRow = diesel::insert_into(ideas::table)
            .values(&row)
            .returning(IdeaRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_idea(stored)
    }

    async fn list_by_owner(&self, owner: &Owner) -> Result<Vec<Idea>, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IdeaRow> = match owner {
            Owner::Account(id) => {
                ideas::table
                    .filter(ideas::account_id.eq(id.as_uuid()))
                    .order(ideas::created_at.desc())
                    .select(IdeaRow::as_select())
                    .load(&mut conn)
                    .await
            }
            // Session reads also require the account column to be unset so a
            // migrated idea never shows up under its old session again.
            Owner::Session(token) => {
                ideas::table
                    .filter(
                        ideas::session_id
                            .eq(token.as_ref())
                            .and(ideas::account_id.is_null()),
                    )
                    .order(ideas::created_at.desc())
                    .select(IdeaRow::as_select())
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_idea).collect()
    }

    async fn delete(&self, id: &IdeaId, owner: &Owner) -> Result<bool, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = match owner {
            Owner::Account(account) => {
                diesel::delete(
                    ideas::table.filter(
                        ideas::id
                            .eq(id.as_uuid())
                            .and(ideas::account_id.eq(account.as_uuid())),
                    ),
                )
                .execute(&mut conn)
                .await
            }
            Owner::Session(token) => {
                diesel::delete(
                    ideas::table.filter(
                        ideas::id
                            .eq(id.as_uuid())
                            .and(ideas::session_id.eq(token.as_ref()))
                            .and(ideas::account_id.is_null()),
                    ),
                )
                .execute(&mut conn)
                .await
            }
        }
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn reassign_session(
        &self,
        session: &SessionToken,
        account: &AccountId,
    ) -> Result<u64, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // One conditional UPDATE, no transaction: per-statement atomicity is
        // all the isolation this operation gets. Concurrent logins sharing a
        // session token may each move a subset of the rows.
        let moved = diesel::update(
            ideas::table.filter(
                ideas::session_id
                    .eq(session.as_ref())
                    .and(ideas::account_id.is_null()),
            ),
        )
        .set((
            ideas::account_id.eq(Some(account.as_uuid())),
            ideas::session_id.eq(None::<String>),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(moved as u64)
    }
}
