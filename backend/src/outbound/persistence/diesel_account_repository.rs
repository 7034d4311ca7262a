//! PostgreSQL-backed `AccountRepository` implementation using Diesel.
//!
//! Duplicate registration is detected by the unique index on `email` rather
//! than a prior lookup, so two racing registrations cannot both succeed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{AccountPersistenceError, AccountRepository, CredentialRecord};
use crate::domain::{Account, AccountId, Email};

use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to account persistence errors.
fn map_pool_error(error: PoolError) -> AccountPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AccountPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to account persistence errors.
///
/// `email` is the address being written when a unique violation is possible.
fn map_diesel_error(error: diesel::result::Error, email: &Email) -> AccountPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AccountPersistenceError::duplicate_email(email.as_ref())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountPersistenceError::connection("database connection error")
        }
        _ => AccountPersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain account plus its verifier.
fn row_to_record(row: AccountRow) -> Result<CredentialRecord, AccountPersistenceError> {
    let email = Email::new(&row.email).map_err(|err| {
        AccountPersistenceError::query(format!("corrupted email in database: {err}"))
    })?;
    Ok(CredentialRecord {
        account: Account::new(AccountId::from_uuid(row.id), email, row.created_at),
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<Account, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewAccountRow {
            id: Uuid::new_v4(),
            email: email.as_ref(),
            password_hash,
        };

        let stored: AccountRow = diesel::insert_into(accounts::table)
            .values(&row)
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, email))?;

        row_to_record(stored).map(|record| record.account)
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<CredentialRecord>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, email))?;

        row.map(row_to_record).transpose()
    }

    async fn find_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .find(id.as_uuid())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| AccountPersistenceError::query(format!("database error: {err}")))?;

        row.map(row_to_record)
            .transpose()
            .map(|record| record.map(|record| record.account))
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion and error mapping; live queries are covered by the
    //! deployment's own database.
    use super::*;
    use chrono::Utc;

    fn account_row(email: &str) -> AccountRow {
        let now = Utc::now();
        AccountRow {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_conversion_preserves_fields() {
        let row = account_row("user@example.com");
        let id = row.id;
        let record = row_to_record(row).expect("valid row converts");
        assert_eq!(record.account.id().as_uuid(), id);
        assert_eq!(record.account.email().as_ref(), "user@example.com");
        assert_eq!(record.password_hash, "$argon2id$stub");
    }

    #[test]
    fn corrupted_email_is_a_query_error() {
        let row = account_row("not-an-email");
        let err = row_to_record(row).expect_err("corrupt email must fail");
        assert!(matches!(err, AccountPersistenceError::Query { .. }));
    }

    #[test]
    fn unique_violations_map_to_duplicate_email() {
        let email = Email::new("user@example.com").expect("valid email");
        let err = map_diesel_error(
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                Box::new("duplicate key value".to_owned()),
            ),
            &email,
        );
        assert_eq!(
            err,
            AccountPersistenceError::duplicate_email("user@example.com")
        );
    }

    #[test]
    fn other_database_errors_map_to_query() {
        let email = Email::new("user@example.com").expect("valid email");
        let err = map_diesel_error(diesel::result::Error::NotFound, &email);
        assert!(matches!(err, AccountPersistenceError::Query { .. }));
    }
}
