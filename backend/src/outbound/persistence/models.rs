//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, ideas};

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    #[allow(dead_code)] // audit column, read back but not surfaced
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the ideas table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ideas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IdeaRow {
    pub id: Uuid,
    pub content: String,
    pub account_id: Option<Uuid>,
    pub session_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new idea records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ideas)]
pub(crate) struct NewIdeaRow<'a> {
    pub id: Uuid,
    pub content: &'a str,
    pub account_id: Option<Uuid>,
    pub session_id: Option<&'a str>,
}
