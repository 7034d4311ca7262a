//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations/` exactly; they drive
//! Diesel's compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered accounts.
    accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique email address.
        email -> Varchar,
        /// Argon2 PHC-format password verifier.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Captured ideas.
    ///
    /// Ownership is a nullable column pair: exactly one of `account_id` and
    /// `session_id` is set. The exclusivity is enforced in application code,
    /// not by a schema constraint.
    ideas (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Captured text, stored trimmed.
        content -> Text,
        /// Owning account, when claimed; cascades on account deletion.
        account_id -> Nullable<Uuid>,
        /// Owning anonymous session, until migrated to an account.
        session_id -> Nullable<Varchar>,
        /// Capture timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(ideas -> accounts (account_id));
diesel::allow_tables_to_appear_in_same_query!(accounts, ideas);
