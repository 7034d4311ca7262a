//! Account aggregate and its identifier/email newtypes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the account constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email lacks an `@` or is otherwise not an address.
    InvalidEmail,
    /// Email exceeds the storable length.
    EmailTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmailTooLong { max } => {
                write!(f, "email must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Wrap an existing UUID, typically read back from the store.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum accepted email length in characters.
pub const EMAIL_MAX: usize = 254;

/// Validated email address.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - Contains an `@` separating a non-empty local part and domain.
/// - At most [`EMAIL_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`] from raw input.
    pub fn new(email: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(AccountValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered account.
///
/// The password verifier is deliberately absent: it never leaves the
/// persistence port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    email: Email,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Build an [`Account`] from validated components.
    pub fn new(id: AccountId, email: Email, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            created_at,
        }
    }

    /// Stable account identifier.
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Unique email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Registration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", AccountValidationError::EmptyEmail)]
    #[case("   ", AccountValidationError::EmptyEmail)]
    #[case("no-at-sign", AccountValidationError::InvalidEmail)]
    #[case("@example.com", AccountValidationError::InvalidEmail)]
    #[case("user@", AccountValidationError::InvalidEmail)]
    fn invalid_emails(#[case] raw: &str, #[case] expected: AccountValidationError) {
        let err = Email::new(raw).expect_err("invalid email must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn oversized_email_is_rejected() {
        let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
        let err = Email::new(&raw).expect_err("oversized email must fail");
        assert_eq!(err, AccountValidationError::EmailTooLong { max: EMAIL_MAX });
    }

    #[rstest]
    #[case("user@example.com")]
    #[case("  padded@example.com  ")]
    fn valid_emails_are_trimmed(#[case] raw: &str) {
        let email = Email::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), raw.trim());
    }

    #[test]
    fn account_ids_are_distinct() {
        assert_ne!(AccountId::random(), AccountId::random());
    }
}
