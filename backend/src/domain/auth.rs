//! Authentication primitives shared by registration and login.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::account::{AccountValidationError, Email};

/// Minimum accepted password length in characters.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when register/login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email failed validation.
    Email(AccountValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Password is shorter than [`PASSWORD_MIN`] characters.
    PasswordTooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<AccountValidationError> for CredentialsValidationError {
    fn from(err: AccountValidationError) -> Self {
        Self::Email(err)
    }
}

/// Validated email/password pair used by the auth service.
///
/// ## Invariants
/// - `email` satisfies the [`Email`] newtype rules.
/// - `password` is non-empty, at least [`PASSWORD_MIN`] characters, and
///   retains caller-provided whitespace to avoid surprising credential
///   comparisons. The buffer is zeroized on drop.
#[derive(Debug, Clone)]
pub struct AuthCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl AuthCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address suitable for account lookups.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "secret1")]
    #[case("not-an-email", "secret1")]
    fn bad_email_is_rejected(#[case] email: &str, #[case] password: &str) {
        let err = AuthCredentials::try_from_parts(email, password)
            .expect_err("invalid email must fail");
        assert!(matches!(err, CredentialsValidationError::Email(_)));
    }

    #[test]
    fn empty_password_is_rejected() {
        let err = AuthCredentials::try_from_parts("user@example.com", "")
            .expect_err("empty password must fail");
        assert_eq!(err, CredentialsValidationError::EmptyPassword);
    }

    #[rstest]
    #[case("12345")]
    #[case("ab")]
    fn short_password_is_rejected(#[case] password: &str) {
        let err = AuthCredentials::try_from_parts("user@example.com", password)
            .expect_err("short password must fail");
        assert_eq!(
            err,
            CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN }
        );
    }

    #[rstest]
    #[case("user@example.com", "secret1")]
    #[case("  padded@example.com ", "correct horse battery staple")]
    fn valid_credentials(#[case] email: &str, #[case] password: &str) {
        let creds =
            AuthCredentials::try_from_parts(email, password).expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), email.trim());
        assert_eq!(creds.password(), password);
    }
}
