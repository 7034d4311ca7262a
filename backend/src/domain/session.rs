//! Anonymous session capability token.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted session token length in characters.
pub const SESSION_TOKEN_MAX: usize = 128;

/// Validation errors returned by [`SessionToken::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTokenError {
    /// Token was missing or blank once trimmed.
    Empty,
    /// Token exceeds [`SESSION_TOKEN_MAX`] characters.
    TooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// Token contains control or non-ASCII characters.
    InvalidCharacters,
}

impl fmt::Display for SessionTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "session token must not be empty"),
            Self::TooLong { max } => {
                write!(f, "session token must be at most {max} characters")
            }
            Self::InvalidCharacters => {
                write!(f, "session token must be printable ASCII")
            }
        }
    }
}

impl std::error::Error for SessionTokenError {}

/// Client-generated opaque identifier for an anonymous actor.
///
/// A bare capability: the server never stores it as an entity and never
/// authenticates it. Whoever presents the string owns the ideas filed
/// under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Validate and construct a [`SessionToken`] from raw header input.
    pub fn new(token: impl AsRef<str>) -> Result<Self, SessionTokenError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SessionTokenError::Empty);
        }
        if trimmed.chars().count() > SESSION_TOKEN_MAX {
            return Err(SessionTokenError::TooLong {
                max: SESSION_TOKEN_MAX,
            });
        }
        if !trimmed.chars().all(|c| c.is_ascii_graphic()) {
            return Err(SessionTokenError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionTokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
