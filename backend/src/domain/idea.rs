//! Idea aggregate: a short piece of captured text scoped to one owner.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::owner::Owner;

/// Maximum accepted idea content length in Unicode scalar values.
pub const IDEA_CONTENT_MAX: usize = 1000;

/// Validation errors returned by [`IdeaContent::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaValidationError {
    /// Content was missing or blank once trimmed.
    EmptyContent,
    /// Content exceeds [`IDEA_CONTENT_MAX`] characters after trimming.
    ContentTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
}

impl fmt::Display for IdeaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::ContentTooLong { max } => {
                write!(f, "content must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for IdeaValidationError {}

/// Stable idea identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaId(Uuid);

impl IdeaId {
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

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated idea text.
///
/// ## Invariants
/// - Stored trimmed of surrounding whitespace.
/// - Non-empty after trimming.
/// - At most [`IDEA_CONTENT_MAX`] characters, counted as Unicode scalar
///   values of the trimmed form.
///
/// # Examples
/// ```
/// use backend::domain::IdeaContent;
///
/// let content = IdeaContent::new("  Launch v2  ").expect("valid content");
/// assert_eq!(content.as_ref(), "Launch v2");
/// assert!(IdeaContent::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdeaContent(String);

impl IdeaContent {
    /// Validate and construct [`IdeaContent`] from raw input.
    pub fn new(content: impl AsRef<str>) -> Result<Self, IdeaValidationError> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdeaValidationError::EmptyContent);
        }
        if trimmed.chars().count() > IDEA_CONTENT_MAX {
            return Err(IdeaValidationError::ContentTooLong {
                max: IDEA_CONTENT_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for IdeaContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IdeaContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<IdeaContent> for String {
    fn from(value: IdeaContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for IdeaContent {
    type Error = IdeaValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Captured idea with its single owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idea {
    id: IdeaId,
    content: IdeaContent,
    owner: Owner,
    created_at: DateTime<Utc>,
}

impl Idea {
    /// Build an [`Idea`] from validated components.
    pub fn new(id: IdeaId, content: IdeaContent, owner: Owner, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content,
            owner,
            created_at,
        }
    }

    /// Stable idea identifier.
    pub fn id(&self) -> &IdeaId {
        &self.id
    }

    /// Captured text.
    pub fn content(&self) -> &IdeaContent {
        &self.content
    }

    /// The account or session this idea belongs to.
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Capture timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", IdeaValidationError::EmptyContent)]
    #[case("   ", IdeaValidationError::EmptyContent)]
    #[case("\t\n", IdeaValidationError::EmptyContent)]
    fn blank_content_is_rejected(#[case] raw: &str, #[case] expected: IdeaValidationError) {
        let err = IdeaContent::new(raw).expect_err("blank content must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn content_at_the_limit_is_accepted() {
        let raw = "x".repeat(IDEA_CONTENT_MAX);
        let content = IdeaContent::new(&raw).expect("content at the limit");
        assert_eq!(content.as_ref().chars().count(), IDEA_CONTENT_MAX);
    }

    #[test]
    fn content_over_the_limit_is_rejected() {
        let raw = "x".repeat(IDEA_CONTENT_MAX + 1);
        let err = IdeaContent::new(&raw).expect_err("oversized content must fail");
        assert_eq!(
            err,
            IdeaValidationError::ContentTooLong {
                max: IDEA_CONTENT_MAX
            }
        );
    }

    #[test]
    fn multibyte_content_is_counted_in_characters() {
        // 1000 snowmen are 3000 UTF-8 bytes but still within the limit.
        let raw = "\u{2603}".repeat(IDEA_CONTENT_MAX);
        assert!(IdeaContent::new(&raw).is_ok());
        let raw = "\u{2603}".repeat(IDEA_CONTENT_MAX + 1);
        assert!(IdeaContent::new(&raw).is_err());
    }

    #[test]
    fn surrounding_whitespace_is_stripped_before_the_length_check() {
        let raw = format!("  {}  ", "x".repeat(IDEA_CONTENT_MAX));
        assert!(IdeaContent::new(&raw).is_ok());
    }
}
