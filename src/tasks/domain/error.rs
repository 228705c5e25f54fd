//! Error types for domain field validation.

use thiserror::Error;

/// Longest title accepted for tasks and lists.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Errors returned while constructing domain values from raw input.
///
/// Each variant maps to a single request field via [`DomainError::field`],
/// which lets the service layer build a field-keyed error map for form
/// redisplay.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds the persisted column width.
    #[error("title exceeds {max} characters (got {actual})")]
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
        /// Length of the rejected value.
        actual: usize,
    },

    /// The due date does not parse as a calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The referenced list does not exist or is not owned by the acting
    /// user. The message deliberately does not distinguish the two cases.
    #[error("the selected list is invalid")]
    InvalidList,
}

impl DomainError {
    /// Returns the request field this error is keyed under.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::InvalidDueDate(_) => "due_date",
            Self::InvalidList => "list_id",
        }
    }
}

/// Error returned while parsing status filter values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown status filter: {0}")]
pub struct ParseStatusFilterError(pub String);
