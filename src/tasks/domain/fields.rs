//! Validated scalar types shared by lists and tasks.

use super::{DomainError, MAX_TITLE_LENGTH, ParseStatusFilterError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty title, at most [`MAX_TITLE_LENGTH`] characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Creates a validated title.
    ///
    /// Leading and trailing whitespace is removed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyTitle`] when the trimmed value is empty
    /// and [`DomainError::TitleTooLong`] when it exceeds
    /// [`MAX_TITLE_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        let length = trimmed.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(DomainError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses an optional due date submitted as `YYYY-MM-DD`.
///
/// Blank input counts as absent, matching how an empty form field arrives.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDueDate`] when the value is present but
/// does not parse as a calendar date.
pub fn parse_due_date(value: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DomainError::InvalidDueDate(raw.to_owned()))
}

/// Completion-status filter for task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// No completion restriction.
    #[default]
    All,
    /// Only tasks whose completion flag is set.
    Completed,
    /// Only tasks whose completion flag is clear.
    Pending,
}

impl StatusFilter {
    /// Returns the canonical query-string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }
}

impl TryFrom<&str> for StatusFilter {
    type Error = ParseStatusFilterError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            _ => Err(ParseStatusFilterError(value.to_owned())),
        }
    }
}
