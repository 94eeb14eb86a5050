//! Length-bounded text values shared by several entities.

use super::TrackerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Checks that `value` holds between `min` and `max` characters.
pub(super) fn bounded(
    field: &'static str,
    value: String,
    min: usize,
    max: usize,
) -> Result<String, TrackerDomainError> {
    let actual = value.chars().count();
    if actual < min || actual > max {
        return Err(TrackerDomainError::TextLength {
            field,
            min,
            max,
            actual,
        });
    }
    Ok(value)
}

/// Trims `value` and checks its length.
pub(super) fn bounded_trimmed(
    field: &'static str,
    value: impl Into<String>,
    min: usize,
    max: usize,
) -> Result<String, TrackerDomainError> {
    let raw: String = value.into();
    bounded(field, raw.trim().to_owned(), min, max)
}

/// Epic or story title of 3 to 200 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 200;

    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::TextLength`] when the trimmed value is
    /// outside 3..=200 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        bounded_trimmed("title", value, Self::MIN_LENGTH, Self::MAX_LENGTH).map(Self)
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Title {
    type Error = TrackerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Title> for String {
    fn from(value: Title) -> Self {
        value.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
