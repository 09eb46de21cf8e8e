use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LearnerNameError {
    #[error("learner name cannot be empty")]
    Empty,

    #[error("learner name is limited to {max} characters")]
    TooLong { max: usize },
}

/// Name printed on the session report.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LearnerName(String);

impl LearnerName {
    pub const MAX_CHARS: usize = 20;

    /// Trims surrounding whitespace and validates the result.
    ///
    /// # Errors
    ///
    /// Returns `LearnerNameError::Empty` for blank names and
    /// `LearnerNameError::TooLong` past 20 characters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LearnerNameError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(LearnerNameError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_CHARS {
            return Err(LearnerNameError::TooLong {
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LearnerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(LearnerName::new("  Ada ").unwrap().as_str(), "Ada");
    }

    #[test]
    fn blank_and_long_names_are_rejected() {
        assert_eq!(LearnerName::new("   "), Err(LearnerNameError::Empty));
        assert_eq!(
            LearnerName::new("a".repeat(21)),
            Err(LearnerNameError::TooLong { max: 20 })
        );
    }
}
