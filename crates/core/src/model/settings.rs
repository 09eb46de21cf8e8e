use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::answer::ValidationPolicy;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("problem count must be between 1 and {max}, got {count}")]
    InvalidProblemCount { count: usize, max: usize },
}

/// Configuration for a drill session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDrillSettings")]
pub struct DrillSettings {
    problem_count: usize,
    validation: ValidationPolicy,
}

impl DrillSettings {
    pub const DEFAULT_PROBLEM_COUNT: usize = 10;
    pub const MAX_PROBLEM_COUNT: usize = 100;

    /// # Errors
    ///
    /// Returns `SettingsError::InvalidProblemCount` unless `1 <= problem_count <= 100`.
    pub fn new(problem_count: usize, validation: ValidationPolicy) -> Result<Self, SettingsError> {
        if problem_count == 0 || problem_count > Self::MAX_PROBLEM_COUNT {
            return Err(SettingsError::InvalidProblemCount {
                count: problem_count,
                max: Self::MAX_PROBLEM_COUNT,
            });
        }
        Ok(Self {
            problem_count,
            validation,
        })
    }

    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.problem_count
    }

    #[must_use]
    pub fn validation(&self) -> ValidationPolicy {
        self.validation
    }
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            problem_count: Self::DEFAULT_PROBLEM_COUNT,
            validation: ValidationPolicy::default(),
        }
    }
}

#[derive(Deserialize)]
struct RawDrillSettings {
    #[serde(default = "default_problem_count")]
    problem_count: usize,
    #[serde(default)]
    validation: ValidationPolicy,
}

fn default_problem_count() -> usize {
    DrillSettings::DEFAULT_PROBLEM_COUNT
}

impl TryFrom<RawDrillSettings> for DrillSettings {
    type Error = SettingsError;

    fn try_from(raw: RawDrillSettings) -> Result<Self, Self::Error> {
        Self::new(raw.problem_count, raw.validation)
    }
}
