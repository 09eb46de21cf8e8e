use thiserror::Error;

use crate::model::{
    AnswerError, DigitError, LearnerNameError, ProblemError, ReportError, SettingsError,
};

/// Any validation failure raised by the drill models.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Digit(#[from] DigitError),
    #[error(transparent)]
    Problem(#[from] ProblemError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    LearnerName(#[from] LearnerNameError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
