//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::{
    AnswerError, DigitError, ProblemError, ProblemId, ReportError, SettingsError,
};

/// Caller-supplied values that violate a precondition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidArgument {
    #[error("no problems available for session")]
    Empty,
    #[error("answer {0} is outside 0..=999")]
    AnswerOutOfRange(u16),
    #[error("problem {found} is out of sequence, expected {expected}")]
    OutOfSequence { expected: ProblemId, found: ProblemId },
    #[error("problem {0} was answered before the session started")]
    PreAnswered(ProblemId),
    #[error(transparent)]
    Digit(#[from] DigitError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Problem(#[from] ProblemError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Operations that are not allowed in the session's current state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateTransitionError {
    #[error("session already completed")]
    SessionComplete,
    #[error("no previous problem; leave the session instead")]
    NoPreviousProblem,
    #[error("no next problem")]
    NoNextProblem,
    #[error("problem {0} already has an answer")]
    AlreadyAnswered(ProblemId),
    #[error("problem {0} has not been answered yet")]
    CurrentUnanswered(ProblemId),
    #[error("session is not complete yet")]
    NotComplete,
}

/// Errors emitted by session services.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(#[from] StateTransitionError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl SessionError {
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SessionError::InvalidArgument(_))
    }

    #[must_use]
    pub fn is_invalid_state_transition(&self) -> bool {
        matches!(self, SessionError::InvalidStateTransition(_))
    }
}

impl From<ProblemError> for SessionError {
    fn from(err: ProblemError) -> Self {
        match err {
            ProblemError::AlreadyAnswered(id) => StateTransitionError::AlreadyAnswered(id).into(),
            ProblemError::AnswerOutOfRange(value) => {
                InvalidArgument::AnswerOutOfRange(value).into()
            }
            other => InvalidArgument::Problem(other).into(),
        }
    }
}

impl From<AnswerError> for SessionError {
    fn from(err: AnswerError) -> Self {
        InvalidArgument::Answer(err).into()
    }
}

impl From<SettingsError> for SessionError {
    fn from(err: SettingsError) -> Self {
        InvalidArgument::Settings(err).into()
    }
}
