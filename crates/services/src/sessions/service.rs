use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info};

use drill_core::model::{
    AnswerDraft, CarryDigits, MAX_ANSWER, Problem, ProblemId, SessionReport, ValidationPolicy,
};

use super::progress::SessionProgress;
use crate::error::{InvalidArgument, SessionError, StateTransitionError};

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where the session cursor stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Problem at this zero-based index is on screen.
    AwaitingAnswer(usize),
    Complete,
}

/// Outcome of submitting an answer for the current problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub problem_id: ProblemId,
    pub is_correct: bool,
    pub score: u32,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory drill session.
///
/// Holds a fixed list of problems, a cursor and the running score. Each
/// problem accepts exactly one answer; going back only re-displays.
pub struct DrillSession {
    problems: Vec<Problem>,
    current: usize,
    score: u32,
    validation: ValidationPolicy,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl DrillSession {
    /// Create a session over freshly generated problems.
    ///
    /// `started_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument::Empty` if no problems are provided.
    /// Returns `InvalidArgument::OutOfSequence` unless ids run `1..=N` in order.
    /// Returns `InvalidArgument::PreAnswered` if any problem already has an answer.
    pub fn new(
        problems: Vec<Problem>,
        validation: ValidationPolicy,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if problems.is_empty() {
            return Err(InvalidArgument::Empty.into());
        }
        for (index, problem) in problems.iter().enumerate() {
            let expected = ProblemId::from_index(index).ok_or(InvalidArgument::Empty)?;
            if problem.id() != expected {
                return Err(InvalidArgument::OutOfSequence {
                    expected,
                    found: problem.id(),
                }
                .into());
            }
            if problem.is_answered() {
                return Err(InvalidArgument::PreAnswered(problem.id()).into());
            }
        }

        Ok(Self {
            problems,
            current: 0,
            score: 0,
            validation,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Complete
        } else {
            SessionState::AwaitingAnswer(self.current)
        }
    }

    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Cursor position; equals `total()` only once complete.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn validation(&self) -> ValidationPolicy {
        self.validation
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Total number of problems in this session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.problems.len()
    }

    /// Number of problems that already hold an answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.problems.iter().filter(|p| p.is_answered()).count()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answered_count();
        SessionProgress {
            total: self.total(),
            answered,
            remaining: self.total().saturating_sub(answered),
            position: (!self.is_complete()).then_some(self.current + 1),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn current_problem(&self) -> Option<&Problem> {
        if self.is_complete() {
            return None;
        }
        self.problems.get(self.current)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    fn awaiting_index(&self) -> Result<usize, SessionError> {
        match self.state() {
            SessionState::AwaitingAnswer(index) => Ok(index),
            SessionState::Complete => Err(StateTransitionError::SessionComplete.into()),
        }
    }

    /// Record `answer` for the current problem and advance the cursor.
    ///
    /// `answered_at` should come from the services layer clock; it becomes
    /// the completion time when this was the last problem.
    ///
    /// # Errors
    ///
    /// Returns `StateTransitionError::SessionComplete` once the session is finished.
    /// Returns `StateTransitionError::AlreadyAnswered` when the learner went back
    /// to an answered problem; the score is left untouched.
    /// Returns `InvalidArgument::AnswerOutOfRange` for answers above 999.
    pub fn submit_answer(
        &mut self,
        answer: u16,
        carry_digits: CarryDigits,
        answered_at: DateTime<Utc>,
    ) -> Result<SubmitOutcome, SessionError> {
        let index = self.awaiting_index()?;
        if answer > MAX_ANSWER {
            return Err(InvalidArgument::AnswerOutOfRange(answer).into());
        }
        let problem = &mut self.problems[index];
        let problem_id = problem.id();
        let is_correct = problem.record_answer(answer, carry_digits)?;

        if is_correct {
            self.score = self.score.saturating_add(1);
        }
        debug!(%problem_id, answer, is_correct, score = self.score, "answer recorded");

        self.current += 1;
        if self.current >= self.problems.len() {
            self.completed_at = Some(answered_at);
            info!(score = self.score, total = self.total(), "drill session complete");
        }

        Ok(SubmitOutcome {
            problem_id,
            is_correct,
            score: self.score,
            is_complete: self.is_complete(),
        })
    }

    /// Validate `draft` against the current problem and submit it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument::Answer` when required columns are empty, plus
    /// everything [`DrillSession::submit_answer`] returns.
    pub fn submit_draft(
        &mut self,
        draft: AnswerDraft,
        answered_at: DateTime<Utc>,
    ) -> Result<SubmitOutcome, SessionError> {
        let index = self.awaiting_index()?;
        let problem = &self.problems[index];
        if problem.is_answered() {
            return Err(StateTransitionError::AlreadyAnswered(problem.id()).into());
        }
        let (answer, carry) = draft.into_submission(problem, self.validation)?;
        self.submit_answer(answer, carry, answered_at)
    }

    /// Move the cursor back one problem without touching its answer.
    ///
    /// # Errors
    ///
    /// Returns `StateTransitionError::NoPreviousProblem` on the first problem;
    /// the caller is expected to leave the session.
    /// Returns `StateTransitionError::SessionComplete` once finished.
    pub fn go_to_previous(&mut self) -> Result<&Problem, SessionError> {
        let index = self.awaiting_index()?;
        if index == 0 {
            return Err(StateTransitionError::NoPreviousProblem.into());
        }
        self.current = index - 1;
        Ok(&self.problems[self.current])
    }

    /// Move forward past a problem that was answered before going back.
    ///
    /// # Errors
    ///
    /// Returns `StateTransitionError::CurrentUnanswered` if the problem on
    /// screen still needs an answer.
    /// Returns `StateTransitionError::NoNextProblem` on the last problem.
    /// Returns `StateTransitionError::SessionComplete` once finished.
    pub fn go_to_next(&mut self) -> Result<&Problem, SessionError> {
        let index = self.awaiting_index()?;
        let problem = &self.problems[index];
        if !problem.is_answered() {
            return Err(StateTransitionError::CurrentUnanswered(problem.id()).into());
        }
        if index + 1 >= self.problems.len() {
            return Err(StateTransitionError::NoNextProblem.into());
        }
        self.current = index + 1;
        Ok(&self.problems[self.current])
    }

    /// Final report; only available once every problem is answered.
    ///
    /// # Errors
    ///
    /// Returns `StateTransitionError::NotComplete` before completion.
    pub fn report(&self) -> Result<SessionReport, SessionError> {
        let completed_at = self
            .completed_at
            .ok_or(StateTransitionError::NotComplete)?;
        Ok(SessionReport::from_problems(
            &self.problems,
            self.score,
            self.started_at,
            completed_at,
        )?)
    }
}

impl fmt::Debug for DrillSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrillSession")
            .field("problems_len", &self.problems.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("validation", &self.validation)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
