use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::digit::CarryDigits;
use crate::model::ids::ProblemId;
use crate::model::problem::{Operation, Problem};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("cannot report on a session without problems")]
    Empty,

    #[error("problem {0} has no answer yet")]
    Unanswered(ProblemId),

    #[error("score ({score}) does not match correct answers ({counted})")]
    ScoreMismatch { score: u32, counted: u32 },
}

/// Closing line of the report, picked from the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Encouragement {
    Perfect,
    Excellent,
    Good,
    KeepPracticing,
}

impl Encouragement {
    #[must_use]
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            100.. => Self::Perfect,
            80..=99 => Self::Excellent,
            60..=79 => Self::Good,
            _ => Self::KeepPracticing,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect! Outstanding work!",
            Self::Excellent => "Excellent job! Keep it up!",
            Self::Good => "Good work! You're improving!",
            Self::KeepPracticing => "Keep practicing! You're doing great!",
        }
    }
}

/// One line of the detailed answer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub id: ProblemId,
    pub operand_a: u16,
    pub operand_b: u16,
    pub operation: Operation,
    pub correct_answer: u16,
    pub user_answer: u16,
    pub carry_digits: CarryDigits,
    pub is_correct: bool,
}

/// Read-only summary of a completed drill session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    score: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    rows: Vec<ReportRow>,
}

impl SessionReport {
    /// Build a report from fully answered problems.
    ///
    /// The score is cross-checked against the recorded answers.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `ReportError::Empty` for an empty problem list.
    /// Returns `ReportError::Unanswered` for the first problem without an answer.
    /// Returns `ReportError::ScoreMismatch` if `score` disagrees with the answers.
    pub fn from_problems(
        problems: &[Problem],
        score: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        if completed_at < started_at {
            return Err(ReportError::InvalidTimeRange);
        }
        if problems.is_empty() {
            return Err(ReportError::Empty);
        }

        let mut rows = Vec::with_capacity(problems.len());
        let mut counted = 0_u32;
        for problem in problems {
            let user_answer = problem
                .user_answer()
                .ok_or(ReportError::Unanswered(problem.id()))?;
            let is_correct = user_answer == problem.correct_answer();
            if is_correct {
                counted = counted.saturating_add(1);
            }
            rows.push(ReportRow {
                id: problem.id(),
                operand_a: problem.operand_a(),
                operand_b: problem.operand_b(),
                operation: problem.operation(),
                correct_answer: problem.correct_answer(),
                user_answer,
                carry_digits: problem.carry_digits().unwrap_or_default(),
                is_correct,
            });
        }

        if counted != score {
            return Err(ReportError::ScoreMismatch { score, counted });
        }

        Ok(Self {
            score,
            started_at,
            completed_at,
            rows,
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.completed_at - self.started_at
    }

    /// Share of correct answers, rounded half up to a whole percent.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        let total = u64::try_from(self.rows.len()).unwrap_or(u64::MAX);
        let score = u64::from(self.score);
        let rounded = (score * 200 + total) / (total * 2);
        u32::try_from(rounded).unwrap_or(100)
    }

    #[must_use]
    pub fn encouragement(&self) -> Encouragement {
        Encouragement::for_percentage(self.percentage())
    }

    /// Rows the learner got wrong, in presentation order.
    pub fn mistakes(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|row| !row.is_correct)
    }
}
