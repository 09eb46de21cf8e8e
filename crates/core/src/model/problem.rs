use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::model::digit::{CarryDigits, DigitError, PlaceDigits};
use crate::model::ids::ProblemId;

/// Largest answer that fits in the three answer columns.
pub const MAX_ANSWER: u16 = 999;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("operand {0} is outside 10..=999")]
    OperandOutOfRange(u16),

    #[error("operands {a} and {b} mix two-digit and three-digit numbers")]
    MixedMagnitude { a: u16, b: u16 },

    #[error("{a} - {b} would be negative")]
    NegativeResult { a: u16, b: u16 },

    #[error("answer {0} is outside 0..=999")]
    AnswerOutOfRange(u16),

    #[error("problem {0} already has an answer")]
    AlreadyAnswered(ProblemId),

    #[error("{0} problems cannot be numbered")]
    TooManyProblems(usize),
}

//
// ─── OPERATION ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Add, Operation::Subtract];

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
        }
    }

    /// Result of `a op b`, or `None` when a subtraction would go negative.
    #[must_use]
    pub fn apply(self, a: u16, b: u16) -> Option<u16> {
        match self {
            Operation::Add => a.checked_add(b),
            Operation::Subtract => a.checked_sub(b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

//
// ─── MAGNITUDE CLASS ───────────────────────────────────────────────────────────
//

/// Whether a problem works on two-digit or three-digit operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudeClass {
    TwoDigit,
    ThreeDigit,
}

impl MagnitudeClass {
    pub const ALL: [MagnitudeClass; 2] = [MagnitudeClass::TwoDigit, MagnitudeClass::ThreeDigit];

    #[must_use]
    pub fn range(self) -> RangeInclusive<u16> {
        match self {
            MagnitudeClass::TwoDigit => 10..=99,
            MagnitudeClass::ThreeDigit => 100..=999,
        }
    }

    #[must_use]
    pub fn of(value: u16) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.range().contains(&value))
    }
}

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// One exercise of the drill.
///
/// Operands and the correct answer are fixed at construction. The learner's
/// answer can be recorded exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    id: ProblemId,
    operand_a: u16,
    operand_b: u16,
    operation: Operation,
    correct_answer: u16,
    user_answer: Option<u16>,
    carry_digits: Option<CarryDigits>,
}

impl Problem {
    /// # Errors
    ///
    /// Returns `ProblemError::OperandOutOfRange` if either operand is outside `10..=999`.
    /// Returns `ProblemError::MixedMagnitude` if the operands are from different classes.
    /// Returns `ProblemError::NegativeResult` for a subtraction with `a < b`.
    pub fn new(
        id: ProblemId,
        operand_a: u16,
        operand_b: u16,
        operation: Operation,
    ) -> Result<Self, ProblemError> {
        let class_a =
            MagnitudeClass::of(operand_a).ok_or(ProblemError::OperandOutOfRange(operand_a))?;
        let class_b =
            MagnitudeClass::of(operand_b).ok_or(ProblemError::OperandOutOfRange(operand_b))?;
        if class_a != class_b {
            return Err(ProblemError::MixedMagnitude {
                a: operand_a,
                b: operand_b,
            });
        }
        let correct_answer =
            operation
                .apply(operand_a, operand_b)
                .ok_or(ProblemError::NegativeResult {
                    a: operand_a,
                    b: operand_b,
                })?;

        Ok(Self {
            id,
            operand_a,
            operand_b,
            operation,
            correct_answer,
            user_answer: None,
            carry_digits: None,
        })
    }

    /// Builds a problem from two raw draws, putting the larger draw first for
    /// subtraction.
    ///
    /// # Errors
    ///
    /// Same as [`Problem::new`], minus `NegativeResult`.
    pub fn from_draw(
        id: ProblemId,
        n1: u16,
        n2: u16,
        operation: Operation,
    ) -> Result<Self, ProblemError> {
        let (a, b) = if operation == Operation::Subtract && n1 < n2 {
            (n2, n1)
        } else {
            (n1, n2)
        };
        Self::new(id, a, b, operation)
    }

    #[must_use]
    pub fn id(&self) -> ProblemId {
        self.id
    }

    #[must_use]
    pub fn operand_a(&self) -> u16 {
        self.operand_a
    }

    #[must_use]
    pub fn operand_b(&self) -> u16 {
        self.operand_b
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn correct_answer(&self) -> u16 {
        self.correct_answer
    }

    #[must_use]
    pub fn user_answer(&self) -> Option<u16> {
        self.user_answer
    }

    #[must_use]
    pub fn carry_digits(&self) -> Option<CarryDigits> {
        self.carry_digits
    }

    #[must_use]
    pub fn magnitude(&self) -> MagnitudeClass {
        // Both operands were checked against the same class in `new`.
        if self.operand_a >= 100 {
            MagnitudeClass::ThreeDigit
        } else {
            MagnitudeClass::TwoDigit
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.user_answer.is_some()
    }

    /// `None` until answered.
    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        self.user_answer
            .map(|answer| answer == self.correct_answer)
    }

    /// Whether the correct answer can be typed into the three answer columns.
    #[must_use]
    pub fn fits_answer_columns(&self) -> bool {
        self.correct_answer <= MAX_ANSWER
    }

    /// # Errors
    ///
    /// Returns `DigitError::TooLarge` for an operand above 999, which `new` never allows.
    pub fn operand_digits(&self) -> Result<(PlaceDigits, PlaceDigits), DigitError> {
        Ok((
            PlaceDigits::from_value(self.operand_a)?,
            PlaceDigits::from_value(self.operand_b)?,
        ))
    }

    /// Records the learner's answer and returns whether it is correct.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::AlreadyAnswered` if an answer was recorded before.
    /// Returns `ProblemError::AnswerOutOfRange` for answers above 999.
    pub fn record_answer(
        &mut self,
        answer: u16,
        carry_digits: CarryDigits,
    ) -> Result<bool, ProblemError> {
        if self.user_answer.is_some() {
            return Err(ProblemError::AlreadyAnswered(self.id));
        }
        if answer > MAX_ANSWER {
            return Err(ProblemError::AnswerOutOfRange(answer));
        }
        self.user_answer = Some(answer);
        self.carry_digits = Some(carry_digits);
        Ok(answer == self.correct_answer)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.operand_a,
            self.operation.symbol(),
            self.operand_b
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::digit::Digit;

    fn id(n: u32) -> ProblemId {
        ProblemId::new(n)
    }

    #[test]
    fn addition_computes_sum() {
        let problem = Problem::new(id(1), 47, 25, Operation::Add).unwrap();
        assert_eq!(problem.correct_answer(), 72);
        assert_eq!(problem.magnitude(), MagnitudeClass::TwoDigit);
        assert_eq!(problem.to_string(), "47 + 25");
    }

    #[test]
    fn subtraction_draw_is_swapped_so_result_is_not_negative() {
        let problem = Problem::from_draw(id(1), 450, 900, Operation::Subtract).unwrap();
        assert_eq!(problem.operand_a(), 900);
        assert_eq!(problem.operand_b(), 450);
        assert_eq!(problem.correct_answer(), 450);
    }

    #[test]
    fn addition_draw_keeps_draw_order() {
        let problem = Problem::from_draw(id(1), 12, 80, Operation::Add).unwrap();
        assert_eq!(problem.operand_a(), 12);
        assert_eq!(problem.operand_b(), 80);
    }

    #[test]
    fn new_rejects_ill_formed_problems() {
        assert_eq!(
            Problem::new(id(1), 9, 20, Operation::Add),
            Err(ProblemError::OperandOutOfRange(9))
        );
        assert_eq!(
            Problem::new(id(1), 45, 120, Operation::Add),
            Err(ProblemError::MixedMagnitude { a: 45, b: 120 })
        );
        assert_eq!(
            Problem::new(id(1), 20, 45, Operation::Subtract),
            Err(ProblemError::NegativeResult { a: 20, b: 45 })
        );
    }

    #[test]
    fn answer_is_recorded_once() {
        let mut problem = Problem::new(id(3), 47, 25, Operation::Add).unwrap();
        assert_eq!(problem.is_correct(), None);

        let carry = CarryDigits {
            hundreds: None,
            tens: Some(Digit::new(1).unwrap()),
        };
        assert_eq!(problem.record_answer(72, carry), Ok(true));
        assert_eq!(problem.user_answer(), Some(72));
        assert_eq!(problem.carry_digits(), Some(carry));

        assert_eq!(
            problem.record_answer(27, CarryDigits::none()),
            Err(ProblemError::AlreadyAnswered(id(3)))
        );
        assert_eq!(problem.user_answer(), Some(72));
    }

    #[test]
    fn answer_above_three_places_is_rejected() {
        let mut problem = Problem::new(id(1), 600, 450, Operation::Add).unwrap();
        assert!(!problem.fits_answer_columns());
        assert_eq!(
            problem.record_answer(1000, CarryDigits::none()),
            Err(ProblemError::AnswerOutOfRange(1000))
        );
        assert!(!problem.is_answered());
    }
}
