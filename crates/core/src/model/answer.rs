use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::digit::{CarryDigits, CarryPlace, Digit, DigitError, Place};
use crate::model::problem::Problem;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error(transparent)]
    Digit(#[from] DigitError),

    #[error("answer is empty")]
    Empty,

    #[error("answer has {len} digits; at most 3 fit in the table")]
    TooManyDigits { len: usize },

    #[error("missing {}", join_places(.missing))]
    Incomplete { missing: Vec<Place> },

    #[error("unknown validation policy: {0}")]
    UnknownPolicy(String),
}

fn join_places(places: &[Place]) -> String {
    places
        .iter()
        .map(|place| place.label())
        .collect::<Vec<_>>()
        .join(", ")
}

//
// ─── VALIDATION POLICY ─────────────────────────────────────────────────────────
//

/// Decides which answer columns must be filled before a draft is submittable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationPolicy {
    /// Columns are required by the width of the first operand: ones always,
    /// tens from 10, hundreds from 100. `45 + 80` therefore accepts an answer
    /// without a hundreds digit.
    #[default]
    FirstOperand,
    /// Columns are required by the wider of the first operand and the correct
    /// answer.
    AnswerWidth,
}

impl ValidationPolicy {
    /// Columns that must hold a digit for `problem`, left to right.
    #[must_use]
    pub fn required_places(self, problem: &Problem) -> &'static [Place] {
        let width_of = match self {
            ValidationPolicy::FirstOperand => problem.operand_a(),
            ValidationPolicy::AnswerWidth => problem.operand_a().max(problem.correct_answer()),
        };
        if width_of >= 100 {
            &[Place::Hundreds, Place::Tens, Place::Ones]
        } else if width_of >= 10 {
            &[Place::Tens, Place::Ones]
        } else {
            &[Place::Ones]
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationPolicy::FirstOperand => "first-operand",
            ValidationPolicy::AnswerWidth => "answer-width",
        }
    }
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationPolicy {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first-operand" => Ok(Self::FirstOperand),
            "answer-width" => Ok(Self::AnswerWidth),
            other => Err(AnswerError::UnknownPolicy(other.to_string())),
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Direction of the up/down digit buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

fn step_digit(current: Option<Digit>, step: Step) -> Digit {
    let current = current.unwrap_or(Digit::ZERO);
    match step {
        Step::Up => current.wrapping_up(),
        Step::Down => current.wrapping_down(),
    }
}

/// In-progress entry for the problem on screen.
///
/// Every column may be empty. The draft belongs to one problem and is
/// dropped when the learner submits or navigates away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnswerDraft {
    hundreds: Option<Digit>,
    tens: Option<Digit>,
    ones: Option<Digit>,
    carry: CarryDigits,
}

impl AnswerDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills columns from typed digits, right-aligned: `"72"` sets tens and
    /// ones and leaves hundreds empty.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::Empty` for blank input, `AnswerError::TooManyDigits`
    /// beyond three characters and `AnswerError::Digit` for non-digits.
    pub fn parse_answer(raw: &str) -> Result<Self, AnswerError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AnswerError::Empty);
        }
        let len = raw.chars().count();
        if len > Place::ALL.len() {
            return Err(AnswerError::TooManyDigits { len });
        }

        let mut draft = Self::new();
        let places = Place::ALL;
        for (place, ch) in places[places.len() - len..].iter().zip(raw.chars()) {
            draft.set(*place, Some(Digit::from_char(ch)?));
        }
        Ok(draft)
    }

    #[must_use]
    pub fn get(&self, place: Place) -> Option<Digit> {
        match place {
            Place::Hundreds => self.hundreds,
            Place::Tens => self.tens,
            Place::Ones => self.ones,
        }
    }

    pub fn set(&mut self, place: Place, digit: Option<Digit>) {
        match place {
            Place::Hundreds => self.hundreds = digit,
            Place::Tens => self.tens = digit,
            Place::Ones => self.ones = digit,
        }
    }

    #[must_use]
    pub fn with_carry(mut self, carry: CarryDigits) -> Self {
        self.carry = carry;
        self
    }

    #[must_use]
    pub fn carry(&self) -> CarryDigits {
        self.carry
    }

    pub fn set_carry(&mut self, place: CarryPlace, digit: Option<Digit>) {
        self.carry.set(place, digit);
    }

    /// Moves an answer column one step; an empty column steps from 0.
    pub fn step(&mut self, place: Place, step: Step) {
        let next = step_digit(self.get(place), step);
        self.set(place, Some(next));
    }

    pub fn step_carry(&mut self, place: CarryPlace, step: Step) {
        let next = step_digit(self.carry.get(place), step);
        self.carry.set(place, Some(next));
    }

    /// Numeric answer with empty columns read as 0.
    #[must_use]
    pub fn compose(&self) -> u16 {
        Place::ALL
            .into_iter()
            .map(|place| {
                let digit = self.get(place).unwrap_or(Digit::ZERO);
                u16::from(digit.value()) * place.weight()
            })
            .sum()
    }

    /// Required columns that are still empty.
    #[must_use]
    pub fn missing_places(&self, problem: &Problem, policy: ValidationPolicy) -> Vec<Place> {
        policy
            .required_places(problem)
            .iter()
            .copied()
            .filter(|place| self.get(*place).is_none())
            .collect()
    }

    #[must_use]
    pub fn is_submittable(&self, problem: &Problem, policy: ValidationPolicy) -> bool {
        self.missing_places(problem, policy).is_empty()
    }

    /// Consumes the draft into the `(answer, carry)` pair a session records.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::Incomplete` naming the empty required columns.
    pub fn into_submission(
        self,
        problem: &Problem,
        policy: ValidationPolicy,
    ) -> Result<(u16, CarryDigits), AnswerError> {
        let missing = self.missing_places(problem, policy);
        if !missing.is_empty() {
            return Err(AnswerError::Incomplete { missing });
        }
        Ok((self.compose(), self.carry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::ProblemId;
    use crate::model::problem::Operation;

    fn problem(a: u16, b: u16, op: Operation) -> Problem {
        Problem::new(ProblemId::new(1), a, b, op).unwrap()
    }

    fn d(value: u8) -> Digit {
        Digit::new(value).unwrap()
    }

    #[test]
    fn parse_is_right_aligned() {
        let draft = AnswerDraft::parse_answer("72").unwrap();
        assert_eq!(draft.get(Place::Hundreds), None);
        assert_eq!(draft.get(Place::Tens), Some(d(7)));
        assert_eq!(draft.get(Place::Ones), Some(d(2)));
        assert_eq!(draft.compose(), 72);

        assert_eq!(AnswerDraft::parse_answer("045").unwrap().compose(), 45);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(AnswerDraft::parse_answer("  "), Err(AnswerError::Empty));
        assert_eq!(
            AnswerDraft::parse_answer("1234"),
            Err(AnswerError::TooManyDigits { len: 4 })
        );
        assert_eq!(
            AnswerDraft::parse_answer("7a"),
            Err(AnswerError::Digit(DigitError::NotADigit('a')))
        );
    }

    #[test]
    fn empty_columns_compose_as_zero() {
        let mut draft = AnswerDraft::new();
        draft.set(Place::Hundreds, Some(d(3)));
        draft.set(Place::Ones, Some(d(4)));
        assert_eq!(draft.compose(), 304);
    }

    #[test]
    fn two_digit_first_operand_requires_tens_and_ones() {
        let p = problem(47, 25, Operation::Add);
        let mut draft = AnswerDraft::new();
        draft.set(Place::Ones, Some(d(2)));
        assert_eq!(
            draft.missing_places(&p, ValidationPolicy::FirstOperand),
            vec![Place::Tens]
        );

        draft.set(Place::Tens, Some(d(7)));
        assert!(draft.is_submittable(&p, ValidationPolicy::FirstOperand));
    }

    #[test]
    fn three_digit_first_operand_requires_every_column() {
        let p = problem(900, 450, Operation::Subtract);
        let draft = AnswerDraft::parse_answer("50").unwrap();
        assert_eq!(
            draft.missing_places(&p, ValidationPolicy::FirstOperand),
            vec![Place::Hundreds]
        );
    }

    #[test]
    fn first_operand_rule_does_not_require_hundreds_for_wide_sums() {
        let p = problem(45, 80, Operation::Add);
        assert_eq!(p.correct_answer(), 125);
        let draft = AnswerDraft::parse_answer("25").unwrap();

        assert!(draft.is_submittable(&p, ValidationPolicy::FirstOperand));
        assert_eq!(
            draft.missing_places(&p, ValidationPolicy::AnswerWidth),
            vec![Place::Hundreds]
        );
    }

    #[test]
    fn stepping_wraps_and_starts_from_zero() {
        let mut draft = AnswerDraft::new();
        draft.step(Place::Tens, Step::Down);
        assert_eq!(draft.get(Place::Tens), Some(Digit::NINE));
        draft.step(Place::Tens, Step::Up);
        assert_eq!(draft.get(Place::Tens), Some(Digit::ZERO));

        draft.step_carry(CarryPlace::Hundreds, Step::Up);
        assert_eq!(draft.carry().hundreds, Some(d(1)));
        assert_eq!(draft.carry().tens, None);
    }

    #[test]
    fn into_submission_reports_missing_columns() {
        let p = problem(900, 450, Operation::Subtract);
        let err = AnswerDraft::new()
            .into_submission(&p, ValidationPolicy::FirstOperand)
            .unwrap_err();
        assert_eq!(
            err,
            AnswerError::Incomplete {
                missing: vec![Place::Hundreds, Place::Tens, Place::Ones]
            }
        );
        assert_eq!(err.to_string(), "missing hundreds, tens, ones");

        let carry = CarryDigits {
            hundreds: Some(d(1)),
            tens: None,
        };
        let submission = AnswerDraft::parse_answer("450")
            .unwrap()
            .with_carry(carry)
            .into_submission(&p, ValidationPolicy::FirstOperand)
            .unwrap();
        assert_eq!(submission, (450, carry));
    }

    #[test]
    fn policy_round_trips_through_str() {
        for policy in [ValidationPolicy::FirstOperand, ValidationPolicy::AnswerWidth] {
            assert_eq!(policy.to_string().parse::<ValidationPolicy>(), Ok(policy));
        }
        assert!("loose".parse::<ValidationPolicy>().is_err());
    }
}
