use serde::Serialize;

use drill_core::model::{Digit, DigitError, Operation, Place, PlaceDigits, Problem, ProblemId};

use super::service::DrillSession;

/// Three cells of the place-value table, hundreds first; `None` is blank.
pub type Cells = [Option<Digit>; 3];

/// Everything a front-end needs to draw the problem on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemView {
    pub id: ProblemId,
    /// One-based position in the session.
    pub number: usize,
    pub total: usize,
    pub percent_through: usize,
    pub operation: Operation,
    pub top: Cells,
    pub bottom: Cells,
    /// Recorded answer cells, present when the learner came back to an
    /// answered problem.
    pub answered: Option<Cells>,
    pub required: Vec<Place>,
}

impl ProblemView {
    /// View of the problem under the cursor, or `None` once complete.
    ///
    /// # Errors
    ///
    /// Returns `DigitError::TooLarge` if an operand or answer does not fit in
    /// three places.
    pub fn current(session: &DrillSession) -> Result<Option<Self>, DigitError> {
        let progress = session.progress();
        let (Some(problem), Some(number)) = (session.current_problem(), progress.position) else {
            return Ok(None);
        };
        Self::build(
            problem,
            number,
            progress.total,
            progress.percent_through(),
            session.validation().required_places(problem).to_vec(),
        )
        .map(Some)
    }

    fn build(
        problem: &Problem,
        number: usize,
        total: usize,
        percent_through: usize,
        required: Vec<Place>,
    ) -> Result<Self, DigitError> {
        let (top, bottom) = problem.operand_digits()?;
        let answered = problem
            .user_answer()
            .map(|answer| PlaceDigits::from_value(answer).map(PlaceDigits::display_cells))
            .transpose()?;

        Ok(Self {
            id: problem.id(),
            number,
            total,
            percent_through,
            operation: problem.operation(),
            top: top.display_cells(),
            bottom: bottom.display_cells(),
            answered,
            required,
        })
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("Question {} of {}", self.number, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{CarryDigits, ValidationPolicy};
    use drill_core::time::fixed_now;

    fn d(v: u8) -> Option<Digit> {
        Some(Digit::new(v).unwrap())
    }

    fn session() -> DrillSession {
        let problems = vec![
            Problem::new(ProblemId::new(1), 47, 25, Operation::Add).unwrap(),
            Problem::new(ProblemId::new(2), 305, 120, Operation::Subtract).unwrap(),
        ];
        DrillSession::new(problems, ValidationPolicy::FirstOperand, fixed_now()).unwrap()
    }

    #[test]
    fn view_lays_out_operands_by_place() {
        let view = ProblemView::current(&session()).unwrap().unwrap();
        assert_eq!(view.progress_label(), "Question 1 of 2");
        assert_eq!(view.percent_through, 50);
        assert_eq!(view.top, [None, d(4), d(7)]);
        assert_eq!(view.bottom, [None, d(2), d(5)]);
        assert_eq!(view.required, vec![Place::Tens, Place::Ones]);
        assert_eq!(view.answered, None);
    }

    #[test]
    fn revisited_problem_shows_recorded_answer() {
        let mut session = session();
        session
            .submit_answer(72, CarryDigits::none(), fixed_now())
            .unwrap();
        let view = ProblemView::current(&session).unwrap().unwrap();
        assert_eq!(view.top, [d(3), d(0), d(5)]);
        assert_eq!(view.required.len(), 3);

        session.go_to_previous().unwrap();
        let view = ProblemView::current(&session).unwrap().unwrap();
        assert_eq!(view.answered, Some([None, d(7), d(2)]));
    }

    #[test]
    fn view_serializes_for_front_ends() {
        let view = ProblemView::current(&session()).unwrap().unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["operation"], "add");
        assert_eq!(json["top"], serde_json::json!([null, 4, 7]));
        assert_eq!(json["required"], serde_json::json!(["tens", "ones"]));
    }

    #[test]
    fn completed_session_has_no_view() {
        let mut session = session();
        session
            .submit_answer(72, CarryDigits::none(), fixed_now())
            .unwrap();
        session
            .submit_answer(185, CarryDigits::none(), fixed_now())
            .unwrap();
        assert_eq!(ProblemView::current(&session).unwrap(), None);
    }
}
