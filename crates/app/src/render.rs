use drill_core::model::{AnswerError, CarryDigits, Digit, LearnerName, ReportRow, SessionReport};
use drill_core::time::format_elapsed;
use services::{Cells, InvalidArgument, ProblemView, SessionError, StateTransitionError};

fn cell(digit: Option<Digit>) -> char {
    digit.map_or(' ', |d| char::from(b'0' + d.value()))
}

fn row(prefix: char, cells: &Cells) -> String {
    format!(
        "  {prefix}  {}  {}  {}",
        cell(cells[0]),
        cell(cells[1]),
        cell(cells[2])
    )
}

/// Place-value table for the problem on screen, ending with a prompt.
pub fn problem(view: &ProblemView) -> String {
    let mut lines = vec![
        format!("\n{} ({}%)", view.progress_label(), view.percent_through),
        "     H  T  O".to_string(),
        row(' ', &view.top),
        row(view.operation.symbol(), &view.bottom),
        "  ----------".to_string(),
    ];

    match &view.answered {
        Some(answered) => {
            lines.push(row('=', answered));
            lines.push("Already answered. Type n for next or b for back.".to_string());
        }
        None => {
            let places = view
                .required
                .iter()
                .map(|place| place.label())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("Fill in: {places}. Carries go after the answer, e.g. 72 t=1"));
        }
    }
    lines.push("> ".to_string());
    lines.join("\n")
}

/// One line explaining why input was not accepted.
pub fn rejection(err: &SessionError) -> String {
    match err {
        SessionError::InvalidArgument(InvalidArgument::Answer(AnswerError::Incomplete {
            ..
        })) => format!("Not yet: {}.", inner_message(err)),
        SessionError::InvalidArgument(InvalidArgument::AnswerOutOfRange(value)) => {
            format!("{value} does not fit in the answer columns.")
        }
        SessionError::InvalidStateTransition(StateTransitionError::AlreadyAnswered(id)) => {
            format!("Problem {id} already has an answer.")
        }
        SessionError::InvalidStateTransition(StateTransitionError::CurrentUnanswered(id)) => {
            format!("Answer problem {id} first.")
        }
        SessionError::InvalidStateTransition(StateTransitionError::NoNextProblem) => {
            "This is the last problem.".to_string()
        }
        other => other.to_string(),
    }
}

fn inner_message(err: &SessionError) -> String {
    match err {
        SessionError::InvalidArgument(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

fn carry_note(carry: &CarryDigits) -> String {
    if carry.is_empty() {
        return String::new();
    }
    let mut parts = Vec::new();
    if let Some(h) = carry.hundreds {
        parts.push(format!("h={h}"));
    }
    if let Some(t) = carry.tens {
        parts.push(format!("t={t}"));
    }
    format!("  (carry {})", parts.join(" "))
}

fn review_line(row: &ReportRow) -> String {
    let verdict = if row.is_correct { "correct" } else { "wrong" };
    let problem = format!(
        "{} {} {} = {}",
        row.operand_a,
        row.operation.symbol(),
        row.operand_b,
        row.correct_answer
    );
    format!(
        "{:>3}. {problem:<18} your answer {:>3}  {verdict}{}",
        row.id.value(),
        row.user_answer,
        carry_note(&row.carry_digits)
    )
}

/// Final score screen with the per-problem review.
pub fn report(name: &LearnerName, report: &SessionReport) -> String {
    let mut lines = vec![
        format!("\n{name}'s Math Report"),
        format!(
            "Score: {}/{} ({}% correct)",
            report.score(),
            report.total(),
            report.percentage()
        ),
        report.encouragement().message().to_string(),
        format!("Time: {}", format_elapsed(report.elapsed())),
        "\nDetailed Answer Review".to_string(),
    ];
    lines.extend(report.rows().iter().map(review_line));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
