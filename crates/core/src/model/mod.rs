mod answer;
mod digit;
mod ids;
mod learner;
mod problem;
mod report;
mod settings;

pub use answer::{AnswerDraft, AnswerError, Step, ValidationPolicy};
pub use digit::{CarryDigits, CarryPlace, Digit, DigitError, Place, PlaceDigits};
pub use ids::{ParseIdError, ProblemId};
pub use learner::{LearnerName, LearnerNameError};
pub use problem::{MAX_ANSWER, MagnitudeClass, Operation, Problem, ProblemError};
pub use report::{Encouragement, ReportError, ReportRow, SessionReport};
pub use settings::{DrillSettings, SettingsError};
