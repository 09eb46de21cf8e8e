#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod sessions;

pub use drill_core::Clock;
pub use sessions as session;

pub use error::{InvalidArgument, SessionError, StateTransitionError};
pub use generator::ProblemGenerator;

pub use sessions::{
    Cells, DrillLoopService, DrillSession, ProblemView, SessionProgress, SessionState,
    SubmitOutcome,
};
