mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::{DrillSession, SessionState, SubmitOutcome};
pub use view::{Cells, ProblemView};
pub use workflow::DrillLoopService;
