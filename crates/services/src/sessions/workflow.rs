use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use drill_core::Clock;
use drill_core::model::{AnswerDraft, CarryDigits, DrillSettings};

use super::service::{DrillSession, SubmitOutcome};
use crate::error::SessionError;
use crate::generator::ProblemGenerator;

/// Orchestrates session start, answering and restart.
///
/// Owns the clock, the settings and the problem generator. Sessions it hands
/// out are independent values; nothing is shared between them.
#[derive(Debug, Clone)]
pub struct DrillLoopService<R = StdRng> {
    clock: Clock,
    settings: DrillSettings,
    generator: ProblemGenerator<R>,
}

impl DrillLoopService<StdRng> {
    /// Service drawing problems from OS entropy.
    #[must_use]
    pub fn new(clock: Clock, settings: DrillSettings) -> Self {
        Self::with_generator(clock, settings, ProblemGenerator::from_entropy())
    }

    /// Service whose sessions are reproducible for a given seed.
    #[must_use]
    pub fn seeded(clock: Clock, settings: DrillSettings, seed: u64) -> Self {
        Self::with_generator(clock, settings, ProblemGenerator::seeded(seed))
    }
}

impl<R: Rng> DrillLoopService<R> {
    #[must_use]
    pub fn with_generator(
        clock: Clock,
        settings: DrillSettings,
        generator: ProblemGenerator<R>,
    ) -> Self {
        Self {
            clock,
            settings,
            generator,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    /// Generate `problem_count` problems and start a session over them.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidArgument` if generation produced an
    /// unusable problem list.
    pub fn start_session(&mut self) -> Result<DrillSession, SessionError> {
        let problems = self
            .generator
            .generate_problems(self.settings.problem_count())?;
        let started_at = self.clock.tick();
        let session = DrillSession::new(problems, self.settings.validation(), started_at)?;
        info!(
            problems = session.total(),
            validation = %self.settings.validation(),
            "drill session started"
        );
        Ok(session)
    }

    /// Record a raw answer for the session's current problem.
    ///
    /// # Errors
    ///
    /// See [`DrillSession::submit_answer`].
    pub fn submit_answer(
        &mut self,
        session: &mut DrillSession,
        answer: u16,
        carry_digits: CarryDigits,
    ) -> Result<SubmitOutcome, SessionError> {
        let answered_at = self.clock.tick();
        session.submit_answer(answer, carry_digits, answered_at)
    }

    /// Validate and record a draft for the session's current problem.
    ///
    /// # Errors
    ///
    /// See [`DrillSession::submit_draft`].
    pub fn submit_draft(
        &mut self,
        session: &mut DrillSession,
        draft: AnswerDraft,
    ) -> Result<SubmitOutcome, SessionError> {
        let answered_at = self.clock.tick();
        session.submit_draft(draft, answered_at)
    }

    /// Discard `session` with everything recorded in it and start a fresh one.
    ///
    /// # Errors
    ///
    /// See [`DrillLoopService::start_session`].
    pub fn restart(&mut self, session: DrillSession) -> Result<DrillSession, SessionError> {
        debug!(
            score = session.score(),
            answered = session.answered_count(),
            "discarding session"
        );
        drop(session);
        self.start_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use drill_core::model::ValidationPolicy;
    use drill_core::time::fixed_now;

    fn service(seed: u64) -> DrillLoopService {
        DrillLoopService::seeded(
            Clock::stepping(fixed_now(), Duration::seconds(10)),
            DrillSettings::new(3, ValidationPolicy::FirstOperand).unwrap(),
            seed,
        )
    }

    #[test]
    fn start_session_uses_configured_count() {
        let mut svc = service(1);
        let session = svc.start_session().unwrap();
        assert_eq!(session.total(), 3);
        assert_eq!(session.started_at(), fixed_now());
    }

    #[test]
    fn completion_time_comes_from_clock() {
        let mut svc = service(2);
        let mut session = svc.start_session().unwrap();
        while let Some(problem) = session.current_problem() {
            let answer = problem.correct_answer().min(999);
            svc.submit_answer(&mut session, answer, CarryDigits::none())
                .unwrap();
        }
        assert_eq!(
            session.completed_at(),
            Some(fixed_now() + Duration::seconds(30))
        );
        assert_eq!(
            session.report().unwrap().elapsed(),
            Duration::seconds(30)
        );
    }

    #[test]
    fn restart_discards_previous_answers() {
        let mut svc = service(3);
        let mut session = svc.start_session().unwrap();
        svc.submit_answer(&mut session, 0, CarryDigits::none())
            .unwrap();

        let fresh = svc.restart(session).unwrap();
        assert_eq!(fresh.score(), 0);
        assert_eq!(fresh.current_index(), 0);
        assert_eq!(fresh.answered_count(), 0);
    }

    #[test]
    fn same_seed_gives_same_sessions() {
        let first = service(11).start_session().unwrap();
        let second = service(11).start_session().unwrap();
        assert_eq!(first.problems(), second.problems());
    }
}
