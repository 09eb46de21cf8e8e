use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use drill_core::model::{MagnitudeClass, Operation, Problem, ProblemError, ProblemId};

/// Produces drill problems from a random source.
///
/// Each generator owns its RNG, so two sessions never share generator state.
/// Use [`ProblemGenerator::seeded`] for reproducible sequences.
#[derive(Debug, Clone)]
pub struct ProblemGenerator<R = StdRng> {
    rng: R,
}

impl ProblemGenerator<StdRng> {
    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Generator that yields the same sequence for the same seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ProblemGenerator<R> {
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draws one problem.
    ///
    /// Picks a magnitude class, two operands from that class and an
    /// operation, each uniformly. Subtraction puts the larger draw first.
    ///
    /// # Errors
    ///
    /// Propagates `ProblemError` from [`Problem::from_draw`]; draws taken from a
    /// single class never trigger it.
    pub fn generate_problem(&mut self, id: ProblemId) -> Result<Problem, ProblemError> {
        let class = if self.rng.random_bool(0.5) {
            MagnitudeClass::ThreeDigit
        } else {
            MagnitudeClass::TwoDigit
        };
        let n1 = self.rng.random_range(class.range());
        let n2 = self.rng.random_range(class.range());
        let operation = if self.rng.random_bool(0.5) {
            Operation::Add
        } else {
            Operation::Subtract
        };

        Problem::from_draw(id, n1, n2, operation)
    }

    /// Draws `count` problems with ids `1..=count` in order.
    ///
    /// A count of 0 yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::TooManyProblems` if the last id would not fit in
    /// a `ProblemId`, before drawing anything.
    /// Propagates `ProblemError` from [`ProblemGenerator::generate_problem`].
    pub fn generate_problems(&mut self, count: usize) -> Result<Vec<Problem>, ProblemError> {
        if count
            .checked_sub(1)
            .is_some_and(|last| ProblemId::from_index(last).is_none())
        {
            return Err(ProblemError::TooManyProblems(count));
        }
        let problems = (0..count)
            .map(|index| {
                let id = ProblemId::from_index(index).ok_or(ProblemError::TooManyProblems(count))?;
                self.generate_problem(id)
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = problems.len(), "generated problems");
        Ok(problems)
    }
}
