use chrono::{DateTime, Duration, Utc};

/// Source of timestamps for session start and completion.
///
/// `Fixed` keeps tests deterministic; `Stepping` additionally moves forward
/// by a constant amount every time it is read through [`Clock::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
    Stepping {
        at: DateTime<Utc>,
        step: Duration,
    },
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn stepping(start: DateTime<Utc>, step: Duration) -> Self {
        Self::Stepping { at: start, step }
    }

    /// Current time without advancing a stepping clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) | Clock::Stepping { at, .. } => *at,
        }
    }

    /// Current time; a stepping clock advances afterwards.
    pub fn tick(&mut self) -> DateTime<Utc> {
        let now = self.now();
        if let Clock::Stepping { at, step } = self {
            *at += *step;
        }
        now
    }

    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Clock::System)
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// `minutes:seconds` for durations under an hour, `h:mm:ss` beyond.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_clock_advances_on_tick_only() {
        let mut clock = Clock::stepping(fixed_now(), Duration::seconds(5));
        assert_eq!(clock.now(), fixed_now());
        assert_eq!(clock.tick(), fixed_now());
        assert_eq!(clock.now(), fixed_now() + Duration::seconds(5));
    }

    #[test]
    fn fixed_clock_never_moves() {
        let mut clock = Clock::fixed(fixed_now());
        clock.tick();
        assert_eq!(clock.now(), fixed_now());
        assert!(!clock.is_system());
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(Duration::seconds(75)), "1:15");
        assert_eq!(format_elapsed(Duration::seconds(3_725)), "1:02:05");
        assert_eq!(format_elapsed(Duration::seconds(-3)), "0:00");
    }
}
