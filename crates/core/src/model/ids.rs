use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a problem within its session, starting at 1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemId(u32);

impl ProblemId {
    /// Creates a new `ProblemId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Id for the problem stored at `index` in a zero-based sequence.
    ///
    /// Returns `None` when the position does not fit in a `u32`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index)
            .ok()
            .and_then(|index| index.checked_add(1))
            .map(Self)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProblemId({})", self.0)
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing an id from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse ProblemId from {:?}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for ProblemId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<u32>() {
            Ok(value) if value > 0 => Ok(Self(value)),
            _ => Err(ParseIdError { raw: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_index_is_one_based() {
        assert_eq!(ProblemId::from_index(0), Some(ProblemId::new(1)));
        assert_eq!(ProblemId::from_index(9), Some(ProblemId::new(10)));
    }

    #[test]
    fn display_and_parse_agree() {
        let id: ProblemId = "7".parse().unwrap();
        assert_eq!(id, ProblemId::new(7));
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn zero_and_garbage_do_not_parse() {
        assert!("0".parse::<ProblemId>().is_err());
        assert!("seven".parse::<ProblemId>().is_err());
    }
}
