use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DigitError {
    #[error("digit must be between 0 and 9, got {0}")]
    OutOfRange(u8),

    #[error("not a decimal digit: {0:?}")]
    NotADigit(char),

    #[error("value {0} does not fit in three places")]
    TooLarge(u16),
}

//
// ─── DIGIT ─────────────────────────────────────────────────────────────────────
//

/// A single decimal digit, `0..=9`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Digit = Digit(0);
    pub const NINE: Digit = Digit(9);

    /// # Errors
    ///
    /// Returns `DigitError::OutOfRange` for values above 9.
    pub fn new(value: u8) -> Result<Self, DigitError> {
        if value > 9 {
            return Err(DigitError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// # Errors
    ///
    /// Returns `DigitError::NotADigit` for anything other than `'0'..='9'`.
    pub fn from_char(ch: char) -> Result<Self, DigitError> {
        ch.to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .map(Self)
            .ok_or(DigitError::NotADigit(ch))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Next digit, wrapping 9 to 0.
    #[must_use]
    pub fn wrapping_up(self) -> Self {
        Self((self.0 + 1) % 10)
    }

    /// Previous digit, wrapping 0 to 9.
    #[must_use]
    pub fn wrapping_down(self) -> Self {
        Self((self.0 + 9) % 10)
    }
}

impl TryFrom<u8> for Digit {
    type Error = DigitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Debug for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digit({})", self.0)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── PLACES ────────────────────────────────────────────────────────────────────
//

/// Column of the place-value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Place {
    Hundreds,
    Tens,
    Ones,
}

impl Place {
    /// Left-to-right column order.
    pub const ALL: [Place; 3] = [Place::Hundreds, Place::Tens, Place::Ones];

    #[must_use]
    pub fn weight(self) -> u16 {
        match self {
            Place::Hundreds => 100,
            Place::Tens => 10,
            Place::Ones => 1,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Place::Hundreds => "hundreds",
            Place::Tens => "tens",
            Place::Ones => "ones",
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Columns that can hold a carry/borrow scratch digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarryPlace {
    Hundreds,
    Tens,
}

//
// ─── PLACE DIGITS ──────────────────────────────────────────────────────────────
//

/// A value in `0..=999` split into its three columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlaceDigits {
    pub hundreds: Digit,
    pub tens: Digit,
    pub ones: Digit,
}

impl PlaceDigits {
    #[must_use]
    pub fn new(hundreds: Digit, tens: Digit, ones: Digit) -> Self {
        Self {
            hundreds,
            tens,
            ones,
        }
    }

    /// Splits `value` into columns.
    ///
    /// # Errors
    ///
    /// Returns `DigitError::TooLarge` for values above 999.
    pub fn from_value(value: u16) -> Result<Self, DigitError> {
        if value > 999 {
            return Err(DigitError::TooLarge(value));
        }
        // Each quotient/remainder below is < 10.
        let column = |v: u16| Digit(u8::try_from(v % 10).unwrap_or(0));
        Ok(Self {
            hundreds: column(value / 100),
            tens: column(value / 10),
            ones: column(value),
        })
    }

    /// `hundreds * 100 + tens * 10 + ones`.
    #[must_use]
    pub fn compose(self) -> u16 {
        Place::ALL
            .into_iter()
            .map(|place| u16::from(self.get(place).value()) * place.weight())
            .sum()
    }

    #[must_use]
    pub fn get(self, place: Place) -> Digit {
        match place {
            Place::Hundreds => self.hundreds,
            Place::Tens => self.tens,
            Place::Ones => self.ones,
        }
    }

    /// Cells as shown in the place-value table.
    ///
    /// A zero hundreds digit is blank; a zero tens digit is blank only when
    /// the hundreds digit is blank too. The ones digit is always shown.
    #[must_use]
    pub fn display_cells(self) -> [Option<Digit>; 3] {
        let hundreds = (self.hundreds != Digit::ZERO).then_some(self.hundreds);
        let tens = (hundreds.is_some() || self.tens != Digit::ZERO).then_some(self.tens);
        [hundreds, tens, Some(self.ones)]
    }
}

//
// ─── CARRY DIGITS ──────────────────────────────────────────────────────────────
//

/// Scratch digits a learner jots above the columns while regrouping.
///
/// Informational only; never used for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CarryDigits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hundreds: Option<Digit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tens: Option<Digit>,
}

impl CarryDigits {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, place: CarryPlace) -> Option<Digit> {
        match place {
            CarryPlace::Hundreds => self.hundreds,
            CarryPlace::Tens => self.tens,
        }
    }

    pub fn set(&mut self, place: CarryPlace, digit: Option<Digit>) {
        match place {
            CarryPlace::Hundreds => self.hundreds = digit,
            CarryPlace::Tens => self.tens = digit,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hundreds.is_none() && self.tens.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: u8) -> Digit {
        Digit::new(value).unwrap()
    }

    #[test]
    fn digit_rejects_values_above_nine() {
        assert_eq!(Digit::new(10), Err(DigitError::OutOfRange(10)));
        assert_eq!(Digit::from_char('x'), Err(DigitError::NotADigit('x')));
        assert_eq!(Digit::from_char('7'), Ok(d(7)));
    }

    #[test]
    fn digit_steps_wrap_around() {
        assert_eq!(Digit::NINE.wrapping_up(), Digit::ZERO);
        assert_eq!(Digit::ZERO.wrapping_down(), Digit::NINE);
        assert_eq!(d(4).wrapping_up(), d(5));
    }

    #[test]
    fn compose_and_decompose_round_trip_every_triple() {
        for h in 0..=9 {
            for t in 0..=9 {
                for o in 0..=9 {
                    let digits = PlaceDigits::new(d(h), d(t), d(o));
                    let value = digits.compose();
                    assert_eq!(
                        value,
                        u16::from(h) * 100 + u16::from(t) * 10 + u16::from(o)
                    );
                    assert_eq!(PlaceDigits::from_value(value).unwrap(), digits);
                }
            }
        }
    }

    #[test]
    fn from_value_rejects_four_digit_values() {
        assert_eq!(PlaceDigits::from_value(1000), Err(DigitError::TooLarge(1000)));
    }

    #[test]
    fn display_cells_blank_leading_zeros_only() {
        let cells = |v| PlaceDigits::from_value(v).unwrap().display_cells();
        assert_eq!(cells(47), [None, Some(d(4)), Some(d(7))]);
        assert_eq!(cells(5), [None, None, Some(d(5))]);
        assert_eq!(cells(305), [Some(d(3)), Some(d(0)), Some(d(5))]);
        assert_eq!(cells(0), [None, None, Some(d(0))]);
    }

    #[test]
    fn digit_deserialization_is_validated() {
        let ok: Digit = serde_json::from_str("3").unwrap();
        assert_eq!(ok, d(3));
        assert!(serde_json::from_str::<Digit>("12").is_err());
    }
}
