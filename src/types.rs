//! Validated newtypes for table keys and engine settings.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    tictactoe::{BoardState, Mark},
    utils::DEFAULT_SAMPLING_FLOOR,
};

/// Number of moves played so far (0-9).
///
/// Serialized as a plain integer, which JSON map keys render as `"0"`..`"9"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Ply(u8);

impl Ply {
    /// The empty board.
    pub const ZERO: Ply = Ply(0);
    /// A full board.
    pub const MAX: Ply = Ply(9);

    /// Create a ply index, validating it is within 0-9.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPly`] if the value is greater than 9.
    pub fn new(value: usize) -> Result<Self, crate::Error> {
        if value <= Self::MAX.0 as usize {
            Ok(Ply(value as u8))
        } else {
            Err(crate::Error::InvalidPly { value })
        }
    }

    /// Get the inner value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Iterate over every ply from 0 through 9.
    pub fn all() -> impl Iterator<Item = Ply> {
        (0..=Self::MAX.0).map(Ply)
    }

    /// The ply `n` moves earlier, if it exists.
    pub fn checked_sub(self, n: u8) -> Option<Ply> {
        self.0.checked_sub(n).map(Ply)
    }

    /// The ply `n` moves later, if it is still on the board.
    pub fn checked_add(self, n: u8) -> Option<Ply> {
        self.0
            .checked_add(n)
            .filter(|&value| value <= Self::MAX.0)
            .map(Ply)
    }
}

impl TryFrom<u8> for Ply {
    type Error = crate::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ply::new(value as usize)
    }
}

impl From<Ply> for u8 {
    fn from(ply: Ply) -> Self {
        ply.0
    }
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed-width board encoding used as the value table key.
///
/// Nine characters in row-major cell order: `-` for empty, `X` or `O`
/// for an occupied cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializedState(String);

impl SerializedState {
    /// Encode a set of marks.
    pub fn from_marks(marks: &[Mark; 9]) -> Self {
        SerializedState(marks.iter().map(|mark| mark.to_char()).collect())
    }

    /// Parse a serialized state, validating length and alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidSerializedState`] unless the input is
    /// exactly nine characters drawn from `-`, `X` and `O`.
    pub fn parse(input: &str) -> Result<Self, crate::Error> {
        let count = input.chars().count();
        if count != 9 {
            return Err(crate::Error::InvalidSerializedState {
                input: input.to_string(),
                reason: format!("expected 9 cells, got {count}"),
            });
        }
        if let Some((position, character)) = input
            .chars()
            .enumerate()
            .find(|&(_, c)| Mark::from_char(c).is_none())
        {
            return Err(crate::Error::InvalidSerializedState {
                input: input.to_string(),
                reason: format!("invalid character '{character}' at position {position}"),
            });
        }
        Ok(SerializedState(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decode back into a board.
    pub fn to_board(&self) -> BoardState {
        let mut marks = [Mark::Empty; 9];
        for (slot, c) in marks.iter_mut().zip(self.0.chars()) {
            *slot = Mark::from_char(c).unwrap_or(Mark::Empty);
        }
        BoardState::from_marks(marks)
    }

    /// Number of occupied cells in the encoded board.
    pub fn ply(&self) -> Ply {
        Ply(self.0.chars().filter(|&c| c != '-').count() as u8)
    }
}

impl TryFrom<String> for SerializedState {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SerializedState::parse(&value)
    }
}

impl From<SerializedState> for String {
    fn from(state: SerializedState) -> Self {
        state.0
    }
}

impl fmt::Display for SerializedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Smallest sampling weight an action keeps, whatever its stored value.
///
/// Always finite and strictly positive, so every legal action stays
/// reachable and the weights handed to the sampler are valid.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SamplingFloor(f64);

impl SamplingFloor {
    pub const DEFAULT: SamplingFloor = SamplingFloor(DEFAULT_SAMPLING_FLOOR);

    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidSamplingFloor`] for zero, negative or
    /// non-finite values.
    pub fn new(value: f64) -> Result<Self, crate::Error> {
        if value.is_finite() && value > 0.0 {
            Ok(SamplingFloor(value))
        } else {
            Err(crate::Error::InvalidSamplingFloor {
                input: value.to_string(),
            })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Sampling weight for a stored value.
    ///
    /// Values at or below the floor, and non-finite values, become the
    /// floor. The stored value itself is never touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use qtictactoe::types::SamplingFloor;
    ///
    /// let floor = SamplingFloor::new(1e-3)?;
    /// assert_eq!(floor.weight(0.4), 0.4);
    /// assert_eq!(floor.weight(-2.0), 1e-3);
    /// assert_eq!(floor.weight(f64::NAN), 1e-3);
    /// # Ok::<(), qtictactoe::Error>(())
    /// ```
    pub fn weight(self, value: f64) -> f64 {
        if value.is_finite() && value > self.0 {
            value
        } else {
            self.0
        }
    }
}

impl Default for SamplingFloor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for SamplingFloor {
    type Error = crate::Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        SamplingFloor::new(value)
    }
}

impl FromStr for SamplingFloor {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidSamplingFloor {
            input: s.to_string(),
        };
        let value: f64 = s.trim().parse().map_err(|_| invalid())?;
        SamplingFloor::new(value).map_err(|_| invalid())
    }
}

impl fmt::Display for SamplingFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ply_bounds() {
        assert_eq!(Ply::new(0).unwrap(), Ply::ZERO);
        assert_eq!(Ply::new(9).unwrap(), Ply::MAX);
        assert!(Ply::new(10).is_err());
        assert_eq!(Ply::all().count(), 10);
    }

    #[test]
    fn test_ply_arithmetic() {
        let ply = Ply::new(3).unwrap();
        assert_eq!(ply.checked_sub(2), Some(Ply::new(1).unwrap()));
        assert_eq!(ply.checked_sub(4), None);
        assert_eq!(ply.checked_add(2), Some(Ply::new(5).unwrap()));
        assert_eq!(Ply::new(8).unwrap().checked_add(2), None);
    }

    #[test]
    fn test_parse_serialized_state() {
        let state = SerializedState::parse("X-O------").unwrap();
        assert_eq!(state.as_str(), "X-O------");
        assert_eq!(state.ply().value(), 2);
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert!(SerializedState::parse("X-O").is_err());
        assert!(SerializedState::parse("----------").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_character() {
        let err = SerializedState::parse("X-O---.--").unwrap_err();
        assert!(err.to_string().contains("position 6"));
    }

    #[test]
    fn test_board_roundtrip_through_key() {
        let state = SerializedState::parse("XO-OX---X").unwrap();
        assert_eq!(state.to_board().serialize(), state);
    }

    #[test]
    fn test_sampling_floor_rejects_non_positive() {
        for bad in [0.0, -0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    SamplingFloor::new(bad),
                    Err(crate::Error::InvalidSamplingFloor { .. })
                ),
                "{bad} accepted"
            );
        }
        assert_eq!(SamplingFloor::new(0.05).unwrap().value(), 0.05);
    }

    #[test]
    fn test_sampling_floor_parse() {
        assert_eq!("0.01".parse::<SamplingFloor>().unwrap().value(), 0.01);
        assert!("0".parse::<SamplingFloor>().is_err());
        assert!("-1".parse::<SamplingFloor>().is_err());
        assert!("nan".parse::<SamplingFloor>().is_err());
        assert!("lots".parse::<SamplingFloor>().is_err());
        let shown = SamplingFloor::DEFAULT.to_string();
        assert_eq!(shown.parse::<SamplingFloor>().unwrap(), SamplingFloor::DEFAULT);
    }

    #[test]
    fn test_sampling_floor_weight() {
        let floor = SamplingFloor::new(0.05).unwrap();
        assert_eq!(floor.weight(0.3), 0.3);
        assert_eq!(floor.weight(0.05), 0.05);
        assert_eq!(floor.weight(0.0), 0.05);
        assert_eq!(floor.weight(f64::NEG_INFINITY), 0.05);
    }
}
