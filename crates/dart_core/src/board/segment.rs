//! Scoring segments
//!
//! A `Segment` is the resolved result of one dart: which number it hit and
//! with which multiplier. Segments are plain values; nothing mutates them
//! after construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DartError, Result};

/// Number used for the bullseye (both rings).
pub const BULL: u8 = 25;
/// Number used for a dart that missed the scoring area.
pub const MISS_NUMBER: u8 = 0;

/// Scoring zone hit by a dart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// 0 = miss, 1..=20, 25 = bull
    pub number: u8,
    /// 1 = single, 2 = double, 3 = treble (bull: 1 = outer, 2 = inner)
    pub multiplier: u8,
    /// Points scored by the dart
    pub score: u32,
}

impl Segment {
    pub const MISS: Segment = Segment { number: MISS_NUMBER, multiplier: 1, score: 0 };
    pub const OUTER_BULL: Segment = Segment { number: BULL, multiplier: 1, score: 25 };
    pub const INNER_BULL: Segment = Segment { number: BULL, multiplier: 2, score: 50 };

    /// Validated constructor.
    ///
    /// Rejects combinations that do not exist on a board (T25, D0, 21, ...).
    /// A miss is always `(0, 1)`.
    pub fn new(number: u8, multiplier: u8) -> Result<Self> {
        match (number, multiplier) {
            (MISS_NUMBER, 1) => Ok(Self::MISS),
            (BULL, 1) => Ok(Self::OUTER_BULL),
            (BULL, 2) => Ok(Self::INNER_BULL),
            (1..=20, 1..=3) => {
                Ok(Self { number, multiplier, score: number as u32 * multiplier as u32 })
            }
            _ => Err(DartError::InvalidSegment(format!("{}x{}", number, multiplier))),
        }
    }

    pub const fn single(number: u8) -> Self {
        Self::sector(number, 1)
    }

    pub const fn double(number: u8) -> Self {
        Self::sector(number, 2)
    }

    pub const fn treble(number: u8) -> Self {
        Self::sector(number, 3)
    }

    /// Sector constructor for numbers already known to be on the board.
    pub(crate) const fn sector(number: u8, multiplier: u8) -> Self {
        debug_assert!(number >= 1 && number <= 20 && multiplier >= 1 && multiplier <= 3);
        Self { number, multiplier, score: number as u32 * multiplier as u32 }
    }

    pub fn is_miss(&self) -> bool {
        self.number == MISS_NUMBER
    }

    pub fn is_bull(&self) -> bool {
        self.number == BULL
    }

    /// Doubles and the inner bull both satisfy double-in / double-out.
    pub fn is_double(&self) -> bool {
        self.multiplier == 2
    }

    /// Display label: `MISS`, `7`, `D7`, `T7`, `25`, `BULL`.
    pub fn label(&self) -> String {
        match (self.number, self.multiplier) {
            (MISS_NUMBER, _) => "MISS".to_string(),
            (BULL, 2) => "BULL".to_string(),
            (BULL, _) => "25".to_string(),
            (n, 2) => format!("D{}", n),
            (n, 3) => format!("T{}", n),
            (n, _) => n.to_string(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Segment {
    type Err = DartError;

    /// Parses keypad labels. Accepts the `label()` forms plus `S7`, `SB`, `DB`.
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "MISS" | "M" | "0" => return Ok(Self::MISS),
            "BULL" | "DB" | "50" => return Ok(Self::INNER_BULL),
            "25" | "SB" => return Ok(Self::OUTER_BULL),
            _ => {}
        }

        let (multiplier, digits) = match upper.chars().next() {
            Some('S') => (1, &upper[1..]),
            Some('D') => (2, &upper[1..]),
            Some('T') => (3, &upper[1..]),
            _ => (1, upper.as_str()),
        };
        let number: u8 = digits.parse().map_err(|_| DartError::InvalidSegment(s.to_string()))?;
        if !(1..=20).contains(&number) {
            return Err(DartError::InvalidSegment(s.to_string()));
        }
        Self::new(number, multiplier)
    }
}

// ========== Tests ==========
