//! In-progress visit accumulators.

use serde::{Deserialize, Serialize};

use crate::board::segment::Segment;

/// Darts per visit
pub const DARTS_PER_TURN: usize = 3;

/// Running totals for the visit being thrown
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnProgress {
    /// Darts landed so far this visit, in order
    pub darts: Vec<Segment>,
    /// X01: remaining score when the visit started (restored on bust)
    pub start_remaining: u32,
    /// X01: double-in flag when the visit started (restored on bust)
    pub started_at_turn_start: bool,
    /// X01: points scored this visit
    pub score: u32,
    /// Cricket: closing marks added this visit
    pub marks: u32,
    /// Cricket: marks that scored points this visit
    pub scoring_marks: u32,
    /// Cricket: points added this visit
    pub points: u32,
}

impl TurnProgress {
    pub fn x01(start_remaining: u32, started: bool) -> Self {
        Self { start_remaining, started_at_turn_start: started, ..Self::default() }
    }

    pub fn cricket() -> Self {
        Self::default()
    }

    pub fn darts_thrown(&self) -> usize {
        self.darts.len()
    }

    pub fn darts_left(&self) -> usize {
        DARTS_PER_TURN.saturating_sub(self.darts.len())
    }

    pub fn is_full(&self) -> bool {
        self.darts.len() >= DARTS_PER_TURN
    }
}
