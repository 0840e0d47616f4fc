//! Cricket rules: close 15-20 and the bull, score on numbers the opponent
//! has not closed.
//!
//! A hit is applied one mark at a time. A treble on a number with two marks
//! uses its first increment to close and its other two to score, so the
//! outcome depends on the count before each increment, not per dart.

use serde::{Deserialize, Serialize};

use super::turn::TurnProgress;
use crate::board::segment::{Segment, BULL};

/// Cricket numbers, board order
pub const CRICKET_NUMBERS: [u8; 7] = [20, 19, 18, 17, 16, 15, BULL];
/// Marks needed to close a number
pub const CLOSED_MARKS: u8 = 3;

/// Slot of a cricket number in the marks array
pub fn cricket_index(number: u8) -> Option<usize> {
    CRICKET_NUMBERS.iter().position(|&n| n == number)
}

/// Points per scoring mark
pub fn point_value(number: u8) -> u32 {
    if number == BULL {
        25
    } else {
        number as u32
    }
}

/// What one dart did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CricketDartEffect {
    /// Increments that raised the thrower's own mark count
    pub marks: u8,
    /// Increments that scored points
    pub scoring_marks: u8,
    pub points: u32,
}

/// One completed visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketTurn {
    pub darts: Vec<Segment>,
    pub marks: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CricketStats {
    /// Closing plus scoring marks
    pub total_marks: u32,
    /// Marks per round
    pub mpr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CricketPlayerState {
    /// Marks per number, indexed like `CRICKET_NUMBERS`, capped at 3
    pub marks: [u8; 7],
    pub points: u32,
    pub darts_thrown: u32,
    pub rounds: u32,
    pub history: Vec<CricketTurn>,
    pub stats: CricketStats,
}

impl Default for CricketPlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl CricketPlayerState {
    pub fn new() -> Self {
        Self {
            marks: [0; 7],
            points: 0,
            darts_thrown: 0,
            rounds: 0,
            history: Vec::new(),
            stats: CricketStats::default(),
        }
    }

    pub fn marks_on(&self, number: u8) -> u8 {
        cricket_index(number).map_or(0, |i| self.marks[i])
    }

    pub fn is_closed(&self, number: u8) -> bool {
        self.marks_on(number) >= CLOSED_MARKS
    }

    pub fn all_closed(&self) -> bool {
        self.marks.iter().all(|&m| m >= CLOSED_MARKS)
    }
}

/// Apply one dart. Non-cricket numbers and misses change nothing.
pub fn apply_dart(
    thrower: &mut CricketPlayerState,
    opponent: &CricketPlayerState,
    turn: &mut TurnProgress,
    seg: Segment,
) -> CricketDartEffect {
    turn.darts.push(seg);

    let Some(idx) = cricket_index(seg.number) else {
        return CricketDartEffect::default();
    };

    let mut effect = CricketDartEffect::default();
    for _ in 0..seg.multiplier {
        if thrower.marks[idx] < CLOSED_MARKS {
            thrower.marks[idx] += 1;
            effect.marks += 1;
        } else if opponent.marks[idx] < CLOSED_MARKS {
            thrower.points += point_value(seg.number);
            effect.scoring_marks += 1;
            effect.points += point_value(seg.number);
        }
    }

    turn.marks += effect.marks as u32;
    turn.scoring_marks += effect.scoring_marks as u32;
    turn.points += effect.points;
    effect
}

/// All seven numbers closed and not behind on points
pub fn has_won(player: &CricketPlayerState, opponent: &CricketPlayerState) -> bool {
    player.all_closed() && player.points >= opponent.points
}

/// Close the visit: history, counters and marks-per-round.
pub fn finish_turn(player: &mut CricketPlayerState, turn: &TurnProgress) {
    player.darts_thrown += turn.darts.len() as u32;
    player.rounds += 1;
    player.stats.total_marks += turn.marks + turn.scoring_marks;
    player.stats.mpr = player.stats.total_marks as f64 / player.rounds as f64;
    player.history.push(CricketTurn {
        darts: turn.darts.clone(),
        marks: turn.marks + turn.scoring_marks,
        points: turn.points,
    });
}

// ========== Tests ==========
