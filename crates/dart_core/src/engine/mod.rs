//! Match state machine: rule application per game mode, visits, undo and
//! the final result record.

pub mod cricket;
pub mod match_engine;
pub mod result;
pub mod snapshot;
pub mod turn;
pub mod x01;

#[cfg(test)]
mod match_tests;

pub use cricket::{CricketDartEffect, CricketPlayerState, CricketStats, CLOSED_MARKS, CRICKET_NUMBERS};
pub use match_engine::{AiTurnHandle, DartEffect, DartOutcome, Match};
pub use result::{MatchResult, PlayerSummary, SummaryStats};
pub use snapshot::{MatchPhase, MatchState, Players};
pub use turn::{TurnProgress, DARTS_PER_TURN};
pub use x01::{X01DartResult, X01PlayerState, X01Rules, X01Stats};
