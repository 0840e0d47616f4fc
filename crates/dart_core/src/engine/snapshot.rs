//! Match state snapshots and the undo stack.
//!
//! `MatchState` is everything a dart can change: both player states, whose
//! turn it is, the visit in progress and the phase. Snapshots are full deep
//! copies; the state is a few hundred bytes plus turn history.
//!
//! # Example
//! ```
//! use dart_core::{Match, MatchConfig, PlayerConfig, Segment};
//!
//! let config = MatchConfig::x01(501)
//!     .with_players(PlayerConfig::human("A"), PlayerConfig::human("B"))
//!     .headless(1);
//! let mut m = Match::new(config).unwrap();
//! let before = m.snapshot();
//! m.throw_dart(Segment::treble(20)).unwrap();
//! assert!(m.undo().unwrap());
//! assert_eq!(m.snapshot(), before);
//! ```

use serde::{Deserialize, Serialize};

use super::cricket::CricketPlayerState;
use super::turn::TurnProgress;
use super::x01::{X01PlayerState, X01Rules};
use crate::config::GameMode;

/// Where the match is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum MatchPhase {
    /// Waiting for the active player's next dart
    AwaitingDart,
    /// Terminal until undo, reset or rematch
    GameOver { winner: usize },
}

/// Per-mode player states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Players {
    X01 { rules: X01Rules, players: [X01PlayerState; 2] },
    Cricket { players: [CricketPlayerState; 2] },
}

impl Players {
    pub fn new(mode: &GameMode) -> Self {
        match *mode {
            GameMode::X01 { start_score, double_in, double_out } => {
                let rules = X01Rules { start_score, double_in, double_out };
                Players::X01 {
                    rules,
                    players: [X01PlayerState::new(&rules), X01PlayerState::new(&rules)],
                }
            }
            GameMode::Cricket => Players::Cricket {
                players: [CricketPlayerState::new(), CricketPlayerState::new()],
            },
        }
    }

    /// Fresh accumulator for `player`'s next visit
    pub fn open_turn(&self, player: usize) -> TurnProgress {
        match self {
            Players::X01 { players, .. } => {
                let p = &players[player];
                TurnProgress::x01(p.remaining, p.started)
            }
            Players::Cricket { .. } => TurnProgress::cricket(),
        }
    }

    pub fn darts_thrown(&self, player: usize) -> u32 {
        match self {
            Players::X01 { players, .. } => players[player].darts_thrown,
            Players::Cricket { players } => players[player].darts_thrown,
        }
    }

    pub fn rounds(&self, player: usize) -> u32 {
        match self {
            Players::X01 { players, .. } => players[player].rounds,
            Players::Cricket { players } => players[player].rounds,
        }
    }
}

/// Complete mutable match state, used for undo and equality checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub players: Players,
    /// Index of the player throwing
    pub active: usize,
    pub turn: TurnProgress,
    pub phase: MatchPhase,
}

impl MatchState {
    pub fn new(mode: &GameMode, starting_player: usize) -> Self {
        let players = Players::new(mode);
        let turn = players.open_turn(starting_player);
        Self { players, active: starting_player, turn, phase: MatchPhase::AwaitingDart }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::GameOver { .. })
    }
}

/// Pre-dart snapshots, most recent last
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    frames: Vec<MatchState>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: &MatchState) {
        self.frames.push(state.clone());
    }

    pub fn pop(&mut self) -> Option<MatchState> {
        self.frames.pop()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

// ========== Tests ==========
