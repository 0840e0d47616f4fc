//! X01 rules: countdown from the start score to exactly zero.
//!
//! ## Dart Resolution
//! 1. Double-in pending and not a double → dead dart (recorded, scores 0)
//! 2. `R' = R - score`
//! 3. Bust when `R' < 0`, or with double-out when `R' == 1` or `R' == 0` off a
//!    non-double. Remaining and the double-in flag revert to the visit start.
//! 4. `R' == 0` → checkout
//!
//! Scoring stats only move on visits that did not bust.

use serde::{Deserialize, Serialize};

use super::turn::TurnProgress;
use crate::board::segment::Segment;
use crate::checkout::MAX_CHECKOUT;

/// X01 rule switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct X01Rules {
    pub start_score: u32,
    pub double_in: bool,
    pub double_out: bool,
}

/// What one dart did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum X01DartResult {
    /// Thrown before doubling in; no effect on the score
    Dead,
    /// Score stands, visit continues
    Scored,
    /// Visit void, remaining back to the visit start
    Bust,
    /// Reached zero legally
    Checkout,
}

impl X01DartResult {
    pub fn ends_turn(&self) -> bool {
        matches!(self, X01DartResult::Bust | X01DartResult::Checkout)
    }
}

/// One completed visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct X01Turn {
    pub darts: Vec<Segment>,
    pub start_remaining: u32,
    /// Points scored (0 on bust)
    pub score: u32,
    pub bust: bool,
    pub checkout: bool,
}

/// Cumulative X01 statistics
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct X01Stats {
    pub total_score: u32,
    pub highest_turn: u32,
    pub average_per_dart: f64,
    pub average_per_turn: f64,
    pub count_180: u32,
    pub count_100_plus: u32,
    pub checkout_attempts: u32,
    pub checkout_hits: u32,
    /// Highest score finished in one visit
    pub best_checkout: u32,
}

impl X01Stats {
    /// Hits ÷ attempts as a percentage
    pub fn checkout_percentage(&self) -> f64 {
        if self.checkout_attempts == 0 {
            0.0
        } else {
            self.checkout_hits as f64 / self.checkout_attempts as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct X01PlayerState {
    pub remaining: u32,
    pub darts_thrown: u32,
    pub rounds: u32,
    /// Doubled in (always true without double-in)
    pub started: bool,
    pub history: Vec<X01Turn>,
    pub stats: X01Stats,
}

impl X01PlayerState {
    pub fn new(rules: &X01Rules) -> Self {
        Self {
            remaining: rules.start_score,
            darts_thrown: 0,
            rounds: 0,
            started: !rules.double_in,
            history: Vec::new(),
            stats: X01Stats::default(),
        }
    }

    pub fn needs_double_in(&self) -> bool {
        !self.started
    }
}

/// Apply one dart to `player` and the running visit.
pub fn apply_dart(
    player: &mut X01PlayerState,
    turn: &mut TurnProgress,
    seg: Segment,
    rules: &X01Rules,
) -> X01DartResult {
    turn.darts.push(seg);

    if !player.started {
        if !seg.is_double() {
            return X01DartResult::Dead;
        }
        player.started = true;
    }

    let bust = match player.remaining.checked_sub(seg.score) {
        None => true,
        Some(1) => rules.double_out,
        Some(0) => rules.double_out && !seg.is_double(),
        Some(_) => false,
    };

    if bust {
        player.remaining = turn.start_remaining;
        player.started = turn.started_at_turn_start;
        turn.score = 0;
        return X01DartResult::Bust;
    }

    player.remaining -= seg.score;
    turn.score += seg.score;
    if player.remaining == 0 {
        X01DartResult::Checkout
    } else {
        X01DartResult::Scored
    }
}

/// Close the visit: history, dart/round counters and (unless bust) stats.
pub fn finish_turn(player: &mut X01PlayerState, turn: &TurnProgress, bust: bool, checkout: bool) {
    player.darts_thrown += turn.darts.len() as u32;
    player.rounds += 1;

    let score = if bust { 0 } else { turn.score };
    if !bust {
        let stats = &mut player.stats;
        stats.total_score += score;
        stats.highest_turn = stats.highest_turn.max(score);
        if score == 180 {
            stats.count_180 += 1;
        }
        if score >= 100 {
            stats.count_100_plus += 1;
        }
        if turn.start_remaining <= MAX_CHECKOUT {
            stats.checkout_attempts += 1;
            if checkout {
                stats.checkout_hits += 1;
                stats.best_checkout = stats.best_checkout.max(turn.start_remaining);
            }
        }
    }

    let stats = &mut player.stats;
    stats.average_per_dart = if player.darts_thrown > 0 {
        stats.total_score as f64 / player.darts_thrown as f64
    } else {
        0.0
    };
    stats.average_per_turn = if player.rounds > 0 {
        stats.total_score as f64 / player.rounds as f64
    } else {
        0.0
    };

    player.history.push(X01Turn {
        darts: turn.darts.clone(),
        start_remaining: turn.start_remaining,
        score,
        bust,
        checkout,
    });
}

// ========== Tests ==========
