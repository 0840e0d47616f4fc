//! Cricket targeting
//!
//! ## Evaluation Order (first match wins)
//! 1. Bleeding: opponent has closed a number we have not → close it
//! 2. Not ahead and a number is ours to score on → score on it
//! 3. Work on the open number with the most marks
//! 4. Everything closed → bull
//!
//! "Highest value" always means bull first, then 20 down to 15.

use super::{first_match, AimTarget, TargetRule};
use crate::board::segment::BULL;
use crate::engine::cricket::{cricket_index, CLOSED_MARKS, CRICKET_NUMBERS};

/// Cricket numbers in descending value
const BY_VALUE: [u8; 7] = [BULL, 20, 19, 18, 17, 16, 15];

/// Both players' boards from the thrower's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CricketView {
    /// Marks per number, indexed like `CRICKET_NUMBERS`
    pub own_marks: [u8; 7],
    pub opp_marks: [u8; 7],
    pub own_points: u32,
    pub opp_points: u32,
}

impl CricketView {
    fn own(&self, number: u8) -> u8 {
        cricket_index(number).map_or(0, |i| self.own_marks[i])
    }

    fn opp(&self, number: u8) -> u8 {
        cricket_index(number).map_or(0, |i| self.opp_marks[i])
    }

    fn own_closed(&self, number: u8) -> bool {
        self.own(number) >= CLOSED_MARKS
    }

    fn opp_closed(&self, number: u8) -> bool {
        self.opp(number) >= CLOSED_MARKS
    }
}

pub const CRICKET_RULES: &[TargetRule<CricketView>] = &[
    TargetRule { name: "defend", select: defend },
    TargetRule { name: "score", select: score },
    TargetRule { name: "close", select: close },
    TargetRule { name: "bull", select: bull },
];

pub fn choose_cricket_target(view: &CricketView) -> AimTarget {
    match first_match(CRICKET_RULES, view) {
        Some((rule, target)) => {
            log::trace!("cricket {:?} vs {:?}: {} -> {}", view.own_marks, view.opp_marks, rule, target);
            target
        }
        None => AimTarget::inner_bull(),
    }
}

// ========== Rules ==========

fn defend(view: &CricketView) -> Option<AimTarget> {
    BY_VALUE
        .iter()
        .find(|&&n| view.opp_closed(n) && !view.own_closed(n))
        .map(|&n| if n == BULL { AimTarget::outer_bull() } else { AimTarget::treble(n) })
}

fn score(view: &CricketView) -> Option<AimTarget> {
    if view.own_points > view.opp_points {
        return None;
    }
    BY_VALUE
        .iter()
        .find(|&&n| view.own_closed(n) && !view.opp_closed(n))
        .map(|&n| if n == BULL { AimTarget::inner_bull() } else { AimTarget::treble(n) })
}

fn close(view: &CricketView) -> Option<AimTarget> {
    // BY_VALUE order makes the first maximum the highest value on equal marks
    let mut best: Option<(u8, u8)> = None;
    for &n in &BY_VALUE {
        let marks = view.own(n);
        if marks >= CLOSED_MARKS {
            continue;
        }
        if best.map_or(true, |(_, best_marks)| marks > best_marks) {
            best = Some((n, marks));
        }
    }
    best.map(|(n, marks)| match (n, marks) {
        (BULL, 0) => AimTarget::outer_bull(),
        (BULL, _) => AimTarget::inner_bull(),
        _ => AimTarget::treble(n),
    })
}

fn bull(_view: &CricketView) -> Option<AimTarget> {
    Some(AimTarget::inner_bull())
}

// ========== Tests ==========
