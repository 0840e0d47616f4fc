//! X01 targeting
//!
//! ## Evaluation Order (first match wins)
//! 1. Not yet doubled in → highest double that does not bust
//! 2. Straight-out game and the remaining score is one dart → hit it
//! 3. A checkout fits in the darts left → first dart of the checkout
//! 4. ≤ 40 and odd → single 1 to leave an even score
//! 5. ≤ 40 and even → the matching double
//! 6. > 180 → T20
//! 7. Leave management: the dart that leaves the best finishable score
//!
//! T20 when nothing applies.

use std::cmp::Reverse;

use super::{first_match, AimTarget, TargetRule};
use crate::board::segment::{Segment, BULL};
use crate::checkout;

/// Leaves ranked by how comfortable they are to finish, best first.
pub const NICE_LEAVES: [u32; 8] = [32, 40, 36, 24, 16, 20, 28, 50];

/// Darts per visit
const DARTS_PER_TURN: u8 = 3;

/// Everything the X01 strategist looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct X01Context {
    pub remaining: u32,
    /// Darts already thrown in this visit (0..=2)
    pub darts_thrown: u8,
    /// Double-in game and the player has not started scoring yet
    pub needs_double_in: bool,
    pub double_out: bool,
}

impl X01Context {
    /// Double-out game, player already scoring.
    pub fn standard(remaining: u32, darts_thrown: u8) -> Self {
        Self { remaining, darts_thrown, needs_double_in: false, double_out: true }
    }

    pub fn darts_left(&self) -> u8 {
        DARTS_PER_TURN.saturating_sub(self.darts_thrown)
    }
}

pub const X01_RULES: &[TargetRule<X01Context>] = &[
    TargetRule { name: "double_in", select: double_in },
    TargetRule { name: "straight_out", select: straight_out },
    TargetRule { name: "checkout", select: checkout_first_dart },
    TargetRule { name: "odd_parity", select: odd_parity },
    TargetRule { name: "even_double", select: even_double },
    TargetRule { name: "max_scoring", select: max_scoring },
    TargetRule { name: "leave_setup", select: leave_setup },
];

/// Target for a standard double-out game.
pub fn choose_x01_target(remaining: u32, darts_thrown: u8) -> AimTarget {
    choose_x01_target_in(&X01Context::standard(remaining, darts_thrown))
}

/// Target for any X01 rule combination.
pub fn choose_x01_target_in(ctx: &X01Context) -> AimTarget {
    match first_match(X01_RULES, ctx) {
        Some((rule, target)) => {
            log::trace!("x01 {} ({} thrown): {} -> {}", ctx.remaining, ctx.darts_thrown, rule, target);
            target
        }
        None => AimTarget::treble(20),
    }
}

// ========== Rules ==========

/// Highest double that stays on the board: no overshoot, and no leave of 1
/// with double-out. D1 when nothing fits.
fn double_in(ctx: &X01Context) -> Option<AimTarget> {
    if !ctx.needs_double_in {
        return None;
    }
    let target = (1..=20u8)
        .rev()
        .find(|&n| match ctx.remaining.checked_sub(2 * n as u32) {
            Some(1) => !ctx.double_out,
            Some(_) => true,
            None => false,
        })
        .unwrap_or(1);
    Some(AimTarget::double(target))
}

fn straight_out(ctx: &X01Context) -> Option<AimTarget> {
    if ctx.double_out {
        return None;
    }
    let r = ctx.remaining;
    match r {
        1..=20 => Some(AimTarget::single(r as u8)),
        25 => Some(AimTarget::outer_bull()),
        50 => Some(AimTarget::inner_bull()),
        _ if r <= 60 && r % 3 == 0 => Some(AimTarget::treble((r / 3) as u8)),
        _ if r <= 40 && r % 2 == 0 => Some(AimTarget::double((r / 2) as u8)),
        _ => None,
    }
}

fn checkout_first_dart(ctx: &X01Context) -> Option<AimTarget> {
    let route = checkout::lookup(ctx.remaining)?;
    if route.len() > ctx.darts_left() as usize {
        return None;
    }
    route.first().map(AimTarget::from)
}

fn odd_parity(ctx: &X01Context) -> Option<AimTarget> {
    (ctx.remaining <= 40 && ctx.remaining % 2 == 1).then_some(AimTarget::single(1))
}

fn even_double(ctx: &X01Context) -> Option<AimTarget> {
    let r = ctx.remaining;
    (r >= 2 && r <= 40 && r % 2 == 0).then(|| AimTarget::double((r / 2) as u8))
}

fn max_scoring(ctx: &X01Context) -> Option<AimTarget> {
    (ctx.remaining > 180).then_some(AimTarget::treble(20))
}

/// All darts the leave search considers
fn candidate_darts() -> impl Iterator<Item = Segment> {
    (1..=20u8)
        .flat_map(|n| (1..=3u8).map(move |m| Segment::sector(n, m)))
        .chain([Segment::OUTER_BULL, Segment::INNER_BULL])
}

fn leave_setup(ctx: &X01Context) -> Option<AimTarget> {
    candidate_darts()
        .filter_map(|seg| {
            let leave = ctx.remaining.checked_sub(seg.score)?;
            if !(checkout::MIN_CHECKOUT..=checkout::MAX_CHECKOUT).contains(&leave) {
                return None;
            }
            checkout::lookup(leave)?;
            let nice_rank = NICE_LEAVES.iter().position(|&n| n == leave).unwrap_or(usize::MAX);
            Some((nice_rank, seg))
        })
        // nice leave first, then more points, then the bigger target
        .min_by_key(|(nice_rank, seg)| (*nice_rank, Reverse(seg.score), seg.multiplier))
        .map(|(_, seg)| AimTarget::from(seg))
}

// ========== Tests ==========
