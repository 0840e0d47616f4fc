//! Computer opponent: where to aim, and where the dart actually lands.
//!
//! ## Evaluation Order
//! Both strategists are an ordered list of `TargetRule`s. Rules are always
//! checked in the same sequence and the first one that yields a target wins,
//! so each rung of the ladder can be tested on its own.
//!
//! Strategists are re-run before every dart, never once per turn.

pub mod cricket_strategy;
pub mod throw_sim;
pub mod x01_strategy;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::segment::{Segment, BULL};

pub use cricket_strategy::{choose_cricket_target, CricketView, CRICKET_RULES};
pub use throw_sim::{spread_sigma, throw_at, MAX_SKILL, MIN_SKILL};
pub use x01_strategy::{choose_x01_target, choose_x01_target_in, X01Context, X01_RULES};

/// Where the thrower is aiming. An intent, not an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AimTarget {
    pub number: u8,
    pub multiplier: u8,
}

impl AimTarget {
    pub const fn single(number: u8) -> Self {
        Self { number, multiplier: 1 }
    }

    pub const fn double(number: u8) -> Self {
        Self { number, multiplier: 2 }
    }

    pub const fn treble(number: u8) -> Self {
        Self { number, multiplier: 3 }
    }

    pub const fn outer_bull() -> Self {
        Self { number: BULL, multiplier: 1 }
    }

    pub const fn inner_bull() -> Self {
        Self { number: BULL, multiplier: 2 }
    }

    pub fn is_bull(&self) -> bool {
        self.number == BULL
    }

    /// Segment this target would score if hit exactly.
    pub fn intended_segment(&self) -> Option<Segment> {
        Segment::new(self.number, self.multiplier).ok()
    }
}

impl From<Segment> for AimTarget {
    fn from(seg: Segment) -> Self {
        Self { number: seg.number, multiplier: seg.multiplier }
    }
}

impl fmt::Display for AimTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.intended_segment() {
            Some(seg) => write!(f, "{}", seg),
            None => write!(f, "{}x{}", self.number, self.multiplier),
        }
    }
}

/// One rung of a targeting ladder
pub struct TargetRule<C> {
    /// Stable name, used in logs and tests
    pub name: &'static str,
    /// Returns a target when the rule applies
    pub select: fn(&C) -> Option<AimTarget>,
}

/// Evaluate `rules` in order; the first rule that yields a target wins.
pub fn first_match<C>(rules: &[TargetRule<C>], ctx: &C) -> Option<(&'static str, AimTarget)> {
    rules.iter().find_map(|rule| (rule.select)(ctx).map(|target| (rule.name, target)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_target_display() {
        assert_eq!(AimTarget::treble(20).to_string(), "T20");
        assert_eq!(AimTarget::inner_bull().to_string(), "BULL");
        assert_eq!(AimTarget::outer_bull().to_string(), "25");
        assert_eq!(AimTarget::single(1).to_string(), "1");
    }

    #[test]
    fn test_from_segment() {
        assert_eq!(AimTarget::from(Segment::double(16)), AimTarget::double(16));
        assert_eq!(AimTarget::from(Segment::INNER_BULL), AimTarget::inner_bull());
    }

    #[test]
    fn test_first_match_order() {
        let rules: [TargetRule<u32>; 3] = [
            TargetRule { name: "never", select: |_| None },
            TargetRule { name: "small", select: |v| (*v < 10).then(|| AimTarget::single(1)) },
            TargetRule { name: "always", select: |_| Some(AimTarget::treble(20)) },
        ];
        assert_eq!(first_match(&rules, &3), Some(("small", AimTarget::single(1))));
        assert_eq!(first_match(&rules, &30), Some(("always", AimTarget::treble(20))));
        assert_eq!(first_match(&rules[..1], &30), None);
    }
}
