//! # Throw Simulator
//!
//! **Aim + Error = Landed Segment**
//!
//! Skill (1..=10) → spread sigma (mm) → Gaussian offset on x and y → classify.
//!
//! Noise is applied independently on both Cartesian axes, so a throw can drift
//! into a neighbouring sector or ring without any separate "miss" branch.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::AimTarget;
use crate::board::geometry::{classify_point, zone_center, BoardPoint};
use crate::board::segment::Segment;

/// Lowest AI skill
pub const MIN_SKILL: u8 = 1;
/// Highest AI skill
pub const MAX_SKILL: u8 = 10;

// ========== Spread Model (Tuning Points) ==========

/// Spread at skill 0 (mm)
const BASE_SPREAD_MM: f64 = 70.0;
/// Exponential decay per skill level
const SPREAD_DECAY: f64 = 0.28;

/// Standard deviation of the landing offset on each axis (mm).
///
/// Skill 1 ≈ 52mm, skill 10 ≈ 4.3mm. Out-of-range skills are clamped.
pub fn spread_sigma(skill: u8) -> f64 {
    let skill = skill.clamp(MIN_SKILL, MAX_SKILL) as f64;
    BASE_SPREAD_MM * (-SPREAD_DECAY * skill).exp()
}

/// True aim point of a target.
///
/// The bull is rotationally symmetric, so its aim point sits at a uniformly
/// random angle on the ring (the inner bull collapses to the centre).
pub fn aim_point(target: AimTarget, rng: &mut impl Rng) -> BoardPoint {
    let bull_angle = if target.is_bull() { rng.gen_range(0.0..360.0) } else { 0.0 };
    // Invalid combinations never come out of the strategists; aim at the centre if one does.
    zone_center(target.number, target.multiplier, bull_angle).unwrap_or((0.0, 0.0))
}

/// Gaussian offset `(dx, dy)` in mm for the given skill
pub fn sample_offset(skill: u8, rng: &mut impl Rng) -> (f64, f64) {
    match Normal::new(0.0, spread_sigma(skill)) {
        Ok(normal) => (normal.sample(rng), normal.sample(rng)),
        // sigma is always finite and positive
        Err(_) => (0.0, 0.0),
    }
}

/// Throw one dart at `target` and return where it landed.
///
/// Never fails: anything beyond the double ring is `Segment::MISS`.
///
/// # Example
/// ```
/// use dart_core::ai::{throw_at, AimTarget};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let landed = throw_at(AimTarget::treble(20), 10, &mut rng);
/// assert!(landed.number <= 25);
/// ```
pub fn throw_at(target: AimTarget, skill: u8, rng: &mut impl Rng) -> Segment {
    let (x, y) = aim_point(target, rng);
    let (dx, dy) = sample_offset(skill, rng);
    let landed = classify_point(x + dx, y + dy);
    log::trace!("aim {} skill {} -> {}", target, skill, landed);
    landed
}

// ========== Tests ==========
