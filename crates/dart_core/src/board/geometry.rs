//! Board geometry and point classification
//!
//! ## Coordinate System
//!
//! **Board coordinates** (millimetres, origin at the centre of the bull):
//! - X grows to the right
//! - Y grows downward (screen convention, so a tap position can be fed in as-is)
//!
//! **Polar coordinates**:
//! - angle 0 = topmost point of the board, increasing clockwise, range [0, 360)
//! - radius in millimetres from the centre
//!
//! Both the throw simulator and a human tap go through `classify_point`, so the
//! two input paths always score a given point identically.

use super::segment::{Segment, BULL};

/// Regulation board dimensions (mm)
pub mod dims {
    /// Inner bull (50) outer edge
    pub const INNER_BULL_R: f64 = 6.35;
    /// Outer bull (25) outer edge
    pub const OUTER_BULL_R: f64 = 15.9;
    /// Treble ring inner edge
    pub const TREBLE_INNER_R: f64 = 99.0;
    /// Treble ring outer edge
    pub const TREBLE_OUTER_R: f64 = 107.0;
    /// Double ring inner edge
    pub const DOUBLE_INNER_R: f64 = 162.0;
    /// Double ring outer edge; anything beyond is a miss
    pub const DOUBLE_OUTER_R: f64 = 170.0;

    /// Angular width of one numbered sector
    pub const SECTOR_DEG: f64 = 18.0;
}

/// Sector numbers clockwise from the top.
pub const SECTOR_ORDER: [u8; 20] = [20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5];

/// Position in board millimetres (x, y)
pub type BoardPoint = (f64, f64);

fn sector_index(number: u8) -> Option<usize> {
    SECTOR_ORDER.iter().position(|&n| n == number)
}

/// Centre angle of a numbered sector (degrees). `None` for 0, 25 and off-board numbers.
pub fn angle_of_number(number: u8) -> Option<f64> {
    sector_index(number).map(|idx| idx as f64 * dims::SECTOR_DEG)
}

/// Neighbouring sector numbers `(counter-clockwise, clockwise)`.
pub fn adjacent_numbers(number: u8) -> Option<(u8, u8)> {
    let idx = sector_index(number)?;
    let left = SECTOR_ORDER[(idx + SECTOR_ORDER.len() - 1) % SECTOR_ORDER.len()];
    let right = SECTOR_ORDER[(idx + 1) % SECTOR_ORDER.len()];
    Some((left, right))
}

/// Polar (degrees, mm) → board point
pub fn polar_to_point(angle_deg: f64, radius_mm: f64) -> BoardPoint {
    let rad = angle_deg.to_radians();
    (radius_mm * rad.sin(), -radius_mm * rad.cos())
}

/// Board point → polar (degrees in [0, 360), mm)
pub fn point_to_polar(x: f64, y: f64) -> (f64, f64) {
    let radius = x.hypot(y);
    let mut angle = x.atan2(-y).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    // atan2 can round a tiny negative angle up to exactly 360
    if angle >= 360.0 {
        angle -= 360.0;
    }
    (angle, radius)
}

/// Number of the sector containing `angle_deg`.
fn number_at_angle(angle_deg: f64) -> u8 {
    let shifted = (angle_deg + dims::SECTOR_DEG / 2.0).rem_euclid(360.0);
    let idx = (shifted / dims::SECTOR_DEG) as usize % SECTOR_ORDER.len();
    SECTOR_ORDER[idx]
}

/// Resolve a board point to the zone it lands in.
///
/// Radius is checked outside-in for the miss, then the bulls, then the sector
/// by angle, then the ring. Ring edges are inclusive; a point exactly on an
/// edge goes to whichever ring is tested first (bull, treble, double).
pub fn classify_point(x: f64, y: f64) -> Segment {
    let (angle, radius) = point_to_polar(x, y);

    if radius > dims::DOUBLE_OUTER_R {
        return Segment::MISS;
    }
    if radius <= dims::INNER_BULL_R {
        return Segment::INNER_BULL;
    }
    if radius <= dims::OUTER_BULL_R {
        return Segment::OUTER_BULL;
    }

    let number = number_at_angle(angle);
    let multiplier = if (dims::TREBLE_INNER_R..=dims::TREBLE_OUTER_R).contains(&radius) {
        3
    } else if (dims::DOUBLE_INNER_R..=dims::DOUBLE_OUTER_R).contains(&radius) {
        2
    } else {
        1
    };
    Segment::sector(number, multiplier)
}

/// Radius of the middle of a ring. Singles use the inner single area.
pub fn ring_center_radius(number: u8, multiplier: u8) -> Option<f64> {
    match (number, multiplier) {
        (BULL, 2) => Some(0.0),
        (BULL, 1) => Some((dims::INNER_BULL_R + dims::OUTER_BULL_R) / 2.0),
        (1..=20, 1) => Some((dims::OUTER_BULL_R + dims::TREBLE_INNER_R) / 2.0),
        (1..=20, 2) => Some((dims::DOUBLE_INNER_R + dims::DOUBLE_OUTER_R) / 2.0),
        (1..=20, 3) => Some((dims::TREBLE_INNER_R + dims::TREBLE_OUTER_R) / 2.0),
        _ => None,
    }
}

/// Aim point of a zone.
///
/// The bull rings are rotationally symmetric, so `bull_angle_deg` picks where on
/// the ring to aim; it is ignored for numbered sectors.
pub fn zone_center(number: u8, multiplier: u8, bull_angle_deg: f64) -> Option<BoardPoint> {
    let radius = ring_center_radius(number, multiplier)?;
    let angle = if number == BULL { bull_angle_deg } else { angle_of_number(number)? };
    Some(polar_to_point(angle, radius))
}

// ========== Tests ==========
