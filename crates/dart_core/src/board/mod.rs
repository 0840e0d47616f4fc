//! Dartboard model: scoring segments and board geometry.

pub mod geometry;
pub mod segment;

pub use geometry::{
    adjacent_numbers, angle_of_number, classify_point, point_to_polar, polar_to_point,
    zone_center, BoardPoint, SECTOR_ORDER,
};
pub use segment::{Segment, BULL, MISS_NUMBER};
