//! # dart_core - Two-Player Darts Engine
//!
//! Board geometry, checkout solving, throw simulation, computer strategists
//! for X01 and Cricket, and a turn engine with undo.
//!
//! ## Features
//! - Deterministic with a seed (same seed = same match)
//! - Human and computer players in the same match
//! - Snapshot undo down to the first dart
//! - Serializable config and match result

pub mod ai;
pub mod board;
pub mod checkout;
pub mod config;
pub mod engine;
pub mod error;

pub use ai::{AimTarget, CricketView, X01Context};
pub use board::{classify_point, point_to_polar, polar_to_point, Segment};
pub use checkout::{Checkout, CHECKOUT_TABLE};
pub use config::{GameMode, MatchConfig, PlayerConfig, PlayerKind};
pub use engine::{AiTurnHandle, DartEffect, DartOutcome, Match, MatchPhase, MatchResult, MatchState};
pub use error::{DartError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
