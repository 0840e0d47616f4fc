//! Finished-match record handed to whoever persists profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cricket::CricketStats;
use super::x01::X01Stats;
use crate::config::GameMode;

/// Mode-specific end-of-match figures for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SummaryStats {
    X01 { remaining: u32, stats: X01Stats },
    Cricket { marks: [u8; 7], points: u32, stats: CricketStats },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub is_ai: bool,
    pub darts_thrown: u32,
    pub rounds: u32,
    pub stats: SummaryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: Uuid,
    pub mode: GameMode,
    pub winner: usize,
    pub winner_name: String,
    pub players: Vec<PlayerSummary>,
    pub recorded_at: DateTime<Utc>,
}

impl MatchResult {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn winner_summary(&self) -> Option<&PlayerSummary> {
        self.players.get(self.winner)
    }
}
