//! # Match Configuration
//!
//! Everything a match needs before the first dart: rule set, the two players
//! and how the RNG and AI pacing behave.
//!
//! ## Usage
//! ```rust
//! use dart_core::config::{MatchConfig, PlayerConfig};
//!
//! let config = MatchConfig::x01(501)
//!     .with_players(PlayerConfig::human("Ann"), PlayerConfig::ai("CPU", 7));
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ai::{MAX_SKILL, MIN_SKILL};
use crate::error::{DartError, Result};

/// Env var overriding `MatchConfig::seed`
pub const ENV_SEED: &str = "DARTSIM_SEED";
/// Env var overriding `MatchConfig::ai_dart_delay_ms`
pub const ENV_AI_DELAY_MS: &str = "DARTSIM_AI_DELAY_MS";

/// Rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameMode {
    X01 { start_score: u32, double_in: bool, double_out: bool },
    Cricket,
}

impl GameMode {
    pub fn is_x01(&self) -> bool {
        matches!(self, GameMode::X01 { .. })
    }

    pub fn name(&self) -> String {
        match self {
            GameMode::X01 { start_score, .. } => start_score.to_string(),
            GameMode::Cricket => "cricket".to_string(),
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::X01 { start_score: 501, double_in: false, double_out: true }
    }
}

/// Who throws for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    /// Computer opponent, skill 1..=10
    Ai { skill: u8 },
}

impl PlayerKind {
    pub fn is_ai(&self) -> bool {
        matches!(self, PlayerKind::Ai { .. })
    }

    pub fn skill(&self) -> Option<u8> {
        match self {
            PlayerKind::Ai { skill } => Some(*skill),
            PlayerKind::Human => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: PlayerKind,
}

impl PlayerConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: PlayerKind::Human }
    }

    pub fn ai(name: impl Into<String>, skill: u8) -> Self {
        Self { name: name.into(), kind: PlayerKind::Ai { skill } }
    }
}

fn default_ai_dart_delay_ms() -> u64 {
    600
}

/// Match setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub mode: GameMode,
    pub players: [PlayerConfig; 2],
    /// Index of the player throwing first
    #[serde(default)]
    pub starting_player: usize,
    /// Fixed RNG seed; `None` seeds from entropy
    #[serde(default)]
    pub seed: Option<u64>,
    /// Display pacing between AI darts. Does not affect outcomes.
    #[serde(default = "default_ai_dart_delay_ms")]
    pub ai_dart_delay_ms: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            players: [PlayerConfig::human("Player 1"), PlayerConfig::ai("CPU", 5)],
            starting_player: 0,
            seed: None,
            ai_dart_delay_ms: default_ai_dart_delay_ms(),
        }
    }
}

impl MatchConfig {
    /// Double-out X01 from `start_score`
    pub fn x01(start_score: u32) -> Self {
        Self {
            mode: GameMode::X01 { start_score, double_in: false, double_out: true },
            ..Self::default()
        }
    }

    pub fn cricket() -> Self {
        Self { mode: GameMode::Cricket, ..Self::default() }
    }

    /// No pacing, fixed seed (tests and batch simulation)
    pub fn headless(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.ai_dart_delay_ms = 0;
        self
    }

    pub fn with_players(mut self, first: PlayerConfig, second: PlayerConfig) -> Self {
        self.players = [first, second];
        self
    }

    pub fn with_double_in(mut self, enabled: bool) -> Self {
        if let GameMode::X01 { double_in, .. } = &mut self.mode {
            *double_in = enabled;
        }
        self
    }

    pub fn with_double_out(mut self, enabled: bool) -> Self {
        if let GameMode::X01 { double_out, .. } = &mut self.mode {
            *double_out = enabled;
        }
        self
    }

    pub fn ai_dart_delay(&self) -> Duration {
        Duration::from_millis(self.ai_dart_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_player > 1 {
            return Err(DartError::InvalidStartingPlayer { index: self.starting_player });
        }
        if let GameMode::X01 { start_score, double_in, double_out } = self.mode {
            // 3 with double-in and double-out: D1 leaves 1, every other double overshoots
            if start_score < 2 || (start_score == 3 && double_in && double_out) {
                return Err(DartError::InvalidStartScore { score: start_score });
            }
        }
        for player in &self.players {
            if let Some(skill) = player.kind.skill() {
                if !(MIN_SKILL..=MAX_SKILL).contains(&skill) {
                    return Err(DartError::InvalidSkill { skill });
                }
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `DARTSIM_SEED` / `DARTSIM_AI_DELAY_MS` when set and parseable
    pub fn apply_env_overrides(mut self) -> Self {
        if let Some(seed) = env_u64(ENV_SEED) {
            self.seed = Some(seed);
        }
        if let Some(delay) = env_u64(ENV_AI_DELAY_MS) {
            self.ai_dart_delay_ms = delay;
        }
        self
    }
}

fn env_u64(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {}={:?}: not an unsigned integer", key, raw);
            None
        }
    }
}

// ========== Tests ==========
