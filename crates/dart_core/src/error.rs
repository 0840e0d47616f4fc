use thiserror::Error;

#[derive(Error, Debug)]
pub enum DartError {
    #[error("Match is over")]
    MatchOver,

    #[error("An AI turn is in progress")]
    AiTurnInProgress,

    #[error("Player {player} is not controlled by a human")]
    NotHumanTurn { player: usize },

    #[error("Player {player} is not controlled by the AI")]
    NotAiTurn { player: usize },

    #[error("AI turn handle is stale (generation {handle}, current {current})")]
    StaleAiTurn { handle: u64, current: u64 },

    #[error("Invalid skill: {skill} (expected 1..=10)")]
    InvalidSkill { skill: u8 },

    #[error("Invalid start score: {score}")]
    InvalidStartScore { score: u32 },

    #[error("Invalid starting player: {index}")]
    InvalidStartingPlayer { index: usize },

    #[error("Invalid segment: {0}")]
    InvalidSegment(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl DartError {
    /// Guard failures are caller bugs; parse and config failures come from outside input.
    pub fn is_guard_violation(&self) -> bool {
        matches!(
            self,
            DartError::MatchOver
                | DartError::AiTurnInProgress
                | DartError::NotHumanTurn { .. }
                | DartError::NotAiTurn { .. }
                | DartError::StaleAiTurn { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DartError>;
