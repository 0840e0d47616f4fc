//! # Turn Engine
//!
//! Owns one match: both players' state, the active visit, the undo stack and
//! the RNG used for computer throws.
//!
//! ## State Machine
//! ```text
//! AwaitingDart ──dart──▶ visit continues ──▶ AwaitingDart
//!                     └▶ visit over ──▶ AwaitingDart (other player)
//!                     └▶ checkout / cricket win ──▶ GameOver
//! ```
//! Every transition happens synchronously inside `throw_dart` or `ai_throw`.
//!
//! ## Human vs AI input
//! - Human darts go through `throw_dart`. A snapshot is pushed first, so each
//!   human dart can be undone on its own.
//! - AI visits start with `begin_ai_turn`, which hands out an `AiTurnHandle`.
//!   Each `ai_throw(&handle)` throws one dart; the caller paces them with
//!   `ai_dart_delay()`. No snapshots are taken inside an AI visit, so undo
//!   steps back over it as a whole.
//! - `abandon_ai_turn`, `reset` and `rematch` bump the generation. A handle
//!   from an older generation is rejected with `StaleAiTurn`.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cricket::{self, CricketDartEffect, CricketPlayerState};
use super::result::{MatchResult, PlayerSummary, SummaryStats};
use super::snapshot::{MatchPhase, MatchState, Players, UndoStack};
use super::x01::{self, X01DartResult, X01PlayerState};
use crate::ai::{
    choose_cricket_target, choose_x01_target_in, throw_at, AimTarget, CricketView, X01Context, MIN_SKILL,
};
use crate::board::segment::Segment;
use crate::checkout::{self, Checkout};
use crate::config::MatchConfig;
use crate::error::{DartError, Result};

/// Ticket for one AI visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTurnHandle {
    generation: u64,
    player: usize,
}

impl AiTurnHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn player(&self) -> usize {
        self.player
    }
}

/// Mode-specific effect of one dart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DartEffect {
    X01 { result: X01DartResult, remaining: u32 },
    Cricket(CricketDartEffect),
}

/// Everything the presentation layer needs about the dart that just landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DartOutcome {
    pub player: usize,
    /// 1..=3
    pub dart_in_turn: u8,
    /// Computer darts only
    pub aim: Option<AimTarget>,
    pub segment: Segment,
    pub effect: DartEffect,
    /// The visit ended with this dart (3 darts, bust, checkout or win)
    pub turn_ended: bool,
    pub winner: Option<usize>,
}

pub struct Match {
    config: MatchConfig,
    id: Uuid,
    starting_player: usize,
    state: MatchState,
    undo: UndoStack,
    rng: ChaCha8Rng,
    generation: u64,
    ai_turn: Option<AiTurnHandle>,
}

impl Match {
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let starting_player = config.starting_player;
        let state = MatchState::new(&config.mode, starting_player);
        let id = Uuid::new_v4();
        log::info!(
            "match {} started: {} - {} vs {}",
            id,
            config.mode.name(),
            config.players[0].name,
            config.players[1].name
        );
        Ok(Self {
            config,
            id,
            starting_player,
            state,
            undo: UndoStack::new(),
            rng,
            generation: 0,
            ai_turn: None,
        })
    }

    // ========== Queries ==========

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn active_player(&self) -> usize {
        self.state.active
    }

    pub fn is_ai_player(&self, player: usize) -> bool {
        self.config.players.get(player).is_some_and(|p| p.kind.is_ai())
    }

    pub fn darts_thrown_this_turn(&self) -> usize {
        self.state.turn.darts_thrown()
    }

    /// Darts landed so far in the current visit
    pub fn turn_darts(&self) -> &[Segment] {
        &self.state.turn.darts
    }

    pub fn winner(&self) -> Option<usize> {
        match self.state.phase {
            MatchPhase::GameOver { winner } => Some(winner),
            MatchPhase::AwaitingDart => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn players(&self) -> &Players {
        &self.state.players
    }

    pub fn x01_player(&self, index: usize) -> Option<&X01PlayerState> {
        match &self.state.players {
            Players::X01 { players, .. } => players.get(index),
            Players::Cricket { .. } => None,
        }
    }

    pub fn cricket_player(&self, index: usize) -> Option<&CricketPlayerState> {
        match &self.state.players {
            Players::Cricket { players } => players.get(index),
            Players::X01 { .. } => None,
        }
    }

    /// Deep copy of the mutable state
    pub fn snapshot(&self) -> MatchState {
        self.state.clone()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ai_turn_in_progress(&self) -> bool {
        self.ai_turn.is_some()
    }

    pub fn ai_dart_delay(&self) -> Duration {
        self.config.ai_dart_delay()
    }

    /// What the strategist would aim at for the active player's next dart
    pub fn suggest_target(&self) -> AimTarget {
        let active = self.state.active;
        let thrown = self.state.turn.darts_thrown() as u8;
        match &self.state.players {
            Players::X01 { rules, players } => {
                let p = &players[active];
                choose_x01_target_in(&X01Context {
                    remaining: p.remaining,
                    darts_thrown: thrown,
                    needs_double_in: p.needs_double_in(),
                    double_out: rules.double_out,
                })
            }
            Players::Cricket { players } => {
                let me = &players[active];
                let opp = &players[1 - active];
                choose_cricket_target(&CricketView {
                    own_marks: me.marks,
                    opp_marks: opp.marks,
                    own_points: me.points,
                    opp_points: opp.points,
                })
            }
        }
    }

    /// Double-out finish for the active X01 player that fits in the darts
    /// left this visit.
    pub fn checkout_hint(&self) -> Option<&'static Checkout> {
        if self.is_over() {
            return None;
        }
        let Players::X01 { rules, players } = &self.state.players else {
            return None;
        };
        let p = &players[self.state.active];
        if !rules.double_out || p.needs_double_in() {
            return None;
        }
        checkout::lookup(p.remaining).filter(|c| c.len() <= self.state.turn.darts_left())
    }

    // ========== Human Input ==========

    /// Apply a dart entered for the active (human) player.
    pub fn throw_dart(&mut self, segment: Segment) -> Result<DartOutcome> {
        if self.is_over() {
            return Err(DartError::MatchOver);
        }
        if self.ai_turn.is_some() {
            return Err(DartError::AiTurnInProgress);
        }
        let player = self.state.active;
        if self.is_ai_player(player) {
            return Err(DartError::NotHumanTurn { player });
        }

        self.undo.push(&self.state);
        Ok(self.apply(segment, None))
    }

    /// Restore the state before the most recent human dart.
    /// `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        if self.ai_turn.is_some() {
            return Err(DartError::AiTurnInProgress);
        }
        match self.undo.pop() {
            Some(previous) => {
                self.state = previous;
                log::info!("undo: player {} to throw, {} left on stack", self.state.active, self.undo.len());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ========== AI Turns ==========

    pub fn begin_ai_turn(&mut self) -> Result<AiTurnHandle> {
        if self.is_over() {
            return Err(DartError::MatchOver);
        }
        if self.ai_turn.is_some() {
            return Err(DartError::AiTurnInProgress);
        }
        let player = self.state.active;
        if !self.is_ai_player(player) {
            return Err(DartError::NotAiTurn { player });
        }

        self.generation += 1;
        let handle = AiTurnHandle { generation: self.generation, player };
        self.ai_turn = Some(handle);
        log::debug!("ai turn {} begins for player {}", handle.generation, player);
        Ok(handle)
    }

    /// Throw the next dart of the AI visit identified by `handle`.
    pub fn ai_throw(&mut self, handle: &AiTurnHandle) -> Result<DartOutcome> {
        if self.ai_turn != Some(*handle) {
            log::warn!("rejecting stale ai turn handle {} (current {})", handle.generation, self.generation);
            return Err(DartError::StaleAiTurn { handle: handle.generation, current: self.generation });
        }

        let skill = self.config.players[handle.player].kind.skill().unwrap_or(MIN_SKILL);
        let aim = self.suggest_target();
        let segment = throw_at(aim, skill, &mut self.rng);
        let outcome = self.apply(segment, Some(aim));
        if outcome.turn_ended {
            self.ai_turn = None;
        }
        Ok(outcome)
    }

    /// Run a whole AI visit without pacing.
    pub fn run_ai_turn(&mut self) -> Result<Vec<DartOutcome>> {
        let handle = self.begin_ai_turn()?;
        let mut darts = Vec::with_capacity(3);
        loop {
            let outcome = self.ai_throw(&handle)?;
            darts.push(outcome);
            if outcome.turn_ended {
                return Ok(darts);
            }
        }
    }

    /// Cancel the running AI visit. Darts it already threw stand; a new
    /// `begin_ai_turn` continues the same visit.
    pub fn abandon_ai_turn(&mut self) -> bool {
        match self.ai_turn.take() {
            Some(handle) => {
                self.generation += 1;
                log::info!("ai turn {} abandoned", handle.generation);
                true
            }
            None => false,
        }
    }

    // ========== Lifecycle ==========

    /// Start the same fixture again from scratch.
    pub fn reset(&mut self) {
        self.abandon_ai_turn();
        self.generation += 1;
        self.state = MatchState::new(&self.config.mode, self.starting_player);
        self.undo.clear();
    }

    /// New match between the same players; the other player throws first.
    pub fn rematch(&mut self) -> Uuid {
        self.starting_player = 1 - self.starting_player;
        self.id = Uuid::new_v4();
        self.reset();
        log::info!("rematch {}: player {} throws first", self.id, self.starting_player);
        self.id
    }

    /// Result record once the match is over
    pub fn result(&self) -> Option<MatchResult> {
        let winner = self.winner()?;
        let players = (0..2).map(|i| self.summary(i)).collect();
        Some(MatchResult {
            match_id: self.id,
            mode: self.config.mode,
            winner,
            winner_name: self.config.players[winner].name.clone(),
            players,
            recorded_at: chrono::Utc::now(),
        })
    }

    fn summary(&self, index: usize) -> PlayerSummary {
        let stats = match &self.state.players {
            Players::X01 { players, .. } => SummaryStats::X01 {
                remaining: players[index].remaining,
                stats: players[index].stats.clone(),
            },
            Players::Cricket { players } => SummaryStats::Cricket {
                marks: players[index].marks,
                points: players[index].points,
                stats: players[index].stats.clone(),
            },
        };
        PlayerSummary {
            name: self.config.players[index].name.clone(),
            is_ai: self.is_ai_player(index),
            darts_thrown: self.state.players.darts_thrown(index),
            rounds: self.state.players.rounds(index),
            stats,
        }
    }

    // ========== Dart Application ==========

    fn apply(&mut self, segment: Segment, aim: Option<AimTarget>) -> DartOutcome {
        let MatchState { players, active, turn, phase } = &mut self.state;
        let player = *active;
        let dart_in_turn = turn.darts_thrown() as u8 + 1;

        let (effect, turn_ended, won) = match players {
            Players::X01 { rules, players } => {
                let p = &mut players[player];
                let result = x01::apply_dart(p, turn, segment, rules);
                let ended = result.ends_turn() || turn.is_full();
                if ended {
                    x01::finish_turn(p, turn, result == X01DartResult::Bust, result == X01DartResult::Checkout);
                }
                match result {
                    X01DartResult::Bust => log::info!("player {} bust on {} (back to {})", player, segment, p.remaining),
                    X01DartResult::Checkout => log::info!("player {} checked out {}", player, turn.start_remaining),
                    _ => {}
                }
                let effect = DartEffect::X01 { result, remaining: p.remaining };
                (effect, ended, result == X01DartResult::Checkout)
            }
            Players::Cricket { players } => {
                let (me, opp) = pair_mut(players, player);
                let hit = cricket::apply_dart(me, opp, turn, segment);
                let won = cricket::has_won(me, opp);
                let ended = won || turn.is_full();
                if ended {
                    cricket::finish_turn(me, turn);
                }
                (DartEffect::Cricket(hit), ended, won)
            }
        };

        log::debug!("player {} dart {}: {} -> {:?}", player, dart_in_turn, segment, effect);

        let winner = if won {
            *phase = MatchPhase::GameOver { winner: player };
            log::info!("player {} wins", player);
            Some(player)
        } else {
            if turn_ended {
                *active = 1 - player;
                *turn = players.open_turn(*active);
            }
            None
        };

        DartOutcome { player, dart_in_turn, aim, segment, effect, turn_ended, winner }
    }
}

/// Thrower and opponent as disjoint borrows
fn pair_mut<T>(pair: &mut [T; 2], first: usize) -> (&mut T, &T) {
    let (a, b) = pair.split_at_mut(1);
    if first == 0 {
        (&mut a[0], &b[0])
    } else {
        (&mut b[0], &a[0])
    }
}
