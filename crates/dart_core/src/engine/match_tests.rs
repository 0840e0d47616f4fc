//! Turn engine integration tests
//!
//! Drive whole matches through the public `Match` API: human input, AI
//! visits, guards, undo and results.

use super::*;
use crate::ai::AimTarget;
use crate::board::segment::{Segment, BULL};
use crate::config::{MatchConfig, PlayerConfig};
use crate::error::DartError;

fn humans(config: MatchConfig) -> Match {
    let config = config
        .with_players(PlayerConfig::human("Ann"), PlayerConfig::human("Bob"))
        .headless(7);
    Match::new(config).unwrap()
}

fn human_vs_ai(config: MatchConfig, skill: u8) -> Match {
    let config = config
        .with_players(PlayerConfig::human("Ann"), PlayerConfig::ai("CPU", skill))
        .headless(11);
    Match::new(config).unwrap()
}

fn ai_vs_ai(config: MatchConfig, seed: u64) -> Match {
    let config = config
        .with_players(PlayerConfig::ai("Left", 9), PlayerConfig::ai("Right", 8))
        .headless(seed);
    Match::new(config).unwrap()
}

/// Play AI visits until the match ends, with a visit cap
fn play_out(m: &mut Match, max_visits: usize) {
    for _ in 0..max_visits {
        if m.is_over() {
            return;
        }
        m.run_ai_turn().unwrap();
    }
    panic!("match not finished after {} visits", max_visits);
}

fn remaining(m: &Match, player: usize) -> u32 {
    m.x01_player(player).unwrap().remaining
}

// ========== X01 ==========

#[test]
fn test_d16_from_32_checks_out() {
    let mut m = humans(MatchConfig::x01(32));
    let outcome = m.throw_dart(Segment::double(16)).unwrap();
    assert_eq!(outcome.effect, DartEffect::X01 { result: X01DartResult::Checkout, remaining: 0 });
    assert!(outcome.turn_ended);
    assert_eq!(outcome.winner, Some(0));
    assert_eq!(m.phase(), MatchPhase::GameOver { winner: 0 });
    assert_eq!(remaining(&m, 0), 0);
}

#[test]
fn test_t11_from_32_busts_after_one_dart() {
    let mut m = humans(MatchConfig::x01(32));
    let outcome = m.throw_dart(Segment::treble(11)).unwrap();
    assert_eq!(outcome.effect, DartEffect::X01 { result: X01DartResult::Bust, remaining: 32 });
    assert!(outcome.turn_ended);
    assert_eq!(outcome.dart_in_turn, 1);
    assert_eq!(m.active_player(), 1);
    assert_eq!(m.darts_thrown_this_turn(), 0);

    let p = m.x01_player(0).unwrap();
    assert_eq!(p.remaining, 32);
    assert_eq!(p.darts_thrown, 1);
    assert_eq!(p.history.last().unwrap().darts, vec![Segment::treble(11)]);
    assert!(p.history.last().unwrap().bust);
}

#[test]
fn test_visit_passes_after_three_darts() {
    let mut m = humans(MatchConfig::x01(501));
    for expected in 1..=3u8 {
        let outcome = m.throw_dart(Segment::treble(20)).unwrap();
        assert_eq!(outcome.dart_in_turn, expected);
        assert_eq!(outcome.turn_ended, expected == 3);
    }
    assert_eq!(m.active_player(), 1);
    let p = m.x01_player(0).unwrap();
    assert_eq!(p.remaining, 321);
    assert_eq!(p.stats.count_180, 1);
}

#[test]
fn test_turn_darts_track_the_visit() {
    let mut m = humans(MatchConfig::x01(501));
    m.throw_dart(Segment::single(20)).unwrap();
    m.throw_dart(Segment::single(5)).unwrap();
    assert_eq!(m.turn_darts(), &[Segment::single(20), Segment::single(5)]);
    assert_eq!(m.darts_thrown_this_turn(), 2);
}

#[test]
fn test_double_in_dead_darts() {
    let mut m = humans(MatchConfig::x01(301).with_double_in(true));
    let outcome = m.throw_dart(Segment::treble(20)).unwrap();
    assert_eq!(outcome.effect, DartEffect::X01 { result: X01DartResult::Dead, remaining: 301 });
    m.throw_dart(Segment::double(10)).unwrap();
    assert_eq!(remaining(&m, 0), 281);
    assert!(!m.x01_player(0).unwrap().needs_double_in());
    assert!(m.x01_player(1).unwrap().needs_double_in());
}

#[test]
fn test_checkout_hint() {
    let mut m = humans(MatchConfig::x01(100));
    let hint = m.checkout_hint().unwrap();
    assert_eq!(hint.darts(), &[Segment::treble(20), Segment::double(20)]);

    m.throw_dart(Segment::single(20)).unwrap();
    let hint = m.checkout_hint().unwrap();
    assert_eq!(hint.total(), 80);
    assert!(hint.len() <= 2);

    // 80 has no one-dart finish
    m.throw_dart(Segment::MISS).unwrap();
    assert!(m.checkout_hint().is_none());
}

#[test]
fn test_checkout_hint_needs_double_out_rules() {
    assert!(humans(MatchConfig::x01(100).with_double_out(false)).checkout_hint().is_none());
    assert!(humans(MatchConfig::x01(100).with_double_in(true)).checkout_hint().is_none());
    assert!(humans(MatchConfig::cricket()).checkout_hint().is_none());
}

// ========== Cricket ==========

#[test]
fn test_cricket_two_marks_then_treble() {
    let mut m = humans(MatchConfig::cricket());
    m.throw_dart(Segment::single(20)).unwrap();
    m.throw_dart(Segment::single(20)).unwrap();
    let outcome = m.throw_dart(Segment::treble(20)).unwrap();
    let DartEffect::Cricket(hit) = outcome.effect else {
        panic!("expected cricket effect");
    };
    assert_eq!(hit.marks, 1);
    let p = m.cricket_player(0).unwrap();
    assert_eq!(p.marks_on(20), 3);
    assert_eq!(p.points, 40);
}

#[test]
fn test_cricket_win_ends_visit_immediately() {
    let mut m = humans(MatchConfig::cricket());
    let visits: [[Segment; 3]; 2] = [
        [Segment::treble(20), Segment::treble(19), Segment::treble(18)],
        [Segment::treble(17), Segment::treble(16), Segment::treble(15)],
    ];
    for visit in visits {
        for seg in visit {
            m.throw_dart(seg).unwrap();
        }
        for _ in 0..3 {
            m.throw_dart(Segment::MISS).unwrap();
        }
    }
    m.throw_dart(Segment::INNER_BULL).unwrap();
    let outcome = m.throw_dart(Segment::OUTER_BULL).unwrap();
    assert_eq!(outcome.winner, Some(0));
    assert_eq!(outcome.dart_in_turn, 2);
    assert!(outcome.turn_ended);

    let p = m.cricket_player(0).unwrap();
    assert!(p.all_closed());
    assert_eq!(p.rounds, 3);
    assert_eq!(p.history.last().unwrap().darts.len(), 2);
    assert!(matches!(m.throw_dart(Segment::MISS), Err(DartError::MatchOver)));
}

#[test]
fn test_cricket_closed_but_behind_does_not_win() {
    let mut m = humans(MatchConfig::cricket());
    // Bob banks points on 20 first
    for _ in 0..3 {
        m.throw_dart(Segment::MISS).unwrap();
    }
    m.throw_dart(Segment::treble(20)).unwrap();
    m.throw_dart(Segment::treble(20)).unwrap();
    m.throw_dart(Segment::treble(20)).unwrap();
    assert_eq!(m.cricket_player(1).unwrap().points, 120);

    for visit in [
        [Segment::treble(20), Segment::treble(19), Segment::treble(18)],
        [Segment::treble(17), Segment::treble(16), Segment::treble(15)],
    ] {
        for seg in visit {
            m.throw_dart(seg).unwrap();
        }
        for _ in 0..3 {
            m.throw_dart(Segment::MISS).unwrap();
        }
    }
    m.throw_dart(Segment::INNER_BULL).unwrap();
    let outcome = m.throw_dart(Segment::OUTER_BULL).unwrap();
    assert!(m.cricket_player(0).unwrap().all_closed());
    assert_eq!(outcome.winner, None);
    assert!(!m.is_over());
}

// ========== Undo ==========

#[test]
fn test_undo_restores_pre_match_state() {
    let mut m = humans(MatchConfig::x01(101));
    let before = m.snapshot();
    let darts = [
        Segment::treble(20),
        Segment::single(1),
        Segment::single(19),
        Segment::treble(19),
        Segment::treble(20),
        Segment::MISS,
        Segment::treble(20),
        Segment::double(3),
    ];
    for seg in darts {
        m.throw_dart(seg).unwrap();
    }
    assert_ne!(m.snapshot(), before);
    for _ in 0..darts.len() {
        assert!(m.undo().unwrap());
    }
    assert_eq!(m.snapshot(), before);
    assert!(!m.undo().unwrap());
}

#[test]
fn test_undo_resurrects_finished_match() {
    let mut m = humans(MatchConfig::x01(40));
    let before_win = m.snapshot();
    m.throw_dart(Segment::double(20)).unwrap();
    assert!(m.is_over());
    assert!(m.undo().unwrap());
    assert!(!m.is_over());
    assert_eq!(m.snapshot(), before_win);
    assert_eq!(m.winner(), None);
}

#[test]
fn test_undo_steps_over_whole_ai_visit() {
    let mut m = human_vs_ai(MatchConfig::x01(501), 7);
    for _ in 0..2 {
        m.throw_dart(Segment::single(20)).unwrap();
    }
    let before_last_human_dart = m.snapshot();
    m.throw_dart(Segment::single(20)).unwrap();
    m.run_ai_turn().unwrap();
    assert_eq!(m.active_player(), 0);

    assert!(m.undo().unwrap());
    assert_eq!(m.snapshot(), before_last_human_dart);
    assert_eq!(m.undo_depth(), 2);
}

// ========== Guards ==========

#[test]
fn test_human_input_rejected_for_ai_player() {
    let mut m = human_vs_ai(MatchConfig::x01(501), 5);
    for _ in 0..3 {
        m.throw_dart(Segment::MISS).unwrap();
    }
    assert!(matches!(m.throw_dart(Segment::MISS), Err(DartError::NotHumanTurn { player: 1 })));
}

#[test]
fn test_ai_turn_rejected_for_human_player() {
    let mut m = human_vs_ai(MatchConfig::x01(501), 5);
    let err = m.begin_ai_turn().unwrap_err();
    assert!(matches!(err, DartError::NotAiTurn { player: 0 }));
    assert!(err.is_guard_violation());
}

#[test]
fn test_ai_turn_in_progress_blocks_input_and_undo() {
    let mut m = human_vs_ai(MatchConfig::x01(501), 5);
    for _ in 0..3 {
        m.throw_dart(Segment::single(1)).unwrap();
    }
    let handle = m.begin_ai_turn().unwrap();
    assert!(matches!(m.undo(), Err(DartError::AiTurnInProgress)));
    assert!(matches!(m.begin_ai_turn(), Err(DartError::AiTurnInProgress)));
    assert!(matches!(m.throw_dart(Segment::MISS), Err(DartError::AiTurnInProgress)));

    loop {
        if m.ai_throw(&handle).unwrap().turn_ended {
            break;
        }
    }
    assert!(!m.ai_turn_in_progress());
    assert!(m.undo().unwrap());
}

#[test]
fn test_abandoned_ai_turn_handle_is_stale() {
    let mut m = human_vs_ai(MatchConfig::x01(501), 5);
    for _ in 0..3 {
        m.throw_dart(Segment::single(1)).unwrap();
    }
    let handle = m.begin_ai_turn().unwrap();
    let first = m.ai_throw(&handle).unwrap();
    assert!(first.aim.is_some());
    assert!(m.abandon_ai_turn());
    assert!(!m.abandon_ai_turn());

    let err = m.ai_throw(&handle).unwrap_err();
    assert!(matches!(err, DartError::StaleAiTurn { .. }));
    // the dart already thrown stands; a fresh handle finishes the visit
    assert_eq!(m.darts_thrown_this_turn(), 1);
    let handle = m.begin_ai_turn().unwrap();
    let outcome = m.ai_throw(&handle).unwrap();
    assert_eq!(outcome.dart_in_turn, 2);
}

#[test]
fn test_rematch_invalidates_handles() {
    let mut m = ai_vs_ai(MatchConfig::x01(501), 3);
    let handle = m.begin_ai_turn().unwrap();
    let old_id = m.id();
    let new_id = m.rematch();
    assert_ne!(old_id, new_id);
    assert!(matches!(m.ai_throw(&handle), Err(DartError::StaleAiTurn { .. })));
}

// ========== AI Visits ==========

#[test]
fn test_ai_visit_throws_at_most_three() {
    let mut m = ai_vs_ai(MatchConfig::x01(501), 5);
    let darts = m.run_ai_turn().unwrap();
    assert!(!darts.is_empty() && darts.len() <= 3);
    assert!(darts.last().unwrap().turn_ended);
    assert!(darts.iter().all(|d| d.player == 0 && d.aim.is_some()));
    assert_eq!(m.active_player(), 1);
}

#[test]
fn test_ai_first_dart_aims_at_t20() {
    let mut m = ai_vs_ai(MatchConfig::x01(501), 5);
    let handle = m.begin_ai_turn().unwrap();
    let outcome = m.ai_throw(&handle).unwrap();
    assert_eq!(outcome.aim, Some(AimTarget::treble(20)));
}

#[test]
fn test_ai_x01_match_finishes() {
    let mut m = ai_vs_ai(MatchConfig::x01(501), 21);
    play_out(&mut m, 400);
    let winner = m.winner().unwrap();
    assert_eq!(remaining(&m, winner), 0);
    assert!(remaining(&m, 1 - winner) > 0);
    assert_eq!(m.x01_player(winner).unwrap().stats.checkout_hits, 1);
}

#[test]
fn test_ai_cricket_match_finishes() {
    let mut m = ai_vs_ai(MatchConfig::cricket(), 22);
    play_out(&mut m, 400);
    let winner = m.winner().unwrap();
    let me = m.cricket_player(winner).unwrap();
    let opp = m.cricket_player(1 - winner).unwrap();
    assert!(me.all_closed());
    assert!(me.points >= opp.points);
    assert!(me.marks.iter().chain(opp.marks.iter()).all(|&marks| marks <= CLOSED_MARKS));
}

#[test]
fn test_ai_double_in_matches_from_low_starts_finish() {
    for (start, seed) in [(30, 1), (41, 2), (2, 3), (5, 4)] {
        let config = MatchConfig::x01(start)
            .with_double_in(true)
            .with_players(PlayerConfig::ai("Left", 10), PlayerConfig::ai("Right", 10))
            .headless(seed);
        let mut m = Match::new(config).unwrap();
        play_out(&mut m, 400);
        assert_eq!(remaining(&m, m.winner().unwrap()), 0, "start {}", start);
    }
}

#[test]
fn test_seeded_matches_replay_identically() {
    let mut a = ai_vs_ai(MatchConfig::x01(301), 99);
    let mut b = ai_vs_ai(MatchConfig::x01(301), 99);
    play_out(&mut a, 400);
    play_out(&mut b, 400);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_cricket_ai_opens_on_bull() {
    let mut m = ai_vs_ai(MatchConfig::cricket(), 4);
    assert_eq!(m.suggest_target(), AimTarget::outer_bull());
    let darts = m.run_ai_turn().unwrap();
    // cricket visits never stop early without a win
    assert_eq!(darts.len(), 3);
    assert!(darts.iter().all(|d| d.aim.is_some_and(|a| a.number == BULL || a.number >= 15)));
}

// ========== Lifecycle ==========

#[test]
fn test_rematch_alternates_starting_player() {
    let mut m = humans(MatchConfig::x01(40));
    m.throw_dart(Segment::double(20)).unwrap();
    assert!(m.is_over());

    m.rematch();
    assert!(!m.is_over());
    assert_eq!(m.active_player(), 1);
    assert_eq!(m.undo_depth(), 0);
    assert_eq!(remaining(&m, 0), 40);

    m.rematch();
    assert_eq!(m.active_player(), 0);
}

#[test]
fn test_reset_keeps_match_id() {
    let mut m = humans(MatchConfig::x01(501));
    let id = m.id();
    m.throw_dart(Segment::treble(20)).unwrap();
    m.reset();
    assert_eq!(m.id(), id);
    assert_eq!(remaining(&m, 0), 501);
    assert!(!m.undo().unwrap());
}

#[test]
fn test_result_record() {
    let mut m = humans(MatchConfig::x01(40));
    assert!(m.result().is_none());
    m.throw_dart(Segment::double(20)).unwrap();

    let result = m.result().unwrap();
    assert_eq!(result.match_id, m.id());
    assert_eq!(result.winner, 0);
    assert_eq!(result.winner_name, "Ann");
    assert_eq!(result.players.len(), 2);
    let SummaryStats::X01 { remaining, stats } = &result.winner_summary().unwrap().stats else {
        panic!("expected x01 summary");
    };
    assert_eq!(*remaining, 0);
    assert_eq!(stats.best_checkout, 40);

    let json = result.to_json().unwrap();
    assert!(json.contains("\"winner_name\": \"Ann\""));
    let back: MatchResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = MatchConfig::x01(501).with_players(PlayerConfig::ai("a", 12), PlayerConfig::human("b"));
    assert!(matches!(Match::new(config), Err(DartError::InvalidSkill { skill: 12 })));
}
