//! Match loop contract tests
//!
//! 1. Determinism (byte-identical JSON, SHA-256)
//! 2. Score / event-log consistency at every minute
//! 3. Minute + phase progression, stoppage bounds
//! 4. Validation before kickoff
//! 5. Discipline, injuries, substitutions
//! 6. Finalization (summaries, repository, sinks)

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use super::*;
use crate::engine::config::EngineConfig;
use crate::engine::roster::SlotStatus;
use crate::engine::sinks::TextNarrator;
use crate::fixtures::{demo_away, demo_home, uniform_lineup};
use crate::models::{CardColor, EventKind, EventType, PlayerId, PlayerRecord, Weather};

fn engine<'a>(seed: u64) -> MatchEngine<'a> {
    MatchEngine::from_seed(&demo_home(), &demo_away(), MatchContext::default(), EngineConfig::default(), seed)
        .expect("valid lineups")
}

fn digest(json: &str) -> String {
    let hash = Sha256::digest(json.as_bytes());
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}

// ===========================================
// Determinism
// ===========================================

#[test]
fn test_same_seed_same_result() {
    let a = engine(42).simulate_full_match().to_json().expect("serialize");
    let b = engine(42).simulate_full_match().to_json().expect("serialize");
    assert_eq!(a, b);
    assert_eq!(digest(&a), digest(&b));
}

#[test]
fn test_different_seeds_diverge() {
    let results: Vec<String> = (0..5)
        .map(|seed| engine(seed).simulate_full_match().to_json().expect("serialize"))
        .collect();
    let first = &results[0];
    assert!(results.iter().skip(1).any(|r| r != first), "5 seeds produced identical matches");
}

#[test]
fn test_stepping_matches_full_run() {
    let mut stepped = engine(7);
    while !stepped.is_finished() {
        stepped.simulate_minute().expect("not finished");
    }
    let full = engine(7).simulate_full_match();
    assert_eq!(stepped.result(), full);
}

// ===========================================
// Per-minute invariants
// ===========================================

#[test]
fn test_score_matches_goal_events_every_minute() {
    for seed in 0..20 {
        let mut e = engine(seed);
        let mut last_minute = 0;
        while !e.is_finished() {
            let state = e.simulate_minute().expect("not finished").clone();
            assert!(state.minute > last_minute, "minute must strictly increase");
            last_minute = state.minute;

            let goals = |side: TeamSide| {
                state
                    .events
                    .iter()
                    .filter(|ev| ev.event_type() == EventType::Goal && ev.side == Some(side))
                    .count() as u8
            };
            assert_eq!(state.score_home, goals(TeamSide::Home));
            assert_eq!(state.score_away, goals(TeamSide::Away));
            assert_eq!(state.home.goals, state.score_home);
            assert_eq!(state.away.goals, state.score_away);
            assert!((-100.0..=100.0).contains(&state.momentum));

            for idx in 0..e.roster().len() {
                let energy = e.fatigue().energy(idx);
                assert!((0.0..=100.0).contains(&energy), "energy {} out of range", energy);
            }
        }
    }
}

#[test]
fn test_match_ends_between_90_and_97() {
    for seed in 0..30 {
        let result = engine(seed).simulate_full_match();
        assert!((90..=97).contains(&result.final_minute), "final minute {}", result.final_minute);
        assert_eq!(result.final_minute, 90 + result.stoppage_minutes);
        assert!(result.stoppage_minutes <= EngineConfig::default().flow.max_stoppage_minutes);
    }
}

#[test]
fn test_oversized_stoppage_config_is_capped() {
    let mut config = EngineConfig::default();
    config.flow.base_stoppage_minutes = 20;
    config.flow.max_stoppage_minutes = 30;
    for seed in 0..10 {
        let r = MatchEngine::from_seed(&demo_home(), &demo_away(), MatchContext::default(), config.clone(), seed)
            .expect("valid")
            .simulate_full_match();
        assert_eq!(r.stoppage_minutes, 7);
        assert_eq!(r.final_minute, 97);
        assert!(r.events.iter().all(|e| e.minute <= 97));
    }
}

#[test]
fn test_event_minutes_are_ordered() {
    let result = engine(11).simulate_full_match();
    let minutes: Vec<u8> = result.events.iter().map(|e| e.minute).collect();
    assert!(minutes.windows(2).all(|w| w[0] <= w[1]));
    assert!(result.events.iter().all(|e| e.minute <= result.final_minute));
}

#[test]
fn test_half_time_after_minute_45() {
    let mut e = engine(3);
    for _ in 0..45 {
        e.simulate_minute().expect("first half");
    }
    assert_eq!(e.state().minute, 45);
    assert_eq!(e.state().phase, MatchPhase::HalfTime);

    let state = e.simulate_minute().expect("second half");
    assert_eq!(state.minute, 46);
    assert_eq!(state.phase, MatchPhase::SecondHalf);
}

#[test]
fn test_phase_changes_in_order() {
    let result = engine(5).simulate_full_match();
    let phases: Vec<MatchPhase> = result
        .events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::PhaseChange { phase } => Some(phase),
            _ => None,
        })
        .collect();

    let expected_head = [MatchPhase::FirstHalf, MatchPhase::HalfTime, MatchPhase::SecondHalf];
    assert_eq!(&phases[..3], &expected_head);
    assert_eq!(phases.last(), Some(&MatchPhase::FullTime));
    if result.stoppage_minutes > 0 {
        assert!(phases.contains(&MatchPhase::Stoppage));
    }
}

#[test]
fn test_stats_are_consistent() {
    for seed in 0..20 {
        let r = engine(seed).simulate_full_match();
        for side in [TeamSide::Home, TeamSide::Away] {
            let s = r.stats(side);
            assert!(s.shots >= s.shots_on_target);
            assert!(s.shots_on_target >= s.goals as u16);
            assert!(s.substitutions <= 5);
            let shot_events = r.events_of(EventType::Shot).filter(|e| e.side == Some(side)).count();
            assert_eq!(shot_events, s.shots as usize);
        }
        assert!((0.0..=100.0).contains(&r.possession_home));
    }
}

// ===========================================
// Validation
// ===========================================

#[test]
fn test_ten_starters_rejected() {
    let mut home = demo_home();
    home.starters.pop();
    let err = MatchEngine::from_seed(&home, &demo_away(), MatchContext::default(), EngineConfig::default(), 1)
        .err()
        .expect("must be rejected");
    assert_eq!(err, ValidationError::StarterCount { side: TeamSide::Home, expected: 11, found: 10 });

    let err = simulate_match(&home, &demo_away(), MatchContext::default(), EngineConfig::default(), 1);
    assert!(err.is_err());
}

#[test]
fn test_player_in_both_squads_rejected() {
    let home = demo_home();
    let away = uniform_lineup("Mirror", 5, 60);
    let err = MatchEngine::from_seed(&home, &away, MatchContext::default(), EngineConfig::default(), 1)
        .err()
        .expect("overlapping ids");
    assert_eq!(err, ValidationError::PlayerInBothSquads { id: PlayerId(5) });
}

#[test]
fn test_minute_after_full_time_is_error() {
    let mut e = engine(9);
    let first = e.simulate_full_match();
    let minute = e.state().minute;
    assert_eq!(e.simulate_minute().err(), Some(StateError::MatchFinished { minute }));
    // idempotent
    assert_eq!(e.simulate_full_match(), first);
}

// ===========================================
// Balance scenarios
// ===========================================

#[test]
fn test_identical_teams_are_balanced() {
    let home = uniform_lineup("A", 1, 60);
    let away = uniform_lineup("B", 101, 60);
    let context = MatchContext::default().with_home_advantage(0.0);
    let trials = 1000;
    let total: i32 = (0..trials)
        .map(|seed| {
            simulate_match(&home, &away, context, EngineConfig::default(), seed)
                .expect("valid")
                .goal_difference()
        })
        .sum();
    let mean = total as f64 / trials as f64;
    assert!(mean.abs() < 0.2, "mean goal difference {}", mean);
}

#[test]
fn test_stronger_team_wins_more() {
    let strong = uniform_lineup("Strong", 1, 80);
    let weak = uniform_lineup("Weak", 101, 40);
    let context = MatchContext::default().with_home_advantage(0.0);
    let total: i32 = (0..200)
        .map(|seed| {
            simulate_match(&strong, &weak, context, EngineConfig::default(), seed)
                .expect("valid")
                .goal_difference()
        })
        .sum();
    assert!(total as f64 / 200.0 > 0.5, "strong side mean GD {}", total as f64 / 200.0);
}

#[test]
fn test_core_only_has_no_optional_layers() {
    let mut e = MatchEngine::from_seed(
        &demo_home(),
        &demo_away(),
        MatchContext::default().with_weather(Weather::Rain),
        EngineConfig::core_only(),
        21,
    )
    .expect("valid");
    let r = e.simulate_full_match();
    assert_eq!(r.events_of(EventType::SetPiece).count(), 0);
    assert_eq!(r.events_of(EventType::Injury).count(), 0);
    assert_eq!(e.state().momentum, 0.0);
}

#[test]
fn test_depleted_side_plays_on_to_full_time() {
    // 1..=10: only the keeper left; 0..=10: nobody left
    for first in [1usize, 0] {
        let mut e = engine(8);
        for idx in first..=10 {
            e.issue_card(idx, true);
        }
        assert_eq!(e.roster().on_pitch_count(TeamSide::Home), first);

        let r = e.simulate_full_match();
        assert!(e.is_finished());
        assert!((90..=97).contains(&r.final_minute));

        let home_attempts = r
            .events
            .iter()
            .filter(|ev| ev.side == Some(TeamSide::Home))
            .filter(|ev| matches!(ev.event_type(), EventType::Shot | EventType::Goal))
            .count();
        assert_eq!(home_attempts, 0);
        assert_eq!(r.score_home, 0);

        let away_goals = r
            .events_of(EventType::Goal)
            .filter(|ev| ev.side == Some(TeamSide::Away))
            .count();
        assert_eq!(r.score_away as usize, away_goals);
    }
}

// ===========================================
// Discipline / injuries / substitutions
// ===========================================

#[test]
fn test_second_yellow_sends_off() {
    let mut e = engine(1);
    let idx = 5;

    e.issue_card(idx, false);
    assert!(e.roster().slot(idx).is_on_pitch());
    assert_eq!(e.state().home.yellow_cards, 1);

    e.issue_card(idx, false);
    let slot = e.roster().slot(idx);
    assert_eq!(slot.status, SlotStatus::SentOff);
    assert!(slot.red_card);
    assert_eq!(e.state().home.red_cards, 1);
    assert_eq!(e.roster().on_pitch_count(TeamSide::Home), 10);

    let last = e.state().events.last().expect("card event");
    assert!(matches!(last.kind, EventKind::Card { color: CardColor::SecondYellow, .. }));
}

#[test]
fn test_third_season_yellow_triggers_suspension() {
    let mut home = demo_home();
    home.starters[3].season_yellow_cards = 2;
    let mut e = MatchEngine::from_seed(&home, &demo_away(), MatchContext::default(), EngineConfig::default(), 1)
        .expect("valid");
    e.issue_card(3, false);
    assert!(e.roster().slot(3).suspension_triggered);
    assert!(matches!(
        e.state().events.last().map(|ev| &ev.kind),
        Some(EventKind::Card { color: CardColor::Yellow, suspension_triggered: true })
    ));

    // straight red never counts towards the season tally
    e.issue_card(4, true);
    assert!(!e.roster().slot(4).suspension_triggered);
    assert_eq!(e.roster().slot(4).status, SlotStatus::SentOff);
}

#[test]
fn test_injured_keeper_replaced_by_bench_keeper() {
    let mut e = engine(2);
    e.injure(0);

    assert_eq!(e.roster().slot(0).status, SlotStatus::Injured);
    // slot 11 is the first bench player of the home side: the reserve keeper
    assert!(e.roster().slot(11).is_on_pitch());
    assert_eq!(e.roster().keeper(TeamSide::Home), Some(11));
    assert_eq!(e.state().home.injuries, 1);
    assert_eq!(e.state().home.substitutions, 1);
}

#[test]
fn test_no_replacement_when_substitutions_exhausted() {
    let mut config = EngineConfig::default();
    config.flow.max_substitutions = 0;
    let mut e = MatchEngine::from_seed(&demo_home(), &demo_away(), MatchContext::default(), config, 4)
        .expect("valid");
    e.injure(9);
    assert_eq!(e.roster().on_pitch_count(TeamSide::Home), 10);
    assert_eq!(e.state().home.substitutions, 0);
}

#[test]
fn test_fatigue_substitution_takes_most_tired() {
    let mut e = engine(6);
    e.state.minute = 59;
    let home: Vec<usize> = e.roster().on_pitch(TeamSide::Home).collect();
    for &idx in &home {
        e.fatigue.set_energy(idx, 30.0);
    }
    e.fatigue.set_energy(7, 12.0);

    // before the window opens nothing happens
    e.fatigue_substitutions();
    assert_eq!(e.state().home.substitutions, 0);

    e.state.minute = 60;
    e.fatigue_substitutions();
    assert_eq!(e.roster().slot(7).status, SlotStatus::Replaced);
    assert_eq!(e.state().home.substitutions, 1);
    // one per side per minute; away players are fresh
    assert_eq!(e.state().away.substitutions, 0);
    let last = e.state().events.last().expect("substitution event");
    assert_eq!(last.event_type(), EventType::Substitution);
    assert_eq!(last.player, Some(PlayerId(8)));
}

#[test]
fn test_replaced_players_never_return() {
    for seed in 0..20 {
        let r = engine(seed).simulate_full_match();
        let mut gone = std::collections::HashSet::new();
        for ev in r.events_of(EventType::Substitution) {
            let (out, incoming) = (ev.player.expect("out"), ev.target.expect("in"));
            assert!(!gone.contains(&incoming), "player {} came back", incoming);
            gone.insert(out);
        }
    }
}

// ===========================================
// Finalization
// ===========================================

#[test]
fn test_summaries_cover_every_squad_member() {
    let r = engine(13).simulate_full_match();
    assert_eq!(r.players.len(), 36);
    for p in &r.players {
        if p.minutes_played == 0 && !p.started {
            assert_eq!(p.rating, None);
        }
        if let Some(rating) = p.rating {
            assert!((1.0..=10.0).contains(&rating));
        }
        assert!((0.0..=100.0).contains(&p.residual_energy));
    }
    let starters = r.players.iter().filter(|p| p.started).count();
    assert_eq!(starters, 22);
}

#[test]
fn test_repository_receives_write_back() {
    let home = demo_home();
    let away = demo_away();
    let mut repo: HashMap<PlayerId, PlayerRecord> =
        home.all_players().chain(away.all_players()).map(|p| (p.id, p.clone())).collect();

    let result = {
        let mut e = MatchEngine::from_seed(&home, &away, MatchContext::default(), EngineConfig::default(), 8)
            .expect("valid")
            .with_repository(&mut repo);
        e.simulate_full_match()
    };

    let striker = result.player(PlayerId(10)).expect("starter summary");
    let record = &repo[&PlayerId(10)];
    assert_eq!(record.energy, striker.residual_energy);
    assert_eq!(record.last_match_rating, striker.rating);
    assert_eq!(record.appearances, 1);
}

#[test]
fn test_sinks_see_every_event() {
    let mut stats: Vec<MatchEvent> = Vec::new();
    let mut narrator = TextNarrator::new("Seoul United", "Busan City");
    let result = {
        let mut e = engine(17).with_statistics(&mut stats).with_narration(&mut narrator);
        e.simulate_full_match()
    };
    assert_eq!(stats, result.events);
    assert_eq!(narrator.lines().len(), result.events.len());
}
