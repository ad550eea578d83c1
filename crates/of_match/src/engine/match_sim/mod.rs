//! Match Simulation Engine
//!
//! Minute-by-minute state machine. Each call to [`MatchEngine::simulate_minute`]
//! plays exactly one minute; [`MatchEngine::simulate_full_match`] drives to
//! full time from wherever the match currently is.
//!
//! ## Per-minute order
//!
//! | # | Step        | Module            |
//! |---|-------------|-------------------|
//! | 1 | fatigue     | `mod.rs`          |
//! | 2 | possession  | `attack.rs`       |
//! | 3 | action      | `attack.rs`, `set_pieces.rs` |
//! | 4 | fouls/cards | `discipline.rs`   |
//! | 5 | injuries    | `substitutions.rs`|
//! | 6 | fatigue subs| `substitutions.rs`|
//! | 7 | transitions | `mod.rs`          |
//!
//! ## Determinism
//!
//! One `ChaCha8Rng` per match, consumed in a fixed order. Same lineups,
//! context, config and seed → byte-identical serialized `MatchResult`.

mod attack;
mod discipline;
mod set_pieces;
mod substitutions;

#[cfg(test)]
mod tests;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, trace};

use super::config::EngineConfig;
use super::duel::{team_sector_rating, Sector};
use super::fatigue::{FatigueTracker, PauseKind};
use super::momentum::MomentumTracker;
use super::phase::{MatchPhase, HALF_TIME_MINUTE, REGULATION_MINUTES};
use super::providers::{MoraleProvider, Neutral, PersonalityProvider};
use super::roster::Roster;
use super::sinks::{NarrationSink, StatisticsSink};
use crate::error::{StateError, ValidationError};
use crate::models::{
    AttributeSnapshot, EffectiveAttributes, MatchContext, MatchEvent, MatchResult,
    PlayerMatchSummary, PlayerRepository, Position, Tactics, TeamLineup, TeamSide, TeamStats,
};

/// Observable state between two minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// Last minute played (0 before kickoff)
    pub minute: u8,
    pub phase: MatchPhase,
    pub score_home: u8,
    pub score_away: u8,
    pub home: TeamStats,
    pub away: TeamStats,
    pub momentum: f32,
    /// Decided at the end of minute 90
    pub stoppage_minutes: Option<u8>,
    pub events: Vec<MatchEvent>,
}

impl MatchState {
    fn new() -> Self {
        Self {
            minute: 0,
            phase: MatchPhase::PreMatch,
            score_home: 0,
            score_away: 0,
            home: TeamStats::default(),
            away: TeamStats::default(),
            momentum: 0.0,
            stoppage_minutes: None,
            events: Vec::new(),
        }
    }

    pub fn stats(&self, side: TeamSide) -> &TeamStats {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub(crate) fn stats_mut(&mut self, side: TeamSide) -> &mut TeamStats {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn score(&self) -> (u8, u8) {
        (self.score_home, self.score_away)
    }

    /// Minute the match ends on, once stoppage time is known.
    pub fn final_minute(&self) -> Option<u8> {
        self.stoppage_minutes.map(|k| REGULATION_MINUTES.saturating_add(k))
    }
}

pub struct MatchEngine<'a> {
    home_name: String,
    away_name: String,
    tactics: [Tactics; 2],
    context: MatchContext,
    config: EngineConfig,
    rng: ChaCha8Rng,
    roster: Roster,
    fatigue: FatigueTracker,
    momentum: MomentumTracker,
    state: MatchState,
    /// Side that attacked in the previous minute
    possession: TeamSide,
    summaries: Vec<PlayerMatchSummary>,
    narration: Option<&'a mut dyn NarrationSink>,
    statistics: Option<&'a mut dyn StatisticsSink>,
    repository: Option<&'a mut dyn PlayerRepository>,
}

impl<'a> MatchEngine<'a> {
    /// Validate both lineups and build all per-match state.
    pub fn new(
        home: &TeamLineup,
        away: &TeamLineup,
        context: MatchContext,
        config: EngineConfig,
        rng: ChaCha8Rng,
    ) -> Result<Self, ValidationError> {
        Self::with_providers(home, away, context, config, rng, &Neutral, &Neutral)
    }

    pub fn from_seed(
        home: &TeamLineup,
        away: &TeamLineup,
        context: MatchContext,
        config: EngineConfig,
        seed: u64,
    ) -> Result<Self, ValidationError> {
        Self::new(home, away, context, config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Providers are queried once per player here and never again.
    pub fn with_providers(
        home: &TeamLineup,
        away: &TeamLineup,
        context: MatchContext,
        config: EngineConfig,
        rng: ChaCha8Rng,
        personality: &dyn PersonalityProvider,
        morale: &dyn MoraleProvider,
    ) -> Result<Self, ValidationError> {
        home.validate(TeamSide::Home)?;
        away.validate(TeamSide::Away)?;
        let home_ids: HashSet<_> = home.all_players().map(|p| p.id).collect();
        if let Some(dup) = away.all_players().find(|p| home_ids.contains(&p.id)) {
            return Err(ValidationError::PlayerInBothSquads { id: dup.id });
        }

        let roster = Roster::build(home, away, personality, morale);
        let energy = home.all_players().chain(away.all_players()).map(|p| p.energy);
        let fatigue = FatigueTracker::new(config.stamina.clone(), energy);
        let momentum = MomentumTracker::new(config.momentum.clone());

        Ok(Self {
            home_name: home.name.clone(),
            away_name: away.name.clone(),
            tactics: [home.tactics, away.tactics],
            context,
            config,
            rng,
            roster,
            fatigue,
            momentum,
            state: MatchState::new(),
            possession: TeamSide::Home,
            summaries: Vec::new(),
            narration: None,
            statistics: None,
            repository: None,
        })
    }

    pub fn with_narration(mut self, sink: &'a mut dyn NarrationSink) -> Self {
        self.narration = Some(sink);
        self
    }

    pub fn with_statistics(mut self, sink: &'a mut dyn StatisticsSink) -> Self {
        self.statistics = Some(sink);
        self
    }

    /// Receives one summary per squad member at full time.
    pub fn with_repository(mut self, repository: &'a mut dyn PlayerRepository) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn fatigue(&self) -> &FatigueTracker {
        &self.fatigue
    }

    pub fn is_finished(&self) -> bool {
        self.state.phase.is_finished()
    }

    /// Play one minute.
    pub fn simulate_minute(&mut self) -> Result<&MatchState, StateError> {
        if self.is_finished() {
            return Err(StateError::MatchFinished { minute: self.state.minute });
        }
        self.step();
        Ok(&self.state)
    }

    /// Drive to full time and return the result. Idempotent once finished.
    pub fn simulate_full_match(&mut self) -> MatchResult {
        while !self.is_finished() {
            self.step();
        }
        self.result()
    }

    /// Result view of the current state (complete once finished).
    pub fn result(&self) -> MatchResult {
        let total = self.state.home.possession_minutes + self.state.away.possession_minutes;
        let possession_home = if total == 0 {
            50.0
        } else {
            (self.state.home.possession_minutes as f32 / total as f32 * 1000.0).round() / 10.0
        };
        MatchResult {
            home_team: self.home_name.clone(),
            away_team: self.away_name.clone(),
            score_home: self.state.score_home,
            score_away: self.state.score_away,
            home: self.state.home.clone(),
            away: self.state.away.clone(),
            possession_home,
            stoppage_minutes: self.state.stoppage_minutes.unwrap_or(0),
            final_minute: self.state.minute,
            events: self.state.events.clone(),
            players: self.summaries.clone(),
        }
    }

    // ===========================================
    // Minute loop
    // ===========================================

    fn step(&mut self) {
        match self.state.phase {
            MatchPhase::PreMatch => {
                info!(home = %self.home_name, away = %self.away_name, "kickoff");
                self.set_phase(MatchPhase::FirstHalf);
            }
            MatchPhase::HalfTime => {
                self.possession = TeamSide::Away;
                self.set_phase(MatchPhase::SecondHalf);
            }
            _ => {}
        }

        self.state.minute += 1;
        let minute = self.state.minute;
        if minute > REGULATION_MINUTES && self.state.phase != MatchPhase::Stoppage {
            self.set_phase(MatchPhase::Stoppage);
        }
        trace!(minute, phase = ?self.state.phase, "minute start");

        self.drain_fatigue();
        let attacker = self.choose_attacker();
        if self.roll(self.config.flow.effective_action_probability()) {
            self.attacking_phase(attacker);
        }
        self.foul_phase(attacker);
        self.injury_phase();
        self.fatigue_substitutions();

        self.momentum.end_minute();
        self.state.momentum = self.momentum.value();

        self.end_of_minute();
    }

    fn end_of_minute(&mut self) {
        let minute = self.state.minute;
        if minute == HALF_TIME_MINUTE {
            self.rest_all(PauseKind::HalfTime);
            self.set_phase(MatchPhase::HalfTime);
            return;
        }
        if minute == REGULATION_MINUTES {
            let k = self.draw_stoppage();
            self.state.stoppage_minutes = Some(k);
            debug!(stoppage = k, "added time");
        }
        if let Some(final_minute) = self.state.final_minute() {
            if minute >= final_minute {
                self.finalize();
            }
        }
    }

    /// `min(max, base + countable/2 + rng(0..=2))`, countable = goals + reds + subs.
    /// Never more than 7.
    fn draw_stoppage(&mut self) -> u8 {
        let countable: u32 = [&self.state.home, &self.state.away]
            .iter()
            .map(|s| s.goals as u32 + s.red_cards as u32 + s.substitutions as u32)
            .sum();
        let jitter: u32 = self.rng.gen_range(0..=2);
        let flow = &self.config.flow;
        let k = flow.effective_base_stoppage() as u32 + countable / 2 + jitter;
        k.min(flow.effective_max_stoppage() as u32) as u8
    }

    fn set_phase(&mut self, phase: MatchPhase) {
        self.state.phase = phase;
        self.emit(MatchEvent::phase_change(self.state.minute, phase));
    }

    fn finalize(&mut self) {
        let final_minute = self.state.minute;
        self.summaries = self
            .roster
            .slots()
            .iter()
            .enumerate()
            .map(|(idx, slot)| {
                let residual = self.fatigue.energy(idx);
                PlayerMatchSummary {
                    player_id: slot.id,
                    name: slot.name.clone(),
                    side: slot.side,
                    position: slot.position,
                    started: slot.started,
                    minutes_played: slot.minutes_played(final_minute),
                    rating: slot.has_played().then(|| slot.rating.reported()),
                    residual_energy: residual,
                    energy_delta: residual - self.fatigue.initial_energy(idx),
                    goals: slot.goals,
                    assists: slot.assists,
                    shots: slot.shots,
                    yellow_cards: slot.yellow_cards,
                    red_card: slot.red_card,
                    injured: slot.injured,
                    suspension_triggered: slot.suspension_triggered,
                }
            })
            .collect();

        self.set_phase(MatchPhase::FullTime);
        info!(
            home = %self.home_name,
            away = %self.away_name,
            score_home = self.state.score_home,
            score_away = self.state.score_away,
            final_minute,
            "full time"
        );

        if let Some(repo) = self.repository.as_deref_mut() {
            for summary in &self.summaries {
                repo.record_match(summary);
            }
        }
        if self.statistics.is_some() {
            let result = self.result();
            if let Some(sink) = self.statistics.as_deref_mut() {
                sink.finish(&result);
            }
        }
    }

    // ===========================================
    // Shared helpers
    // ===========================================

    /// Bernoulli draw; the probability is clamped to 0..=1 (NaN → never).
    pub(crate) fn roll(&mut self, probability: f64) -> bool {
        let p = if probability.is_finite() { probability.clamp(0.0, 1.0) } else { 0.0 };
        self.rng.gen_bool(p)
    }

    /// Uniform draw between two bounds given in either order.
    pub(crate) fn uniform(&mut self, a: f32, b: f32) -> f32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if !(lo.is_finite() && hi.is_finite()) || lo == hi {
            return if lo.is_finite() { lo } else { 0.0 };
        }
        self.rng.gen_range(lo..=hi)
    }

    pub(crate) fn emit(&mut self, event: MatchEvent) {
        let score = self.state.score();
        if let Some(sink) = self.narration.as_deref_mut() {
            sink.narrate(&event, score);
        }
        if let Some(sink) = self.statistics.as_deref_mut() {
            sink.record(&event);
        }
        self.state.events.push(event);
    }

    pub(crate) fn tactics(&self, side: TeamSide) -> &Tactics {
        &self.tactics[side.index()]
    }

    pub(crate) fn effective(&self, slot: usize) -> EffectiveAttributes {
        self.roster.slot(slot).snapshot.effective(self.fatigue.performance_factor(slot))
    }

    /// `(slot, position, effective)` for every on-pitch player of `side`.
    pub(crate) fn effective_lineup(&self, side: TeamSide) -> Vec<(usize, Position, EffectiveAttributes)> {
        self.roster
            .on_pitch(side)
            .map(|i| (i, self.roster.slot(i).position, self.effective(i)))
            .collect()
    }

    pub(crate) fn sector_rating(&self, side: TeamSide, sector: Sector) -> f32 {
        let lineup = self.effective_lineup(side);
        team_sector_rating(lineup.iter().map(|(_, pos, eff)| (*pos, eff)), sector)
    }

    /// Acting keeper snapshot and performance factor; the default keeper when
    /// nobody is left.
    pub(crate) fn keeper_of(&self, side: TeamSide) -> (Option<usize>, AttributeSnapshot, f32) {
        match self.roster.keeper(side) {
            Some(idx) => (Some(idx), self.roster.slot(idx).snapshot, self.fatigue.performance_factor(idx)),
            None => (None, AttributeSnapshot::default_keeper(), 1.0),
        }
    }

    fn drain_fatigue(&mut self) {
        let multiplier = self.context.weather.fatigue_multiplier();
        for side in [TeamSide::Home, TeamSide::Away] {
            let tactics = *self.tactics(side);
            let has_possession = self.possession == side;
            let on_pitch: Vec<usize> = self.roster.on_pitch(side).collect();
            for idx in on_pitch {
                let snapshot = self.roster.slot(idx).snapshot;
                self.fatigue.drain_minute(
                    idx,
                    &snapshot,
                    tactics.press_intensity,
                    tactics.tempo,
                    has_possession,
                    multiplier,
                );
            }
        }
    }

    /// Recovery for every on-pitch player of both sides.
    pub(crate) fn rest_all(&mut self, pause: PauseKind) {
        let on_pitch: Vec<usize> = self
            .roster
            .on_pitch(TeamSide::Home)
            .chain(self.roster.on_pitch(TeamSide::Away))
            .collect();
        for idx in on_pitch {
            let snapshot = self.roster.slot(idx).snapshot;
            self.fatigue.rest(idx, &snapshot, pause);
        }
    }
}

/// Validate, simulate to full time, return the result.
pub fn simulate_match(
    home: &TeamLineup,
    away: &TeamLineup,
    context: MatchContext,
    config: EngineConfig,
    seed: u64,
) -> Result<MatchResult, ValidationError> {
    let mut engine = MatchEngine::from_seed(home, away, context, config, seed)?;
    Ok(engine.simulate_full_match())
}
