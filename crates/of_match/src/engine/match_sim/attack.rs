//! Possession and open-play attacks
//!
//! - choose_attacker: midfield quality + home advantage + momentum → side
//! - attacking_phase: creation duel → finisher → shot geometry → xG
//! - resolve_shot: goal / save / miss bookkeeping (shared with set pieces)

use rand::Rng;
use tracing::debug;

use super::MatchEngine;
use crate::engine::duel::{DuelResolver, Sector};
use crate::engine::fatigue::{ActionKind, PauseKind};
use crate::engine::momentum::MomentumEvent;
use crate::engine::rating::RatingEvent;
use crate::engine::roster::weighted_pick;
use crate::engine::xg::{self, ShotSituation};
use crate::models::attributes::norm;
use crate::models::{MatchEvent, SetPieceKind, ShotOutcome, TeamSide};

pub(crate) const MIN_ATTACK_PROBABILITY: f32 = 0.05;
pub(crate) const MAX_ATTACK_PROBABILITY: f32 = 0.95;

/// A shot ready to be resolved.
pub(crate) struct ShotAttempt {
    pub side: TeamSide,
    pub shooter: usize,
    pub assist: Option<usize>,
    pub xg: f32,
    pub distance_m: f32,
    pub is_header: bool,
    pub set_piece: Option<SetPieceKind>,
}

impl<'a> MatchEngine<'a> {
    /// Home attacking probability for this minute (pure w.r.t. the RNG).
    pub(crate) fn home_attack_probability(&self) -> f32 {
        let q_home = self.sector_rating(TeamSide::Home, Sector::Midfield);
        let q_away = self.sector_rating(TeamSide::Away, Sector::Midfield);
        let skew = self.config.flow.max_possession_skew.abs();
        let p = 0.5
            + ((q_home - q_away) / 100.0).clamp(-skew, skew)
            + self.context.effective_home_advantage()
            + self.momentum.attack_bias();
        p.clamp(MIN_ATTACK_PROBABILITY, MAX_ATTACK_PROBABILITY)
    }

    pub(crate) fn choose_attacker(&mut self) -> TeamSide {
        let p_home = self.home_attack_probability();
        let attacker = if self.roll(p_home as f64) { TeamSide::Home } else { TeamSide::Away };
        let stats = self.state.stats_mut(attacker);
        stats.possession_minutes = stats.possession_minutes.saturating_add(1);
        self.possession = attacker;
        attacker
    }

    pub(crate) fn attacking_phase(&mut self, attacker: TeamSide) {
        let defender = attacker.opponent();
        let creation = self.sector_rating(attacker, Sector::Creation);
        let defense = self.sector_rating(defender, Sector::Defense);
        let base = self.config.flow.creation_base_chance;
        if !DuelResolver::resolve(creation, defense, base, &mut self.rng) {
            return;
        }
        self.momentum.record_attack(attacker);

        let formation = self.tactics(attacker).formation;
        let lineup = self.effective_lineup(attacker);
        let finisher_weights: Vec<(usize, f32)> = lineup
            .iter()
            .filter(|(_, pos, _)| !pos.is_goalkeeper())
            .map(|(i, pos, eff)| {
                let w = eff.technical.finishing as f32
                    + eff.mental.off_ball_movement as f32
                    + formation.finisher_bonus(*pos);
                (*i, w)
            })
            .collect();
        let Some(shooter) = weighted_pick(&finisher_weights, &mut self.rng) else {
            return;
        };
        let creator_weights: Vec<(usize, f32)> = lineup
            .iter()
            .filter(|(i, pos, _)| *i != shooter && !pos.is_goalkeeper())
            .map(|(i, _, eff)| (*i, Sector::Creation.rating(eff)))
            .collect();
        let creator = weighted_pick(&creator_weights, &mut self.rng);

        let flow = self.config.flow.clone();
        let is_header = self.roll(flow.header_share);
        let distance_m = if is_header {
            self.uniform(flow.min_header_distance_m, flow.max_header_distance_m)
        } else {
            self.uniform(flow.min_shot_distance_m, flow.max_shot_distance_m)
        };
        let angle_deg = self.uniform(flow.min_shot_angle_deg, flow.max_shot_angle_deg);
        let is_big_chance =
            distance_m <= flow.big_chance_distance_m && self.roll(flow.big_chance_probability);

        let (_, keeper, keeper_fatigue) = self.keeper_of(defender);
        let press_weight = self.tactics(defender).press_intensity.pressure_weight();
        let situation = ShotSituation {
            shooter_fatigue: self.fatigue.performance_factor(shooter),
            keeper_fatigue,
            defensive_pressure: (defense / 100.0 * press_weight).clamp(0.0, 1.0),
            is_big_chance,
            is_important_match: self.context.is_important_match,
            minute: self.state.minute,
        };
        let shooter_snapshot = self.roster.slot(shooter).snapshot;
        let base = xg::base_xg(distance_m, angle_deg, is_header);
        let raw = xg::full_xg(base, &shooter_snapshot, &keeper, &situation);
        let shot_xg = xg::apply_modifiers(
            raw,
            self.momentum.xg_multiplier(attacker),
            self.context.weather.xg_multiplier(),
        );

        if let Some(creator) = creator {
            let snapshot = self.roster.slot(creator).snapshot;
            self.fatigue.exert(creator, &snapshot, ActionKind::LongPass);
        }
        let action = if is_header { ActionKind::Header } else { ActionKind::Shot };
        self.fatigue.exert(shooter, &shooter_snapshot, action);

        let scored = self.resolve_shot(ShotAttempt {
            side: attacker,
            shooter,
            assist: creator,
            xg: shot_xg,
            distance_m,
            is_header,
            set_piece: None,
        });

        if !scored
            && flow.set_pieces_enabled
            && self.roll(flow.corner_after_shot_probability)
        {
            self.take_corner(attacker);
        }
    }

    /// Sample the outcome of an attempt and book everything. Returns `true` on a goal.
    pub(crate) fn resolve_shot(&mut self, attempt: ShotAttempt) -> bool {
        let ShotAttempt { side, shooter, assist, xg, distance_m, is_header, set_piece } = attempt;
        let minute = self.state.minute;
        let shooter_id = self.roster.slot(shooter).id;

        {
            let stats = self.state.stats_mut(side);
            stats.shots = stats.shots.saturating_add(1);
            stats.xg += xg;
        }
        {
            let slot = self.roster.slot_mut(shooter);
            slot.shots = slot.shots.saturating_add(1);
        }
        self.momentum.apply(side, MomentumEvent::Shot);

        if self.rng.gen::<f32>() < xg {
            {
                let stats = self.state.stats_mut(side);
                stats.shots_on_target = stats.shots_on_target.saturating_add(1);
                stats.goals = stats.goals.saturating_add(1);
            }
            match side {
                TeamSide::Home => self.state.score_home = self.state.score_home.saturating_add(1),
                TeamSide::Away => self.state.score_away = self.state.score_away.saturating_add(1),
            }

            {
                let slot = self.roster.slot_mut(shooter);
                slot.goals = slot.goals.saturating_add(1);
                slot.rate(RatingEvent::Goal);
            }
            let assist_id = assist.map(|a| {
                let slot = self.roster.slot_mut(a);
                slot.assists = slot.assists.saturating_add(1);
                slot.rate(RatingEvent::Assist);
                slot.id
            });
            let conceding: Vec<usize> = self
                .roster
                .on_pitch(side.opponent())
                .filter(|&i| {
                    let pos = self.roster.slot(i).position;
                    pos.is_goalkeeper() || pos.is_defender()
                })
                .collect();
            for i in conceding {
                self.roster.slot_mut(i).rate(RatingEvent::GoalConceded);
            }
            self.momentum.apply(side, MomentumEvent::Goal);

            debug!(
                minute,
                side = %side,
                scorer = %shooter_id,
                xg,
                score_home = self.state.score_home,
                score_away = self.state.score_away,
                "goal"
            );
            self.emit(MatchEvent::shot(minute, side, shooter_id, ShotOutcome::Goal, xg, distance_m, is_header));
            self.emit(MatchEvent::goal(minute, side, shooter_id, assist_id, xg, set_piece));
            self.rest_all(PauseKind::Goal);
            return true;
        }

        let technique = norm(self.roster.slot(shooter).snapshot.technical().technique) as f64;
        let flow = &self.config.flow;
        let on_target_p = flow.on_target_base + flow.on_target_technique_weight * technique;
        let outcome = if self.roll(on_target_p) {
            let stats = self.state.stats_mut(side);
            stats.shots_on_target = stats.shots_on_target.saturating_add(1);
            self.roster.slot_mut(shooter).rate(RatingEvent::ShotOnTarget);
            if let Some(keeper) = self.roster.keeper(side.opponent()) {
                self.roster.slot_mut(keeper).rate(RatingEvent::Save);
            }
            ShotOutcome::Saved
        } else {
            ShotOutcome::Missed
        };
        self.emit(MatchEvent::shot(minute, side, shooter_id, outcome, xg, distance_m, is_header));
        false
    }
}
