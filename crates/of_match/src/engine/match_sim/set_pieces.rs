//! Set pieces: corners, penalties and direct free kicks.
//!
//! Every set piece is a dead-ball pause (`PauseKind::DeadBall` for everyone
//! on the pitch) followed by one attempt through `resolve_shot`.

use super::attack::ShotAttempt;
use super::MatchEngine;
use crate::engine::fatigue::{ActionKind, PauseKind};
use crate::engine::roster::weighted_pick;
use crate::engine::xg;
use crate::models::{AttributeSnapshot, MatchEvent, SetPieceKind, TeamSide};

pub(crate) const CORNER_MIN_DISTANCE_M: f32 = 5.0;
pub(crate) const CORNER_MAX_DISTANCE_M: f32 = 12.0;
pub(crate) const PENALTY_DISTANCE_M: f32 = 11.0;
pub(crate) const FREE_KICK_MIN_DISTANCE_M: f32 = 18.0;
pub(crate) const FREE_KICK_MAX_DISTANCE_M: f32 = 30.0;
pub(crate) const FREE_KICK_MIN_ANGLE_DEG: f32 = 30.0;
pub(crate) const FREE_KICK_MAX_ANGLE_DEG: f32 = 90.0;

impl<'a> MatchEngine<'a> {
    /// On-pitch outfielder of `side` with the highest `key` (lowest slot on ties).
    fn best_outfielder(&self, side: TeamSide, key: impl Fn(&AttributeSnapshot) -> u8) -> Option<usize> {
        let mut best: Option<(usize, u8)> = None;
        for i in self.roster.on_pitch(side) {
            let slot = self.roster.slot(i);
            if slot.position.is_goalkeeper() {
                continue;
            }
            let value = key(&slot.snapshot);
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((i, value));
            }
        }
        best.map(|(i, _)| i)
    }

    pub(crate) fn take_corner(&mut self, attacker: TeamSide) {
        let defender = attacker.opponent();
        let lineup = self.effective_lineup(attacker);
        let crosser_weights: Vec<(usize, f32)> = lineup
            .iter()
            .filter(|(_, pos, _)| !pos.is_goalkeeper())
            .map(|(i, _, eff)| (*i, eff.technical.crossing as f32))
            .collect();
        let Some(crosser) = weighted_pick(&crosser_weights, &mut self.rng) else {
            return;
        };
        let header_weights: Vec<(usize, f32)> = lineup
            .iter()
            .filter(|(i, pos, _)| *i != crosser && !pos.is_goalkeeper())
            .map(|(i, _, eff)| (*i, eff.technical.heading as f32 + eff.physical.jump as f32))
            .collect();
        let Some(header) = weighted_pick(&header_weights, &mut self.rng) else {
            return;
        };

        let minute = self.state.minute;
        {
            let stats = self.state.stats_mut(attacker);
            stats.corners = stats.corners.saturating_add(1);
        }
        let crosser_id = self.roster.slot(crosser).id;
        self.emit(MatchEvent::set_piece(minute, attacker, Some(crosser_id), SetPieceKind::Corner));
        self.rest_all(PauseKind::DeadBall);

        let marked_p = self.tactics(defender).marking.header_marked_probability();
        let is_marked = self.roll(marked_p);
        let distance_m = self.uniform(CORNER_MIN_DISTANCE_M, CORNER_MAX_DISTANCE_M);

        let (_, keeper, _) = self.keeper_of(defender);
        let header_snapshot = self.roster.slot(header).snapshot;
        let crosser_snapshot = self.roster.slot(crosser).snapshot;
        let raw = xg::header_xg(&header_snapshot, &crosser_snapshot, &keeper, distance_m, is_marked);
        let shot_xg = xg::apply_modifiers(
            raw,
            self.momentum.xg_multiplier(attacker),
            self.context.weather.xg_multiplier(),
        );

        self.fatigue.exert(header, &header_snapshot, ActionKind::Header);
        self.resolve_shot(ShotAttempt {
            side: attacker,
            shooter: header,
            assist: Some(crosser),
            xg: shot_xg,
            distance_m,
            is_header: true,
            set_piece: Some(SetPieceKind::Corner),
        });
    }

    pub(crate) fn take_penalty(&mut self, attacker: TeamSide) {
        let Some(taker) = self.best_outfielder(attacker, |s| s.technical().penalty) else {
            return;
        };
        let minute = self.state.minute;
        {
            let stats = self.state.stats_mut(attacker);
            stats.penalties = stats.penalties.saturating_add(1);
        }
        let taker_id = self.roster.slot(taker).id;
        self.emit(MatchEvent::set_piece(minute, attacker, Some(taker_id), SetPieceKind::Penalty));
        self.rest_all(PauseKind::DeadBall);

        let (_, keeper, _) = self.keeper_of(attacker.opponent());
        let taker_snapshot = self.roster.slot(taker).snapshot;
        let shot_xg = xg::penalty_xg(&taker_snapshot, &keeper, self.context.is_important_match);

        self.fatigue.exert(taker, &taker_snapshot, ActionKind::Shot);
        self.resolve_shot(ShotAttempt {
            side: attacker,
            shooter: taker,
            assist: None,
            xg: shot_xg,
            distance_m: PENALTY_DISTANCE_M,
            is_header: false,
            set_piece: Some(SetPieceKind::Penalty),
        });
    }

    pub(crate) fn take_free_kick(&mut self, attacker: TeamSide) {
        let Some(taker) = self.best_outfielder(attacker, |s| s.technical().free_kick) else {
            return;
        };
        let minute = self.state.minute;
        let taker_id = self.roster.slot(taker).id;
        self.emit(MatchEvent::set_piece(minute, attacker, Some(taker_id), SetPieceKind::FreeKick));
        self.rest_all(PauseKind::DeadBall);

        let distance_m = self.uniform(FREE_KICK_MIN_DISTANCE_M, FREE_KICK_MAX_DISTANCE_M);
        let angle_deg = self.uniform(FREE_KICK_MIN_ANGLE_DEG, FREE_KICK_MAX_ANGLE_DEG);
        let (_, keeper, _) = self.keeper_of(attacker.opponent());
        let taker_snapshot = self.roster.slot(taker).snapshot;
        let raw = xg::free_kick_xg(&taker_snapshot, &keeper, distance_m, angle_deg);
        let shot_xg = xg::apply_modifiers(
            raw,
            self.momentum.xg_multiplier(attacker),
            self.context.weather.xg_multiplier(),
        );

        self.fatigue.exert(taker, &taker_snapshot, ActionKind::Shot);
        self.resolve_shot(ShotAttempt {
            side: attacker,
            shooter: taker,
            assist: None,
            xg: shot_xg,
            distance_m,
            is_header: false,
            set_piece: Some(SetPieceKind::FreeKick),
        });
    }
}
