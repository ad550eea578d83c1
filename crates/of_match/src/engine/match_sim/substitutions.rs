//! Injuries and substitutions
//!
//! ## 포함 함수
//! - injury_phase: 부상 판정 (energy + age) → 강제 교체
//! - fatigue_substitutions: 피로도 기반 자동 교체 (side 당 분당 최대 1명)
//! - perform_substitution: 교체 실행
//!
//! Roster rules:
//! - 벤치 선수는 재투입 불가
//! - 레드카드 퇴장은 교체 불가
//! - 부상 교체는 벤치 GK 우선 (GK 부상 시)

use tracing::debug;

use super::MatchEngine;
use crate::engine::fatigue::{injury_risk, PauseKind};
use crate::engine::roster::SlotStatus;
use crate::models::{MatchEvent, TeamSide};

impl<'a> MatchEngine<'a> {
    pub(crate) fn injury_phase(&mut self) {
        if !self.config.flow.injuries_enabled {
            return;
        }
        for side in [TeamSide::Home, TeamSide::Away] {
            let on_pitch: Vec<usize> = self.roster.on_pitch(side).collect();
            for idx in on_pitch {
                let risk = injury_risk(self.fatigue.energy(idx), self.roster.slot(idx).age);
                if self.roll(risk) {
                    self.injure(idx);
                }
            }
        }
    }

    pub(crate) fn injure(&mut self, idx: usize) {
        let minute = self.state.minute;
        let (side, id, position) = {
            let slot = self.roster.slot_mut(idx);
            slot.injured = true;
            (slot.side, slot.id, slot.position)
        };
        {
            let stats = self.state.stats_mut(side);
            stats.injuries = stats.injuries.saturating_add(1);
        }
        self.roster.remove(idx, SlotStatus::Injured, minute);
        debug!(minute, side = %side, player = %id, "injury");
        self.emit(MatchEvent::injury(minute, side, id));

        if !self.has_substitutions_left(side) {
            return;
        }
        if let Some(incoming) = self.roster.bench_candidate(side, position) {
            self.perform_substitution(side, idx, incoming);
        }
    }

    pub(crate) fn fatigue_substitutions(&mut self) {
        if self.state.minute < self.config.flow.fatigue_sub_from_minute {
            return;
        }
        for side in [TeamSide::Home, TeamSide::Away] {
            if !self.has_substitutions_left(side) {
                continue;
            }
            let Some(tired) = self.most_tired(side) else {
                continue;
            };
            let position = self.roster.slot(tired).position;
            if let Some(incoming) = self.roster.bench_candidate(side, position) {
                self.perform_substitution(side, tired, incoming);
            }
        }
    }

    /// Most tired on-pitch outfielder below the substitution threshold.
    fn most_tired(&self, side: TeamSide) -> Option<usize> {
        let threshold = self.config.flow.fatigue_sub_threshold;
        let mut most: Option<(usize, f32)> = None;
        for idx in self.roster.on_pitch(side) {
            if self.roster.slot(idx).position.is_goalkeeper() {
                continue;
            }
            let energy = self.fatigue.energy(idx);
            if energy >= threshold {
                continue;
            }
            if most.map_or(true, |(_, e)| energy < e) {
                most = Some((idx, energy));
            }
        }
        most.map(|(idx, _)| idx)
    }

    fn has_substitutions_left(&self, side: TeamSide) -> bool {
        self.roster.substitutions_used(side) < self.config.flow.max_substitutions
    }

    pub(crate) fn perform_substitution(&mut self, side: TeamSide, out: usize, incoming: usize) {
        let minute = self.state.minute;
        self.roster.substitute(out, incoming, minute);
        {
            let stats = self.state.stats_mut(side);
            stats.substitutions = stats.substitutions.saturating_add(1);
        }
        let out_id = self.roster.slot(out).id;
        let in_id = self.roster.slot(incoming).id;
        debug!(minute, side = %side, out = %out_id, incoming = %in_id, "substitution");
        self.emit(MatchEvent::substitution(minute, side, out_id, in_id));
        self.rest_all(PauseKind::Substitution);
    }
}
