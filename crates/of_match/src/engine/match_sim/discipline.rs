//! Fouls and cards
//!
//! 팀별로 매 분 파울을 한 번 굴린다 (marking type 기반 확률).
//! - Fouler ∝ aggression + tackling
//! - Card chance `base × (1.5 - temperament/100)`, red share 8%
//! - Second yellow → sending off; sent-off players are never replaced
//! - Season yellow count hitting a multiple of the threshold flags a suspension

use rand::Rng;
use tracing::debug;

use super::MatchEngine;
use crate::engine::rating::RatingEvent;
use crate::engine::roster::{weighted_pick, SlotStatus};
use crate::models::{CardColor, MatchEvent, TeamSide};

impl<'a> MatchEngine<'a> {
    pub(crate) fn foul_phase(&mut self, attacker: TeamSide) {
        for side in [TeamSide::Home, TeamSide::Away] {
            let foul_p = self.tactics(side).marking.foul_probability();
            if !self.roll(foul_p) {
                continue;
            }
            self.commit_foul(side, attacker);
        }
    }

    fn commit_foul(&mut self, side: TeamSide, attacker: TeamSide) {
        let weights: Vec<(usize, f32)> = self
            .effective_lineup(side)
            .iter()
            .map(|(i, _, eff)| (*i, eff.mental.aggression as f32 + eff.mental.tackling as f32))
            .collect();
        let Some(fouler) = weighted_pick(&weights, &mut self.rng) else {
            return;
        };
        let victims: Vec<usize> = self.roster.on_pitch(side.opponent()).collect();
        let fouled = if victims.is_empty() {
            None
        } else {
            let pick = self.rng.gen_range(0..victims.len());
            Some(self.roster.slot(victims[pick]).id)
        };

        let minute = self.state.minute;
        {
            let stats = self.state.stats_mut(side);
            stats.fouls = stats.fouls.saturating_add(1);
        }
        self.roster.slot_mut(fouler).rate(RatingEvent::Foul);
        let fouler_id = self.roster.slot(fouler).id;
        self.emit(MatchEvent::foul(minute, side, fouler_id, fouled));

        let temperament = self.roster.slot(fouler).temperament as f64;
        let card_p = self.config.flow.card_base_probability * (1.5 - temperament / 100.0);
        if self.roll(card_p) {
            let straight_red = self.roll(self.config.flow.red_card_share);
            self.issue_card(fouler, straight_red);
        }

        // defending side fouled the attacking side → set piece
        if side != attacker && self.config.flow.set_pieces_enabled {
            if self.roll(self.config.flow.penalty_share) {
                self.take_penalty(attacker);
            } else if self.roll(self.config.flow.free_kick_share) {
                self.take_free_kick(attacker);
            }
        }
    }

    pub(crate) fn issue_card(&mut self, idx: usize, straight_red: bool) {
        let minute = self.state.minute;
        let threshold = self.config.flow.yellow_suspension_threshold;

        let (side, id, color, suspension) = {
            let slot = self.roster.slot_mut(idx);
            let (color, suspension) = if straight_red {
                slot.rate(RatingEvent::RedCard);
                (CardColor::Red, false)
            } else {
                slot.yellow_cards = slot.yellow_cards.saturating_add(1);
                slot.season_yellow_cards = slot.season_yellow_cards.saturating_add(1);
                slot.rate(RatingEvent::YellowCard);
                let suspension = threshold > 0 && slot.season_yellow_cards % threshold == 0;
                if suspension {
                    slot.suspension_triggered = true;
                }
                if slot.yellow_cards >= 2 {
                    slot.rate(RatingEvent::RedCard);
                    (CardColor::SecondYellow, suspension)
                } else {
                    (CardColor::Yellow, suspension)
                }
            };
            if color.is_sending_off() {
                slot.red_card = true;
            }
            (slot.side, slot.id, color, suspension)
        };

        {
            let stats = self.state.stats_mut(side);
            if color != CardColor::Red {
                stats.yellow_cards = stats.yellow_cards.saturating_add(1);
            }
            if color.is_sending_off() {
                stats.red_cards = stats.red_cards.saturating_add(1);
            }
        }
        if color.is_sending_off() {
            self.roster.remove(idx, SlotStatus::SentOff, minute);
        }

        debug!(minute, side = %side, player = %id, ?color, suspension, "card");
        self.emit(MatchEvent::card(minute, side, id, color, suspension));
    }
}
