//! Per-match player slot arena.
//!
//! 모든 선수(선발 + 벤치, 양 팀)는 킥오프 시 고정 slot index 를 받는다.
//! Slot order: home starters, home bench, away starters, away bench.
//! All mutable per-player state lives here; nothing is keyed by `PlayerId`.
//!
//! - Bench players never re-enter once replaced
//! - Sent-off players are never replaced

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::providers::{MoraleProvider, PersonalityProvider};
use super::rating::{MatchRating, RatingEvent};
use crate::models::{AttributeSnapshot, PlayerId, PlayerRecord, Position, TeamLineup, TeamSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Bench,
    OnPitch,
    Replaced,
    SentOff,
    Injured,
}

#[derive(Debug, Clone)]
pub struct PlayerSlot {
    pub id: PlayerId,
    pub name: String,
    pub side: TeamSide,
    pub position: Position,
    pub age: u8,
    pub temperament: u8,
    pub season_yellow_cards: u8,
    pub snapshot: AttributeSnapshot,
    pub started: bool,
    pub status: SlotStatus,
    /// Minute after which the player joined (0 for starters)
    pub entered_at: Option<u8>,
    pub left_at: Option<u8>,
    pub rating: MatchRating,
    pub goals: u8,
    pub assists: u8,
    pub shots: u8,
    pub yellow_cards: u8,
    pub red_card: bool,
    pub injured: bool,
    pub suspension_triggered: bool,
}

impl PlayerSlot {
    fn from_record(
        record: &PlayerRecord,
        side: TeamSide,
        started: bool,
        personality: &dyn PersonalityProvider,
        morale: &dyn MoraleProvider,
    ) -> Self {
        let snapshot = AttributeSnapshot::build(
            &record.attributes.clamped(),
            personality.modifiers(record),
            morale.morale_multiplier(record),
        );
        Self {
            id: record.id,
            name: record.name.clone(),
            side,
            position: record.position,
            age: record.age,
            temperament: record.temperament.clamp(1, 100),
            season_yellow_cards: record.season_yellow_cards,
            snapshot,
            started,
            status: if started { SlotStatus::OnPitch } else { SlotStatus::Bench },
            entered_at: started.then_some(0),
            left_at: None,
            rating: MatchRating::default(),
            goals: 0,
            assists: 0,
            shots: 0,
            yellow_cards: 0,
            red_card: false,
            injured: false,
            suspension_triggered: false,
        }
    }

    pub fn is_on_pitch(&self) -> bool {
        self.status == SlotStatus::OnPitch
    }

    pub fn has_played(&self) -> bool {
        self.entered_at.is_some()
    }

    pub fn minutes_played(&self, final_minute: u8) -> u8 {
        match self.entered_at {
            Some(entered) => self.left_at.unwrap_or(final_minute).saturating_sub(entered),
            None => 0,
        }
    }

    pub fn rate(&mut self, event: RatingEvent) {
        self.rating.apply(event);
    }
}

#[derive(Debug, Clone)]
pub struct Roster {
    slots: Vec<PlayerSlot>,
    substitutions: [u8; 2],
}

impl Roster {
    pub fn build(
        home: &TeamLineup,
        away: &TeamLineup,
        personality: &dyn PersonalityProvider,
        morale: &dyn MoraleProvider,
    ) -> Self {
        let mut slots = Vec::with_capacity(
            home.starters.len() + home.bench.len() + away.starters.len() + away.bench.len(),
        );
        for (side, lineup) in [(TeamSide::Home, home), (TeamSide::Away, away)] {
            for record in &lineup.starters {
                slots.push(PlayerSlot::from_record(record, side, true, personality, morale));
            }
            for record in &lineup.bench {
                slots.push(PlayerSlot::from_record(record, side, false, personality, morale));
            }
        }
        Self { slots, substitutions: [0, 0] }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[PlayerSlot] {
        &self.slots
    }

    pub fn slot(&self, idx: usize) -> &PlayerSlot {
        &self.slots[idx]
    }

    pub fn slot_mut(&mut self, idx: usize) -> &mut PlayerSlot {
        &mut self.slots[idx]
    }

    /// On-pitch slots of `side`, in slot order.
    pub fn on_pitch(&self, side: TeamSide) -> impl Iterator<Item = usize> + Clone + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.side == side && s.is_on_pitch())
            .map(|(i, _)| i)
    }

    pub fn on_pitch_count(&self, side: TeamSide) -> usize {
        self.on_pitch(side).count()
    }

    /// Acting keeper: on-pitch goalkeeper, else the on-pitch outfielder with
    /// the best goalkeeping (lowest slot on ties). `None` when nobody is left.
    pub fn keeper(&self, side: TeamSide) -> Option<usize> {
        if let Some(gk) = self.on_pitch(side).find(|&i| self.slots[i].position.is_goalkeeper()) {
            return Some(gk);
        }
        let mut best: Option<(usize, u8)> = None;
        for i in self.on_pitch(side) {
            let gk = self.slots[i].snapshot.technical().goalkeeping;
            if best.map_or(true, |(_, b)| gk > b) {
                best = Some((i, gk));
            }
        }
        best.map(|(i, _)| i)
    }

    /// First unused bench player for `position`'s group, else any outfield
    /// bench player. Keepers are only replaced by keepers first.
    pub fn bench_candidate(&self, side: TeamSide, position: Position) -> Option<usize> {
        let bench = || {
            self.slots
                .iter()
                .enumerate()
                .filter(move |(_, s)| s.side == side && s.status == SlotStatus::Bench)
        };
        bench()
            .find(|(_, s)| s.position == position)
            .or_else(|| bench().find(|(_, s)| !s.position.is_goalkeeper()))
            .map(|(i, _)| i)
    }

    pub fn substitutions_used(&self, side: TeamSide) -> u8 {
        self.substitutions[side.index()]
    }

    /// Swap `out` (on pitch) for `incoming` (bench) after `minute`.
    pub fn substitute(&mut self, out: usize, incoming: usize, minute: u8) {
        let side = self.slots[out].side;
        {
            let leaving = &mut self.slots[out];
            if leaving.status == SlotStatus::OnPitch {
                leaving.status = SlotStatus::Replaced;
            }
            leaving.left_at.get_or_insert(minute);
        }
        let entering = &mut self.slots[incoming];
        entering.status = SlotStatus::OnPitch;
        entering.entered_at = Some(minute);
        self.substitutions[side.index()] = self.substitutions[side.index()].saturating_add(1);
    }

    /// Take a player off without replacement (red card or injury).
    pub fn remove(&mut self, idx: usize, status: SlotStatus, minute: u8) {
        let slot = &mut self.slots[idx];
        slot.status = status;
        slot.left_at = Some(minute);
    }
}

/// Cumulative-weight sampling over `(slot, weight)`; non-positive weights
/// are never picked. `None` without a positive weight.
pub fn weighted_pick<R: Rng>(candidates: &[(usize, f32)], rng: &mut R) -> Option<usize> {
    let total: f32 = candidates
        .iter()
        .filter(|(_, w)| w.is_finite() && *w > 0.0)
        .map(|(_, w)| *w)
        .sum();
    if total <= 0.0 {
        return None;
    }

    let mut remaining = rng.gen::<f32>() * total;
    let mut last = None;
    for &(idx, weight) in candidates {
        if !(weight.is_finite() && weight > 0.0) {
            continue;
        }
        last = Some(idx);
        remaining -= weight;
        if remaining < 0.0 {
            return Some(idx);
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::providers::Neutral;
    use crate::models::PlayerAttributes;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn lineup(offset: u32) -> TeamLineup {
        let mut starters = vec![PlayerRecord::new(offset, "GK", Position::Goalkeeper, PlayerAttributes::uniform(60))];
        for i in 1..11 {
            let pos = match i {
                1..=4 => Position::Defender,
                5..=8 => Position::Midfielder,
                _ => Position::Forward,
            };
            starters.push(PlayerRecord::new(offset + i, format!("P{}", i), pos, PlayerAttributes::uniform(60)));
        }
        let bench = vec![
            PlayerRecord::new(offset + 20, "Sub GK", Position::Goalkeeper, PlayerAttributes::uniform(55)),
            PlayerRecord::new(offset + 21, "Sub FW", Position::Forward, PlayerAttributes::uniform(55)),
        ];
        TeamLineup::new(format!("Team {}", offset), starters).with_bench(bench)
    }

    fn roster() -> Roster {
        Roster::build(&lineup(1), &lineup(100), &Neutral, &Neutral)
    }

    #[test]
    fn test_slot_layout() {
        let r = roster();
        assert_eq!(r.len(), 26);
        assert_eq!(r.slot(0).id, PlayerId(1));
        assert_eq!(r.slot(11).status, SlotStatus::Bench);
        assert_eq!(r.slot(13).side, TeamSide::Away);
        assert_eq!(r.on_pitch_count(TeamSide::Home), 11);
        assert_eq!(r.on_pitch_count(TeamSide::Away), 11);
    }

    #[test]
    fn test_keeper_fallback_to_best_outfielder() {
        let mut r = roster();
        assert_eq!(r.keeper(TeamSide::Home), Some(0));

        r.remove(0, SlotStatus::SentOff, 30);
        // all outfielders have goalkeeping 60 → lowest slot
        assert_eq!(r.keeper(TeamSide::Home), Some(1));
    }

    #[test]
    fn test_bench_candidate_prefers_same_group() {
        let r = roster();
        assert_eq!(r.bench_candidate(TeamSide::Home, Position::Goalkeeper), Some(11));
        assert_eq!(r.bench_candidate(TeamSide::Home, Position::Forward), Some(12));
        // no defender on the bench → any outfielder
        assert_eq!(r.bench_candidate(TeamSide::Home, Position::Defender), Some(12));
    }

    #[test]
    fn test_substitute_and_minutes() {
        let mut r = roster();
        r.substitute(10, 12, 70);
        assert_eq!(r.slot(10).status, SlotStatus::Replaced);
        assert!(r.slot(12).is_on_pitch());
        assert_eq!(r.substitutions_used(TeamSide::Home), 1);
        assert_eq!(r.slot(10).minutes_played(93), 70);
        assert_eq!(r.slot(12).minutes_played(93), 23);
        assert_eq!(r.slot(11).minutes_played(93), 0);
        // replaced player cannot come back
        assert_eq!(r.bench_candidate(TeamSide::Home, Position::Forward), None);
    }

    #[test]
    fn test_weighted_pick() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(weighted_pick(&[], &mut rng), None);
        assert_eq!(weighted_pick(&[(4, 0.0), (5, -1.0)], &mut rng), None);
        assert_eq!(weighted_pick(&[(4, 0.0), (7, 2.0)], &mut rng), Some(7));

        let mut counts = [0u32; 2];
        for _ in 0..10_000 {
            match weighted_pick(&[(0, 1.0), (1, 3.0)], &mut rng) {
                Some(0) => counts[0] += 1,
                Some(1) => counts[1] += 1,
                other => panic!("unexpected {:?}", other),
            }
        }
        let share = counts[1] as f32 / 10_000.0;
        assert!((share - 0.75).abs() < 0.03, "share {}", share);
    }
}
