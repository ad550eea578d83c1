use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::team::TeamSide;
use crate::engine::phase::MatchPhase;

/// One entry of the append-only match log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub minute: u8,
    /// Acting team. `None` for phase changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<TeamSide>,
    /// Primary actor (scorer, shooter, fouler, injured player, player coming off).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerId>,
    /// Secondary actor (assist provider, player coming on, fouled player).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PlayerId>,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Goal {
        xg: f32,
        #[serde(skip_serializing_if = "Option::is_none")]
        set_piece: Option<SetPieceKind>,
    },
    Shot {
        outcome: ShotOutcome,
        xg: f32,
        distance_m: f32,
        is_header: bool,
    },
    Card {
        color: CardColor,
        /// Season yellow count reached a multiple of three.
        suspension_triggered: bool,
    },
    Foul,
    Substitution,
    Injury,
    SetPiece {
        kind: SetPieceKind,
    },
    PhaseChange {
        phase: MatchPhase,
    },
}

/// Tag-only view of [`EventKind`], for filtering and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    Shot,
    Card,
    Foul,
    Substitution,
    Injury,
    SetPiece,
    PhaseChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotOutcome {
    Goal,
    Saved,
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardColor {
    Yellow,
    /// Second yellow in the same match.
    SecondYellow,
    Red,
}

impl CardColor {
    pub fn is_sending_off(&self) -> bool {
        matches!(self, CardColor::SecondYellow | CardColor::Red)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetPieceKind {
    Corner,
    FreeKick,
    Penalty,
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Goal { .. } => EventType::Goal,
            EventKind::Shot { .. } => EventType::Shot,
            EventKind::Card { .. } => EventType::Card,
            EventKind::Foul => EventType::Foul,
            EventKind::Substitution => EventType::Substitution,
            EventKind::Injury => EventType::Injury,
            EventKind::SetPiece { .. } => EventType::SetPiece,
            EventKind::PhaseChange { .. } => EventType::PhaseChange,
        }
    }
}

impl MatchEvent {
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    pub fn phase_change(minute: u8, phase: MatchPhase) -> Self {
        Self { minute, side: None, player: None, target: None, kind: EventKind::PhaseChange { phase } }
    }

    pub fn goal(
        minute: u8,
        side: TeamSide,
        scorer: PlayerId,
        assist: Option<PlayerId>,
        xg: f32,
        set_piece: Option<SetPieceKind>,
    ) -> Self {
        Self {
            minute,
            side: Some(side),
            player: Some(scorer),
            target: assist,
            kind: EventKind::Goal { xg, set_piece },
        }
    }

    pub fn shot(
        minute: u8,
        side: TeamSide,
        shooter: PlayerId,
        outcome: ShotOutcome,
        xg: f32,
        distance_m: f32,
        is_header: bool,
    ) -> Self {
        Self {
            minute,
            side: Some(side),
            player: Some(shooter),
            target: None,
            kind: EventKind::Shot { outcome, xg, distance_m, is_header },
        }
    }

    pub fn foul(minute: u8, side: TeamSide, fouler: PlayerId, fouled: Option<PlayerId>) -> Self {
        Self { minute, side: Some(side), player: Some(fouler), target: fouled, kind: EventKind::Foul }
    }

    pub fn card(
        minute: u8,
        side: TeamSide,
        player: PlayerId,
        color: CardColor,
        suspension_triggered: bool,
    ) -> Self {
        Self {
            minute,
            side: Some(side),
            player: Some(player),
            target: None,
            kind: EventKind::Card { color, suspension_triggered },
        }
    }

    pub fn injury(minute: u8, side: TeamSide, player: PlayerId) -> Self {
        Self { minute, side: Some(side), player: Some(player), target: None, kind: EventKind::Injury }
    }

    pub fn substitution(minute: u8, side: TeamSide, player_out: PlayerId, player_in: PlayerId) -> Self {
        Self {
            minute,
            side: Some(side),
            player: Some(player_out),
            target: Some(player_in),
            kind: EventKind::Substitution,
        }
    }

    pub fn set_piece(minute: u8, side: TeamSide, taker: Option<PlayerId>, kind: SetPieceKind) -> Self {
        Self { minute, side: Some(side), player: taker, target: None, kind: EventKind::SetPiece { kind } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = MatchEvent::shot(12, TeamSide::Home, PlayerId(9), ShotOutcome::Saved, 0.12, 14.0, false);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "shot");
        assert_eq!(json["outcome"], "saved");
        assert_eq!(json["side"], "home");
        assert_eq!(json["player"], 9);
        assert!(json.get("target").is_none());
    }

    #[test]
    fn test_event_roundtrip_through_json() {
        let event = MatchEvent::card(70, TeamSide::Away, PlayerId(4), CardColor::Yellow, true);
        let text = serde_json::to_string(&event).unwrap();
        let back: MatchEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.event_type(), EventType::Card);
    }

    #[test]
    fn test_phase_change_has_no_side() {
        let event = MatchEvent::phase_change(45, MatchPhase::HalfTime);
        assert_eq!(event.side, None);
        assert_eq!(event.event_type(), EventType::PhaseChange);
    }

    #[test]
    fn test_sending_off_colours() {
        assert!(!CardColor::Yellow.is_sending_off());
        assert!(CardColor::SecondYellow.is_sending_off());
        assert!(CardColor::Red.is_sending_off());
    }
}
