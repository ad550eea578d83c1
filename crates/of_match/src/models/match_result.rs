//! Match Result Data Structures
//!
//! Output of the engine. Everything here is plain data with deterministic
//! ordering (Vecs, no hash maps) so that two runs with the same seed
//! serialize to byte-identical JSON.

use serde::{Deserialize, Serialize};

use super::events::{EventType, MatchEvent};
use super::player::{PlayerId, Position};
use super::team::TeamSide;

/// Per-side counters accumulated during the match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub goals: u8,
    pub shots: u16,
    pub shots_on_target: u16,
    pub fouls: u16,
    pub yellow_cards: u8,
    pub red_cards: u8,
    pub corners: u8,
    pub penalties: u8,
    pub substitutions: u8,
    pub injuries: u8,
    pub xg: f32,
    /// Minutes in which this side was the attacking side.
    pub possession_minutes: u16,
}

/// End-of-match data for one squad member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchSummary {
    pub player_id: PlayerId,
    pub name: String,
    pub side: TeamSide,
    pub position: Position,
    pub started: bool,
    pub minutes_played: u8,
    /// `None` for unused substitutes.
    pub rating: Option<f32>,
    pub residual_energy: f32,
    pub energy_delta: f32,
    pub goals: u8,
    pub assists: u8,
    pub shots: u8,
    pub yellow_cards: u8,
    pub red_card: bool,
    pub injured: bool,
    pub suspension_triggered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_team: String,
    pub away_team: String,
    pub score_home: u8,
    pub score_away: u8,
    pub home: TeamStats,
    pub away: TeamStats,
    /// Average home possession in percent; away is `100 - possession_home`.
    pub possession_home: f32,
    pub stoppage_minutes: u8,
    pub final_minute: u8,
    pub events: Vec<MatchEvent>,
    pub players: Vec<PlayerMatchSummary>,
}

impl MatchResult {
    pub fn stats(&self, side: TeamSide) -> &TeamStats {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.score_home as i32 - self.score_away as i32
    }

    pub fn possession_away(&self) -> f32 {
        100.0 - self.possession_home
    }

    pub fn winner(&self) -> Option<TeamSide> {
        match self.score_home.cmp(&self.score_away) {
            std::cmp::Ordering::Greater => Some(TeamSide::Home),
            std::cmp::Ordering::Less => Some(TeamSide::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn events_of(&self, event_type: EventType) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter(move |e| e.event_type() == event_type)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerMatchSummary> {
        self.players.iter().find(|p| p.player_id == id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
