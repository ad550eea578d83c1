use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::attributes::PlayerAttributes;
use super::match_result::PlayerMatchSummary;

/// Stable identifier of a persistent player record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position group. Finer roles (LB, CAM, ...) collapse into these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK", alias = "Goalkeeper")]
    Goalkeeper,
    #[serde(rename = "DF", alias = "Defender", alias = "CB", alias = "LB", alias = "RB")]
    Defender,
    #[serde(
        rename = "MF",
        alias = "Midfielder",
        alias = "CM",
        alias = "DM",
        alias = "AM",
        alias = "LM",
        alias = "RM"
    )]
    Midfielder,
    #[serde(rename = "FW", alias = "Forward", alias = "ST", alias = "LW", alias = "RW", alias = "CF")]
    Forward,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }

    pub fn is_defender(&self) -> bool {
        matches!(self, Position::Defender)
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(self, Position::Midfielder)
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::Forward)
    }

    /// Bonus weight used when picking who ends up with the chance.
    pub fn finisher_bonus(&self) -> f32 {
        match self {
            Position::Forward => 30.0,
            Position::Midfielder => 15.0,
            Position::Defender | Position::Goalkeeper => 0.0,
        }
    }

    pub fn short_code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DF",
            Position::Midfielder => "MF",
            Position::Forward => "FW",
        }
    }
}

/// Persistent player record owned by the host.
///
/// The engine copies what it needs at kickoff and only reports back through
/// [`PlayerRepository`] once the match is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub age: u8,
    pub attributes: PlayerAttributes,
    /// Long-lived energy (0-100) carried between matches.
    #[serde(default = "default_energy")]
    pub energy: f32,
    /// 기질 - higher is calmer (fewer cards).
    #[serde(default = "default_temperament")]
    pub temperament: u8,
    #[serde(default)]
    pub season_yellow_cards: u8,
    #[serde(default)]
    pub appearances: u16,
    #[serde(default)]
    pub season_goals: u16,
    #[serde(default)]
    pub last_match_rating: Option<f32>,
}

fn default_energy() -> f32 {
    100.0
}

fn default_temperament() -> u8 {
    50
}

impl PlayerRecord {
    pub fn new(id: u32, name: impl Into<String>, position: Position, attributes: PlayerAttributes) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
            position,
            age: 26,
            attributes,
            energy: default_energy(),
            temperament: default_temperament(),
            season_yellow_cards: 0,
            appearances: 0,
            season_goals: 0,
            last_match_rating: None,
        }
    }

    pub fn with_age(mut self, age: u8) -> Self {
        self.age = age;
        self
    }

    pub fn with_energy(mut self, energy: f32) -> Self {
        self.energy = energy.clamp(0.0, 100.0);
        self
    }

    pub fn with_temperament(mut self, temperament: u8) -> Self {
        self.temperament = temperament.clamp(1, 100);
        self
    }

    /// Fold one match's outcome into the record.
    pub fn apply_match_summary(&mut self, summary: &PlayerMatchSummary) {
        self.energy = summary.residual_energy.clamp(0.0, 100.0);
        if summary.rating.is_some() {
            self.last_match_rating = summary.rating;
        }
        if summary.minutes_played > 0 {
            self.appearances = self.appearances.saturating_add(1);
        }
        self.season_goals = self.season_goals.saturating_add(summary.goals as u16);
        self.season_yellow_cards = self.season_yellow_cards.saturating_add(summary.yellow_cards);
    }
}

/// Write-back target for end-of-match player updates.
///
/// Called exactly once per squad member at finalization; never mid-match.
pub trait PlayerRepository {
    fn record_match(&mut self, summary: &PlayerMatchSummary);
}

impl PlayerRepository for HashMap<PlayerId, PlayerRecord> {
    fn record_match(&mut self, summary: &PlayerMatchSummary) {
        if let Some(record) = self.get_mut(&summary.player_id) {
            record.apply_match_summary(summary);
        }
    }
}

impl PlayerRepository for Vec<PlayerMatchSummary> {
    fn record_match(&mut self, summary: &PlayerMatchSummary) {
        self.push(summary.clone());
    }
}
