use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::player::{PlayerId, PlayerRecord, Position};
use crate::error::ValidationError;

pub const STARTERS: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, TeamSide::Home)
    }

    /// +1 for home, -1 for away (momentum sign convention).
    pub fn sign(&self) -> f32 {
        match self {
            TeamSide::Home => 1.0,
            TeamSide::Away => -1.0,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Home => write!(f, "home"),
            TeamSide::Away => write!(f, "away"),
        }
    }
}

/// Out-of-possession pressing level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressIntensity {
    Low,
    #[default]
    Medium,
    High,
    Extreme,
}

impl PressIntensity {
    /// Energy cost multiplier while defending.
    pub fn energy_cost_factor(&self) -> f32 {
        match self {
            PressIntensity::Low => 0.85,
            PressIntensity::Medium => 1.0,
            PressIntensity::High => 1.2,
            PressIntensity::Extreme => 1.35,
        }
    }

    /// How much of the defensive sector rating turns into shot pressure.
    pub fn pressure_weight(&self) -> f32 {
        match self {
            PressIntensity::Low => 0.4,
            PressIntensity::Medium => 0.6,
            PressIntensity::High => 0.75,
            PressIntensity::Extreme => 0.9,
        }
    }
}

/// In-possession tempo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tempo {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Tempo {
    pub fn energy_cost_factor(&self) -> f32 {
        match self {
            Tempo::Slow => 0.9,
            Tempo::Normal => 1.0,
            Tempo::Fast => 1.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkingType {
    #[default]
    Zonal,
    Mixed,
    ManToMan,
}

impl MarkingType {
    /// Per-minute chance that the team commits a foul.
    pub fn foul_probability(&self) -> f64 {
        match self {
            MarkingType::Zonal => 0.10,
            MarkingType::Mixed => 0.12,
            MarkingType::ManToMan => 0.14,
        }
    }

    /// Chance an attacking header at a corner is tightly marked.
    pub fn header_marked_probability(&self) -> f64 {
        match self {
            MarkingType::Zonal => 0.45,
            MarkingType::Mixed => 0.55,
            MarkingType::ManToMan => 0.65,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Formation {
    #[default]
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-2-3-1")]
    F4231,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "5-3-2")]
    F532,
    #[serde(rename = "4-5-1")]
    F451,
}

impl Formation {
    /// (defenders, midfielders, forwards)
    pub fn shape(&self) -> (u8, u8, u8) {
        match self {
            Formation::F442 => (4, 4, 2),
            Formation::F433 => (4, 3, 3),
            Formation::F4231 => (4, 5, 1),
            Formation::F352 => (3, 5, 2),
            Formation::F532 => (5, 3, 2),
            Formation::F451 => (4, 5, 1),
        }
    }

    /// Weight a position gets when the chance falls to someone. Lines with
    /// more bodies than 4-4-2 get a proportionally larger share.
    pub fn finisher_bonus(&self, position: Position) -> f32 {
        let (_, midfielders, forwards) = self.shape();
        let base = position.finisher_bonus();
        match position {
            Position::Forward => base * forwards as f32 / 2.0,
            Position::Midfielder => base * midfielders as f32 / 4.0,
            Position::Defender | Position::Goalkeeper => base,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tactics {
    #[serde(default)]
    pub press_intensity: PressIntensity,
    #[serde(default)]
    pub tempo: Tempo,
    #[serde(default)]
    pub marking: MarkingType,
    #[serde(default)]
    pub formation: Formation,
}

/// Squad handed to the engine at kickoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamLineup {
    pub name: String,
    pub starters: Vec<PlayerRecord>,
    #[serde(default)]
    pub bench: Vec<PlayerRecord>,
    #[serde(default)]
    pub tactics: Tactics,
}

impl TeamLineup {
    pub fn new(name: impl Into<String>, starters: Vec<PlayerRecord>) -> Self {
        Self { name: name.into(), starters, bench: Vec::new(), tactics: Tactics::default() }
    }

    pub fn with_bench(mut self, bench: Vec<PlayerRecord>) -> Self {
        self.bench = bench;
        self
    }

    pub fn with_tactics(mut self, tactics: Tactics) -> Self {
        self.tactics = tactics;
        self
    }

    /// The nominated keeper: first starter listed as goalkeeper.
    pub fn goalkeeper(&self) -> Option<&PlayerRecord> {
        self.starters.iter().find(|p| p.position.is_goalkeeper())
    }

    /// Squad-local checks. Cross-squad duplicates are checked by the engine.
    pub fn validate(&self, side: TeamSide) -> Result<(), ValidationError> {
        if self.starters.len() != STARTERS {
            return Err(ValidationError::StarterCount {
                side,
                expected: STARTERS,
                found: self.starters.len(),
            });
        }

        if self.goalkeeper().is_none() {
            return Err(ValidationError::MissingGoalkeeper { side });
        }

        let mut seen: HashSet<PlayerId> = HashSet::new();
        for player in self.starters.iter().chain(self.bench.iter()) {
            if !seen.insert(player.id) {
                return Err(ValidationError::DuplicatePlayer { side, id: player.id });
            }
        }

        Ok(())
    }

    pub fn all_players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.starters.iter().chain(self.bench.iter())
    }
}
