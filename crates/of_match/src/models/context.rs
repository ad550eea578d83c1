//! Match-level context flags (importance, weather, home advantage).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Snow,
    Wind,
    Heat,
}

impl Weather {
    /// Multiplier on every shot's xG.
    pub fn xg_multiplier(&self) -> f32 {
        match self {
            Weather::Clear => 1.0,
            Weather::Rain => 0.95,
            Weather::Snow => 0.9,
            Weather::Wind => 0.93,
            Weather::Heat => 1.0,
        }
    }

    /// Multiplier on per-minute energy cost.
    pub fn fatigue_multiplier(&self) -> f32 {
        match self {
            Weather::Clear => 1.0,
            Weather::Rain => 1.05,
            Weather::Snow => 1.1,
            Weather::Wind => 1.0,
            Weather::Heat => 1.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchContext {
    #[serde(default)]
    pub is_important_match: bool,
    #[serde(default)]
    pub weather: Weather,
    /// Added to the home side's attacking probability (0.0..=0.1).
    #[serde(default)]
    pub home_advantage: f32,
}

impl Default for MatchContext {
    fn default() -> Self {
        Self { is_important_match: false, weather: Weather::Clear, home_advantage: 0.0 }
    }
}

impl MatchContext {
    pub fn important(mut self) -> Self {
        self.is_important_match = true;
        self
    }

    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_home_advantage(mut self, bonus: f32) -> Self {
        self.home_advantage = bonus;
        self
    }

    /// Home advantage as actually applied.
    pub fn effective_home_advantage(&self) -> f32 {
        if self.home_advantage.is_finite() {
            self.home_advantage.clamp(0.0, 0.1)
        } else {
            0.0
        }
    }
}
