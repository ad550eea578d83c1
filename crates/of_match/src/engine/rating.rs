//! Per-player match rating (1.0..=10.0, everyone starts at 6.0).

use serde::{Deserialize, Serialize};

pub const BASE_RATING: f32 = 6.0;
pub const MIN_RATING: f32 = 1.0;
pub const MAX_RATING: f32 = 10.0;

/// Rating deltas per event
pub mod deltas {
    pub const GOAL: f32 = 1.0;
    pub const ASSIST: f32 = 0.6;
    pub const SHOT_ON_TARGET: f32 = 0.3;
    pub const SAVE: f32 = 0.5;
    /// Keeper and defenders on the pitch
    pub const GOAL_CONCEDED: f32 = -0.3;
    pub const FOUL: f32 = -0.2;
    pub const YELLOW_CARD: f32 = -0.5;
    pub const RED_CARD: f32 = -1.5;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingEvent {
    Goal,
    Assist,
    ShotOnTarget,
    Save,
    GoalConceded,
    Foul,
    YellowCard,
    RedCard,
}

impl RatingEvent {
    pub fn delta(&self) -> f32 {
        match self {
            RatingEvent::Goal => deltas::GOAL,
            RatingEvent::Assist => deltas::ASSIST,
            RatingEvent::ShotOnTarget => deltas::SHOT_ON_TARGET,
            RatingEvent::Save => deltas::SAVE,
            RatingEvent::GoalConceded => deltas::GOAL_CONCEDED,
            RatingEvent::Foul => deltas::FOUL,
            RatingEvent::YellowCard => deltas::YELLOW_CARD,
            RatingEvent::RedCard => deltas::RED_CARD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchRating(f32);

impl Default for MatchRating {
    fn default() -> Self {
        Self(BASE_RATING)
    }
}

impl MatchRating {
    pub fn apply(&mut self, event: RatingEvent) {
        self.0 = (self.0 + event.delta()).clamp(MIN_RATING, MAX_RATING);
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Rounded to one decimal, as reported.
    pub fn reported(&self) -> f32 {
        (self.0 * 10.0).round() / 10.0
    }
}
