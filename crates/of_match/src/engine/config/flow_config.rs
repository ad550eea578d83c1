//! Minute-loop tuning: how often things happen.

use serde::{Deserialize, Serialize};

pub const MIN_ACTION_MINUTE_PROBABILITY: f64 = 0.10;
pub const MAX_ACTION_MINUTE_PROBABILITY: f64 = 0.20;
/// Hard ceiling on added time
pub const MAX_STOPPAGE_MINUTES: u8 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    // === Attacking phase ===
    /// Chance a minute contains an attacking action (clamped 0.10..=0.20)
    pub action_minute_probability: f64,
    /// Base chance of the creation duel
    pub creation_base_chance: f32,
    /// Max possession skew from midfield quality (±20 points)
    pub max_possession_skew: f32,

    // === Shot geometry ===
    pub header_share: f64,
    pub min_shot_distance_m: f32,
    pub max_shot_distance_m: f32,
    pub min_header_distance_m: f32,
    pub max_header_distance_m: f32,
    pub min_shot_angle_deg: f32,
    pub max_shot_angle_deg: f32,
    pub big_chance_distance_m: f32,
    pub big_chance_probability: f64,
    /// On-target chance for a non-goal shot: base + technique weight
    pub on_target_base: f64,
    pub on_target_technique_weight: f64,

    // === Set pieces ===
    pub set_pieces_enabled: bool,
    pub corner_after_shot_probability: f64,
    /// Share of fouls against the attacking side that become penalties
    pub penalty_share: f64,
    /// Share of the remaining such fouls that become direct free kicks
    pub free_kick_share: f64,

    // === Discipline ===
    pub card_base_probability: f64,
    pub red_card_share: f64,
    /// Season yellows that trigger a suspension
    pub yellow_suspension_threshold: u8,

    // === Squad management ===
    pub injuries_enabled: bool,
    pub max_substitutions: u8,
    pub fatigue_sub_threshold: f32,
    pub fatigue_sub_from_minute: u8,

    // === Stoppage (both clamped to 0..=7) ===
    pub base_stoppage_minutes: u8,
    pub max_stoppage_minutes: u8,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            action_minute_probability: 0.15,
            creation_base_chance: 0.5,
            max_possession_skew: 0.20,

            header_share: 0.2,
            min_shot_distance_m: 5.0,
            max_shot_distance_m: 28.0,
            min_header_distance_m: 4.0,
            max_header_distance_m: 14.0,
            min_shot_angle_deg: 20.0,
            max_shot_angle_deg: 90.0,
            big_chance_distance_m: 12.0,
            big_chance_probability: 0.35,
            on_target_base: 0.35,
            on_target_technique_weight: 0.3,

            set_pieces_enabled: true,
            corner_after_shot_probability: 0.3,
            penalty_share: 0.08,
            free_kick_share: 0.2,

            card_base_probability: 0.18,
            red_card_share: 0.08,
            yellow_suspension_threshold: 3,

            injuries_enabled: true,
            max_substitutions: 5,
            fatigue_sub_threshold: 35.0,
            fatigue_sub_from_minute: 60,

            base_stoppage_minutes: 2,
            max_stoppage_minutes: 7,
        }
    }
}

impl FlowConfig {
    /// Action-minute probability as actually used.
    pub fn effective_action_probability(&self) -> f64 {
        if self.action_minute_probability.is_finite() {
            self.action_minute_probability
                .clamp(MIN_ACTION_MINUTE_PROBABILITY, MAX_ACTION_MINUTE_PROBABILITY)
        } else {
            MIN_ACTION_MINUTE_PROBABILITY
        }
    }

    /// Added-time ceiling as actually used.
    pub fn effective_max_stoppage(&self) -> u8 {
        self.max_stoppage_minutes.min(MAX_STOPPAGE_MINUTES)
    }

    /// Added-time floor, never above the ceiling.
    pub fn effective_base_stoppage(&self) -> u8 {
        self.base_stoppage_minutes.min(self.effective_max_stoppage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_probability_is_clamped() {
        let mut cfg = FlowConfig::default();
        assert!((cfg.effective_action_probability() - 0.15).abs() < 1e-12);

        cfg.action_minute_probability = 0.9;
        assert!((cfg.effective_action_probability() - 0.20).abs() < 1e-12);

        cfg.action_minute_probability = 0.0;
        assert!((cfg.effective_action_probability() - 0.10).abs() < 1e-12);

        cfg.action_minute_probability = f64::NAN;
        assert!((cfg.effective_action_probability() - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_stoppage_is_clamped() {
        let mut cfg = FlowConfig::default();
        assert_eq!(cfg.effective_max_stoppage(), 7);
        assert_eq!(cfg.effective_base_stoppage(), 2);

        cfg.base_stoppage_minutes = 20;
        cfg.max_stoppage_minutes = 30;
        assert_eq!(cfg.effective_max_stoppage(), 7);
        assert_eq!(cfg.effective_base_stoppage(), 7);

        cfg.base_stoppage_minutes = 4;
        cfg.max_stoppage_minutes = 3;
        assert_eq!(cfg.effective_base_stoppage(), 3);
    }
}
