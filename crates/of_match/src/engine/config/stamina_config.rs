//! Stamina Configuration
//!
//! Energy is on a 0-100 scale. Every cost/recovery below is expressed as
//! `amount × (base ± slope · stamina/100)`.

use serde::{Deserialize, Serialize};

/// Stamina 시스템 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    // === Per-minute drain ===
    /// 분당 기본 소모량 (기본: 0.8)
    pub base_minute_cost: f32,
    /// `(1.5 - 0.5·stamina)` 의 1.5 (기본: 1.5)
    pub minute_stamina_base: f32,
    /// `(1.5 - 0.5·stamina)` 의 0.5 (기본: 0.5)
    pub minute_stamina_slope: f32,

    // === Action costs ===
    pub sprint_cost: f32,
    pub physical_duel_cost: f32,
    pub dribble_cost: f32,
    pub shot_cost: f32,
    pub long_pass_cost: f32,
    pub header_cost: f32,
    pub tackle_cost: f32,
    pub other_action_cost: f32,
    /// `(1.3 - 0.3·stamina)` (기본: 1.3 / 0.3)
    pub action_stamina_base: f32,
    pub action_stamina_slope: f32,
    /// Physical duels only: `(1.2 - 0.4·strength)`
    pub duel_strength_base: f32,
    pub duel_strength_slope: f32,

    // === Recovery ===
    pub half_time_recovery: f32,
    pub dead_ball_recovery: f32,
    pub substitution_recovery: f32,
    pub goal_recovery: f32,
    /// `(0.8 + 0.4·stamina)` (기본: 0.8 / 0.4)
    pub recovery_stamina_base: f32,
    pub recovery_stamina_slope: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            base_minute_cost: 0.8,
            minute_stamina_base: 1.5,
            minute_stamina_slope: 0.5,

            sprint_cost: 2.0,
            physical_duel_cost: 1.5,
            dribble_cost: 1.2,
            shot_cost: 0.8,
            long_pass_cost: 0.5,
            header_cost: 1.0,
            tackle_cost: 1.3,
            other_action_cost: 0.3,
            action_stamina_base: 1.3,
            action_stamina_slope: 0.3,
            duel_strength_base: 1.2,
            duel_strength_slope: 0.4,

            half_time_recovery: 15.0,
            dead_ball_recovery: 3.0,
            substitution_recovery: 2.0,
            goal_recovery: 4.0,
            recovery_stamina_base: 0.8,
            recovery_stamina_slope: 0.4,
        }
    }
}
