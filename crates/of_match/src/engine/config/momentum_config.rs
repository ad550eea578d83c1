use serde::{Deserialize, Serialize};

/// Ceiling on the attacking-probability shift (±25 points)
pub const ATTACK_BIAS_CAP: f32 = 0.25;
/// Ceiling on the xG bonus/penalty (±20%)
pub const XG_BONUS_CAP: f32 = 0.20;

/// Momentum layer parameters. Disable with `enabled = false` to run the
/// bare attribute/duel/xG core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    pub enabled: bool,
    /// Points per minute back toward 0 in a minute without momentum events
    pub decay_per_minute: f32,
    pub goal_swing: f32,
    pub shot_swing: f32,
    pub strike_swing: f32,
    /// Consecutive attacking events by one side that count as a strike
    pub strike_length: u8,
    /// Max shift of the attacking probability at |momentum| = 100 (clamped 0..=0.25)
    pub max_attack_bias: f32,
    /// Max xG bonus/penalty at |momentum| = 100 (clamped 0..=0.20)
    pub max_xg_bonus: f32,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            decay_per_minute: 3.0,
            goal_swing: 30.0,
            shot_swing: 10.0,
            strike_swing: 5.0,
            strike_length: 3,
            max_attack_bias: 0.25,
            max_xg_bonus: 0.20,
        }
    }
}

impl MomentumConfig {
    pub fn effective_attack_bias(&self) -> f32 {
        clamp_cap(self.max_attack_bias, ATTACK_BIAS_CAP)
    }

    pub fn effective_xg_bonus(&self) -> f32 {
        clamp_cap(self.max_xg_bonus, XG_BONUS_CAP)
    }
}

fn clamp_cap(value: f32, cap: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, cap)
    } else {
        0.0
    }
}
