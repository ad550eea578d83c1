//! Fatigue Tracker: per-player energy (0-100) for one match.
//!
//! ## 구조
//! - 비용/회복 계산은 순수 함수 (`spend_per_minute`, `spend_for_action`, `recover`)
//! - 상태 변경은 `apply_cost` / `apply_recovery` 만 수행 (항상 0..=100 clamp)
//! - `energy_to_performance_factor` 가 energy → 능력치 배율 (0.30..=1.0)
//!
//! Energy is indexed by the engine's per-match player slot. Stamina and
//! strength always come from the raw snapshot, not the fatigue-adjusted view,
//! so a tired player does not tire even faster through his own fatigue.

use serde::{Deserialize, Serialize};

use super::config::StaminaConfig;
use crate::models::attributes::norm;
use crate::models::{AttributeSnapshot, PressIntensity, Tempo};

pub const ENERGY_MIN: f32 = 0.0;
pub const ENERGY_MAX: f32 = 100.0;

pub const MIN_PERFORMANCE_FACTOR: f32 = 0.30;
pub const MAX_PERFORMANCE_FACTOR: f32 = 1.0;

pub const BASE_INJURY_RISK: f64 = 0.001;
pub const MAX_INJURY_RISK: f64 = 0.05;

/// Discrete actions with a fixed energy price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Sprint,
    PhysicalDuel,
    Dribble,
    Shot,
    LongPass,
    Header,
    Tackle,
    Other,
}

/// Stoppages during which players get some energy back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseKind {
    HalfTime,
    DeadBall,
    Substitution,
    Goal,
}

#[inline]
fn clamp_energy(energy: f32) -> f32 {
    if energy.is_finite() {
        energy.clamp(ENERGY_MIN, ENERGY_MAX)
    } else {
        ENERGY_MIN
    }
}

/// Energy → performance multiplier. Monotonically non-decreasing.
///
/// | energy   | factor                          |
/// |----------|---------------------------------|
/// | 80..=100 | 0.95 + 0.0025·(e-80)            |
/// | 50..80   | 0.75 + (0.20/30)·(e-50)         |
/// | 20..50   | 0.45 + 0.01·(e-20)              |
/// | 0..20    | 0.30 + 0.0075·e                 |
pub fn energy_to_performance_factor(energy: f32) -> f32 {
    let e = clamp_energy(energy);
    let factor = if e >= 80.0 {
        0.95 + 0.0025 * (e - 80.0)
    } else if e >= 50.0 {
        // 0.2/30 keeps the curve continuous at 80 (0.0067 would overshoot 0.95)
        0.75 + (0.20 / 30.0) * (e - 50.0)
    } else if e >= 20.0 {
        0.45 + 0.01 * (e - 20.0)
    } else {
        0.30 + 0.0075 * e
    };
    factor.clamp(MIN_PERFORMANCE_FACTOR, MAX_PERFORMANCE_FACTOR)
}

/// Per-minute injury probability.
///
/// Low energy tiers are exclusive (×3 below 30, otherwise ×1.5 below 50).
/// Age beyond 32 adds 15% per year. Hard cap 5%.
pub fn injury_risk(energy: f32, age: u8) -> f64 {
    let e = clamp_energy(energy);
    let mut risk = BASE_INJURY_RISK;
    if e < 30.0 {
        risk *= 3.0;
    } else if e < 50.0 {
        risk *= 1.5;
    }
    let years_over = (age as i32 - 32).max(0) as f64;
    risk *= 1.0 + years_over * 0.15;
    risk.clamp(0.0, MAX_INJURY_RISK)
}

/// Energy state of every player slot in one match.
#[derive(Debug, Clone)]
pub struct FatigueTracker {
    config: StaminaConfig,
    energy: Vec<f32>,
    initial: Vec<f32>,
}

impl FatigueTracker {
    pub fn new(config: StaminaConfig, initial_energy: impl IntoIterator<Item = f32>) -> Self {
        let energy: Vec<f32> = initial_energy.into_iter().map(clamp_energy).collect();
        Self { config, initial: energy.clone(), energy }
    }

    pub fn config(&self) -> &StaminaConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    /// Current energy of a slot (0.0 for unknown slots).
    pub fn energy(&self, slot: usize) -> f32 {
        self.energy.get(slot).copied().unwrap_or(ENERGY_MIN)
    }

    pub fn initial_energy(&self, slot: usize) -> f32 {
        self.initial.get(slot).copied().unwrap_or(ENERGY_MIN)
    }

    pub fn performance_factor(&self, slot: usize) -> f32 {
        energy_to_performance_factor(self.energy(slot))
    }

    /// Energy cost of one minute of play (>= 0).
    pub fn spend_per_minute(
        &self,
        attrs: &AttributeSnapshot,
        press_intensity: PressIntensity,
        tempo: Tempo,
        has_possession: bool,
    ) -> f32 {
        let c = &self.config;
        let stamina = norm(attrs.physical().stamina);
        let base = c.base_minute_cost * (c.minute_stamina_base - c.minute_stamina_slope * stamina);
        let tactical = if has_possession {
            tempo.energy_cost_factor()
        } else {
            press_intensity.energy_cost_factor()
        };
        (base * tactical).max(0.0)
    }

    /// Energy cost of a discrete action (>= 0).
    pub fn spend_for_action(&self, attrs: &AttributeSnapshot, action: ActionKind) -> f32 {
        let c = &self.config;
        let base = match action {
            ActionKind::Sprint => c.sprint_cost,
            ActionKind::PhysicalDuel => c.physical_duel_cost,
            ActionKind::Dribble => c.dribble_cost,
            ActionKind::Shot => c.shot_cost,
            ActionKind::LongPass => c.long_pass_cost,
            ActionKind::Header => c.header_cost,
            ActionKind::Tackle => c.tackle_cost,
            ActionKind::Other => c.other_action_cost,
        };
        let stamina = norm(attrs.physical().stamina);
        let mut cost = base * (c.action_stamina_base - c.action_stamina_slope * stamina);
        if action == ActionKind::PhysicalDuel {
            let strength = norm(attrs.physical().strength);
            cost *= c.duel_strength_base - c.duel_strength_slope * strength;
        }
        cost.max(0.0)
    }

    /// Energy regained during a stoppage (>= 0).
    pub fn recover(&self, attrs: &AttributeSnapshot, pause: PauseKind) -> f32 {
        let c = &self.config;
        let base = match pause {
            PauseKind::HalfTime => c.half_time_recovery,
            PauseKind::DeadBall => c.dead_ball_recovery,
            PauseKind::Substitution => c.substitution_recovery,
            PauseKind::Goal => c.goal_recovery,
        };
        let stamina = norm(attrs.physical().stamina);
        (base * (c.recovery_stamina_base + c.recovery_stamina_slope * stamina)).max(0.0)
    }

    pub fn apply_cost(&mut self, slot: usize, cost: f32) {
        if let Some(e) = self.energy.get_mut(slot) {
            *e = clamp_energy(*e - cost.max(0.0));
        }
    }

    pub fn apply_recovery(&mut self, slot: usize, gain: f32) {
        if let Some(e) = self.energy.get_mut(slot) {
            *e = clamp_energy(*e + gain.max(0.0));
        }
    }

    /// One minute of drain for a slot; `multiplier` carries weather/team modifiers.
    pub fn drain_minute(
        &mut self,
        slot: usize,
        attrs: &AttributeSnapshot,
        press_intensity: PressIntensity,
        tempo: Tempo,
        has_possession: bool,
        multiplier: f32,
    ) {
        let cost = self.spend_per_minute(attrs, press_intensity, tempo, has_possession);
        self.apply_cost(slot, cost * multiplier.max(0.0));
    }

    pub fn exert(&mut self, slot: usize, attrs: &AttributeSnapshot, action: ActionKind) {
        let cost = self.spend_for_action(attrs, action);
        self.apply_cost(slot, cost);
    }

    pub fn rest(&mut self, slot: usize, attrs: &AttributeSnapshot, pause: PauseKind) {
        let gain = self.recover(attrs, pause);
        self.apply_recovery(slot, gain);
    }

    #[doc(hidden)]
    pub fn set_energy(&mut self, slot: usize, energy: f32) {
        if let Some(e) = self.energy.get_mut(slot) {
            *e = clamp_energy(energy);
        }
    }
}
