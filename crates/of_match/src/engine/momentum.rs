//! Match Momentum
//!
//! Signed pressure accumulator in -100..=100 (positive favours home).
//!
//! - Goals, shots and attacking strikes push it toward the scoring side
//! - Minutes without any momentum event decay it toward 0
//! - Feeds back into attacking-side selection (`attack_bias`) and shot
//!   quality (`xg_multiplier`)
//!
//! With `MomentumConfig::enabled == false` the tracker stays at 0 and every
//! feedback is neutral.

use serde::{Deserialize, Serialize};

use super::config::MomentumConfig;
use crate::models::TeamSide;

pub const MOMENTUM_MIN: f32 = -100.0;
pub const MOMENTUM_MAX: f32 = 100.0;

/// Things that move momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumEvent {
    Goal,
    Shot,
    /// Consecutive attacking events by one side
    Strike,
}

#[derive(Debug, Clone)]
pub struct MomentumTracker {
    config: MomentumConfig,
    value: f32,
    /// Side of the current attacking run and its length
    run: Option<(TeamSide, u8)>,
    moved_this_minute: bool,
}

impl MomentumTracker {
    pub fn new(config: MomentumConfig) -> Self {
        Self { config, value: 0.0, run: None, moved_this_minute: false }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    fn swing(&self, event: MomentumEvent) -> f32 {
        match event {
            MomentumEvent::Goal => self.config.goal_swing,
            MomentumEvent::Shot => self.config.shot_swing,
            MomentumEvent::Strike => self.config.strike_swing,
        }
    }

    /// Push momentum toward `side`. Saturates at the bounds.
    pub fn apply(&mut self, side: TeamSide, event: MomentumEvent) {
        if !self.config.enabled {
            return;
        }
        let delta = self.swing(event).max(0.0) * side.sign();
        self.value = (self.value + delta).clamp(MOMENTUM_MIN, MOMENTUM_MAX);
        self.moved_this_minute = true;
    }

    /// Register an attacking event; every `strike_length` in a row by the
    /// same side adds a strike swing.
    pub fn record_attack(&mut self, side: TeamSide) {
        if !self.config.enabled {
            return;
        }
        let len = match self.run {
            Some((s, n)) if s == side => n.saturating_add(1),
            _ => 1,
        };
        if self.config.strike_length > 0 && len >= self.config.strike_length {
            self.apply(side, MomentumEvent::Strike);
            self.run = None;
        } else {
            self.run = Some((side, len));
        }
    }

    /// Close the minute: decay toward 0 if nothing moved momentum.
    pub fn end_minute(&mut self) {
        if !self.config.enabled {
            return;
        }
        if !self.moved_this_minute {
            let decay = self.config.decay_per_minute.max(0.0);
            self.value = if self.value > 0.0 {
                (self.value - decay).max(0.0)
            } else {
                (self.value + decay).min(0.0)
            };
        }
        self.moved_this_minute = false;
    }

    /// Shift of the home attacking probability (at most ±0.25).
    pub fn attack_bias(&self) -> f32 {
        if !self.config.enabled {
            return 0.0;
        }
        self.value / MOMENTUM_MAX * self.config.effective_attack_bias()
    }

    /// xG multiplier for a shot by `side`: `1 + bonus·m/100`, sign-aligned.
    pub fn xg_multiplier(&self, side: TeamSide) -> f32 {
        if !self.config.enabled {
            return 1.0;
        }
        1.0 + self.config.effective_xg_bonus() * self.value / MOMENTUM_MAX * side.sign()
    }

    #[doc(hidden)]
    pub fn with_value(config: MomentumConfig, value: f32) -> Self {
        Self { value: value.clamp(MOMENTUM_MIN, MOMENTUM_MAX), ..Self::new(config) }
    }
}
