//! # Engine Configuration Module
//!
//! 모든 튜닝 상수를 중앙에서 관리하는 설정 시스템.
//!
//! ## 사용법
//! ```rust
//! use of_match::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.flow.action_minute_probability > config.flow.action_minute_probability);
//! ```
//!
//! ## Environment Variables
//!
//! - `OF_MATCH_PROFILE`: Select preset (realistic, arcade, simulation, core_only)

mod flow_config;
mod momentum_config;
mod stamina_config;

pub use flow_config::{FlowConfig, MAX_ACTION_MINUTE_PROBABILITY, MIN_ACTION_MINUTE_PROBABILITY};
pub use momentum_config::MomentumConfig;
pub use stamina_config::StaminaConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::Result;

pub const PROFILE_ENV: &str = "OF_MATCH_PROFILE";

/// 전체 엔진 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub stamina: StaminaConfig,
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub momentum: MomentumConfig,
}

impl EngineConfig {
    /// 현실적인 시뮬레이션 (기본)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// 아케이드 스타일 (더 많은 공격, 더 많은 골)
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.flow.action_minute_probability = 0.20;
        cfg.flow.creation_base_chance = 0.58;
        cfg.flow.big_chance_probability = 0.5;
        cfg.momentum.max_xg_bonus = 0.20;
        cfg
    }

    /// 시뮬레이션 스타일 (더 적은 찬스, 더 많은 체력 소모)
    pub fn simulation() -> Self {
        let mut cfg = Self::default();
        cfg.flow.action_minute_probability = 0.12;
        cfg.flow.creation_base_chance = 0.45;
        cfg.stamina.base_minute_cost = 0.9;
        cfg.momentum.max_xg_bonus = 0.10;
        cfg
    }

    /// Attribute/duel/xG/fatigue core only: no momentum, set pieces or injuries.
    pub fn core_only() -> Self {
        let mut cfg = Self::default();
        cfg.momentum.enabled = false;
        cfg.flow.set_pieces_enabled = false;
        cfg.flow.injuries_enabled = false;
        cfg
    }

    pub fn from_profile(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "realistic" | "default" => Some(Self::realistic()),
            "arcade" => Some(Self::arcade()),
            "simulation" => Some(Self::simulation()),
            "core_only" | "core" => Some(Self::core_only()),
            _ => None,
        }
    }

    /// Preset named by `OF_MATCH_PROFILE`, or the default.
    pub fn from_env_or_default() -> Self {
        env::var(PROFILE_ENV)
            .ok()
            .and_then(|name| Self::from_profile(&name))
            .unwrap_or_default()
    }

    /// Missing sections/fields fall back to defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::info!("Loading engine config from {}", path.display());
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

// ========== Tests ==========
