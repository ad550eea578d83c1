//! # of_match - Attribute-Driven Football Match Engine
//!
//! 경기 결과를 팀 종합 능력치가 아닌 선수 개인 능력치로부터 분 단위로 시뮬레이션한다.
//!
//! ## Features
//! - Minute-by-minute state machine (`engine::match_sim`)
//! - Duel resolution between sector ratings, xG shot model, fatigue curve
//! - Momentum, set pieces, cards, injuries and substitutions as optional layers
//! - 100% deterministic: same lineups + config + seed = byte-identical result
//! - JSON API and a parallel batch runner
//!
//! ```rust
//! use of_match::engine::{simulate_match, EngineConfig};
//! use of_match::fixtures::{demo_away, demo_home};
//! use of_match::models::MatchContext;
//!
//! let result = simulate_match(&demo_home(), &demo_away(), MatchContext::default(), EngineConfig::default(), 42)
//!     .expect("valid lineups");
//! assert!((90..=97).contains(&result.final_minute));
//! ```

#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
#[doc(hidden)]
pub mod fixtures;
pub mod models;

pub use api::{simulate_match_json, MatchRequest, MatchResponse};
pub use engine::{simulate_match, EngineConfig, MatchEngine, MatchPhase, MatchState};
pub use error::{MatchError, Result, StateError, ValidationError};
pub use models::{MatchContext, MatchEvent, MatchResult, PlayerRecord, TeamLineup, TeamSide};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
