pub mod batch; // N-match parallel runner (rayon)
pub mod config; // Tuning configuration (serde/YAML, presets)
pub mod duel; // Sector ratings + duel resolution
pub mod fatigue; // Energy → performance factor, spend/recover
pub mod match_sim;
pub mod momentum;
pub mod phase;
pub mod providers; // Personality / morale inputs
pub mod rating; // Player match rating accumulator
pub mod roster; // Per-match player slot arena
pub mod sinks; // Narration / statistics outputs
pub mod xg; // Shot quality model

pub use batch::{derive_seed, run_batch, simulate_batch, BatchSummary};
pub use config::EngineConfig;
pub use match_sim::{simulate_match, MatchEngine, MatchState};
pub use phase::MatchPhase;
pub use providers::{MoraleProvider, Neutral, PersonalityProvider};
pub use sinks::{NarrationSink, StatisticsSink, TextNarrator};
