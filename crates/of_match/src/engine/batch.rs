//! Batch simulation
//!
//! 같은 두 팀으로 N 경기를 병렬 시뮬레이션하고 통계를 집계한다.
//! One engine and one RNG per match; seeds are derived from the base seed so
//! the aggregate does not depend on thread scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::EngineConfig;
use super::match_sim::MatchEngine;
use crate::error::ValidationError;
use crate::models::{MatchContext, MatchResult, TeamLineup, TeamSide};

/// Below this many matches the batch runs sequentially.
const PARALLEL_THRESHOLD: u32 = 16;

/// Seed of the `index`-th match of a batch.
pub fn derive_seed(base_seed: u64, index: u32) -> u64 {
    // splitmix64 finalizer
    let mut z = base_seed.wrapping_add((index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Aggregate over a batch. Means are per match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub matches: u32,
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    pub mean_goals_home: f64,
    pub mean_goals_away: f64,
    pub mean_goal_difference: f64,
    pub mean_xg_home: f64,
    pub mean_xg_away: f64,
    pub mean_shots: f64,
    pub mean_cards: f64,
    pub mean_stoppage_minutes: f64,
    pub mean_possession_home: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let n = results.len();
        if n == 0 {
            return Self::default();
        }
        let mut s = Self { matches: n as u32, ..Self::default() };
        for r in results {
            match r.winner() {
                Some(TeamSide::Home) => s.home_wins += 1,
                Some(TeamSide::Away) => s.away_wins += 1,
                None => s.draws += 1,
            }
            s.mean_goals_home += r.score_home as f64;
            s.mean_goals_away += r.score_away as f64;
            s.mean_goal_difference += r.goal_difference() as f64;
            s.mean_xg_home += r.home.xg as f64;
            s.mean_xg_away += r.away.xg as f64;
            s.mean_shots += r.home.shots as f64 + r.away.shots as f64;
            s.mean_cards += [r.home.yellow_cards, r.home.red_cards, r.away.yellow_cards, r.away.red_cards]
                .iter()
                .map(|&c| c as f64)
                .sum::<f64>();
            s.mean_stoppage_minutes += r.stoppage_minutes as f64;
            s.mean_possession_home += r.possession_home as f64;
        }
        let n = n as f64;
        for mean in [
            &mut s.mean_goals_home,
            &mut s.mean_goals_away,
            &mut s.mean_goal_difference,
            &mut s.mean_xg_home,
            &mut s.mean_xg_away,
            &mut s.mean_shots,
            &mut s.mean_cards,
            &mut s.mean_stoppage_minutes,
            &mut s.mean_possession_home,
        ] {
            *mean /= n;
        }
        s
    }

    pub fn home_win_rate(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            self.home_wins as f64 / self.matches as f64
        }
    }
}

/// Simulate `count` matches and return every result in seed order.
///
/// Lineups are validated once up front; a bad lineup fails the whole batch.
pub fn simulate_batch(
    home: &TeamLineup,
    away: &TeamLineup,
    context: MatchContext,
    config: &EngineConfig,
    base_seed: u64,
    count: u32,
) -> Result<Vec<MatchResult>, ValidationError> {
    MatchEngine::from_seed(home, away, context, config.clone(), base_seed)?;

    let run = |index: u32| -> Result<MatchResult, ValidationError> {
        let mut engine =
            MatchEngine::from_seed(home, away, context, config.clone(), derive_seed(base_seed, index))?;
        Ok(engine.simulate_full_match())
    };

    let results = if count > PARALLEL_THRESHOLD {
        (0..count).into_par_iter().map(run).collect::<Result<Vec<_>, _>>()?
    } else {
        (0..count).map(run).collect::<Result<Vec<_>, _>>()?
    };
    info!(matches = count, base_seed, "batch finished");
    Ok(results)
}

/// [`simulate_batch`] followed by [`BatchSummary::from_results`].
pub fn run_batch(
    home: &TeamLineup,
    away: &TeamLineup,
    context: MatchContext,
    config: &EngineConfig,
    base_seed: u64,
    count: u32,
) -> Result<BatchSummary, ValidationError> {
    let results = simulate_batch(home, away, context, config, base_seed, count)?;
    Ok(BatchSummary::from_results(&results))
}
