//! Duel Resolver: 섹터 능력치 대결
//!
//! 하나의 난수로 공격 섹터 vs 수비 섹터를 판정한다.
//!
//! ```text
//! chance = clamp(base + (attack - defense) / 100, 0.15, 0.85)
//! success ⇔ rng.gen::<f32>() < chance
//! ```
//!
//! ## Sector weight table
//!
//! | Sector      | Rating                                                     |
//! |-------------|------------------------------------------------------------|
//! | Creation    | (vision + passing + decisions) / 3                         |
//! | Defense     | (anticipation + marking) / 2                               |
//! | Finishing   | finishing, ×1.1 when flair > 70 and composure > 70 (≤ 100) |
//! | Goalkeeping | (3·goalkeeping + reflexes + positioning) / 5               |
//! | Midfield    | (passing + vision + decisions + teamwork) / 4              |
//!
//! Team ratings average the sector over its role group, falling back to all
//! outfield players and finally to [`DEFAULT_SECTOR_RATING`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{EffectiveAttributes, Position};

pub const MIN_DUEL_CHANCE: f32 = 0.15;
pub const MAX_DUEL_CHANCE: f32 = 0.85;

/// Team rating when no player qualifies for a sector at all.
pub const DEFAULT_SECTOR_RATING: f32 = 40.0;

/// Flair/composure threshold for the finishing characteristic bonus.
pub const FINISHING_FLAIR_THRESHOLD: u8 = 70;
pub const FINISHING_FLAIR_BONUS: f32 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Creation,
    Defense,
    Finishing,
    Goalkeeping,
    Midfield,
}

impl Sector {
    /// Role group whose on-pitch players make up the team rating.
    pub fn includes(&self, position: Position) -> bool {
        match self {
            Sector::Creation => position.is_midfielder() || position.is_forward(),
            Sector::Defense => position.is_defender() || position.is_midfielder(),
            Sector::Finishing => position.is_forward() || position.is_midfielder(),
            Sector::Goalkeeping => position.is_goalkeeper(),
            Sector::Midfield => position.is_midfielder(),
        }
    }

    /// Individual rating (0..=100) from fatigue-adjusted attributes.
    pub fn rating(&self, attrs: &EffectiveAttributes) -> f32 {
        let t = &attrs.technical;
        let m = &attrs.mental;
        let p = &attrs.physical;
        match self {
            Sector::Creation => (m.vision as f32 + t.passing as f32 + m.decisions as f32) / 3.0,
            Sector::Defense => (m.anticipation as f32 + m.marking as f32) / 2.0,
            Sector::Finishing => {
                let base = t.finishing as f32;
                if m.flair > FINISHING_FLAIR_THRESHOLD && m.composure > FINISHING_FLAIR_THRESHOLD {
                    (base * FINISHING_FLAIR_BONUS).min(100.0)
                } else {
                    base
                }
            }
            Sector::Goalkeeping => {
                (3.0 * t.goalkeeping as f32 + p.reflexes as f32 + m.positioning as f32) / 5.0
            }
            Sector::Midfield => {
                (t.passing as f32 + m.vision as f32 + m.decisions as f32 + m.teamwork as f32) / 4.0
            }
        }
    }
}

/// Team sector rating over on-pitch players `(position, effective attributes)`.
///
/// Empty role group → all outfield players → [`DEFAULT_SECTOR_RATING`].
pub fn team_sector_rating<'a, I>(players: I, sector: Sector) -> f32
where
    I: IntoIterator<Item = (Position, &'a EffectiveAttributes)>,
    I::IntoIter: Clone,
{
    let players = players.into_iter();

    let mean = |filter: &dyn Fn(Position) -> bool| -> Option<f32> {
        let (sum, count) = players
            .clone()
            .filter(|(pos, _)| filter(*pos))
            .fold((0.0f32, 0u32), |(s, c), (_, a)| (s + sector.rating(a), c + 1));
        (count > 0).then(|| sum / count as f32)
    };

    mean(&|pos| sector.includes(pos))
        .or_else(|| mean(&|pos| !pos.is_goalkeeper()))
        .unwrap_or(DEFAULT_SECTOR_RATING)
}

/// Weighted-probability contest between two sector ratings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuelResolver;

impl DuelResolver {
    /// Success probability (pure).
    pub fn chance(attack: f32, defense: f32, base_chance: f32) -> f32 {
        let raw = base_chance + (attack - defense) / 100.0;
        if raw.is_finite() {
            raw.clamp(MIN_DUEL_CHANCE, MAX_DUEL_CHANCE)
        } else {
            MIN_DUEL_CHANCE
        }
    }

    /// One draw from `rng`.
    pub fn resolve<R: Rng>(attack: f32, defense: f32, base_chance: f32, rng: &mut R) -> bool {
        rng.gen::<f32>() < Self::chance(attack, defense, base_chance)
    }
}
