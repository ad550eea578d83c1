//! Shot Quality Model (xG)
//!
//! All functions are pure - they take attributes/situation as input and
//! return a probability. The caller draws the random number and compares.
//!
//! ## Output ranges
//! - `base_xg`, `full_xg`, `free_kick_xg`: 0.01..=0.95
//! - `penalty_xg`: 0.50..=0.95
//! - `header_xg`: 0.02..=0.60
//!
//! Attribute inputs are the raw snapshot. Fatigue enters `full_xg` only
//! through the explicit shooter/keeper performance factors.

use crate::models::attributes::norm;
use crate::models::AttributeSnapshot;

pub const XG_MIN: f32 = 0.01;
pub const XG_MAX: f32 = 0.95;
pub const PENALTY_XG_MIN: f32 = 0.50;
pub const PENALTY_XG_MAX: f32 = 0.95;
pub const HEADER_XG_MIN: f32 = 0.02;
pub const HEADER_XG_MAX: f32 = 0.60;

pub const PENALTY_BASE_XG: f32 = 0.76;
pub const HEADER_PENALTY: f32 = 0.7;
pub const BIG_CHANCE_MULTIPLIER: f32 = 1.5;
pub const LATE_GAME_MINUTE: u8 = 80;

/// Distance bands (meters → base probability before angle)
pub mod bands {
    pub const SIX_YARD_M: f32 = 6.0;
    pub const PENALTY_AREA_M: f32 = 16.5;
    pub const EDGE_M: f32 = 22.0;
    pub const LONG_RANGE_M: f32 = 30.0;

    pub const SIX_YARD_XG: f32 = 0.45;
    pub const PENALTY_AREA_XG: f32 = 0.12;
    pub const EDGE_XG: f32 = 0.06;
    pub const LONG_RANGE_XG: f32 = 0.03;
    pub const SPECULATIVE_XG: f32 = 0.01;
}

#[inline]
fn clamp_prob(value: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        min
    }
}

#[inline]
fn unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Situational inputs of an open-play attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSituation {
    /// Performance factor of the shooter (0.30..=1.0)
    pub shooter_fatigue: f32,
    /// Performance factor of the keeper (0.30..=1.0)
    pub keeper_fatigue: f32,
    /// 0.0 (free) ..= 1.0 (fully closed down)
    pub defensive_pressure: f32,
    pub is_big_chance: bool,
    pub is_important_match: bool,
    pub minute: u8,
}

impl Default for ShotSituation {
    fn default() -> Self {
        Self {
            shooter_fatigue: 1.0,
            keeper_fatigue: 1.0,
            defensive_pressure: 0.0,
            is_big_chance: false,
            is_important_match: false,
            minute: 1,
        }
    }
}

/// Geometry-only xG.
pub fn base_xg(distance_m: f32, angle_deg: f32, is_header: bool) -> f32 {
    let distance = if distance_m.is_finite() { distance_m.max(0.0) } else { f32::MAX };
    let band = if distance <= bands::SIX_YARD_M {
        bands::SIX_YARD_XG
    } else if distance <= bands::PENALTY_AREA_M {
        bands::PENALTY_AREA_XG
    } else if distance <= bands::EDGE_M {
        bands::EDGE_XG
    } else if distance <= bands::LONG_RANGE_M {
        bands::LONG_RANGE_XG
    } else {
        bands::SPECULATIVE_XG
    };

    let angle = if angle_deg.is_finite() { angle_deg.clamp(0.0, 180.0) } else { 0.0 };
    let mut xg = band * angle.to_radians().sin();
    if is_header {
        xg *= HEADER_PENALTY;
    }
    clamp_prob(xg, XG_MIN, XG_MAX)
}

/// Shooter quality term: `0.5 + (0.7·finishing + 0.3·technique)/100`
#[inline]
pub fn shooter_skill_multiplier(shooter: &AttributeSnapshot) -> f32 {
    let t = shooter.technical();
    0.5 + (0.7 * t.finishing as f32 + 0.3 * t.technique as f32) / 100.0
}

/// Keeper quality term: `1.5 - (0.6·goalkeeping + 0.4·reflexes)/100`
#[inline]
pub fn keeper_skill_multiplier(keeper: &AttributeSnapshot) -> f32 {
    1.5 - (0.6 * keeper.technical().goalkeeping as f32 + 0.4 * keeper.physical().reflexes as f32)
        / 100.0
}

/// Full open-play xG.
pub fn full_xg(
    base: f32,
    shooter: &AttributeSnapshot,
    keeper: &AttributeSnapshot,
    situation: &ShotSituation,
) -> f32 {
    let mut xg = clamp_prob(base, XG_MIN, XG_MAX);

    xg *= shooter_skill_multiplier(shooter);
    xg *= keeper_skill_multiplier(keeper);
    xg *= 0.7 + 0.3 * unit(situation.shooter_fatigue);
    // tired keeper → higher opponent xG
    xg *= 2.0 - (0.7 + 0.3 * unit(situation.keeper_fatigue));
    xg *= 1.0 - 0.4 * unit(situation.defensive_pressure);

    if situation.is_big_chance {
        xg *= BIG_CHANCE_MULTIPLIER;
    }
    if situation.is_important_match {
        xg *= 0.7 + 0.3 * norm(shooter.mental().composure);
    }
    if situation.minute > LATE_GAME_MINUTE {
        xg *= 0.8 + 0.2 * norm(shooter.mental().concentration);
    }

    clamp_prob(xg, XG_MIN, XG_MAX)
}

pub fn penalty_xg(taker: &AttributeSnapshot, keeper: &AttributeSnapshot, is_important_match: bool) -> f32 {
    let mut xg = PENALTY_BASE_XG;
    xg *= 0.8 + 0.4 * norm(taker.technical().penalty);
    xg *= 1.2 - 0.3 * norm(keeper.technical().one_on_one);
    if is_important_match {
        xg *= 0.7 + 0.3 * norm(taker.mental().composure);
    }
    clamp_prob(xg, PENALTY_XG_MIN, PENALTY_XG_MAX)
}

pub fn header_xg(
    header: &AttributeSnapshot,
    crosser: &AttributeSnapshot,
    keeper: &AttributeSnapshot,
    distance_m: f32,
    is_marked: bool,
) -> f32 {
    let mut xg = base_xg(distance_m, 45.0, true);
    xg *= 0.6 + 0.6 * norm(crosser.technical().crossing);
    xg *= 0.5 + 0.3 * norm(header.technical().heading) + 0.2 * norm(header.physical().jump);
    xg *= 1.3 - 0.3 * norm(keeper.technical().rushing);
    if is_marked {
        xg *= 0.6;
    }
    clamp_prob(xg, HEADER_XG_MIN, HEADER_XG_MAX)
}

/// Direct free kick: geometry × free-kick skill × keeper term.
pub fn free_kick_xg(
    taker: &AttributeSnapshot,
    keeper: &AttributeSnapshot,
    distance_m: f32,
    angle_deg: f32,
) -> f32 {
    let mut xg = base_xg(distance_m, angle_deg, false);
    xg *= 0.6 + 0.8 * norm(taker.technical().free_kick);
    xg *= keeper_skill_multiplier(keeper);
    clamp_prob(xg, XG_MIN, XG_MAX)
}

/// Optional layers (momentum, weather) on top of a computed xG.
pub fn apply_modifiers(xg: f32, momentum_multiplier: f32, weather_multiplier: f32) -> f32 {
    let m = if momentum_multiplier.is_finite() { momentum_multiplier.max(0.0) } else { 1.0 };
    let w = if weather_multiplier.is_finite() { weather_multiplier.max(0.0) } else { 1.0 };
    clamp_prob(xg * m * w, XG_MIN, XG_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerAttributes;

    fn snap(value: u8) -> AttributeSnapshot {
        AttributeSnapshot::from_raw(&PlayerAttributes::uniform(value))
    }

    fn snap_with(f: impl FnOnce(&mut PlayerAttributes)) -> AttributeSnapshot {
        let mut raw = PlayerAttributes::uniform(50);
        f(&mut raw);
        AttributeSnapshot::from_raw(&raw)
    }

    #[test]
    fn test_base_xg_six_yard_straight_on() {
        assert!((base_xg(5.0, 90.0, false) - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_base_xg_bands() {
        assert!((base_xg(6.0, 90.0, false) - 0.45).abs() < 1e-6);
        assert!((base_xg(12.0, 90.0, false) - 0.12).abs() < 1e-6);
        assert!((base_xg(20.0, 90.0, false) - 0.06).abs() < 1e-6);
        assert!((base_xg(25.0, 90.0, false) - 0.03).abs() < 1e-6);
        assert!((base_xg(40.0, 90.0, false) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_base_xg_header_and_angle() {
        assert!((base_xg(5.0, 90.0, true) - 0.315).abs() < 1e-6);
        // sin(30°) = 0.5
        assert!((base_xg(12.0, 30.0, false) - 0.06).abs() < 1e-5);
        // zero angle floors at the minimum
        assert!((base_xg(5.0, 0.0, false) - XG_MIN).abs() < 1e-6);
    }

    #[test]
    fn test_penalty_reference_value() {
        let taker = snap_with(|a| a.technical.penalty = 50);
        let keeper = snap_with(|a| a.technical.one_on_one = 50);
        // 0.76 × 1.0 × 1.05
        assert!((penalty_xg(&taker, &keeper, false) - 0.798).abs() < 1e-5);
    }

    #[test]
    fn test_penalty_clamps() {
        assert!((penalty_xg(&snap(100), &snap(1), false) - PENALTY_XG_MAX).abs() < 1e-6);
        assert!(penalty_xg(&snap(1), &snap(100), true) >= PENALTY_XG_MIN);
    }

    #[test]
    fn test_full_xg_average_players_reference() {
        let shooter = snap(50);
        let keeper = snap(50);
        let base = 0.12;
        // 0.12 × 1.0 × 1.0 × 1.0 × 1.0 × 1.0
        let xg = full_xg(base, &shooter, &keeper, &ShotSituation::default());
        assert!((xg - 0.12).abs() < 1e-5);
    }

    #[test]
    fn test_full_xg_situational_terms() {
        let shooter = snap(50);
        let keeper = snap(50);
        let base = 0.12;
        let plain = full_xg(base, &shooter, &keeper, &ShotSituation::default());

        let big = ShotSituation { is_big_chance: true, ..Default::default() };
        assert!((full_xg(base, &shooter, &keeper, &big) - plain * 1.5).abs() < 1e-5);

        let pressed = ShotSituation { defensive_pressure: 1.0, ..Default::default() };
        assert!((full_xg(base, &shooter, &keeper, &pressed) - plain * 0.6).abs() < 1e-5);

        let tired_keeper = ShotSituation { keeper_fatigue: 0.3, ..Default::default() };
        assert!(full_xg(base, &shooter, &keeper, &tired_keeper) > plain);

        let tired_shooter = ShotSituation { shooter_fatigue: 0.3, ..Default::default() };
        assert!(full_xg(base, &shooter, &keeper, &tired_shooter) < plain);

        let late = ShotSituation { minute: 85, ..Default::default() };
        assert!((full_xg(base, &shooter, &keeper, &late) - plain * 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_header_xg_marked_is_lower() {
        let header = snap(70);
        let crosser = snap(70);
        let keeper = snap(50);
        let free = header_xg(&header, &crosser, &keeper, 8.0, false);
        let marked = header_xg(&header, &crosser, &keeper, 8.0, true);
        assert!(marked < free);
        assert!((HEADER_XG_MIN..=HEADER_XG_MAX).contains(&marked));
    }

    #[test]
    fn test_free_kick_rewards_specialist() {
        let keeper = snap(50);
        let specialist = snap_with(|a| a.technical.free_kick = 95);
        let novice = snap_with(|a| a.technical.free_kick = 10);
        assert!(free_kick_xg(&specialist, &keeper, 22.0, 80.0) > free_kick_xg(&novice, &keeper, 22.0, 80.0));
    }

    #[test]
    fn test_apply_modifiers_reclamps() {
        assert!((apply_modifiers(0.9, 1.2, 1.0) - XG_MAX).abs() < 1e-6);
        assert!((apply_modifiers(0.1, 0.8, 0.9) - 0.072).abs() < 1e-6);
        assert!((apply_modifiers(0.1, f32::NAN, 1.0) - 0.1).abs() < 1e-6);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_snapshot() -> impl Strategy<Value = AttributeSnapshot> {
            (1u8..=100, 1u8..=100, 1u8..=100, 1u8..=100).prop_map(|(a, b, c, d)| {
                let mut raw = PlayerAttributes::uniform(a);
                raw.technical.finishing = b;
                raw.technical.goalkeeping = c;
                raw.physical.reflexes = d;
                raw.mental.composure = c;
                raw.technical.penalty = d;
                raw.technical.one_on_one = b;
                raw.technical.crossing = c;
                raw.technical.heading = a;
                raw.technical.rushing = d;
                AttributeSnapshot::from_raw(&raw)
            })
        }

        proptest! {
            #[test]
            fn prop_base_xg_in_range(d in -5.0f32..60.0, a in -30.0f32..200.0, h in any::<bool>()) {
                let xg = base_xg(d, a, h);
                prop_assert!((XG_MIN..=XG_MAX).contains(&xg));
            }

            #[test]
            fn prop_full_xg_in_range(
                base in 0.0f32..1.0,
                shooter in any_snapshot(),
                keeper in any_snapshot(),
                sf in 0.3f32..=1.0,
                kf in 0.3f32..=1.0,
                pressure in 0.0f32..=1.0,
                big in any::<bool>(),
                important in any::<bool>(),
                minute in 1u8..=97,
            ) {
                let situation = ShotSituation {
                    shooter_fatigue: sf,
                    keeper_fatigue: kf,
                    defensive_pressure: pressure,
                    is_big_chance: big,
                    is_important_match: important,
                    minute,
                };
                let xg = full_xg(base, &shooter, &keeper, &situation);
                prop_assert!((XG_MIN..=XG_MAX).contains(&xg));
            }

            #[test]
            fn prop_penalty_xg_in_range(taker in any_snapshot(), keeper in any_snapshot(), important in any::<bool>()) {
                let xg = penalty_xg(&taker, &keeper, important);
                prop_assert!((PENALTY_XG_MIN..=PENALTY_XG_MAX).contains(&xg));
            }

            #[test]
            fn prop_header_xg_in_range(
                header in any_snapshot(),
                crosser in any_snapshot(),
                keeper in any_snapshot(),
                d in 0.0f32..40.0,
                marked in any::<bool>(),
            ) {
                let xg = header_xg(&header, &crosser, &keeper, d, marked);
                prop_assert!((HEADER_XG_MIN..=HEADER_XG_MAX).contains(&xg));
            }
        }
    }
}
