//! Player attribute groups
//!
//! 선수 능력치는 세 그룹(physical / technical / mental)으로 나뉜다.
//! 모든 값은 1..=100 정수로 clamp 된다.
//!
//! `AttributeSnapshot` is built once at kickoff and never mutated during the
//! match. Fatigue is applied on demand through the pure `effective` functions,
//! which only ever scale values down.

use serde::{Deserialize, Serialize};

pub const ATTR_MIN: u8 = 1;
pub const ATTR_MAX: u8 = 100;

/// Clamp a raw value into the attribute range.
#[inline]
pub fn clamp_attr(value: i32) -> u8 {
    value.clamp(ATTR_MIN as i32, ATTR_MAX as i32) as u8
}

/// Scale an attribute by a fatigue factor. Never raises the value.
#[inline]
fn scale(value: u8, factor: f32) -> u8 {
    let factor = if factor.is_finite() { factor.clamp(0.0, 1.0) } else { 1.0 };
    let scaled = (value as f32 * factor).floor() as i32;
    clamp_attr(scaled).min(value)
}

/// Normalize an attribute to 0.0..=1.0.
#[inline]
pub fn norm(value: u8) -> f32 {
    value as f32 / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalAttributes {
    pub speed: u8,
    pub stamina: u8,
    pub strength: u8,
    pub jump: u8,
    pub agility: u8,
    pub reflexes: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalAttributes {
    pub passing: u8,
    pub long_passing: u8,
    pub crossing: u8,
    pub finishing: u8,
    pub heading: u8,
    pub dribbling: u8,
    pub first_touch: u8,
    pub technique: u8,
    pub free_kick: u8,
    pub penalty: u8,
    pub goalkeeping: u8,
    pub one_on_one: u8,
    pub rushing: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentalAttributes {
    pub decisions: u8,
    pub vision: u8,
    pub anticipation: u8,
    pub composure: u8,
    pub concentration: u8,
    pub bravery: u8,
    pub teamwork: u8,
    pub off_ball_movement: u8,
    pub aggression: u8,
    pub determination: u8,
    pub leadership: u8,
    pub positioning: u8,
    pub marking: u8,
    pub tackling: u8,
    pub flair: u8,
}

impl PhysicalAttributes {
    pub fn uniform(value: u8) -> Self {
        let v = clamp_attr(value as i32);
        Self { speed: v, stamina: v, strength: v, jump: v, agility: v, reflexes: v }
    }

    /// Apply `f` to every field (result clamped to 1..=100).
    pub fn map(&self, f: impl Fn(u8) -> i32) -> Self {
        let c = |v: u8| clamp_attr(f(v));
        Self {
            speed: c(self.speed),
            stamina: c(self.stamina),
            strength: c(self.strength),
            jump: c(self.jump),
            agility: c(self.agility),
            reflexes: c(self.reflexes),
        }
    }

    pub fn effective(&self, fatigue_factor: f32) -> Self {
        let s = |v| scale(v, fatigue_factor);
        Self {
            speed: s(self.speed),
            stamina: s(self.stamina),
            strength: s(self.strength),
            jump: s(self.jump),
            agility: s(self.agility),
            reflexes: s(self.reflexes),
        }
    }

    pub fn values(&self) -> [u8; 6] {
        [self.speed, self.stamina, self.strength, self.jump, self.agility, self.reflexes]
    }
}

impl TechnicalAttributes {
    pub fn uniform(value: u8) -> Self {
        let v = clamp_attr(value as i32);
        Self {
            passing: v,
            long_passing: v,
            crossing: v,
            finishing: v,
            heading: v,
            dribbling: v,
            first_touch: v,
            technique: v,
            free_kick: v,
            penalty: v,
            goalkeeping: v,
            one_on_one: v,
            rushing: v,
        }
    }

    pub fn map(&self, f: impl Fn(u8) -> i32) -> Self {
        let c = |v: u8| clamp_attr(f(v));
        Self {
            passing: c(self.passing),
            long_passing: c(self.long_passing),
            crossing: c(self.crossing),
            finishing: c(self.finishing),
            heading: c(self.heading),
            dribbling: c(self.dribbling),
            first_touch: c(self.first_touch),
            technique: c(self.technique),
            free_kick: c(self.free_kick),
            penalty: c(self.penalty),
            goalkeeping: c(self.goalkeeping),
            one_on_one: c(self.one_on_one),
            rushing: c(self.rushing),
        }
    }

    pub fn effective(&self, fatigue_factor: f32) -> Self {
        self.map(|v| scale(v, fatigue_factor) as i32)
    }

    pub fn values(&self) -> [u8; 13] {
        [
            self.passing,
            self.long_passing,
            self.crossing,
            self.finishing,
            self.heading,
            self.dribbling,
            self.first_touch,
            self.technique,
            self.free_kick,
            self.penalty,
            self.goalkeeping,
            self.one_on_one,
            self.rushing,
        ]
    }
}

impl MentalAttributes {
    pub fn uniform(value: u8) -> Self {
        let v = clamp_attr(value as i32);
        Self {
            decisions: v,
            vision: v,
            anticipation: v,
            composure: v,
            concentration: v,
            bravery: v,
            teamwork: v,
            off_ball_movement: v,
            aggression: v,
            determination: v,
            leadership: v,
            positioning: v,
            marking: v,
            tackling: v,
            flair: v,
        }
    }

    pub fn map(&self, f: impl Fn(u8) -> i32) -> Self {
        let c = |v: u8| clamp_attr(f(v));
        Self {
            decisions: c(self.decisions),
            vision: c(self.vision),
            anticipation: c(self.anticipation),
            composure: c(self.composure),
            concentration: c(self.concentration),
            bravery: c(self.bravery),
            teamwork: c(self.teamwork),
            off_ball_movement: c(self.off_ball_movement),
            aggression: c(self.aggression),
            determination: c(self.determination),
            leadership: c(self.leadership),
            positioning: c(self.positioning),
            marking: c(self.marking),
            tackling: c(self.tackling),
            flair: c(self.flair),
        }
    }

    pub fn effective(&self, fatigue_factor: f32) -> Self {
        self.map(|v| scale(v, fatigue_factor) as i32)
    }

    pub fn values(&self) -> [u8; 15] {
        [
            self.decisions,
            self.vision,
            self.anticipation,
            self.composure,
            self.concentration,
            self.bravery,
            self.teamwork,
            self.off_ball_movement,
            self.aggression,
            self.determination,
            self.leadership,
            self.positioning,
            self.marking,
            self.tackling,
            self.flair,
        ]
    }
}

/// Raw attribute groups as stored on the persistent player record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAttributes {
    pub physical: PhysicalAttributes,
    pub technical: TechnicalAttributes,
    pub mental: MentalAttributes,
}

impl PlayerAttributes {
    /// Every attribute set to `value` (handy for `overall`-only inputs).
    pub fn uniform(value: u8) -> Self {
        Self {
            physical: PhysicalAttributes::uniform(value),
            technical: TechnicalAttributes::uniform(value),
            mental: MentalAttributes::uniform(value),
        }
    }

    /// Re-clamp every value into 1..=100 (raw records may carry 0).
    pub fn clamped(&self) -> Self {
        Self {
            physical: self.physical.map(|v| v as i32),
            technical: self.technical.map(|v| v as i32),
            mental: self.mental.map(|v| v as i32),
        }
    }
}

/// Immutable per-match rating set.
///
/// Construct through [`AttributeSnapshot::build`] (or the engine's kickoff
/// code); fields are private so nothing can mutate a snapshot mid-match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSnapshot {
    physical: PhysicalAttributes,
    technical: TechnicalAttributes,
    mental: MentalAttributes,
}

/// Modifiers supplied by the personality collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonalityModifiers {
    pub composure: i8,
    pub decisions: i8,
}

impl AttributeSnapshot {
    /// Build a snapshot from raw attributes plus personality and morale.
    ///
    /// Morale multiplies every attribute (clamped to 0.8..=1.2 first),
    /// personality adds to composure and decisions afterwards.
    pub fn build(
        raw: &PlayerAttributes,
        personality: PersonalityModifiers,
        morale_multiplier: f32,
    ) -> Self {
        let morale = if morale_multiplier.is_finite() {
            morale_multiplier.clamp(0.8, 1.2)
        } else {
            1.0
        };
        let apply = |v: u8| (v as f32 * morale).round() as i32;

        let physical = raw.physical.map(apply);
        let technical = raw.technical.map(apply);
        let mut mental = raw.mental.map(apply);
        mental.composure = clamp_attr(mental.composure as i32 + personality.composure as i32);
        mental.decisions = clamp_attr(mental.decisions as i32 + personality.decisions as i32);

        Self { physical, technical, mental }
    }

    /// Snapshot without collaborator modifiers.
    pub fn from_raw(raw: &PlayerAttributes) -> Self {
        Self::build(raw, PersonalityModifiers::default(), 1.0)
    }

    /// Fallback keeper used when nobody is left to stand in goal.
    pub fn default_keeper() -> Self {
        Self::from_raw(&PlayerAttributes::uniform(30))
    }

    pub fn physical(&self) -> &PhysicalAttributes {
        &self.physical
    }

    pub fn technical(&self) -> &TechnicalAttributes {
        &self.technical
    }

    pub fn mental(&self) -> &MentalAttributes {
        &self.mental
    }

    /// Fatigue-adjusted view. Component-wise `<=` the snapshot.
    pub fn effective(&self, fatigue_factor: f32) -> EffectiveAttributes {
        EffectiveAttributes {
            physical: self.physical.effective(fatigue_factor),
            technical: self.technical.effective(fatigue_factor),
            mental: self.mental.effective(fatigue_factor),
        }
    }
}

/// Derived attributes for one evaluation. Not stored between minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveAttributes {
    pub physical: PhysicalAttributes,
    pub technical: TechnicalAttributes,
    pub mental: MentalAttributes,
}

impl EffectiveAttributes {
    /// True when no component exceeds the snapshot's.
    pub fn is_bounded_by(&self, snapshot: &AttributeSnapshot) -> bool {
        fn le<const N: usize>(a: [u8; N], b: [u8; N]) -> bool {
            a.iter().zip(b.iter()).all(|(x, y)| x <= y)
        }
        le(self.physical.values(), snapshot.physical.values())
            && le(self.technical.values(), snapshot.technical.values())
            && le(self.mental.values(), snapshot.mental.values())
    }
}
