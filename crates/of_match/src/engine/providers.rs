//! Input collaborators queried once per player when snapshots are built.
//!
//! Personality and morale systems live outside the engine; they only hand
//! in modifiers. [`Neutral`] is used when the host has none.

use std::collections::HashMap;

use crate::models::{PersonalityModifiers, PlayerId, PlayerRecord};

pub trait PersonalityProvider {
    /// Additive composure/decisions modifiers.
    fn modifiers(&self, player: &PlayerRecord) -> PersonalityModifiers;
}

pub trait MoraleProvider {
    /// Performance multiplier; the snapshot clamps it to 0.8..=1.2.
    fn morale_multiplier(&self, player: &PlayerRecord) -> f32;
}

/// No personality modifiers, morale 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neutral;

impl PersonalityProvider for Neutral {
    fn modifiers(&self, _player: &PlayerRecord) -> PersonalityModifiers {
        PersonalityModifiers::default()
    }
}

impl MoraleProvider for Neutral {
    fn morale_multiplier(&self, _player: &PlayerRecord) -> f32 {
        1.0
    }
}

impl PersonalityProvider for HashMap<PlayerId, PersonalityModifiers> {
    fn modifiers(&self, player: &PlayerRecord) -> PersonalityModifiers {
        self.get(&player.id).copied().unwrap_or_default()
    }
}

impl MoraleProvider for HashMap<PlayerId, f32> {
    fn morale_multiplier(&self, player: &PlayerRecord) -> f32 {
        self.get(&player.id).copied().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerAttributes, Position};

    #[test]
    fn test_map_providers_default_to_neutral() {
        let known = PlayerRecord::new(1, "Known", Position::Midfielder, PlayerAttributes::uniform(50));
        let other = PlayerRecord::new(2, "Other", Position::Midfielder, PlayerAttributes::uniform(50));

        let mut personality = HashMap::new();
        personality.insert(PlayerId(1), PersonalityModifiers { composure: 5, decisions: 3 });
        let mut morale = HashMap::new();
        morale.insert(PlayerId(1), 1.15f32);

        assert_eq!(personality.modifiers(&known).composure, 5);
        assert_eq!(personality.modifiers(&other), PersonalityModifiers::default());
        assert!((morale.morale_multiplier(&known) - 1.15).abs() < 1e-6);
        assert!((morale.morale_multiplier(&other) - 1.0).abs() < 1e-6);
        assert!((Neutral.morale_multiplier(&known) - 1.0).abs() < 1e-6);
    }
}
