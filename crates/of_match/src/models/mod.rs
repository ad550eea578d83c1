pub mod attributes;
pub mod context;
pub mod events;
pub mod match_result;
pub mod player;
pub mod team;

pub use attributes::{
    AttributeSnapshot, EffectiveAttributes, MentalAttributes, PersonalityModifiers,
    PhysicalAttributes, PlayerAttributes, TechnicalAttributes,
};
pub use context::{MatchContext, Weather};
pub use events::{CardColor, EventKind, EventType, MatchEvent, SetPieceKind, ShotOutcome};
pub use match_result::{MatchResult, PlayerMatchSummary, TeamStats};
pub use player::{PlayerId, PlayerRecord, PlayerRepository, Position};
pub use team::{
    Formation, MarkingType, PressIntensity, Tactics, TeamLineup, TeamSide, Tempo, STARTERS,
};
