//! Ready-made squads for tests, benches and the CLI demo.

use crate::models::{PlayerAttributes, PlayerRecord, Position, TeamLineup};

/// 4-4-2 shape of the starting eleven.
const STARTING_POSITIONS: [Position; 11] = [
    Position::Goalkeeper,
    Position::Defender,
    Position::Defender,
    Position::Defender,
    Position::Defender,
    Position::Midfielder,
    Position::Midfielder,
    Position::Midfielder,
    Position::Midfielder,
    Position::Forward,
    Position::Forward,
];

const BENCH_POSITIONS: [Position; 7] = [
    Position::Goalkeeper,
    Position::Defender,
    Position::Defender,
    Position::Midfielder,
    Position::Midfielder,
    Position::Forward,
    Position::Forward,
];

/// Eleven starters plus seven substitutes, every attribute set to `overall`.
///
/// Ids are `first_id..first_id + 18`; use disjoint ranges for the two sides.
pub fn uniform_lineup(name: &str, first_id: u32, overall: u8) -> TeamLineup {
    let starters = STARTING_POSITIONS
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            PlayerRecord::new(
                first_id + i as u32,
                format!("{} {}{}", name, pos.short_code(), i + 1),
                pos,
                PlayerAttributes::uniform(overall),
            )
        })
        .collect();
    let bench = BENCH_POSITIONS
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            PlayerRecord::new(
                first_id + 11 + i as u32,
                format!("{} SUB{}", name, i + 1),
                pos,
                PlayerAttributes::uniform(overall.saturating_sub(5)),
            )
        })
        .collect();
    TeamLineup::new(name, starters).with_bench(bench)
}

/// Demo fixture: a slightly stronger home side.
pub fn demo_home() -> TeamLineup {
    uniform_lineup("Seoul United", 1, 68)
}

pub fn demo_away() -> TeamLineup {
    uniform_lineup("Busan City", 101, 64)
}
