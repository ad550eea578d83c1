//! Push-only output collaborators.
//!
//! The engine pushes every event as it is appended to the log. A missing
//! sink is a no-op; sinks can never influence the simulation.

use crate::models::{EventKind, MatchEvent, MatchResult, TeamSide};

pub trait NarrationSink {
    /// `score` is (home, away) after the event.
    fn narrate(&mut self, event: &MatchEvent, score: (u8, u8));
}

pub trait StatisticsSink {
    fn record(&mut self, event: &MatchEvent);

    /// Called once after finalization.
    fn finish(&mut self, _result: &MatchResult) {}
}

impl StatisticsSink for Vec<MatchEvent> {
    fn record(&mut self, event: &MatchEvent) {
        self.push(event.clone());
    }
}

/// Plain-text commentary lines, one per event.
#[derive(Debug, Clone, Default)]
pub struct TextNarrator {
    home: String,
    away: String,
    lines: Vec<String>,
}

impl TextNarrator {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self { home: home.into(), away: away.into(), lines: Vec::new() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn team(&self, side: Option<TeamSide>) -> &str {
        match side {
            Some(TeamSide::Home) => &self.home,
            Some(TeamSide::Away) => &self.away,
            None => "",
        }
    }
}

impl NarrationSink for TextNarrator {
    fn narrate(&mut self, event: &MatchEvent, score: (u8, u8)) {
        let team = self.team(event.side);
        let who = event.player.map(|p| p.to_string()).unwrap_or_default();
        let text = match &event.kind {
            EventKind::Goal { xg, set_piece } => match set_piece {
                Some(kind) => format!("GOAL {} {} ({:?}, xG {:.2}) {}-{}", team, who, kind, xg, score.0, score.1),
                None => format!("GOAL {} {} (xG {:.2}) {}-{}", team, who, xg, score.0, score.1),
            },
            EventKind::Shot { outcome, xg, distance_m, is_header } => format!(
                "{} {} {} from {:.0}m{} (xG {:.2})",
                team,
                who,
                match outcome {
                    crate::models::ShotOutcome::Goal => "scores",
                    crate::models::ShotOutcome::Saved => "is denied",
                    crate::models::ShotOutcome::Missed => "misses",
                },
                distance_m,
                if *is_header { ", header" } else { "" },
                xg
            ),
            EventKind::Card { color, suspension_triggered } => format!(
                "{:?} card {} {}{}",
                color,
                team,
                who,
                if *suspension_triggered { " (suspended next match)" } else { "" }
            ),
            EventKind::Foul => format!("Foul by {} {}", team, who),
            EventKind::Substitution => {
                let on = event.target.map(|p| p.to_string()).unwrap_or_default();
                format!("Substitution {}: {} off, {} on", team, who, on)
            }
            EventKind::Injury => format!("Injury {} {}", team, who),
            EventKind::SetPiece { kind } => format!("{:?} for {}", kind, team),
            EventKind::PhaseChange { phase } => format!("-- {} ({}-{})", phase, score.0, score.1),
        };
        self.lines.push(format!("{:>3}' {}", event.minute, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::phase::MatchPhase;
    use crate::models::PlayerId;

    #[test]
    fn test_text_narrator_formats_goal_and_phase() {
        let mut narrator = TextNarrator::new("Reds", "Blues");
        narrator.narrate(&MatchEvent::goal(12, TeamSide::Home, PlayerId(9), None, 0.31, None), (1, 0));
        narrator.narrate(&MatchEvent::phase_change(45, MatchPhase::HalfTime), (1, 0));

        let lines = narrator.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("GOAL Reds #9"));
        assert!(lines[0].contains("1-0"));
        assert!(lines[1].contains("half time"));
    }

    #[test]
    fn test_vec_collects_events() {
        let mut sink: Vec<MatchEvent> = Vec::new();
        sink.record(&MatchEvent::foul(3, TeamSide::Away, PlayerId(4), None));
        assert_eq!(sink.len(), 1);
    }
}
