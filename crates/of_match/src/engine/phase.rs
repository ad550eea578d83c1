//! Match phase state machine.
//!
//! ```text
//! PreMatch → FirstHalf(1..=45) → HalfTime → SecondHalf(46..=90)
//!          → Stoppage(91..=90+k) → FullTime
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

pub const HALF_TIME_MINUTE: u8 = 45;
pub const REGULATION_MINUTES: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    #[default]
    PreMatch,
    FirstHalf,
    HalfTime,
    SecondHalf,
    Stoppage,
    FullTime,
}

impl MatchPhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, MatchPhase::FullTime)
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchPhase::PreMatch => "pre-match",
            MatchPhase::FirstHalf => "first half",
            MatchPhase::HalfTime => "half time",
            MatchPhase::SecondHalf => "second half",
            MatchPhase::Stoppage => "stoppage time",
            MatchPhase::FullTime => "full time",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&MatchPhase::HalfTime).unwrap(), "\"half_time\"");
        assert_eq!(serde_json::to_string(&MatchPhase::FullTime).unwrap(), "\"full_time\"");
        assert!(MatchPhase::FullTime.is_finished());
        assert!(!MatchPhase::Stoppage.is_finished());
        assert_eq!(MatchPhase::Stoppage.to_string(), "stoppage time");
    }
}
