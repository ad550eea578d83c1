use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::config::EngineConfig;
use crate::engine::match_sim::MatchEngine;
use crate::error::{MatchError, Result};
use crate::models::{MatchContext, MatchResult, PlayerAttributes, PlayerRecord, Position, Tactics, TeamLineup};
use crate::SCHEMA_VERSION;

/// Id base for players without an explicit id (home 1.., away 1001..).
const HOME_AUTO_ID_BASE: u32 = 1;
const AWAY_AUTO_ID_BASE: u32 = 1001;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: TeamData,
    pub away_team: TeamData,
    #[serde(default)]
    pub context: MatchContext,
    /// Preset name (realistic, arcade, simulation, core_only). Ignored when
    /// `config` is given.
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamData {
    pub name: String,
    /// Exactly 11 starters, at least one goalkeeper.
    pub players: Vec<PlayerData>,
    #[serde(default)]
    pub bench: Vec<PlayerData>,
    #[serde(default)]
    pub tactics: Tactics,
}

/// Either full attribute groups or an `overall` shortcut.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerData {
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub overall: Option<u8>,
    #[serde(default)]
    pub attributes: Option<PlayerAttributes>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub energy: Option<f32>,
    #[serde(default)]
    pub temperament: Option<u8>,
    #[serde(default)]
    pub season_yellow_cards: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub seed: u64,
    #[serde(flatten)]
    pub result: MatchResult,
}

fn convert_player(data: PlayerData, auto_id: u32) -> Result<PlayerRecord> {
    let attributes = match (data.attributes, data.overall) {
        (Some(attributes), _) => attributes,
        (None, Some(overall)) => PlayerAttributes::uniform(overall),
        (None, None) => {
            return Err(MatchError::InvalidRequest(format!(
                "player '{}' needs either attributes or overall",
                data.name
            )))
        }
    };
    let mut record = PlayerRecord::new(data.id.unwrap_or(auto_id), data.name, data.position, attributes);
    if let Some(age) = data.age {
        record = record.with_age(age);
    }
    if let Some(energy) = data.energy {
        record = record.with_energy(energy);
    }
    if let Some(temperament) = data.temperament {
        record = record.with_temperament(temperament);
    }
    record.season_yellow_cards = data.season_yellow_cards;
    Ok(record)
}

fn convert_team(data: TeamData, auto_id_base: u32) -> Result<TeamLineup> {
    let TeamData { name, players, bench, tactics } = data;
    let starters_len = players.len() as u32;
    let starters = players
        .into_iter()
        .enumerate()
        .map(|(i, p)| convert_player(p, auto_id_base + i as u32))
        .collect::<Result<Vec<_>>>()?;
    let bench = bench
        .into_iter()
        .enumerate()
        .map(|(i, p)| convert_player(p, auto_id_base + starters_len + i as u32))
        .collect::<Result<Vec<_>>>()?;
    Ok(TeamLineup::new(name, starters).with_bench(bench).with_tactics(tactics))
}

fn resolve_config(config: Option<EngineConfig>, profile: Option<&str>) -> Result<EngineConfig> {
    match (config, profile) {
        (Some(config), _) => Ok(config),
        (None, Some(name)) => EngineConfig::from_profile(name)
            .ok_or_else(|| MatchError::InvalidRequest(format!("unknown profile '{}'", name))),
        (None, None) => Ok(EngineConfig::default()),
    }
}

/// A request converted into engine inputs.
#[derive(Debug, Clone)]
pub struct PreparedMatch {
    pub home: TeamLineup,
    pub away: TeamLineup,
    pub context: MatchContext,
    pub config: EngineConfig,
    pub seed: u64,
}

impl MatchRequest {
    /// Check the schema version, resolve the config and convert both teams.
    /// Lineup validation is left to the engine.
    pub fn prepare(self) -> Result<PreparedMatch> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(MatchError::UnsupportedSchema(self.schema_version));
        }
        let MatchRequest { seed, home_team, away_team, context, profile, config, .. } = self;
        let config = resolve_config(config, profile.as_deref())?;
        let home = convert_team(home_team, HOME_AUTO_ID_BASE)?;
        let away = convert_team(away_team, AWAY_AUTO_ID_BASE)?;
        Ok(PreparedMatch { home, away, context, config, seed })
    }
}

/// Parse and run a request; the typed core of [`simulate_match_json`].
pub fn simulate_request(request: MatchRequest) -> Result<MatchResponse> {
    let PreparedMatch { home, away, context, config, seed } = request.prepare()?;

    debug!("Simulating {} vs {} (seed {})", home.name, away.name, seed);
    let mut engine = MatchEngine::from_seed(&home, &away, context, config, seed)?;
    let result = engine.simulate_full_match();
    info!(
        "Match finished: {} {}-{} {}",
        result.home_team,
        result.score_home,
        result.score_away,
        result.away_team
    );

    Ok(MatchResponse { schema_version: SCHEMA_VERSION, seed, result })
}

/// JSON in, JSON out. Schema version 1.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let response = simulate_request(request)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use sha2::{Digest, Sha256};

    fn team_json(name: &str, first_id: u32) -> Value {
        let positions = ["GK", "DF", "DF", "DF", "DF", "MF", "MF", "MF", "MF", "FW", "FW"];
        let players: Vec<Value> = positions
            .iter()
            .enumerate()
            .map(|(i, pos)| json!({ "id": first_id + i as u32, "name": format!("{} {}", name, i), "position": pos, "overall": 65 }))
            .collect();
        json!({
            "name": name,
            "players": players,
            "bench": [
                { "id": first_id + 20, "name": format!("{} sub", name), "position": "GK", "overall": 55 }
            ]
        })
    }

    fn request(seed: u64) -> Value {
        json!({
            "schema_version": 1,
            "seed": seed,
            "home_team": team_json("Home", 1),
            "away_team": team_json("Away", 100)
        })
    }

    #[test]
    fn test_basic_simulation() {
        let out = simulate_match_json(&request(42).to_string()).expect("simulation");
        let parsed: Value = serde_json::from_str(&out).expect("json");
        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["seed"], 42);
        assert!(parsed["score_home"].is_number());
        assert!(parsed["events"].is_array());
        assert_eq!(parsed["players"].as_array().map(|p| p.len()), Some(24));
    }

    #[test]
    fn test_determinism() {
        let req = request(999).to_string();
        let a = simulate_match_json(&req).expect("a");
        let b = simulate_match_json(&req).expect("b");
        assert_eq!(Sha256::digest(a.as_bytes()), Sha256::digest(b.as_bytes()));
    }

    #[test]
    fn test_unsupported_schema() {
        let mut req = request(1);
        req["schema_version"] = json!(2);
        let err = simulate_match_json(&req.to_string()).expect_err("schema 2");
        assert!(matches!(err, MatchError::UnsupportedSchema(2)));
    }

    #[test]
    fn test_invalid_json() {
        let err = simulate_match_json("{ not json").expect_err("parse error");
        assert!(matches!(err, MatchError::Json(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_ten_starters_is_validation_error() {
        let mut req = request(1);
        if let Some(players) = req["home_team"]["players"].as_array_mut() {
            players.pop();
        }
        let err = simulate_match_json(&req.to_string()).expect_err("10 starters");
        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[test]
    fn test_player_without_attributes_rejected() {
        let mut req = request(1);
        req["home_team"]["players"][3] = json!({ "name": "Ghost", "position": "DF" });
        let err = simulate_match_json(&req.to_string()).expect_err("no attributes");
        assert!(matches!(err, MatchError::InvalidRequest(_)));
    }

    #[test]
    fn test_auto_ids_and_profile() {
        let mut req = request(5);
        for side in ["home_team", "away_team"] {
            if let Some(players) = req[side]["players"].as_array_mut() {
                for p in players.iter_mut() {
                    if let Some(obj) = p.as_object_mut() {
                        obj.remove("id");
                    }
                }
            }
            if let Some(obj) = req[side].as_object_mut() {
                obj.remove("bench");
            }
        }
        req["profile"] = json!("core_only");
        let parsed: MatchRequest = serde_json::from_value(req.clone()).expect("request");
        let response = simulate_request(parsed).expect("simulation");
        assert!(response.result.player(crate::models::PlayerId(1)).is_some());
        assert!(response.result.player(crate::models::PlayerId(1001)).is_some());

        req["profile"] = json!("turbo");
        let err = simulate_match_json(&req.to_string()).expect_err("unknown profile");
        assert!(matches!(err, MatchError::InvalidRequest(_)));
    }
}
