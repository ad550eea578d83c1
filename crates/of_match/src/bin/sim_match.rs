//! Match simulator CLI
//!
//! JSON request (or built-in demo fixture) → MatchResult JSON / text commentary.
//!
//!   sim_match --seed 42
//!   sim_match --request match.json --text
//!   sim_match --profile arcade --batch 1000
//!
//! Log level via RUST_LOG (default: info).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use of_match::api::{MatchRequest, PreparedMatch};
use of_match::engine::{run_batch, MatchEngine, TextNarrator};
use of_match::fixtures::{demo_away, demo_home};
use of_match::{EngineConfig, MatchContext, SCHEMA_VERSION};

#[derive(Parser)]
#[command(name = "sim_match")]
#[command(about = "Simulate a football match minute by minute", long_about = None)]
struct Cli {
    /// JSON match request (schema version 1). Demo teams when omitted.
    #[arg(long)]
    request: Option<PathBuf>,

    /// Overrides the request seed
    #[arg(long)]
    seed: Option<u64>,

    /// Engine preset: realistic, arcade, simulation, core_only
    #[arg(long)]
    profile: Option<String>,

    /// YAML engine config (takes precedence over --profile)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print commentary and a summary instead of JSON
    #[arg(long, default_value = "false")]
    text: bool,

    /// Simulate N matches in parallel and print aggregate statistics
    #[arg(long)]
    batch: Option<u32>,
}

fn load_match(cli: &Cli) -> Result<PreparedMatch> {
    let mut prepared = match &cli.request {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading request {}", path.display()))?;
            let request: MatchRequest = serde_json::from_str(&text).context("parsing match request")?;
            request.prepare()?
        }
        None => PreparedMatch {
            home: demo_home(),
            away: demo_away(),
            context: MatchContext::default().with_home_advantage(0.03),
            config: EngineConfig::from_env_or_default(),
            seed: 42,
        },
    };

    if let Some(seed) = cli.seed {
        prepared.seed = seed;
    }
    if let Some(name) = &cli.profile {
        prepared.config =
            EngineConfig::from_profile(name).with_context(|| format!("unknown profile '{}'", name))?;
    }
    if let Some(path) = &cli.config {
        prepared.config = EngineConfig::from_yaml_file(path)?;
    }
    Ok(prepared)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let PreparedMatch { home, away, context, config, seed } = load_match(&cli)?;

    if let Some(count) = cli.batch {
        let summary = run_batch(&home, &away, context, &config, seed, count)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if cli.text {
        let mut narrator = TextNarrator::new(home.name.clone(), away.name.clone());
        let result = {
            let mut engine =
                MatchEngine::from_seed(&home, &away, context, config, seed)?.with_narration(&mut narrator);
            engine.simulate_full_match()
        };
        for line in narrator.lines() {
            println!("{}", line);
        }
        println!();
        println!(
            "{} {} - {} {}  (xG {:.2} - {:.2}, possession {:.1}%)",
            result.home_team,
            result.score_home,
            result.score_away,
            result.away_team,
            result.home.xg,
            result.away.xg,
            result.possession_home
        );
        return Ok(());
    }

    let mut engine = MatchEngine::from_seed(&home, &away, context, config, seed)?;
    let result = engine.simulate_full_match();
    let response = of_match::MatchResponse { schema_version: SCHEMA_VERSION, seed, result };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
