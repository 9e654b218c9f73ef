// Offline batch generation of per-game obtainability snapshots.
//
// Fetches each game's regional dex, applies the override and encounter
// rules, and writes one JSON record per game so the interactive path can
// avoid runtime API spam.

use pokemon_planner::availability::{AvailabilityRecord, generate_record, load_snapshot};
use pokemon_planner::client::{ClientError, PokeApiClient};
use pokemon_planner::config::Config;
use pokemon_planner::games::{GAMES, GameInfo};
use pokemon_planner::species::ChainCache;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Custom error types for better error handling
#[derive(Debug)]
pub enum GenerateError {
    ConfigError(String),
    ApiError(ClientError),
    IoError(String),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            GenerateError::ApiError(e) => write!(f, "API error: {}", e),
            GenerateError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<ClientError> for GenerateError {
    fn from(err: ClientError) -> Self {
        GenerateError::ApiError(err)
    }
}

impl From<std::io::Error> for GenerateError {
    fn from(err: std::io::Error) -> Self {
        GenerateError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for GenerateError {
    fn from(err: toml::de::Error) -> Self {
        GenerateError::ConfigError(err.to_string())
    }
}

fn load_config() -> Result<Config, GenerateError> {
    Config::load().map_err(|e| {
        tracing::error!("Failed to parse config.toml: {}", e);
        GenerateError::from(e)
    })
}

async fn generate_for_game(
    client: &PokeApiClient,
    chains: &ChainCache,
    game: &GameInfo,
    output_dir: &Path,
    request_delay: Duration,
) -> Result<AvailabilityRecord, GenerateError> {
    tracing::info!("Processing: {} ({})", game.name, game.id);

    // A previous snapshot doubles as a cache of known-obtainable species
    let previous = load_snapshot(output_dir, game.id);
    if let Some(prev) = &previous {
        tracing::info!(
            "{}: loaded existing data, {} species already marked obtainable",
            game.id,
            prev.obtainable.len()
        );
    }

    let record = generate_record(client, chains, game, previous.as_ref(), request_delay).await?;

    let path = output_dir.join(format!("{}.json", game.id));
    let encoded = serde_json::to_string_pretty(&record)
        .map_err(|e| GenerateError::IoError(e.to_string()))?;
    std::fs::write(&path, encoded)?;
    tracing::info!(
        "{}: saved {} obtainable species to {}",
        game.id,
        record.total_obtainable,
        path.display()
    );

    Ok(record)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=info,pokemon_planner=info", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let output_dir = Path::new(&config.generator.output_dir).to_path_buf();
    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        tracing::error!("Failed to create output directory {}: {}", output_dir.display(), e);
        std::process::exit(1);
    }

    let client = PokeApiClient::new(&config.api, &config.cache);
    let chains = ChainCache::new(config.cache.clone());
    let request_delay = Duration::from_millis(config.generator.request_delay_ms);

    tracing::info!("Starting availability data generation for {} games", GAMES.len());
    let started = Instant::now();

    let mut generated = 0usize;
    let mut failed = 0usize;
    for game in GAMES {
        // One game's failure never aborts the rest of the batch
        match generate_for_game(&client, &chains, game, &output_dir, request_delay).await {
            Ok(_) => generated += 1,
            Err(e) => {
                failed += 1;
                tracing::error!("Error processing {}: {}", game.name, e);
            }
        }
    }

    tracing::info!(
        "Done: {} games generated, {} failed, in {:.2}s (output: {})",
        generated,
        failed,
        started.elapsed().as_secs_f64(),
        output_dir.display()
    );
}
