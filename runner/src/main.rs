mod autopilot;
mod runner_config;
mod session;

use clap::Parser;
use snake_engine::config::Validate;
use snake_engine::log;
use snake_engine::logger::{self, LogLevel};

use runner_config::{DEFAULT_CONFIG_FILE, get_config_manager};

#[derive(Parser)]
#[command(name = "snake_runner", about = "Headless host that plays the snake engine with an autopilot")]
struct Args {
    /// YAML config file; defaults are used when it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Seed for food placement and the autopilot
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games, overrides the config file
    #[arg(long)]
    games: Option<u32>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Also log every food event and lifecycle change
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = args.use_log_prefix.then(|| "Runner".to_string());
    let level = if args.verbose { LogLevel::Debug } else { LogLevel::Info };
    logger::init_logger(prefix, level);

    let mut config = get_config_manager(&args.config).get_config()?;
    if let Some(games) = args.games {
        config.games = games;
        config.validate()?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let summary = session::run_games(&config, seed).await?;

    log!(
        "Played {} game(s) with seed {}: scores {:?}, high score {}{}",
        summary.scores.len(),
        summary.seed,
        summary.scores,
        summary.high_score,
        if summary.interrupted { " (interrupted)" } else { "" }
    );

    Ok(())
}
