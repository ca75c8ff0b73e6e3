mod cli;

use anyhow::{Context, Result};
use city_forecast::display::render_state;
use city_forecast::{
    ForecastConfig, ForecastError, SearchOutcome, SearchSession, SearchState, WeatherApiClient,
    logging,
};
use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = ForecastConfig::load_from_path(cli.config.clone())
        .with_context(|| "Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;
    debug!("Using base URL {}", config.weather.base_url);

    let client = WeatherApiClient::new(&config)?;
    let session = Arc::new(SearchSession::new(Arc::new(client)));

    match cli.command {
        Commands::Search { city } => {
            if city.trim().is_empty() {
                return Err(ForecastError::validation("City cannot be empty").into());
            }
            let state = match session.search(&city).await {
                SearchOutcome::Applied(state) => state,
                _ => session.snapshot(),
            };
            print_state(&city, &state, cli.json)?;
            Ok(if state.error.is_some() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Interactive => {
            interactive(session, cli.json).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Every line starts its own search; only the latest one is shown.
async fn interactive(session: Arc<SearchSession>, json: bool) -> Result<()> {
    eprintln!("Enter a city per line (Ctrl-D to quit)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut searches = JoinSet::new();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let city = line.trim().to_string();
        if city.is_empty() {
            continue;
        }
        let session = Arc::clone(&session);
        searches.spawn(async move {
            if let SearchOutcome::Applied(state) = session.search(&city).await {
                if let Err(e) = print_state(&city, &state, json) {
                    eprintln!("Error: {e:#}");
                }
            }
        });
    }

    while searches.join_next().await.is_some() {}
    Ok(())
}

fn print_state(city: &str, state: &SearchState, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(state).context("Failed to serialize forecast")?;
        println!("{out}");
    } else {
        println!("{}", render_state(city, state));
    }
    Ok(())
}
