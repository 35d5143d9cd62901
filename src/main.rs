// src/main.rs

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use bookshelf::application::commands::{run_command, Cli, CommandOutput};
use bookshelf::application::state::AppState;
use bookshelf::application::ErrorResponse;
use bookshelf::infrastructure::{init_logging, ApiConfig};
use bookshelf::AppResult;

#[tokio::main]
async fn main() -> ExitCode {
    // 1. LOGGING
    init_logging();

    // 2. CONFIGURATION
    let cli = Cli::parse();
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => return report(&ErrorResponse::from_app_error(&e)),
    };
    info!("Using library API at {}", config.base_url);

    // 3. APPLICATION STATE
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => return report(&ErrorResponse::from_app_error(&e)),
    };

    // 4. DISPATCH
    match run_command(&state, cli.command).await {
        Ok(output) => {
            let healthy = !matches!(output, CommandOutput::Health { healthy: false });
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to render output: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            if healthy {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(response) => report(&response),
    }
}

/// Config file and environment first, then command-line flags
fn resolve_config(cli: &Cli) -> AppResult<ApiConfig> {
    let mut config = ApiConfig::load()?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs))?;
    }
    Ok(config)
}

fn report(response: &ErrorResponse) -> ExitCode {
    error!("{}", response.message);
    println!("{}", response.to_json());
    ExitCode::FAILURE
}
