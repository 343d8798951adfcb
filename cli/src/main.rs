use clap::Parser;
use colored::*;
use dotenv::dotenv;
use fluxhive_core::client::FluxClient;
use fluxhive_core::config::{get_default_config_file, FluxConfig};
use log::{error, LevelFilter};
use std::error::Error;

mod app;
mod cli;
mod output;

use crate::cli::Args;
use crate::output::print_usage_instructions;

/// Main function - Connects to the FLUX backend and runs the workflow
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load configuration from the default config file, if present
    let mut config = FluxConfig::default();
    if let Ok(path) = get_default_config_file("fluxhive") {
        match FluxConfig::load_from_file(&path) {
            Ok(file_config) => config = config.merge(&file_config),
            Err(e) => eprintln!(
                "{}",
                format!("Warning: ignoring config file {}: {}", path.display(), e).yellow()
            ),
        }
    }

    // Get log level from config or use default
    let log_level = config
        .log_level
        .as_deref()
        .map(|level| match level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => LevelFilter::Info,
        })
        .unwrap_or(LevelFilter::Info);

    // Initialize logger with configured log level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.to_string()),
    )
    .init();

    // Load environment variables (for backward compatibility)
    dotenv().ok();

    // Parse command-line arguments
    let args = Args::parse();

    // CLI flags and environment variables override the config file
    config = config.merge(&FluxConfig {
        backend_url: args.backend_url.clone(),
        realtime_url: args.realtime_url.clone(),
        request_timeout_secs: None,
        log_level: None,
    });

    let client = match FluxClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to initialize backend client: {}", e);
            eprintln!("{}", format!("Error initializing client: {}", e).red());
            return Err(e.into());
        }
    };

    // Dispatch based on arguments
    if let Some(command) = args.command {
        if let Err(e) = app::run_command(&client, &config, command).await {
            error!("Command failed: {}", e);
            eprintln!("{}", format!("{:#}", e).red());
            std::process::exit(1);
        }
    } else if args.interactive {
        if let Err(e) = app::run_interactive(&client, &config).await {
            error!("Interactive session failed: {}", e);
            eprintln!("{}", format!("Interactive session failed: {:#}", e).red());
        }
    } else if let Some(request) = args.request.clone() {
        if app::run_single_request(
            &client,
            &config,
            request,
            args.strategy.as_deref(),
            args.execute,
        )
        .await
        .is_err()
        {
            // Error is already printed in run_single_request
            std::process::exit(1);
        }
    } else {
        // No request and not interactive, show usage
        print_usage_instructions();
    }

    Ok(())
}
