use std::path::PathBuf;
use std::process::ExitCode;

use arrsuite_core::dispatch::error_report;
use arrsuite_core::{AppConfig, ArrSuiteError, Dispatcher};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "arrsuite", version, about = "Route plain-language media requests to the right service")]
struct Cli {
    /// Config file to use instead of the user config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the parsed intent as JSON.
    Parse { query: String },
    /// Print the service, operation and context.
    Route { query: String },
    /// Explain how a request is interpreted.
    Explain { query: String },
    /// Plan the service action for a request.
    Plan { query: String },
    /// List services and whether each is enabled.
    Services,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("arrsuite: {e}");
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("arrsuite: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run one command. `Ok(false)` means the request was answered with an
/// error report rather than a result.
fn run(command: Command, config: &AppConfig) -> Result<bool, ArrSuiteError> {
    let dispatcher = Dispatcher::from_config(config)?;
    let engine = dispatcher.engine();

    match command {
        Command::Parse { query } => {
            print_json(&engine.parse_intent(&query));
        }
        Command::Route { query } => {
            let (service, operation, context) = engine.route(&query);
            println!("{} {}", service.as_str(), operation.as_str());
            print_json(&context);
        }
        Command::Explain { query } => {
            print!("{}", engine.explain_intent(&query));
        }
        Command::Plan { query } => match dispatcher.plan(&query) {
            Ok(plan) => print_json(&plan),
            Err(e @ ArrSuiteError::ServiceNotConfigured { .. }) => {
                print_json(&error_report(&e));
                return Ok(false);
            }
            Err(e) => return Err(e),
        },
        Command::Services => {
            for status in dispatcher.services() {
                let state = if status.enabled { "enabled" } else { "disabled" };
                println!("{:<10} {state}", status.service.as_str());
            }
        }
    }

    Ok(true)
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => tracing::error!(error = %e, "Failed to serialize output"),
    }
}
