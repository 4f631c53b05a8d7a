//! calcountdown CLI entry point.

use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;

use calcountdown_client::cli::{Cli, Command, ConfigAction};
use calcountdown_client::commands;
use calcountdown_client::config::CountdownConfig;
use calcountdown_client::error::{ClientResult, EXIT_ERROR};
use calcountdown_client::registry::CountdownRegistry;
use calcountdown_core::{OutputFormat, TracingConfig, init_tracing};
use calcountdown_providers::HttpConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.debug) {
        eprintln!("error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_status())
        }
    }
}

fn init_logging(debug: bool) -> ClientResult<()> {
    let config = if debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    init_tracing(config)?;
    Ok(())
}

async fn run(cli: Cli) -> ClientResult<ExitCode> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(CountdownConfig::default_path);

    if let Command::Config { action } = &cli.command {
        match action {
            ConfigAction::Dump => commands::config::dump(&config_path)?,
            ConfigAction::Validate => commands::config::validate(&config_path)?,
            ConfigAction::Path => commands::config::path(&config_path)?,
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = CountdownConfig::load_from(&config_path)?;
    let http = HttpConfig::default().with_timeout(Duration::from_secs(cli.timeout));
    let registry = CountdownRegistry::from_config(&config, &http)?;
    let now = Utc::now();

    match cli.command {
        Command::Next { query, json } => {
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            println!("{}", commands::query::next(&registry, &query, format, now).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::InEvent { query } => {
            let busy = commands::query::in_event(&registry, &query, now).await?;
            println!("{}", if busy { "yes" } else { "no" });
            Ok(ExitCode::from(commands::query::in_event_status(busy)))
        }
        Command::Help { query } => {
            for line in commands::query::help(&registry, &query)? {
                println!("{}", line);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { .. } => Ok(ExitCode::SUCCESS),
    }
}
