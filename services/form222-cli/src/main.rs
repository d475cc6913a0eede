//! PharmReturn Form 222 CLI
//!
//! Normalizes scanned NDC identifiers and generates, validates and exports
//! DEA Form 222 transfer orders for Schedule II returns.

use clap::Parser;
use tracing::debug;

use pharmreturn_utils::{init_logging, AppConfig, ComplianceError, ErrorResponse};

mod cli;
mod commands;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(error) => {
            let code = report_error(ComplianceError::from(error).into(), cli.json);
            std::process::exit(code);
        }
    };
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    if let Err(error) = init_logging(&config.logging) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    debug!(environment = ?std::env::var("ENVIRONMENT").ok(), "Configuration loaded");

    let result = match &cli.command {
        Command::Scan(args) => commands::run_scan(args, cli.json),
        Command::Ndc(args) => commands::run_ndc(args, cli.json),
        Command::Generate(args) => commands::run_generate(args, &config, cli.json),
        Command::Validate(args) => commands::run_validate(args, cli.json),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(error) => report_error(error, cli.json),
    };
    std::process::exit(exit_code);
}

fn report_error(error: anyhow::Error, json: bool) -> i32 {
    let (code, response) = match error.downcast_ref::<ComplianceError>() {
        Some(compliance) => {
            let mut response = ErrorResponse::from(compliance.clone());
            response.message = format!("{:#}", error);
            (compliance.exit_code(), response)
        }
        None => (
            1,
            ErrorResponse {
                error: error.to_string(),
                code: "ERROR".to_string(),
                message: format!("{:#}", error),
                details: None,
            },
        ),
    };

    if json {
        match serde_json::to_string(&response) {
            Ok(line) => eprintln!("{}", line),
            Err(_) => eprintln!("error: {}", response.message),
        }
    } else {
        eprintln!("error: {}", response.message);
    }

    code
}
