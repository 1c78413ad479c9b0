//
//  atlas-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use atlas_cli::api::Fault;
use atlas_cli::cli::{Cli, Commands};
use atlas_cli::exit_codes;
use atlas_cli::output::OutputWriter;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments; usage errors share the uniform fault exit code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => handle_parse_error(err),
    };

    let writer = if cli.global.json {
        OutputWriter::json()
    } else {
        OutputWriter::text()
    };

    // Execute command
    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(err) => {
            let fault = Fault::normalize(err);
            writer.write_fault(&fault.to_string());
            std::process::exit(exit_codes::FAULT);
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("ATLAS_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Turns a clap parse error into process exit.
///
/// Help and version displays are successes. An incomplete command prints
/// its help but still carries the fault exit code. Everything else becomes
/// an `InvalidArguments` fault carrying clap's first message line. The
/// `--json` flag is honored even though parsing failed.
fn handle_parse_error(err: clap::Error) -> ! {
    let json = std::env::args().any(|arg| arg == "--json");
    let writer = if json {
        OutputWriter::json()
    } else {
        OutputWriter::text()
    };

    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            std::process::exit(exit_codes::SUCCESS);
        }
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            if json {
                let fault =
                    Fault::InvalidArguments("missing subcommand (see --help)".to_string());
                writer.write_fault(&fault.to_string());
            } else {
                let _ = err.print();
            }
            std::process::exit(exit_codes::FAULT);
        }
        _ => {
            let message = err
                .to_string()
                .lines()
                .next()
                .unwrap_or("invalid arguments")
                .trim_start_matches("error: ")
                .to_string();
            let fault = Fault::InvalidArguments(message);
            writer.write_fault(&fault.to_string());
            std::process::exit(exit_codes::FAULT);
        }
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Issue(cmd) => cmd.run(&cli.global).await,
        Commands::Version(cmd) => cmd.run(&cli.global).await,
        Commands::Project(cmd) => cmd.run(&cli.global).await,
        Commands::Page(cmd) => cmd.run(&cli.global).await,
        Commands::Space(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
    }
}
