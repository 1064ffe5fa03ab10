// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! CLI for `arena-deploy`.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

mod commands;
mod common_args;
mod constants;
mod error;
mod utils;

#[derive(Debug, Parser)]
#[command(name = "arena-deploy")]
#[command(author = "Offchain Labs, Inc.")]
#[command(about = "Deploy the NFTArena contract and publish its address for the front-end", long_about = None)]
#[command(propagate_version = true)]
#[command(version)]
struct Args {
    /// Runs `deploy` with the manifest defaults when omitted.
    #[command(subcommand)]
    command: Option<commands::Command>,

    /// Path to the manifest [default: ./Arena.toml]
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Whether to print debug info.
    #[arg(long, global = true)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Signing keys may be kept in a .env file
    dotenvy::dotenv().ok();

    let log_level = if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(log_level).expect("setting up logger");

    let command = args.command.unwrap_or_default();
    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(Into::into)
        .and_then(|rt| rt.block_on(commands::exec(command, args.config.as_deref())));

    // Report any error and return proper exit code
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            utils::print_error(&err);
            err.exit_code()
        }
    }
}
