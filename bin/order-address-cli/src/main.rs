//! CLI for deriving order addresses and bootstrapping the base key.

mod cli;
mod config;
mod handlers;

use anyhow::{Context, Error, Result};
use clap::Parser;
use order_address_common::logging::{self, LoggerConfig};

use crate::handlers::{address, seed, verify};

fn main() -> Result<(), Error> {
    ignore_missing_env_file(dotenvy::dotenv().map(|_| ()))?;

    logging::init(LoggerConfig::new("order-address-cli".to_string()));

    let cli = cli::Cli::parse();
    match cli.command {
        cli::Commands::Seed(args) => seed::handle_seed(args),
        cli::Commands::Address(args) => address::handle_address(args),
        cli::Commands::Verify(args) => verify::handle_verify(args),
    }
}

/// A missing `.env` file is fine, a malformed one is not.
fn ignore_missing_env_file(loaded: Result<(), dotenvy::Error>) -> Result<()> {
    match loaded {
        Err(e) if e.not_found() => Ok(()),
        other => other.context("failed to load .env file"),
    }
}
