//! CLI module
//!
//! - `serve`: run the account HTTP API
//! - `migrate`: apply (or revert) the PostgreSQL schema and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// User account lifecycle and credential validation service
#[derive(Parser)]
#[command(name = "account-lifecycle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Run database migrations
    Migrate(migrate::MigrateArgs),
}
