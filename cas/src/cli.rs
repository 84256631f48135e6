// cas/src/cli.rs
//! Defines the command-line argument structure using clap.
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use cas_common::error::Result;

pub mod get;
pub mod search;
pub mod validate;

use crate::cli::get::Get;
use crate::cli::search::Search;
use crate::cli::validate::Validate;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "cas", bin_name = "cas")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// API key; overrides CAS_API_KEY and the [cas] api_key config entry
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check registry numbers offline
    Validate(Validate),
    /// Show the full record for a registry number
    Get(Get),
    /// Search records by name, synonym or registry number
    Search(Search),
}

impl Command {
    pub async fn run(&self, api_key: Option<&str>) -> Result<ExitCode> {
        match self {
            Self::Validate(command) => Ok(if command.run() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }),
            Self::Get(command) => command.run(api_key).await,
            Self::Search(command) => command.run(api_key).await,
        }
    }
}
