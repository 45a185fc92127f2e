// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod donations;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::migration::{load_instructions, DEFAULT_SQL_PATH};

/// Food-donation platform operator tools
#[derive(Parser, Debug)]
#[command(name = "foodshare-ops")]
#[command(about = "Operator tools for the food-donation database", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a SQL migration and the steps to apply it
    MigrationInstructions(MigrationArgs),

    /// Summarize the donations table
    CheckDonations(donations::CheckDonationsArgs),
}

/// Arguments for migration-instructions command
#[derive(Args, Debug)]
pub struct MigrationArgs {
    /// Migration script to print
    #[arg(long, default_value = DEFAULT_SQL_PATH)]
    pub sql: PathBuf,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::MigrationInstructions(args) => {
            print!("{}", load_instructions(&args.sql)?);
            println!("\n📝 Please execute this SQL in your Supabase Dashboard");
            Ok(())
        }
        Commands::CheckDonations(args) => donations::check_donations(args).await,
    }
}
