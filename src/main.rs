mod cli;
mod client;
mod config;
mod error;
mod grocery;
mod planner;
mod preferences;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.run().await
}
