use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use courselens::config::Config;
use courselens::version;

use super::{BrowseCommand, SchemaCommand};

/// courselens - filter, sort and page through course reviews
#[derive(Parser)]
#[command(
    name = "courselens",
    version,
    about = version::APP_DESCRIPTION,
    long_about = r#"courselens loads a catalog snapshot and shows one page of it.

Examples:
  courselens browse --catalog courses.json
  courselens browse --min-rating 4 --hide-deprecated --sort workload
  courselens browse --sort name --sort name --page 2   # name, descending
  courselens schema --pretty"#
)]
pub struct Cli {
    /// Configuration file (defaults to ./courselens.json or the user config dir)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one page of the filtered, sorted catalog
    Browse(BrowseCommand),
    /// Print or check the catalog JSON schema
    Schema(SchemaCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        debug!("Starting {}", version::full_version());

        let config = Config::init(self.config.as_deref()).await?;
        debug!("Configuration initialized");

        match self.command {
            Commands::Browse(browse) => browse.execute(&config).await,
            Commands::Schema(schema) => schema.execute(&config).await,
        }
    }
}
