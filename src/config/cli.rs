use crate::config::toml_config::AppConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "space-travel.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "space-travel")]
#[command(about = "Interactive shell for managing clients, planets and travel tickets")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the database path from the configuration file
    #[arg(long)]
    pub database: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Apply pending migrations and enter the interactive shell
    Start,
    /// Apply pending migrations and exit
    Migrate,
}

impl CliConfig {
    /// Merges defaults, the configuration file and command-line overrides.
    ///
    /// An explicit `--config` must exist; the default file is optional.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                AppConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => AppConfig::default(),
        };

        if let Some(database) = &self.database {
            config.database.path = database.clone();
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }

        Ok(config)
    }
}
