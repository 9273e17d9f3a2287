//! CLI command definitions and dispatch.

pub mod activity;
pub mod migrate;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use doodlehub_core::error::AppError;

/// DoodleHub — AI coloring pages and handwriting worksheets
#[derive(Debug, Parser)]
#[command(name = "doodlehub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the DoodleHub server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Activity log review
    Activity(activity::ActivityArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Activity(args) => activity::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub async fn load_config(config_path: &str) -> Result<doodlehub_core::config::AppConfig, AppError> {
    doodlehub_core::config::AppConfig::load_from(config_path)
}

/// Helper: create database pool from config
pub async fn create_db_pool(
    config: &doodlehub_core::config::AppConfig,
) -> Result<sqlx::PgPool, AppError> {
    let pool = doodlehub_database::connection::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
