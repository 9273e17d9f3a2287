//! Activity log review commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::str::FromStr;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use doodlehub_core::error::AppError;
use doodlehub_core::types::pagination::PageRequest;
use doodlehub_database::repositories::activity::ActivityRepository;
use doodlehub_entity::activity::ActivityKind;

/// Arguments for activity commands
#[derive(Debug, Args)]
pub struct ActivityArgs {
    /// Activity subcommand
    #[command(subcommand)]
    pub command: ActivityCommand,
}

/// Activity subcommands
#[derive(Debug, Subcommand)]
pub enum ActivityCommand {
    /// List recent activity
    List {
        /// Filter by kind (coloring, tracing)
        #[arg(short, long)]
        kind: Option<String>,
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: u64,
    },
}

/// Activity display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ActivityRow {
    /// Activity ID
    id: String,
    /// Owning user
    user: String,
    /// Kind
    kind: String,
    /// Prompt
    prompt: String,
    /// Created at
    created_at: String,
}

/// Execute activity commands
pub async fn execute(
    args: &ActivityArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path).await?;
    let pool = super::create_db_pool(&config).await?;
    let activity_repo = ActivityRepository::new(pool);

    match &args.command {
        ActivityCommand::List { kind, limit } => {
            let kind = kind.as_deref().map(ActivityKind::from_str).transpose()?;
            let page = activity_repo
                .find_all(kind, &PageRequest::new(1, *limit))
                .await?;

            let rows: Vec<ActivityRow> = page
                .items
                .iter()
                .map(|a| ActivityRow {
                    id: a.id.to_string(),
                    user: a
                        .user_id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "guest".to_string()),
                    kind: a.kind.to_string(),
                    prompt: a.prompt.clone(),
                    created_at: a.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
    }

    Ok(())
}
