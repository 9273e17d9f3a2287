//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::str::FromStr;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use doodlehub_core::error::AppError;
use doodlehub_core::types::pagination::PageRequest;
use doodlehub_database::repositories::user::UserRepository;
use doodlehub_entity::user::{UserPlan, UserStatus};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users
    List {
        /// Filter by plan (free, premium)
        #[arg(short, long)]
        plan: Option<String>,
        /// Maximum number of users to show
        #[arg(short, long, default_value = "50")]
        limit: u64,
    },
    /// Change a user's plan
    SetPlan {
        /// User email
        email: String,
        /// Target plan (free, premium)
        plan: String,
    },
    /// Re-enable a disabled user
    Enable {
        /// User email
        email: String,
    },
    /// Disable a user
    Disable {
        /// User email
        email: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Plan
    plan: String,
    /// Role
    role: String,
    /// Status
    status: String,
    /// Generations today
    used_today: i32,
    /// Created at
    created_at: String,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path).await?;
    let pool = super::create_db_pool(&config).await?;
    let user_repo = UserRepository::new(pool);

    match &args.command {
        UserCommand::List { plan, limit } => {
            let plan = plan.as_deref().map(UserPlan::from_str).transpose()?;
            let page = user_repo
                .find_all(plan, None, &PageRequest::new(1, *limit))
                .await?;

            let rows: Vec<UserRow> = page
                .items
                .iter()
                .map(|u| UserRow {
                    id: u.id.to_string(),
                    email: u.email.clone(),
                    plan: u.plan.to_string(),
                    role: u.role.to_string(),
                    status: u.status.to_string(),
                    used_today: u.generation_count,
                    created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
        UserCommand::SetPlan { email, plan } => {
            let plan = UserPlan::from_str(plan)?;
            let user = find_by_email(&user_repo, email).await?;
            user_repo.set_plan(user.id, plan).await?;
            output::print_success(&format!("User '{}' moved to plan '{}'", email, plan));
        }
        UserCommand::Enable { email } => {
            let user = find_by_email(&user_repo, email).await?;
            user_repo.set_status(user.id, UserStatus::Active).await?;
            output::print_success(&format!("User '{}' enabled", email));
        }
        UserCommand::Disable { email } => {
            let user = find_by_email(&user_repo, email).await?;
            user_repo.set_status(user.id, UserStatus::Disabled).await?;
            output::print_success(&format!("User '{}' disabled", email));
        }
    }

    Ok(())
}

/// Look up a user by email or fail with not-found.
async fn find_by_email(
    repo: &UserRepository,
    email: &str,
) -> Result<doodlehub_entity::user::User, AppError> {
    repo.find_by_email(email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{}' not found", email)))
}
