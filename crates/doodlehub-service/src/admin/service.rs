//! Admin console: user management, activity review, totals.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use doodlehub_core::error::AppError;
use doodlehub_core::result::AppResult;
use doodlehub_core::types::pagination::{PageRequest, PageResponse};
use doodlehub_database::repositories::activity::ActivityRepository;
use doodlehub_database::repositories::newsletter::NewsletterRepository;
use doodlehub_database::repositories::user::UserRepository;
use doodlehub_entity::activity::{Activity, ActivityKind};
use doodlehub_entity::user::{User, UserPlan, UserStatus};

use crate::context::RequestContext;

/// Aggregate counters for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStats {
    /// Total registered users.
    pub total_users: i64,
    /// Users on the premium plan.
    pub premium_users: i64,
    /// Generations recorded today.
    pub activities_today: i64,
    /// Active newsletter subscriptions.
    pub newsletter_subscribers: i64,
}

/// Admin-only operations. Every method checks the caller's role.
#[derive(Debug, Clone)]
pub struct AdminService {
    users: Arc<UserRepository>,
    activities: Arc<ActivityRepository>,
    newsletter: Arc<NewsletterRepository>,
}

impl AdminService {
    /// Creates a new admin service.
    pub fn new(
        users: Arc<UserRepository>,
        activities: Arc<ActivityRepository>,
        newsletter: Arc<NewsletterRepository>,
    ) -> Self {
        Self {
            users,
            activities,
            newsletter,
        }
    }

    /// Reject non-admin callers.
    fn require_admin(ctx: &RequestContext) -> AppResult<()> {
        if ctx.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization("Admin access required"))
        }
    }

    /// List users with optional filters.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        plan: Option<UserPlan>,
        status: Option<UserStatus>,
        page: PageRequest,
    ) -> AppResult<PageResponse<User>> {
        Self::require_admin(ctx)?;
        self.users.find_all(plan, status, &page).await
    }

    /// Fetch one user.
    pub async fn get_user(&self, ctx: &RequestContext, id: Uuid) -> AppResult<User> {
        Self::require_admin(ctx)?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Change a user's plan.
    pub async fn set_plan(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        plan: UserPlan,
    ) -> AppResult<User> {
        Self::require_admin(ctx)?;
        let user = self.users.set_plan(id, plan).await?;
        info!(admin = %ctx.user_id, user_id = %id, plan = %plan, "Admin changed user plan");
        Ok(user)
    }

    /// Change a user's account status.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: UserStatus,
    ) -> AppResult<User> {
        Self::require_admin(ctx)?;
        if ctx.user_id == id && status == UserStatus::Disabled {
            return Err(AppError::validation("Admins cannot disable themselves"));
        }
        let user = self.users.set_status(id, status).await?;
        info!(admin = %ctx.user_id, user_id = %id, status = %status, "Admin changed user status");
        Ok(user)
    }

    /// Review the activity log with an optional kind filter.
    pub async fn list_activities(
        &self,
        ctx: &RequestContext,
        kind: Option<ActivityKind>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Activity>> {
        Self::require_admin(ctx)?;
        self.activities.find_all(kind, &page).await
    }

    /// Aggregate dashboard counters.
    pub async fn stats(&self, ctx: &RequestContext) -> AppResult<AdminStats> {
        Self::require_admin(ctx)?;

        let midnight = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();

        Ok(AdminStats {
            total_users: self.users.count().await?,
            premium_users: self.users.count_by_plan(UserPlan::Premium).await?,
            activities_today: self.activities.count_since(midnight).await?,
            newsletter_subscribers: self.newsletter.count_active().await?,
        })
    }
}
