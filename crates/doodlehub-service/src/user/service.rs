//! User provisioning, profile, and usage summary.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use doodlehub_auth::Claims;
use doodlehub_core::config::quota::QuotaConfig;
use doodlehub_core::error::{AppError, ErrorKind};
use doodlehub_core::result::AppResult;
use doodlehub_core::types::pagination::{PageRequest, PageResponse};
use doodlehub_database::repositories::activity::ActivityRepository;
use doodlehub_database::repositories::user::UserRepository;
use doodlehub_entity::activity::Activity;
use doodlehub_entity::user::model::CreateUser;
use doodlehub_entity::user::User;

use crate::context::RequestContext;

/// Today's usage against the caller's plan limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSummary {
    /// Generations committed today.
    pub used_today: u32,
    /// Daily limit, `None` for unlimited.
    pub daily_limit: Option<u32>,
    /// Generations left today, `None` for unlimited.
    pub remaining: Option<u32>,
}

/// Handles user provisioning and self-service reads.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    activities: Arc<ActivityRepository>,
    quota: QuotaConfig,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<UserRepository>,
        activities: Arc<ActivityRepository>,
        quota: QuotaConfig,
    ) -> Self {
        Self {
            users,
            activities,
            quota,
        }
    }

    /// Find the user for a verified token, provisioning on first sight.
    ///
    /// The auth provider owns identity; our row is created lazily from
    /// the token claims the first time a valid token shows up.
    pub async fn ensure_user(&self, claims: &Claims) -> AppResult<User> {
        if let Some(user) = self.users.find_by_id(claims.user_id()).await? {
            return Ok(user);
        }

        let data = CreateUser {
            display_name: claims.name.clone(),
            ..CreateUser::member(claims.user_id(), claims.email.clone())
        };

        match self.users.create(&data).await {
            Ok(user) => {
                info!(user_id = %user.id, "Provisioned new user from token");
                Ok(user)
            }
            // Two concurrent first requests can race the insert; the row
            // exists now either way.
            Err(e) if e.kind == ErrorKind::Conflict => self
                .users
                .find_by_id(claims.user_id())
                .await?
                .ok_or_else(|| AppError::internal("User vanished after conflict")),
            Err(e) => Err(e),
        }
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Today's usage for the current user.
    pub async fn usage(&self, ctx: &RequestContext) -> AppResult<UsageSummary> {
        let user = self.get_profile(ctx).await?;

        if user.is_premium() {
            return Ok(UsageSummary {
                used_today: 0,
                daily_limit: None,
                remaining: None,
            });
        }

        let today = Utc::now().date_naive();
        let used_today = if user.generation_count_date == Some(today) {
            user.generation_count.max(0) as u32
        } else {
            0
        };

        Ok(UsageSummary {
            used_today,
            daily_limit: Some(self.quota.free_daily_limit),
            remaining: Some(self.quota.free_daily_limit.saturating_sub(used_today)),
        })
    }

    /// The current user's own activity log, newest first.
    pub async fn activities(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Activity>> {
        self.activities.find_by_user(ctx.user_id, &page).await
    }
}
