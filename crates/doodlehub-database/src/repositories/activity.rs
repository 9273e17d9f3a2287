//! Activity log repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use doodlehub_core::error::{AppError, ErrorKind};
use doodlehub_core::result::AppResult;
use doodlehub_core::types::pagination::{PageRequest, PageResponse};
use doodlehub_entity::activity::{Activity, ActivityKind, CreateActivity};

/// Repository for the append-only activity log.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a new activity entry.
    pub async fn create(&self, data: &CreateActivity) -> AppResult<Activity> {
        sqlx::query_as::<_, Activity>(
            "INSERT INTO activities (user_id, kind, prompt, image_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.kind)
        .bind(&data.prompt)
        .bind(&data.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record activity", e))
    }

    /// List a user's activity, newest first.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Activity>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count activities", e)
            })?;

        let activities = sqlx::query_as::<_, Activity>(
            "SELECT * FROM activities WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list activities", e))?;

        Ok(PageResponse::new(
            activities,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List all activity with an optional kind filter, newest first.
    pub async fn find_all(
        &self,
        kind: Option<ActivityKind>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Activity>> {
        let (count_sql, select_sql) = if kind.is_some() {
            (
                "SELECT COUNT(*) FROM activities WHERE kind = $1",
                "SELECT * FROM activities WHERE kind = $1 \
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            )
        } else {
            (
                "SELECT COUNT(*) FROM activities",
                "SELECT * FROM activities ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            )
        };

        let mut count_query = sqlx::query_scalar::<_, i64>(count_sql);
        let mut select_query = sqlx::query_as::<_, Activity>(select_sql);

        if let Some(k) = kind {
            count_query = count_query.bind(k);
            select_query = select_query.bind(k);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count activities", e)
        })?;

        let activities = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list activities", e)
            })?;

        Ok(PageResponse::new(
            activities,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Number of activities recorded at or after the given instant.
    pub async fn count_since(&self, since: DateTime<Utc>) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM activities WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count recent activities", e)
            })
    }

    /// Total number of activities.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM activities")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count activities", e)
            })
    }
}
