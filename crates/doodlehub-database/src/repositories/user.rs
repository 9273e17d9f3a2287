//! User repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use doodlehub_core::error::{AppError, ErrorKind};
use doodlehub_core::result::AppResult;
use doodlehub_core::types::pagination::{PageRequest, PageResponse};
use doodlehub_entity::user::model::CreateUser;
use doodlehub_entity::user::{User, UserPlan, UserStatus};

/// Repository for user CRUD, quota counter, and billing-link operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

/// The daily generation counter slice of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct GenerationCounter {
    /// Generations recorded for `count_date`.
    pub generation_count: i32,
    /// The calendar day the count belongs to.
    pub generation_count_date: Option<NaiveDate>,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Find a user by their payment-processor customer id.
    pub async fn find_by_billing_customer(&self, customer_id: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE billing_customer_id = $1")
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by customer", e)
            })
    }

    /// Find a user by their active subscription id.
    pub async fn find_by_billing_subscription(
        &self,
        subscription_id: &str,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE billing_subscription_id = $1")
            .bind(subscription_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by subscription", e)
            })
    }

    /// List users with optional plan/status filters.
    pub async fn find_all(
        &self,
        plan: Option<UserPlan>,
        status: Option<UserStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if plan.is_some() {
            conditions.push(format!("plan = ${param_idx}"));
            param_idx += 1;
        }
        if status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM users {where_clause}");
        let select_sql = format!(
            "SELECT * FROM users {where_clause} ORDER BY created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, User>(&select_sql);

        if let Some(p) = plan {
            count_query = count_query.bind(p);
            select_query = select_query.bind(p);
        }
        if let Some(s) = status {
            count_query = count_query.bind(s);
            select_query = select_query.bind(s);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(
            users,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, display_name, plan, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(data.id)
        .bind(&data.email)
        .bind(&data.display_name)
        .bind(data.plan)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict(format!("Email '{}' is already registered", data.email))
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_pkey") => {
                AppError::conflict("User already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Update a user's display name.
    pub async fn update_display_name(&self, id: Uuid, display_name: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET display_name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(display_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Change a user's plan.
    pub async fn set_plan(&self, id: Uuid, plan: UserPlan) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET plan = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(plan)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set user plan", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Change a user's account status.
    pub async fn set_status(&self, id: Uuid, status: UserStatus) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set user status", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Store the payment-processor identifiers after a completed checkout.
    pub async fn set_billing_link(
        &self,
        id: Uuid,
        customer_id: &str,
        subscription_id: &str,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET billing_customer_id = $2, billing_subscription_id = $3, \
             plan = 'premium', updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(customer_id)
        .bind(subscription_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to link billing", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Drop the subscription link and revert the user to the free plan.
    pub async fn clear_billing_link(&self, id: Uuid) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET billing_subscription_id = NULL, plan = 'free', \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unlink billing", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Read the daily generation counter for a user.
    pub async fn generation_counter(&self, id: Uuid) -> AppResult<GenerationCounter> {
        sqlx::query_as::<_, GenerationCounter>(
            "SELECT generation_count, generation_count_date FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read counter", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Reset the daily generation counter to zero for a new calendar day.
    pub async fn reset_generation_counter(&self, id: Uuid, today: NaiveDate) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET generation_count = 0, generation_count_date = $2 WHERE id = $1",
        )
        .bind(id)
        .bind(today)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reset counter", e))?;
        Ok(())
    }

    /// Atomically add one generation to the user's daily counter.
    ///
    /// A single statement so concurrent commits never lose increments.
    pub async fn increment_generation_counter(&self, id: Uuid, today: NaiveDate) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE users SET generation_count = generation_count + 1, \
             generation_count_date = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING generation_count",
        )
        .bind(id)
        .bind(today)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to increment counter", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Total number of users.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))
    }

    /// Number of users on a given plan.
    pub async fn count_by_plan(&self, plan: UserPlan) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE plan = $1")
            .bind(plan)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count users by plan", e)
            })
    }
}
