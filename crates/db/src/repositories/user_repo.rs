//! Repository for the `users` table.

use sqlx::SqlitePool;
use tabula_core::listing::{clamp_page, page_offset, Page, PAGE_SIZE};
use tabula_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User, UserRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, email, number, department_id, avatar, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, number, department_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.number)
            .bind(input.department_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of users ordered by name, with the department name joined.
    pub async fn list_page(pool: &SqlitePool, page: i64) -> Result<Page<UserRow>, sqlx::Error> {
        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        let page = clamp_page(page, total_count, PAGE_SIZE);

        let items = sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.name, u.email, u.number, d.name AS department_name, u.avatar
             FROM users u
             LEFT JOIN departments d ON d.id = u.department_id
             ORDER BY u.name ASC, u.id ASC
             LIMIT $1 OFFSET $2",
        )
        .bind(PAGE_SIZE)
        .bind(page_offset(page, PAGE_SIZE))
        .fetch_all(pool)
        .await?;

        Ok(Page {
            items,
            page,
            page_size: PAGE_SIZE,
            total_count,
        })
    }

    /// Write every edited field of a user in one statement. The stored
    /// avatar is kept when `input.avatar` is `None`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = $2,
                email = $3,
                number = $4,
                department_id = $5,
                avatar = COALESCE($6, avatar),
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.number)
            .bind(input.department_id)
            .bind(&input.avatar)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user, returning the removed row so callers can clean up
    /// resources it referenced. Returns `None` if the user did not exist.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("DELETE FROM users WHERE id = $1 RETURNING {COLUMNS}");
        let deleted = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        if deleted.is_some() {
            tracing::debug!(user_id = id, "User row deleted");
        }
        Ok(deleted)
    }
}
