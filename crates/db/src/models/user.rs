//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tabula_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub number: String,
    pub department_id: Option<DbId>,
    /// Path of the stored avatar, relative to the upload root.
    pub avatar: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user as shown in the users index.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub number: String,
    pub department_name: Option<String>,
    pub avatar: Option<String>,
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub number: String,
    pub department_id: Option<DbId>,
}

/// DTO for the user edit form.
///
/// All text fields are written. `avatar` is only replaced when `Some`.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
    pub number: String,
    pub department_id: DbId,
    pub avatar: Option<String>,
}
