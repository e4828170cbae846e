//! Project entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tabula_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub status_id: DbId,
    pub category_id: Option<DbId>,
    pub priority_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project as shown in the list view, with the lookup names joined in
/// so rendering needs no per-row fetches.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRow {
    pub id: DbId,
    pub name: String,
    pub status_id: DbId,
    pub category_id: Option<DbId>,
    pub priority_id: Option<DbId>,
    pub status_name: Option<String>,
    pub category_name: Option<String>,
    pub priority_name: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub status_id: DbId,
    pub category_id: Option<DbId>,
    pub priority_id: Option<DbId>,
}

/// DTO for the project edit form. Every editable field is written.
pub type UpdateProject = CreateProject;
