//! Repository for the `projects` table.

use sqlx::SqlitePool;
use tabula_core::listing::{clamp_page, page_offset, ListState, Page, SortColumn, PAGE_SIZE};
use tabula_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectRow, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, status_id, category_id, priority_id, created_at, updated_at";

/// List projection: the project plus the joined lookup names.
const ROW_SELECT: &str = "\
    SELECT p.id, p.name, p.status_id, p.category_id, p.priority_id, \
           s.name AS status_name, c.name AS category_name, pr.name AS priority_name, \
           p.created_at \
    FROM projects p \
    LEFT JOIN statuses s ON s.id = p.status_id \
    LEFT JOIN categories c ON c.id = p.category_id \
    LEFT JOIN priorities pr ON pr.id = p.priority_id";

/// Conjunction of the active filters. An unbound (NULL) parameter disables
/// its clause. `$1` is a ready-made LIKE pattern.
const FILTER_CLAUSE: &str = "\
    WHERE ($1 IS NULL OR p.name LIKE $1 ESCAPE '\\') \
      AND ($2 IS NULL OR p.status_id = $2) \
      AND ($3 IS NULL OR p.category_id = $3) \
      AND ($4 IS NULL OR p.priority_id = $4)";

const TOUCH_UPDATED_AT: &str = "updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Provides CRUD and list queries for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, status_id, category_id, priority_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(input.status_id)
            .bind(input.category_id)
            .bind(input.priority_id)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of projects matching every active filter in `state`.
    ///
    /// The requested page is clamped against the filtered total before rows
    /// are fetched, so the returned `page` may differ from `state.page`.
    /// Rows with equal sort values are ordered by id.
    pub async fn list_page(
        pool: &SqlitePool,
        state: &ListState,
    ) -> Result<Page<ProjectRow>, sqlx::Error> {
        let name_pattern = like_pattern(&state.filters.name);
        let filters = &state.filters;

        let count_query = format!("SELECT COUNT(*) FROM projects p {FILTER_CLAUSE}");
        let total_count: i64 = sqlx::query_scalar(&count_query)
            .bind(&name_pattern)
            .bind(filters.status_id)
            .bind(filters.category_id)
            .bind(filters.priority_id)
            .fetch_one(pool)
            .await?;

        let page = clamp_page(state.page, total_count, PAGE_SIZE);
        let query = format!(
            "{ROW_SELECT} {FILTER_CLAUSE} ORDER BY {} {}, p.id ASC LIMIT $5 OFFSET $6",
            order_expression(state.sort.column),
            state.sort.direction.as_str(),
        );
        let items = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(&name_pattern)
            .bind(filters.status_id)
            .bind(filters.category_id)
            .bind(filters.priority_id)
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

    /// Overwrite every editable field of a project.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $2,
                status_id = $3,
                category_id = $4,
                priority_id = $5,
                {TOUCH_UPDATED_AT}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.status_id)
            .bind(input.category_id)
            .bind(input.priority_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// SQL expression ordering by a sort column. Aggregate columns order by
/// the joined lookup name.
fn order_expression(column: SortColumn) -> &'static str {
    match column {
        SortColumn::Id => "p.id",
        SortColumn::Name => "p.name",
        SortColumn::StatusName => "status_name",
        SortColumn::CategoryName => "category_name",
        SortColumn::PriorityName => "priority_name",
    }
}

/// `%term%` with LIKE metacharacters in `term` escaped, or `None` for an
/// empty term. The term itself is passed through untouched.
fn like_pattern(term: &str) -> Option<String> {
    if term.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Some(pattern)
}
