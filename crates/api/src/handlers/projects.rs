//! Handlers for the `/projects` pages.

use std::collections::BTreeMap;

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Form;
use tabula_core::forms::{project_rules, ProjectChoices};
use tabula_core::listing::ListState;
use tabula_core::types::DbId;
use tabula_core::validation::{FieldErrors, FormInput, ValidatedForm};
use tabula_db::models::lookup::{option_ids, LookupTable};
use tabula_db::models::project::{CreateProject, Project};
use tabula_db::repositories::{LookupRepo, ProjectRepo};
use tabula_db::DbPool;
use tera::Context;

use crate::error::{AppError, AppResult};
use crate::flash::{self, Flash};
use crate::state::AppState;
use crate::views::{form_values, ProjectListView, ProjectLookups, PROJECTS_PATH};

const FORM_FIELDS: &[&str] = &["name", "status_id", "category_id", "priority_id"];

/// Statuses, categories and priorities, in id order.
pub async fn load_lookups(pool: &DbPool) -> Result<ProjectLookups, sqlx::Error> {
    Ok(ProjectLookups {
        statuses: LookupRepo::list(pool, LookupTable::Statuses).await?,
        categories: LookupRepo::list(pool, LookupTable::Categories).await?,
        priorities: LookupRepo::list(pool, LookupTable::Priorities).await?,
    })
}

fn choices(lookups: &ProjectLookups) -> ProjectChoices {
    ProjectChoices {
        status_ids: option_ids(&lookups.statuses),
        category_ids: option_ids(&lookups.categories),
        priority_ids: option_ids(&lookups.priorities),
    }
}

/// GET /projects
///
/// The query string is the whole list state. Malformed parameters fall
/// back to defaults and an out-of-range page is clamped.
pub async fn index(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    flash: Flash,
) -> AppResult<Response> {
    let list_state = ListState::from_query(query.as_deref().unwrap_or_default());
    let page = ProjectRepo::list_page(&state.pool, &list_state).await?;
    let lookups = load_lookups(&state.pool).await?;

    let mut context = Context::new();
    context.insert("list", &ProjectListView::build(&list_state, &page, false));
    context.insert("lookups", &lookups);
    context.insert("flash", &flash.message());

    let html = state.templates.render("projects/index.html", &context)?;
    Ok(flash.respond(html))
}

/// GET /projects/create
pub async fn create_form(State(state): State<AppState>) -> AppResult<Response> {
    let lookups = load_lookups(&state.pool).await?;
    render_form(&state, None, &lookups, BTreeMap::new(), &FieldErrors::new(), StatusCode::OK)
}

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let lookups = load_lookups(&state.pool).await?;
    let input = FormInput::from_pairs(pairs);
    let old = input.text_values();

    let form = match project_rules(&choices(&lookups)).validate(input) {
        Ok(form) => form,
        Err(errors) => {
            return render_form(&state, None, &lookups, old, &errors, StatusCode::UNPROCESSABLE_ENTITY)
        }
    };

    let project = ProjectRepo::create(&state.pool, &project_input(&form)?).await?;
    tracing::info!(project_id = project.id, "Project created");
    Ok(flash::success("Project created with success.", PROJECTS_PATH))
}

/// GET /projects/{id}/edit
pub async fn edit(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    let project = find(&state.pool, id).await?;
    let lookups = load_lookups(&state.pool).await?;
    render_form(
        &state,
        Some(id),
        &lookups,
        project_values(&project),
        &FieldErrors::new(),
        StatusCode::OK,
    )
}

/// POST /projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    find(&state.pool, id).await?;
    let lookups = load_lookups(&state.pool).await?;
    let input = FormInput::from_pairs(pairs);
    let old = input.text_values();

    let form = match project_rules(&choices(&lookups)).validate(input) {
        Ok(form) => form,
        Err(errors) => {
            return render_form(&state, Some(id), &lookups, old, &errors, StatusCode::UNPROCESSABLE_ENTITY)
        }
    };

    ProjectRepo::update(&state.pool, id, &project_input(&form)?)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    tracing::info!(project_id = id, "Project updated");
    Ok(flash::success("Project updated with success.", PROJECTS_PATH))
}

/// POST /projects/{id}/delete
pub async fn destroy(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Project", id));
    }
    tracing::info!(project_id = id, "Project deleted");
    Ok(flash::success("Deleted", PROJECTS_PATH))
}

async fn find(pool: &DbPool, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::not_found("Project", id))
}

fn project_input(form: &ValidatedForm) -> AppResult<CreateProject> {
    Ok(CreateProject {
        name: form.required_text("name")?.to_string(),
        status_id: form.required_integer("status_id")?,
        category_id: form.integer("category_id"),
        priority_id: form.integer("priority_id"),
    })
}

fn project_values(project: &Project) -> BTreeMap<String, String> {
    let id = |value: Option<DbId>| value.map(|v| v.to_string()).unwrap_or_default();
    BTreeMap::from([
        ("name".to_string(), project.name.clone()),
        ("status_id".to_string(), project.status_id.to_string()),
        ("category_id".to_string(), id(project.category_id)),
        ("priority_id".to_string(), id(project.priority_id)),
    ])
}

fn render_form(
    state: &AppState,
    id: Option<DbId>,
    lookups: &ProjectLookups,
    values: BTreeMap<String, String>,
    errors: &FieldErrors,
    status: StatusCode,
) -> AppResult<Response> {
    let (title, action) = match id {
        Some(id) => (format!("Project #{id}"), format!("{PROJECTS_PATH}/{id}")),
        None => ("New project".to_string(), PROJECTS_PATH.to_string()),
    };

    let mut context = Context::new();
    context.insert("title", &title);
    context.insert("action", &action);
    context.insert("delete_href", &id.map(|id| format!("{PROJECTS_PATH}/{id}/delete")));
    context.insert("values", &form_values(FORM_FIELDS, values));
    context.insert("errors", errors);
    context.insert("lookups", lookups);

    let html = state.templates.render("projects/form.html", &context)?;
    Ok((status, html).into_response())
}
