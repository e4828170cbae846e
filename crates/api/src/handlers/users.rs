//! Handlers for the `/users` pages.

use std::collections::{BTreeMap, HashMap};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tabula_core::forms::{user_rules, AVATAR_FIELD};
use tabula_core::types::DbId;
use tabula_core::validation::FieldErrors;
use tabula_db::models::lookup::{option_ids, LookupOption, LookupTable};
use tabula_db::models::user::{UpdateUser, User};
use tabula_db::repositories::{LookupRepo, UserRepo};
use tabula_db::DbPool;
use tera::Context;

use crate::error::{AppError, AppResult};
use crate::flash::{self, Flash};
use crate::forms::read_multipart;
use crate::state::AppState;
use crate::views::{avatar_url, form_values, UserListView, USERS_PATH};

const FORM_FIELDS: &[&str] = &["name", "email", "number", "department_id"];

/// GET /users
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    flash: Flash,
) -> AppResult<Response> {
    let page = params
        .get("page")
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(1);
    let users = UserRepo::list_page(&state.pool, page).await?;

    let mut context = Context::new();
    context.insert("list", &UserListView::build(users));
    context.insert("flash", &flash.message());

    let html = state.templates.render("users/index.html", &context)?;
    Ok(flash.respond(html))
}

/// GET /users/{id}/edit
pub async fn edit(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    let user = find(&state.pool, id).await?;
    let departments = LookupRepo::list(&state.pool, LookupTable::Departments).await?;
    let values = user_values(&user);
    render_form(&state, &user, &departments, values, &FieldErrors::new(), StatusCode::OK)
}

/// POST /users/{id}
///
/// Either every field is written or nothing is. A new avatar is stored
/// before the row update and discarded again if the update fails; the
/// replaced avatar is removed only after the update succeeded.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Response> {
    let user = find(&state.pool, id).await?;
    let departments = LookupRepo::list(&state.pool, LookupTable::Departments).await?;

    let input = read_multipart(multipart).await?;
    let old = input.text_values();
    let form = match user_rules(&option_ids(&departments)).validate(input) {
        Ok(form) => form,
        Err(errors) => {
            tracing::debug!(user_id = id, errors = %errors, "User form rejected");
            return render_form(
                &state,
                &user,
                &departments,
                old,
                &errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
    };

    let avatar = match form.file(AVATAR_FIELD) {
        Some(file) => Some(state.avatars.store(file).await?),
        None => None,
    };

    let changes = UpdateUser {
        name: form.required_text("name")?.to_string(),
        email: form.required_text("email")?.to_string(),
        number: form.required_text("number")?.to_string(),
        department_id: form.required_integer("department_id")?,
        avatar: avatar.clone(),
    };

    let updated = match UserRepo::update(&state.pool, id, &changes).await {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            discard(&state, avatar.as_deref()).await;
            return Err(AppError::not_found("User", id));
        }
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            discard(&state, avatar.as_deref()).await;
            let mut errors = FieldErrors::new();
            errors.add("email", "The email has already been taken.");
            return render_form(
                &state,
                &user,
                &departments,
                old,
                &errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
        Err(e) => {
            discard(&state, avatar.as_deref()).await;
            return Err(e.into());
        }
    };

    if avatar.is_some() {
        if let Some(previous) = user.avatar.as_deref() {
            discard(&state, Some(previous)).await;
        }
    }

    tracing::info!(user_id = updated.id, "User updated");
    Ok(flash::success("Customer updated with success.", USERS_PATH))
}

/// POST /users/{id}/delete
///
/// Deletes the row, then the avatar it referenced.
pub async fn destroy(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    let user = UserRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    discard(&state, user.avatar.as_deref()).await;

    tracing::info!(user_id = id, "User deleted");
    Ok(flash::success("Deleted", USERS_PATH))
}

async fn find(pool: &DbPool, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))
}

/// Best-effort file cleanup; the database is already consistent.
async fn discard(state: &AppState, avatar: Option<&str>) {
    if let Some(path) = avatar {
        if let Err(e) = state.avatars.remove(path).await {
            tracing::warn!(path = %path, error = %e, "Failed to remove avatar file");
        }
    }
}

fn user_values(user: &User) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("name".to_string(), user.name.clone()),
        ("email".to_string(), user.email.clone()),
        ("number".to_string(), user.number.clone()),
        (
            "department_id".to_string(),
            user.department_id.map(|d| d.to_string()).unwrap_or_default(),
        ),
    ])
}

fn render_form(
    state: &AppState,
    user: &User,
    departments: &[LookupOption],
    values: BTreeMap<String, String>,
    errors: &FieldErrors,
    status: StatusCode,
) -> AppResult<Response> {
    let mut context = Context::new();
    context.insert("title", &user.name);
    context.insert("action", &format!("{USERS_PATH}/{}", user.id));
    context.insert("delete_href", &format!("{USERS_PATH}/{}/delete", user.id));
    context.insert("avatar_url", &user.avatar.as_deref().map(avatar_url));
    context.insert("avatar_field", AVATAR_FIELD);
    context.insert("values", &form_values(FORM_FIELDS, values));
    context.insert("errors", errors);
    context.insert("departments", departments);

    let html = state.templates.render("users/edit.html", &context)?;
    Ok((status, html).into_response())
}
