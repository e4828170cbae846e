pub mod health;
pub mod projects;
pub mod users;

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the page route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                   redirect to /projects
///
/// /projects                           list (GET), create (POST)
/// /projects/live                      live list session (WebSocket)
/// /projects/create                    create form
/// /projects/{id}/edit                 edit form
/// /projects/{id}                      update (POST)
/// /projects/{id}/delete               delete (POST)
///
/// /users                              list (?page=)
/// /users/{id}/edit                    edit form
/// /users/{id}                         update (POST, multipart)
/// /users/{id}/delete                  delete (POST)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/projects") }))
        .nest("/projects", projects::router())
        .nest("/users", users::router())
}
