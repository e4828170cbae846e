//! Route definitions for the `/projects` pages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::projects;
use crate::live;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                 -> index (list state in the query string)
/// POST   /                 -> create
/// GET    /live             -> live list session (WebSocket)
/// GET    /create           -> create_form
/// GET    /{id}/edit        -> edit
/// POST   /{id}             -> update
/// POST   /{id}/delete      -> destroy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::index).post(projects::create))
        .route("/live", get(live::projects_live))
        .route("/create", get(projects::create_form))
        .route("/{id}/edit", get(projects::edit))
        .route("/{id}", post(projects::update))
        .route("/{id}/delete", post(projects::destroy))
}
